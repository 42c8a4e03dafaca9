pub use self::{preview::PreviewScreen, report::ReportScreen};

mod preview;
mod report;
