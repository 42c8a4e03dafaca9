use std::path::Path;

use habits_analysis::{section::SectionId, session::Session};

use crate::{
    command::dashboard::screens::ReportScreen,
    tui::{Runtime, ScreenStack},
    util,
};

mod screens;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct DashboardArg {
    /// Start with every subsection enabled
    #[arg(long)]
    all: bool,
}

pub(crate) fn run(data: &Path, arg: &DashboardArg) -> anyhow::Result<()> {
    let DashboardArg { all } = arg;

    eprintln!("Loading dataset from {}...", data.display());
    let table = util::read_data_file(data)?;
    eprintln!("Loaded {} students", table.len());

    let mut session = Session::new(table);
    if *all {
        for section in SectionId::ALL {
            session.set_enabled(section, true);
        }
    }

    let mut app = ScreenStack::new(Box::new(ReportScreen::new(session)));
    Runtime::new().run(&mut app)?;

    Ok(())
}
