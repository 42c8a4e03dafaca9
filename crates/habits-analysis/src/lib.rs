//! Dataset, charts and report assembly for the study habits dashboard.
//!
//! # Overview
//!
//! The report is a thin pipeline over a single cleaned table:
//!
//! 1. **Load** ([`dataset::DataTable`]): Read the CSV, keep the five required
//!    columns, drop missing and duplicate rows
//! 2. **Analyze** ([`section::Analysis`]): Run a statistical test from
//!    [`habits_stats`] on fixed columns
//! 3. **Bind charts** ([`chart::ChartSpec`]): Turn column selections into
//!    declarative scatter or box plot data
//! 4. **Present** ([`session::Session`]): Gate each subsection on its toggle and
//!    assemble a [`document::ReportDocument`]
//!
//! The document is rendered by the dashboard or converted to text with
//! [`markdown::to_markdown`].
//!
//! # Example
//!
//! ```
//! use habits_analysis::{
//!     dataset::DataTable,
//!     document::Block,
//!     section::{SectionId, Subsection, Variant},
//!     session::Session,
//! };
//!
//! let csv = "\
//! study_hours_per_day,sleep_hours,exam_score,part_time_job,attendance_percentage
//! 1.0,6.0,50.0,Yes,80.0
//! 2.0,7.5,62.0,No,85.0
//! 3.0,7.0,81.0,No,95.0
//! 4.0,8.0,88.0,Yes,90.0
//! ";
//! let table = DataTable::from_reader(csv.as_bytes()).unwrap();
//! let mut session = Session::new(table);
//! session.set_enabled(SectionId::new(Variant::Primary, Subsection::StudyScore), true);
//!
//! let document = session.render_variants(&[Variant::Primary]);
//! assert!(document.blocks.iter().any(|b| matches!(b, Block::Statistic { .. })));
//! ```

pub mod chart;
pub mod dataset;
pub mod document;
pub mod markdown;
pub mod performance;
pub mod section;
pub mod session;
