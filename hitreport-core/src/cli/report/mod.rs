//! The default command: read access logs and print the per-client report.
//!
//! stdin | files | log_dir
//! resolve_sources
//! LogSource (one per thread)
//! LogAggregator
//! merge (source order)
//! ReportFormatter
//! stdout | file

mod args;
mod run;

pub use args::ReportArgs;
pub use run::{Collected, RunSummary, collect_sources, run_report};
