//! Access Log Reporting Pipeline
//!
//! This module turns Apache "common" access-log lines into per-client summary tables.
//!
//! Every line goes through three steps:
//! - **Parse**: pull the fixed-order fields out of the line. Anything that does not fit the
//!   layout becomes a typed `ParseFailure` instead of a half-filled record
//! - **Aggregate**: group records by the client that sent them, keeping the order in which
//!   clients were first seen, and count the status codes we care about
//! - **Render**: draw one markdown table per client with padded, centred columns
//!
//! Aggregates built from different sources (files, stdin) can be merged, so sources may be
//! processed independently and combined afterwards.
//!
//! The overall data processing architecture is:
//!
//! raw line
//! parse_line
//! ConnectionRecord
//! LogAggregator / ClientGroups
//! ReportFormatter
//! markdown
//!

mod aggregate;
mod parse;
mod render;
mod status;
#[cfg(test)]
mod tests;
mod types;

pub use aggregate::{ClientGroup, ClientGroups, LogAggregator};
pub use parse::parse_line;
pub use render::{
    COUNT_COLUMN_WIDTH, ColumnLayout, DEFAULT_MAX_SOURCE_WIDTH, ReportFormatter, ReportSummary,
    SOURCE_HEADER, TABLE_RULE, center,
};
pub use status::{StatusTally, TrackedStatus};
pub use types::{ConnectionRecord, Field, ParseFailure};
