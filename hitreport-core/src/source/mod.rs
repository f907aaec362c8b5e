//! Where raw access-log lines come from.
//!
//! A report reads from exactly one of: stdin, the files named on the command line, or the
//! access logs found under the configured log directory. Each of those becomes a
//! [`LogSource`] that can be opened independently, which is what lets file sources be
//! processed on separate threads.

mod discover;
mod error;
mod reader;

pub use discover::{WalkOptions, discover_logs, is_gzipped};
pub use error::SourceReadFailure;
pub use reader::{LineReader, LogSource, resolve_sources};
