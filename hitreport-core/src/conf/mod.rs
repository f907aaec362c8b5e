mod error;
mod loader;
mod options;
#[cfg(test)]
mod tests;

pub use error::ConfigError;
pub use loader::{load_options, parse_options};
pub use options::{DEFAULT_ACCESS_GLOB, DEFAULT_LINE_MARKER, DEFAULT_LOG_DIR, ReportOptions};
