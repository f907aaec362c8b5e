use crate::access_log::{ColumnLayout, DEFAULT_MAX_SOURCE_WIDTH, ReportFormatter, SOURCE_HEADER};
use crate::conf::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_LOG_DIR: &str = "/var/log/apache2";
pub const DEFAULT_ACCESS_GLOB: &str = "*.access.log*";
pub const DEFAULT_LINE_MARKER: &str = "HTTP/1.1";

/// Everything one report run needs to know.
///
/// Built once (file, then CLI overrides) and handed down explicitly; nothing below the
/// CLI reads process-wide state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportOptions {
    /// Directory searched when no input files are given
    pub log_dir: PathBuf,
    /// File-name pattern for access logs inside `log_dir`
    pub access_glob: String,
    pub follow_symlinks: bool,
    pub recurse: bool,
    /// Decompress gzip files instead of skipping them
    pub read_gzipped: bool,
    pub read_from_stdin: bool,
    pub input_files: Vec<PathBuf>,
    /// Report destination; stdout when unset
    pub output: Option<PathBuf>,
    /// Lines without this text are dropped before parsing. Empty keeps every line.
    pub line_marker: String,
    pub max_source_width: usize,
    pub layout: ColumnLayout,
    pub show_connections: bool,
    /// Worker threads for file sources; defaults to available parallelism
    pub jobs: Option<usize>,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            access_glob: DEFAULT_ACCESS_GLOB.to_string(),
            follow_symlinks: false,
            recurse: false,
            read_gzipped: false,
            read_from_stdin: false,
            input_files: Vec::new(),
            output: None,
            line_marker: DEFAULT_LINE_MARKER.to_string(),
            max_source_width: DEFAULT_MAX_SOURCE_WIDTH,
            layout: ColumnLayout::default(),
            show_connections: false,
            jobs: None,
        }
    }
}

impl ReportOptions {
    pub fn validate(&self) -> Result<(), ConfigError> {
        glob::Pattern::new(&self.access_glob).map_err(|source| ConfigError::Glob {
            pattern: self.access_glob.clone(),
            source,
        })?;

        if self.max_source_width < SOURCE_HEADER.len() {
            return Err(ConfigError::SourceWidthTooSmall {
                value: self.max_source_width,
                min: SOURCE_HEADER.len(),
            });
        }

        if self.jobs == Some(0) {
            return Err(ConfigError::NoJobs);
        }

        Ok(())
    }

    pub fn marker(&self) -> Option<&str> {
        Some(self.line_marker.as_str()).filter(|m| !m.is_empty())
    }

    pub fn formatter(&self) -> ReportFormatter {
        ReportFormatter::new(self.max_source_width)
            .with_layout(self.layout)
            .with_connections(self.show_connections)
    }

    pub fn jobs(&self) -> usize {
        self.jobs.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
    }
}
