use crate::access_log::ColumnLayout;
use crate::conf::{ConfigError, ReportOptions, load_options};
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub struct ReportArgs {
    /// Access log files to read instead of searching the log directory
    #[arg(value_name = "FILES")]
    pub files: Vec<PathBuf>,

    /// Read from stdin instead of searching for logs
    #[arg(short, long)]
    pub stdin: bool,

    /// Allow reading from gzip-compressed files
    #[arg(short, long)]
    pub gzip: bool,

    /// Follow symlinks
    #[arg(short = 'F', long)]
    pub follow: bool,

    /// Recurse through subdirectories
    #[arg(short = 'R', long, short_alias = 'r')]
    pub recurse: bool,

    /// Glob pattern for access log file names [default: *.access.log*]
    #[arg(short, long, value_name = "GLOB")]
    pub access: Option<String>,

    /// Directory searched for access logs [default: /var/log/apache2]
    #[arg(short, long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Write the report to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Load options from a TOML file; flags take precedence
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Widest the source column may grow [default: 80]
    #[arg(long, value_name = "WIDTH")]
    pub max_source_width: Option<usize>,

    /// Size the source column per table or once for the whole report
    #[arg(long, value_enum)]
    pub layout: Option<ColumnLayout>,

    /// List every connection below its client's table
    #[arg(long)]
    pub connections: bool,

    /// Only lines containing this text are parsed; empty keeps every line [default: HTTP/1.1]
    #[arg(long, value_name = "TEXT")]
    pub marker: Option<String>,

    /// Worker threads for file sources [default: available cores]
    #[arg(short, long)]
    pub jobs: Option<usize>,
}

impl ReportArgs {
    /// Options from `--config` (or defaults) with the flags applied on top.
    pub fn into_options(self) -> Result<ReportOptions, ConfigError> {
        let mut options = match &self.config {
            Some(path) => load_options(path)?,
            None => ReportOptions::default(),
        };

        self.apply(&mut options);
        options.validate()?;
        Ok(options)
    }

    fn apply(self, options: &mut ReportOptions) {
        if !self.files.is_empty() {
            options.input_files = self.files;
        }

        // switches can only turn things on
        options.read_from_stdin |= self.stdin;
        options.read_gzipped |= self.gzip;
        options.follow_symlinks |= self.follow;
        options.recurse |= self.recurse;
        options.show_connections |= self.connections;

        if let Some(access) = self.access {
            options.access_glob = access;
        }
        if let Some(log_dir) = self.log_dir {
            options.log_dir = log_dir;
        }
        if let Some(output) = self.output {
            options.output = Some(output);
        }
        if let Some(width) = self.max_source_width {
            options.max_source_width = width;
        }
        if let Some(layout) = self.layout {
            options.layout = layout;
        }
        if let Some(marker) = self.marker {
            options.line_marker = marker;
        }
        if let Some(jobs) = self.jobs {
            options.jobs = Some(jobs);
        }
    }
}
