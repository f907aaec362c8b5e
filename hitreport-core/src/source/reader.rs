use crate::conf::ReportOptions;
use crate::source::discover::{WalkOptions, discover_logs, is_gzipped};
use crate::source::error::SourceReadFailure;
use flate2::read::MultiGzDecoder;
use glob::Pattern;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogSource {
    Stdin,
    File { path: PathBuf, gzip: bool },
}

impl LogSource {
    /// A file source, sniffing the gzip magic. Unreadable files are classified as plain;
    /// opening them later reports the real error.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let gzip = is_gzipped(&path).unwrap_or(false);
        LogSource::File { path, gzip }
    }

    pub fn is_gzip(&self) -> bool {
        matches!(self, LogSource::File { gzip: true, .. })
    }

    pub fn open(&self) -> Result<Box<dyn BufRead>, SourceReadFailure> {
        match self {
            LogSource::Stdin => Ok(Box::new(io::stdin().lock())),
            LogSource::File { path, gzip } => {
                let file = File::open(path).map_err(|e| SourceReadFailure::open(path, e))?;
                if *gzip {
                    Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
                } else {
                    Ok(Box::new(BufReader::new(file)))
                }
            }
        }
    }

    /// Opens the source and yields its lines, dropping those without `marker`.
    pub fn lines(&self, marker: Option<&str>) -> Result<LineReader<Box<dyn BufRead>>, SourceReadFailure> {
        Ok(LineReader::new(self.open()?, marker))
    }
}

impl fmt::Display for LogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogSource::Stdin => f.write_str("stdin"),
            LogSource::File { path, .. } => write!(f, "{}", path.display()),
        }
    }
}

/// Line iterator that tolerates invalid UTF-8 and filters on a marker substring.
pub struct LineReader<R> {
    reader: R,
    marker: Option<String>,
    buf: Vec<u8>,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(reader: R, marker: Option<&str>) -> Self {
        Self {
            reader,
            marker: marker.map(str::to_string),
            buf: Vec::new(),
        }
    }

    fn keeps(&self, line: &str) -> bool {
        self.marker.as_deref().is_none_or(|m| line.contains(m))
    }
}

impl<R: BufRead> Iterator for LineReader<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {
                    let line = String::from_utf8_lossy(&self.buf);
                    let line = line.trim_end_matches(['\r', '\n']);
                    if self.keeps(line) {
                        return Some(Ok(line.to_string()));
                    }
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

/// Decides which sources a run reads.
///
/// Stdin wins when requested, then explicit input files, then discovery under
/// `log_dir`. Gzip files are dropped with a warning unless `read_gzipped` is set.
pub fn resolve_sources(options: &ReportOptions) -> Result<Vec<LogSource>, SourceReadFailure> {
    if options.read_from_stdin {
        return Ok(vec![LogSource::Stdin]);
    }

    let candidates: Vec<LogSource> = if options.input_files.is_empty() {
        discover_in(&options.log_dir, options)?
            .into_iter()
            .map(LogSource::file)
            .collect()
    } else {
        options.input_files.iter().map(LogSource::file).collect()
    };

    Ok(candidates
        .into_iter()
        .filter(|source| {
            if source.is_gzip() && !options.read_gzipped {
                tracing::warn!(%source, "gzip file detected, skipping; enable gzip reading to include it");
                return false;
            }
            true
        })
        .collect())
}

fn discover_in(root: &Path, options: &ReportOptions) -> Result<Vec<PathBuf>, SourceReadFailure> {
    // validated when the options were built; an invalid pattern matches nothing
    let pattern = Pattern::new(&options.access_glob).unwrap_or_default();
    let walk = WalkOptions {
        recurse: options.recurse,
        follow_symlinks: options.follow_symlinks,
    };

    let found = discover_logs(root, &pattern, walk)?;
    tracing::debug!(root = %root.display(), files = found.len(), "discovered access logs");
    Ok(found)
}
