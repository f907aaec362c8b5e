use flate2::Compression;
use flate2::write::GzEncoder;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A common-log line for `source` answering `status`.
pub fn access_line(source: &str, status: u32) -> String {
    format!(r#"{source} - frank [10/Oct/2023:13:55:36 -0700] "GET /index.html HTTP/1.1" {status} 2326"#)
}

/// Temporary log directory that is removed on drop.
pub struct LogTree {
    dir: TempDir,
}

impl LogTree {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("failed to create temp log dir"),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    /// Writes `lines` to `relative`, creating parent directories.
    pub fn plain(&self, relative: &str, lines: &[String]) -> PathBuf {
        let path = self.prepare(relative);
        fs::write(&path, join(lines)).expect("failed to write log fixture");
        path
    }

    pub fn gzip(&self, relative: &str, lines: &[String]) -> PathBuf {
        let path = self.prepare(relative);
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder
            .write_all(join(lines).as_bytes())
            .expect("failed to compress log fixture");
        fs::write(&path, encoder.finish().expect("failed to finish gzip stream"))
            .expect("failed to write log fixture");
        path
    }

    fn prepare(&self, relative: &str) -> PathBuf {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create fixture dir");
        }
        path
    }
}

impl Default for LogTree {
    fn default() -> Self {
        Self::new()
    }
}

fn join(lines: &[String]) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}
