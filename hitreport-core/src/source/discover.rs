use crate::source::error::SourceReadFailure;
use glob::Pattern;
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkOptions {
    /// Descend into sub-directories
    pub recurse: bool,
    /// Treat symlinks as the file or directory they point at; otherwise they are ignored
    pub follow_symlinks: bool,
}

/// Finds files under `root` whose file name matches `pattern`.
///
/// Directories are walked with an explicit work list, so deep trees do not grow the call
/// stack. With `follow_symlinks`, every directory is visited at most once even if links
/// form a cycle. Unreadable sub-directories are logged and skipped; only an unreadable
/// `root` is an error.
///
/// Returns paths in sorted order.
pub fn discover_logs(
    root: &Path,
    pattern: &Pattern,
    walk: WalkOptions,
) -> Result<Vec<PathBuf>, SourceReadFailure> {
    let mut found = Vec::new();
    let mut pending = vec![root.to_path_buf()];
    let mut visited = HashSet::new();

    while let Some(dir) = pending.pop() {
        let key = fs::canonicalize(&dir).unwrap_or_else(|_| dir.clone());
        if !visited.insert(key) {
            continue;
        }

        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(source) if dir == root => {
                return Err(SourceReadFailure::directory(dir, source));
            }
            Err(source) => {
                tracing::warn!(path = %dir.display(), error = %source, "skipping unreadable directory");
                continue;
            }
        };

        for entry in entries.filter_map(Result::ok) {
            let path = entry.path();
            let Ok(mut file_type) = entry.file_type() else {
                continue;
            };

            if file_type.is_symlink() {
                if !walk.follow_symlinks {
                    continue;
                }
                // dangling links are ignored
                let Ok(target) = fs::metadata(&path) else {
                    continue;
                };
                file_type = target.file_type();
            }

            if file_type.is_dir() {
                if walk.recurse {
                    pending.push(path);
                }
            } else if file_type.is_file() && name_matches(pattern, &path) {
                found.push(path);
            }
        }
    }

    found.sort();
    Ok(found)
}

fn name_matches(pattern: &Pattern, path: &Path) -> bool {
    path.file_name()
        .map(|name| pattern.matches(&name.to_string_lossy()))
        .unwrap_or(false)
}

/// Whether the file starts with the gzip magic bytes.
///
/// Files shorter than the magic are never gzip.
pub fn is_gzipped(path: &Path) -> io::Result<bool> {
    let mut file = File::open(path)?;
    if file.metadata()?.len() < GZIP_MAGIC.len() as u64 {
        return Ok(false);
    }

    let mut magic = [0u8; 2];
    file.read_exact(&mut magic)?;
    Ok(magic == GZIP_MAGIC)
}
