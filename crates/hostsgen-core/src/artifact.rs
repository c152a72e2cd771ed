//! Rendering of the merged `hosts` file and fan-out writes to output directories.
//!
//! Each write stages the content in a temp file inside the target directory and
//! then persists it over `hosts`, so the file is fully replaced and readers never
//! see a half-written artifact.

use chrono::NaiveDateTime;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::merge::EntrySet;

/// Name of the generated file inside every output directory.
pub const HOSTS_FILE_NAME: &str = "hosts";

/// Loopback lines written verbatim after the header.
pub const LOOPBACK_LINES: [&str; 2] = ["127.0.0.1 localhost", "::1 localhost"];

/// Header timestamp format (local time).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Render the complete artifact text.
///
/// Layout: `# Updated on <timestamp>`, the list of consulted sources as comments,
/// a blank line, the loopback lines, a blank line, then one line per entry.
pub fn render(generated_at: NaiveDateTime, sources: &[String], entries: &EntrySet) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "# Updated on {}\n",
        generated_at.format(TIMESTAMP_FORMAT)
    ));
    out.push_str("# This file is generated from the following sources:\n");
    for source in sources {
        out.push_str(&format!("# {source}\n"));
    }

    out.push('\n');
    for line in LOOPBACK_LINES {
        out.push_str(line);
        out.push('\n');
    }
    out.push('\n');

    for entry in entries.iter() {
        out.push_str(entry);
        out.push('\n');
    }
    out
}

/// Failure to place the artifact in one output directory.
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("cannot create temp file in {}: {source}", dir.display())]
    Stage {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot replace {}: {source}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Outcome of writing the artifact to every requested directory.
#[derive(Debug, Default)]
pub struct WriteSummary {
    pub written: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, WriteError)>,
}

/// Write `content` to `<dir>/hosts`, replacing any existing file. The directory must exist.
pub fn write_to_dir(dir: &Path, content: &str) -> Result<PathBuf, WriteError> {
    let path = dir.join(HOSTS_FILE_NAME);

    let mut tmp = tempfile::Builder::new()
        .prefix(".hosts.")
        .tempfile_in(dir)
        .map_err(|source| WriteError::Stage {
            dir: dir.to_path_buf(),
            source,
        })?;

    let write_err = |source: io::Error| WriteError::Write {
        path: path.clone(),
        source,
    };
    tmp.write_all(content.as_bytes()).map_err(write_err)?;
    tmp.flush().map_err(write_err)?;
    // Temp files are created 0600; keep the existing file's mode, or use 0644.
    let perms = match fs::metadata(&path) {
        Ok(meta) => Some(meta.permissions()),
        Err(_) => default_permissions(),
    };
    if let Some(perms) = perms {
        tmp.as_file().set_permissions(perms).map_err(write_err)?;
    }

    tmp.persist(&path).map_err(|e| WriteError::Persist {
        path: path.clone(),
        source: e.error,
    })?;
    Ok(path)
}

#[cfg(unix)]
fn default_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn default_permissions() -> Option<fs::Permissions> {
    None
}

/// Write `content` to every directory in `dirs`. Each directory is independent:
/// a failure is recorded and the remaining directories are still attempted.
pub fn write_all(dirs: &[PathBuf], content: &str) -> WriteSummary {
    let mut summary = WriteSummary::default();
    for dir in dirs {
        match write_to_dir(dir, content) {
            Ok(path) => {
                tracing::info!(path = %path.display(), bytes = content.len(), "wrote hosts file");
                summary.written.push(path);
            }
            Err(e) => {
                tracing::warn!(dir = %dir.display(), "failed to write hosts file: {}", e);
                summary.failed.push((dir.clone(), e));
            }
        }
    }
    summary
}
