//! Atomic file output shared by both emitters.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::debug;
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error writing {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to encode header")]
    Header(#[from] crate::image::header::HeaderError),
}

impl OutputError {
    fn io(path: &Path, source: io::Error) -> Self {
        OutputError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Runs `write` against a temporary file next to `path`, then renames it over `path`.
///
/// On failure the temporary file is removed and `path` is left untouched.
pub fn write_atomic<F>(path: &Path, write: F) -> Result<(), OutputError>
where
    F: FnOnce(&mut dyn Write) -> io::Result<()>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir).map_err(|e| OutputError::io(path, e))?;
    debug!("Writing {} via {}", path.display(), file.path().display());

    write(file.as_file_mut())
        .and_then(|_| file.as_file_mut().flush())
        .and_then(|_| file.as_file().sync_all())
        .map_err(|e| OutputError::io(path, e))?;

    file.persist(path)
        .map_err(|e| OutputError::io(path, e.error))?;

    Ok(())
}
