//! Where the generated audio goes in `save` mode.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::AppError;

/// Argument value meaning "write the audio to standard output".
pub const STDOUT_SENTINEL: &str = "-";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Stdout,
    File(PathBuf),
}

impl Destination {
    pub fn parse(arg: &str) -> Self {
        if arg == STDOUT_SENTINEL {
            Destination::Stdout
        } else {
            Destination::File(PathBuf::from(arg))
        }
    }

    /// Human readable description used in the final status line.
    pub fn describe(&self) -> String {
        match self {
            Destination::Stdout => "standard output".to_string(),
            Destination::File(path) => std::path::absolute(path)
                .unwrap_or_else(|_| path.clone())
                .display()
                .to_string(),
        }
    }
}

/// Output file that is removed again unless [`commit`](Self::commit) is
/// called, so a failed run never leaves a truncated WAV behind.
#[derive(Debug)]
pub struct OutputFile {
    path: PathBuf,
    file: Option<File>,
    committed: bool,
}

impl OutputFile {
    /// Create `path` for writing, creating missing parent directories.
    pub fn create(path: &Path) -> Result<Self, AppError> {
        if path.is_dir() {
            return Err(AppError::InvalidDestination(path.to_path_buf()));
        }
        let open_err = |source| AppError::SinkOpen {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(open_err)?;
        }
        let file = File::create(path).map_err(open_err)?;
        debug!(path = %path.display(), "output file opened");
        Ok(Self {
            path: path.to_path_buf(),
            file: Some(file),
            committed: false,
        })
    }

    /// Close the file and keep it on disk.
    pub fn commit(mut self) -> PathBuf {
        self.file.take();
        self.committed = true;
        self.path.clone()
    }
}

impl Write for OutputFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.file.as_mut() {
            Some(file) => file.write(buf),
            None => Err(io::Error::new(io::ErrorKind::Other, "output file closed")),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.file.as_mut() {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }
}

impl Drop for OutputFile {
    fn drop(&mut self) {
        // close before removing, Windows refuses to delete open files
        self.file.take();
        if self.committed {
            return;
        }
        match fs::remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "removed unfinished output file"),
            Err(e) => warn!(path = %self.path.display(), error = %e, "could not remove output file"),
        }
    }
}
