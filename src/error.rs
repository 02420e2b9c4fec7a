use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors raised while reading mesh partition data or writing exports.
///
/// Every failure is fatal to the run; the variants exist so the message
/// names the offending path.
#[derive(Debug, Error)]
pub enum Error {
    /// Opening or reading the mesh partition file failed.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: io::Error,
    },
    /// The mesh partition file does not follow the expected format.
    #[error("{}: {message}", path.display())]
    Format { path: PathBuf, message: String },
    /// Writing an export file failed.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: io::Error,
    },
}

impl Error {
    pub(crate) fn read(path: &Path, source: io::Error) -> Self {
        Error::Read {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn format(path: &Path, message: impl Into<String>) -> Self {
        Error::Format {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }

    pub(crate) fn write(path: &Path, source: io::Error) -> Self {
        Error::Write {
            path: path.to_path_buf(),
            source,
        }
    }
}
