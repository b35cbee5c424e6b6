use std::{io::ErrorKind, path::PathBuf};

use snafu::{Location, Snafu};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("Failed to read snapshot, path: '{}'", path.display()))]
    ReadSnapshot {
        #[snafu(implicit)]
        location: Location,
        path: PathBuf,
        #[snafu(source)]
        error: std::io::Error,
    },
    #[snafu(display("Failed to parse snapshot, path: '{}'", path.display()))]
    ParseSnapshot {
        #[snafu(implicit)]
        location: Location,
        path: PathBuf,
        #[snafu(source)]
        error: serde_json::Error,
    },
    #[snafu(display("Failed to create snapshot directory, path: '{}'", path.display()))]
    CreateDirectory {
        #[snafu(implicit)]
        location: Location,
        path: PathBuf,
        #[snafu(source)]
        error: std::io::Error,
    },
    #[snafu(display("Failed to write snapshot, path: '{}'", path.display()))]
    WriteSnapshot {
        #[snafu(implicit)]
        location: Location,
        path: PathBuf,
        #[snafu(source)]
        error: std::io::Error,
    },
    #[snafu(display("Failed to serialize snapshot"))]
    SerializeSnapshot {
        #[snafu(implicit)]
        location: Location,
        #[snafu(source)]
        error: serde_json::Error,
    },
    #[snafu(display("Failed to move snapshot into place, path: '{}'", path.display()))]
    PersistSnapshot {
        #[snafu(implicit)]
        location: Location,
        path: PathBuf,
        #[snafu(source)]
        error: tempfile::PersistError,
    },
}

impl Error {
    /// Whether the error stems from a snapshot that does not exist yet.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::ReadSnapshot { error, .. } => error.kind() == ErrorKind::NotFound,
            Error::ParseSnapshot { .. }
            | Error::CreateDirectory { .. }
            | Error::WriteSnapshot { .. }
            | Error::SerializeSnapshot { .. }
            | Error::PersistSnapshot { .. } => false,
        }
    }
}
