use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failures of the conversion, report and organize steps.
///
/// Each variant names the path that was being touched when the error
/// happened so a log line is enough to find the offending file.
#[derive(Debug, Error)]
pub enum Error {
    #[error("error opening {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("error reading {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("error reading HTML template {}: {source}", path.display())]
    TemplateRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("error creating folder {}: {source}", path.display())]
    FolderCreate {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("error writing {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("error copying {} to {}: {source}", from.display(), to.display())]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("error walking {}: {source}", root.display())]
    Walk {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },
    #[error("error getting file info for {}: {source}", path.display())]
    Stat {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl Error {
    pub fn walk(root: impl Into<PathBuf>, source: walkdir::Error) -> Self {
        Error::Walk {
            root: root.into(),
            source,
        }
    }
}
