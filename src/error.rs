//! Crate-wide error type.
//!
//! Every fallible operation in this crate returns `Result<T, Error>`. Drivers
//! in `crate::ops` translate exactly one variant into exactly one user-visible
//! message; nothing here is ever silently swallowed or retried.

use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error during {op}: {cause}")]
    Io {
        op: &'static str,
        #[source]
        cause: io::Error,
    },

    #[error("boot sector failed geometry validation")]
    BadGeometry,

    #[error("cluster chain is malformed: {reason}")]
    BadChain { reason: &'static str },

    #[error("no free cluster available")]
    NoFreeCluster,

    #[error("not enough free space: need {needed} clusters, have {available}")]
    NotEnoughSpace { needed: u32, available: u32 },

    #[error("directory is full")]
    DirFull,

    #[error("not found: {what}")]
    NotFound { what: NotFoundKind },

    #[error("source file {path:?} not found on host")]
    HostFileNotFound { path: PathBuf },

    #[error("chain ended before file_size bytes were read")]
    ShortFile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundKind {
    File,
    Directory,
}

impl std::fmt::Display for NotFoundKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotFoundKind::File => write!(f, "file"),
            NotFoundKind::Directory => write!(f, "directory"),
        }
    }
}

impl Error {
    pub fn io(op: &'static str, cause: io::Error) -> Self {
        Error::Io { op, cause }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
