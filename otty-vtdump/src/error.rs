use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Problems found while reading a script(1) advanced timing log.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error(
        "line {line}: unexpected field {value:?} (is the timing log in the advanced format?)"
    )]
    InvalidTiming { line: usize, value: String },

    #[error("line {line}: unknown timing entry type {kind:?}")]
    UnknownEntry { line: usize, kind: String },

    #[error("line {line}: missing {field}")]
    MissingField { line: usize, field: &'static str },

    #[error("line {line}: invalid size {value:?}")]
    InvalidSize { line: usize, value: String },

    #[error("output was not captured by script(1)")]
    NoOutputLog,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid script(1) recording {}: {source}", path.display())]
    Script {
        path: PathBuf,
        #[source]
        source: ScriptError,
    },

    #[error("failed to write the trace: {0}")]
    Write(#[from] io::Error),

    #[error("--script needs a timing log file, stdin is not supported")]
    ScriptFromStdin,

    #[error("--chunk-size must be greater than zero")]
    ZeroChunkSize,
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
