use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MenuError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("key input closed")]
    InputClosed,

    #[error("invalid border glyphs: expected 6 characters, got {0:?}")]
    InvalidBorder(String),

    #[error("failed to read settings at {path}: {source}")]
    ReadSettings {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("TOML parse error: {0}")]
    TomlParse(String),

    #[error("failed to open log file at {path}: {source}")]
    OpenLog {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to install logger: {0}")]
    Logging(String),

    #[error("{0}")]
    Host(Box<dyn std::error::Error + Send + Sync>),
}

impl MenuError {
    /// Wraps an error raised by host code (a key handler or render hook).
    pub fn host<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        MenuError::Host(err.into())
    }
}

pub type Result<T> = std::result::Result<T, MenuError>;
