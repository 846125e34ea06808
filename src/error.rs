use thiserror::Error;

/// Crate-level error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("Settings error: {0}")]
    Settings(#[from] ::config::ConfigError),

    #[error("Middleware configuration error: {0}")]
    Middleware(#[from] crate::convert::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
