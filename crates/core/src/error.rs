//! Error types for pio-core
//!
//! One error type is shared by both backends. Raw filesystem and object
//! store errors pass through unmodified so callers can inspect them.

use thiserror::Error;

/// Boxed error used to carry raw backend failures
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type alias for pio operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for pio operations
#[derive(Error, Debug)]
pub enum Error {
    /// Remote path could not be split into bucket and key
    #[error("invalid s3 path {0}")]
    InvalidPath(String),

    /// Write input could not be rewound to offset 0
    #[error("failed to seek input to start: {0}")]
    SeekFailed(String),

    /// Bucket region discovery failed
    #[error("failed to get location for bucket '{bucket}', {source}")]
    RegionLookup {
        bucket: String,
        #[source]
        source: BoxError,
    },

    /// Local filesystem error, unmodified
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Object store error, unmodified
    #[error(transparent)]
    Backend(BoxError),

    /// Configuration file error
    #[error("Configuration error: {0}")]
    Config(String),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl Error {
    /// Wrap a raw object store error
    pub fn backend(err: impl Into<BoxError>) -> Self {
        Error::Backend(err.into())
    }

    /// Whether this is a raw local filesystem "not found" error
    ///
    /// Read and delete do not normalize missing paths, so this is how
    /// callers tell them apart from other failures.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Io(e) if e.kind() == std::io::ErrorKind::NotFound)
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::InvalidPath(_) | Error::Config(_) => 2, // UsageError
            Error::RegionLookup { .. } | Error::Backend(_) => 3, // NetworkError
            e if e.is_not_found() => 5,                    // NotFound
            _ => 1,                                        // GeneralError
        }
    }
}
