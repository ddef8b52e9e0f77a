//! pio-core: Core library for the pio storage access layer
//!
//! This crate provides the SDK-independent parts of pio:
//! - Path classification (`s3://` versus local)
//! - The `PathStore` trait every backend implements
//! - The local filesystem backend
//! - Client and file configuration
//! - An in-memory `PathStore` for caller unit tests
//!
//! The S3 backend and the unified client live in `pio-s3`.

pub mod config;
pub mod error;
pub mod local;
pub mod memory;
pub mod path;
pub mod traits;

pub use config::{ClientConfig, Config, ConfigManager};
pub use error::{BoxError, Error, Result};
pub use local::LocalBackend;
pub use memory::MemoryStore;
pub use path::{PathKind, ParsedPath, REMOTE_SCHEME, RemotePath, classify, parse_path};
pub use traits::{ByteReader, PathStore, SeekableReader, rewind};
