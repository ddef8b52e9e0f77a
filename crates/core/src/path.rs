//! Path classification and parsing
//!
//! A path is routed by syntax alone: anything starting with `s3://` goes to
//! the object store, everything else is a local filesystem path and is
//! passed through untouched.

use std::path::PathBuf;

use crate::error::{Error, Result};

/// Prefix marking a remote object store path
pub const REMOTE_SCHEME: &str = "s3://";

/// Which backend services a path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    /// Local filesystem
    Local,
    /// Remote object store
    Remote,
}

/// Classify a path by its prefix. Never fails and never touches the disk.
pub fn classify(path: &str) -> PathKind {
    if path.starts_with(REMOTE_SCHEME) {
        PathKind::Remote
    } else {
        PathKind::Local
    }
}

/// A parsed remote path pointing to an S3 object or prefix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemotePath {
    /// Bucket name
    pub bucket: String,
    /// Object key, may itself contain slashes
    pub key: String,
}

impl RemotePath {
    /// Create a new RemotePath
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
        }
    }

    /// Parse `s3://bucket/key`
    ///
    /// The path is split on `/` into at most four parts, so the key is
    /// everything after the third slash and is not split again.
    pub fn parse(path: &str) -> Result<Self> {
        let parts: Vec<&str> = path.splitn(4, '/').collect();
        if parts.len() < 4 {
            return Err(Error::InvalidPath(path.to_string()));
        }

        let bucket = parts[2];
        let key = parts[3];
        if bucket.is_empty() || key.is_empty() {
            return Err(Error::InvalidPath(path.to_string()));
        }

        Ok(Self::new(bucket, key))
    }
}

impl std::fmt::Display for RemotePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{REMOTE_SCHEME}{}/{}", self.bucket, self.key)
    }
}

/// Parsed path that can be either local or remote
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedPath {
    /// Local filesystem path
    Local(PathBuf),
    /// Remote S3 path
    Remote(RemotePath),
}

impl ParsedPath {
    /// Check if this is a remote path
    pub fn is_remote(&self) -> bool {
        matches!(self, ParsedPath::Remote(_))
    }

    /// Check if this is a local path
    pub fn is_local(&self) -> bool {
        matches!(self, ParsedPath::Local(_))
    }

    /// Get the remote path if this is a remote path
    pub fn as_remote(&self) -> Option<&RemotePath> {
        match self {
            ParsedPath::Remote(p) => Some(p),
            ParsedPath::Local(_) => None,
        }
    }

    /// Get the local path if this is a local path
    pub fn as_local(&self) -> Option<&PathBuf> {
        match self {
            ParsedPath::Local(p) => Some(p),
            ParsedPath::Remote(_) => None,
        }
    }
}

/// Classify and parse a path string
///
/// Only remote paths can fail; local paths are never validated here since
/// the filesystem call is the single source of truth for them.
pub fn parse_path(path: &str) -> Result<ParsedPath> {
    match classify(path) {
        PathKind::Remote => RemotePath::parse(path).map(ParsedPath::Remote),
        PathKind::Local => Ok(ParsedPath::Local(PathBuf::from(path))),
    }
}
