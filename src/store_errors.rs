//! # Store Error Types Module
//!
//! Errors raised while loading or saving grocery lists. List and item lookups
//! never fail; a missing list or item is a no-op for the caller.

/// Custom error types for grocery store persistence
#[derive(Debug, Clone, PartialEq)]
pub enum StoreError {
    /// Reading or writing the snapshot failed
    Io(String),
    /// The snapshot could not be encoded or decoded
    Serialization(String),
    /// The snapshot was written by an incompatible version
    UnsupportedVersion(u32),
    /// A shared store handle was poisoned by a panicking holder
    Lock(String),
    /// No unused manual list id was found within the attempt limit
    IdSpaceExhausted(usize),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Io(msg) => write!(f, "I/O error: {msg}"),
            StoreError::Serialization(msg) => write!(f, "Serialization error: {msg}"),
            StoreError::UnsupportedVersion(version) => {
                write!(f, "Unsupported snapshot version: {version}")
            }
            StoreError::Lock(msg) => write!(f, "Lock error: {msg}"),
            StoreError::IdSpaceExhausted(attempts) => {
                write!(f, "No free manual list id after {attempts} attempts")
            }
        }
    }
}

impl std::error::Error for StoreError {}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}
