// Data models shared by the resolver and the gateway

use chrono::{DateTime, Utc};
use serde::Serialize;

/// One file listed in a remote site directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemoteEntry {
    pub name: String,
    pub size: u64,
    pub modified: DateTime<Utc>,
}

impl RemoteEntry {
    pub fn new(name: impl Into<String>, size: u64, modified: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            size,
            modified,
        }
    }
}

/// A retrieved radar file together with its place in the sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedFile {
    pub filename: String,
    /// Predecessor by index arithmetic; `None` when the name is not a sequence file
    pub previous: Option<String>,
    pub payload: Vec<u8>,
}

/// Outcome of a "latest" request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Fetched(FetchedFile),
    /// The client's reference is already the newest file
    Unchanged,
}
