//! Named-stream access over a compound container.
//!
//! The Word inspection pipeline only needs to enumerate top-level streams and
//! read bytes from them. `StreamCatalog` captures that surface so the pipeline
//! runs the same over a real `OleFile` and over streams that were already
//! extracted into memory.

use super::file::{OleError, OleFile};
use std::collections::BTreeMap;
use std::io::{Read, Seek};

/// A named stream together with its declared length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamHandle {
    pub name: String,
    pub size: u64,
}

/// Read access to the named streams of a container.
pub trait StreamCatalog {
    /// Enumerate the top-level streams.
    fn streams(&self) -> Vec<StreamHandle>;

    /// Read the whole stream.
    fn read_stream(&mut self, name: &str) -> Result<Vec<u8>, OleError>;

    /// Read at most `len` bytes from the start of the stream.
    fn read_stream_prefix(&mut self, name: &str, len: usize) -> Result<Vec<u8>, OleError> {
        let mut data = self.read_stream(name)?;
        data.truncate(len);
        Ok(data)
    }

    /// Look up a stream by name (case-insensitive, as in compound files).
    fn stream(&self, name: &str) -> Option<StreamHandle> {
        self.streams()
            .into_iter()
            .find(|handle| handle.name.eq_ignore_ascii_case(name))
    }

    fn contains(&self, name: &str) -> bool {
        self.stream(name).is_some()
    }
}

impl<R: Read + Seek> StreamCatalog for OleFile<R> {
    fn streams(&self) -> Vec<StreamHandle> {
        self.root_entries()
            .into_iter()
            .filter(|entry| entry.is_stream())
            .map(|entry| StreamHandle {
                name: entry.name,
                size: entry.size,
            })
            .collect()
    }

    fn read_stream(&mut self, name: &str) -> Result<Vec<u8>, OleError> {
        self.open_stream(name)
    }

    fn read_stream_prefix(&mut self, name: &str, len: usize) -> Result<Vec<u8>, OleError> {
        self.open_stream_prefix(name, len)
    }
}

/// Streams held in memory, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    streams: BTreeMap<String, Vec<u8>>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a stream.
    pub fn insert(&mut self, name: impl Into<String>, data: impl Into<Vec<u8>>) {
        self.streams.insert(name.into(), data.into());
    }

    /// Builder-style variant of [`MemoryCatalog::insert`].
    pub fn with_stream(mut self, name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        self.insert(name, data);
        self
    }
}

impl StreamCatalog for MemoryCatalog {
    fn streams(&self) -> Vec<StreamHandle> {
        self.streams
            .iter()
            .map(|(name, data)| StreamHandle {
                name: name.clone(),
                size: data.len() as u64,
            })
            .collect()
    }

    fn read_stream(&mut self, name: &str) -> Result<Vec<u8>, OleError> {
        self.streams
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, data)| data.clone())
            .ok_or_else(|| OleError::StreamNotFound(name.to_string()))
    }
}
