/// Constants for OLE file format
pub mod consts;

/// Main OLE file parsing implementation
mod file;

/// Named-stream access shared by OLE files and in-memory stream sets
pub mod catalog;

/// Plex (PLC) structures used by legacy Word binaries
pub mod plcf;

/// Legacy Word document (.doc) field inspection
///
/// This module locates and scans the field tables of Microsoft Word
/// documents in the legacy binary format (.doc files), which are OLE2-based.
pub mod doc;

#[cfg(test)]
pub(crate) mod fixture;

// Re-export public types for convenient access
pub use catalog::{MemoryCatalog, StreamCatalog, StreamHandle};
pub use file::{DirectoryEntry, OleError, OleFile};
