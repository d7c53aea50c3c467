//! Table stream selection.
//!
//! A document can carry both `0Table` and `1Table` (an incremental save may
//! leave the stale one behind). `fWhichTblStm` in the FIB names the current
//! one, and only that one is ever read.

use super::super::package::{DocError, Result};
use super::fib::{FileInformationBlock, WHICH_TABLE_BIT};
use crate::ole::catalog::{StreamCatalog, StreamHandle};
use std::fmt;

/// Which of the two table streams the FIB points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableSelector {
    /// `0Table` (`fWhichTblStm` = 0)
    Primary,
    /// `1Table` (`fWhichTblStm` = 1)
    Secondary,
}

impl TableSelector {
    /// Decode from FIB byte 11. Every byte value decodes.
    #[inline]
    pub fn from_flags_byte(byte: u8) -> Self {
        match (byte >> WHICH_TABLE_BIT) & 1 {
            0 => TableSelector::Primary,
            _ => TableSelector::Secondary,
        }
    }

    /// Name of the stream this selector refers to.
    #[inline]
    pub fn stream_name(self) -> &'static str {
        match self {
            TableSelector::Primary => "0Table",
            TableSelector::Secondary => "1Table",
        }
    }

    /// Confirm the selected stream exists in the container.
    ///
    /// Never falls back to the other table stream.
    pub fn resolve<C: StreamCatalog + ?Sized>(self, catalog: &C) -> Result<StreamHandle> {
        catalog
            .stream(self.stream_name())
            .ok_or(DocError::TableStreamMissing { selector: self })
    }
}

impl fmt::Display for TableSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.stream_name())
    }
}

/// Decode the selector from the FIB and confirm its stream exists.
pub fn resolve_table_stream<C: StreamCatalog + ?Sized>(
    fib: &FileInformationBlock,
    catalog: &C,
) -> Result<(TableSelector, StreamHandle)> {
    let selector = fib.table_selector();
    let handle = selector.resolve(catalog)?;
    log::debug!("table stream {} ({} bytes)", handle.name, handle.size);
    Ok((selector, handle))
}
