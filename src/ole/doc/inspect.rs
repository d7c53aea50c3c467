//! Field inspection pipeline.
//!
//! FIB → table stream → field plex locations → per-region scan.

use super::package::Result;
use super::parts::fib::FileInformationBlock;
use super::parts::field_regions::{RegionKind, locate_field_regions, materialize_regions};
use super::parts::fields::{RegionScan, scan_region};
use super::parts::table_stream::{TableSelector, resolve_table_stream};
use crate::ole::catalog::StreamCatalog;
use bytes::Bytes;
use std::fmt;

/// Field types found in one document part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionReport {
    pub kind: RegionKind,
    pub scan: RegionScan,
}

impl RegionReport {
    #[inline]
    pub fn names(&self) -> &[&'static str] {
        self.scan.names()
    }
}

impl fmt::Display for RegionReport {
    /// `<label> fields: <name>, <name>, ...`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} fields: {}", self.kind.label(), self.names().join(", "))
    }
}

/// Everything field inspection learned about one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldInventory {
    version: u16,
    table: TableSelector,
    regions: Vec<RegionReport>,
}

impl FieldInventory {
    /// `nFib` of the inspected document.
    #[inline]
    pub fn version(&self) -> u16 {
        self.version
    }

    /// The table stream the fields were read from.
    #[inline]
    pub fn table(&self) -> TableSelector {
        self.table
    }

    /// Reports for each non-empty, in-bounds region, in report order.
    #[inline]
    pub fn regions(&self) -> &[RegionReport] {
        &self.regions
    }

    /// Report for one document part, if it was present and in bounds.
    pub fn region(&self, kind: RegionKind) -> Option<&RegionReport> {
        self.regions.iter().find(|report| report.kind == kind)
    }
}

/// Run field inspection over the streams of one document.
///
/// Hard failures are limited to a missing or short FIB, a missing table
/// stream and a FIB without any field plex. Individual regions that are out
/// of bounds or malformed are skipped or reported empty.
pub fn inspect_catalog<C: StreamCatalog + ?Sized>(catalog: &mut C) -> Result<FieldInventory> {
    let fib = FileInformationBlock::read(catalog)?;
    let (table, handle) = resolve_table_stream(&fib, &*catalog)?;
    let specs = locate_field_regions(&fib)?;

    let table_stream = Bytes::from(catalog.read_stream(&handle.name)?);
    let regions = materialize_regions(&specs, &table_stream)
        .iter()
        .map(|region| RegionReport {
            kind: region.kind,
            scan: scan_region(region),
        })
        .collect();

    Ok(FieldInventory {
        version: fib.version(),
        table,
        regions,
    })
}
