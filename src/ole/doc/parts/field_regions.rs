//! Field plex locations.
//!
//! Each document part (main body, headers, footnotes, ...) has its own field
//! plex in the table stream. The FIB records where each one starts and how
//! long it is as an (fc, lcb) pair in FibRgFcLcb97.

use super::super::package::{DocError, Result};
use super::fib::{FC_LCB_97_OFFSET, FileInformationBlock};
use bytes::Bytes;
use smallvec::SmallVec;
use std::fmt;

/// Document part owning a field plex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionKind {
    /// fcPlcffldMom (FibRgFcLcb97 entry 16, FIB offset 282)
    MainBody,
    /// fcPlcffldHdr (entry 17, offset 290)
    HeaderFooter,
    /// fcPlcffldFtn (entry 18, offset 298)
    Footnote,
    /// fcPlcffldAtn (entry 19, offset 306)
    Comment,
    /// fcPlcffldEdn (entry 48, offset 538)
    Endnote,
    /// fcPlcffldTxbx (entry 58, offset 618)
    Textbox,
    /// fcPlcffldHdrTxbx (entry 59, offset 626)
    HeaderFooterTextbox,
}

impl RegionKind {
    /// All kinds, in report order.
    pub const ALL: [RegionKind; 7] = [
        RegionKind::MainBody,
        RegionKind::HeaderFooter,
        RegionKind::Footnote,
        RegionKind::Comment,
        RegionKind::Endnote,
        RegionKind::Textbox,
        RegionKind::HeaderFooterTextbox,
    ];

    /// Index of the (fc, lcb) pair in FibRgFcLcb97.
    #[inline]
    pub const fn fc_lcb_index(self) -> usize {
        match self {
            RegionKind::MainBody => 16,
            RegionKind::HeaderFooter => 17,
            RegionKind::Footnote => 18,
            RegionKind::Comment => 19,
            RegionKind::Endnote => 48,
            RegionKind::Textbox => 58,
            RegionKind::HeaderFooterTextbox => 59,
        }
    }

    /// FIB byte offset of the `fc` (offset) member; `lcb` follows at +4.
    #[inline]
    pub const fn fc_offset(self) -> usize {
        FC_LCB_97_OFFSET + self.fc_lcb_index() * 8
    }

    /// Human-readable label used in reports.
    pub const fn label(self) -> &'static str {
        match self {
            RegionKind::MainBody => "Document body",
            RegionKind::HeaderFooter => "Header/footer",
            RegionKind::Footnote => "Footnote",
            RegionKind::Comment => "Comment",
            RegionKind::Endnote => "Endnote",
            RegionKind::Textbox => "Textbox",
            RegionKind::HeaderFooterTextbox => "Header/footer textbox",
        }
    }
}

impl fmt::Display for RegionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Where one document part's field plex lives in the table stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRegionSpec {
    pub kind: RegionKind,
    pub offset: u32,
    pub length: u32,
}

impl FieldRegionSpec {
    /// Read the (fc, lcb) pair for `kind` verbatim from the FIB.
    pub fn from_fib(fib: &FileInformationBlock, kind: RegionKind) -> Self {
        let offset = kind.fc_offset();
        Self {
            kind,
            offset: fib.u32_at(offset).unwrap_or_default(),
            length: fib.u32_at(offset + 4).unwrap_or_default(),
        }
    }

    /// End of the region, computed without u32 wrap-around.
    #[inline]
    pub fn end(&self) -> u64 {
        self.offset as u64 + self.length as u64
    }
}

/// The non-empty region specs of a document, in report order.
pub type FieldRegionSpecs = SmallVec<[FieldRegionSpec; 7]>;

/// Collect the non-empty field plex locations from the FIB.
///
/// Fails with `NoFieldData` when all seven lengths are zero.
pub fn locate_field_regions(fib: &FileInformationBlock) -> Result<FieldRegionSpecs> {
    let specs: FieldRegionSpecs = RegionKind::ALL
        .iter()
        .map(|&kind| FieldRegionSpec::from_fib(fib, kind))
        .filter(|spec| spec.length > 0)
        .collect();

    if specs.is_empty() {
        return Err(DocError::NoFieldData);
    }

    for spec in &specs {
        log::debug!(
            "{} field plex at 0x{:X}, {} bytes",
            spec.kind,
            spec.offset,
            spec.length
        );
    }
    Ok(specs)
}

/// One document part's field plex bytes, sliced from the table stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRegion {
    pub kind: RegionKind,
    pub data: Bytes,
}

/// Slice each spec out of the loaded table stream.
///
/// Specs that reach past the end of the stream are dropped, not reported as
/// errors: legacy writers occasionally record inconsistent lengths.
pub fn materialize_regions(specs: &[FieldRegionSpec], table: &Bytes) -> Vec<FieldRegion> {
    specs
        .iter()
        .filter_map(|spec| {
            if spec.end() > table.len() as u64 {
                log::warn!(
                    "skipping {} field plex: 0x{:X}+{} exceeds table stream of {} bytes",
                    spec.kind,
                    spec.offset,
                    spec.length,
                    table.len()
                );
                return None;
            }
            Some(FieldRegion {
                kind: spec.kind,
                data: table.slice(spec.offset as usize..spec.end() as usize),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ole::doc::parts::fib::FIB_LENGTH;

    fn fib_with(regions: &[(RegionKind, u32, u32)]) -> FileInformationBlock {
        let mut data = vec![0u8; FIB_LENGTH];
        for &(kind, fc, lcb) in regions {
            let at = kind.fc_offset();
            data[at..at + 4].copy_from_slice(&fc.to_le_bytes());
            data[at + 4..at + 8].copy_from_slice(&lcb.to_le_bytes());
        }
        FileInformationBlock::parse(&data).unwrap()
    }

    #[test]
    fn test_fc_offsets() {
        let offsets: Vec<usize> = RegionKind::ALL.iter().map(|k| k.fc_offset()).collect();
        assert_eq!(offsets, [282, 290, 298, 306, 538, 618, 626]);
        // The last lcb ends exactly at the end of the FIB prefix
        assert_eq!(RegionKind::HeaderFooterTextbox.fc_offset() + 8, FIB_LENGTH);
    }

    #[test]
    fn test_no_field_data() {
        // Offsets alone don't count as field data
        let fib = fib_with(&[(RegionKind::MainBody, 100, 0), (RegionKind::Endnote, 7, 0)]);
        assert!(matches!(locate_field_regions(&fib), Err(DocError::NoFieldData)));
    }

    #[test]
    fn test_zero_lengths_are_skipped() {
        let fib = fib_with(&[
            (RegionKind::HeaderFooterTextbox, 40, 10),
            (RegionKind::MainBody, 0, 22),
            (RegionKind::Footnote, 500, 0),
        ]);
        let specs = locate_field_regions(&fib).unwrap();
        let kinds: Vec<RegionKind> = specs.iter().map(|s| s.kind).collect();
        assert_eq!(kinds, [RegionKind::MainBody, RegionKind::HeaderFooterTextbox]);
        assert_eq!(specs[1].offset, 40);
        assert_eq!(specs[1].length, 10);
    }

    #[test]
    fn test_out_of_bounds_regions_are_dropped() {
        let table = Bytes::from((0u8..100).collect::<Vec<_>>());
        let specs = [
            FieldRegionSpec { kind: RegionKind::MainBody, offset: 90, length: 20 },
            FieldRegionSpec { kind: RegionKind::HeaderFooter, offset: 10, length: 4 },
            FieldRegionSpec { kind: RegionKind::Comment, offset: 96, length: 4 },
            FieldRegionSpec { kind: RegionKind::Textbox, offset: u32::MAX, length: 2 },
        ];

        let regions = materialize_regions(&specs, &table);
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].kind, RegionKind::HeaderFooter);
        assert_eq!(&regions[0].data[..], &[10, 11, 12, 13]);
        assert_eq!(regions[1].kind, RegionKind::Comment);
        assert_eq!(&regions[1].data[..], &[96, 97, 98, 99]);
    }
}
