/// Field plex scanner for the Word binary format.
///
/// A field plex (PLCFFLD) maps character positions to 2-byte field
/// descriptors. Each field contributes a begin marker, an optional separator
/// and an end marker, in that order. The scanner only reports which field
/// types begin in a plex; it never evaluates them.
use super::field_names::field_name;
use super::field_regions::FieldRegion;
use crate::ole::plcf::Plex;

/// Size of one field descriptor (FLD) in the plex.
const FLD_SIZE: usize = 2;

/// Only the low 7 bits of the descriptor's first byte carry the marker.
const MARKER_MASK: u8 = 0x7F;

/// Field boundary markers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum FieldBoundary {
    /// Field begin marker (0x13)
    Begin = 0x13,
    /// Field separator marker (0x14)
    Separator = 0x14,
    /// Field end marker (0x15)
    End = 0x15,
}

/// A field descriptor (FLD, 2 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Boundary marker with the high bit stripped
    pub marker: u8,
    /// For begin markers, the field type code (`flt`)
    pub argument: u8,
}

impl FieldDescriptor {
    /// Parse a field descriptor from 2 bytes
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        match bytes {
            [marker, argument, ..] => Some(Self {
                marker: marker & MARKER_MASK,
                argument: *argument,
            }),
            _ => None,
        }
    }

    /// Which boundary this descriptor marks, if any.
    pub fn boundary(&self) -> Option<FieldBoundary> {
        match self.marker {
            0x13 => Some(FieldBoundary::Begin),
            0x14 => Some(FieldBoundary::Separator),
            0x15 => Some(FieldBoundary::End),
            _ => None,
        }
    }

    #[inline]
    pub fn is_begin(&self) -> bool {
        self.boundary() == Some(FieldBoundary::Begin)
    }
}

/// Best-effort result of scanning one field plex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionScan {
    /// Field type names in encounter order (may be empty, may repeat).
    Fields(Vec<&'static str>),
    /// The region is not shaped like a plex of 2-byte descriptors.
    Malformed,
}

impl RegionScan {
    /// Names found, empty for malformed regions.
    pub fn names(&self) -> &[&'static str] {
        match self {
            RegionScan::Fields(names) => names,
            RegionScan::Malformed => &[],
        }
    }

    #[inline]
    pub fn is_malformed(&self) -> bool {
        matches!(self, RegionScan::Malformed)
    }
}

/// Scan a field plex for field-begin markers.
///
/// Descriptors are visited at even indices only: begin, separator and end
/// markers interleave, and begin markers are expected on the even slots.
/// The stride counts descriptors, not bytes: index `i` is the FLD at byte
/// `4(n+1) + 2i`, and the walk covers the whole plex.
/// Never reads outside `data`.
pub fn scan_field_plex(data: &[u8]) -> RegionScan {
    let Some(plex) = Plex::parse(data, FLD_SIZE) else {
        return RegionScan::Malformed;
    };

    let names = (0..plex.count())
        .step_by(2)
        .filter_map(|index| plex.property(index))
        .filter_map(FieldDescriptor::from_bytes)
        .filter(FieldDescriptor::is_begin)
        .map(|descriptor| field_name(descriptor.argument))
        .collect();

    RegionScan::Fields(names)
}

/// Scan one materialized region.
pub fn scan_region(region: &FieldRegion) -> RegionScan {
    let scan = scan_field_plex(&region.data);
    if scan.is_malformed() {
        log::warn!(
            "{} field plex of {} bytes is not a whole plex, reporting no fields",
            region.kind,
            region.data.len()
        );
    }
    scan
}
