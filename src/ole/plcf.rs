//! Plex (PLC) view.
//!
//! A plex is the structure legacy Word binaries use to attach fixed-size
//! records to character positions:
//!
//! - n+1 character positions (4 bytes each)
//! - n property elements (element_size bytes each)

use crate::common::binary;

/// Borrowed, bounds-checked view of a plex.
///
/// # Examples
///
/// ```
/// use docfields::ole::plcf::Plex;
///
/// // CPs: 0, 10, 20; properties: [1, 2], [3, 4]
/// let data = [
///     0x00, 0x00, 0x00, 0x00, // CP 0
///     0x0A, 0x00, 0x00, 0x00, // CP 10
///     0x14, 0x00, 0x00, 0x00, // CP 20
///     0x01, 0x02, // Property 1
///     0x03, 0x04, // Property 2
/// ];
///
/// let plex = Plex::parse(&data, 2).unwrap();
/// assert_eq!(plex.count(), 2);
/// assert_eq!(plex.range(1), Some((10, 20)));
/// assert_eq!(plex.property(1), Some(&[3u8, 4][..]));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Plex<'a> {
    positions: &'a [u8],
    properties: &'a [u8],
    element_size: usize,
    count: usize,
}

impl<'a> Plex<'a> {
    /// Parse a plex whose length is exactly `4 + n * (4 + element_size)`.
    ///
    /// Returns `None` when the length does not fit that shape.
    pub fn parse(data: &'a [u8], element_size: usize) -> Option<Self> {
        if element_size == 0 || data.len() < 4 {
            return None;
        }

        let stride = 4 + element_size;
        let body = data.len() - 4;
        if body % stride != 0 {
            return None;
        }

        let count = body / stride;
        let (positions, properties) = data.split_at((count + 1) * 4);

        Some(Self {
            positions,
            properties,
            element_size,
            count,
        })
    }

    /// Number of property elements (n).
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Character position at index (0..=n).
    #[inline]
    pub fn position(&self, index: usize) -> Option<u32> {
        if index > self.count {
            return None;
        }
        binary::read_u32_le(self.positions, index * 4).ok()
    }

    /// Property element at index (0..n).
    #[inline]
    pub fn property(&self, index: usize) -> Option<&'a [u8]> {
        if index >= self.count {
            return None;
        }
        let start = index * self.element_size;
        self.properties.get(start..start + self.element_size)
    }

    /// Character range covered by element at index.
    pub fn range(&self, index: usize) -> Option<(u32, u32)> {
        if index >= self.count {
            return None;
        }
        Some((self.position(index)?, self.position(index + 1)?))
    }
}
