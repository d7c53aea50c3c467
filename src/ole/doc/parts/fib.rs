/// File Information Block (FIB) reader for DOC files.
///
/// The FIB is located at the beginning of the WordDocument stream. Field
/// inspection only needs the fixed Word 97 prefix of it:
/// - FibBase (bytes 0-31): identification, version and flags
/// - FibRgFcLcb97 (from byte 154): (offset, length) pointers into the table stream
///
/// Everything is read from fixed byte positions, so the positions live here as
/// named constants next to what they mean.
use super::super::package::{DocError, Result};
use super::table_stream::TableSelector;
use crate::common::binary::{read_u16_le, read_u32_le};
use crate::ole::catalog::StreamCatalog;

/// Name of the main document stream.
pub const WORD_DOCUMENT_STREAM: &str = "WordDocument";

/// Number of FIB bytes read from the WordDocument stream.
///
/// Ends right after `lcbPlcffldHdrTxbx`, the last field pointer used here.
pub const FIB_LENGTH: usize = 634;

/// `wIdent` (u16): 0xA5EC for Word 97 and later.
pub const WIDENT_OFFSET: usize = 0;
/// `nFib` (u16): file format version.
pub const NFIB_OFFSET: usize = 2;
/// `lid` (u16): install language.
pub const LID_OFFSET: usize = 6;
/// FibBase flags word (u16); `fEncrypted` is bit 8.
pub const FLAGS_OFFSET: usize = 10;
/// High byte of the flags word; holds `fWhichTblStm`.
pub const TABLE_FLAGS_OFFSET: usize = 11;
/// Bit of byte 11 selecting 1Table over 0Table (bit 9 of the flags word).
pub const WHICH_TABLE_BIT: u8 = 1;

/// Start of FibRgFcLcb97 in the Word 97 layout.
pub const FC_LCB_97_OFFSET: usize = 154;

/// Magic number of Word 97+ documents.
pub const WORD97_IDENT: u16 = 0xA5EC;

/// The fixed-size prefix of the File Information Block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInformationBlock {
    data: [u8; FIB_LENGTH],
}

impl FileInformationBlock {
    /// Read the FIB from the WordDocument stream of a container.
    ///
    /// Fails with `MissingMainStream` if there is no WordDocument stream and
    /// with `FibTooShort` if it holds fewer than [`FIB_LENGTH`] bytes.
    pub fn read<C: StreamCatalog + ?Sized>(catalog: &mut C) -> Result<Self> {
        if !catalog.contains(WORD_DOCUMENT_STREAM) {
            return Err(DocError::MissingMainStream);
        }

        let prefix = catalog.read_stream_prefix(WORD_DOCUMENT_STREAM, FIB_LENGTH)?;
        let fib = Self::parse(&prefix)?;

        log::debug!(
            "FIB: wIdent=0x{:04X} nFib=0x{:04X} lid=0x{:04X} table={}",
            fib.ident(),
            fib.version(),
            fib.language_id(),
            fib.table_selector().stream_name()
        );
        if fib.ident() != WORD97_IDENT {
            log::warn!(
                "unexpected FIB identifier 0x{:04X}, continuing with the Word 97 layout",
                fib.ident()
            );
        }

        Ok(fib)
    }

    /// Build a FIB from the first bytes of the WordDocument stream.
    ///
    /// Extra trailing bytes are ignored.
    pub fn parse(word_document: &[u8]) -> Result<Self> {
        let data: [u8; FIB_LENGTH] = word_document
            .get(..FIB_LENGTH)
            .and_then(|prefix| prefix.try_into().ok())
            .ok_or(DocError::FibTooShort {
                len: word_document.len(),
            })?;
        Ok(Self { data })
    }

    #[inline]
    fn u16_at(&self, offset: usize) -> u16 {
        // Offsets are constants well inside FIB_LENGTH
        read_u16_le(&self.data, offset).unwrap_or_default()
    }

    /// Read a u32 from FibRgFcLcb97 or anywhere else in the prefix.
    #[inline]
    pub fn u32_at(&self, offset: usize) -> Option<u32> {
        read_u32_le(&self.data, offset).ok()
    }

    /// The `wIdent` magic number.
    #[inline]
    pub fn ident(&self) -> u16 {
        self.u16_at(WIDENT_OFFSET)
    }

    /// Get the file format version.
    ///
    /// Common values:
    /// - 0x00C1 (193): Word 97 through Word 2003
    /// - 0x0101 (257): Word 2007
    /// - 0x0112 (274): Word 2010+
    #[inline]
    pub fn version(&self) -> u16 {
        self.u16_at(NFIB_OFFSET)
    }

    /// Get the language ID.
    #[inline]
    pub fn language_id(&self) -> u16 {
        self.u16_at(LID_OFFSET)
    }

    /// Check if the document is encrypted (`fEncrypted`, bit 8 of the flags word).
    #[inline]
    pub fn is_encrypted(&self) -> bool {
        self.u16_at(FLAGS_OFFSET) & 0x0100 != 0
    }

    /// The table stream this document declares as current.
    #[inline]
    pub fn table_selector(&self) -> TableSelector {
        TableSelector::from_flags_byte(self.data[TABLE_FLAGS_OFFSET])
    }

    /// Get access to the raw FIB bytes.
    #[inline]
    pub fn raw_data(&self) -> &[u8; FIB_LENGTH] {
        &self.data
    }
}
