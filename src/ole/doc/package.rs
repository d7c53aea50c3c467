/// Package implementation for legacy Word documents (.doc).
use super::super::{OleError, OleFile};
use super::inspect::{FieldInventory, inspect_catalog};
use super::parts::table_stream::TableSelector;
use std::fs::File;
use std::io::{self, BufReader, Read, Seek};
use std::path::Path;
use thiserror::Error;

/// Error types for DOC field inspection.
///
/// Each of these stops processing of one document only.
#[derive(Debug, Error)]
pub enum DocError {
    /// The file could not be opened or is not a compound file
    #[error("not a valid compound container: {0}")]
    Container(#[from] OleError),
    /// No WordDocument stream
    #[error("WordDocument stream not found")]
    MissingMainStream,
    /// WordDocument is shorter than the FIB
    #[error("file information block too short ({len} bytes)")]
    FibTooShort { len: usize },
    /// The table stream named by the FIB is absent
    #[error("cannot find table stream {selector}")]
    TableStreamMissing { selector: TableSelector },
    /// Every field plex length in the FIB is zero
    #[error("no fields")]
    NoFieldData,
}

impl From<io::Error> for DocError {
    fn from(err: io::Error) -> Self {
        DocError::Container(OleError::Io(err))
    }
}

/// Result type for DOC operations.
pub type Result<T> = std::result::Result<T, DocError>;

/// A Word (.doc) package.
///
/// Wraps the OLE container of a document. Dropping the package closes the
/// underlying file.
///
/// # Examples
///
/// ```rust,no_run
/// use docfields::doc::Package;
///
/// let mut pkg = Package::open("document.doc")?;
/// let inventory = pkg.field_inventory()?;
/// for region in inventory.regions() {
///     println!("{}", region);
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Package<R: Read + Seek = BufReader<File>> {
    /// The underlying OLE file
    ole: OleFile<R>,
}

impl Package<BufReader<File>> {
    /// Open a .doc package from a file path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Package::from_reader(BufReader::new(file))
    }
}

impl<R: Read + Seek> Package<R> {
    /// Create a Package from any reader that implements Read + Seek.
    ///
    /// Only the container structure is validated here; a missing
    /// WordDocument stream is reported by [`Package::field_inventory`].
    pub fn from_reader(reader: R) -> Result<Self> {
        let ole = OleFile::open(reader)?;
        Ok(Self { ole })
    }

    /// Inspect the document's field plexes.
    pub fn field_inventory(&mut self) -> Result<FieldInventory> {
        inspect_catalog(&mut self.ole)
    }

    /// Get the underlying OLE file.
    #[inline]
    pub fn ole_file(&mut self) -> &mut OleFile<R> {
        &mut self.ole
    }
}

/// Open the document at `path`, inspect it and close it again.
pub fn inspect_path<P: AsRef<Path>>(path: P) -> Result<FieldInventory> {
    let path = path.as_ref();
    log::info!("inspecting {}", path.display());
    let mut package = Package::open(path)?;
    package.field_inventory()
}
