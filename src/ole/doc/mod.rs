/// Word (.doc) field inspection.
///
/// A .doc file is an OLE2 structured storage containing several streams:
/// - **WordDocument**: Main document stream, starting with the FIB
/// - **1Table** or **0Table**: Structure tables, including the field plexes
/// - **Data**: Embedded objects and images (not used here)
///
/// The FIB says which table stream is current and where in it each document
/// part keeps its field plex. Inspection reads those plexes and names the
/// field types that begin in them.
///
/// # Example
///
/// ```rust,no_run
/// use docfields::doc::inspect_path;
///
/// let inventory = inspect_path("document.doc")?;
/// for region in inventory.regions() {
///     println!("{}", region);
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub mod inspect;
pub mod package;
pub mod parts;

pub use inspect::{FieldInventory, RegionReport, inspect_catalog};
pub use package::{DocError, Package, Result, inspect_path};
pub use parts::field_regions::RegionKind;
pub use parts::fields::RegionScan;
pub use parts::table_stream::TableSelector;
