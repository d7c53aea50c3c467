//! docfields - field inventory for legacy Word documents
//!
//! Reads the OLE2 container of a Word 97-2003 binary document (.doc),
//! decodes the File Information Block and reports which field types
//! (TOC, PAGE, HYPERLINK, ...) appear in each document part. Fields are
//! identified only; they are never evaluated.
//!
//! # Example
//!
//! ```no_run
//! use docfields::doc::Package;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut pkg = Package::open("document.doc")?;
//! let inventory = pkg.field_inventory()?;
//!
//! println!("table stream: {}", inventory.table());
//! for region in inventory.regions() {
//!     println!("{}", region);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`ole`]: compound file reader, stream catalog and plex parsing
//! - [`doc`]: Word FIB decoding and field inspection
//! - [`report`]: plain-text report used by the `docfields` binary

pub mod common;
pub mod ole;
pub mod report;

pub use ole::doc;
pub use ole::doc::{DocError, FieldInventory, Package, inspect_path};
