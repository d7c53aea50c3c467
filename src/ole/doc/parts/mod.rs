/// Internal parts for reading DOC file structures.
///
/// - FIB (File Information Block)
/// - Table stream selection
/// - Field plex locations
/// - Field plex scanning and field type names
pub mod fib;
pub mod field_names;
pub mod field_regions;
pub mod fields;
pub mod table_stream;
