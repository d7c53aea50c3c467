//! Field type (`flt`) names.
//!
//! The argument byte of a field-begin marker identifies the field type. Codes
//! and keywords follow the [MS-DOC] `flt` table.

/// `flt` code to field keyword (compile-time generated)
static FIELD_NAMES: phf::Map<u8, &'static str> = phf::phf_map! {
    0x03u8 => "REF",
    0x04u8 => "XE",
    0x05u8 => "FTNREF",
    0x06u8 => "SET",
    0x07u8 => "IF",
    0x08u8 => "INDEX",
    0x09u8 => "TC",
    0x0Au8 => "STYLEREF",
    0x0Bu8 => "RD",
    0x0Cu8 => "SEQ",
    0x0Du8 => "TOC",
    0x0Eu8 => "INFO",
    0x0Fu8 => "TITLE",
    0x10u8 => "SUBJECT",
    0x11u8 => "AUTHOR",
    0x12u8 => "KEYWORDS",
    0x13u8 => "COMMENTS",
    0x14u8 => "LASTSAVEDBY",
    0x15u8 => "CREATEDATE",
    0x16u8 => "SAVEDATE",
    0x17u8 => "PRINTDATE",
    0x18u8 => "REVNUM",
    0x19u8 => "EDITTIME",
    0x1Au8 => "NUMPAGES",
    0x1Bu8 => "NUMWORDS",
    0x1Cu8 => "NUMCHARS",
    0x1Du8 => "FILENAME",
    0x1Eu8 => "TEMPLATE",
    0x1Fu8 => "DATE",
    0x20u8 => "TIME",
    0x21u8 => "PAGE",
    0x22u8 => "=",
    0x23u8 => "QUOTE",
    0x24u8 => "INCLUDE",
    0x25u8 => "PAGEREF",
    0x26u8 => "ASK",
    0x27u8 => "FILLIN",
    0x28u8 => "DATA",
    0x29u8 => "NEXT",
    0x2Au8 => "NEXTIF",
    0x2Bu8 => "SKIPIF",
    0x2Cu8 => "MERGEREC",
    0x2Du8 => "DDE",
    0x2Eu8 => "DDEAUTO",
    0x2Fu8 => "GLOSSARY",
    0x30u8 => "PRINT",
    0x31u8 => "EQ",
    0x32u8 => "GOTOBUTTON",
    0x33u8 => "MACROBUTTON",
    0x34u8 => "AUTONUMOUT",
    0x35u8 => "AUTONUMLGL",
    0x36u8 => "AUTONUM",
    0x37u8 => "IMPORT",
    0x38u8 => "LINK",
    0x39u8 => "SYMBOL",
    0x3Au8 => "EMBED",
    0x3Bu8 => "MERGEFIELD",
    0x3Cu8 => "USERNAME",
    0x3Du8 => "USERINITIALS",
    0x3Eu8 => "USERADDRESS",
    0x3Fu8 => "BARCODE",
    0x40u8 => "DOCVARIABLE",
    0x41u8 => "SECTION",
    0x42u8 => "SECTIONPAGES",
    0x43u8 => "INCLUDEPICTURE",
    0x44u8 => "INCLUDETEXT",
    0x45u8 => "FILESIZE",
    0x46u8 => "FORMTEXT",
    0x47u8 => "FORMCHECKBOX",
    0x48u8 => "NOTEREF",
    0x49u8 => "TOA",
    0x4Au8 => "TA",
    0x4Bu8 => "MERGESEQ",
    0x4Du8 => "PRIVATE",
    0x4Eu8 => "DATABASE",
    0x4Fu8 => "AUTOTEXT",
    0x50u8 => "COMPARE",
    0x51u8 => "ADDIN",
    0x53u8 => "FORMDROPDOWN",
    0x54u8 => "ADVANCE",
    0x55u8 => "DOCPROPERTY",
    0x57u8 => "CONTROL",
    0x58u8 => "HYPERLINK",
    0x59u8 => "AUTOTEXTLIST",
    0x5Au8 => "LISTNUM",
    0x5Bu8 => "HTMLCONTROL",
    0x5Cu8 => "BIDIOUTLINE",
    0x5Du8 => "ADDRESSBLOCK",
    0x5Eu8 => "GREETINGLINE",
    0x5Fu8 => "SHAPE",
};

/// Placeholder name for codes without a known keyword.
pub const UNKNOWN_FIELD_NAME: &str = "";

/// Look up the keyword for a field type code.
///
/// Total over all byte values; unknown codes yield [`UNKNOWN_FIELD_NAME`].
#[inline]
pub fn field_name(code: u8) -> &'static str {
    FIELD_NAMES.get(&code).copied().unwrap_or(UNKNOWN_FIELD_NAME)
}
