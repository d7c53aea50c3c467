//! Plain-text field report over a list of documents.
//!
//! ```text
//! report.doc
//! Document body fields: TOC, PAGEREF, PAGEREF
//! Header/footer fields: PAGE
//! broken.doc
//! Error processing file broken.doc: cannot find table stream 1Table
//! ```

use crate::ole::doc::{FieldInventory, inspect_path};
use std::io::{self, Write};
use std::path::Path;

/// Outcome counts of one report run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportSummary {
    pub inspected: usize,
    pub failed: usize,
}

/// Write the field lines of one inventory.
pub fn write_inventory<W: Write>(out: &mut W, inventory: &FieldInventory) -> io::Result<()> {
    for region in inventory.regions() {
        writeln!(out, "{}", region)?;
    }
    Ok(())
}

/// Inspect every path in order and write its report to `out`.
///
/// Per-document failures are written as a diagnostic line and do not stop
/// the run; only failures to write to `out` are returned.
pub fn report_paths<W, P>(out: &mut W, paths: &[P]) -> io::Result<ReportSummary>
where
    W: Write,
    P: AsRef<Path>,
{
    let mut summary = ReportSummary::default();

    for path in paths {
        let path = path.as_ref();
        writeln!(out, "{}", path.display())?;

        match inspect_path(path) {
            Ok(inventory) => {
                summary.inspected += 1;
                write_inventory(out, &inventory)?;
            },
            Err(err) => {
                summary.failed += 1;
                log::debug!("{}: {:?}", path.display(), err);
                writeln!(out, "Error processing file {}: {}", path.display(), err)?;
            },
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ole::doc::RegionKind;
    use crate::ole::doc::parts::fib::FIB_LENGTH;
    use crate::ole::fixture::CompoundFileBuilder;
    use std::path::PathBuf;

    fn fib(secondary: bool, regions: &[(RegionKind, u32, u32)]) -> Vec<u8> {
        let mut data = vec![0u8; FIB_LENGTH + 200];
        data[0..2].copy_from_slice(&0xA5ECu16.to_le_bytes());
        if secondary {
            data[11] = 0x02;
        }
        for &(kind, fc, lcb) in regions {
            let at = kind.fc_offset();
            data[at..at + 4].copy_from_slice(&fc.to_le_bytes());
            data[at + 4..at + 8].copy_from_slice(&lcb.to_le_bytes());
        }
        data
    }

    /// Field plex with one begin/end pair per code.
    fn field_plex(codes: &[u8]) -> Vec<u8> {
        let mut data = Vec::new();
        for cp in 0..=(codes.len() * 2) as u32 {
            data.extend_from_slice(&(cp * 3).to_le_bytes());
        }
        for &code in codes {
            data.extend_from_slice(&[0x13, code, 0x15, 0x00]);
        }
        data
    }

    fn write_doc(dir: &Path, name: &str, builder: CompoundFileBuilder) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, builder.build()).unwrap();
        path
    }

    fn run(paths: &[PathBuf]) -> (String, ReportSummary) {
        let mut out = Vec::new();
        let summary = report_paths(&mut out, paths).unwrap();
        (String::from_utf8(out).unwrap(), summary)
    }

    #[test]
    fn test_failures_do_not_stop_later_paths() {
        let dir = tempfile::tempdir().unwrap();
        let plex = field_plex(&[0x58, 0x25]);
        let no_main = write_doc(
            dir.path(),
            "no_main.doc",
            CompoundFileBuilder::new().stream("1Table", &plex),
        );
        let good = write_doc(
            dir.path(),
            "good.doc",
            CompoundFileBuilder::new()
                .stream("WordDocument", &fib(false, &[(RegionKind::Comment, 0, plex.len() as u32)]))
                .stream("0Table", &plex),
        );

        let (text, summary) = run(&[no_main.clone(), good.clone()]);
        let expected = format!(
            "{main}\nError processing file {main}: WordDocument stream not found\n{good}\nComment fields: HYPERLINK, PAGEREF\n",
            main = no_main.display(),
            good = good.display(),
        );
        assert_eq!(text, expected);
        assert_eq!(summary, ReportSummary { inspected: 1, failed: 1 });
    }

    #[test]
    fn test_selected_table_missing_even_if_other_is_valid() {
        let dir = tempfile::tempdir().unwrap();
        let plex = field_plex(&[0x0D]);
        let path = write_doc(
            dir.path(),
            "stale.doc",
            CompoundFileBuilder::new()
                .stream("WordDocument", &fib(true, &[(RegionKind::MainBody, 0, plex.len() as u32)]))
                .stream("0Table", &plex),
        );

        let (text, summary) = run(&[path.clone()]);
        assert_eq!(
            text,
            format!(
                "{p}\nError processing file {p}: cannot find table stream 1Table\n",
                p = path.display()
            )
        );
        assert_eq!(summary.failed, 1);
    }

    #[test]
    fn test_out_of_bounds_region_is_omitted() {
        let dir = tempfile::tempdir().unwrap();
        let header_plex = field_plex(&[0x21, 0x1A]);
        let mut table = header_plex.clone();
        table.resize(5000, 0);
        let path = write_doc(
            dir.path(),
            "partial.doc",
            CompoundFileBuilder::new()
                .stream(
                    "WordDocument",
                    &fib(
                        true,
                        &[
                            (RegionKind::MainBody, 4990, 64),
                            (RegionKind::HeaderFooter, 0, header_plex.len() as u32),
                        ],
                    ),
                )
                .stream("1Table", &table),
        );

        let (text, summary) = run(&[path.clone()]);
        assert_eq!(
            text,
            format!("{}\nHeader/footer fields: PAGE, NUMPAGES\n", path.display())
        );
        assert_eq!(summary, ReportSummary { inspected: 1, failed: 0 });
    }

    #[test]
    fn test_short_fib_and_no_fields() {
        let dir = tempfile::tempdir().unwrap();
        let short = write_doc(
            dir.path(),
            "short.doc",
            CompoundFileBuilder::new()
                .stream("WordDocument", &[0u8; 100])
                .stream("0Table", &[0u8; 8]),
        );
        let empty = write_doc(
            dir.path(),
            "empty.doc",
            CompoundFileBuilder::new()
                .stream("WordDocument", &fib(false, &[]))
                .stream("0Table", &[0u8; 8]),
        );

        let (text, summary) = run(&[short.clone(), empty.clone()]);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[1].ends_with("file information block too short (100 bytes)"));
        assert!(lines[3].ends_with(": no fields"));
        assert_eq!(summary.failed, 2);
    }

    #[test]
    fn test_empty_region_prints_bare_label() {
        let dir = tempfile::tempdir().unwrap();
        let plex = field_plex(&[]);
        let path = write_doc(
            dir.path(),
            "bare.doc",
            CompoundFileBuilder::new()
                .stream("WordDocument", &fib(false, &[(RegionKind::Textbox, 0, plex.len() as u32)]))
                .stream("0Table", &plex),
        );

        let (text, _) = run(&[path.clone()]);
        assert_eq!(text, format!("{}\nTextbox fields: \n", path.display()));
    }
}
