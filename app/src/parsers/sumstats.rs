// ==============================================================================
// parsers/sumstats.rs - Cohort Summary Statistics Reader
// ==============================================================================
// Description: Reads delimited GWAS summary statistics into an in-memory table
// Author: Matt Barham
// Created: 2026-10-17
// Modified: 2026-10-17
// Version: 1.0.0
// ==============================================================================
// Format: Delimited text (tab by default), first line is the header
// Example:
//   CHROM  POS     ID                      REF  ALT  AF    ALT_EFFSIZE  SE    PVALUE  N
//   1      672940  rs544698705:672940:G:C  G    C    0.01  0.12         0.05  0.03    1200
// ==============================================================================

use csv::ReaderBuilder;
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::debug;

use crate::error::{ConversionError, Result};
use crate::models::{Record, Table};

/// Reader for cohort summary statistics tables
#[derive(Debug, Clone)]
pub struct SumstatsReader {
    delimiter: u8,
}

impl Default for SumstatsReader {
    fn default() -> Self {
        Self::new(b'\t')
    }
}

impl SumstatsReader {
    pub fn new(delimiter: u8) -> Self {
        Self { delimiter }
    }

    /// Read a table from disk, decompressing gzip input when `compressed` is set
    pub fn read_path(&self, path: impl AsRef<Path>, compressed: bool) -> Result<Table> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ConversionError::UnreadableInput {
            path: path.to_path_buf(),
            source,
        })?;

        if compressed {
            debug!("Reading gzip-compressed table {:?}", path);
            self.read_from(MultiGzDecoder::new(BufReader::new(file)), path)
        } else {
            self.read_from(file, path)
        }
    }

    /// Read a table from any byte source; `path` is used only for error context.
    ///
    /// Empty cells become absent values. Rows whose field count differs from
    /// the header fail with `MalformedTable`.
    pub fn read_from<R: Read>(&self, source: R, path: &Path) -> Result<Table> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(false)
            .from_reader(source);

        let header: Vec<String> = reader
            .headers()
            .map_err(|e| table_error(path, e))?
            .iter()
            .map(str::to_string)
            .collect();

        let mut table = Table::new(header);

        for (idx, result) in reader.records().enumerate() {
            let row = result.map_err(|e| table_error(path, e))?;
            let line = row
                .position()
                .map(|p| p.line() as usize)
                .unwrap_or(idx + 2);

            let values = row
                .iter()
                .map(|field| (!field.is_empty()).then(|| field.to_string()));

            let record = Record::from_row(line, &table.header, values);
            table.push(record);
        }

        debug!("Read {} records with {} columns from {:?}", table.len(), table.header.len(), path);
        Ok(table)
    }
}

fn table_error(path: &Path, err: csv::Error) -> ConversionError {
    let line = err.position().map(|p| p.line() as usize).unwrap_or(0);
    let details = err.to_string();

    match err.into_kind() {
        csv::ErrorKind::Io(source) => ConversionError::UnreadableInput {
            path: path.to_path_buf(),
            source,
        },
        _ => ConversionError::MalformedTable {
            path: path.to_path_buf(),
            line,
            details,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Create a temporary test file with sample sumstats data
    fn create_test_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_read_valid_file() {
        let contents = "\
CHROM\tPOS\tID\tREF\tALT
1\t672940\trs544698705:672940:G:C\tG\tC
1\t768116\t1:768116:A:AGTTTT\tA\tAGTTTT
";
        let file = create_test_file(contents);
        let table = SumstatsReader::default().read_path(file.path(), false).unwrap();

        assert_eq!(table.header, vec!["CHROM", "POS", "ID", "REF", "ALT"]);
        assert_eq!(table.len(), 2);

        assert_eq!(table.records[0].line, 2);
        assert_eq!(table.records[0].get("ID"), Some("rs544698705:672940:G:C"));
        assert_eq!(table.records[1].line, 3);
        assert_eq!(table.records[1].get("ALT"), Some("AGTTTT"));
    }

    #[test]
    fn test_empty_cells_are_absent() {
        let file = create_test_file("CHROM\tAF\tN\n1\t\t100\n");
        let table = SumstatsReader::default().read_path(file.path(), false).unwrap();

        let record = &table.records[0];
        assert!(record.contains("AF"));
        assert_eq!(record.get("AF"), None);
        assert_eq!(record.get("N"), Some("100"));
    }

    #[test]
    fn test_values_are_kept_verbatim() {
        let file = create_test_file("P\tSE\n1e-05\t0.050\n");
        let table = SumstatsReader::default().read_path(file.path(), false).unwrap();

        assert_eq!(table.records[0].get("P"), Some("1e-05"));
        assert_eq!(table.records[0].get("SE"), Some("0.050"));
    }

    #[test]
    fn test_custom_delimiter() {
        let file = create_test_file("CHROM,POS\n1,100\n");
        let table = SumstatsReader::new(b',').read_path(file.path(), false).unwrap();

        assert_eq!(table.header, vec!["CHROM", "POS"]);
        assert_eq!(table.records[0].get("POS"), Some("100"));
    }

    #[test]
    fn test_ragged_row() {
        let file = create_test_file("CHROM\tPOS\n1\t100\n2\n");

        match SumstatsReader::default().read_path(file.path(), false).unwrap_err() {
            ConversionError::MalformedTable { line, .. } => assert_eq!(line, 3),
            other => panic!("Expected MalformedTable, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_file() {
        let result = SumstatsReader::default().read_path("/nonexistent/sumstats.tsv", false);

        match result.unwrap_err() {
            ConversionError::UnreadableInput { path, .. } => {
                assert_eq!(path, Path::new("/nonexistent/sumstats.tsv"));
            }
            other => panic!("Expected UnreadableInput, got {other:?}"),
        }
    }

    #[test]
    fn test_read_gzip() {
        let mut file = NamedTempFile::new().unwrap();
        {
            let mut encoder = GzEncoder::new(&mut file, Compression::default());
            encoder.write_all(b"CHROM\tPOS\n22\t51244237\n").unwrap();
            encoder.finish().unwrap();
        }

        let table = SumstatsReader::default().read_path(file.path(), true).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.records[0].get("CHROM"), Some("22"));
    }
}
