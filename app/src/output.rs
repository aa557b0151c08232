// ==============================================================================
// output.rs - GWAS-SSF Table Output
// ==============================================================================
// Description: Writes converted tables as delimited text, optionally gzipped
// Author: Matt Barham
// Created: 2026-10-17
// Modified: 2026-10-17
// Version: 1.0.0
// ==============================================================================
// Output is staged in a hidden sibling file and renamed into place only once
// fully written, so a failed run never leaves a partial table behind.
// ==============================================================================

use csv::WriterBuilder;
use flate2::write::GzEncoder;
use flate2::Compression;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::{ConversionError, Result};
use crate::models::Table;

/// Supported output encodings, chosen from the output file name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Plain delimited text
    Tsv,
    /// Gzip-compressed delimited text
    TsvGz,
}

impl OutputFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("gz") => OutputFormat::TsvGz,
            _ => OutputFormat::Tsv,
        }
    }
}

/// Delimited table writer
#[derive(Debug, Clone)]
pub struct OutputWriter {
    delimiter: u8,
}

impl Default for OutputWriter {
    fn default() -> Self {
        Self::new(b'\t')
    }
}

impl OutputWriter {
    pub fn new(delimiter: u8) -> Self {
        Self { delimiter }
    }

    /// Write the table to `path`, replacing any existing file only on success
    pub fn write(&self, table: &Table, path: &Path) -> Result<OutputFormat> {
        let format = OutputFormat::from_path(path);
        let unwritable = |source: io::Error| ConversionError::UnwritableOutput {
            path: path.to_path_buf(),
            source,
        };

        let staging = staging_path(path).map_err(unwritable)?;
        debug!("Staging {:?} output in {:?}", format, staging);

        let written = File::create(&staging)
            .and_then(|file| self.write_file(table, file, format))
            .and_then(|_| std::fs::rename(&staging, path));

        if let Err(e) = written {
            if let Err(cleanup) = std::fs::remove_file(&staging) {
                if cleanup.kind() != io::ErrorKind::NotFound {
                    warn!("Failed to remove staging file {:?}: {}", staging, cleanup);
                }
            }
            return Err(unwritable(e));
        }

        info!("Wrote {} records to {:?}", table.len(), path);
        Ok(format)
    }

    fn write_file(&self, table: &Table, file: File, format: OutputFormat) -> io::Result<()> {
        let buffered = BufWriter::new(file);

        let mut inner = match format {
            OutputFormat::Tsv => self.write_table(table, buffered)?,
            OutputFormat::TsvGz => {
                let encoder = GzEncoder::new(buffered, Compression::default());
                self.write_table(table, encoder)?.finish()?
            }
        };

        inner.flush()?;
        inner.get_ref().sync_all()
    }

    fn write_table<W: Write>(&self, table: &Table, sink: W) -> io::Result<W> {
        let mut writer = WriterBuilder::new()
            .delimiter(self.delimiter)
            .from_writer(sink);

        writer.write_record(&table.header)?;
        for record in &table.records {
            writer.write_record(record.values().map(|value| value.unwrap_or_default()))?;
        }

        writer.into_inner().map_err(|e| e.into_error())
    }
}

fn staging_path(path: &Path) -> io::Result<PathBuf> {
    let name = path.file_name().ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "output path has no file name")
    })?;

    let mut staged = std::ffi::OsString::from(".");
    staged.push(name);
    staged.push(".partial");
    Ok(path.with_file_name(staged))
}
