// ==============================================================================
// models.rs - Summary Statistics Data Models
// ==============================================================================
// Description: Records, tables and run configuration for sumstats conversion
// Author: Matt Barham
// Created: 2026-10-17
// Modified: 2026-10-17
// Version: 1.0.0
// ==============================================================================

use serde::{Deserialize, Serialize};

/// One summary statistics row: ordered (column name, value) pairs.
///
/// A value of `None` is an empty cell. Column presence and value presence are
/// separate questions: see [`Record::contains`] and [`Record::get`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    /// 1-based line number in the input file (header is line 1)
    pub line: usize,
    fields: Vec<(String, Option<String>)>,
}

impl Record {
    pub fn new(line: usize) -> Self {
        Self {
            line,
            fields: Vec::new(),
        }
    }

    /// Build a record by aligning values to header names by position
    pub fn from_row<I>(line: usize, header: &[String], values: I) -> Self
    where
        I: IntoIterator<Item = Option<String>>,
    {
        let fields = header.iter().cloned().zip(values).collect();
        Self { line, fields }
    }

    /// Value of a column, `None` if the column is absent or the cell is empty
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .and_then(|(_, value)| value.as_deref())
    }

    pub fn contains(&self, column: &str) -> bool {
        self.fields.iter().any(|(name, _)| name == column)
    }

    /// Overwrite a column in place, or append it if not present
    pub fn set(&mut self, column: &str, value: Option<String>) {
        match self.fields.iter_mut().find(|(name, _)| name == column) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((column.to_string(), value)),
        }
    }

    /// Remove a column, returning its value if the column was present
    pub fn remove(&mut self, column: &str) -> Option<Option<String>> {
        let idx = self.fields.iter().position(|(name, _)| name == column)?;
        Some(self.fields.remove(idx).1)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = Option<&str>> {
        self.fields.iter().map(|(_, value)| value.as_deref())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Ordered records sharing one header
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    pub header: Vec<String>,
    pub records: Vec<Record>,
}

impl Table {
    pub fn new(header: Vec<String>) -> Self {
        Self {
            header,
            records: Vec::new(),
        }
    }

    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Column names and switches supplied by the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionConfig {
    /// Cohort column holding the chromosome (renamed to `chromosome`)
    pub chrom_column: String,
    /// Cohort column holding the composite variant ID (e.g. "1:768116:A:AGTTTT")
    pub variant_column: String,
    /// Keep rows with bracketed structural variant notation
    pub keep_indels: bool,
    /// Field delimiter for both input and output
    pub delimiter: u8,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            chrom_column: "CHROM".to_string(),
            variant_column: "ID".to_string(),
            keep_indels: false,
            delimiter: b'\t',
        }
    }
}

impl ConversionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_chrom_column(mut self, column: impl Into<String>) -> Self {
        self.chrom_column = column.into();
        self
    }

    pub fn with_variant_column(mut self, column: impl Into<String>) -> Self {
        self.variant_column = column.into();
        self
    }

    pub fn with_keep_indels(mut self, keep: bool) -> Self {
        self.keep_indels = keep;
        self
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}
