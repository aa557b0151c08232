// ==============================================================================
// error.rs - Conversion Error Types
// ==============================================================================
// Description: Error taxonomy for the summary statistics conversion pipeline
// Author: Matt Barham
// Created: 2026-10-17
// Modified: 2026-10-17
// Version: 1.0.0
// ==============================================================================
// Record-level: MalformedVariantId (record skipped, run continues)
// Fatal: everything else (run aborts, no output file written)
// ==============================================================================

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while converting a summary statistics table
#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("Malformed variant ID at line {line} in column '{column}': '{value}' splits into {token_count} tokens (expected 4)")]
    MalformedVariantId {
        line: usize,
        column: String,
        value: String,
        token_count: usize,
    },

    /// Configured chromosome or variant ID column absent from the input header.
    ///
    /// Checked before the output schema is planned, so a missing `ID` column
    /// is reported as itself rather than as a missing output column.
    #[error("Required input column '{column}' not found in header")]
    MissingInputColumn { column: String },

    #[error("Required output column '{column}' missing after rename (line {line})")]
    SchemaProjection { column: String, line: usize },

    #[error("Output column '{output}' is supplied by more than one source column: {}", .sources.join(", "))]
    AmbiguousColumn { output: String, sources: Vec<String> },

    #[error("Malformed table {path:?} at line {line}: {details}")]
    MalformedTable {
        path: PathBuf,
        line: usize,
        details: String,
    },

    #[error("Failed to read input {path:?}: {source}")]
    UnreadableInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write output {path:?}: {source}")]
    UnwritableOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConversionError {
    /// Record-level errors are collected and reported; everything else aborts the run
    pub fn is_record_level(&self) -> bool {
        matches!(self, ConversionError::MalformedVariantId { .. })
    }
}

/// Type alias for Results using ConversionError
pub type Result<T> = std::result::Result<T, ConversionError>;
