// ==============================================================================
// report.rs - Conversion Run Report
// ==============================================================================
// Description: Aggregated diagnostics for one conversion run
// Author: Matt Barham
// Created: 2026-10-17
// Modified: 2026-10-17
// Version: 1.0.0
// ==============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{ConversionError, Result};
use crate::models::ConversionConfig;
use crate::output::OutputFormat;

/// Number of malformed identifiers echoed individually in the summary log
const SUMMARY_SAMPLE: usize = 10;

/// A record skipped because its variant ID did not split into four tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MalformedRecord {
    pub line: usize,
    pub value: String,
    pub token_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub config: ConversionConfig,
    pub input: Option<PathBuf>,
    pub input_sha256: Option<String>,
    pub input_size: Option<u64>,
    pub input_validated_at: Option<DateTime<Utc>>,
    pub output: Option<PathBuf>,
    pub output_format: Option<OutputFormat>,
    /// Input header already matched the output schema
    pub canonical_input: bool,
    pub records_read: usize,
    pub records_written: usize,
    pub structural_dropped: usize,
    /// Records whose ID reference token equals the cohort ALT ("EA")
    pub effect_allele_refs: usize,
    /// Records classified "OA"
    pub other_allele_refs: usize,
    pub malformed: Vec<MalformedRecord>,
}

impl ConversionReport {
    pub fn new(config: ConversionConfig) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            started_at: Utc::now(),
            finished_at: None,
            config,
            input: None,
            input_sha256: None,
            input_size: None,
            input_validated_at: None,
            output: None,
            output_format: None,
            canonical_input: false,
            records_read: 0,
            records_written: 0,
            structural_dropped: 0,
            effect_allele_refs: 0,
            other_allele_refs: 0,
            malformed: Vec::new(),
        }
    }

    /// Log and collect a record-level error; fatal errors are handed back
    pub fn record_error(&mut self, error: ConversionError) -> Result<()> {
        match error {
            ConversionError::MalformedVariantId {
                line,
                column,
                value,
                token_count,
            } => {
                warn!(
                    "Skipping line {}: {} value '{}' splits into {} tokens",
                    line, column, value, token_count
                );
                self.malformed.push(MalformedRecord {
                    line,
                    value,
                    token_count,
                });
                Ok(())
            }
            fatal => Err(fatal),
        }
    }

    pub fn skipped(&self) -> usize {
        self.malformed.len()
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    pub fn log_summary(&self) {
        info!(
            "Run {}: read {}, wrote {}, dropped {} structural, skipped {} malformed",
            self.run_id,
            self.records_read,
            self.records_written,
            self.structural_dropped,
            self.skipped()
        );
        info!(
            "ref_allele: {} EA, {} OA",
            self.effect_allele_refs, self.other_allele_refs
        );

        if !self.malformed.is_empty() {
            warn!("{} records had malformed variant IDs", self.malformed.len());
            for record in self.malformed.iter().take(SUMMARY_SAMPLE) {
                warn!("  line {}: '{}'", record.line, record.value);
            }
            if self.malformed.len() > SUMMARY_SAMPLE {
                warn!("  ... and {} more", self.malformed.len() - SUMMARY_SAMPLE);
            }
        }
    }

    /// Write the report as pretty-printed JSON
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let write = || -> io::Result<()> {
            let mut writer = BufWriter::new(File::create(path)?);
            serde_json::to_writer_pretty(&mut writer, self)?;
            writeln!(writer)?;
            writer.flush()
        };

        write().map_err(|source| ConversionError::UnwritableOutput {
            path: path.to_path_buf(),
            source,
        })
    }
}
