// ==============================================================================
// processor.rs - Summary Statistics Conversion Pipeline
// ==============================================================================
// Description: Converts cohort GWAS summary statistics to GWAS-SSF v1.0
// Author: Matt Barham
// Created: 2026-10-17
// Modified: 2026-10-17
// Version: 1.0.0
// ==============================================================================
// Stages (per record, in order):
//   1. split variant ID        (parsers::variant_id)
//   2. structural filter       (filter)
//   3. rsid / variant_id       (normalizer)
//   4. ref_allele              (classifier)
//   5. drop, rename, reorder   (schema)
// ==============================================================================

use rayon::prelude::*;
use std::path::Path;
use tracing::{debug, info};

use crate::classifier::{self, AlleleRole};
use crate::error::{ConversionError, Result};
use crate::filter;
use crate::models::{ConversionConfig, Record, Table};
use crate::normalizer;
use crate::output::OutputWriter;
use crate::parsers::{split_expand, SumstatsReader};
use crate::report::ConversionReport;
use crate::schema::{
    ColumnSchema, ProjectionPlan, KG_ALT_COLUMN, KG_REF_COLUMN, POSITION_COLUMN,
    REF_ALLELE_COLUMN, RS_COLUMN, VARIANT_ID_COLUMN,
};
use crate::validator::InputValidator;

/// Columns appended to every record by stages 1, 3 and 4
const DERIVED_COLUMNS: [&str; 6] = [
    RS_COLUMN,
    POSITION_COLUMN,
    KG_REF_COLUMN,
    KG_ALT_COLUMN,
    VARIANT_ID_COLUMN,
    REF_ALLELE_COLUMN,
];

/// What happened to one input record
#[derive(Debug)]
enum Outcome {
    Kept(Record, Option<AlleleRole>),
    Dropped,
    Skipped(ConversionError),
}

pub struct SumstatsProcessor {
    config: ConversionConfig,
    schema: ColumnSchema,
}

impl SumstatsProcessor {
    pub fn new(config: ConversionConfig) -> Self {
        let schema = ColumnSchema::new(config.chrom_column.clone());
        Self { config, schema }
    }

    /// Read `input`, convert it, and write `output`.
    ///
    /// Nothing is written unless every stage succeeded; record-level
    /// failures are counted in the returned report.
    pub fn process_file(&self, input: &Path, output: &Path) -> Result<ConversionReport> {
        info!("Converting {:?} -> {:?}", input, output);
        let mut report = ConversionReport::new(self.config.clone());

        // 1. Validate and read input
        let validated = InputValidator::new().validate(input)?;
        report.input = Some(validated.path.clone());
        report.input_sha256 = Some(validated.hash_sha256.clone());
        report.input_size = Some(validated.size);
        report.input_validated_at = Some(validated.validated_at);

        let table = SumstatsReader::new(self.config.delimiter).read_path(input, validated.compressed)?;
        info!("Read {} records from {:?}", table.len(), input);

        // 2. Transform
        let converted = self.process_table(table, &mut report)?;

        // 3. Write output
        let format = OutputWriter::new(self.config.delimiter).write(&converted, output)?;
        report.output = Some(output.to_path_buf());
        report.output_format = Some(format);

        report.finish();
        report.log_summary();
        Ok(report)
    }

    /// Run the five stages over an in-memory table.
    ///
    /// Stages 1-4 and per-record projection run in parallel; output keeps
    /// input row order. Schema errors abort before any record is touched.
    pub fn process_table(&self, table: Table, report: &mut ConversionReport) -> Result<Table> {
        report.records_read += table.len();
        report.canonical_input = self.schema.is_canonical(&table.header);

        let plan = if report.canonical_input {
            info!("Input already in GWAS-SSF column order, skipping identifier stages");
            self.schema.plan(table.header.iter().map(String::as_str))?
        } else {
            self.check_input_columns(&table.header)?;
            self.schema.plan(derived_layout(&table.header))?
        };

        let canonical = report.canonical_input;
        let outcomes: Vec<Result<Outcome>> = table
            .records
            .into_par_iter()
            .map(|record| {
                if canonical {
                    self.passthrough(record, &plan)
                } else {
                    self.transform(record, &plan)
                }
            })
            .collect();

        let mut converted = Table::new(plan.output_header());
        for outcome in outcomes {
            match outcome? {
                Outcome::Kept(record, role) => {
                    match role {
                        Some(AlleleRole::EffectAllele) => report.effect_allele_refs += 1,
                        Some(AlleleRole::OtherAllele) => report.other_allele_refs += 1,
                        None => {}
                    }
                    converted.push(record);
                }
                Outcome::Dropped => report.structural_dropped += 1,
                Outcome::Skipped(error) => report.record_error(error)?,
            }
        }

        report.records_written += converted.len();
        debug!(
            "Converted {} records ({} structural dropped, {} malformed)",
            converted.len(),
            report.structural_dropped,
            report.skipped()
        );
        Ok(converted)
    }

    fn check_input_columns(&self, header: &[String]) -> Result<()> {
        for column in [&self.config.chrom_column, &self.config.variant_column] {
            if !header.contains(column) {
                return Err(ConversionError::MissingInputColumn {
                    column: column.clone(),
                });
            }
        }
        Ok(())
    }

    fn transform(&self, mut record: Record, plan: &ProjectionPlan) -> Result<Outcome> {
        let identifier = match split_expand(&mut record, &self.config.variant_column) {
            Ok(identifier) => identifier,
            Err(e) if e.is_record_level() => return Ok(Outcome::Skipped(e)),
            Err(e) => return Err(e),
        };

        if !filter::retain(&record, self.config.keep_indels) {
            return Ok(Outcome::Dropped);
        }

        normalizer::normalize(&mut record, &identifier, &self.config.chrom_column);
        let role = classifier::classify(&mut record, &identifier);

        Ok(Outcome::Kept(plan.project(record)?, Some(role)))
    }

    fn passthrough(&self, record: Record, plan: &ProjectionPlan) -> Result<Outcome> {
        if !filter::retain(&record, self.config.keep_indels) {
            return Ok(Outcome::Dropped);
        }
        Ok(Outcome::Kept(plan.project(record)?, None))
    }
}

/// Record layout after stages 1-4: input header plus derived columns
fn derived_layout(header: &[String]) -> Vec<&str> {
    let mut columns: Vec<&str> = header.iter().map(String::as_str).collect();
    for derived in DERIVED_COLUMNS {
        if !columns.contains(&derived) {
            columns.push(derived);
        }
    }
    columns
}
