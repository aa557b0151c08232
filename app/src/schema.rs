// ==============================================================================
// schema.rs - GWAS-SSF Output Schema
// ==============================================================================
// Description: Column drop list, rename map and fixed output order
// Author: Matt Barham
// Created: 2026-10-17
// Modified: 2026-10-17
// Version: 1.0.0
// ==============================================================================
// Reference: GWAS-SSF v1.0 (https://github.com/EBISPOT/gwas-summary-statistics-standard)
// ==============================================================================

use tracing::debug;

use crate::error::{ConversionError, Result};
use crate::models::Record;

// Helper columns produced while parsing the variant ID
pub const RS_COLUMN: &str = "rs";
pub const POSITION_COLUMN: &str = "pos";
pub const KG_REF_COLUMN: &str = "1kg_ref";
pub const KG_ALT_COLUMN: &str = "1kg_alt";

// Derived columns that survive into the output
pub const VARIANT_ID_COLUMN: &str = "variant_id";
pub const REF_ALLELE_COLUMN: &str = "ref_allele";

/// Cohort column holding the effect (alternate) allele
pub const ALT_COLUMN: &str = "ALT";

/// GWAS-SSF output columns, in file order
pub const OUTPUT_COLUMNS: [&str; 12] = [
    "chromosome",
    "base_pair_location",
    "effect_allele",
    "other_allele",
    "beta",
    "standard_error",
    "effect_allele_frequency",
    "p_value",
    "rsid",
    "variant_id",
    "ref_allele",
    "n",
];

/// Cohort QC/annotation columns and parse helpers removed before renaming
pub const DROP_COLUMNS: [&str; 17] = [
    "ID",
    "MAF",
    "INFORMATIVE_ALT_AC",
    "CALL_RATE",
    "HWE_PVALUE",
    "N_REF",
    "N_HET",
    "N_ALT",
    "U_STAT",
    "SQRT_V_STAT",
    KG_REF_COLUMN,
    KG_ALT_COLUMN,
    POSITION_COLUMN,
    "UNKOWN",
    "POP_MAF",
    "SOURCE",
    "IMP_QUAL",
];

/// Fixed cohort -> GWAS-SSF renames (the chromosome column is configured separately)
pub const RENAMES: [(&str, &str); 11] = [
    ("P", "p_value"),
    ("PVALUE", "p_value"),
    ("POS", "base_pair_location"),
    ("REF", "other_allele"),
    ("ALT", "effect_allele"),
    ("AF", "effect_allele_frequency"),
    ("ALT_EFFSIZE", "beta"),
    ("SE", "standard_error"),
    (RS_COLUMN, "rsid"),
    ("N_INFORMATIVE", "n"),
    ("N", "n"),
];

const CHROMOSOME: &str = "chromosome";

/// Output schema bound to a configured chromosome column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSchema {
    chrom_column: String,
}

impl ColumnSchema {
    pub fn new(chrom_column: impl Into<String>) -> Self {
        Self {
            chrom_column: chrom_column.into(),
        }
    }

    /// Output name for a source column; columns without a rename keep their name
    pub fn output_name<'a>(&self, source: &'a str) -> &'a str {
        if source == self.chrom_column {
            return CHROMOSOME;
        }

        RENAMES
            .iter()
            .find(|(from, _)| *from == source)
            .map(|(_, to)| *to)
            .unwrap_or(source)
    }

    pub fn is_dropped(&self, column: &str) -> bool {
        DROP_COLUMNS.contains(&column)
    }

    /// True when a header is already the GWAS-SSF output header
    pub fn is_canonical<S: AsRef<str>>(&self, header: &[S]) -> bool {
        header.len() == OUTPUT_COLUMNS.len()
            && header.iter().zip(OUTPUT_COLUMNS).all(|(h, c)| h.as_ref() == c)
    }

    /// Resolve, once per table, which source column feeds each output column.
    ///
    /// `columns` is the record layout after the derived columns were added.
    /// Fails with `SchemaProjection` when an output column has no source and
    /// with `AmbiguousColumn` when aliases (e.g. `P` and `PVALUE`) both exist.
    pub fn plan<'a, I>(&self, columns: I) -> Result<ProjectionPlan>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let kept: Vec<&str> = columns
            .into_iter()
            .filter(|column| !self.is_dropped(column))
            .collect();

        let mut sources = Vec::with_capacity(OUTPUT_COLUMNS.len());

        for output in OUTPUT_COLUMNS {
            let mut candidates: Vec<&str> = kept
                .iter()
                .copied()
                .filter(|column| self.output_name(column) == output)
                .collect();
            candidates.dedup();

            match candidates.as_slice() {
                [source] => sources.push(source.to_string()),
                [] => {
                    return Err(ConversionError::SchemaProjection {
                        column: output.to_string(),
                        line: 1,
                    })
                }
                _ => {
                    return Err(ConversionError::AmbiguousColumn {
                        output: output.to_string(),
                        sources: candidates.iter().map(|s| s.to_string()).collect(),
                    })
                }
            }
        }

        debug!("Projection plan: {:?}", sources);
        Ok(ProjectionPlan { sources })
    }
}

/// Source column for each output column, in output order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectionPlan {
    sources: Vec<String>,
}

impl ProjectionPlan {
    #[cfg(test)]
    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    pub fn output_header(&self) -> Vec<String> {
        OUTPUT_COLUMNS.iter().map(|c| c.to_string()).collect()
    }

    /// Stage 5: drop cohort/helper columns, then rename and reorder.
    ///
    /// A record lacking a planned source column fails rather than being
    /// emitted with a blank value.
    pub fn project(&self, mut record: Record) -> Result<Record> {
        drop_extra(&mut record);

        let mut projected = Record::new(record.line);
        for (output, source) in OUTPUT_COLUMNS.iter().zip(&self.sources) {
            let value = record.remove(source).ok_or_else(|| ConversionError::SchemaProjection {
                column: output.to_string(),
                line: record.line,
            })?;
            projected.set(output, value);
        }

        Ok(projected)
    }
}

/// Remove every drop-list column present in the record; absent ones are skipped
pub fn drop_extra(record: &mut Record) -> usize {
    DROP_COLUMNS
        .iter()
        .filter_map(|column| record.remove(column))
        .count()
}
