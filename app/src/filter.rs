// ==============================================================================
// filter.rs - Structural Variant Filter
// ==============================================================================
// Description: Drops records carrying bracketed structural allele notation
// Author: Matt Barham
// Created: 2026-10-17
// Modified: 2026-10-17
// Version: 1.0.0
// ==============================================================================

use crate::models::Record;

/// True if any field of the record contains '<' or '>'.
///
/// Every column is inspected, not only the parsed allele tokens, so symbolic
/// alleles in the cohort's own REF/ALT columns are caught too.
pub fn is_structural(record: &Record) -> bool {
    record
        .values()
        .flatten()
        .any(|value| value.contains(['<', '>']))
}

/// Stage 2: decide whether a record survives the filter
pub fn retain(record: &Record, keep_indels: bool) -> bool {
    keep_indels || !is_structural(record)
}
