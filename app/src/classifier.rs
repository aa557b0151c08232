// ==============================================================================
// classifier.rs - Allele Role Classification
// ==============================================================================
// Description: Flags whether the ID's reference token is the cohort's effect allele
// Author: Matt Barham
// Created: 2026-10-17
// Modified: 2026-10-17
// Version: 1.0.0
// ==============================================================================
// Rule: 1kg_ref == ALT -> "EA", otherwise "OA"
// Exact, case-sensitive string comparison; no strand or case normalization.
// ==============================================================================

use serde::{Deserialize, Serialize};

use crate::models::Record;
use crate::parsers::VariantIdentifier;
use crate::schema::{ALT_COLUMN, REF_ALLELE_COLUMN};

/// Which cohort allele the 1000 Genomes reference token corresponds to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlleleRole {
    /// Reference token equals the effect allele (cohort ALT)
    #[serde(rename = "EA")]
    EffectAllele,
    /// Anything else, including an empty ALT cell
    #[serde(rename = "OA")]
    OtherAllele,
}

impl AlleleRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlleleRole::EffectAllele => "EA",
            AlleleRole::OtherAllele => "OA",
        }
    }

    pub fn classify(ref_token: &str, cohort_alt: Option<&str>) -> Self {
        if cohort_alt == Some(ref_token) {
            AlleleRole::EffectAllele
        } else {
            AlleleRole::OtherAllele
        }
    }
}

/// Stage 4: set `ref_allele` on the record
pub fn classify(record: &mut Record, identifier: &VariantIdentifier) -> AlleleRole {
    let role = AlleleRole::classify(&identifier.ref_token, record.get(ALT_COLUMN));
    record.set(REF_ALLELE_COLUMN, Some(role.as_str().to_string()));
    role
}
