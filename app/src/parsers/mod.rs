// ==============================================================================
// parsers/mod.rs - File parser modules
// ==============================================================================
// Description: Parsers for summary statistics tables and variant identifiers
// Author: Matt Barham
// Created: 2026-10-17
// Modified: 2026-10-17
// Version: 1.0.0
// ==============================================================================

pub mod sumstats;
pub mod variant_id;

pub use sumstats::SumstatsReader;
pub use variant_id::{split_expand, tokenize, VariantIdError, VariantIdTokens, VariantIdentifier};
