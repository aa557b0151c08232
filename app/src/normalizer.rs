// ==============================================================================
// normalizer.rs - Variant Identity Normalization
// ==============================================================================
// Description: rsID classification and canonical variant_id synthesis
// Author: Matt Barham
// Created: 2026-10-17
// Modified: 2026-10-17
// Version: 1.0.0
// ==============================================================================
// variant_id = <chromosome>_<position>_<1kg_ref>_<1kg_alt>
//   e.g. CHROM=1, ID=1:766600:<CN0>:G -> 1_766600_<CN0>_G
// ==============================================================================

use crate::models::Record;
use crate::parsers::VariantIdentifier;
use crate::schema::{RS_COLUMN, VARIANT_ID_COLUMN};

/// Missing-value sentinel written when the ID carries no rsID
pub const MISSING_RSID: &str = "#NA";

const RSID_PREFIX: &str = "rs";

/// The first ID token if it is an rsID, otherwise the `#NA` sentinel
pub fn classify_rsid(token: &str) -> &str {
    if token.starts_with(RSID_PREFIX) {
        token
    } else {
        MISSING_RSID
    }
}

/// Join chromosome, position and the ID's allele tokens with '_'.
///
/// Components are opaque text; an empty chromosome cell contributes an
/// empty component.
pub fn synthesize_variant_id(chromosome: &str, identifier: &VariantIdentifier) -> String {
    [
        chromosome,
        identifier.position.as_str(),
        identifier.ref_token.as_str(),
        identifier.alt_token.as_str(),
    ]
    .join("_")
}

/// Stage 3: set `rs` and `variant_id` on the record
pub fn normalize(record: &mut Record, identifier: &VariantIdentifier, chrom_column: &str) {
    let rsid = classify_rsid(&identifier.rs_or_unparsed).to_string();
    let variant_id = synthesize_variant_id(record.get(chrom_column).unwrap_or_default(), identifier);

    record.set(RS_COLUMN, Some(rsid));
    record.set(VARIANT_ID_COLUMN, Some(variant_id));
}
