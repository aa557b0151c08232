// ==============================================================================
// parsers/variant_id.rs - Composite Variant Identifier Parser
// ==============================================================================
// Description: Splits cohort variant IDs into rs/position/ref/alt tokens
// Author: Matt Barham
// Created: 2026-10-17
// Modified: 2026-10-17
// Version: 1.0.0
// ==============================================================================
// Format: colon-delimited, bracketed structural alleles kept whole
// Example:
//   rs544698705:672940:G:C      -> rs544698705 | 672940 | G     | C
//   1:768116:A:AGTTTT           -> 1           | 768116 | A     | AGTTTT
//   1:766600:<CN0>:G            -> 1           | 766600 | <CN0> | G
//   1:3011887:<INS:ME:ALU>:A    -> 1           | 3011887| <INS:ME:ALU> | A
// ==============================================================================

use thiserror::Error;

use crate::error::ConversionError;
use crate::models::Record;
use crate::schema::{KG_ALT_COLUMN, KG_REF_COLUMN, POSITION_COLUMN, RS_COLUMN};

/// Number of tokens a well-formed variant ID splits into
pub const VARIANT_ID_TOKENS: usize = 4;

/// The four components of a composite variant ID
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantIdentifier {
    /// rsID (e.g. "rs544698705") or the chromosome when no rsID was assigned
    pub rs_or_unparsed: String,
    /// Base pair position, kept as text
    pub position: String,
    /// Reference allele token from the 1000 Genomes style ID (may be "<CN0>")
    pub ref_token: String,
    /// Alternate allele token from the 1000 Genomes style ID
    pub alt_token: String,
}

/// Errors that can occur while splitting a variant ID
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VariantIdError {
    #[error("Variant ID '{value}' splits into {count} tokens (expected 4)")]
    TokenCount { value: String, count: usize },
}

/// Lazy tokenizer over a variant ID.
///
/// Yields maximal runs of characters other than `:`, `<` and `>`, or a
/// `<...>` span running to the next `>` (colons inside the span are not
/// delimiters). A `<` with no closing `>`, an empty `<>`, and stray `>` or
/// `:` characters are skipped.
#[derive(Debug, Clone)]
pub struct VariantIdTokens<'a> {
    input: &'a str,
    pos: usize,
}

/// Tokenize a variant ID
pub fn tokenize(input: &str) -> VariantIdTokens<'_> {
    VariantIdTokens { input, pos: 0 }
}

fn is_delimiter(byte: u8) -> bool {
    matches!(byte, b':' | b'<' | b'>')
}

impl<'a> Iterator for VariantIdTokens<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let bytes = self.input.as_bytes();

        while self.pos < bytes.len() {
            let start = self.pos;

            match bytes[start] {
                b'<' => {
                    // Needs at least one character before the closing '>'
                    match bytes[start + 1..].iter().position(|&b| b == b'>') {
                        Some(offset) if offset > 0 => {
                            let end = start + offset + 2;
                            self.pos = end;
                            return Some(&self.input[start..end]);
                        }
                        _ => self.pos += 1,
                    }
                }
                b':' | b'>' => self.pos += 1,
                _ => {
                    let len = bytes[start..]
                        .iter()
                        .position(|&b| is_delimiter(b))
                        .unwrap_or(bytes.len() - start);
                    self.pos = start + len;
                    return Some(&self.input[start..self.pos]);
                }
            }
        }

        None
    }
}

impl VariantIdentifier {
    /// Parse a variant ID into exactly four tokens
    ///
    /// # Returns
    /// * `Ok(VariantIdentifier)` - ID split into rs/position/ref/alt
    /// * `Err(VariantIdError::TokenCount)` - any other number of tokens
    pub fn parse(value: &str) -> Result<Self, VariantIdError> {
        let mut tokens = tokenize(value);
        let parts: Vec<&str> = tokens.by_ref().take(VARIANT_ID_TOKENS).collect();
        let extra = tokens.count();

        match parts.as_slice() {
            [rs, position, ref_token, alt_token] if extra == 0 => Ok(Self {
                rs_or_unparsed: rs.to_string(),
                position: position.to_string(),
                ref_token: ref_token.to_string(),
                alt_token: alt_token.to_string(),
            }),
            _ => Err(VariantIdError::TokenCount {
                value: value.to_string(),
                count: parts.len() + extra,
            }),
        }
    }

    /// Write the tokens into the record's helper columns
    pub fn annotate(&self, record: &mut Record) {
        record.set(RS_COLUMN, Some(self.rs_or_unparsed.clone()));
        record.set(POSITION_COLUMN, Some(self.position.clone()));
        record.set(KG_REF_COLUMN, Some(self.ref_token.clone()));
        record.set(KG_ALT_COLUMN, Some(self.alt_token.clone()));
    }
}

/// Stage 1: parse a record's variant ID column and expand it into helper columns
pub fn split_expand(record: &mut Record, column: &str) -> Result<VariantIdentifier, ConversionError> {
    let value = record.get(column).unwrap_or_default();

    let identifier = VariantIdentifier::parse(value).map_err(|e| match e {
        VariantIdError::TokenCount { value, count } => ConversionError::MalformedVariantId {
            line: record.line,
            column: column.to_string(),
            value,
            token_count: count,
        },
    })?;

    identifier.annotate(record);
    Ok(identifier)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(value: &str) -> Vec<&str> {
        tokenize(value).collect()
    }

    #[test]
    fn test_parse_rsid() {
        let id = VariantIdentifier::parse("rs544698705:672940:G:C").unwrap();

        assert_eq!(id.rs_or_unparsed, "rs544698705");
        assert_eq!(id.position, "672940");
        assert_eq!(id.ref_token, "G");
        assert_eq!(id.alt_token, "C");
    }

    #[test]
    fn test_parse_indel() {
        assert_eq!(tokens("1:768116:A:AGTTTT"), vec!["1", "768116", "A", "AGTTTT"]);
    }

    #[test]
    fn test_parse_copy_number() {
        assert_eq!(tokens("1:766600:<CN0>:G"), vec!["1", "766600", "<CN0>", "G"]);
    }

    #[test]
    fn test_bracketed_span_keeps_colons() {
        let id = VariantIdentifier::parse("1:3011887:<INS:ME:ALU>:A").unwrap();

        assert_eq!(id.rs_or_unparsed, "1");
        assert_eq!(id.position, "3011887");
        assert_eq!(id.ref_token, "<INS:ME:ALU>");
        assert_eq!(id.alt_token, "A");
    }

    #[test]
    fn test_plain_four_part_ids() {
        for (a, b, c, d) in [
            ("X", "100", "T", "TA"),
            ("rs1", "5", "ACGT", "A"),
            ("22", "51244237", "C", "*"),
        ] {
            let value = format!("{a}:{b}:{c}:{d}");
            assert_eq!(tokens(&value), vec![a, b, c, d], "failed for {value}");
        }
    }

    #[test]
    fn test_bracket_adjacent_to_text() {
        // '<' starts a new token even without a preceding colon
        assert_eq!(tokens("1:100:A<DEL>:G"), vec!["1", "100", "A", "<DEL>", "G"]);
    }

    #[test]
    fn test_unclosed_bracket_is_skipped() {
        assert_eq!(tokens("1:100:<DEL:G"), vec!["1", "100", "DEL", "G"]);
        assert_eq!(tokens("1:100:<>:G"), vec!["1", "100", "G"]);
    }

    #[test]
    fn test_repeated_colons_collapse() {
        assert_eq!(tokens("1::100:A:G"), vec!["1", "100", "A", "G"]);
    }

    #[test]
    fn test_too_few_tokens() {
        let err = VariantIdentifier::parse("1:766600:G").unwrap_err();
        assert_eq!(
            err,
            VariantIdError::TokenCount {
                value: "1:766600:G".to_string(),
                count: 3,
            }
        );
    }

    #[test]
    fn test_too_many_tokens() {
        match VariantIdentifier::parse("1:766600:G:C:T:A").unwrap_err() {
            VariantIdError::TokenCount { count, .. } => assert_eq!(count, 6),
        }
    }

    #[test]
    fn test_empty_id() {
        match VariantIdentifier::parse("").unwrap_err() {
            VariantIdError::TokenCount { count, .. } => assert_eq!(count, 0),
        }
    }

    #[test]
    fn test_split_expand_writes_helper_columns() {
        let header = vec!["CHROM".to_string(), "ID".to_string()];
        let mut record = Record::from_row(
            3,
            &header,
            vec![Some("1".to_string()), Some("1:766600:<CN0>:G".to_string())],
        );

        let id = split_expand(&mut record, "ID").unwrap();

        assert_eq!(id.ref_token, "<CN0>");
        assert_eq!(record.get(RS_COLUMN), Some("1"));
        assert_eq!(record.get(POSITION_COLUMN), Some("766600"));
        assert_eq!(record.get(KG_REF_COLUMN), Some("<CN0>"));
        assert_eq!(record.get(KG_ALT_COLUMN), Some("G"));
    }

    #[test]
    fn test_split_expand_reports_line_and_value() {
        let header = vec!["ID".to_string()];
        let mut record = Record::from_row(9, &header, vec![Some("rs123".to_string())]);

        match split_expand(&mut record, "ID").unwrap_err() {
            ConversionError::MalformedVariantId {
                line,
                column,
                value,
                token_count,
            } => {
                assert_eq!(line, 9);
                assert_eq!(column, "ID");
                assert_eq!(value, "rs123");
                assert_eq!(token_count, 1);
            }
            other => panic!("Expected MalformedVariantId, got {other:?}"),
        }

        // Record is left without helper columns
        assert!(!record.contains(RS_COLUMN));
    }

    #[test]
    fn test_split_expand_empty_cell() {
        let header = vec!["ID".to_string()];
        let mut record = Record::from_row(4, &header, vec![None]);

        let err = split_expand(&mut record, "ID").unwrap_err();
        assert!(err.is_record_level());
    }
}
