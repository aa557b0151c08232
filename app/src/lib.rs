// ==============================================================================
// lib.rs - Summary Statistics Converter Library
// ==============================================================================
// Description: Library interface for GWAS-SSF summary statistics conversion
// Author: Matt Barham
// Created: 2026-10-17
// Modified: 2026-10-17
// Version: 1.0.0
// ==============================================================================

pub mod classifier;
pub mod error;
pub mod filter;
pub mod models;
pub mod normalizer;
pub mod output;
pub mod parsers;
pub mod processor;
pub mod report;
pub mod schema;
pub mod validator;

pub use error::{ConversionError, Result};
pub use models::{ConversionConfig, Record, Table};
pub use processor::SumstatsProcessor;
pub use report::ConversionReport;
