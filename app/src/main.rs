// ==============================================================================
// main.rs - Summary Statistics Converter Entry Point
// ==============================================================================
// Description: Command line wrapper converting cohort sumstats to GWAS-SSF v1.0
// Author: Matt Barham
// Created: 2026-10-17
// Modified: 2026-10-17
// Version: 1.0.0
// ==============================================================================
// Expected variant ID patterns:
//   rs544698705:672940:G:C
//   1:768116:A:AGTTTT
//   1:766600:<CN0>:G
//   1:3011887:<INS:ME:ALU>:A
// Validate the output with the GWAS SumStats tools:
//   https://github.com/EBISPOT/gwas-sumstats-tools
// ==============================================================================

use anyhow::{Context, Result};
use clap::Parser;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sumstats_converter::{ConversionConfig, SumstatsProcessor};

/// Transform GENOA GWAS sumstats to GWAS-SSF v1.0 format
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input sumstats file path (plain or gzip)
    infile: PathBuf,

    /// Output GWAS-SSF formatted file path (".gz" suffix compresses)
    outfile: PathBuf,

    /// Name of the chromosome column
    #[arg(long, env = "SUMSTATS_CHROM_COLUMN", default_value = "CHROM")]
    chrom: String,

    /// Name of the variant ID column (e.g. rs544698705:672940:G:C)
    #[arg(long, env = "SUMSTATS_VARIANT_COLUMN", default_value = "ID")]
    variant: String,

    /// Keep structural variants with bracketed alleles (e.g. <CN0>)
    #[arg(long)]
    keep_indels: bool,

    /// Field delimiter: a single character, or "tab"
    #[arg(long, default_value = "tab", value_parser = parse_delimiter)]
    sep: u8,

    /// Write a JSON run report to this path
    #[arg(long)]
    report: Option<PathBuf>,
}

fn parse_delimiter(value: &str) -> std::result::Result<u8, String> {
    match value {
        "tab" | "\\t" | "\t" => Ok(b'\t'),
        _ if value.len() == 1 && value.is_ascii() => Ok(value.as_bytes()[0]),
        _ => Err(format!("delimiter must be a single ASCII character, got '{value}'")),
    }
}

fn highlight(path: &Path) -> String {
    const RESET: &str = "\x1b[0m";
    const RED: &str = "\x1b[31m";
    const UNDERLINE: &str = "\x1b[4m";

    if std::io::stdout().is_terminal() {
        format!("{UNDERLINE}{RED}{}{RESET}", path.display())
    } else {
        path.display().to_string()
    }
}

fn confirmation(infile: &Path, outfile: &Path) -> String {
    format!(
        "\nSuccessfully processed {} and wrote to {}",
        highlight(infile),
        highlight(outfile)
    )
}

/// Convert one file and return the line to print on success
fn run(args: &Args) -> Result<String> {
    let config = ConversionConfig::new()
        .with_chrom_column(args.chrom.clone())
        .with_variant_column(args.variant.clone())
        .with_keep_indels(args.keep_indels)
        .with_delimiter(args.sep);
    info!("Configuration: {:?}", config);

    let processor = SumstatsProcessor::new(config);

    match processor.process_file(&args.infile, &args.outfile) {
        Ok(report) => {
            if let Some(report_path) = &args.report {
                report
                    .write_json(report_path)
                    .with_context(|| format!("Failed to write run report {}", report_path.display()))?;
                info!("Run report written to {:?}", report_path);
            }

            Ok(confirmation(&args.infile, &args.outfile))
        }
        Err(e) => {
            warn!("Conversion failed: {}", e);
            Err(e).with_context(|| format!("Failed to convert {}", args.infile.display()))
        }
    }
}

fn main() -> Result<()> {
    // Initialize tracing (stderr; stdout carries the confirmation only)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sumstats_converter=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    println!("{}", run(&args)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn args_for(infile: &Path, outfile: &Path) -> Args {
        Args::try_parse_from([
            std::ffi::OsStr::new("sumstats-converter"),
            infile.as_os_str(),
            outfile.as_os_str(),
        ])
        .unwrap()
    }

    #[test]
    fn test_run_confirms_both_paths() {
        let mut input = NamedTempFile::new().unwrap();
        writeln!(
            input,
            "CHROM\tPOS\tID\tREF\tALT\tAF\tALT_EFFSIZE\tSE\tPVALUE\tN_INFORMATIVE"
        )
        .unwrap();
        writeln!(input, "1\t672940\trs544698705:672940:G:C\tC\tG\t0.01\t0.12\t0.05\t0.03\t1200").unwrap();
        input.flush().unwrap();

        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.tsv");

        let line = run(&args_for(input.path(), &output)).unwrap();

        assert!(line.starts_with("\nSuccessfully processed "));
        assert!(line.contains(&input.path().display().to_string()));
        assert!(line.contains(" and wrote to "));
        assert!(line.contains(&output.display().to_string()));
        assert!(output.exists());
    }

    #[test]
    fn test_run_error_names_missing_column() {
        let mut input = NamedTempFile::new().unwrap();
        writeln!(input, "CHROM\tID\tREF\tALT").unwrap();
        writeln!(input, "1\trs1:100:A:G\tA\tG").unwrap();
        input.flush().unwrap();

        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.tsv");

        let error = run(&args_for(input.path(), &output)).unwrap_err();
        let message = format!("{:#}", error);

        assert!(message.contains("Failed to convert"));
        assert!(message.contains(&input.path().display().to_string()));
        assert!(message.contains("base_pair_location"));
        assert!(!output.exists());
    }

    #[test]
    fn test_parse_delimiter() {
        assert_eq!(parse_delimiter("tab").unwrap(), b'\t');
        assert_eq!(parse_delimiter("\\t").unwrap(), b'\t');
        assert_eq!(parse_delimiter(",").unwrap(), b',');
        assert!(parse_delimiter(";;").is_err());
        assert!(parse_delimiter("é").is_err());
    }

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["sumstats-converter", "in.tsv", "out.tsv"]).unwrap();

        assert_eq!(args.infile, PathBuf::from("in.tsv"));
        assert_eq!(args.outfile, PathBuf::from("out.tsv"));
        assert!(!args.keep_indels);
        assert_eq!(args.sep, b'\t');
        assert!(args.report.is_none());
    }

    #[test]
    fn test_args_overrides() {
        let args = Args::try_parse_from([
            "sumstats-converter",
            "in.tsv",
            "out.tsv.gz",
            "--chrom",
            "#CHROM",
            "--variant",
            "SNP",
            "--keep-indels",
            "--sep",
            ",",
            "--report",
            "run.json",
        ])
        .unwrap();

        assert_eq!(args.chrom, "#CHROM");
        assert_eq!(args.variant, "SNP");
        assert!(args.keep_indels);
        assert_eq!(args.sep, b',');
        assert_eq!(args.report, Some(PathBuf::from("run.json")));
    }
}
