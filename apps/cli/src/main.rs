// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! INP-Lite CLI
//!
//! Reads eQUEST INP files and prints the extracted building parameters,
//! code-minimum HVAC efficiencies, or a project baseline as JSON.
//!
//! # Commands
//!
//! - `inp-lite parse <file>...` - Extract parameters from one or more files
//! - `inp-lite blocks <file>` - List the blocks of a file
//! - `inp-lite cooling <area> <category> <sqft-per-ton>` - Cooling efficiency
//! - `inp-lite heating <area> <category> <btu-per-sqft>` - Heating efficiency
//! - `inp-lite baseline <request.json>` - Baseline analysis

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use inp_lite_core::InpDocument;
use inp_lite_efficiency::{analyze_baseline, cooling_efficiency, heating_efficiency, BaselineRequest};
use inp_lite_processing::process_batch;
use serde::Serialize;

mod config;

use config::Config;

#[derive(Parser)]
#[command(name = "inp-lite")]
#[command(author, version, about = "eQUEST INP extraction and HVAC efficiency analysis")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract building parameters from INP files
    Parse {
        /// INP files to process
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// List block names and record counts of an INP file
    Blocks {
        file: PathBuf,
    },

    /// Code-minimum cooling efficiency
    Cooling {
        /// Conditioned floor area (SqFt)
        area: f64,
        /// Equipment category (1-8)
        category: u8,
        /// Floor area served per ton
        sqft_per_ton: f64,
    },

    /// Code-minimum heating efficiency
    Heating {
        /// Conditioned floor area (SqFt)
        area: f64,
        /// Equipment category (1-8)
        category: u8,
        /// Heating load (BTUh per SqFt)
        btu_per_sqft: f64,
    },

    /// Baseline building summary for a project request
    Baseline {
        /// JSON baseline request
        request: PathBuf,
        /// JSON reference tables (overrides INP_LITE_REFERENCE_DATA)
        #[arg(long)]
        reference: Option<PathBuf>,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FileReport {
    file: String,
    #[serde(flatten)]
    outcome: FileOutcome,
}

#[derive(Serialize)]
#[serde(untagged)]
enum FileOutcome {
    Report(inp_lite_processing::ExtractionReport),
    Error { error: String },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BlockSummary<'a> {
    name: &'a str,
    line: usize,
    records: usize,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,inp_lite_processing=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env();

    tracing::debug!(
        worker_threads = config.worker_threads,
        pretty = config.pretty,
        "Starting INP-Lite CLI"
    );

    match cli.command {
        Commands::Parse { files } => parse_files(&config, &files),
        Commands::Blocks { file } => list_blocks(&config, &file),
        Commands::Cooling {
            area,
            category,
            sqft_per_ton,
        } => {
            let table = config.load_cooling_table()?;
            print_json(&config, &cooling_efficiency(area, category, sqft_per_ton, &table))
        }
        Commands::Heating {
            area,
            category,
            btu_per_sqft,
        } => print_json(&config, &heating_efficiency(area, category, btu_per_sqft)),
        Commands::Baseline { request, reference } => {
            baseline(&config, &request, reference.as_ref())
        }
    }
}

fn read_lines(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    Ok(content.split('\n').map(str::to_string).collect())
}

fn parse_files(config: &Config, files: &[PathBuf]) -> Result<()> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(config.worker_threads)
        .build_global()
        .context("initializing rayon thread pool")?;

    let inputs = files
        .iter()
        .map(|path| read_lines(path))
        .collect::<Result<Vec<_>>>()?;

    let start = std::time::Instant::now();
    let results = process_batch(&inputs);
    tracing::info!(
        files = files.len(),
        elapsed_ms = start.elapsed().as_millis(),
        "Extraction complete"
    );

    let reports: Vec<FileReport> = files
        .iter()
        .zip(results)
        .map(|(path, result)| {
            let file = path.display().to_string();
            let outcome = match result {
                Ok(report) => {
                    for warning in &report.warnings {
                        tracing::debug!(file = %file, extractor = %warning.extractor, "{}", warning.message);
                    }
                    FileOutcome::Report(report)
                }
                Err(e) => {
                    tracing::error!(file = %file, error = %e, "Failed to decode");
                    FileOutcome::Error {
                        error: e.to_string(),
                    }
                }
            };
            FileReport { file, outcome }
        })
        .collect();

    if reports.len() == 1 {
        print_json(config, &reports[0])
    } else {
        print_json(config, &reports)
    }
}

fn list_blocks(config: &Config, file: &Path) -> Result<()> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("reading {}", file.display()))?;
    let doc = InpDocument::parse(&content)
        .with_context(|| format!("decoding {}", file.display()))?;

    let blocks: Vec<BlockSummary> = doc
        .blocks()
        .iter()
        .map(|block| BlockSummary {
            name: &block.name,
            line: block.line,
            records: block.records.len(),
        })
        .collect();
    print_json(config, &blocks)
}

fn baseline(config: &Config, request: &Path, reference: Option<&PathBuf>) -> Result<()> {
    let json = std::fs::read_to_string(request)
        .with_context(|| format!("reading {}", request.display()))?;
    let request: BaselineRequest =
        serde_json::from_str(&json).context("parsing baseline request")?;

    let data = config.load_reference_data(reference)?;
    let table = config.load_cooling_table()?;
    let summary = analyze_baseline(&request, &data, &table)?;
    print_json(config, &summary)
}

fn print_json<T: Serialize + ?Sized>(config: &Config, value: &T) -> Result<()> {
    let json = if config.pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{json}");
    Ok(())
}
