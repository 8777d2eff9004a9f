// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CLI configuration loaded from environment variables.

use std::path::PathBuf;

use anyhow::{Context, Result};
use inp_lite_efficiency::{CoolingEfficiencyTable, ReferenceTables};

/// CLI configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// JSON cooling efficiency table; the bundled ASHRAE 90.1-2007 table when unset.
    pub cooling_table: Option<PathBuf>,
    /// JSON reference tables for baseline analysis.
    pub reference_data: Option<PathBuf>,
    /// Number of worker threads for batch extraction.
    pub worker_threads: usize,
    /// Pretty-print JSON output.
    pub pretty: bool,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            cooling_table: std::env::var("INP_LITE_COOLING_TABLE")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from),
            reference_data: std::env::var("INP_LITE_REFERENCE_DATA")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from),
            worker_threads: std::env::var("INP_LITE_WORKER_THREADS")
                .unwrap_or_else(|_| num_cpus::get().to_string())
                .parse()
                .ok()
                .filter(|&n| n > 0)
                .unwrap_or_else(num_cpus::get),
            pretty: std::env::var("INP_LITE_PRETTY")
                .map(|v| parse_flag(&v).unwrap_or(true))
                .unwrap_or(true),
        }
    }

    /// Cooling table from `cooling_table`, or the bundled one
    pub fn load_cooling_table(&self) -> Result<CoolingEfficiencyTable> {
        match &self.cooling_table {
            Some(path) => CoolingEfficiencyTable::from_path(path)
                .with_context(|| format!("loading cooling table {}", path.display())),
            None => CoolingEfficiencyTable::ashrae_90_1_2007()
                .context("loading bundled cooling table"),
        }
    }

    /// Reference tables, preferring `override_path` over `reference_data`
    pub fn load_reference_data(&self, override_path: Option<&PathBuf>) -> Result<ReferenceTables> {
        let path = override_path
            .or(self.reference_data.as_ref())
            .context("no reference data: pass --reference or set INP_LITE_REFERENCE_DATA")?;
        ReferenceTables::from_path(path)
            .with_context(|| format!("loading reference data {}", path.display()))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Parse a boolean environment value
fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
