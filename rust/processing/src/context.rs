// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-run extraction state

use rustc_hash::FxHashMap;

use crate::error::Error;
use crate::result::{ResultAggregate, UniqueList};

/// Scratch state owned by one pipeline run
#[derive(Debug, Default)]
pub struct ExtractionContext {
    pub aggregate: ResultAggregate,
    /// Floor multipliers by unquoted polygon name
    pub multipliers: FxHashMap<String, f64>,
    /// Schedule names seen so far
    pub schedules: UniqueList<String>,
    /// Set once an occupancy record has been read
    pub occupancy_found: bool,
    /// Record-level problems the current extractor skipped past
    issues: Vec<Error>,
}

impl ExtractionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Multiplier for a floor polygon; 1 when none was declared
    pub fn multiplier(&self, polygon: &str) -> f64 {
        self.multipliers.get(polygon).copied().unwrap_or(1.0)
    }

    /// Note a bad record without stopping the extractor
    pub fn skip_record(&mut self, error: Error) {
        self.issues.push(error);
    }

    /// Drain the issues noted since the last call
    pub fn take_issues(&mut self) -> Vec<Error> {
        std::mem::take(&mut self.issues)
    }

    pub fn into_aggregate(self) -> ResultAggregate {
        self.aggregate
    }
}
