// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Injected cooling efficiency tables
//!
//! Tiered EIR values keyed by equipment category id. Each tier applies from
//! its lower bound (inclusive) up to the next tier's bound (exclusive):
//!
//! ```json
//! { "dx": { "3": [ { "from": 0, "value": 0.3198 }, { "from": 65000, "value": 0.3102 } ] } }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{Error, Result};

const ASHRAE_90_1_2007: &str = include_str!("../data/ashrae_90_1_2007_cooling.json");

/// One capacity tier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tier {
    /// Inclusive lower bound (BTUh for DX, tons for chillers)
    pub from: f64,
    pub value: f64,
}

/// Ordered tiers with strictly increasing lower bounds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TierTable(Vec<Tier>);

impl TierTable {
    pub fn new(tiers: Vec<Tier>) -> Self {
        Self(tiers)
    }

    /// Value of the last tier whose bound is <= `x`
    pub fn lookup(&self, x: f64) -> Option<f64> {
        self.0
            .iter()
            .take_while(|tier| tier.from <= x)
            .last()
            .map(|tier| tier.value)
    }

    pub fn tiers(&self) -> &[Tier] {
        &self.0
    }

    fn validate(&self, name: &str) -> Result<()> {
        if self.0.is_empty() {
            return Err(Error::InvalidTable(format!("{name}: no tiers")));
        }
        for pair in self.0.windows(2) {
            if pair[1].from <= pair[0].from {
                return Err(Error::InvalidTable(format!(
                    "{name}: tier bound {} does not increase past {}",
                    pair[1].from, pair[0].from
                )));
            }
        }
        if self.0.iter().any(|t| !t.from.is_finite() || !t.value.is_finite()) {
            return Err(Error::InvalidTable(format!("{name}: non-finite value")));
        }
        Ok(())
    }
}

/// Chiller tiers (keyed on per-chiller tons) for each plant arrangement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChillerTables {
    /// Plants under 300 tons: one screw/scroll chiller
    pub single: TierTable,
    /// 300 to 600 tons: two screw/scroll chillers
    pub pair: TierTable,
    /// 600 tons and above: centrifugal chillers
    pub centrifugal: TierTable,
}

/// Cooling efficiency tables for one energy standard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoolingEfficiencyTable {
    #[serde(default)]
    pub standard: String,
    /// DX categories, tiers on BTUh
    pub dx: BTreeMap<u8, TierTable>,
    /// Chiller categories, tiers on tons
    pub chillers: BTreeMap<u8, ChillerTables>,
}

impl CoolingEfficiencyTable {
    /// Parse and validate a JSON table
    pub fn from_json_str(json: &str) -> Result<Self> {
        let table: Self = serde_json::from_str(json)?;
        table.validate()?;
        Ok(table)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            Error::InvalidTable(format!("cannot read '{}': {}", path.display(), e))
        })?;
        Self::from_json_str(&json)
    }

    /// Bundled ASHRAE 90.1-2007 table
    pub fn ashrae_90_1_2007() -> Result<Self> {
        Self::from_json_str(ASHRAE_90_1_2007)
    }

    pub fn validate(&self) -> Result<()> {
        for (category, tiers) in &self.dx {
            tiers.validate(&format!("dx category {category}"))?;
        }
        for (category, plant) in &self.chillers {
            plant.single.validate(&format!("chiller category {category} single"))?;
            plant.pair.validate(&format!("chiller category {category} pair"))?;
            plant
                .centrifugal
                .validate(&format!("chiller category {category} centrifugal"))?;
        }
        Ok(())
    }

    #[inline]
    pub fn dx(&self, category: u8) -> Option<&TierTable> {
        self.dx.get(&category)
    }

    #[inline]
    pub fn chiller(&self, category: u8) -> Option<&ChillerTables> {
        self.chillers.get(&category)
    }
}
