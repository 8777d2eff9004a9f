// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Read-only reference tables for baseline analysis
//!
//! Zip codes, utility rates, economizer shutoff temperatures, HVAC system
//! selection, lighting power densities, envelope requirements and
//! occupancy assumptions. The data is supplied by the caller; this module
//! only defines the lookup surface and a JSON-backed implementation.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZipCodeRow {
    pub zip: u32,
    pub city: String,
    pub state: String,
    #[serde(default)]
    pub county: String,
    /// ASHRAE climate zone, e.g. `4A`
    pub climate_zone: String,
}

/// Average utility rates for one state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateRow {
    pub state: String,
    pub commercial_electric: f64,
    pub commercial_gas: f64,
    pub residential_electric: f64,
    pub residential_gas: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShutoffRow {
    pub zone: String,
    /// High-limit shutoff in °F
    pub temp: f64,
}

/// Baseline system numbers for one size tier, by heating fuel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemSelectionRow {
    pub tier: u8,
    pub fossil_fuel: u8,
    pub electric: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemRow {
    pub number: u8,
    /// e.g. `PTAC`, `Packaged VAV w/ Reheat`
    pub system_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LpdRow {
    pub building_type: String,
    pub lpd: f64,
}

/// Envelope requirements for one climate-zone digit
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvelopeRow {
    pub zone: u8,
    #[serde(default)]
    pub residential: bool,
    pub roof: String,
    pub wall: String,
    pub floor: String,
    pub window: String,
    pub skylight: String,
    pub shgc: String,
    pub sc: String,
    pub door: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OccupancyAssumption {
    pub name: String,
    pub people_per_1000_sf: f64,
    pub area_per_person: f64,
    pub sensible_heat_per_person: f64,
    pub latent_heat_per_person: f64,
    pub receptacle_load_w_per_sf: f64,
    #[serde(default)]
    pub equest_building_type: Vec<String>,
    #[serde(default)]
    pub equest_space_type: Vec<String>,
}

/// Name of the catch-all occupancy assumption
pub const ALL_OTHERS: &str = "ALL OTHERS";

/// Keyed read-only stores consulted by the baseline analyzer
pub trait ReferenceData {
    fn zip_code(&self, zip: u32) -> Option<&ZipCodeRow>;
    fn rates(&self, state: &str) -> Option<&RateRow>;
    fn shutoff(&self, zone: &str) -> Option<&ShutoffRow>;
    fn system_selection(&self, tier: u8) -> Option<&SystemSelectionRow>;
    fn system(&self, number: u8) -> Option<&SystemRow>;
    fn lighting(&self, building_type: &str) -> Option<&LpdRow>;
    fn envelope(&self, zone: u8, residential: bool) -> Option<&EnvelopeRow>;
    fn occupancy_assumptions(&self) -> &[OccupancyAssumption];

    /// Occupancy assumption for a building type.
    ///
    /// Matches by partial eQUEST building type first, then by partial space
    /// type, then falls back to `ALL OTHERS`.
    fn occupancy(&self, building_type: &str) -> Option<&OccupancyAssumption> {
        let rows = self.occupancy_assumptions();
        rows.iter()
            .find(|o| o.equest_building_type.iter().any(|t| t.contains(building_type)))
            .or_else(|| {
                rows.iter()
                    .find(|o| o.equest_space_type.iter().any(|t| t.contains(building_type)))
            })
            .or_else(|| rows.iter().find(|o| o.name == ALL_OTHERS))
    }
}

/// JSON-backed reference tables
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReferenceTables {
    pub zip_codes: Vec<ZipCodeRow>,
    pub rates: Vec<RateRow>,
    pub shutoffs: Vec<ShutoffRow>,
    pub system_selection: Vec<SystemSelectionRow>,
    pub systems: Vec<SystemRow>,
    pub lighting: Vec<LpdRow>,
    pub envelopes: Vec<EnvelopeRow>,
    pub occupancy: Vec<OccupancyAssumption>,
}

impl ReferenceTables {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            Error::InvalidTable(format!("cannot read '{}': {}", path.display(), e))
        })?;
        Self::from_json_str(&json)
    }
}

impl ReferenceData for ReferenceTables {
    fn zip_code(&self, zip: u32) -> Option<&ZipCodeRow> {
        self.zip_codes.iter().find(|r| r.zip == zip)
    }

    fn rates(&self, state: &str) -> Option<&RateRow> {
        self.rates.iter().find(|r| r.state == state)
    }

    fn shutoff(&self, zone: &str) -> Option<&ShutoffRow> {
        self.shutoffs.iter().find(|r| r.zone == zone)
    }

    fn system_selection(&self, tier: u8) -> Option<&SystemSelectionRow> {
        self.system_selection.iter().find(|r| r.tier == tier)
    }

    fn system(&self, number: u8) -> Option<&SystemRow> {
        self.systems.iter().find(|r| r.number == number)
    }

    fn lighting(&self, building_type: &str) -> Option<&LpdRow> {
        self.lighting.iter().find(|r| r.building_type == building_type)
    }

    fn envelope(&self, zone: u8, residential: bool) -> Option<&EnvelopeRow> {
        self.envelopes
            .iter()
            .find(|r| r.zone == zone && r.residential == residential)
    }

    fn occupancy_assumptions(&self) -> &[OccupancyAssumption] {
        &self.occupancy
    }
}
