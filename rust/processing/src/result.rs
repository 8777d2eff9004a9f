// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Extraction output types

use inp_lite_efficiency::ScheduleType;
use serde::Serialize;

/// Append-only list that ignores values it already holds
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct UniqueList<T>(Vec<T>);

impl<T: PartialEq> UniqueList<T> {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Append unless already present. Returns true if appended.
    pub fn push(&mut self, value: T) -> bool {
        if self.0.contains(&value) {
            return false;
        }
        self.0.push(value);
        true
    }

    pub fn contains(&self, value: &T) -> bool {
        self.0.contains(value)
    }

    pub fn as_slice(&self) -> &[T] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<T: PartialEq> Default for UniqueList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: PartialEq> Extend<T> for UniqueList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

impl<T: PartialEq> FromIterator<T> for UniqueList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<'a, T> IntoIterator for &'a UniqueList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Building-performance parameters derived from one INP file
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultAggregate {
    pub shading_coefficient: String,
    pub glass_conductance: String,
    pub wall_u_value: String,
    pub roof_u_value: String,
    pub door_u_value: String,
    pub floor_u_value: String,
    /// Lighting power densities in W/SqFt
    pub lpd: UniqueList<f64>,
    pub electric_rate: String,
    pub gas_rate: String,
    pub hvac_types: UniqueList<String>,
    pub cooling_eir: UniqueList<String>,
    pub heating_eir: UniqueList<String>,
    pub chiller_eir: UniqueList<String>,
    pub capacity_ratios: UniqueList<String>,
    /// Inverted heat input ratios, three decimals
    pub heat_input_ratios: UniqueList<String>,
    pub has_economizer: bool,
    /// Conditioned floor area, `<n> SqFt`
    pub area: String,
    /// Schedule names joined with `, `
    pub schedules: String,
    pub latent_heat_per_person: String,
    pub sensible_heat_per_person: String,
    pub receptacle_load_w_per_sf: String,
    pub area_per_person: String,
}

impl Default for ResultAggregate {
    fn default() -> Self {
        Self {
            shading_coefficient: String::new(),
            glass_conductance: String::new(),
            wall_u_value: String::new(),
            roof_u_value: String::new(),
            door_u_value: String::new(),
            floor_u_value: String::new(),
            lpd: UniqueList::new(),
            electric_rate: String::new(),
            gas_rate: String::new(),
            hvac_types: UniqueList::new(),
            cooling_eir: UniqueList::new(),
            heating_eir: UniqueList::new(),
            chiller_eir: UniqueList::new(),
            capacity_ratios: UniqueList::new(),
            heat_input_ratios: UniqueList::new(),
            has_economizer: false,
            area: String::new(),
            schedules: ScheduleType::NonResidential.to_string(),
            latent_heat_per_person: String::new(),
            sensible_heat_per_person: String::new(),
            receptacle_load_w_per_sf: String::new(),
            area_per_person: String::new(),
        }
    }
}

/// Non-fatal problem reported by one extractor
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionWarning {
    pub extractor: String,
    pub message: String,
}

/// Aggregate plus the warnings collected while building it
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionReport {
    pub result: ResultAggregate,
    pub warnings: Vec<ExtractionWarning>,
}
