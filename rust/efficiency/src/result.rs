// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Efficiency engine output types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unit of an efficiency rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MetricKind {
    /// Energy Input Ratio
    Eir,
    /// Annual Fuel Utilization Efficiency
    Afue,
    /// Coefficient of Performance
    Cop,
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MetricKind::Eir => "EIR",
            MetricKind::Afue => "AFUE",
            MetricKind::Cop => "COP",
        })
    }
}

/// Code-minimum efficiency for one piece of equipment
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EfficiencyResult {
    /// Technology label, e.g. `DX`, `Chiller`, `HW Boiler`
    pub tech_type: String,
    pub description: String,
    /// Per-unit (or per-chiller) capacity with unit, e.g. `60 kBTUh`, `534 Tons`
    pub capacity: String,
    /// Number of chillers; 0 for non-chiller equipment
    pub chiller_count: u32,
    pub value: Option<f64>,
    pub metric: Option<MetricKind>,
}

impl EfficiencyResult {
    pub(crate) fn new(
        tech_type: &str,
        description: &str,
        capacity: String,
        value: Option<f64>,
        metric: Option<MetricKind>,
    ) -> Self {
        Self {
            tech_type: tech_type.to_string(),
            description: description.to_string(),
            capacity,
            chiller_count: 0,
            value,
            metric,
        }
    }

    /// Empty result for a category id with no rule
    pub fn unsupported() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_supported(&self) -> bool {
        !self.tech_type.is_empty()
    }

    /// Rating with its unit, e.g. `0.31 EIR`; empty when there is no rating
    pub fn rating(&self) -> String {
        match (self.value, self.metric) {
            (Some(v), Some(m)) => format!("{} {}", v, m),
            (Some(v), None) => v.to_string(),
            _ => String::new(),
        }
    }
}

/// Round to `digits` decimals, halves away from zero
#[inline]
pub(crate) fn round_to(value: f64, digits: i32) -> f64 {
    let scale = 10f64.powi(digits);
    (value * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported() {
        let result = EfficiencyResult::unsupported();
        assert!(!result.is_supported());
        assert_eq!(result.chiller_count, 0);
        assert_eq!(result.rating(), "");
    }

    #[test]
    fn test_rating() {
        let result = EfficiencyResult::new(
            "HW Boiler",
            "Gas Fired",
            "100 kBTUh".into(),
            Some(0.8),
            Some(MetricKind::Afue),
        );
        assert_eq!(result.rating(), "0.8 AFUE");
    }

    #[test]
    fn test_serializes_camel_case() {
        let result = EfficiencyResult::new("DX", "Air Conditioners", "60 kBTUh".into(), Some(0.3198), Some(MetricKind::Eir));
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["techType"], "DX");
        assert_eq!(json["chillerCount"], 0);
        assert_eq!(json["metric"], "EIR");
    }
}
