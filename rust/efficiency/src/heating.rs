// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Heating efficiency rules

use crate::result::{round_to, EfficiencyResult, MetricKind};

/// Gas boiler AFUE (categories 1, 5, 7)
pub const BOILER_AFUE: f64 = 0.8;

/// Furnace capacity at which the higher AFUE applies
pub const FURNACE_THRESHOLD_BTUH: f64 = 225_000.0;

/// Packaged terminal heat pump EIR, two decimals
pub fn packaged_terminal_heat_pump_eir(btuh: f64) -> f64 {
    round_to(1.0 / (3.2 - 0.026 * btuh / 1000.0), 2)
}

/// Gas furnace AFUE by capacity
pub fn furnace_afue(btuh: f64) -> f64 {
    if btuh < FURNACE_THRESHOLD_BTUH {
        0.78
    } else {
        0.80
    }
}

/// Air-cooled heat pump (heating mode) EIR by capacity
pub fn air_cooled_heat_pump_eir(btuh: f64) -> f64 {
    if btuh < 65_000.0 {
        0.44
    } else if btuh < 135_000.0 {
        0.31
    } else {
        0.32
    }
}

/// Code-minimum heating efficiency for a floor area at `btu_per_sqft`.
///
/// Categories 6 and 8 are electric resistance and carry no rating; unknown
/// categories yield [`EfficiencyResult::unsupported`].
pub fn heating_efficiency(area: f64, category: u8, btu_per_sqft: f64) -> EfficiencyResult {
    let btuh = area * btu_per_sqft;
    if !btuh.is_finite() {
        tracing::warn!(area, btu_per_sqft, "Heating capacity is not finite");
        return EfficiencyResult::unsupported();
    }
    let capacity = format!("{} kBTUh", (btuh / 1000.0).floor());

    match category {
        1 | 5 | 7 => EfficiencyResult::new(
            "HW Boiler",
            "Gas Fired",
            capacity,
            Some(BOILER_AFUE),
            Some(MetricKind::Afue),
        ),
        2 => EfficiencyResult::new(
            "Elec HP",
            "PTHP",
            capacity,
            Some(packaged_terminal_heat_pump_eir(btuh)),
            Some(MetricKind::Eir),
        ),
        3 => EfficiencyResult::new(
            "Furnace",
            "Gas Fired",
            capacity,
            Some(furnace_afue(btuh)),
            Some(MetricKind::Afue),
        ),
        4 => EfficiencyResult::new(
            "Elec HP",
            "Air cooled (heating mode)",
            capacity,
            Some(air_cooled_heat_pump_eir(btuh)),
            Some(MetricKind::Eir),
        ),
        6 | 8 => EfficiencyResult::new("Elec Res", "", capacity, None, None),
        _ => {
            tracing::warn!(category, "Unsupported heating category");
            EfficiencyResult::unsupported()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_boilers() {
        for category in [1, 5, 7] {
            let result = heating_efficiency(10_000.0, category, 30.0);
            assert_eq!(result.tech_type, "HW Boiler");
            assert_eq!(result.capacity, "300 kBTUh");
            assert_eq!(result.rating(), "0.8 AFUE");
        }
    }

    #[test]
    fn test_furnace_threshold() {
        let below = heating_efficiency(224_999.0, 3, 1.0);
        assert_relative_eq!(below.value.unwrap(), 0.78);
        assert_eq!(below.capacity, "224 kBTUh");

        let at = heating_efficiency(225_000.0, 3, 1.0);
        assert_relative_eq!(at.value.unwrap(), 0.80);
        assert_eq!(at.metric, Some(MetricKind::Afue));
    }

    #[test]
    fn test_heat_pumps() {
        // 1/(3.2 - 0.026*20) = 1/2.68
        let pthp = heating_efficiency(1000.0, 2, 20.0);
        assert_eq!(pthp.description, "PTHP");
        assert_relative_eq!(pthp.value.unwrap(), 0.37);

        assert_relative_eq!(air_cooled_heat_pump_eir(64_999.0), 0.44);
        assert_relative_eq!(air_cooled_heat_pump_eir(65_000.0), 0.31);
        assert_relative_eq!(air_cooled_heat_pump_eir(135_000.0), 0.32);
        let result = heating_efficiency(4000.0, 4, 25.0);
        assert_eq!(result.description, "Air cooled (heating mode)");
        assert_relative_eq!(result.value.unwrap(), 0.31);
    }

    #[test]
    fn test_electric_resistance_has_no_rating() {
        let result = heating_efficiency(1000.0, 6, 20.0);
        assert_eq!(result.tech_type, "Elec Res");
        assert!(result.is_supported());
        assert_eq!(result.value, None);
        assert_eq!(result.metric, None);
    }

    #[test]
    fn test_unknown_category() {
        assert_eq!(heating_efficiency(1000.0, 42, 20.0), EfficiencyResult::unsupported());
    }
}
