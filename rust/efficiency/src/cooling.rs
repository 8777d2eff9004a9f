// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Cooling efficiency and chiller plant sizing
//!
//! | category | equipment | rating |
//! |---|---|---|
//! | 1, 2 | packaged terminal DX | closed-form EIR curve |
//! | 3–6 | DX air conditioners | table tier on BTUh |
//! | 7, 8 | chilled water plant | table tier on tons per chiller |

use serde::Serialize;

use crate::result::{round_to, EfficiencyResult, MetricKind};
use crate::table::{ChillerTables, CoolingEfficiencyTable, TierTable};

pub const BTUH_PER_TON: f64 = 12_000.0;

/// Largest single centrifugal chiller
pub const MAX_CHILLER_TONS: u64 = 800;

/// Fewest chillers in a centrifugal plant
pub const MIN_CENTRIFUGAL_CHILLERS: u64 = 2;

/// Plant size at which two chillers are used
const PAIR_THRESHOLD_TONS: u64 = 300;

/// Plant size at which centrifugal chillers are used
const CENTRIFUGAL_THRESHOLD_TONS: u64 = 600;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PlantArrangement {
    Single,
    Pair,
    Centrifugal,
}

/// Chilled water plant layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChillerPlant {
    pub arrangement: PlantArrangement,
    pub chillers: u64,
    pub tons_per_chiller: u64,
}

impl ChillerPlant {
    fn tiers<'a>(&self, tables: &'a ChillerTables) -> &'a TierTable {
        match self.arrangement {
            PlantArrangement::Single => &tables.single,
            PlantArrangement::Pair => &tables.pair,
            PlantArrangement::Centrifugal => &tables.centrifugal,
        }
    }

    fn description(&self) -> &'static str {
        match self.arrangement {
            PlantArrangement::Single | PlantArrangement::Pair => "Water cooled screw/scroll",
            PlantArrangement::Centrifugal => "Centrifugal",
        }
    }
}

/// Split a plant load across chillers.
///
/// Under 300 tons a single chiller carries the load; up to 600 tons two
/// chillers share it; above that centrifugal chillers are used, at least two
/// and none larger than 800 tons.
pub fn size_chiller_plant(total_tons: u64) -> ChillerPlant {
    if total_tons < PAIR_THRESHOLD_TONS {
        ChillerPlant {
            arrangement: PlantArrangement::Single,
            chillers: 1,
            tons_per_chiller: total_tons,
        }
    } else if total_tons < CENTRIFUGAL_THRESHOLD_TONS {
        ChillerPlant {
            arrangement: PlantArrangement::Pair,
            chillers: 2,
            tons_per_chiller: total_tons.div_ceil(2),
        }
    } else {
        let mut chillers = MIN_CENTRIFUGAL_CHILLERS;
        let mut per_chiller = total_tons.div_ceil(chillers);
        if per_chiller > MAX_CHILLER_TONS {
            chillers = total_tons.div_ceil(MAX_CHILLER_TONS);
            per_chiller = total_tons.div_ceil(chillers);
        }
        ChillerPlant {
            arrangement: PlantArrangement::Centrifugal,
            chillers,
            tons_per_chiller: per_chiller,
        }
    }
}

/// Design tons for a floor area, rounded up
pub fn cooling_tons(area: f64, sqft_per_ton: f64) -> u64 {
    (area / sqft_per_ton).ceil().max(0.0) as u64
}

/// Packaged terminal air conditioner EIR, two decimals
pub fn packaged_terminal_eir(btuh: f64) -> f64 {
    round_to(3.2769 / (12.5 - 0.213 * btuh / 1000.0) - 0.03987, 2)
}

/// Tabulated DX EIR for categories 3 to 6
pub fn dx_eir(table: &CoolingEfficiencyTable, category: u8, btuh: f64) -> Option<f64> {
    table.dx(category).and_then(|tiers| tiers.lookup(btuh))
}

/// Code-minimum cooling efficiency.
///
/// Unknown categories, categories missing from `table` and non-positive
/// rates yield [`EfficiencyResult::unsupported`].
pub fn cooling_efficiency(
    area: f64,
    category: u8,
    sqft_per_ton: f64,
    table: &CoolingEfficiencyTable,
) -> EfficiencyResult {
    if sqft_per_ton.is_nan() || sqft_per_ton <= 0.0 || !area.is_finite() {
        tracing::warn!(area, sqft_per_ton, "Cooling rate must be positive");
        return EfficiencyResult::unsupported();
    }

    let tons = cooling_tons(area, sqft_per_ton);
    let btuh = tons as f64 * BTUH_PER_TON;
    let kbtuh = format!("{} kBTUh", (btuh / 1000.0).floor());

    match category {
        1 | 2 => EfficiencyResult::new(
            "DX",
            "New construction",
            kbtuh,
            Some(packaged_terminal_eir(btuh)),
            Some(MetricKind::Eir),
        ),
        3..=6 => match dx_eir(table, category, btuh) {
            Some(eir) => EfficiencyResult::new(
                "DX",
                "Air Conditioners",
                kbtuh,
                Some(eir),
                Some(MetricKind::Eir),
            ),
            None => {
                tracing::warn!(category, "No DX tiers for cooling category");
                EfficiencyResult::unsupported()
            }
        },
        7 | 8 => {
            let Some(tables) = table.chiller(category) else {
                tracing::warn!(category, "No chiller tiers for cooling category");
                return EfficiencyResult::unsupported();
            };
            let plant = size_chiller_plant(tons);
            let eir = plant.tiers(tables).lookup(plant.tons_per_chiller as f64);
            tracing::debug!(
                tons,
                chillers = plant.chillers,
                per_chiller = plant.tons_per_chiller,
                "Sized chiller plant"
            );

            let mut result = EfficiencyResult::new(
                "Chiller",
                plant.description(),
                format!("{} Tons", plant.tons_per_chiller),
                eir,
                eir.map(|_| MetricKind::Eir),
            );
            result.chiller_count = plant.chillers as u32;
            result
        }
        _ => {
            tracing::warn!(category, "Unsupported cooling category");
            EfficiencyResult::unsupported()
        }
    }
}
