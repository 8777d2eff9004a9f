// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Project baseline analysis
//!
//! Combines a project's comparison fields with the reference tables and the
//! efficiency engine to describe the code baseline building: location,
//! utility rates, economizer requirement, HVAC system, cooling and heating
//! efficiency, lighting, envelope, schedules and occupancy.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::cooling::cooling_efficiency;
use crate::error::{Error, Result};
use crate::heating::heating_efficiency;
use crate::reference::{EnvelopeRow, OccupancyAssumption, ReferenceData};
use crate::result::EfficiencyResult;
use crate::table::CoolingEfficiencyTable;

/// Building type whose baseline is residential
pub const RESIDENTIAL_BUILDING_TYPE: &str = "MULTI-FAMILY";

/// Climate zones that do not require an air economizer
pub const NO_ECONOMIZER_ZONES: [&str; 5] = ["1A", "1B", "2A", "3A", "4A"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HeatingFuel {
    #[default]
    #[serde(rename = "NONE")]
    None,
    #[serde(rename = "FOSSIL FUEL")]
    FossilFuel,
    #[serde(rename = "ELECTRIC")]
    Electric,
}

/// eQUEST operating schedule set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ScheduleType {
    #[default]
    #[serde(rename = "N2-5 Non Residential")]
    NonResidential,
    #[serde(rename = "N2-6 Hotel Function")]
    HotelFunction,
    #[serde(rename = "N2-7 Residential, with Setback")]
    ResidentialWithSetback,
    #[serde(rename = "N2-8 Residential, without Setback")]
    ResidentialWithoutSetback,
    #[serde(rename = "N2-9 Retail")]
    Retail,
}

impl ScheduleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScheduleType::NonResidential => "N2-5 Non Residential",
            ScheduleType::HotelFunction => "N2-6 Hotel Function",
            ScheduleType::ResidentialWithSetback => "N2-7 Residential, with Setback",
            ScheduleType::ResidentialWithoutSetback => "N2-8 Residential, without Setback",
            ScheduleType::Retail => "N2-9 Retail",
        }
    }

    pub fn for_building_type(building_type: &str) -> Self {
        match building_type {
            "RETAIL" => ScheduleType::Retail,
            "HOTEL" | "MOTEL" => ScheduleType::HotelFunction,
            "DORMITORY" | "MULTI-FAMILY" => ScheduleType::ResidentialWithSetback,
            _ => ScheduleType::NonResidential,
        }
    }
}

impl fmt::Display for ScheduleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Comparison fields for one project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaselineRequest {
    pub zip_code: u32,
    /// Conditioned floor area in SqFt
    pub area: f64,
    pub number_floors: u32,
    pub building_type: String,
    #[serde(default)]
    pub hvac_heating_type: HeatingFuel,
    pub cooling_sq_ft_ton: f64,
    #[serde(rename = "heatingBTUSqFt")]
    pub heating_btu_sq_ft: f64,
}

impl BaselineRequest {
    #[inline]
    pub fn is_residential(&self) -> bool {
        self.building_type == RESIDENTIAL_BUILDING_TYPE
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rates {
    pub electric: String,
    pub gas: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvelopeSummary {
    pub roof: String,
    pub wall: String,
    pub floor: String,
    pub window_u_value: String,
    pub window_shgc: String,
    pub window_sc: String,
    pub skylight: String,
    pub door: String,
    pub residential: bool,
}

impl EnvelopeSummary {
    fn from_row(row: &EnvelopeRow, residential: bool) -> Self {
        Self {
            roof: row.roof.clone(),
            wall: row.wall.clone(),
            floor: row.floor.clone(),
            window_u_value: row.window.clone(),
            window_shgc: row.shgc.clone(),
            window_sc: row.sc.clone(),
            skylight: row.skylight.clone(),
            door: row.door.clone(),
            residential,
        }
    }
}

/// Baseline building description
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BaselineSummary {
    /// `<city>-<state>`
    pub location: String,
    pub area: String,
    pub schedule_type: ScheduleType,
    pub rates: Rates,
    pub economizer: String,
    /// Air-side system description
    pub hvac_system: String,
    pub hvac_system_number: u8,
    pub cooling: EfficiencyResult,
    pub heating: EfficiencyResult,
    /// `<tech>, <description>: <capacity>, <rating>`
    pub cooling_summary: String,
    pub heating_summary: String,
    pub lighting: String,
    pub envelope: EnvelopeSummary,
    pub occupancy: OccupancyAssumption,
}

/// Non-residential size tier from floors and area
pub fn size_tier(floors: u32, area: f64) -> u8 {
    if floors <= 3 && area < 25_000.0 {
        1
    } else if floors <= 5 && area < 25_000.0 {
        2
    } else if floors <= 5 && area <= 150_000.0 {
        3
    } else {
        4
    }
}

/// Economizer requirement text for a climate zone
pub fn economizer_requirement(zone: &str, data: &impl ReferenceData) -> Result<String> {
    if NO_ECONOMIZER_ZONES.contains(&zone) {
        return Ok(format!("{zone}: No economizer is required"));
    }
    let shutoff = data
        .shutoff(zone)
        .ok_or_else(|| Error::missing("economizer shutoff", zone))?;
    Ok(format!(
        "{zone}: requires economizer with high limit shutOff of {}°F",
        shutoff.temp
    ))
}

/// Baseline system number for the request
pub fn select_system(request: &BaselineRequest, data: &impl ReferenceData) -> Result<u8> {
    let fossil = request.hvac_heating_type == HeatingFuel::FossilFuel;
    if request.is_residential() {
        return Ok(if fossil { 1 } else { 2 });
    }
    let tier = size_tier(request.number_floors, request.area);
    let selection = data
        .system_selection(tier)
        .ok_or_else(|| Error::missing("system selection", tier))?;
    Ok(if fossil {
        selection.fossil_fuel
    } else {
        selection.electric
    })
}

fn summarize(result: &EfficiencyResult) -> String {
    let rating = result.rating();
    if rating.is_empty() {
        format!("{}, {}: {}", result.tech_type, result.description, result.capacity)
    } else {
        format!(
            "{}, {}: {}, {}",
            result.tech_type, result.description, result.capacity, rating
        )
    }
}

/// Describe the baseline building for a project.
///
/// Every reference lookup must succeed; a miss is reported as
/// [`Error::MissingReference`].
pub fn analyze_baseline(
    request: &BaselineRequest,
    data: &impl ReferenceData,
    cooling_table: &CoolingEfficiencyTable,
) -> Result<BaselineSummary> {
    let zip = data
        .zip_code(request.zip_code)
        .ok_or_else(|| Error::missing("zip code", request.zip_code))?;
    let residential = request.is_residential();
    tracing::debug!(
        zip = request.zip_code,
        zone = %zip.climate_zone,
        building_type = %request.building_type,
        "Analyzing baseline"
    );

    let rate = data
        .rates(&zip.state)
        .ok_or_else(|| Error::missing("utility rates", &zip.state))?;
    let rates = if residential {
        Rates {
            electric: format!("{} ¢/kW-hr", rate.residential_electric),
            gas: format!("{} $/therm", rate.residential_gas),
        }
    } else {
        Rates {
            electric: format!("{} ¢/kW-hr", rate.commercial_electric),
            gas: format!("{} $/therm", rate.commercial_gas),
        }
    };

    let economizer = economizer_requirement(&zip.climate_zone, data)?;

    let system_number = select_system(request, data)?;
    let system = data
        .system(system_number)
        .ok_or_else(|| Error::missing("system", system_number))?;
    let cooling = cooling_efficiency(
        request.area,
        system.number,
        request.cooling_sq_ft_ton,
        cooling_table,
    );
    let heating = heating_efficiency(request.area, system.number, request.heating_btu_sq_ft);

    let lpd = data
        .lighting(&request.building_type)
        .ok_or_else(|| Error::missing("lighting power density", &request.building_type))?;

    let zone_digit = zip
        .climate_zone
        .chars()
        .next()
        .and_then(|c| c.to_digit(10))
        .ok_or_else(|| Error::missing("climate zone", &zip.climate_zone))? as u8;
    let envelope = data
        .envelope(zone_digit, residential)
        .ok_or_else(|| Error::missing("envelope", format!("zone {zone_digit}")))?;

    let occupancy = data
        .occupancy(&request.building_type)
        .ok_or_else(|| Error::missing("occupancy assumption", &request.building_type))?;

    Ok(BaselineSummary {
        location: format!("{}-{}", zip.city, zip.state),
        area: format!("{} SqFt", request.area),
        schedule_type: ScheduleType::for_building_type(&request.building_type),
        rates,
        economizer,
        hvac_system: system.system_type.clone(),
        hvac_system_number: system.number,
        cooling_summary: summarize(&cooling),
        heating_summary: summarize(&heating),
        cooling,
        heating,
        lighting: format!("{:.1} W/SqFt", lpd.lpd),
        envelope: EnvelopeSummary::from_row(envelope, residential),
        occupancy: occupancy.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::{
        LpdRow, RateRow, ReferenceTables, ShutoffRow, SystemRow, SystemSelectionRow, ZipCodeRow,
        ALL_OTHERS,
    };

    fn tables() -> ReferenceTables {
        ReferenceTables {
            zip_codes: vec![
                ZipCodeRow {
                    zip: 33101,
                    city: "Miami".into(),
                    state: "FL".into(),
                    county: "Miami-Dade".into(),
                    climate_zone: "1A".into(),
                },
                ZipCodeRow {
                    zip: 80202,
                    city: "Denver".into(),
                    state: "CO".into(),
                    county: "Denver".into(),
                    climate_zone: "5B".into(),
                },
            ],
            rates: vec![
                RateRow {
                    state: "FL".into(),
                    commercial_electric: 9.5,
                    commercial_gas: 1.25,
                    residential_electric: 11.2,
                    residential_gas: 1.6,
                },
                RateRow {
                    state: "CO".into(),
                    commercial_electric: 10.1,
                    commercial_gas: 0.8,
                    residential_electric: 12.4,
                    residential_gas: 0.9,
                },
            ],
            shutoffs: vec![ShutoffRow {
                zone: "5B".into(),
                temp: 75.0,
            }],
            system_selection: (1..=4)
                .map(|tier| SystemSelectionRow {
                    tier,
                    fossil_fuel: tier * 2 + 1,
                    electric: tier * 2 + 2,
                })
                .collect(),
            systems: (1..=8)
                .map(|number| SystemRow {
                    number,
                    system_type: format!("System {number}"),
                })
                .collect(),
            lighting: vec![
                LpdRow {
                    building_type: "OFFICE".into(),
                    lpd: 1.0,
                },
                LpdRow {
                    building_type: "MULTI-FAMILY".into(),
                    lpd: 0.7,
                },
            ],
            envelopes: vec![
                EnvelopeRow {
                    zone: 1,
                    residential: false,
                    roof: "R-15 c.i.".into(),
                    ..Default::default()
                },
                EnvelopeRow {
                    zone: 5,
                    residential: true,
                    roof: "R-20 c.i.".into(),
                    ..Default::default()
                },
            ],
            occupancy: vec![OccupancyAssumption {
                name: ALL_OTHERS.into(),
                people_per_1000_sf: 5.0,
                area_per_person: 200.0,
                sensible_heat_per_person: 250.0,
                latent_heat_per_person: 200.0,
                receptacle_load_w_per_sf: 0.75,
                equest_building_type: vec![],
                equest_space_type: vec![],
            }],
        }
    }

    fn request(zip: u32, building_type: &str, fuel: HeatingFuel) -> BaselineRequest {
        BaselineRequest {
            zip_code: zip,
            area: 20_000.0,
            number_floors: 2,
            building_type: building_type.into(),
            hvac_heating_type: fuel,
            cooling_sq_ft_ton: 400.0,
            heating_btu_sq_ft: 25.0,
        }
    }

    #[test]
    fn test_size_tiers() {
        assert_eq!(size_tier(3, 24_999.0), 1);
        assert_eq!(size_tier(4, 24_999.0), 2);
        assert_eq!(size_tier(5, 25_000.0), 3);
        assert_eq!(size_tier(5, 150_000.0), 3);
        assert_eq!(size_tier(5, 150_001.0), 4);
        assert_eq!(size_tier(6, 1_000.0), 4);
    }

    #[test]
    fn test_commercial_baseline() {
        let table = CoolingEfficiencyTable::ashrae_90_1_2007().unwrap();
        let summary = analyze_baseline(
            &request(33101, "OFFICE", HeatingFuel::FossilFuel),
            &tables(),
            &table,
        )
        .unwrap();

        assert_eq!(summary.location, "Miami-FL");
        assert_eq!(summary.rates.electric, "9.5 ¢/kW-hr");
        assert_eq!(summary.rates.gas, "1.25 $/therm");
        assert_eq!(summary.economizer, "1A: No economizer is required");
        // tier 1, fossil fuel -> system 3
        assert_eq!(summary.hvac_system_number, 3);
        assert_eq!(summary.hvac_system, "System 3");
        assert_eq!(summary.cooling.tech_type, "DX");
        assert_eq!(summary.heating.tech_type, "Furnace");
        assert_eq!(summary.heating_summary, "Furnace, Gas Fired: 500 kBTUh, 0.8 AFUE");
        assert_eq!(summary.lighting, "1.0 W/SqFt");
        assert_eq!(summary.envelope.roof, "R-15 c.i.");
        assert!(!summary.envelope.residential);
        assert_eq!(summary.schedule_type, ScheduleType::NonResidential);
        assert_eq!(summary.occupancy.name, ALL_OTHERS);
    }

    #[test]
    fn test_residential_baseline() {
        let table = CoolingEfficiencyTable::ashrae_90_1_2007().unwrap();
        let summary = analyze_baseline(
            &request(80202, "MULTI-FAMILY", HeatingFuel::Electric),
            &tables(),
            &table,
        )
        .unwrap();

        assert_eq!(summary.rates.electric, "12.4 ¢/kW-hr");
        assert_eq!(
            summary.economizer,
            "5B: requires economizer with high limit shutOff of 75°F"
        );
        assert_eq!(summary.hvac_system_number, 2);
        assert_eq!(summary.heating.description, "PTHP");
        assert_eq!(summary.lighting, "0.7 W/SqFt");
        assert!(summary.envelope.residential);
        assert_eq!(summary.schedule_type, ScheduleType::ResidentialWithSetback);
    }

    #[test]
    fn test_missing_reference() {
        let table = CoolingEfficiencyTable::ashrae_90_1_2007().unwrap();
        let err = analyze_baseline(
            &request(99999, "OFFICE", HeatingFuel::Electric),
            &tables(),
            &table,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            Error::MissingReference { table: "zip code", ref key } if key == "99999"
        ));

        let err = analyze_baseline(
            &request(33101, "WAREHOUSE", HeatingFuel::Electric),
            &tables(),
            &table,
        )
        .unwrap_err();
        assert!(matches!(err, Error::MissingReference { table: "lighting power density", .. }));
    }

    #[test]
    fn test_schedule_types() {
        assert_eq!(ScheduleType::for_building_type("RETAIL").to_string(), "N2-9 Retail");
        assert_eq!(
            ScheduleType::for_building_type("MOTEL"),
            ScheduleType::HotelFunction
        );
        assert_eq!(
            ScheduleType::for_building_type("OFFICE").as_str(),
            "N2-5 Non Residential"
        );
    }

    #[test]
    fn test_request_from_json() {
        let json = r#"{ "zipCode": 33101, "area": 12000, "numberFloors": 1,
            "buildingType": "RETAIL", "hvacHeatingType": "FOSSIL FUEL",
            "coolingSqFtTon": 350, "heatingBTUSqFt": 30 }"#;
        let request: BaselineRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.hvac_heating_type, HeatingFuel::FossilFuel);
        assert_eq!(request.heating_btu_sq_ft, 30.0);
    }
}
