// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # INP-Lite Efficiency Engine
//!
//! Code-minimum HVAC efficiency ratings from equipment capacity and
//! category, chiller plant sizing, and project baseline analysis.
//!
//! The engine functions are pure: no I/O and no shared state. Tiered
//! cooling values come from an injected [`CoolingEfficiencyTable`]; the
//! bundled ASHRAE 90.1-2007 table is available through
//! [`CoolingEfficiencyTable::ashrae_90_1_2007`].
//!
//! ```rust
//! use inp_lite_efficiency::{cooling_efficiency, heating_efficiency, CoolingEfficiencyTable};
//!
//! let table = CoolingEfficiencyTable::ashrae_90_1_2007().unwrap();
//! let cooling = cooling_efficiency(3000.0, 3, 500.0, &table);
//! assert_eq!(cooling.capacity, "72 kBTUh");
//!
//! let heating = heating_efficiency(10_000.0, 1, 30.0);
//! assert_eq!(heating.rating(), "0.8 AFUE");
//! ```

pub mod baseline;
pub mod cooling;
pub mod error;
pub mod heating;
pub mod reference;
pub mod result;
pub mod table;

pub use baseline::{
    analyze_baseline, BaselineRequest, BaselineSummary, EnvelopeSummary, HeatingFuel, Rates,
    ScheduleType,
};
pub use cooling::{cooling_efficiency, size_chiller_plant, ChillerPlant, PlantArrangement};
pub use error::{Error, Result};
pub use heating::heating_efficiency;
pub use reference::{OccupancyAssumption, ReferenceData, ReferenceTables};
pub use result::{EfficiencyResult, MetricKind};
pub use table::{CoolingEfficiencyTable, Tier, TierTable};
