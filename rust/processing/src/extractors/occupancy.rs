// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use inp_lite_core::{InpDocument, Record};

use super::{require_block, Extractor, MISC_COST_OBJECTS};
use crate::context::ExtractionContext;
use crate::error::Result;

const LATENT_HEAT: &str = "PEOPLE-HG-LAT";
const SENSIBLE_HEAT: &str = "PEOPLE-HG-SENS";
const RECEPTACLE_LOAD: &str = "EQUIPMENT-W/AREA";
const AREA_PER_PERSON: &str = "AREA/PERSON";

const DEFAULT_SENSIBLE_HEAT: &str = "250";
const DEFAULT_AREA_PER_PERSON: &str = "100";

fn text_or(record: &Record, key: &str, default: &str) -> String {
    record
        .get(key)
        .filter(|v| !v.is_empty())
        .map(|v| v.text().trim().to_string())
        .unwrap_or_else(|| default.to_string())
}

/// People heat gains, receptacle load and density from the first space
/// that declares them
pub struct OccupancyExtractor;

impl Extractor for OccupancyExtractor {
    fn name(&self) -> &'static str {
        "occupancy"
    }

    fn extract(&self, doc: &InpDocument, ctx: &mut ExtractionContext) -> Result<()> {
        if ctx.occupancy_found {
            return Ok(());
        }
        require_block(doc, MISC_COST_OBJECTS)?;

        let Some(record) = doc
            .records_in(MISC_COST_OBJECTS)
            .find(|record| record.has(LATENT_HEAT))
        else {
            return Ok(());
        };

        let aggregate = &mut ctx.aggregate;
        aggregate.latent_heat_per_person = text_or(record, LATENT_HEAT, "");
        aggregate.sensible_heat_per_person = text_or(record, SENSIBLE_HEAT, DEFAULT_SENSIBLE_HEAT);
        aggregate.receptacle_load_w_per_sf = text_or(record, RECEPTACLE_LOAD, "")
            .replace(['(', ')'], "")
            .trim()
            .to_string();
        aggregate.area_per_person = text_or(record, AREA_PER_PERSON, DEFAULT_AREA_PER_PERSON);
        ctx.occupancy_found = true;
        Ok(())
    }
}
