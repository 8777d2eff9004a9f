// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use inp_lite_core::InpDocument;

use super::{numeric, require_block, Extractor, MISC_COST_OBJECTS};
use crate::context::ExtractionContext;
use crate::error::Result;

const LIGHTING_DENSITY: &str = "LIGHTING-W/AREA";

/// Unique lighting power densities across all misc-object blocks
pub struct LightingExtractor;

impl Extractor for LightingExtractor {
    fn name(&self) -> &'static str {
        "lighting"
    }

    fn extract(&self, doc: &InpDocument, ctx: &mut ExtractionContext) -> Result<()> {
        require_block(doc, MISC_COST_OBJECTS)?;

        let densities = doc
            .records_in(MISC_COST_OBJECTS)
            .filter_map(|record| record.get(LIGHTING_DENSITY))
            .filter_map(|value| numeric(&value.text()));
        ctx.aggregate.lpd.extend(densities);
        Ok(())
    }
}
