// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Glazing and opaque construction properties

use inp_lite_core::{InpDocument, Record};

use super::{require_block, Extractor, GLASS_TYPES, MATERIALS};
use crate::context::ExtractionContext;
use crate::error::Result;

const BASELINE_GLASS: &str = "Baseline Glass";
const WALL_NAMES: &[&str] = &["Baseline Wall", "Proposed Wall"];
const ROOF_NAMES: &[&str] = &["Baseline Roof", "Proposed Roof"];
const DOOR_NAMES: &[&str] = &["Baseline Door", "Proposed Door"];
const FLOOR_NAMES: &[&str] = &["EL1 IFlr Construction"];

/// Field text of `key`, or empty
fn field_text(record: &Record, key: &str) -> String {
    record
        .get(key)
        .map(|v| v.text().into_owned())
        .unwrap_or_default()
}

/// First record declaring any of `names`
fn find_named<'a>(records: &'a [Record], names: &[&str]) -> Option<&'a Record> {
    records
        .iter()
        .find(|record| names.iter().any(|name| record.has_name(name)))
}

/// Shading coefficient and glass conductance of the baseline glass type
pub struct GlazingExtractor;

impl Extractor for GlazingExtractor {
    fn name(&self) -> &'static str {
        "glazing"
    }

    fn extract(&self, doc: &InpDocument, ctx: &mut ExtractionContext) -> Result<()> {
        require_block(doc, GLASS_TYPES)?;

        for block in doc.blocks_named(GLASS_TYPES) {
            if let Some(glass) = find_named(&block.records, &[BASELINE_GLASS]) {
                ctx.aggregate.shading_coefficient = field_text(glass, "SHADING-COEF");
                ctx.aggregate.glass_conductance = field_text(glass, "GLASS-CONDUCT");
            }
        }
        Ok(())
    }
}

/// Wall, roof, door and floor U-values
pub struct MaterialsExtractor;

impl Extractor for MaterialsExtractor {
    fn name(&self) -> &'static str {
        "materials"
    }

    fn extract(&self, doc: &InpDocument, ctx: &mut ExtractionContext) -> Result<()> {
        require_block(doc, MATERIALS)?;

        let aggregate = &mut ctx.aggregate;
        for block in doc.blocks_named(MATERIALS) {
            let records = block.records.as_slice();

            if let Some(wall) = find_named(records, WALL_NAMES) {
                aggregate.wall_u_value = field_text(wall, "U-VALUE");
            }
            if let Some(roof) = find_named(records, ROOF_NAMES) {
                aggregate.roof_u_value = field_text(roof, "U-VALUE");
            }
            if let Some(door) = find_named(records, DOOR_NAMES) {
                aggregate.door_u_value = field_text(door, "U-VALUE");
            }
            if let Some(floor) = find_named(records, FLOOR_NAMES) {
                aggregate.floor_u_value = field_text(floor, "U-VALUE");
            }
        }

        // Door and floor are optional constructions
        for value in [&mut aggregate.door_u_value, &mut aggregate.floor_u_value] {
            if value.is_empty() {
                *value = "0".to_string();
            }
        }
        Ok(())
    }
}
