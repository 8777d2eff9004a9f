// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Extractors
//!
//! Each extractor reads the blocks it knows by name and writes only its own
//! fields of the aggregate.

use inp_lite_core::InpDocument;

use crate::context::ExtractionContext;
use crate::error::{Error, Result};

mod envelope;
mod floor_area;
mod hvac;
mod lighting;
mod occupancy;
mod rates;
mod schedules;

pub use envelope::{GlazingExtractor, MaterialsExtractor};
pub use floor_area::{FloorAreaExtractor, FloorMultiplierExtractor};
pub use hvac::{ChillerExtractor, HeatingFallbackExtractor, HvacExtractor};
pub use lighting::LightingExtractor;
pub use occupancy::OccupancyExtractor;
pub use rates::UtilityRatesExtractor;
pub use schedules::ScheduleExtractor;

pub const GLASS_TYPES: &str = "Glass Types";
pub const MATERIALS: &str = "Materials / Layers / Constructions";
pub const MISC_COST_OBJECTS: &str = "Misc Cost Related Objects";
pub const UTILITY_RATES: &str = "Utility Rates";
pub const CHILLED_WATER_METERS: &str = "Chilled Water Meters";
pub const BOILERS: &str = "Boilers";
pub const CHILLERS: &str = "Chillers";
pub const POLYGONS: &str = "Polygons";

/// One step of the extraction pipeline
pub trait Extractor: Send + Sync {
    /// Name used in warnings and logs
    fn name(&self) -> &'static str;

    /// Read `doc` and update `ctx`
    fn extract(&self, doc: &InpDocument, ctx: &mut ExtractionContext) -> Result<()>;
}

/// Fail with [`Error::MissingBlock`] unless the document has `name`
#[inline]
pub(crate) fn require_block(doc: &InpDocument, name: &'static str) -> Result<()> {
    if doc.has_block(name) {
        Ok(())
    } else {
        Err(Error::MissingBlock(name))
    }
}

/// Parse a numeric token, ignoring surrounding parentheses
#[inline]
pub(crate) fn numeric(text: &str) -> Option<f64> {
    text.trim()
        .trim_start_matches('(')
        .trim_end_matches(')')
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

#[cfg(test)]
pub(crate) mod test_support {
    use inp_lite_core::InpDocument;

    const BANNER: &str = "$ ---------------------------------------------------------";

    /// Build a document from `(block name, body)` pairs
    pub fn document(blocks: &[(&str, &str)]) -> InpDocument {
        let mut content = String::from("INPUT ..\n");
        for (name, body) in blocks {
            content.push_str(&format!("{BANNER}\n$              {name}\n{BANNER}\n\n{body}\n"));
        }
        InpDocument::parse(&content).unwrap()
    }
}
