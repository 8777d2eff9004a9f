// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use inp_lite_core::InpDocument;

use super::{require_block, Extractor, MISC_COST_OBJECTS};
use crate::context::ExtractionContext;
use crate::error::Result;

/// Schedule reference fields; `LIGHTING-SCHEDUL` is the keyword as eQUEST writes it
const SCHEDULE_FIELDS: &[&str] = &[
    "PEOPLE-SCHEDULE",
    "LIGHTING-SCHEDUL",
    "EQUIP-SCHEDULE",
    "INF-SCHEDULE",
];

/// Text inside the first pair of double quotes, or the whole value
fn schedule_name(value: &str) -> &str {
    value
        .split_once('"')
        .and_then(|(_, rest)| rest.split_once('"'))
        .map(|(name, _)| name)
        .filter(|name| !name.is_empty())
        .unwrap_or(value)
}

/// Names of the schedules referenced by spaces
pub struct ScheduleExtractor;

impl Extractor for ScheduleExtractor {
    fn name(&self) -> &'static str {
        "schedules"
    }

    fn extract(&self, doc: &InpDocument, ctx: &mut ExtractionContext) -> Result<()> {
        require_block(doc, MISC_COST_OBJECTS)?;

        for record in doc.records_in(MISC_COST_OBJECTS) {
            for field in SCHEDULE_FIELDS {
                if let Some(value) = record.get(field).filter(|v| !v.is_empty()) {
                    let text = value.text();
                    ctx.schedules.push(schedule_name(text.trim()).to_string());
                }
            }
        }

        ctx.aggregate.schedules = ctx
            .schedules
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        Ok(())
    }
}
