// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use inp_lite_core::InpDocument;

use super::{require_block, Extractor, UTILITY_RATES};
use crate::context::ExtractionContext;
use crate::error::Result;

const ENERGY_CHARGE: &str = "ENERGY-CHG";
const ELECTRIC_NAMES: &[&str] = &["Electricity", "Electricity Rate"];
const GAS_NAMES: &[&str] = &["NG", "Natural Gas", "Natural Gas Rate"];

/// Electric and gas energy charges
pub struct UtilityRatesExtractor;

impl Extractor for UtilityRatesExtractor {
    fn name(&self) -> &'static str {
        "utility-rates"
    }

    fn extract(&self, doc: &InpDocument, ctx: &mut ExtractionContext) -> Result<()> {
        require_block(doc, UTILITY_RATES)?;

        for record in doc.records_in(UTILITY_RATES) {
            let Some(charge) = record.get(ENERGY_CHARGE) else {
                continue;
            };
            let charge = charge.text();
            let charge = charge.strip_suffix('}').unwrap_or(&charge).trim();

            if ELECTRIC_NAMES.iter().any(|name| record.has_name(name)) {
                ctx.aggregate.electric_rate = charge.to_string();
            }
            if GAS_NAMES.iter().any(|name| record.has_name(name)) {
                ctx.aggregate.gas_rate = charge.to_string();
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::test_support::document;

    #[test]
    fn test_rates_by_utility_name() {
        let body = r#""Electricity Rate" = UTILITY-RATE
   TYPE             = ELECTRICITY
   ENERGY-CHG       = 0.1123
   ..
"NG" = UTILITY-RATE
   TYPE             = NATURAL-GAS
   ENERGY-CHG       = 0.95}
   ..
"Water" = UTILITY-RATE
   ENERGY-CHG       = 4.2
   ..
"#;
        let doc = document(&[(UTILITY_RATES, body)]);
        let mut ctx = ExtractionContext::new();
        UtilityRatesExtractor.extract(&doc, &mut ctx).unwrap();

        assert_eq!(ctx.aggregate.electric_rate, "0.1123");
        assert_eq!(ctx.aggregate.gas_rate, "0.95");
    }
}
