// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HVAC systems, boilers and chillers
//!
//! The primary pass reads system identifiers and efficiency ratios from the
//! chilled-water-meter and boiler blocks. The fallback pass only runs when
//! that pass found no heating efficiency at all, and re-reads the meters for
//! furnace and heat-pump data.

use inp_lite_core::{to_fixed, InpDocument, Record};

use super::{numeric, require_block, Extractor, BOILERS, CHILLED_WATER_METERS, CHILLERS};
use crate::context::ExtractionContext;
use crate::error::Result;
use crate::result::UniqueList;

/// Identifiers that name a meter mode rather than a system type
const SENTINELS: &[&str] = &["SUM", "NONE", "UNCONDITIONED", "CONDITIONED"];

/// Placeholder chiller efficiency when a Chillers block has no ratios
pub const DEFAULT_CHILLER_EIR: &str = "Default Value";

const RATIO_PRECISION: usize = 3;

fn push_type(types: &mut UniqueList<String>, record: &Record, key: &str) {
    if let Some(value) = record.get(key).filter(|v| !v.is_empty()) {
        let value = value.text();
        if !SENTINELS.iter().any(|sentinel| *sentinel == value) {
            types.push(value.into_owned());
        }
    }
}

/// Raw text of `key` when it is a plain number; parenthesized text is rejected
fn numeric_text(record: &Record, key: &str) -> Option<String> {
    let value = record.get(key)?.text();
    let value = value.trim();
    value
        .parse::<f64>()
        .is_ok_and(f64::is_finite)
        .then(|| value.to_string())
}

/// `1/x` with three decimals, for a non-zero numeric field
fn inverted(record: &Record, key: &str) -> Option<String> {
    let value = numeric(&record.get(key)?.text())?;
    (value != 0.0).then(|| to_fixed(1.0 / value, RATIO_PRECISION))
}

/// System types, EIRs, boiler ratios and the economizer flag
pub struct HvacExtractor;

impl Extractor for HvacExtractor {
    fn name(&self) -> &'static str {
        "hvac"
    }

    fn extract(&self, doc: &InpDocument, ctx: &mut ExtractionContext) -> Result<()> {
        if !doc.has_block(CHILLED_WATER_METERS) {
            require_block(doc, BOILERS)?;
        }
        let aggregate = &mut ctx.aggregate;

        for record in doc.records_in(CHILLED_WATER_METERS) {
            push_type(&mut aggregate.hvac_types, record, "TYPE");
            push_type(&mut aggregate.hvac_types, record, "HEAT-SOURCE");
            push_type(&mut aggregate.hvac_types, record, "CHW-LOOP");

            if let Some(eir) = numeric_text(record, "COOLING-EIR") {
                aggregate.cooling_eir.push(eir);
            }
            if let Some(eir) = numeric_text(record, "HEATING-EIR") {
                aggregate.heating_eir.push(eir);
            }
            if record.has("ECONO-LIMIT-T") {
                aggregate.has_economizer = true;
            }
        }

        for record in doc.records_in(BOILERS) {
            push_type(&mut aggregate.hvac_types, record, "TYPE");

            if let Some(ratio) = numeric_text(record, "CAPACITY-RATIO") {
                aggregate.capacity_ratios.push(ratio);
            }
            if let Some(ratio) = inverted(record, "HEAT-INPUT-RATIO") {
                aggregate.heat_input_ratios.push(ratio);
            }
        }
        Ok(())
    }
}

/// Chiller electric input ratios
pub struct ChillerExtractor;

impl Extractor for ChillerExtractor {
    fn name(&self) -> &'static str {
        "chillers"
    }

    fn extract(&self, doc: &InpDocument, ctx: &mut ExtractionContext) -> Result<()> {
        require_block(doc, CHILLERS)?;

        let ratios = doc
            .records_in(CHILLERS)
            .filter_map(|record| record.get("ELEC-INPUT-RATIO"))
            .filter(|value| !value.is_empty())
            .map(|value| value.text().trim().to_string());
        ctx.aggregate.chiller_eir.extend(ratios);

        if ctx.aggregate.chiller_eir.is_empty() {
            ctx.aggregate.chiller_eir.push(DEFAULT_CHILLER_EIR.to_string());
        }
        Ok(())
    }
}

/// Furnace and heat-pump efficiencies for files without boiler data.
///
/// A numeric `HEATING-EIR` on a meter is already collected by
/// [`HvacExtractor`], which gates this pass off. The `"<eir> AFUE"` entries
/// are therefore only produced by pipelines registered without it.
pub struct HeatingFallbackExtractor;

impl HeatingFallbackExtractor {
    /// True when the primary pass found any heating efficiency
    pub fn is_gated(ctx: &ExtractionContext) -> bool {
        !ctx.aggregate.heating_eir.is_empty() || !ctx.aggregate.heat_input_ratios.is_empty()
    }
}

impl Extractor for HeatingFallbackExtractor {
    fn name(&self) -> &'static str {
        "heating-fallback"
    }

    fn extract(&self, doc: &InpDocument, ctx: &mut ExtractionContext) -> Result<()> {
        if Self::is_gated(ctx) {
            return Ok(());
        }
        require_block(doc, CHILLED_WATER_METERS)?;

        let aggregate = &mut ctx.aggregate;

        // Furnace first, then heat pump
        for record in doc.records_in(CHILLED_WATER_METERS) {
            if record.get_str("ZONE-HEAT-SOURCE") == Some("FURNACE") {
                aggregate.hvac_types.push("FURNACE".to_string());
            }
            if let Some(ratio) = inverted(record, "FURNACE-HIR") {
                aggregate.heat_input_ratios.push(ratio);
            }
        }

        for record in doc.records_in(CHILLED_WATER_METERS) {
            if record.get_str("HEAT-SOURCE") == Some("HEAT-PUMP") {
                aggregate.hvac_types.push("HEAT-PUMP".to_string());
            }
            if let Some(eir) = numeric_text(record, "HEATING-EIR") {
                aggregate.heating_eir.push(format!("{eir} AFUE"));
            }
            if let Some(cop) = inverted(record, "COOLING-EIR") {
                aggregate.heating_eir.push(format!("{cop} COP"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::test_support::document;

    const METERS: &str = r#""Zone 1 Sys" = SYSTEM
   TYPE             = PSZ
   HEAT-SOURCE      = HEAT-PUMP
   ZONE-HEAT-SOURCE = FURNACE
   FURNACE-HIR      = 1.25
   COOLING-EIR      = 0.3
   ECONO-LIMIT-T    = 70
   ..
"Meter Sum" = SYSTEM
   TYPE             = SUM
   CHW-LOOP         = "CHW Loop"
   COOLING-EIR      = 0.3
   ..
"#;

    const BOILERS_BODY: &str = r#""Boiler 1" = BOILER
   TYPE             = HW-BOILER
   CAPACITY-RATIO   = 1
   HEAT-INPUT-RATIO = 1.25
   ..
"Boiler 2" = BOILER
   TYPE             = HW-BOILER
   CAPACITY-RATIO   = 1
   HEAT-INPUT-RATIO = 1.25
   ..
"#;

    #[test]
    fn test_hvac_types_skip_sentinels() {
        let doc = document(&[(CHILLED_WATER_METERS, METERS), (BOILERS, BOILERS_BODY)]);
        let mut ctx = ExtractionContext::new();
        HvacExtractor.extract(&doc, &mut ctx).unwrap();

        let aggregate = &ctx.aggregate;
        assert_eq!(
            aggregate.hvac_types.as_slice(),
            ["PSZ", "HEAT-PUMP", "\"CHW Loop\"", "HW-BOILER"]
        );
        assert_eq!(aggregate.cooling_eir.as_slice(), ["0.3"]);
        assert!(aggregate.heating_eir.is_empty());
        assert_eq!(aggregate.capacity_ratios.as_slice(), ["1"]);
        assert_eq!(aggregate.heat_input_ratios.as_slice(), ["0.800"]);
        assert!(aggregate.has_economizer);
    }

    #[test]
    fn test_chillers_default_placeholder() {
        let body = r#""Chiller 1" = CHILLER
   TYPE             = ELEC-OPEN-CENT
   ..
"#;
        let doc = document(&[(CHILLERS, body)]);
        let mut ctx = ExtractionContext::new();
        ChillerExtractor.extract(&doc, &mut ctx).unwrap();

        assert_eq!(ctx.aggregate.chiller_eir.as_slice(), [DEFAULT_CHILLER_EIR]);
    }

    #[test]
    fn test_chillers_absent_leaves_list_empty() {
        let doc = document(&[]);
        let mut ctx = ExtractionContext::new();
        assert!(ChillerExtractor.extract(&doc, &mut ctx).is_err());
        assert!(ctx.aggregate.chiller_eir.is_empty());
    }

    #[test]
    fn test_fallback_reads_furnace_and_heat_pump() {
        let doc = document(&[(CHILLED_WATER_METERS, METERS)]);
        let mut ctx = ExtractionContext::new();
        HeatingFallbackExtractor.extract(&doc, &mut ctx).unwrap();

        let aggregate = &ctx.aggregate;
        assert_eq!(aggregate.hvac_types.as_slice(), ["FURNACE", "HEAT-PUMP"]);
        assert_eq!(aggregate.heat_input_ratios.as_slice(), ["0.800"]);
        assert_eq!(aggregate.heating_eir.as_slice(), ["3.333 COP"]);
    }

    #[test]
    fn test_fallback_gated_by_heating_eir() {
        let doc = document(&[(CHILLED_WATER_METERS, METERS)]);
        let mut ctx = ExtractionContext::new();
        ctx.aggregate.heating_eir.push("0.35".to_string());
        HeatingFallbackExtractor.extract(&doc, &mut ctx).unwrap();

        assert_eq!(ctx.aggregate.heating_eir.as_slice(), ["0.35"]);
        assert!(ctx.aggregate.heat_input_ratios.is_empty());
        assert!(ctx.aggregate.hvac_types.is_empty());
    }

    #[test]
    fn test_parenthesized_eir_is_rejected() {
        let meters = r#""Zone 1 Sys" = SYSTEM
   TYPE             = PSZ
   COOLING-EIR      = ( 0.3 )
   HEATING-EIR      = (0.4)
   ..
"#;
        let doc = document(&[(CHILLED_WATER_METERS, meters)]);
        let mut ctx = ExtractionContext::new();
        HvacExtractor.extract(&doc, &mut ctx).unwrap();

        assert!(ctx.aggregate.cooling_eir.is_empty());
        assert!(ctx.aggregate.heating_eir.is_empty());
    }
}
