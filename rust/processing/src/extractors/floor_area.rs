// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Conditioned floor area from floor polygons and their multipliers

use inp_lite_core::InpDocument;
use inp_lite_geometry::FloorPolygon;

use super::{numeric, require_block, Extractor, MISC_COST_OBJECTS, POLYGONS};
use crate::context::ExtractionContext;
use crate::error::{Error, Result};

/// Builds the polygon name → multiplier table from FLOOR objects
pub struct FloorMultiplierExtractor;

impl Extractor for FloorMultiplierExtractor {
    fn name(&self) -> &'static str {
        "floor-multipliers"
    }

    fn extract(&self, doc: &InpDocument, ctx: &mut ExtractionContext) -> Result<()> {
        require_block(doc, MISC_COST_OBJECTS)?;

        for record in doc.records_in(MISC_COST_OBJECTS) {
            if !record.has_value("FLOOR") || !record.has("MULTIPLIER") {
                continue;
            }
            let Some(polygon) = record.get("POLYGON") else {
                continue;
            };
            let polygon = polygon.unquoted().into_owned();

            let raw = record
                .get("MULTIPLIER")
                .map(|v| v.text().into_owned())
                .unwrap_or_default();
            let Some(multiplier) = numeric(&raw) else {
                ctx.skip_record(Error::InvalidValue {
                    field: "MULTIPLIER",
                    value: raw,
                });
                continue;
            };

            ctx.multipliers.entry(polygon).or_insert(multiplier);
        }
        Ok(())
    }
}

/// Sums floor polygon areas times their multipliers
pub struct FloorAreaExtractor;

impl Extractor for FloorAreaExtractor {
    fn name(&self) -> &'static str {
        "floor-area"
    }

    fn extract(&self, doc: &InpDocument, ctx: &mut ExtractionContext) -> Result<()> {
        require_block(doc, POLYGONS)?;

        let mut total = 0.0;
        for record in doc.records_in(POLYGONS) {
            let Some(mut polygon) = FloorPolygon::from_record(record)? else {
                continue;
            };
            polygon.set_multiplier(ctx.multiplier(&polygon.name))?;
            total += polygon.area();
        }

        ctx.aggregate.area = format!("{} SqFt", total.round());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::test_support::document;

    const SQUARE: &str = r#""EL1 Floor Polygon (G.1)" = POLYGON
   V1               = ( 0, 0 )
   V2               = ( 10, 0 )
   V3               = ( 10, 10 )
   V4               = ( 0, 10 )
   ..
"EL1 Space Polygon (G.1)" = POLYGON
   V1               = ( 0, 0 )
   V2               = ( 50, 0 )
   V3               = ( 50, 50 )
   ..
"#;

    const FLOORS: &str = r#""EL1 Flr (G.1)" = FLOOR
   POLYGON          = "EL1 Floor Polygon (G.1)"
   MULTIPLIER       = 2
   ..
"#;

    fn area(blocks: &[(&str, &str)]) -> String {
        let doc = document(blocks);
        let mut ctx = ExtractionContext::new();
        let _ = FloorMultiplierExtractor.extract(&doc, &mut ctx);
        FloorAreaExtractor.extract(&doc, &mut ctx).unwrap();
        ctx.aggregate.area
    }

    #[test]
    fn test_square_with_multiplier() {
        assert_eq!(area(&[(MISC_COST_OBJECTS, FLOORS), (POLYGONS, SQUARE)]), "200 SqFt");
    }

    #[test]
    fn test_multiplier_defaults_to_one() {
        assert_eq!(area(&[(POLYGONS, SQUARE)]), "100 SqFt");
    }

    #[test]
    fn test_first_multiplier_wins() {
        let doc = document(&[
            (MISC_COST_OBJECTS, FLOORS),
            (
                MISC_COST_OBJECTS,
                r#""EL1 Flr (G.1) copy" = FLOOR
   POLYGON          = "EL1 Floor Polygon (G.1)"
   MULTIPLIER       = 5
   ..
"#,
            ),
        ]);
        let mut ctx = ExtractionContext::new();
        FloorMultiplierExtractor.extract(&doc, &mut ctx).unwrap();
        assert_eq!(ctx.multiplier("EL1 Floor Polygon (G.1)"), 2.0);
        assert_eq!(ctx.multiplier("Unknown"), 1.0);
    }

    #[test]
    fn test_bad_multiplier_skips_only_its_floor() {
        let floors = r#""F1" = FLOOR
   POLYGON          = "Floor Polygon A"
   MULTIPLIER       = many
   ..
"F2" = FLOOR
   POLYGON          = "Floor Polygon B"
   MULTIPLIER       = 3
   ..
"#;
        let polygons = r#""Floor Polygon A" = POLYGON
   V1               = ( 0, 0 )
   V2               = ( 10, 0 )
   V3               = ( 10, 10 )
   V4               = ( 0, 10 )
   ..
"Floor Polygon B" = POLYGON
   V1               = ( 0, 0 )
   V2               = ( 10, 0 )
   V3               = ( 10, 10 )
   V4               = ( 0, 10 )
   ..
"#;
        let doc = document(&[(MISC_COST_OBJECTS, floors), (POLYGONS, polygons)]);
        let mut ctx = ExtractionContext::new();
        FloorMultiplierExtractor.extract(&doc, &mut ctx).unwrap();

        let issues = ctx.take_issues();
        assert_eq!(issues.len(), 1);
        assert!(matches!(issues[0], Error::InvalidValue { field: "MULTIPLIER", .. }));
        assert_eq!(ctx.multiplier("Floor Polygon A"), 1.0);
        assert_eq!(ctx.multiplier("Floor Polygon B"), 3.0);

        FloorAreaExtractor.extract(&doc, &mut ctx).unwrap();
        assert_eq!(ctx.aggregate.area, "400 SqFt");
    }
}
