// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Floor polygons and shoelace area

use crate::error::{Error, Result};
use inp_lite_core::{strip_quotes, Record};
use nalgebra::Point2;
use smallvec::SmallVec;

/// Key fragment identifying floor polygons in the `Polygons` block
pub const FLOOR_POLYGON_MARKER: &str = "Floor Polygon";

/// Closed 2D floor outline with a floor multiplier
#[derive(Debug, Clone, PartialEq)]
pub struct FloorPolygon {
    /// Polygon name without surrounding quotes
    pub name: String,
    /// Vertices in file order
    pub vertices: SmallVec<[Point2<f64>; 8]>,
    multiplier: f64,
}

impl FloorPolygon {
    /// Create a polygon with multiplier 1
    pub fn new(name: impl Into<String>, vertices: impl IntoIterator<Item = Point2<f64>>) -> Self {
        Self {
            name: name.into(),
            vertices: vertices.into_iter().collect(),
            multiplier: 1.0,
        }
    }

    /// Build from a `Polygons` record whose name key contains `Floor Polygon`.
    ///
    /// Returns `Ok(None)` for records that are not floor polygons. Field
    /// values that are not parenthesized are skipped; a parenthesized value
    /// that is not an `(x, y)` pair is an error.
    pub fn from_record(record: &Record) -> Result<Option<Self>> {
        let Some(key) = record.find_key(FLOOR_POLYGON_MARKER) else {
            return Ok(None);
        };
        let name = strip_quotes(key).to_string();

        let mut vertices = SmallVec::new();
        for (_, value) in record.iter() {
            if let Some(point) = parse_vertex(&value.text()).map_err(|bad| Error::InvalidVertex {
                polygon: name.clone(),
                value: bad,
            })? {
                vertices.push(point);
            }
        }

        Ok(Some(Self {
            name,
            vertices,
            multiplier: 1.0,
        }))
    }

    #[inline]
    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    /// Set the floor multiplier. Must be finite and non-negative.
    pub fn set_multiplier(&mut self, multiplier: f64) -> Result<()> {
        if !multiplier.is_finite() || multiplier < 0.0 {
            return Err(Error::InvalidMultiplier(format!(
                "{} for polygon '{}'",
                multiplier, self.name
            )));
        }
        self.multiplier = multiplier;
        Ok(())
    }

    /// Outline area times the multiplier
    pub fn area(&self) -> f64 {
        polygon_area(&self.vertices) * self.multiplier
    }
}

/// Parse an `( x, y )` vertex token.
///
/// Returns `Ok(None)` when the token is not parenthesized and `Err` with the
/// offending text when it is parenthesized but not a numeric pair.
pub fn parse_vertex(token: &str) -> std::result::Result<Option<Point2<f64>>, String> {
    let trimmed = token.trim();
    let Some(inner) = trimmed
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
    else {
        return Ok(None);
    };

    let mut parts = inner.split(',').map(|p| p.trim().parse::<f64>());
    match (parts.next(), parts.next(), parts.next()) {
        (Some(Ok(x)), Some(Ok(y)), None) if x.is_finite() && y.is_finite() => {
            Ok(Some(Point2::new(x, y)))
        }
        _ => Err(trimmed.to_string()),
    }
}

/// Signed shoelace area (positive for counter-clockwise outlines)
pub fn compute_signed_area(points: &[Point2<f64>]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut twice = 0.0;
    for i in 0..n {
        let a = &points[i];
        let b = &points[(i + 1) % n];
        twice += a.x * b.y - b.x * a.y;
    }
    twice / 2.0
}

/// Unsigned polygon area; always >= 0
#[inline]
pub fn polygon_area(points: &[Point2<f64>]) -> f64 {
    compute_signed_area(points).abs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use inp_lite_core::FieldValue;

    fn square() -> Vec<Point2<f64>> {
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 10.0),
            Point2::new(0.0, 10.0),
        ]
    }

    #[test]
    fn test_square_area() {
        assert_relative_eq!(polygon_area(&square()), 100.0);

        let mut clockwise = square();
        clockwise.reverse();
        assert_relative_eq!(compute_signed_area(&clockwise), -100.0);
        assert_relative_eq!(polygon_area(&clockwise), 100.0);
    }

    #[test]
    fn test_multiplier_scales_area() {
        let mut polygon = FloorPolygon::new("EL1 Floor Polygon", square());
        assert_relative_eq!(polygon.area(), 100.0);

        polygon.set_multiplier(2.0).unwrap();
        assert_relative_eq!(polygon.area(), 200.0);
        assert!(polygon.set_multiplier(-1.0).is_err());
        assert_relative_eq!(polygon.multiplier(), 2.0);
    }

    #[test]
    fn test_degenerate_polygons_have_zero_area() {
        assert_eq!(polygon_area(&[]), 0.0);
        assert_eq!(polygon_area(&square()[..2]), 0.0);
    }

    #[test]
    fn test_parse_vertex() {
        assert_eq!(parse_vertex("( 12.5, -3 )"), Ok(Some(Point2::new(12.5, -3.0))));
        assert_eq!(parse_vertex("(0,0)"), Ok(Some(Point2::new(0.0, 0.0))));
        assert_eq!(parse_vertex("POLYGON"), Ok(None));
        assert!(parse_vertex("( 1, 2, 3 )").is_err());
        assert!(parse_vertex("( a, b )").is_err());
    }

    #[test]
    fn test_from_record() {
        let mut record = Record::new(1);
        record.set("\"EL1 Floor Polygon\"", FieldValue::Scalar("POLYGON".into()));
        record.set("V1", FieldValue::Scalar("( 0, 0 )".into()));
        record.set("V2", FieldValue::Scalar("( 20, 0 )".into()));
        record.set(
            "V3",
            FieldValue::List(vec!["( 20,".into(), "10 )".into()]),
        );
        record.set("V4", FieldValue::Scalar("( 0, 10 )".into()));

        let polygon = FloorPolygon::from_record(&record).unwrap().unwrap();
        assert_eq!(polygon.name, "EL1 Floor Polygon");
        assert_eq!(polygon.vertices.len(), 4);
        assert_relative_eq!(polygon.area(), 200.0);
    }

    #[test]
    fn test_from_record_skips_other_polygons() {
        let mut record = Record::new(1);
        record.set("\"EL1 Space Polygon\"", FieldValue::Scalar("POLYGON".into()));
        assert_eq!(FloorPolygon::from_record(&record), Ok(None));
    }
}
