// Copyright 2025 Lars Brubaker
// Drawn-shape payloads and their normalization to canonical polygons.
//
// The drawing layer reports coordinates latitude first. Everything past this
// module works in (lng, lat) order, which is also the GeoJSON order.

use std::fmt;

use geo::{Coord, Destination, Haversine, LineString, Point, Polygon};
use serde::{Deserialize, Serialize};

use crate::error::RegionError;

/// Number of vertices used to approximate a circle.
pub const CIRCLE_STEPS: usize = 64;

/// Shape category as tagged by the drawing toolbar.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Polygon,
    Rectangle,
    Circle,
    Polyline,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Polygon,
        Category::Rectangle,
        Category::Circle,
        Category::Polyline,
    ];

    /// True for categories subject to containment and overlap rules.
    pub fn is_area(self) -> bool {
        !matches!(self, Category::Polyline)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Polygon => "polygon",
            Category::Rectangle => "rectangle",
            Category::Circle => "circle",
            Category::Polyline => "polyline",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A drawing-layer coordinate (latitude first).
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        LatLng { lat, lng }
    }

    fn to_coord(self) -> Coord<f64> {
        Coord {
            x: self.lng,
            y: self.lat,
        }
    }

    fn from_coord(c: Coord<f64>) -> Self {
        LatLng { lat: c.y, lng: c.x }
    }
}

/// Raw geometry of a drawn shape. The variant is the category tag.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RawShape {
    /// First ring is the exterior, the rest are holes. Rings may be open.
    Polygon { rings: Vec<Vec<LatLng>> },
    Rectangle {
        south_west: LatLng,
        north_east: LatLng,
    },
    Circle { center: LatLng, radius_m: f64 },
    Polyline { points: Vec<LatLng> },
}

impl RawShape {
    pub fn category(&self) -> Category {
        match self {
            RawShape::Polygon { .. } => Category::Polygon,
            RawShape::Rectangle { .. } => Category::Rectangle,
            RawShape::Circle { .. } => Category::Circle,
            RawShape::Polyline { .. } => Category::Polyline,
        }
    }

    /// Reject payload parameters that cannot describe a shape.
    ///
    /// A circle needs a finite centre and a finite, positive radius.
    pub fn check(&self) -> Result<(), RegionError> {
        if let RawShape::Circle { center, radius_m } = self {
            if !(center.lat.is_finite() && center.lng.is_finite()) {
                return Err(RegionError::geometry("circle centre is not finite"));
            }
            if !(radius_m.is_finite() && *radius_m > 0.0) {
                return Err(RegionError::geometry(format!(
                    "circle radius must be positive, got {} m",
                    radius_m
                )));
            }
        }
        Ok(())
    }

    /// Build a polygon payload from a canonical polygon.
    pub fn from_polygon(polygon: &Polygon<f64>) -> Self {
        let ring = |ls: &LineString<f64>| -> Vec<LatLng> {
            ls.0.iter().copied().map(LatLng::from_coord).collect()
        };
        let mut rings = vec![ring(polygon.exterior())];
        rings.extend(polygon.interiors().iter().map(ring));
        RawShape::Polygon { rings }
    }
}

/// Convert a drawn area shape into its canonical polygon.
///
/// Returns `None` for polylines; those never take part in overlap rules.
pub fn normalize(shape: &RawShape) -> Option<Polygon<f64>> {
    match shape {
        RawShape::Polygon { rings } => {
            let mut rings = rings.iter().map(|r| ring_from_latlngs(r));
            let exterior = rings.next().unwrap_or_else(|| LineString(Vec::new()));
            let interiors = rings.filter(|r| !r.0.is_empty()).collect();
            Some(Polygon::new(exterior, interiors))
        }
        RawShape::Rectangle {
            south_west,
            north_east,
        } => Some(rectangle(*south_west, *north_east)),
        RawShape::Circle { center, radius_m } => Some(circle(*center, *radius_m, CIRCLE_STEPS)),
        RawShape::Polyline { .. } => None,
    }
}

/// Convert line points to a (lng, lat) line string.
pub fn line_string(points: &[LatLng]) -> LineString<f64> {
    LineString(points.iter().map(|p| p.to_coord()).collect())
}

fn ring_from_latlngs(points: &[LatLng]) -> LineString<f64> {
    let mut ring = line_string(points);
    ring.close();
    ring
}

fn rectangle(a: LatLng, b: LatLng) -> Polygon<f64> {
    let (s, n) = (a.lat.min(b.lat), a.lat.max(b.lat));
    let (w, e) = (a.lng.min(b.lng), a.lng.max(b.lng));
    let ring = vec![
        Coord { x: w, y: s },
        Coord { x: w, y: n },
        Coord { x: e, y: n },
        Coord { x: e, y: s },
        Coord { x: w, y: s },
    ];
    Polygon::new(LineString(ring), Vec::new())
}

/// Regular polygon approximating a circle of `radius_m` around `center`.
///
/// Vertex `i` is the haversine destination at bearing `-360 * i / steps` on
/// the mean earth sphere (6371.0088 km).
fn circle(center: LatLng, radius_m: f64, steps: usize) -> Polygon<f64> {
    let origin = Point::from(center.to_coord());
    let mut ring: Vec<Coord<f64>> = (0..steps)
        .map(|i| {
            let bearing = (i as f64) * -360.0 / steps as f64;
            Haversine::destination(origin, bearing, radius_m).0
        })
        .collect();
    if let Some(first) = ring.first().copied() {
        ring.push(first);
    }
    Polygon::new(LineString(ring), Vec::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Distance;

    #[test]
    fn polyline_is_not_normalized() {
        let line = RawShape::Polyline {
            points: vec![LatLng::new(0.0, 0.0), LatLng::new(1.0, 1.0)],
        };
        assert!(normalize(&line).is_none());
    }

    #[test]
    fn polygon_swaps_to_lng_lat_and_closes() {
        let shape = RawShape::Polygon {
            rings: vec![vec![
                LatLng::new(10.0, 1.0),
                LatLng::new(10.0, 2.0),
                LatLng::new(11.0, 2.0),
            ]],
        };
        let poly = normalize(&shape).unwrap();
        let ext = &poly.exterior().0;
        assert_eq!(ext.len(), 4);
        assert_eq!(ext[0], Coord { x: 1.0, y: 10.0 });
        assert_eq!(ext[2], Coord { x: 2.0, y: 11.0 });
        assert_eq!(ext[0], ext[3]);
    }

    #[test]
    fn closed_ring_normalizes_to_itself() {
        let ring = LineString::from(vec![(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0), (0.0, 0.0)]);
        let hole = LineString::from(vec![(1.0, 1.0), (1.0, 2.0), (2.0, 2.0), (1.0, 1.0)]);
        let poly = Polygon::new(ring, vec![hole]);
        let again = normalize(&RawShape::from_polygon(&poly)).unwrap();
        assert_eq!(again, poly);
    }

    #[test]
    fn rectangle_is_closed_four_vertex_ring() {
        let shape = RawShape::Rectangle {
            south_west: LatLng::new(2.0, 3.0),
            north_east: LatLng::new(0.0, 1.0),
        };
        let poly = normalize(&shape).unwrap();
        let ext = &poly.exterior().0;
        assert_eq!(ext.len(), 5);
        assert_eq!(ext[0], Coord { x: 1.0, y: 0.0 });
        assert_eq!(ext[2], Coord { x: 3.0, y: 2.0 });
        assert_eq!(ext[0], ext[4]);
    }

    #[test]
    fn circle_has_64_vertices_one_km_out() {
        let shape = RawShape::Circle {
            center: LatLng::new(0.0, 0.0),
            radius_m: 1000.0,
        };
        let poly = normalize(&shape).unwrap();
        let ext = &poly.exterior().0;
        assert_eq!(ext.len(), CIRCLE_STEPS + 1);
        assert_eq!(ext[0], ext[CIRCLE_STEPS]);
        let center = Point::new(0.0, 0.0);
        for (i, c) in ext.iter().enumerate() {
            let d = Haversine::distance(center, Point::from(*c));
            assert!((d - 1000.0).abs() < 1e-6, "vertex {} at {} m", i, d);
        }
    }

    #[test]
    fn circle_first_vertex_is_due_north() {
        let poly = circle(LatLng::new(0.0, 0.0), 1000.0, CIRCLE_STEPS);
        let c = poly.exterior().0[0];
        assert!(c.x.abs() < 1e-12, "lng={}", c.x);
        assert!(c.y > 0.0);
    }

    #[test]
    fn circle_radius_must_be_positive_and_finite() {
        let center = LatLng::new(0.0, 0.0);
        for radius_m in [0.0, -1000.0, f64::NAN, f64::INFINITY] {
            let shape = RawShape::Circle { center, radius_m };
            assert!(
                matches!(shape.check(), Err(RegionError::GeometryOperationFailed { .. })),
                "radius {} accepted",
                radius_m
            );
        }
        let shape = RawShape::Circle { center, radius_m: 250.0 };
        assert!(shape.check().is_ok());
    }

    #[test]
    fn circle_centre_must_be_finite() {
        let shape = RawShape::Circle {
            center: LatLng::new(f64::NAN, 0.0),
            radius_m: 1000.0,
        };
        assert!(shape.check().is_err());
    }

    #[test]
    fn non_circle_shapes_pass_check() {
        let shape = RawShape::Rectangle {
            south_west: LatLng::new(0.0, 0.0),
            north_east: LatLng::new(1.0, 1.0),
        };
        assert!(shape.check().is_ok());
    }

    #[test]
    fn category_names() {
        assert_eq!(Category::Polyline.to_string(), "polyline");
        assert!(Category::Circle.is_area());
        assert!(!Category::Polyline.is_area());
        assert_eq!(
            RawShape::Circle {
                center: LatLng::new(0.0, 0.0),
                radius_m: 1.0
            }
            .category(),
            Category::Circle
        );
    }
}
