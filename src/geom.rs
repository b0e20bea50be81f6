// Copyright 2025 Lars Brubaker
//
// Geometric predicates on canonical (lng, lat) polygons.
//
// Everything here is a pure function of its arguments. The boolean operations
// come from the `geo` crate; this module adds input validation, failure
// capture and the deterministic choice of remnant when a difference splits a
// polygon into several parts.

use std::cmp::Ordering;
use std::panic::{self, AssertUnwindSafe};

use geo::{Area, BooleanOps, Centroid, Contains, Coord, Intersects, Line, MultiPolygon, Polygon};

use crate::error::RegionError;

pub type Real = f64;

/// Relative area difference below which two remnants count as equal.
pub const AREA_TIE_EPSILON: Real = 1e-12;

/// Check that `polygon` is usable by the boolean operations.
///
/// Every ring needs finite coordinates, at least 3 distinct vertices and no
/// crossing between non-adjacent edges. Holes must lie inside the exterior.
pub fn validate(polygon: &Polygon<Real>) -> Result<(), RegionError> {
    let rings = std::iter::once(polygon.exterior()).chain(polygon.interiors());
    for (index, ring) in rings.enumerate() {
        let label = match index {
            0 => "exterior ring".to_string(),
            n => format!("interior ring {}", n),
        };
        if !ring.0.iter().all(|c| c.x.is_finite() && c.y.is_finite()) {
            return Err(RegionError::geometry(format!("{} has a non-finite coordinate", label)));
        }
        let vertices = ring_vertices(&ring.0);
        if vertices.len() < 3 {
            return Err(RegionError::geometry(format!(
                "{} has {} distinct vertices",
                label,
                vertices.len()
            )));
        }
        if let Some((i, j)) = self_crossing(&vertices) {
            return Err(RegionError::geometry(format!(
                "{} crosses itself at edges {} and {}",
                label, i, j
            )));
        }
    }

    if polygon.unsigned_area() <= 0.0 {
        return Err(RegionError::geometry("polygon has zero area"));
    }

    let shell = Polygon::new(polygon.exterior().clone(), Vec::new());
    for (index, hole) in polygon.interiors().iter().enumerate() {
        if !shell.contains(hole) {
            return Err(RegionError::geometry(format!(
                "interior ring {} lies outside the exterior",
                index + 1
            )));
        }
    }
    Ok(())
}

/// Vertices of a ring without consecutive repeats or the closing point.
fn ring_vertices(ring: &[Coord<Real>]) -> Vec<Coord<Real>> {
    let mut vertices: Vec<Coord<Real>> = Vec::with_capacity(ring.len());
    for &c in ring {
        if vertices.last() != Some(&c) {
            vertices.push(c);
        }
    }
    if vertices.len() > 1 && vertices.first() == vertices.last() {
        vertices.pop();
    }
    vertices
}

/// First pair of non-adjacent edges of a closed ring that touch or cross.
fn self_crossing(vertices: &[Coord<Real>]) -> Option<(usize, usize)> {
    let n = vertices.len();
    let edges: Vec<Line<Real>> = (0..n)
        .map(|i| Line::new(vertices[i], vertices[(i + 1) % n]))
        .collect();
    for i in 0..n {
        for j in (i + 2)..n {
            // First and last edges meet at the closing vertex.
            if i == 0 && j == n - 1 {
                continue;
            }
            if edges[i].intersects(&edges[j]) {
                return Some((i, j));
            }
        }
    }
    None
}

/// True if either polygon lies entirely within the other.
pub fn either_contains(a: &Polygon<Real>, b: &Polygon<Real>) -> bool {
    a.contains(b) || b.contains(a)
}

/// True if the polygons share any point, boundaries included.
pub fn intersects(a: &Polygon<Real>, b: &Polygon<Real>) -> bool {
    a.intersects(b)
}

/// `a` minus `b`. A panic inside the boolean sweep is reported as an error.
///
/// Only where panics unwind: on `wasm32-unknown-unknown` they abort instead.
pub fn difference(a: &Polygon<Real>, b: &Polygon<Real>) -> Result<MultiPolygon<Real>, RegionError> {
    panic::catch_unwind(AssertUnwindSafe(|| a.difference(b))).map_err(|payload| {
        let detail = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "polygon difference failed".to_string());
        tracing::warn!(%detail, "boolean difference panicked");
        RegionError::GeometryOperationFailed { detail }
    })
}

/// Area shared by two polygons.
pub fn overlap_area(a: &Polygon<Real>, b: &Polygon<Real>) -> Real {
    a.intersection(b).unsigned_area()
}

/// True if the two areas differ by no more than the tie tolerance.
pub fn same_area(a: &Polygon<Real>, b: &Polygon<Real>) -> bool {
    areas_tie(a.unsigned_area(), b.unsigned_area())
}

fn areas_tie(a: Real, b: Real) -> bool {
    (a - b).abs() <= a.max(b) * AREA_TIE_EPSILON
}

/// Pick the remnant to keep from a difference result.
///
/// Parts with zero area are dropped. The largest remaining part wins; equal
/// areas fall back to the smallest centroid longitude, then latitude, then
/// the fewest exterior vertices, then the part produced first.
pub fn largest_part(parts: MultiPolygon<Real>) -> Option<Polygon<Real>> {
    let mut best: Option<(Polygon<Real>, Real)> = None;
    for part in parts {
        let area = part.unsigned_area();
        if area <= 0.0 {
            continue;
        }
        let replace = match &best {
            None => true,
            Some((kept, kept_area)) => compare_remnants(&part, area, kept, *kept_area) == Ordering::Greater,
        };
        if replace {
            best = Some((part, area));
        }
    }
    best.map(|(p, _)| p)
}

/// `Greater` means `a` is preferred over `b`.
fn compare_remnants(a: &Polygon<Real>, a_area: Real, b: &Polygon<Real>, b_area: Real) -> Ordering {
    if !areas_tie(a_area, b_area) {
        return a_area.total_cmp(&b_area);
    }

    let key = |p: &Polygon<Real>| p.centroid().map(|c| (c.x(), c.y())).unwrap_or((Real::INFINITY, Real::INFINITY));
    let (ax, ay) = key(a);
    let (bx, by) = key(b);
    // Smaller centroid and fewer vertices are preferred, so compare b to a.
    bx.total_cmp(&ax)
        .then_with(|| by.total_cmp(&ay))
        .then_with(|| b.exterior().0.len().cmp(&a.exterior().0.len()))
}
