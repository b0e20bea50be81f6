// Copyright 2025 Lars Brubaker
// Shared test utilities for region-guard tests.

#![allow(dead_code)]

use geo::{Area, BooleanOps, Polygon};
use region_guard::{LatLng, RawShape, RegionStore};

/// Polygon payload from `(lng, lat)` pairs, the way coordinates are written
/// in GeoJSON. The ring is left open; normalization closes it.
pub fn polygon(points: &[(f64, f64)]) -> RawShape {
    RawShape::Polygon {
        rings: vec![points.iter().map(|&(lng, lat)| LatLng::new(lat, lng)).collect()],
    }
}

/// Rectangle payload from `(lng, lat)` opposite corners.
pub fn rectangle(a: (f64, f64), b: (f64, f64)) -> RawShape {
    RawShape::Rectangle {
        south_west: LatLng::new(a.1, a.0),
        north_east: LatLng::new(b.1, b.0),
    }
}

pub fn circle(lng: f64, lat: f64, radius_m: f64) -> RawShape {
    RawShape::Circle {
        center: LatLng::new(lat, lng),
        radius_m,
    }
}

/// Line points from `(lng, lat)` pairs.
pub fn line(points: &[(f64, f64)]) -> Vec<LatLng> {
    points.iter().map(|&(lng, lat)| LatLng::new(lat, lng)).collect()
}

/// Stored area polygons in insertion order.
pub fn area_polygons(store: &RegionStore) -> Vec<Polygon<f64>> {
    store.area_polygons().cloned().collect()
}

/// Assert that no two stored area regions share area.
pub fn verify_pairwise_disjoint(store: &RegionStore, tolerance: f64) {
    let polys = area_polygons(store);
    for i in 0..polys.len() {
        for j in (i + 1)..polys.len() {
            let shared = polys[i].intersection(&polys[j]).unsigned_area();
            let scale = polys[i].unsigned_area().max(polys[j].unsigned_area());
            assert!(
                shared <= scale * tolerance,
                "regions {} and {} overlap by {} (scale {})",
                i,
                j,
                shared,
                scale
            );
        }
    }
}

pub fn assert_area_approx(actual: f64, expected: f64, tolerance: f64, label: &str) {
    assert!(
        (actual - expected).abs() < tolerance,
        "{}: expected area ~{}, got {} (diff={})",
        label,
        expected,
        actual,
        (actual - expected).abs()
    );
}
