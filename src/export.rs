// Copyright 2025 Lars Brubaker
// GeoJSON-shaped view of a region store, ready for any serde serializer.

use geo::{LineString, Polygon};
use serde::Serialize;

use crate::geom::Real;
use crate::shape::Category;
use crate::store::{Region, RegionId, RegionShape, RegionStore};

/// A `[longitude, latitude]` position.
pub type Position = [Real; 2];

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct Feature {
    pub geometry: Geometry,
    pub properties: Properties,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Polygon { coordinates: Vec<Vec<Position>> },
    LineString { coordinates: Vec<Position> },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Properties {
    pub id: RegionId,
    pub category: Category,
}

/// One feature per stored region, in insertion order.
pub fn feature_collection(store: &RegionStore) -> FeatureCollection {
    FeatureCollection {
        features: store.iter().map(Feature::from).collect(),
    }
}

impl From<&Region> for Feature {
    fn from(region: &Region) -> Self {
        let geometry = match region.shape() {
            RegionShape::Area(polygon) => Geometry::Polygon {
                coordinates: polygon_positions(polygon),
            },
            RegionShape::Line(line) => Geometry::LineString {
                coordinates: positions(line),
            },
        };
        Feature {
            geometry,
            properties: Properties {
                id: region.id(),
                category: region.category(),
            },
        }
    }
}

fn positions(ring: &LineString<Real>) -> Vec<Position> {
    ring.0.iter().map(|c| [c.x, c.y]).collect()
}

fn polygon_positions(polygon: &Polygon<Real>) -> Vec<Vec<Position>> {
    std::iter::once(polygon.exterior())
        .chain(polygon.interiors())
        .map(positions)
        .collect()
}
