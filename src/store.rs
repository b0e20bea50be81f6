// Copyright 2025 Lars Brubaker
//
// The authoritative, insertion-ordered set of admitted regions.
//
// Every mutation is validate-then-commit: quota, normalization and conflict
// resolution all run against a shared borrow of the current regions, and the
// store is only touched once the final geometry is known.

use std::fmt;

use geo::{LineString, Polygon};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::RegionError;
use crate::geom::Real;
use crate::quota::{self, Limits};
use crate::resolve::resolve;
use crate::shape::{self, Category, LatLng, RawShape};

/// Identifier assigned at admission. Never reused within a store.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionId(pub u64);

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stored geometry of a region.
#[derive(Clone, Debug, PartialEq)]
pub enum RegionShape {
    Area(Polygon<Real>),
    Line(LineString<Real>),
}

/// An admitted region. Regions are immutable once stored.
#[derive(Clone, Debug, PartialEq)]
pub struct Region {
    id: RegionId,
    category: Category,
    shape: RegionShape,
}

impl Region {
    pub fn id(&self) -> RegionId {
        self.id
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn shape(&self) -> &RegionShape {
        &self.shape
    }

    /// The polygon of an area region.
    pub fn polygon(&self) -> Option<&Polygon<Real>> {
        match &self.shape {
            RegionShape::Area(p) => Some(p),
            RegionShape::Line(_) => None,
        }
    }

    /// The line string of a polyline region.
    pub fn line(&self) -> Option<&LineString<Real>> {
        match &self.shape {
            RegionShape::Line(l) => Some(l),
            RegionShape::Area(_) => None,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct RegionStore {
    regions: Vec<Region>,
    next_id: u64,
    limits: Limits,
}

impl RegionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(limits: Limits) -> Self {
        RegionStore {
            limits,
            ..Self::default()
        }
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Admit a drawn shape of any category.
    pub fn add(&mut self, shape: &RawShape) -> Result<RegionId, RegionError> {
        match shape {
            RawShape::Polyline { points } => self.add_line_region(points),
            _ => self.add_area_region(shape),
        }
    }

    /// Admit a polygon, rectangle or circle.
    ///
    /// The shape is checked against its category quota, normalized, and
    /// resolved against the stored area regions in insertion order. On success
    /// exactly one region holding the (possibly trimmed) polygon is appended.
    /// On error the store is unchanged.
    pub fn add_area_region(&mut self, shape: &RawShape) -> Result<RegionId, RegionError> {
        let category = shape.category();
        if !category.is_area() {
            return Err(RegionError::NotAnArea(category));
        }
        quota::check(category, self.count(category), self.limits.limit(category))?;
        shape.check()?;

        let candidate = shape::normalize(shape).ok_or(RegionError::NotAnArea(category))?;
        let resolved = resolve(candidate, self.area_polygons())?;

        let id = self.push(category, RegionShape::Area(resolved.polygon));
        info!(%id, %category, trimmed = resolved.trimmed, "admitted area region");
        Ok(id)
    }

    /// Admit a polyline. Lines are only subject to their quota.
    pub fn add_line_region(&mut self, points: &[LatLng]) -> Result<RegionId, RegionError> {
        let category = Category::Polyline;
        quota::check(category, self.count(category), self.limits.limit(category))?;

        if points.len() < 2 {
            return Err(RegionError::geometry(format!(
                "line has {} points",
                points.len()
            )));
        }
        if !points.iter().all(|p| p.lat.is_finite() && p.lng.is_finite()) {
            return Err(RegionError::geometry("non-finite coordinate"));
        }

        let id = self.push(category, RegionShape::Line(shape::line_string(points)));
        info!(%id, "admitted line region");
        Ok(id)
    }

    /// Remove a region. Returns false if `id` is not stored.
    pub fn remove_region(&mut self, id: RegionId) -> bool {
        match self.regions.iter().position(|r| r.id == id) {
            Some(index) => {
                self.regions.remove(index);
                info!(%id, "removed region");
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        debug!(count = self.regions.len(), "clearing regions");
        self.regions.clear();
    }

    /// Regions in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Region> {
        self.regions.iter()
    }

    pub fn get(&self, id: RegionId) -> Option<&Region> {
        self.regions.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Number of stored regions of exactly `category`.
    pub fn count(&self, category: Category) -> usize {
        self.regions.iter().filter(|r| r.category == category).count()
    }

    /// Polygons of all area regions, in insertion order.
    pub fn area_polygons(&self) -> impl Iterator<Item = &Polygon<Real>> + '_ {
        self.regions.iter().filter_map(Region::polygon)
    }

    fn push(&mut self, category: Category, shape: RegionShape) -> RegionId {
        let id = RegionId(self.next_id);
        self.next_id += 1;
        self.regions.push(Region { id, category, shape });
        id
    }
}

impl<'a> IntoIterator for &'a RegionStore {
    type Item = &'a Region;
    type IntoIter = std::slice::Iter<'a, Region>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
