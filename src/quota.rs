// Copyright 2025 Lars Brubaker
// Per-category admission quotas.

use serde::{Deserialize, Serialize};

use crate::error::RegionError;
use crate::shape::Category;

/// Default maximum number of regions per category.
pub const DEFAULT_LIMIT: usize = 5;

/// Maximum simultaneous region count for each category.
///
/// Rectangles and circles have their own limits and do not count towards
/// the polygon limit.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    pub polygon: usize,
    pub rectangle: usize,
    pub circle: usize,
    pub polyline: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            polygon: DEFAULT_LIMIT,
            rectangle: DEFAULT_LIMIT,
            circle: DEFAULT_LIMIT,
            polyline: DEFAULT_LIMIT,
        }
    }
}

impl Limits {
    pub fn limit(&self, category: Category) -> usize {
        match category {
            Category::Polygon => self.polygon,
            Category::Rectangle => self.rectangle,
            Category::Circle => self.circle,
            Category::Polyline => self.polyline,
        }
    }

    pub fn set_limit(&mut self, category: Category, limit: usize) {
        match category {
            Category::Polygon => self.polygon = limit,
            Category::Rectangle => self.rectangle = limit,
            Category::Circle => self.circle = limit,
            Category::Polyline => self.polyline = limit,
        }
    }

    pub fn with_limit(mut self, category: Category, limit: usize) -> Self {
        self.set_limit(category, limit);
        self
    }
}

/// Refuse admission once `current` regions of `category` already exist.
pub fn check(category: Category, current: usize, limit: usize) -> Result<(), RegionError> {
    if current >= limit {
        return Err(RegionError::QuotaExceeded { category, limit });
    }
    Ok(())
}
