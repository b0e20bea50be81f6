// Copyright 2025 Lars Brubaker
// Rejection taxonomy for region admission.

use thiserror::Error;

use crate::shape::Category;

/// Why a drawn shape was not admitted to a [`RegionStore`](crate::RegionStore).
///
/// Every variant is scoped to a single admission attempt. The store is left
/// untouched whenever one of these is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegionError {
    /// The category already holds its maximum number of regions.
    #[error("Maximum {limit} {category}s allowed")]
    QuotaExceeded { category: Category, limit: usize },

    /// The candidate contains, or lies inside, an existing area region.
    #[error("Polygon inside another polygon is not allowed")]
    FullyContained,

    /// Trimming removed the whole candidate.
    #[error("Polygon is entirely covered by existing polygons")]
    FullyConsumed,

    /// Input was degenerate or the boolean geometry step failed.
    #[error("Geometry operation failed: {detail}")]
    GeometryOperationFailed { detail: String },

    /// A line payload was submitted where an area shape is required.
    #[error("A {0} is not an area shape")]
    NotAnArea(Category),
}

impl RegionError {
    pub(crate) fn geometry(detail: impl Into<String>) -> Self {
        RegionError::GeometryOperationFailed {
            detail: detail.into(),
        }
    }
}
