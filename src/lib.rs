// region-guard: admission engine for interactively drawn map regions
// Copyright 2025 Lars Brubaker
// License: MIT

pub mod error;
pub mod export;
pub mod geom;
pub mod quota;
pub mod resolve;
pub mod shape;
pub mod store;

pub use error::RegionError;
pub use export::{feature_collection, FeatureCollection};
pub use quota::Limits;
pub use resolve::{resolve, Resolved};
pub use shape::{normalize, Category, LatLng, RawShape};
pub use store::{Region, RegionId, RegionShape, RegionStore};
