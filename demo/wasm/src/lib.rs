// Copyright 2025 Lars Brubaker
// WASM bindings for region-guard

use region_guard::{feature_collection, LatLng, Limits, RawShape, RegionId, RegionStore};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn main_js() {
    console_error_panic_hook::set_once();
}

/// A region store driven by the map's draw events.
///
/// Coordinates cross the boundary as flat `[lat0, lng0, lat1, lng1, ...]`
/// arrays, the order the drawing layer reports them in. Every add returns the
/// new region id, or throws with the message to show the user.
#[wasm_bindgen]
pub struct RegionStoreJs {
    inner: RegionStore,
}

#[wasm_bindgen]
impl RegionStoreJs {
    #[wasm_bindgen(constructor)]
    pub fn new() -> RegionStoreJs {
        RegionStoreJs {
            inner: RegionStore::new(),
        }
    }

    /// Build a store with limits read from a JSON object such as `{"circle": 3}`.
    pub fn with_limits(limits_json: &str) -> Result<RegionStoreJs, JsError> {
        let limits: Limits = serde_json::from_str(limits_json)?;
        Ok(RegionStoreJs {
            inner: RegionStore::with_limits(limits),
        })
    }

    /// Add a polygon from its exterior ring.
    pub fn add_polygon(&mut self, latlngs: &[f64]) -> Result<u32, JsError> {
        self.admit(RawShape::Polygon {
            rings: vec![latlngs_from_flat(latlngs)],
        })
    }

    pub fn add_rectangle(&mut self, south: f64, west: f64, north: f64, east: f64) -> Result<u32, JsError> {
        self.admit(RawShape::Rectangle {
            south_west: LatLng::new(south, west),
            north_east: LatLng::new(north, east),
        })
    }

    /// Add a circle; `radius_m` is in metres, as the map reports it.
    pub fn add_circle(&mut self, lat: f64, lng: f64, radius_m: f64) -> Result<u32, JsError> {
        self.admit(RawShape::Circle {
            center: LatLng::new(lat, lng),
            radius_m,
        })
    }

    pub fn add_polyline(&mut self, latlngs: &[f64]) -> Result<u32, JsError> {
        self.admit(RawShape::Polyline {
            points: latlngs_from_flat(latlngs),
        })
    }

    pub fn remove(&mut self, id: u32) -> bool {
        self.inner.remove_region(RegionId(u64::from(id)))
    }

    pub fn len(&self) -> Result<u32, JsError> {
        u32::try_from(self.inner.len()).map_err(|_| JsError::new("region count does not fit in u32"))
    }

    /// Flat `[lat0, lng0, ...]` exterior ring of an area region, empty for lines.
    pub fn region_ring(&self, id: u32) -> Vec<f64> {
        self.inner
            .get(RegionId(u64::from(id)))
            .and_then(|r| r.polygon())
            .map(|p| p.exterior().0.iter().flat_map(|c| [c.y, c.x]).collect())
            .unwrap_or_default()
    }

    /// The whole store as a pretty-printed GeoJSON FeatureCollection.
    pub fn export_geojson(&self) -> Result<String, JsError> {
        Ok(serde_json::to_string_pretty(&feature_collection(&self.inner))?)
    }
}

impl RegionStoreJs {
    fn admit(&mut self, shape: RawShape) -> Result<u32, JsError> {
        let id = self.inner.add(&shape)?;
        match handle(id) {
            Some(handle) => Ok(handle),
            None => {
                self.inner.remove_region(id);
                Err(JsError::new(&format!("region id {} does not fit in u32", id)))
            }
        }
    }
}

impl Default for RegionStoreJs {
    fn default() -> Self {
        Self::new()
    }
}

fn latlngs_from_flat(values: &[f64]) -> Vec<LatLng> {
    values
        .chunks_exact(2)
        .map(|pair| LatLng::new(pair[0], pair[1]))
        .collect()
}

/// JavaScript handle for a region id, if it fits in a u32.
fn handle(id: RegionId) -> Option<u32> {
    u32::try_from(id.0).ok()
}
