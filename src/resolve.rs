// Copyright 2025 Lars Brubaker
//
// Conflict resolution for a candidate area polygon against the polygons
// already admitted.
//
// Existing polygons are visited strictly in insertion order and the candidate
// is trimmed progressively: the k-th subtraction sees the result of the
// (k-1)-th. With three or more mutually overlapping regions a different order
// could give a different shape, so replaying the same sequence of additions
// must always visit them in the same order.

use geo::Polygon;
use tracing::debug;

use crate::error::RegionError;
use crate::geom::{self, Real};

/// A candidate that passed conflict resolution.
#[derive(Clone, Debug, PartialEq)]
pub struct Resolved {
    /// Final geometry to store.
    pub polygon: Polygon<Real>,
    /// True if at least one existing polygon cut into the candidate.
    pub trimmed: bool,
}

/// Decide whether `candidate` may be admitted alongside `existing`.
///
/// Returns the polygon to store, which is `candidate` itself or what remains
/// of it after subtracting every overlapping existing polygon. Rejects with
/// [`RegionError::FullyContained`] as soon as containment in either direction
/// is found, and with [`RegionError::FullyConsumed`] if trimming leaves
/// nothing.
pub fn resolve<'a, I>(candidate: Polygon<Real>, existing: I) -> Result<Resolved, RegionError>
where
    I: IntoIterator<Item = &'a Polygon<Real>>,
{
    geom::validate(&candidate)?;

    let mut result = candidate;
    let mut trimmed = false;

    for (index, other) in existing.into_iter().enumerate() {
        if geom::either_contains(&result, other) {
            debug!(index, "candidate and existing polygon contain one another");
            return Err(RegionError::FullyContained);
        }
        if !geom::intersects(&result, other) {
            continue;
        }

        let diff = geom::difference(&result, other)?;
        let parts = diff.0.len();
        let remnant = geom::largest_part(diff).ok_or(RegionError::FullyConsumed)?;

        // Boundary contact only: keep the candidate's own vertices.
        if parts == 1 && geom::same_area(&remnant, &result) {
            debug!(index, "candidate only touches existing polygon");
            continue;
        }
        debug!(index, parts, "trimmed candidate against existing polygon");

        result = remnant;
        trimmed = true;
    }

    Ok(Resolved {
        polygon: result,
        trimmed,
    })
}
