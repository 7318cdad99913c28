//! Nearest-shelter ranking.

use crate::error::LocatorError;
use crate::geo::{distance_km, running_minutes, walking_minutes};
use crate::types::{Coordinates, RankedShelter, ShelterRecord};

/// Number of shelters returned when the caller does not ask for a limit.
pub const DEFAULT_RESULT_LIMIT: usize = 10;

/// Ranks every shelter in `catalog` by straight-line distance from
/// `user_location` and returns the closest `limit`.
///
/// Ties keep catalog order (the sort is stable). The catalog is never mutated
/// and every call returns a fresh list.
///
/// # Errors
///
/// - [`LocatorError::EmptyCatalog`] if `catalog` is empty.
/// - [`LocatorError::NoLocation`] if `user_location` is `None` or not a valid
///   coordinate pair.
pub fn find_nearest(
    user_location: Option<Coordinates>,
    catalog: &[ShelterRecord],
    limit: usize,
) -> Result<Vec<RankedShelter>, LocatorError> {
    if catalog.is_empty() {
        return Err(LocatorError::EmptyCatalog);
    }
    let origin = user_location
        .filter(Coordinates::is_valid)
        .ok_or(LocatorError::NoLocation)?;

    let mut by_distance: Vec<(usize, f64)> = catalog
        .iter()
        .enumerate()
        .map(|(idx, shelter)| (idx, distance_km(origin, shelter.coordinates)))
        .collect();
    by_distance.sort_by(|a, b| a.1.total_cmp(&b.1));

    let ranked = by_distance
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(pos, (idx, km))| RankedShelter {
            rank: pos + 1,
            shelter: catalog[idx].clone(),
            distance_km: km,
            walking: walking_minutes(km),
            running: running_minutes(km),
        })
        .collect();

    Ok(ranked)
}

#[cfg(test)]
#[path = "finder_test.rs"]
mod tests;
