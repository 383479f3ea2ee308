use std::collections::HashSet;
use crate::models::{GeoPoint, MeasuredCandidate, PlaceCandidate, PlaceKind};
use super::distance::{distance_miles, round_tenth};

/// Keep candidates of an allowed kind whose distance from `origin` lies in
/// `(min_miles, max_miles]`
///
/// The exclusive lower bound drops the origin city itself and exact duplicates
/// of it. Candidates with unusable coordinates are dropped, not reported.
/// Input order is preserved.
pub fn filter_candidates(
    origin: GeoPoint,
    candidates: &[PlaceCandidate],
    min_miles: f64,
    max_miles: f64,
    allowed_kinds: &HashSet<PlaceKind>,
) -> Vec<MeasuredCandidate> {
    candidates
        .iter()
        .filter(|candidate| {
            if !candidate.point.is_valid() {
                tracing::warn!(
                    "Dropping candidate {:?} with invalid coordinates ({}, {})",
                    candidate.name,
                    candidate.point.lat,
                    candidate.point.lon
                );
                return false;
            }
            allowed_kinds.contains(&candidate.kind)
        })
        .filter_map(|candidate| {
            let distance = distance_miles(origin, candidate.point);
            if distance > min_miles && distance <= max_miles {
                Some(MeasuredCandidate {
                    candidate: candidate.clone(),
                    distance_miles: distance,
                })
            } else {
                None
            }
        })
        .collect()
}

/// Append `extra` to `primary`, skipping entries whose (name, rounded distance)
/// already appears
///
/// Used to merge the results of a widened search into the original ones.
/// Two distinct places with the same name and rounded distance collapse into one.
pub fn merge_unique(
    primary: Vec<MeasuredCandidate>,
    extra: Vec<MeasuredCandidate>,
) -> Vec<MeasuredCandidate> {
    let mut seen: HashSet<(String, i64)> = primary.iter().map(dedup_key).collect();
    let mut merged = primary;

    for candidate in extra {
        if seen.insert(dedup_key(&candidate)) {
            merged.push(candidate);
        }
    }

    merged
}

fn dedup_key(candidate: &MeasuredCandidate) -> (String, i64) {
    let tenths = (round_tenth(candidate.distance_miles) * 10.0).round() as i64;
    (candidate.candidate.name.clone(), tenths)
}
