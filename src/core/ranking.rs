use crate::models::{MeasuredCandidate, RankedCity, SortBy};
use super::distance::round_tenth;

/// Order measured candidates and keep the first `limit`
///
/// Both orderings are stable: candidates with equal keys keep their input order.
/// Distances are rounded to 0.1 mile only after sorting, so ties are decided on
/// the exact values.
pub fn rank(
    mut candidates: Vec<MeasuredCandidate>,
    sort_by: SortBy,
    limit: usize,
) -> Vec<RankedCity> {
    match sort_by {
        SortBy::Distance => {
            candidates.sort_by(|a, b| a.distance_miles.total_cmp(&b.distance_miles));
        }
        SortBy::Name => {
            candidates.sort_by(|a, b| a.candidate.name.cmp(&b.candidate.name));
        }
    }

    candidates.truncate(limit);

    candidates
        .into_iter()
        .map(|measured| RankedCity {
            distance: round_tenth(measured.distance_miles),
            lat: measured.candidate.point.lat,
            lon: measured.candidate.point.lon,
            kind: measured.candidate.kind,
            name: measured.candidate.name,
        })
        .collect()
}
