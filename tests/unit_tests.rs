// Unit tests for City Scout

use city_scout::core::{
    distance::{distance_miles, calculate_bounding_box, EARTH_RADIUS_MILES},
    filters::{filter_candidates, merge_unique},
    ranking::rank,
    comparison::{compare_cities, percent_change, Trend},
};
use city_scout::models::{BoundingBox, CityMetrics, GeoPoint, MeasuredCandidate, PlaceCandidate, PlaceKind, SortBy};
use std::collections::HashSet;

fn origin() -> GeoPoint {
    GeoPoint::new(35.994, -78.8986) // Durham, NC
}

fn default_kinds() -> HashSet<PlaceKind> {
    [PlaceKind::City, PlaceKind::Town, PlaceKind::Village].into_iter().collect()
}

/// Candidate due north of the origin at roughly `miles` away
fn candidate_at(name: &str, miles: f64) -> PlaceCandidate {
    let dlat = (miles / EARTH_RADIUS_MILES).to_degrees();
    PlaceCandidate::new(name, origin().lat + dlat, origin().lon, PlaceKind::City)
}

fn inside(bbox: &BoundingBox, point: GeoPoint) -> bool {
    (bbox.min_lat..=bbox.max_lat).contains(&point.lat) && (bbox.min_lon..=bbox.max_lon).contains(&point.lon)
}

fn measured(name: &str, distance: f64) -> MeasuredCandidate {
    MeasuredCandidate {
        candidate: PlaceCandidate::new(name, 0.0, 0.0, PlaceKind::Town),
        distance_miles: distance,
    }
}

fn metrics(name: &str, salary: f64, rent: f64, col: f64, home: f64) -> CityMetrics {
    CityMetrics {
        name: name.to_string(),
        average_salary: salary,
        average_rent: rent,
        cost_of_living: col,
        home_price: home,
        state: None,
        description: None,
        transit_score: None,
        restaurant_price: None,
        sunny_days: None,
    }
}

#[test]
fn test_distance_to_self_is_zero() {
    let points = [
        GeoPoint::new(40.7128, -74.0060),
        GeoPoint::new(-33.8688, 151.2093),
        GeoPoint::new(90.0, 0.0),
        GeoPoint::new(0.0, -180.0),
    ];

    for point in points {
        assert_eq!(distance_miles(point, point), 0.0);
    }
}

#[test]
fn test_distance_is_symmetric() {
    let a = GeoPoint::new(47.6062, -122.3321);
    let b = GeoPoint::new(25.7617, -80.1918);

    assert_eq!(distance_miles(a, b), distance_miles(b, a));
}

#[test]
fn test_distance_new_york_to_los_angeles() {
    let new_york = GeoPoint::new(40.7128, -74.0060);
    let los_angeles = GeoPoint::new(34.0522, -118.2437);

    let distance = distance_miles(new_york, los_angeles);
    assert!((distance - 2445.0).abs() <= 5.0, "got {}", distance);
}

#[test]
fn test_distance_grows_with_separation() {
    let near = distance_miles(origin(), candidate_at("near", 10.0).point);
    let far = distance_miles(origin(), candidate_at("far", 100.0).point);

    assert!(near < far);
}

#[test]
fn test_bounding_box_contains_circle() {
    let bbox = calculate_bounding_box(origin(), 150.0);

    assert!(inside(&bbox, origin()));
    assert!(inside(&bbox, candidate_at("edge", 149.0).point));
    assert!(!inside(&bbox, candidate_at("outside", 160.0).point));
}

#[test]
fn test_filter_distance_window() {
    let candidates = vec![
        candidate_at("Too Close", 0.3),
        candidate_at("Just Right", 10.0),
        candidate_at("Too Far", 151.0),
    ];

    let kept = filter_candidates(origin(), &candidates, 0.5, 150.0, &default_kinds());

    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].candidate.name, "Just Right");
}

#[test]
fn test_filter_excludes_origin_itself() {
    let candidates = vec![PlaceCandidate::new("Durham", 35.994, -78.8986, PlaceKind::City)];

    let kept = filter_candidates(origin(), &candidates, 0.5, 150.0, &default_kinds());

    assert!(kept.is_empty());
}

#[test]
fn test_filter_respects_allowed_kinds() {
    let mut hamlet = candidate_at("Hamlet", 20.0);
    hamlet.kind = PlaceKind::Other;
    let candidates = vec![hamlet, candidate_at("Town", 25.0)];

    let kept = filter_candidates(origin(), &candidates, 0.5, 150.0, &default_kinds());

    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].candidate.name, "Town");
}

#[test]
fn test_filter_drops_bad_coordinates() {
    let candidates = vec![
        PlaceCandidate::new("Nowhere", f64::NAN, -78.0, PlaceKind::City),
        PlaceCandidate::new("Off The Map", 95.0, -78.0, PlaceKind::City),
        candidate_at("Somewhere", 30.0),
    ];

    let kept = filter_candidates(origin(), &candidates, 0.5, 150.0, &default_kinds());

    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].candidate.name, "Somewhere");
}

#[test]
fn test_merge_unique_skips_repeats() {
    let primary = vec![measured("Cary", 22.41)];
    let extra = vec![measured("Cary", 22.38), measured("Greensboro", 49.7)];

    let merged = merge_unique(primary, extra);

    assert_eq!(merged.len(), 2);
    assert_eq!(merged[0].distance_miles, 22.41);
    assert_eq!(merged[1].candidate.name, "Greensboro");
}

#[test]
fn test_rank_is_stable_for_ties() {
    let input = vec![
        measured("A", 12.0),
        measured("B", 3.5),
        measured("C", 3.5),
        measured("D", 40.0),
    ];

    let ranked = rank(input, SortBy::Distance, 10);
    let names: Vec<&str> = ranked.iter().map(|c| c.name.as_str()).collect();

    assert_eq!(names, vec!["B", "C", "A", "D"]);
}

#[test]
fn test_rank_limit_keeps_smallest() {
    let distances = [80.0, 5.0, 33.3, 1.2, 60.0, 14.0, 99.9, 7.5];
    let input: Vec<MeasuredCandidate> = distances
        .iter()
        .enumerate()
        .map(|(i, d)| measured(&format!("City {}", i), *d))
        .collect();

    let ranked = rank(input, SortBy::Distance, 5);
    let kept: Vec<f64> = ranked.iter().map(|c| c.distance).collect();

    assert_eq!(kept, vec![1.2, 5.0, 7.5, 14.0, 33.3]);
}

#[test]
fn test_rank_by_name() {
    let input = vec![measured("Raleigh", 22.0), measured("Apex", 18.0), measured("Cary", 20.0)];

    let ranked = rank(input, SortBy::Name, 5);
    let names: Vec<&str> = ranked.iter().map(|c| c.name.as_str()).collect();

    assert_eq!(names, vec!["Apex", "Cary", "Raleigh"]);
}

#[test]
fn test_rank_by_name_limit_keeps_first_names() {
    let names = ["Wake Forest", "Apex", "Raleigh", "Durham", "Cary", "Zebulon", "Garner", "Benson"];
    let input: Vec<MeasuredCandidate> = names
        .iter()
        .enumerate()
        .map(|(i, name)| measured(name, 10.0 + i as f64))
        .collect();

    let ranked = rank(input, SortBy::Name, 5);
    let kept: Vec<&str> = ranked.iter().map(|c| c.name.as_str()).collect();

    assert_eq!(kept, vec!["Apex", "Benson", "Cary", "Durham", "Garner"]);
}

#[test]
fn test_rank_empty_input() {
    assert!(rank(Vec::new(), SortBy::Distance, 5).is_empty());
    assert!(rank(Vec::new(), SortBy::Name, 0).is_empty());
    assert!(filter_candidates(origin(), &[], 0.5, 150.0, &default_kinds()).is_empty());
}

#[test]
fn test_percent_change_rounding() {
    assert_eq!(percent_change(3000.0, 3500.0), Some(-14.3));
    assert_eq!(percent_change(100.0, 0.0), None);
}

#[test]
fn test_comparison_trends_follow_polarity() {
    let baseline = metrics("New York", 85000.0, 3500.0, 4000.0, 750000.0);
    let boston = metrics("Boston", 82000.0, 3000.0, 3800.0, 700000.0);

    let cards = compare_cities(&baseline, &[(boston, Some(190.2))]);

    assert_eq!(cards.len(), 2);
    assert!(cards[0].is_baseline);

    let boston_card = &cards[1];
    assert_eq!(boston_card.distance, Some(190.2));
    for delta in &boston_card.metrics {
        let expected = if delta.higher_is_better {
            Trend::Unfavorable
        } else {
            Trend::Favorable
        };
        assert_eq!(delta.trend, expected, "{}", delta.label);
    }
}
