use std::collections::HashSet;
use chrono::{DateTime, Utc};
use uuid::Uuid;
use crate::models::{GeoPoint, MeasuredCandidate, PlaceCandidate, PlaceKind, RankedCity, SortBy};
use crate::core::{
    filters::{filter_candidates, merge_unique},
    ranking::rank,
};

/// Effective parameters of one nearby-city search
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOptions {
    pub min_miles: f64,
    pub max_miles: f64,
    pub allowed_kinds: HashSet<PlaceKind>,
    pub sort_by: SortBy,
    pub limit: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            min_miles: 0.5,
            max_miles: 150.0,
            allowed_kinds: [PlaceKind::City, PlaceKind::Town, PlaceKind::Village]
                .into_iter()
                .collect(),
            sort_by: SortBy::Distance,
            limit: 5,
        }
    }
}

/// Upper bounds applied to caller overrides, plus the widening policy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchLimits {
    pub max_allowed_miles: f64,
    pub max_limit: usize,
    pub min_results: usize,
    pub widen_fallback: bool,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            max_allowed_miles: 200.0,
            max_limit: 10,
            min_results: 5,
            widen_fallback: true,
        }
    }
}

/// Per-request overrides of the configured defaults
#[derive(Debug, Clone, Default)]
pub struct SearchOverrides {
    pub radius_miles: Option<f64>,
    pub min_miles: Option<f64>,
    pub kinds: Option<Vec<PlaceKind>>,
    pub sort_by: Option<SortBy>,
    pub limit: Option<usize>,
}

/// Result of one nearby-city search
#[derive(Debug, Clone, PartialEq)]
pub struct NearbyResult {
    pub cities: Vec<RankedCity>,
    pub total_candidates: usize,
    pub widened: bool,
}

/// Nearby-city pipeline: distance filter, optional widening, ranking
///
/// # Pipeline Stages
/// 1. Drop candidates of disallowed kinds or with unusable coordinates
/// 2. Keep candidates within `(min_miles, max_miles]` of the origin
/// 3. If too few survive, retry with the maximum radius and merge
/// 4. Sort and truncate
#[derive(Debug, Clone)]
pub struct NearbySearch {
    defaults: SearchOptions,
    limits: SearchLimits,
}

impl NearbySearch {
    pub fn new(defaults: SearchOptions, limits: SearchLimits) -> Self {
        Self { defaults, limits }
    }

    pub fn with_defaults() -> Self {
        Self {
            defaults: SearchOptions::default(),
            limits: SearchLimits::default(),
        }
    }

    pub fn defaults(&self) -> &SearchOptions {
        &self.defaults
    }

    pub fn limits(&self) -> &SearchLimits {
        &self.limits
    }

    /// Merge caller overrides into the defaults, clamping radius and limit
    pub fn resolve(&self, overrides: &SearchOverrides) -> SearchOptions {
        let max_miles = overrides
            .radius_miles
            .filter(|r| r.is_finite() && *r > 0.0)
            .unwrap_or(self.defaults.max_miles)
            .min(self.limits.max_allowed_miles);

        let min_miles = overrides
            .min_miles
            .filter(|m| m.is_finite())
            .unwrap_or(self.defaults.min_miles)
            .max(0.0);

        let allowed_kinds = match &overrides.kinds {
            Some(kinds) => kinds.iter().copied().collect(),
            None => self.defaults.allowed_kinds.clone(),
        };

        let limit = overrides
            .limit
            .unwrap_or(self.defaults.limit)
            .min(self.limits.max_limit);

        SearchOptions {
            min_miles,
            max_miles,
            allowed_kinds,
            sort_by: overrides.sort_by.unwrap_or(self.defaults.sort_by),
            limit,
        }
    }

    /// Stages 1-2: measure and filter candidates
    pub fn collect(
        &self,
        origin: GeoPoint,
        candidates: &[PlaceCandidate],
        options: &SearchOptions,
    ) -> Vec<MeasuredCandidate> {
        filter_candidates(
            origin,
            candidates,
            options.min_miles,
            options.max_miles,
            &options.allowed_kinds,
        )
    }

    /// Stage 3: options for a widened retry, if one is warranted
    ///
    /// Widening only happens when enabled, when fewer than
    /// `min(min_results, limit)` candidates qualified, and when the radius is
    /// still below the allowed maximum.
    pub fn widened(&self, options: &SearchOptions, found: usize) -> Option<SearchOptions> {
        let wanted = self.limits.min_results.min(options.limit);

        if !self.limits.widen_fallback
            || found >= wanted
            || options.max_miles >= self.limits.max_allowed_miles
        {
            return None;
        }

        Some(SearchOptions {
            max_miles: self.limits.max_allowed_miles,
            ..options.clone()
        })
    }

    /// Stage 4: sort and truncate
    pub fn finish(&self, measured: Vec<MeasuredCandidate>, options: &SearchOptions) -> Vec<RankedCity> {
        rank(measured, options.sort_by, options.limit)
    }

    /// Run the full pipeline over an in-memory candidate list
    ///
    /// Widening re-filters the same list with the larger radius.
    pub fn find_nearby(
        &self,
        origin: GeoPoint,
        candidates: &[PlaceCandidate],
        options: &SearchOptions,
    ) -> NearbyResult {
        let mut measured = self.collect(origin, candidates, options);
        let mut widened = false;

        if let Some(wider) = self.widened(options, measured.len()) {
            tracing::debug!(
                "Only {} cities within {} mi, widening to {} mi",
                measured.len(),
                options.max_miles,
                wider.max_miles
            );
            let extra = self.collect(origin, candidates, &wider);
            measured = merge_unique(measured, extra);
            widened = true;
        }

        tracing::debug!(
            "{} of {} candidates qualified around ({}, {})",
            measured.len(),
            candidates.len(),
            origin.lat,
            origin.lon
        );

        NearbyResult {
            cities: self.finish(measured, options),
            total_candidates: candidates.len(),
            widened,
        }
    }
}

impl Default for NearbySearch {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// One user search: origin, raw candidates, options and ranked result
///
/// Sessions are never mutated; a new search or a re-sort produces a new session.
#[derive(Debug, Clone)]
pub struct SearchSession {
    id: Uuid,
    origin: GeoPoint,
    candidates: Vec<PlaceCandidate>,
    options: SearchOptions,
    result: NearbyResult,
    created_at: DateTime<Utc>,
}

impl SearchSession {
    /// Run a search over `candidates` and capture it as a session
    pub fn start(
        search: &NearbySearch,
        origin: GeoPoint,
        candidates: Vec<PlaceCandidate>,
        options: SearchOptions,
    ) -> Self {
        let result = search.find_nearby(origin, &candidates, &options);
        Self::from_result(origin, candidates, options, result)
    }

    /// Capture a search whose pipeline already ran elsewhere
    pub fn from_result(
        origin: GeoPoint,
        candidates: Vec<PlaceCandidate>,
        options: SearchOptions,
        result: NearbyResult,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            origin,
            candidates,
            options,
            result,
            created_at: Utc::now(),
        }
    }

    /// Re-run over the same origin and candidates with different options
    pub fn refine(&self, search: &NearbySearch, options: SearchOptions) -> Self {
        Self::start(search, self.origin, self.candidates.clone(), options)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn origin(&self) -> GeoPoint {
        self.origin
    }

    pub fn candidates(&self) -> &[PlaceCandidate] {
        &self.candidates
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    pub fn cities(&self) -> &[RankedCity] {
        &self.result.cities
    }

    pub fn result(&self) -> &NearbyResult {
        &self.result
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
