use serde::{Deserialize, Serialize};
use crate::models::{CityMetrics, Metric};
use super::catalog::normalize_city_name;
use super::distance::round_tenth;

/// Direction of a metric change relative to the baseline city
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Favorable,
    Unfavorable,
    Neutral,
}

/// One metric of one city, compared with the baseline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricDelta {
    pub metric: Metric,
    pub label: String,
    pub value: f64,
    pub baseline: f64,
    /// `None` for the baseline city itself or when the baseline value is zero
    pub percent_change: Option<f64>,
    pub trend: Trend,
    pub higher_is_better: bool,
}

/// Comparison card for one city
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityComparison {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    pub is_baseline: bool,
    pub metrics: Vec<MetricDelta>,
}

/// Percentage change of `current` relative to `baseline`, one decimal place
///
/// Returns `None` when the baseline is zero or either value is not finite.
pub fn percent_change(current: f64, baseline: f64) -> Option<f64> {
    if !current.is_finite() || !baseline.is_finite() || baseline == 0.0 {
        return None;
    }
    Some(round_tenth((current - baseline) / baseline * 100.0))
}

/// Classify a change given whether the metric improves as it grows
#[inline]
pub fn trend(percent_change: Option<f64>, higher_is_better: bool) -> Trend {
    match percent_change {
        Some(change) if change > 0.0 => {
            if higher_is_better { Trend::Favorable } else { Trend::Unfavorable }
        }
        Some(change) if change < 0.0 => {
            if higher_is_better { Trend::Unfavorable } else { Trend::Favorable }
        }
        _ => Trend::Neutral,
    }
}

/// Build the comparison card for `city` against `baseline`
///
/// A city whose normalized name matches the baseline gets values only, no deltas.
pub fn compare_city(city: &CityMetrics, baseline: &CityMetrics, distance: Option<f64>) -> CityComparison {
    let is_baseline = normalize_city_name(&city.name) == normalize_city_name(&baseline.name);

    let metrics = Metric::ALL
        .iter()
        .map(|&metric| {
            let value = metric.value(city);
            let base = metric.value(baseline);
            let change = if is_baseline { None } else { percent_change(value, base) };

            MetricDelta {
                metric,
                label: metric.label().to_string(),
                value,
                baseline: base,
                percent_change: change,
                trend: trend(change, metric.higher_is_better()),
                higher_is_better: metric.higher_is_better(),
            }
        })
        .collect();

    CityComparison {
        name: city.name.clone(),
        distance,
        is_baseline,
        metrics,
    }
}

/// Baseline card first, then one card per other city in input order
pub fn compare_cities(
    baseline: &CityMetrics,
    others: &[(CityMetrics, Option<f64>)],
) -> Vec<CityComparison> {
    let baseline_name = normalize_city_name(&baseline.name);

    std::iter::once(compare_city(baseline, baseline, None))
        .chain(
            others
                .iter()
                .filter(|(city, _)| normalize_city_name(&city.name) != baseline_name)
                .map(|(city, distance)| compare_city(city, baseline, *distance)),
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn city(name: &str, salary: f64, rent: f64, col: f64, home: f64) -> CityMetrics {
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
    fn test_percent_change() {
        assert_eq!(percent_change(95000.0, 85000.0), Some(11.8));
        assert_eq!(percent_change(2000.0, 3500.0), Some(-42.9));
        assert_eq!(percent_change(100.0, 100.0), Some(0.0));
        assert_eq!(percent_change(100.0, 0.0), None);
        assert_eq!(percent_change(f64::NAN, 10.0), None);
    }

    #[test]
    fn test_trend_polarity() {
        assert_eq!(trend(Some(5.0), true), Trend::Favorable);
        assert_eq!(trend(Some(-5.0), true), Trend::Unfavorable);
        assert_eq!(trend(Some(5.0), false), Trend::Unfavorable);
        assert_eq!(trend(Some(-5.0), false), Trend::Favorable);
        assert_eq!(trend(Some(0.0), false), Trend::Neutral);
        assert_eq!(trend(None, true), Trend::Neutral);
    }

    #[test]
    fn test_compare_cities() {
        let new_york = city("New York", 85000.0, 3500.0, 4000.0, 750000.0);
        let chicago = city("Chicago", 65000.0, 2000.0, 2800.0, 350000.0);

        let cards = compare_cities(
            &new_york,
            &[(chicago, Some(711.3)), (new_york.clone(), None)],
        );

        assert_eq!(cards.len(), 2);
        assert!(cards[0].is_baseline);
        assert!(cards[0].metrics.iter().all(|m| m.percent_change.is_none()));

        let chicago_card = &cards[1];
        assert_eq!(chicago_card.distance, Some(711.3));
        let salary = &chicago_card.metrics[0];
        assert_eq!(salary.metric, Metric::AverageSalary);
        assert_eq!(salary.percent_change, Some(-23.5));
        assert_eq!(salary.trend, Trend::Unfavorable);
        let rent = &chicago_card.metrics[1];
        assert_eq!(rent.percent_change, Some(-42.9));
        assert_eq!(rent.trend, Trend::Favorable);
    }

    #[test]
    fn test_baseline_echo_with_different_spelling() {
        let new_york = city("New York", 85000.0, 3500.0, 4000.0, 750000.0);
        let echoed = city("new york", 85000.0, 3500.0, 4000.0, 750000.0);
        let boston = city("Boston", 82000.0, 3000.0, 3800.0, 700000.0);

        let cards = compare_cities(
            &new_york,
            &[(echoed.clone(), Some(0.0)), (boston, Some(190.2))],
        );

        let names: Vec<_> = cards.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["New York", "Boston"]);
        assert_eq!(cards.iter().filter(|c| c.is_baseline).count(), 1);

        let card = compare_city(&echoed, &new_york, None);
        assert!(card.is_baseline);
        assert!(card.metrics.iter().all(|m| m.percent_change.is_none()));
    }
}
