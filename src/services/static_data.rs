use crate::core::catalog::normalize_city_name;
use crate::models::CityMetrics;

/// Built-in cost-of-living figures used when no comparison backend is configured
#[derive(Debug, Clone)]
pub struct StaticDataset {
    cities: Vec<CityMetrics>,
}

struct BuiltinCity {
    name: &'static str,
    state: &'static str,
    salary: f64,
    rent: f64,
    cost_of_living: f64,
    home_price: f64,
    transit_score: u8,
    restaurant_price: u8,
    sunny_days: u16,
    tagline: &'static str,
}

const BUILTIN: &[BuiltinCity] = &[
    BuiltinCity { name: "New York", state: "NY", salary: 85000.0, rent: 3500.0, cost_of_living: 4000.0, home_price: 750000.0, transit_score: 89, restaurant_price: 4, sunny_days: 224, tagline: "The city that never sleeps" },
    BuiltinCity { name: "San Francisco", state: "CA", salary: 95000.0, rent: 3800.0, cost_of_living: 4200.0, home_price: 1200000.0, transit_score: 80, restaurant_price: 4, sunny_days: 259, tagline: "Tech hub by the bay" },
    BuiltinCity { name: "Chicago", state: "IL", salary: 65000.0, rent: 2000.0, cost_of_living: 2800.0, home_price: 350000.0, transit_score: 65, restaurant_price: 3, sunny_days: 189, tagline: "The Windy City" },
    BuiltinCity { name: "Austin", state: "TX", salary: 75000.0, rent: 1800.0, cost_of_living: 2600.0, home_price: 450000.0, transit_score: 42, restaurant_price: 3, sunny_days: 228, tagline: "Keep Austin Weird" },
    BuiltinCity { name: "Miami", state: "FL", salary: 70000.0, rent: 2200.0, cost_of_living: 3000.0, home_price: 500000.0, transit_score: 58, restaurant_price: 3, sunny_days: 248, tagline: "Magic City" },
    BuiltinCity { name: "Seattle", state: "WA", salary: 88000.0, rent: 2800.0, cost_of_living: 3600.0, home_price: 820000.0, transit_score: 73, restaurant_price: 3, sunny_days: 152, tagline: "Emerald City" },
    BuiltinCity { name: "Boston", state: "MA", salary: 82000.0, rent: 3000.0, cost_of_living: 3800.0, home_price: 700000.0, transit_score: 72, restaurant_price: 4, sunny_days: 200, tagline: "The Hub" },
    BuiltinCity { name: "Denver", state: "CO", salary: 72000.0, rent: 2100.0, cost_of_living: 2900.0, home_price: 580000.0, transit_score: 60, restaurant_price: 3, sunny_days: 300, tagline: "Mile High City" },
    BuiltinCity { name: "Portland", state: "OR", salary: 70000.0, rent: 2000.0, cost_of_living: 2800.0, home_price: 520000.0, transit_score: 65, restaurant_price: 3, sunny_days: 144, tagline: "Rose City" },
    BuiltinCity { name: "Nashville", state: "TN", salary: 65000.0, rent: 1900.0, cost_of_living: 2500.0, home_price: 420000.0, transit_score: 45, restaurant_price: 3, sunny_days: 208, tagline: "Music City" },
];

impl StaticDataset {
    pub fn new(cities: Vec<CityMetrics>) -> Self {
        Self { cities }
    }

    pub fn builtin() -> Self {
        let cities = BUILTIN
            .iter()
            .map(|city| CityMetrics {
                name: city.name.to_string(),
                average_salary: city.salary,
                average_rent: city.rent,
                cost_of_living: city.cost_of_living,
                home_price: city.home_price,
                state: Some(city.state.to_string()),
                description: Some(city.tagline.to_string()),
                transit_score: Some(city.transit_score),
                restaurant_price: Some(city.restaurant_price),
                sunny_days: Some(city.sunny_days),
            })
            .collect();

        Self { cities }
    }

    pub fn all(&self) -> &[CityMetrics] {
        &self.cities
    }

    /// Look up a city by name, ignoring case, a trailing ", State" and
    /// `new_york`-style separators
    pub fn find(&self, name: &str) -> Option<&CityMetrics> {
        let wanted = normalize_city_name(name);
        self.cities
            .iter()
            .find(|city| normalize_city_name(&city.name) == wanted)
    }
}

impl Default for StaticDataset {
    fn default() -> Self {
        Self::builtin()
    }
}
