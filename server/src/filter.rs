//! # Filter Engine
//!
//! Boolean matching over the in-memory car list. A record matches when every
//! present predicate holds; absent predicates hold for everything. Results
//! keep inventory order, no ranking.

use std::collections::HashMap;

use serde::Serialize;

use crate::inventory::Car;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterParams {
    pub query: Option<String>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub min_year: Option<i32>,
    pub max_year: Option<i32>,
}

impl FilterParams {
    /// Lenient read of the five filter keys from a query string.
    ///
    /// A numeric value that does not parse as an integer imposes no
    /// constraint, same as leaving it out.
    pub fn from_query(params: &HashMap<String, String>) -> Self {
        Self {
            query: params
                .get("query")
                .filter(|query| !query.is_empty())
                .cloned(),
            min_price: parse_bound(params, "min_price"),
            max_price: parse_bound(params, "max_price"),
            min_year: parse_bound(params, "min_year"),
            max_year: parse_bound(params, "max_year"),
        }
    }
}

fn parse_bound<T: std::str::FromStr>(params: &HashMap<String, String>, key: &str) -> Option<T> {
    params.get(key).and_then(|value| value.parse().ok())
}

pub fn filter(cars: &[Car], params: &FilterParams) -> Vec<Car> {
    let needle = params.query.as_deref().unwrap_or("").to_lowercase();

    cars.iter()
        .filter(|car| {
            let attributes = format!(
                "{} {} {} {}",
                car.make, car.model, car.year, car.color
            )
            .to_lowercase();

            let text_match = needle.is_empty() || attributes.contains(&needle);
            let price_match = params.min_price.map_or(true, |min| car.price >= min)
                && params.max_price.map_or(true, |max| car.price <= max);
            let year_match = params.min_year.map_or(true, |min| car.year >= min)
                && params.max_year.map_or(true, |max| car.year <= max);

            text_match && price_match && year_match
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::{filter, FilterParams};
    use crate::inventory::Car;

    fn lot() -> Vec<Car> {
        vec![
            Car {
                id: 1,
                make: "Toyota".to_string(),
                model: "Corolla".to_string(),
                year: 2018,
                price: 10000,
                mileage: 60000,
                color: "Blue".to_string(),
            },
            Car {
                id: 2,
                make: "Honda".to_string(),
                model: "Civic".to_string(),
                year: 2021,
                price: 20000,
                mileage: 15000,
                color: "red".to_string(),
            },
        ]
    }

    #[test]
    fn no_params_returns_everything_in_order() {
        let cars = lot();
        assert_eq!(filter(&cars, &FilterParams::default()), cars);
    }

    #[test]
    fn text_match_is_case_insensitive_substring() {
        let cars = lot();

        let params = FilterParams {
            query: Some("TOYO".to_string()),
            ..FilterParams::default()
        };
        let ids: Vec<u64> = filter(&cars, &params).iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1]);

        // Year participates in the text haystack.
        let params = FilterParams {
            query: Some("2021".to_string()),
            ..FilterParams::default()
        };
        let ids: Vec<u64> = filter(&cars, &params).iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![2]);

        // So does color, with mixed-case records.
        let params = FilterParams {
            query: Some("blue".to_string()),
            ..FilterParams::default()
        };
        let ids: Vec<u64> = filter(&cars, &params).iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn min_price_keeps_only_cars_at_or_above() {
        let cars = lot();
        let params = FilterParams {
            min_price: Some(15000),
            ..FilterParams::default()
        };
        let prices: Vec<i64> = filter(&cars, &params).iter().map(|c| c.price).collect();
        assert_eq!(prices, vec![20000]);
    }

    #[test]
    fn bounds_are_inclusive() {
        let cars = lot();
        let params = FilterParams {
            min_price: Some(10000),
            max_price: Some(10000),
            ..FilterParams::default()
        };
        let ids: Vec<u64> = filter(&cars, &params).iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1]);

        let params = FilterParams {
            min_year: Some(2021),
            max_year: Some(2021),
            ..FilterParams::default()
        };
        let ids: Vec<u64> = filter(&cars, &params).iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn predicates_are_anded() {
        let cars = lot();
        let params = FilterParams {
            query: Some("toyota".to_string()),
            min_price: Some(15000),
            ..FilterParams::default()
        };
        assert!(filter(&cars, &params).is_empty());
    }

    #[test]
    fn filtering_is_idempotent() {
        let cars = lot();
        let params = FilterParams {
            min_year: Some(2020),
            ..FilterParams::default()
        };
        let once = filter(&cars, &params);
        let twice = filter(&once, &params);
        assert_eq!(once, twice);
    }

    #[test]
    fn from_query_ignores_unparseable_numbers() {
        let mut raw = HashMap::new();
        raw.insert("min_price".to_string(), "cheap".to_string());
        raw.insert("max_year".to_string(), "2020".to_string());
        raw.insert("query".to_string(), "".to_string());

        let params = FilterParams::from_query(&raw);
        assert_eq!(params.min_price, None);
        assert_eq!(params.max_year, Some(2020));
        assert_eq!(params.query, None);
    }
}
