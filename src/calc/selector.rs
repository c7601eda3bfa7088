use std::collections::HashSet;

use crate::model::{CityYear, PolicyRecord};

/// Distinct `(city, year)` pairs, newest year first.
///
/// Pairs sharing a year keep the order in which their city first appears.
pub fn list_distinct_city_years(policies: &[PolicyRecord]) -> Vec<CityYear> {
    let mut seen = HashSet::new();
    let mut pairs: Vec<CityYear> = policies
        .iter()
        .filter(|p| seen.insert((p.city_name.as_str(), p.year.as_str())))
        .map(|p| CityYear {
            city_name: p.city_name.clone(),
            year: p.year.clone(),
        })
        .collect();

    // stable: ties stay in first-seen order
    pairs.sort_by(|a, b| b.year.cmp(&a.year));
    pairs
}
