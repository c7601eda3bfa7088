//! Contribution arithmetic: yearly averages, policy clamping and reporting.
//!
//! Everything here is a pure function over in-memory records; persistence
//! lives in [`crate::store`].

pub mod aggregate;
pub mod contribution;
pub mod report;
pub mod selector;

pub use aggregate::aggregate;
pub use contribution::{CalcError, calculate};
pub use report::{filter, summarize};
pub use selector::list_distinct_city_years;

/// Rounds to 2 decimal places: `round(x * 100) / 100`.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
