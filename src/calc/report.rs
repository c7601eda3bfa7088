use std::collections::HashSet;

use crate::model::{ContributionResult, ResultFilter, ResultSummary};

use super::round2;

/// Rows matching every constraint set on `filter`.
pub fn filter<'a, T>(results: &'a [T], filter: &ResultFilter) -> Vec<&'a T>
where
    T: AsRef<ContributionResult>,
{
    results.iter().filter(|r| filter.matches(r.as_ref())).collect()
}

pub fn summarize<T>(rows: &[T]) -> ResultSummary
where
    T: AsRef<ContributionResult>,
{
    if rows.is_empty() {
        return ResultSummary::default();
    }

    let distinct: HashSet<&str> = rows
        .iter()
        .map(|r| r.as_ref().employee_name.as_str())
        .collect();
    let total: f64 = rows.iter().map(|r| r.as_ref().company_fee).sum();

    ResultSummary {
        distinct_employee_count: distinct.len(),
        total_fee: round2(total),
        avg_fee_per_row: round2(total / rows.len() as f64),
    }
}
