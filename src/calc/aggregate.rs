use std::collections::HashMap;

use crate::model::{SalaryRecord, YearlyAverage};

use super::round2;

/// Averages salaries per `(employee_name, year)`.
///
/// Groups are emitted in the order their first record appears in `salaries`.
pub fn aggregate(salaries: &[SalaryRecord]) -> Vec<YearlyAverage> {
    let mut index: HashMap<(&str, &str), usize> = HashMap::new();
    let mut groups: Vec<(&str, &str, f64, usize)> = Vec::new();

    for salary in salaries {
        let key = (salary.employee_name.as_str(), salary.year());
        let slot = *index.entry(key).or_insert_with(|| {
            groups.push((key.0, key.1, 0.0, 0));
            groups.len() - 1
        });
        let group = &mut groups[slot];
        group.2 += salary.salary_amount;
        group.3 += 1;
    }

    groups
        .into_iter()
        .map(|(employee_name, year, total, count)| YearlyAverage {
            employee_name: employee_name.to_string(),
            year: year.to_string(),
            avg_salary: round2(total / count as f64),
        })
        .collect()
}
