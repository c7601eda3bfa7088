use crate::model::{ContributionResult, PolicyRecord, SalaryRecord};

use super::{aggregate, round2};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalcError {
    #[error("no contribution policy found for {city_name} {year}")]
    PolicyNotFound { city_name: String, year: String },
}

/// Computes the employer contribution of every employee for `year`.
///
/// All salaries are averaged per employee and year; salary records carry no
/// city, so `city_name` only selects the policy and labels the output. When
/// the policy table holds several rows for `(city_name, year)` the first one
/// wins.
pub fn calculate(
    salaries: &[SalaryRecord],
    policies: &[PolicyRecord],
    city_name: &str,
    year: &str,
) -> Result<Vec<ContributionResult>, CalcError> {
    let policy = policies
        .iter()
        .find(|p| p.matches(city_name, year))
        .ok_or_else(|| CalcError::PolicyNotFound {
            city_name: city_name.to_string(),
            year: year.to_string(),
        })?;

    let results = aggregate(salaries)
        .into_iter()
        .filter(|avg| avg.year == year)
        .map(|avg| {
            let base = round2(policy.clamp_base(avg.avg_salary));
            ContributionResult {
                employee_name: avg.employee_name,
                city_name: city_name.to_string(),
                year: year.to_string(),
                avg_salary: avg.avg_salary,
                contribution_base: base,
                company_fee: round2(base * policy.rate),
            }
        })
        .collect();

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn beijing() -> PolicyRecord {
        PolicyRecord {
            city_name: "Beijing".into(),
            year: "2024".into(),
            base_min: 5360.0,
            base_max: 33891.0,
            rate: 0.15,
        }
    }

    fn full_year(name: &str, amount: f64) -> Vec<SalaryRecord> {
        (1..=12)
            .map(|m| SalaryRecord {
                employee_id: format!("id-{name}"),
                employee_name: name.to_string(),
                month: format!("2024{m:02}"),
                salary_amount: amount,
            })
            .collect()
    }

    fn result_for<'a>(results: &'a [ContributionResult], name: &str) -> &'a ContributionResult {
        results
            .iter()
            .find(|r| r.employee_name == name)
            .expect("employee present")
    }

    #[test]
    fn clamps_to_policy_range() {
        let mut salaries = full_year("Zhang", 4000.0);
        salaries.extend(full_year("Li", 40000.0));
        salaries.extend(full_year("Wang", 10000.0));

        let results = calculate(&salaries, &[beijing()], "Beijing", "2024").unwrap();
        assert_eq!(results.len(), 3);

        let zhang = result_for(&results, "Zhang");
        assert_eq!(zhang.avg_salary, 4000.0);
        assert_eq!(zhang.contribution_base, 5360.0);
        assert_eq!(zhang.company_fee, 804.0);

        let li = result_for(&results, "Li");
        assert_eq!(li.contribution_base, 33891.0);
        assert_eq!(li.company_fee, 5083.65);

        let wang = result_for(&results, "Wang");
        assert_eq!(wang.contribution_base, 10000.0);
        assert_eq!(wang.company_fee, 1500.0);
    }

    #[test]
    fn results_carry_selected_labels() {
        let results = calculate(&full_year("Zhang", 8000.0), &[beijing()], "Beijing", "2024").unwrap();

        assert_eq!(
            results,
            vec![ContributionResult {
                employee_name: "Zhang".into(),
                city_name: "Beijing".into(),
                year: "2024".into(),
                avg_salary: 8000.0,
                contribution_base: 8000.0,
                company_fee: 1200.0,
            }]
        );
    }

    #[test]
    fn missing_policy_fails() {
        let err = calculate(&full_year("Zhang", 4000.0), &[], "Shenzhen", "2024").unwrap_err();

        assert_eq!(
            err,
            CalcError::PolicyNotFound {
                city_name: "Shenzhen".into(),
                year: "2024".into(),
            }
        );
        assert_eq!(err.to_string(), "no contribution policy found for Shenzhen 2024");
    }

    #[test]
    fn policy_year_must_match_exactly() {
        let err = calculate(&full_year("Zhang", 4000.0), &[beijing()], "Beijing", "2023");
        assert!(err.is_err());
    }

    #[test]
    fn other_years_are_ignored() {
        let mut salaries = full_year("Zhang", 4000.0);
        salaries.push(SalaryRecord {
            employee_id: "id-Chen".into(),
            employee_name: "Chen".into(),
            month: "202312".into(),
            salary_amount: 9000.0,
        });

        let results = calculate(&salaries, &[beijing()], "Beijing", "2024").unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].employee_name, "Zhang");
    }

    #[test]
    fn first_duplicate_policy_wins() {
        let mut second = beijing();
        second.rate = 0.5;

        let results =
            calculate(&full_year("Wang", 10000.0), &[beijing(), second], "Beijing", "2024").unwrap();

        assert_eq!(results[0].company_fee, 1500.0);
    }

    #[test]
    fn no_salaries_for_year_is_empty_not_error() {
        let results = calculate(&[], &[beijing()], "Beijing", "2024").unwrap();
        assert!(results.is_empty());
    }

    proptest! {
        #[test]
        fn base_within_range_and_fee_follows_rate(
            amounts in prop::collection::vec(0.0f64..100_000.0, 1..24),
            base_min in 1.0f64..10_000.0,
            span in 0.0f64..50_000.0,
            rate in 0.001f64..=1.0,
        ) {
            let policy = PolicyRecord {
                city_name: "Shanghai".into(),
                year: "2024".into(),
                base_min: round2(base_min),
                base_max: round2(base_min + span),
                rate,
            };
            let salaries: Vec<SalaryRecord> = amounts
                .iter()
                .enumerate()
                .map(|(i, amount)| SalaryRecord {
                    employee_id: format!("E{}", i % 3),
                    employee_name: format!("emp-{}", i % 3),
                    month: format!("2024{:02}", i % 12 + 1),
                    salary_amount: *amount,
                })
                .collect();

            let first = calculate(&salaries, &[policy.clone()], "Shanghai", "2024").unwrap();
            let second = calculate(&salaries, &[policy.clone()], "Shanghai", "2024").unwrap();
            prop_assert_eq!(&first, &second);

            for row in &first {
                prop_assert!(row.contribution_base >= policy.base_min);
                prop_assert!(row.contribution_base <= policy.base_max);
                prop_assert_eq!(row.company_fee, round2(row.contribution_base * policy.rate));
            }
        }
    }
}
