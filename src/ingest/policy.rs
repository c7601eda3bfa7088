use std::collections::HashMap;

use tracing::debug;

use crate::model::PolicyRecord;

use super::{
    FieldError, MAX_CITY_NAME_CHARS, MAX_YEAR_CHARS, ParseOutcome, Row, check_length,
    required_number, required_text, row_number, sheet,
};

/// Parses a policy workbook (`city_name, year, base_min, base_max, rate`).
pub fn parse_policies(bytes: &[u8]) -> ParseOutcome<PolicyRecord> {
    match sheet::read_first_sheet(bytes) {
        Ok(rows) => validate_policy_rows(&rows),
        Err(e) => ParseOutcome::file_error(e),
    }
}

pub fn validate_policy_row(row: &Row) -> Result<PolicyRecord, String> {
    let incomplete = || "incomplete row, missing required fields".to_string();

    let city_name = required_text(row, "city_name").ok_or_else(incomplete)?;
    let year = required_text(row, "year").ok_or_else(incomplete)?;
    let numbers = ["base_min", "base_max", "rate"].map(|column| required_number(row, column));
    if numbers.contains(&Err(FieldError::Missing)) {
        return Err(incomplete());
    }
    let [Ok(base_min), Ok(base_max), Ok(rate)] = numbers else {
        return Err("base_min, base_max and rate must be numeric".into());
    };

    check_length("city_name", &city_name, MAX_CITY_NAME_CHARS)?;
    check_length("year", &year, MAX_YEAR_CHARS)?;

    if base_min <= 0.0 {
        return Err("base_min must be greater than 0".into());
    }
    if base_min > base_max {
        return Err("base_min cannot exceed base_max".into());
    }
    if rate <= 0.0 || rate > 1.0 {
        return Err("rate must be greater than 0 and at most 1".into());
    }

    Ok(PolicyRecord {
        city_name,
        year,
        base_min,
        base_max,
        rate,
    })
}
