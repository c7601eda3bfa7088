use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::model::SalaryRecord;

use super::{
    FieldError, MAX_EMPLOYEE_ID_CHARS, MAX_EMPLOYEE_NAME_CHARS, ParseOutcome, Row, check_length,
    required_number, required_text, row_number, sheet,
};

static MONTH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}(0[1-9]|1[0-2])$").expect("valid month pattern"));

/// Parses a salary workbook (`employee_id, employee_name, month, salary_amount`).
pub fn parse_salaries(bytes: &[u8]) -> ParseOutcome<SalaryRecord> {
    match sheet::read_first_sheet(bytes) {
        Ok(rows) => validate_salary_rows(&rows),
        Err(e) => ParseOutcome::file_error(e),
    }
}

pub fn validate_salary_row(row: &Row) -> Result<SalaryRecord, String> {
    let incomplete = || "incomplete row, missing required fields".to_string();

    let employee_id = required_text(row, "employee_id").ok_or_else(incomplete)?;
    let employee_name = required_text(row, "employee_name").ok_or_else(incomplete)?;
    let month = required_text(row, "month").ok_or_else(incomplete)?;
    let salary_amount = match required_number(row, "salary_amount") {
        Ok(amount) if amount >= 0.0 => amount,
        Err(FieldError::Missing) => return Err(incomplete()),
        _ => return Err("salary_amount must be a non-negative number".into()),
    };

    if !MONTH.is_match(&month) {
        return Err("month must be formatted as YYYYMM (e.g. 202401)".into());
    }
    check_length("employee_id", &employee_id, MAX_EMPLOYEE_ID_CHARS)?;
    check_length("employee_name", &employee_name, MAX_EMPLOYEE_NAME_CHARS)?;

    Ok(SalaryRecord {
        employee_id,
        employee_name,
        month,
        salary_amount,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::Cell;
    use pretty_assertions::assert_eq;

    fn row(id: Cell, name: &str, month: Cell, amount: Cell) -> Row {
        [
            ("employee_id", id),
            ("employee_name", Cell::from(name)),
            ("month", month),
            ("salary_amount", amount),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
    }

    #[test]
    fn accepts_numeric_and_text_cells() {
        let rows = vec![
            row(Cell::Number(1001.0), "Zhang", Cell::Number(202401.0), Cell::Number(4000.0)),
            row(Cell::from("E002"), "Li", Cell::from("202412"), Cell::from("40000.5")),
        ];

        let outcome = validate_salary_rows(&rows);

        assert!(outcome.errors.is_empty());
        assert_eq!(
            outcome.records,
            vec![
                SalaryRecord {
                    employee_id: "1001".into(),
                    employee_name: "Zhang".into(),
                    month: "202401".into(),
                    salary_amount: 4000.0,
                },
                SalaryRecord {
                    employee_id: "E002".into(),
                    employee_name: "Li".into(),
                    month: "202412".into(),
                    salary_amount: 40000.5,
                },
            ]
        );
    }

    #[test]
    fn zero_salary_is_allowed() {
        let rows = vec![row(Cell::from("E1"), "Zhang", Cell::from("202401"), Cell::Number(0.0))];

        assert!(validate_salary_rows(&rows).errors.is_empty());
    }

    #[test]
    fn rejects_bad_rows_with_line_numbers() {
        let rows = vec![
            row(Cell::from("E1"), "Zhang", Cell::from("202401"), Cell::Number(-1.0)),
            row(Cell::from("E1"), "Zhang", Cell::from("202413"), Cell::Number(1.0)),
            row(Cell::from("E1"), "Zhang", Cell::from("2024-01"), Cell::Number(1.0)),
            row(Cell::Empty, "Zhang", Cell::from("202401"), Cell::Number(1.0)),
            row(Cell::from("E1"), "Zhang", Cell::from("202401"), Cell::from("n/a")),
        ];

        let outcome = validate_salary_rows(&rows);

        assert!(outcome.records.is_empty());
        assert_eq!(
            outcome.errors,
            vec![
                "row 2: salary_amount must be a non-negative number".to_string(),
                "row 3: month must be formatted as YYYYMM (e.g. 202401)".to_string(),
                "row 4: month must be formatted as YYYYMM (e.g. 202401)".to_string(),
                "row 5: incomplete row, missing required fields".to_string(),
                "row 6: salary_amount must be a non-negative number".to_string(),
            ]
        );
    }

    #[test]
    fn overlong_names_are_row_errors() {
        let long_name = "n".repeat(129);
        let rows = vec![
            row(Cell::from("E1"), &long_name, Cell::from("202401"), Cell::Number(1.0)),
            row(Cell::from("E".repeat(65).as_str()), "Zhang", Cell::from("202401"), Cell::Number(1.0)),
            row(Cell::from("E1"), &"n".repeat(128), Cell::from("202401"), Cell::Number(1.0)),
        ];

        let outcome = validate_salary_rows(&rows);

        assert_eq!(outcome.records.len(), 1);
        assert_eq!(
            outcome.errors,
            vec![
                "row 2: employee_name must be at most 128 characters".to_string(),
                "row 3: employee_id must be at most 64 characters".to_string(),
            ]
        );
    }
}
