//! Spreadsheet ingestion.
//!
//! Uploads are read into header-keyed rows ([`sheet`]) and validated one row
//! at a time. Invalid rows never abort parsing: each produces a message
//! naming its spreadsheet row (`index + 2`, the header being row 1).

pub mod policy;
pub mod salary;
pub mod sheet;

pub use policy::{parse_policies, validate_policy_rows};
pub use salary::{parse_salaries, validate_salary_rows};
pub use sheet::{Cell, Row};

/// Longest `city_name` the `cities`/`results` tables hold, in characters.
pub const MAX_CITY_NAME_CHARS: usize = 64;
pub const MAX_YEAR_CHARS: usize = 8;
pub const MAX_EMPLOYEE_ID_CHARS: usize = 64;
pub const MAX_EMPLOYEE_NAME_CHARS: usize = 128;

/// Records accepted from an upload together with the rejected-row messages.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOutcome<T> {
    pub records: Vec<T>,
    pub errors: Vec<String>,
    /// The file itself could not be read; `errors` holds the cause.
    pub unreadable: bool,
}

/// Why an upload was refused as a whole.
#[derive(Debug, Clone, PartialEq)]
pub enum Rejection {
    Unreadable(Vec<String>),
    InvalidRows(Vec<String>),
}

impl<T> ParseOutcome<T> {
    pub(crate) fn rows(records: Vec<T>, errors: Vec<String>) -> Self {
        Self {
            records,
            errors,
            unreadable: false,
        }
    }

    /// Turns any rejected row into a failure of the whole upload.
    pub fn into_result(self) -> Result<Vec<T>, Rejection> {
        if self.unreadable {
            Err(Rejection::Unreadable(self.errors))
        } else if !self.errors.is_empty() {
            Err(Rejection::InvalidRows(self.errors))
        } else {
            Ok(self.records)
        }
    }

    fn file_error(err: impl std::fmt::Display) -> Self {
        Self {
            records: Vec::new(),
            errors: vec![format!("failed to parse file: {err}")],
            unreadable: true,
        }
    }
}

/// Spreadsheet row number of the `index`-th data row.
pub(crate) fn row_number(index: usize) -> usize {
    index + 2
}

/// Reads a required text column, `None` when absent or blank.
pub(crate) fn required_text(row: &Row, column: &str) -> Option<String> {
    row.get(column).and_then(Cell::as_text)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FieldError {
    Missing,
    NotNumeric,
}

/// Rejects values longer than the column that stores them.
pub(crate) fn check_length(column: &str, value: &str, max_chars: usize) -> Result<(), String> {
    if value.chars().count() > max_chars {
        return Err(format!("{column} must be at most {max_chars} characters"));
    }
    Ok(())
}

/// Reads a required numeric column.
pub(crate) fn required_number(row: &Row, column: &str) -> Result<f64, FieldError> {
    match row.get(column) {
        None => Err(FieldError::Missing),
        Some(cell) if cell.is_blank() => Err(FieldError::Missing),
        Some(cell) => cell.as_number().ok_or(FieldError::NotNumeric),
    }
}
