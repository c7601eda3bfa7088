use std::collections::HashMap;
use std::io::Cursor;

use calamine::{Data, Reader, open_workbook_auto_from_rs};

/// Cell value of an uploaded sheet.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
}

/// One data row keyed by header name.
pub type Row = HashMap<String, Cell>;

#[derive(Debug, thiserror::Error)]
pub enum SheetError {
    #[error(transparent)]
    Workbook(#[from] calamine::Error),
    #[error("workbook has no sheets")]
    NoSheet,
}

impl Cell {
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            Cell::Number(_) => false,
        }
    }

    /// Text form of the cell; integral numbers print without a fraction so
    /// that `2024` and `202401` survive a numeric cell format.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Cell::Empty => None,
            Cell::Text(s) => {
                let trimmed = s.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            Cell::Number(n) => Some(n.to_string()),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Empty => None,
            Cell::Number(n) => Some(*n),
            Cell::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        }
    }
}

impl From<&Data> for Cell {
    fn from(value: &Data) -> Self {
        match value {
            Data::Empty => Cell::Empty,
            Data::Int(i) => Cell::Number(*i as f64),
            Data::Float(f) => Cell::Number(*f),
            Data::String(s) => Cell::Text(s.clone()),
            other => Cell::Text(other.to_string()),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

/// Reads the first sheet of a workbook; the first row is the header.
///
/// Fully empty rows are skipped.
pub fn read_first_sheet(bytes: &[u8]) -> Result<Vec<Row>, SheetError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;
    let range = workbook.worksheet_range_at(0).ok_or(SheetError::NoSheet)??;

    let mut rows = range.rows();
    let header: Vec<String> = match rows.next() {
        Some(cells) => cells.iter().map(|c| c.to_string().trim().to_string()).collect(),
        None => return Ok(Vec::new()),
    };

    Ok(rows
        .map(|cells| {
            header
                .iter()
                .zip(cells)
                .filter(|(name, _)| !name.is_empty())
                .map(|(name, cell)| (name.clone(), Cell::from(cell)))
                .collect::<Row>()
        })
        .filter(|row| row.values().any(|c| !c.is_blank()))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_numbers_render_without_fraction() {
        assert_eq!(Cell::Number(2024.0).as_text().as_deref(), Some("2024"));
        assert_eq!(Cell::Number(202401.0).as_text().as_deref(), Some("202401"));
        assert_eq!(Cell::Number(0.15).as_text().as_deref(), Some("0.15"));
    }

    #[test]
    fn text_numbers_parse() {
        assert_eq!(Cell::from(" 5360 ").as_number(), Some(5360.0));
        assert_eq!(Cell::from("abc").as_number(), None);
        assert_eq!(Cell::from("NaN").as_number(), None);
    }

    #[test]
    fn blank_text_is_blank() {
        assert!(Cell::from("   ").is_blank());
        assert!(Cell::Empty.is_blank());
        assert!(!Cell::Number(0.0).is_blank());
    }

    #[test]
    fn converts_calamine_cells() {
        assert_eq!(Cell::from(&Data::Int(7)), Cell::Number(7.0));
        assert_eq!(Cell::from(&Data::String("Beijing".into())), Cell::from("Beijing"));
        assert_eq!(Cell::from(&Data::Empty), Cell::Empty);
    }

    #[test]
    fn garbage_bytes_are_not_a_workbook() {
        assert!(read_first_sheet(b"definitely not a spreadsheet").is_err());
    }
}
