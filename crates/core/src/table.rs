//! Display tables built from API rows
//!
//! Rows are laid out with the preferred columns first (only those present),
//! followed by every other column in first-seen order. Price-like columns
//! are coerced to numbers; everything else is shown as sent.

use std::fmt;

use salesdesk_domain::constants::{NUMERIC_COLUMNS, PREFERRED_COLUMN_ORDER};
use salesdesk_domain::Record;
use serde_json::Value;

/// A single display cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl Cell {
    fn from_value(value: &Value) -> Self {
        match value {
            Value::Null => Self::Empty,
            Value::Bool(b) => Self::Bool(*b),
            Value::Number(n) => n.as_f64().map_or_else(|| Self::Text(n.to_string()), Self::Number),
            Value::String(s) => Self::Text(s.clone()),
            other => Self::Text(other.to_string()),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Text(s) => f.write_str(s),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{n:.0}"),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

/// Column-ordered view of a set of rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Lay out `records` with `preferred` columns first and coerce the
    /// `numeric` columns. Missing numeric cells become `0`, other missing
    /// cells stay empty.
    pub fn from_records(records: &[Record], preferred: &[&str], numeric: &[&str]) -> Self {
        if records.is_empty() {
            return Self::default();
        }

        let mut seen: Vec<&str> = Vec::new();
        for record in records {
            for column in record.columns() {
                if !seen.contains(&column) {
                    seen.push(column);
                }
            }
        }

        let mut columns: Vec<String> = preferred
            .iter()
            .filter(|column| seen.contains(*column))
            .map(|column| (*column).to_string())
            .collect();
        columns.extend(
            seen.iter()
                .filter(|column| !preferred.contains(*column))
                .map(|column| (*column).to_string()),
        );

        let rows = records
            .iter()
            .map(|record| {
                columns
                    .iter()
                    .map(|column| {
                        if numeric.contains(&column.as_str()) {
                            Cell::Number(record.price(column))
                        } else {
                            record.get(column).map_or(Cell::Empty, Cell::from_value)
                        }
                    })
                    .collect()
            })
            .collect();

        Self { columns, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }
}

/// Table for opportunity rows using the dashboard's column order.
pub fn clean_for_display(records: &[Record]) -> Table {
    Table::from_records(records, &PREFERRED_COLUMN_ORDER, &NUMERIC_COLUMNS)
}

/// Coerced total of a price column across rows.
pub fn column_total(records: &[Record], column: &str) -> f64 {
    records.iter().map(|r| r.price(column)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Record> {
        vec![
            Record::new()
                .with("sales_notes", "first call")
                .with("uid", "U-1")
                .with("selling_price", "15000000")
                .with("opportunity_id", 10)
                .with("sales_name", "Sari Dewi"),
            Record::new()
                .with("opportunity_id", 11)
                .with("selling_price", "TBD")
                .with("cost", 500)
                .with("sales_name", "Sari Dewi"),
        ]
    }

    #[test]
    fn preferred_columns_lead_and_extras_follow() {
        let table = clean_for_display(&sample());
        assert_eq!(
            table.columns,
            vec!["opportunity_id", "sales_name", "selling_price", "sales_notes", "uid", "cost"]
        );
    }

    #[test]
    fn reorder_preserves_rows_and_values() {
        let records = sample();
        let table = clean_for_display(&records);
        assert_eq!(table.len(), records.len());

        for (record, row) in records.iter().zip(&table.rows) {
            for column in record.columns() {
                if NUMERIC_COLUMNS.contains(&column) {
                    continue;
                }
                let index = table.column_index(column).unwrap();
                assert_eq!(row[index], Cell::from_value(record.get(column).unwrap()));
            }
        }
    }

    #[test]
    fn price_columns_are_coerced() {
        let table = clean_for_display(&sample());
        let price = table.column_index("selling_price").unwrap();
        let cost = table.column_index("cost").unwrap();
        assert_eq!(table.rows[0][price], Cell::Number(15_000_000.0));
        assert_eq!(table.rows[1][price], Cell::Number(0.0));
        assert_eq!(table.rows[0][cost], Cell::Number(0.0));
        assert_eq!(table.rows[1][cost], Cell::Number(500.0));
    }

    #[test]
    fn missing_text_cell_is_empty() {
        let table = clean_for_display(&sample());
        let notes = table.column_index("sales_notes").unwrap();
        assert_eq!(table.rows[1][notes], Cell::Empty);
    }

    #[test]
    fn empty_input_gives_empty_table() {
        let table = clean_for_display(&[]);
        assert!(table.is_empty());
        assert!(table.columns.is_empty());
    }

    #[test]
    fn whole_numbers_render_without_fraction() {
        assert_eq!(Cell::Number(15_000_000.0).to_string(), "15000000");
        assert_eq!(Cell::Number(12.5).to_string(), "12.5");
        assert_eq!(Cell::Empty.to_string(), "");
    }

    #[test]
    fn column_total_sums_coerced_prices() {
        assert_eq!(column_total(&sample(), "selling_price"), 15_000_000.0);
    }
}
