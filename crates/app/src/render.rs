//! Plain-text rendering of tables and amounts

use salesdesk_core::{ActivityRow, Cell, OpportunityTotal, Table};
use salesdesk_domain::constants::NUMERIC_COLUMNS;
use salesdesk_domain::Record;

/// Cells wider than this are cut and marked with `~`.
const MAX_CELL_WIDTH: usize = 40;

/// Render a table with a header row, a rule, and left-aligned cells.
///
/// Numeric cells are right-aligned. Only price columns get thousands
/// grouping; other numbers, such as ids, print as sent.
pub fn render_table(table: &Table) -> String {
    if table.columns.is_empty() {
        return String::new();
    }

    let amounts: Vec<bool> =
        table.columns.iter().map(|column| NUMERIC_COLUMNS.contains(&column.as_str())).collect();
    let rendered: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|row| {
            row.iter()
                .zip(&amounts)
                .map(|(cell, amount)| clip(&format_cell(cell, *amount)))
                .collect()
        })
        .collect();

    let widths: Vec<usize> = table
        .columns
        .iter()
        .enumerate()
        .map(|(index, column)| {
            rendered
                .iter()
                .map(|row| row[index].chars().count())
                .chain(std::iter::once(column.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    let header: Vec<String> =
        table.columns.iter().zip(&widths).map(|(c, w)| format!("{c:<w$}")).collect();
    push_line(&mut out, &header.join("  "));
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, &rule.join("  "));

    for (cells, row) in rendered.iter().zip(&table.rows) {
        let line: Vec<String> = cells
            .iter()
            .zip(row)
            .zip(&widths)
            .map(|((text, cell), w)| match cell {
                Cell::Number(_) => format!("{text:>w$}"),
                _ => format!("{text:<w$}"),
            })
            .collect();
        push_line(&mut out, &line.join("  "));
    }
    out
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line.trim_end());
    out.push('\n');
}

fn format_cell(cell: &Cell, amount: bool) -> String {
    match cell {
        Cell::Number(n) if amount => format_amount(*n),
        other => other.to_string().replace(['\n', '\r'], " "),
    }
}

fn clip(text: &str) -> String {
    if text.chars().count() <= MAX_CELL_WIDTH {
        return text.to_string();
    }
    let mut clipped: String = text.chars().take(MAX_CELL_WIDTH - 1).collect();
    clipped.push('~');
    clipped
}

/// Amount with `,` thousands separators; whole values drop the fraction.
pub fn format_amount(value: f64) -> String {
    let cents_total = (value.abs() * 100.0).round();
    let negative = value < 0.0 && cents_total > 0.0;
    let whole = (cents_total / 100.0).trunc();
    let cents = cents_total - whole * 100.0;

    let digits = format!("{whole:.0}");
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if cents > 0.0 {
        out.push_str(&format!(".{cents:02.0}"));
    }
    out
}

/// Table of opportunity totals in the dashboard's column order.
pub fn totals_table(totals: &[OpportunityTotal]) -> Table {
    let records: Vec<Record> = totals.iter().map(OpportunityTotal::to_record).collect();
    salesdesk_core::clean_for_display(&records)
}

/// Activity rows as a four-column table.
pub fn activity_table(rows: &[ActivityRow]) -> Table {
    let records: Vec<Record> = rows.iter().map(ActivityRow::to_record).collect();
    Table::from_records(&records, &["Timestamp", "OpportunityName", "OldValue", "NewValue"], &[])
}
