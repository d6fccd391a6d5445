//! Comma-separated inventory reader.
//!
//! The first non-blank line is the header. Columns are located by name (case-insensitive,
//! with the short aliases `qty`, `unt` and `ord` accepted), so column order in the file is free.
//! Fields may be double-quoted; `""` inside a quoted field is a literal quote.

use std::path::Path;

use tracing::debug;

use crate::errors::AppError;
use crate::models::InventoryRow;

// ────────────────────────────────────────────────────────────────────────────
// Column mapping
// ────────────────────────────────────────────────────────────────────────────

/// Field positions resolved from the header line.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ColumnMap {
    quantity: Option<usize>,
    unit: Option<usize>,
    item: usize,
    location: usize,
    department: usize,
    store: usize,
    order: Option<usize>,
}

impl ColumnMap {
    fn from_header(header: &[String], line: usize) -> Result<Self, AppError> {
        let find = |aliases: &[&str]| {
            header.iter().position(|h| {
                aliases
                    .iter()
                    .any(|alias| h.trim().eq_ignore_ascii_case(alias))
            })
        };
        let require = |aliases: &[&str]| {
            find(aliases).ok_or_else(|| AppError::Parse {
                line,
                message: format!("missing required column '{}'", aliases[0]),
            })
        };

        Ok(ColumnMap {
            quantity: find(&["quantity", "qty"]),
            unit: find(&["unit", "unt"]),
            item: require(&["item"])?,
            location: require(&["location"])?,
            department: require(&["department"])?,
            store: require(&["store"])?,
            order: find(&["order", "ord"]),
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Public entry points
// ────────────────────────────────────────────────────────────────────────────

/// Reads and parses the inventory file at `path`.
pub fn read_inventory(path: &Path) -> Result<Vec<InventoryRow>, AppError> {
    let text = std::fs::read_to_string(path).map_err(|source| AppError::InputRead {
        path: path.to_path_buf(),
        source,
    })?;
    let rows = parse_inventory(&text)?;
    debug!(path = %path.display(), rows = rows.len(), "Inventory loaded");
    Ok(rows)
}

/// Parses inventory text. Missing trailing fields become empty strings.
pub fn parse_inventory(text: &str) -> Result<Vec<InventoryRow>, AppError> {
    let mut records = split_records(text, ',')?.into_iter();

    let header = records.next().ok_or(AppError::Parse {
        line: 1,
        message: "missing header line".to_string(),
    })?;
    let columns = ColumnMap::from_header(&header.fields, header.line)?;

    records
        .map(|record| parse_row(&record.fields, &columns, record.line))
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Internal helpers
// ────────────────────────────────────────────────────────────────────────────

fn parse_row(fields: &[String], columns: &ColumnMap, line: usize) -> Result<InventoryRow, AppError> {
    let field = |idx: Option<usize>| -> String {
        idx.and_then(|i| fields.get(i))
            .map(|f| f.trim().to_string())
            .unwrap_or_default()
    };

    let order_text = field(columns.order);
    let order = if order_text.is_empty() {
        None
    } else {
        Some(order_text.parse::<f64>().map_err(|_| AppError::Parse {
            line,
            message: format!("order '{order_text}' is not a number"),
        })?)
    };

    Ok(InventoryRow {
        quantity: field(columns.quantity),
        unit: field(columns.unit),
        item: field(Some(columns.item)),
        location: field(Some(columns.location)),
        department: field(Some(columns.department)),
        store: field(Some(columns.store)),
        order,
    })
}

/// One CSV record and the line it starts on.
#[derive(Debug, Clone, PartialEq)]
struct Record {
    line: usize,
    fields: Vec<String>,
}

impl Record {
    fn is_blank(&self) -> bool {
        self.fields.len() == 1 && self.fields[0].trim().is_empty()
    }
}

/// Splits text into records, respecting quoted fields.
///
/// A `"` opens a quoted field only as the first character of a field; anywhere else it is a
/// literal character (`foil 12" wide`). Quoted fields may contain separators and newlines.
/// Blank lines are dropped. An unclosed quote is an error at the line where it opened.
fn split_records(text: &str, sep: char) -> Result<Vec<Record>, AppError> {
    let mut records = Vec::new();
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut field_started = false;
    let mut in_quotes = false;
    let mut quote_line = 0;
    let mut line = 1;
    let mut record_line = 1;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            match ch {
                '"' if chars.peek() == Some(&'"') => {
                    current.push('"');
                    chars.next();
                }
                '"' => in_quotes = false,
                _ => {
                    if ch == '\n' {
                        line += 1;
                    }
                    current.push(ch);
                }
            }
            continue;
        }

        match ch {
            '"' if !field_started => {
                in_quotes = true;
                field_started = true;
                quote_line = line;
            }
            c if c == sep => {
                fields.push(std::mem::take(&mut current));
                field_started = false;
            }
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                fields.push(std::mem::take(&mut current));
                let record = Record {
                    line: record_line,
                    fields: std::mem::take(&mut fields),
                };
                if !record.is_blank() {
                    records.push(record);
                }
                field_started = false;
                line += 1;
                record_line = line;
            }
            _ => {
                current.push(ch);
                field_started = true;
            }
        }
    }

    if in_quotes {
        return Err(AppError::Parse {
            line: quote_line,
            message: "unterminated quoted field".to_string(),
        });
    }
    if field_started || !fields.is_empty() {
        fields.push(current);
        let record = Record {
            line: record_line,
            fields,
        };
        if !record.is_blank() {
            records.push(record);
        }
    }
    Ok(records)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
