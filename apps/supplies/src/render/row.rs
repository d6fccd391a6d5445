use crate::layout::grid::{InnerColumn, RowStyle};
use crate::models::InventoryRow;
use crate::render::escape::{escape_all, escape_specials};

/// Blank line to write a quantity on, used by checklist rows.
pub const CHECKLIST_RULE: &str = r"\rule[0pt]{0.25in}{0.5pt}";

/// Formats cell lines for one inner-table column layout.
#[derive(Debug, Clone, Copy)]
pub struct RowRenderer<'c> {
    columns: &'c [InnerColumn],
    style: RowStyle,
}

impl<'c> RowRenderer<'c> {
    pub fn new(columns: &'c [InnerColumn], style: RowStyle) -> Self {
        Self { columns, style }
    }

    /// One item row, fields escaped and joined by ` & `. No line terminator.
    pub fn row_line(&self, row: &InventoryRow) -> String {
        let raw: Vec<&str> = self.columns.iter().map(|c| field(row, *c)).collect();
        let mut cells = escape_all(&raw);
        if self.style == RowStyle::Checklist {
            for (column, cell) in self.columns.iter().zip(cells.iter_mut()) {
                if *column == InnerColumn::Quantity {
                    *cell = CHECKLIST_RULE.to_string();
                }
            }
        }
        cells.join(" & ")
    }

    /// A bold group name spanning every inner column. No line terminator.
    pub fn heading_line(&self, name: &str) -> String {
        format!(
            r"\multicolumn{{{}}}{{l}}{{\textbf{{{}}}}}",
            self.columns.len(),
            escape_specials(name)
        )
    }
}

fn field(row: &InventoryRow, column: InnerColumn) -> &str {
    match column {
        InnerColumn::Quantity => &row.quantity,
        InnerColumn::Unit => &row.unit,
        InnerColumn::Item => &row.item,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::grid::default_grid_config;

    fn row() -> InventoryRow {
        InventoryRow {
            quantity: "2".to_string(),
            unit: "lb".to_string(),
            item: "mac & cheese".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_plain_row_line() {
        let grid = default_grid_config();
        let renderer = RowRenderer::new(&grid.columns, RowStyle::Plain);
        assert_eq!(renderer.row_line(&row()), r"2 & lb & mac \& cheese");
    }

    #[test]
    fn test_checklist_row_replaces_quantity_with_rule() {
        let grid = default_grid_config();
        let renderer = RowRenderer::new(&grid.columns, RowStyle::Checklist);
        assert_eq!(
            renderer.row_line(&row()),
            r"\rule[0pt]{0.25in}{0.5pt} & lb & mac \& cheese"
        );
    }

    #[test]
    fn test_empty_fields_keep_column_count() {
        let grid = default_grid_config();
        let renderer = RowRenderer::new(&grid.columns, RowStyle::Plain);
        let line = renderer.row_line(&InventoryRow {
            item: "salt".to_string(),
            ..Default::default()
        });
        assert_eq!(line, " &  & salt");
    }

    #[test]
    fn test_heading_spans_columns_and_escapes() {
        let grid = default_grid_config();
        let renderer = RowRenderer::new(&grid.columns, RowStyle::Plain);
        assert_eq!(
            renderer.heading_line("dairy & eggs"),
            r"\multicolumn{3}{l}{\textbf{dairy \& eggs}}"
        );
    }

    #[test]
    fn test_custom_columns() {
        let columns = [InnerColumn::Item, InnerColumn::Quantity];
        let renderer = RowRenderer::new(&columns, RowStyle::Plain);
        assert_eq!(renderer.row_line(&row()), r"mac \& cheese & 2");
        assert!(renderer.heading_line("x").starts_with(r"\multicolumn{2}"));
    }
}
