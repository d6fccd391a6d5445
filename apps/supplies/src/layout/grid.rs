//! Grid shape and inner-table columns for one report page.
//!
//! A page is an outer table of `outer_rows × outer_cols` fixed-width cells. Each cell holds an
//! inner table whose columns are listed in `columns`. Default: US letter landscape, 3 × 4 cells
//! of 2.5in, inner columns quantity / unit / item.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Rows taken out of a cell's capacity when it carries a group heading (the heading line and
/// the rule-plus-spacer under it).
pub const HEADING_ROWS: usize = 2;

// ────────────────────────────────────────────────────────────────────────────
// Inner columns
// ────────────────────────────────────────────────────────────────────────────

/// One column of the inner, per-cell table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InnerColumn {
    Quantity,
    Unit,
    Item,
}

impl InnerColumn {
    /// LaTeX column alignment letter.
    pub fn alignment(self) -> char {
        match self {
            InnerColumn::Quantity | InnerColumn::Unit => 'c',
            InnerColumn::Item => 'l',
        }
    }
}

/// How item rows are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowStyle {
    /// `quantity & unit & item`, for the master inventory.
    Plain,
    /// A blank rule in place of the quantity, for shopping lists to be ticked off by hand.
    Checklist,
}

// ────────────────────────────────────────────────────────────────────────────
// Grid configuration
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    pub outer_rows: usize,
    pub outer_cols: usize,
    /// Width of one outer cell in inches.
    pub cell_width_in: f32,
    pub columns: Vec<InnerColumn>,
}

impl Default for GridConfig {
    fn default() -> Self {
        default_grid_config()
    }
}

/// US letter landscape with 0.25in margins fits four 2.5in columns and three rows of cells.
pub fn default_grid_config() -> GridConfig {
    GridConfig {
        outer_rows: 3,
        outer_cols: 4,
        cell_width_in: 2.5,
        columns: vec![InnerColumn::Quantity, InnerColumn::Unit, InnerColumn::Item],
    }
}

impl GridConfig {
    pub fn cells_per_grid(&self) -> usize {
        self.outer_rows * self.outer_cols
    }

    /// Inner-table column spec, e.g. ` c c l `.
    pub fn inner_alignment(&self) -> String {
        let mut spec = String::from(" ");
        for column in &self.columns {
            spec.push(column.alignment());
            spec.push(' ');
        }
        spec
    }

    /// Rejects shapes the flow layout cannot terminate on.
    ///
    /// A headed cell holds `capacity - HEADING_ROWS` rows, so `capacity` must leave room for
    /// at least one item under the heading.
    pub fn validate(&self, capacity: usize) -> Result<(), AppError> {
        if self.outer_rows == 0 || self.outer_cols == 0 {
            return Err(AppError::InvalidLayout(format!(
                "grid must have at least one row and one column, got {}x{}",
                self.outer_rows, self.outer_cols
            )));
        }
        if self.columns.is_empty() {
            return Err(AppError::InvalidLayout(
                "inner table needs at least one column".to_string(),
            ));
        }
        if !(self.cell_width_in.is_finite() && self.cell_width_in > 0.0) {
            return Err(AppError::InvalidLayout(format!(
                "cell width must be positive, got {}",
                self.cell_width_in
            )));
        }
        if capacity <= HEADING_ROWS {
            return Err(AppError::InvalidLayout(format!(
                "capacity must exceed {HEADING_ROWS} to fit a heading and one row, got {capacity}"
            )));
        }
        Ok(())
    }

    /// Checklist rows print their rule in the quantity column, so that column must exist.
    pub fn validate_style(&self, style: RowStyle) -> Result<(), AppError> {
        if style == RowStyle::Checklist && !self.columns.contains(&InnerColumn::Quantity) {
            return Err(AppError::InvalidLayout(
                "checklist rows need a quantity column for the check rule".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_grid_sanity() {
        let grid = default_grid_config();
        assert_eq!(grid.cells_per_grid(), 12);
        assert_eq!(grid.inner_alignment(), " c c l ");
        assert!(grid.validate(15).is_ok());
    }

    #[test]
    fn test_capacity_must_exceed_heading_rows() {
        let grid = default_grid_config();
        assert!(matches!(grid.validate(2), Err(AppError::InvalidLayout(_))));
        assert!(matches!(grid.validate(0), Err(AppError::InvalidLayout(_))));
        assert!(grid.validate(3).is_ok());
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        let mut grid = default_grid_config();
        grid.outer_rows = 0;
        assert!(matches!(grid.validate(10), Err(AppError::InvalidLayout(_))));

        let mut grid = default_grid_config();
        grid.outer_cols = 0;
        assert!(matches!(grid.validate(10), Err(AppError::InvalidLayout(_))));
    }

    #[test]
    fn test_non_positive_width_rejected() {
        let mut grid = default_grid_config();
        grid.cell_width_in = 0.0;
        assert!(grid.validate(10).is_err());
    }

    #[test]
    fn test_grid_deserializes_from_json() {
        let grid: GridConfig = serde_json::from_str(
            r#"{"outer_rows":2,"outer_cols":3,"cell_width_in":3.25,"columns":["unit","item"]}"#,
        )
        .unwrap();
        assert_eq!(grid.cells_per_grid(), 6);
        assert_eq!(grid.inner_alignment(), " c l ");
    }

    #[test]
    fn test_checklist_requires_quantity_column() {
        let mut grid = default_grid_config();
        assert!(grid.validate_style(RowStyle::Checklist).is_ok());

        grid.columns = vec![InnerColumn::Unit, InnerColumn::Item];
        assert!(grid.validate_style(RowStyle::Plain).is_ok());
        assert!(matches!(
            grid.validate_style(RowStyle::Checklist),
            Err(AppError::InvalidLayout(_))
        ));
    }
}
