//! Group flow layout — tiles groups of rows into pages of fixed-size cells.
//!
//! # Flow rules
//! - Groups are laid out in the caller's order; rows keep their group order.
//! - A group's first cell carries its name as a heading and holds `capacity - HEADING_ROWS`
//!   rows; continuation cells hold up to `capacity` rows and no heading.
//! - Cells fill an outer row left to right, then the next outer row. A grid closes after
//!   `outer_rows * outer_cols` cells, or when the last row has been placed.
//! - No row is ever split across cells or grids, and no cell is left empty.
//!
//! The output is a flat list of [`LayoutEvent`]s borrowing from the [`GroupIndex`]; the
//! renderer turns it into markup. Identical inputs always give the identical event list.

use std::collections::HashSet;

use tracing::debug;

use crate::errors::AppError;
use crate::layout::grid::{GridConfig, HEADING_ROWS};
use crate::models::{Group, GroupIndex, InventoryRow};

// ────────────────────────────────────────────────────────────────────────────
// Output types
// ────────────────────────────────────────────────────────────────────────────

/// One layout instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutEvent<'a> {
    /// Start an outer grid (one page).
    OpenGrid,
    /// Start an inner table; `heading` is set on the first cell of a group.
    OpenCell { heading: Option<&'a str> },
    /// One item row. `terminated` is false for the last row written into the cell.
    Row {
        row: &'a InventoryRow,
        terminated: bool,
    },
    CloseCell,
    /// Between two cells of the same outer row.
    ColumnSeparator,
    /// Between two outer rows of the same grid.
    RowBreak,
    CloseGrid,
}

/// Counts over a finished layout, for logging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayoutStats {
    pub grids: usize,
    pub cells: usize,
    pub rows: usize,
}

impl LayoutStats {
    pub fn from_events(events: &[LayoutEvent<'_>]) -> Self {
        events.iter().fold(Self::default(), |mut stats, event| {
            match event {
                LayoutEvent::OpenGrid => stats.grids += 1,
                LayoutEvent::OpenCell { .. } => stats.cells += 1,
                LayoutEvent::Row { .. } => stats.rows += 1,
                _ => {}
            }
            stats
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Cursor
// ────────────────────────────────────────────────────────────────────────────

/// Position of the next cell inside the current grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct LayoutCursor {
    outer_row: usize,
    outer_col: usize,
}

/// What has to follow a cell that was just closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Advance {
    NextColumn,
    NextRow,
    GridFull,
}

impl LayoutCursor {
    fn advance(&mut self, grid: &GridConfig) -> Advance {
        self.outer_col += 1;
        if self.outer_col < grid.outer_cols {
            return Advance::NextColumn;
        }
        self.outer_col = 0;
        self.outer_row += 1;
        if self.outer_row < grid.outer_rows {
            Advance::NextRow
        } else {
            *self = LayoutCursor::default();
            Advance::GridFull
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Public entry points
// ────────────────────────────────────────────────────────────────────────────

/// Lays out the groups named in `order` into grids of `grid` shape with `capacity` rows per cell.
///
/// Fails before producing anything if the configuration is invalid, if a name repeats, or if a
/// name has no group in `groups`.
pub fn flow_groups<'a>(
    order: &[String],
    groups: &'a GroupIndex,
    grid: &GridConfig,
    capacity: usize,
) -> Result<Vec<LayoutEvent<'a>>, AppError> {
    grid.validate(capacity)?;
    let resolved = resolve_order(order, groups)?;

    let mut remaining: usize = resolved.iter().map(|g| g.len()).sum();
    let mut events = Vec::with_capacity(remaining + 4 * resolved.len() + 2);
    if remaining == 0 {
        return Ok(events);
    }

    let mut cursor = LayoutCursor::default();
    events.push(LayoutEvent::OpenGrid);

    for group in resolved.into_iter().filter(|g| !g.is_empty()) {
        let mut offset = 0;
        while offset < group.rows.len() {
            let headed = offset == 0;
            let limit = if headed { capacity - HEADING_ROWS } else { capacity };
            let take = limit.min(group.rows.len() - offset);
            let cell_rows = &group.rows[offset..offset + take];

            events.push(LayoutEvent::OpenCell {
                heading: headed.then_some(group.name.as_str()),
            });
            for (i, row) in cell_rows.iter().enumerate() {
                events.push(LayoutEvent::Row {
                    row,
                    terminated: i + 1 < take,
                });
            }
            events.push(LayoutEvent::CloseCell);

            offset += take;
            remaining -= take;
            let more = remaining > 0;

            match cursor.advance(grid) {
                Advance::NextColumn if more => events.push(LayoutEvent::ColumnSeparator),
                Advance::NextRow if more => events.push(LayoutEvent::RowBreak),
                Advance::GridFull => {
                    events.push(LayoutEvent::CloseGrid);
                    if more {
                        events.push(LayoutEvent::OpenGrid);
                    }
                }
                _ => events.push(LayoutEvent::CloseGrid),
            }
        }
    }

    debug!(
        groups = order.len(),
        cells_per_grid = grid.cells_per_grid(),
        events = events.len(),
        "Flow layout complete"
    );
    Ok(events)
}

/// Group names present in `groups` but missing from `order`. Their rows are not laid out.
pub fn unlisted_groups<'a>(order: &[String], groups: &'a GroupIndex) -> Vec<&'a str> {
    let listed: HashSet<&str> = order.iter().map(String::as_str).collect();
    groups.names().filter(|name| !listed.contains(name)).collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Internal helpers
// ────────────────────────────────────────────────────────────────────────────

/// Looks up every name up front so a bad ordering fails before any event is produced.
fn resolve_order<'a>(order: &[String], groups: &'a GroupIndex) -> Result<Vec<&'a Group>, AppError> {
    let mut seen = HashSet::new();
    order
        .iter()
        .map(|name| {
            if !seen.insert(name.as_str()) {
                return Err(AppError::InvalidLayout(format!(
                    "group '{name}' is listed more than once"
                )));
            }
            groups
                .get(name)
                .ok_or_else(|| AppError::UnknownGroup(name.clone()))
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
