//! Report pipeline — builds, writes and typesets each selected report.
//!
//! Each report is rendered completely in memory before its file is created, so a lookup or
//! configuration failure never leaves a partial `.tex` behind. Reports run one after another
//! and share nothing but the immutable inventory.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::errors::AppError;
use crate::inventory::{group_by_location, group_for_store, median_group_size, stores_in_order};
use crate::layout::flow::{flow_groups, unlisted_groups, LayoutStats};
use crate::layout::grid::RowStyle;
use crate::models::{GroupIndex, InventoryRow};
use crate::render::{render_document, TypesetOutcome, Typesetter};
use crate::reports::catalog::{CapacityPolicy, ReportCatalog};

// ────────────────────────────────────────────────────────────────────────────
// Types
// ────────────────────────────────────────────────────────────────────────────

/// Everything needed to lay out one report.
#[derive(Debug, Clone)]
pub struct ReportPlan {
    /// Name used for selection and logging: the master title or the store name.
    pub name: String,
    pub title: String,
    pub groups: GroupIndex,
    pub order: Vec<String>,
    pub capacity: CapacityPolicy,
    pub style: RowStyle,
}

/// A report rendered to markup but not yet written.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedReport {
    pub name: String,
    pub file_stem: String,
    pub markup: String,
    pub capacity: usize,
    pub stats: LayoutStats,
}

/// What happened to one report.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportOutput {
    pub name: String,
    pub tex_path: PathBuf,
    pub stats: LayoutStats,
    /// `None` when typesetting was skipped.
    pub typeset: Option<TypesetOutcome>,
}

/// Runs reports against one catalog and output directory.
#[derive(Debug, Clone)]
pub struct ReportRunner {
    catalog: ReportCatalog,
    output_dir: PathBuf,
    typesetter: Option<Typesetter>,
}

// ────────────────────────────────────────────────────────────────────────────
// Runner
// ────────────────────────────────────────────────────────────────────────────

impl ReportRunner {
    /// `typesetter: None` writes `.tex` files only.
    pub fn new(catalog: ReportCatalog, output_dir: PathBuf, typesetter: Option<Typesetter>) -> Self {
        Self {
            catalog,
            output_dir,
            typesetter,
        }
    }

    /// Names of every report the inventory can produce: the master inventory, then each store.
    pub fn report_names(&self, rows: &[InventoryRow]) -> Vec<String> {
        std::iter::once(self.catalog.master.title.clone())
            .chain(stores_in_order(rows))
            .collect()
    }

    /// Plans the selected reports (all when `selection` is empty), in report-name order.
    pub fn plan(&self, rows: &[InventoryRow], selection: &[String]) -> Result<Vec<ReportPlan>, AppError> {
        let available = self.report_names(rows);
        if let Some(unknown) = selection.iter().find(|s| !available.contains(s)) {
            return Err(AppError::UnknownReport(unknown.clone()));
        }
        let wanted = |name: &str| selection.is_empty() || selection.iter().any(|s| s == name);

        let mut plans = Vec::new();
        let master = &self.catalog.master;
        if wanted(master.title.as_str()) {
            plans.push(ReportPlan {
                name: master.title.clone(),
                title: master.title.clone(),
                groups: group_by_location(rows),
                order: master.group_order.clone(),
                capacity: master.capacity,
                style: RowStyle::Plain,
            });
        }

        for store in stores_in_order(rows) {
            if store == master.title || !wanted(store.as_str()) {
                continue;
            }
            let groups = group_for_store(rows, &store);
            let (order, capacity) = match self.catalog.store(&store) {
                Some(report) => (report.department_order.clone(), report.capacity),
                None => (
                    groups.names().map(str::to_string).collect(),
                    CapacityPolicy::Fixed(self.catalog.default_store_capacity),
                ),
            };
            plans.push(ReportPlan {
                name: store.clone(),
                title: store,
                groups,
                order,
                capacity,
                style: RowStyle::Checklist,
            });
        }
        Ok(plans)
    }

    /// Lays out and renders one report to markup.
    pub fn render(&self, plan: &ReportPlan) -> Result<RenderedReport, AppError> {
        let capacity = resolve_capacity(plan.capacity, &plan.groups)?;

        let skipped = unlisted_groups(&plan.order, &plan.groups);
        if !skipped.is_empty() {
            let rows: usize = skipped
                .iter()
                .filter_map(|name| plan.groups.get(name))
                .map(|g| g.len())
                .sum();
            warn!(
                report = %plan.name,
                groups = ?skipped,
                rows,
                "Groups missing from the report ordering are left out"
            );
        }

        let grid = &self.catalog.grid;
        grid.validate_style(plan.style)?;
        debug!(
            report = %plan.name,
            groups = plan.groups.len(),
            capacity,
            "Laying out report"
        );
        let events = flow_groups(&plan.order, &plan.groups, grid, capacity)?;
        let stats = LayoutStats::from_events(&events);
        let markup = render_document(&plan.title, &events, grid, plan.style);

        Ok(RenderedReport {
            name: plan.name.clone(),
            file_stem: file_stem(&plan.name),
            markup,
            capacity,
            stats,
        })
    }

    /// Renders, writes and typesets every selected report, stopping at the first failure.
    pub fn run(&self, rows: &[InventoryRow], selection: &[String]) -> Result<Vec<ReportOutput>, AppError> {
        let plans = self.plan(rows, selection)?;
        let mut outputs = Vec::with_capacity(plans.len());

        for plan in &plans {
            let rendered = self.render(plan)?;
            let tex_path = write_report(&self.output_dir, &rendered)?;
            info!(
                report = %rendered.name,
                path = %tex_path.display(),
                capacity = rendered.capacity,
                grids = rendered.stats.grids,
                cells = rendered.stats.cells,
                rows = rendered.stats.rows,
                "Report written"
            );
            let typeset = self.typesetter.as_ref().map(|t| t.typeset(&tex_path));
            outputs.push(ReportOutput {
                name: rendered.name,
                tex_path,
                stats: rendered.stats,
                typeset,
            });
        }
        Ok(outputs)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

/// File name (without extension) for a report: spaces become `_`, apostrophes are dropped.
pub fn file_stem(name: &str) -> String {
    name.replace(' ', "_").replace('\'', "")
}

fn resolve_capacity(policy: CapacityPolicy, groups: &GroupIndex) -> Result<usize, AppError> {
    if groups.is_empty() {
        return Err(AppError::InvalidLayout(
            "cannot lay out a report with no rows".to_string(),
        ));
    }
    match policy {
        CapacityPolicy::Fixed(n) => Ok(n),
        CapacityPolicy::MedianGroupSize => median_group_size(groups).ok_or_else(|| {
            AppError::InvalidLayout("cannot size cells from a report with no rows".to_string())
        }),
    }
}

fn write_report(output_dir: &Path, report: &RenderedReport) -> Result<PathBuf, AppError> {
    std::fs::create_dir_all(output_dir).map_err(|source| AppError::Output {
        path: output_dir.to_path_buf(),
        source,
    })?;
    let path = output_dir.join(format!("{}.tex", report.file_stem));
    std::fs::write(&path, &report.markup).map_err(|source| AppError::Output {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
