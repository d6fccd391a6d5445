//! LaTeX document assembly.
//!
//! Turns a flow layout into a two-level table: an outer `tabular` of fixed-width `p{}` cells per
//! page, each cell holding an inner `tabular` of item rows. The preamble and footer are static.

use crate::layout::flow::LayoutEvent;
use crate::layout::grid::{GridConfig, RowStyle};
use crate::render::escape::escape_specials;
use crate::render::row::RowRenderer;

const PREAMBLE: &[&str] = &[
    r"\documentclass{article}",
    r"\usepackage{array}",
    r"\usepackage{geometry}",
    r"\geometry{letterpaper, landscape, margin=0.25in}",
    r"\begin{document}",
];

const FOOTER: &str = r"\end{document}";

/// Renders a complete document: preamble, bold title line, laid-out grids, footer.
pub fn render_document(
    title: &str,
    events: &[LayoutEvent<'_>],
    grid: &GridConfig,
    style: RowStyle,
) -> String {
    let mut out = String::new();
    for line in PREAMBLE {
        out.push_str(line);
        out.push('\n');
    }
    out.push_str(&format!(r"\textbf{{{}}}\newline", escape_specials(title)));
    out.push('\n');
    render_body(&mut out, events, grid, style);
    out.push_str(FOOTER);
    out.push('\n');
    out
}

/// Appends the markup for `events` to `out`.
pub fn render_body(out: &mut String, events: &[LayoutEvent<'_>], grid: &GridConfig, style: RowStyle) {
    let renderer = RowRenderer::new(&grid.columns, style);
    let outer_spec = format!(" p{{{}in}} ", grid.cell_width_in).repeat(grid.outer_cols);
    let inner_spec = grid.inner_alignment();

    for event in events {
        match event {
            LayoutEvent::OpenGrid => {
                out.push_str(&format!("  \\begin{{tabular}}[t]{{{outer_spec}}}\n"));
            }
            LayoutEvent::OpenCell { heading } => {
                out.push_str(&format!("    \\begin{{tabular}}[t]{{{inner_spec}}}\n"));
                out.push_str("    \\\\\n");
                if let Some(name) = heading {
                    out.push_str(&format!("    {} \\\\\n", renderer.heading_line(name)));
                    out.push_str("    \\hline\n");
                    out.push_str("    \\\\\n");
                }
            }
            LayoutEvent::Row { row, terminated } => {
                out.push_str("      ");
                out.push_str(&renderer.row_line(row));
                if *terminated {
                    out.push_str(" \\\\\n");
                }
            }
            LayoutEvent::CloseCell => out.push_str("\n    \\end{tabular}\n"),
            LayoutEvent::ColumnSeparator => out.push_str("    &\n"),
            LayoutEvent::RowBreak => out.push_str("  \\\\\n  \\\\\n"),
            LayoutEvent::CloseGrid => out.push_str("  \\end{tabular}\n"),
        }
    }
}
