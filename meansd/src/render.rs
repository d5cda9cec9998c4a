//! Template contexts and theme for CLI output using outstanding

use console::Style;
use meansdlib::{NormalizedTable, SummaryTable};
use outstanding::{render_with_output, OutputMode, Theme};
use serde::Serialize;

/// Include templates at compile time
pub const SUMMARY_TABLE_TEMPLATE: &str = include_str!("../templates/summary_table.jinja");
pub const PREVIEW_TEMPLATE: &str = include_str!("../templates/preview.jinja");
pub const SHEETS_TEMPLATE: &str = include_str!("../templates/sheets.jinja");

/// Row data for template rendering (pre-formatted)
#[derive(Debug, Serialize)]
pub struct TemplateRow {
    /// Pre-padded label (left-aligned)
    pub label: String,
    /// Pre-padded cells (left-aligned, padded to column width)
    pub cells: Vec<String>,
}

/// Data context for the table templates
#[derive(Debug, Serialize)]
pub struct TableContext {
    /// Optional title above the table
    pub title: Option<String>,
    /// Pre-padded header line
    pub header: String,
    /// Separator line (dashes)
    pub separator: String,
    /// Data rows
    pub rows: Vec<TemplateRow>,
}

/// Data context for the sheet listing
#[derive(Debug, Serialize)]
pub struct SheetsContext {
    pub sheets: Vec<String>,
}

/// Create the theme with styles
pub fn create_theme() -> Theme {
    Theme::new()
        .add("category", Style::new().bold())
        .add("header", Style::new().bold())
        .add("title", Style::new().cyan().bold())
}

/// Display width of a cell (en dashes and similar count as one column)
fn width(s: &str) -> usize {
    console::measure_text_width(s)
}

fn pad(s: &str, to: usize) -> String {
    let fill = to.saturating_sub(width(s));
    format!("{s}{}", " ".repeat(fill))
}

/// Lay out a grid (first row = headers) as padded columns.
fn build_context(title: Option<String>, grid: &[Vec<String>]) -> TableContext {
    let columns = grid.iter().map(Vec::len).max().unwrap_or(0);
    let widths: Vec<usize> = (0..columns)
        .map(|c| {
            grid.iter()
                .filter_map(|row| row.get(c))
                .map(|s| width(s))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let format_row = |row: &[String]| -> Vec<String> {
        widths
            .iter()
            .enumerate()
            .map(|(c, w)| pad(row.get(c).map(String::as_str).unwrap_or(""), *w))
            .collect()
    };

    let mut lines = grid.iter().map(|row| format_row(row));
    let header = lines.next().map(|cells| cells.join("  ")).unwrap_or_default();
    let total_width = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);

    let rows = lines
        .map(|mut cells| {
            let label = if cells.is_empty() {
                String::new()
            } else {
                cells.remove(0)
            };
            TemplateRow { label, cells }
        })
        .collect();

    TableContext {
        title,
        header,
        separator: "-".repeat(total_width),
        rows,
    }
}

/// Template context for the summary table
pub fn summary_context(table: &SummaryTable) -> TableContext {
    build_context(None, &table.to_grid())
}

/// Template context for the first rows of a normalized sheet
pub fn preview_context(table: &NormalizedTable) -> TableContext {
    let mut grid = vec![std::iter::once(table.key_column.clone())
        .chain(table.columns.iter().cloned())
        .collect::<Vec<_>>()];
    for key in table.row_keys() {
        let values = table.row(key).unwrap_or_default();
        grid.push(
            std::iter::once(key.to_string())
                .chain(
                    values
                        .iter()
                        .map(|v| v.map(|n| n.to_string()).unwrap_or_default()),
                )
                .collect(),
        );
    }
    let title = format!("{} ({} rows shown)", table.sheet, table.len());
    build_context(Some(title), &grid)
}

/// Render a handler value outside the App dispatch (root command)
pub fn render_value(
    template: &str,
    value: &serde_json::Value,
    output_mode: OutputMode,
) -> Result<String, anyhow::Error> {
    let theme = create_theme();
    render_with_output(template, value, &theme, output_mode)
        .map_err(|e| anyhow::anyhow!("failed to render output: {e}"))
}
