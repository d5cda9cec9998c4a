//! High-level summary API.
//!
//! This module provides the main entry points: read the selected sheets from
//! a workbook, reconcile them, and assemble the summary table.

use std::collections::HashMap;

use serde::Serialize;

use crate::data::{normalize_table, Notice};
use crate::options::{BuildOptions, Role};
use crate::output::format::format_cell;
use crate::output::table::SummaryTable;
use crate::reconcile::{Series, SourceTable};
use crate::source::{WorkbookSource, XlsxWorkbook};
use crate::Result;

/// Result of building a summary table.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryResult {
    /// The summary table (always 12 × 5)
    pub table: SummaryTable,
    /// Non-fatal conditions, in the order they were found
    pub notices: Vec<Notice>,
}

impl SummaryResult {
    /// Notices that point at likely data problems.
    pub fn warnings(&self) -> impl Iterator<Item = &Notice> {
        self.notices.iter().filter(|n| n.is_warning())
    }
}

/// Read, normalize and prepare every sheet selected for a role.
///
/// Sheets already in `prepared` (selected earlier, for either role) are
/// reused without being read again, so their notices are reported once.
/// Any failure aborts; notices are appended to `notices`.
pub fn load_sources<W: WorkbookSource + ?Sized>(
    workbook: &mut W,
    role: Role,
    sheets: &[String],
    options: &BuildOptions,
    prepared: &mut HashMap<String, SourceTable>,
    notices: &mut Vec<Notice>,
) -> Result<Vec<SourceTable>> {
    let mut sources = Vec::with_capacity(sheets.len());
    for sheet in sheets {
        if let Some(source) = prepared.get(sheet) {
            tracing::debug!(sheet = %sheet, role = %role, "reusing prepared source");
            sources.push(source.clone());
            continue;
        }

        let raw = workbook.read_sheet(sheet)?;
        let (table, parse_notices) = normalize_table(sheet, &raw)?;
        notices.extend(parse_notices);

        let (source, alias_notices) = SourceTable::prepare(table, options.match_mode);
        notices.extend(alias_notices);

        tracing::debug!(
            sheet = %sheet,
            role = %role,
            matched = source.categories().len(),
            "prepared source"
        );
        prepared.insert(sheet.clone(), source.clone());
        sources.push(source);
    }
    Ok(sources)
}

/// Assemble the summary table from prepared sources.
///
/// Every (category, metric) cell is resolved independently, in canonical
/// order, even when a whole category or metric is absent from the input.
pub fn assemble(mean: &[SourceTable], sd: &[SourceTable], options: &BuildOptions) -> SummaryTable {
    SummaryTable::from_fn(|category, metric| {
        let mean_text = Series::resolve(Role::Mean, mean, category, metric)
            .render(options.decimal_places, options.number_style);
        let sd_text = Series::resolve(Role::Sd, sd, category, metric)
            .render(options.decimal_places, options.number_style);
        format_cell(&mean_text, &sd_text)
    })
}

/// Build a summary table from a workbook.
///
/// Validates the options, reads every selected sheet, and only then
/// assembles the table, so a fatal error never yields partial output.
///
/// # Example
///
/// ```rust
/// use meansdlib::{build_summary, BuildOptions, Category, MemoryWorkbook, Metric, RawCell, RawTable};
///
/// let mean = RawTable::new(["Sheet", "FIRST_VISIT_TO_ACCEPT"])
///     .with_row([RawCell::from("Haematological"), RawCell::from(12.0)]);
/// let sd = RawTable::new(["Sheet", "FIRST_VISIT_TO_ACCEPT"])
///     .with_row([RawCell::from("Haematological"), RawCell::from(3.0)]);
/// let mut workbook = MemoryWorkbook::new()
///     .with_sheet("Mean", mean)
///     .with_sheet("SD", sd);
///
/// let options = BuildOptions::new().mean_source("Mean").sd_source("SD");
/// let result = build_summary(&mut workbook, &options).unwrap();
///
/// let cell = result.table.cell(Category::Haematological, Metric::FirstVisitToAcceptance);
/// assert_eq!(cell, "12 (3)");
/// assert_eq!(result.table.cell(Category::Breast, Metric::FirstVisitToAcceptance), "\u{2013}");
/// ```
pub fn build_summary<W: WorkbookSource + ?Sized>(
    workbook: &mut W,
    options: &BuildOptions,
) -> Result<SummaryResult> {
    options.validate()?;

    let mut notices = Vec::new();
    let mut prepared = HashMap::new();
    let mean = load_sources(
        workbook,
        Role::Mean,
        &options.mean_sources,
        options,
        &mut prepared,
        &mut notices,
    )?;
    let sd = load_sources(
        workbook,
        Role::Sd,
        &options.sd_sources,
        options,
        &mut prepared,
        &mut notices,
    )?;

    let table = assemble(&mean, &sd, options);
    Ok(SummaryResult { table, notices })
}

/// Build a summary table from workbook bytes (xlsx, xls, xlsb or ods).
pub fn build_summary_from_bytes(bytes: Vec<u8>, options: &BuildOptions) -> Result<SummaryResult> {
    let mut workbook = XlsxWorkbook::from_bytes(bytes)?;
    build_summary(&mut workbook, options)
}
