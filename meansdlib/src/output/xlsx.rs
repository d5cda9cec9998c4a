//! Excel export of a summary table.

use std::path::Path;

use rust_xlsxwriter::{Workbook, XlsxError};

use crate::error::MeansdError;
use crate::Result;

use super::table::SummaryTable;

/// Name of the single sheet in exported workbooks.
pub const OUTPUT_SHEET_NAME: &str = "Mean_SD_Table";

fn write_error(e: XlsxError) -> MeansdError {
    MeansdError::WorkbookWrite(e.to_string())
}

fn build_workbook(table: &SummaryTable) -> Result<Workbook> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(OUTPUT_SHEET_NAME).map_err(write_error)?;

    for (row_idx, record) in table.to_grid().iter().enumerate() {
        let row_num = u32::try_from(row_idx)
            .map_err(|_| MeansdError::WorkbookWrite("row index overflow".into()))?;
        for (col_idx, value) in record.iter().enumerate() {
            let col_num = u16::try_from(col_idx)
                .map_err(|_| MeansdError::WorkbookWrite("column index overflow".into()))?;
            worksheet
                .write_string(row_num, col_num, value)
                .map_err(write_error)?;
        }
    }

    Ok(workbook)
}

/// Serialize a summary table to xlsx bytes.
pub fn to_xlsx_bytes(table: &SummaryTable) -> Result<Vec<u8>> {
    let mut workbook = build_workbook(table)?;
    workbook.save_to_buffer().map_err(write_error)
}

/// Write a summary table to an xlsx file.
pub fn save_xlsx(table: &SummaryTable, path: impl AsRef<Path>) -> Result<()> {
    let bytes = to_xlsx_bytes(table)?;
    std::fs::write(path.as_ref(), bytes)?;
    tracing::debug!(path = %path.as_ref().display(), "wrote summary workbook");
    Ok(())
}
