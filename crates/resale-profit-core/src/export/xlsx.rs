use chrono::NaiveDateTime;
use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::{Format, Formula, Workbook, Worksheet};

use super::columns::{scenario_formulas, SCENARIO_HEADERS, VALUES_HEADERS};
use super::{scenario_literal_cells, values_cells, Cell};
use crate::scenarios::expander::ScenarioRow;
use crate::CalcResult;

pub const VALUES_SHEET: &str = "Results";
pub const FORMULAS_SHEET: &str = "Scenarios";

/// Workbook with one row per scenario, every figure precomputed.
pub fn write_values(rows: &[ScenarioRow], generated_at: NaiveDateTime) -> CalcResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name(VALUES_SHEET)?;
        write_headers(sheet, &VALUES_HEADERS)?;

        for (idx, row) in rows.iter().enumerate() {
            let r = data_row(idx);
            for (col, cell) in values_cells(row, generated_at).iter().enumerate() {
                write_cell(sheet, r, col as u16, cell)?;
            }
        }
    }
    Ok(workbook.save_to_buffer()?)
}

/// Workbook whose columns I–O recompute from A–H inside the spreadsheet.
pub fn write_formulas(rows: &[ScenarioRow]) -> CalcResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name(FORMULAS_SHEET)?;
        write_headers(sheet, &SCENARIO_HEADERS)?;

        for (idx, row) in rows.iter().enumerate() {
            let r = data_row(idx);
            let literals = scenario_literal_cells(row);
            for (col, cell) in literals.iter().enumerate() {
                write_cell(sheet, r, col as u16, cell)?;
            }
            // Formulas use 1-based row numbers
            for (offset, formula) in scenario_formulas(r + 1).into_iter().enumerate() {
                let col = (literals.len() + offset) as u16;
                sheet.write_formula(r, col, Formula::new(formula))?;
            }
        }
    }
    Ok(workbook.save_to_buffer()?)
}

fn data_row(idx: usize) -> u32 {
    idx as u32 + 1
}

fn write_headers(sheet: &mut Worksheet, headers: &[&str]) -> CalcResult<()> {
    let bold = Format::new().set_bold();
    for (col, header) in headers.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, &bold)?;
        sheet.set_column_width(col as u16, header.len().max(10) as f64 + 2.0)?;
    }
    Ok(())
}

fn write_cell(sheet: &mut Worksheet, row: u32, col: u16, cell: &Cell) -> CalcResult<()> {
    match cell {
        Cell::Text(s) => {
            sheet.write_string(row, col, s)?;
        }
        Cell::Number(n) => {
            sheet.write_number(row, col, n.to_f64().unwrap_or_default())?;
        }
    }
    Ok(())
}
