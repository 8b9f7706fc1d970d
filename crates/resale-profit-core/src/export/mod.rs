pub mod columns;
pub mod csv_out;
pub mod xlsx;

use chrono::{Local, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::profit::calculator::CostModel;
use crate::scenarios::expander::ScenarioRow;
use crate::{types::*, CalcResult, ProfitError};

/// Byte-order marker prepended to CSV downloads so spreadsheet tools pick
/// UTF-8.
pub const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    /// Workbook with every figure precomputed.
    #[default]
    Values,
    /// Workbook whose derived columns are live spreadsheet formulas.
    Formulas,
    /// Scenario table as BOM-prefixed UTF-8 CSV.
    Csv,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Values => "values",
            Self::Formulas => "formulas",
            Self::Csv => "csv",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Values | Self::Formulas => "xlsx",
            Self::Csv => "csv",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Values | Self::Formulas => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
            Self::Csv => "text/csv; charset=utf-8",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = ProfitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "values" | "xlsx" => Ok(Self::Values),
            "formulas" | "formula" => Ok(Self::Formulas),
            "csv" => Ok(Self::Csv),
            other => Err(ProfitError::invalid(
                "format",
                format!("unknown export format '{other}' (expected values, formulas or csv)"),
            )),
        }
    }
}

impl From<rust_xlsxwriter::XlsxError> for ProfitError {
    fn from(e: rust_xlsxwriter::XlsxError) -> Self {
        ProfitError::Export(e.to_string())
    }
}

impl From<csv::Error> for ProfitError {
    fn from(e: csv::Error) -> Self {
        ProfitError::Export(e.to_string())
    }
}

/// A single spreadsheet cell before it is handed to a writer.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(Decimal),
}

impl Cell {
    fn money(value: Decimal) -> Self {
        Cell::Number(value)
    }

    /// Margins coming out of `compute` are guaranteed to fit as a percentage.
    fn pct(rate: Rate) -> Self {
        Cell::Number(rate_to_pct(rate))
    }

    /// Text as it appears in a CSV field.
    pub fn to_field(&self) -> String {
        match self {
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => n.normalize().to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Serialize scenario rows, stamping the values workbook with the local time.
pub fn export(rows: &[ScenarioRow], format: ExportFormat) -> CalcResult<Vec<u8>> {
    export_at(rows, format, Local::now().naive_local())
}

/// Serialize scenario rows with an explicit generation time.
///
/// The rows are only read; on failure they can be exported again unchanged.
pub fn export_at(
    rows: &[ScenarioRow],
    format: ExportFormat,
    generated_at: NaiveDateTime,
) -> CalcResult<Vec<u8>> {
    tracing::debug!(rows = rows.len(), format = %format, "exporting scenarios");

    let bytes = match format {
        ExportFormat::Values => xlsx::write_values(rows, generated_at)?,
        ExportFormat::Formulas => {
            ensure_formula_compatible(rows)?;
            xlsx::write_formulas(rows)?
        }
        ExportFormat::Csv => csv_out::write_csv(rows)?,
    };

    tracing::debug!(bytes = bytes.len(), format = %format, "export complete");
    Ok(bytes)
}

/// Download name, e.g. `resale_profit_results_20250101_093000.xlsx`.
pub fn export_file_name(format: ExportFormat, generated_at: NaiveDateTime) -> String {
    format!(
        "resale_profit_results_{}.{}",
        generated_at.format("%Y%m%d_%H%M%S"),
        format.extension()
    )
}

/// Values-layout cells for one row.
pub fn values_cells(row: &ScenarioRow, generated_at: NaiveDateTime) -> Vec<Cell> {
    let i = &row.input;
    let r = &row.result;
    vec![
        Cell::Text(generated_at.format(TIMESTAMP_FORMAT).to_string()),
        Cell::Text(row.label.clone()),
        Cell::money(i.price),
        Cell::pct(i.discount_rate),
        Cell::pct(i.return_rate),
        Cell::pct(i.ad_rate),
        Cell::pct(i.commission_rate),
        Cell::money(i.unit_cost),
        Cell::money(i.first_leg),
        Cell::money(i.fulfillment_fee),
        Cell::money(i.extra_cost),
        Cell::Number(Decimal::from(i.quantity)),
        Cell::money(r.price_after_discount),
        Cell::money(r.revenue_per_unit),
        Cell::money(r.total_revenue),
        Cell::money(r.commission_per_unit),
        Cell::money(r.total_commission),
        Cell::money(r.ad_cost_per_unit),
        Cell::money(r.total_ad_cost),
        Cell::money(r.return_cost_per_unit),
        Cell::money(r.cost_ex_ad_per_unit),
        Cell::money(r.total_cost_ex_ad),
        Cell::money(r.gross_profit_per_unit),
        Cell::money(r.total_gross_profit),
        Cell::pct(r.gross_margin),
        Cell::money(r.net_profit_per_unit),
        Cell::money(r.total_net_profit),
        Cell::pct(r.net_margin),
    ]
}

/// Scenario-table literal cells, columns A–H.
pub fn scenario_literal_cells(row: &ScenarioRow) -> Vec<Cell> {
    let i = &row.input;
    vec![
        Cell::Text(row.label.clone()),
        Cell::money(row.result.price_after_discount),
        Cell::money(i.first_leg),
        Cell::money(i.fulfillment_fee),
        Cell::pct(i.commission_rate),
        Cell::pct(i.ad_rate),
        Cell::pct(i.return_rate),
        Cell::money(i.other_cost_per_unit()),
    ]
}

/// Scenario-table derived cells, columns I–O, precomputed per unit.
pub fn scenario_derived_cells(row: &ScenarioRow) -> Vec<Cell> {
    let r = &row.result;
    vec![
        Cell::money(r.commission_per_unit),
        Cell::money(r.ad_cost_per_unit),
        Cell::money(r.return_cost_per_unit),
        Cell::money(r.gross_profit_per_unit),
        Cell::pct(r.gross_margin),
        Cell::money(r.net_profit_per_unit),
        Cell::pct(r.net_margin),
    ]
}

fn ensure_formula_compatible(rows: &[ScenarioRow]) -> CalcResult<()> {
    if let Some(row) = rows
        .iter()
        .find(|r| r.input.cost_model != CostModel::ReturnAsCost)
    {
        return Err(ProfitError::invalid(
            "cost_model",
            format!(
                "Formula export encodes the {} model; row '{}' was computed with {}.",
                CostModel::ReturnAsCost,
                row.label,
                row.input.cost_model
            ),
        ));
    }
    Ok(())
}
