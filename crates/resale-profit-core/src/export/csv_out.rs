use super::columns::SCENARIO_HEADERS;
use super::{scenario_derived_cells, scenario_literal_cells, UTF8_BOM};
use crate::scenarios::expander::ScenarioRow;
use crate::{CalcResult, ProfitError};

/// Scenario table as CSV, prefixed with a UTF-8 byte-order marker.
pub fn write_csv(rows: &[ScenarioRow]) -> CalcResult<Vec<u8>> {
    let mut wtr = csv::Writer::from_writer(UTF8_BOM.to_vec());
    wtr.write_record(SCENARIO_HEADERS)?;

    for row in rows {
        let record: Vec<String> = scenario_literal_cells(row)
            .iter()
            .chain(scenario_derived_cells(row).iter())
            .map(|c| c.to_field())
            .collect();
        wtr.write_record(&record)?;
    }

    wtr.flush().map_err(|e| ProfitError::Export(e.to_string()))?;
    wtr.into_inner()
        .map_err(|e| ProfitError::Export(e.to_string()))
}
