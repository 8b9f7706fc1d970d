use clap::Args;
use serde_json::{Map, Value};

use resale_profit_core::export::columns::SCENARIO_HEADERS;
use resale_profit_core::export::{scenario_derived_cells, scenario_literal_cells};
use resale_profit_core::scenarios::expander::{self, ScenarioRow, ScenarioToggles};

use super::listing::{ListingArgs, ToggleArgs};

/// Arguments for discount scenario comparison
#[derive(Args)]
pub struct ScenariosArgs {
    #[command(flatten)]
    pub listing: ListingArgs,

    #[command(flatten)]
    pub toggles: ToggleArgs,
}

pub fn run_scenarios(args: ScenariosArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let input = args.listing.resolve()?;
    let toggles = ScenarioToggles::from(&args.toggles);
    let out = expander::expand(&input, &toggles)?;

    let table: Vec<Value> = out.result.results.iter().map(table_row).collect();

    Ok(serde_json::json!({
        "results": table,
        "methodology": out.methodology,
        "assumptions": out.assumptions,
        "warnings": out.warnings,
        "metadata": out.metadata,
    }))
}

/// One results-table row keyed by the scenario-table headers.
pub fn table_row(row: &ScenarioRow) -> Value {
    let cells = scenario_literal_cells(row)
        .into_iter()
        .chain(scenario_derived_cells(row));
    let map: Map<String, Value> = SCENARIO_HEADERS
        .iter()
        .zip(cells)
        .map(|(h, c)| (h.to_string(), Value::String(c.to_field())))
        .collect();
    Value::Object(map)
}
