pub mod calculate;
pub mod export;
pub mod verify;

use resale_profit_core::profit::calculator::ScenarioInput;
use resale_profit_core::scenarios::expander::ScenarioToggles;
use serde::Deserialize;

/// Body shared by the scenario and export endpoints.
#[derive(Debug, Deserialize)]
pub struct ScenarioRequest {
    pub base: ScenarioInput,
    #[serde(default)]
    pub toggles: ScenarioToggles,
}
