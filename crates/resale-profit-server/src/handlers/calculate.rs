use axum::{extract::rejection::JsonRejection, Json};

use resale_profit_core::profit::calculator::{self, ScenarioInput, ScenarioResult};
use resale_profit_core::scenarios::expander::{self, ScenarioOutput};
use resale_profit_core::ComputationOutput;

use super::ScenarioRequest;
use crate::error::AppError;

pub async fn calculate(
    body: Result<Json<ScenarioInput>, JsonRejection>,
) -> Result<Json<ComputationOutput<ScenarioResult>>, AppError> {
    let Json(input) = body?;
    let output = calculator::compute(&input)?;
    Ok(Json(output))
}

pub async fn scenarios(
    body: Result<Json<ScenarioRequest>, JsonRejection>,
) -> Result<Json<ComputationOutput<ScenarioOutput>>, AppError> {
    let Json(req) = body?;
    let output = expander::expand(&req.base, &req.toggles)?;
    Ok(Json(output))
}
