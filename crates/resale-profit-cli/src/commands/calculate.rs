use clap::Args;
use serde_json::Value;

use resale_profit_core::profit::calculator;

use super::listing::ListingArgs;

/// Arguments for a single-listing calculation
#[derive(Args)]
pub struct CalculateArgs {
    #[command(flatten)]
    pub listing: ListingArgs,
}

pub fn run_calculate(args: CalculateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let input = args.listing.resolve()?;
    let result = calculator::compute(&input)?;
    Ok(serde_json::to_value(result)?)
}
