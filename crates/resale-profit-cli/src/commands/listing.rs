use clap::{Args, ValueEnum};
use rust_decimal::Decimal;

use resale_profit_core::pct_to_rate;
use resale_profit_core::profit::calculator::{CostModel, ScenarioInput};
use resale_profit_core::scenarios::expander::ScenarioToggles;

use crate::input;

/// Listing inputs shared by every subcommand. Rates are given in percent.
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct ListingArgs {
    /// Path to a JSON or YAML listing file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Listing price
    #[arg(long)]
    pub price: Option<Decimal>,

    /// Discount off the listing price, in percent
    #[arg(long, default_value = "0")]
    pub discount_pct: Decimal,

    /// Share of units returned, in percent
    #[arg(long, default_value = "0")]
    pub return_pct: Decimal,

    /// Advertising spend as a share of price, in percent
    #[arg(long, default_value = "0")]
    pub ad_pct: Decimal,

    /// Marketplace commission, in percent
    #[arg(long)]
    pub commission_pct: Option<Decimal>,

    /// Product cost per unit
    #[arg(long, default_value = "0")]
    pub unit_cost: Decimal,

    /// First-leg freight per unit
    #[arg(long)]
    pub first_leg: Option<Decimal>,

    /// Fulfillment fee per unit
    #[arg(long, alias = "fba")]
    pub fulfillment_fee: Option<Decimal>,

    /// Any other cost per unit
    #[arg(long, default_value = "0")]
    pub extra_cost: Decimal,

    /// Units sold
    #[arg(long, default_value_t = 1)]
    pub quantity: u32,

    /// How returns are charged
    #[arg(long, value_enum, default_value = "cost")]
    pub model: ModelArg,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ModelArg {
    /// Returned units shrink revenue
    Revenue,
    /// Returns are a cost charged on the sale price
    Cost,
}

impl From<ModelArg> for CostModel {
    fn from(m: ModelArg) -> Self {
        match m {
            ModelArg::Revenue => CostModel::ReturnReducesRevenue,
            ModelArg::Cost => CostModel::ReturnAsCost,
        }
    }
}

/// Discount scenario switches
#[derive(Args)]
pub struct ToggleArgs {
    /// Add a 20%-off scenario
    #[arg(long)]
    pub twenty_off: bool,

    /// Add a 50%-off scenario
    #[arg(long)]
    pub fifty_off: bool,

    /// Custom discount in percent, 0 to 90 in steps of 5 (0 disables)
    #[arg(long, default_value_t = 0)]
    pub custom_discount: u32,
}

impl From<&ToggleArgs> for ScenarioToggles {
    fn from(t: &ToggleArgs) -> Self {
        ScenarioToggles {
            twenty_off: t.twenty_off,
            fifty_off: t.fifty_off,
            custom_discount_pct: t.custom_discount,
        }
    }
}

impl ListingArgs {
    /// Resolve the listing from `--input`, piped stdin, or the flags, in that
    /// order.
    pub fn resolve(&self) -> Result<ScenarioInput, Box<dyn std::error::Error>> {
        if let Some(ref path) = self.input {
            return input::file::read_input(path);
        }
        if let Some(data) = input::stdin::read_stdin()? {
            return Ok(serde_json::from_value(data)?);
        }
        self.from_flags()
    }

    fn from_flags(&self) -> Result<ScenarioInput, Box<dyn std::error::Error>> {
        Ok(ScenarioInput {
            price: self.price.ok_or("--price is required (or provide --input)")?,
            discount_rate: pct_to_rate(self.discount_pct),
            return_rate: pct_to_rate(self.return_pct),
            ad_rate: pct_to_rate(self.ad_pct),
            commission_rate: pct_to_rate(
                self.commission_pct
                    .ok_or("--commission-pct is required (or provide --input)")?,
            ),
            unit_cost: self.unit_cost,
            first_leg: self
                .first_leg
                .ok_or("--first-leg is required (or provide --input)")?,
            fulfillment_fee: self
                .fulfillment_fee
                .ok_or("--fulfillment-fee is required (or provide --input)")?,
            extra_cost: self.extra_cost,
            quantity: self.quantity,
            cost_model: self.model.into(),
        })
    }
}
