use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use crate::{types::*, CalcResult, ProfitError};

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

/// How the return rate enters the profit calculation.
///
/// Commission and advertising are charged on the post-discount price under
/// both models. They differ only in what a returned unit costs the seller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostModel {
    /// Returns shrink the revenue base; margins are taken on effective revenue.
    ReturnReducesRevenue,
    /// Returns are a flat cost against the sale price, charged after
    /// advertising; margins are taken on the post-discount price. This is the
    /// model the formula spreadsheet encodes.
    #[default]
    ReturnAsCost,
}

impl CostModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ReturnReducesRevenue => "return_reduces_revenue",
            Self::ReturnAsCost => "return_as_cost",
        }
    }
}

impl fmt::Display for CostModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CostModel {
    type Err = ProfitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "return_reduces_revenue" | "revenue" => Ok(Self::ReturnReducesRevenue),
            "return_as_cost" | "cost" => Ok(Self::ReturnAsCost),
            other => Err(ProfitError::invalid(
                "cost_model",
                format!("unknown cost model '{other}' (expected return_reduces_revenue or return_as_cost)"),
            )),
        }
    }
}

fn default_quantity() -> u32 {
    1
}

/// One price point to evaluate. Rates are fractions (0.15 = 15%).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioInput {
    pub price: Money,
    #[serde(default)]
    pub discount_rate: Rate,
    pub return_rate: Rate,
    pub ad_rate: Rate,
    pub commission_rate: Rate,
    /// Product cost per unit
    #[serde(default)]
    pub unit_cost: Money,
    /// First-leg freight per unit, origin to fulfillment warehouse
    pub first_leg: Money,
    /// Marketplace pick/pack/ship fee per unit
    pub fulfillment_fee: Money,
    #[serde(default)]
    pub extra_cost: Money,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub cost_model: CostModel,
}

impl ScenarioInput {
    /// Product cost and other per-unit cost combined; the single
    /// "other cost" column of the formula spreadsheet.
    pub fn other_cost_per_unit(&self) -> Money {
        self.unit_cost + self.extra_cost
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub price_after_discount: Money,
    pub revenue_per_unit: Money,
    pub total_revenue: Money,
    pub commission_per_unit: Money,
    pub total_commission: Money,
    pub ad_cost_per_unit: Money,
    pub total_ad_cost: Money,
    pub return_cost_per_unit: Money,
    pub cost_ex_ad_per_unit: Money,
    pub total_cost_ex_ad: Money,
    pub gross_profit_per_unit: Money,
    pub total_gross_profit: Money,
    pub gross_margin: Rate,
    pub net_profit_per_unit: Money,
    pub total_net_profit: Money,
    pub net_margin: Rate,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compute unit economics for a single scenario.
///
/// Inputs are validated first; nothing is calculated for an invalid input.
/// Margins with a zero revenue base are reported as 0.
pub fn compute(input: &ScenarioInput) -> CalcResult<ComputationOutput<ScenarioResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    // -- Validation ----------------------------------------------------------
    validate_input(input)?;

    let combined_rate = match input.cost_model {
        CostModel::ReturnReducesRevenue => input.commission_rate + input.ad_rate,
        CostModel::ReturnAsCost => input.commission_rate + input.ad_rate + input.return_rate,
    };
    if combined_rate >= Decimal::ONE {
        warnings.push(format!(
            "Price-linked charges total {}% of price; every sale loses money.",
            rate_to_pct(combined_rate).normalize()
        ));
    }

    let output = evaluate(input)?;

    if revenue_base(input.cost_model, output.price_after_discount, output.revenue_per_unit)
        <= Decimal::ZERO
    {
        warnings.push("Revenue base is zero; margins reported as 0.".into());
    }
    if output.net_profit_per_unit < Decimal::ZERO {
        warnings.push(format!(
            "Net loss of {} per unit.",
            output.net_profit_per_unit.abs().round_dp(2)
        ));
    }

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "cost_model": input.cost_model.as_str(),
        "commission_base": "price after discount",
        "margin_base": match input.cost_model {
            CostModel::ReturnReducesRevenue => "revenue per unit after returns",
            CostModel::ReturnAsCost => "price after discount",
        },
        "quantity": input.quantity,
    });

    Ok(with_metadata(
        "Resale unit economics (gross before advertising, net after)",
        &assumptions,
        warnings,
        elapsed,
        output,
    ))
}

/// Apply the formulas of the selected cost model to an already-validated
/// input.
///
/// Arithmetic is checked: a figure that does not fit in a `Decimal` is
/// reported as invalid input on the field that drove it.
pub fn evaluate(input: &ScenarioInput) -> CalcResult<ScenarioResult> {
    let qty = Decimal::from(input.quantity);

    let price_after_discount = mul(input.price, Decimal::ONE - input.discount_rate, "price")?;
    let commission_per_unit = mul(price_after_discount, input.commission_rate, "price")?;
    let ad_cost_per_unit = mul(price_after_discount, input.ad_rate, "price")?;
    let cost_ex_ad_per_unit = [
        ("unit_cost", input.unit_cost),
        ("first_leg", input.first_leg),
        ("fulfillment_fee", input.fulfillment_fee),
        ("extra_cost", input.extra_cost),
    ]
    .into_iter()
    .try_fold(commission_per_unit, |acc, (field, cost)| add(acc, cost, field))?;

    let (revenue_per_unit, return_cost_per_unit) = match input.cost_model {
        CostModel::ReturnReducesRevenue => (
            mul(price_after_discount, Decimal::ONE - input.return_rate, "price")?,
            Decimal::ZERO,
        ),
        CostModel::ReturnAsCost => (
            price_after_discount,
            mul(price_after_discount, input.return_rate, "price")?,
        ),
    };

    let gross_profit_per_unit = sub(revenue_per_unit, cost_ex_ad_per_unit, "price")?;
    let net_profit_per_unit = sub(
        sub(gross_profit_per_unit, ad_cost_per_unit, "price")?,
        return_cost_per_unit,
        "price",
    )?;

    let base = revenue_base(input.cost_model, price_after_discount, revenue_per_unit);

    Ok(ScenarioResult {
        price_after_discount,
        revenue_per_unit,
        total_revenue: mul(revenue_per_unit, qty, "quantity")?,
        commission_per_unit,
        total_commission: mul(commission_per_unit, qty, "quantity")?,
        ad_cost_per_unit,
        total_ad_cost: mul(ad_cost_per_unit, qty, "quantity")?,
        return_cost_per_unit,
        cost_ex_ad_per_unit,
        total_cost_ex_ad: mul(cost_ex_ad_per_unit, qty, "quantity")?,
        gross_profit_per_unit,
        total_gross_profit: mul(gross_profit_per_unit, qty, "quantity")?,
        gross_margin: margin(gross_profit_per_unit, base)?,
        net_profit_per_unit,
        total_net_profit: mul(net_profit_per_unit, qty, "quantity")?,
        net_margin: margin(net_profit_per_unit, base)?,
    })
}

/// Reject negative amounts, rates outside [0, 1] and a zero quantity.
pub fn validate_input(input: &ScenarioInput) -> CalcResult<()> {
    let amounts = [
        ("price", input.price),
        ("unit_cost", input.unit_cost),
        ("first_leg", input.first_leg),
        ("fulfillment_fee", input.fulfillment_fee),
        ("extra_cost", input.extra_cost),
    ];
    for (field, value) in amounts {
        if value < Decimal::ZERO {
            return Err(ProfitError::invalid(field, "Amount cannot be negative."));
        }
    }

    let rates = [
        ("discount_rate", input.discount_rate),
        ("return_rate", input.return_rate),
        ("ad_rate", input.ad_rate),
        ("commission_rate", input.commission_rate),
    ];
    for (field, value) in rates {
        if value < Decimal::ZERO || value > Decimal::ONE {
            return Err(ProfitError::invalid(
                field,
                format!("Rate must be between 0 and 1 (0% to 100%), got {value}."),
            ));
        }
    }

    if input.quantity == 0 {
        return Err(ProfitError::invalid("quantity", "Quantity must be at least 1."));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn revenue_base(model: CostModel, price_after_discount: Money, revenue_per_unit: Money) -> Money {
    match model {
        CostModel::ReturnReducesRevenue => revenue_per_unit,
        CostModel::ReturnAsCost => price_after_discount,
    }
}

/// Profit over base, 0 when the base is not positive. The margin must also
/// survive conversion to a percentage for display and export.
fn margin(profit: Money, base: Money) -> CalcResult<Rate> {
    if base <= Decimal::ZERO {
        return Ok(Decimal::ZERO);
    }
    profit
        .checked_div(base)
        .filter(|m| m.checked_mul(Decimal::ONE_HUNDRED).is_some())
        .ok_or_else(|| {
            ProfitError::invalid(
                "price",
                "Price is too small relative to costs to express a margin.",
            )
        })
}

fn too_large(field: &str) -> ProfitError {
    ProfitError::invalid(field, "Value is too large to calculate.")
}

fn mul(a: Decimal, b: Decimal, field: &str) -> CalcResult<Decimal> {
    a.checked_mul(b).ok_or_else(|| too_large(field))
}

fn add(a: Decimal, b: Decimal, field: &str) -> CalcResult<Decimal> {
    a.checked_add(b).ok_or_else(|| too_large(field))
}

fn sub(a: Decimal, b: Decimal, field: &str) -> CalcResult<Decimal> {
    a.checked_sub(b).ok_or_else(|| too_large(field))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
