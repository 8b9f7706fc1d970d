use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::profit::calculator::{self, ScenarioInput, ScenarioResult};
use crate::{types::*, CalcResult, ProfitError};

/// Upper bound of the custom discount, in percent.
pub const MAX_CUSTOM_DISCOUNT_PCT: u32 = 90;

/// The custom discount moves in steps of this many percent.
pub const CUSTOM_DISCOUNT_STEP_PCT: u32 = 5;

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScenarioKind {
    Original,
    TwentyOff,
    FiftyOff,
    Custom { discount_pct: u32 },
}

impl ScenarioKind {
    pub fn label(&self) -> String {
        match self {
            Self::Original => "Original price".to_string(),
            Self::TwentyOff => "20% off".to_string(),
            Self::FiftyOff => "50% off".to_string(),
            Self::Custom { discount_pct } => format!("{}% of original", 100 - discount_pct),
        }
    }

    /// Discount applied to the base price, as a fraction.
    pub fn discount_rate(&self) -> Rate {
        let pct = match self {
            Self::Original => 0,
            Self::TwentyOff => 20,
            Self::FiftyOff => 50,
            Self::Custom { discount_pct } => *discount_pct,
        };
        pct_to_rate(Decimal::from(pct))
    }
}

/// Which discount scenarios to evaluate next to the original price.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioToggles {
    #[serde(default)]
    pub twenty_off: bool,
    #[serde(default)]
    pub fifty_off: bool,
    /// 0 disables the custom scenario.
    #[serde(default)]
    pub custom_discount_pct: u32,
}

impl ScenarioToggles {
    /// Enabled scenarios in export order: original, 20% off, 50% off, custom.
    pub fn kinds(&self) -> Vec<ScenarioKind> {
        let mut kinds = vec![ScenarioKind::Original];
        if self.twenty_off {
            kinds.push(ScenarioKind::TwentyOff);
        }
        if self.fifty_off {
            kinds.push(ScenarioKind::FiftyOff);
        }
        if self.custom_discount_pct > 0 {
            kinds.push(ScenarioKind::Custom {
                discount_pct: self.custom_discount_pct,
            });
        }
        kinds
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioRow {
    pub label: String,
    pub kind: ScenarioKind,
    pub input: ScenarioInput,
    pub result: ScenarioResult,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioOutput {
    pub results: Vec<ScenarioRow>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Evaluate the base listing at every enabled discount scenario.
///
/// Each scenario reprices the base input (`price * (1 - discount)`) and keeps
/// every other field, `discount_rate` included. A base discount therefore
/// stacks on top of the scenario discount. With a 10% base discount the
/// "50% off" row sells at `price * 0.5 * 0.9`, and scenario labels are
/// relative to the listed price before the base discount. Rows come back in
/// the order given by [`ScenarioToggles::kinds`].
pub fn expand(
    base: &ScenarioInput,
    toggles: &ScenarioToggles,
) -> CalcResult<ComputationOutput<ScenarioOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_toggles(toggles)?;
    calculator::validate_input(base)?;

    let kinds = toggles.kinds();
    let mut results = Vec::with_capacity(kinds.len());

    for kind in kinds {
        let label = kind.label();
        let input = ScenarioInput {
            price: base.price * (Decimal::ONE - kind.discount_rate()),
            ..base.clone()
        };
        let computed = calculator::compute(&input)?;
        warnings.extend(
            computed
                .warnings
                .into_iter()
                .map(|w| format!("{label}: {w}")),
        );
        results.push(ScenarioRow {
            label,
            kind,
            input,
            result: computed.result,
        });
    }

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "cost_model": base.cost_model.as_str(),
        "scenario_price": "base price * (1 - scenario discount)",
        "base_discount_stacks": !base.discount_rate.is_zero(),
        "num_scenarios": results.len(),
    });

    Ok(with_metadata(
        "Discount scenario comparison",
        &assumptions,
        warnings,
        elapsed,
        ScenarioOutput { results },
    ))
}

fn validate_toggles(toggles: &ScenarioToggles) -> CalcResult<()> {
    let pct = toggles.custom_discount_pct;
    if pct > MAX_CUSTOM_DISCOUNT_PCT {
        return Err(ProfitError::invalid(
            "custom_discount_pct",
            format!("Custom discount must be between 0 and {MAX_CUSTOM_DISCOUNT_PCT}%, got {pct}%."),
        ));
    }
    if pct % CUSTOM_DISCOUNT_STEP_PCT != 0 {
        return Err(ProfitError::invalid(
            "custom_discount_pct",
            format!("Custom discount moves in steps of {CUSTOM_DISCOUNT_STEP_PCT}%, got {pct}%."),
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profit::calculator::CostModel;
    use rust_decimal_macros::dec;

    fn base() -> ScenarioInput {
        ScenarioInput {
            price: dec!(59.99),
            discount_rate: Decimal::ZERO,
            return_rate: dec!(0.05),
            ad_rate: dec!(0.10),
            commission_rate: dec!(0.15),
            unit_cost: Decimal::ZERO,
            first_leg: dec!(5),
            fulfillment_fee: dec!(6.5),
            extra_cost: Decimal::ZERO,
            quantity: 1,
            cost_model: CostModel::ReturnAsCost,
        }
    }

    fn labels(toggles: &ScenarioToggles) -> Vec<String> {
        expand(&base(), toggles)
            .unwrap()
            .result
            .results
            .into_iter()
            .map(|r| r.label)
            .collect()
    }

    #[test]
    fn test_original_only_by_default() {
        assert_eq!(labels(&ScenarioToggles::default()), vec!["Original price"]);
    }

    #[test]
    fn test_all_scenarios_in_order() {
        let toggles = ScenarioToggles {
            twenty_off: true,
            fifty_off: true,
            custom_discount_pct: 35,
        };
        assert_eq!(
            labels(&toggles),
            vec!["Original price", "20% off", "50% off", "65% of original"]
        );
    }

    #[test]
    fn test_disabled_scenarios_keep_relative_order() {
        let toggles = ScenarioToggles {
            twenty_off: false,
            fifty_off: true,
            custom_discount_pct: 10,
        };
        assert_eq!(
            labels(&toggles),
            vec!["Original price", "50% off", "90% of original"]
        );

        let toggles = ScenarioToggles {
            twenty_off: true,
            fifty_off: false,
            custom_discount_pct: 0,
        };
        assert_eq!(labels(&toggles), vec!["Original price", "20% off"]);
    }

    #[test]
    fn test_custom_present_only_when_positive() {
        for pct in (0..=MAX_CUSTOM_DISCOUNT_PCT).step_by(CUSTOM_DISCOUNT_STEP_PCT as usize) {
            let toggles = ScenarioToggles {
                custom_discount_pct: pct,
                ..Default::default()
            };
            let kinds = toggles.kinds();
            let has_custom = kinds
                .iter()
                .any(|k| matches!(k, ScenarioKind::Custom { .. }));
            assert_eq!(has_custom, pct > 0, "pct {pct}");
            if pct > 0 {
                assert_eq!(
                    kinds.last().unwrap().label(),
                    format!("{}% of original", 100 - pct)
                );
            }
        }
    }

    #[test]
    fn test_scenario_prices() {
        let toggles = ScenarioToggles {
            twenty_off: true,
            fifty_off: true,
            custom_discount_pct: 90,
        };
        let mut input = base();
        input.price = dec!(100);
        let rows = expand(&input, &toggles).unwrap().result.results;
        let prices: Vec<Decimal> = rows.iter().map(|r| r.input.price).collect();
        assert_eq!(prices, vec![dec!(100), dec!(80), dec!(50), dec!(10)]);
        // Other fields are inherited untouched
        for row in &rows {
            assert_eq!(row.input.first_leg, input.first_leg);
            assert_eq!(row.input.commission_rate, input.commission_rate);
            assert_eq!(row.result.price_after_discount, row.input.price);
        }
    }

    #[test]
    fn test_base_discount_stacks_on_scenarios() {
        let toggles = ScenarioToggles {
            twenty_off: false,
            fifty_off: true,
            custom_discount_pct: 30,
        };
        let mut input = base();
        input.price = dec!(100);
        input.discount_rate = dec!(0.1);
        let out = expand(&input, &toggles).unwrap();
        let sold_at: Vec<Decimal> = out
            .result
            .results
            .iter()
            .map(|r| r.result.price_after_discount)
            .collect();
        assert_eq!(sold_at, vec![dec!(90), dec!(45), dec!(63)]);
        assert_eq!(out.assumptions["base_discount_stacks"], true);
    }

    #[test]
    fn test_original_row_matches_direct_compute() {
        let rows = expand(&base(), &ScenarioToggles::default())
            .unwrap()
            .result
            .results;
        let direct = calculator::compute(&base()).unwrap().result;
        assert_eq!(rows[0].result, direct);
        assert_eq!(rows[0].result.net_profit_per_unit, dec!(30.493));
    }

    #[test]
    fn test_custom_discount_out_of_range() {
        let toggles = ScenarioToggles {
            custom_discount_pct: 95,
            ..Default::default()
        };
        assert!(expand(&base(), &toggles).is_err());
    }

    #[test]
    fn test_custom_discount_off_step() {
        let toggles = ScenarioToggles {
            custom_discount_pct: 12,
            ..Default::default()
        };
        match expand(&base(), &toggles) {
            Err(ProfitError::InvalidInput { field, .. }) => {
                assert_eq!(field, "custom_discount_pct")
            }
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_base_rejected_before_expansion() {
        let mut input = base();
        input.ad_rate = dec!(2);
        assert!(expand(&input, &ScenarioToggles::default()).is_err());
    }

    #[test]
    fn test_warnings_are_labelled() {
        let mut input = base();
        input.unit_cost = dec!(40);
        let toggles = ScenarioToggles {
            fifty_off: true,
            ..Default::default()
        };
        let out = expand(&input, &toggles).unwrap();
        assert!(out.warnings.iter().any(|w| w.starts_with("50% off: Net loss")));
    }
}
