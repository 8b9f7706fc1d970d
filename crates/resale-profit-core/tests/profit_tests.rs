use resale_profit_core::profit::calculator::{self, CostModel, ScenarioInput};
use resale_profit_core::scenarios::expander::{self, ScenarioToggles};
use resale_profit_core::{pct_to_rate, ProfitError};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Reference listings
// ===========================================================================

#[test]
fn test_listing_return_as_cost() {
    // Price 59.99, freight 5.00, FBA 6.50, commission 15%, ads 10%, returns 5%
    let input: ScenarioInput = serde_json::from_value(serde_json::json!({
        "price": "59.99",
        "return_rate": "0.05",
        "ad_rate": "0.10",
        "commission_rate": "0.15",
        "first_leg": "5.00",
        "fulfillment_fee": "6.50",
        "cost_model": "return_as_cost"
    }))
    .unwrap();
    let out = calculator::compute(&input).unwrap();
    let r = &out.result;
    assert_eq!(r.commission_per_unit, dec!(8.9985));
    assert_eq!(r.ad_cost_per_unit, dec!(5.999));
    assert_eq!(r.return_cost_per_unit, dec!(2.9995));
    assert_eq!(r.gross_profit_per_unit, dec!(39.4915));
    assert_eq!(r.net_profit_per_unit, dec!(30.493));
    assert_eq!(r.net_margin.round_dp(4), dec!(0.5083));
    assert!(out.warnings.is_empty(), "unexpected warnings: {:?}", out.warnings);
}

#[test]
fn test_bundle_of_two_return_reduces_revenue() {
    let input = ScenarioInput {
        price: dec!(100),
        discount_rate: pct_to_rate(dec!(20)),
        return_rate: pct_to_rate(dec!(10)),
        ad_rate: pct_to_rate(dec!(15)),
        commission_rate: pct_to_rate(dec!(15)),
        unit_cost: dec!(20),
        first_leg: dec!(3),
        fulfillment_fee: dec!(5),
        extra_cost: Decimal::ZERO,
        quantity: 2,
        cost_model: CostModel::ReturnReducesRevenue,
    };
    let r = calculator::compute(&input).unwrap().result;
    assert_eq!(r.price_after_discount, dec!(80));
    assert_eq!(r.revenue_per_unit, dec!(72));
    assert_eq!(r.commission_per_unit, dec!(12));
    assert_eq!(r.ad_cost_per_unit, dec!(12));
    assert_eq!(r.cost_ex_ad_per_unit, dec!(40));
    assert_eq!(r.gross_profit_per_unit, dec!(32));
    assert_eq!(r.net_profit_per_unit, dec!(20));
    assert_eq!(r.total_gross_profit, dec!(64));
    assert_eq!(r.total_net_profit, dec!(40));
}

// ===========================================================================
// Properties
// ===========================================================================

#[test]
fn test_totals_scale_with_quantity() {
    for qty in [1u32, 3, 12] {
        let input = ScenarioInput {
            price: dec!(24.5),
            discount_rate: dec!(0.1),
            return_rate: dec!(0.08),
            ad_rate: dec!(0.12),
            commission_rate: dec!(0.15),
            unit_cost: dec!(6),
            first_leg: dec!(1.2),
            fulfillment_fee: dec!(3.9),
            extra_cost: dec!(0.3),
            quantity: qty,
            cost_model: CostModel::ReturnReducesRevenue,
        };
        let r = calculator::compute(&input).unwrap().result;
        let q = Decimal::from(qty);
        assert_eq!(r.total_gross_profit, r.gross_profit_per_unit * q);
        assert_eq!(r.total_net_profit, r.net_profit_per_unit * q);
        assert_eq!(r.total_ad_cost, r.ad_cost_per_unit * q);
        assert_eq!(r.total_commission, r.commission_per_unit * q);
    }
}

#[test]
fn test_scenario_rows_degrade_monotonically() {
    let base = ScenarioInput {
        price: dec!(40),
        discount_rate: Decimal::ZERO,
        return_rate: dec!(0.05),
        ad_rate: dec!(0.1),
        commission_rate: dec!(0.15),
        unit_cost: dec!(8),
        first_leg: dec!(2),
        fulfillment_fee: dec!(4.5),
        extra_cost: Decimal::ZERO,
        quantity: 1,
        cost_model: CostModel::ReturnAsCost,
    };
    let toggles = ScenarioToggles {
        twenty_off: true,
        fifty_off: true,
        custom_discount_pct: 60,
    };
    let rows = expander::expand(&base, &toggles).unwrap().result.results;
    assert_eq!(rows.len(), 4);
    for pair in rows.windows(2) {
        assert!(pair[0].result.net_profit_per_unit > pair[1].result.net_profit_per_unit);
    }
}

#[test]
fn test_invalid_inputs_never_reach_calculation() {
    let cases = [
        ("price", serde_json::json!({"price": -5})),
        ("discount_rate", serde_json::json!({"discount_rate": 1.2})),
        ("ad_rate", serde_json::json!({"ad_rate": -0.1})),
        ("fulfillment_fee", serde_json::json!({"fulfillment_fee": -1})),
        ("quantity", serde_json::json!({"quantity": 0})),
    ];
    for (field, patch) in cases {
        let mut json = serde_json::json!({
            "price": 30,
            "return_rate": 0.05,
            "ad_rate": 0.1,
            "commission_rate": 0.15,
            "first_leg": 2,
            "fulfillment_fee": 4
        });
        for (k, v) in patch.as_object().unwrap() {
            json[k] = v.clone();
        }
        let input: ScenarioInput = serde_json::from_value(json).unwrap();
        match calculator::compute(&input) {
            Err(ProfitError::InvalidInput { field: f, .. }) => assert_eq!(f, field),
            other => panic!("{field}: expected InvalidInput, got {other:?}"),
        }
    }
}
