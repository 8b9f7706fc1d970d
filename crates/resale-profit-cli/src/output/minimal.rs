use serde_json::Value;

use super::scalar_text;

/// Headline figures, most important first.
const HEADLINE_KEYS: [&str; 4] = [
    "total_net_profit",
    "net_margin",
    "total_gross_profit",
    "gross_margin",
];

/// Print just the headline numbers.
///
/// Single calculations print `key: value` for the headline figures; scenario
/// tables print one `scenario: net profit (net margin %)` line per row; an
/// export prints the written path.
pub fn print_minimal(value: &Value) {
    if let Some(Value::Array(rows)) = value.get("results") {
        for row in rows {
            println!(
                "{}: {} ({}%)",
                row.get("Scenario").map(scalar_text).unwrap_or_default(),
                row.get("Net Profit").map(scalar_text).unwrap_or_default(),
                row.get("Net Margin (%)").map(scalar_text).unwrap_or_default(),
            );
        }
        return;
    }

    let result = value.get("result").unwrap_or(value);

    if let Some(file) = result.get("file") {
        println!("{}", scalar_text(file));
        return;
    }

    if let Value::Object(map) = result {
        let mut printed = false;
        for key in HEADLINE_KEYS {
            if let Some(val) = map.get(key) {
                println!("{}: {}", key, scalar_text(val));
                printed = true;
            }
        }
        if printed {
            return;
        }
        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, scalar_text(val));
            return;
        }
    }

    println!("{}", scalar_text(result));
}
