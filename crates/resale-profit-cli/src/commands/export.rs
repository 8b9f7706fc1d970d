use chrono::{Local, NaiveDateTime};
use clap::{Args, ValueEnum};
use serde_json::Value;
use std::fs;

use resale_profit_core::export::{self, ExportFormat};
use resale_profit_core::scenarios::expander::{self, ScenarioToggles};

use super::listing::{ListingArgs, ToggleArgs};

/// Arguments for spreadsheet / CSV export
#[derive(Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub listing: ListingArgs,

    #[command(flatten)]
    pub toggles: ToggleArgs,

    /// File layout
    #[arg(long, value_enum, default_value = "values")]
    pub format: FormatArg,

    /// Output path (defaults to a timestamped name in the current directory)
    #[arg(long)]
    pub out: Option<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FormatArg {
    /// Workbook with precomputed figures
    Values,
    /// Workbook with live formulas in the derived columns
    Formulas,
    /// UTF-8 CSV with byte-order marker
    Csv,
}

impl From<FormatArg> for ExportFormat {
    fn from(f: FormatArg) -> Self {
        match f {
            FormatArg::Values => ExportFormat::Values,
            FormatArg::Formulas => ExportFormat::Formulas,
            FormatArg::Csv => ExportFormat::Csv,
        }
    }
}

/// `--out` when given, otherwise the timestamped download name.
fn output_path(out: Option<String>, format: ExportFormat, generated_at: NaiveDateTime) -> String {
    out.unwrap_or_else(|| export::export_file_name(format, generated_at))
}

pub fn run_export(args: ExportArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let input = args.listing.resolve()?;
    let toggles = ScenarioToggles::from(&args.toggles);
    let rows = expander::expand(&input, &toggles)?.result.results;

    let format = ExportFormat::from(args.format);
    let generated_at = Local::now().naive_local();
    let bytes = export::export_at(&rows, format, generated_at)?;

    let path = output_path(args.out, format, generated_at);
    fs::write(&path, &bytes).map_err(|e| format!("Failed to write '{}': {}", path, e))?;

    Ok(serde_json::json!({
        "result": {
            "file": path,
            "format": format.as_str(),
            "rows": rows.len(),
            "bytes": bytes.len(),
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use clap::Parser;
    use std::path::PathBuf;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        export: ExportArgs,
    }

    fn scratch(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("resale-cli-{}-{name}", std::process::id()))
    }

    fn listing_file(name: &str) -> PathBuf {
        let path = scratch(name);
        fs::write(
            &path,
            r#"{"price": "59.99", "return_rate": "0.05", "ad_rate": "0.10",
                "commission_rate": "0.15", "first_leg": "5.00", "fulfillment_fee": "6.50"}"#,
        )
        .unwrap();
        path
    }

    fn run(extra: &[&str], input: &PathBuf, out: &PathBuf) -> Value {
        let mut argv = vec![
            "resale".to_string(),
            "--input".to_string(),
            input.display().to_string(),
            "--out".to_string(),
            out.display().to_string(),
        ];
        argv.extend(extra.iter().map(|s| s.to_string()));
        run_export(Harness::parse_from(argv).export).unwrap()
    }

    #[test]
    fn test_csv_export_writes_file() {
        let input = listing_file("csv-listing.json");
        let out = scratch("results.csv");
        let value = run(&["--format", "csv", "--twenty-off", "--fifty-off"], &input, &out);

        let bytes = fs::read(&out).unwrap();
        assert_eq!(&bytes[..3], &[0xEF, 0xBB, 0xBF]);
        assert_eq!(value["result"]["file"], out.display().to_string());
        assert_eq!(value["result"]["format"], "csv");
        assert_eq!(value["result"]["rows"], 3);
        assert_eq!(value["result"]["bytes"], bytes.len());

        fs::remove_file(&out).ok();
        fs::remove_file(&input).ok();
    }

    #[test]
    fn test_xlsx_export_writes_workbook() {
        let input = listing_file("xlsx-listing.json");
        let out = scratch("results.xlsx");
        let value = run(&["--custom-discount", "15"], &input, &out);

        let bytes = fs::read(&out).unwrap();
        assert_eq!(&bytes[..2], b"PK");
        assert_eq!(value["result"]["format"], "values");
        assert_eq!(value["result"]["rows"], 2);

        fs::remove_file(&out).ok();
        fs::remove_file(&input).ok();
    }

    #[test]
    fn test_default_output_name() {
        let at = NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        assert_eq!(
            output_path(None, ExportFormat::Csv, at),
            "resale_profit_results_20250601_093000.csv"
        );
        assert_eq!(
            output_path(None, ExportFormat::Formulas, at),
            "resale_profit_results_20250601_093000.xlsx"
        );
        assert_eq!(
            output_path(Some("mine.csv".into()), ExportFormat::Csv, at),
            "mine.csv"
        );
    }
}
