//! Column layouts shared by the spreadsheet and CSV writers.

/// Values-only workbook: timestamp, raw inputs, then every derived figure.
pub const VALUES_HEADERS: [&str; 28] = [
    "Timestamp",
    "Scenario",
    "Price",
    "Discount (%)",
    "Return Rate (%)",
    "Ad Rate (%)",
    "Commission Rate (%)",
    "Product Cost",
    "First-Leg Freight",
    "Fulfillment Fee",
    "Extra Cost",
    "Quantity",
    "Price After Discount",
    "Revenue Per Unit",
    "Total Revenue",
    "Commission Per Unit",
    "Total Commission",
    "Ad Cost Per Unit",
    "Total Ad Cost",
    "Return Cost Per Unit",
    "Cost Ex Ad Per Unit",
    "Total Cost Ex Ad",
    "Gross Profit Per Unit",
    "Total Gross Profit",
    "Gross Margin (%)",
    "Net Profit Per Unit",
    "Total Net Profit",
    "Net Margin (%)",
];

/// Scenario table, columns A through O. A–H are literals, I–O derived.
pub const SCENARIO_HEADERS: [&str; 15] = [
    "Scenario",
    "Price",
    "First-Leg Freight",
    "Fulfillment Fee",
    "Commission Rate (%)",
    "Ad Rate (%)",
    "Return Rate (%)",
    "Other Cost",
    "Commission",
    "Ad Cost",
    "Return Cost",
    "Gross Profit",
    "Gross Margin (%)",
    "Net Profit",
    "Net Margin (%)",
];

/// First derived column of the scenario table (I).
pub const FIRST_FORMULA_COLUMN: usize = 8;

/// Formulas for columns I–O on 1-based spreadsheet row `row`.
///
/// Commission, ad and return cost are charged on the price in column B; both
/// margins are 0 when that price is not positive.
pub fn scenario_formulas(row: u32) -> [String; 7] {
    let r = row;
    [
        format!("=B{r}*E{r}/100"),
        format!("=B{r}*F{r}/100"),
        format!("=B{r}*G{r}/100"),
        format!("=B{r}-C{r}-D{r}-I{r}-H{r}"),
        format!("=IF(B{r}<=0,0,L{r}/B{r}*100)"),
        format!("=B{r}-C{r}-D{r}-I{r}-J{r}-K{r}-H{r}"),
        format!("=IF(B{r}<=0,0,N{r}/B{r}*100)"),
    ]
}
