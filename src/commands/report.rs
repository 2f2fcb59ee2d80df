use anyhow::{anyhow, Result};
use chrono::{Datelike, Local, NaiveDate};

use crate::db::Database;
use crate::models::YearlySeries;
use crate::services::calculator;
use crate::utils::format_currency;

/// Trailing 12-month series ending at `until` ("YYYY-MM", defaults to the
/// current month). Months without a record contribute zeros.
pub fn build_yearly_series(
    db: &Database,
    organization: &str,
    until: Option<String>,
) -> Result<YearlySeries> {
    let now = Local::now();
    let until = until.unwrap_or_else(|| format!("{}-{:02}", now.year(), now.month()));
    let base_date = NaiveDate::parse_from_str(&format!("{}-01", until), "%Y-%m-%d")
        .map_err(|e| anyhow!("Invalid --until month '{}': {}", until, e))?;

    let mut months = Vec::new();
    let mut revenue = Vec::new();
    let mut total_costs = Vec::new();
    let mut net_profit = Vec::new();

    for offset in (0..12).rev() {
        let date = base_date
            .with_day(1)
            .and_then(|d| d.checked_sub_months(chrono::Months::new(offset as u32)))
            .ok_or_else(|| anyhow!("Invalid date"))?;

        months.push(format!("{}-{:02}", date.year(), date.month()));
        match db.get_record(organization, date.year(), date.month())? {
            Some(record) => {
                let input = db.get_month_input(&record)?;
                let result = calculator::compute(&input);
                revenue.push(input.gross_revenue);
                total_costs.push(result.total_costs);
                net_profit.push(result.net_profit);
            }
            None => {
                revenue.push(0.0);
                total_costs.push(0.0);
                net_profit.push(0.0);
            }
        }
    }

    Ok(YearlySeries {
        organization: organization.to_string(),
        months,
        revenue,
        total_costs,
        net_profit,
    })
}

pub fn show_yearly_series(
    db: &Database,
    organization: &str,
    until: Option<String>,
    json: bool,
) -> Result<()> {
    let series = build_yearly_series(db, organization, until)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&series)?);
        return Ok(());
    }

    println!("Last 12 months: {}", series.organization);
    println!("{:<9} {:>16} {:>16} {:>16}", "Month", "Revenue", "Total costs", "Net profit");
    for i in 0..series.months.len() {
        println!(
            "{:<9} {:>16} {:>16} {:>16}",
            series.months[i],
            format_currency(series.revenue[i]),
            format_currency(series.total_costs[i]),
            format_currency(series.net_profit[i])
        );
    }
    Ok(())
}
