use anyhow::{anyhow, Result};

use crate::commands::ensure_month;
use crate::db::Database;
use crate::models::MonthReport;
use crate::services::calculator;
use crate::utils::{format_currency, format_percent, now_rfc3339, parse_count, parse_decimal};

/// Scalar month fields as entered, still string-typed; `None` leaves the
/// stored value untouched, an empty string coerces to 0.
#[derive(Debug, Default)]
pub struct MonthFields {
    pub gross_revenue: Option<String>,
    pub sales_count: Option<String>,
    pub chargebacks: Option<String>,
    pub refunds: Option<String>,
    pub platform_fee_rate: Option<String>,
    pub tax_rate: Option<String>,
    pub traffic_manager_commission_rate: Option<String>,
    pub copywriter_commission_rate: Option<String>,
}

pub fn set_month(
    db: &Database,
    organization: &str,
    year: i32,
    month: u32,
    fields: MonthFields,
) -> Result<()> {
    ensure_month(month)?;
    let mut record = db.get_or_create_record(organization, year, month)?;

    if let Some(value) = fields.gross_revenue {
        record.gross_revenue = parse_decimal(&value)?;
    }
    if let Some(value) = fields.sales_count {
        record.sales_count = parse_count(&value)?;
    }
    if let Some(value) = fields.chargebacks {
        record.chargebacks = parse_decimal(&value)?;
    }
    if let Some(value) = fields.refunds {
        record.refunds = parse_decimal(&value)?;
    }
    if let Some(value) = fields.platform_fee_rate {
        record.platform_fee_rate = parse_decimal(&value)?;
    }
    if let Some(value) = fields.tax_rate {
        record.tax_rate = parse_decimal(&value)?;
    }
    if let Some(value) = fields.traffic_manager_commission_rate {
        record.traffic_manager_commission_rate = parse_decimal(&value)?;
    }
    if let Some(value) = fields.copywriter_commission_rate {
        record.copywriter_commission_rate = parse_decimal(&value)?;
    }

    record.updated_at = now_rfc3339();
    db.update_record(&record)?;
    tracing::info!(organization, year, month, "saved monthly record");
    Ok(())
}

pub fn build_month_report(
    db: &Database,
    organization: &str,
    year: i32,
    month: u32,
) -> Result<MonthReport> {
    ensure_month(month)?;
    let record = db
        .get_record(organization, year, month)?
        .ok_or_else(|| anyhow!("No record for {} {}-{:02}", organization, year, month))?;
    let input = db.get_month_input(&record)?;
    let result = calculator::compute(&input);
    Ok(MonthReport {
        organization: record.organization,
        year: record.year,
        month: record.month,
        input,
        result,
    })
}

pub fn show_month(
    db: &Database,
    organization: &str,
    year: i32,
    month: u32,
    json: bool,
) -> Result<()> {
    let report = build_month_report(db, organization, year, month)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let input = &report.input;
    let result = &report.result;
    println!(
        "P&L: {} {}-{:02}",
        report.organization, report.year, report.month
    );
    println!("  Gross revenue          {}", format_currency(input.gross_revenue));
    println!("  Sales                  {}", input.sales_count);
    println!("  Average ticket         {}", format_currency(result.average_ticket));
    println!();
    println!("  Staff cost             {}", format_currency(input.fixed_staff_cost));
    println!("  Tools cost             {}", format_currency(input.tools_cost));
    println!("  Ad spend               {}", format_currency(result.total_ad_spend));
    println!(
        "  Chargebacks + refunds  {}",
        format_currency(result.total_chargebacks_refunds)
    );
    println!(
        "  Platform fee ({})   {}",
        format_percent(input.platform_fee_rate),
        format_currency(result.platform_fee)
    );
    println!(
        "  Tax ({})            {}",
        format_percent(input.tax_rate),
        format_currency(result.tax)
    );
    println!();
    println!("  Gross profit           {}", format_currency(result.gross_profit));
    println!(
        "  Traffic mgr commission {}",
        format_currency(result.traffic_manager_commission)
    );
    println!(
        "  Copywriter commission  {}",
        format_currency(result.copywriter_commission)
    );
    println!("  Net profit             {}", format_currency(result.net_profit));
    println!();
    println!("  Total costs            {}", format_currency(result.total_costs));
    println!("  ROI                    {}", format_percent(result.roi_percent));
    println!(
        "  Chargeback rate        {}",
        format_percent(result.chargeback_rate_percent)
    );
    println!(
        "  Refund rate            {}",
        format_percent(result.refund_rate_percent)
    );
    println!(
        "  Contribution margin    {}",
        format_percent(result.contribution_margin_percent)
    );
    Ok(())
}
