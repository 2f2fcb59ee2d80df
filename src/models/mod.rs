use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRecord {
    pub id: String,
    pub organization: String,
    pub year: i32,
    pub month: u32,
    pub gross_revenue: f64,
    pub sales_count: i64,
    pub chargebacks: f64,
    pub refunds: f64,
    pub platform_fee_rate: f64,
    pub tax_rate: f64,
    pub traffic_manager_commission_rate: f64,
    pub copywriter_commission_rate: f64,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collaborator {
    pub id: String,
    pub record_id: String,
    pub name: String,
    pub role: String,
    pub salary: f64,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolExpense {
    pub id: String,
    pub record_id: String,
    pub name: String,
    pub cost: f64,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdSpendEntry {
    pub id: String,
    pub record_id: String,
    pub channel: String,
    pub amount: f64,
    pub created_at: String,
    pub updated_at: String,
}

/// Flat numeric snapshot handed to the calculator. Callers coerce any
/// not-yet-entered field to 0 before constructing this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyFinancialInput {
    pub gross_revenue: f64,
    pub sales_count: i64,
    pub fixed_staff_cost: f64,
    pub tools_cost: f64,
    pub ad_spend: Vec<f64>,
    pub chargebacks: f64,
    pub refunds: f64,
    pub platform_fee_rate: f64,
    pub tax_rate: f64,
    pub traffic_manager_commission_rate: f64,
    pub copywriter_commission_rate: f64,
}

impl MonthlyFinancialInput {
    pub fn zero() -> Self {
        MonthlyFinancialInput {
            gross_revenue: 0.0,
            sales_count: 0,
            fixed_staff_cost: 0.0,
            tools_cost: 0.0,
            ad_spend: Vec::new(),
            chargebacks: 0.0,
            refunds: 0.0,
            platform_fee_rate: 0.0,
            tax_rate: 0.0,
            traffic_manager_commission_rate: 0.0,
            copywriter_commission_rate: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyFinancialResult {
    pub platform_fee: f64,
    pub tax: f64,
    pub total_ad_spend: f64,
    pub total_chargebacks_refunds: f64,
    pub gross_profit: f64,
    pub traffic_manager_commission: f64,
    pub copywriter_commission: f64,
    pub net_profit: f64,
    pub average_ticket: f64,
    pub total_costs: f64,
    pub roi_percent: f64,
    pub chargeback_rate_percent: f64,
    pub refund_rate_percent: f64,
    pub contribution_margin_percent: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthReport {
    pub organization: String,
    pub year: i32,
    pub month: u32,
    pub input: MonthlyFinancialInput,
    pub result: MonthlyFinancialResult,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YearlySeries {
    pub organization: String,
    pub months: Vec<String>,
    pub revenue: Vec<f64>,
    pub total_costs: Vec<f64>,
    pub net_profit: Vec<f64>,
}
