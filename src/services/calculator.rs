use crate::models::{MonthlyFinancialInput, MonthlyFinancialResult};

/// Numerator over a possibly-zero denominator. A zero or negative
/// denominator resolves to 0 rather than NaN/Infinity.
pub fn safe_div(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

/// Derives the full monthly statement from one input snapshot. Pure and
/// total: no I/O, no mutation, never NaN/Infinity on finite input.
///
/// Commissions apply to gross profit only when it is positive; a loss
/// month pays none regardless of the configured rates. Amounts accumulate
/// unrounded, rounding happens at presentation time.
pub fn compute(input: &MonthlyFinancialInput) -> MonthlyFinancialResult {
    let platform_fee = input.gross_revenue * input.platform_fee_rate / 100.0;
    let tax = input.gross_revenue * input.tax_rate / 100.0;
    let total_ad_spend: f64 = input.ad_spend.iter().sum();
    let total_chargebacks_refunds = input.chargebacks + input.refunds;

    let gross_profit = input.gross_revenue
        - input.fixed_staff_cost
        - total_chargebacks_refunds
        - platform_fee
        - tax
        - input.tools_cost
        - total_ad_spend;

    let (traffic_manager_commission, copywriter_commission) = if gross_profit > 0.0 {
        (
            gross_profit * input.traffic_manager_commission_rate / 100.0,
            gross_profit * input.copywriter_commission_rate / 100.0,
        )
    } else {
        (0.0, 0.0)
    };

    let net_profit = gross_profit - traffic_manager_commission - copywriter_commission;

    let total_costs = input.fixed_staff_cost
        + total_chargebacks_refunds
        + platform_fee
        + tax
        + input.tools_cost
        + total_ad_spend
        + traffic_manager_commission
        + copywriter_commission;

    MonthlyFinancialResult {
        platform_fee,
        tax,
        total_ad_spend,
        total_chargebacks_refunds,
        gross_profit,
        traffic_manager_commission,
        copywriter_commission,
        net_profit,
        average_ticket: safe_div(input.gross_revenue, input.sales_count as f64),
        total_costs,
        roi_percent: safe_div(net_profit, total_costs) * 100.0,
        chargeback_rate_percent: safe_div(input.chargebacks, input.gross_revenue) * 100.0,
        refund_rate_percent: safe_div(input.refunds, input.gross_revenue) * 100.0,
        contribution_margin_percent: safe_div(gross_profit, input.gross_revenue) * 100.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MonthlyFinancialInput;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn safe_div_guards_zero_and_negative_denominators() {
        assert_close(safe_div(10.0, 4.0), 2.5);
        assert_close(safe_div(10.0, 0.0), 0.0);
        assert_close(safe_div(10.0, -3.0), 0.0);
        assert_close(safe_div(0.0, 0.0), 0.0);
    }

    #[test]
    fn reference_month_statement() {
        let input = MonthlyFinancialInput {
            gross_revenue: 10_000.0,
            sales_count: 10,
            fixed_staff_cost: 2_000.0,
            tools_cost: 500.0,
            ad_spend: vec![1_000.0, 500.0, 0.0],
            chargebacks: 100.0,
            refunds: 50.0,
            platform_fee_rate: 5.0,
            tax_rate: 6.0,
            traffic_manager_commission_rate: 10.0,
            copywriter_commission_rate: 10.0,
        };

        let result = compute(&input);
        assert_close(result.platform_fee, 500.0);
        assert_close(result.tax, 600.0);
        assert_close(result.total_ad_spend, 1_500.0);
        assert_close(result.total_chargebacks_refunds, 150.0);
        assert_close(result.gross_profit, 4_750.0);
        assert_close(result.traffic_manager_commission, 475.0);
        assert_close(result.copywriter_commission, 475.0);
        assert_close(result.net_profit, 3_800.0);
        assert_close(result.average_ticket, 1_000.0);
        assert_close(result.total_costs, 6_200.0);
        assert_close(result.roi_percent, 3_800.0 / 6_200.0 * 100.0);
        assert_close(result.chargeback_rate_percent, 1.0);
        assert_close(result.refund_rate_percent, 0.5);
        assert_close(result.contribution_margin_percent, 47.5);
    }

    #[test]
    fn loss_month_pays_no_commissions() {
        let input = MonthlyFinancialInput {
            gross_revenue: 1_000.0,
            fixed_staff_cost: 5_000.0,
            traffic_manager_commission_rate: 10.0,
            copywriter_commission_rate: 15.0,
            ..MonthlyFinancialInput::zero()
        };

        let result = compute(&input);
        assert_close(result.gross_profit, -4_000.0);
        assert_close(result.traffic_manager_commission, 0.0);
        assert_close(result.copywriter_commission, 0.0);
        assert_close(result.net_profit, -4_000.0);
        assert_close(result.roi_percent, -80.0);
    }

    #[test]
    fn no_revenue_ratios_stay_finite() {
        let input = MonthlyFinancialInput {
            fixed_staff_cost: 100.0,
            ..MonthlyFinancialInput::zero()
        };

        let result = compute(&input);
        assert_close(result.gross_profit, -100.0);
        assert_close(result.contribution_margin_percent, 0.0);
        assert_close(result.chargeback_rate_percent, 0.0);
        assert_close(result.refund_rate_percent, 0.0);
        assert_close(result.roi_percent, -100.0);
    }

    #[test]
    fn all_zero_input_yields_all_zero_output() {
        let result = compute(&MonthlyFinancialInput::zero());
        assert_close(result.platform_fee, 0.0);
        assert_close(result.tax, 0.0);
        assert_close(result.total_ad_spend, 0.0);
        assert_close(result.total_chargebacks_refunds, 0.0);
        assert_close(result.gross_profit, 0.0);
        assert_close(result.traffic_manager_commission, 0.0);
        assert_close(result.copywriter_commission, 0.0);
        assert_close(result.net_profit, 0.0);
        assert_close(result.average_ticket, 0.0);
        assert_close(result.total_costs, 0.0);
        assert_close(result.roi_percent, 0.0);
        assert_close(result.chargeback_rate_percent, 0.0);
        assert_close(result.refund_rate_percent, 0.0);
        assert_close(result.contribution_margin_percent, 0.0);
    }

    #[test]
    fn no_sales_means_zero_average_ticket() {
        let input = MonthlyFinancialInput {
            gross_revenue: 12_345.0,
            sales_count: 0,
            ..MonthlyFinancialInput::zero()
        };

        assert_close(compute(&input).average_ticket, 0.0);
    }

    #[test]
    fn revenue_delta_moves_fee_and_tax_linearly() {
        let base = MonthlyFinancialInput {
            gross_revenue: 8_000.0,
            platform_fee_rate: 4.0,
            tax_rate: 7.5,
            fixed_staff_cost: 1_200.0,
            ..MonthlyFinancialInput::zero()
        };
        let mut bumped = base.clone();
        let delta = 2_500.0;
        bumped.gross_revenue += delta;

        let before = compute(&base);
        let after = compute(&bumped);
        assert_close(after.platform_fee - before.platform_fee, delta * 4.0 / 100.0);
        assert_close(after.tax - before.tax, delta * 7.5 / 100.0);
    }

    #[test]
    fn zero_gross_profit_pays_no_commissions() {
        // Costs exactly cancel revenue, the gate is strictly positive.
        let input = MonthlyFinancialInput {
            gross_revenue: 1_000.0,
            fixed_staff_cost: 1_000.0,
            traffic_manager_commission_rate: 10.0,
            copywriter_commission_rate: 10.0,
            ..MonthlyFinancialInput::zero()
        };

        let result = compute(&input);
        assert_close(result.gross_profit, 0.0);
        assert_close(result.traffic_manager_commission, 0.0);
        assert_close(result.copywriter_commission, 0.0);
    }
}
