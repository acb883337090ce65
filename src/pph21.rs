//! PPh 21: progressive income tax on employee compensation.
//!
//! Monthly salary figures are annualised, reduced by the occupational
//! cost deduction, the employee's BPJS contributions and the PTKP
//! threshold, and the remainder is taxed on the progressive schedule in
//! [`PPH21_BRACKETS`].

use crate::format::format_compact;
use crate::models::{
    round_currency, BracketBreakdown, BreakdownItem, InsuranceContribution, Pph21Input, Pph21Result,
};
use crate::rates::{
    TaxBracket, BPJS_EMPLOYMENT, BPJS_HEALTH, OCCUPATIONAL_COST_MAX_YEARLY,
    OCCUPATIONAL_COST_RATE, PPH21_BRACKETS,
};

/// Tax computed over a progressive schedule.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressiveTax {
    /// Sum of the band taxes, rounded to whole rupiah.
    pub tax: f64,
    pub brackets: Vec<BracketBreakdown>,
}

/// Applies `brackets` to `taxable` band by band.
///
/// Band taxes are kept exact; only the total is rounded.  Brackets must
/// be ordered and contiguous, with the last one unbounded so it absorbs
/// whatever remains.
pub fn progressive_tax(taxable: f64, brackets: &[TaxBracket]) -> ProgressiveTax {
    let mut remaining = taxable;
    let mut total = 0.0;
    let mut breakdown = Vec::new();

    for bracket in brackets {
        if remaining <= 0.0 {
            break;
        }
        let in_bracket = match bracket.width() {
            Some(width) => remaining.min(width),
            None => remaining,
        };
        let tax = in_bracket * bracket.rate;
        if in_bracket > 0.0 {
            breakdown.push(BracketBreakdown {
                bracket: bracket_label(bracket),
                taxable: in_bracket,
                rate: bracket.rate,
                tax,
            });
        }
        total += tax;
        remaining -= in_bracket;
    }

    ProgressiveTax { tax: round_currency(total), brackets: breakdown }
}

fn bracket_label(bracket: &TaxBracket) -> String {
    format!(
        "Rp {} - Rp {}",
        format_compact(bracket.lower),
        format_compact(bracket.upper.unwrap_or(f64::INFINITY))
    )
}

/// Annual employee-borne BPJS contributions for a monthly income.
pub fn employee_insurance(monthly_income: f64, health: bool, employment: bool) -> InsuranceContribution {
    let mut contribution = InsuranceContribution::default();
    if health {
        contribution.health = monthly_income.min(BPJS_HEALTH.max_salary) * BPJS_HEALTH.employee * 12.0;
    }
    if employment {
        contribution.old_age = monthly_income * BPJS_EMPLOYMENT.jht_employee * 12.0;
        contribution.pension =
            monthly_income.min(BPJS_EMPLOYMENT.jp_max_salary) * BPJS_EMPLOYMENT.jp_employee * 12.0;
    }
    contribution
}

/// Calculates annual and monthly PPh 21 for one employee.
pub fn calculate_pph21(input: &Pph21Input) -> Pph21Result {
    let monthly_income = input.base_salary + input.allowances;
    let gross_annual_income = monthly_income * 12.0 + input.bonus;

    let occupational_cost =
        (gross_annual_income * OCCUPATIONAL_COST_RATE).min(OCCUPATIONAL_COST_MAX_YEARLY);

    let insurance = employee_insurance(
        monthly_income,
        input.health_insurance,
        input.employment_insurance,
    );
    let insurance_total = insurance.total();

    let net_income = gross_annual_income - occupational_cost - insurance_total;
    let ptkp = input.filing_status.ptkp();
    let taxable_income = (net_income - ptkp).max(0.0);

    let ProgressiveTax { tax: annual_tax, brackets: bracket_breakdown } =
        progressive_tax(taxable_income, &PPH21_BRACKETS);
    let monthly_tax = round_currency(annual_tax / 12.0);

    let take_home_pay = monthly_income - (monthly_tax + insurance_total / 12.0);

    let breakdown = vec![
        BreakdownItem::new("Base salary (monthly)", input.base_salary),
        BreakdownItem::new("Allowances (monthly)", input.allowances),
        BreakdownItem::new("Bonus/THR (annual)", input.bonus),
        BreakdownItem::new("Gross income (annual)", gross_annual_income),
        BreakdownItem::new("Occupational cost (5%, max 6,000,000)", -occupational_cost),
        BreakdownItem::new("Employee BPJS contributions", -insurance_total),
        BreakdownItem::new("Net income", net_income),
        BreakdownItem::new(format!("PTKP ({})", input.filing_status), -ptkp),
        BreakdownItem::new("Taxable income (PKP)", taxable_income),
        BreakdownItem::new("PPh 21 payable (annual)", annual_tax),
        BreakdownItem::new("PPh 21 (monthly)", monthly_tax),
    ];

    Pph21Result {
        gross_annual_income,
        occupational_cost,
        insurance,
        insurance_total,
        net_income,
        ptkp,
        taxable_income,
        annual_tax,
        monthly_tax,
        take_home_pay,
        breakdown,
        bracket_breakdown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rates::FilingStatus;
    use proptest::prelude::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-6,
            "expected {expected}, got {actual}"
        );
    }

    fn input(base_salary: f64, allowances: f64, bonus: f64, status: FilingStatus) -> Pph21Input {
        Pph21Input {
            base_salary,
            allowances,
            bonus,
            filing_status: status,
            health_insurance: true,
            employment_insurance: true,
        }
    }

    #[test]
    fn salaried_single_employee() {
        let result = calculate_pph21(&input(10_000_000.0, 2_000_000.0, 12_000_000.0, FilingStatus::Tk0));

        assert_close(result.gross_annual_income, 156_000_000.0);
        assert_close(result.occupational_cost, 6_000_000.0);
        assert_close(result.insurance.health, 1_440_000.0);
        assert_close(result.insurance.old_age, 2_880_000.0);
        assert_close(result.insurance.pension, 1_205_076.0);
        assert_close(result.net_income, 144_474_924.0);
        assert_close(result.ptkp, 54_000_000.0);
        assert_close(result.taxable_income, 90_474_924.0);
        assert_eq!(result.annual_tax, 7_571_239.0);
        assert_eq!(result.monthly_tax, 630_937.0);
        assert_close(result.take_home_pay, 12_000_000.0 - 630_937.0 - 5_525_076.0 / 12.0);

        assert_eq!(result.bracket_breakdown.len(), 2);
        assert_eq!(result.bracket_breakdown[0].bracket, "Rp 0 - Rp 60jt");
        assert_close(result.bracket_breakdown[0].tax, 3_000_000.0);
        assert_eq!(result.bracket_breakdown[1].bracket, "Rp 60jt - Rp 250jt");
        assert_close(result.bracket_breakdown[1].taxable, 30_474_924.0);
        assert_close(result.bracket_breakdown[1].tax, 4_571_238.6);
    }

    #[test]
    fn breakdown_signs_deductions_negative() {
        let result = calculate_pph21(&input(10_000_000.0, 0.0, 0.0, FilingStatus::K2));
        assert_eq!(result.breakdown.len(), 11);
        assert_eq!(result.breakdown[7].label, "PTKP (K/2)");
        assert_eq!(result.breakdown[7].value, -67_500_000.0);
        assert!(result.breakdown[4].value < 0.0);
        assert!(result.breakdown[5].value < 0.0);
        assert_eq!(result.breakdown[10].value, result.monthly_tax);
    }

    #[test]
    fn income_below_ptkp_is_untaxed() {
        let mut low = input(4_000_000.0, 0.0, 0.0, FilingStatus::Tk0);
        low.health_insurance = false;
        low.employment_insurance = false;
        let result = calculate_pph21(&low);
        assert_eq!(result.taxable_income, 0.0);
        assert_eq!(result.annual_tax, 0.0);
        assert!(result.bracket_breakdown.is_empty());
        assert_eq!(result.take_home_pay, 4_000_000.0);
    }

    #[test]
    fn insurance_caps_apply_to_high_salaries() {
        let contribution = employee_insurance(50_000_000.0, true, true);
        assert_close(contribution.health, 12_000_000.0 * 0.01 * 12.0);
        assert_close(contribution.old_age, 50_000_000.0 * 0.02 * 12.0);
        assert_close(contribution.pension, 10_042_300.0 * 0.01 * 12.0);

        let none = employee_insurance(50_000_000.0, false, false);
        assert_eq!(none.total(), 0.0);
    }

    #[test]
    fn occupational_cost_below_cap() {
        let mut modest = input(5_000_000.0, 0.0, 0.0, FilingStatus::Tk0);
        modest.health_insurance = false;
        modest.employment_insurance = false;
        let result = calculate_pph21(&modest);
        assert_close(result.occupational_cost, 3_000_000.0);
    }

    #[test]
    fn top_bracket_absorbs_the_remainder() {
        let tax = progressive_tax(6_000_000_000.0, &PPH21_BRACKETS);
        assert_eq!(tax.brackets.len(), 5);
        assert_eq!(tax.brackets[4].bracket, "Rp 5M - Rp ∞");
        assert_close(tax.brackets[4].taxable, 1_000_000_000.0);
        let expected = 60_000_000.0 * 0.05
            + 190_000_000.0 * 0.15
            + 250_000_000.0 * 0.25
            + 4_500_000_000.0 * 0.30
            + 1_000_000_000.0 * 0.35;
        assert_eq!(tax.tax, round_currency(expected));
    }

    #[test]
    fn base_on_bracket_edge_uses_one_bracket() {
        let tax = progressive_tax(60_000_000.0, &PPH21_BRACKETS);
        assert_eq!(tax.brackets.len(), 1);
        assert_eq!(tax.brackets[0].taxable, 60_000_000.0);
        assert_eq!(tax.tax, 3_000_000.0);
    }

    #[test]
    fn zero_base_has_no_brackets() {
        let tax = progressive_tax(0.0, &PPH21_BRACKETS);
        assert_eq!(tax.tax, 0.0);
        assert!(tax.brackets.is_empty());
    }

    proptest! {
        #[test]
        fn progressive_tax_is_monotone(a in 0u64..10_000_000_000_000, b in 0u64..10_000_000_000_000) {
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            let low_tax = progressive_tax(low as f64, &PPH21_BRACKETS).tax;
            let high_tax = progressive_tax(high as f64, &PPH21_BRACKETS).tax;
            prop_assert!(low_tax <= high_tax);
        }

        #[test]
        fn bracket_amounts_sum_to_base(base in 0u64..10_000_000_000_000) {
            let base = base as f64;
            let tax = progressive_tax(base, &PPH21_BRACKETS);
            let covered: f64 = tax.brackets.iter().map(|b| b.taxable).sum();
            prop_assert!((covered - base).abs() < 1e-3);
        }
    }
}
