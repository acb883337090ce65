//! PPh Badan: corporate income tax with the Pasal 31E facility.
//!
//! Companies with annual turnover up to [`CORPORATE_FACILITY_LIMIT`] pay
//! half the standard rate on the share of taxable income proportional
//! to [`CORPORATE_FACILITY_PORTION`] of turnover.  The rest is taxed at
//! [`CORPORATE_RATE`].

use crate::format::format_percent;
use crate::models::{round_currency, PphBadanInput, PphBadanResult};
use crate::rates::{
    CORPORATE_FACILITY_DISCOUNT, CORPORATE_FACILITY_LIMIT, CORPORATE_FACILITY_PORTION,
    CORPORATE_RATE,
};

/// Calculates corporate income tax for one fiscal year, applying the
/// Pasal 31E facility when turnover allows it.
pub fn calculate_pph_badan(input: &PphBadanInput) -> PphBadanResult {
    let net_income = input.gross_income - input.operating_cost;
    let taxable_income = net_income.max(0.0);
    let turnover = input.annual_turnover;

    let facility_eligible = turnover <= CORPORATE_FACILITY_LIMIT;

    // Zero turnover is eligible but has no proportion to apply.
    let (facility_proportion, facility_taxable, regular_taxable, facility_tax, regular_tax, note) =
        if facility_eligible && turnover > 0.0 {
            let proportion = (CORPORATE_FACILITY_PORTION / turnover).min(1.0);
            let facility_taxable = round_currency(taxable_income * proportion);
            let regular_taxable = taxable_income - facility_taxable;
            let facility_tax =
                round_currency(facility_taxable * CORPORATE_RATE * CORPORATE_FACILITY_DISCOUNT);
            let regular_tax = round_currency(regular_taxable * CORPORATE_RATE);
            let note = format!(
                "Pasal 31E facility: {} of taxable income is taxed at {} (50% of {})",
                format_percent(proportion, 1),
                format_percent(CORPORATE_RATE * CORPORATE_FACILITY_DISCOUNT, 0),
                format_percent(CORPORATE_RATE, 0),
            );
            (proportion, facility_taxable, regular_taxable, facility_tax, regular_tax, note)
        } else {
            let regular_tax = round_currency(taxable_income * CORPORATE_RATE);
            let note = if turnover > CORPORATE_FACILITY_LIMIT {
                "Turnover exceeds Rp 50 billion; the Pasal 31E rate reduction does not apply."
                    .to_string()
            } else {
                format!(
                    "The full {} corporate rate applies.",
                    format_percent(CORPORATE_RATE, 0)
                )
            };
            (0.0, 0.0, taxable_income, 0.0, regular_tax, note)
        };

    let total_tax = facility_tax + regular_tax;
    let effective_rate = if taxable_income > 0.0 {
        total_tax / taxable_income
    } else {
        0.0
    };

    PphBadanResult {
        gross_income: input.gross_income,
        operating_cost: input.operating_cost,
        net_income,
        taxable_income,
        facility_eligible,
        facility_proportion,
        facility_taxable,
        regular_taxable,
        facility_tax,
        regular_tax,
        total_tax,
        effective_rate,
        note,
    }
}
