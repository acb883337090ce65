//! PPh 23: withholding on services, royalties, interest and dividends.

use crate::models::{round_currency, Pph23Input, Pph23Result};

/// Recipients without an NPWP are withheld at twice the standard rate.
pub const NO_NPWP_MULTIPLIER: f64 = 2.0;

/// Calculates PPh 23 withheld from a payment.
///
/// The standard rate comes from the income type and is doubled when the
/// recipient has no NPWP.  Both rates are returned so the doubling can
/// be shown to the user.
pub fn calculate_pph23(input: &Pph23Input) -> Pph23Result {
    let standard_rate = input.income_type.rate();
    let applied_rate = if input.has_npwp {
        standard_rate
    } else {
        standard_rate * NO_NPWP_MULTIPLIER
    };

    let tax = round_currency(input.transaction_value * applied_rate);
    let note = if input.has_npwp {
        "Standard rate applied".to_string()
    } else {
        "Rate is 100% higher because the recipient has no NPWP".to_string()
    };

    Pph23Result {
        transaction_value: input.transaction_value,
        standard_rate,
        applied_rate,
        tax,
        net_received: input.transaction_value - tax,
        note,
    }
}
