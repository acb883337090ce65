//! PPN: value-added tax.
//!
//! [`calculate_ppn`] works forwards from a VAT-exclusive amount or
//! backwards from a VAT-inclusive one.  [`calculate_ppn_settlement`]
//! nets output VAT (on sales) against input VAT (on purchases).

use crate::format::format_rupiah;
use crate::models::{
    round_currency, PpnInput, PpnResult, PpnSettlement, SettlementStatus, TransactionSettlement,
    TransactionSettlementInput, VatDirection,
};
use crate::rates::PPN_RATE;

/// Splits an amount into tax base and VAT.
///
/// A VAT-exclusive amount is the base and VAT is added on top.  A
/// VAT-inclusive amount is divided by `1 + rate` to recover the base,
/// and VAT is whatever remains.
pub fn calculate_ppn(input: &PpnInput) -> PpnResult {
    if input.vat_inclusive {
        let base = round_currency(input.amount / (1.0 + PPN_RATE));
        PpnResult {
            base,
            vat: input.amount - base,
            total: input.amount,
            direction: input.direction,
        }
    } else {
        let vat = round_currency(input.amount * PPN_RATE);
        PpnResult {
            base: input.amount,
            vat,
            total: input.amount + vat,
            direction: input.direction,
        }
    }
}

/// Nets output VAT against input VAT and describes the outcome.
pub fn calculate_ppn_settlement(output_vat: f64, input_vat: f64) -> PpnSettlement {
    let difference = output_vat - input_vat;

    let (status, statement) = if difference > 0.0 {
        (
            SettlementStatus::Underpaid,
            format!(
                "VAT underpaid: you must remit {} to the state treasury.",
                format_rupiah(difference)
            ),
        )
    } else if difference < 0.0 {
        (
            SettlementStatus::Overpaid,
            format!(
                "VAT overpaid: {} can be carried forward or claimed as a refund.",
                format_rupiah(difference.abs())
            ),
        )
    } else {
        (
            SettlementStatus::Nil,
            "VAT nil: nothing is owed and nothing is refundable.".to_string(),
        )
    };

    PpnSettlement { output_vat, input_vat, difference, status, statement }
}

/// Computes VAT on a period's sales and purchases and settles the two.
pub fn settle_transactions(input: &TransactionSettlementInput) -> TransactionSettlement {
    let output = calculate_ppn(&PpnInput {
        amount: input.sales.amount,
        vat_inclusive: input.sales.vat_inclusive,
        direction: VatDirection::Output,
    });
    let purchases = calculate_ppn(&PpnInput {
        amount: input.purchases.amount,
        vat_inclusive: input.purchases.vat_inclusive,
        direction: VatDirection::Input,
    });
    let settlement = calculate_ppn_settlement(output.vat, purchases.vat);

    TransactionSettlement { output, input: purchases, settlement }
}
