//! PPh Final: flat presumptive tax on UMKM turnover, land and building
//! rental, and construction services.
//!
//! A UMKM taxpayer whose reported annual turnover exceeds
//! [`UMKM_TURNOVER_LIMIT`] is flagged as ineligible with a warning
//! note, but the 0.5% rate is still applied.  The flag is advisory.

use crate::format::{format_billions, format_rupiah};
use crate::models::{round_currency, PphFinalInput, PphFinalResult};
use crate::rates::{FinalTaxType, UMKM_TURNOVER_LIMIT};

/// Calculates PPh Final on one transaction and attaches a note for its
/// category.
pub fn calculate_pph_final(input: &PphFinalInput) -> PphFinalResult {
    let rate = input.final_type.rate();
    let tax = round_currency(input.transaction_value * rate);

    let mut umkm_eligible = true;
    let note = match input.final_type {
        FinalTaxType::Umkm => match input.annual_turnover {
            Some(turnover) if turnover > UMKM_TURNOVER_LIMIT => {
                umkm_eligible = false;
                format!(
                    "Warning: annual turnover Rp {} M exceeds the Rp 4.8 M limit. \
                     The 0.5% UMKM rate may not apply.",
                    format_billions(turnover)
                )
            }
            _ => format!(
                "The 0.5% UMKM final rate applies to taxpayers with turnover up to {} per year.",
                format_rupiah(UMKM_TURNOVER_LIMIT)
            ),
        },
        FinalTaxType::SewaTanahBangunan => {
            "10% final tax is withheld by the tenant and is final.".to_string()
        }
        FinalTaxType::KonstruksiKualifikasiKecil
        | FinalTaxType::KonstruksiKualifikasiMenengahBesar
        | FinalTaxType::KonstruksiTanpaKualifikasi
        | FinalTaxType::KonstruksiKonsultanKualifikasi
        | FinalTaxType::KonstruksiKonsultanTanpaKualifikasi => {
            "Rates vary with the contractor's business qualification.".to_string()
        }
    };

    PphFinalResult {
        transaction_value: input.transaction_value,
        rate,
        tax,
        net_value: input.transaction_value - tax,
        note,
        umkm_eligible,
    }
}
