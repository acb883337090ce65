//! End-to-end scenarios through the public calculator functions.

use pajak_engine::models::{
    PpnInput, Pph21Input, Pph23Input, PphBadanInput, PphFinalInput, SettlementStatus,
    VatDirection,
};
use pajak_engine::rates::{FilingStatus, FinalTaxType, IncomeType};
use pajak_engine::{
    calculate_pph21, calculate_pph23, calculate_pph_badan, calculate_pph_final, calculate_ppn,
    calculate_ppn_settlement,
};

#[test]
fn employee_with_bonus_and_bpjs() {
    let result = calculate_pph21(&Pph21Input {
        base_salary: 10_000_000.0,
        allowances: 2_000_000.0,
        bonus: 12_000_000.0,
        filing_status: "TK/0".parse().unwrap(),
        health_insurance: true,
        employment_insurance: true,
    });

    assert_eq!(result.gross_annual_income, 156_000_000.0);
    assert_eq!(result.occupational_cost, 6_000_000.0);
    assert!((result.insurance_total - 5_525_076.0).abs() < 1e-6);
    assert!((result.net_income - 144_474_924.0).abs() < 1e-6);
    assert!((result.taxable_income - 90_474_924.0).abs() < 1e-6);
    assert_eq!(result.annual_tax, 7_571_239.0);
    assert_eq!(result.monthly_tax, 630_937.0);

    let covered: f64 = result.bracket_breakdown.iter().map(|b| b.taxable).sum();
    assert!((covered - result.taxable_income).abs() < 1e-6);
}

#[test]
fn married_status_raises_threshold() {
    let single = calculate_pph21(&single_input());
    assert_eq!(single.annual_tax, 12_000_000.0);
    let combined = calculate_pph21(&Pph21Input {
        filing_status: FilingStatus::Ki3,
        ..single_input()
    });
    assert!(combined.annual_tax < single.annual_tax);
    assert_eq!(combined.ptkp - single.ptkp, 72_000_000.0);
}

fn single_input() -> Pph21Input {
    Pph21Input {
        base_salary: 15_000_000.0,
        allowances: 0.0,
        bonus: 0.0,
        filing_status: FilingStatus::Tk0,
        health_insurance: false,
        employment_insurance: false,
    }
}

#[test]
fn technical_service_fee_without_npwp() {
    let result = calculate_pph23(&Pph23Input {
        income_type: IncomeType::JasaTeknik,
        transaction_value: 10_000_000.0,
        has_npwp: false,
    });
    assert_eq!(result.applied_rate, 0.04);
    assert_eq!(result.tax, 400_000.0);
    assert_eq!(result.net_received, 9_600_000.0);
}

#[test]
fn vat_forward_then_backward() {
    let forward = calculate_ppn(&PpnInput {
        amount: 10_000_000.0,
        vat_inclusive: false,
        direction: VatDirection::Output,
    });
    assert_eq!(forward.vat, 1_100_000.0);
    assert_eq!(forward.total, 11_100_000.0);

    let backward = calculate_ppn(&PpnInput {
        amount: forward.total,
        vat_inclusive: true,
        direction: VatDirection::Output,
    });
    assert_eq!(backward.base, 10_000_000.0);
    assert_eq!(backward.vat, 1_100_000.0);

    let settlement = calculate_ppn_settlement(forward.vat, 400_000.0);
    assert_eq!(settlement.status, SettlementStatus::Underpaid);
    assert_eq!(settlement.difference, 700_000.0);
}

#[test]
fn corporate_with_zero_turnover_pays_standard_rate() {
    let result = calculate_pph_badan(&PphBadanInput {
        gross_income: 500_000_000.0,
        operating_cost: 200_000_000.0,
        annual_turnover: 0.0,
    });
    assert!(result.facility_eligible);
    assert_eq!(result.facility_taxable, 0.0);
    assert_eq!(result.regular_taxable, 300_000_000.0);
    assert_eq!(result.total_tax, 66_000_000.0);
}

#[test]
fn umkm_over_ceiling_is_flagged_only() {
    let result = calculate_pph_final(&PphFinalInput {
        final_type: FinalTaxType::Umkm,
        transaction_value: 40_000_000.0,
        annual_turnover: Some(6_000_000_000.0),
    });
    assert!(!result.umkm_eligible);
    assert_eq!(result.tax, 200_000.0);
    assert_eq!(result.net_value, 39_800_000.0);
}
