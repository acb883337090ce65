//! Data models for the tax engine.
//!
//! The `models` module defines the input and result records for each
//! calculator.  All of them derive `Serialize` and `Deserialize` so
//! they can be sent over the HTTP API or stored by a caller.  Results
//! are plain values: they are built once by a calculator and never
//! mutated afterwards.
//!
//! Monetary amounts are `f64` rupiah.  Missing amounts in JSON input
//! default to zero; negative amounts are accepted and flow through the
//! arithmetic unchanged.

use crate::rates::{FilingStatus, FinalTaxType, IncomeType};
use serde::{Deserialize, Serialize};

/// Rounds an amount to the nearest whole rupiah, halves upwards.
pub fn round_currency(value: f64) -> f64 {
    let floor = value.floor();
    // `value - floor` is exact; adding 0.5 first is not.
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

/// A labelled line in a result breakdown.  Deductions carry negative
/// values so the lines can be read top to bottom as a running sum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownItem {
    pub label: String,
    pub value: f64,
}

impl BreakdownItem {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self { label: label.into(), value }
    }
}

/// Tax attributed to one band of the progressive schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BracketBreakdown {
    /// Human-readable range such as `Rp 0 - Rp 60jt`.
    pub bracket: String,
    /// Portion of the taxable base falling inside this band.
    pub taxable: f64,
    pub rate: f64,
    /// Unrounded tax for this band.
    pub tax: f64,
}

/// Input to the PPh 21 (employee income tax) calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pph21Input {
    /// Monthly base salary (gaji pokok).
    #[serde(default)]
    pub base_salary: f64,
    /// Monthly fixed allowances (tunjangan).
    #[serde(default)]
    pub allowances: f64,
    /// Annual bonus or THR.
    #[serde(default)]
    pub bonus: f64,
    pub filing_status: FilingStatus,
    /// Whether the employee pays BPJS Kesehatan.
    #[serde(default)]
    pub health_insurance: bool,
    /// Whether the employee pays BPJS Ketenagakerjaan (JHT and JP).
    #[serde(default)]
    pub employment_insurance: bool,
}

/// Employee-borne social insurance, annualised.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InsuranceContribution {
    /// BPJS Kesehatan.
    pub health: f64,
    /// JHT (old-age savings).
    pub old_age: f64,
    /// JP (pension).
    pub pension: f64,
}

impl InsuranceContribution {
    pub fn total(&self) -> f64 {
        self.health + self.old_age + self.pension
    }
}

/// The result of a PPh 21 calculation.  All amounts are annual unless
/// the field name says otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pph21Result {
    pub gross_annual_income: f64,
    /// Biaya jabatan: 5% of gross, capped at 6,000,000.
    pub occupational_cost: f64,
    pub insurance: InsuranceContribution,
    pub insurance_total: f64,
    pub net_income: f64,
    pub ptkp: f64,
    /// Taxable income (PKP), never negative.
    pub taxable_income: f64,
    pub annual_tax: f64,
    pub monthly_tax: f64,
    /// Monthly income left after tax and insurance.
    pub take_home_pay: f64,
    pub breakdown: Vec<BreakdownItem>,
    /// Only bands with a nonzero taxable amount are listed.
    pub bracket_breakdown: Vec<BracketBreakdown>,
}

/// Input to the PPh 23 withholding calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pph23Input {
    pub income_type: IncomeType,
    #[serde(default)]
    pub transaction_value: f64,
    /// Whether the recipient holds an NPWP.  Without one the rate doubles.
    #[serde(default)]
    pub has_npwp: bool,
}

/// The result of a PPh 23 calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pph23Result {
    pub transaction_value: f64,
    /// Rate for the income type when the recipient holds an NPWP.
    pub standard_rate: f64,
    /// Rate actually used: the standard rate, doubled without an NPWP.
    pub applied_rate: f64,
    /// Tax withheld, rounded to whole rupiah.
    pub tax: f64,
    /// Amount the recipient receives after withholding.
    pub net_received: f64,
    /// Explains whether the standard or doubled rate was used.
    pub note: String,
}

/// Input to the PPh Final calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PphFinalInput {
    /// Transaction category, which selects the rate.
    pub final_type: FinalTaxType,
    #[serde(default)]
    pub transaction_value: f64,
    /// Annual turnover, only consulted for UMKM eligibility.
    #[serde(default)]
    pub annual_turnover: Option<f64>,
}

/// The result of a PPh Final calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PphFinalResult {
    pub transaction_value: f64,
    pub rate: f64,
    /// Final tax, rounded to whole rupiah.
    pub tax: f64,
    /// Transaction value less the tax.
    pub net_value: f64,
    /// Advisory text for the category, or a warning for UMKM turnover
    /// above the ceiling.
    pub note: String,
    /// `false` when a UMKM taxpayer reports turnover above the ceiling.
    /// The UMKM rate is still applied; this only flags the situation.
    pub umkm_eligible: bool,
}

/// Input to the PPh Badan (corporate income tax) calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PphBadanInput {
    #[serde(default)]
    pub gross_income: f64,
    /// Deductible operating costs.
    #[serde(default)]
    pub operating_cost: f64,
    #[serde(default)]
    pub annual_turnover: f64,
}

/// The result of a PPh Badan calculation.  Inputs are echoed back so
/// the record can be displayed on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PphBadanResult {
    pub gross_income: f64,
    pub operating_cost: f64,
    pub net_income: f64,
    /// Taxable income (PKP), never negative.
    pub taxable_income: f64,
    /// Turnover is within the Pasal 31E ceiling.
    pub facility_eligible: bool,
    /// Share of the taxable income receiving the reduced rate, 0 to 1.
    pub facility_proportion: f64,
    /// Taxable income taxed at half the standard rate.
    pub facility_taxable: f64,
    /// Taxable income taxed at the standard rate.
    pub regular_taxable: f64,
    pub facility_tax: f64,
    pub regular_tax: f64,
    /// `facility_tax + regular_tax`.
    pub total_tax: f64,
    /// `total_tax / taxable_income`, zero when there is no taxable income.
    pub effective_rate: f64,
    /// Whether the facility applied, and why not when it did not.
    pub note: String,
}

/// Which side of the VAT ledger a transaction belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VatDirection {
    /// PPN keluaran: collected on sales.
    #[default]
    #[serde(alias = "keluaran")]
    Output,
    /// PPN masukan: paid on purchases.
    #[serde(alias = "masukan")]
    Input,
}

/// Input to the PPN calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PpnInput {
    #[serde(default)]
    pub amount: f64,
    /// `true` when `amount` already includes VAT.
    #[serde(default)]
    pub vat_inclusive: bool,
    #[serde(default)]
    pub direction: VatDirection,
}

/// The result of a PPN calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PpnResult {
    /// Tax base (DPP).
    pub base: f64,
    pub vat: f64,
    /// Base plus VAT.
    pub total: f64,
    pub direction: VatDirection,
}

/// Direction of a VAT settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettlementStatus {
    /// Output VAT exceeds input VAT: the difference is owed (kurang bayar).
    #[serde(alias = "kurang_bayar")]
    Underpaid,
    /// Input VAT exceeds output VAT: refundable or carried forward (lebih bayar).
    #[serde(alias = "lebih_bayar")]
    Overpaid,
    /// Output and input VAT are equal (nihil).
    #[serde(alias = "nihil")]
    Nil,
}

/// Input to the VAT settlement calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PpnSettlementInput {
    #[serde(default)]
    pub output_vat: f64,
    #[serde(default)]
    pub input_vat: f64,
}

/// Output VAT netted against input VAT.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PpnSettlement {
    pub output_vat: f64,
    pub input_vat: f64,
    /// `output_vat - input_vat`.
    pub difference: f64,
    pub status: SettlementStatus,
    /// Sentence naming the absolute difference and what to do with it.
    pub statement: String,
}

/// A single sale or purchase for [`crate::ppn::settle_transactions`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VatTransaction {
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub vat_inclusive: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionSettlementInput {
    #[serde(default)]
    pub sales: VatTransaction,
    #[serde(default)]
    pub purchases: VatTransaction,
}

/// VAT on a period's sales and purchases together with their settlement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionSettlement {
    pub output: PpnResult,
    pub input: PpnResult,
    pub settlement: PpnSettlement,
}
