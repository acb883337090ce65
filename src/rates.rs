//! Statutory rate tables.
//!
//! Every table used by the calculators lives here as `const` data.
//! Categorical keys (filing status, PPh 23 income type, PPh Final
//! transaction type) are closed enums, so looking up a rate is an
//! exhaustive `match` and an unknown key cannot be represented in
//! typed code.  Keys arriving as text are parsed through [`FromStr`],
//! which reports [`TaxError::UnknownKey`].

use crate::error::TaxError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One band of a progressive rate schedule.
///
/// `upper` is `None` for the top band, which extends to infinity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TaxBracket {
    pub lower: f64,
    pub upper: Option<f64>,
    pub rate: f64,
}

impl TaxBracket {
    /// Width of the band, `None` when unbounded.
    pub fn width(&self) -> Option<f64> {
        self.upper.map(|upper| upper - self.lower)
    }
}

/// PPh 21 progressive schedule (UU HPP, effective 1 January 2022).
pub const PPH21_BRACKETS: [TaxBracket; 5] = [
    TaxBracket { lower: 0.0, upper: Some(60_000_000.0), rate: 0.05 },
    TaxBracket { lower: 60_000_000.0, upper: Some(250_000_000.0), rate: 0.15 },
    TaxBracket { lower: 250_000_000.0, upper: Some(500_000_000.0), rate: 0.25 },
    TaxBracket { lower: 500_000_000.0, upper: Some(5_000_000_000.0), rate: 0.30 },
    TaxBracket { lower: 5_000_000_000.0, upper: None, rate: 0.35 },
];

/// Occupational-cost deduction (biaya jabatan).
pub const OCCUPATIONAL_COST_RATE: f64 = 0.05;
pub const OCCUPATIONAL_COST_MAX_YEARLY: f64 = 6_000_000.0;
pub const OCCUPATIONAL_COST_MAX_MONTHLY: f64 = 500_000.0;

/// BPJS Kesehatan (health insurance) contribution rates.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct HealthInsuranceRates {
    pub company: f64,
    pub employee: f64,
    pub max_salary: f64,
}

pub const BPJS_HEALTH: HealthInsuranceRates = HealthInsuranceRates {
    company: 0.04,
    employee: 0.01,
    max_salary: 12_000_000.0,
};

/// BPJS Ketenagakerjaan (employment insurance) contribution rates.
///
/// JKK varies between 0.24% and 1.74% by risk class; the lowest class
/// is listed.  Only the employee shares enter the PPh 21 calculation.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct EmploymentInsuranceRates {
    pub jht_company: f64,
    pub jht_employee: f64,
    pub jkk: f64,
    pub jkm: f64,
    pub jp_company: f64,
    pub jp_employee: f64,
    pub jp_max_salary: f64,
}

pub const BPJS_EMPLOYMENT: EmploymentInsuranceRates = EmploymentInsuranceRates {
    jht_company: 0.037,
    jht_employee: 0.02,
    jkk: 0.0024,
    jkm: 0.003,
    jp_company: 0.02,
    jp_employee: 0.01,
    jp_max_salary: 10_042_300.0,
};

/// Annual turnover ceiling for the 0.5% UMKM final rate.
pub const UMKM_TURNOVER_LIMIT: f64 = 4_800_000_000.0;

/// Standard corporate income tax rate.
pub const CORPORATE_RATE: f64 = 0.22;
/// Pasal 31E: turnover at or below this qualifies for the facility.
pub const CORPORATE_FACILITY_LIMIT: f64 = 50_000_000_000.0;
/// Pasal 31E: turnover share that receives the reduced rate.
pub const CORPORATE_FACILITY_PORTION: f64 = 4_800_000_000.0;
/// Fraction of the standard rate charged on the facility share.
pub const CORPORATE_FACILITY_DISCOUNT: f64 = 0.5;

/// PPN rate (UU HPP, effective 1 April 2022).
pub const PPN_RATE: f64 = 0.11;

/// PTKP filing status: marital state plus number of dependents.
///
/// `K/I/*` covers married taxpayers whose spouse's income is combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilingStatus {
    #[serde(rename = "TK/0")]
    Tk0,
    #[serde(rename = "TK/1")]
    Tk1,
    #[serde(rename = "TK/2")]
    Tk2,
    #[serde(rename = "TK/3")]
    Tk3,
    #[serde(rename = "K/0")]
    K0,
    #[serde(rename = "K/1")]
    K1,
    #[serde(rename = "K/2")]
    K2,
    #[serde(rename = "K/3")]
    K3,
    #[serde(rename = "K/I/0")]
    Ki0,
    #[serde(rename = "K/I/1")]
    Ki1,
    #[serde(rename = "K/I/2")]
    Ki2,
    #[serde(rename = "K/I/3")]
    Ki3,
}

impl FilingStatus {
    pub const ALL: [FilingStatus; 12] = [
        FilingStatus::Tk0,
        FilingStatus::Tk1,
        FilingStatus::Tk2,
        FilingStatus::Tk3,
        FilingStatus::K0,
        FilingStatus::K1,
        FilingStatus::K2,
        FilingStatus::K3,
        FilingStatus::Ki0,
        FilingStatus::Ki1,
        FilingStatus::Ki2,
        FilingStatus::Ki3,
    ];

    /// Annual non-taxable threshold (PTKP), PMK 101/PMK.010/2016.
    pub const fn ptkp(self) -> f64 {
        match self {
            FilingStatus::Tk0 => 54_000_000.0,
            FilingStatus::Tk1 => 58_500_000.0,
            FilingStatus::Tk2 => 63_000_000.0,
            FilingStatus::Tk3 => 67_500_000.0,
            FilingStatus::K0 => 58_500_000.0,
            FilingStatus::K1 => 63_000_000.0,
            FilingStatus::K2 => 67_500_000.0,
            FilingStatus::K3 => 72_000_000.0,
            FilingStatus::Ki0 => 112_500_000.0,
            FilingStatus::Ki1 => 117_000_000.0,
            FilingStatus::Ki2 => 121_500_000.0,
            FilingStatus::Ki3 => 126_000_000.0,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            FilingStatus::Tk0 => "TK/0",
            FilingStatus::Tk1 => "TK/1",
            FilingStatus::Tk2 => "TK/2",
            FilingStatus::Tk3 => "TK/3",
            FilingStatus::K0 => "K/0",
            FilingStatus::K1 => "K/1",
            FilingStatus::K2 => "K/2",
            FilingStatus::K3 => "K/3",
            FilingStatus::Ki0 => "K/I/0",
            FilingStatus::Ki1 => "K/I/1",
            FilingStatus::Ki2 => "K/I/2",
            FilingStatus::Ki3 => "K/I/3",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            FilingStatus::Tk0 => "Single, no dependents",
            FilingStatus::Tk1 => "Single, 1 dependent",
            FilingStatus::Tk2 => "Single, 2 dependents",
            FilingStatus::Tk3 => "Single, 3 dependents",
            FilingStatus::K0 => "Married, no dependents",
            FilingStatus::K1 => "Married, 1 dependent",
            FilingStatus::K2 => "Married, 2 dependents",
            FilingStatus::K3 => "Married, 3 dependents",
            FilingStatus::Ki0 => "Married (combined income), no dependents",
            FilingStatus::Ki1 => "Married (combined income), 1 dependent",
            FilingStatus::Ki2 => "Married (combined income), 2 dependents",
            FilingStatus::Ki3 => "Married (combined income), 3 dependents",
        }
    }
}

/// Income categories subject to PPh 23 withholding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomeType {
    Dividen,
    Bunga,
    Royalti,
    Hadiah,
    JasaTeknik,
    JasaManajemen,
    JasaKonsultan,
    JasaLainnya,
}

impl IncomeType {
    pub const ALL: [IncomeType; 8] = [
        IncomeType::Dividen,
        IncomeType::Bunga,
        IncomeType::Royalti,
        IncomeType::Hadiah,
        IncomeType::JasaTeknik,
        IncomeType::JasaManajemen,
        IncomeType::JasaKonsultan,
        IncomeType::JasaLainnya,
    ];

    pub const fn rate(self) -> f64 {
        match self {
            IncomeType::Dividen | IncomeType::Bunga | IncomeType::Royalti | IncomeType::Hadiah => {
                0.15
            }
            IncomeType::JasaTeknik
            | IncomeType::JasaManajemen
            | IncomeType::JasaKonsultan
            | IncomeType::JasaLainnya => 0.02,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            IncomeType::Dividen => "dividen",
            IncomeType::Bunga => "bunga",
            IncomeType::Royalti => "royalti",
            IncomeType::Hadiah => "hadiah",
            IncomeType::JasaTeknik => "jasa_teknik",
            IncomeType::JasaManajemen => "jasa_manajemen",
            IncomeType::JasaKonsultan => "jasa_konsultan",
            IncomeType::JasaLainnya => "jasa_lainnya",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            IncomeType::Dividen => "Dividends",
            IncomeType::Bunga => "Interest",
            IncomeType::Royalti => "Royalties",
            IncomeType::Hadiah => "Prizes and awards",
            IncomeType::JasaTeknik => "Technical services",
            IncomeType::JasaManajemen => "Management services",
            IncomeType::JasaKonsultan => "Consulting services",
            IncomeType::JasaLainnya => "Other services",
        }
    }
}

/// Transaction categories taxed under PPh Final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinalTaxType {
    /// Small-business turnover (PP 55/2022), ceiling [`UMKM_TURNOVER_LIMIT`].
    Umkm,
    SewaTanahBangunan,
    KonstruksiKualifikasiKecil,
    KonstruksiKualifikasiMenengahBesar,
    KonstruksiTanpaKualifikasi,
    KonstruksiKonsultanKualifikasi,
    KonstruksiKonsultanTanpaKualifikasi,
}

impl FinalTaxType {
    pub const ALL: [FinalTaxType; 7] = [
        FinalTaxType::Umkm,
        FinalTaxType::SewaTanahBangunan,
        FinalTaxType::KonstruksiKualifikasiKecil,
        FinalTaxType::KonstruksiKualifikasiMenengahBesar,
        FinalTaxType::KonstruksiTanpaKualifikasi,
        FinalTaxType::KonstruksiKonsultanKualifikasi,
        FinalTaxType::KonstruksiKonsultanTanpaKualifikasi,
    ];

    pub const fn rate(self) -> f64 {
        match self {
            FinalTaxType::Umkm => 0.005,
            FinalTaxType::SewaTanahBangunan => 0.10,
            FinalTaxType::KonstruksiKualifikasiKecil => 0.019,
            FinalTaxType::KonstruksiKualifikasiMenengahBesar => 0.024,
            FinalTaxType::KonstruksiTanpaKualifikasi => 0.04,
            FinalTaxType::KonstruksiKonsultanKualifikasi => 0.035,
            FinalTaxType::KonstruksiKonsultanTanpaKualifikasi => 0.06,
        }
    }

    /// Whether the category is one of the construction-service tiers.
    pub const fn is_construction(self) -> bool {
        !matches!(self, FinalTaxType::Umkm | FinalTaxType::SewaTanahBangunan)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            FinalTaxType::Umkm => "umkm",
            FinalTaxType::SewaTanahBangunan => "sewa_tanah_bangunan",
            FinalTaxType::KonstruksiKualifikasiKecil => "konstruksi_kualifikasi_kecil",
            FinalTaxType::KonstruksiKualifikasiMenengahBesar => {
                "konstruksi_kualifikasi_menengah_besar"
            }
            FinalTaxType::KonstruksiTanpaKualifikasi => "konstruksi_tanpa_kualifikasi",
            FinalTaxType::KonstruksiKonsultanKualifikasi => "konstruksi_konsultan_kualifikasi",
            FinalTaxType::KonstruksiKonsultanTanpaKualifikasi => {
                "konstruksi_konsultan_tanpa_kualifikasi"
            }
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            FinalTaxType::Umkm => "Small business (UMKM)",
            FinalTaxType::SewaTanahBangunan => "Land/building rental",
            FinalTaxType::KonstruksiKualifikasiKecil => "Construction, small qualification",
            FinalTaxType::KonstruksiKualifikasiMenengahBesar => {
                "Construction, medium/large qualification"
            }
            FinalTaxType::KonstruksiTanpaKualifikasi => "Construction, no qualification",
            FinalTaxType::KonstruksiKonsultanKualifikasi => {
                "Construction consulting, qualified"
            }
            FinalTaxType::KonstruksiKonsultanTanpaKualifikasi => {
                "Construction consulting, no qualification"
            }
        }
    }
}

macro_rules! impl_key_traits {
    ($ty:ty, $kind:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = TaxError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let key = s.trim();
                <$ty>::ALL
                    .into_iter()
                    .find(|candidate| candidate.as_str().eq_ignore_ascii_case(key))
                    .ok_or_else(|| TaxError::UnknownKey {
                        kind: $kind,
                        key: s.to_string(),
                    })
            }
        }
    };
}

impl_key_traits!(FilingStatus, "filing status");
impl_key_traits!(IncomeType, "income type");
impl_key_traits!(FinalTaxType, "final tax type");

/// A selectable key with its description and associated amount or rate.
#[derive(Debug, Clone, Serialize)]
pub struct RateOption {
    pub key: &'static str,
    pub description: &'static str,
    pub value: f64,
}

/// Every table in one serialisable value, for clients that populate
/// selectors or display the rates in force.
#[derive(Debug, Clone, Serialize)]
pub struct RateCatalogue {
    pub pph21_brackets: Vec<TaxBracket>,
    pub ptkp: Vec<RateOption>,
    pub occupational_cost_rate: f64,
    pub occupational_cost_max_yearly: f64,
    pub occupational_cost_max_monthly: f64,
    pub bpjs_health: HealthInsuranceRates,
    pub bpjs_employment: EmploymentInsuranceRates,
    pub pph23: Vec<RateOption>,
    pub pph_final: Vec<RateOption>,
    pub umkm_turnover_limit: f64,
    pub corporate_rate: f64,
    pub corporate_facility_limit: f64,
    pub corporate_facility_portion: f64,
    pub ppn_rate: f64,
}

pub fn catalogue() -> RateCatalogue {
    RateCatalogue {
        pph21_brackets: PPH21_BRACKETS.to_vec(),
        ptkp: FilingStatus::ALL
            .into_iter()
            .map(|s| RateOption { key: s.as_str(), description: s.description(), value: s.ptkp() })
            .collect(),
        occupational_cost_rate: OCCUPATIONAL_COST_RATE,
        occupational_cost_max_yearly: OCCUPATIONAL_COST_MAX_YEARLY,
        occupational_cost_max_monthly: OCCUPATIONAL_COST_MAX_MONTHLY,
        bpjs_health: BPJS_HEALTH,
        bpjs_employment: BPJS_EMPLOYMENT,
        pph23: IncomeType::ALL
            .into_iter()
            .map(|t| RateOption { key: t.as_str(), description: t.description(), value: t.rate() })
            .collect(),
        pph_final: FinalTaxType::ALL
            .into_iter()
            .map(|t| RateOption { key: t.as_str(), description: t.description(), value: t.rate() })
            .collect(),
        umkm_turnover_limit: UMKM_TURNOVER_LIMIT,
        corporate_rate: CORPORATE_RATE,
        corporate_facility_limit: CORPORATE_FACILITY_LIMIT,
        corporate_facility_portion: CORPORATE_FACILITY_PORTION,
        ppn_rate: PPN_RATE,
    }
}
