//! Text formatting for amounts and rates.
//!
//! The calculators return raw numbers; these helpers are only used to
//! build the human-readable notes and bracket labels embedded in the
//! results.  Amounts follow the Indonesian convention of a dot as the
//! thousands separator (`Rp 1.100.000`).

use thousands::Separable;

/// Whole-rupiah amount with dot separators and no currency symbol.
pub fn format_number(value: f64) -> String {
    (value.round() as i64).separate_with_dots()
}

/// Whole-rupiah amount with the `Rp` symbol, e.g. `Rp 6.000.000`.
pub fn format_rupiah(value: f64) -> String {
    if value < 0.0 {
        format!("-Rp {}", format_number(-value))
    } else {
        format!("Rp {}", format_number(value))
    }
}

/// A fractional rate as a percentage, e.g. `format_percent(0.11, 0)` is `11%`.
pub fn format_percent(rate: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, rate * 100.0)
}

/// Short form used in bracket labels: `60jt` (juta), `5M` (miliar), `∞`.
pub fn format_compact(value: f64) -> String {
    if value.is_infinite() {
        "∞".to_string()
    } else if value >= 1_000_000_000.0 {
        format!("{}M", value / 1_000_000_000.0)
    } else if value >= 1_000_000.0 {
        format!("{}jt", value / 1_000_000.0)
    } else {
        format!("{}", value)
    }
}

/// Amount in billions with one decimal, e.g. `5.0` for 5,000,000,000.
pub fn format_billions(value: f64) -> String {
    format!("{:.1}", value / 1_000_000_000.0)
}
