//! Pajak Engine library crate.
//!
//! This crate implements the Indonesian tax calculators (PPh 21,
//! PPh 23, PPh Final, PPh Badan and PPN) as plain functions over
//! constant rate tables, together with a batch engine and an HTTP API.
//! External applications may depend on the `pajak_engine` crate and
//! call the calculators directly or embed the API via
//! `api::build_router`.

pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod format;
pub mod models;
pub mod pph21;
pub mod pph23;
pub mod pph_badan;
pub mod pph_final;
pub mod ppn;
pub mod rates;

pub use error::TaxError;
pub use pph21::calculate_pph21;
pub use pph23::calculate_pph23;
pub use pph_badan::calculate_pph_badan;
pub use pph_final::calculate_pph_final;
pub use ppn::{calculate_ppn, calculate_ppn_settlement, settle_transactions};
