//! Error types for the tax engine.
//!
//! The calculators themselves are total and never fail.  Errors arise
//! only at the edges: categorical keys supplied as free text, and
//! server configuration read from the environment.

use thiserror::Error;

/// Errors raised while parsing categorical keys or configuration.
#[derive(Debug, Error)]
pub enum TaxError {
    /// A filing status, income type or transaction type that is not in
    /// the corresponding rate table.
    #[error("unknown {kind}: {key:?}")]
    UnknownKey { kind: &'static str, key: String },

    /// An environment variable holds a value that cannot be used.
    #[error("invalid configuration: {0}")]
    Config(String),
}
