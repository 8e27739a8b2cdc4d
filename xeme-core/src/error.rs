//! Error type shared by every fallible core operation.

use thiserror::Error;

/// Errors raised by the calculation engine.
///
/// Nothing here is retried; every operation is pure, so a failure is final
/// for its inputs.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum XemeError {
    /// A value in the sample space is not covered by any tier of an order.
    #[error("value {value} is not ranked by any tier")]
    ValueNotRanked { value: u32 },
    /// A configuration payload was structurally invalid.
    #[error("malformed configuration: {0}")]
    MalformedConfiguration(String),
    /// A core function received an out-of-domain parameter.
    #[error("invalid {name} {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: i64,
        reason: &'static str,
    },
    /// A game name matched none of the built-in variants.
    #[error("unknown game variant `{0}`")]
    UnknownVariant(String),
    /// An order does not place a value in exactly one tier.
    #[error("value {value} appears in {occurrences} tiers (expected exactly 1)")]
    PartitionViolation { value: u32, occurrences: usize },
}

impl XemeError {
    pub(crate) fn invalid(name: &'static str, value: impl Into<i64>, reason: &'static str) -> Self {
        Self::InvalidParameter {
            name,
            value: value.into(),
            reason,
        }
    }

    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedConfiguration(message.into())
    }
}

impl From<serde_json::Error> for XemeError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedConfiguration(err.to_string())
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, XemeError>;
