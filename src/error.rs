//! Error type shared by both level engines and the collector.

use thiserror::Error;

use crate::types::OrderId;

/// Failures surfaced to the caller as explicit values.
///
/// `NotFound` is expected in live flow (cancel racing a fill) and leaves
/// the level untouched. Underfill is not an error: `fill` reports it
/// through the filled quantity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("order price {actual} does not match level price {expected}")]
    InvalidPrice { expected: u64, actual: u64 },

    #[error("order {0} not found at this level")]
    NotFound(OrderId),

    #[error("order {0} already rests at this level")]
    DuplicateOrder(OrderId),

    #[error("order {0} has no remaining quantity")]
    ZeroQuantity(OrderId),

    #[error("order {0} would push level volume past u64::MAX")]
    QuantityOverflow(OrderId),

    #[error("failed to encode event stream: {0}")]
    Encoding(String),
}

impl Error {
    /// Whether the caller can safely ignore this failure.
    pub fn is_benign(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
