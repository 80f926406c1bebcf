//! Core data types consumed by the price level.
//!
//! All prices and quantities use fixed-point representation (scaled by
//! 10^8), see [`price`].
//!
//! ## Types
//!
//! - [`Order`]: a resting or incoming order
//! - [`Side`], [`OrderType`], [`OrderFlag`]: tags carried by an order
//! - [`Instrument`], [`ExchangeType`]: opaque references

mod instrument;
mod order;
pub mod price;

pub use instrument::{ExchangeType, Instrument};
pub use order::{Order, OrderFlag, OrderId, OrderType, Side};
