//! # Price Level
//!
//! Time-priority matching primitive for a limit order book: one price,
//! a FIFO queue of resting orders, and an event trail of every change.
//!
//! ## Architecture
//!
//! - **Types**: the order model and fixed-point helpers
//! - **Level**: the [`PriceLevel`] contract with a reference engine
//!   ([`DequeLevel`]) and a slab-backed engine ([`SlabLevel`])
//! - **Collector**: event sink that batches level events for the book
//!
//! ## Design Principles
//!
//! 1. **Time priority**: orders trade strictly in arrival order
//! 2. **No Floating Point**: prices and quantities are fixed-point (10^8)
//! 3. **Explicit failures**: every level error is a returned value
//! 4. **Interchangeable engines**: identical calls give identical events
//!
//! ## Example
//!
//! ```
//! use price_level::{Collector, PriceLevel, SlabLevel};
//! use price_level::types::{Instrument, Order, Side};
//!
//! let mut collector = Collector::new();
//! let mut level = SlabLevel::new(500_000_000); // 5.0
//!
//! let a = Order::new(1, 0, 500_000_000, 1_000_000_000, Side::Sell, Instrument::new("TEST"));
//! let b = Order::new(2, 1, 500_000_000, 500_000_000, Side::Sell, Instrument::new("TEST"));
//! level.add(a, &mut collector).unwrap();
//! level.add(b, &mut collector).unwrap();
//!
//! let fill = level.fill(1_200_000_000, &mut collector);
//! assert_eq!(fill.filled, 1_200_000_000);
//! assert_eq!(level.head().map(|o| o.remaining), Some(300_000_000));
//! ```

// ============================================================================
// Module declarations
// ============================================================================

/// Core data types: Order, Side, tags, fixed-point helpers
pub mod types;

/// Price level contract and its engines
pub mod level;

/// Events, sinks and the batching collector
pub mod collector;

/// Error type
pub mod error;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use collector::{Collector, Event, EventKind, EventSink, LogSink};
pub use error::{Error, Result};
pub use level::{DequeLevel, Fill, PriceLevel, SlabLevel};
pub use types::{Order, OrderId, Side};
