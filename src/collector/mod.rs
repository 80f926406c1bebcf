//! Event collection for price-level mutations.
//!
//! ## Flow
//!
//! ```text
//! caller ──add/remove/fill──> PriceLevel ──record──> Collector
//!   ^                                                   │
//!   └───────────────────── drain ───────────────────────┘
//! ```
//!
//! A [`Collector`] is an append-only batch: events keep the exact order
//! in which they were recorded and only [`Collector::drain`] removes
//! them. Batches from several levels touched by one incoming order are
//! combined with [`Collector::merge`] (or `+`).
//!
//! ## Example
//!
//! ```
//! use price_level::collector::{Collector, EventKind};
//! use price_level::level::{DequeLevel, PriceLevel};
//! use price_level::types::{Instrument, Order, Side};
//!
//! let mut collector = Collector::new();
//! let mut level = DequeLevel::new(500_000_000);
//!
//! let order = Order::new(1, 0, 500_000_000, 1_000, Side::Sell, Instrument::new("TEST"));
//! level.add(order, &mut collector).unwrap();
//!
//! let events = collector.drain();
//! assert_eq!(events[0].kind(), EventKind::Added);
//! assert!(collector.is_empty());
//! ```

mod event;
pub mod record;
mod sink;

pub use event::{Event, EventKind};
pub use record::EventRecord;
pub use sink::{EventSink, LogSink, Tee};

use std::ops::{Add, AddAssign};

use rust_decimal::Decimal;
use sha2::{Digest, Sha256};
use tracing::trace;

use crate::error::{Error, Result};
use crate::types::price::{average_price, notional};

/// Ordered, append-only accumulation of level events.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collector {
    events: Vec<Event>,
}

impl Collector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: Vec::with_capacity(capacity),
        }
    }

    /// Append one event.
    #[inline]
    pub fn record(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Take every accumulated event, leaving the collector empty and
    /// ready for the next batch.
    pub fn drain(&mut self) -> Vec<Event> {
        trace!(count = self.events.len(), "collector drained");
        std::mem::take(&mut self.events)
    }

    /// Append `other`'s events after this collector's own.
    pub fn merge(&mut self, mut other: Collector) {
        trace!(
            count = other.events.len(),
            into = self.events.len(),
            "collector merged"
        );
        self.events.append(&mut other.events);
    }

    #[inline]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Event> {
        self.events.iter()
    }

    // ========================================================================
    // Batch analytics
    // ========================================================================

    /// Sum of quantity executed by trade events in this batch.
    pub fn traded_volume(&self) -> u64 {
        self.events
            .iter()
            .map(Event::traded_quantity)
            .fold(0u64, u64::saturating_add)
    }

    /// Sum of price x quantity over trade events, unscaled.
    ///
    /// `None` if the total overflows `Decimal`.
    pub fn notional(&self) -> Option<Decimal> {
        self.events
            .iter()
            .filter(|event| event.kind().is_trade())
            .try_fold(Decimal::ZERO, |total, event| {
                total.checked_add(notional(event.order().price, event.traded_quantity())?)
            })
    }

    /// Volume-weighted average trade price in fixed-point.
    ///
    /// `None` when nothing traded.
    pub fn vwap(&self) -> Option<u64> {
        average_price(self.notional()?, self.traded_volume())
    }

    // ========================================================================
    // Fingerprint
    // ========================================================================

    /// SHA-256 over the SSZ encoding of every event, in order.
    ///
    /// Equal event streams always share a digest, which makes it a cheap
    /// equivalence check between engines or across runs.
    pub fn digest(&self) -> Result<[u8; 32]> {
        let mut hasher = Sha256::new();
        for event in &self.events {
            let bytes = record::encode(&EventRecord::from(event)).map_err(Error::Encoding)?;
            hasher.update(&bytes);
        }

        let mut hash = [0u8; 32];
        hash.copy_from_slice(&hasher.finalize());
        Ok(hash)
    }

    pub fn digest_hex(&self) -> Result<String> {
        Ok(hex::encode(self.digest()?))
    }
}

impl EventSink for Collector {
    fn record(&mut self, event: Event) {
        Collector::record(self, event);
    }
}

impl Add for Collector {
    type Output = Collector;

    fn add(mut self, rhs: Collector) -> Collector {
        self.merge(rhs);
        self
    }
}

impl AddAssign for Collector {
    fn add_assign(&mut self, rhs: Collector) {
        self.merge(rhs);
    }
}

impl Extend<Event> for Collector {
    fn extend<T: IntoIterator<Item = Event>>(&mut self, iter: T) {
        self.events.extend(iter);
    }
}

impl FromIterator<Event> for Collector {
    fn from_iter<T: IntoIterator<Item = Event>>(iter: T) -> Self {
        Self {
            events: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Collector {
    type Item = Event;
    type IntoIter = std::vec::IntoIter<Event>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.into_iter()
    }
}

impl<'a> IntoIterator for &'a Collector {
    type Item = &'a Event;
    type IntoIter = std::slice::Iter<'a, Event>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
