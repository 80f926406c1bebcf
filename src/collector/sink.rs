//! Destinations for level events.
//!
//! A price level never owns its sink: every mutating call borrows one
//! from the caller. Anything that can `record` an [`Event`] qualifies,
//! including a plain closure.

use tracing::{debug, info};

use crate::collector::Event;
use crate::types::price::from_fixed;

/// Write-only event destination.
pub trait EventSink {
    fn record(&mut self, event: Event);
}

impl<F> EventSink for F
where
    F: FnMut(Event),
{
    fn record(&mut self, event: Event) {
        self(event)
    }
}

/// Sink that emits each event as a structured `tracing` record.
///
/// Trades log at `info`, bookkeeping events at `debug`. `recorded()`
/// counts everything seen.
#[derive(Debug, Default)]
pub struct LogSink {
    recorded: usize,
}

impl LogSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn recorded(&self) -> usize {
        self.recorded
    }
}

impl EventSink for LogSink {
    fn record(&mut self, event: Event) {
        self.recorded += 1;
        let order = event.order();
        let kind = event.kind();
        if kind.is_trade() {
            info!(
                order_id = order.id,
                price = %from_fixed(order.price),
                quantity = %from_fixed(event.traded_quantity()),
                remaining = %from_fixed(event.remaining()),
                ?kind,
                "trade"
            );
        } else {
            debug!(
                order_id = order.id,
                price = %from_fixed(order.price),
                remaining = %from_fixed(event.remaining()),
                ?kind,
                "level event"
            );
        }
    }
}

/// Fans one event out to two sinks, left first.
pub struct Tee<'a, A: ?Sized, B: ?Sized> {
    left: &'a mut A,
    right: &'a mut B,
}

impl<'a, A: ?Sized, B: ?Sized> Tee<'a, A, B> {
    pub fn new(left: &'a mut A, right: &'a mut B) -> Self {
        Self { left, right }
    }
}

impl<A, B> EventSink for Tee<'_, A, B>
where
    A: EventSink + ?Sized,
    B: EventSink + ?Sized,
{
    fn record(&mut self, event: Event) {
        self.left.record(event.clone());
        self.right.record(event);
    }
}
