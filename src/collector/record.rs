//! Fixed-size SSZ encoding of events.
//!
//! Each [`Event`] flattens to an [`EventRecord`] so that an event stream
//! has one canonical byte form. Two engines fed the same script must
//! produce byte-identical record streams.

use ssz_rs::prelude::*;

use crate::collector::Event;
use crate::types::{OrderFlag, OrderType, Side};

/// Flat, fixed-size view of one event.
///
/// ## SSZ Layout
///
/// 1 + 8 * 5 + 3 = 44 bytes:
/// kind, order id, timestamp, price, quantity, remaining, then the side,
/// order type and flag tags.
#[derive(Debug, Clone, PartialEq, Eq, Default, SimpleSerialize)]
pub struct EventRecord {
    /// [`crate::collector::EventKind`] as u8
    pub kind: u8,
    pub order_id: u64,
    pub timestamp: u64,
    pub price: u64,
    /// Traded quantity, or the previous quantity for a change
    pub quantity: u64,
    /// Remaining open quantity after the event
    pub remaining: u64,
    /// Side as u8 (0=Buy, 1=Sell)
    pub side_raw: u8,
    /// [`OrderType`] as u8
    pub order_type_raw: u8,
    /// [`OrderFlag`] as u8
    pub flag_raw: u8,
}

impl From<&Event> for EventRecord {
    fn from(event: &Event) -> Self {
        let order = event.order();
        let quantity = match event {
            Event::Changed { previous, .. } => *previous,
            other => other.traded_quantity(),
        };
        Self {
            kind: event.kind().to_u8(),
            order_id: order.id,
            timestamp: order.timestamp,
            price: order.price,
            quantity,
            remaining: event.remaining(),
            side_raw: order.side.to_u8(),
            order_type_raw: order.order_type.to_u8(),
            flag_raw: order.flag.to_u8(),
        }
    }
}

impl EventRecord {
    /// Decoded side; `None` for an unknown tag
    pub fn side(&self) -> Option<Side> {
        Side::from_u8(self.side_raw)
    }

    pub fn order_type(&self) -> Option<OrderType> {
        OrderType::from_u8(self.order_type_raw)
    }

    pub fn flag(&self) -> Option<OrderFlag> {
        OrderFlag::from_u8(self.flag_raw)
    }
}

/// Encode one record.
pub fn encode(record: &EventRecord) -> std::result::Result<Vec<u8>, String> {
    ssz_rs::serialize(record).map_err(|e| format!("{:?}", e))
}
