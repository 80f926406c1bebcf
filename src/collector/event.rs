//! Side-effect events emitted while mutating a price level.

use crate::types::Order;

/// Discriminant of an [`Event`], handy for filtering and encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Added,
    Traded,
    PartiallyTraded,
    Cancelled,
    Changed,
}

impl EventKind {
    pub fn to_u8(self) -> u8 {
        match self {
            EventKind::Added => 0,
            EventKind::Traded => 1,
            EventKind::PartiallyTraded => 2,
            EventKind::Cancelled => 3,
            EventKind::Changed => 4,
        }
    }

    /// Whether the event moved quantity between counterparties.
    pub fn is_trade(self) -> bool {
        matches!(self, EventKind::Traded | EventKind::PartiallyTraded)
    }
}

/// One observable state change at a price level.
///
/// Orders are snapshots taken at the moment of the event: a fully traded
/// order has `remaining == 0`. Unlike [`Order`] equality, two events are
/// equal only when their snapshots match field for field.
#[derive(Debug, Clone)]
pub enum Event {
    /// Order began resting at the tail of the level
    Added { order: Order },

    /// Order was fully consumed; `quantity` is the final fill
    Traded { order: Order, quantity: u64 },

    /// Head order filled by `quantity`, `remaining` still rests
    PartiallyTraded {
        order: Order,
        quantity: u64,
        remaining: u64,
    },

    /// Order left the level without trading its remainder
    Cancelled { order: Order },

    /// Remaining quantity edited in place from `previous`
    Changed { order: Order, previous: u64 },
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::Added { .. } => EventKind::Added,
            Event::Traded { .. } => EventKind::Traded,
            Event::PartiallyTraded { .. } => EventKind::PartiallyTraded,
            Event::Cancelled { .. } => EventKind::Cancelled,
            Event::Changed { .. } => EventKind::Changed,
        }
    }

    pub fn order(&self) -> &Order {
        match self {
            Event::Added { order }
            | Event::Traded { order, .. }
            | Event::PartiallyTraded { order, .. }
            | Event::Cancelled { order }
            | Event::Changed { order, .. } => order,
        }
    }

    /// Quantity executed by this event, zero for non-trade events.
    pub fn traded_quantity(&self) -> u64 {
        match self {
            Event::Traded { quantity, .. } | Event::PartiallyTraded { quantity, .. } => *quantity,
            _ => 0,
        }
    }

    /// Open quantity left on the order after this event.
    pub fn remaining(&self) -> u64 {
        match self {
            Event::PartiallyTraded { remaining, .. } => *remaining,
            other => other.order().remaining,
        }
    }
}

/// Field-for-field comparison of two order snapshots.
fn same_snapshot(a: &Order, b: &Order) -> bool {
    a.id == b.id
        && a.timestamp == b.timestamp
        && a.price == b.price
        && a.quantity == b.quantity
        && a.remaining == b.remaining
        && a.side == b.side
        && a.instrument == b.instrument
        && a.exchange == b.exchange
        && a.stop_price == b.stop_price
        && a.order_type == b.order_type
        && a.flag == b.flag
        && a.linked == b.linked
}

impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        use Event::*;
        match (self, other) {
            (Added { order: a }, Added { order: b })
            | (Cancelled { order: a }, Cancelled { order: b }) => same_snapshot(a, b),
            (Traded { order: a, quantity: qa }, Traded { order: b, quantity: qb }) => {
                qa == qb && same_snapshot(a, b)
            }
            (
                PartiallyTraded { order: a, quantity: qa, remaining: ra },
                PartiallyTraded { order: b, quantity: qb, remaining: rb },
            ) => qa == qb && ra == rb && same_snapshot(a, b),
            (Changed { order: a, previous: pa }, Changed { order: b, previous: pb }) => {
                pa == pb && same_snapshot(a, b)
            }
            _ => false,
        }
    }
}

impl Eq for Event {}
