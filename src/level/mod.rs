//! Price level: every resting order at one exact price.
//!
//! ## Contract
//!
//! [`PriceLevel`] is the single interface the aggregating book talks to.
//! Two engines implement it and are interchangeable:
//!
//! - [`DequeLevel`]: reference engine, a `VecDeque` scanned linearly
//! - [`SlabLevel`]: slab-backed doubly-linked queue with an id index
//!
//! Given the same sequence of calls both produce identical event streams,
//! identical emptiness and identical iteration order.
//!
//! ## Priority
//!
//! ```text
//! head (oldest) -> order2 -> order3 -> tail (newest)
//! ```
//!
//! - `add` appends at the tail
//! - `fill` consumes from the head; a partially filled head keeps its slot
//! - `remove` and `modify` never reorder the remaining orders
//!
//! ## Events
//!
//! Levels do not own a collector. Each mutating call borrows an
//! [`EventSink`] from the caller, so the caller can drain between calls.
//!
//! | Operation | Complexity (deque / slab) |
//! |-----------|---------------------------|
//! | add       | O(n) / O(1)               |
//! | remove    | O(n) / O(1)               |
//! | fill      | O(k) / O(k)               |
//! | is_empty  | O(1) / O(1)               |

mod deque;
mod linked;
mod node;

pub use deque::DequeLevel;
pub use linked::{Iter as SlabIter, SlabLevel};
pub use node::OrderNode;

use crate::collector::EventSink;
use crate::error::{Error, Result};
use crate::types::{Order, OrderId};

/// Outcome of a fill against one level.
///
/// `filled` may be less than requested when the level runs dry; that is
/// not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fill {
    /// Total quantity executed
    pub filled: u64,
    /// Each touched order (as it stands after the fill) with the quantity
    /// taken from it, head first
    pub fills: Vec<(Order, u64)>,
}

impl Fill {
    pub fn is_empty(&self) -> bool {
        self.filled == 0
    }

    /// Ids of orders that were consumed completely.
    pub fn completed(&self) -> impl Iterator<Item = OrderId> + '_ {
        self.fills
            .iter()
            .filter(|(order, _)| order.is_filled())
            .map(|(order, _)| order.id)
    }
}

/// Time-priority queue of orders at a single fixed price.
///
/// Not internally synchronized: the owning book serializes every call.
pub trait PriceLevel {
    /// The fixed price of this level (fixed-point).
    fn price(&self) -> u64;

    /// Append `order` at the tail.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidPrice`] if the order's price differs from the level's
    /// - [`Error::ZeroQuantity`] if nothing remains on the order
    /// - [`Error::DuplicateOrder`] if the id already rests here
    ///
    /// The level is untouched on error and nothing is recorded.
    fn add(&mut self, order: Order, sink: &mut dyn EventSink) -> Result<()>;

    /// Take an order out of the queue, recording a cancel.
    ///
    /// [`Error::NotFound`] is the normal outcome of a cancel that lost a
    /// race with a fill; it records nothing and changes nothing.
    fn remove(&mut self, order_id: OrderId, sink: &mut dyn EventSink) -> Result<Order>;

    /// Alias for [`PriceLevel::remove`].
    fn cancel(&mut self, order_id: OrderId, sink: &mut dyn EventSink) -> Result<Order> {
        self.remove(order_id, sink)
    }

    /// Set an order's remaining quantity in place, keeping its position.
    ///
    /// Records `Changed` unless the quantity is unchanged.
    fn modify(&mut self, order_id: OrderId, quantity: u64, sink: &mut dyn EventSink) -> Result<()>;

    /// Consume up to `quantity` from the head of the queue.
    fn fill(&mut self, quantity: u64, sink: &mut dyn EventSink) -> Fill;

    /// Fill exactly `quantity`, or nothing at all when the level is too
    /// shallow. A refused fill records no events.
    fn fill_all_or_none(&mut self, quantity: u64, sink: &mut dyn EventSink) -> Fill {
        if quantity > self.volume() {
            return Fill::default();
        }
        self.fill(quantity, sink)
    }

    /// Oldest resting order, next in line to trade.
    fn head(&self) -> Option<&Order>;

    fn find(&self, order_id: OrderId) -> Option<&Order>;

    fn contains(&self, order_id: OrderId) -> bool {
        self.find(order_id).is_some()
    }

    /// Number of resting orders.
    fn len(&self) -> usize;

    /// True when nothing rests here; the book drops such levels.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total remaining quantity across all resting orders.
    fn volume(&self) -> u64;

    /// Resting orders head to tail. Restartable; holding the iterator
    /// borrows the level, so no mutation can interleave with a pass.
    fn iter(&self) -> Box<dyn Iterator<Item = &Order> + '_>;

    /// Owned copy of the queue in priority order.
    fn snapshot(&self) -> Vec<Order> {
        self.iter().cloned().collect()
    }

    /// Cancel every resting order head to tail and return them.
    fn clear(&mut self, sink: &mut dyn EventSink) -> Vec<Order> {
        let mut cleared = Vec::with_capacity(self.len());
        loop {
            let head = self.head().map(|order| order.id);
            let Some(order_id) = head else { break };
            match self.remove(order_id, sink) {
                Ok(order) => cleared.push(order),
                Err(_) => break,
            }
        }
        cleared
    }
}

/// Checks shared by both engines before an order may rest.
pub(crate) fn validate(level_price: u64, order: &Order) -> Result<()> {
    if order.price != level_price {
        return Err(Error::InvalidPrice {
            expected: level_price,
            actual: order.price,
        });
    }
    if order.remaining == 0 {
        return Err(Error::ZeroQuantity(order.id));
    }
    Ok(())
}

/// New original quantity and level volume for resizing `order` to
/// `quantity` remaining. Nothing is applied on overflow.
pub(crate) fn resized(order: &Order, volume: u64, quantity: u64) -> Result<(u64, u64)> {
    let overflow = Error::QuantityOverflow(order.id);
    let total = order
        .filled_quantity()
        .checked_add(quantity)
        .ok_or_else(|| overflow.clone())?;
    // volume always includes this order's remaining
    let volume = volume
        .saturating_sub(order.remaining)
        .checked_add(quantity)
        .ok_or(overflow)?;
    Ok((total, volume))
}
