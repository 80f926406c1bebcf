//! Slab node for the linked price level.
//!
//! `OrderNode` wraps an `Order` with doubly-linked list pointers so an
//! order can be unlinked from anywhere in its level in O(1).
//!
//! ## Slab Integration
//!
//! Per slab docs (https://docs.rs/slab/0.4.11):
//! - Keys are `usize` values returned by `slab.insert()`
//! - Keys may be reused after `slab.remove()`
//!
//! `next` points toward the tail (newer), `prev` toward the head (older).

use crate::types::{Order, OrderId};

/// Order plus queue links, stored in the level's slab.
#[derive(Debug, Clone)]
pub struct OrderNode {
    pub order: Order,

    /// Next (newer) order's slab key; `None` at the tail
    pub next: Option<usize>,

    /// Previous (older) order's slab key; `None` at the head
    pub prev: Option<usize>,
}

impl OrderNode {
    #[inline]
    pub fn new(order: Order) -> Self {
        Self {
            order,
            next: None,
            prev: None,
        }
    }

    #[inline]
    pub fn order_id(&self) -> OrderId {
        self.order.id
    }

    #[inline]
    pub fn remaining(&self) -> u64 {
        self.order.remaining
    }

    /// True when the node has no neighbours (alone, or not yet queued)
    #[inline]
    pub fn is_unlinked(&self) -> bool {
        self.next.is_none() && self.prev.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Instrument, Side};

    #[test]
    fn test_order_node_new() {
        let order = Order::new(42, 0, 500_000_000, 100, Side::Buy, Instrument::new("TEST"));
        let mut node = OrderNode::new(order);

        assert_eq!(node.order_id(), 42);
        assert_eq!(node.remaining(), 100);
        assert!(node.is_unlinked());

        node.prev = Some(3);
        assert!(!node.is_unlinked());
    }
}
