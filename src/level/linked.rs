//! Slab-backed price level.
//!
//! ## Design
//!
//! Orders live in a `Slab<OrderNode>` and are threaded into a FIFO
//! doubly-linked list through slab keys. A `HashMap` from order id to
//! slab key makes cancel O(1) without scanning.
//!
//! ```text
//! index: id -> key
//! head (oldest) <-> node <-> node <-> tail (newest)
//! ```
//!
//! `volume` is kept in step with every push, fill and unlink so the
//! level never walks its queue to answer a depth query.

use std::collections::HashMap;

use slab::Slab;

use crate::collector::{Event, EventSink};
use crate::error::{Error, Result};
use crate::level::{resized, validate, Fill, OrderNode, PriceLevel};
use crate::types::{Order, OrderId};

/// Price level with O(1) add, cancel and emptiness.
#[derive(Debug, Clone)]
pub struct SlabLevel {
    price: u64,

    /// Node storage; keys are reused after removal
    nodes: Slab<OrderNode>,

    /// Order id to slab key
    index: HashMap<OrderId, usize>,

    /// Oldest order, first to be matched
    head: Option<usize>,

    /// Newest order, where `add` appends
    tail: Option<usize>,

    /// Sum of remaining quantity over all nodes
    volume: u64,
}

impl SlabLevel {
    pub fn new(price: u64) -> Self {
        Self {
            price,
            nodes: Slab::new(),
            index: HashMap::new(),
            head: None,
            tail: None,
            volume: 0,
        }
    }

    /// Pre-allocate room for `capacity` resting orders.
    ///
    /// ```
    /// use price_level::level::SlabLevel;
    ///
    /// let level = SlabLevel::with_capacity(500_000_000, 1_024);
    /// assert!(level.capacity() >= 1_024);
    /// ```
    pub fn with_capacity(price: u64, capacity: usize) -> Self {
        Self {
            price,
            nodes: Slab::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
            head: None,
            tail: None,
            volume: 0,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Concrete iterator, head to tail.
    pub fn orders(&self) -> Iter<'_> {
        Iter {
            nodes: &self.nodes,
            cursor: self.head,
            remaining: self.nodes.len(),
        }
    }

    /// Store `order` and link it at the tail. Volume is the caller's job.
    fn push_back(&mut self, order: Order) -> usize {
        let order_id = order.id;

        let mut node = OrderNode::new(order);
        debug_assert!(node.is_unlinked());
        node.prev = self.tail;
        let key = self.nodes.insert(node);

        match self.tail {
            Some(tail_key) => self.nodes[tail_key].next = Some(key),
            None => self.head = Some(key),
        }
        self.tail = Some(key);
        self.index.insert(order_id, key);
        key
    }

    /// Unlink the node at `key`, drop it from the index and return its
    /// order. Neighbours are re-joined so relative order is preserved.
    fn unlink(&mut self, key: usize) -> Order {
        let node = self.nodes.remove(key);

        match node.prev {
            Some(prev) => self.nodes[prev].next = node.next,
            None => self.head = node.next,
        }
        match node.next {
            Some(next) => self.nodes[next].prev = node.prev,
            None => self.tail = node.prev,
        }

        self.index.remove(&node.order_id());
        self.volume -= node.remaining();
        node.order
    }
}

impl PriceLevel for SlabLevel {
    fn price(&self) -> u64 {
        self.price
    }

    fn add(&mut self, order: Order, sink: &mut dyn EventSink) -> Result<()> {
        validate(self.price, &order)?;
        if self.index.contains_key(&order.id) {
            return Err(Error::DuplicateOrder(order.id));
        }
        let volume = self
            .volume
            .checked_add(order.remaining)
            .ok_or(Error::QuantityOverflow(order.id))?;

        sink.record(Event::Added {
            order: order.clone(),
        });
        self.volume = volume;
        self.push_back(order);
        Ok(())
    }

    fn remove(&mut self, order_id: OrderId, sink: &mut dyn EventSink) -> Result<Order> {
        let key = *self.index.get(&order_id).ok_or(Error::NotFound(order_id))?;
        let order = self.unlink(key);

        sink.record(Event::Cancelled {
            order: order.clone(),
        });
        Ok(order)
    }

    fn modify(&mut self, order_id: OrderId, quantity: u64, sink: &mut dyn EventSink) -> Result<()> {
        let key = *self.index.get(&order_id).ok_or(Error::NotFound(order_id))?;
        if quantity == 0 {
            return Err(Error::ZeroQuantity(order_id));
        }

        let order = &mut self.nodes[key].order;
        let previous = order.remaining;
        if previous == quantity {
            return Ok(());
        }
        let (total, volume) = resized(order, self.volume, quantity)?;
        order.quantity = total;
        order.remaining = quantity;
        self.volume = volume;

        sink.record(Event::Changed {
            order: order.clone(),
            previous,
        });
        Ok(())
    }

    fn fill(&mut self, quantity: u64, sink: &mut dyn EventSink) -> Fill {
        let mut fill = Fill::default();
        let mut wanted = quantity;

        while wanted > 0 {
            let Some(key) = self.head else {
                break;
            };
            let order = &mut self.nodes[key].order;
            let executed = order.fill(wanted);
            wanted -= executed;
            fill.filled += executed;
            self.volume -= executed;

            if order.is_filled() {
                let order = self.unlink(key);
                sink.record(Event::Traded {
                    order: order.clone(),
                    quantity: executed,
                });
                fill.fills.push((order, executed));
            } else {
                let order = order.clone();
                sink.record(Event::PartiallyTraded {
                    order: order.clone(),
                    quantity: executed,
                    remaining: order.remaining,
                });
                fill.fills.push((order, executed));
            }
        }

        fill
    }

    fn head(&self) -> Option<&Order> {
        self.head.map(|key| &self.nodes[key].order)
    }

    fn find(&self, order_id: OrderId) -> Option<&Order> {
        let key = self.index.get(&order_id)?;
        self.nodes.get(*key).map(|node| &node.order)
    }

    fn contains(&self, order_id: OrderId) -> bool {
        self.index.contains_key(&order_id)
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }

    fn volume(&self) -> u64 {
        self.volume
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &Order> + '_> {
        Box::new(self.orders())
    }
}

/// Head-to-tail walk over a [`SlabLevel`]'s linked queue.
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    nodes: &'a Slab<OrderNode>,
    cursor: Option<usize>,
    remaining: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Order;

    fn next(&mut self) -> Option<&'a Order> {
        let node = self.nodes.get(self.cursor?)?;
        self.cursor = node.next;
        self.remaining = self.remaining.saturating_sub(1);
        Some(&node.order)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a SlabLevel {
    type Item = &'a Order;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.orders()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::Collector;
    use crate::types::{Instrument, Side};

    const PRICE: u64 = 500_000_000;

    fn order(id: u64, quantity: u64) -> Order {
        Order::new(id, id, PRICE, quantity, Side::Buy, Instrument::new("TEST"))
    }

    fn populated(ids: &[u64]) -> SlabLevel {
        let mut level = SlabLevel::with_capacity(PRICE, 10);
        let mut collector = Collector::new();
        for &id in ids {
            level.add(order(id, id * 100), &mut collector).unwrap();
        }
        level
    }

    fn keys(level: &SlabLevel, id: u64) -> usize {
        level.index[&id]
    }

    #[test]
    fn test_slab_level_new() {
        let level = SlabLevel::new(PRICE);

        assert_eq!(level.price(), PRICE);
        assert_eq!(level.volume(), 0);
        assert!(level.head.is_none());
        assert!(level.tail.is_none());
        assert!(level.is_empty());
    }

    #[test]
    fn test_slab_push_single() {
        let level = populated(&[1]);
        let key = keys(&level, 1);

        assert_eq!(level.len(), 1);
        assert_eq!(level.volume(), 100);
        assert_eq!(level.head, Some(key));
        assert_eq!(level.tail, Some(key));
        assert!(level.nodes[key].is_unlinked());
    }

    #[test]
    fn test_slab_push_multiple_links() {
        let level = populated(&[1, 2, 3]);
        let (k1, k2, k3) = (keys(&level, 1), keys(&level, 2), keys(&level, 3));

        assert_eq!(level.volume(), 600);
        assert_eq!(level.head, Some(k1));
        assert_eq!(level.tail, Some(k3));

        // k1 <-> k2 <-> k3
        assert_eq!(level.nodes[k1].prev, None);
        assert_eq!(level.nodes[k1].next, Some(k2));
        assert_eq!(level.nodes[k2].prev, Some(k1));
        assert_eq!(level.nodes[k2].next, Some(k3));
        assert_eq!(level.nodes[k3].prev, Some(k2));
        assert_eq!(level.nodes[k3].next, None);
    }

    #[test]
    fn test_slab_remove_middle() {
        let mut level = populated(&[1, 2, 3]);
        let (k1, k3) = (keys(&level, 1), keys(&level, 3));
        let mut collector = Collector::new();

        let removed = level.remove(2, &mut collector).unwrap();

        assert_eq!(removed.remaining, 200);
        assert_eq!(level.len(), 2);
        assert_eq!(level.volume(), 400);
        assert_eq!(level.nodes[k1].next, Some(k3));
        assert_eq!(level.nodes[k3].prev, Some(k1));
        assert!(!level.contains(2));
    }

    #[test]
    fn test_slab_remove_head_and_tail() {
        let mut level = populated(&[1, 2, 3]);
        let k2 = keys(&level, 2);
        let mut collector = Collector::new();

        level.remove(1, &mut collector).unwrap();
        level.remove(3, &mut collector).unwrap();

        assert_eq!(level.head, Some(k2));
        assert_eq!(level.tail, Some(k2));
        assert!(level.nodes[k2].is_unlinked());
    }

    #[test]
    fn test_slab_remove_only() {
        let mut level = populated(&[1]);
        let mut collector = Collector::new();

        level.remove(1, &mut collector).unwrap();

        assert!(level.is_empty());
        assert_eq!(level.volume(), 0);
        assert!(level.head.is_none());
        assert!(level.tail.is_none());
        assert!(level.index.is_empty());
    }

    #[test]
    fn test_slab_remove_missing_is_noop() {
        let mut level = populated(&[1, 2]);
        let mut collector = Collector::new();

        assert_eq!(level.remove(9, &mut collector), Err(Error::NotFound(9)));
        assert!(collector.is_empty());
        assert_eq!(level.orders().map(|o| o.id).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_slab_key_reuse_keeps_fifo() {
        let mut level = populated(&[1, 2]);
        let mut collector = Collector::new();

        // Freed key 0 is handed to the newcomer, which must still queue last
        level.remove(1, &mut collector).unwrap();
        level.add(order(3, 300), &mut collector).unwrap();

        assert_eq!(level.orders().map(|o| o.id).collect::<Vec<_>>(), vec![2, 3]);
        assert_eq!(level.head().map(|o| o.id), Some(2));
    }

    #[test]
    fn test_slab_partial_fill_keeps_head() {
        let mut level = populated(&[1, 2]);
        let mut collector = Collector::new();
        let k1 = keys(&level, 1);

        let fill = level.fill(40, &mut collector);

        assert_eq!(fill.filled, 40);
        assert_eq!(level.head, Some(k1));
        assert_eq!(level.nodes[k1].remaining(), 60);
        assert_eq!(level.volume(), 260);
    }

    #[test]
    fn test_slab_iter_size_hint() {
        let level = populated(&[1, 2, 3]);
        let mut iter = level.orders();
        assert_eq!(iter.len(), 3);
        iter.next();
        assert_eq!(iter.len(), 2);
        assert_eq!((&level).into_iter().count(), 3);
    }
}
