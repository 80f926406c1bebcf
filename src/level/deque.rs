//! Reference price level backed by a `VecDeque`.
//!
//! Favours obviousness over speed: lookups scan the queue. It is the
//! yardstick the slab engine is checked against.

use std::collections::vec_deque;
use std::collections::VecDeque;

use crate::collector::{Event, EventSink};
use crate::error::{Error, Result};
use crate::level::{resized, validate, Fill, PriceLevel};
use crate::types::{Order, OrderId};

/// FIFO queue of orders at one price.
#[derive(Debug, Clone)]
pub struct DequeLevel {
    price: u64,
    orders: VecDeque<Order>,
    /// Sum of `remaining` over `orders`
    volume: u64,
}

impl DequeLevel {
    pub fn new(price: u64) -> Self {
        Self {
            price,
            orders: VecDeque::new(),
            volume: 0,
        }
    }

    /// Concrete iterator, head to tail.
    pub fn orders(&self) -> vec_deque::Iter<'_, Order> {
        self.orders.iter()
    }

    fn position(&self, order_id: OrderId) -> Option<usize> {
        self.orders.iter().position(|order| order.id == order_id)
    }
}

impl PriceLevel for DequeLevel {
    fn price(&self) -> u64 {
        self.price
    }

    fn add(&mut self, order: Order, sink: &mut dyn EventSink) -> Result<()> {
        validate(self.price, &order)?;
        if self.position(order.id).is_some() {
            return Err(Error::DuplicateOrder(order.id));
        }
        let volume = self
            .volume
            .checked_add(order.remaining)
            .ok_or(Error::QuantityOverflow(order.id))?;

        self.volume = volume;
        sink.record(Event::Added {
            order: order.clone(),
        });
        self.orders.push_back(order);
        Ok(())
    }

    fn remove(&mut self, order_id: OrderId, sink: &mut dyn EventSink) -> Result<Order> {
        let order = self
            .position(order_id)
            .and_then(|index| self.orders.remove(index))
            .ok_or(Error::NotFound(order_id))?;

        self.volume -= order.remaining;
        sink.record(Event::Cancelled {
            order: order.clone(),
        });
        Ok(order)
    }

    fn modify(&mut self, order_id: OrderId, quantity: u64, sink: &mut dyn EventSink) -> Result<()> {
        let index = self.position(order_id).ok_or(Error::NotFound(order_id))?;
        if quantity == 0 {
            return Err(Error::ZeroQuantity(order_id));
        }

        let order = &mut self.orders[index];
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
            let Some(head) = self.orders.front_mut() else {
                break;
            };
            let executed = head.fill(wanted);
            wanted -= executed;
            fill.filled += executed;
            self.volume -= executed;

            if head.is_filled() {
                if let Some(order) = self.orders.pop_front() {
                    sink.record(Event::Traded {
                        order: order.clone(),
                        quantity: executed,
                    });
                    fill.fills.push((order, executed));
                }
            } else {
                let order = head.clone();
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
        self.orders.front()
    }

    fn find(&self, order_id: OrderId) -> Option<&Order> {
        self.orders.iter().find(|order| order.id == order_id)
    }

    fn len(&self) -> usize {
        self.orders.len()
    }

    fn volume(&self) -> u64 {
        self.volume
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &Order> + '_> {
        Box::new(self.orders.iter())
    }
}

impl<'a> IntoIterator for &'a DequeLevel {
    type Item = &'a Order;
    type IntoIter = vec_deque::Iter<'a, Order>;

    fn into_iter(self) -> Self::IntoIter {
        self.orders.iter()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
