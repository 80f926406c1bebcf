//! Order model consumed by the price level.
//!
//! ## Fixed-Point Representation
//!
//! Prices and quantities are stored as u64 scaled by 10^8 (see
//! [`crate::types::price::SCALE`]). A price of 5.0 is `500_000_000`.
//!
//! ## Mutability
//!
//! Every field is fixed once the order is built except `remaining`, which
//! only ever shrinks as fills occur (or is replaced wholesale by an
//! explicit modify on the level).

use std::fmt;

use crate::types::instrument::{ExchangeType, Instrument};
use crate::types::price::from_fixed;

/// Unique order identifier
pub type OrderId = u64;

// ============================================================================
// Side enum
// ============================================================================

/// Order side: Buy or Sell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Side {
    /// Buy order (bid)
    #[default]
    Buy,
    /// Sell order (ask)
    Sell,
}

impl Side {
    /// Convert to u8 for encoding
    pub fn to_u8(self) -> u8 {
        match self {
            Side::Buy => 0,
            Side::Sell => 1,
        }
    }

    /// Convert from u8
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Side::Buy),
            1 => Some(Side::Sell),
            _ => None,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => f.write_str("BUY"),
            Side::Sell => f.write_str("SELL"),
        }
    }
}

// ============================================================================
// OrderType / OrderFlag tags
// ============================================================================

/// Order type tag. The level stores it but never interprets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OrderType {
    Market,
    #[default]
    Limit,
    StopMarket,
    StopLimit,
}

impl OrderType {
    pub fn to_u8(self) -> u8 {
        match self {
            OrderType::Market => 0,
            OrderType::Limit => 1,
            OrderType::StopMarket => 2,
            OrderType::StopLimit => 3,
        }
    }

    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(OrderType::Market),
            1 => Some(OrderType::Limit),
            2 => Some(OrderType::StopMarket),
            3 => Some(OrderType::StopLimit),
            _ => None,
        }
    }
}

/// Execution flag tag carried with the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OrderFlag {
    #[default]
    None,
    FillOrKill,
    AllOrNone,
    ImmediateOrCancel,
}

impl OrderFlag {
    pub fn to_u8(self) -> u8 {
        match self {
            OrderFlag::None => 0,
            OrderFlag::FillOrKill => 1,
            OrderFlag::AllOrNone => 2,
            OrderFlag::ImmediateOrCancel => 3,
        }
    }

    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(OrderFlag::None),
            1 => Some(OrderFlag::FillOrKill),
            2 => Some(OrderFlag::AllOrNone),
            3 => Some(OrderFlag::ImmediateOrCancel),
            _ => None,
        }
    }
}

// ============================================================================
// Order struct
// ============================================================================

/// An order resting in (or headed for) a price level.
///
/// Equality is identity-based: two orders are equal when they share an id
/// and a timestamp, regardless of how much of either has been filled.
///
/// ## Example
///
/// ```
/// use price_level::types::{Instrument, Order, Side};
///
/// // Buy 10 TEST at 5.0
/// let order = Order::new(
///     1,                          // id
///     0,                          // timestamp (ms)
///     500_000_000,                // price: 5.00000000
///     1_000_000_000,              // quantity: 10.00000000
///     Side::Buy,
///     Instrument::new("TEST"),
/// );
/// assert_eq!(order.remaining, 1_000_000_000);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Order {
    /// Unique order identifier
    pub id: OrderId,

    /// Unix timestamp in milliseconds when the order arrived
    pub timestamp: u64,

    /// Limit price in fixed-point (scaled by 10^8)
    pub price: u64,

    /// Original quantity in fixed-point
    pub quantity: u64,

    /// Quantity still open; decremented as the order is matched
    pub remaining: u64,

    pub side: Side,

    pub instrument: Instrument,

    pub exchange: ExchangeType,

    /// Trigger price for stop orders
    pub stop_price: Option<u64>,

    pub order_type: OrderType,

    pub flag: OrderFlag,

    /// Parent order this one is linked to (e.g. the leg of a stop)
    pub linked: Option<OrderId>,
}

impl Order {
    /// Create a plain limit order with no flags, stop price or link.
    pub fn new(
        id: OrderId,
        timestamp: u64,
        price: u64,
        quantity: u64,
        side: Side,
        instrument: Instrument,
    ) -> Self {
        Self {
            id,
            timestamp,
            price,
            quantity,
            remaining: quantity,
            side,
            instrument,
            exchange: ExchangeType::default(),
            stop_price: None,
            order_type: OrderType::Limit,
            flag: OrderFlag::None,
            linked: None,
        }
    }

    pub fn with_exchange(mut self, exchange: ExchangeType) -> Self {
        self.exchange = exchange;
        self
    }

    pub fn with_stop_price(mut self, stop_price: u64) -> Self {
        self.stop_price = Some(stop_price);
        self
    }

    pub fn with_order_type(mut self, order_type: OrderType) -> Self {
        self.order_type = order_type;
        self
    }

    pub fn with_flag(mut self, flag: OrderFlag) -> Self {
        self.flag = flag;
        self
    }

    pub fn with_linked(mut self, parent: OrderId) -> Self {
        self.linked = Some(parent);
        self
    }

    /// Check if the order is fully filled
    pub fn is_filled(&self) -> bool {
        self.remaining == 0
    }

    /// Quantity executed so far
    pub fn filled_quantity(&self) -> u64 {
        self.quantity.saturating_sub(self.remaining)
    }

    /// Fill a portion of this order
    ///
    /// # Returns
    ///
    /// The quantity actually consumed, capped at `remaining`
    pub fn fill(&mut self, fill_qty: u64) -> u64 {
        let actual_fill = fill_qty.min(self.remaining);
        self.remaining -= actual_fill;
        actual_fill
    }
}

impl PartialEq for Order {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.timestamp == other.timestamp
    }
}

impl Eq for Order {}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Order<{}-{}@{}x{}-{}-{}:{}>",
            self.id,
            self.side,
            from_fixed(self.price),
            from_fixed(self.remaining),
            self.instrument,
            self.exchange,
            self.timestamp,
        )
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
