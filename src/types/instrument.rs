//! Instrument and exchange references carried by orders.
//!
//! Both are opaque names to the price level; it never branches on them.

use std::fmt;

/// Tradable instrument, identified by symbol
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Instrument {
    name: String,
}

impl Instrument {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Venue an order was routed to. Empty for the local/synthetic venue.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ExchangeType {
    name: String,
}

impl ExchangeType {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for ExchangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names() {
        assert_eq!(Instrument::new("TEST").name(), "TEST");
        assert_eq!(ExchangeType::default().to_string(), "");
        assert_ne!(ExchangeType::new("A"), ExchangeType::new("B"));
    }
}
