//! Price Level - demo entry point
//!
//! Replays a short script against both engines, logs every event and
//! checks that the two event streams match.
//!
//! ```bash
//! RUST_LOG=debug cargo run
//! ```

use price_level::collector::Tee;
use price_level::types::price::{from_fixed, to_fixed};
use price_level::types::{Instrument, Order, Side};
use price_level::{Collector, DequeLevel, LogSink, PriceLevel, SlabLevel};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn run(level: &mut dyn PriceLevel, price: u64) -> price_level::Result<Collector> {
    let mut collector = Collector::new();
    let mut log = LogSink::new();
    let mut sink = Tee::new(&mut collector, &mut log);

    let instrument = Instrument::new("TEST");
    let size = |s: &str| to_fixed(s).unwrap_or_default();

    level.add(Order::new(1, 0, price, size("10"), Side::Buy, instrument.clone()), &mut sink)?;
    level.add(Order::new(2, 60_000, price, size("5"), Side::Buy, instrument.clone()), &mut sink)?;
    level.add(Order::new(3, 120_000, price, size("7"), Side::Buy, instrument), &mut sink)?;

    let fill = level.fill(size("12"), &mut sink);
    info!(filled = %from_fixed(fill.filled), orders = fill.fills.len(), "fill complete");

    if let Err(err) = level.remove(1, &mut sink) {
        // Order 1 was consumed by the fill above
        warn!(%err, "cancel lost the race");
    }
    level.remove(3, &mut sink)?;

    for order in level.iter() {
        info!(%order, "resting");
    }
    Ok(collector)
}

fn main() -> price_level::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let price = to_fixed("5.0").unwrap_or_default();

    let mut reference = DequeLevel::new(price);
    let mut optimized = SlabLevel::with_capacity(price, 64);

    let expected = run(&mut reference, price)?;
    let actual = run(&mut optimized, price)?;

    info!(
        events = expected.len(),
        vwap = ?expected.vwap().map(from_fixed),
        digest = %expected.digest_hex()?,
        "reference engine"
    );
    info!(
        events = actual.len(),
        digest = %actual.digest_hex()?,
        "slab engine"
    );

    if expected == actual {
        info!("engines agree");
    } else {
        warn!("engines diverged");
    }
    Ok(())
}
