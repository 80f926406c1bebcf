//! Cross-engine equivalence.
//!
//! The reference `DequeLevel` and the slab-backed `SlabLevel` are fed the
//! same scripted calls. After every step both must agree on the drained
//! events, the call results, emptiness, depth and iteration order.
//!
//! ```bash
//! cargo test --release --test equivalence_test -- --nocapture
//! ```

use price_level::collector::Collector;
use price_level::types::{Instrument, Order, Side};
use price_level::{DequeLevel, Fill, PriceLevel, SlabLevel};

use proptest::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

// ============================================================================
// SCRIPT MODEL
// ============================================================================

const PRICE: u64 = 500_000_000;

#[derive(Debug, Clone)]
enum Op {
    Add { id: u64, quantity: u64 },
    /// Deliberately off-price add
    AddWrongPrice { id: u64 },
    Remove { id: u64 },
    Modify { id: u64, quantity: u64 },
    Fill { quantity: u64 },
    FillAllOrNone { quantity: u64 },
    Clear,
}

/// What one call returned, compared across engines.
#[derive(Debug, PartialEq)]
enum Outcome {
    Unit(Result<(), price_level::Error>),
    Order(Result<u64, price_level::Error>),
    Fill(Vec<(u64, u64, u64)>, u64),
    Cleared(Vec<u64>),
}

fn fill_outcome(fill: Fill) -> Outcome {
    let pairs = fill
        .fills
        .iter()
        .map(|(order, quantity)| (order.id, *quantity, order.remaining))
        .collect();
    Outcome::Fill(pairs, fill.filled)
}

fn make_order(id: u64, quantity: u64) -> Order {
    Order::new(id, id * 1_000, PRICE, quantity, Side::Sell, Instrument::new("TEST"))
}

fn apply(level: &mut dyn PriceLevel, op: &Op, collector: &mut Collector) -> Outcome {
    match *op {
        Op::Add { id, quantity } => Outcome::Unit(level.add(make_order(id, quantity), collector)),
        Op::AddWrongPrice { id } => {
            let mut order = make_order(id, 100);
            order.price = PRICE + 1;
            Outcome::Unit(level.add(order, collector))
        }
        Op::Remove { id } => Outcome::Order(level.remove(id, collector).map(|o| o.id)),
        Op::Modify { id, quantity } => Outcome::Unit(level.modify(id, quantity, collector)),
        Op::Fill { quantity } => fill_outcome(level.fill(quantity, collector)),
        Op::FillAllOrNone { quantity } => fill_outcome(level.fill_all_or_none(quantity, collector)),
        Op::Clear => Outcome::Cleared(level.clear(collector).iter().map(|o| o.id).collect()),
    }
}

fn observe(level: &dyn PriceLevel) -> (bool, usize, u64, Vec<(u64, u64)>) {
    (
        level.is_empty(),
        level.len(),
        level.volume(),
        level.iter().map(|o| (o.id, o.remaining)).collect(),
    )
}

/// Run `ops` against both engines, asserting agreement at every step.
/// Returns the full event batch of each engine.
fn run_both(ops: &[Op]) -> (Collector, Collector) {
    let mut reference = DequeLevel::new(PRICE);
    let mut optimized = SlabLevel::with_capacity(PRICE, ops.len());
    let mut reference_log = Collector::new();
    let mut optimized_log = Collector::new();

    for (step, op) in ops.iter().enumerate() {
        let mut ref_batch = Collector::new();
        let mut opt_batch = Collector::new();

        let ref_outcome = apply(&mut reference, op, &mut ref_batch);
        let opt_outcome = apply(&mut optimized, op, &mut opt_batch);
        assert_eq!(ref_outcome, opt_outcome, "step {step}: {op:?}");

        let ref_events = ref_batch.drain();
        let opt_events = opt_batch.drain();
        assert_eq!(ref_events, opt_events, "step {step}: {op:?}");

        assert_eq!(observe(&reference), observe(&optimized), "step {step}: {op:?}");

        reference_log.extend(ref_events);
        optimized_log.extend(opt_events);
    }

    (reference_log, optimized_log)
}

// ============================================================================
// PROPERTY TESTS
// ============================================================================

fn op_strategy() -> impl Strategy<Value = Op> {
    // Small id space so removes and duplicates hit often
    prop_oneof![
        4 => (1u64..24, 1u64..1_000).prop_map(|(id, quantity)| Op::Add { id, quantity }),
        1 => (1u64..24).prop_map(|id| Op::AddWrongPrice { id }),
        2 => (1u64..24).prop_map(|id| Op::Remove { id }),
        1 => (1u64..24, 0u64..1_000).prop_map(|(id, quantity)| Op::Modify { id, quantity }),
        2 => (0u64..2_500).prop_map(|quantity| Op::Fill { quantity }),
        1 => (0u64..2_500).prop_map(|quantity| Op::FillAllOrNone { quantity }),
        1 => Just(Op::Clear),
    ]
}

proptest! {
    #[test]
    fn engines_agree_on_random_scripts(ops in prop::collection::vec(op_strategy(), 0..120)) {
        let (reference, optimized) = run_both(&ops);
        prop_assert_eq!(reference.digest().unwrap(), optimized.digest().unwrap());
    }

    #[test]
    fn adds_iterate_in_fifo_order(quantities in prop::collection::vec(1u64..10_000, 0..64)) {
        let ops: Vec<Op> = quantities
            .iter()
            .enumerate()
            .map(|(i, &quantity)| Op::Add { id: i as u64 + 1, quantity })
            .collect();
        run_both(&ops);

        let mut level = SlabLevel::new(PRICE);
        let mut collector = Collector::new();
        for op in &ops {
            apply(&mut level, op, &mut collector);
        }
        let ids: Vec<u64> = level.iter().map(|o| o.id).collect();
        let expected: Vec<u64> = (1..=quantities.len() as u64).collect();
        prop_assert_eq!(ids, expected);
    }

    #[test]
    fn fill_never_exceeds_depth(
        quantities in prop::collection::vec(1u64..1_000, 1..32),
        wanted in 0u64..40_000,
    ) {
        let mut level = DequeLevel::new(PRICE);
        let mut collector = Collector::new();
        for (i, &quantity) in quantities.iter().enumerate() {
            level.add(make_order(i as u64 + 1, quantity), &mut collector).unwrap();
        }
        let depth: u64 = quantities.iter().sum();

        let fill = level.fill(wanted, &mut collector);

        prop_assert_eq!(fill.filled, wanted.min(depth));
        prop_assert_eq!(level.volume(), depth - fill.filled);
        prop_assert_eq!(fill.fills.iter().map(|(_, q)| q).sum::<u64>(), fill.filled);
        prop_assert!(level.iter().all(|o| o.remaining > 0));
    }
}

// ============================================================================
// SEEDED LONG SCRIPT
// ============================================================================

/// Generate a deterministic script with the same seed -> same ops.
fn generate_script(count: usize, seed: u64) -> Vec<Op> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut ops = Vec::with_capacity(count);
    let mut next_id = 1u64;

    for _ in 0..count {
        let roll: u32 = rng.gen_range(0..100);
        let op = match roll {
            0..=44 => {
                next_id += 1;
                Op::Add { id: next_id, quantity: rng.gen_range(1..=500) }
            }
            45..=64 => Op::Remove { id: rng.gen_range(1..=next_id) },
            65..=74 => Op::Modify { id: rng.gen_range(1..=next_id), quantity: rng.gen_range(0..=500) },
            75..=94 => Op::Fill { quantity: rng.gen_range(0..=1_500) },
            95..=97 => Op::FillAllOrNone { quantity: rng.gen_range(0..=3_000) },
            98 => Op::AddWrongPrice { id: next_id + 1 },
            _ => Op::Clear,
        };
        ops.push(op);
    }
    ops
}

#[test]
fn engines_agree_on_seeded_long_script() {
    let ops = generate_script(20_000, 42);
    let (reference, optimized) = run_both(&ops);

    assert_eq!(reference, optimized);
    assert_eq!(reference.digest_hex().unwrap(), optimized.digest_hex().unwrap());
    assert!(reference.traded_volume() > 0, "script should trade");
}

#[test]
fn seeded_script_is_deterministic() {
    let (a, _) = run_both(&generate_script(2_000, 7));
    let (b, _) = run_both(&generate_script(2_000, 7));
    let (c, _) = run_both(&generate_script(2_000, 8));

    assert_eq!(a.digest().unwrap(), b.digest().unwrap());
    assert_ne!(a.digest().unwrap(), c.digest().unwrap());
}
