//! Property-based tests for money arithmetic.
//!
//! - Property 1: Addition is invertible and commutative
//! - Property 2: Multiplying by one is the identity
//! - Property 3: Allocation never loses or invents minor units
//! - Property 4: Comparison is a total order consistent with equality

use std::cmp::Ordering;

use proptest::prelude::*;
use rust_decimal::Decimal;

use coinage_shared::{BackendKind, RoundingMode};

use super::Money;
use crate::calculator::{Calculator, Engine};
use crate::currency::Currency;

/// Strategy to generate amounts in minor units (-1,000,000,000.00 to 1,000,000,000.00).
fn amount() -> impl Strategy<Value = i64> {
    -100_000_000_000i64..100_000_000_000i64
}

fn usd(amount: i64) -> Money {
    Money::new(amount, Currency::new("USD"))
}

/// Strategy to generate non-empty ratio lists with a positive total.
fn ratios() -> impl Strategy<Value = Vec<u32>> {
    prop::collection::vec(0u32..1_000, 1..8)
        .prop_filter("ratios must not all be zero", |ratios| {
            ratios.iter().any(|ratio| *ratio > 0)
        })
}

fn rounding_mode() -> impl Strategy<Value = RoundingMode> {
    prop::sample::select(RoundingMode::ALL.to_vec())
}

fn engines() -> Vec<&'static Engine> {
    BackendKind::PREFERENCE
        .into_iter()
        .map(Engine::for_kind)
        .filter(|engine| engine.is_supported())
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Property 1.1: a + b - b == a
    #[test]
    fn prop_add_then_subtract_is_identity(a in amount(), b in amount()) {
        let (a, b) = (usd(a), usd(b));
        prop_assert_eq!(a.add(&b).unwrap().subtract(&b).unwrap(), a);
    }

    /// Property 1.2: a + b == b + a
    #[test]
    fn prop_add_commutes(a in amount(), b in amount()) {
        let (a, b) = (usd(a), usd(b));
        prop_assert_eq!(a.add(&b).unwrap(), b.add(&a).unwrap());
    }

    /// Property 2.1: m * 1 == m for every rounding mode
    #[test]
    fn prop_multiply_by_one(a in amount(), mode in rounding_mode()) {
        let money = usd(a);
        prop_assert_eq!(money.multiply(1, mode).unwrap(), money.clone());
        prop_assert_eq!(money.multiply(Decimal::ONE, mode).unwrap(), money.clone());
        prop_assert_eq!(money.divide(1, mode).unwrap(), money);
    }

    /// Property 2.2: every engine computes the same product and quotient
    #[test]
    fn prop_engines_agree_on_money(
        a in amount(),
        factor in -1_000_000i64..1_000_000i64,
        mode in rounding_mode(),
    ) {
        let operand = Decimal::new(factor, 3);
        let reference = usd(a).with_engine(Engine::for_kind(BackendKind::BigInteger));
        let product = reference.multiply(operand, mode).unwrap();
        for engine in engines() {
            let money = usd(a).with_engine(engine);
            prop_assert_eq!(money.multiply(operand, mode).unwrap(), product.clone());
            if factor != 0 {
                prop_assert_eq!(
                    money.divide(operand, mode).unwrap(),
                    reference.divide(operand, mode).unwrap()
                );
            }
        }
    }

    /// Property 3.1: parts sum to the original amount
    #[test]
    fn prop_allocation_sums_exactly(a in amount(), ratios in ratios()) {
        let money = usd(a);
        let parts = money.allocate(ratios.clone(), None).unwrap();
        prop_assert_eq!(parts.len(), ratios.len());
        prop_assert_eq!(Money::sum(&parts).unwrap(), money);
    }

    /// Property 3.2: every part is its floored share or one unit above it,
    /// and the extra units go to a prefix of the input
    #[test]
    fn prop_allocation_is_fair(a in amount(), ratios in ratios()) {
        let parts = usd(a).allocate(ratios.clone(), None).unwrap();
        let total: i128 = ratios.iter().map(|ratio| i128::from(*ratio)).sum();
        let mut bumped = Vec::with_capacity(ratios.len());
        for (part, ratio) in parts.iter().zip(&ratios) {
            let part = i128::try_from(part.amount()).unwrap();
            let exact_floor = (i128::from(a) * i128::from(*ratio)).div_euclid(total);
            prop_assert!(part == exact_floor || part == exact_floor + 1);
            bumped.push(part != exact_floor);
        }
        let first_unbumped = bumped.iter().position(|b| !b).unwrap_or(bumped.len());
        prop_assert!(bumped[first_unbumped..].iter().all(|b| !b));
    }

    /// Property 4.1: compare agrees with equals and flips with the operands
    #[test]
    fn prop_compare_is_consistent(a in amount(), b in amount()) {
        let (a, b) = (usd(a), usd(b));
        let forward = a.compare(&b).unwrap();
        prop_assert_eq!(forward == Ordering::Equal, a.equals(&b));
        prop_assert_eq!(b.compare(&a).unwrap(), forward.reverse());
        prop_assert_eq!(a.greater_than_or_equal(&b).unwrap(), forward != Ordering::Less);
    }
}
