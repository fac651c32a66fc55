//! Property-based tests for the arithmetic backends.
//!
//! - Property 1: Backends agree on every operation
//! - Property 2: Rounding lands within half a unit

use proptest::prelude::*;

use coinage_shared::{BackendKind, RoundingMode};

use super::{Calculator, Engine, Number};

/// Strategy to generate amounts with up to 4 decimals (-10,000,000.0000 to 10,000,000.0000).
fn number() -> impl Strategy<Value = Number> {
    (-100_000_000_000i64..100_000_000_000i64, 0u32..=4).prop_map(|(mantissa, scale)| {
        Number::from_scaled(&mantissa.to_string(), scale)
    })
}

/// Strategy to generate non-zero divisors.
fn divisor() -> impl Strategy<Value = Number> {
    number().prop_filter("divisor must be non-zero", |n| !n.is_zero())
}

fn rounding_mode() -> impl Strategy<Value = RoundingMode> {
    prop_oneof![
        Just(RoundingMode::HalfUp),
        Just(RoundingMode::HalfDown),
        Just(RoundingMode::HalfEven),
        Just(RoundingMode::HalfOdd),
    ]
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

    /// Property 1.1: add, subtract and multiply are identical across backends.
    #[test]
    fn prop_ring_operations_agree(a in number(), b in number()) {
        let reference = Engine::for_kind(BackendKind::BigInteger);
        for engine in engines() {
            prop_assert_eq!(engine.add(&a, &b).unwrap(), reference.add(&a, &b).unwrap());
            prop_assert_eq!(engine.subtract(&a, &b).unwrap(), reference.subtract(&a, &b).unwrap());
            prop_assert_eq!(engine.multiply(&a, &b).unwrap(), reference.multiply(&a, &b).unwrap());
            prop_assert_eq!(engine.compare(&a, &b).unwrap(), reference.compare(&a, &b).unwrap());
        }
    }

    /// Property 1.2: rounded quotients are identical across backends, even
    /// though backends keep different numbers of division digits.
    #[test]
    fn prop_rounded_division_agrees(
        a in number(),
        b in divisor(),
        mode in rounding_mode(),
    ) {
        let reference = Engine::for_kind(BackendKind::BigInteger);
        let expected = reference.round(&reference.divide(&a, &b).unwrap(), mode).unwrap();
        let expected_floor = reference.floor(&reference.divide(&a, &b).unwrap()).unwrap();
        for engine in engines() {
            let quotient = engine.divide(&a, &b).unwrap();
            prop_assert_eq!(engine.round(&quotient, mode).unwrap(), expected.clone());
            prop_assert_eq!(engine.floor(&quotient).unwrap(), expected_floor.clone());
        }
    }

    /// Property 2.1: |round(x) - x| <= 0.5 for every mode.
    #[test]
    fn prop_round_within_half_unit(a in number(), mode in rounding_mode()) {
        let engine = Engine::for_kind(BackendKind::BigInteger);
        let rounded = engine.round(&a, mode).unwrap();
        let distance = engine.absolute(&engine.subtract(&rounded, &a).unwrap()).unwrap();
        let half: Number = "0.5".parse().unwrap();
        prop_assert!(engine.compare(&distance, &half).unwrap().is_le());
        prop_assert!(rounded.is_integer());
    }

    /// Property 2.2: floor <= x <= ceil, and they differ only for fractions.
    #[test]
    fn prop_floor_ceil_bracket(a in number()) {
        for engine in engines() {
            let floor = engine.floor(&a).unwrap();
            let ceil = engine.ceil(&a).unwrap();
            prop_assert!(engine.compare(&floor, &a).unwrap().is_le());
            prop_assert!(engine.compare(&a, &ceil).unwrap().is_le());
            prop_assert_eq!(floor == ceil, a.is_integer());
        }
    }
}
