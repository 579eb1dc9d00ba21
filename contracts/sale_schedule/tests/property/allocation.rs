//! Property-based tests for token value conversion.
//!
//! Invariants tested:
//! - A zero amount or a zero rate buys nothing
//! - Whole multiples of `10^(18 - decimals)` convert without truncation
//! - Conversion is additive when neither part truncates
//! - Truncation never overshoots: `tokens * 10^(18 - d) + remainder == amount * rate`

use proptest::prelude::*;
use sale_schedule::allocation::token_value;
use soroban_sdk::Env;

proptest! {
    #[test]
    fn prop_zero_inputs_buy_nothing(
        rate in 0i128..=i128::MAX,
        amount in 0i128..=i128::MAX,
        decimals in 0u32..=18,
    ) {
        let env = Env::default();
        prop_assert_eq!(token_value(&env, rate, 0, decimals).unwrap().tokens, 0);
        prop_assert_eq!(token_value(&env, 0, amount, decimals).unwrap().tokens, 0);
    }

    #[test]
    fn prop_whole_units_are_exact_and_additive(
        rate in 0i128..=1_000_000_000,
        a in 0i128..=1_000_000_000_000,
        b in 0i128..=1_000_000_000_000,
        decimals in 0u32..=18,
    ) {
        let env = Env::default();
        let unit = 10i128.pow(18 - decimals);

        let left = token_value(&env, rate, a * unit, decimals).unwrap();
        let right = token_value(&env, rate, b * unit, decimals).unwrap();
        let joined = token_value(&env, rate, (a + b) * unit, decimals).unwrap();

        prop_assert_eq!(left.tokens, a * rate);
        prop_assert_eq!(left.remainder, 0);
        prop_assert_eq!(joined.tokens, left.tokens + right.tokens);
    }

    #[test]
    fn prop_truncation_is_exact(
        rate in 0i128..=1_000_000_000,
        amount in 0i128..=1_000_000_000_000_000_000_000_000,
        decimals in 0u32..=18,
    ) {
        let env = Env::default();
        let unit = 10i128.pow(18 - decimals);

        let value = token_value(&env, rate, amount, decimals).unwrap();
        prop_assert!((value.remainder as i128) < unit);
        prop_assert_eq!(value.tokens * unit + value.remainder as i128, amount * rate);
    }
}
