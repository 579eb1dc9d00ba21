//! Property-based tests for volume-tier rate resolution.
//!
//! Invariants tested:
//! - Below the smallest threshold the rate is the phase rate
//! - At or above the largest threshold the largest tier applies, however large
//!   the amount grows
//! - Phases without volume multipliers ignore the amount
//! - The blended rate is `rate + rate * tier / 10^precision` rounded down

use proptest::prelude::*;
use sale_schedule::SaleSchedule;
use soroban_sdk::{vec, Env};

use crate::support::{config, phase, tiers, SCALE, WEI_PER_ETHER};

fn tier_steps() -> impl Strategy<Value = std::vec::Vec<(i128, i128)>> {
    prop::collection::vec((1i128..=1_000 * WEI_PER_ETHER, 0i128..=20_000), 1..6)
}

proptest! {
    #[test]
    fn prop_below_smallest_threshold_is_base_rate(
        rate in 0i128..=1_000_000,
        steps in tier_steps(),
        fraction in 0i128..1_000,
    ) {
        let env = Env::default();
        let tiers = tiers(&env, &steps);
        let smallest = tiers.get(0).unwrap().threshold;
        let cfg = config(
            &env,
            vec![&env, phase(rate, true), phase(1, false)],
            tiers,
            vec![&env],
            vec![&env],
        );
        let schedule = SaleSchedule::new(&env, &cfg);

        let amount = smallest * fraction / 1_000;
        prop_assert!(amount < smallest);
        prop_assert_eq!(schedule.rate(0, Some(amount)).unwrap(), rate);
    }

    #[test]
    fn prop_largest_tier_caps_the_bonus(
        rate in 0i128..=1_000_000,
        steps in tier_steps(),
        excess in 0i128..=i128::MAX / 4,
    ) {
        let env = Env::default();
        let tiers = tiers(&env, &steps);
        let largest = tiers.last().unwrap();
        let cfg = config(
            &env,
            vec![&env, phase(rate, true), phase(1, false)],
            tiers.clone(),
            vec![&env],
            vec![&env],
        );
        let schedule = SaleSchedule::new(&env, &cfg);

        let expected = rate + rate * largest.rate / SCALE;
        let resolution = schedule.resolve_rate(0, Some(largest.threshold + excess)).unwrap();
        prop_assert_eq!(resolution.rate, expected);
        prop_assert_eq!(resolution.tier_index, Some(tiers.len() - 1));
        prop_assert_eq!(resolution.remainder, ((rate * largest.rate) % SCALE) as u128);
    }

    #[test]
    fn prop_phase_without_multiplier_ignores_amount(
        rate in 1i128..=1_000_000,
        steps in tier_steps(),
        amount in 0i128..=i128::MAX,
    ) {
        let env = Env::default();
        let cfg = config(
            &env,
            vec![&env, phase(1, true), phase(rate, false)],
            tiers(&env, &steps),
            vec![&env],
            vec![&env],
        );
        let schedule = SaleSchedule::new(&env, &cfg);

        prop_assert_eq!(schedule.rate(1, Some(amount)).unwrap(), rate);
        prop_assert_eq!(schedule.publicsale_rate(0, Some(amount)).unwrap().rate, rate);
    }

    #[test]
    fn prop_rate_never_below_phase_rate(
        rate in 0i128..=1_000_000,
        steps in tier_steps(),
        amount in 0i128..=i128::MAX,
    ) {
        let env = Env::default();
        let cfg = config(
            &env,
            vec![&env, phase(rate, true), phase(1, false)],
            tiers(&env, &steps),
            vec![&env],
            vec![&env],
        );
        let schedule = SaleSchedule::new(&env, &cfg);

        prop_assert!(schedule.rate(0, Some(amount)).unwrap() >= rate);
    }
}
