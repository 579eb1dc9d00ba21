//! Property-based tests for vesting expansion.
//!
//! Invariants tested:
//! - Checkpoint amounts sum to exactly the allocation
//! - Every checkpoint but the last is `allocation * percentage / 10000` rounded down
//! - A fixed release date moves every checkpoint without changing amounts
//! - Everything is released once the last checkpoint has passed

use proptest::prelude::*;
use sale_schedule::{SaleSchedule, Stakeholder, StakeholderAccount};
use soroban_sdk::{vec, Env, Vec};

use crate::support::{config, phase, release_phases};

fn holder(tokens: i128, fixed_release_date: Option<u64>) -> Stakeholder {
    Stakeholder {
        account: StakeholderAccount::Unassigned,
        tokens,
        eth: 0,
        overwrite_release_date: fixed_release_date.is_some(),
        fixed_release_date: fixed_release_date.unwrap_or(0),
    }
}

proptest! {
    #[test]
    fn prop_amounts_sum_to_allocation(
        tokens in 0i128..=i128::MAX / 2,
        weights in prop::collection::vec(1u32..=100, 1..8),
    ) {
        let env = Env::default();
        let releases = release_phases(&env, &weights);
        let cfg = config(
            &env,
            vec![&env, phase(1, false), phase(1, false)],
            Vec::new(&env),
            vec![&env, holder(tokens, None)],
            releases.clone(),
        );
        let schedule = SaleSchedule::new(&env, &cfg);

        let checkpoints = schedule.vesting_schedule(0).unwrap();
        prop_assert_eq!(checkpoints.len(), releases.len());

        let mut total: i128 = 0;
        for (i, checkpoint) in checkpoints.iter().enumerate() {
            total += checkpoint.amount;
            if i + 1 < checkpoints.len() as usize {
                let release = releases.get(i as u32).unwrap();
                prop_assert_eq!(
                    checkpoint.amount,
                    tokens / 10_000 * release.percentage as i128
                        + tokens % 10_000 * release.percentage as i128 / 10_000
                );
            }
        }
        prop_assert_eq!(total, tokens);
        prop_assert_eq!(schedule.released_at(0, u64::MAX).unwrap(), tokens);
    }

    #[test]
    fn prop_fixed_date_keeps_amounts(
        tokens in 0i128..=1_000_000_000_000,
        weights in prop::collection::vec(1u32..=100, 1..8),
        date in 0u64..=4_000_000_000,
    ) {
        let env = Env::default();
        let cfg = config(
            &env,
            vec![&env, phase(1, false), phase(1, false)],
            Vec::new(&env),
            vec![&env, holder(tokens, None), holder(tokens, Some(date))],
            release_phases(&env, &weights),
        );
        let schedule = SaleSchedule::new(&env, &cfg);

        let vesting = schedule.vesting_schedule(0).unwrap();
        let fixed = schedule.vesting_schedule(1).unwrap();
        for (v, f) in vesting.iter().zip(fixed.iter()) {
            prop_assert_eq!(v.amount, f.amount);
            prop_assert_eq!(f.release_at, date);
        }
        prop_assert_eq!(schedule.released_at(1, date).unwrap(), tokens);
    }
}
