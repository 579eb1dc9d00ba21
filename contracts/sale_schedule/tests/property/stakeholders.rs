//! Property-based tests for stakeholder selection.
//!
//! Invariants tested:
//! - Every selected stakeholder satisfies the filter
//! - Every stakeholder satisfying the filter is selected, in table order
//! - The empty filter selects the whole table

use proptest::prelude::*;
use proptest_derive::Arbitrary;
use sale_schedule::{SaleSchedule, Stakeholder, StakeholderAccount, StakeholderFilter};
use soroban_sdk::testutils::Address as _;
use soroban_sdk::{vec, Address, Env, Vec};

use crate::support::{config, phase};

#[derive(Arbitrary, Clone, Debug)]
struct FilterSeed {
    tokens: Option<bool>,
    eth: Option<bool>,
    contract: Option<bool>,
    overwrite_release_date: Option<bool>,
}

impl From<FilterSeed> for StakeholderFilter {
    fn from(seed: FilterSeed) -> Self {
        StakeholderFilter {
            tokens: seed.tokens,
            eth: seed.eth,
            contract: seed.contract,
            overwrite_release_date: seed.overwrite_release_date,
        }
    }
}

#[derive(Arbitrary, Clone, Debug)]
struct HolderSeed {
    has_tokens: bool,
    has_eth: bool,
    has_account: bool,
    overwrite_release_date: bool,
}

fn table(env: &Env, seeds: &[HolderSeed]) -> Vec<Stakeholder> {
    let mut stakeholders = Vec::new(env);
    for seed in seeds {
        stakeholders.push_back(Stakeholder {
            account: if seed.has_account {
                StakeholderAccount::Identity(Address::generate(env))
            } else {
                StakeholderAccount::Unassigned
            },
            tokens: if seed.has_tokens { 100 } else { 0 },
            eth: if seed.has_eth { 1 } else { 0 },
            overwrite_release_date: seed.overwrite_release_date,
            fixed_release_date: 0,
        });
    }
    stakeholders
}

proptest! {
    #[test]
    fn prop_selection_is_exact(
        filter in any::<FilterSeed>(),
        seeds in prop::collection::vec(any::<HolderSeed>(), 0..12),
    ) {
        let env = Env::default();
        let filter = StakeholderFilter::from(filter);
        let stakeholders = table(&env, &seeds);
        let cfg = config(
            &env,
            vec![&env, phase(1, false), phase(1, false)],
            Vec::new(&env),
            stakeholders.clone(),
            Vec::new(&env),
        );
        let schedule = SaleSchedule::new(&env, &cfg);

        let mut expected = Vec::new(&env);
        for stakeholder in stakeholders.iter() {
            if filter.matches(&stakeholder) {
                expected.push_back(stakeholder);
            }
        }
        let selected = schedule.select_stakeholders(&filter);
        prop_assert!(selected.iter().all(|s| filter.matches(&s)));
        prop_assert_eq!(selected, expected);

        let everyone = schedule.select_stakeholders(&StakeholderFilter::default());
        prop_assert_eq!(everyone, stakeholders);
    }
}
