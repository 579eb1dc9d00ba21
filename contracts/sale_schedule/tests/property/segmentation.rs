//! Property-based tests for phase-table segmentation.
//!
//! Invariants tested:
//! - The public sale starts at the first positive-rate phase at index 1 or later
//! - Presale and public-sale phases concatenate back to the full table
//! - A transition phase exists exactly when a break closes the presale
//! - Durations of both sub-sequences add up to the table total

use proptest::prelude::*;
use sale_schedule::SaleSchedule;
use soroban_sdk::{vec, Env, Vec};

use crate::support::{config, phase};

proptest! {
    #[test]
    fn prop_segments_reconstruct_table(
        opening_rate in 0i128..=10_000,
        breaks in 0usize..4,
        public_rates in prop::collection::vec(0i128..=10_000, 0..6),
        first_public_rate in 1i128..=10_000,
    ) {
        let env = Env::default();
        let mut phases = vec![&env, phase(opening_rate, true)];
        for _ in 0..breaks {
            phases.push_back(phase(0, false));
        }
        phases.push_back(phase(first_public_rate, false));
        for rate in &public_rates {
            phases.push_back(phase(*rate, false));
        }
        let cfg = config(&env, phases.clone(), Vec::new(&env), Vec::new(&env), Vec::new(&env));
        let schedule = SaleSchedule::new(&env, &cfg);

        let start = schedule.publicsale_start_index().unwrap();
        prop_assert_eq!(start, 1 + breaks as u32);
        prop_assert_eq!(schedule.publicsale_starting_phase().unwrap().rate, first_public_rate);

        let mut joined = schedule.presale_phases().unwrap();
        joined.append(&schedule.publicsale_phases().unwrap());
        prop_assert_eq!(joined, phases.clone());

        prop_assert_eq!(schedule.has_transition_phase().unwrap(), breaks > 0);
        if let Some(transition) = schedule.transition_phase().unwrap() {
            prop_assert_eq!(Some(transition), schedule.presale_phases().unwrap().last());
        }

        let total = 86_400 * phases.len() as u64;
        prop_assert_eq!(
            schedule.presale_duration().unwrap() + schedule.publicsale_duration().unwrap(),
            total
        );
    }
}
