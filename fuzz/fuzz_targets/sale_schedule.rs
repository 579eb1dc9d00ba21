#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use sale_schedule::{
    Authentication, Phase, SaleConfig, SaleScheduleContract, SaleScheduleContractClient,
    SaleWindow, Stakeholder, StakeholderAccount, StakeholderFilter, Stakes, TokenReleasePhase,
    VolumeMultiplier,
};
use soroban_sdk::{testutils::Address as _, Address, Env, Vec};

#[derive(Arbitrary, Debug)]
pub struct FuzzPhase {
    duration: u32,
    rate: i64,
    lockup_period: u32,
    uses_volume_multiplier: bool,
}

#[derive(Arbitrary, Debug)]
pub struct FuzzTier {
    threshold: i128,
    rate: i64,
    lockup_period: u32,
}

#[derive(Arbitrary, Debug)]
pub struct FuzzStakeholder {
    tokens: i128,
    eth: i32,
    bound: bool,
    fixed_release_date: Option<u64>,
}

#[derive(Arbitrary, Debug)]
pub struct FuzzConfig {
    precision: u8,
    base_rate: i64,
    presale_start: u32,
    publicsale_gap: u32,
    phases: std::vec::Vec<FuzzPhase>,
    tiers: std::vec::Vec<FuzzTier>,
    stakeholders: std::vec::Vec<FuzzStakeholder>,
    releases: std::vec::Vec<(u16, u32)>,
}

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Rate { phase: u32, amount: Option<i128> },
    PublicsaleRate { phase: u32, amount: Option<i128> },
    LockupPeriod { phase: u32, amount: Option<i128> },
    PhaseBonus { phase: u32 },
    PhaseAt { timestamp: u64 },
    TokenValue { rate: i128, amount: i128, decimals: u32 },
    Quote { timestamp: u64, amount: i128, decimals: u32 },
    Select { tokens: Option<bool>, eth: Option<bool>, contract: Option<bool>, overwrite: Option<bool> },
    Vesting { stakeholder: u32 },
    ReleasedAt { stakeholder: u32, timestamp: u64 },
    Entitlement { stakeholder: u32, total_raised: i128 },
}

fn build_config(env: &Env, input: &FuzzConfig) -> SaleConfig {
    let mut phases = Vec::new(env);
    let mut presale_duration: u64 = 0;
    for p in input.phases.iter().take(16) {
        presale_duration += p.duration as u64;
        phases.push_back(Phase {
            duration: p.duration as u64,
            rate: p.rate as i128,
            lockup_period: p.lockup_period as u64,
            uses_volume_multiplier: p.uses_volume_multiplier,
        });
    }
    let mut volume_multipliers = Vec::new(env);
    for t in input.tiers.iter().take(8) {
        volume_multipliers.push_back(VolumeMultiplier {
            threshold: t.threshold,
            rate: t.rate as i128,
            lockup_period: t.lockup_period as u64,
        });
    }
    let mut stakeholders = Vec::new(env);
    for s in input.stakeholders.iter().take(8) {
        stakeholders.push_back(Stakeholder {
            account: if s.bound {
                StakeholderAccount::Identity(Address::generate(env))
            } else {
                StakeholderAccount::Unassigned
            },
            tokens: s.tokens,
            eth: s.eth as i128,
            overwrite_release_date: s.fixed_release_date.is_some(),
            fixed_release_date: s.fixed_release_date.unwrap_or(0),
        });
    }
    let mut token_release_phases = Vec::new(env);
    for (percentage, days) in input.releases.iter().take(8) {
        token_release_phases.push_back(TokenReleasePhase {
            percentage: *percentage as u32,
            vesting_period: *days as u64,
        });
    }

    let window = |start: u64| SaleWindow {
        start,
        soft_cap: 0,
        hard_cap: i128::MAX,
        min_contribution: 0,
    };
    let presale_start = input.presale_start as u64;
    SaleConfig {
        precision: input.precision as u32,
        base_rate: input.base_rate as i128,
        presale: window(presale_start),
        publicsale: window(presale_start + presale_duration + input.publicsale_gap as u64),
        phases,
        volume_multipliers,
        stakes: Stakes {
            stakeholders,
            token_release_phases,
        },
        authentication: Authentication { whitelist: None },
    }
}

fuzz_target!(|input: (FuzzConfig, std::vec::Vec<FuzzAction>)| {
    let (raw_config, actions) = input;
    let env = Env::default();
    env.mock_all_auths();

    let contract_id = env.register(SaleScheduleContract, ());
    let client = SaleScheduleContractClient::new(&env, &contract_id);
    let admin = Address::generate(&env);

    // Arbitrary tables are mostly invalid; queries must still fail cleanly.
    let config = build_config(&env, &raw_config);
    let report = client.check_config(&config);
    let initialized = client.try_initialize(&admin, &config);
    assert_eq!(report.is_none(), matches!(initialized, Ok(Ok(()))));

    for action in actions.into_iter().take(64) {
        match action {
            FuzzAction::Rate { phase, amount } => {
                let _ = client.try_rate(&phase, &amount);
            }
            FuzzAction::PublicsaleRate { phase, amount } => {
                let _ = client.try_publicsale_rate(&phase, &amount);
            }
            FuzzAction::LockupPeriod { phase, amount } => {
                let _ = client.try_lockup_period(&phase, &amount);
            }
            FuzzAction::PhaseBonus { phase } => {
                let _ = client.try_phase_bonus(&phase);
            }
            FuzzAction::PhaseAt { timestamp } => {
                let _ = client.try_phase_at(&timestamp);
            }
            FuzzAction::TokenValue { rate, amount, decimals } => {
                let _ = client.try_token_value(&rate, &amount, &decimals);
            }
            FuzzAction::Quote { timestamp, amount, decimals } => {
                let _ = client.try_quote(&timestamp, &amount, &decimals);
            }
            FuzzAction::Select { tokens, eth, contract, overwrite } => {
                let filter = StakeholderFilter {
                    tokens,
                    eth,
                    contract,
                    overwrite_release_date: overwrite,
                };
                let _ = client.try_select_stakeholders(&filter);
            }
            FuzzAction::Vesting { stakeholder } => {
                let _ = client.try_vesting_schedule(&stakeholder);
            }
            FuzzAction::ReleasedAt { stakeholder, timestamp } => {
                let _ = client.try_released_at(&stakeholder, &timestamp);
            }
            FuzzAction::Entitlement { stakeholder, total_raised } => {
                let _ = client.try_eth_entitlement(&stakeholder, &total_raised);
            }
        }
    }
});
