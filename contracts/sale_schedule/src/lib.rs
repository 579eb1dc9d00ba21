//! Sale schedule engine.
//!
//! Binds one token-sale configuration (phases, volume tiers, stakeholders and
//! release phases) and answers pricing and vesting queries against it. The
//! configuration is validated once by `initialize`; every query afterwards
//! is read-only.

#![no_std]

pub mod allocation;
pub mod config;
pub mod errors;
pub mod events;
pub mod phases;
pub mod rates;
pub mod schedule;
pub mod stakeholders;
pub mod vesting;

use soroban_sdk::{contract, contractimpl, symbol_short, Address, Env, Symbol, Vec};

pub use allocation::{PricedContribution, Quote, TokenValue};
pub use config::{
    Authentication, Phase, SaleConfig, SaleWindow, Stakeholder, StakeholderAccount, Stakes,
    TokenReleasePhase, VolumeMultiplier,
};
pub use errors::{
    create_error_context, ConfigFault, ConfigReport, ConfigTable, ContractError, ErrorCategory,
    ErrorContext, ErrorSeverity,
};
pub use rates::RateResolution;
pub use schedule::SaleSchedule;
pub use stakeholders::StakeholderFilter;
pub use vesting::ReleaseCheckpoint;

// ── Storage key constants ────────────────────────────────────────────────────

const ADMIN: Symbol = symbol_short!("ADMIN");
const INITIALIZED: Symbol = symbol_short!("INIT");
const CONFIG: Symbol = symbol_short!("CONFIG");

const TTL_THRESHOLD: u32 = 518_400;
const TTL_EXTEND_TO: u32 = 3_110_400;

// ── Helpers ──────────────────────────────────────────────────────────────────

fn load_config(env: &Env) -> Result<SaleConfig, ContractError> {
    env.storage()
        .instance()
        .get(&CONFIG)
        .ok_or_else(|| errors::report(env, ContractError::NotInitialized, None))
}

/// Run a query against the bound configuration, reporting any failure with
/// `index` as the offending table position.
fn query<T>(
    env: &Env,
    index: Option<u32>,
    f: impl FnOnce(SaleSchedule<'_>) -> Result<T, ContractError>,
) -> Result<T, ContractError> {
    let config = load_config(env)?;
    f(SaleSchedule::new(env, &config)).map_err(|e| errors::report(env, e, index))
}

fn note_rate_truncation(env: &Env, amount: Option<i128>, resolution: &RateResolution) {
    if resolution.remainder != 0 {
        events::publish_precision_loss(
            env,
            events::OP_RATE,
            resolution.phase_rate,
            amount.unwrap_or(0),
            resolution.rate,
            resolution.remainder,
        );
    }
}

fn note_token_truncation(env: &Env, rate: i128, amount: i128, value: &TokenValue) {
    if value.remainder != 0 {
        events::publish_precision_loss(
            env,
            events::OP_TOKENS,
            rate,
            amount,
            value.tokens,
            value.remainder,
        );
    }
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct SaleScheduleContract;

#[contractimpl]
impl SaleScheduleContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Validate and bind the sale configuration. Callable once.
    pub fn initialize(env: Env, admin: Address, config: SaleConfig) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(errors::report(
                &env,
                ContractError::AlreadyInitialized,
                None,
            ));
        }
        admin.require_auth();

        config
            .validate(&env)
            .map_err(|fault| errors::report_fault(&env, fault))?;

        env.storage().instance().set(&ADMIN, &admin);
        env.storage().instance().set(&CONFIG, &config);
        env.storage().instance().set(&INITIALIZED, &true);
        env.storage()
            .instance()
            .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);

        events::publish_initialized(
            &env,
            admin,
            config.precision,
            config.phases.len(),
            config.volume_multipliers.len(),
            config.stakes.stakeholders.len(),
        );

        Ok(())
    }

    /// First defect `initialize` would reject `config` for, with the table
    /// and row it was found in. `None` when the configuration is valid.
    pub fn check_config(env: Env, config: SaleConfig) -> Option<ConfigReport> {
        config.validate(&env).err().map(ConfigReport::from)
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    pub fn get_admin(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&ADMIN)
            .ok_or_else(|| errors::report(&env, ContractError::NotInitialized, None))
    }

    pub fn get_config(env: Env) -> Result<SaleConfig, ContractError> {
        load_config(&env)
    }

    // ── Settings ────────────────────────────────────────────────────────────

    pub fn precision_scale(env: Env) -> Result<i128, ContractError> {
        query(&env, None, |s| s.precision_scale())
    }

    pub fn uses_authentication(env: Env) -> Result<bool, ContractError> {
        query(&env, None, |s| Ok(s.uses_authentication()))
    }

    /// Account receiving raised funds (stakeholder 0).
    pub fn get_beneficiary(env: Env) -> Result<StakeholderAccount, ContractError> {
        query(&env, Some(0), |s| s.beneficiary())
    }

    // ── Phases ──────────────────────────────────────────────────────────────

    pub fn phase(env: Env, index: u32) -> Result<Phase, ContractError> {
        query(&env, Some(index), |s| s.phase(index))
    }

    /// Index of the phase active at `timestamp`, `None` outside both sales.
    pub fn phase_at(env: Env, timestamp: u64) -> Result<Option<u32>, ContractError> {
        query(&env, None, |s| s.phase_at(timestamp))
    }

    pub fn presale_start_index(env: Env) -> Result<u32, ContractError> {
        query(&env, None, |s| Ok(s.presale_start_index()))
    }

    pub fn publicsale_start_index(env: Env) -> Result<u32, ContractError> {
        query(&env, None, |s| s.publicsale_start_index())
    }

    pub fn presale_starting_phase(env: Env) -> Result<Phase, ContractError> {
        query(&env, None, |s| s.presale_starting_phase())
    }

    pub fn publicsale_starting_phase(env: Env) -> Result<Phase, ContractError> {
        query(&env, None, |s| s.publicsale_starting_phase())
    }

    pub fn presale_phases(env: Env) -> Result<Vec<Phase>, ContractError> {
        query(&env, None, |s| s.presale_phases())
    }

    pub fn publicsale_phases(env: Env) -> Result<Vec<Phase>, ContractError> {
        query(&env, None, |s| s.publicsale_phases())
    }

    pub fn presale_duration(env: Env) -> Result<u64, ContractError> {
        query(&env, None, |s| s.presale_duration())
    }

    pub fn publicsale_duration(env: Env) -> Result<u64, ContractError> {
        query(&env, None, |s| s.publicsale_duration())
    }

    pub fn has_transition_phase(env: Env) -> Result<bool, ContractError> {
        query(&env, None, |s| s.has_transition_phase())
    }

    pub fn transition_phase(env: Env) -> Result<Option<Phase>, ContractError> {
        query(&env, None, |s| s.transition_phase())
    }

    // ── Rates ───────────────────────────────────────────────────────────────

    /// Highest volume tier reached by `amount`.
    pub fn volume_multiplier(
        env: Env,
        amount: i128,
    ) -> Result<Option<VolumeMultiplier>, ContractError> {
        query(&env, None, |s| {
            Ok(s.volume_multiplier(amount)?.map(|(_, tier)| tier))
        })
    }

    /// Effective rate of a phase for an optional contribution amount.
    pub fn rate(env: Env, phase_index: u32, amount: Option<i128>) -> Result<i128, ContractError> {
        query(&env, Some(phase_index), |s| {
            let resolution = s.resolve_rate(phase_index, amount)?;
            note_rate_truncation(s.env, amount, &resolution);
            Ok(resolution.rate)
        })
    }

    pub fn presale_rate(
        env: Env,
        phase_index: u32,
        amount: Option<i128>,
    ) -> Result<i128, ContractError> {
        query(&env, Some(phase_index), |s| {
            let resolution = s.presale_rate(phase_index, amount)?;
            note_rate_truncation(s.env, amount, &resolution);
            Ok(resolution.rate)
        })
    }

    /// Rate of the public-sale phase `relative_index` places after its start.
    pub fn publicsale_rate(
        env: Env,
        relative_index: u32,
        amount: Option<i128>,
    ) -> Result<i128, ContractError> {
        query(&env, Some(relative_index), |s| {
            let resolution = s.publicsale_rate(relative_index, amount)?;
            note_rate_truncation(s.env, amount, &resolution);
            Ok(resolution.rate)
        })
    }

    pub fn lockup_period(
        env: Env,
        phase_index: u32,
        amount: Option<i128>,
    ) -> Result<u64, ContractError> {
        query(&env, Some(phase_index), |s| {
            s.lockup_period(phase_index, amount)
        })
    }

    pub fn phase_bonus(env: Env, phase_index: u32) -> Result<i128, ContractError> {
        query(&env, Some(phase_index), |s| s.phase_bonus(phase_index))
    }

    // ── Allocation ──────────────────────────────────────────────────────────

    /// Tokens bought by `amount` at `rate`, in units of `token_decimals`.
    pub fn token_value(
        env: Env,
        rate: i128,
        amount: i128,
        token_decimals: u32,
    ) -> Result<i128, ContractError> {
        let value = allocation::token_value(&env, rate, amount, token_decimals)
            .map_err(|e| errors::report(&env, e, None))?;
        note_token_truncation(&env, rate, amount, &value);
        Ok(value.tokens)
    }

    /// Phase, rate, tokens and unlock time for a contribution at `timestamp`.
    pub fn quote(
        env: Env,
        timestamp: u64,
        amount: i128,
        token_decimals: u32,
    ) -> Result<Quote, ContractError> {
        query(&env, None, |s| {
            let priced = s.quote(timestamp, amount, token_decimals)?;
            let quote = priced.quote;
            if priced.rate_remainder != 0 {
                let phase_rate = s.phase(quote.phase_index)?.rate;
                events::publish_precision_loss(
                    s.env,
                    events::OP_RATE,
                    phase_rate,
                    amount,
                    quote.rate,
                    priced.rate_remainder,
                );
            }
            let value = TokenValue {
                tokens: quote.tokens,
                remainder: priced.token_remainder,
            };
            note_token_truncation(s.env, quote.rate, amount, &value);
            Ok(quote)
        })
    }

    pub fn eth_entitlement(
        env: Env,
        stakeholder_index: u32,
        total_raised: i128,
    ) -> Result<i128, ContractError> {
        query(&env, Some(stakeholder_index), |s| {
            s.eth_entitlement(stakeholder_index, total_raised)
        })
    }

    // ── Stakeholders ────────────────────────────────────────────────────────

    pub fn select_stakeholders(
        env: Env,
        filter: StakeholderFilter,
    ) -> Result<Vec<Stakeholder>, ContractError> {
        query(&env, None, |s| Ok(s.select_stakeholders(&filter)))
    }

    pub fn stakeholder(env: Env, index: u32) -> Result<Stakeholder, ContractError> {
        query(&env, Some(index), |s| s.stakeholder(index))
    }

    /// Release checkpoints of one stakeholder's token allocation.
    pub fn vesting_schedule(
        env: Env,
        stakeholder_index: u32,
    ) -> Result<Vec<ReleaseCheckpoint>, ContractError> {
        query(&env, Some(stakeholder_index), |s| {
            s.vesting_schedule(stakeholder_index)
        })
    }

    /// Tokens released to a stakeholder by `timestamp`.
    pub fn released_at(
        env: Env,
        stakeholder_index: u32,
        timestamp: u64,
    ) -> Result<i128, ContractError> {
        query(&env, Some(stakeholder_index), |s| {
            s.released_at(stakeholder_index, timestamp)
        })
    }
}
