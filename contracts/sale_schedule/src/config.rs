//! Declarative sale configuration bound once by `initialize`.
//!
//! Amounts are smallest base-currency units (`i128`), times are seconds
//! (`u64`). Literals such as `500 ether` or `16 days` are resolved with
//! `common::units` before a config is built.

use common::math::pow10;
use soroban_sdk::{contracttype, Address, Env, Vec};

use crate::errors::{ConfigFault, ConfigTable, ContractError};
use crate::SaleSchedule;

/// Largest supported number of fixed-point decimals for tier rates.
pub const MAX_PRECISION: u32 = 18;

/// Release percentages are basis points of the allocation.
pub const RELEASE_PERCENTAGE_TOTAL: u32 = 10_000;

// ── Tables ───────────────────────────────────────────────────────────────────

/// One contiguous window of the sale.
///
/// A phase with `rate == 0` is a break between presale and public sale and
/// never accepts contributions.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Phase {
    /// Length of the phase in seconds.
    pub duration: u64,
    /// Tokens per whole base-currency unit.
    pub rate: i128,
    /// Seconds purchased tokens stay locked.
    pub lockup_period: u64,
    pub uses_volume_multiplier: bool,
}

/// Contribution-size bonus tier.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VolumeMultiplier {
    /// Minimum contribution in smallest units.
    pub threshold: i128,
    /// Bonus as a fraction of the phase rate, in `10^precision` units.
    pub rate: i128,
    /// Extra lock-up in seconds, added to the phase lock-up.
    pub lockup_period: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StakeholderAccount {
    /// Placeholder to be assigned before deployment.
    Unassigned,
    Identity(Address),
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Stakeholder {
    pub account: StakeholderAccount,
    /// Token allocation before vesting.
    pub tokens: i128,
    /// Share of raised base currency, in `10^precision` units.
    pub eth: i128,
    /// Release everything at `fixed_release_date` instead of vesting.
    pub overwrite_release_date: bool,
    pub fixed_release_date: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokenReleasePhase {
    /// Basis points of the allocation released at this checkpoint.
    pub percentage: u32,
    /// Offset in seconds from the release schedule start.
    pub vesting_period: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Stakes {
    pub stakeholders: Vec<Stakeholder>,
    pub token_release_phases: Vec<TokenReleasePhase>,
}

// ── Windows and capabilities ─────────────────────────────────────────────────

/// Start time and limits of the presale or the public sale.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SaleWindow {
    pub start: u64,
    pub soft_cap: i128,
    pub hard_cap: i128,
    /// Smallest accepted single contribution.
    pub min_contribution: i128,
}

/// Contributors must be pre-authenticated when a whitelist is configured.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Authentication {
    /// `Some(require)` when a whitelist is configured.
    pub whitelist: Option<bool>,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SaleConfig {
    /// Decimal digits of the tier-rate fixed point (4 ⇒ 10 000 = 100%).
    pub precision: u32,
    pub base_rate: i128,
    pub presale: SaleWindow,
    pub publicsale: SaleWindow,
    pub phases: Vec<Phase>,
    /// Ascending by threshold.
    pub volume_multipliers: Vec<VolumeMultiplier>,
    pub stakes: Stakes,
    pub authentication: Authentication,
}

// ── Validation ───────────────────────────────────────────────────────────────

impl SaleConfig {
    /// Check every table once, failing on the first defect found.
    pub fn validate(&self, env: &Env) -> Result<(), ConfigFault> {
        self.validate_settings()?;
        self.validate_phases(env)?;
        self.validate_volume_multipliers()?;
        self.validate_windows(env)?;
        self.validate_stakes()?;
        Ok(())
    }

    fn validate_settings(&self) -> Result<(), ConfigFault> {
        if self.precision > MAX_PRECISION {
            return Err(ConfigFault::new(
                ContractError::PrecisionOutOfRange,
                ConfigTable::Settings,
                None,
            ));
        }
        if self.base_rate <= 0 {
            return Err(ConfigFault::new(
                ContractError::InvalidBaseRate,
                ConfigTable::Settings,
                None,
            ));
        }
        Ok(())
    }

    fn validate_phases(&self, env: &Env) -> Result<(), ConfigFault> {
        if self.phases.is_empty() {
            return Err(ConfigFault::new(
                ContractError::EmptyPhaseTable,
                ConfigTable::Phases,
                None,
            ));
        }
        for (i, phase) in self.phases.iter().enumerate() {
            if phase.rate < 0 {
                return Err(ConfigFault::new(
                    ContractError::NegativeRate,
                    ConfigTable::Phases,
                    Some(i as u32),
                ));
            }
        }
        SaleSchedule::new(env, self)
            .publicsale_start_index()
            .map_err(|e| ConfigFault::new(e, ConfigTable::Phases, None))?;
        Ok(())
    }

    fn validate_volume_multipliers(&self) -> Result<(), ConfigFault> {
        let mut previous: Option<i128> = None;
        for (i, tier) in self.volume_multipliers.iter().enumerate() {
            let index = Some(i as u32);
            if tier.threshold <= 0 {
                return Err(ConfigFault::new(
                    ContractError::NonPositiveThreshold,
                    ConfigTable::VolumeMultipliers,
                    index,
                ));
            }
            if tier.rate < 0 {
                return Err(ConfigFault::new(
                    ContractError::NegativeRate,
                    ConfigTable::VolumeMultipliers,
                    index,
                ));
            }
            if let Some(prev) = previous {
                if tier.threshold <= prev {
                    return Err(ConfigFault::new(
                        ContractError::ThresholdsNotIncreasing,
                        ConfigTable::VolumeMultipliers,
                        index,
                    ));
                }
            }
            previous = Some(tier.threshold);
        }
        Ok(())
    }

    fn validate_windows(&self, env: &Env) -> Result<(), ConfigFault> {
        for (i, window) in [&self.presale, &self.publicsale].into_iter().enumerate() {
            let well_formed = window.soft_cap >= 0
                && window.hard_cap >= 0
                && window.min_contribution >= 0
                && window.soft_cap <= window.hard_cap;
            if !well_formed {
                return Err(ConfigFault::new(
                    ContractError::InvalidSaleWindow,
                    ConfigTable::SaleWindows,
                    Some(i as u32),
                ));
            }
        }

        let presale_end = SaleSchedule::new(env, self)
            .presale_duration()
            .ok()
            .and_then(|d| self.presale.start.checked_add(d));
        match presale_end {
            Some(end) if end <= self.publicsale.start => Ok(()),
            _ => Err(ConfigFault::new(
                ContractError::InvalidSaleWindow,
                ConfigTable::SaleWindows,
                Some(1),
            )),
        }
    }

    fn validate_stakes(&self) -> Result<(), ConfigFault> {
        let mut eth_total: i128 = 0;
        let mut any_tokens = false;
        for (i, stakeholder) in self.stakes.stakeholders.iter().enumerate() {
            let index = Some(i as u32);
            if stakeholder.tokens < 0 || stakeholder.eth < 0 {
                return Err(ConfigFault::new(
                    ContractError::NegativeAllocation,
                    ConfigTable::Stakeholders,
                    index,
                ));
            }
            any_tokens |= stakeholder.tokens > 0;
            eth_total = eth_total.checked_add(stakeholder.eth).ok_or(ConfigFault::new(
                ContractError::ArithmeticOverflow,
                ConfigTable::Stakeholders,
                index,
            ))?;
        }

        // precision <= MAX_PRECISION was checked first, so the scale fits.
        let scale = pow10(self.precision).unwrap_or(0) as i128;
        if eth_total > scale {
            return Err(ConfigFault::new(
                ContractError::EthSharesExceedScale,
                ConfigTable::Stakeholders,
                None,
            ));
        }

        let releases = &self.stakes.token_release_phases;
        if releases.is_empty() {
            if any_tokens {
                return Err(ConfigFault::new(
                    ContractError::ReleasePercentagesInvalid,
                    ConfigTable::ReleasePhases,
                    None,
                ));
            }
            return Ok(());
        }
        let total: u64 = releases.iter().map(|r| r.percentage as u64).sum();
        if total != RELEASE_PERCENTAGE_TOTAL as u64 {
            return Err(ConfigFault::new(
                ContractError::ReleasePercentagesInvalid,
                ConfigTable::ReleasePhases,
                None,
            ));
        }
        Ok(())
    }
}
