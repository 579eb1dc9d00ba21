//! Rate resolution with volume bonus tiers.
//!
//! A qualifying tier adds `rate * tier.rate / 10^precision` to the phase
//! rate. Tier rates are bonus fractions in the same fixed point as
//! `precision`, so `precision = 4` and `tier.rate = 4000` is a 40% bonus.

use common::math::{mul_div_floor, non_negative, pow10};

use crate::config::VolumeMultiplier;
use crate::errors::ContractError;
use crate::SaleSchedule;

/// Effective rate for a phase and contribution.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct RateResolution {
    /// Rate configured on the phase.
    pub phase_rate: i128,
    pub rate: i128,
    /// Index of the applied volume tier.
    pub tier_index: Option<u32>,
    /// Remainder discarded by the bonus division.
    pub remainder: u128,
}

impl SaleSchedule<'_> {
    /// `10^precision`.
    pub fn precision_scale(&self) -> Result<i128, ContractError> {
        pow10(self.config.precision)
            .and_then(|scale| i128::try_from(scale).ok())
            .ok_or(ContractError::PrecisionOutOfRange)
    }

    /// Highest tier whose threshold does not exceed `amount`.
    pub fn volume_multiplier(
        &self,
        amount: i128,
    ) -> Result<Option<(u32, VolumeMultiplier)>, ContractError> {
        if amount < 0 {
            return Err(ContractError::NegativeAmount);
        }
        let tiers = &self.config.volume_multipliers;
        for i in (0..tiers.len()).rev() {
            if let Some(tier) = tiers.get(i) {
                if tier.threshold <= amount {
                    return Ok(Some((i, tier)));
                }
            }
        }
        Ok(None)
    }

    /// Tier applied to a contribution in this phase, if any.
    fn applied_tier(
        &self,
        uses_volume_multiplier: bool,
        amount: Option<i128>,
    ) -> Result<Option<(u32, VolumeMultiplier)>, ContractError> {
        match amount {
            Some(amount) if amount < 0 => Err(ContractError::NegativeAmount),
            Some(amount) if uses_volume_multiplier => self.volume_multiplier(amount),
            _ => Ok(None),
        }
    }

    pub fn resolve_rate(
        &self,
        phase_index: u32,
        amount: Option<i128>,
    ) -> Result<RateResolution, ContractError> {
        let phase = self.phase(phase_index)?;
        let Some((tier_index, tier)) =
            self.applied_tier(phase.uses_volume_multiplier, amount)?
        else {
            return Ok(RateResolution {
                phase_rate: phase.rate,
                rate: phase.rate,
                tier_index: None,
                remainder: 0,
            });
        };

        let base = non_negative(phase.rate).ok_or(ContractError::NegativeRate)?;
        let bonus_rate = non_negative(tier.rate).ok_or(ContractError::NegativeRate)?;
        let scale = non_negative(self.precision_scale()?)
            .ok_or(ContractError::PrecisionOutOfRange)?;
        let bonus = mul_div_floor(self.env, base, bonus_rate, scale)
            .ok_or(ContractError::ArithmeticOverflow)?;
        let bonus_value =
            i128::try_from(bonus.quotient).map_err(|_| ContractError::ArithmeticOverflow)?;

        Ok(RateResolution {
            phase_rate: phase.rate,
            rate: phase
                .rate
                .checked_add(bonus_value)
                .ok_or(ContractError::ArithmeticOverflow)?,
            tier_index: Some(tier_index),
            remainder: bonus.remainder,
        })
    }

    pub fn rate(&self, phase_index: u32, amount: Option<i128>) -> Result<i128, ContractError> {
        Ok(self.resolve_rate(phase_index, amount)?.rate)
    }

    /// Rate of a presale phase; `phase_index` must lie before the public sale.
    pub fn presale_rate(
        &self,
        phase_index: u32,
        amount: Option<i128>,
    ) -> Result<RateResolution, ContractError> {
        if phase_index >= self.publicsale_start_index()? {
            return Err(ContractError::PhaseOutOfRange);
        }
        self.resolve_rate(phase_index, amount)
    }

    /// Rate of a public-sale phase indexed from the first public phase.
    pub fn publicsale_rate(
        &self,
        relative_index: u32,
        amount: Option<i128>,
    ) -> Result<RateResolution, ContractError> {
        let index = self
            .publicsale_start_index()?
            .checked_add(relative_index)
            .ok_or(ContractError::PhaseOutOfRange)?;
        self.resolve_rate(index, amount)
    }

    /// Phase lock-up plus the extension of the tier `rate` would apply.
    pub fn lockup_period(
        &self,
        phase_index: u32,
        amount: Option<i128>,
    ) -> Result<u64, ContractError> {
        let phase = self.phase(phase_index)?;
        match self.applied_tier(phase.uses_volume_multiplier, amount)? {
            Some((_, tier)) => phase
                .lockup_period
                .checked_add(tier.lockup_period)
                .ok_or(ContractError::ArithmeticOverflow),
            None => Ok(phase.lockup_period),
        }
    }

    /// Bonus of a phase rate over `base_rate`, in `10^precision` units.
    pub fn phase_bonus(&self, phase_index: u32) -> Result<i128, ContractError> {
        let phase = self.phase(phase_index)?;
        if phase.rate == 0 {
            return Err(ContractError::PhaseNotPurchasable);
        }
        let base = self.config.base_rate;
        let scale = self.precision_scale()?;
        phase
            .rate
            .checked_sub(base)
            .and_then(|delta| delta.checked_mul(scale))
            .and_then(|scaled| scaled.checked_div(base))
            .ok_or(ContractError::ArithmeticOverflow)
    }
}
