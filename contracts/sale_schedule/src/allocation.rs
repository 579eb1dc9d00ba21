//! Contribution to token conversion.

use common::math::{mul_div_floor, non_negative, pow10};
use common::units::ETHER_DECIMALS;
use soroban_sdk::{contracttype, Env};

use crate::errors::ContractError;
use crate::SaleSchedule;

/// Tokens bought, in the token's smallest units.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct TokenValue {
    pub tokens: i128,
    /// Remainder discarded by the conversion.
    pub remainder: u128,
}

/// Price of a contribution made at a point in time.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Quote {
    pub phase_index: u32,
    pub rate: i128,
    pub tokens: i128,
    /// Earliest time the tokens unlock.
    pub lockup_until: u64,
}

/// A quote plus the remainders its two divisions discarded.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PricedContribution {
    pub quote: Quote,
    pub rate_remainder: u128,
    pub token_remainder: u128,
}

/// `amount * rate * 10^token_decimals / 10^18`, rounded toward zero.
///
/// `amount` is in smallest base-currency units and `rate` is tokens per whole
/// unit. The shared factor of ten is cancelled up front, so the conversion is
/// a single `amount * rate / 10^(18 - token_decimals)`.
pub fn token_value(
    env: &Env,
    rate: i128,
    amount: i128,
    token_decimals: u32,
) -> Result<TokenValue, ContractError> {
    if token_decimals > ETHER_DECIMALS {
        return Err(ContractError::TokenDecimalsOutOfRange);
    }
    let rate = non_negative(rate).ok_or(ContractError::NegativeRate)?;
    let amount = non_negative(amount).ok_or(ContractError::NegativeAmount)?;
    let divisor =
        pow10(ETHER_DECIMALS - token_decimals).ok_or(ContractError::ArithmeticOverflow)?;

    let value =
        mul_div_floor(env, amount, rate, divisor).ok_or(ContractError::ArithmeticOverflow)?;
    Ok(TokenValue {
        tokens: i128::try_from(value.quotient).map_err(|_| ContractError::ArithmeticOverflow)?,
        remainder: value.remainder,
    })
}

impl SaleSchedule<'_> {
    /// Price `amount` contributed at `timestamp`.
    pub fn quote(
        &self,
        timestamp: u64,
        amount: i128,
        token_decimals: u32,
    ) -> Result<PricedContribution, ContractError> {
        if amount < 0 {
            return Err(ContractError::NegativeAmount);
        }
        let phase_index = self
            .phase_at(timestamp)?
            .ok_or(ContractError::NoActivePhase)?;
        if self.phase(phase_index)?.rate == 0 {
            return Err(ContractError::PhaseNotPurchasable);
        }
        if amount < self.window_for(phase_index)?.min_contribution {
            return Err(ContractError::BelowMinimumContribution);
        }

        let rate = self.resolve_rate(phase_index, Some(amount))?;
        let value = token_value(self.env, rate.rate, amount, token_decimals)?;
        let lockup_until = timestamp
            .checked_add(self.lockup_period(phase_index, Some(amount))?)
            .ok_or(ContractError::ArithmeticOverflow)?;

        Ok(PricedContribution {
            quote: Quote {
                phase_index,
                rate: rate.rate,
                tokens: value.tokens,
                lockup_until,
            },
            rate_remainder: rate.remainder,
            token_remainder: value.remainder,
        })
    }

    /// Base currency owed to a stakeholder out of `total_raised`.
    pub fn eth_entitlement(
        &self,
        stakeholder_index: u32,
        total_raised: i128,
    ) -> Result<i128, ContractError> {
        let raised = non_negative(total_raised).ok_or(ContractError::NegativeAmount)?;
        let share = non_negative(self.stakeholder(stakeholder_index)?.eth)
            .ok_or(ContractError::NegativeAllocation)?;
        let scale = non_negative(self.precision_scale()?)
            .ok_or(ContractError::PrecisionOutOfRange)?;

        let owed = mul_div_floor(self.env, raised, share, scale)
            .ok_or(ContractError::ArithmeticOverflow)?;
        i128::try_from(owed.quotient).map_err(|_| ContractError::ArithmeticOverflow)
    }
}
