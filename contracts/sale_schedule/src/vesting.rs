//! Stakeholder allocation release schedules.

use common::math::{mul_div_floor, non_negative};
use soroban_sdk::{contracttype, Vec};

use crate::config::{Stakeholder, RELEASE_PERCENTAGE_TOTAL};
use crate::errors::ContractError;
use crate::SaleSchedule;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReleaseCheckpoint {
    /// Basis points of the allocation.
    pub percentage: u32,
    pub amount: i128,
    pub release_at: u64,
}

impl SaleSchedule<'_> {
    pub fn vesting_schedule(
        &self,
        stakeholder_index: u32,
    ) -> Result<Vec<ReleaseCheckpoint>, ContractError> {
        self.expand(&self.stakeholder(stakeholder_index)?)
    }

    /// Split an allocation across the release phases.
    ///
    /// Checkpoints are dated from the public-sale start, or all at the fixed
    /// release date when the stakeholder overrides it. The last checkpoint
    /// takes whatever truncation left over, so amounts sum to the allocation.
    pub fn expand(
        &self,
        stakeholder: &Stakeholder,
    ) -> Result<Vec<ReleaseCheckpoint>, ContractError> {
        let releases = &self.config.stakes.token_release_phases;
        let allocation =
            non_negative(stakeholder.tokens).ok_or(ContractError::NegativeAllocation)?;
        let start = self.config.publicsale.start;

        let mut checkpoints = Vec::new(self.env);
        let mut distributed: u128 = 0;
        for (i, release) in releases.iter().enumerate() {
            let amount = if i as u32 + 1 == releases.len() {
                allocation - distributed
            } else {
                mul_div_floor(
                    self.env,
                    allocation,
                    release.percentage as u128,
                    RELEASE_PERCENTAGE_TOTAL as u128,
                )
                .ok_or(ContractError::ArithmeticOverflow)?
                .quotient
            };
            distributed = distributed
                .checked_add(amount)
                .filter(|total| *total <= allocation)
                .ok_or(ContractError::ArithmeticOverflow)?;

            let release_at = if stakeholder.overwrite_release_date {
                stakeholder.fixed_release_date
            } else {
                start
                    .checked_add(release.vesting_period)
                    .ok_or(ContractError::ArithmeticOverflow)?
            };
            checkpoints.push_back(ReleaseCheckpoint {
                percentage: release.percentage,
                amount: i128::try_from(amount).map_err(|_| ContractError::ArithmeticOverflow)?,
                release_at,
            });
        }
        Ok(checkpoints)
    }

    /// Tokens a stakeholder has had released by `timestamp`.
    pub fn released_at(
        &self,
        stakeholder_index: u32,
        timestamp: u64,
    ) -> Result<i128, ContractError> {
        self.vesting_schedule(stakeholder_index)?
            .iter()
            .filter(|checkpoint| checkpoint.release_at <= timestamp)
            .try_fold(0i128, |total, checkpoint| {
                total
                    .checked_add(checkpoint.amount)
                    .ok_or(ContractError::ArithmeticOverflow)
            })
    }
}
