use soroban_sdk::{contracttype, Vec};

use crate::config::{Stakeholder, StakeholderAccount};
use crate::errors::ContractError;
use crate::SaleSchedule;

/// Conjunctive stakeholder query. `None` fields do not constrain.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct StakeholderFilter {
    /// `Some(true)` keeps stakeholders with a token allocation, `Some(false)`
    /// those without.
    pub tokens: Option<bool>,
    /// Same as `tokens`, on the base-currency share.
    pub eth: Option<bool>,
    /// `Some(true)` keeps stakeholders bound to an account.
    pub contract: Option<bool>,
    pub overwrite_release_date: Option<bool>,
}

impl StakeholderFilter {
    pub fn matches(&self, stakeholder: &Stakeholder) -> bool {
        let has_account = matches!(stakeholder.account, StakeholderAccount::Identity(_));
        accepts(self.tokens, stakeholder.tokens > 0)
            && accepts(self.eth, stakeholder.eth > 0)
            && accepts(self.contract, has_account)
            && accepts(
                self.overwrite_release_date,
                stakeholder.overwrite_release_date,
            )
    }
}

fn accepts(wanted: Option<bool>, actual: bool) -> bool {
    wanted.map_or(true, |w| w == actual)
}

impl SaleSchedule<'_> {
    /// Stakeholders matching `filter`, in table order.
    pub fn select_stakeholders(&self, filter: &StakeholderFilter) -> Vec<Stakeholder> {
        let mut selected = Vec::new(self.env);
        for stakeholder in self.config.stakes.stakeholders.iter() {
            if filter.matches(&stakeholder) {
                selected.push_back(stakeholder);
            }
        }
        selected
    }

    pub fn stakeholder(&self, index: u32) -> Result<Stakeholder, ContractError> {
        self.config
            .stakes
            .stakeholders
            .get(index)
            .ok_or(ContractError::StakeholderOutOfRange)
    }

    /// Account of the first stakeholder, which receives raised funds.
    pub fn beneficiary(&self) -> Result<StakeholderAccount, ContractError> {
        Ok(self.stakeholder(0)?.account)
    }
}
