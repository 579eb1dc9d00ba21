use soroban_sdk::Env;

use crate::config::SaleConfig;

/// Read-only calculation context over one bound configuration.
///
/// Phase segmentation, rate resolution, allocation and vesting are all
/// methods on this type (see `phases`, `rates`, `allocation`,
/// `stakeholders` and `vesting`). It never mutates the configuration, so any
/// number of contexts may borrow the same snapshot.
#[derive(Clone, Copy)]
pub struct SaleSchedule<'a> {
    pub(crate) env: &'a Env,
    pub(crate) config: &'a SaleConfig,
}

impl<'a> SaleSchedule<'a> {
    pub fn new(env: &'a Env, config: &'a SaleConfig) -> Self {
        Self { env, config }
    }

    pub fn config(&self) -> &'a SaleConfig {
        self.config
    }

    /// True when contributors must be pre-authenticated by the caller.
    pub fn uses_authentication(&self) -> bool {
        self.config.authentication.whitelist.is_some()
    }
}
