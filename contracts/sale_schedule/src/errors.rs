use soroban_sdk::{contracttype, Env, String};

use crate::events;

/// Error categories, one per code range of [`ContractError`].
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ErrorCategory {
    /// Initialisation order problems.
    Lifecycle = 1,
    /// Malformed phase, tier, stakeholder or release tables.
    Configuration = 2,
    /// Out-of-range index or negative amount supplied by the caller.
    InvalidArgument = 3,
    /// A result does not fit the integer width of the interface.
    Arithmetic = 4,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ErrorSeverity {
    Low = 1,
    Medium = 2,
    /// The bound configuration cannot be used.
    Critical = 3,
}

/// Which configuration table an error refers to.
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ConfigTable {
    /// The failure is not tied to a configuration table.
    Unspecified = 0,
    Settings = 1,
    Phases = 2,
    VolumeMultipliers = 3,
    SaleWindows = 4,
    Stakeholders = 5,
    ReleasePhases = 6,
}

/// Published alongside every reported failure.
#[contracttype]
#[derive(Clone, Debug)]
pub struct ErrorContext {
    pub category: ErrorCategory,
    pub severity: ErrorSeverity,
    pub message: String,
    pub table: ConfigTable,
    pub index: Option<u32>,
    pub timestamp: u64,
}

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    // ── Lifecycle (1–9) ──────────────────────────────────────
    NotInitialized = 1,
    AlreadyInitialized = 2,

    // ── Configuration (10–29) ────────────────────────────────
    EmptyPhaseTable = 10,
    NoPublicSalePhase = 11,
    NegativeRate = 12,
    NonPositiveThreshold = 13,
    ThresholdsNotIncreasing = 14,
    ReleasePercentagesInvalid = 15,
    PrecisionOutOfRange = 16,
    InvalidBaseRate = 17,
    InvalidSaleWindow = 18,
    NegativeAllocation = 19,
    EthSharesExceedScale = 20,

    // ── Invalid argument (30–49) ─────────────────────────────
    PhaseOutOfRange = 30,
    NegativeAmount = 31,
    StakeholderOutOfRange = 32,
    TokenDecimalsOutOfRange = 33,
    NoActivePhase = 34,
    PhaseNotPurchasable = 35,
    BelowMinimumContribution = 36,

    // ── Arithmetic (50–59) ───────────────────────────────────
    ArithmeticOverflow = 50,
}

impl ContractError {
    pub fn category(&self) -> ErrorCategory {
        match *self as u32 {
            1..=9 => ErrorCategory::Lifecycle,
            10..=29 => ErrorCategory::Configuration,
            30..=49 => ErrorCategory::InvalidArgument,
            _ => ErrorCategory::Arithmetic,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::Critical,
            ErrorCategory::Lifecycle | ErrorCategory::Arithmetic => ErrorSeverity::Medium,
            ErrorCategory::InvalidArgument => ErrorSeverity::Low,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ContractError::NotInitialized => "Sale schedule has not been initialized",
            ContractError::AlreadyInitialized => "Sale schedule is already initialized",
            ContractError::EmptyPhaseTable => "Phase table is empty",
            ContractError::NoPublicSalePhase => "No positive-rate phase after the opening phase",
            ContractError::NegativeRate => "Rate must not be negative",
            ContractError::NonPositiveThreshold => "Volume threshold must be positive",
            ContractError::ThresholdsNotIncreasing => "Volume thresholds must strictly increase",
            ContractError::ReleasePercentagesInvalid => {
                "Release percentages must sum to 10000 basis points"
            }
            ContractError::PrecisionOutOfRange => "Precision exceeds 18 decimals",
            ContractError::InvalidBaseRate => "Base rate must be positive",
            ContractError::InvalidSaleWindow => "Sale window caps or start times are inconsistent",
            ContractError::NegativeAllocation => "Stakeholder allocation must not be negative",
            ContractError::EthSharesExceedScale => "Base-currency shares exceed the precision scale",
            ContractError::PhaseOutOfRange => "Phase index out of range",
            ContractError::NegativeAmount => "Amount must not be negative",
            ContractError::StakeholderOutOfRange => "Stakeholder index out of range",
            ContractError::TokenDecimalsOutOfRange => "Token decimals exceed 18",
            ContractError::NoActivePhase => "No sale phase is active at this time",
            ContractError::PhaseNotPurchasable => "Phase does not accept contributions",
            ContractError::BelowMinimumContribution => "Contribution below the accepted minimum",
            ContractError::ArithmeticOverflow => "Result does not fit in 128 bits",
        }
    }
}

/// A configuration defect and where it was found.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ConfigFault {
    pub error: ContractError,
    pub table: ConfigTable,
    pub index: Option<u32>,
}

impl ConfigFault {
    pub fn new(error: ContractError, table: ConfigTable, index: Option<u32>) -> Self {
        Self {
            error,
            table,
            index,
        }
    }
}

/// [`ConfigFault`] in a form that can cross the contract boundary.
///
/// Events of a failed invocation are discarded, so `initialize` can only
/// hand back the bare error code. `check_config` returns this instead.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConfigReport {
    /// [`ContractError`] code.
    pub code: u32,
    pub table: ConfigTable,
    pub index: Option<u32>,
}

impl From<ConfigFault> for ConfigReport {
    fn from(fault: ConfigFault) -> Self {
        Self {
            code: fault.error as u32,
            table: fault.table,
            index: fault.index,
        }
    }
}

pub fn create_error_context(
    env: &Env,
    error: ContractError,
    table: Option<ConfigTable>,
    index: Option<u32>,
) -> ErrorContext {
    ErrorContext {
        category: error.category(),
        severity: error.severity(),
        message: String::from_str(env, error.message()),
        table: table.unwrap_or(ConfigTable::Unspecified),
        index,
        timestamp: env.ledger().timestamp(),
    }
}

/// Publish an `ERROR` event for `error` and hand it back for propagation.
pub fn report(env: &Env, error: ContractError, index: Option<u32>) -> ContractError {
    let context = create_error_context(env, error, None, index);
    events::publish_error(env, error as u32, context);
    error
}

/// Publish an `ERROR` event for a configuration defect.
pub fn report_fault(env: &Env, fault: ConfigFault) -> ContractError {
    let context = create_error_context(env, fault.error, Some(fault.table), fault.index);
    events::publish_error(env, fault.error as u32, context);
    fault.error
}
