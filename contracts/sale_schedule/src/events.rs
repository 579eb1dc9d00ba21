#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env, Symbol};

use crate::errors::ErrorContext;

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the configuration is bound.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub precision: u32,
    pub phases: u32,
    pub volume_multipliers: u32,
    pub stakeholders: u32,
    pub timestamp: u64,
}

/// Fired when an integer division discards a remainder.
///
/// `operation` is `RATE` for a volume bonus blend and `TOKENS` for a token
/// value conversion. `result` is the value returned to the caller.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PrecisionLossEvent {
    pub operation: Symbol,
    pub rate: i128,
    pub amount: i128,
    pub result: i128,
    pub remainder: u128,
    pub timestamp: u64,
}

pub const OP_RATE: Symbol = symbol_short!("RATE");
pub const OP_TOKENS: Symbol = symbol_short!("TOKENS");

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(
    env: &Env,
    admin: Address,
    precision: u32,
    phases: u32,
    volume_multipliers: u32,
    stakeholders: u32,
) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            admin,
            precision,
            phases,
            volume_multipliers,
            stakeholders,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_precision_loss(
    env: &Env,
    operation: Symbol,
    rate: i128,
    amount: i128,
    result: i128,
    remainder: u128,
) {
    env.events().publish(
        (symbol_short!("PREC_LOSS"), operation.clone()),
        PrecisionLossEvent {
            operation,
            rate,
            amount,
            result,
            remainder,
            timestamp: env.ledger().timestamp(),
        },
    );
}

/// Publishes an error event for monitoring and indexing.
pub fn publish_error(env: &Env, error_code: u32, context: ErrorContext) {
    let topics = (
        symbol_short!("ERROR"),
        context.category.clone(),
        context.severity.clone(),
    );
    let data = (
        error_code,
        context.message,
        context.table,
        context.index,
        context.timestamp,
    );
    env.events().publish(topics, data);
}
