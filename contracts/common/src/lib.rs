//! Shared helpers for the sale schedule contracts.
//!
//! This crate provides:
//! - [`units`]: denomination and duration value objects that resolve
//!   human-readable literals such as `500 ether` or `16 days` to the canonical
//!   integers stored on-chain.
//! - [`math`]: exact multiply-then-divide on 256-bit host integers and
//!   power-of-ten helpers for fixed-point scales.
//!
//! Nothing here touches contract storage, so every helper can be used from
//! off-chain tooling as well as from inside a contract invocation.

#![no_std]

// ── Modules ──────────────────────────────────────────────────────────────────

pub mod math;
pub mod units;

pub use math::*;
pub use units::*;
