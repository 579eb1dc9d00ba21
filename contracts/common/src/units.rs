//! Currency and duration value objects.
//!
//! Sale configurations are written with literals like `[500, 'finney']` or
//! `[30, 'days']`. Each literal becomes a `(magnitude, unit)` pair that is
//! resolved exactly once, with checked arithmetic, to the smallest-unit
//! integer the contract works with.

/// Number of decimals of one whole base-currency unit.
pub const ETHER_DECIMALS: u32 = 18;

/// Smallest units per one whole base-currency unit.
pub const WEI_PER_ETHER: i128 = 1_000_000_000_000_000_000;

pub const SECONDS_PER_MINUTE: u64 = 60;
pub const SECONDS_PER_HOUR: u64 = 3_600;
pub const SECONDS_PER_DAY: u64 = 86_400;
pub const SECONDS_PER_WEEK: u64 = 604_800;
pub const SECONDS_PER_YEAR: u64 = 31_536_000;

// ── Currency ─────────────────────────────────────────────────────────────────

/// Base-currency denominations, from the smallest unit up to a whole unit.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Denomination {
    Wei,
    Kwei,
    Mwei,
    Gwei,
    Szabo,
    Finney,
    Ether,
}

impl Denomination {
    /// Power of ten separating this denomination from `Wei`.
    pub fn decimals(&self) -> u32 {
        match self {
            Denomination::Wei => 0,
            Denomination::Kwei => 3,
            Denomination::Mwei => 6,
            Denomination::Gwei => 9,
            Denomination::Szabo => 12,
            Denomination::Finney => 15,
            Denomination::Ether => ETHER_DECIMALS,
        }
    }

    /// Smallest units per one unit of this denomination.
    pub fn wei_factor(&self) -> i128 {
        // 10^18 at most, always representable.
        10i128.pow(self.decimals())
    }
}

/// A currency amount as written in configuration, e.g. `500 finney`.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct CurrencyValue {
    pub magnitude: i128,
    pub unit: Denomination,
}

impl CurrencyValue {
    pub fn new(magnitude: i128, unit: Denomination) -> Self {
        Self { magnitude, unit }
    }

    /// Resolve to smallest units. `None` when the product overflows `i128`.
    pub fn to_smallest_unit(&self) -> Option<i128> {
        self.magnitude.checked_mul(self.unit.wei_factor())
    }
}

// ── Durations ────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum TimeUnit {
    Seconds,
    Minutes,
    Hours,
    Days,
    Weeks,
    /// 365 days.
    Years,
}

impl TimeUnit {
    pub fn seconds(&self) -> u64 {
        match self {
            TimeUnit::Seconds => 1,
            TimeUnit::Minutes => SECONDS_PER_MINUTE,
            TimeUnit::Hours => SECONDS_PER_HOUR,
            TimeUnit::Days => SECONDS_PER_DAY,
            TimeUnit::Weeks => SECONDS_PER_WEEK,
            TimeUnit::Years => SECONDS_PER_YEAR,
        }
    }
}

/// A time span as written in configuration, e.g. `16 days`.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct DurationValue {
    pub magnitude: u64,
    pub unit: TimeUnit,
}

impl DurationValue {
    pub fn new(magnitude: u64, unit: TimeUnit) -> Self {
        Self { magnitude, unit }
    }

    /// Resolve to seconds. `None` on overflow.
    pub fn to_seconds(&self) -> Option<u64> {
        self.magnitude.checked_mul(self.unit.seconds())
    }
}
