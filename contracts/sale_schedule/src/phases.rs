//! Phase table segmentation.
//!
//! The presale is every phase before the first positive-rate phase at index
//! 1 or later; the public sale is that phase and everything after it. A
//! zero-rate phase closing the presale is the transition (break) phase.

use soroban_sdk::Vec;

use crate::config::{Phase, SaleWindow};
use crate::errors::ContractError;
use crate::SaleSchedule;

impl SaleSchedule<'_> {
    /// Bounds-checked phase lookup.
    pub fn phase(&self, index: u32) -> Result<Phase, ContractError> {
        self.config
            .phases
            .get(index)
            .ok_or(ContractError::PhaseOutOfRange)
    }

    pub fn presale_start_index(&self) -> u32 {
        0
    }

    /// First index `i >= 1` whose rate is positive.
    pub fn publicsale_start_index(&self) -> Result<u32, ContractError> {
        if self.config.phases.is_empty() {
            return Err(ContractError::EmptyPhaseTable);
        }
        for i in 1..self.config.phases.len() {
            if let Some(phase) = self.config.phases.get(i) {
                if phase.rate > 0 {
                    return Ok(i);
                }
            }
        }
        Err(ContractError::NoPublicSalePhase)
    }

    pub fn presale_phases(&self) -> Result<Vec<Phase>, ContractError> {
        let start = self.publicsale_start_index()?;
        Ok(self.config.phases.slice(0..start))
    }

    pub fn publicsale_phases(&self) -> Result<Vec<Phase>, ContractError> {
        let start = self.publicsale_start_index()?;
        Ok(self.config.phases.slice(start..))
    }

    pub fn presale_starting_phase(&self) -> Result<Phase, ContractError> {
        self.phase(self.presale_start_index())
    }

    pub fn publicsale_starting_phase(&self) -> Result<Phase, ContractError> {
        self.phase(self.publicsale_start_index()?)
    }

    /// The last presale phase when it is a zero-rate break.
    pub fn transition_phase(&self) -> Result<Option<Phase>, ContractError> {
        let presale = self.presale_phases()?;
        Ok(presale.last().filter(|phase| phase.rate == 0))
    }

    pub fn has_transition_phase(&self) -> Result<bool, ContractError> {
        Ok(self.transition_phase()?.is_some())
    }

    pub fn presale_duration(&self) -> Result<u64, ContractError> {
        total_duration(&self.presale_phases()?)
    }

    pub fn publicsale_duration(&self) -> Result<u64, ContractError> {
        total_duration(&self.publicsale_phases()?)
    }

    /// Index of the phase covering `timestamp`, if any.
    ///
    /// Presale phases run back to back from `presale.start` and public phases
    /// from `publicsale.start`. Each phase covers `[begin, begin + duration)`.
    pub fn phase_at(&self, timestamp: u64) -> Result<Option<u32>, ContractError> {
        let start_index = self.publicsale_start_index()?;
        let presale = locate(
            &self.config.phases.slice(0..start_index),
            self.config.presale.start,
            timestamp,
        );
        if let Some(offset) = presale {
            return Ok(Some(offset));
        }
        let public = locate(
            &self.config.phases.slice(start_index..),
            self.config.publicsale.start,
            timestamp,
        );
        Ok(public.map(|offset| start_index + offset))
    }

    /// The presale or public-sale window a phase belongs to.
    pub fn window_for(&self, phase_index: u32) -> Result<&SaleWindow, ContractError> {
        if phase_index >= self.config.phases.len() {
            return Err(ContractError::PhaseOutOfRange);
        }
        if phase_index < self.publicsale_start_index()? {
            Ok(&self.config.presale)
        } else {
            Ok(&self.config.publicsale)
        }
    }
}

fn total_duration(phases: &Vec<Phase>) -> Result<u64, ContractError> {
    phases.iter().try_fold(0u64, |acc, phase| {
        acc.checked_add(phase.duration)
            .ok_or(ContractError::ArithmeticOverflow)
    })
}

/// Offset of the phase in `phases` covering `timestamp` when the first phase
/// begins at `begin`.
fn locate(phases: &Vec<Phase>, begin: u64, timestamp: u64) -> Option<u32> {
    if timestamp < begin {
        return None;
    }
    let mut end = begin;
    for (i, phase) in phases.iter().enumerate() {
        end = end.saturating_add(phase.duration);
        if timestamp < end {
            return Some(i as u32);
        }
    }
    None
}
