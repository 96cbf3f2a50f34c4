//! Placement Policy Module
//!
//! This module defines the placement interface the pool allocator searches
//! through, plus the four classic strategies being compared:
//!
//! 1. **First Fit**: first sufficient run from the bottom of the pool
//! 2. **Next Fit**: first sufficient run from a roving cursor, wrapping once
//! 3. **Best Fit**: tightest sufficient run in a full pass
//! 4. **Worst Fit**: largest sufficient run in a full pass
//!
//! All strategies operate on the same unit array (`None` = free unit) and
//! report how many units the search inspected; the allocator turns that
//! into its operation counter, the cost metric the final report compares.
//!
//! A "run" is a maximal contiguous sequence of free units. Runs do not wrap
//! across the pool boundary.

use crate::models::JobId;

pub mod best_fit;
pub mod first_fit;
pub mod next_fit;
pub mod worst_fit;

pub use best_fit::BestFitPolicy;
pub use first_fit::FirstFitPolicy;
pub use next_fit::NextFitPolicy;
pub use worst_fit::WorstFitPolicy;

use serde::{Deserialize, Serialize};

/// Outcome of one placement search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSearch {
    /// Start unit of the chosen run, `None` when no sufficient run exists
    pub start: Option<usize>,

    /// Units the search looked at, successful or not
    pub units_inspected: u64,
}

/// A placement search strategy over the pool's unit array.
///
/// Implementations must inspect units in their defining order and count
/// every unit inspected. Only Next Fit carries state (its cursor), reset by
/// [`reset`](PlacementStrategy::reset) when the allocator is reconfigured.
pub trait PlacementStrategy {
    /// Which policy this strategy implements.
    fn kind(&self) -> PolicyKind;

    /// Search for a free run of at least `required_units` units.
    fn find_run(&mut self, units: &[Option<JobId>], required_units: usize) -> RunSearch;

    /// Clear any search state carried between calls.
    fn reset(&mut self) {}
}

/// Selector for the four placement policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PolicyKind {
    FirstFit,
    NextFit,
    BestFit,
    WorstFit,
}

impl PolicyKind {
    /// All policies in the fixed dispatch order of the simulation.
    pub const ALL: [PolicyKind; 4] = [
        PolicyKind::FirstFit,
        PolicyKind::NextFit,
        PolicyKind::BestFit,
        PolicyKind::WorstFit,
    ];

    /// Full display name.
    pub fn name(&self) -> &'static str {
        match self {
            PolicyKind::FirstFit => "First Fit",
            PolicyKind::NextFit => "Next Fit",
            PolicyKind::BestFit => "Best Fit",
            PolicyKind::WorstFit => "Worst Fit",
        }
    }

    /// Short code used in summary rows and table columns.
    pub fn code(&self) -> &'static str {
        match self {
            PolicyKind::FirstFit => "FF",
            PolicyKind::NextFit => "NF",
            PolicyKind::BestFit => "BF",
            PolicyKind::WorstFit => "WF",
        }
    }

    /// Build the strategy implementing this policy.
    pub fn strategy(&self) -> Box<dyn PlacementStrategy> {
        match self {
            PolicyKind::FirstFit => Box::new(FirstFitPolicy),
            PolicyKind::NextFit => Box::new(NextFitPolicy::new()),
            PolicyKind::BestFit => Box::new(BestFitPolicy),
            PolicyKind::WorstFit => Box::new(WorstFitPolicy),
        }
    }
}
