//! Worst Fit placement
//!
//! One full pass over the pool, keeping the largest run that fits. Ties
//! keep the first (lowest-index) maximal run found: a candidate only
//! replaces the current choice when it is strictly larger.

use super::{PlacementStrategy, PolicyKind, RunSearch};
use crate::models::JobId;

/// Worst Fit: maximal sufficient run in a single full scan.
pub struct WorstFitPolicy;

impl PlacementStrategy for WorstFitPolicy {
    fn kind(&self) -> PolicyKind {
        PolicyKind::WorstFit
    }

    fn find_run(&mut self, units: &[Option<JobId>], required_units: usize) -> RunSearch {
        let mut inspected = 0u64;
        let mut worst: Option<(usize, usize)> = None; // (start, length)
        let mut start = 0usize;
        let mut length = 0usize;

        for (i, unit) in units.iter().enumerate() {
            inspected += 1;

            if unit.is_none() {
                if length == 0 {
                    start = i;
                }
                length += 1;
            } else {
                if length >= required_units && worst.map_or(true, |(_, wl)| length > wl) {
                    worst = Some((start, length));
                }
                length = 0;
            }
        }

        // a free run reaching the final unit has no closing occupied unit
        if length >= required_units && worst.map_or(true, |(_, wl)| length > wl) {
            worst = Some((start, length));
        }

        RunSearch {
            start: worst.map(|(s, _)| s),
            units_inspected: inspected,
        }
    }
}
