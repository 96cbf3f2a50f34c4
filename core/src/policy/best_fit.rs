//! Best Fit placement
//!
//! One full pass over the pool, keeping the tightest run that still fits.
//! Ties keep the first (lowest-index) minimal run found: a candidate only
//! replaces the current best when it is strictly smaller.

use super::{PlacementStrategy, PolicyKind, RunSearch};
use crate::models::JobId;

/// Best Fit: minimal sufficient run in a single full scan.
pub struct BestFitPolicy;

impl PlacementStrategy for BestFitPolicy {
    fn kind(&self) -> PolicyKind {
        PolicyKind::BestFit
    }

    fn find_run(&mut self, units: &[Option<JobId>], required_units: usize) -> RunSearch {
        let mut inspected = 0u64;
        let mut best: Option<(usize, usize)> = None; // (start, length)
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
                if length >= required_units && best.map_or(true, |(_, bl)| length < bl) {
                    best = Some((start, length));
                }
                length = 0;
            }
        }

        // a free run reaching the final unit has no closing occupied unit
        if length >= required_units && best.map_or(true, |(_, bl)| length < bl) {
            best = Some((start, length));
        }

        RunSearch {
            start: best.map(|(s, _)| s),
            units_inspected: inspected,
        }
    }
}
