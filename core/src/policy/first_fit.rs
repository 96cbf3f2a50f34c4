//! First Fit placement
//!
//! Scans from unit 0 and takes the first free run long enough for the
//! request. The baseline the other policies are compared against.

use super::{PlacementStrategy, PolicyKind, RunSearch};
use crate::models::JobId;

/// First Fit: first sufficient run from the bottom of the pool.
pub struct FirstFitPolicy;

impl PlacementStrategy for FirstFitPolicy {
    fn kind(&self) -> PolicyKind {
        PolicyKind::FirstFit
    }

    fn find_run(&mut self, units: &[Option<JobId>], required_units: usize) -> RunSearch {
        let mut inspected = 0u64;
        let mut start = 0usize;
        let mut length = 0usize;

        for (i, unit) in units.iter().enumerate() {
            inspected += 1;

            if unit.is_none() {
                if length == 0 {
                    start = i;
                }
                length += 1;

                if length >= required_units {
                    return RunSearch {
                        start: Some(start),
                        units_inspected: inspected,
                    };
                }
            } else {
                length = 0;
            }
        }

        RunSearch {
            start: None,
            units_inspected: inspected,
        }
    }
}
