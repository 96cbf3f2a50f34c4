//! Next Fit placement
//!
//! Like First Fit, but the search resumes where the previous successful
//! allocation ended instead of restarting at unit 0. The cursor wraps around
//! the end of the pool; a search never inspects more than pool-size units.
//!
//! The pool boundary is also a run boundary: a free stretch at the end of
//! the pool and one at the start are two separate runs, not one.

use super::{PlacementStrategy, PolicyKind, RunSearch};
use crate::models::JobId;

/// Next Fit: first sufficient run from a roving cursor.
pub struct NextFitPolicy {
    /// Unit index the next search starts from
    cursor: usize,
}

impl NextFitPolicy {
    pub fn new() -> Self {
        Self { cursor: 0 }
    }

    /// Where the next search will start.
    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

impl Default for NextFitPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl PlacementStrategy for NextFitPolicy {
    fn kind(&self) -> PolicyKind {
        PolicyKind::NextFit
    }

    fn find_run(&mut self, units: &[Option<JobId>], required_units: usize) -> RunSearch {
        let pool_size = units.len();
        let mut inspected = 0u64;

        if pool_size == 0 {
            return RunSearch {
                start: None,
                units_inspected: inspected,
            };
        }

        let mut examined = 0usize;
        let mut index = self.cursor;
        let mut start = 0usize;
        let mut length = 0usize;

        while examined < pool_size {
            let real_index = index % pool_size;

            // wrapping back to unit 0 ends any run in progress
            if real_index == 0 && examined > 0 {
                length = 0;
            }

            inspected += 1;

            if units[real_index].is_none() {
                if length == 0 {
                    start = real_index;
                }
                length += 1;

                if length >= required_units {
                    self.cursor = (start + required_units) % pool_size;
                    return RunSearch {
                        start: Some(start),
                        units_inspected: inspected,
                    };
                }
            } else {
                length = 0;
            }

            examined += 1;
            index += 1;
        }

        RunSearch {
            start: None,
            units_inspected: inspected,
        }
    }

    fn reset(&mut self) {
        self.cursor = 0;
    }
}
