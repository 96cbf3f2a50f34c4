//! Fixed-pool region allocator
//!
//! One `PoolAllocator` owns a pool of equally sized units and satisfies
//! byte-sized requests by rounding them up to whole units and handing the
//! placement search to its [`PlacementStrategy`]. Four independent
//! instances exist per simulation run, one per policy, each with private
//! pool state.
//!
//! # Failure model
//!
//! Nothing in here returns an error. A request no run can satisfy returns
//! `None` and bumps the failed-allocation counter; freeing a location with
//! no matching active record does nothing; configuring a zero unit size
//! leaves the allocator inert (every allocation returns `None` with no side
//! effects). A long synthetic run always completes.

use crate::models::JobId;
use crate::policy::{PlacementStrategy, PolicyKind};

/// Bookkeeping entry for one allocation.
///
/// Records are deactivated on free, never removed, so the sum of requested
/// bytes over active records stays queryable until the next `configure`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationRecord {
    /// First unit of the allocated run
    pub start_unit: usize,

    /// Units reserved for the request
    pub unit_count: usize,

    /// Bytes actually asked for (before rounding up to whole units)
    pub requested_bytes: u64,

    /// Job the allocation was attributed to
    pub owner: Option<JobId>,

    /// False once the record has been freed
    pub active: bool,
}

/// Pure snapshot of pool usage, all O(pool size) scans.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UsageMetrics {
    /// Pool capacity in bytes
    pub total_bytes: u64,

    /// Bytes covered by occupied units
    pub allocated_bytes: u64,

    /// Bytes covered by free units
    pub free_bytes: u64,

    /// Sum of requested bytes over active records
    pub required_bytes: u64,

    /// Number of maximal free runs
    pub external_fragment_count: u64,

    /// Byte size of the largest free run (0 when the pool is full)
    pub largest_free_block_bytes: u64,

    /// Byte size of the smallest free run (0 when the pool is full)
    pub smallest_free_block_bytes: u64,
}

impl UsageMetrics {
    /// Percent of the pool occupied, integer arithmetic.
    pub fn percent_in_use(&self) -> u64 {
        if self.total_bytes == 0 {
            return 0;
        }
        100 * self.allocated_bytes / self.total_bytes
    }

    /// Percent of the pool free, integer arithmetic.
    pub fn percent_free(&self) -> u64 {
        if self.total_bytes == 0 {
            return 0;
        }
        100 * self.free_bytes / self.total_bytes
    }

    /// Percent of allocated bytes not backed by any request.
    ///
    /// Internal fragmentation is the rounding waste of whole-unit
    /// allocation; the delta is clamped at zero before dividing.
    pub fn percent_internal_fragmentation(&self) -> u64 {
        if self.allocated_bytes == 0 {
            return 0;
        }
        let waste = self.allocated_bytes.saturating_sub(self.required_bytes);
        100 * waste / self.allocated_bytes
    }
}

/// Operation counters accumulated since the last `configure`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OpCounters {
    /// Successful allocations
    pub allocations: u64,

    /// Units inspected across all placement searches
    pub allocation_operations: u64,

    /// Requests a search could not satisfy
    pub failed_allocations: u64,

    /// Free calls received (with a valid location)
    pub free_requests: u64,

    /// Allocation records inspected across all free calls
    pub free_operations: u64,
}

/// Fixed pool of equally sized units with one placement strategy.
pub struct PoolAllocator {
    /// Bytes per unit; 0 marks an inert allocator
    unit_size: u64,

    /// Per-unit owner tag; `None` = free
    units: Vec<Option<JobId>>,

    /// Every allocation ever made since the last configure
    records: Vec<AllocationRecord>,

    strategy: Box<dyn PlacementStrategy>,

    /// Owner attributed to the next successful allocation
    current_owner: Option<JobId>,

    counters: OpCounters,
}

impl PoolAllocator {
    /// Create an unconfigured (inert) allocator for the given policy.
    pub fn new(kind: PolicyKind) -> Self {
        Self {
            unit_size: 0,
            units: Vec::new(),
            records: Vec::new(),
            strategy: kind.strategy(),
            current_owner: None,
            counters: OpCounters::default(),
        }
    }

    /// Which placement policy this allocator runs.
    pub fn kind(&self) -> PolicyKind {
        self.strategy.kind()
    }

    /// Reset the pool to fully free and clear records, counters and any
    /// search cursor.
    ///
    /// A `unit_size` of zero leaves the allocator inert: the pool is still
    /// sized but every later [`allocate`](Self::allocate) returns `None`
    /// without side effects.
    pub fn configure(&mut self, unit_size: u64, unit_count: usize) {
        self.unit_size = unit_size;
        self.units.clear();
        self.units.resize(unit_count, None);
        self.records.clear();
        self.strategy.reset();
        self.counters = OpCounters::default();
    }

    /// Tag the owner attributed to the next successful allocation.
    pub fn set_current_owner(&mut self, job_id: JobId) {
        self.current_owner = Some(job_id);
    }

    /// Allocate `size_bytes`, rounded up to whole units.
    ///
    /// Returns the start unit of the placed run, or `None` when no
    /// sufficient run exists. Every unit the search inspected counts toward
    /// the allocation-operation counter, success or not.
    pub fn allocate(&mut self, size_bytes: u64) -> Option<usize> {
        if self.unit_size == 0 {
            return None;
        }

        let required_units = size_bytes.div_ceil(self.unit_size) as usize;
        let search = self.strategy.find_run(&self.units, required_units);
        self.counters.allocation_operations += search.units_inspected;

        match search.start {
            Some(start) => {
                let owner = self.current_owner;
                for unit in &mut self.units[start..start + required_units] {
                    *unit = owner;
                }
                self.records.push(AllocationRecord {
                    start_unit: start,
                    unit_count: required_units,
                    requested_bytes: size_bytes,
                    owner,
                    active: true,
                });
                self.counters.allocations += 1;
                Some(start)
            }
            None => {
                self.counters.failed_allocations += 1;
                None
            }
        }
    }

    /// Free the allocation that starts at `start_unit`.
    ///
    /// Records are scanned in insertion order; the first active record with
    /// a matching start is deactivated and its units freed. When no record
    /// matches the call does nothing (the request and the records inspected
    /// are still counted).
    pub fn free(&mut self, start_unit: usize) {
        self.counters.free_requests += 1;

        for i in 0..self.records.len() {
            self.counters.free_operations += 1;

            if self.records[i].active && self.records[i].start_unit == start_unit {
                let start = self.records[i].start_unit;
                let count = self.records[i].unit_count;
                for unit in &mut self.units[start..start + count] {
                    *unit = None;
                }
                self.records[i].active = false;
                break;
            }
        }
    }

    /// Snapshot pool usage.
    pub fn metrics(&self) -> UsageMetrics {
        let total_units = self.units.len() as u64;
        let free_units = self.units.iter().filter(|u| u.is_none()).count() as u64;
        let allocated_units = total_units - free_units;

        let required_bytes = self
            .records
            .iter()
            .filter(|r| r.active)
            .map(|r| r.requested_bytes)
            .sum();

        let mut fragment_count = 0u64;
        let mut largest_run = 0u64;
        let mut smallest_run = 0u64;
        let mut run = 0u64;
        for unit in &self.units {
            if unit.is_none() {
                if run == 0 {
                    fragment_count += 1;
                }
                run += 1;
            } else {
                if run > largest_run {
                    largest_run = run;
                }
                if run > 0 && (smallest_run == 0 || run < smallest_run) {
                    smallest_run = run;
                }
                run = 0;
            }
        }
        if run > largest_run {
            largest_run = run;
        }
        if run > 0 && (smallest_run == 0 || run < smallest_run) {
            smallest_run = run;
        }

        UsageMetrics {
            total_bytes: total_units * self.unit_size,
            allocated_bytes: allocated_units * self.unit_size,
            free_bytes: free_units * self.unit_size,
            required_bytes,
            external_fragment_count: fragment_count,
            largest_free_block_bytes: largest_run * self.unit_size,
            smallest_free_block_bytes: smallest_run * self.unit_size,
        }
    }

    /// Snapshot operation counters.
    pub fn counters(&self) -> OpCounters {
        self.counters
    }

    /// Allocation records made since the last configure, active and not.
    pub fn records(&self) -> &[AllocationRecord] {
        &self.records
    }

    /// Bytes per unit.
    pub fn unit_size(&self) -> u64 {
        self.unit_size
    }

    /// Units in the pool.
    pub fn unit_count(&self) -> usize {
        self.units.len()
    }
}
