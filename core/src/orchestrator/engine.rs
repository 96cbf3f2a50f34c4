//! Simulation engine
//!
//! Main simulation loop integrating all components:
//! - Workload generation (deterministic jobs + heap elements)
//! - Timeline construction (sorted event sequence)
//! - Replay (identical dispatch to all four allocators)
//! - Sampling (periodic utilization/fragmentation rows)
//! - Finalization (per-policy statistics and comparison data)
//!
//! # Architecture
//!
//! One [`Simulation`] owns four [`PoolAllocator`] instances in the fixed
//! dispatch order First → Next → Best → Worst. Every event is dispatched to
//! all four through the same loop, so the policies see byte-identical
//! request sequences and their outputs are directly comparable.
//!
//! # Determinism
//!
//! All randomness flows through the seeded [`RngManager`]; `run` reseeds it
//! and reconfigures every allocator first, so repeated runs of the same
//! `Simulation` produce bit-identical logs, summaries and reports.
//!
//! # Failure semantics
//!
//! Nothing inside the replay retries or errors: a failed allocation is a
//! counter and a `None` location, and the later free is skipped. The only
//! fallible step is flushing the row sinks at the end.

use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::allocator::PoolAllocator;
use crate::models::{ElementId, JobId, TimelineEvent};
use crate::policy::PolicyKind;
use crate::report::{PolicyReport, RunReport};
use crate::rng::RngManager;
use crate::sink::CsvSink;
use crate::timeline::{build_timeline, horizon};
use crate::workload::{JobMix, Workload, WorkloadGenerator, PREFILL_HORIZON};

/// Ticks between summary samples once the prefill horizon has passed.
pub const SAMPLE_INTERVAL: usize = 200;

/// Complete configuration for one simulation run.
///
/// The caller (CLI layer) validates this surface before the core runs: the
/// mix percentages sum to exactly 100, the unit size is a positive multiple
/// of 8 and the unit count is positive. The core assumes those invariants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Name echoed in diagnostics and the completion banner
    pub test_name: String,

    /// Job-mix percentages for Small/Medium/Large
    pub job_mix: JobMix,

    /// Bytes per pool unit
    pub unit_size: u64,

    /// Units in each policy's pool
    pub unit_count: usize,

    /// Seed for the shared draw source
    pub seed: u64,

    /// Destination for the summary rows
    pub summary_path: PathBuf,

    /// Destination for First Fit's allocation/free log
    pub log_first_fit: PathBuf,

    /// Destination for Next Fit's allocation/free log
    pub log_next_fit: PathBuf,

    /// Destination for Best Fit's allocation/free log
    pub log_best_fit: PathBuf,

    /// Destination for Worst Fit's allocation/free log
    pub log_worst_fit: PathBuf,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            test_name: "defaultTest".to_string(),
            job_mix: JobMix::default(),
            unit_size: 8,
            unit_count: 5000,
            seed: 125,
            summary_path: PathBuf::from("out/summary.csv"),
            log_first_fit: PathBuf::from("out/log_firstfit.csv"),
            log_next_fit: PathBuf::from("out/log_nextfit.csv"),
            log_best_fit: PathBuf::from("out/log_bestfit.csv"),
            log_worst_fit: PathBuf::from("out/log_worstfit.csv"),
        }
    }
}

impl SimulationConfig {
    /// Log destination for one policy.
    pub fn log_path(&self, kind: PolicyKind) -> &PathBuf {
        match kind {
            PolicyKind::FirstFit => &self.log_first_fit,
            PolicyKind::NextFit => &self.log_next_fit,
            PolicyKind::BestFit => &self.log_best_fit,
            PolicyKind::WorstFit => &self.log_worst_fit,
        }
    }
}

/// Simulation error types
#[derive(Debug, Error)]
pub enum SimulationError {
    /// Flushing an output sink failed
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

/// Per-policy location tables, used solely to find the record to free at
/// departure and heap-free events.
#[derive(Debug, Clone, Default)]
struct LocationTable {
    /// Job id → start unit of its code region
    job_code: Vec<Option<usize>>,

    /// Job id → start unit of its stack region
    job_stack: Vec<Option<usize>>,

    /// Element id → start unit of its heap region
    heap: Vec<Option<usize>>,
}

impl LocationTable {
    fn reset(&mut self, job_count: usize, element_count: usize) {
        self.job_code = vec![None; job_count];
        self.job_stack = vec![None; job_count];
        self.heap = vec![None; element_count];
    }
}

/// Running sums and maxima folded per policy over one run.
///
/// Owned by the driver and reset at the start of every `run`.
#[derive(Debug, Clone, Copy, Default)]
struct PolicyAggregates {
    sum_percent_in_use: u64,
    sum_percent_internal: u64,
    max_percent_in_use: u64,
    max_external_fragments: u64,
    heap_alloc_count: u64,
    heap_alloc_bytes: u64,
}

/// Main driver: replays one synthetic workload against four allocators.
pub struct Simulation {
    config: SimulationConfig,
    rng: RngManager,

    /// One allocator per policy, fixed order First → Next → Best → Worst
    allocators: Vec<PoolAllocator>,

    /// Parallel to `allocators`
    locations: Vec<LocationTable>,

    /// Parallel to `allocators`
    aggregates: Vec<PolicyAggregates>,

    workload: Workload,
    events: Vec<TimelineEvent>,
    sample_count: u64,
}

impl Simulation {
    /// Create a simulation from a validated configuration.
    pub fn new(config: SimulationConfig) -> Self {
        let rng = RngManager::new(config.seed);
        let allocators: Vec<PoolAllocator> =
            PolicyKind::ALL.iter().map(|kind| PoolAllocator::new(*kind)).collect();
        let locations = vec![LocationTable::default(); allocators.len()];
        let aggregates = vec![PolicyAggregates::default(); allocators.len()];

        Self {
            config,
            rng,
            allocators,
            locations,
            aggregates,
            workload: Workload::default(),
            events: Vec::new(),
            sample_count: 0,
        }
    }

    /// The configuration this simulation runs with.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Execute one full run: generate, build timeline, replay, sample,
    /// finalize. Repeated calls reset all mutable state first, so the same
    /// configuration always reproduces byte-identical output.
    pub fn run(&mut self) -> Result<RunReport, SimulationError> {
        self.reset();

        // Phase 1: generate the workload
        let generator = WorkloadGenerator::new(self.config.job_mix);
        self.workload = generator.generate(&mut self.rng);

        // Phase 2: build the timeline
        self.events = build_timeline(&self.workload.jobs, &self.workload.heap_elements);
        let end_time = horizon(&self.events);

        for table in &mut self.locations {
            table.reset(self.workload.jobs.len(), self.workload.heap_elements.len());
        }

        let mut summary = CsvSink::new(&self.config.summary_path);
        summary.header(&[
            "time",
            "algorithm",
            "allocatedBytes",
            "freeBytes",
            "requiredBytes",
            "externalFragments",
            "percentMemoryInUse",
            "percentMemoryFree",
            "percentInternalFragmentation",
        ]);

        let mut logs: Vec<CsvSink> = self
            .allocators
            .iter()
            .map(|alloc| {
                let mut log = CsvSink::new(self.config.log_path(alloc.kind()));
                log.header(&["time", "jobId", "event", "sizeBytes", "location"]);
                log
            })
            .collect();

        // Phase 3 + 4: replay with periodic sampling
        let mut cursor = 0usize;
        for time in 0..=end_time {
            while cursor < self.events.len() && self.events[cursor].time() == time {
                let event = self.events[cursor];
                self.dispatch(event, &mut logs);
                cursor += 1;
            }

            if time >= PREFILL_HORIZON && (time - PREFILL_HORIZON) % SAMPLE_INTERVAL == 0 {
                self.sample(time, &mut summary);
            }
        }

        // Phase 5: finalize
        let report = self.build_report(end_time);

        summary.close()?;
        for log in logs {
            log.close()?;
        }

        Ok(report)
    }

    /// Reset every piece of per-run mutable state.
    fn reset(&mut self) {
        self.rng.reseed(self.config.seed);
        for alloc in &mut self.allocators {
            alloc.configure(self.config.unit_size, self.config.unit_count);
        }
        for aggregate in &mut self.aggregates {
            *aggregate = PolicyAggregates::default();
        }
        self.sample_count = 0;
    }

    /// Dispatch one event identically to all four allocators.
    fn dispatch(&mut self, event: TimelineEvent, logs: &mut [CsvSink]) {
        match event {
            TimelineEvent::JobArrive { time, job_id } => self.on_job_arrive(time, job_id, logs),
            TimelineEvent::JobDepart { time, job_id } => self.on_job_depart(time, job_id, logs),
            TimelineEvent::HeapAlloc {
                time, element_id, ..
            } => self.on_heap_alloc(time, element_id, logs),
            TimelineEvent::HeapFree {
                time,
                job_id,
                element_id,
            } => self.on_heap_free(time, job_id, element_id, logs),
        }
    }

    /// Job arrival: allocate code then stack against each policy and record
    /// both locations for the departure lookup.
    fn on_job_arrive(&mut self, time: usize, job_id: JobId, logs: &mut [CsvSink]) {
        let job = &self.workload.jobs[job_id];
        let (code_size, stack_size) = (job.code_size, job.stack_size);

        for (idx, alloc) in self.allocators.iter_mut().enumerate() {
            alloc.set_current_owner(job_id);

            let code_location = alloc.allocate(code_size);
            let stack_location = alloc.allocate(stack_size);

            self.locations[idx].job_code[job_id] = code_location;
            self.locations[idx].job_stack[job_id] = stack_location;

            log_allocation(&mut logs[idx], time, job_id, code_size, code_location);
            log_allocation(&mut logs[idx], time, job_id, stack_size, stack_location);
        }
    }

    /// Job departure: free the recorded code and stack regions, skipping
    /// whichever never got placed.
    fn on_job_depart(&mut self, time: usize, job_id: JobId, logs: &mut [CsvSink]) {
        for (idx, alloc) in self.allocators.iter_mut().enumerate() {
            if let Some(location) = self.locations[idx].job_code[job_id] {
                alloc.free(location);
                log_free(&mut logs[idx], time, job_id, location);
            }
            if let Some(location) = self.locations[idx].job_stack[job_id] {
                alloc.free(location);
                log_free(&mut logs[idx], time, job_id, location);
            }
        }
    }

    /// Heap allocation on behalf of the element's job.
    fn on_heap_alloc(&mut self, time: usize, element_id: ElementId, logs: &mut [CsvSink]) {
        let element = self.workload.heap_elements[element_id];

        for (idx, alloc) in self.allocators.iter_mut().enumerate() {
            alloc.set_current_owner(element.job_id);
            let location = alloc.allocate(element.size_bytes);

            self.locations[idx].heap[element_id] = location;
            log_allocation(&mut logs[idx], time, element.job_id, element.size_bytes, location);

            if location.is_some() {
                self.aggregates[idx].heap_alloc_count += 1;
                self.aggregates[idx].heap_alloc_bytes += element.size_bytes;
            }
        }
    }

    /// Heap free: release the recorded location if the allocation ever
    /// succeeded, then mark the element unallocated for every policy.
    fn on_heap_free(
        &mut self,
        time: usize,
        job_id: JobId,
        element_id: ElementId,
        logs: &mut [CsvSink],
    ) {
        for (idx, alloc) in self.allocators.iter_mut().enumerate() {
            if let Some(location) = self.locations[idx].heap[element_id].take() {
                alloc.free(location);
                log_free(&mut logs[idx], time, job_id, location);
            }
        }
    }

    /// Snapshot every policy and append one summary row each.
    fn sample(&mut self, time: usize, summary: &mut CsvSink) {
        for (idx, alloc) in self.allocators.iter().enumerate() {
            let usage = alloc.metrics();
            let percent_in_use = usage.percent_in_use();
            let percent_free = usage.percent_free();
            let percent_internal = usage.percent_internal_fragmentation();

            let aggregate = &mut self.aggregates[idx];
            aggregate.sum_percent_in_use += percent_in_use;
            aggregate.sum_percent_internal += percent_internal;
            if percent_in_use > aggregate.max_percent_in_use {
                aggregate.max_percent_in_use = percent_in_use;
            }
            if usage.external_fragment_count > aggregate.max_external_fragments {
                aggregate.max_external_fragments = usage.external_fragment_count;
            }

            summary.row(&[
                time.to_string(),
                alloc.kind().code().to_string(),
                usage.allocated_bytes.to_string(),
                usage.free_bytes.to_string(),
                usage.required_bytes.to_string(),
                usage.external_fragment_count.to_string(),
                percent_in_use.to_string(),
                percent_free.to_string(),
                percent_internal.to_string(),
            ]);
        }

        self.sample_count += 1;
    }

    /// Fold final metrics, counters and aggregates into the run report.
    fn build_report(&self, end_time: usize) -> RunReport {
        let total_time_steps = (end_time + 1) as u64;

        let policies = self
            .allocators
            .iter()
            .zip(&self.aggregates)
            .map(|(alloc, aggregate)| {
                let usage = alloc.metrics();
                let counters = alloc.counters();

                let (avg_percent_in_use, avg_percent_internal) = if self.sample_count > 0 {
                    (
                        aggregate.sum_percent_in_use / self.sample_count,
                        aggregate.sum_percent_internal / self.sample_count,
                    )
                } else {
                    (0, 0)
                };

                let avg_allocation_operations = if counters.allocations > 0 {
                    counters.allocation_operations / counters.allocations
                } else {
                    0
                };
                let avg_free_operations = if counters.free_requests > 0 {
                    counters.free_operations / counters.free_requests
                } else {
                    0
                };

                let total_operations = counters.allocation_operations + counters.free_operations;

                PolicyReport {
                    kind: alloc.kind(),
                    total_bytes: usage.total_bytes,
                    allocated_bytes: usage.allocated_bytes,
                    free_bytes: usage.free_bytes,
                    required_bytes: usage.required_bytes,
                    percent_in_use: usage.percent_in_use(),
                    percent_free: usage.percent_free(),
                    percent_internal_fragmentation: usage.percent_internal_fragmentation(),
                    largest_free_block_bytes: usage.largest_free_block_bytes,
                    smallest_free_block_bytes: usage.smallest_free_block_bytes,
                    avg_percent_in_use,
                    avg_percent_internal_fragmentation: avg_percent_internal,
                    peak_percent_in_use: aggregate.max_percent_in_use,
                    peak_external_fragments: aggregate.max_external_fragments,
                    heap_alloc_count: aggregate.heap_alloc_count,
                    heap_alloc_bytes: aggregate.heap_alloc_bytes,
                    allocations: counters.allocations,
                    failed_allocations: counters.failed_allocations,
                    allocation_operations: counters.allocation_operations,
                    avg_allocation_operations,
                    free_requests: counters.free_requests,
                    free_operations: counters.free_operations,
                    avg_free_operations,
                    total_operations,
                    operations_per_time_unit: total_operations / total_time_steps,
                }
            })
            .collect();

        RunReport {
            test_name: self.config.test_name.clone(),
            sample_count: self.sample_count,
            total_time_steps,
            policies,
        }
    }
}

fn log_allocation(
    log: &mut CsvSink,
    time: usize,
    job_id: JobId,
    size_bytes: u64,
    location: Option<usize>,
) {
    log.row(&[
        time.to_string(),
        job_id.to_string(),
        "alloc".to_string(),
        size_bytes.to_string(),
        location_field(location),
    ]);
}

fn log_free(log: &mut CsvSink, time: usize, job_id: JobId, location: usize) {
    log.row(&[
        time.to_string(),
        job_id.to_string(),
        "free".to_string(),
        "0".to_string(),
        location.to_string(),
    ]);
}

/// Render a location for the log row: the start unit, or `-1` when the
/// allocation failed (kept for compatibility with the row format).
fn location_field(location: Option<usize>) -> String {
    match location {
        Some(start) => start.to_string(),
        None => "-1".to_string(),
    }
}
