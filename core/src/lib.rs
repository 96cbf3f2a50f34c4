//! Placement Simulator Core - Rust Engine
//!
//! Discrete-event comparison of the four classic contiguous-memory placement
//! policies (First Fit, Next Fit, Best Fit, Worst Fit) under one identical
//! synthetic workload, with deterministic execution.
//!
//! # Architecture
//!
//! - **models**: Domain types (Job, HeapElement, TimelineEvent)
//! - **rng**: Deterministic random number generation
//! - **workload**: Synthetic job and heap-element population
//! - **timeline**: Sorted event sequence construction
//! - **policy**: Placement search strategies
//! - **allocator**: Fixed-pool region allocator with instrumentation
//! - **orchestrator**: Main simulation loop
//! - **sink**: Row-oriented CSV output
//! - **report**: Final per-policy statistics and comparison table
//!
//! # Critical Invariants
//!
//! 1. All randomness is deterministic (seeded RNG, contractual draw order)
//! 2. All four allocators see identical request sequences in fixed order
//! 3. Nothing inside a replay errors; anomalies become counters

// Module declarations
pub mod allocator;
pub mod models;
pub mod orchestrator;
pub mod policy;
pub mod report;
pub mod rng;
pub mod sink;
pub mod timeline;
pub mod workload;

// Re-exports for convenience
pub use allocator::{AllocationRecord, OpCounters, PoolAllocator, UsageMetrics};
pub use models::{ElementId, HeapElement, Job, JobId, SizeClass, TimelineEvent};
pub use orchestrator::{Simulation, SimulationConfig, SimulationError, SAMPLE_INTERVAL};
pub use policy::{PlacementStrategy, PolicyKind, RunSearch};
pub use report::{PolicyReport, RunReport};
pub use rng::RngManager;
pub use sink::CsvSink;
pub use timeline::{build_timeline, horizon};
pub use workload::{JobMix, Workload, WorkloadGenerator, HEAP_ELEMENT_CAP, PREFILL_HORIZON};
