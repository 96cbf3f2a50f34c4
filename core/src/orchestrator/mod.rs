//! Simulation driver
//!
//! The orchestrator owns the whole run: workload generation, timeline
//! construction, tick-by-tick replay against the four allocators, periodic
//! metric sampling and the final report.

mod engine;

pub use engine::{Simulation, SimulationConfig, SimulationError, SAMPLE_INTERVAL};
