//! Workload generation module
//!
//! Produces the deterministic population of jobs and heap elements that the
//! driver replays against all four allocators. All generation is driven by
//! the shared [`RngManager`] stream, and the order of draws is part of the
//! observable contract: job-type, run-time, code, stack, then per-element
//! size and lifetime draws, with one arrival-jitter draw between jobs.
//!
//! # Key Principles
//!
//! 1. **Determinism**: same seed + same mix → same population
//! 2. **Prefill**: arrivals keep coming until the prefill horizon so the
//!    pool reaches a steady state before sampling starts
//! 3. **Bounded**: heap elements stop at a hard cap so a pathological mix
//!    cannot make a run unbounded (a safety valve, not an error)

use serde::{Deserialize, Serialize};

use crate::models::{HeapElement, Job, SizeClass};
use crate::rng::RngManager;

/// Ticks of workload generated before metric sampling begins.
pub const PREFILL_HORIZON: usize = 2000;

/// Hard cap on heap elements across the whole run.
pub const HEAP_ELEMENT_CAP: usize = 20_000;

/// Base arrival cadence: one job every 3 ticks plus jitter.
const ARRIVAL_BASE_STEP: i64 = 3;

/// Job-mix percentages for the three size classes.
///
/// The caller (CLI layer) guarantees the three values sum to exactly 100;
/// the generator assumes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobMix {
    pub percent_small: u32,
    pub percent_medium: u32,
    pub percent_large: u32,
}

impl Default for JobMix {
    fn default() -> Self {
        Self {
            percent_small: 33,
            percent_medium: 33,
            percent_large: 34,
        }
    }
}

/// The generated population for one run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Workload {
    pub jobs: Vec<Job>,
    pub heap_elements: Vec<HeapElement>,
}

/// Deterministic job and heap-element generator.
pub struct WorkloadGenerator {
    mix: JobMix,
}

impl WorkloadGenerator {
    pub fn new(mix: JobMix) -> Self {
        Self { mix }
    }

    /// Generate the full population for one run.
    ///
    /// Arrivals accumulate on a fixed base cadence (base 1, step 3) with a
    /// fresh jitter draw of 0..=4 per job, until the next arrival would
    /// reach the prefill horizon.
    pub fn generate(&self, rng: &mut RngManager) -> Workload {
        let mut jobs = Vec::new();
        let mut heap_elements = Vec::new();

        let mut job_id = 0;
        let mut base_time = 1i64;
        let mut offset = rng.range_inclusive(0, 4);
        let mut next_arrival = base_time + offset;

        while (next_arrival as usize) < PREFILL_HORIZON {
            let job = self.create_job(job_id, next_arrival as usize, rng);
            self.create_heap_elements(&job, &mut heap_elements, rng);
            jobs.push(job);

            job_id += 1;
            base_time += ARRIVAL_BASE_STEP;
            offset = rng.range_inclusive(0, 4);
            next_arrival = base_time + offset;
        }

        Workload {
            jobs,
            heap_elements,
        }
    }

    /// Pick a size class by one draw against cumulative percentages.
    fn choose_size_class(&self, rng: &mut RngManager) -> SizeClass {
        let draw = rng.range_inclusive(1, 100);

        if draw <= self.mix.percent_small as i64 {
            SizeClass::Small
        } else if draw <= (self.mix.percent_small + self.mix.percent_medium) as i64 {
            SizeClass::Medium
        } else {
            SizeClass::Large
        }
    }

    /// Draw one job's parameters within its class ranges.
    fn create_job(&self, id: usize, arrival_time: usize, rng: &mut RngManager) -> Job {
        let class = self.choose_size_class(rng);

        let (run_lo, run_hi) = class.run_time_range();
        let run_time = rng.range_inclusive(run_lo, run_hi) as usize;

        let (code_lo, code_hi) = class.code_size_range();
        let code_size = rng.range_inclusive(code_lo, code_hi) as u64;

        let (stack_lo, stack_hi) = class.stack_size_range();
        let stack_size = rng.range_inclusive(stack_lo, stack_hi) as u64;

        Job {
            id,
            class,
            arrival_time,
            run_time,
            code_size,
            stack_size,
            heap_element_count: run_time * class.heap_multiplier(),
        }
    }

    /// Synthesize a job's heap elements across its run.
    ///
    /// Elements arrive in batches of `heap_element_count / run_time` (at
    /// least one) per run-time tick; each draws its size then its lifetime.
    /// Once the global cap is exceeded later jobs synthesize no elements
    /// and consume no element draws.
    fn create_heap_elements(
        &self,
        job: &Job,
        heap_elements: &mut Vec<HeapElement>,
        rng: &mut RngManager,
    ) {
        if job.heap_element_count == 0 || job.run_time == 0 {
            return;
        }
        if heap_elements.len() > HEAP_ELEMENT_CAP {
            return;
        }

        let per_tick = (job.heap_element_count / job.run_time).max(1);

        for t in 0..job.run_time {
            let arrival_time = job.arrival_time + t;

            for _ in 0..per_tick {
                let size_bytes = rng.range_inclusive(20, 50) as u64; // 35 +/- 15
                let lifetime = rng.range_inclusive(1, job.run_time as i64) as usize;

                heap_elements.push(HeapElement {
                    id: heap_elements.len(),
                    job_id: job.id,
                    arrival_time,
                    lifetime,
                    size_bytes,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_is_deterministic() {
        let generator = WorkloadGenerator::new(JobMix::default());

        let mut rng1 = RngManager::new(125);
        let mut rng2 = RngManager::new(125);
        let workload1 = generator.generate(&mut rng1);
        let workload2 = generator.generate(&mut rng2);

        assert_eq!(workload1.jobs, workload2.jobs);
        assert_eq!(workload1.heap_elements, workload2.heap_elements);
    }

    #[test]
    fn test_arrivals_stay_before_prefill_horizon() {
        let generator = WorkloadGenerator::new(JobMix::default());
        let mut rng = RngManager::new(125);
        let workload = generator.generate(&mut rng);

        assert!(!workload.jobs.is_empty());
        for job in &workload.jobs {
            assert!(job.arrival_time < PREFILL_HORIZON);
        }
    }

    #[test]
    fn test_job_ids_are_dense_indices() {
        let generator = WorkloadGenerator::new(JobMix::default());
        let mut rng = RngManager::new(42);
        let workload = generator.generate(&mut rng);

        for (index, job) in workload.jobs.iter().enumerate() {
            assert_eq!(job.id, index);
        }
        for (index, element) in workload.heap_elements.iter().enumerate() {
            assert_eq!(element.id, index);
        }
    }

    #[test]
    fn test_all_small_mix_draws_only_small_jobs() {
        let generator = WorkloadGenerator::new(JobMix {
            percent_small: 100,
            percent_medium: 0,
            percent_large: 0,
        });
        let mut rng = RngManager::new(7);
        let workload = generator.generate(&mut rng);

        for job in &workload.jobs {
            assert_eq!(job.class, SizeClass::Small);
            assert!(job.run_time >= 4 && job.run_time <= 6);
            assert!(job.code_size >= 40 && job.code_size <= 80);
            assert!(job.stack_size >= 20 && job.stack_size <= 40);
            assert_eq!(job.heap_element_count, job.run_time * 5);
        }
    }

    #[test]
    fn test_heap_elements_match_job_parameters() {
        let generator = WorkloadGenerator::new(JobMix::default());
        let mut rng = RngManager::new(125);
        let workload = generator.generate(&mut rng);

        for element in &workload.heap_elements {
            let job = &workload.jobs[element.job_id];
            assert!(element.arrival_time >= job.arrival_time);
            assert!(element.arrival_time < job.arrival_time + job.run_time);
            assert!(element.size_bytes >= 20 && element.size_bytes <= 50);
            assert!(element.lifetime >= 1 && element.lifetime <= job.run_time);
        }
    }

    #[test]
    fn test_heap_element_cap_is_a_silent_valve() {
        // an all-large mix overflows the cap well before the horizon
        let generator = WorkloadGenerator::new(JobMix {
            percent_small: 0,
            percent_medium: 0,
            percent_large: 100,
        });
        let mut rng = RngManager::new(125);
        let workload = generator.generate(&mut rng);

        // jobs keep generating to the horizon; elements stop near the cap
        // (the final batch may push past it before the next job sees it)
        assert!(workload.heap_elements.len() > HEAP_ELEMENT_CAP);
        assert!(workload.heap_elements.len() < HEAP_ELEMENT_CAP + 1000);

        let last_with_elements = workload
            .heap_elements
            .last()
            .map(|e| e.job_id)
            .unwrap_or(0);
        assert!(
            last_with_elements < workload.jobs.len() - 1,
            "later jobs should have no heap elements"
        );
    }
}
