//! Job model
//!
//! A job is one synthetic process competing for pool memory. On arrival it
//! allocates a code region and a stack region; over its run time it issues
//! heap requests; on departure both regions are freed.
//!
//! Jobs are immutable once generated. All byte sizes are plain byte counts;
//! rounding to whole pool units happens inside the allocator.

use serde::{Deserialize, Serialize};

use super::JobId;

/// Size class of a job, fixing the ranges its parameters are drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SizeClass {
    Small,
    Medium,
    Large,
}

impl SizeClass {
    /// One-letter tag used in logs and debug output.
    pub fn tag(&self) -> char {
        match self {
            SizeClass::Small => 'S',
            SizeClass::Medium => 'M',
            SizeClass::Large => 'L',
        }
    }

    /// Inclusive run-time range in ticks.
    pub fn run_time_range(&self) -> (i64, i64) {
        match self {
            SizeClass::Small => (4, 6),    // 5 +/- 1
            SizeClass::Medium => (9, 11),  // 10 +/- 1
            SizeClass::Large => (24, 26),  // 25 +/- 1
        }
    }

    /// Inclusive code-segment size range in bytes.
    pub fn code_size_range(&self) -> (i64, i64) {
        match self {
            SizeClass::Small => (40, 80),    // 60 +/- 20
            SizeClass::Medium => (60, 120),  // 90 +/- 30
            SizeClass::Large => (120, 220),  // 170 +/- 50
        }
    }

    /// Inclusive stack-segment size range in bytes.
    pub fn stack_size_range(&self) -> (i64, i64) {
        match self {
            SizeClass::Small => (20, 40),   // 30 +/- 10
            SizeClass::Medium => (40, 80),  // 60 +/- 20
            SizeClass::Large => (70, 110),  // 90 +/- 30
        }
    }

    /// Heap elements generated per run-time tick of the job.
    pub fn heap_multiplier(&self) -> usize {
        match self {
            SizeClass::Small => 5,
            SizeClass::Medium => 10,
            SizeClass::Large => 25,
        }
    }
}

/// One synthetic job. Immutable once generated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    /// Job identifier (index in the generated population)
    pub id: JobId,

    /// Size class the job's parameters were drawn for
    pub class: SizeClass,

    /// Tick at which the job arrives and allocates code + stack
    pub arrival_time: usize,

    /// Number of ticks the job stays resident
    pub run_time: usize,

    /// Code segment size in bytes
    pub code_size: u64,

    /// Stack segment size in bytes
    pub stack_size: u64,

    /// Total heap elements the job issues over its run (run_time × class multiplier)
    pub heap_element_count: usize,
}

impl Job {
    /// Tick at which the job departs and its code/stack regions are freed.
    pub fn departure_time(&self) -> usize {
        self.arrival_time + self.run_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_tags() {
        assert_eq!(SizeClass::Small.tag(), 'S');
        assert_eq!(SizeClass::Medium.tag(), 'M');
        assert_eq!(SizeClass::Large.tag(), 'L');
    }

    #[test]
    fn test_departure_time() {
        let job = Job {
            id: 3,
            class: SizeClass::Medium,
            arrival_time: 17,
            run_time: 10,
            code_size: 100,
            stack_size: 60,
            heap_element_count: 100,
        };

        assert_eq!(job.departure_time(), 27);
    }
}
