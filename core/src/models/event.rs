//! Timeline events replayed by the simulation driver.
//!
//! Four event kinds cover the whole simulation vocabulary: a job arriving
//! (code + stack allocation), a job departing (code + stack freed), a heap
//! element being allocated and a heap element being freed.
//!
//! Events at the same tick are ordered by a fixed kind rank:
//! `JobArrive(0) < JobDepart(1) < HeapAlloc(2) < HeapFree(3)`. The rank is
//! part of the observable contract: at a tick where a job's departure and
//! one of its own heap frees coincide, the departure processes first.

use serde::{Deserialize, Serialize};

use super::{ElementId, JobId};

/// One timestamped simulation event.
///
/// Generated once from the workload, sorted once, never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimelineEvent {
    /// Job enters the system; code and stack are allocated
    JobArrive { time: usize, job_id: JobId },

    /// Job leaves the system; its code and stack regions are freed
    JobDepart { time: usize, job_id: JobId },

    /// Heap element allocated on behalf of its job
    HeapAlloc {
        time: usize,
        job_id: JobId,
        element_id: ElementId,
    },

    /// Heap element freed
    HeapFree {
        time: usize,
        job_id: JobId,
        element_id: ElementId,
    },
}

impl TimelineEvent {
    /// Tick at which this event is dispatched.
    pub fn time(&self) -> usize {
        match self {
            TimelineEvent::JobArrive { time, .. } => *time,
            TimelineEvent::JobDepart { time, .. } => *time,
            TimelineEvent::HeapAlloc { time, .. } => *time,
            TimelineEvent::HeapFree { time, .. } => *time,
        }
    }

    /// Fixed ordering rank among events at the same tick.
    pub fn kind_rank(&self) -> u8 {
        match self {
            TimelineEvent::JobArrive { .. } => 0,
            TimelineEvent::JobDepart { .. } => 1,
            TimelineEvent::HeapAlloc { .. } => 2,
            TimelineEvent::HeapFree { .. } => 3,
        }
    }

    /// Job the event belongs to.
    pub fn job_id(&self) -> JobId {
        match self {
            TimelineEvent::JobArrive { job_id, .. } => *job_id,
            TimelineEvent::JobDepart { job_id, .. } => *job_id,
            TimelineEvent::HeapAlloc { job_id, .. } => *job_id,
            TimelineEvent::HeapFree { job_id, .. } => *job_id,
        }
    }

    /// Element id for heap events, `None` for job events.
    pub fn element_id(&self) -> Option<ElementId> {
        match self {
            TimelineEvent::HeapAlloc { element_id, .. } => Some(*element_id),
            TimelineEvent::HeapFree { element_id, .. } => Some(*element_id),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_ranks_are_fixed() {
        let arrive = TimelineEvent::JobArrive { time: 5, job_id: 0 };
        let depart = TimelineEvent::JobDepart { time: 5, job_id: 0 };
        let alloc = TimelineEvent::HeapAlloc {
            time: 5,
            job_id: 0,
            element_id: 1,
        };
        let free = TimelineEvent::HeapFree {
            time: 5,
            job_id: 0,
            element_id: 1,
        };

        assert!(arrive.kind_rank() < depart.kind_rank());
        assert!(depart.kind_rank() < alloc.kind_rank());
        assert!(alloc.kind_rank() < free.kind_rank());
    }

    #[test]
    fn test_element_id_only_on_heap_events() {
        let depart = TimelineEvent::JobDepart { time: 2, job_id: 9 };
        let alloc = TimelineEvent::HeapAlloc {
            time: 2,
            job_id: 9,
            element_id: 40,
        };

        assert_eq!(depart.element_id(), None);
        assert_eq!(alloc.element_id(), Some(40));
        assert_eq!(alloc.job_id(), 9);
    }
}
