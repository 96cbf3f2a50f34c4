//! Event timeline construction
//!
//! Converts the generated workload into the totally ordered event sequence
//! the driver replays: one arrive and one depart event per job, one alloc
//! and one free event per heap element, sorted once by `(time, kind rank)`
//! and never mutated afterwards.
//!
//! The sort is stable, so events sharing a tick and a kind keep their
//! creation order (job id, then element id).

use crate::models::{HeapElement, Job, TimelineEvent};
use crate::workload::PREFILL_HORIZON;

/// Expand jobs and heap elements into the sorted event timeline.
pub fn build_timeline(jobs: &[Job], heap_elements: &[HeapElement]) -> Vec<TimelineEvent> {
    let mut events = Vec::with_capacity(jobs.len() * 2 + heap_elements.len() * 2);

    for job in jobs {
        events.push(TimelineEvent::JobArrive {
            time: job.arrival_time,
            job_id: job.id,
        });
        events.push(TimelineEvent::JobDepart {
            time: job.departure_time(),
            job_id: job.id,
        });
    }

    for element in heap_elements {
        events.push(TimelineEvent::HeapAlloc {
            time: element.arrival_time,
            job_id: element.job_id,
            element_id: element.id,
        });
        events.push(TimelineEvent::HeapFree {
            time: element.departure_time(),
            job_id: element.job_id,
            element_id: element.id,
        });
    }

    events.sort_by_key(|event| (event.time(), event.kind_rank()));
    events
}

/// Last tick the replay must reach: the later of the final event's time and
/// the prefill horizon.
pub fn horizon(events: &[TimelineEvent]) -> usize {
    let last_event_time = events.last().map(|event| event.time()).unwrap_or(0);
    last_event_time.max(PREFILL_HORIZON)
}
