//! Heap element model
//!
//! A heap element is one short-lived allocation request issued by a job
//! during its run. It is allocated at its arrival tick and freed at
//! `arrival_time + lifetime`.

use serde::{Deserialize, Serialize};

use super::{ElementId, JobId};

/// One heap allocation request. Immutable once generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeapElement {
    /// Element identifier (index in creation order)
    pub id: ElementId,

    /// Job that issued the request
    pub job_id: JobId,

    /// Tick at which the element is allocated
    pub arrival_time: usize,

    /// Ticks the element stays allocated
    pub lifetime: usize,

    /// Requested size in bytes
    pub size_bytes: u64,
}

impl HeapElement {
    /// Tick at which the element is freed.
    pub fn departure_time(&self) -> usize {
        self.arrival_time + self.lifetime
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_departure_time() {
        let element = HeapElement {
            id: 0,
            job_id: 4,
            arrival_time: 12,
            lifetime: 3,
            size_bytes: 35,
        };

        assert_eq!(element.departure_time(), 15);
    }
}
