//! Allocator placement scenarios
//!
//! Walks the documented 10-unit pool scenarios through all four policies
//! and checks the placement rules and accounting invariants they pin down.

use placement_simulator_core_rs::{PolicyKind, PoolAllocator};

fn configured(kind: PolicyKind) -> PoolAllocator {
    let mut alloc = PoolAllocator::new(kind);
    alloc.configure(8, 10); // 80 bytes total
    alloc.set_current_owner(0);
    alloc
}

#[test]
fn test_first_fit_fills_from_the_bottom() {
    let mut alloc = configured(PolicyKind::FirstFit);

    // 20 bytes -> 3 units at the bottom
    assert_eq!(alloc.allocate(20), Some(0));
    // 50 bytes -> 7 units in the remainder
    assert_eq!(alloc.allocate(50), Some(3));

    let usage = alloc.metrics();
    assert_eq!(usage.allocated_bytes, 80);
    assert_eq!(usage.free_bytes, 0);
}

#[test]
fn test_full_pool_fails_every_policy() {
    for kind in PolicyKind::ALL {
        let mut alloc = configured(kind);
        assert!(alloc.allocate(20).is_some(), "{:?}", kind);
        assert!(alloc.allocate(50).is_some(), "{:?}", kind);

        // one more unit than exists
        assert_eq!(alloc.allocate(8), None, "{:?}", kind);
        assert_eq!(alloc.counters().failed_allocations, 1, "{:?}", kind);
    }
}

#[test]
fn test_first_fit_reuses_freed_bottom_block() {
    let mut alloc = configured(PolicyKind::FirstFit);
    alloc.allocate(20);
    alloc.allocate(50);

    alloc.free(0);

    assert_eq!(alloc.allocate(8), Some(0));
}

#[test]
fn test_next_fit_wraps_to_reach_freed_bottom_block() {
    let mut alloc = configured(PolicyKind::NextFit);
    alloc.allocate(20);
    alloc.allocate(50); // cursor now at (3 + 7) % 10 = 0 after filling the pool

    alloc.free(0);

    // unit 0 is the only free unit; the wrap-around search finds it
    assert_eq!(alloc.allocate(8), Some(0));
}

#[test]
fn test_best_fit_prefers_tightest_hole() {
    let mut alloc = configured(PolicyKind::BestFit);

    // carve the pool into holes of size 2 (units 3-4) and 3 (units 7-9)
    let a = alloc.allocate(24).unwrap(); // units 0-2
    let b = alloc.allocate(16).unwrap(); // units 3-4
    let c = alloc.allocate(16).unwrap(); // units 5-6
    assert_eq!((a, b, c), (0, 3, 5));

    alloc.free(b);

    // 2 units fit both the hole at 3 and the tail at 7; best fit takes the
    // tighter hole
    assert_eq!(alloc.allocate(16), Some(3));
}

#[test]
fn test_worst_fit_prefers_largest_hole() {
    let mut alloc = configured(PolicyKind::WorstFit);

    let a = alloc.allocate(24).unwrap(); // units 0-2
    let b = alloc.allocate(16).unwrap(); // units 3-4
    let _c = alloc.allocate(16).unwrap(); // units 5-6
    assert_eq!((a, b), (0, 3));

    alloc.free(b);

    // holes: 2 units at 3, 3 units at 7; worst fit takes the larger tail
    assert_eq!(alloc.allocate(16), Some(7));
}

#[test]
fn test_accounting_invariants_hold_through_churn() {
    for kind in PolicyKind::ALL {
        let mut alloc = configured(kind);

        let first = alloc.allocate(20);
        let second = alloc.allocate(30);
        if let Some(start) = first {
            alloc.free(start);
        }
        let third = alloc.allocate(10);
        if let Some(start) = second {
            alloc.free(start);
        }
        let _ = third;

        let usage = alloc.metrics();
        assert_eq!(
            usage.allocated_bytes + usage.free_bytes,
            usage.total_bytes,
            "{:?}",
            kind
        );
        assert!(usage.required_bytes <= usage.allocated_bytes, "{:?}", kind);
    }
}

#[test]
fn test_operation_counters_accumulate_per_unit_inspected() {
    let mut alloc = configured(PolicyKind::BestFit);

    // best fit always scans the whole pool
    alloc.allocate(20);
    assert_eq!(alloc.counters().allocation_operations, 10);
    alloc.allocate(20);
    assert_eq!(alloc.counters().allocation_operations, 20);

    // a failing request still pays for its scan
    alloc.allocate(800);
    let counters = alloc.counters();
    assert_eq!(counters.allocation_operations, 30);
    assert_eq!(counters.failed_allocations, 1);
}

#[test]
fn test_free_counters_track_record_scans() {
    let mut alloc = configured(PolicyKind::FirstFit);
    let a = alloc.allocate(8).unwrap();
    let b = alloc.allocate(8).unwrap();

    // freeing the second allocation scans both records
    alloc.free(b);
    let counters = alloc.counters();
    assert_eq!(counters.free_requests, 1);
    assert_eq!(counters.free_operations, 2);

    // freeing the first stops at the first record
    alloc.free(a);
    let counters = alloc.counters();
    assert_eq!(counters.free_requests, 2);
    assert_eq!(counters.free_operations, 3);
}
