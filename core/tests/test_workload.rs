//! Workload generation contract
//!
//! The generated population is the one input every policy sees, so its
//! shape and determinism are load-bearing for the whole comparison.

use placement_simulator_core_rs::{
    JobMix, RngManager, SizeClass, WorkloadGenerator, HEAP_ELEMENT_CAP, PREFILL_HORIZON,
};

#[test]
fn test_same_seed_same_population() {
    let generator = WorkloadGenerator::new(JobMix::default());

    let workload1 = generator.generate(&mut RngManager::new(125));
    let workload2 = generator.generate(&mut RngManager::new(125));

    assert_eq!(workload1.jobs, workload2.jobs);
    assert_eq!(workload1.heap_elements, workload2.heap_elements);
}

#[test]
fn test_different_seed_different_population() {
    let generator = WorkloadGenerator::new(JobMix::default());

    let workload1 = generator.generate(&mut RngManager::new(125));
    let workload2 = generator.generate(&mut RngManager::new(126));

    assert_ne!(workload1.jobs, workload2.jobs);
}

#[test]
fn test_arrivals_follow_base_cadence_with_jitter() {
    let generator = WorkloadGenerator::new(JobMix::default());
    let workload = generator.generate(&mut RngManager::new(125));

    // job i arrives at 1 + 3*i plus a jitter of 0..=4
    for (i, job) in workload.jobs.iter().enumerate() {
        let base = 1 + 3 * i;
        assert!(
            job.arrival_time >= base && job.arrival_time <= base + 4,
            "job {} arrived at {}, expected within [{}, {}]",
            i,
            job.arrival_time,
            base,
            base + 4
        );
        assert!(job.arrival_time < PREFILL_HORIZON);
    }
}

#[test]
fn test_class_parameters_respect_ranges() {
    let generator = WorkloadGenerator::new(JobMix::default());
    let workload = generator.generate(&mut RngManager::new(125));

    for job in &workload.jobs {
        let (run_lo, run_hi) = job.class.run_time_range();
        let (code_lo, code_hi) = job.class.code_size_range();
        let (stack_lo, stack_hi) = job.class.stack_size_range();

        assert!(job.run_time as i64 >= run_lo && job.run_time as i64 <= run_hi);
        assert!(job.code_size as i64 >= code_lo && job.code_size as i64 <= code_hi);
        assert!(job.stack_size as i64 >= stack_lo && job.stack_size as i64 <= stack_hi);
        assert_eq!(
            job.heap_element_count,
            job.run_time * job.class.heap_multiplier()
        );
    }
}

#[test]
fn test_default_mix_produces_all_classes() {
    let generator = WorkloadGenerator::new(JobMix::default());
    let workload = generator.generate(&mut RngManager::new(125));

    let smalls = workload.jobs.iter().filter(|j| j.class == SizeClass::Small).count();
    let mediums = workload.jobs.iter().filter(|j| j.class == SizeClass::Medium).count();
    let larges = workload.jobs.iter().filter(|j| j.class == SizeClass::Large).count();

    assert!(smalls > 0);
    assert!(mediums > 0);
    assert!(larges > 0);
    assert_eq!(smalls + mediums + larges, workload.jobs.len());
}

#[test]
fn test_heap_elements_arrive_during_their_job() {
    let generator = WorkloadGenerator::new(JobMix::default());
    let workload = generator.generate(&mut RngManager::new(125));

    for element in &workload.heap_elements {
        let job = &workload.jobs[element.job_id];
        assert!(element.arrival_time >= job.arrival_time);
        assert!(element.arrival_time < job.arrival_time + job.run_time);
        assert!(element.lifetime >= 1);
        assert!(element.lifetime <= job.run_time);
    }
}

#[test]
fn test_cap_silences_element_generation_not_jobs() {
    let generator = WorkloadGenerator::new(JobMix {
        percent_small: 0,
        percent_medium: 0,
        percent_large: 100,
    });
    let workload = generator.generate(&mut RngManager::new(125));

    // jobs keep arriving to the horizon even after the element cap trips
    let last_job = workload.jobs.last().unwrap();
    assert!(last_job.arrival_time >= PREFILL_HORIZON - 8);

    // element growth stopped shortly past the cap
    assert!(workload.heap_elements.len() > HEAP_ELEMENT_CAP);
    let capped_job = workload.heap_elements.last().unwrap().job_id;
    assert!(capped_job + 1 < workload.jobs.len());
}
