//! Integration tests for the loop processor.

use glb_rs::config::Config;
use glb_rs::payload::{SpawnBag, Sum, UnitBag, UtsBag};
use glb_rs::{DynBag, GlbProcessor, LoopProcessor};

#[test]
fn spawn_chain_sums_to_amount() {
    let mut processor = LoopProcessor::<Sum>::new(500);
    let result = processor.compute(SpawnBag::new(400), || Sum::new(0));
    assert_eq!(result.sum, 400);
}

#[test]
fn spawn_chain_with_single_unit_slices() {
    let mut processor = LoopProcessor::<Sum>::new(1);
    let result = processor.compute(SpawnBag::new(400), Sum::default);
    assert_eq!(result.sum, 400);

    // 400 slices spawning, 400 slices counting.
    let stats = processor.last_run().expect("ran once");
    assert_eq!(stats.slices, 800);
}

#[test]
fn large_slices_need_few_calls() {
    let mut processor = LoopProcessor::<Sum>::new(500);
    processor.compute(SpawnBag::new(400), Sum::default);
    assert_eq!(processor.last_run().map(|s| s.slices), Some(2));
}

#[test]
fn compute_all_merges_same_kind_bags() {
    let mut processor = LoopProcessor::<Sum>::new(16);
    let bags = vec![SpawnBag::new(100), SpawnBag::new(200), SpawnBag::new(100)];
    assert_eq!(processor.compute_all(bags, Sum::default).sum, 400);
}

#[test]
fn compute_bags_accepts_mixed_kinds() {
    let mut processor = LoopProcessor::<Sum>::new(4);
    let bags = vec![
        DynBag::new(SpawnBag::new(10)),
        DynBag::new(UnitBag::new(5)),
        DynBag::new(UtsBag::new(3, 1)),
    ];
    let uts_nodes = {
        let mut uts = UtsBag::new(3, 1);
        uts.run();
        uts.explored() as i64
    };
    assert_eq!(processor.compute_bags(bags, Sum::default).sum, 15 + uts_nodes);
}

#[test]
fn successive_computations_do_not_mix() {
    let mut processor = LoopProcessor::<Sum>::new(8);
    assert_eq!(processor.compute(UnitBag::new(30), Sum::default).sum, 30);
    assert_eq!(processor.compute(UnitBag::new(12), Sum::default).sum, 12);
}

#[test]
fn initializer_value_is_included() {
    let mut processor = LoopProcessor::<Sum>::new(8);
    assert_eq!(processor.compute(UnitBag::new(3), || Sum::new(100)).sum, 103);
}

#[test]
fn zero_work_size_is_bumped_to_one() {
    let mut processor = LoopProcessor::<Sum>::new(0);
    assert_eq!(processor.work_size(), 1);
    assert_eq!(processor.compute(UnitBag::new(3), Sum::default).sum, 3);
}

#[test]
fn processor_from_config_uses_work_size() {
    let config = Config {
        work_size: 64,
        ..Config::default()
    };
    let processor = LoopProcessor::<Sum>::from_config(&config);
    assert_eq!(processor.work_size(), 64);
    assert!(processor.last_run().is_none());
}

#[test]
fn uts_count_is_independent_of_work_size() {
    let mut small = LoopProcessor::<Sum>::new(1);
    let mut large = LoopProcessor::<Sum>::new(500);
    let a = small.compute(UtsBag::new(19, 6), Sum::default);
    let b = large.compute(UtsBag::new(19, 6), Sum::default);
    assert_eq!(a, b);
    assert!(a.sum >= 1);
}
