//! Integration tests for the sample payloads.

use glb_rs::payload::{SpawnBag, Sum, UnitBag, UtsBag};
use glb_rs::{Bag, BagQueue, DynBag, Fold, WorkCollector};

fn explore_all(mut bag: UtsBag) -> u64 {
    bag.run();
    bag.explored()
}

// ---------------------------------------------------------------------------
// Sum
// ---------------------------------------------------------------------------

#[test]
fn sum_fold_is_order_independent() {
    let parts = [Sum::new(3), Sum::new(-7), Sum::new(11)];
    let orders = [[0, 1, 2], [2, 1, 0], [1, 2, 0]];

    for order in orders {
        let mut acc = Sum::new(0);
        for i in order {
            acc.fold(parts[i]);
        }
        assert_eq!(acc.sum, 7, "order {order:?}");
    }
    assert_eq!(Sum::default().id(), "");
}

// ---------------------------------------------------------------------------
// Spawn chain
// ---------------------------------------------------------------------------

#[test]
fn spawn_bag_gives_one_unit_bag_per_unit() {
    let mut spawned: Vec<DynBag<Sum>> = Vec::new();
    let mut bag = SpawnBag::new(5);

    bag.process(3, &mut spawned);

    assert_eq!(bag.remaining(), 2);
    assert_eq!(spawned.len(), 3);
    assert!(spawned.iter().all(DynBag::is::<UnitBag>));
}

#[test]
fn spawn_and_unit_bags_split_in_halves() {
    let mut spawn = SpawnBag::new(7);
    let half = spawn.split().expect("7 units split");
    assert_eq!(spawn.remaining() + half.remaining(), 7);

    let mut unit = UnitBag::new(1);
    assert!(unit.split().is_none());
}

#[test]
fn unit_bag_merge_keeps_finished_work() {
    let mut a = UnitBag::new(3);
    let mut b = UnitBag::new(2);
    let mut sink: Vec<DynBag<Sum>> = Vec::new();
    a.process(1, &mut sink);
    b.process(2, &mut sink);

    a.merge(b);
    assert_eq!(a.remaining(), 2);
    assert_eq!(a.done(), 3);

    let mut result = Sum::default();
    a.submit(&mut result);
    assert_eq!(result.sum, 3);
}

// ---------------------------------------------------------------------------
// Unbalanced tree search
// ---------------------------------------------------------------------------

#[test]
fn uts_tree_is_deterministic() {
    assert_eq!(explore_all(UtsBag::new(19, 6)), explore_all(UtsBag::new(19, 6)));
}

#[test]
fn uts_depth_one_counts_root_and_its_children() {
    let bag = UtsBag::new(19, 1);
    assert!(bag.is_empty());
    assert_eq!(bag.pending(), 0);
    assert!(bag.explored() >= 1);
}

#[test]
fn uts_empty_bag_has_nothing_to_split() {
    let mut bag = UtsBag::empty();
    assert!(bag.is_empty());
    assert!(bag.split().is_none());
    assert_eq!(explore_all(bag), 0);
}

/// Process a fresh tree one node at a time until it can be split, checking
/// that the split conserves the pending children.
fn first_split(seed: u64) -> Option<UtsBag> {
    let mut bag = UtsBag::new(seed, 8);
    let mut sink: Vec<DynBag<Sum>> = Vec::new();

    while !bag.is_empty() {
        let before = bag.pending();
        if let Some(half) = bag.split() {
            assert_eq!(bag.pending() + half.pending(), before);
            assert!(bag.pending() > 0);
            assert_eq!(half.explored(), 0);
            return Some(half);
        }
        bag.process(1, &mut sink);
    }
    assert!(sink.is_empty(), "UTS never gives bags away");
    None
}

#[test]
fn uts_split_conserves_pending_children() {
    // Some trees die out before anything is splittable; try a few roots.
    let half = (0..100).find_map(first_split).expect("no splittable tree in 100 seeds");
    assert!(half.pending() > 0);
    assert!(!half.is_empty());
}

#[test]
fn uts_count_does_not_depend_on_splitting() {
    let expected = explore_all(UtsBag::new(19, 6));

    let mut bag = UtsBag::new(19, 6);
    let mut pieces = Vec::new();
    let mut sink: Vec<DynBag<Sum>> = Vec::new();
    while !bag.is_empty() {
        bag.process(3, &mut sink);
        if let Some(half) = bag.split() {
            pieces.push(half);
        }
    }

    let total = bag.explored() + pieces.into_iter().map(explore_all).sum::<u64>();
    assert_eq!(total, expected);
}

#[test]
fn uts_merge_combines_frontier_and_count() {
    let mut a = UtsBag::new(1, 5);
    let b = UtsBag::new(2, 5);
    let (pending, explored) = (a.pending() + b.pending(), a.explored() + b.explored());
    let expected = explore_all(a.clone()) + explore_all(b.clone());

    a.merge(b);
    assert_eq!(a.pending(), pending);
    assert_eq!(a.explored(), explored);
    assert_eq!(explore_all(a), expected);
}

#[test]
fn uts_through_queue_matches_direct_run() {
    let expected = explore_all(UtsBag::new(19, 6));

    let mut queue: BagQueue<Sum> = BagQueue::new();
    queue.give_bag(UtsBag::new(19, 6));
    while !queue.is_empty() {
        queue.process(50);
    }
    assert_eq!(queue.result(Sum::default).sum, expected as i64);
}

#[test]
fn uts_split_off_queue_and_merged_back() {
    let expected = explore_all(UtsBag::new(5, 6));

    let mut queue: BagQueue<Sum> = BagQueue::new();
    queue.give_bag(UtsBag::new(5, 6));
    queue.process(10);

    // Whatever is split off and given back must be merged, not lost.
    if let Some(split) = queue.split() {
        queue.give_dyn(split);
    }
    assert_eq!(queue.len(), 1);

    while !queue.is_empty() {
        queue.process(10);
    }
    assert_eq!(queue.result(Sum::default).sum, expected as i64);
}
