//! Unit tests for ws-iter.

use std::sync::Arc;

use ws_core::{ActionRef, Posture, SubjectId, TraversalRng};
use ws_tree::{Entry, EntryAnim, ExitAnim, RandomList, Selector, Sequence, TreeBuilder, WorkspotTree};

use crate::{Context, EntryExt, EntryIter, choose_weighted};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn clip(a: u32) -> Entry {
    Entry::clip(ActionRef(a))
}

fn tree_with(root: Entry) -> Arc<WorkspotTree> {
    Arc::new(TreeBuilder::new("test").root(root).build())
}

fn ctx(tree: &Arc<WorkspotTree>, seed: u64) -> Context {
    Context::new(SubjectId(0), Arc::clone(tree), TraversalRng::new(seed), Posture::default())
}

/// Pull up to `limit` steps from the root and return the action ids played.
fn drain(tree: &Arc<WorkspotTree>, ctx: &mut Context, limit: usize) -> Vec<u32> {
    let root = tree.root.as_ref().unwrap();
    let mut it = root.create_iterator(ctx);
    let mut out = Vec::new();
    while out.len() < limit && it.next(root, ctx) {
        out.push(it.get_data().unwrap().action.map_or(u32::MAX, |a| a.0));
    }
    out
}

// ── Leaves ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod leaf_tests {
    use super::*;

    #[test]
    fn yields_exactly_once_and_reset_replays() {
        let tree = tree_with(clip(7).posture("sit"));
        let mut c = ctx(&tree, 0);
        let root = tree.root.as_ref().unwrap();
        let mut it = root.create_iterator(&c);

        assert!(it.get_data().is_none());
        assert!(it.has_next());
        assert!(it.next(root, &mut c));
        let data = it.get_data().unwrap();
        assert_eq!(data.action, Some(ActionRef(7)));
        assert_eq!(data.posture, "sit");
        assert_eq!((data.blend_in_secs, data.blend_out_secs), (0.3, 0.3));
        assert!(!it.has_next());
        assert!(!it.next(root, &mut c));

        it.reset();
        assert!(it.get_data().is_none());
        assert!(it.next(root, &mut c));
    }

    #[test]
    fn entry_and_exit_blends() {
        let enter = tree_with(Entry::new(EntryAnim::new(ActionRef(1), Default::default()).slow()));
        let fast = tree_with(Entry::new(ExitAnim::new(ActionRef(2)).fast()));
        let slow = tree_with(Entry::new(ExitAnim::new(ActionRef(3))));

        for (tree, blend) in [(enter, 0.3), (fast, 0.1), (slow, 0.3)] {
            let mut c = ctx(&tree, 0);
            let root = tree.root.as_ref().unwrap();
            let mut it = root.create_iterator(&c);
            assert!(it.next(root, &mut c));
            let d = it.get_data().unwrap();
            assert_eq!((d.blend_in_secs, d.blend_out_secs), (blend, blend));
        }
    }

    #[test]
    fn wrong_entry_kind_reports_false() {
        let tree = tree_with(Entry::new(Sequence::new(vec![clip(1)])));
        let mut c = ctx(&tree, 0);
        let root = tree.root.as_ref().unwrap();
        let mut it = EntryIter::Leaf(Default::default());
        assert!(!it.next(root, &mut c));
        let mut it = EntryIter::Selector(Default::default());
        assert!(!it.next(root, &mut c));
    }
}

// ── Sequence ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod sequence_tests {
    use super::*;

    #[test]
    fn two_laps_then_exhausted_forever() {
        let tree = tree_with(Entry::new(Sequence::new(vec![clip(1), clip(2)]).loops(2)));
        let mut c = ctx(&tree, 0);
        let root = tree.root.as_ref().unwrap();
        let mut it = root.create_iterator(&c);

        let mut seen = Vec::new();
        while it.next(root, &mut c) {
            seen.push(it.get_data().unwrap().action.unwrap().0);
        }
        assert_eq!(seen, vec![1, 2, 1, 2]);
        assert!(!it.has_next());
        for _ in 0..5 {
            assert!(!it.next(root, &mut c));
        }
    }

    #[test]
    fn single_lap_by_default() {
        let tree = tree_with(Entry::new(Sequence::new(vec![clip(1), clip(2), clip(3)])));
        let mut c = ctx(&tree, 0);
        assert_eq!(drain(&tree, &mut c, 100), vec![1, 2, 3]);
    }

    #[test]
    fn infinite_keeps_going() {
        let tree = tree_with(Entry::new(Sequence::new(vec![clip(1), clip(2)]).forever()));
        let mut c = ctx(&tree, 0);
        let steps = drain(&tree, &mut c, 50);
        assert_eq!(steps.len(), 50);
        assert_eq!(&steps[..4], &[1, 2, 1, 2]);
    }

    #[test]
    fn empty_sequence_is_false_immediately() {
        let tree = tree_with(Entry::new(Sequence::new(vec![]).forever()));
        let mut c = ctx(&tree, 0);
        assert!(drain(&tree, &mut c, 10).is_empty());
    }

    #[test]
    fn empty_slots_are_skipped() {
        let tree = tree_with(Entry::new(
            Sequence::with_slots(vec![None, Some(clip(1)), None, Some(clip(2)), None]).loops(2),
        ));
        let mut c = ctx(&tree, 0);
        assert_eq!(drain(&tree, &mut c, 100), vec![1, 2, 1, 2]);
    }

    #[test]
    fn looping_sequence_of_holes_terminates() {
        let tree = tree_with(Entry::new(Sequence::with_slots(vec![None, None]).forever()));
        let mut c = ctx(&tree, 0);
        assert!(drain(&tree, &mut c, 10).is_empty());
    }

    #[test]
    fn unproductive_child_is_skipped() {
        let tree = tree_with(Entry::new(Sequence::new(vec![
            clip(1),
            Entry::new(Sequence::new(vec![])),
            clip(2),
        ])));
        let mut c = ctx(&tree, 0);
        assert_eq!(drain(&tree, &mut c, 100), vec![1, 2]);
    }

    #[test]
    fn nested_sequences_flatten_in_order() {
        let inner = Entry::new(Sequence::new(vec![clip(2), clip(3)]).loops(2));
        let tree = tree_with(Entry::new(Sequence::new(vec![clip(1), inner, clip(4)])));
        let mut c = ctx(&tree, 0);
        assert_eq!(drain(&tree, &mut c, 100), vec![1, 2, 3, 2, 3, 4]);
    }

    #[test]
    fn debug_label_shows_path() {
        let tree = tree_with(Entry::new(Sequence::new(vec![clip(1), clip(2)])));
        let mut c = ctx(&tree, 0);
        let root = tree.root.as_ref().unwrap();
        let mut it = root.create_iterator(&c);
        assert_eq!(it.debug_label(), "Sequence[- lap 0]");
        it.next(root, &mut c);
        it.next(root, &mut c);
        assert_eq!(it.debug_label(), "Sequence[1 lap 0] > Leaf(played)");
    }
}

// ── RandomList ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod random_list_tests {
    use super::*;

    #[test]
    fn step_count_within_bounds() {
        let list = RandomList::new(vec![(clip(1), 1.0), (clip(2), 1.0), (clip(3), 1.0)]).clips(2, 3);
        let tree = tree_with(Entry::new(list));
        for seed in 0..200 {
            let mut c = ctx(&tree, seed);
            let n = drain(&tree, &mut c, 100).len();
            assert!((2..=3).contains(&n), "seed {seed}: {n} steps");
        }
    }

    #[test]
    fn count_is_capped_at_entry_count() {
        let list = RandomList::new(vec![(clip(1), 1.0), (clip(2), 1.0)]).clips(5, 9);
        let tree = tree_with(Entry::new(list));
        for seed in 0..50 {
            let mut c = ctx(&tree, seed);
            assert_eq!(drain(&tree, &mut c, 100).len(), 2);
        }
    }

    #[test]
    fn inverted_bounds_are_tolerated() {
        let list = RandomList::new(vec![(clip(1), 1.0), (clip(2), 1.0), (clip(3), 1.0)]).clips(3, 1);
        let tree = tree_with(Entry::new(list));
        for seed in 0..50 {
            let mut c = ctx(&tree, seed);
            let n = drain(&tree, &mut c, 100).len();
            assert!((1..=3).contains(&n));
        }
    }

    #[test]
    fn picks_are_with_replacement() {
        // One heavy entry, three picks: repeats must be possible.
        let list = RandomList::new(vec![(clip(1), 1000.0), (clip(2), 0.0), (clip(3), 0.0)]).clips(3, 3);
        let tree = tree_with(Entry::new(list));
        let mut c = ctx(&tree, 4);
        assert_eq!(drain(&tree, &mut c, 100), vec![1, 1, 1]);
    }

    #[test]
    fn empty_list_is_exhausted() {
        let tree = tree_with(Entry::new(RandomList::new(vec![]).clips(1, 3)));
        let mut c = ctx(&tree, 0);
        assert!(drain(&tree, &mut c, 10).is_empty());
    }

    #[test]
    fn pause_requested_between_picks_only() {
        let list = RandomList::new(vec![(clip(1), 1.0), (clip(2), 1.0)]).clips(2, 2).pause(0.5, 1.5);
        let tree = tree_with(Entry::new(list));
        let mut c = ctx(&tree, 3);
        let root = tree.root.as_ref().unwrap();
        let mut it = root.create_iterator(&c);

        assert!(it.next(root, &mut c));
        assert_eq!(it.take_pending_pause(), None);
        assert!(it.next(root, &mut c));
        let pause = it.take_pending_pause().unwrap();
        assert_eq!((pause.min_secs, pause.max_secs), (0.5, 1.5));
        // Taking clears it.
        assert_eq!(it.take_pending_pause(), None);
        assert!(!it.next(root, &mut c));
    }

    #[test]
    fn zero_pause_window_never_requests() {
        let list = RandomList::new(vec![(clip(1), 1.0), (clip(2), 1.0)]).clips(2, 2).pause(0.0, 0.0);
        let tree = tree_with(Entry::new(list));
        let mut c = ctx(&tree, 0);
        let root = tree.root.as_ref().unwrap();
        let mut it = root.create_iterator(&c);
        while it.next(root, &mut c) {
            assert_eq!(it.take_pending_pause(), None);
        }
    }

    #[test]
    fn pause_surfaces_through_enclosing_sequence() {
        let list = RandomList::new(vec![(clip(1), 1.0), (clip(2), 1.0)]).clips(2, 2).pause(1.0, 2.0);
        let tree = tree_with(Entry::new(Sequence::new(vec![Entry::new(list)])));
        let mut c = ctx(&tree, 0);
        let root = tree.root.as_ref().unwrap();
        let mut it = root.create_iterator(&c);
        assert!(it.next(root, &mut c));
        assert!(it.take_pending_pause().is_none());
        assert!(it.next(root, &mut c));
        assert!(it.take_pending_pause().is_some());
    }
}

// ── Weighted pick ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod weighted_tests {
    use super::*;

    #[test]
    fn one_to_three_is_roughly_25_75() {
        let mut rng = TraversalRng::new(42);
        let n = 20_000;
        let ones = (0..n).filter(|_| choose_weighted(&[1.0, 3.0], &mut rng) == 1).count();
        let share = ones as f64 / n as f64;
        assert!((0.72..0.78).contains(&share), "share of index 1 = {share}");
    }

    #[test]
    fn all_zero_weights_fall_back_to_uniform() {
        let mut rng = TraversalRng::new(1);
        let mut counts = [0usize; 4];
        for _ in 0..4_000 {
            counts[choose_weighted(&[0.0; 4], &mut rng)] += 1;
        }
        for c in counts {
            assert!(c > 800, "counts {counts:?}");
        }
    }

    #[test]
    fn empty_weights_pick_zero() {
        let mut rng = TraversalRng::new(1);
        assert_eq!(choose_weighted(&[], &mut rng), 0);
    }

    #[test]
    fn negative_and_nan_weights_never_win() {
        let mut rng = TraversalRng::new(5);
        for _ in 0..1_000 {
            assert_eq!(choose_weighted(&[-5.0, f32::NAN, 2.0], &mut rng), 2);
        }
    }
}

// ── Selector ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod selector_tests {
    use super::*;

    fn sit_selector(with_transition: bool) -> Arc<WorkspotTree> {
        let mut b = TreeBuilder::new("sel")
            .root(Entry::new(Selector::new(vec![(clip(4).posture("sit"), 1.0)])));
        if with_transition {
            b = b.transition("stand", "sit", ActionRef(10));
        }
        Arc::new(b.build())
    }

    #[test]
    fn never_exhausts() {
        let tree = tree_with(Entry::new(Selector::new(vec![(clip(1), 1.0), (clip(2), 1.0)])));
        let mut c = ctx(&tree, 0);
        let root = tree.root.as_ref().unwrap();
        let mut it = root.create_iterator(&c);
        for _ in 0..100 {
            assert!(it.has_next());
            assert!(it.next(root, &mut c));
        }
    }

    #[test]
    fn inserts_transition_before_posture_change() {
        let tree = sit_selector(true);
        let mut c = ctx(&tree, 0);
        let root = tree.root.as_ref().unwrap();
        let mut it = root.create_iterator(&c);

        assert!(it.next(root, &mut c));
        let t = it.get_data().unwrap();
        assert_eq!(t.action, Some(ActionRef(10)));
        assert_eq!(t.posture, "sit");
        assert_eq!((t.blend_in_secs, t.blend_out_secs), (0.2, 0.2));
        assert_eq!(it.debug_label(), "Selector[transition]");

        assert!(it.next(root, &mut c));
        assert_eq!(it.get_data().unwrap().action, Some(ActionRef(4)));
        assert_eq!(c.current_posture, "sit");
        assert_eq!(c.previous_posture, "stand");

        // Already sitting: no second transition.
        assert!(it.next(root, &mut c));
        assert_eq!(it.get_data().unwrap().action, Some(ActionRef(4)));
    }

    #[test]
    fn nested_selector_behind_transition_does_not_repeat_it() {
        let inner = Entry::new(Selector::new(vec![(clip(4).posture("sit"), 1.0)])).posture("sit");
        let tree = Arc::new(
            TreeBuilder::new("nested")
                .root(Entry::new(Selector::new(vec![(inner, 1.0)])))
                .transition("stand", "sit", ActionRef(10))
                .build(),
        );
        let mut c = ctx(&tree, 0);
        assert_eq!(drain(&tree, &mut c, 3), vec![10, 4, 4]);
        assert_eq!(c.current_posture, "sit");
        assert_eq!(c.previous_posture, "stand");
    }

    #[test]
    fn sequence_wrapped_selector_behind_transition_does_not_repeat_it() {
        let inner = Entry::new(Selector::new(vec![(clip(4).posture("sit"), 1.0)])).posture("sit");
        let seq = Entry::new(Sequence::new(vec![inner])).posture("sit");
        let tree = Arc::new(
            TreeBuilder::new("nested")
                .root(Entry::new(Selector::new(vec![(seq, 1.0)])))
                .transition("stand", "sit", ActionRef(10))
                .build(),
        );
        let mut c = ctx(&tree, 0);
        assert_eq!(drain(&tree, &mut c, 3), vec![10, 4, 4]);
        assert_eq!(c.current_posture, "sit");
        assert_eq!(c.previous_posture, "stand");
    }

    #[test]
    fn failed_priming_restores_posture() {
        let empty = Entry::new(Sequence::new(vec![])).posture("sit");
        let tree = Arc::new(
            TreeBuilder::new("empty")
                .root(Entry::new(Selector::new(vec![(empty, 1.0)])))
                .transition("stand", "sit", ActionRef(10))
                .build(),
        );
        let mut c = ctx(&tree, 0);
        c.previous_posture = Posture::new("lie");
        let root = tree.root.as_ref().unwrap();
        let mut it = root.create_iterator(&c);
        assert!(!it.next(root, &mut c));
        assert_eq!(c.current_posture, "stand");
        assert_eq!(c.previous_posture, "lie");
    }

    #[test]
    fn missing_transition_jumps_posture() {
        let tree = sit_selector(false);
        let mut c = ctx(&tree, 0);
        assert_eq!(drain(&tree, &mut c, 3), vec![4, 4, 4]);
        assert_eq!(c.current_posture, "sit");
    }

    #[test]
    fn transition_back_and_forth() {
        let tree = Arc::new(
            TreeBuilder::new("sel")
                .root(Entry::new(Selector::new(vec![
                    (clip(1), 1.0),
                    (clip(2).posture("sit"), 1.0),
                ])))
                .transition("stand", "sit", ActionRef(10))
                .transition("sit", "stand", ActionRef(11))
                .build(),
        );
        let mut c = ctx(&tree, 9);
        let steps = drain(&tree, &mut c, 400);
        // Every posture change is bridged by the matching transition.
        let mut posture_sit = false;
        for w in steps.iter() {
            match *w {
                10 => { assert!(!posture_sit); posture_sit = true; }
                11 => { assert!(posture_sit); posture_sit = false; }
                1 => assert!(!posture_sit),
                2 => assert!(posture_sit),
                other => panic!("unexpected action {other}"),
            }
        }
        assert!(steps.contains(&10) && steps.contains(&11));
    }

    #[test]
    fn container_child_is_advanced_before_repicking() {
        let tree = tree_with(Entry::new(Selector::new(vec![(
            Entry::new(Sequence::new(vec![clip(1), clip(2), clip(3)])),
            1.0,
        )])));
        let mut c = ctx(&tree, 0);
        assert_eq!(drain(&tree, &mut c, 6), vec![1, 2, 3, 1, 2, 3]);
    }

    #[test]
    fn out_of_range_pick_is_false() {
        // Extra weight with no entry behind it.
        let mut sel = Selector::new(vec![(clip(1), 0.0)]);
        sel.weights.push(1.0);
        let tree = tree_with(Entry::new(sel));
        let mut c = ctx(&tree, 0);
        assert!(drain(&tree, &mut c, 5).is_empty());
    }

    #[test]
    fn empty_slot_pick_is_false() {
        let mut sel = Selector::new(vec![]);
        sel.entries.push(None);
        sel.weights.push(1.0);
        let tree = tree_with(Entry::new(sel));
        let mut c = ctx(&tree, 0);
        assert!(drain(&tree, &mut c, 5).is_empty());
    }

    #[test]
    fn same_seed_same_picks() {
        let tree = tree_with(Entry::new(Selector::new(vec![
            (clip(1), 1.0),
            (clip(2), 2.0),
            (clip(3), 3.0),
        ])));
        let mut a = ctx(&tree, 77);
        let mut b = ctx(&tree, 77);
        assert_eq!(drain(&tree, &mut a, 64), drain(&tree, &mut b, 64));
    }
}
