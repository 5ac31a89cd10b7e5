//! `EntryIter`: one resumable cursor per entry variant.
//!
//! Iterators never own or borrow the tree.  They keep indices only, and the
//! caller hands them the `&Entry` they mirror on every call.  A cursor
//! driven with the wrong kind of entry logs a warning and reports `false`.

use ws_tree::{Entry, EntryKind, PauseWindow};

use crate::{Context, EntryData, LeafIter, RandomListIter, SelectorIter, SequenceIter};

#[derive(Clone, Debug)]
pub enum EntryIter {
    Leaf(LeafIter),
    Sequence(SequenceIter),
    RandomList(RandomListIter),
    Selector(SelectorIter),
}

impl EntryIter {
    /// A fresh cursor of the right shape for `entry`.
    pub fn for_entry(entry: &Entry) -> Self {
        match &entry.kind {
            EntryKind::AnimClip(_) | EntryKind::EntryAnim(_) | EntryKind::ExitAnim(_) => {
                EntryIter::Leaf(LeafIter::default())
            }
            EntryKind::Sequence(_) => EntryIter::Sequence(SequenceIter::default()),
            EntryKind::RandomList(_) => EntryIter::RandomList(RandomListIter::default()),
            EntryKind::Selector(_) => EntryIter::Selector(SelectorIter::default()),
        }
    }

    /// Advance to the next step.  `true` means [`get_data`](Self::get_data)
    /// now describes a new action; `false` means this cursor is exhausted.
    pub fn next(&mut self, entry: &Entry, ctx: &mut Context) -> bool {
        match self {
            EntryIter::Leaf(it) => it.next(entry),
            EntryIter::Sequence(it) => it.next(entry, ctx),
            EntryIter::RandomList(it) => it.next(entry, ctx),
            EntryIter::Selector(it) => it.next(entry, ctx),
        }
    }

    /// Output of the last successful `next`.  `None` before the first one.
    pub fn get_data(&self) -> Option<EntryData> {
        match self {
            EntryIter::Leaf(it) => it.get_data(),
            EntryIter::Sequence(it) => it.get_data(),
            EntryIter::RandomList(it) => it.get_data(),
            EntryIter::Selector(it) => it.get_data(),
        }
    }

    pub fn has_next(&self) -> bool {
        match self {
            EntryIter::Leaf(it) => it.has_next(),
            EntryIter::Sequence(it) => it.has_next(),
            EntryIter::RandomList(it) => it.has_next(),
            EntryIter::Selector(it) => it.has_next(),
        }
    }

    /// Return to the freshly-created state.
    pub fn reset(&mut self) {
        match self {
            EntryIter::Leaf(it) => it.reset(),
            EntryIter::Sequence(it) => it.reset(),
            EntryIter::RandomList(it) => it.reset(),
            EntryIter::Selector(it) => it.reset(),
        }
    }

    /// Pause window requested by a random list somewhere below this cursor
    /// for the step just produced.  Taking it clears it.
    pub fn take_pending_pause(&mut self) -> Option<PauseWindow> {
        match self {
            EntryIter::Leaf(_) => None,
            EntryIter::Sequence(it) => it.take_pending_pause(),
            EntryIter::RandomList(it) => it.take_pending_pause(),
            EntryIter::Selector(it) => it.take_pending_pause(),
        }
    }

    /// Path from this cursor down to the active leaf, e.g.
    /// `Sequence[1 lap 0] > Selector[2] > Leaf(played)`.
    pub fn debug_label(&self) -> String {
        match self {
            EntryIter::Leaf(it) if it.has_next() => "Leaf(pending)".to_owned(),
            EntryIter::Leaf(_) => "Leaf(played)".to_owned(),
            EntryIter::Sequence(it) => it.debug_label(),
            EntryIter::RandomList(it) => it.debug_label(),
            EntryIter::Selector(it) => it.debug_label(),
        }
    }
}

/// Iterator construction on [`Entry`].
pub trait EntryExt {
    /// A fresh cursor for this entry.  Pure: no randomness is drawn and the
    /// context is not modified.
    fn create_iterator(&self, ctx: &Context) -> EntryIter;
}

impl EntryExt for Entry {
    fn create_iterator(&self, _ctx: &Context) -> EntryIter {
        EntryIter::for_entry(self)
    }
}
