use tracing::{debug, warn};

use ws_core::TraversalRng;
use ws_tree::{Entry, EntryKind, PauseWindow, RandomList};

use crate::{Context, EntryData, EntryExt, EntryIter, choose_weighted};

/// Cursor over a [`RandomList`]: a batch of weighted picks drawn on the
/// first `next`, then played one after another.
#[derive(Clone, Debug, Default)]
pub struct RandomListIter {
    /// Indices into the list's entries.  `None` until the first `next`.
    picks:         Option<Vec<usize>>,
    /// Position in `picks`; `None` before the first one.
    cursor:        Option<usize>,
    child:         Option<Box<EntryIter>>,
    started_any:   bool,
    pending_pause: Option<PauseWindow>,
}

impl RandomListIter {
    pub fn next(&mut self, entry: &Entry, ctx: &mut Context) -> bool {
        let EntryKind::RandomList(list) = &entry.kind else {
            warn!(entry = %entry.id, kind = entry.kind_name(), "random-list iterator on wrong entry");
            return false;
        };

        if self.picks.is_none() {
            let picks = select_picks(list, &mut ctx.rng);
            debug!(subject = %ctx.subject, entry = %entry.id, ?picks, "random list drew picks");
            self.picks = Some(picks);
        }
        let picks = self.picks.as_deref().unwrap_or_default();

        if let (Some(child), Some(c)) = (self.child.as_mut(), self.cursor) {
            let slot = picks.get(c).and_then(|&i| list.entries.get(i)).and_then(Option::as_ref);
            if let Some(child_entry) = slot {
                if child.next(child_entry, ctx) {
                    return true;
                }
            }
            self.child = None;
        }

        loop {
            let next_cursor = self.cursor.map_or(0, |c| c + 1);
            let Some(&pick) = picks.get(next_cursor) else {
                return false;
            };
            self.cursor = Some(next_cursor);

            let Some(Some(child_entry)) = list.entries.get(pick) else {
                warn!(subject = %ctx.subject, entry = %entry.id, pick, "random list picked an empty slot");
                continue;
            };

            let mut child = child_entry.create_iterator(ctx);
            if child.next(child_entry, ctx) {
                if self.started_any && !list.pause.is_zero() {
                    self.pending_pause = Some(list.pause);
                }
                self.started_any = true;
                self.child = Some(Box::new(child));
                return true;
            }
        }
    }

    pub fn get_data(&self) -> Option<EntryData> {
        self.child.as_ref().and_then(|c| c.get_data())
    }

    pub fn has_next(&self) -> bool {
        match (&self.picks, self.cursor) {
            (None, _) => true,
            (Some(p), Some(c)) => c + 1 < p.len() || self.child.as_ref().is_some_and(|ch| ch.has_next()),
            (Some(p), None) => !p.is_empty(),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// The pause to wait before the step just produced, if one was asked
    /// for.  Clears it.
    pub fn take_pending_pause(&mut self) -> Option<PauseWindow> {
        let own = self.pending_pause.take();
        let inner = self.child.as_mut().and_then(|c| c.take_pending_pause());
        own.or(inner)
    }

    pub fn debug_label(&self) -> String {
        let total = self.picks.as_ref().map_or(0, Vec::len);
        let head = match self.cursor {
            Some(c) => format!("RandomList[{}/{total}]", c + 1),
            None => format!("RandomList[0/{total}]"),
        };
        match &self.child {
            Some(c) => format!("{head} > {}", c.debug_label()),
            None => head,
        }
    }
}

/// Draw how many clips to play and which, with replacement.
fn select_picks(list: &RandomList, rng: &mut TraversalRng) -> Vec<usize> {
    if list.entries.is_empty() {
        return Vec::new();
    }
    let lo = list.min_clips.min(list.max_clips);
    let hi = list.min_clips.max(list.max_clips);
    let count = (rng.gen_range(lo..=hi) as usize).min(list.entries.len());
    (0..count).map(|_| choose_weighted(&list.weights, rng)).collect()
}
