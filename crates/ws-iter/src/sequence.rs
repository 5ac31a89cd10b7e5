use tracing::{debug, warn};

use ws_tree::{Entry, EntryKind, PauseWindow};

use crate::{Context, EntryData, EntryExt, EntryIter};

/// Cursor over a [`Sequence`](ws_tree::Sequence): children in order, lap
/// after lap.
#[derive(Clone, Debug, Default)]
pub struct SequenceIter {
    /// `None` before the first child of a lap.
    index:          Option<usize>,
    child:          Option<Box<EntryIter>>,
    loops_done:     u32,
    /// Whether the current lap has produced at least one step.
    lap_productive: bool,
    finished:       bool,
}

impl SequenceIter {
    pub fn next(&mut self, entry: &Entry, ctx: &mut Context) -> bool {
        let EntryKind::Sequence(seq) = &entry.kind else {
            warn!(entry = %entry.id, kind = entry.kind_name(), "sequence iterator on wrong entry");
            return false;
        };
        if self.finished {
            return false;
        }

        if let (Some(child), Some(i)) = (self.child.as_mut(), self.index) {
            if let Some(Some(child_entry)) = seq.entries.get(i) {
                if child.next(child_entry, ctx) {
                    return true;
                }
            }
            self.child = None;
        }

        loop {
            let next_index = self.index.map_or(0, |i| i + 1);

            if next_index >= seq.entries.len() {
                let more_laps = seq.loop_infinitely || self.loops_done + 1 < seq.max_loops;
                if !more_laps || !self.lap_productive {
                    if more_laps {
                        debug!(subject = %ctx.subject, entry = %entry.id, "lap produced nothing; ending sequence");
                    }
                    self.finished = true;
                    return false;
                }
                self.loops_done += 1;
                self.index = None;
                self.lap_productive = false;
                continue;
            }

            self.index = Some(next_index);
            let Some(child_entry) = &seq.entries[next_index] else {
                debug!(subject = %ctx.subject, entry = %entry.id, index = next_index, "skipping empty slot");
                continue;
            };

            let mut child = child_entry.create_iterator(ctx);
            if child.next(child_entry, ctx) {
                self.child = Some(Box::new(child));
                self.lap_productive = true;
                return true;
            }
        }
    }

    pub fn get_data(&self) -> Option<EntryData> {
        self.child.as_ref().and_then(|c| c.get_data())
    }

    pub fn has_next(&self) -> bool {
        !self.finished
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn take_pending_pause(&mut self) -> Option<PauseWindow> {
        self.child.as_mut().and_then(|c| c.take_pending_pause())
    }

    pub fn debug_label(&self) -> String {
        let head = match self.index {
            Some(i) => format!("Sequence[{i} lap {}]", self.loops_done),
            None => format!("Sequence[- lap {}]", self.loops_done),
        };
        match &self.child {
            Some(c) => format!("{head} > {}", c.debug_label()),
            None => head,
        }
    }
}
