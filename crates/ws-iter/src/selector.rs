use tracing::{debug, warn};

use ws_tree::{Entry, EntryKind, PauseWindow};

use crate::{Context, EntryData, EntryExt, EntryIter, choose_weighted};

/// Cursor over a [`Selector`](ws_tree::Selector).
///
/// Never exhausts: whenever the active child runs dry a fresh weighted pick
/// is made.  When the pick's posture differs from the subject's current one,
/// the authored transition is emitted first as its own step.
#[derive(Clone, Debug, Default)]
pub struct SelectorIter {
    /// Index of the selected entry and its cursor.
    child:      Option<(usize, Box<EntryIter>)>,
    /// Emitted by `get_data` until the next call to `next`.
    transition: Option<EntryData>,
}

impl SelectorIter {
    pub fn next(&mut self, entry: &Entry, ctx: &mut Context) -> bool {
        let EntryKind::Selector(sel) = &entry.kind else {
            warn!(entry = %entry.id, kind = entry.kind_name(), "selector iterator on wrong entry");
            return false;
        };

        // The child behind a transition was primed when it was queued.
        if self.transition.take().is_some() {
            return self.child.is_some();
        }

        if let Some((i, child)) = self.child.as_mut() {
            if let Some(Some(child_entry)) = sel.entries.get(*i) {
                if child.next(child_entry, ctx) {
                    return true;
                }
            }
            self.child = None;
        }

        let pick = choose_weighted(&sel.weights, &mut ctx.rng);
        let Some(Some(selected)) = sel.entries.get(pick) else {
            warn!(subject = %ctx.subject, entry = %entry.id, pick, "selector picked an empty or missing slot");
            return false;
        };
        let mut child = selected.create_iterator(ctx);

        if selected.posture != ctx.current_posture {
            let transition = ctx.tree.find_transition(&ctx.current_posture, &selected.posture);
            match transition {
                Some(action) => {
                    // Enter the new posture first so nested selectors see it
                    // and do not queue the same transition again.
                    let (from, before) = (ctx.current_posture.clone(), ctx.previous_posture.clone());
                    ctx.enter_posture(selected.posture.clone());
                    if !child.next(selected, ctx) {
                        ctx.current_posture = from;
                        ctx.previous_posture = before;
                        return false;
                    }
                    debug!(
                        subject = %ctx.subject,
                        %from,
                        to = %selected.posture,
                        %action,
                        "queueing posture transition"
                    );
                    let blend = ctx.tree.transition_blend_secs;
                    self.transition = Some(EntryData {
                        action:         Some(action),
                        posture:        selected.posture.clone(),
                        blend_in_secs:  blend,
                        blend_out_secs: blend,
                    });
                    self.child = Some((pick, Box::new(child)));
                    return true;
                }
                None => {
                    warn!(
                        subject = %ctx.subject,
                        from = %ctx.current_posture,
                        to = %selected.posture,
                        "no transition authored; jumping posture"
                    );
                    ctx.current_posture = selected.posture.clone();
                }
            }
        }

        if child.next(selected, ctx) {
            self.child = Some((pick, Box::new(child)));
            true
        } else {
            false
        }
    }

    pub fn get_data(&self) -> Option<EntryData> {
        if let Some(t) = &self.transition {
            return Some(t.clone());
        }
        self.child.as_ref().and_then(|(_, c)| c.get_data())
    }

    pub fn has_next(&self) -> bool {
        true
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn take_pending_pause(&mut self) -> Option<PauseWindow> {
        if self.transition.is_some() {
            return None;
        }
        self.child.as_mut().and_then(|(_, c)| c.take_pending_pause())
    }

    pub fn debug_label(&self) -> String {
        match (&self.transition, &self.child) {
            (Some(_), _) => "Selector[transition]".to_owned(),
            (None, Some((i, c))) => format!("Selector[{i}] > {}", c.debug_label()),
            (None, None) => "Selector[-]".to_owned(),
        }
    }
}
