//! Per-traversal state threaded through every iterator call.

use std::sync::Arc;

use ws_core::{ActionRef, Posture, SubjectId, TraversalRng};
use ws_tree::WorkspotTree;

/// Mutable state for one subject walking one tree.
///
/// Owned by the driving instance.  Iterators read the tree through it and
/// the selector is the only iterator that writes the posture fields.
pub struct Context {
    pub subject:          SubjectId,
    /// Shared, read-only.  Iterators look up transitions here.
    pub tree:             Arc<WorkspotTree>,
    pub rng:              TraversalRng,
    pub current_posture:  Posture,
    pub previous_posture: Posture,
}

impl Context {
    pub fn new(
        subject:         SubjectId,
        tree:            Arc<WorkspotTree>,
        rng:             TraversalRng,
        initial_posture: Posture,
    ) -> Self {
        Self {
            subject,
            tree,
            rng,
            previous_posture: initial_posture.clone(),
            current_posture:  initial_posture,
        }
    }

    /// Move to `posture`, remembering where we came from.
    pub fn enter_posture(&mut self, posture: Posture) {
        self.previous_posture = std::mem::replace(&mut self.current_posture, posture);
    }
}

/// What one successful `next` produced: the action to play and how.
#[derive(Clone, Debug, PartialEq)]
pub struct EntryData {
    /// `None` when the entry has no action; drivers treat it as finished
    /// immediately.
    pub action:         Option<ActionRef>,
    pub posture:        Posture,
    pub blend_in_secs:  f32,
    pub blend_out_secs: f32,
}
