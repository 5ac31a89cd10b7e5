//! `WorkspotTree`: the root entry plus everything shared by all traversals.

use ws_core::{ActionRef, Posture, PropId};

use crate::Entry;

/// Blend used when a selector inserts a posture transition, in seconds.
pub const TRANSITION_BLEND_SECS: f32 = 0.2;

// ── Transitions ───────────────────────────────────────────────────────────────

/// Animation played when the subject moves from one posture to another.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionAnim {
    pub from:   Posture,
    pub to:     Posture,
    pub action: ActionRef,
}

// ── Props ─────────────────────────────────────────────────────────────────────

/// A prop attached to the subject for the lifetime of a workspot visit.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GlobalProp {
    pub id:                     PropId,
    /// Socket on the subject's skeleton.  Opaque to the engine.
    pub socket:                 String,
    pub spawn_on_idle_change:   bool,
    pub despawn_on_idle_change: bool,
    pub despawn_on_reaction:    bool,
    /// Spawn only when entering this posture.  `None` means any posture.
    pub spawn_on_posture:       Option<Posture>,
}

impl GlobalProp {
    pub fn new(id: &str, socket: &str) -> Self {
        Self {
            id:                     PropId::new(id),
            socket:                 socket.to_owned(),
            spawn_on_idle_change:   true,
            despawn_on_idle_change: false,
            despawn_on_reaction:    true,
            spawn_on_posture:       None,
        }
    }

    pub fn only_in(mut self, posture: &str) -> Self {
        self.spawn_on_posture = Some(Posture::new(posture));
        self
    }

    pub fn despawn_on_idle_change(mut self, yes: bool) -> Self {
        self.despawn_on_idle_change = yes;
        self
    }

    pub fn keep_on_reaction(mut self) -> Self {
        self.despawn_on_reaction = false;
        self
    }

    /// Whether entering `posture` should spawn this prop.
    pub fn spawns_for(&self, posture: &Posture) -> bool {
        self.spawn_on_idle_change
            && self.spawn_on_posture.as_ref().is_none_or(|p| p.is_none() || p == posture)
    }
}

// ── Tree ──────────────────────────────────────────────────────────────────────

/// An authored behavior tree.
///
/// Immutable once built; instances share it behind an `Arc`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorkspotTree {
    /// Display name, used in logs.
    pub name:                  String,
    pub root:                  Option<Entry>,
    /// Consulted on every posture change; first match wins.
    pub transitions:           Vec<TransitionAnim>,
    pub transition_blend_secs: f32,
    pub props:                 Vec<GlobalProp>,
}

impl WorkspotTree {
    /// A tree with no root and no transitions.
    pub fn empty(name: &str) -> Self {
        Self {
            name:                  name.to_owned(),
            root:                  None,
            transitions:           Vec::new(),
            transition_blend_secs: TRANSITION_BLEND_SECS,
            props:                 Vec::new(),
        }
    }

    /// Transition action for `from -> to`, if one was authored.
    pub fn find_transition(&self, from: &Posture, to: &Posture) -> Option<ActionRef> {
        self.transitions
            .iter()
            .find(|t| &t.from == from && &t.to == to)
            .map(|t| t.action)
    }

    /// `true` when there is a root to traverse.
    pub fn is_valid(&self) -> bool {
        self.root.is_some()
    }

    /// Pre-order walk over every entry in the tree.
    pub fn visit<F: FnMut(&Entry)>(&self, mut f: F) {
        if let Some(root) = &self.root {
            root.visit(&mut f);
        }
    }

    pub fn entry_count(&self) -> usize {
        let mut n = 0;
        self.visit(|_| n += 1);
        n
    }

    /// Every action the tree can play, entries first then transitions,
    /// without duplicates and in first-seen order.
    pub fn referenced_actions(&self) -> Vec<ActionRef> {
        let mut out = Vec::new();
        let mut push = |a: ActionRef| {
            if a.is_valid() && !out.contains(&a) {
                out.push(a);
            }
        };
        self.visit(|e| {
            if let Some(a) = e.action() {
                push(a);
            }
        });
        for t in &self.transitions {
            push(t.action);
        }
        out
    }
}
