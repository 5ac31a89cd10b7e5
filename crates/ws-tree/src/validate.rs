//! Author-time checks.
//!
//! Validation never mutates the tree and never panics; it collects every
//! problem it finds so an editor can show them all at once.  Traversal
//! tolerates all of these at runtime, so a tree with issues still plays,
//! just not the way its author intended.

use std::collections::HashSet;
use std::fmt;

use ws_core::EntryId;

use crate::{Entry, EntryKind, PauseWindow, WorkspotTree};

/// Upper bound on authored clip blends, in seconds.
pub const MAX_BLEND_SECS: f32 = 2.0;

/// One problem found by [`WorkspotTree::validate`].
#[derive(Clone, Debug, PartialEq)]
pub enum ValidationIssue {
    MissingRoot,
    RootNotContainer { kind: &'static str },
    DuplicateEntryId(EntryId),
    MissingPosture { entry: EntryId },
    MissingAction { entry: EntryId },
    BlendOutOfRange { entry: EntryId, value: f32 },
    EmptyContainer { entry: EntryId, kind: &'static str },
    EmptySlot { entry: EntryId, index: usize },
    WeightCountMismatch { entry: EntryId, weights: usize, entries: usize },
    NegativeWeight { entry: EntryId, index: usize },
    ClipRangeInverted { entry: EntryId, min: u32, max: u32 },
    ZeroMaxLoops { entry: EntryId },
    PauseOutOfRange { entry: EntryId, min: f32, max: f32 },
    TransitionMissingPosture { index: usize },
    TransitionMissingAction { index: usize },
    PropMissingId { index: usize },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use ValidationIssue::*;
        match self {
            MissingRoot => write!(f, "tree has no root entry"),
            RootNotContainer { kind } => {
                write!(f, "root entry must be a container, found {kind}")
            }
            DuplicateEntryId(id) => write!(f, "{id} is used by more than one entry"),
            MissingPosture { entry } => write!(f, "{entry} has no posture"),
            MissingAction { entry } => write!(f, "{entry} has no action assigned"),
            BlendOutOfRange { entry, value } => {
                write!(f, "{entry} blend {value}s is outside [0, {MAX_BLEND_SECS}]")
            }
            EmptyContainer { entry, kind } => write!(f, "{kind} {entry} has no children"),
            EmptySlot { entry, index } => write!(f, "{entry} slot {index} is empty"),
            WeightCountMismatch { entry, weights, entries } => write!(
                f,
                "{entry} has {weights} weights for {entries} entries"
            ),
            NegativeWeight { entry, index } => {
                write!(f, "{entry} weight {index} is negative")
            }
            ClipRangeInverted { entry, min, max } => {
                write!(f, "{entry} min_clips {min} exceeds max_clips {max}")
            }
            ZeroMaxLoops { entry } => write!(f, "{entry} has max_loops 0"),
            PauseOutOfRange { entry, min, max } => {
                write!(f, "{entry} pause {min}..{max}s must be finite and non-negative")
            }
            TransitionMissingPosture { index } => {
                write!(f, "transition {index} is missing a from/to posture")
            }
            TransitionMissingAction { index } => write!(f, "transition {index} has no action"),
            PropMissingId { index } => write!(f, "prop {index} has no id"),
        }
    }
}

impl WorkspotTree {
    /// Collect every authoring problem in the tree.  Empty means clean.
    pub fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        match &self.root {
            None => issues.push(ValidationIssue::MissingRoot),
            Some(root) => {
                if !root.is_container() {
                    issues.push(ValidationIssue::RootNotContainer { kind: root.kind_name() });
                }
                let mut seen = HashSet::new();
                root.visit(&mut |e: &Entry| {
                    if e.id.is_valid() && !seen.insert(e.id) {
                        issues.push(ValidationIssue::DuplicateEntryId(e.id));
                    }
                    check_entry(e, &mut issues);
                });
            }
        }

        for (index, t) in self.transitions.iter().enumerate() {
            if t.from.is_none() || t.to.is_none() {
                issues.push(ValidationIssue::TransitionMissingPosture { index });
            }
            if !t.action.is_valid() {
                issues.push(ValidationIssue::TransitionMissingAction { index });
            }
        }

        for (index, p) in self.props.iter().enumerate() {
            if p.id.is_none() {
                issues.push(ValidationIssue::PropMissingId { index });
            }
        }

        issues
    }
}

fn check_entry(e: &Entry, issues: &mut Vec<ValidationIssue>) {
    let id = e.id;
    if e.posture.is_none() {
        issues.push(ValidationIssue::MissingPosture { entry: id });
    }

    match &e.kind {
        EntryKind::AnimClip(c) => {
            if c.action.is_none() {
                issues.push(ValidationIssue::MissingAction { entry: id });
            }
            for value in [c.blend_in_secs, c.blend_out_secs] {
                if !(0.0..=MAX_BLEND_SECS).contains(&value) {
                    issues.push(ValidationIssue::BlendOutOfRange { entry: id, value });
                }
            }
        }
        EntryKind::EntryAnim(a) => {
            if a.action.is_none() {
                issues.push(ValidationIssue::MissingAction { entry: id });
            }
        }
        EntryKind::ExitAnim(a) => {
            if a.action.is_none() {
                issues.push(ValidationIssue::MissingAction { entry: id });
            }
        }
        EntryKind::Sequence(s) => {
            if s.max_loops == 0 && !s.loop_infinitely {
                issues.push(ValidationIssue::ZeroMaxLoops { entry: id });
            }
        }
        EntryKind::RandomList(r) => {
            check_weights(id, &r.weights, r.entries.len(), issues);
            if r.min_clips > r.max_clips {
                issues.push(ValidationIssue::ClipRangeInverted {
                    entry: id,
                    min:   r.min_clips,
                    max:   r.max_clips,
                });
            }
            let PauseWindow { min_secs, max_secs } = r.pause;
            if [min_secs, max_secs].iter().any(|s| !s.is_finite() || *s < 0.0) {
                issues.push(ValidationIssue::PauseOutOfRange { entry: id, min: min_secs, max: max_secs });
            }
        }
        EntryKind::Selector(s) => {
            check_weights(id, &s.weights, s.entries.len(), issues);
        }
    }

    if e.is_container() {
        let children = e.children();
        if children.is_empty() {
            issues.push(ValidationIssue::EmptyContainer { entry: id, kind: e.kind_name() });
        }
        for (index, slot) in children.iter().enumerate() {
            if slot.is_none() {
                issues.push(ValidationIssue::EmptySlot { entry: id, index });
            }
        }
    }
}

fn check_weights(id: EntryId, weights: &[f32], entries: usize, issues: &mut Vec<ValidationIssue>) {
    if weights.len() != entries {
        issues.push(ValidationIssue::WeightCountMismatch {
            entry: id,
            weights: weights.len(),
            entries,
        });
    }
    for (index, w) in weights.iter().enumerate() {
        if *w < 0.0 {
            issues.push(ValidationIssue::NegativeWeight { entry: id, index });
        }
    }
}
