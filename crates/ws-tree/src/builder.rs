//! Fluent builder for [`WorkspotTree`].
//!
//! # Usage
//!
//! ```rust
//! use ws_core::ActionRef;
//! use ws_tree::{Entry, Sequence, TreeBuilder};
//!
//! let tree = TreeBuilder::new("bench")
//!     .root(Entry::new(Sequence::new(vec![
//!         Entry::clip(ActionRef(1)),
//!         Entry::clip(ActionRef(2)).posture("sit"),
//!     ])))
//!     .transition("stand", "sit", ActionRef(10))
//!     .build_validated()
//!     .unwrap();
//!
//! assert_eq!(tree.entry_count(), 3);
//! ```

use std::collections::HashSet;

use ws_core::{ActionRef, EntryId, Posture};

use crate::{Entry, GlobalProp, TransitionAnim, TreeError, TreeResult, WorkspotTree};

pub struct TreeBuilder {
    tree: WorkspotTree,
}

impl TreeBuilder {
    pub fn new(name: &str) -> Self {
        Self { tree: WorkspotTree::empty(name) }
    }

    pub fn root(mut self, root: Entry) -> Self {
        self.tree.root = Some(root);
        self
    }

    pub fn transition(mut self, from: &str, to: &str, action: ActionRef) -> Self {
        self.tree.transitions.push(TransitionAnim {
            from: Posture::new(from),
            to: Posture::new(to),
            action,
        });
        self
    }

    pub fn transition_blend(mut self, secs: f32) -> Self {
        self.tree.transition_blend_secs = secs;
        self
    }

    pub fn prop(mut self, prop: GlobalProp) -> Self {
        self.tree.props.push(prop);
        self
    }

    /// Finish the tree, assigning ids to every entry that lacks one.
    ///
    /// Explicit ids set with [`Entry::with_id`] are kept; fresh ids start
    /// above the largest explicit one and wrap to the lowest unused ids once
    /// they run into [`EntryId::INVALID`].
    pub fn build(mut self) -> WorkspotTree {
        if let Some(root) = self.tree.root.as_mut() {
            let mut used = HashSet::new();
            root.visit(&mut |e: &Entry| {
                if e.id.is_valid() {
                    used.insert(e.id.0);
                }
            });
            let next = used.iter().max().map_or(0, |m| m.wrapping_add(1));
            assign_ids(root, &mut IdMint { used, next });
        }
        self.tree
    }

    /// Like [`build`](Self::build) but rejects trees with authoring issues.
    pub fn build_validated(self) -> TreeResult<WorkspotTree> {
        let tree = self.build();
        let issues = tree.validate();
        if issues.is_empty() {
            Ok(tree)
        } else {
            Err(TreeError::Invalid { tree: tree.name.clone(), issues })
        }
    }
}

struct IdMint {
    used: HashSet<u32>,
    next: u32,
}

impl IdMint {
    fn fresh(&mut self) -> EntryId {
        loop {
            let candidate = self.next;
            self.next = self.next.wrapping_add(1);
            if candidate != EntryId::INVALID.0 && self.used.insert(candidate) {
                return EntryId(candidate);
            }
        }
    }
}

fn assign_ids(entry: &mut Entry, mint: &mut IdMint) {
    if !entry.id.is_valid() {
        entry.id = mint.fresh();
    }
    for child in entry.children_mut().iter_mut().flatten() {
        assign_ids(child, mint);
    }
}
