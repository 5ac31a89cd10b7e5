//! `ws-iter`: pull-based traversal of a workspot tree.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                |
//! |-----------------|---------------------------------------------------------|
//! | [`context`]     | `Context` (per-traversal state), `EntryData`            |
//! | [`iter`]        | `EntryIter` dispatch enum, `EntryExt::create_iterator`  |
//! | [`leaf`]        | `LeafIter` for clips, entry and exit animations         |
//! | [`sequence`]    | `SequenceIter`                                          |
//! | [`random_list`] | `RandomListIter`                                        |
//! | [`selector`]    | `SelectorIter` (posture transitions)                    |
//! | [`weighted`]    | `choose_weighted`                                       |
//!
//! # Driving a traversal
//!
//! ```rust
//! use std::sync::Arc;
//! use ws_core::{ActionRef, Posture, SubjectId, TraversalRng};
//! use ws_iter::{Context, EntryExt};
//! use ws_tree::{Entry, Sequence, TreeBuilder};
//!
//! let tree = Arc::new(
//!     TreeBuilder::new("demo")
//!         .root(Entry::new(Sequence::new(vec![Entry::clip(ActionRef(1))])))
//!         .build(),
//! );
//! let mut ctx = Context::new(SubjectId(0), Arc::clone(&tree), TraversalRng::new(1), Posture::default());
//! let root = tree.root.as_ref().unwrap();
//! let mut it = root.create_iterator(&ctx);
//! assert!(it.next(root, &mut ctx));
//! assert_eq!(it.get_data().unwrap().action, Some(ActionRef(1)));
//! assert!(!it.next(root, &mut ctx));
//! ```

pub mod context;
pub mod iter;
pub mod leaf;
pub mod random_list;
pub mod selector;
pub mod sequence;
pub mod weighted;

#[cfg(test)]
mod tests;

pub use context::{Context, EntryData};
pub use iter::{EntryExt, EntryIter};
pub use leaf::LeafIter;
pub use random_list::RandomListIter;
pub use selector::SelectorIter;
pub use sequence::SequenceIter;
pub use weighted::choose_weighted;
