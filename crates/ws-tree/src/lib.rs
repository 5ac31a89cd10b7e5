//! `ws-tree`: the authored half of the workspot engine.
//!
//! A [`WorkspotTree`] is a composite of [`Entry`] nodes plus a posture
//! transition table and a list of global props.  Trees are built once,
//! checked with [`WorkspotTree::validate`], and then shared read-only by
//! every traversal that plays them.
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`entry`]    | `Entry`, `EntryKind`, the six variant payloads            |
//! | [`tree`]     | `WorkspotTree`, `TransitionAnim`, `GlobalProp`            |
//! | [`builder`]  | `TreeBuilder` (id assignment)                             |
//! | [`validate`] | `ValidationIssue`                                         |

pub mod builder;
pub mod entry;
pub mod error;
pub mod tree;
pub mod validate;


pub use builder::TreeBuilder;
pub use entry::{
    AnimClip, ApproachTransform, DEFAULT_BLEND_SECS, Entry, EntryAnim, EntryKind, ExitAnim,
    FAST_EXIT_BLEND_SECS, PauseWindow, RandomList, Selector, Sequence,
};
pub use error::{TreeError, TreeResult};
pub use tree::{GlobalProp, TRANSITION_BLEND_SECS, TransitionAnim, WorkspotTree};
pub use validate::{MAX_BLEND_SECS, ValidationIssue};
