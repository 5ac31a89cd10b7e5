//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys without
//! ceremony.  `ActionRef` and `PropHandle` are opaque handles minted by the
//! playback collaborator; the engine stores and forwards them but never looks
//! inside.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID".
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// `false` for the `INVALID` sentinel.
            #[inline(always)]
            pub fn is_valid(self) -> bool {
                self != Self::INVALID
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

typed_id! {
    /// Unique id of one node in an authored tree.  Assigned by `TreeBuilder`.
    pub struct EntryId(u32);
}

typed_id! {
    /// The acting subject (actor / NPC) a workspot instance is driving.
    pub struct SubjectId(u32);
}

typed_id! {
    /// Opaque handle to a playable action (an animation clip or montage).
    pub struct ActionRef(u32);
}

typed_id! {
    /// Opaque handle to an attached prop, returned by the playback backend.
    pub struct PropHandle(u32);
}
