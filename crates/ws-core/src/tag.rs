//! Symbolic name tags.
//!
//! Postures ("stand", "sit", …) and prop ids are compared on every selector
//! step and copied into every `EntryData`, so they wrap an `Arc<str>`:
//! cloning is a refcount bump and equality is a string compare.

use std::fmt;
use std::sync::Arc;

/// Posture names offered by authoring tools.  Any other name is also legal.
pub const STANDARD_POSTURES: &[&str] = &["stand", "sit", "crouch", "prone", "kneel"];

/// Generate a cheap-to-clone string tag type.
macro_rules! named_tag {
    ($(#[$attr:meta])* $vis:vis struct $name:ident;) => {
        $(#[$attr])*
        #[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        $vis struct $name(Arc<str>);

        impl $name {
            pub fn new(name: &str) -> Self {
                Self(Arc::from(name))
            }

            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// `true` for the empty name, which authoring treats as "none".
            #[inline]
            pub fn is_none(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(name: &str) -> Self {
                Self::new(name)
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                &*self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                &*self.0 == *other
            }
        }
    };
}

named_tag! {
    /// Symbolic name of a subject's resting state.
    pub struct Posture;
}

named_tag! {
    /// Identifier of a global prop declared on a tree.
    pub struct PropId;
}

impl Default for Posture {
    /// Every subject starts standing.
    fn default() -> Self {
        Self::new("stand")
    }
}
