//! Per-entry flag bitset.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Authoring flags attached to every entry.
///
/// Traversal itself does not branch on these; they are carried so playback
/// and exit logic can ask e.g. "may this be interrupted?".
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntryFlags(u8);

impl EntryFlags {
    pub const NONE:               EntryFlags = EntryFlags(0);
    pub const SLOW_ENTER:         EntryFlags = EntryFlags(1 << 0);
    pub const SLOW_EXIT:          EntryFlags = EntryFlags(1 << 1);
    pub const FAST_EXIT:          EntryFlags = EntryFlags(1 << 2);
    pub const CAN_BE_INTERRUPTED: EntryFlags = EntryFlags(1 << 3);

    const ALL: u8 = 0b1111;

    /// Build from raw bits, dropping unknown ones.
    #[inline]
    pub fn from_bits_truncate(bits: u8) -> Self {
        EntryFlags(bits & Self::ALL)
    }

    #[inline]
    pub fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// `true` if every bit of `other` is set in `self`.
    #[inline]
    pub fn contains(self, other: EntryFlags) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub fn insert(&mut self, other: EntryFlags) {
        self.0 |= other.0;
    }

    #[inline]
    pub fn remove(&mut self, other: EntryFlags) {
        self.0 &= !other.0;
    }
}

impl BitOr for EntryFlags {
    type Output = EntryFlags;
    #[inline]
    fn bitor(self, rhs: EntryFlags) -> EntryFlags {
        EntryFlags(self.0 | rhs.0)
    }
}

impl BitOrAssign for EntryFlags {
    #[inline]
    fn bitor_assign(&mut self, rhs: EntryFlags) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for EntryFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [(EntryFlags, &str); 4] = [
            (EntryFlags::SLOW_ENTER,         "SLOW_ENTER"),
            (EntryFlags::SLOW_EXIT,          "SLOW_EXIT"),
            (EntryFlags::FAST_EXIT,          "FAST_EXIT"),
            (EntryFlags::CAN_BE_INTERRUPTED, "CAN_BE_INTERRUPTED"),
        ];
        if self.is_empty() {
            return f.write_str("EntryFlags(NONE)");
        }
        let set: Vec<&str> = NAMES
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect();
        write!(f, "EntryFlags({})", set.join(" | "))
    }
}
