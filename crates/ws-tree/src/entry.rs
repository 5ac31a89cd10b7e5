//! Entry nodes: the composite building blocks of a workspot tree.
//!
//! An [`Entry`] carries the attributes every node shares (id, posture,
//! flags) and an [`EntryKind`] payload.  Leaves wrap one playable action;
//! containers hold child *slots*.  A slot is `Option<Entry>`: `None` is an
//! authoring hole that traversal steps over instead of crashing on.

use ws_core::{ActionRef, EntryFlags, EntryId, Posture};

/// Default blend-in / blend-out for clips, in seconds.
pub const DEFAULT_BLEND_SECS: f32 = 0.3;

/// Blend used by a fast exit, in seconds.
pub const FAST_EXIT_BLEND_SECS: f32 = 0.1;

// ── Entry ─────────────────────────────────────────────────────────────────────

/// One node of the behavior tree.
///
/// Constructed once at authoring time and never mutated while a traversal
/// is running.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Entry {
    /// Unique within one tree.  `EntryId::INVALID` until `TreeBuilder` assigns one.
    pub id:      EntryId,
    /// Posture the subject is in while this entry plays.
    pub posture: Posture,
    pub flags:   EntryFlags,
    pub kind:    EntryKind,
}

/// The variant payload of an [`Entry`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EntryKind {
    AnimClip(AnimClip),
    EntryAnim(EntryAnim),
    ExitAnim(ExitAnim),
    Sequence(Sequence),
    RandomList(RandomList),
    Selector(Selector),
}

impl Entry {
    /// Wrap a variant payload with default posture (`"stand"`) and no flags.
    pub fn new(kind: impl Into<EntryKind>) -> Self {
        Self {
            id:      EntryId::INVALID,
            posture: Posture::default(),
            flags:   EntryFlags::NONE,
            kind:    kind.into(),
        }
    }

    /// Shorthand for a plain clip with default blends.
    pub fn clip(action: ActionRef) -> Self {
        Self::new(AnimClip::new(action))
    }

    pub fn posture(mut self, posture: &str) -> Self {
        self.posture = Posture::new(posture);
        self
    }

    pub fn flags(mut self, flags: EntryFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_id(mut self, id: EntryId) -> Self {
        self.id = id;
        self
    }

    /// Human-readable variant name, used in logs and debug labels.
    pub fn kind_name(&self) -> &'static str {
        self.kind.name()
    }

    /// `true` for Sequence, RandomList and Selector.
    pub fn is_container(&self) -> bool {
        self.kind.is_container()
    }

    /// Child slots of a container; empty for leaves.
    pub fn children(&self) -> &[Option<Entry>] {
        match &self.kind {
            EntryKind::Sequence(s)   => &s.entries,
            EntryKind::RandomList(r) => &r.entries,
            EntryKind::Selector(s)   => &s.entries,
            _                        => &[],
        }
    }

    pub(crate) fn children_mut(&mut self) -> &mut [Option<Entry>] {
        match &mut self.kind {
            EntryKind::Sequence(s)   => &mut s.entries,
            EntryKind::RandomList(r) => &mut r.entries,
            EntryKind::Selector(s)   => &mut s.entries,
            _                        => &mut [],
        }
    }

    /// The action a leaf plays.  `None` for containers and for leaves with
    /// no action assigned.
    pub fn action(&self) -> Option<ActionRef> {
        match &self.kind {
            EntryKind::AnimClip(c)  => c.action,
            EntryKind::EntryAnim(e) => e.action,
            EntryKind::ExitAnim(e)  => e.action,
            _                       => None,
        }
    }

    /// Depth-first, pre-order walk over this entry and every filled slot
    /// beneath it.
    pub fn visit<F: FnMut(&Entry)>(&self, f: &mut F) {
        f(self);
        for child in self.children().iter().flatten() {
            child.visit(f);
        }
    }
}

impl EntryKind {
    pub fn name(&self) -> &'static str {
        match self {
            EntryKind::AnimClip(_)   => "AnimClip",
            EntryKind::EntryAnim(_)  => "EntryAnim",
            EntryKind::ExitAnim(_)   => "ExitAnim",
            EntryKind::Sequence(_)   => "Sequence",
            EntryKind::RandomList(_) => "RandomList",
            EntryKind::Selector(_)   => "Selector",
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(
            self,
            EntryKind::Sequence(_) | EntryKind::RandomList(_) | EntryKind::Selector(_)
        )
    }
}

// ── Leaves ────────────────────────────────────────────────────────────────────

/// Plays a single action.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnimClip {
    pub action:         Option<ActionRef>,
    /// Seconds, author range `[0, 2]`.
    pub blend_in_secs:  f32,
    /// Seconds, author range `[0, 2]`.
    pub blend_out_secs: f32,
}

impl AnimClip {
    pub fn new(action: ActionRef) -> Self {
        Self {
            action:         Some(action),
            blend_in_secs:  DEFAULT_BLEND_SECS,
            blend_out_secs: DEFAULT_BLEND_SECS,
        }
    }

    pub fn blend(mut self, blend_in_secs: f32, blend_out_secs: f32) -> Self {
        self.blend_in_secs = blend_in_secs;
        self.blend_out_secs = blend_out_secs;
        self
    }
}

/// Where the subject should stand before an entry animation starts,
/// relative to the workspot origin.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ApproachTransform {
    pub position:    [f32; 3],
    pub yaw_degrees: f32,
}

/// Entry point into the workspot, with its approach transform.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntryAnim {
    pub action:     Option<ActionRef>,
    pub approach:   ApproachTransform,
    /// Walk in rather than snap.
    pub slow_enter: bool,
}

impl EntryAnim {
    pub fn new(action: ActionRef, approach: ApproachTransform) -> Self {
        Self { action: Some(action), approach, slow_enter: false }
    }

    pub fn slow(mut self) -> Self {
        self.slow_enter = true;
        self
    }
}

/// Exit animation.  A fast exit (combat, urgent) blends in 0.1 s.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExitAnim {
    pub action:    Option<ActionRef>,
    pub fast_exit: bool,
}

impl ExitAnim {
    pub fn new(action: ActionRef) -> Self {
        Self { action: Some(action), fast_exit: false }
    }

    pub fn fast(mut self) -> Self {
        self.fast_exit = true;
        self
    }

    /// Blend used for both ends of the exit clip.
    pub fn blend_secs(&self) -> f32 {
        if self.fast_exit { FAST_EXIT_BLEND_SECS } else { DEFAULT_BLEND_SECS }
    }
}

// ── Containers ────────────────────────────────────────────────────────────────

/// Plays its children in order, optionally for several laps.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sequence {
    pub entries:         Vec<Option<Entry>>,
    pub loop_infinitely: bool,
    /// Number of laps when not infinite.  Author minimum is 1.
    pub max_loops:       u32,
}

impl Sequence {
    pub fn new(entries: Vec<Entry>) -> Self {
        Self::with_slots(entries.into_iter().map(Some).collect())
    }

    /// Like [`new`](Self::new) but keeps authoring holes.
    pub fn with_slots(entries: Vec<Option<Entry>>) -> Self {
        Self { entries, loop_infinitely: false, max_loops: 1 }
    }

    pub fn loops(mut self, max_loops: u32) -> Self {
        self.max_loops = max_loops;
        self
    }

    pub fn forever(mut self) -> Self {
        self.loop_infinitely = true;
        self
    }
}

/// Seconds to wait between two picks of a [`RandomList`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PauseWindow {
    pub min_secs: f32,
    pub max_secs: f32,
}

impl PauseWindow {
    pub const NONE: PauseWindow = PauseWindow { min_secs: 0.0, max_secs: 0.0 };

    /// `true` when neither bound asks for a wait.
    pub fn is_zero(&self) -> bool {
        self.min_secs <= 0.0 && self.max_secs <= 0.0
    }
}

impl Default for PauseWindow {
    fn default() -> Self {
        PauseWindow { min_secs: 0.0, max_secs: 1.0 }
    }
}

/// Plays between `min_clips` and `max_clips` weighted picks of its children.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RandomList {
    pub entries:   Vec<Option<Entry>>,
    /// Parallel to `entries`.
    pub weights:   Vec<f32>,
    pub min_clips: u32,
    pub max_clips: u32,
    pub pause:     PauseWindow,
}

impl RandomList {
    /// Build from `(entry, weight)` pairs.  Plays exactly one pick by default.
    pub fn new(weighted: Vec<(Entry, f32)>) -> Self {
        let (entries, weights) = split_weighted(weighted);
        Self {
            entries,
            weights,
            min_clips: 1,
            max_clips: 1,
            pause:     PauseWindow::default(),
        }
    }

    pub fn clips(mut self, min_clips: u32, max_clips: u32) -> Self {
        self.min_clips = min_clips;
        self.max_clips = max_clips;
        self
    }

    pub fn pause(mut self, min_secs: f32, max_secs: f32) -> Self {
        self.pause = PauseWindow { min_secs, max_secs };
        self
    }
}

/// Picks one child at a time, forever, inserting posture transitions.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Selector {
    pub entries:      Vec<Option<Entry>>,
    /// Parallel to `entries`.
    pub weights:      Vec<f32>,
    /// Resting posture of this selector.  Carried for tools and backends;
    /// traversal does not read it.
    pub base_posture: Posture,
}

impl Selector {
    pub fn new(weighted: Vec<(Entry, f32)>) -> Self {
        let (entries, weights) = split_weighted(weighted);
        Self { entries, weights, base_posture: Posture::default() }
    }

    pub fn base_posture(mut self, posture: &str) -> Self {
        self.base_posture = Posture::new(posture);
        self
    }
}

fn split_weighted(weighted: Vec<(Entry, f32)>) -> (Vec<Option<Entry>>, Vec<f32>) {
    weighted.into_iter().map(|(e, w)| (Some(e), w)).unzip()
}

// ── Conversions ───────────────────────────────────────────────────────────────

macro_rules! into_kind {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for EntryKind {
                fn from(v: $variant) -> Self {
                    EntryKind::$variant(v)
                }
            }
        )*
    };
}

into_kind!(AnimClip, EntryAnim, ExitAnim, Sequence, RandomList, Selector);
