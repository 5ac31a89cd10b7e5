//! Lifecycle callbacks for a running workspot.

use ws_core::{Posture, SubjectId};
use ws_iter::EntryData;

/// Callbacks invoked by [`WorkspotInstance`][crate::WorkspotInstance] as it
/// plays.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: completion counter
///
/// ```rust
/// use ws_core::SubjectId;
/// use ws_instance::InstanceObserver;
///
/// #[derive(Default)]
/// struct Done(usize);
///
/// impl InstanceObserver for Done {
///     fn on_completed(&mut self, _subject: SubjectId) {
///         self.0 += 1;
///     }
/// }
/// ```
pub trait InstanceObserver {
    /// A new step starts playing, after any pause requested before it.
    fn on_entry_started(&mut self, _subject: SubjectId, _data: &EntryData) {}

    fn on_posture_changed(&mut self, _subject: SubjectId, _old: &Posture, _new: &Posture) {}

    fn on_reaction(&mut self, _subject: SubjectId, _reaction: &str) {}

    /// Fires exactly once per instance, however it finished.
    fn on_completed(&mut self, _subject: SubjectId) {}
}

/// An [`InstanceObserver`] that does nothing.
pub struct NoopObserver;

impl InstanceObserver for NoopObserver {}
