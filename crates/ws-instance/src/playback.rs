//! The animation backend seam.

use ws_core::{ActionRef, PropHandle, SubjectId};
use ws_iter::EntryData;
use ws_tree::GlobalProp;

/// Whatever actually plays actions and spawns props.
///
/// The engine hands over opaque [`ActionRef`]s and never inspects them.  All
/// calls are synchronous; a backend that plays asynchronously reports
/// completion through [`is_finished`](Playback::is_finished) on a later tick.
pub trait Playback {
    /// `false` once the subject has been despawned or otherwise lost.
    fn is_subject_valid(&self, subject: SubjectId) -> bool;

    /// Start playing `data.action` with the given blends.  Only called when
    /// the action is present.
    fn play(&mut self, subject: SubjectId, data: &EntryData);

    fn is_finished(&self, subject: SubjectId, action: ActionRef) -> bool;

    /// Stop `action`, blending out over `blend_out_secs`.
    fn stop(&mut self, subject: SubjectId, action: ActionRef, blend_out_secs: f32);

    /// Spawn and attach a prop.  `None` if the backend could not.
    fn attach_prop(&mut self, subject: SubjectId, prop: &GlobalProp) -> Option<PropHandle>;

    fn detach_prop(&mut self, subject: SubjectId, handle: PropHandle);
}
