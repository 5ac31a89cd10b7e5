use tracing::warn;

use ws_tree::{DEFAULT_BLEND_SECS, Entry, EntryKind};

use crate::EntryData;

/// Cursor over a single-action entry: yields exactly once.
#[derive(Clone, Debug, Default)]
pub struct LeafIter {
    played: Option<EntryData>,
}

impl LeafIter {
    pub fn next(&mut self, entry: &Entry) -> bool {
        if self.played.is_some() {
            return false;
        }

        let (action, blend_in_secs, blend_out_secs) = match &entry.kind {
            EntryKind::AnimClip(c) => (c.action, c.blend_in_secs, c.blend_out_secs),
            EntryKind::EntryAnim(a) => (a.action, DEFAULT_BLEND_SECS, DEFAULT_BLEND_SECS),
            EntryKind::ExitAnim(x) => (x.action, x.blend_secs(), x.blend_secs()),
            other => {
                warn!(entry = %entry.id, kind = other.name(), "leaf iterator driven by a container");
                return false;
            }
        };

        self.played = Some(EntryData {
            action,
            posture: entry.posture.clone(),
            blend_in_secs,
            blend_out_secs,
        });
        true
    }

    pub fn get_data(&self) -> Option<EntryData> {
        self.played.clone()
    }

    pub fn has_next(&self) -> bool {
        self.played.is_none()
    }

    pub fn reset(&mut self) {
        self.played = None;
    }
}
