//! Engine-wide configuration.

use crate::{Posture, WsError, WsResult};

/// Top-level workspot configuration.
///
/// Typically loaded from a JSON/TOML file by the application and handed to
/// the registry.  Missing fields fall back to [`WorkspotConfig::default`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WorkspotConfig {
    /// Master RNG seed.  Each subject's traversal RNG is derived from it, so
    /// the same seed always replays the same weighted picks.
    pub seed: u64,

    /// Posture every traversal starts in.  Default: `"stand"`.
    pub initial_posture: Posture,

    /// Stop an instance once it has been occupied this many seconds.
    /// `None` lets the tree run until it exhausts or is stopped externally.
    pub occupy_limit_secs: Option<f32>,

    /// Blend-out used when an instance is force-stopped.  Default: 0.1 s.
    pub forced_blend_out_secs: f32,
}

impl Default for WorkspotConfig {
    fn default() -> Self {
        Self {
            seed:                  0,
            initial_posture:       Posture::default(),
            occupy_limit_secs:     None,
            forced_blend_out_secs: 0.1,
        }
    }
}

impl WorkspotConfig {
    /// Reject values no run can make sense of.
    pub fn validate(&self) -> WsResult<()> {
        if self.initial_posture.is_none() {
            return Err(WsError::Config("initial_posture must not be empty".into()));
        }
        if let Some(limit) = self.occupy_limit_secs {
            if !(limit > 0.0) {
                return Err(WsError::Config(format!(
                    "occupy_limit_secs must be positive, got {limit}"
                )));
            }
        }
        if !(self.forced_blend_out_secs >= 0.0) {
            return Err(WsError::Config(format!(
                "forced_blend_out_secs must be non-negative, got {}",
                self.forced_blend_out_secs
            )));
        }
        Ok(())
    }
}
