//! `ws-core`: foundational types for the workspot engine.
//!
//! Every other `ws-*` crate depends on this one.  It has no `ws-*`
//! dependencies and only `rand` and `thiserror` externally, plus optional
//! `serde`.
//!
//! # What lives here
//!
//! | Module      | Contents                                                 |
//! |-------------|----------------------------------------------------------|
//! | [`ids`]     | `EntryId`, `SubjectId`, `ActionRef`, `PropHandle`        |
//! | [`tag`]     | `Posture`, `PropId` (cheap-to-clone symbolic names)      |
//! | [`flags`]   | `EntryFlags` bitset                                      |
//! | [`rng`]     | `TraversalRng` (seeded per subject)                      |
//! | [`config`]  | `WorkspotConfig`                                         |
//! | [`error`]   | `WsError`, `WsResult`                                    |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod flags;
pub mod ids;
pub mod rng;
pub mod tag;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::WorkspotConfig;
pub use error::{WsError, WsResult};
pub use flags::EntryFlags;
pub use ids::{ActionRef, EntryId, PropHandle, SubjectId};
pub use rng::TraversalRng;
pub use tag::{Posture, PropId, STANDARD_POSTURES};
