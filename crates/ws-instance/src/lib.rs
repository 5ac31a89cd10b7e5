//! `ws-instance`: runs workspot trees against an animation backend.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                 |
//! |--------------|----------------------------------------------------------|
//! | [`instance`] | `WorkspotInstance`, `WorkspotState`                      |
//! | [`registry`] | `WorkspotRegistry` (one instance per subject)            |
//! | [`playback`] | `Playback` trait (the animation backend seam)            |
//! | [`observer`] | `InstanceObserver` trait, `NoopObserver`                 |
//! | [`error`]    | `InstanceError`, `InstanceResult<T>`                     |
//!
//! # Feature flags
//!
//! | Flag      | Effect                                                  |
//! |-----------|---------------------------------------------------------|
//! | `fx-hash` | Use `rustc_hash::FxHashMap` for subject and prop maps.  |

pub mod error;
pub mod instance;
pub mod observer;
pub mod playback;
pub mod registry;


pub use error::{InstanceError, InstanceResult};
pub use instance::{WorkspotInstance, WorkspotState};
pub use observer::{InstanceObserver, NoopObserver};
pub use playback::Playback;
pub use registry::WorkspotRegistry;

#[cfg(feature = "fx-hash")]
pub(crate) type Map<K, V> = rustc_hash::FxHashMap<K, V>;

#[cfg(not(feature = "fx-hash"))]
pub(crate) type Map<K, V> = std::collections::HashMap<K, V>;
