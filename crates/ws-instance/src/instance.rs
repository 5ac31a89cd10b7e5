//! `WorkspotInstance`: drives one subject through one tree.
//!
//! # State machine
//!
//! ```text
//! Inactive ─setup─▶ Starting ─▶ Playing ─exhausted / stop─▶ Stopping ─▶ Finished
//!     ▲                 │
//!     └──setup failed───┘
//! ```
//!
//! Each [`tick`](WorkspotInstance::tick) asks the playback backend whether
//! the current action is done and, if so, pulls the next step from the root
//! iterator.  Posture changes between steps drive the tree's global props.

use std::sync::Arc;

use tracing::{debug, info, warn};

use ws_core::{Posture, PropHandle, PropId, SubjectId, TraversalRng, WorkspotConfig, WsError};
use ws_iter::{Context, EntryData, EntryExt, EntryIter};
use ws_tree::{PauseWindow, WorkspotTree};

use crate::{InstanceError, InstanceObserver, InstanceResult, Map, Playback};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WorkspotState {
    /// Built but not set up, or setup failed.
    Inactive,
    Starting,
    Playing,
    Stopping,
    Finished,
}

pub struct WorkspotInstance {
    subject:               SubjectId,
    tree:                  Arc<WorkspotTree>,
    state:                 WorkspotState,
    ctx:                   Context,
    root_iter:             Option<EntryIter>,
    /// The step being played, or waited on while `pause_remaining` is set.
    current:               Option<EntryData>,
    current_posture:       Posture,
    previous_posture:      Posture,
    /// Seconds since the current action started.
    play_time_secs:        f32,
    /// Seconds since setup.
    occupied_secs:         f32,
    pause_remaining:       Option<f32>,
    props:                 Map<PropId, PropHandle>,
    completion_fired:      bool,
    forced_blend_out_secs: f32,
}

impl WorkspotInstance {
    /// A fresh, `Inactive` instance.  Its traversal RNG is derived from
    /// `config.seed` and `subject`.
    pub fn new(subject: SubjectId, tree: Arc<WorkspotTree>, config: &WorkspotConfig) -> Self {
        let posture = config.initial_posture.clone();
        let ctx = Context::new(
            subject,
            Arc::clone(&tree),
            TraversalRng::for_subject(config.seed, subject),
            posture.clone(),
        );
        Self {
            subject,
            tree,
            state: WorkspotState::Inactive,
            ctx,
            root_iter: None,
            current: None,
            previous_posture: posture.clone(),
            current_posture: posture,
            play_time_secs: 0.0,
            occupied_secs: 0.0,
            pause_remaining: None,
            props: Map::default(),
            completion_fired: false,
            forced_blend_out_secs: config.forced_blend_out_secs,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// Prime the root iterator and start the first action.
    ///
    /// On error the instance stays `Inactive` and nothing has been played.
    pub fn setup<P: Playback, O: InstanceObserver>(
        &mut self,
        playback: &mut P,
        observer: &mut O,
    ) -> InstanceResult<()> {
        if self.state != WorkspotState::Inactive {
            return Err(InstanceError::AlreadyStarted { subject: self.subject, state: self.state });
        }
        if !playback.is_subject_valid(self.subject) {
            return Err(WsError::InvalidSubject(self.subject).into());
        }

        let tree = Arc::clone(&self.tree);
        let Some(root) = tree.root.as_ref() else {
            return Err(InstanceError::MissingRoot(tree.name.clone()));
        };

        self.state = WorkspotState::Starting;
        let mut iter = root.create_iterator(&self.ctx);
        let first = if iter.next(root, &mut self.ctx) { iter.get_data() } else { None };
        let Some(first) = first else {
            self.state = WorkspotState::Inactive;
            return Err(InstanceError::NothingToPlay(tree.name.clone()));
        };

        info!(subject = %self.subject, tree = %tree.name, "workspot started");
        self.root_iter = Some(iter);
        self.adopt(first, None, playback, observer);
        self.state = WorkspotState::Playing;
        Ok(())
    }

    /// Advance by `dt` seconds.  No-op unless `Playing`.
    pub fn tick<P: Playback, O: InstanceObserver>(
        &mut self,
        dt: f32,
        playback: &mut P,
        observer: &mut O,
    ) {
        if self.state != WorkspotState::Playing {
            return;
        }
        if !playback.is_subject_valid(self.subject) {
            warn!(subject = %self.subject, "subject lost; force-stopping workspot");
            self.stop(true, playback, observer);
            return;
        }

        self.occupied_secs += dt;

        if let Some(remaining) = self.pause_remaining.as_mut() {
            *remaining -= dt;
            if *remaining > 0.0 {
                return;
            }
            self.pause_remaining = None;
            self.play_current(playback, observer);
            return;
        }

        self.play_time_secs += dt;
        let finished = match self.current.as_ref().and_then(|d| d.action) {
            Some(action) => playback.is_finished(self.subject, action),
            None => true,
        };
        if finished {
            self.advance(playback, observer);
        }
    }

    /// Stop playing, release every prop and move to `Finished`.
    ///
    /// Safe to call repeatedly; only the first call has side effects and
    /// completion is reported once.
    pub fn stop<P: Playback, O: InstanceObserver>(
        &mut self,
        force: bool,
        playback: &mut P,
        observer: &mut O,
    ) {
        if matches!(self.state, WorkspotState::Stopping | WorkspotState::Finished) {
            return;
        }
        self.state = WorkspotState::Stopping;

        // A step still waiting out its pause never reached playback.
        if self.pause_remaining.take().is_none() {
            if let Some(data) = &self.current {
                if let Some(action) = data.action {
                    let blend = if force { self.forced_blend_out_secs } else { data.blend_out_secs };
                    playback.stop(self.subject, action, blend);
                }
            }
        }

        for (_, handle) in self.props.drain() {
            playback.detach_prop(self.subject, handle);
        }

        self.state = WorkspotState::Finished;
        info!(subject = %self.subject, tree = %self.tree.name, force, "workspot finished");
        if !self.completion_fired {
            self.completion_fired = true;
            observer.on_completed(self.subject);
        }
    }

    /// React to an external stimulus: props flagged `despawn_on_reaction`
    /// are released.  Ignored unless `Playing`.
    pub fn trigger_reaction<P: Playback, O: InstanceObserver>(
        &mut self,
        reaction: &str,
        playback: &mut P,
        observer: &mut O,
    ) {
        if self.state != WorkspotState::Playing {
            return;
        }
        let tree = Arc::clone(&self.tree);
        for prop in tree.props.iter().filter(|p| p.despawn_on_reaction) {
            if let Some(handle) = self.props.remove(&prop.id) {
                playback.detach_prop(self.subject, handle);
            }
        }
        debug!(subject = %self.subject, reaction, "reaction triggered");
        observer.on_reaction(self.subject, reaction);
    }

    // ── Stepping ──────────────────────────────────────────────────────────

    fn advance<P: Playback, O: InstanceObserver>(&mut self, playback: &mut P, observer: &mut O) {
        // Postures may have moved through steps the selector never saw.
        self.ctx.current_posture = self.current_posture.clone();
        self.ctx.previous_posture = self.previous_posture.clone();

        let tree = Arc::clone(&self.tree);
        let step = match (tree.root.as_ref(), self.root_iter.as_mut()) {
            (Some(root), Some(iter)) => {
                if iter.next(root, &mut self.ctx) {
                    iter.get_data().map(|data| (data, iter.take_pending_pause()))
                } else {
                    None
                }
            }
            _ => None,
        };

        match step {
            Some((data, pause)) => self.adopt(data, pause, playback, observer),
            None => {
                debug!(subject = %self.subject, "traversal exhausted");
                self.stop(false, playback, observer);
            }
        }
    }

    fn adopt<P: Playback, O: InstanceObserver>(
        &mut self,
        data: EntryData,
        pause: Option<PauseWindow>,
        playback: &mut P,
        observer: &mut O,
    ) {
        if data.posture != self.current_posture {
            let old = std::mem::replace(&mut self.current_posture, data.posture.clone());
            self.previous_posture = old;
            self.on_posture_change(playback, observer);
        }

        self.play_time_secs = 0.0;
        self.current = Some(data);

        match pause {
            Some(window) => {
                let wait = self.ctx.rng.range_f32(window.min_secs, window.max_secs);
                debug!(subject = %self.subject, wait, "pausing before next pick");
                self.pause_remaining = Some(wait);
            }
            None => self.play_current(playback, observer),
        }
    }

    fn play_current<P: Playback, O: InstanceObserver>(&mut self, playback: &mut P, observer: &mut O) {
        let Some(data) = &self.current else { return };
        debug!(
            subject = %self.subject,
            action = ?data.action,
            posture = %data.posture,
            step = %self.debug_label(),
            "playing step"
        );
        observer.on_entry_started(self.subject, data);
        if data.action.is_some() {
            playback.play(self.subject, data);
        }
    }

    fn on_posture_change<P: Playback, O: InstanceObserver>(&mut self, playback: &mut P, observer: &mut O) {
        debug!(
            subject = %self.subject,
            from = %self.previous_posture,
            to = %self.current_posture,
            "posture changed"
        );
        observer.on_posture_changed(self.subject, &self.previous_posture, &self.current_posture);

        let tree = Arc::clone(&self.tree);
        for prop in &tree.props {
            if prop.despawn_on_idle_change {
                if let Some(handle) = self.props.remove(&prop.id) {
                    playback.detach_prop(self.subject, handle);
                }
            }
            if prop.spawns_for(&self.current_posture) && !self.props.contains_key(&prop.id) {
                match playback.attach_prop(self.subject, prop) {
                    Some(handle) => {
                        self.props.insert(prop.id.clone(), handle);
                    }
                    None => warn!(subject = %self.subject, prop = %prop.id, "prop failed to attach"),
                }
            }
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn subject(&self) -> SubjectId {
        self.subject
    }

    pub fn tree(&self) -> &Arc<WorkspotTree> {
        &self.tree
    }

    pub fn state(&self) -> WorkspotState {
        self.state
    }

    pub fn current_data(&self) -> Option<&EntryData> {
        self.current.as_ref()
    }

    pub fn current_posture(&self) -> &Posture {
        &self.current_posture
    }

    pub fn previous_posture(&self) -> &Posture {
        &self.previous_posture
    }

    pub fn play_time_secs(&self) -> f32 {
        self.play_time_secs
    }

    pub fn occupied_secs(&self) -> f32 {
        self.occupied_secs
    }

    /// `true` while waiting out a random-list pause.
    pub fn is_paused(&self) -> bool {
        self.pause_remaining.is_some()
    }

    pub fn has_prop(&self, id: &PropId) -> bool {
        self.props.contains_key(id)
    }

    pub fn prop_count(&self) -> usize {
        self.props.len()
    }

    pub fn debug_label(&self) -> String {
        self.root_iter.as_ref().map_or_else(|| "-".to_owned(), EntryIter::debug_label)
    }
}
