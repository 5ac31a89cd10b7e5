//! `WorkspotRegistry`: owns every live instance, keyed by subject.

use std::sync::Arc;

use tracing::info;

use ws_core::{SubjectId, WorkspotConfig};
use ws_tree::WorkspotTree;

use crate::{InstanceObserver, InstanceResult, Map, Playback, WorkspotInstance, WorkspotState};

/// At most one instance per subject.  Driven by a single owner through
/// `&mut self`; there is no internal locking.
pub struct WorkspotRegistry<P: Playback> {
    config:    WorkspotConfig,
    playback:  P,
    instances: Map<SubjectId, WorkspotInstance>,
}

impl<P: Playback> WorkspotRegistry<P> {
    /// Fails if `config` does not validate.
    pub fn new(config: WorkspotConfig, playback: P) -> InstanceResult<Self> {
        config.validate()?;
        Ok(Self { config, playback, instances: Map::default() })
    }

    pub fn config(&self) -> &WorkspotConfig {
        &self.config
    }

    pub fn playback(&self) -> &P {
        &self.playback
    }

    pub fn playback_mut(&mut self) -> &mut P {
        &mut self.playback
    }

    /// Put `subject` into `tree`, force-stopping whatever it was doing.
    pub fn start_workspot<O: InstanceObserver>(
        &mut self,
        subject:  SubjectId,
        tree:     Arc<WorkspotTree>,
        observer: &mut O,
    ) -> InstanceResult<()> {
        if let Some(mut old) = self.instances.remove(&subject) {
            info!(%subject, old = %old.tree().name, new = %tree.name, "replacing running workspot");
            old.stop(true, &mut self.playback, observer);
        }

        let mut instance = WorkspotInstance::new(subject, tree, &self.config);
        instance.setup(&mut self.playback, observer)?;
        self.instances.insert(subject, instance);
        Ok(())
    }

    /// Stop and drop `subject`'s instance.  `false` if it had none.
    pub fn stop_workspot<O: InstanceObserver>(
        &mut self,
        subject:  SubjectId,
        force:    bool,
        observer: &mut O,
    ) -> bool {
        match self.instances.remove(&subject) {
            Some(mut instance) => {
                instance.stop(force, &mut self.playback, observer);
                true
            }
            None => false,
        }
    }

    pub fn stop_all<O: InstanceObserver>(&mut self, force: bool, observer: &mut O) {
        for (_, mut instance) in self.instances.drain() {
            instance.stop(force, &mut self.playback, observer);
        }
    }

    /// Forward a reaction to `subject`'s instance.  `false` if it had none.
    pub fn trigger_reaction<O: InstanceObserver>(
        &mut self,
        subject:  SubjectId,
        reaction: &str,
        observer: &mut O,
    ) -> bool {
        match self.instances.get_mut(&subject) {
            Some(instance) => {
                instance.trigger_reaction(reaction, &mut self.playback, observer);
                true
            }
            None => false,
        }
    }

    pub fn active(&self, subject: SubjectId) -> Option<&WorkspotInstance> {
        self.instances.get(&subject)
    }

    pub fn is_subject_in_workspot(&self, subject: SubjectId) -> bool {
        self.active(subject).is_some_and(|i| i.state() == WorkspotState::Playing)
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Tick every instance, apply the occupy limit, then drop finished ones.
    pub fn tick<O: InstanceObserver>(&mut self, dt: f32, observer: &mut O) {
        let limit = self.config.occupy_limit_secs;
        for instance in self.instances.values_mut() {
            instance.tick(dt, &mut self.playback, observer);
            if let Some(limit) = limit {
                if instance.state() == WorkspotState::Playing && instance.occupied_secs() >= limit {
                    info!(subject = %instance.subject(), limit, "occupy limit reached");
                    instance.stop(false, &mut self.playback, observer);
                }
            }
        }
        self.instances.retain(|_, i| i.state() != WorkspotState::Finished);
    }
}
