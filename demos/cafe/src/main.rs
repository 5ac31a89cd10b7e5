//! cafe: three patrons working through a cafe workspot.
//!
//! Builds one tree (order at the counter, then loop between sitting with a
//! drink and standing to stretch), drives it for a minute of simulated time
//! against a scripted playback backend, and logs what happens.
//!
//! ```text
//! cargo run -p cafe                      # built-in config
//! cargo run -p cafe -- config.json       # WorkspotConfig from a file
//! cargo run -p cafe -- --dump-tree       # print the tree as JSON and exit
//! RUST_LOG=debug cargo run -p cafe       # every traversal step
//! ```

use std::sync::Arc;

use anyhow::{Context as _, Result};
use rustc_hash::FxHashMap;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

use ws_core::{ActionRef, PropHandle, SubjectId, WorkspotConfig};
use ws_instance::{InstanceObserver, Playback, WorkspotRegistry};
use ws_iter::EntryData;
use ws_tree::{
    AnimClip, ApproachTransform, Entry, EntryAnim, GlobalProp, RandomList, Selector, Sequence,
    TreeBuilder, WorkspotTree,
};

// ── Constants ─────────────────────────────────────────────────────────────────

const PATRONS:         u32 = 3;
const TICK_SECS:       f32 = 0.25;
const RUN_SECS:        f32 = 60.0;
const REACTION_AT:     f32 = 20.0;
const FORCE_STOP_AT:   f32 = 40.0;

const CONFIG_JSON: &str = r#"{
    "seed": 42,
    "initial_posture": "stand",
    "occupy_limit_secs": 50.0
}"#;

/// `(action, name, seconds)` for every clip the tree references.
const ACTIONS: &[(u32, &str, f32)] = &[
    (1, "walk_to_counter", 2.0),
    (2, "order", 3.0),
    (3, "sip", 2.5),
    (4, "read_menu", 4.0),
    (5, "look_around", 1.5),
    (6, "stretch", 2.0),
    (10, "stand_to_sit", 1.0),
    (11, "sit_to_stand", 1.0),
];

fn action_name(action: ActionRef) -> &'static str {
    ACTIONS.iter().find(|(id, _, _)| *id == action.0).map_or("?", |(_, name, _)| name)
}

// ── Tree ──────────────────────────────────────────────────────────────────────

fn build_tree() -> Result<WorkspotTree> {
    let seated = Entry::new(
        RandomList::new(vec![
            (Entry::clip(ActionRef(3)).posture("sit"), 3.0),
            (Entry::clip(ActionRef(4)).posture("sit"), 1.0),
            (Entry::clip(ActionRef(5)).posture("sit"), 1.0),
        ])
        .clips(2, 3)
        .pause(0.5, 1.5),
    )
    .posture("sit");

    let standing = Entry::new(AnimClip::new(ActionRef(6)).blend(0.4, 0.4));

    let approach = ApproachTransform { position: [1.5, 0.0, 0.0], yaw_degrees: 90.0 };
    let tree = TreeBuilder::new("cafe")
        .root(Entry::new(Sequence::new(vec![
            Entry::new(EntryAnim::new(ActionRef(1), approach).slow()),
            Entry::clip(ActionRef(2)),
            Entry::new(Selector::new(vec![(seated, 4.0), (standing, 1.0)])),
        ])))
        .transition("stand", "sit", ActionRef(10))
        .transition("sit", "stand", ActionRef(11))
        .prop(GlobalProp::new("cup", "hand_r").only_in("sit"))
        .prop(GlobalProp::new("phone", "hand_l").keep_on_reaction())
        .build_validated()?;
    Ok(tree)
}

// ── Playback backend ──────────────────────────────────────────────────────────

/// Plays every action for its scripted duration.
#[derive(Default)]
struct ScriptedPlayback {
    /// Subject -> (action, seconds left).
    playing:     FxHashMap<SubjectId, (ActionRef, f32)>,
    next_handle: u32,
    plays:       usize,
}

impl ScriptedPlayback {
    fn advance(&mut self, dt: f32) {
        for (_, left) in self.playing.values_mut() {
            *left -= dt;
        }
    }
}

impl Playback for ScriptedPlayback {
    fn is_subject_valid(&self, subject: SubjectId) -> bool {
        subject.0 < PATRONS
    }

    fn play(&mut self, subject: SubjectId, data: &EntryData) {
        let Some(action) = data.action else { return };
        let secs = ACTIONS.iter().find(|(id, _, _)| *id == action.0).map_or(1.0, |a| a.2);
        info!(%subject, action = action_name(action), blend_in = data.blend_in_secs, "play");
        self.playing.insert(subject, (action, secs));
        self.plays += 1;
    }

    fn is_finished(&self, subject: SubjectId, action: ActionRef) -> bool {
        match self.playing.get(&subject) {
            Some((current, left)) => *current != action || *left <= 0.0,
            None => true,
        }
    }

    fn stop(&mut self, subject: SubjectId, action: ActionRef, blend_out_secs: f32) {
        info!(%subject, action = action_name(action), blend_out = blend_out_secs, "stop");
        self.playing.remove(&subject);
    }

    fn attach_prop(&mut self, subject: SubjectId, prop: &GlobalProp) -> Option<PropHandle> {
        self.next_handle += 1;
        info!(%subject, prop = %prop.id, socket = %prop.socket, "attach");
        Some(PropHandle(self.next_handle))
    }

    fn detach_prop(&mut self, subject: SubjectId, handle: PropHandle) {
        info!(%subject, %handle, "detach");
    }
}

// ── Observer ──────────────────────────────────────────────────────────────────

#[derive(Default)]
struct CafeObserver {
    steps:     usize,
    changes:   usize,
    completed: Vec<SubjectId>,
}

impl InstanceObserver for CafeObserver {
    fn on_entry_started(&mut self, _subject: SubjectId, _data: &EntryData) {
        self.steps += 1;
    }

    fn on_posture_changed(&mut self, subject: SubjectId, old: &ws_core::Posture, new: &ws_core::Posture) {
        self.changes += 1;
        info!(%subject, %old, %new, "posture");
    }

    fn on_completed(&mut self, subject: SubjectId) {
        info!(%subject, "left the cafe");
        self.completed.push(subject);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn load_config() -> Result<WorkspotConfig> {
    match std::env::args().nth(1).filter(|a| !a.starts_with("--")) {
        Some(path) => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("reading config {path}"))?;
            serde_json::from_str(&text).with_context(|| format!("parsing config {path}"))
        }
        None => Ok(serde_json::from_str(CONFIG_JSON)?),
    }
}

fn main() -> Result<()> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let tree = build_tree()?;
    if std::env::args().any(|a| a == "--dump-tree") {
        println!("{}", serde_json::to_string_pretty(&tree)?);
        return Ok(());
    }

    let config = load_config()?;
    println!("=== cafe: workspot demo ===");
    println!(
        "Patrons: {PATRONS}  |  Entries: {}  |  Actions: {}  |  Seed: {}",
        tree.entry_count(),
        tree.referenced_actions().len(),
        config.seed
    );
    println!();

    let tree = Arc::new(tree);
    let mut registry = WorkspotRegistry::new(config, ScriptedPlayback::default())?;
    let mut observer = CafeObserver::default();

    for p in 0..PATRONS {
        registry.start_workspot(SubjectId(p), Arc::clone(&tree), &mut observer)?;
    }

    let mut t = 0.0;
    let mut reacted = false;
    let mut forced = false;
    while t < RUN_SECS && !registry.is_empty() {
        registry.playback_mut().advance(TICK_SECS);
        registry.tick(TICK_SECS, &mut observer);
        t += TICK_SECS;

        if !reacted && t >= REACTION_AT {
            reacted = true;
            registry.trigger_reaction(SubjectId(1), "spilled_drink", &mut observer);
        }
        if !forced && t >= FORCE_STOP_AT {
            forced = true;
            registry.stop_workspot(SubjectId(2), true, &mut observer);
        }
    }
    registry.stop_all(false, &mut observer);

    println!();
    println!("Simulated {t:.1}s");
    println!("Steps started:    {}", observer.steps);
    println!("Posture changes:  {}", observer.changes);
    println!("Actions played:   {}", registry.playback().plays);
    println!("Completed:        {:?}", observer.completed);
    Ok(())
}
