//! Simulation core: force field, scene builder, control layer and the
//! recenter policy, all operating on one [`SimulationContext`].

pub mod control;
pub mod forces;
pub mod recenter;
pub mod scene;

pub use control::{ConfigCommand, ControlOutcome, ControlQueue};
pub use recenter::Debounce;
pub use scene::SceneHandles;

use bevy::prelude::*;

use crate::{config::Configuration, engine::PhysicsWorld};

/// Everything the simulation mutates, with a single owner
///
/// Lives for the whole process. Systems borrow it through `ResMut`, which
/// keeps exactly one mutator at a time.
#[derive(Resource, Debug)]
pub struct SimulationContext {
    pub config: Configuration,
    pub world: PhysicsWorld,
    /// Handles of the current scene; `None` until the first build
    pub scene: Option<SceneHandles>,
    /// Debug overlay toggle (renderer only)
    pub debug_overlay: bool,
    /// Bumped on every configuration write, so controls know to resync
    config_revision: u64,
    /// Bumped on every scene build
    scene_generation: u64,
}

impl SimulationContext {
    pub fn new(config: Configuration) -> Self {
        Self {
            config,
            world: PhysicsWorld::new(),
            scene: None,
            debug_overlay: false,
            config_revision: 0,
            scene_generation: 0,
        }
    }

    pub fn config_revision(&self) -> u64 {
        self.config_revision
    }

    pub fn scene_generation(&self) -> u64 {
        self.scene_generation
    }

    fn touch_config(&mut self) {
        self.config_revision += 1;
    }

    /// Position of the center body, if a scene exists
    pub fn center_position(&self) -> Option<Vec2> {
        let scene = self.scene.as_ref()?;
        self.world.body(scene.center).map(|body| body.position)
    }

    /// Positions of the orbit bodies in creation order
    pub fn orbit_positions(&self) -> Vec<Vec2> {
        let Some(scene) = &self.scene else {
            return Vec::new();
        };
        scene
            .orbit
            .iter()
            .filter_map(|&handle| self.world.body(handle).map(|body| body.position))
            .collect()
    }
}
