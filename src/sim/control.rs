use bevy::prelude::*;
use rand::Rng;
use std::collections::VecDeque;

use super::SimulationContext;
use crate::config::{ConfigField, FieldEffect, FieldValue, Patch, PresetLibrary};

/// Per-axis amplitude of the random jostle applied after a repulsion change
pub const NUDGE_FORCE: f32 = 0.00001;

/// A request produced by the controls
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigCommand {
    Set(ConfigField, FieldValue),
    /// Rebuild the scene from the current configuration
    Rebuild,
    /// Replace the whole configuration with a named preset and rebuild
    ApplyPreset(String),
    ToggleDebugOverlay,
}

/// What applying a command did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlOutcome {
    Patched(Patch),
    Rebuilt,
    Cosmetic,
    Nudged,
    ReadLive,
    PresetApplied,
    /// The value was rejected or didn't change anything
    Ignored,
}

/// Commands waiting for the next tick boundary
///
/// Controls only ever push here; the simulation drains it once per tick,
/// so every mutation happens between ticks.
#[derive(Resource, Debug, Default)]
pub struct ControlQueue {
    pending: VecDeque<ConfigCommand>,
}

impl ControlQueue {
    pub fn push(&mut self, command: ConfigCommand) {
        self.pending.push_back(command);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = ConfigCommand> + '_ {
        self.pending.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Value the newest pending `Set` will write to `field`
    ///
    /// `None` when nothing is pending for it, or when a later preset
    /// replaces the whole configuration anyway.
    pub fn latest_value(&self, field: ConfigField) -> Option<FieldValue> {
        for command in self.pending.iter().rev() {
            match command {
                ConfigCommand::Set(f, value) if *f == field => return Some(*value),
                ConfigCommand::ApplyPreset(_) => return None,
                _ => {}
            }
        }
        None
    }
}

impl SimulationContext {
    /// Apply one command, dispatching through the field effect table
    pub fn apply_command(
        &mut self,
        command: ConfigCommand,
        presets: &PresetLibrary,
        center: Vec2,
        rng: &mut impl Rng,
    ) -> ControlOutcome {
        match command {
            ConfigCommand::Set(field, value) => self.apply_field(field, value, center, rng),
            ConfigCommand::Rebuild => {
                self.rebuild_scene(center);
                ControlOutcome::Rebuilt
            }
            ConfigCommand::ApplyPreset(name) => match presets.by_name(&name) {
                Some(config) => {
                    self.config = config;
                    self.touch_config();
                    self.rebuild_scene(center);
                    info!("Applied {}", name);
                    if let Ok(json) = serde_json::to_string(&self.config) {
                        debug!("Configuration now {}", json);
                    }
                    ControlOutcome::PresetApplied
                }
                None => {
                    warn!("Unknown preset '{}'", name);
                    ControlOutcome::Ignored
                }
            },
            ConfigCommand::ToggleDebugOverlay => {
                self.debug_overlay = !self.debug_overlay;
                info!("Debug overlay {}", if self.debug_overlay { "on" } else { "off" });
                ControlOutcome::Cosmetic
            }
        }
    }

    fn apply_field(
        &mut self,
        field: ConfigField,
        value: FieldValue,
        center: Vec2,
        rng: &mut impl Rng,
    ) -> ControlOutcome {
        match self.config.set(field, value) {
            Ok(true) => {}
            Ok(false) => return ControlOutcome::Ignored,
            Err(e) => {
                warn!("{}", e);
                return ControlOutcome::Ignored;
            }
        }
        self.touch_config();
        debug!("{} = {}", field.label(), self.config.display_value(field));

        match field.effect() {
            FieldEffect::PatchInPlace(patch) => {
                self.apply_patch(patch);
                ControlOutcome::Patched(patch)
            }
            FieldEffect::RebuildScene => {
                self.rebuild_scene(center);
                ControlOutcome::Rebuilt
            }
            FieldEffect::CosmeticOnly => ControlOutcome::Cosmetic,
            FieldEffect::Nudge => {
                self.nudge(rng);
                ControlOutcome::Nudged
            }
            FieldEffect::ReadLive => ControlOutcome::ReadLive,
        }
    }

    fn apply_patch(&mut self, patch: Patch) {
        let Some(scene) = &self.scene else {
            return;
        };
        let config = &self.config;
        let world = &mut self.world;

        match patch {
            Patch::CenterMass => {
                world.set_mass(scene.center, config.center_mass);
            }
            Patch::CenterFriction => {
                world.set_friction_air(scene.center, config.center_friction);
            }
            Patch::NodeFriction => {
                for &node in &scene.orbit {
                    world.set_friction_air(node, config.node_friction);
                }
            }
            Patch::LinkLength | Patch::LinkStiffness | Patch::LinkVisibility => {
                for &handle in &scene.links {
                    let Some(link) = world.link_mut(handle) else {
                        continue;
                    };
                    match patch {
                        Patch::LinkLength => link.length = config.orbit_radius,
                        Patch::LinkStiffness => link.stiffness = config.connection_stiffness,
                        _ => link.visible = config.show_springs,
                    }
                }
            }
        }
    }

    /// Jostle every orbit node so a changed force shows immediately
    fn nudge(&mut self, rng: &mut impl Rng) {
        let Some(scene) = &self.scene else {
            return;
        };
        for &node in &scene.orbit {
            let force = Vec2::new(
                rng.random_range(-0.5..0.5),
                rng.random_range(-0.5..0.5),
            ) * NUDGE_FORCE;
            self.world.apply_force(node, force);
        }
    }
}
