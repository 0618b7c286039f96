//! Fixed-rate simulation tick: controls, then forces, then the engine step.

use bevy::prelude::*;

use crate::{
    camera::Viewport,
    config::PresetLibrary,
    sim::{ControlOutcome, ControlQueue, SimulationContext},
};

/// Engine step rate; the tuned force constants assume it
pub const TICK_HZ: f64 = 60.0;

/// Apply every queued control command at the tick boundary
pub fn drain_control_queue(
    mut queue: ResMut<ControlQueue>,
    mut ctx: ResMut<SimulationContext>,
    presets: Res<PresetLibrary>,
    viewport: Res<Viewport>,
) {
    if queue.is_empty() {
        return;
    }
    let mut rng = rand::rng();
    let center = viewport.center();

    for command in queue.drain() {
        let outcome = ctx.apply_command(command.clone(), &presets, center, &mut rng);
        if outcome == ControlOutcome::Ignored {
            debug!("Ignored {:?}", command);
        }
    }
}

pub fn apply_force_field(mut ctx: ResMut<SimulationContext>) {
    ctx.apply_force_field();
}

pub fn step_world(mut ctx: ResMut<SimulationContext>) {
    ctx.world.step();
}
