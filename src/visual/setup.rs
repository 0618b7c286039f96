use bevy::prelude::*;

use crate::{
    camera::Viewport,
    config::{Preset, PresetLibrary},
    sim::SimulationContext,
};

pub fn setup_presets(mut commands: Commands) {
    match PresetLibrary::load() {
        Ok(library) => {
            info!("✓ Preset library loaded:");
            for preset in Preset::ALL {
                let config = library.get(preset);
                info!(
                    "  - {}: {} nodes, orbit radius {}",
                    preset.name(),
                    config.node_count,
                    config.orbit_radius
                );
            }
            commands.insert_resource(library);
        }
        Err(e) => {
            error!("Failed to load presets: {}", e);
            panic!("Cannot continue without preset data");
        }
    }
}

/// Build the startup scene in the middle of the viewport
pub fn setup_simulation(
    mut commands: Commands,
    presets: Res<PresetLibrary>,
    viewport: Res<Viewport>,
) {
    let mut ctx = SimulationContext::new(presets.startup());
    ctx.rebuild_scene(viewport.center());
    commands.insert_resource(ctx);
}
