use crate::sim::ControlQueue;
use crate::visual::bodies::{SpawnedGeneration, respawn_body_visuals, sync_body_transforms};
use crate::visual::interactions::{DragState, handle_pointer_input};
use crate::visual::overlay::{draw_center_outline, draw_connections, draw_debug_overlay};
use crate::visual::setup::{setup_presets, setup_simulation};
use crate::visual::tick::{TICK_HZ, apply_force_field, drain_control_queue, step_world};
use crate::visual::ui::{PanelState, handle_panel_keys, spawn_control_panel, update_control_panel};
use crate::visual::viewport::recenter_after_resize;
use bevy::prelude::*;

pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ControlQueue>()
            .init_resource::<DragState>()
            .init_resource::<PanelState>()
            .init_resource::<SpawnedGeneration>()
            .insert_resource(Time::<Fixed>::from_hz(TICK_HZ))
            // Presets first, then the scene, then the controls
            .add_systems(
                Startup,
                (setup_presets, setup_simulation, spawn_control_panel)
                    .chain()
                    .after(crate::camera::setup_camera),
            )
            .add_systems(
                FixedUpdate,
                (drain_control_queue, apply_force_field, step_world).chain(),
            )
            .add_systems(
                Update,
                (
                    // Input
                    handle_panel_keys,
                    handle_pointer_input,
                    recenter_after_resize,
                    // Visual updates
                    respawn_body_visuals,
                    sync_body_transforms,
                    draw_center_outline,
                    draw_connections,
                    draw_debug_overlay,
                    update_control_panel,
                )
                    .chain(),
            );
    }
}
