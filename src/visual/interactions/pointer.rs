use bevy::prelude::*;

use crate::{
    camera::MainCamera,
    input::{PointerEvent, PointerEventType},
    sim::SimulationContext,
};

/// Which pointer currently holds a body
#[derive(Resource, Default, Debug)]
pub struct DragState {
    pub pointer: Option<u64>,
}

/// System: grab, move and release bodies with the pointer
pub fn handle_pointer_input(
    mut pointer_events: MessageReader<PointerEvent>,
    camera_query: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    mut ctx: ResMut<SimulationContext>,
    mut drag_state: ResMut<DragState>,
) {
    let Ok((camera, camera_transform)) = camera_query.single() else {
        return;
    };

    for event in pointer_events.read() {
        let Some(world_pos) = event.to_world_position(camera, camera_transform) else {
            continue;
        };

        match event.event_type {
            PointerEventType::Down => {
                if drag_state.pointer.is_some() {
                    continue;
                }
                if let Some(handle) = ctx.world.begin_drag(world_pos) {
                    debug!("Grabbed body {:?}", handle);
                    drag_state.pointer = Some(event.id);
                }
            }
            PointerEventType::Move => {
                if drag_state.pointer == Some(event.id) {
                    ctx.world.update_drag(world_pos);
                }
            }
            PointerEventType::Up => {
                if drag_state.pointer == Some(event.id) {
                    ctx.world.end_drag();
                    drag_state.pointer = None;
                }
            }
        }
    }

    // A rebuild drops the engine's drag constraint
    if drag_state.pointer.is_some() && ctx.world.drag().is_none() {
        drag_state.pointer = None;
    }
}
