use bevy::prelude::*;

use crate::{
    camera::Viewport,
    sim::{Debounce, SimulationContext},
};

/// Run the recenter policy once the window has stopped resizing
pub fn recenter_after_resize(
    time: Res<Time>,
    viewport: Res<Viewport>,
    mut debounce: ResMut<Debounce>,
    mut ctx: ResMut<SimulationContext>,
) {
    if !debounce.is_pending() {
        return;
    }
    if debounce.tick(time.delta()) {
        ctx.recenter(viewport.size);
    }
}
