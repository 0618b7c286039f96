use bevy::prelude::*;

use crate::sim::SimulationContext;

/// Faint black used by every overlay line
const OVERLAY_COLOR: Color = Color::srgba(0.0, 0.0, 0.0, 0.1);
/// Overlays draw in front of all meshes
const OVERLAY_Z: f32 = 2.0;

/// Stroke around the center disc
pub fn draw_center_outline(ctx: Res<SimulationContext>, mut gizmos: Gizmos) {
    let Some(scene) = &ctx.scene else {
        return;
    };
    let Some(center) = ctx.world.body(scene.center) else {
        return;
    };
    gizmos.circle(
        Isometry3d::from_translation(center.position.extend(OVERLAY_Z)),
        center.radius,
        center.style.stroke,
    );
}

/// Center-to-node lines and visible link lines
pub fn draw_connections(ctx: Res<SimulationContext>, mut gizmos: Gizmos) {
    let Some(center) = ctx.center_position() else {
        return;
    };
    let from = center.extend(OVERLAY_Z);

    if ctx.config.show_connections {
        for node in ctx.orbit_positions() {
            gizmos.line(from, node.extend(OVERLAY_Z), OVERLAY_COLOR);
        }
    }

    for (_, link) in ctx.world.links().filter(|(_, link)| link.visible) {
        let (Some(a), Some(b)) = (ctx.world.body(link.body_a), ctx.world.body(link.body_b)) else {
            continue;
        };
        gizmos.line(
            a.position.extend(OVERLAY_Z),
            b.position.extend(OVERLAY_Z),
            OVERLAY_COLOR,
        );
    }
}

/// Orbit circle and each node's repulsion radius
pub fn draw_debug_overlay(ctx: Res<SimulationContext>, mut gizmos: Gizmos) {
    if !ctx.debug_overlay {
        return;
    }
    let Some(center) = ctx.center_position() else {
        return;
    };

    gizmos.circle(
        Isometry3d::from_translation(center.extend(OVERLAY_Z)),
        ctx.config.orbit_radius,
        OVERLAY_COLOR,
    );

    let repulsion_radius = ctx.config.node_repulsion_radius();
    for node in ctx.orbit_positions() {
        gizmos.circle(
            Isometry3d::from_translation(node.extend(OVERLAY_Z)),
            repulsion_radius,
            OVERLAY_COLOR,
        );
    }

    let Some(drag) = ctx.world.drag() else {
        return;
    };
    if let Some(body) = ctx.world.body(drag.body) {
        gizmos.line(
            body.position.extend(OVERLAY_Z),
            drag.point.extend(OVERLAY_Z),
            OVERLAY_COLOR,
        );
    }
}
