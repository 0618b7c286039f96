use bevy::prelude::*;

use crate::{engine::BodyHandle, sim::SimulationContext};

/// Depth of the center disc; orbit nodes sit just in front of it
const CENTER_Z: f32 = 0.0;
const NODE_Z: f32 = 1.0;

/// Mesh entity drawing one engine body
#[derive(Component, Debug, Clone, Copy)]
pub struct BodyVisual {
    pub handle: BodyHandle,
}

/// Scene generation the current meshes were built for
#[derive(Resource, Default, Debug)]
pub struct SpawnedGeneration(pub Option<u64>);

/// Replace every body mesh whenever the scene is rebuilt
pub fn respawn_body_visuals(
    mut commands: Commands,
    ctx: Res<SimulationContext>,
    mut spawned: ResMut<SpawnedGeneration>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    existing: Query<Entity, With<BodyVisual>>,
) {
    let generation = ctx.scene_generation();
    if spawned.0 == Some(generation) {
        return;
    }
    let Some(scene) = &ctx.scene else {
        return;
    };

    for entity in &existing {
        commands.entity(entity).despawn();
    }

    let mut mesh_cache: Vec<(f32, Handle<Mesh>)> = Vec::new();
    let mut mesh_for = |radius: f32, meshes: &mut Assets<Mesh>| {
        if let Some((_, handle)) = mesh_cache.iter().find(|(r, _)| *r == radius) {
            return handle.clone();
        }
        let handle = meshes.add(Circle::new(radius));
        mesh_cache.push((radius, handle.clone()));
        handle
    };

    let handles = std::iter::once((scene.center, CENTER_Z))
        .chain(scene.orbit.iter().map(|&handle| (handle, NODE_Z)));
    for (handle, z) in handles {
        let Some(body) = ctx.world.body(handle) else {
            continue;
        };
        let material = materials.add(StandardMaterial {
            base_color: body.style.fill,
            unlit: true,
            ..default()
        });
        commands.spawn((
            Mesh3d(mesh_for(body.radius, &mut *meshes)),
            MeshMaterial3d(material),
            Transform::from_translation(body.position.extend(z)),
            BodyVisual { handle },
        ));
    }

    spawned.0 = Some(generation);
    debug!(
        "Spawned meshes for scene #{} ({} bodies, {} links)",
        generation,
        ctx.world.body_count(),
        ctx.world.link_count()
    );
}

/// Copy engine positions into the mesh transforms
pub fn sync_body_transforms(
    ctx: Res<SimulationContext>,
    mut visuals: Query<(&BodyVisual, &mut Transform)>,
) {
    for (visual, mut transform) in &mut visuals {
        if let Some(body) = ctx.world.body(visual.handle) {
            transform.translation.x = body.position.x;
            transform.translation.y = body.position.y;
        }
    }
}
