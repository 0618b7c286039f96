use bevy::prelude::*;
use std::f32::consts::TAU;

use super::SimulationContext;
use crate::{
    config::Configuration,
    engine::{Body, BodyHandle, BodyOptions, BodyStyle, Link, LinkHandle, PhysicsWorld},
};

const CENTER_RESTITUTION: f32 = 0.2;
const NODE_RESTITUTION: f32 = 0.3;
/// Fixed damping for every center-node link
pub const LINK_DAMPING: f32 = 0.1;

const CENTER_FILL: Color = Color::srgb(0.96, 0.96, 0.96); // #f5f5f5
const CENTER_STROKE: Color = Color::srgb(0.867, 0.867, 0.867); // #dddddd

/// Handles to the bodies and links of one built scene
#[derive(Debug, Clone, PartialEq)]
pub struct SceneHandles {
    pub center: BodyHandle,
    /// Orbit nodes in angular order
    pub orbit: Vec<BodyHandle>,
    /// `links[i]` ties the center to `orbit[i]`
    pub links: Vec<LinkHandle>,
}

/// Where one orbit node starts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitSlot {
    pub position: Vec2,
    /// Hue in degrees
    pub hue: f32,
}

/// Ideal position of node `index` of `count` on a circle around `center`
pub fn orbit_position(center: Vec2, radius: f32, index: usize, count: usize) -> Vec2 {
    let angle = orbit_angle(index, count);
    center + Vec2::new(angle.cos(), angle.sin()) * radius
}

fn orbit_angle(index: usize, count: usize) -> f32 {
    if count == 0 {
        return 0.0;
    }
    TAU * index as f32 / count as f32
}

/// Evenly spread around the full spectrum
pub fn node_hue(index: usize, count: usize) -> f32 {
    if count == 0 {
        return 0.0;
    }
    360.0 * index as f32 / count as f32
}

pub fn node_color(index: usize, count: usize) -> Color {
    Color::hsl(node_hue(index, count), 1.0, 0.5)
}

/// Starting layout of every orbit node
pub fn layout_orbit(config: &Configuration, center: Vec2) -> Vec<OrbitSlot> {
    let count = config.node_count;
    (0..count)
        .map(|i| OrbitSlot {
            position: orbit_position(center, config.orbit_radius, i, count),
            hue: node_hue(i, count),
        })
        .collect()
}

/// Clear the world and build a fresh center, orbit nodes and links
pub fn build_scene(world: &mut PhysicsWorld, config: &Configuration, center: Vec2) -> SceneHandles {
    world.clear();

    let center_handle = world.add_body(Body::circle(
        center,
        config.center_size,
        BodyOptions {
            mass: Some(config.center_mass),
            friction_air: config.center_friction,
            restitution: CENTER_RESTITUTION,
            style: BodyStyle {
                fill: CENTER_FILL,
                stroke: CENTER_STROKE,
            },
        },
    ));

    let count = config.node_count;
    let mut orbit = Vec::with_capacity(count);
    let mut links = Vec::with_capacity(count);

    for (i, slot) in layout_orbit(config, center).into_iter().enumerate() {
        let node = world.add_body(Body::circle(
            slot.position,
            config.node_size,
            BodyOptions {
                mass: None,
                friction_air: config.node_friction,
                restitution: NODE_RESTITUTION,
                style: BodyStyle::solid(node_color(i, count)),
            },
        ));
        orbit.push(node);
    }

    for &node in &orbit {
        let link = world.add_link(Link {
            body_a: center_handle,
            body_b: node,
            stiffness: config.connection_stiffness,
            damping: LINK_DAMPING,
            length: config.orbit_radius,
            visible: config.show_springs,
        });
        // Both ends were created above in this same epoch
        if let Some(link) = link {
            links.push(link);
        }
    }

    SceneHandles {
        center: center_handle,
        orbit,
        links,
    }
}

impl SimulationContext {
    /// Throw away the current scene and build a new one from the
    /// configuration, centered on `center`
    pub fn rebuild_scene(&mut self, center: Vec2) {
        let scene = build_scene(&mut self.world, &self.config, center);
        self.scene_generation += 1;

        info!(
            "Scene #{} built: {} nodes, {} links at ({:.0}, {:.0})",
            self.scene_generation,
            scene.orbit.len(),
            scene.links.len(),
            center.x,
            center.y
        );

        self.scene = Some(scene);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PresetLibrary;
    use std::collections::HashSet;

    fn preset1() -> Configuration {
        PresetLibrary::load().unwrap().startup()
    }

    #[test]
    fn test_counts_match_node_count() {
        for count in [3, 12, 36, 69, 100] {
            let config = Configuration {
                node_count: count,
                ..preset1()
            };
            let mut world = PhysicsWorld::new();

            let scene = build_scene(&mut world, &config, Vec2::new(400.0, 300.0));

            assert_eq!(scene.orbit.len(), count);
            assert_eq!(scene.links.len(), count);
            assert_eq!(world.body_count(), count + 1);
            assert_eq!(world.link_count(), count);
        }
    }

    #[test]
    fn test_links_are_a_bijection_onto_orbit_nodes() {
        let config = preset1();
        let mut world = PhysicsWorld::new();
        let scene = build_scene(&mut world, &config, Vec2::ZERO);

        let mut seen = HashSet::new();
        for (i, &handle) in scene.links.iter().enumerate() {
            let link = world.link(handle).unwrap();
            assert_eq!(link.body_a, scene.center);
            assert_eq!(link.body_b, scene.orbit[i]);
            assert!(seen.insert(link.body_b), "node linked twice");
        }
        assert_eq!(seen.len(), config.node_count);
    }

    #[test]
    fn test_link_parameters() {
        let config = Configuration {
            show_springs: true,
            ..preset1()
        };
        let mut world = PhysicsWorld::new();
        let scene = build_scene(&mut world, &config, Vec2::ZERO);

        for &handle in &scene.links {
            let link = world.link(handle).unwrap();
            assert_eq!(link.length, config.orbit_radius);
            assert_eq!(link.stiffness, config.connection_stiffness);
            assert_eq!(link.damping, LINK_DAMPING);
            assert!(link.visible);
        }
    }

    #[test]
    fn test_orbit_placement() {
        let config = preset1();
        let center = Vec2::new(640.0, 360.0);
        let mut world = PhysicsWorld::new();
        let scene = build_scene(&mut world, &config, center);
        let n = config.node_count;

        for (i, &handle) in scene.orbit.iter().enumerate() {
            let offset = world.body(handle).unwrap().position - center;
            assert!((offset.length() - config.orbit_radius).abs() < 1e-3);

            let expected = TAU * i as f32 / n as f32;
            let angle = offset.y.atan2(offset.x).rem_euclid(TAU);
            let diff = (angle - expected).abs();
            assert!(diff < 1e-4 || (TAU - diff) < 1e-4, "node {} at {}", i, angle);
        }
    }

    #[test]
    fn test_body_properties() {
        let config = preset1();
        let mut world = PhysicsWorld::new();
        let scene = build_scene(&mut world, &config, Vec2::ZERO);

        let center = world.body(scene.center).unwrap();
        assert_eq!(center.mass(), config.center_mass);
        assert_eq!(center.friction_air, config.center_friction);
        assert_eq!(center.radius, config.center_size);

        let node = world.body(scene.orbit[0]).unwrap();
        assert_eq!(node.friction_air, config.node_friction);
        assert_eq!(node.radius, config.node_size);
    }

    #[test]
    fn test_hues_span_the_spectrum() {
        let config = Configuration {
            node_count: 4,
            ..preset1()
        };
        let hues: Vec<_> = layout_orbit(&config, Vec2::ZERO)
            .iter()
            .map(|slot| slot.hue)
            .collect();

        assert_eq!(hues, vec![0.0, 90.0, 180.0, 270.0]);
    }

    #[test]
    fn test_structural_rebuild_discards_previous_scene() {
        let mut ctx = SimulationContext::new(preset1());
        ctx.rebuild_scene(Vec2::ZERO);
        let old = ctx.scene.clone().unwrap();
        assert_eq!(old.orbit.len(), 36);

        ctx.config.node_count = 12;
        ctx.rebuild_scene(Vec2::ZERO);
        let new = ctx.scene.clone().unwrap();

        assert_eq!(new.orbit.len(), 12);
        assert_eq!(new.links.len(), 12);
        assert_eq!(ctx.world.body_count(), 13);
        assert_eq!(ctx.world.link_count(), 12);
        assert!(old.orbit.iter().all(|&h| ctx.world.body(h).is_none()));
        assert!(old.links.iter().all(|&h| ctx.world.link(h).is_none()));
        assert!(ctx.world.body(old.center).is_none());
        assert_eq!(ctx.scene_generation(), 2);
    }
}
