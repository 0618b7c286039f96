use bevy::math::Vec2;

use super::SimulationContext;
use crate::config::Configuration;

/// Attraction multiplier outside the orbit band
const FAR_ATTRACTION_FACTOR: f32 = 1.5;
/// Attraction multiplier inside the orbit band
const NEAR_ATTRACTION_FACTOR: f32 = 0.5;

/// Per-tick force parameters, derived from the configuration once per tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceField {
    pub attraction: f32,
    pub inner_radius: f32,
    pub outer_radius: f32,
    /// Two repulsion radii: pairs farther apart than this don't interact
    pub combined_radius: f32,
    pub touch_distance: f32,
    pub repulsion: f32,
    pub strong_repulsion: f32,
}

impl ForceField {
    pub fn from_config(config: &Configuration) -> Self {
        Self {
            attraction: config.attraction_force,
            inner_radius: config.orbit_radius_inner(),
            outer_radius: config.orbit_radius_outer(),
            combined_radius: config.node_repulsion_radius() * 2.0,
            touch_distance: config.node_touch_distance(),
            repulsion: config.repulsion_force,
            strong_repulsion: config.strong_repulsion(),
        }
    }

    /// Pull harder outside the orbit band, ease off inside it
    pub fn attraction_multiplier(&self, distance: f32) -> f32 {
        if distance > self.outer_radius {
            self.attraction * FAR_ATTRACTION_FACTOR
        } else if distance < self.inner_radius {
            self.attraction * NEAR_ATTRACTION_FACTOR
        } else {
            self.attraction
        }
    }

    /// Force pulling a node toward the center
    ///
    /// Grows linearly with distance (no cap), so it behaves like a spring.
    pub fn attraction(&self, center: Vec2, position: Vec2) -> Vec2 {
        let d = center - position;
        d * self.attraction_multiplier(d.length())
    }

    /// Repulsion felt by the node at `a` from the node at `b`
    ///
    /// The node at `b` feels the exact opposite. `None` when the pair is out
    /// of range or the two positions coincide.
    pub fn repulsion(&self, a: Vec2, b: Vec2) -> Option<Vec2> {
        let delta = a - b;
        let dist_sq = delta.length_squared();

        // Cheap early-out before the square root
        if dist_sq >= self.combined_radius * self.combined_radius {
            return None;
        }

        let distance = dist_sq.sqrt();
        if distance <= 0.0 {
            return None;
        }

        let penetration = 1.0 - distance / self.combined_radius;
        let coefficient = if distance < self.touch_distance {
            self.strong_repulsion
        } else {
            self.repulsion
        };
        let magnitude = penetration * penetration * coefficient;

        let force = delta / distance * magnitude;
        force.is_finite().then_some(force)
    }

    /// Force on every orbit node, in input order
    pub fn compute(&self, center: Vec2, nodes: &[Vec2]) -> Vec<Vec2> {
        let mut forces: Vec<Vec2> = nodes
            .iter()
            .map(|&position| self.attraction(center, position))
            .collect();

        for i in 0..nodes.len() {
            for j in (i + 1)..nodes.len() {
                if let Some(force) = self.repulsion(nodes[i], nodes[j]) {
                    forces[i] += force;
                    forces[j] -= force;
                }
            }
        }

        forces
    }
}

impl SimulationContext {
    /// Push this tick's forces into the engine
    pub fn apply_force_field(&mut self) {
        let Some(scene) = &self.scene else {
            return;
        };
        if scene.orbit.is_empty() {
            return;
        }
        let Some(center) = self.world.body(scene.center).map(|body| body.position) else {
            return;
        };

        let nodes = self.orbit_positions();
        let field = ForceField::from_config(&self.config);
        let forces = field.compute(center, &nodes);

        for (&handle, force) in scene.orbit.iter().zip(forces) {
            self.world.apply_force(handle, force);
        }
    }
}
