use bevy::math::Vec2;

use super::{PhysicsWorld, pair_mut};

/// Length of one simulation step in milliseconds (60 Hz)
pub const STEP_MILLIS: f32 = 1000.0 / 60.0;

/// Positional stiffness of the pointer drag constraint
pub const DRAG_STIFFNESS: f32 = 0.2;

const LINK_ITERATIONS: usize = 2;
const COLLISION_ITERATIONS: usize = 3;

/// Separations below this are treated as coincident
const MIN_SEPARATION: f32 = 1e-6;

impl PhysicsWorld {
    /// Advance the world by one fixed step
    ///
    /// Order: integrate accumulated forces, solve links, pull the dragged
    /// body, then separate overlapping circles.
    pub fn step(&mut self) {
        let delta_squared = STEP_MILLIS * STEP_MILLIS;

        for body in &mut self.bodies {
            body.integrate(delta_squared);
        }

        for _ in 0..LINK_ITERATIONS {
            self.solve_links();
        }

        self.solve_drag();

        for _ in 0..COLLISION_ITERATIONS {
            self.solve_collisions();
        }
    }

    fn solve_links(&mut self) {
        for link_idx in 0..self.links.len() {
            let link = self.links[link_idx];
            let (Some(ia), Some(ib)) = (self.body_index(link.body_a), self.body_index(link.body_b))
            else {
                continue;
            };
            let Some((a, b)) = pair_mut(&mut self.bodies, ia, ib) else {
                continue;
            };

            let delta = b.position - a.position;
            let current = delta.length();
            if current < MIN_SEPARATION {
                continue;
            }

            let inverse_total = a.inverse_mass() + b.inverse_mass();
            let share_a = a.inverse_mass() / inverse_total;
            let share_b = b.inverse_mass() / inverse_total;

            // Hooke-style correction toward the rest length
            let difference = (current - link.length) / current;
            let correction = delta * difference * link.stiffness;
            if !correction.is_finite() {
                log::warn!("Skipping link {} with non-finite correction", link_idx);
                continue;
            }
            a.apply_correction(correction * share_a);
            b.apply_correction(-correction * share_b);

            if link.damping > 0.0 {
                let normal = delta / current;
                let relative = (b.velocity - a.velocity).dot(normal);
                let damp = normal * relative * link.damping;
                a.velocity += damp * share_a;
                b.velocity -= damp * share_b;
            }
        }
    }

    fn solve_drag(&mut self) {
        let Some(drag) = self.drag else {
            return;
        };
        let Some(body) = self.body_mut(drag.body) else {
            // Dragged body vanished with a rebuild
            self.drag = None;
            return;
        };

        let pull = (drag.point - body.position) * DRAG_STIFFNESS;
        if pull.is_finite() {
            body.apply_correction(pull);
        }
    }

    fn solve_collisions(&mut self) {
        let count = self.bodies.len();

        for i in 0..count {
            for j in (i + 1)..count {
                let Some((a, b)) = pair_mut(&mut self.bodies, i, j) else {
                    continue;
                };

                let delta = b.position - a.position;
                let min_distance = a.radius + b.radius;
                let dist_sq = delta.length_squared();
                if dist_sq >= min_distance * min_distance || dist_sq < MIN_SEPARATION {
                    continue;
                }

                let distance = dist_sq.sqrt();
                let normal = delta / distance;
                let overlap = min_distance - distance;

                let inverse_total = a.inverse_mass() + b.inverse_mass();
                let share_a = a.inverse_mass() / inverse_total;
                let share_b = b.inverse_mass() / inverse_total;

                a.position -= normal * overlap * share_a;
                b.position += normal * overlap * share_b;

                // Only bounce bodies that are still approaching
                let approach = (b.velocity - a.velocity).dot(normal);
                if approach < 0.0 {
                    let restitution = a.restitution.max(b.restitution);
                    let impulse = -(1.0 + restitution) * approach / inverse_total;
                    a.velocity -= normal * impulse * a.inverse_mass();
                    b.velocity += normal * impulse * b.inverse_mass();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Link, tests::plain_body};

    #[test]
    fn test_link_pulls_stretched_pair_together() {
        let mut world = PhysicsWorld::new();
        let a = world.add_body(plain_body(Vec2::ZERO, 1.0));
        let b = world.add_body(plain_body(Vec2::new(100.0, 0.0), 1.0));
        world.add_link(Link {
            body_a: a,
            body_b: b,
            stiffness: 0.1,
            damping: 0.1,
            length: 50.0,
            visible: false,
        });

        world.step();

        let gap = world.body(b).unwrap().position.x - world.body(a).unwrap().position.x;
        assert!(gap < 100.0);
        assert!(gap > 50.0);
        // Equal masses share the correction evenly
        let mid = (world.body(b).unwrap().position.x + world.body(a).unwrap().position.x) / 2.0;
        assert!((mid - 50.0).abs() < 1e-3);
    }

    #[test]
    fn test_link_pushes_compressed_pair_apart() {
        let mut world = PhysicsWorld::new();
        let a = world.add_body(plain_body(Vec2::ZERO, 1.0));
        let b = world.add_body(plain_body(Vec2::new(10.0, 0.0), 1.0));
        world.add_link(Link {
            body_a: a,
            body_b: b,
            stiffness: 0.5,
            damping: 0.0,
            length: 50.0,
            visible: false,
        });

        world.step();

        let gap = world.body(b).unwrap().position.x - world.body(a).unwrap().position.x;
        assert!(gap > 10.0);
    }

    #[test]
    fn test_overlapping_circles_are_separated() {
        let mut world = PhysicsWorld::new();
        let a = world.add_body(plain_body(Vec2::ZERO, 10.0));
        let b = world.add_body(plain_body(Vec2::new(5.0, 0.0), 10.0));

        world.step();

        let distance = world
            .body(a)
            .unwrap()
            .position
            .distance(world.body(b).unwrap().position);
        assert!(distance >= 20.0 - 1e-3);
    }

    #[test]
    fn test_coincident_circles_stay_finite() {
        let mut world = PhysicsWorld::new();
        let a = world.add_body(plain_body(Vec2::ZERO, 10.0));
        let b = world.add_body(plain_body(Vec2::ZERO, 10.0));

        world.step();

        assert!(world.body(a).unwrap().position.is_finite());
        assert!(world.body(b).unwrap().position.is_finite());
    }

    #[test]
    fn test_approaching_bodies_bounce() {
        let mut world = PhysicsWorld::new();
        let a = world.add_body(plain_body(Vec2::ZERO, 10.0));
        let b = world.add_body(plain_body(Vec2::new(21.0, 0.0), 10.0));
        world.set_velocity(a, Vec2::new(2.0, 0.0));
        world.set_velocity(b, Vec2::new(-2.0, 0.0));

        world.step();

        assert!(world.body(a).unwrap().velocity.x <= 0.0);
        assert!(world.body(b).unwrap().velocity.x >= 0.0);
    }

    #[test]
    fn test_drag_pulls_body_toward_pointer() {
        let mut world = PhysicsWorld::new();
        let a = world.add_body(plain_body(Vec2::ZERO, 5.0));

        assert_eq!(world.begin_drag(Vec2::new(1.0, 1.0)), Some(a));
        world.update_drag(Vec2::new(100.0, 0.0));
        world.step();

        let x = world.body(a).unwrap().position.x;
        assert!((x - 100.0 * DRAG_STIFFNESS).abs() < 1e-3);
    }
}
