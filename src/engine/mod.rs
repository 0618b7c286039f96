//! Minimal 2D rigid-circle engine
//!
//! Owns every body and link. Callers hold [`BodyHandle`]s and
//! [`LinkHandle`]s; a handle stays valid until the next [`PhysicsWorld::clear`],
//! after which lookups through it return `None`.

mod body;
mod link;
mod step;

pub use body::{Body, BodyOptions, BodyStyle};
pub use link::Link;

use bevy::math::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyHandle {
    index: u32,
    epoch: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LinkHandle {
    index: u32,
    epoch: u32,
}

/// Pointer constraint pulling one body toward a point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragConstraint {
    pub body: BodyHandle,
    pub point: Vec2,
}

#[derive(Debug, Default)]
pub struct PhysicsWorld {
    bodies: Vec<Body>,
    links: Vec<Link>,
    /// Bumped on every clear; invalidates all outstanding handles
    epoch: u32,
    drag: Option<DragConstraint>,
}

impl PhysicsWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove every body, link and the drag constraint
    pub fn clear(&mut self) {
        self.bodies.clear();
        self.links.clear();
        self.drag = None;
        self.epoch = self.epoch.wrapping_add(1);
    }

    pub fn add_body(&mut self, body: Body) -> BodyHandle {
        let handle = BodyHandle {
            index: self.bodies.len() as u32,
            epoch: self.epoch,
        };
        self.bodies.push(body);
        handle
    }

    /// Returns `None` if either end is not a live body
    pub fn add_link(&mut self, link: Link) -> Option<LinkHandle> {
        self.body_index(link.body_a)?;
        self.body_index(link.body_b)?;

        let handle = LinkHandle {
            index: self.links.len() as u32,
            epoch: self.epoch,
        };
        self.links.push(link);
        Some(handle)
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub fn body(&self, handle: BodyHandle) -> Option<&Body> {
        self.body_index(handle).map(|i| &self.bodies[i])
    }

    pub fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut Body> {
        self.body_index(handle).map(|i| &mut self.bodies[i])
    }

    pub fn link(&self, handle: LinkHandle) -> Option<&Link> {
        self.link_index(handle).map(|i| &self.links[i])
    }

    pub fn link_mut(&mut self, handle: LinkHandle) -> Option<&mut Link> {
        self.link_index(handle).map(|i| &mut self.links[i])
    }

    pub fn bodies(&self) -> impl Iterator<Item = (BodyHandle, &Body)> {
        let epoch = self.epoch;
        self.bodies.iter().enumerate().map(move |(i, body)| {
            (
                BodyHandle {
                    index: i as u32,
                    epoch,
                },
                body,
            )
        })
    }

    pub fn links(&self) -> impl Iterator<Item = (LinkHandle, &Link)> {
        let epoch = self.epoch;
        self.links.iter().enumerate().map(move |(i, link)| {
            (
                LinkHandle {
                    index: i as u32,
                    epoch,
                },
                link,
            )
        })
    }

    // === Mutation requests (false when the handle is stale) ===

    pub fn apply_force(&mut self, handle: BodyHandle, force: Vec2) -> bool {
        if !force.is_finite() {
            log::warn!("Dropping non-finite force {:?}", force);
            return false;
        }
        self.body_mut(handle)
            .map(|body| body.apply_force(force))
            .is_some()
    }

    pub fn set_mass(&mut self, handle: BodyHandle, mass: f32) -> bool {
        self.body_mut(handle).map(|body| body.set_mass(mass)).is_some()
    }

    pub fn set_friction_air(&mut self, handle: BodyHandle, friction_air: f32) -> bool {
        self.body_mut(handle)
            .map(|body| body.friction_air = friction_air)
            .is_some()
    }

    pub fn set_position(&mut self, handle: BodyHandle, position: Vec2) -> bool {
        self.body_mut(handle)
            .map(|body| body.position = position)
            .is_some()
    }

    pub fn set_velocity(&mut self, handle: BodyHandle, velocity: Vec2) -> bool {
        self.body_mut(handle)
            .map(|body| body.velocity = velocity)
            .is_some()
    }

    // === Pointer drag ===

    /// Grab the top-most body under `point`
    pub fn begin_drag(&mut self, point: Vec2) -> Option<BodyHandle> {
        let (handle, _) = self
            .bodies()
            .filter(|(_, body)| body.contains(point))
            .last()?;

        self.drag = Some(DragConstraint {
            body: handle,
            point,
        });
        Some(handle)
    }

    pub fn update_drag(&mut self, point: Vec2) {
        if let Some(drag) = &mut self.drag {
            drag.point = point;
        }
    }

    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    pub fn drag(&self) -> Option<DragConstraint> {
        self.drag
    }

    fn body_index(&self, handle: BodyHandle) -> Option<usize> {
        let index = handle.index as usize;
        (handle.epoch == self.epoch && index < self.bodies.len()).then_some(index)
    }

    fn link_index(&self, handle: LinkHandle) -> Option<usize> {
        let index = handle.index as usize;
        (handle.epoch == self.epoch && index < self.links.len()).then_some(index)
    }
}

/// Borrow two distinct elements mutably
fn pair_mut<T>(items: &mut [T], a: usize, b: usize) -> Option<(&mut T, &mut T)> {
    if a == b || a >= items.len() || b >= items.len() {
        return None;
    }
    if a < b {
        let (head, tail) = items.split_at_mut(b);
        Some((&mut head[a], &mut tail[0]))
    } else {
        let (head, tail) = items.split_at_mut(a);
        Some((&mut tail[0], &mut head[b]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::color::Color;

    pub(crate) fn plain_body(position: Vec2, radius: f32) -> Body {
        Body::circle(
            position,
            radius,
            BodyOptions {
                mass: Some(1.0),
                friction_air: 0.0,
                restitution: 0.0,
                style: BodyStyle::solid(Color::BLACK),
            },
        )
    }

    #[test]
    fn test_handles_go_stale_after_clear() {
        let mut world = PhysicsWorld::new();
        let a = world.add_body(plain_body(Vec2::ZERO, 1.0));
        let b = world.add_body(plain_body(Vec2::X, 1.0));
        let link = world
            .add_link(Link {
                body_a: a,
                body_b: b,
                stiffness: 0.1,
                damping: 0.0,
                length: 1.0,
                visible: false,
            })
            .unwrap();

        world.clear();
        let fresh = world.add_body(plain_body(Vec2::ZERO, 1.0));

        assert!(world.body(a).is_none());
        assert!(world.link(link).is_none());
        assert!(!world.apply_force(a, Vec2::X));
        assert!(world.body(fresh).is_some());
        assert_eq!(world.body_count(), 1);
        assert_eq!(world.link_count(), 0);
    }

    #[test]
    fn test_link_to_stale_body_is_rejected() {
        let mut world = PhysicsWorld::new();
        let stale = world.add_body(plain_body(Vec2::ZERO, 1.0));
        world.clear();
        let live = world.add_body(plain_body(Vec2::ZERO, 1.0));

        let link = world.add_link(Link {
            body_a: live,
            body_b: stale,
            stiffness: 0.1,
            damping: 0.0,
            length: 1.0,
            visible: false,
        });
        assert!(link.is_none());
    }

    #[test]
    fn test_non_finite_force_is_dropped() {
        let mut world = PhysicsWorld::new();
        let a = world.add_body(plain_body(Vec2::ZERO, 1.0));

        assert!(!world.apply_force(a, Vec2::new(f32::NAN, 0.0)));
        assert_eq!(world.body(a).unwrap().force, Vec2::ZERO);
    }

    #[test]
    fn test_begin_drag_picks_top_most() {
        let mut world = PhysicsWorld::new();
        let _below = world.add_body(plain_body(Vec2::ZERO, 10.0));
        let above = world.add_body(plain_body(Vec2::new(2.0, 0.0), 3.0));

        assert_eq!(world.begin_drag(Vec2::new(1.0, 0.0)), Some(above));
        assert!(world.drag().is_some());

        world.end_drag();
        assert!(world.begin_drag(Vec2::new(50.0, 0.0)).is_none());
        assert!(world.drag().is_none());
    }

    #[test]
    fn test_clear_releases_drag() {
        let mut world = PhysicsWorld::new();
        world.add_body(plain_body(Vec2::ZERO, 10.0));
        world.begin_drag(Vec2::ZERO);

        world.clear();

        assert!(world.drag().is_none());
    }

    #[test]
    fn test_pair_mut() {
        let mut items = [1, 2, 3];

        let (a, b) = pair_mut(&mut items, 2, 0).unwrap();
        std::mem::swap(a, b);
        assert_eq!(items, [3, 2, 1]);

        assert!(pair_mut(&mut items, 1, 1).is_none());
        assert!(pair_mut(&mut items, 0, 3).is_none());
    }
}
