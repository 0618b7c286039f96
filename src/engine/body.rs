use bevy::color::Color;
use bevy::math::Vec2;

/// Mass per unit area for bodies created without an explicit mass
pub const DEFAULT_DENSITY: f32 = 0.001;

/// How a body is painted
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyStyle {
    pub fill: Color,
    pub stroke: Color,
}

impl BodyStyle {
    pub fn solid(color: Color) -> Self {
        Self {
            fill: color,
            stroke: color,
        }
    }
}

/// Physical properties requested at creation time
#[derive(Debug, Clone, Copy)]
pub struct BodyOptions {
    /// Explicit mass; `None` derives it from [`DEFAULT_DENSITY`] and area
    pub mass: Option<f32>,
    pub friction_air: f32,
    pub restitution: f32,
    pub style: BodyStyle,
}

/// A circular point mass
///
/// Velocity is expressed in world units per step, so that forces tuned
/// for a fixed 60 Hz step behave the same on every machine.
#[derive(Debug, Clone)]
pub struct Body {
    /// Current position
    pub position: Vec2,
    /// Current velocity (per step)
    pub velocity: Vec2,
    /// Accumulated forces this step
    pub force: Vec2,
    /// Fraction of velocity lost every step (0 = none, 1 = all)
    pub friction_air: f32,
    /// Bounciness on collision
    pub restitution: f32,
    pub radius: f32,
    pub style: BodyStyle,
    mass: f32,
    inverse_mass: f32,
}

impl Body {
    pub fn circle(position: Vec2, radius: f32, options: BodyOptions) -> Self {
        let area = std::f32::consts::PI * radius * radius;
        let mass = options.mass.unwrap_or(DEFAULT_DENSITY * area);

        let mut body = Body {
            position,
            velocity: Vec2::ZERO,
            force: Vec2::ZERO,
            friction_air: options.friction_air,
            restitution: options.restitution,
            radius,
            style: options.style,
            mass: 1.0,
            inverse_mass: 1.0,
        };
        body.set_mass(mass);
        body
    }

    pub fn mass(&self) -> f32 {
        self.mass
    }

    pub fn inverse_mass(&self) -> f32 {
        self.inverse_mass
    }

    /// Non-positive or non-finite masses are ignored
    pub fn set_mass(&mut self, mass: f32) {
        if mass > 0.0 && mass.is_finite() {
            self.mass = mass;
            self.inverse_mass = 1.0 / mass;
        } else {
            log::warn!("Ignoring invalid body mass {}", mass);
        }
    }

    /// Accumulate a force for the next step
    pub fn apply_force(&mut self, force: Vec2) {
        self.force += force;
    }

    /// Move the body by a constraint correction
    ///
    /// The displacement also shows up in the velocity, so a stretched link
    /// keeps swinging after the correction.
    pub fn apply_correction(&mut self, delta: Vec2) {
        self.position += delta;
        self.velocity += delta;
    }

    /// Does the point lie inside the body's circle?
    pub fn contains(&self, point: Vec2) -> bool {
        self.position.distance_squared(point) <= self.radius * self.radius
    }

    /// Advance one step and clear the accumulated force
    pub(crate) fn integrate(&mut self, delta_squared: f32) {
        let keep = 1.0 - self.friction_air;
        self.velocity = self.velocity * keep + self.force * self.inverse_mass * delta_squared;
        self.position += self.velocity;
        self.force = Vec2::ZERO;
    }
}
