use bevy::prelude::*;
use std::time::Duration;

use super::{SimulationContext, scene::orbit_position};

/// Quiet period after the last resize before the policy runs
pub const RESIZE_QUIET_WINDOW: Duration = Duration::from_millis(250);

/// Fraction of the smaller viewport side the center may drift before a snap
pub const RECENTER_THRESHOLD_FRACTION: f32 = 0.4;

pub fn recenter_threshold(viewport: Vec2) -> f32 {
    viewport.x.min(viewport.y) * RECENTER_THRESHOLD_FRACTION
}

/// Strictly beyond the threshold; sitting exactly on it is left alone
pub fn needs_recenter(center_position: Vec2, viewport: Vec2) -> bool {
    let target = viewport * 0.5;
    center_position.distance(target) > recenter_threshold(viewport)
}

impl SimulationContext {
    /// Snap the formation back to the middle of `viewport` if the center
    /// body has drifted too far from it. Returns whether it snapped.
    pub fn recenter(&mut self, viewport: Vec2) -> bool {
        let Some(scene) = &self.scene else {
            return false;
        };
        let Some(current) = self.world.body(scene.center).map(|body| body.position) else {
            return false;
        };
        if !needs_recenter(current, viewport) {
            return false;
        }

        let target = viewport * 0.5;
        self.world.set_position(scene.center, target);
        self.world.set_velocity(scene.center, Vec2::ZERO);

        let count = scene.orbit.len();
        for (i, &node) in scene.orbit.iter().enumerate() {
            let position = orbit_position(target, self.config.orbit_radius, i, count);
            self.world.set_position(node, position);
            self.world.set_velocity(node, Vec2::ZERO);
        }

        info!(
            "Recentered formation to ({:.0}, {:.0}) for a {:.0}x{:.0} viewport",
            target.x, target.y, viewport.x, viewport.y
        );
        true
    }
}

/// Single-shot rescheduling timer
///
/// Every [`Debounce::trigger`] restarts the quiet window; [`Debounce::tick`]
/// reports `true` exactly once when the window elapses without a new
/// trigger.
#[derive(Resource, Debug)]
pub struct Debounce {
    window: Duration,
    /// Time left before firing, if armed
    remaining: Option<Duration>,
}

impl Default for Debounce {
    fn default() -> Self {
        Self::new(RESIZE_QUIET_WINDOW)
    }
}

impl Debounce {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            remaining: None,
        }
    }

    /// Cancel any pending fire and start a fresh window
    pub fn trigger(&mut self) {
        self.remaining = Some(self.window);
    }

    pub fn is_pending(&self) -> bool {
        self.remaining.is_some()
    }

    pub fn tick(&mut self, delta: Duration) -> bool {
        let Some(remaining) = self.remaining else {
            return false;
        };
        match remaining.checked_sub(delta) {
            Some(left) if !left.is_zero() => {
                self.remaining = Some(left);
                false
            }
            _ => {
                self.remaining = None;
                true
            }
        }
    }
}
