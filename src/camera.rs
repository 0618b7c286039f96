use bevy::camera::ScalingMode;
use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowResized};

use crate::sim::Debounce;

/// Distance of the camera in front of the simulation plane
const CAMERA_Z: f32 = 100.0;

/// Used until a window reports its size
const FALLBACK_VIEWPORT: Vec2 = Vec2::new(1280.0, 800.0);

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Viewport>()
            .init_resource::<Debounce>()
            .add_systems(Startup, setup_camera)
            .add_systems(Update, track_window_resize);
    }
}

/// Logical size of the drawing surface
///
/// World space matches it one to one: the bottom-left corner is the origin
/// and the top-right corner is `size`.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub size: Vec2,
    /// Physical pixels per logical pixel
    pub scale_factor: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            size: FALLBACK_VIEWPORT,
            scale_factor: 1.0,
        }
    }
}

impl Viewport {
    pub fn center(&self) -> Vec2 {
        self.size * 0.5
    }

    fn camera_transform(&self) -> Transform {
        let c = self.center();
        Transform::from_xyz(c.x, c.y, CAMERA_Z).looking_at(c.extend(0.0), Vec3::Y)
    }
}

#[derive(Component)]
pub struct MainCamera;

/// Orthographic camera looking down -Z at the XY plane
///
/// `ScalingMode::WindowSize` keeps one world unit per logical pixel, so
/// engine coordinates and screen coordinates agree.
pub fn setup_camera(
    mut commands: Commands,
    mut viewport: ResMut<Viewport>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    if let Ok(window) = windows.single() {
        viewport.size = Vec2::new(window.width(), window.height());
        viewport.scale_factor = window.scale_factor();
    }

    let projection = Projection::Orthographic(OrthographicProjection {
        scaling_mode: ScalingMode::WindowSize,
        near: 0.0,
        far: 1000.0,
        ..OrthographicProjection::default_3d()
    });
    commands.spawn((
        Camera3d::default(),
        projection,
        Tonemapping::None,
        viewport.camera_transform(),
        MainCamera,
    ));

    info!(
        "Viewport {}x{} at scale {}",
        viewport.size.x, viewport.size.y, viewport.scale_factor
    );
}

/// Follow the window immediately and arm the recenter debounce
fn track_window_resize(
    mut resized: MessageReader<WindowResized>,
    mut viewport: ResMut<Viewport>,
    mut debounce: ResMut<Debounce>,
    mut cameras: Query<&mut Transform, With<MainCamera>>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    let Some(last) = resized.read().last() else {
        return;
    };
    if let Ok(window) = windows.single() {
        let scale_factor = window.scale_factor();
        if scale_factor != viewport.scale_factor {
            info!("Scale factor changed to {}", scale_factor);
            viewport.scale_factor = scale_factor;
        }
    }
    let size = Vec2::new(last.width, last.height);
    if size == viewport.size || size.min_element() <= 0.0 {
        return;
    }

    viewport.size = size;
    for mut transform in &mut cameras {
        *transform = viewport.camera_transform();
    }
    debounce.trigger();
    debug!("Viewport resized to {}x{}", size.x, size.y);
}
