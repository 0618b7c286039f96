use bevy::prelude::*;

mod camera;
mod config;
mod engine;
mod input;
mod sim;
mod visual;

use bevy::window::WindowResolution;
use camera::CameraPlugin;
use input::InputPlugin;

use crate::visual::plugin::SimulationPlugin;

fn main() {
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Orbit Field".into(),
            resolution: WindowResolution::new(1280, 800),
            resizable: true,
            ..default()
        }),
        ..default()
    }))
    .insert_resource(ClearColor(Color::WHITE))
    .add_plugins(CameraPlugin)
    .add_plugins(InputPlugin)
    .add_plugins(SimulationPlugin);

    app.run();
}
