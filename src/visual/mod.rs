pub mod bodies;
pub mod interactions;
pub mod overlay;
pub mod plugin;
pub mod setup;
pub mod tick;
pub mod ui;
pub mod viewport;
