pub mod panel;

pub use panel::{PanelState, handle_panel_keys, spawn_control_panel, update_control_panel};
