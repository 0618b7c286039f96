//! Keyboard-driven control panel listing every configuration field.
//!
//! The panel never touches the simulation directly: every key press becomes
//! a [`ConfigCommand`] on the [`ControlQueue`], applied at the next tick.

use bevy::prelude::*;
use std::fmt::Write as _;

use crate::{
    config::{ConfigField, Configuration, FieldValue, Preset},
    sim::{ConfigCommand, ControlQueue, SimulationContext},
};

const PANEL_FONT_SIZE: f32 = 14.0;
const PANEL_TEXT_COLOR: Color = Color::srgb(0.15, 0.15, 0.15);
const PANEL_BACKGROUND: Color = Color::srgba(1.0, 1.0, 1.0, 0.85);
/// Step multiplier while Shift is held
const COARSE_STEP: f32 = 10.0;

const HELP: &str = "Up/Down select  Left/Right adjust (Shift x10)\n\
                    Space toggle  1/2 presets  R rebuild  D debug  H hide";

#[derive(Component)]
pub struct ControlPanel;

#[derive(Component)]
pub struct ControlPanelText;

#[derive(Resource, Debug)]
pub struct PanelState {
    /// Index into [`ConfigField::ALL`]
    pub selected: usize,
    pub visible: bool,
}

impl Default for PanelState {
    fn default() -> Self {
        Self {
            selected: 0,
            visible: true,
        }
    }
}

impl PanelState {
    pub fn selected_field(&self) -> ConfigField {
        ConfigField::ALL[self.selected % ConfigField::ALL.len()]
    }

    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1) % ConfigField::ALL.len();
    }

    pub fn select_previous(&mut self) {
        let count = ConfigField::ALL.len();
        self.selected = (self.selected + count - 1) % count;
    }
}

/// Value one step away from the current one; `None` for toggles
pub fn stepped_value(
    config: &Configuration,
    field: ConfigField,
    direction: f32,
    coarse: bool,
) -> Option<FieldValue> {
    let range = field.range()?;
    let FieldValue::Number(current) = config.get(field) else {
        return None;
    };
    let step = if coarse {
        range.step * COARSE_STEP
    } else {
        range.step
    };
    Some(FieldValue::Number(range.clamp(current + step * direction)))
}

/// Flipped value of a toggle field; `None` for numbers
pub fn toggled_value(config: &Configuration, field: ConfigField) -> Option<FieldValue> {
    match config.get(field) {
        FieldValue::Toggle(on) => Some(FieldValue::Toggle(!on)),
        FieldValue::Number(_) => None,
    }
}

/// `current` with the newest queued write to `field` already applied
///
/// Commands only land at the next fixed tick, so several presses in between
/// must step from each other rather than from the stale configuration.
fn pending_config(
    current: &Configuration,
    queue: &ControlQueue,
    field: ConfigField,
) -> Configuration {
    let mut config = *current;
    if let Some(value) = queue.latest_value(field) {
        if let Err(e) = config.set(field, value) {
            warn!("{}", e);
        }
    }
    config
}

pub fn panel_text(config: &Configuration, selected: ConfigField, debug_overlay: bool) -> String {
    let mut text = String::new();
    for field in ConfigField::ALL {
        let marker = if field == selected { ">" } else { " " };
        let _ = writeln!(
            text,
            "{} {}: {}",
            marker,
            field.label(),
            config.display_value(field)
        );
    }
    let _ = writeln!(
        text,
        "  Debug: {}",
        if debug_overlay { "on" } else { "off" }
    );
    text.push('\n');
    text.push_str(HELP);
    text
}

pub fn spawn_control_panel(mut commands: Commands) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(12.0),
                right: Val::Px(12.0),
                padding: UiRect::all(Val::Px(10.0)),
                ..default()
            },
            BackgroundColor(PANEL_BACKGROUND),
            ControlPanel,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: PANEL_FONT_SIZE,
                    ..default()
                },
                TextColor(PANEL_TEXT_COLOR),
                ControlPanelText,
            ));
        });
}

/// Translate key presses into queued commands
pub fn handle_panel_keys(
    keys: Res<ButtonInput<KeyCode>>,
    ctx: Res<SimulationContext>,
    mut panel: ResMut<PanelState>,
    mut queue: ResMut<ControlQueue>,
) {
    if keys.just_pressed(KeyCode::ArrowDown) {
        panel.select_next();
    }
    if keys.just_pressed(KeyCode::ArrowUp) {
        panel.select_previous();
    }

    let field = panel.selected_field();
    let coarse = keys.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight]);

    for (key, direction) in [(KeyCode::ArrowRight, 1.0), (KeyCode::ArrowLeft, -1.0)] {
        if !keys.just_pressed(key) {
            continue;
        }
        let config = pending_config(&ctx.config, &queue, field);
        let value = stepped_value(&config, field, direction, coarse)
            .or_else(|| toggled_value(&config, field));
        if let Some(value) = value {
            queue.push(ConfigCommand::Set(field, value));
        }
    }

    if keys.just_pressed(KeyCode::Space) {
        let config = pending_config(&ctx.config, &queue, field);
        if let Some(value) = toggled_value(&config, field) {
            queue.push(ConfigCommand::Set(field, value));
        }
    }

    for (key, preset) in [(KeyCode::Digit1, Preset::Preset1), (KeyCode::Digit2, Preset::Preset2)] {
        if keys.just_pressed(key) {
            queue.push(ConfigCommand::ApplyPreset(preset.name().to_string()));
        }
    }

    if keys.just_pressed(KeyCode::KeyR) {
        queue.push(ConfigCommand::Rebuild);
    }
    if keys.just_pressed(KeyCode::KeyD) {
        queue.push(ConfigCommand::ToggleDebugOverlay);
    }
    if keys.just_pressed(KeyCode::KeyH) {
        panel.visible = !panel.visible;
    }
}

/// Redraw the panel when the configuration or the selection changed
pub fn update_control_panel(
    ctx: Res<SimulationContext>,
    panel: Res<PanelState>,
    mut shown: Local<Option<(u64, usize, bool)>>,
    mut texts: Query<&mut Text, With<ControlPanelText>>,
    mut panels: Query<&mut Visibility, With<ControlPanel>>,
) {
    if panel.is_changed() {
        let visibility = if panel.visible {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
        for mut v in &mut panels {
            *v = visibility;
        }
    }

    let key = (ctx.config_revision(), panel.selected, ctx.debug_overlay);
    if *shown == Some(key) {
        return;
    }
    *shown = Some(key);

    let content = panel_text(&ctx.config, panel.selected_field(), ctx.debug_overlay);
    for mut text in &mut texts {
        text.0 = content.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PresetLibrary;
    use bevy::ecs::system::RunSystemOnce;

    fn preset1() -> Configuration {
        PresetLibrary::load().unwrap().startup()
    }

    #[test]
    fn test_selection_wraps() {
        let mut panel = PanelState::default();
        panel.select_previous();
        assert_eq!(panel.selected_field(), ConfigField::ShowSprings);
        panel.select_next();
        assert_eq!(panel.selected_field(), ConfigField::CenterMass);
    }

    #[test]
    fn test_stepped_value_uses_field_step() {
        let config = preset1();

        assert_eq!(
            stepped_value(&config, ConfigField::NodeCount, 1.0, false),
            Some(FieldValue::Number(37.0))
        );
        assert_eq!(
            stepped_value(&config, ConfigField::OrbitRadius, -1.0, true),
            Some(FieldValue::Number(90.0))
        );
    }

    #[test]
    fn test_stepped_value_stays_in_range() {
        let config = preset1();

        // center mass 19, max 20
        assert_eq!(
            stepped_value(&config, ConfigField::CenterMass, 1.0, true),
            Some(FieldValue::Number(20.0))
        );
        assert_eq!(
            stepped_value(&config, ConfigField::NodeCount, -1.0, true),
            Some(FieldValue::Number(26.0))
        );
    }

    #[test]
    fn test_toggles_flip_and_numbers_do_not() {
        let config = preset1();

        assert_eq!(
            toggled_value(&config, ConfigField::ShowConnections),
            Some(FieldValue::Toggle(true))
        );
        assert_eq!(toggled_value(&config, ConfigField::NodeSize), None);
        assert_eq!(
            stepped_value(&config, ConfigField::ShowSprings, 1.0, false),
            None
        );
    }

    fn world_with_panel(selected: ConfigField) -> World {
        let mut world = World::new();
        world.insert_resource(SimulationContext::new(preset1()));
        world.insert_resource(PanelState {
            selected: ConfigField::ALL
                .iter()
                .position(|&f| f == selected)
                .unwrap(),
            visible: true,
        });
        world.init_resource::<ControlQueue>();
        world.init_resource::<ButtonInput<KeyCode>>();
        world
    }

    fn press(world: &mut World, keys: &[KeyCode]) {
        {
            let mut input = world.resource_mut::<ButtonInput<KeyCode>>();
            input.release_all();
            input.clear();
            for &key in keys {
                input.press(key);
            }
        }
        world.run_system_once(handle_panel_keys).unwrap();
    }

    fn queued(world: &mut World) -> Vec<ConfigCommand> {
        world.resource_mut::<ControlQueue>().drain().collect()
    }

    #[test]
    fn test_selection_moves_before_adjusting() {
        let mut world = world_with_panel(ConfigField::CenterMass);

        press(&mut world, &[KeyCode::ArrowDown, KeyCode::ArrowRight]);

        assert_eq!(
            queued(&mut world),
            vec![ConfigCommand::Set(
                ConfigField::CenterFriction,
                FieldValue::Number(0.22)
            )]
        );
    }

    #[test]
    fn test_presses_between_ticks_accumulate() {
        let mut world = world_with_panel(ConfigField::RepulsionDistance);

        press(&mut world, &[KeyCode::ArrowRight]);
        press(&mut world, &[KeyCode::ArrowRight]);

        assert_eq!(
            queued(&mut world),
            vec![
                ConfigCommand::Set(ConfigField::RepulsionDistance, FieldValue::Number(2.6)),
                ConfigCommand::Set(ConfigField::RepulsionDistance, FieldValue::Number(2.7)),
            ]
        );
    }

    #[test]
    fn test_toggle_twice_between_ticks_flips_back() {
        let mut world = world_with_panel(ConfigField::ShowSprings);

        press(&mut world, &[KeyCode::Space]);
        press(&mut world, &[KeyCode::Space]);

        assert_eq!(
            queued(&mut world),
            vec![
                ConfigCommand::Set(ConfigField::ShowSprings, FieldValue::Toggle(true)),
                ConfigCommand::Set(ConfigField::ShowSprings, FieldValue::Toggle(false)),
            ]
        );
    }

    #[test]
    fn test_panel_text_lists_every_field() {
        let config = preset1();
        let text = panel_text(&config, ConfigField::NodeCount, false);

        for field in ConfigField::ALL {
            assert!(text.contains(field.label()), "missing {:?}", field);
        }
        assert!(text.contains("> Node Count: 36"));
        assert!(text.contains("  Center Mass: 19"));
        assert!(text.contains("Debug: off"));
    }
}
