use bevy::input::touch::{TouchInput, TouchPhase};
use bevy::prelude::*;
use bevy::window::CursorMoved;

pub struct InputPlugin;
impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CursorPos>()
            .add_message::<PointerEvent>()
            .add_systems(Update, (track_cursor_pos, collect_pointer_events).chain());
    }
}

#[derive(Message, Debug, Clone)]
pub struct PointerEvent {
    /// Window (logical) coordinates
    pub position: Vec2,
    pub event_type: PointerEventType,
    /// 0 = mouse, otherwise the touch id
    pub id: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEventType {
    Down,
    Move,
    Up,
}

impl PointerEvent {
    /// Project onto the simulation plane (z = 0)
    pub fn to_world_position(
        &self,
        camera: &Camera,
        camera_transform: &GlobalTransform,
    ) -> Option<Vec2> {
        let ray = camera
            .viewport_to_world(camera_transform, self.position)
            .ok()?;
        if ray.direction.z.abs() <= f32::EPSILON {
            return None;
        }
        let t = -ray.origin.z / ray.direction.z;
        Some((ray.origin + ray.direction * t).truncate())
    }
}

#[derive(Resource, Default, Debug, Clone, Copy)]
struct CursorPos(pub Option<Vec2>);

fn track_cursor_pos(mut ev_cursor: MessageReader<CursorMoved>, mut pos: ResMut<CursorPos>) {
    if let Some(e) = ev_cursor.read().last() {
        pos.0 = Some(e.position);
    }
}

fn collect_pointer_events(
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    cursor: Res<CursorPos>,
    mut touch_events: MessageReader<TouchInput>,
    mut out: MessageWriter<PointerEvent>,
) {
    if let Some(p) = cursor.0 {
        let event_type = if mouse_buttons.just_pressed(MouseButton::Left) {
            Some(PointerEventType::Down)
        } else if mouse_buttons.just_released(MouseButton::Left) {
            Some(PointerEventType::Up)
        } else if mouse_buttons.pressed(MouseButton::Left) {
            Some(PointerEventType::Move)
        } else {
            None
        };
        if let Some(event_type) = event_type {
            out.write(PointerEvent {
                position: p,
                event_type,
                id: 0,
            });
        }
    }

    for ev in touch_events.read() {
        let event_type = match ev.phase {
            TouchPhase::Started => PointerEventType::Down,
            TouchPhase::Moved => PointerEventType::Move,
            TouchPhase::Ended | TouchPhase::Canceled => PointerEventType::Up,
        };
        out.write(PointerEvent {
            position: ev.position,
            event_type,
            id: ev.id,
        });
    }
}
