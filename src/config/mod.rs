mod field;
mod presets;

pub use field::{ConfigField, FieldEffect, FieldValue, Patch};
pub use presets::{Preset, PresetLibrary};

use serde::{Deserialize, Serialize};

/// Inner edge of the orbit band, as a fraction of the orbit radius
pub const ORBIT_BAND_INNER: f32 = 0.9;
/// Outer edge of the orbit band, as a fraction of the orbit radius
pub const ORBIT_BAND_OUTER: f32 = 1.1;
/// Repulsion coefficient multiplier once two nodes visually overlap
pub const STRONG_REPULSION_FACTOR: f32 = 5.0;

/// Live tunables for the simulation
///
/// Every field maps to one on-screen control. Presets replace the whole
/// record at once; controls mutate single fields through [`Configuration::set`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    pub center_mass: f32,
    pub center_friction: f32,
    pub center_size: f32,
    pub node_count: usize,
    pub node_size: f32,
    pub orbit_radius: f32,
    pub attraction_force: f32,
    pub repulsion_force: f32,
    pub repulsion_distance: f32,
    pub node_friction: f32,
    pub connection_stiffness: f32,
    pub show_connections: bool,
    pub show_springs: bool,
}

impl Configuration {
    // === Derived quantities (never stored) ===

    pub fn orbit_radius_inner(&self) -> f32 {
        self.orbit_radius * ORBIT_BAND_INNER
    }

    pub fn orbit_radius_outer(&self) -> f32 {
        self.orbit_radius * ORBIT_BAND_OUTER
    }

    /// Radius of each node's repulsion field
    pub fn node_repulsion_radius(&self) -> f32 {
        self.node_size * self.repulsion_distance
    }

    /// Separation below which two nodes are considered touching
    pub fn node_touch_distance(&self) -> f32 {
        self.node_size * 2.0
    }

    pub fn strong_repulsion(&self) -> f32 {
        self.repulsion_force * STRONG_REPULSION_FACTOR
    }

    // === Field access for the control layer ===

    pub fn get(&self, field: ConfigField) -> FieldValue {
        use ConfigField::*;
        match field {
            CenterMass => FieldValue::Number(self.center_mass),
            CenterFriction => FieldValue::Number(self.center_friction),
            CenterSize => FieldValue::Number(self.center_size),
            NodeCount => FieldValue::Number(self.node_count as f32),
            NodeSize => FieldValue::Number(self.node_size),
            OrbitRadius => FieldValue::Number(self.orbit_radius),
            AttractionForce => FieldValue::Number(self.attraction_force),
            RepulsionForce => FieldValue::Number(self.repulsion_force),
            RepulsionDistance => FieldValue::Number(self.repulsion_distance),
            NodeFriction => FieldValue::Number(self.node_friction),
            ConnectionStiffness => FieldValue::Number(self.connection_stiffness),
            ShowConnections => FieldValue::Toggle(self.show_connections),
            ShowSprings => FieldValue::Toggle(self.show_springs),
        }
    }

    /// Write one field, clamping numbers to the field's control range
    ///
    /// Returns `Ok(true)` if the stored value actually changed.
    pub fn set(&mut self, field: ConfigField, value: FieldValue) -> Result<bool, String> {
        use ConfigField::*;

        let before = self.get(field);

        match (field.range(), value) {
            (Some(range), FieldValue::Number(raw)) => {
                if !raw.is_finite() {
                    return Err(format!("{} cannot be set to {}", field.label(), raw));
                }
                // Rewriting the current value is a no-op, so off-grid preset
                // values are not snapped behind the user's back
                if FieldValue::Number(raw) == before {
                    return Ok(false);
                }
                let v = range.clamp(raw);
                match field {
                    CenterMass => self.center_mass = v,
                    CenterFriction => self.center_friction = v,
                    CenterSize => self.center_size = v,
                    NodeCount => self.node_count = v as usize,
                    NodeSize => self.node_size = v,
                    OrbitRadius => self.orbit_radius = v,
                    AttractionForce => self.attraction_force = v,
                    RepulsionForce => self.repulsion_force = v,
                    RepulsionDistance => self.repulsion_distance = v,
                    NodeFriction => self.node_friction = v,
                    ConnectionStiffness => self.connection_stiffness = v,
                    ShowConnections | ShowSprings => {}
                }
            }
            (None, FieldValue::Toggle(on)) => match field {
                ShowConnections => self.show_connections = on,
                ShowSprings => self.show_springs = on,
                _ => {}
            },
            (_, value) => {
                return Err(format!(
                    "{} does not accept {:?}",
                    field.label(),
                    value
                ));
            }
        }

        Ok(self.get(field) != before)
    }

    /// Current value formatted for a control label
    pub fn display_value(&self, field: ConfigField) -> String {
        match (self.get(field), field.range()) {
            (FieldValue::Number(v), _) if field == ConfigField::NodeCount => {
                format!("{}", v as usize)
            }
            (FieldValue::Number(v), Some(range)) => range.format(v),
            (FieldValue::Number(v), None) => format!("{}", v),
            (FieldValue::Toggle(true), _) => "on".to_string(),
            (FieldValue::Toggle(false), _) => "off".to_string(),
        }
    }
}
