//! Field catalogue: labels, control ranges and the effect each change has on
//! the live scene.

/// One tunable of [`super::Configuration`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigField {
    CenterMass,
    CenterFriction,
    CenterSize,
    NodeCount,
    NodeSize,
    OrbitRadius,
    AttractionForce,
    RepulsionForce,
    RepulsionDistance,
    NodeFriction,
    ConnectionStiffness,
    ShowConnections,
    ShowSprings,
}

/// A value carried by a control
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue {
    Number(f32),
    Toggle(bool),
}

/// Slider bounds for a numeric field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldRange {
    pub min: f32,
    pub max: f32,
    pub step: f32,
    /// Integer fields round on write
    pub integer: bool,
}

impl FieldRange {
    const fn new(min: f32, max: f32, step: f32, integer: bool) -> Self {
        Self {
            min,
            max,
            step,
            integer,
        }
    }

    /// Decimal places needed to write `step` exactly
    pub fn decimals(&self) -> i32 {
        let mut decimals = 0;
        let mut scaled = self.step as f64;
        while decimals < MAX_DECIMALS
            && (scaled.round() == 0.0 || (scaled - scaled.round()).abs() > 1e-4)
        {
            scaled *= 10.0;
            decimals += 1;
        }
        decimals
    }

    /// Nearest point on the `min + k * step` grid
    ///
    /// Works in whole decimal units so repeated steps never accumulate error.
    pub fn snap(&self, value: f32) -> f32 {
        let scale = 10f64.powi(self.decimals());
        let step = (self.step as f64 * scale).round();
        if step <= 0.0 {
            return value;
        }
        let min = (self.min as f64 * scale).round();
        let steps = ((value as f64 * scale - min) / step).round();
        ((min + steps * step) / scale) as f32
    }

    /// Snap to the step grid, then into `[min, max]`
    pub fn clamp(&self, value: f32) -> f32 {
        let value = self.snap(value);
        let value = if self.integer { value.round() } else { value };
        value.clamp(self.min, self.max)
    }

    /// Label text: a couple of digits finer than the step, trailing zeros
    /// dropped, so preset values off the grid still read back in full
    pub fn format(&self, value: f32) -> String {
        let precision = (self.decimals() + 2) as usize;
        let text = format!("{:.*}", precision, value);
        let text = text.trim_end_matches('0').trim_end_matches('.');
        if text.is_empty() || text == "-" {
            "0".to_string()
        } else {
            text.to_string()
        }
    }
}

/// Finest step precision any control uses
const MAX_DECIMALS: i32 = 8;

/// In-place mutation applied to existing bodies or links
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Patch {
    CenterMass,
    CenterFriction,
    LinkLength,
    NodeFriction,
    LinkStiffness,
    LinkVisibility,
}

/// What a change to a field does to the running scene
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldEffect {
    /// Mutate the existing bodies/links without rebuilding
    PatchInPlace(Patch),
    /// Body geometry changed; throw the scene away and build a new one
    RebuildScene,
    /// Only the overlay renderer reads it
    CosmeticOnly,
    /// Read by the force field; jostle the nodes so the change shows at once
    Nudge,
    /// Read by the force field every tick, nothing else to do
    ReadLive,
}

impl ConfigField {
    pub const ALL: [ConfigField; 13] = [
        ConfigField::CenterMass,
        ConfigField::CenterFriction,
        ConfigField::CenterSize,
        ConfigField::NodeCount,
        ConfigField::NodeSize,
        ConfigField::OrbitRadius,
        ConfigField::AttractionForce,
        ConfigField::RepulsionForce,
        ConfigField::RepulsionDistance,
        ConfigField::NodeFriction,
        ConfigField::ConnectionStiffness,
        ConfigField::ShowConnections,
        ConfigField::ShowSprings,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ConfigField::CenterMass => "Center Mass",
            ConfigField::CenterFriction => "Center Friction",
            ConfigField::CenterSize => "Center Size",
            ConfigField::NodeCount => "Node Count",
            ConfigField::NodeSize => "Node Size",
            ConfigField::OrbitRadius => "Orbit Radius",
            ConfigField::AttractionForce => "Attraction Force",
            ConfigField::RepulsionForce => "Repulsion Force",
            ConfigField::RepulsionDistance => "Repulsion Distance",
            ConfigField::NodeFriction => "Node Friction",
            ConfigField::ConnectionStiffness => "Connection Stiffness",
            ConfigField::ShowConnections => "Show Connections",
            ConfigField::ShowSprings => "Show Springs",
        }
    }

    /// The effect table. Every field's contract lives here and nowhere else.
    ///
    /// Attraction is read live without a nudge, unlike the two repulsion
    /// parameters.
    pub fn effect(self) -> FieldEffect {
        match self {
            ConfigField::CenterMass => FieldEffect::PatchInPlace(Patch::CenterMass),
            ConfigField::CenterFriction => FieldEffect::PatchInPlace(Patch::CenterFriction),
            ConfigField::OrbitRadius => FieldEffect::PatchInPlace(Patch::LinkLength),
            ConfigField::NodeFriction => FieldEffect::PatchInPlace(Patch::NodeFriction),
            ConfigField::ConnectionStiffness => FieldEffect::PatchInPlace(Patch::LinkStiffness),
            ConfigField::ShowSprings => FieldEffect::PatchInPlace(Patch::LinkVisibility),
            ConfigField::CenterSize | ConfigField::NodeCount | ConfigField::NodeSize => {
                FieldEffect::RebuildScene
            }
            ConfigField::ShowConnections => FieldEffect::CosmeticOnly,
            ConfigField::RepulsionForce | ConfigField::RepulsionDistance => FieldEffect::Nudge,
            ConfigField::AttractionForce => FieldEffect::ReadLive,
        }
    }

    /// Control range; `None` for toggles
    pub fn range(self) -> Option<FieldRange> {
        let range = match self {
            ConfigField::CenterMass => FieldRange::new(1.0, 20.0, 1.0, false),
            ConfigField::CenterFriction => FieldRange::new(0.0, 0.5, 0.01, false),
            ConfigField::CenterSize => FieldRange::new(10.0, 100.0, 5.0, true),
            ConfigField::NodeCount => FieldRange::new(3.0, 100.0, 1.0, true),
            ConfigField::NodeSize => FieldRange::new(2.0, 40.0, 1.0, true),
            ConfigField::OrbitRadius => FieldRange::new(50.0, 500.0, 10.0, true),
            ConfigField::AttractionForce => FieldRange::new(0.0, 0.0001, 0.000001, false),
            ConfigField::RepulsionForce => FieldRange::new(0.0, 0.02, 0.0001, false),
            ConfigField::RepulsionDistance => FieldRange::new(1.0, 5.0, 0.1, false),
            ConfigField::NodeFriction => FieldRange::new(0.0, 1.0, 0.01, false),
            ConfigField::ConnectionStiffness => FieldRange::new(0.0, 0.02, 0.0002, false),
            ConfigField::ShowConnections | ConfigField::ShowSprings => return None,
        };
        Some(range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structural_fields_rebuild() {
        for field in [
            ConfigField::CenterSize,
            ConfigField::NodeCount,
            ConfigField::NodeSize,
        ] {
            assert_eq!(field.effect(), FieldEffect::RebuildScene, "{:?}", field);
        }
    }

    #[test]
    fn test_attraction_is_not_nudged() {
        assert_eq!(ConfigField::AttractionForce.effect(), FieldEffect::ReadLive);
        assert_eq!(ConfigField::RepulsionForce.effect(), FieldEffect::Nudge);
        assert_eq!(ConfigField::RepulsionDistance.effect(), FieldEffect::Nudge);
    }

    #[test]
    fn test_every_numeric_field_has_a_sane_range() {
        for field in ConfigField::ALL {
            match field.range() {
                Some(range) => {
                    assert!(range.min < range.max, "{:?}", field);
                    assert!(range.step > 0.0, "{:?}", field);
                }
                None => assert!(matches!(
                    field,
                    ConfigField::ShowConnections | ConfigField::ShowSprings
                )),
            }
        }
    }

    #[test]
    fn test_clamp_rounds_before_clamping() {
        let range = FieldRange::new(3.0, 100.0, 1.0, true);

        assert_eq!(range.clamp(2.6), 3.0);
        assert_eq!(range.clamp(41.5), 42.0);
        assert_eq!(range.clamp(250.0), 100.0);
    }

    #[test]
    fn test_repeated_steps_stay_on_grid() {
        let range = ConfigField::RepulsionDistance.range().unwrap();
        let mut value = 2.5;
        for _ in 0..5 {
            value = range.clamp(value + range.step);
        }

        assert_eq!(value, 3.0);
        assert_eq!(range.format(value), "3");

        let range = ConfigField::NodeFriction.range().unwrap();
        let mut value = 0.28;
        for _ in 0..5 {
            value = range.clamp(value + range.step);
        }
        assert_eq!(value, 0.33);
        assert_eq!(range.format(value), "0.33");
    }

    #[test]
    fn test_snap_uses_min_as_grid_origin() {
        // grid 10, 15, 20, ...
        let range = ConfigField::CenterSize.range().unwrap();
        assert_eq!(range.clamp(17.0), 15.0);
        assert_eq!(range.clamp(18.0), 20.0);

        let range = ConfigField::AttractionForce.range().unwrap();
        assert_eq!(range.clamp(0.000017 + range.step * 2.0), 0.000019);
    }

    #[test]
    fn test_format_precision_follows_step() {
        let range = ConfigField::RepulsionForce.range().unwrap();
        assert_eq!(range.decimals(), 4);
        // Off-grid preset values keep their digits
        assert_eq!(range.format(0.013201), "0.013201");
        assert_eq!(range.format(0.0133), "0.0133");

        let range = ConfigField::CenterMass.range().unwrap();
        assert_eq!(range.decimals(), 0);
        assert_eq!(range.format(19.0), "19");
        assert_eq!(range.format(0.0), "0");

        let range = ConfigField::AttractionForce.range().unwrap();
        assert_eq!(range.format(0.000019), "0.000019");
    }
}
