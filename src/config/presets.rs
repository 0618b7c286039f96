use bevy::prelude::*;
use serde::Deserialize;

use super::Configuration;

const PRESETS_JSON: &str = include_str!("../../assets/presets.json");

/// The named presets offered by the control panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    /// Few large nodes with strong repulsion (startup default)
    Preset1,
    /// Many tiny nodes on a wide orbit
    Preset2,
}

impl Preset {
    pub const ALL: [Preset; 2] = [Preset::Preset1, Preset::Preset2];

    pub fn name(self) -> &'static str {
        match self {
            Preset::Preset1 => "preset1",
            Preset::Preset2 => "preset2",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|preset| preset.name() == name)
    }
}

#[derive(Debug, Deserialize)]
struct PresetsJson {
    preset1: Configuration,
    preset2: Configuration,
}

/// Immutable preset snapshots, parsed once from embedded data
#[derive(Resource, Debug, Clone)]
pub struct PresetLibrary {
    preset1: Configuration,
    preset2: Configuration,
}

impl PresetLibrary {
    /// Load the library from the embedded preset JSON
    pub fn load() -> Result<Self, String> {
        Self::from_json(PRESETS_JSON)
    }

    fn from_json(json: &str) -> Result<Self, String> {
        let parsed: PresetsJson =
            serde_json::from_str(json).map_err(|e| format!("Invalid preset data: {}", e))?;

        for (preset, config) in [
            (Preset::Preset1, &parsed.preset1),
            (Preset::Preset2, &parsed.preset2),
        ] {
            if config.node_count == 0 {
                return Err(format!("{} has no nodes", preset.name()));
            }
        }

        Ok(Self {
            preset1: parsed.preset1,
            preset2: parsed.preset2,
        })
    }

    pub fn get(&self, preset: Preset) -> Configuration {
        match preset {
            Preset::Preset1 => self.preset1,
            Preset::Preset2 => self.preset2,
        }
    }

    /// Look up by the name used in UI commands
    pub fn by_name(&self, name: &str) -> Option<Configuration> {
        Preset::from_name(name).map(|preset| self.get(preset))
    }

    /// Configuration the simulation starts with
    pub fn startup(&self) -> Configuration {
        self.get(Preset::Preset1)
    }
}
