//! Environment capabilities, decided once at startup and held in state

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A latitude/longitude pair
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// Whether voice search can run in this environment
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum VoiceCapability {
    /// A transcriber command is configured
    Available { command: String },
    #[default]
    Unavailable,
}

impl VoiceCapability {
    pub fn detect(command: Option<&str>) -> Self {
        match command.map(str::trim) {
            Some(command) if !command.is_empty() => VoiceCapability::Available {
                command: command.to_string(),
            },
            _ => VoiceCapability::Unavailable,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, VoiceCapability::Available { .. })
    }
}

/// Access to the user's position for the lookup-on-start path
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub enum GeoPermission {
    Granted(Coordinates),
    Denied,
    /// Not decided yet; nothing fires
    #[default]
    Pending,
}

impl GeoPermission {
    pub fn detect(coordinates: Option<Coordinates>) -> Self {
        match coordinates {
            Some(coords) => GeoPermission::Granted(coords),
            None => GeoPermission::Denied,
        }
    }
}
