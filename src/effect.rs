//! Effects - side effects declared by the reducer

use crate::capability::Coordinates;
use crate::client::Location;

/// Side effects that can be triggered by actions
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Run the current + forecast lookup; completion carries `request`
    FetchWeather { request: u64, location: Location },
    /// Turn the start-up position into a searchable location
    ResolveGeolocation { coords: Coordinates },
    /// Run the transcriber once
    CaptureVoice { command: String },
}
