//! The fetch-and-render flow run by effect tasks
//!
//! Every entry point (typed search, voice, geolocation, refresh) ends up
//! here. Failures are turned into completion actions; nothing escapes.

use chrono::{DateTime, Local};
use tracing::{info, warn};

use crate::action::Action;
use crate::capability::Coordinates;
use crate::client::{Location, WeatherClient};
use crate::dates::current_date_label;
use crate::error::ClientError;
use crate::forecast::select_daily;
use crate::state::WeatherReport;

/// Current conditions, then the forecast reduced to one entry per future day
pub async fn fetch_report(
    client: &WeatherClient,
    location: &Location,
    now: DateTime<Local>,
) -> Result<WeatherReport, ClientError> {
    let current = client.fetch_current(location).await?;
    let raw = client.fetch_forecast(location).await?;
    let forecast = select_daily(&raw, now.date_naive()).cloned().collect();

    Ok(WeatherReport {
        current,
        forecast,
        date_label: current_date_label(&now),
    })
}

/// Run one flow and classify its outcome
pub async fn run_weather_flow(client: &WeatherClient, request: u64, location: Location) -> Action {
    let result = fetch_report(client, &location, Local::now()).await;
    completion_action(request, &location, result)
}

pub fn completion_action(
    request: u64,
    location: &Location,
    result: Result<WeatherReport, ClientError>,
) -> Action {
    match result {
        Ok(report) => {
            let query = match location {
                Location::City(name) => name.trim().to_string(),
                Location::Coordinates(_) => report.current.location_name.clone(),
            };
            info!(request, %query, icon = report.current.icon().id(), "weather loaded");
            Action::WeatherDidLoad {
                request,
                query,
                report,
            }
        }
        Err(ClientError::NotFound(query)) => {
            info!(request, %query, "location not found");
            Action::WeatherDidNotFind { request, query }
        }
        Err(error) => {
            warn!(request, %location, %error, "weather lookup failed");
            Action::WeatherDidError {
                request,
                error: error.into(),
            }
        }
    }
}

/// Decide what the start-up lookup searches for. With a geolocation
/// credential the position is named by the second provider; without one the
/// coordinates are searched directly.
pub async fn resolve_start_location(
    client: &WeatherClient,
    coords: Coordinates,
) -> Result<Location, ClientError> {
    if !client.has_geo_credential() {
        return Ok(Location::Coordinates(coords));
    }
    let name = client.resolve_place_name(coords).await?;
    Ok(Location::City(name))
}
