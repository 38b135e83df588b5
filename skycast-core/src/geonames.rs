//! Clients for the GeoNames lookup services: timezone/place metadata,
//! nearest weather observation, and place search.
//!
//! The three endpoints live under one service root and authenticate with
//! the same account name; responses use HTTP 200 even for service errors,
//! which arrive as a `status` envelope in place of data.

use std::time::Duration;

use chrono::NaiveDateTime;
use reqwest::Client;
use serde::{Deserialize, Deserializer};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::model::{Coordinates, LocationMetadata, PlaceCandidate, WeatherObservation};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const SEARCH_MAX_ROWS: u32 = 10;

/// Shared client for the three lookup endpoints.
#[derive(Debug, Clone)]
pub struct GeonamesClient {
    http: Client,
    base_url: String,
    username: String,
}

impl GeonamesClient {
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_base_url(config.credential()?.to_owned(), config.base_url.clone())
    }

    /// Point the client at a different service root (a mirror, or a test
    /// server).
    pub fn with_base_url(username: String, base_url: String) -> Result<Self> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { http, base_url, username })
    }

    /// Timezone, local-time, and place metadata for a point.
    pub async fn timezone(&self, coordinates: Coordinates) -> Result<LocationMetadata> {
        let body = self.fetch_body("timezoneJSON", &self.coordinate_params(coordinates)).await?;

        let parsed: TimezonePayload = serde_json::from_str(&body).map_err(|err| {
            Error::LookupFailed(format!("Failed to parse timezoneJSON response: {err}"))
        })?;

        match (parsed.time, parsed.sunrise, parsed.sunset, parsed.country_name) {
            (Some(local_time), Some(sunrise), Some(sunset), Some(country_name)) => {
                tracing::debug!(%coordinates, %country_name, "resolved location metadata");
                Ok(LocationMetadata { local_time, sunrise, sunset, country_name })
            }
            _ => Err(Error::LookupFailed(service_message(
                parsed.status,
                "timezoneJSON response is missing its time fields",
            ))),
        }
    }

    /// Most recent reading from the station nearest to the coordinates.
    pub async fn nearby_observation(&self, coordinates: Coordinates) -> Result<WeatherObservation> {
        let body = self
            .fetch_body("findNearByWeatherJSON", &self.coordinate_params(coordinates))
            .await?;

        let parsed: WeatherEnvelope = serde_json::from_str(&body).map_err(|err| {
            Error::LookupFailed(format!("Failed to parse findNearByWeatherJSON response: {err}"))
        })?;

        let Some(observation) = parsed.weather_observation else {
            if let Some(status) = parsed.status {
                tracing::debug!(
                    value = status.value,
                    message = %status.message,
                    "service reported no observation"
                );
            }
            return Err(Error::NoObservation);
        };

        let observed_at = observation.datetime.as_deref().and_then(parse_observation_time);

        Ok(WeatherObservation {
            station_name: observation.station_name,
            temperature: observation.temperature,
            clouds: observation.clouds,
            condition: observation.weather_condition,
            observed_at,
        })
    }

    /// Places whose name exactly matches `name`. Zero rows is reported as
    /// [`Error::NoMatches`], distinct from a transport or decode failure.
    pub async fn search(&self, name: &str) -> Result<Vec<PlaceCandidate>> {
        let params = vec![
            ("name_equals", name.to_string()),
            ("maxRows", SEARCH_MAX_ROWS.to_string()),
            ("username", self.username.clone()),
        ];
        let body = self.fetch_body("searchJSON", &params).await?;

        let parsed: SearchEnvelope = serde_json::from_str(&body).map_err(|err| {
            Error::LookupFailed(format!("Failed to parse searchJSON response: {err}"))
        })?;

        if let Some(status) = parsed.status {
            return Err(Error::LookupFailed(service_message(Some(status), "searchJSON failed")));
        }

        if parsed.geonames.is_empty() {
            return Err(Error::NoMatches);
        }

        let mut candidates = Vec::with_capacity(parsed.geonames.len());
        for row in parsed.geonames {
            candidates.push(candidate_from_row(row)?);
        }

        tracing::debug!(count = candidates.len(), "search returned candidates");
        Ok(candidates)
    }

    async fn fetch_body(&self, endpoint: &str, params: &[(&str, String)]) -> Result<String> {
        let url = format!("{}/{endpoint}", self.base_url.trim_end_matches('/'));

        let res = self.http.get(&url).query(params).send().await.map_err(|err| {
            Error::LookupFailed(format!("Failed to send request to {endpoint}: {err}"))
        })?;

        let status = res.status();
        let body = res.text().await.map_err(|err| {
            Error::LookupFailed(format!("Failed to read {endpoint} response body: {err}"))
        })?;

        if !status.is_success() {
            return Err(Error::LookupFailed(format!(
                "{endpoint} request failed with status {status}: {}",
                truncate_body(&body),
            )));
        }

        Ok(body)
    }

    fn coordinate_params(&self, coordinates: Coordinates) -> Vec<(&'static str, String)> {
        vec![
            ("lat", coordinates.latitude.to_string()),
            ("lng", coordinates.longitude.to_string()),
            ("username", self.username.clone()),
        ]
    }
}

#[derive(Debug, Deserialize)]
struct ServiceStatus {
    message: String,
    value: i32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TimezonePayload {
    time: Option<String>,
    sunrise: Option<String>,
    sunset: Option<String>,
    country_name: Option<String>,
    status: Option<ServiceStatus>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WeatherEnvelope {
    weather_observation: Option<ObservationPayload>,
    status: Option<ServiceStatus>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ObservationPayload {
    station_name: String,
    #[serde(default = "not_reported", deserialize_with = "lenient_string")]
    temperature: String,
    #[serde(default = "not_reported")]
    clouds: String,
    #[serde(default = "not_reported")]
    weather_condition: String,
    datetime: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchEnvelope {
    #[serde(default)]
    geonames: Vec<SearchRow>,
    status: Option<ServiceStatus>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchRow {
    toponym_name: String,
    #[serde(default)]
    admin_name1: String,
    #[serde(default)]
    country_name: String,
    lat: String,
    lng: String,
}

fn candidate_from_row(row: SearchRow) -> Result<PlaceCandidate> {
    let parse = |value: &str| {
        value.parse::<f64>().map_err(|_| {
            Error::LookupFailed(format!(
                "searchJSON returned unparseable coordinates for '{}'",
                row.toponym_name
            ))
        })
    };

    let latitude = parse(&row.lat)?;
    let longitude = parse(&row.lng)?;

    Ok(PlaceCandidate {
        display_name: row.toponym_name,
        admin_region: row.admin_name1,
        country_name: row.country_name,
        coordinates: Coordinates { latitude, longitude },
    })
}

fn not_reported() -> String {
    "n/a".to_string()
}

/// Stations report temperature as text or as a bare number; accept both.
fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(f64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Number(value) if value.fract() == 0.0 => (value as i64).to_string(),
        Raw::Number(value) => value.to_string(),
    })
}

/// Observation timestamps arrive as "YYYY-MM-DD HH:MM:SS", occasionally
/// without seconds.
fn parse_observation_time(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M"))
        .ok()
}

fn service_message(status: Option<ServiceStatus>, fallback: &str) -> String {
    match status {
        Some(status) => format!("service error {}: {}", status.value, status.message),
        None => fallback.to_string(),
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX { format!("{}...", &body[..MAX]) } else { body.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timezone_payload_deserializes() {
        let parsed: TimezonePayload = serde_json::from_str(
            r#"{
                "time": "2021-10-05 14:30",
                "sunrise": "2021-10-05 06:00",
                "sunset": "2021-10-05 20:00",
                "countryName": "Canada",
                "timezoneId": "America/Moncton"
            }"#,
        )
        .unwrap();

        assert_eq!(parsed.time.as_deref(), Some("2021-10-05 14:30"));
        assert_eq!(parsed.country_name.as_deref(), Some("Canada"));
        assert!(parsed.status.is_none());
    }

    #[test]
    fn weather_envelope_without_observation_keeps_status() {
        let parsed: WeatherEnvelope = serde_json::from_str(
            r#"{"status": {"message": "no observation found", "value": 15}}"#,
        )
        .unwrap();

        assert!(parsed.weather_observation.is_none());
        assert_eq!(parsed.status.unwrap().value, 15);
    }

    #[test]
    fn observation_accepts_numeric_temperature() {
        let parsed: ObservationPayload = serde_json::from_str(
            r#"{"stationName": "Fredericton", "temperature": 22, "clouds": "few clouds",
                "weatherCondition": "clear", "datetime": "2021-10-05 12:00:00"}"#,
        )
        .unwrap();

        assert_eq!(parsed.temperature, "22");
    }

    #[test]
    fn observation_accepts_text_temperature() {
        let parsed: ObservationPayload = serde_json::from_str(
            r#"{"stationName": "Fredericton", "temperature": "-3.5"}"#,
        )
        .unwrap();

        assert_eq!(parsed.temperature, "-3.5");
        assert_eq!(parsed.clouds, "n/a");
        assert_eq!(parsed.weather_condition, "n/a");
    }

    #[test]
    fn search_row_converts_to_candidate() {
        let row: SearchRow = serde_json::from_str(
            r#"{"toponymName": "Fredericton", "adminName1": "New Brunswick",
                "countryName": "Canada", "lat": "45.96", "lng": "-66.64"}"#,
        )
        .unwrap();

        let candidate = candidate_from_row(row).unwrap();
        assert_eq!(candidate.display_name, "Fredericton");
        assert_eq!(candidate.coordinates.latitude, 45.96);
        assert_eq!(candidate.coordinates.longitude, -66.64);
    }

    #[test]
    fn unparseable_row_coordinates_are_a_lookup_failure() {
        let row: SearchRow = serde_json::from_str(
            r#"{"toponymName": "Nowhere", "lat": "north", "lng": "-66.64"}"#,
        )
        .unwrap();

        let err = candidate_from_row(row).unwrap_err();
        assert!(matches!(err, Error::LookupFailed(_)));
    }

    #[test]
    fn observation_time_parses_with_and_without_seconds() {
        assert!(parse_observation_time("2021-10-05 12:00:00").is_some());
        assert!(parse_observation_time("2021-10-05 12:00").is_some());
        assert!(parse_observation_time("noon").is_none());
    }
}
