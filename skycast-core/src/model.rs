use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::daylight::DayNightMode;

/// A latitude/longitude pair in decimal degrees, passed by value through
/// the lookup pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.latitude, self.longitude)
    }
}

/// A place returned by a text search, carrying its own coordinates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceCandidate {
    pub display_name: String,
    pub admin_region: String,
    pub country_name: String,
    pub coordinates: Coordinates,
}

impl PlaceCandidate {
    /// One-line label for list display, skipping empty segments.
    pub fn label(&self) -> String {
        let mut parts = vec![self.display_name.as_str()];
        for part in [self.admin_region.as_str(), self.country_name.as_str()] {
            if !part.is_empty() {
                parts.push(part);
            }
        }
        parts.join(", ")
    }
}

/// Timezone/local-time and place metadata for a point, as delivered by the
/// provider. Consumed immediately by the pipeline; not retained.
#[derive(Debug, Clone)]
pub struct LocationMetadata {
    pub local_time: String,
    pub sunrise: String,
    pub sunset: String,
    pub country_name: String,
}

/// The most recent reading from the nearest reporting station.
#[derive(Debug, Clone)]
pub struct WeatherObservation {
    pub station_name: String,
    /// Reported as text; some stations send a bare number instead.
    pub temperature: String,
    pub clouds: String,
    pub condition: String,
    pub observed_at: Option<NaiveDateTime>,
}

/// Everything the result panel needs to draw itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderPayload {
    pub location_label: String,
    pub display_time: String,
    pub temperature_label: String,
    pub cloud_label: String,
    pub condition_label: String,
    pub day_night: DayNightMode,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidate_label_joins_all_parts() {
        let candidate = PlaceCandidate {
            display_name: "Fredericton".to_string(),
            admin_region: "New Brunswick".to_string(),
            country_name: "Canada".to_string(),
            coordinates: Coordinates { latitude: 45.96, longitude: -66.64 },
        };
        assert_eq!(candidate.label(), "Fredericton, New Brunswick, Canada");
    }

    #[test]
    fn candidate_label_skips_empty_segments() {
        let candidate = PlaceCandidate {
            display_name: "Singapore".to_string(),
            admin_region: String::new(),
            country_name: "Singapore".to_string(),
            coordinates: Coordinates { latitude: 1.35, longitude: 103.82 },
        };
        assert_eq!(candidate.label(), "Singapore, Singapore");
    }

    #[test]
    fn coordinates_display() {
        let coordinates = Coordinates { latitude: 45.28, longitude: -65.99 };
        assert_eq!(coordinates.to_string(), "45.28, -65.99");
    }
}
