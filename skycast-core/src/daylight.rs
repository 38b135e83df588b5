//! Day/night scene classification from sunrise and sunset times.

use serde::{Deserialize, Serialize};

use crate::clock::TimeValue;

/// Theme applied to the rendered scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayNightMode {
    Day,
    Night,
    Neutral,
}

/// Decide the scene theme for `current` against the sunrise/sunset window.
///
/// With all three values present this is an exhaustive two-way split:
/// strictly after sunrise and up to and including sunset is day,
/// everything else is night. Any missing value yields
/// [`DayNightMode::Neutral`]; the orchestrator makes that all-`None` call
/// when resetting to the input panel.
pub fn classify(
    current: Option<TimeValue>,
    sunrise: Option<TimeValue>,
    sunset: Option<TimeValue>,
) -> DayNightMode {
    match (current, sunrise, sunset) {
        (Some(now), Some(sunrise), Some(sunset)) => {
            if sunrise < now && now <= sunset {
                DayNightMode::Day
            } else {
                DayNightMode::Night
            }
        }
        _ => DayNightMode::Neutral,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tv(raw: u16) -> Option<TimeValue> {
        Some(TimeValue::new(raw).expect("valid clock time"))
    }

    #[test]
    fn all_absent_is_neutral() {
        assert_eq!(classify(None, None, None), DayNightMode::Neutral);
    }

    #[test]
    fn partially_absent_is_neutral() {
        assert_eq!(classify(tv(1300), None, tv(1800)), DayNightMode::Neutral);
        assert_eq!(classify(None, tv(600), tv(1800)), DayNightMode::Neutral);
    }

    #[test]
    fn afternoon_inside_the_window_is_day() {
        assert_eq!(classify(tv(1300), tv(600), tv(1800)), DayNightMode::Day);
    }

    #[test]
    fn before_sunrise_is_night() {
        assert_eq!(classify(tv(500), tv(600), tv(1800)), DayNightMode::Night);
    }

    #[test]
    fn after_sunset_is_night() {
        assert_eq!(classify(tv(1900), tv(600), tv(1800)), DayNightMode::Night);
    }

    #[test]
    fn exactly_sunrise_is_night() {
        assert_eq!(classify(tv(600), tv(600), tv(1800)), DayNightMode::Night);
    }

    #[test]
    fn exactly_sunset_is_day() {
        assert_eq!(classify(tv(1800), tv(600), tv(1800)), DayNightMode::Day);
    }
}
