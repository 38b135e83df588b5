use std::{convert::TryFrom, fmt::Debug, time::Duration};

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::model::Coordinates;

/// Device geolocation error codes, mirroring the platform geolocation API.
pub mod geo_code {
    pub const PERMISSION_DENIED: i32 = 1;
    pub const POSITION_UNAVAILABLE: i32 = 2;
    pub const TIMEOUT: i32 = 3;
}

/// The ways a coordinate pair can enter the lookup pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceId {
    Device,
    Manual,
    Search,
}

impl SourceId {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceId::Device => "device",
            SourceId::Manual => "manual",
            SourceId::Search => "search",
        }
    }

    pub const fn all() -> &'static [SourceId] {
        &[SourceId::Device, SourceId::Manual, SourceId::Search]
    }
}

impl std::fmt::Display for SourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for SourceId {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "device" => Ok(SourceId::Device),
            "manual" => Ok(SourceId::Manual),
            "search" => Ok(SourceId::Search),
            _ => Err(Error::Config(format!(
                "Unknown coordinate source '{value}'. Supported sources: device, manual, search."
            ))),
        }
    }
}

/// Tuning for the device geolocation request.
#[derive(Debug, Clone, Copy)]
pub struct GeoOptions {
    /// Accept a cached fix no older than this.
    pub max_age: Duration,
    pub timeout: Duration,
    pub high_accuracy: bool,
}

impl Default for GeoOptions {
    fn default() -> Self {
        Self {
            max_age: Duration::from_millis(3000),
            timeout: Duration::from_millis(6000),
            high_accuracy: true,
        }
    }
}

/// A capability that yields a coordinate pair for the pipeline, or fails
/// with an error the UI surfaces verbatim.
#[async_trait]
pub trait CoordinateSource: Send + Sync + Debug {
    async fn coordinates(&self) -> Result<Coordinates>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_id_as_str_roundtrip() {
        for id in SourceId::all() {
            let s = id.as_str();
            let parsed = SourceId::try_from(s).expect("roundtrip should succeed");
            assert_eq!(*id, parsed);
        }
    }

    #[test]
    fn source_id_parsing_ignores_case() {
        assert_eq!(SourceId::try_from("Device").unwrap(), SourceId::Device);
    }

    #[test]
    fn unknown_source_error() {
        let err = SourceId::try_from("doesnotexist").unwrap_err();
        assert!(err.to_string().contains("Unknown coordinate source"));
    }

    #[test]
    fn default_options_match_the_capability_contract() {
        let options = GeoOptions::default();
        assert_eq!(options.max_age, Duration::from_millis(3000));
        assert_eq!(options.timeout, Duration::from_millis(6000));
        assert!(options.high_accuracy);
    }
}
