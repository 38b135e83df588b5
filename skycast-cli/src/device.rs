//! Device geolocation for the CLI: an environment override or the
//! configured fixed position, bounded by the configured timeout.

use async_trait::async_trait;
use skycast_core::source::{CoordinateSource, GeoOptions, geo_code};
use skycast_core::{Config, Coordinates, Error, Result};

/// Environment override, e.g. `SKYCAST_POSITION=45.28,-65.99`.
pub const POSITION_ENV: &str = "SKYCAST_POSITION";

#[derive(Debug)]
pub struct DeviceLocator {
    position: Option<Coordinates>,
    options: GeoOptions,
}

impl DeviceLocator {
    pub fn from_config(config: &Config) -> Self {
        Self { position: config.geolocation.position, options: config.geo_options() }
    }

    fn env_position() -> Result<Option<Coordinates>> {
        match std::env::var(POSITION_ENV) {
            Ok(raw) => parse_position(&raw).map(Some),
            Err(_) => Ok(None),
        }
    }
}

fn parse_position(raw: &str) -> Result<Coordinates> {
    let malformed = || Error::Geolocation {
        code: geo_code::POSITION_UNAVAILABLE,
        message: format!("{POSITION_ENV} is not a 'latitude,longitude' pair: {raw:?}"),
    };

    let (latitude, longitude) = raw.split_once(',').ok_or_else(malformed)?;
    let latitude = latitude.trim().parse().map_err(|_| malformed())?;
    let longitude = longitude.trim().parse().map_err(|_| malformed())?;

    Ok(Coordinates { latitude, longitude })
}

#[async_trait]
impl CoordinateSource for DeviceLocator {
    async fn coordinates(&self) -> Result<Coordinates> {
        let lookup = async {
            if let Some(position) = Self::env_position()? {
                return Ok(position);
            }
            self.position.ok_or_else(|| Error::Geolocation {
                code: geo_code::POSITION_UNAVAILABLE,
                message: "no position source is available on this device".to_string(),
            })
        };

        match tokio::time::timeout(self.options.timeout, lookup).await {
            Ok(result) => result,
            Err(_) => Err(Error::Geolocation {
                code: geo_code::TIMEOUT,
                message: format!("no position within {:?}", self.options.timeout),
            }),
        }
    }
}
