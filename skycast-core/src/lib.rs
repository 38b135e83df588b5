//! Core library for the `skycast` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - Clients for the timezone, weather, and place-search lookups
//! - The clock codec and day/night scene classification
//! - The lookup pipeline and two-panel display state
//!
//! It is used by `skycast-cli`, but can also be reused by other binaries
//! or services.

pub mod clock;
pub mod config;
pub mod daylight;
pub mod error;
pub mod geonames;
pub mod model;
pub mod orchestrator;
pub mod selection;
pub mod source;

pub use clock::{TimeValue, format_am_pm, parse_time_value};
pub use config::Config;
pub use daylight::{DayNightMode, classify};
pub use error::{Error, Result};
pub use geonames::GeonamesClient;
pub use model::{Coordinates, LocationMetadata, PlaceCandidate, RenderPayload, WeatherObservation};
pub use orchestrator::{LookupTicket, Orchestrator, Panel, resolve_conditions};
pub use selection::SelectionState;
pub use source::{CoordinateSource, GeoOptions, SourceId};
