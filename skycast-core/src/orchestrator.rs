//! The pipeline controller: sequences the lookups, drives the day/night
//! classifier and time formatting, and owns the two-panel display state.

use crate::clock::{format_am_pm, parse_time_value};
use crate::daylight::{DayNightMode, classify};
use crate::error::{Error, Result};
use crate::geonames::GeonamesClient;
use crate::model::{
    Coordinates, LocationMetadata, PlaceCandidate, RenderPayload, WeatherObservation,
};
use crate::selection::SelectionState;

/// Which of the two mutually exclusive screens is active, or the
/// in-between lookup state. A lookup never ends in `Loading`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Input,
    Loading,
    Result,
}

/// Stamp handed out when a lookup starts. A panel reset invalidates every
/// outstanding ticket, so late results are discarded instead of rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupTicket {
    epoch: u64,
}

#[derive(Debug)]
pub struct Orchestrator {
    client: GeonamesClient,
    selection: SelectionState,
    panel: Panel,
    theme: DayNightMode,
    payload: Option<RenderPayload>,
    epoch: u64,
}

impl Orchestrator {
    pub fn new(client: GeonamesClient) -> Self {
        Self {
            client,
            selection: SelectionState::new(),
            panel: Panel::Input,
            theme: classify(None, None, None),
            payload: None,
            epoch: 0,
        }
    }

    pub fn panel(&self) -> Panel {
        self.panel
    }

    pub fn theme(&self) -> DayNightMode {
        self.theme
    }

    pub fn payload(&self) -> Option<&RenderPayload> {
        self.payload.as_ref()
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn client(&self) -> &GeonamesClient {
        &self.client
    }

    /// Enter the loading state and stamp the request.
    pub fn begin_lookup(&mut self) -> LookupTicket {
        self.panel = Panel::Loading;
        LookupTicket { epoch: self.epoch }
    }

    /// Apply a finished lookup.
    ///
    /// A stale ticket (the panels were reset while the lookup was in
    /// flight) discards the outcome unrendered and returns `Ok(None)`.
    /// On failure the panels are reset to input before the error is
    /// handed back for the caller's alert.
    pub fn complete_lookup(
        &mut self,
        ticket: LookupTicket,
        outcome: Result<RenderPayload>,
    ) -> Result<Option<&RenderPayload>> {
        if ticket.epoch != self.epoch {
            tracing::debug!("discarding lookup result that arrived after a panel reset");
            return Ok(None);
        }

        match outcome {
            Ok(payload) => {
                self.theme = payload.day_night;
                self.payload = Some(payload);
                self.panel = Panel::Result;
                Ok(self.payload.as_ref())
            }
            Err(err) => {
                tracing::warn!(error = %err, "lookup failed, returning to input panel");
                self.reset_to_input();
                Err(err)
            }
        }
    }

    /// Run the full pipeline for a coordinate pair and render on success.
    pub async fn submit_coordinates(&mut self, coordinates: Coordinates) -> Result<&RenderPayload> {
        let ticket = self.begin_lookup();
        let client = self.client.clone();
        let outcome = resolve_conditions(&client, coordinates).await;

        match self.complete_lookup(ticket, outcome)? {
            Some(payload) => Ok(payload),
            // Not reachable on this sequential path; a discard needs a
            // reset to slip in between begin and complete.
            None => Err(Error::LookupFailed("lookup superseded before completion".to_string())),
        }
    }

    /// Search for places by exact name.
    ///
    /// A blank query is a no-op: nothing is sent and `None` comes back.
    /// Zero matches clears the list, so stale candidates can be neither
    /// rendered nor selected, then surfaces [`Error::NoMatches`] for the
    /// caller's notice. A transport failure leaves the previous list
    /// untouched.
    pub async fn run_search(&mut self, query: &str) -> Result<Option<&[PlaceCandidate]>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(None);
        }

        match self.client.search(query).await {
            Ok(candidates) => {
                self.selection.replace(candidates);
                Ok(Some(self.selection.candidates()))
            }
            Err(Error::NoMatches) => {
                self.selection.clear();
                Err(Error::NoMatches)
            }
            Err(err) => Err(err),
        }
    }

    pub fn select_candidate(&mut self, index: usize) -> Result<()> {
        self.selection.select(index)
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn can_proceed(&self) -> bool {
        self.selection.can_proceed()
    }

    /// Run the pipeline for the currently selected candidate.
    pub async fn proceed_with_selection(&mut self) -> Result<&RenderPayload> {
        let coordinates = self.selection.selected_coordinates()?;
        self.submit_coordinates(coordinates).await
    }

    /// Back action: result panel to input panel, with the full reset.
    pub fn go_back(&mut self) {
        self.reset_to_input();
    }

    /// Shared reset: input panel, cleared list and selection, neutral
    /// theme, and a new epoch so in-flight lookups land stale.
    fn reset_to_input(&mut self) {
        self.panel = Panel::Input;
        self.selection.clear();
        self.payload = None;
        self.theme = classify(None, None, None);
        self.epoch += 1;
    }
}

/// The strictly sequential resolution pipeline: the weather lookup is not
/// attempted until the location lookup has succeeded.
pub async fn resolve_conditions(
    client: &GeonamesClient,
    coordinates: Coordinates,
) -> Result<RenderPayload> {
    let metadata = client.timezone(coordinates).await?;
    let observation = client.nearby_observation(coordinates).await?;

    if let Some(observed_at) = observation.observed_at {
        tracing::debug!(%observed_at, station = %observation.station_name, "using observation");
    }

    build_render_payload(&metadata, &observation)
}

fn build_render_payload(
    metadata: &LocationMetadata,
    observation: &WeatherObservation,
) -> Result<RenderPayload> {
    let now = parse_time_value(&metadata.local_time)?;
    let sunrise = parse_time_value(&metadata.sunrise)?;
    let sunset = parse_time_value(&metadata.sunset)?;

    Ok(RenderPayload {
        location_label: format!("{}, {}", observation.station_name, metadata.country_name),
        display_time: format_am_pm(now),
        temperature_label: format!("{}\u{2103}", observation.temperature),
        cloud_label: observation.clouds.clone(),
        condition_label: observation.condition.clone(),
        day_night: classify(Some(now), Some(sunrise), Some(sunset)),
    })
}
