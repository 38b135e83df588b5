//! The interactive two-panel session: an input panel that produces a
//! coordinate pair, and a result panel that renders the finished lookup.

use inquire::{CustomType, InquireError, Select, Text};
use skycast_core::source::CoordinateSource;
use skycast_core::{Config, Coordinates, Error, GeonamesClient, Orchestrator, Panel, SourceId};

use crate::device::DeviceLocator;
use crate::render;

const USE_DEVICE: &str = "Use current location";
const ENTER_COORDINATES: &str = "Enter coordinates";
const SEARCH_PLACE: &str = "Search for a place";
const QUIT: &str = "Quit";
const BACK: &str = "Back";

pub async fn run(config: Config, mut initial: Option<SourceId>) -> anyhow::Result<()> {
    let client = GeonamesClient::new(&config)?;
    let device = DeviceLocator::from_config(&config);
    let mut orchestrator = Orchestrator::new(client);

    tracing::debug!("interactive session started");

    loop {
        match orchestrator.panel() {
            Panel::Input => {
                if !input_panel(&mut orchestrator, &device, initial.take()).await? {
                    return Ok(());
                }
            }
            Panel::Result => {
                if let Some(payload) = orchestrator.payload() {
                    render::result_panel(payload);
                }
                if !result_panel(&mut orchestrator)? {
                    return Ok(());
                }
            }
            Panel::Loading => {
                // Lookups resolve before control returns to this loop.
                orchestrator.go_back();
            }
        }
    }
}

/// Returns false when the user chose to quit.
async fn input_panel(
    orchestrator: &mut Orchestrator,
    device: &DeviceLocator,
    preset: Option<SourceId>,
) -> anyhow::Result<bool> {
    let choice = match preset {
        Some(SourceId::Device) => USE_DEVICE,
        Some(SourceId::Manual) => ENTER_COORDINATES,
        Some(SourceId::Search) => SEARCH_PLACE,
        None => {
            let prompted = Select::new(
                "Where should the weather come from?",
                vec![USE_DEVICE, ENTER_COORDINATES, SEARCH_PLACE, QUIT],
            )
            .prompt();

            match prompted {
                Ok(choice) => choice,
                Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                    return Ok(false);
                }
                Err(err) => return Err(err.into()),
            }
        }
    };

    match choice {
        USE_DEVICE => match device.coordinates().await {
            Ok(coordinates) => lookup(orchestrator, coordinates).await,
            Err(err) => render::alert(&err.to_string()),
        },
        ENTER_COORDINATES => {
            if let Some(coordinates) = prompt_coordinates()? {
                lookup(orchestrator, coordinates).await;
            }
        }
        SEARCH_PLACE => search_flow(orchestrator).await?,
        _ => return Ok(false),
    }

    Ok(true)
}

/// Run the pipeline and alert on failure; the orchestrator has already
/// reset the panels by the time the error surfaces.
async fn lookup(orchestrator: &mut Orchestrator, coordinates: Coordinates) {
    if let Err(err) = orchestrator.submit_coordinates(coordinates).await {
        render::alert(&err.to_string());
    }
}

fn prompt_coordinates() -> anyhow::Result<Option<Coordinates>> {
    let latitude = match CustomType::<f64>::new("Latitude:")
        .with_error_message("Enter a decimal number, e.g. 45.28")
        .prompt()
    {
        Ok(value) => value,
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
            return Ok(None);
        }
        Err(err) => return Err(err.into()),
    };

    let longitude = match CustomType::<f64>::new("Longitude:")
        .with_error_message("Enter a decimal number, e.g. -65.99")
        .prompt()
    {
        Ok(value) => value,
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
            return Ok(None);
        }
        Err(err) => return Err(err.into()),
    };

    Ok(Some(Coordinates { latitude, longitude }))
}

async fn search_flow(orchestrator: &mut Orchestrator) -> anyhow::Result<()> {
    let query = match Text::new("Place name:").prompt() {
        Ok(query) => query,
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    let labels = match orchestrator.run_search(&query).await {
        // Blank query: nothing was sent, nothing changes.
        Ok(None) => return Ok(()),
        Ok(Some(candidates)) => candidates.iter().map(|c| c.label()).collect::<Vec<_>>(),
        Err(Error::NoMatches) => {
            render::no_matches_notice(query.trim());
            return Ok(());
        }
        Err(err) => {
            render::alert(&err.to_string());
            return Ok(());
        }
    };

    match Select::new("Pick a place:", labels).raw_prompt() {
        Ok(option) => {
            orchestrator.select_candidate(option.index)?;
            if orchestrator.can_proceed() {
                if let Err(err) = orchestrator.proceed_with_selection().await {
                    render::alert(&err.to_string());
                }
            }
        }
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
            orchestrator.clear_selection();
        }
        Err(err) => return Err(err.into()),
    }

    Ok(())
}

/// Returns false when the user chose to quit.
fn result_panel(orchestrator: &mut Orchestrator) -> anyhow::Result<bool> {
    match Select::new("Next:", vec![BACK, QUIT]).prompt() {
        Ok(BACK) => {
            orchestrator.go_back();
            Ok(true)
        }
        Ok(_) => Ok(false),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
            orchestrator.go_back();
            Ok(true)
        }
        Err(err) => Err(err.into()),
    }
}
