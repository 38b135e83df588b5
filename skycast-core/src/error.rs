use thiserror::Error;

/// Result type alias using the crate's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Failure taxonomy for the lookup pipeline.
///
/// Every variant resolves to a defined interactive state at the
/// orchestrator boundary; none is fatal to the process.
#[derive(Debug, Error)]
pub enum Error {
    /// Device geolocation failed with a capability-reported code and
    /// message, surfaced verbatim to the user.
    #[error("geolocation error (code {code}): {message}")]
    Geolocation { code: i32, message: String },

    /// Network, transport, or decode failure on any lookup service call.
    #[error("lookup failed: {0}")]
    LookupFailed(String),

    /// The location is valid but no weather station reports near it.
    #[error("no weather station is reporting near these coordinates")]
    NoObservation,

    /// The search ran but matched nothing; rendered as an explicit notice,
    /// never as an empty candidate list.
    #[error("no places matched the search")]
    NoMatches,

    /// A provider timestamp did not have the expected shape. Must never
    /// silently render garbage; handled like a failed lookup.
    #[error("malformed timestamp: {0:?}")]
    MalformedTimestamp(String),

    /// Proceed was requested while no candidate is selected. The UI keeps
    /// the action disabled, so this is a programmer-error guard.
    #[error("no candidate is selected")]
    NoSelection,

    /// Configuration is missing or unreadable.
    #[error("{0}")]
    Config(String),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::LookupFailed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let err = Error::Geolocation { code: 3, message: "timed out".to_string() };
        assert_eq!(err.to_string(), "geolocation error (code 3): timed out");

        let err = Error::LookupFailed("connection refused".to_string());
        assert!(err.to_string().contains("connection refused"));

        assert!(Error::NoObservation.to_string().contains("no weather station"));
        assert!(Error::NoMatches.to_string().contains("no places matched"));
    }

    #[test]
    fn malformed_timestamp_quotes_input() {
        let err = Error::MalformedTimestamp("14:30".to_string());
        assert!(err.to_string().contains("\"14:30\""));
    }
}
