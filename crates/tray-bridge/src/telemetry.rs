//! Tracing bootstrap for the host process.

use crate::{AppError, AppResult};

use std::panic::Location;

use error_location::ErrorLocation;
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber with the given env-filter
/// directives.
///
/// Call once, early; a second call fails because the global subscriber
/// is already set.
#[track_caller]
pub fn init_tracing(filter: &str) -> AppResult<()> {
    let filter = EnvFilter::try_new(filter).map_err(|e| AppError::TelemetrySetupFailed {
        reason: format!("Invalid filter directives: {}", e),
        location: ErrorLocation::from(Location::caller()),
    })?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| AppError::TelemetrySetupFailed {
            reason: format!("Failed to install subscriber: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })
}
