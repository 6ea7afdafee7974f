//! Ordered fallback lookups.
//!
//! Several providers can only find a flight by one kind of code per request
//! (ICAO callsign, IATA flight code, bare flight number). A label lookup
//! tries each strategy in order and stops at the first hit.

use tracing::debug;

use super::types::SourceError;

/// Runs `lookup` for each strategy in order, returning the first `Some`.
///
/// A failing strategy is logged and skipped. When every strategy failed the
/// last error is returned; when at least one answered, a miss is `Ok(None)`.
pub fn first_hit<S, T, F>(strategies: &[S], mut lookup: F) -> Result<Option<T>, SourceError>
where
    S: std::fmt::Debug,
    F: FnMut(&S) -> Result<Option<T>, SourceError>,
{
    let mut last_error = None;
    let mut answered = false;

    for strategy in strategies {
        match lookup(strategy) {
            Ok(Some(hit)) => return Ok(Some(hit)),
            Ok(None) => answered = true,
            Err(e) => {
                debug!(strategy = ?strategy, error = %e, "Lookup strategy failed");
                last_error = Some(e);
            }
        }
    }

    match last_error {
        Some(e) if !answered => Err(e),
        _ => Ok(None),
    }
}
