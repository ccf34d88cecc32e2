//! Translation of reader service failures into [`ScError`] codes
//!
//! Some reader service bindings only surface failures as prose with the
//! platform code embedded somewhere in the text, e.g. `"SCard error:
//! 8010002E"`. The helpers here recover that code on a best-effort basis.
//! Backends that expose structured codes should build [`ScError`] directly
//! and treat this module as a compatibility fallback.

use std::fmt::Display;

use tracing::debug;

use crate::error::ScError;

/// Extract the numeric code embedded in a diagnostic message.
///
/// Picks the first run that starts with an ASCII digit and continues with at
/// least one ASCII word character (`[0-9A-Za-z_]`), then parses it as a
/// base-16 `i64`. A message without such a run, or a run that does not parse,
/// yields `0`.
pub fn code_from_message(message: &str) -> i64 {
    first_code_run(message)
        .and_then(|run| i64::from_str_radix(run, 16).ok())
        .unwrap_or(0)
}

fn first_code_run(message: &str) -> Option<&str> {
    let bytes = message.as_bytes();
    let is_word = |b: &u8| b.is_ascii_alphanumeric() || *b == b'_';

    bytes.iter().enumerate().find_map(|(start, b)| {
        if !b.is_ascii_digit() {
            return None;
        }
        let len = bytes[start + 1..].iter().take_while(|b| is_word(*b)).count();
        // All matched bytes are ASCII, so both ends are char boundaries.
        (len > 0).then(|| &message[start..=start + len])
    })
}

/// Translate an optional service error into an [`ScError`].
pub fn translate<E: Display + ?Sized>(error: Option<&E>) -> Option<ScError> {
    error.map(translate_one)
}

/// Map the error side of a service call through [`translate`].
pub fn check<T, E: Display>(result: Result<T, E>) -> Result<T, ScError> {
    result.map_err(|e| translate_one(&e))
}

fn translate_one<E: Display + ?Sized>(error: &E) -> ScError {
    let message = error.to_string();
    debug!(%message, "Reader service reported an error");
    ScError::from_message(&message)
}
