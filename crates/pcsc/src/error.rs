//! Mapping of PC/SC errors onto service codes

use scard_core::ScError;
use tracing::debug;

/// Convert a PC/SC error into its numeric service code.
///
/// `pcsc::Error` is a fieldless enum whose discriminants are the platform
/// `SCARD_*` codes, so no text extraction is needed here.
pub(crate) fn sc_error(error: pcsc::Error) -> ScError {
    debug!(%error, "PC/SC call failed");
    ScError::new(i64::from(error as u32))
}
