//! Error types for service, session and APDU operations
//!
//! Two structured error kinds come out of this crate: [`ScError`] for failures
//! reported by the reader service, and [`ApduError`] for command exchanges the
//! card rejected. [`Error`] wraps both, together with the protocol violations
//! detected locally.

use crate::status::StatusWord;

/// Error reported by the reader service, identified by its numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[error("smart card service error {code:#010X}")]
pub struct ScError {
    code: i64,
}

impl ScError {
    /// An internal consistency check failed (`SCARD_F_INTERNAL_ERROR`)
    pub const INTERNAL_ERROR: Self = Self::new(0x8010_0001);
    /// The supplied handle was invalid (`SCARD_E_INVALID_HANDLE`)
    pub const INVALID_HANDLE: Self = Self::new(0x8010_0003);
    /// The specified reader name is not recognized (`SCARD_E_UNKNOWN_READER`)
    pub const UNKNOWN_READER: Self = Self::new(0x8010_0009);
    /// The card cannot be accessed because of other outstanding connections
    /// (`SCARD_E_SHARING_VIOLATION`)
    pub const SHARING_VIOLATION: Self = Self::new(0x8010_000B);
    /// The operation requires a card, but no card is in the reader
    /// (`SCARD_E_NO_SMARTCARD`)
    pub const NO_SMARTCARD: Self = Self::new(0x8010_000C);
    /// The smart card resource manager is not running (`SCARD_E_NO_SERVICE`)
    pub const NO_SERVICE: Self = Self::new(0x8010_001D);
    /// Cannot find a smart card reader (`SCARD_E_NO_READERS_AVAILABLE`)
    pub const NO_READERS_AVAILABLE: Self = Self::new(0x8010_002E);
    /// The card has been reset (`SCARD_W_RESET_CARD`)
    pub const RESET_CARD: Self = Self::new(0x8010_0068);
    /// The card has been removed (`SCARD_W_REMOVED_CARD`)
    pub const REMOVED_CARD: Self = Self::new(0x8010_0069);

    /// Create a service error from a numeric code
    pub const fn new(code: i64) -> Self {
        Self { code }
    }

    /// Create a service error from a diagnostic message embedding a
    /// hexadecimal code.
    ///
    /// This is best effort: see [`crate::translate::code_from_message`].
    pub fn from_message(message: &str) -> Self {
        Self::new(crate::translate::code_from_message(message))
    }

    /// The numeric service code
    pub const fn code(&self) -> i64 {
        self.code
    }

    /// Check if the service reported that no readers are available
    pub const fn is_no_readers(&self) -> bool {
        self.code == Self::NO_READERS_AVAILABLE.code
    }
}

/// A command exchange the card answered with a failing status word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[error("APDU error {0} ({desc})", desc = .0.description())]
pub struct ApduError(pub StatusWord);

impl ApduError {
    /// Create an APDU error from the two status bytes
    pub const fn new(sw1: u8, sw2: u8) -> Self {
        Self(StatusWord::new(sw1, sw2))
    }

    /// The status word returned by the card
    pub const fn status(&self) -> StatusWord {
        self.0
    }

    /// First status byte
    pub const fn sw1(&self) -> u8 {
        self.0.sw1
    }

    /// Second status byte
    pub const fn sw2(&self) -> u8 {
        self.0.sw2
    }
}

impl From<StatusWord> for ApduError {
    fn from(status: StatusWord) -> Self {
        Self(status)
    }
}

/// Core error type for all operations in this crate
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The reader service reported a failure
    #[error(transparent)]
    Service(#[from] ScError),

    /// The card rejected a command
    #[error(transparent)]
    Apdu(#[from] ApduError),

    /// The card answered with fewer bytes than the status trailer needs
    #[error("response too short: got {0} bytes, expected at least 2")]
    ResponseTooShort(usize),

    /// An empty command APDU was passed to transmit
    #[error("empty command APDU")]
    EmptyCommand,

    /// The card session or transaction is no longer connected
    #[error("card is not connected")]
    NotConnected,
}

impl Error {
    /// The service code, if this is a service error
    pub const fn service_code(&self) -> Option<i64> {
        match self {
            Self::Service(e) => Some(e.code()),
            _ => None,
        }
    }

    /// The status word, if this is an APDU error
    pub const fn status(&self) -> Option<StatusWord> {
        match self {
            Self::Apdu(e) => Some(e.status()),
            _ => None,
        }
    }

    /// Check if this error means no readers are currently attached
    pub const fn is_no_readers(&self) -> bool {
        matches!(self, Self::Service(e) if e.is_no_readers())
    }
}

/// Result type for operations in this crate
pub type Result<T, E = Error> = std::result::Result<T, E>;
