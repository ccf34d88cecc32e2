//! Reader status for PC/SC devices

use bytes::Bytes;
use pcsc::{ReaderState, State};
use scard_core::ReaderName;

/// Snapshot of a PC/SC card reader
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PcscReader {
    /// Name of the reader
    name: ReaderName,

    /// Whether a card is present
    has_card: bool,

    /// Answer To Reset of the card (if present)
    atr: Option<Bytes>,
}

impl PcscReader {
    /// Create a new reader snapshot
    pub const fn new(name: ReaderName, has_card: bool, atr: Option<Bytes>) -> Self {
        Self {
            name,
            has_card,
            atr,
        }
    }

    /// Get the reader name
    pub const fn name(&self) -> &ReaderName {
        &self.name
    }

    /// Check if a card is present in the reader
    pub const fn has_card(&self) -> bool {
        self.has_card
    }

    /// Get the ATR of the card if present
    pub fn atr(&self) -> Option<&[u8]> {
        self.atr.as_deref()
    }

    /// Create a reader from a reader state
    pub(crate) fn from_reader_state(reader_state: &ReaderState) -> Self {
        let has_card = reader_state.event_state().contains(State::PRESENT)
            && !reader_state.event_state().contains(State::EMPTY);

        let atr = has_card.then(|| Bytes::copy_from_slice(reader_state.atr()));

        Self {
            name: ReaderName::new(reader_state.name().to_string_lossy()),
            has_card,
            atr,
        }
    }
}
