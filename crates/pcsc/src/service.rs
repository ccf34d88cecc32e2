//! PC/SC reader service

use std::ffi::CString;
use std::fmt;
use std::time::Duration;

use pcsc::{Context, ReaderState, Scope, State};
use scard_core::{Protocol, ReaderName, ReaderService, ScError, ShareMode};
use tracing::{debug, trace};

use crate::config::{protocols, share_mode};
use crate::error::sc_error;
use crate::reader::PcscReader;
use crate::transport::PcscCard;

/// Connection to the PC/SC resource manager
pub struct PcscService {
    /// PC/SC context
    context: Context,
}

impl fmt::Debug for PcscService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PcscService").finish_non_exhaustive()
    }
}

impl PcscService {
    /// Establish a PC/SC context in the given scope
    pub fn establish(scope: Scope) -> Result<Self, ScError> {
        let context = Context::establish(scope).map_err(sc_error)?;
        debug!(?scope, "Established PC/SC context");
        Ok(Self { context })
    }

    /// List every reader together with whether it holds a card, and the
    /// card's ATR when it does
    pub fn reader_status(&self) -> Result<Vec<PcscReader>, ScError> {
        let mut reader_states: Vec<ReaderState> = self
            .context
            .list_readers_owned()
            .map_err(sc_error)?
            .into_iter()
            .map(|name| ReaderState::new(name, State::UNAWARE))
            .collect();
        if reader_states.is_empty() {
            return Err(ScError::NO_READERS_AVAILABLE);
        }

        // UNAWARE makes every reader report its state straight away.
        match self
            .context
            .get_status_change(Duration::ZERO, &mut reader_states)
        {
            Ok(()) | Err(pcsc::Error::Timeout) => {}
            Err(e) => return Err(sc_error(e)),
        }

        Ok(reader_states
            .iter()
            .map(PcscReader::from_reader_state)
            .collect())
    }
}

impl ReaderService for PcscService {
    type Channel = PcscCard;

    fn list_readers(&self) -> Result<Vec<ReaderName>, ScError> {
        let readers = self.context.list_readers_owned().map_err(sc_error)?;
        trace!(count = readers.len(), "PC/SC listed readers");

        Ok(readers
            .into_iter()
            .map(|name| ReaderName::new(name.to_string_lossy()))
            .collect())
    }

    fn connect(
        &self,
        reader: &ReaderName,
        mode: ShareMode,
        protocol: Protocol,
    ) -> Result<PcscCard, ScError> {
        let reader_cstr = CString::new(reader.as_str()).map_err(|_| ScError::UNKNOWN_READER)?;

        let card = self
            .context
            .connect(&reader_cstr, share_mode(mode), protocols(protocol))
            .map_err(sc_error)?;

        Ok(PcscCard::new(card))
    }

    fn release(self) -> Result<(), ScError> {
        self.context.release().map_err(|(_, e)| sc_error(e))
    }
}
