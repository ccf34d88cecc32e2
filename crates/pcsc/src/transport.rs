//! PC/SC card channel

use std::fmt;

use bytes::Bytes;
use pcsc::{Attribute, Card, MAX_BUFFER_SIZE_EXTENDED};
use scard_core::{CardChannel, Disposition, ScError};

use crate::config::disposition;
use crate::error::sc_error;

/// Card connection over PC/SC
pub struct PcscCard {
    /// Card connection, until disconnected
    card: Option<Card>,

    /// Receive buffer reused across transmits
    response_buffer: Box<[u8]>,
}

impl fmt::Debug for PcscCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PcscCard")
            .field("connected", &self.card.is_some())
            .finish()
    }
}

impl PcscCard {
    pub(crate) fn new(card: Card) -> Self {
        Self {
            card: Some(card),
            response_buffer: vec![0u8; MAX_BUFFER_SIZE_EXTENDED].into_boxed_slice(),
        }
    }

    fn card(&self) -> Result<&Card, ScError> {
        self.card.as_ref().ok_or(ScError::INVALID_HANDLE)
    }
}

impl CardChannel for PcscCard {
    fn do_transmit_raw(&mut self, command: &[u8]) -> Result<Bytes, ScError> {
        let card = self.card.as_ref().ok_or(ScError::INVALID_HANDLE)?;
        let response = card
            .transmit(command, &mut self.response_buffer)
            .map_err(sc_error)?;

        Ok(Bytes::copy_from_slice(response))
    }

    fn disconnect(&mut self, how: Disposition) -> Result<(), ScError> {
        let Some(card) = self.card.take() else {
            return Ok(());
        };

        card.disconnect(disposition(how)).map_err(|(card, e)| {
            // The connection is still live, keep it for a retry.
            self.card = Some(card);
            sc_error(e)
        })
    }

    fn atr(&self) -> Result<Bytes, ScError> {
        self.card()?
            .get_attribute_owned(Attribute::AtrString)
            .map(Bytes::from)
            .map_err(sc_error)
    }
}
