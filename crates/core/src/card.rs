//! Card handle: an open session with one card through one reader

use bytes::Bytes;
use tracing::{debug, trace, warn};

use crate::config::Disposition;
use crate::error::{Error, Result};
use crate::service::{CardChannel, ReaderName};
use crate::transaction::Transaction;

/// An open connection to the card in a reader
///
/// The handle owns the card connection. A [`Transaction`] borrows it
/// mutably, so at most one transaction can be active at a time. Closing a
/// transaction closes the connection itself, after which the handle reports
/// [`CardHandle::is_connected`] as `false` and refuses new transactions.
///
/// Dropping a handle that is still connected disconnects it with its
/// configured [`Disposition`].
#[derive(Debug)]
pub struct CardHandle<C: CardChannel> {
    channel: C,
    reader: ReaderName,
    disposition: Disposition,
    connected: bool,
}

impl<C: CardChannel> CardHandle<C> {
    pub(crate) fn new(channel: C, reader: ReaderName, disposition: Disposition) -> Self {
        Self {
            channel,
            reader,
            disposition,
            connected: true,
        }
    }

    /// Check if the session with the card is still live
    pub const fn is_connected(&self) -> bool {
        self.connected
    }

    /// Name of the reader holding the card
    pub const fn reader(&self) -> &ReaderName {
        &self.reader
    }

    /// Disposition applied when the session is closed
    pub const fn disposition(&self) -> Disposition {
        self.disposition
    }

    /// Get the ATR of the connected card
    pub fn atr(&self) -> Result<Bytes> {
        self.ensure_connected()?;
        Ok(self.channel.atr()?)
    }

    /// Begin a transaction over this card session
    pub fn begin(&mut self) -> Result<Transaction<'_, C>> {
        self.ensure_connected()?;
        trace!(reader = %self.reader, "Beginning transaction");
        Ok(Transaction::new(self))
    }

    /// Disconnect from the card.
    ///
    /// Closing an already disconnected handle is a no-op. If the service fails
    /// to disconnect, the handle stays connected and the error is returned.
    pub fn close(&mut self) -> Result<()> {
        if !self.connected {
            return Ok(());
        }

        self.channel.disconnect(self.disposition)?;
        self.connected = false;
        debug!(reader = %self.reader, disposition = ?self.disposition, "Disconnected from card");
        Ok(())
    }

    pub(crate) fn transmit_raw(&mut self, command: &[u8]) -> Result<Bytes> {
        self.ensure_connected()?;
        Ok(self.channel.transmit_raw(command)?)
    }

    const fn ensure_connected(&self) -> Result<()> {
        if self.connected {
            Ok(())
        } else {
            Err(Error::NotConnected)
        }
    }
}

impl<C: CardChannel> Drop for CardHandle<C> {
    fn drop(&mut self) {
        if self.connected {
            if let Err(e) = self.channel.disconnect(self.disposition) {
                warn!(reader = %self.reader, error = %e, "Failed to disconnect card on drop");
            }
        }
    }
}
