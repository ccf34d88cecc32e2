//! The reader service seam
//!
//! A reader service is the platform middleware that mediates access to card
//! readers (PC/SC on every mainstream OS). This crate only needs a handful of
//! capabilities from it, captured by [`ReaderService`] and [`CardChannel`].

use std::fmt;

use bytes::Bytes;
use derive_more::{Deref, Display, From};
use tracing::{debug, trace};

use crate::config::{Disposition, Protocol, ShareMode};
use crate::error::ScError;

/// Name of a physical or virtual card reader slot
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display, Deref, From)]
pub struct ReaderName(String);

impl ReaderName {
    /// Create a reader name
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The reader name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the name, returning the inner string
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl From<&str> for ReaderName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// A connection to a reader service
pub trait ReaderService: fmt::Debug {
    /// Card connection type produced by [`ReaderService::connect`]
    type Channel: CardChannel;

    /// List the names of the readers currently visible to the service.
    ///
    /// Backends may either return an empty list or fail with
    /// [`ScError::NO_READERS_AVAILABLE`] when nothing is attached.
    fn list_readers(&self) -> Result<Vec<ReaderName>, ScError>;

    /// Connect to the card in the named reader
    fn connect(
        &self,
        reader: &ReaderName,
        share_mode: ShareMode,
        protocol: Protocol,
    ) -> Result<Self::Channel, ScError>;

    /// Release the service connection
    fn release(self) -> Result<(), ScError>
    where
        Self: Sized;
}

/// A live connection to one card
pub trait CardChannel: fmt::Debug {
    /// Send raw APDU bytes to the card and return the raw response bytes,
    /// status trailer included
    fn transmit_raw(&mut self, command: &[u8]) -> Result<Bytes, ScError> {
        trace!(command = %hex::encode(command), "Transmitting raw command");
        let result = self.do_transmit_raw(command);
        match &result {
            Ok(response) => {
                trace!(response = %hex::encode(response), "Received raw response");
            }
            Err(e) => {
                debug!(error = %e, "Transport error during transmission");
            }
        }
        result
    }

    /// Internal implementation of transmit_raw
    /// This is the method that concrete implementations should override
    fn do_transmit_raw(&mut self, command: &[u8]) -> Result<Bytes, ScError>;

    /// Disconnect from the card
    fn disconnect(&mut self, disposition: Disposition) -> Result<(), ScError>;

    /// Answer To Reset of the connected card
    fn atr(&self) -> Result<Bytes, ScError>;
}
