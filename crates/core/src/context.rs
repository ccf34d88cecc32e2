//! Service context: the root resource from which readers are discovered and
//! cards are connected

use tracing::{debug, instrument};

use crate::card::CardHandle;
use crate::config::ConnectConfig;
use crate::error::{Result, ScError};
use crate::service::{ReaderName, ReaderService};

/// A live connection to the reader service
///
/// Card handles obtained from [`ServiceContext::connect`] are owned by the
/// caller; the context neither tracks nor closes them.
#[derive(Debug)]
pub struct ServiceContext<S: ReaderService> {
    service: S,
    config: ConnectConfig,
}

impl<S: ReaderService> ServiceContext<S> {
    /// Wrap an established service connection using the default connect
    /// options (exclusive, T=1, leave card)
    pub fn new(service: S) -> Self {
        Self::with_config(service, ConnectConfig::default())
    }

    /// Wrap an established service connection with custom connect options
    pub const fn with_config(service: S, config: ConnectConfig) -> Self {
        Self { service, config }
    }

    /// The underlying service connection
    pub const fn service(&self) -> &S {
        &self.service
    }

    /// Options applied to new card connections
    pub const fn config(&self) -> &ConnectConfig {
        &self.config
    }

    /// List the readers currently attached.
    ///
    /// An empty reader set is reported as [`ScError::NO_READERS_AVAILABLE`]
    /// so callers polling for a reader can test for it with
    /// [`crate::Error::is_no_readers`].
    pub fn list_readers(&self) -> Result<Vec<ReaderName>> {
        let readers = self.service.list_readers()?;
        if readers.is_empty() {
            debug!("No readers available");
            return Err(ScError::NO_READERS_AVAILABLE.into());
        }

        debug!(count = readers.len(), "Listed readers");
        Ok(readers)
    }

    /// Open a session with the card in the named reader
    #[instrument(level = "debug", skip_all, fields(reader = %reader))]
    pub fn connect(&self, reader: &ReaderName) -> Result<CardHandle<S::Channel>> {
        let channel = self
            .service
            .connect(reader, self.config.share_mode, self.config.protocol)?;
        debug!(
            share_mode = ?self.config.share_mode,
            protocol = ?self.config.protocol,
            "Connected to card"
        );

        Ok(CardHandle::new(channel, reader.clone(), self.config.disposition))
    }

    /// Release the service connection
    pub fn close(self) -> Result<()> {
        self.service.release()?;
        debug!("Released reader service");
        Ok(())
    }
}
