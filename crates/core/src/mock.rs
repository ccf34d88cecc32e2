//! In-memory reader service used by the unit tests

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use bytes::Bytes;

use crate::config::{Disposition, Protocol, ShareMode};
use crate::error::ScError;
use crate::service::{CardChannel, ReaderName, ReaderService};

/// Everything the mock observed, shared between the service and its channels
#[derive(Debug, Default)]
pub(crate) struct MockLog {
    pub(crate) connects: Vec<(ReaderName, ShareMode, Protocol)>,
    pub(crate) commands: Vec<Bytes>,
    pub(crate) disconnects: Vec<Disposition>,
    pub(crate) released: bool,
}

/// Mock reader service with a fixed set of readers and canned responses
#[derive(Debug, Clone, Default)]
pub(crate) struct MockService {
    readers: Vec<ReaderName>,
    responses: Vec<Bytes>,
    failing_disconnects: usize,
    list_error: Option<ScError>,
    failing_release: bool,
    pub(crate) log: Arc<Mutex<MockLog>>,
}

impl MockService {
    pub(crate) fn with_readers(readers: &[&str]) -> Self {
        Self {
            readers: readers.iter().copied().map(ReaderName::from).collect(),
            ..Self::default()
        }
    }

    /// Responses handed out in order; the last one repeats
    pub(crate) fn responses(mut self, responses: &[&[u8]]) -> Self {
        self.responses = responses
            .iter()
            .map(|r| Bytes::copy_from_slice(r))
            .collect();
        self
    }

    /// Make the next `count` disconnects fail
    pub(crate) fn failing_disconnects(mut self, count: usize) -> Self {
        self.failing_disconnects = count;
        self
    }

    /// Make `list_readers` fail with `error`
    pub(crate) fn list_error(mut self, error: ScError) -> Self {
        self.list_error = Some(error);
        self
    }

    /// Make `release` fail
    pub(crate) fn failing_release(mut self) -> Self {
        self.failing_release = true;
        self
    }

    pub(crate) fn log(&self) -> std::sync::MutexGuard<'_, MockLog> {
        self.log.lock().unwrap()
    }
}

impl ReaderService for MockService {
    type Channel = MockChannel;

    fn list_readers(&self) -> Result<Vec<ReaderName>, ScError> {
        if let Some(error) = self.list_error {
            return Err(error);
        }
        Ok(self.readers.clone())
    }

    fn connect(
        &self,
        reader: &ReaderName,
        share_mode: ShareMode,
        protocol: Protocol,
    ) -> Result<MockChannel, ScError> {
        if !self.readers.contains(reader) {
            return Err(ScError::from_message("SCardConnect: error 80100009"));
        }
        self.log()
            .connects
            .push((reader.clone(), share_mode, protocol));

        Ok(MockChannel {
            responses: self.responses.iter().cloned().collect(),
            failing_disconnects: self.failing_disconnects,
            connected: true,
            log: Arc::clone(&self.log),
        })
    }

    fn release(self) -> Result<(), ScError> {
        if self.failing_release {
            return Err(ScError::from_message("SCardReleaseContext: error 80100003"));
        }
        self.log().released = true;
        Ok(())
    }
}

/// Card connection handed out by [`MockService`]
#[derive(Debug)]
pub(crate) struct MockChannel {
    responses: VecDeque<Bytes>,
    failing_disconnects: usize,
    connected: bool,
    log: Arc<Mutex<MockLog>>,
}

impl CardChannel for MockChannel {
    fn do_transmit_raw(&mut self, command: &[u8]) -> Result<Bytes, ScError> {
        if !self.connected {
            return Err(ScError::INVALID_HANDLE);
        }
        self.log
            .lock()
            .unwrap()
            .commands
            .push(Bytes::copy_from_slice(command));

        match self.responses.len() {
            0 => Err(ScError::from_message("SCardTransmit: error 80100016")),
            1 => Ok(self.responses[0].clone()),
            _ => Ok(self.responses.pop_front().unwrap()),
        }
    }

    fn disconnect(&mut self, disposition: Disposition) -> Result<(), ScError> {
        if self.failing_disconnects > 0 {
            self.failing_disconnects -= 1;
            return Err(ScError::INTERNAL_ERROR);
        }
        self.connected = false;
        self.log.lock().unwrap().disconnects.push(disposition);
        Ok(())
    }

    fn atr(&self) -> Result<Bytes, ScError> {
        if !self.connected {
            return Err(ScError::INVALID_HANDLE);
        }
        Ok(Bytes::from_static(&[
            0x3B, 0xF8, 0x13, 0x00, 0x00, 0x81, 0x31, 0xFE, 0x15, 0x59, 0x75, 0x62, 0x69, 0x6B,
            0x65, 0x79, 0x34, 0xD4,
        ]))
    }
}
