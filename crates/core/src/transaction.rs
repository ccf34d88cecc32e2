//! Transactions and APDU exchange
//!
//! A [`Transaction`] brackets a sequence of command exchanges against one
//! [`CardHandle`]. Each [`Transaction::transmit`] sends a command APDU and
//! classifies the response by its trailing status word:
//!
//! | Trailer  | Outcome                                          |
//! |----------|--------------------------------------------------|
//! | `90 00`  | [`Reply`] with `more() == false`                 |
//! | `61 xx`  | [`Reply`] with `more() == true`, `xx` remaining  |
//! | other    | [`Error::Apdu`] carrying the status word         |
//!
//! A `61 xx` reply is returned as-is: issuing GET RESPONSE for the remaining
//! bytes is up to the caller.

use bytes::Bytes;
use tracing::{debug, trace};

use crate::card::CardHandle;
use crate::error::{ApduError, Error, Result};
use crate::service::CardChannel;
use crate::status::StatusWord;

/// Successful response to a command APDU
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    data: Bytes,
    status: StatusWord,
}

impl Reply {
    /// Response data, without the status trailer
    pub const fn data(&self) -> &Bytes {
        &self.data
    }

    /// Consume the reply, returning the response data
    pub fn into_data(self) -> Bytes {
        self.data
    }

    /// Status word that ended the response
    pub const fn status(&self) -> StatusWord {
        self.status
    }

    /// Check if the card has more response data available (`61 xx`)
    pub const fn more(&self) -> bool {
        self.status.is_more_data_available()
    }

    /// Number of bytes the card reports as still available, when
    /// [`Reply::more`] is true
    pub const fn remaining(&self) -> Option<u8> {
        self.status.remaining_bytes()
    }
}

/// A scoped sequence of APDU exchanges over a card handle
///
/// [`Transaction::close`] tears down the card connection shared with the
/// parent [`CardHandle`], not only the transaction. Dropping a transaction
/// without closing it just ends the borrow and leaves the card connected.
#[derive(Debug)]
pub struct Transaction<'a, C: CardChannel> {
    card: &'a mut CardHandle<C>,
    open: bool,
}

impl<'a, C: CardChannel> Transaction<'a, C> {
    pub(crate) const fn new(card: &'a mut CardHandle<C>) -> Self {
        Self { card, open: true }
    }

    /// Check if the transaction can still exchange commands
    pub const fn is_open(&self) -> bool {
        self.open && self.card.is_connected()
    }

    /// The card handle this transaction runs over
    pub const fn card(&self) -> &CardHandle<C> {
        self.card
    }

    /// Send a command APDU and classify the response by its status word
    pub fn transmit(&mut self, command: &[u8]) -> Result<Reply> {
        if !self.open {
            return Err(Error::NotConnected);
        }
        if command.is_empty() {
            return Err(Error::EmptyCommand);
        }

        let response = self.card.transmit_raw(command)?;
        let (payload_len, status) = match StatusWord::split(&response) {
            Some((payload, status)) => (payload.len(), status),
            None => return Err(Error::ResponseTooShort(response.len())),
        };

        if !status.is_accepted() {
            debug!(%status, description = status.description(), "Card rejected command");
            return Err(ApduError::from(status).into());
        }

        trace!(%status, len = payload_len, "Command accepted");
        Ok(Reply {
            data: response.slice(..payload_len),
            status,
        })
    }

    /// Close the transaction, disconnecting the shared card connection.
    ///
    /// Closing twice is a no-op. If the disconnect fails the transaction
    /// stays open and the error is returned.
    pub fn close(&mut self) -> Result<()> {
        if !self.open {
            return Ok(());
        }

        self.card.close()?;
        self.open = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ServiceContext;
    use crate::error::ScError;
    use crate::mock::MockService;

    const SELECT: [u8; 4] = [0x00, 0xA4, 0x04, 0x00];

    fn exchange(response: &[u8]) -> Result<Reply> {
        let service = MockService::with_readers(&["Reader 1"]).responses(&[response]);
        let ctx = ServiceContext::new(service);
        let mut card = ctx.connect(&"Reader 1".into())?;
        let mut tx = card.begin()?;
        tx.transmit(&SELECT)
    }

    #[test]
    fn test_success_strips_trailer() {
        let reply = exchange(&[0x01, 0x02, 0x03, 0x90, 0x00]).unwrap();
        assert!(!reply.more());
        assert_eq!(&reply.data()[..], &[0x01, 0x02, 0x03]);
        assert_eq!(reply.remaining(), None);

        let reply = exchange(&[0x90, 0x00]).unwrap();
        assert!(!reply.more());
        assert!(reply.data().is_empty());
    }

    #[test]
    fn test_more_data_for_any_sw2() {
        for sw2 in [0x00, 0x10, 0xFF] {
            let reply = exchange(&[0xCA, 0xFE, 0x61, sw2]).unwrap();
            assert!(reply.more());
            assert_eq!(&reply.data()[..], &[0xCA, 0xFE]);
            assert_eq!(reply.remaining(), Some(sw2));
        }
    }

    #[test]
    fn test_failure_carries_status_word() {
        for (sw1, sw2) in [(0x6A, 0x82), (0x69, 0x82), (0x90, 0x01), (0x62, 0x83)] {
            let err = exchange(&[0x01, 0x02, sw1, sw2]).unwrap_err();
            assert_eq!(err, Error::Apdu(ApduError::new(sw1, sw2)));
            assert_eq!(err.status(), Some(StatusWord::new(sw1, sw2)));
        }
    }

    #[test]
    fn test_short_response_is_rejected() {
        assert_eq!(exchange(&[0x90]).unwrap_err(), Error::ResponseTooShort(1));
        assert_eq!(exchange(&[]).unwrap_err(), Error::ResponseTooShort(0));
    }

    #[test]
    fn test_empty_command_is_not_sent() {
        let service = MockService::with_readers(&["Reader 1"]).responses(&[&[0x90, 0x00]]);
        let ctx = ServiceContext::new(service.clone());
        let mut card = ctx.connect(&"Reader 1".into()).unwrap();
        let mut tx = card.begin().unwrap();

        assert_eq!(tx.transmit(&[]).unwrap_err(), Error::EmptyCommand);
        assert!(service.log().commands.is_empty());
    }

    #[test]
    fn test_transport_failure_is_service_error() {
        let service = MockService::with_readers(&["Reader 1"]);
        let ctx = ServiceContext::new(service);
        let mut card = ctx.connect(&"Reader 1".into()).unwrap();
        let mut tx = card.begin().unwrap();

        let err = tx.transmit(&SELECT).unwrap_err();
        assert_eq!(err.service_code(), Some(0x8010_0016));
    }

    #[test]
    fn test_responses_in_order() {
        let service = MockService::with_readers(&["Reader 1"]).responses(&[
            &[0x01, 0x61, 0x02],
            &[0x02, 0x03, 0x90, 0x00],
        ]);
        let ctx = ServiceContext::new(service.clone());
        let mut card = ctx.connect(&"Reader 1".into()).unwrap();
        let mut tx = card.begin().unwrap();

        let first = tx.transmit(&SELECT).unwrap();
        assert!(first.more());
        let second = tx.transmit(&[0x00, 0xC0, 0x00, 0x00, 0x02]).unwrap();
        assert!(!second.more());
        assert_eq!(&second.into_data()[..], &[0x02, 0x03]);

        let log = service.log();
        assert_eq!(log.commands.len(), 2);
        assert_eq!(&log.commands[0][..], &SELECT);
    }

    #[test]
    fn test_outcomes_do_not_change_state() {
        let service = MockService::with_readers(&["Reader 1"]).responses(&[
            &[0x6A, 0x82],
            &[0x61, 0x10],
            &[0x90, 0x00],
        ]);
        let ctx = ServiceContext::new(service);
        let mut card = ctx.connect(&"Reader 1".into()).unwrap();
        let mut tx = card.begin().unwrap();

        assert!(tx.transmit(&SELECT).is_err());
        assert!(tx.is_open());
        assert!(tx.transmit(&SELECT).unwrap().more());
        assert!(tx.is_open());
        assert!(!tx.transmit(&SELECT).unwrap().more());
        assert!(tx.is_open());
    }

    #[test]
    fn test_close_tears_down_card() {
        let service = MockService::with_readers(&["Reader 1"]).responses(&[&[0x90, 0x00]]);
        let ctx = ServiceContext::new(service.clone());
        let mut card = ctx.connect(&"Reader 1".into()).unwrap();

        let mut tx = card.begin().unwrap();
        tx.transmit(&SELECT).unwrap();
        tx.close().unwrap();
        assert!(!tx.is_open());
        assert_eq!(tx.transmit(&SELECT).unwrap_err(), Error::NotConnected);
        assert_eq!(tx.transmit(&[]).unwrap_err(), Error::NotConnected);

        // Second close is a no-op.
        tx.close().unwrap();
        drop(tx);

        assert!(!card.is_connected());
        assert_eq!(card.begin().unwrap_err(), Error::NotConnected);
        card.close().unwrap();
        assert_eq!(service.log().disconnects.len(), 1);
        assert_eq!(service.log().commands.len(), 1);
    }

    #[test]
    fn test_close_failure_keeps_transaction_open() {
        let service = MockService::with_readers(&["Reader 1"])
            .responses(&[&[0x90, 0x00]])
            .failing_disconnects(1);
        let ctx = ServiceContext::new(service);
        let mut card = ctx.connect(&"Reader 1".into()).unwrap();
        let mut tx = card.begin().unwrap();

        assert_eq!(tx.close(), Err(Error::Service(ScError::INTERNAL_ERROR)));
        assert!(tx.is_open());
        assert!(tx.transmit(&SELECT).is_ok());
        tx.close().unwrap();
        assert!(!tx.is_open());
    }

    #[test]
    fn test_dropped_transaction_leaves_card_connected() {
        let service = MockService::with_readers(&["Reader 1"]).responses(&[&[0x90, 0x00]]);
        let ctx = ServiceContext::new(service.clone());
        let mut card = ctx.connect(&"Reader 1".into()).unwrap();

        {
            let mut tx = card.begin().unwrap();
            tx.transmit(&SELECT).unwrap();
        }
        assert!(card.is_connected());

        let mut tx = card.begin().unwrap();
        tx.transmit(&SELECT).unwrap();
        assert!(tx.card().is_connected());
        assert!(service.log().disconnects.is_empty());
    }
}
