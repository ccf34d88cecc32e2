//! Service context, card sessions and APDU framing over a smart card reader
//! service
//!
//! This crate is the transport layer between an application and a smart card
//! reached through a platform reader service such as PC/SC. It covers:
//!
//! - Enumerating readers and connecting to a card ([`ServiceContext`])
//! - Owning the exclusive card session ([`CardHandle`])
//! - Scoping a sequence of command exchanges ([`Transaction`])
//! - Classifying each response by its ISO/IEC 7816-4 status word
//!   ([`StatusWord`], [`Reply`], [`ApduError`])
//! - Turning service failures into numeric codes ([`ScError`], [`translate`])
//!
//! The reader service itself sits behind the [`ReaderService`] and
//! [`CardChannel`] traits. See `scard-transport-pcsc` for the PC/SC backend.
//!
//! ```ignore
//! let ctx = scard_transport_pcsc::establish()?;
//! let reader = ctx.list_readers()?.remove(0);
//! let mut card = ctx.connect(&reader)?;
//!
//! let mut tx = card.begin()?;
//! let reply = tx.transmit(&[0x00, 0xA4, 0x04, 0x00, 0x00])?;
//! if reply.more() {
//!     // issue GET RESPONSE for reply.remaining() bytes
//! }
//! tx.close()?;
//! ctx.close()?;
//! ```
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![forbid(unsafe_code)]
#![warn(missing_docs, rustdoc::missing_crate_level_docs)]

pub use bytes::Bytes;

mod card;
mod config;
mod context;
mod error;
mod service;
pub mod status;
mod transaction;
pub mod translate;

#[cfg(test)]
mod mock;

pub use card::CardHandle;
pub use config::{ConnectConfig, Disposition, Protocol, ShareMode};
pub use context::ServiceContext;
pub use error::{ApduError, Error, Result, ScError};
pub use service::{CardChannel, ReaderName, ReaderService};
pub use status::StatusWord;
pub use transaction::{Reply, Transaction};

/// Prelude module containing commonly used traits and types
pub mod prelude {
    pub use crate::{
        ApduError, Bytes, CardChannel, CardHandle, Error, ReaderName, ReaderService, Reply,
        Result, ScError, ServiceContext, StatusWord, Transaction,
    };
}
