//! PC/SC reader service backend for `scard-core`
//!
//! This crate implements the [`ReaderService`](scard_core::ReaderService) and
//! [`CardChannel`](scard_core::CardChannel) traits on top of the PC/SC API,
//! which is provided by WinSCard on Windows, the CryptoTokenKit shim on macOS
//! and pcsc-lite on Linux.
//!
//! # Examples
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Connect to the PC/SC service (system scope, exclusive T=1 sessions)
//! let ctx = scard_transport_pcsc::establish()?;
//!
//! // List available readers
//! let readers = match ctx.list_readers() {
//!     Ok(readers) => readers,
//!     Err(e) if e.is_no_readers() => {
//!         println!("No readers found");
//!         return Ok(());
//!     }
//!     Err(e) => return Err(e.into()),
//! };
//!
//! // Connect to the first reader
//! let mut card = ctx.connect(&readers[0])?;
//! let mut tx = card.begin()?;
//!
//! // Send a SELECT command
//! let reply = tx.transmit(&[0x00, 0xA4, 0x04, 0x00, 0x00])?;
//! println!("Response: {:02X?} (more: {})", &reply.data()[..], reply.more());
//!
//! tx.close()?;
//! ctx.close()?;
//! # Ok(())
//! # }
//! ```
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![warn(missing_docs)]

mod config;
mod error;
mod reader;
mod service;
mod transport;

pub use config::PcscConfig;
pub use reader::PcscReader;
pub use service::PcscService;
pub use transport::PcscCard;

// Re-export the scope type for configuration
pub use pcsc::Scope;

use scard_core::{CardHandle, Result, ServiceContext};

/// Service context backed by PC/SC
pub type PcscContext = ServiceContext<PcscService>;

/// Card handle backed by PC/SC
pub type PcscHandle = CardHandle<PcscCard>;

/// Establish a PC/SC service context with the default configuration
pub fn establish() -> Result<PcscContext> {
    establish_with_config(PcscConfig::default())
}

/// Establish a PC/SC service context with a custom configuration
pub fn establish_with_config(config: PcscConfig) -> Result<PcscContext> {
    let service = PcscService::establish(config.scope)?;
    Ok(ServiceContext::with_config(service, config.connect))
}
