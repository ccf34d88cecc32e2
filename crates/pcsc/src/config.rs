//! Configuration options for the PC/SC backend

use pcsc::Scope;
use scard_core::{ConnectConfig, Disposition, Protocol, ShareMode};

/// Configuration options for a PC/SC service context
#[derive(Debug, Clone, Copy)]
pub struct PcscConfig {
    /// Scope the PC/SC context is established in
    pub scope: Scope,

    /// Options applied to every card connection
    pub connect: ConnectConfig,
}

impl Default for PcscConfig {
    fn default() -> Self {
        Self {
            scope: Scope::System,
            connect: ConnectConfig::default(),
        }
    }
}

impl PcscConfig {
    /// Create a new default configuration: system scope, exclusive, T=1,
    /// leave card on close
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the context scope
    pub const fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    /// Set the sharing mode
    pub const fn with_share_mode(mut self, mode: ShareMode) -> Self {
        self.connect = self.connect.with_share_mode(mode);
        self
    }

    /// Set the requested protocol
    pub const fn with_protocol(mut self, protocol: Protocol) -> Self {
        self.connect = self.connect.with_protocol(protocol);
        self
    }

    /// Set the disposition used on close
    pub const fn with_disposition(mut self, disposition: Disposition) -> Self {
        self.connect = self.connect.with_disposition(disposition);
        self
    }
}

pub(crate) const fn share_mode(mode: ShareMode) -> pcsc::ShareMode {
    match mode {
        ShareMode::Exclusive => pcsc::ShareMode::Exclusive,
        ShareMode::Shared => pcsc::ShareMode::Shared,
        ShareMode::Direct => pcsc::ShareMode::Direct,
    }
}

pub(crate) const fn protocols(protocol: Protocol) -> pcsc::Protocols {
    match protocol {
        Protocol::T0 => pcsc::Protocols::T0,
        Protocol::T1 => pcsc::Protocols::T1,
        Protocol::Any => pcsc::Protocols::ANY,
    }
}

pub(crate) const fn disposition(disposition: Disposition) -> pcsc::Disposition {
    match disposition {
        Disposition::LeaveCard => pcsc::Disposition::LeaveCard,
        Disposition::ResetCard => pcsc::Disposition::ResetCard,
        Disposition::UnpowerCard => pcsc::Disposition::UnpowerCard,
        Disposition::EjectCard => pcsc::Disposition::EjectCard,
    }
}
