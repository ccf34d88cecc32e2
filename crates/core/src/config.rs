//! Connection options for card sessions

/// Sharing mode for card connections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShareMode {
    /// Exclusive access to the card (default)
    #[default]
    Exclusive,
    /// Shared access to the card
    Shared,
    /// Direct connection to the reader
    Direct,
}

/// Transmission protocol requested when connecting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Protocol {
    /// Character-oriented T=0
    T0,
    /// Block-oriented T=1 (default)
    #[default]
    T1,
    /// Whichever protocol the reader negotiates
    Any,
}

/// What to do with the card when a session is disconnected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Disposition {
    /// Leave the card powered and present (default)
    #[default]
    LeaveCard,
    /// Warm-reset the card
    ResetCard,
    /// Power the card down
    UnpowerCard,
    /// Eject the card, if the reader supports it
    EjectCard,
}

/// Options applied to every card connection opened by a service context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConnectConfig {
    /// Sharing mode for card connections
    pub share_mode: ShareMode,
    /// Requested transmission protocol
    pub protocol: Protocol,
    /// Disposition applied when the session is closed
    pub disposition: Disposition,
}

impl ConnectConfig {
    /// Create a new default configuration: exclusive, T=1, leave card
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the sharing mode
    pub const fn with_share_mode(mut self, mode: ShareMode) -> Self {
        self.share_mode = mode;
        self
    }

    /// Set the requested protocol
    pub const fn with_protocol(mut self, protocol: Protocol) -> Self {
        self.protocol = protocol;
        self
    }

    /// Set the disposition used on close
    pub const fn with_disposition(mut self, disposition: Disposition) -> Self {
        self.disposition = disposition;
        self
    }
}
