//! Packet sink trait and error types.

use core::future::Future;

/// Error type for output operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputError {
    /// UART/communication I/O error.
    Io,
    /// Link not ready (e.g. port not open yet).
    NotReady,
    /// Transmitter busy.
    Busy,
}

impl core::fmt::Display for OutputError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Io => write!(f, "output I/O error"),
            Self::NotReady => write!(f, "output not ready"),
            Self::Busy => write!(f, "output busy"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for OutputError {}

/// Async trait for the transport that carries encoded packets.
///
/// # `no_std` Compatibility
///
/// All implementations must be `#![no_std]` compatible with no heap allocation.
pub trait PacketSink {
    /// Send one complete packet.
    ///
    /// Implementations must write the bytes in order and without interleaving
    /// other data, or the receiver loses framing.
    fn send(&mut self, packet: &[u8]) -> impl Future<Output = Result<(), OutputError>>;

    /// Check if the sink is ready to accept data.
    fn is_ready(&self) -> bool;
}
