//! Input source trait and error types.

use core::future::Future;
use keylink_proto::{DecodeError, FrameError};

use crate::state::{InputState, StateError};

/// Error type for input operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputError {
    /// UART/communication I/O error.
    Io,
    /// The byte stream ended.
    Disconnected,
    /// A frame was abandoned by the packet receiver.
    Frame(FrameError),
    /// A complete packet failed validation.
    Decode(DecodeError),
    /// The packet does not fit an [`InputState`].
    State(StateError),
}

impl From<FrameError> for InputError {
    fn from(err: FrameError) -> Self {
        match err {
            FrameError::Decode(e) => InputError::Decode(e),
            other => InputError::Frame(other),
        }
    }
}

impl From<DecodeError> for InputError {
    fn from(err: DecodeError) -> Self {
        InputError::Decode(err)
    }
}

impl From<StateError> for InputError {
    fn from(err: StateError) -> Self {
        InputError::State(err)
    }
}

impl core::fmt::Display for InputError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Io => write!(f, "input I/O error"),
            Self::Disconnected => write!(f, "input disconnected"),
            Self::Frame(e) => write!(f, "framing error: {e}"),
            Self::Decode(e) => write!(f, "decode error: {e}"),
            Self::State(e) => write!(f, "state error: {e}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InputError {}

/// Async trait for keyboard and gamepad input sources.
///
/// On the sending side this wraps whatever captures the user's input; on the
/// receiving side [`FramedInput`](crate::serial::FramedInput) reconstructs the
/// state from the serial stream.
///
/// # `no_std` Compatibility
///
/// All implementations must be `#![no_std]` compatible with no heap allocation.
pub trait InputSource {
    /// Wait for and return the next complete input state.
    ///
    /// Every call yields a full snapshot, never a delta, so a lost update is
    /// corrected by the next one.
    fn poll(&mut self) -> impl Future<Output = Result<InputState, InputError>>;

    /// Check if the input source is connected/ready.
    fn is_connected(&self) -> bool;
}
