//! Builder pattern API for assembling input state and packets.
//!
//! Errors are deferred: every setter returns the builder, and the first
//! capacity error is reported by [`PacketBuilder::build`] or
//! [`PacketBuilder::encode`].
//!
//! # Example
//!
//! ```
//! use keylink_core::PacketBuilder;
//! use keylink_proto::KeyCode;
//!
//! let mut buf = [0u8; 64];
//! let len = PacketBuilder::new()
//!     .key(KeyCode::ControlLeft)
//!     .key(KeyCode::KeyC)
//!     .gamepad(&[0.0, 0.0], &[false, true])
//!     .encode(&mut buf)
//!     .unwrap();
//!
//! assert_eq!(&buf[..len], &[b'#', 2, 55, 21, 1, 2, 127, 127, 2, 0b10, b'$']);
//! ```

use keylink_proto::{Encode, EncodeError, KeyCode, WireFormat};

use crate::state::{GamepadState, InputState, StateError};

/// Error type for [`PacketBuilder::encode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BuildError {
    State(StateError),
    Encode(EncodeError),
}

impl From<StateError> for BuildError {
    fn from(e: StateError) -> Self {
        Self::State(e)
    }
}

impl From<EncodeError> for BuildError {
    fn from(e: EncodeError) -> Self {
        Self::Encode(e)
    }
}

impl core::fmt::Display for BuildError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::State(e) => write!(f, "{e}"),
            Self::Encode(e) => write!(f, "{e}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BuildError {}

/// Fluent builder for an [`InputState`] and its packet.
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct PacketBuilder {
    state: InputState,
    format: WireFormat,
    error: Option<StateError>,
}

impl PacketBuilder {
    /// Start from the all-released state in the primary format.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing state.
    pub fn from_state(state: InputState) -> Self {
        Self {
            state,
            ..Self::default()
        }
    }

    /// Press a key. Repeated keys are kept once.
    pub fn key(mut self, key: KeyCode) -> Self {
        let result = self.state.press(key);
        self.record(result);
        self
    }

    /// Press several keys, in order.
    pub fn keys(self, keys: &[KeyCode]) -> Self {
        keys.iter().fold(self, |b, &key| b.key(key))
    }

    /// Append a gamepad with the given readings.
    pub fn gamepad(mut self, axes: &[f32], buttons: &[bool]) -> Self {
        let result = GamepadState::from_slices(axes, buttons)
            .and_then(|pad| self.state.add_gamepad(pad));
        self.record(result);
        self
    }

    /// Use the checked framing.
    pub fn checked(mut self) -> Self {
        self.format = WireFormat::Checked;
        self
    }

    pub fn format(mut self, format: WireFormat) -> Self {
        self.format = format;
        self
    }

    /// Get the built state without encoding.
    ///
    /// # Errors
    ///
    /// Returns the first capacity error hit by a setter.
    pub fn build(self) -> Result<InputState, StateError> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.state),
        }
    }

    /// Encode the packet to the provided buffer.
    ///
    /// # Errors
    ///
    /// Returns the first capacity error hit by a setter, or an encoding error
    /// (typically [`EncodeError::BufferTooSmall`]).
    pub fn encode(self, buf: &mut [u8]) -> Result<usize, BuildError> {
        let format = self.format;
        let state = self.build()?;
        Ok(state.frame(format).encode(buf)?)
    }

    fn record(&mut self, result: Result<(), StateError>) {
        if let Err(e) = result {
            self.error.get_or_insert(e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::MAX_GAMEPADS;

    #[test]
    fn test_empty_builder() {
        let mut buf = [0u8; 8];
        let len = PacketBuilder::new().encode(&mut buf).unwrap();
        assert_eq!(&buf[..len], &[b'#', 0, 0, b'$']);
    }

    #[test]
    fn test_keys_in_order() {
        let state = PacketBuilder::new()
            .keys(&[KeyCode::KeyW, KeyCode::KeyA, KeyCode::KeyW])
            .build()
            .unwrap();
        assert_eq!(state.keys.as_slice(), &[KeyCode::KeyW, KeyCode::KeyA]);
    }

    #[test]
    fn test_checked_format() {
        let mut buf = [0u8; 8];
        let len = PacketBuilder::new()
            .key(KeyCode::Tab)
            .checked()
            .encode(&mut buf)
            .unwrap();
        assert_eq!(len, 6);
        assert_eq!(buf[0], b'%');
        assert_eq!(buf[len - 1], b'$');
    }

    #[test]
    fn test_first_error_reported() {
        let mut builder = PacketBuilder::new();
        for _ in 0..=MAX_GAMEPADS {
            builder = builder.gamepad(&[], &[]);
        }
        let builder = builder.gamepad(&[0.0; 64], &[]);
        assert_eq!(builder.build(), Err(StateError::TooManyGamepads));
    }

    #[test]
    fn test_buffer_too_small() {
        let mut buf = [0u8; 3];
        assert_eq!(
            PacketBuilder::new().encode(&mut buf),
            Err(BuildError::Encode(EncodeError::BufferTooSmall { needed: 4 }))
        );
    }

    #[test]
    fn test_from_state() {
        let mut state = InputState::released();
        state.press(KeyCode::Backspace).unwrap();
        let state = PacketBuilder::from_state(state)
            .key(KeyCode::Enter)
            .build()
            .unwrap();
        assert_eq!(state.keys.as_slice(), &[KeyCode::Backspace, KeyCode::Enter]);
    }
}
