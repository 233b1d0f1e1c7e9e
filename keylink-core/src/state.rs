//! Owned keyboard and gamepad state with fixed capacities.
//!
//! [`InputState`] is what travels through the pipeline: input sources produce
//! it, and [`InputState::frame`] lends it to the encoder without copying.

use heapless::Vec;
use keylink_proto::{Gamepad, GamepadView, InputFrame, KeyCode, Packet, WireFormat};

/// Most keys held at once.
pub const MAX_PRESSED_KEYS: usize = 32;

/// Most gamepads tracked at once.
pub const MAX_GAMEPADS: usize = 4;

/// Most axes per gamepad (standard mapping uses 4).
pub const MAX_AXES: usize = 8;

/// Most buttons per gamepad (standard mapping uses 17).
pub const MAX_BUTTONS: usize = 32;

/// Largest packet an [`InputState`] can encode to, in either wire format.
pub const MAX_PACKET_LEN: usize = WireFormat::Checked.overhead()
    + MAX_PRESSED_KEYS
    + MAX_GAMEPADS * (2 + MAX_AXES + MAX_BUTTONS.div_ceil(8));

/// An [`InputState`] capacity was exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StateError {
    TooManyKeys,
    TooManyGamepads,
    TooManyAxes,
    TooManyButtons,
    /// A received key code is not in the key table.
    UnknownKey(u8),
}

impl core::fmt::Display for StateError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::TooManyKeys => write!(f, "more than {MAX_PRESSED_KEYS} keys pressed"),
            Self::TooManyGamepads => write!(f, "more than {MAX_GAMEPADS} gamepads"),
            Self::TooManyAxes => write!(f, "more than {MAX_AXES} axes on a gamepad"),
            Self::TooManyButtons => write!(f, "more than {MAX_BUTTONS} buttons on a gamepad"),
            Self::UnknownKey(code) => write!(f, "unknown key code {code}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for StateError {}

/// Readings of one gamepad.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GamepadState {
    pub axes: Vec<f32, MAX_AXES>,
    pub buttons: Vec<bool, MAX_BUTTONS>,
}

impl GamepadState {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            axes: Vec::new(),
            buttons: Vec::new(),
        }
    }

    /// Copy readings from slices.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::TooManyAxes`] or [`StateError::TooManyButtons`]
    /// if a slice exceeds the capacity.
    pub fn from_slices(axes: &[f32], buttons: &[bool]) -> Result<Self, StateError> {
        Ok(Self {
            axes: Vec::from_slice(axes).map_err(|()| StateError::TooManyAxes)?,
            buttons: Vec::from_slice(buttons).map_err(|()| StateError::TooManyButtons)?,
        })
    }

    /// Decode one gamepad section of a received packet.
    ///
    /// # Errors
    ///
    /// Returns a capacity error if the packet carries more axes or buttons
    /// than this type holds.
    pub fn from_view(view: &GamepadView<'_>) -> Result<Self, StateError> {
        let mut pad = Self::new();
        for axis in view.axes() {
            pad.axes.push(axis).map_err(|_| StateError::TooManyAxes)?;
        }
        for pressed in view.buttons() {
            pad.buttons.push(pressed).map_err(|_| StateError::TooManyButtons)?;
        }
        Ok(pad)
    }

    /// True if any button is pressed.
    #[must_use]
    pub fn any_pressed(&self) -> bool {
        self.buttons.iter().any(|&b| b)
    }
}

impl Gamepad for GamepadState {
    fn axes(&self) -> &[f32] {
        &self.axes
    }

    fn buttons(&self) -> &[bool] {
        &self.buttons
    }
}

/// Everything the sender knows about the user's input at one instant.
///
/// The default value has no keys and no gamepads; encoded, it is the
/// "everything released" packet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputState {
    /// Pressed keys, oldest first.
    pub keys: Vec<KeyCode, MAX_PRESSED_KEYS>,
    pub gamepads: Vec<GamepadState, MAX_GAMEPADS>,
}

impl InputState {
    /// No keys pressed and no gamepads.
    #[must_use]
    pub const fn released() -> Self {
        Self {
            keys: Vec::new(),
            gamepads: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_released(&self) -> bool {
        self.keys.is_empty() && self.gamepads.is_empty()
    }

    #[must_use]
    pub fn is_pressed(&self, key: KeyCode) -> bool {
        self.keys.contains(&key)
    }

    /// Add `key` to the pressed set. Pressing a held key is a no-op, so
    /// auto-repeat does not duplicate it.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::TooManyKeys`] when the set is full.
    pub fn press(&mut self, key: KeyCode) -> Result<(), StateError> {
        if self.is_pressed(key) {
            return Ok(());
        }
        self.keys.push(key).map_err(|_| StateError::TooManyKeys)
    }

    /// Remove `key`, keeping the order of the others.
    pub fn release(&mut self, key: KeyCode) {
        if let Some(i) = self.keys.iter().position(|&k| k == key) {
            self.keys.remove(i);
        }
    }

    /// Append a gamepad.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::TooManyGamepads`] when all slots are taken.
    pub fn add_gamepad(&mut self, pad: GamepadState) -> Result<(), StateError> {
        self.gamepads.push(pad).map_err(|_| StateError::TooManyGamepads)
    }

    /// Rebuild the state a received packet describes.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::UnknownKey`] for a key code outside the table, or
    /// a capacity error if the packet carries more than this type holds.
    pub fn from_packet(packet: &Packet<'_>) -> Result<Self, StateError> {
        let mut state = Self::released();
        for key in packet.keys() {
            let key = key.map_err(StateError::UnknownKey)?;
            state.keys.push(key).map_err(|_| StateError::TooManyKeys)?;
        }
        for view in packet.gamepads() {
            state.add_gamepad(GamepadState::from_view(&view)?)?;
        }
        Ok(state)
    }

    /// Borrow the state as a frame ready for encoding.
    #[must_use]
    pub fn frame(&self, format: WireFormat) -> InputFrame<'_, GamepadState> {
        InputFrame::new(self.keys.as_slice(), self.gamepads.as_slice()).with_format(format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keylink_proto::Encode;

    #[test]
    fn test_released_state_encodes_empty_packet() {
        let state = InputState::released();
        assert!(state.is_released());
        let mut buf = [0u8; 8];
        let len = state.frame(WireFormat::Framed).encode(&mut buf).unwrap();
        assert_eq!(&buf[..len], &[b'#', 0, 0, b'$']);
    }

    #[test]
    fn test_press_and_release() {
        let mut state = InputState::released();
        state.press(KeyCode::ShiftLeft).unwrap();
        state.press(KeyCode::KeyA).unwrap();
        state.press(KeyCode::ShiftLeft).unwrap();
        assert_eq!(state.keys.as_slice(), &[KeyCode::ShiftLeft, KeyCode::KeyA]);

        state.release(KeyCode::ShiftLeft);
        assert_eq!(state.keys.as_slice(), &[KeyCode::KeyA]);
        state.release(KeyCode::Space);
        assert!(state.is_pressed(KeyCode::KeyA));
    }

    #[test]
    fn test_key_capacity() {
        let mut state = InputState::released();
        for &key in KeyCode::ALL.iter().take(MAX_PRESSED_KEYS) {
            state.press(key).unwrap();
        }
        assert_eq!(state.press(KeyCode::Space), Err(StateError::TooManyKeys));
    }

    #[test]
    fn test_gamepad_capacity() {
        assert_eq!(
            GamepadState::from_slices(&[0.0; MAX_AXES + 1], &[]),
            Err(StateError::TooManyAxes)
        );
        assert_eq!(
            GamepadState::from_slices(&[], &[false; MAX_BUTTONS + 1]),
            Err(StateError::TooManyButtons)
        );
        let mut state = InputState::released();
        for _ in 0..MAX_GAMEPADS {
            state.add_gamepad(GamepadState::new()).unwrap();
        }
        assert_eq!(
            state.add_gamepad(GamepadState::new()),
            Err(StateError::TooManyGamepads)
        );
    }

    #[test]
    fn test_round_trip_through_packet() {
        let mut state = InputState::released();
        state.press(KeyCode::ControlLeft).unwrap();
        state.press(KeyCode::KeyZ).unwrap();
        state
            .add_gamepad(GamepadState::from_slices(&[-1.0, 1.0], &[true, false, true]).unwrap())
            .unwrap();

        let mut buf = [0u8; MAX_PACKET_LEN];
        let len = state.frame(WireFormat::Checked).encode(&mut buf).unwrap();
        let packet = Packet::parse(&buf[..len]).unwrap();
        let decoded = InputState::from_packet(&packet).unwrap();

        assert_eq!(decoded.keys, state.keys);
        assert_eq!(decoded.gamepads[0].axes.as_slice(), &[-1.0, 1.0]);
        assert_eq!(decoded.gamepads[0].buttons.as_slice(), &[true, false, true]);
        assert!(decoded.gamepads[0].any_pressed());
    }

    #[test]
    fn test_unknown_key_rejected() {
        let packet = Packet::parse(&[b'#', 1, 250, 0, b'$']).unwrap();
        assert_eq!(
            InputState::from_packet(&packet),
            Err(StateError::UnknownKey(250))
        );
    }

    #[test]
    fn test_full_state_fits_max_packet() {
        let mut state = InputState::released();
        for &key in KeyCode::ALL.iter().take(MAX_PRESSED_KEYS) {
            state.press(key).unwrap();
        }
        for _ in 0..MAX_GAMEPADS {
            let pad =
                GamepadState::from_slices(&[0.5; MAX_AXES], &[true; MAX_BUTTONS]).unwrap();
            state.add_gamepad(pad).unwrap();
        }
        assert_eq!(
            state.frame(WireFormat::Checked).encoded_len(),
            Ok(MAX_PACKET_LEN)
        );
    }
}
