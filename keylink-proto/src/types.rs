//! Input snapshot types consumed by the encoders, and wire format constants.

use crate::keycode::KeyCode;

/// First byte of a primary-format packet (`#`).
///
/// Chosen because it almost never starts ordinary typed text, which lets a
/// receiver tell packets apart from human input sharing the same channel. It
/// can still occur anywhere inside a packet, so it is not a frame delimiter.
pub const START_SENTINEL: u8 = b'#';

/// First byte of a checked-format packet (`%`).
pub const CHECKED_START_SENTINEL: u8 = b'%';

/// Last byte of every packet (`$`).
pub const END_SENTINEL: u8 = b'$';

/// Largest count that fits in a count byte.
pub const MAX_COUNT: usize = u8::MAX as usize;

/// Framing variant of a sentinel-delimited packet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WireFormat {
    /// `#` ... `$`. Understood by every receiver.
    #[default]
    Framed,
    /// `%` ... CRC-8 `$`. Same payload with a CRC-8/SMBUS byte before the end
    /// sentinel; its own start sentinel keeps it from being mistaken for a
    /// primary packet by older receivers.
    Checked,
}

impl WireFormat {
    /// Start sentinel announcing this variant.
    #[inline]
    #[must_use]
    pub const fn start_sentinel(self) -> u8 {
        match self {
            Self::Framed => START_SENTINEL,
            Self::Checked => CHECKED_START_SENTINEL,
        }
    }

    /// Variant announced by a start byte, if it is a start sentinel.
    #[inline]
    #[must_use]
    pub const fn from_start_sentinel(byte: u8) -> Option<Self> {
        match byte {
            START_SENTINEL => Some(Self::Framed),
            CHECKED_START_SENTINEL => Some(Self::Checked),
            _ => None,
        }
    }

    /// Bytes added around the keys and gamepads: sentinels, key count,
    /// gamepad count and, for [`WireFormat::Checked`], the CRC.
    #[inline]
    #[must_use]
    pub const fn overhead(self) -> usize {
        match self {
            Self::Framed => 4,
            Self::Checked => 5,
        }
    }
}

/// Read access to one controller's readings.
///
/// Implemented by [`GamepadSnapshot`] and by any owned gamepad type that can
/// lend out its axes and buttons as slices, so frames can be encoded without
/// copying.
pub trait Gamepad {
    /// Axis readings in `[-1.0, 1.0]`, in a device-stable order.
    fn axes(&self) -> &[f32];

    /// Button pressed states, in a device-stable order.
    ///
    /// Analog buttons (triggers) are reported as pressed or not; the packet
    /// format carries one bit per button.
    fn buttons(&self) -> &[bool];
}

impl<G: Gamepad + ?Sized> Gamepad for &G {
    #[inline]
    fn axes(&self) -> &[f32] {
        (**self).axes()
    }

    #[inline]
    fn buttons(&self) -> &[bool] {
        (**self).buttons()
    }
}

/// Borrowed readings of one controller at one instant.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GamepadSnapshot<'a> {
    pub axes: &'a [f32],
    pub buttons: &'a [bool],
}

impl<'a> GamepadSnapshot<'a> {
    #[must_use]
    pub const fn new(axes: &'a [f32], buttons: &'a [bool]) -> Self {
        Self { axes, buttons }
    }
}

impl Gamepad for GamepadSnapshot<'_> {
    #[inline]
    fn axes(&self) -> &[f32] {
        self.axes
    }

    #[inline]
    fn buttons(&self) -> &[bool] {
        self.buttons
    }
}

/// Everything one packet carries: the pressed keys and every gamepad.
///
/// Key and gamepad order is preserved verbatim on the wire.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InputFrame<'a, G = GamepadSnapshot<'a>> {
    pub keys: &'a [KeyCode],
    pub gamepads: &'a [G],
    pub format: WireFormat,
}

impl<'a, G: Gamepad> InputFrame<'a, G> {
    /// Frame in the primary [`WireFormat::Framed`] layout.
    #[must_use]
    pub const fn new(keys: &'a [KeyCode], gamepads: &'a [G]) -> Self {
        Self {
            keys,
            gamepads,
            format: WireFormat::Framed,
        }
    }

    /// Same frame, encoded with the given framing variant.
    #[must_use]
    pub const fn with_format(mut self, format: WireFormat) -> Self {
        self.format = format;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_values() {
        assert_eq!(START_SENTINEL, 0x23);
        assert_eq!(END_SENTINEL, 0x24);
        assert_eq!(CHECKED_START_SENTINEL, 0x25);
    }

    #[test]
    fn test_wire_format_from_start() {
        assert_eq!(WireFormat::from_start_sentinel(b'#'), Some(WireFormat::Framed));
        assert_eq!(WireFormat::from_start_sentinel(b'%'), Some(WireFormat::Checked));
        assert_eq!(WireFormat::from_start_sentinel(b'$'), None);
        assert_eq!(WireFormat::from_start_sentinel(b'a'), None);
    }

    #[test]
    fn test_gamepad_through_reference() {
        let axes = [0.5f32];
        let buttons = [true, false];
        let pad = GamepadSnapshot::new(&axes, &buttons);
        let by_ref: &GamepadSnapshot<'_> = &pad;
        assert_eq!(Gamepad::axes(&by_ref), &axes);
        assert_eq!(Gamepad::buttons(&by_ref), &buttons);
    }

    #[test]
    fn test_frame_defaults_to_framed() {
        let frame: InputFrame<'_> = InputFrame::new(&[], &[]);
        assert_eq!(frame.format, WireFormat::Framed);
        assert_eq!(frame.with_format(WireFormat::Checked).format, WireFormat::Checked);
    }
}
