//! Legacy fixed-width packet format.
//!
//! Superseded by the sentinel-framed format in [`encode`](crate::encode): the
//! 14-byte keyboard bitmap is larger than the key list for any realistic
//! number of held keys. Kept for receivers that still expect it.
//!
//! ```text
//! bytes 0..14   keyboard bitmap, key code c at bit c % 8 of byte c / 8
//! byte 13       bits 1..8 also hold the gamepad count (at most 127)
//! per gamepad   axis count, button count, truncated axis bytes,
//!               ceil(buttons / 8) packed button bytes
//! ```
//!
//! There are no sentinels and no checksum; the receiver must know where a
//! packet starts and ends from the transport.
//!
//! The gamepad count overlaps bit 1 of byte 13, which is also the bitmap slot
//! of [`KeyCode::NumpadSubtract`]. That key is therefore rejected by the
//! encoder and never reported by the decoder.

use crate::axis::encode_axis_truncated;
use crate::decode::{Cursor, DecodeError, GamepadIter, GamepadLayout};
use crate::encode::{gamepads_len, reserve, ByteSink, Encode, EncodeError, FrameWriter};
use crate::keycode::KeyCode;
use crate::types::{Gamepad, GamepadSnapshot};

/// Size of the keyboard bitmap.
pub const KEY_BITMAP_LEN: usize = 14;

/// Most gamepads the 7-bit count can describe.
pub const FIXED_WIDTH_MAX_GAMEPADS: usize = 127;

/// Highest key code that has a bitmap slot of its own.
const LAST_BITMAP_CODE: u8 = 104;

/// Byte that shares its high bits with the gamepad count.
const COUNT_BYTE: usize = KEY_BITMAP_LEN - 1;

/// Pressed keys as a bitmap indexed by key code.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyBitmap([u8; KEY_BITMAP_LEN]);

impl KeyBitmap {
    #[must_use]
    pub const fn new() -> Self {
        Self([0; KEY_BITMAP_LEN])
    }

    /// Bitmap with every key in `keys` set. Duplicates are harmless.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::KeyNotRepresentable`] for
    /// [`KeyCode::NumpadSubtract`].
    pub fn from_keys(keys: &[KeyCode]) -> Result<Self, EncodeError> {
        let mut map = Self::new();
        for &key in keys {
            map.set(key)?;
        }
        Ok(map)
    }

    /// Bitmap taken from the first bytes of a packet. The gamepad count bits
    /// are dropped.
    #[must_use]
    pub fn from_bytes(mut bytes: [u8; KEY_BITMAP_LEN]) -> Self {
        bytes[COUNT_BYTE] &= 0x01;
        Self(bytes)
    }

    /// Mark `key` as pressed.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::KeyNotRepresentable`] for
    /// [`KeyCode::NumpadSubtract`].
    pub fn set(&mut self, key: KeyCode) -> Result<(), EncodeError> {
        let (byte, mask) = slot(key).ok_or(EncodeError::KeyNotRepresentable(key))?;
        self.0[byte] |= mask;
        Ok(())
    }

    pub fn clear(&mut self, key: KeyCode) {
        if let Some((byte, mask)) = slot(key) {
            self.0[byte] &= !mask;
        }
    }

    #[must_use]
    pub fn is_pressed(&self, key: KeyCode) -> bool {
        slot(key).is_some_and(|(byte, mask)| self.0[byte] & mask != 0)
    }

    /// Pressed keys in code order.
    pub fn pressed(&self) -> impl Iterator<Item = KeyCode> + '_ {
        KeyCode::ALL
            .iter()
            .copied()
            .filter(move |&key| self.is_pressed(key))
    }

    #[inline]
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; KEY_BITMAP_LEN] {
        &self.0
    }
}

fn slot(key: KeyCode) -> Option<(usize, u8)> {
    let code = key.code();
    (code <= LAST_BITMAP_CODE).then(|| (usize::from(code / 8), 1 << (code % 8)))
}

/// Input for one fixed-width packet.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedWidthFrame<'a, G = GamepadSnapshot<'a>> {
    pub keys: KeyBitmap,
    pub gamepads: &'a [G],
}

impl<'a, G: Gamepad> FixedWidthFrame<'a, G> {
    #[must_use]
    pub const fn new(keys: KeyBitmap, gamepads: &'a [G]) -> Self {
        Self { keys, gamepads }
    }

    /// Frame from a list of pressed keys.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::KeyNotRepresentable`] if a key has no bitmap
    /// slot.
    pub fn from_keys(keys: &[KeyCode], gamepads: &'a [G]) -> Result<Self, EncodeError> {
        Ok(Self::new(KeyBitmap::from_keys(keys)?, gamepads))
    }

    /// The packet as text, the way the legacy sender handed it to the serial
    /// port. Byte sequences that are not valid UTF-8 are replaced, so this is
    /// lossy for most packets.
    ///
    /// # Errors
    ///
    /// Returns a count error if the input does not fit the format.
    #[cfg(feature = "std")]
    pub fn to_text(&self) -> Result<std::string::String, EncodeError> {
        let bytes = self.to_bytes()?;
        Ok(std::string::String::from_utf8_lossy(&bytes).into_owned())
    }
}

impl<G: Gamepad> Encode for FixedWidthFrame<'_, G> {
    fn encoded_len(&self) -> Result<usize, EncodeError> {
        if self.gamepads.len() > FIXED_WIDTH_MAX_GAMEPADS {
            return Err(EncodeError::TooManyGamepads(self.gamepads.len()));
        }
        Ok(KEY_BITMAP_LEN + gamepads_len(self.gamepads)?)
    }

    fn encode_into<S: ByteSink>(&self, sink: &mut S) -> Result<(), EncodeError> {
        reserve(sink, self.encoded_len()?)?;

        let mut w = FrameWriter::new(sink);
        let bitmap = self.keys.as_bytes();
        for &byte in &bitmap[..COUNT_BYTE] {
            w.write(byte)?;
        }
        w.write(bitmap[COUNT_BYTE] | ((self.gamepads.len() as u8) << 1))?;

        for pad in self.gamepads {
            let axes = pad.axes();
            let buttons = pad.buttons();
            w.write(axes.len() as u8)?;
            w.write(buttons.len() as u8)?;
            for &axis in axes {
                w.write(encode_axis_truncated(axis))?;
            }
            w.write_buttons(buttons)?;
        }

        w.finish_unframed()
    }
}

/// A parsed fixed-width packet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedWidthPacket<'a> {
    keys: KeyBitmap,
    gamepad_count: u8,
    gamepad_data: &'a [u8],
}

impl<'a> FixedWidthPacket<'a> {
    /// Parse a buffer holding exactly one fixed-width packet.
    ///
    /// # Errors
    ///
    /// [`DecodeError::Empty`] or [`DecodeError::Truncated`] if the bitmap or
    /// a gamepad is cut short, [`DecodeError::TrailingBytes`] if bytes follow
    /// the last gamepad.
    pub fn parse(bytes: &'a [u8]) -> Result<Self, DecodeError> {
        if bytes.is_empty() {
            return Err(DecodeError::Empty);
        }
        let mut cur = Cursor::new(bytes, 0);
        let mut bitmap = [0u8; KEY_BITMAP_LEN];
        bitmap.copy_from_slice(cur.take(KEY_BITMAP_LEN)?);
        let gamepad_count = bitmap[COUNT_BYTE] >> 1;

        let data_start = cur.position();
        for _ in 0..gamepad_count {
            GamepadLayout::CountsFirst.read(&mut cur)?;
        }
        let end = cur.position();
        if end < bytes.len() {
            return Err(DecodeError::TrailingBytes(bytes.len() - end));
        }

        Ok(Self {
            keys: KeyBitmap::from_bytes(bitmap),
            gamepad_count,
            gamepad_data: &bytes[data_start..end],
        })
    }

    #[inline]
    #[must_use]
    pub const fn keys(&self) -> &KeyBitmap {
        &self.keys
    }

    #[inline]
    #[must_use]
    pub const fn gamepad_count(&self) -> usize {
        self.gamepad_count as usize
    }

    #[must_use]
    pub fn gamepads(&self) -> GamepadIter<'a> {
        GamepadIter::new(self.gamepad_data, self.gamepad_count, GamepadLayout::CountsFirst)
    }
}
