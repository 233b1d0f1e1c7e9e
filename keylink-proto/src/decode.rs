//! Zero-copy parsing of complete packets.
//!
//! [`Packet::parse`] validates the framing of a buffer that holds exactly one
//! packet and then hands out views into it. For byte streams see
//! [`PacketReceiver`](crate::receiver::PacketReceiver), which finds packet
//! boundaries first.

use crate::axis::decode_axis;
use crate::crc::calculate_crc8;
use crate::encode::button_bytes;
use crate::keycode::KeyCode;
use crate::types::{WireFormat, END_SENTINEL};

/// Error type for packet parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    /// No bytes at all.
    Empty,
    /// The first byte is not a start sentinel.
    BadStart(u8),
    /// The counts point past the end of the buffer.
    Truncated,
    /// The byte where the packet must end is not `$`.
    BadEnd(u8),
    /// Bytes remain after the end sentinel.
    TrailingBytes(usize),
    /// The CRC of a checked packet does not match its payload.
    Checksum { expected: u8, actual: u8 },
}

impl core::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Empty => write!(f, "empty packet"),
            Self::BadStart(b) => write!(f, "bad start byte 0x{b:02X}"),
            Self::Truncated => write!(f, "truncated packet"),
            Self::BadEnd(b) => write!(f, "bad end byte 0x{b:02X}"),
            Self::TrailingBytes(n) => write!(f, "{n} trailing bytes after end sentinel"),
            Self::Checksum { expected, actual } => {
                write!(f, "checksum mismatch: expected 0x{expected:02X}, got 0x{actual:02X}")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DecodeError {}

/// Forward-only reader over a byte slice.
#[derive(Clone, Copy)]
pub(crate) struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) const fn new(bytes: &'a [u8], pos: usize) -> Self {
        Self { bytes, pos }
    }

    pub(crate) const fn position(&self) -> usize {
        self.pos
    }

    pub(crate) fn read_u8(&mut self) -> Result<u8, DecodeError> {
        let byte = *self.bytes.get(self.pos).ok_or(DecodeError::Truncated)?;
        self.pos += 1;
        Ok(byte)
    }

    pub(crate) fn take(&mut self, n: usize) -> Result<&'a [u8], DecodeError> {
        let end = self.pos + n;
        let slice = self.bytes.get(self.pos..end).ok_or(DecodeError::Truncated)?;
        self.pos = end;
        Ok(slice)
    }
}

/// Order of the per-gamepad fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum GamepadLayout {
    /// axis count, axes, button count, buttons
    Interleaved,
    /// axis count, button count, axes, buttons
    CountsFirst,
}

impl GamepadLayout {
    /// Read one gamepad starting at the cursor.
    pub(crate) fn read<'a>(self, cur: &mut Cursor<'a>) -> Result<GamepadView<'a>, DecodeError> {
        match self {
            Self::Interleaved => {
                let axis_count = cur.read_u8()?;
                let axis_bytes = cur.take(usize::from(axis_count))?;
                let button_count = cur.read_u8()?;
                let button_bits = cur.take(button_bytes(usize::from(button_count)))?;
                Ok(GamepadView::new(axis_bytes, button_count, button_bits))
            }
            Self::CountsFirst => {
                let axis_count = cur.read_u8()?;
                let button_count = cur.read_u8()?;
                let axis_bytes = cur.take(usize::from(axis_count))?;
                let button_bits = cur.take(button_bytes(usize::from(button_count)))?;
                Ok(GamepadView::new(axis_bytes, button_count, button_bits))
            }
        }
    }
}

/// A validated primary or checked packet borrowed from a buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Packet<'a> {
    format: WireFormat,
    keys: &'a [u8],
    gamepad_count: u8,
    gamepad_data: &'a [u8],
    len: usize,
}

impl<'a> Packet<'a> {
    /// Parse a buffer holding exactly one packet.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::TrailingBytes`] if anything follows the end
    /// sentinel, otherwise any framing error from
    /// [`parse_prefix`](Self::parse_prefix).
    ///
    /// # Example
    ///
    /// ```
    /// use keylink_proto::{KeyCode, Packet};
    ///
    /// let packet = Packet::parse(&[b'#', 1, 19, 0, b'$']).unwrap();
    /// assert!(packet.is_pressed(KeyCode::KeyA));
    /// assert_eq!(packet.gamepad_count(), 0);
    /// ```
    pub fn parse(bytes: &'a [u8]) -> Result<Self, DecodeError> {
        let packet = Self::parse_prefix(bytes)?;
        match bytes.len() - packet.len {
            0 => Ok(packet),
            extra => Err(DecodeError::TrailingBytes(extra)),
        }
    }

    /// Parse the packet at the start of `bytes`, ignoring what follows it.
    /// [`len`](Self::len) tells how many bytes it took.
    ///
    /// # Errors
    ///
    /// Returns the first framing problem found. The end sentinel is checked
    /// before the CRC, so a misaligned checked packet reports
    /// [`DecodeError::BadEnd`] rather than a checksum error.
    pub fn parse_prefix(bytes: &'a [u8]) -> Result<Self, DecodeError> {
        let first = *bytes.first().ok_or(DecodeError::Empty)?;
        let format = WireFormat::from_start_sentinel(first).ok_or(DecodeError::BadStart(first))?;

        let mut cur = Cursor::new(bytes, 1);
        let key_count = cur.read_u8()?;
        let keys = cur.take(usize::from(key_count))?;
        let gamepad_count = cur.read_u8()?;

        let data_start = cur.position();
        for _ in 0..gamepad_count {
            GamepadLayout::Interleaved.read(&mut cur)?;
        }
        let payload_end = cur.position();
        let gamepad_data = &bytes[data_start..payload_end];

        let crc = match format {
            WireFormat::Checked => Some(cur.read_u8()?),
            WireFormat::Framed => None,
        };

        let end = cur.read_u8()?;
        if end != END_SENTINEL {
            return Err(DecodeError::BadEnd(end));
        }

        if let Some(actual) = crc {
            let expected = calculate_crc8(&bytes[1..payload_end]);
            if expected != actual {
                return Err(DecodeError::Checksum { expected, actual });
            }
        }

        Ok(Self {
            format,
            keys,
            gamepad_count,
            gamepad_data,
            len: cur.position(),
        })
    }

    /// Framing variant the packet arrived in.
    #[inline]
    #[must_use]
    pub const fn format(&self) -> WireFormat {
        self.format
    }

    /// Encoded length, sentinels included.
    #[inline]
    #[must_use]
    #[allow(clippy::len_without_is_empty)]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[inline]
    #[must_use]
    pub const fn key_count(&self) -> usize {
        self.keys.len()
    }

    /// Raw key code bytes in wire order.
    #[inline]
    #[must_use]
    pub const fn key_bytes(&self) -> &'a [u8] {
        self.keys
    }

    /// Pressed keys in wire order. Codes outside the key table are passed
    /// through as `Err(code)` so newer senders stay readable.
    pub fn keys(&self) -> impl Iterator<Item = Result<KeyCode, u8>> + 'a {
        let keys = self.keys;
        keys.iter().map(|&code| KeyCode::try_from(code))
    }

    #[must_use]
    pub fn is_pressed(&self, key: KeyCode) -> bool {
        self.keys.contains(&key.code())
    }

    #[inline]
    #[must_use]
    pub const fn gamepad_count(&self) -> usize {
        self.gamepad_count as usize
    }

    /// Gamepads in wire order.
    #[must_use]
    pub fn gamepads(&self) -> GamepadIter<'a> {
        GamepadIter::new(self.gamepad_data, self.gamepad_count, GamepadLayout::Interleaved)
    }
}

/// Iterator over the gamepads of a parsed packet.
#[derive(Clone)]
pub struct GamepadIter<'a> {
    cursor: Cursor<'a>,
    remaining: u8,
    layout: GamepadLayout,
}

impl<'a> GamepadIter<'a> {
    pub(crate) const fn new(data: &'a [u8], count: u8, layout: GamepadLayout) -> Self {
        Self {
            cursor: Cursor::new(data, 0),
            remaining: count,
            layout,
        }
    }
}

impl<'a> Iterator for GamepadIter<'a> {
    type Item = GamepadView<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        // The data was walked during parsing, so this only fails on a
        // hand-built iterator.
        self.layout.read(&mut self.cursor).ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = usize::from(self.remaining);
        (n, Some(n))
    }
}

impl ExactSizeIterator for GamepadIter<'_> {}

/// One gamepad's section of a packet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GamepadView<'a> {
    axis_bytes: &'a [u8],
    button_count: u8,
    button_bits: &'a [u8],
}

impl<'a> GamepadView<'a> {
    const fn new(axis_bytes: &'a [u8], button_count: u8, button_bits: &'a [u8]) -> Self {
        Self {
            axis_bytes,
            button_count,
            button_bits,
        }
    }

    #[inline]
    #[must_use]
    pub const fn axis_count(&self) -> usize {
        self.axis_bytes.len()
    }

    /// Quantized axis bytes as sent.
    #[inline]
    #[must_use]
    pub const fn axis_bytes(&self) -> &'a [u8] {
        self.axis_bytes
    }

    /// Axis reading `index`, decoded back to `[-1.0, 1.0]`.
    #[must_use]
    pub fn axis(&self, index: usize) -> Option<f32> {
        self.axis_bytes.get(index).copied().map(decode_axis)
    }

    pub fn axes(&self) -> impl Iterator<Item = f32> + 'a {
        let bytes = self.axis_bytes;
        bytes.iter().copied().map(decode_axis)
    }

    #[inline]
    #[must_use]
    pub const fn button_count(&self) -> usize {
        self.button_count as usize
    }

    /// Packed button bytes as sent, LSB first.
    #[inline]
    #[must_use]
    pub const fn button_bytes(&self) -> &'a [u8] {
        self.button_bits
    }

    /// Whether button `index` is pressed, or `None` past the button count.
    #[must_use]
    pub fn button(&self, index: usize) -> Option<bool> {
        if index >= self.button_count() {
            return None;
        }
        let byte = self.button_bits.get(index / 8)?;
        Some(byte & (1 << (index % 8)) != 0)
    }

    pub fn buttons(&self) -> impl Iterator<Item = bool> + 'a {
        let bits = self.button_bits;
        (0..self.button_count()).map(move |i| bits[i / 8] & (1 << (i % 8)) != 0)
    }
}
