//! Packet assembly for keyboard and gamepad state.
//!
//! # Packet Format
//!
//! ```text
//! offset  size       meaning
//! 0       1          '#' (0x23) start sentinel
//! 1       1          pressed key count k
//! 2       k          one key code per pressed key, in input order
//! 2+k     1          gamepad count g
//!         per gamepad:
//!           1        axis count a
//!           a        axis bytes, -1..1 mapped to 0..255, 127 = centred
//!           1        button count b
//!           ceil(b/8) button bits, LSB first, unused high bits zero
//! last    1          '$' (0x24) end sentinel
//! ```
//!
//! The total length is `4 + k + sum(2 + a + ceil(b / 8))`. Every gamepad's
//! buttons start on a fresh byte.
//!
//! The end sentinel guards against the usual UART overflow pattern where a
//! packet is cut short and the tail of a later packet is appended to it: the
//! receiver computes where the packet must end from the counts and discards it
//! unless that byte is `$`. The start sentinel cannot do this job because `#`
//! is a legal key code and axis value. A truncated packet can still be
//! accepted when the bytes that follow happen to put a `$` exactly at the
//! expected end; [`WireFormat::Checked`] narrows that window with a CRC.
//!
//! # Example
//!
//! ```
//! use keylink_proto::{assemble, GamepadSnapshot, KeyCode};
//!
//! let pad = GamepadSnapshot::new(&[0.0, 1.0], &[true, false, true]);
//! let mut buf = [0u8; 32];
//! let len = assemble(&[KeyCode::KeyA], &[pad], &mut buf).unwrap();
//!
//! assert_eq!(&buf[..len], &[b'#', 1, 19, 1, 2, 127, 255, 3, 0b101, b'$']);
//! ```

use crate::axis::encode_axis;
use crate::crc::Crc8Digest;
use crate::keycode::KeyCode;
use crate::types::{Gamepad, InputFrame, WireFormat, END_SENTINEL, MAX_COUNT};

/// Error type for encoding operations.
///
/// Oversized inputs are rejected up front, before any byte is written, rather
/// than producing a packet whose counts have silently wrapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EncodeError {
    /// More than 255 pressed keys.
    TooManyKeys(usize),
    /// More gamepads than the format can count (255, or 127 for fixed-width).
    TooManyGamepads(usize),
    /// A gamepad has more than 255 axes.
    TooManyAxes { gamepad: usize, count: usize },
    /// A gamepad has more than 255 buttons.
    TooManyButtons { gamepad: usize, count: usize },
    /// The key has no slot in the fixed-width keyboard bitmap.
    KeyNotRepresentable(KeyCode),
    /// The output buffer cannot hold the packet.
    BufferTooSmall { needed: usize },
    /// The underlying writer failed.
    WriteError,
}

impl core::fmt::Display for EncodeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::TooManyKeys(n) => write!(f, "too many pressed keys ({n} > {MAX_COUNT})"),
            Self::TooManyGamepads(n) => write!(f, "too many gamepads ({n})"),
            Self::TooManyAxes { gamepad, count } => {
                write!(f, "gamepad {gamepad} has too many axes ({count} > {MAX_COUNT})")
            }
            Self::TooManyButtons { gamepad, count } => {
                write!(f, "gamepad {gamepad} has too many buttons ({count} > {MAX_COUNT})")
            }
            Self::KeyNotRepresentable(key) => write!(f, "key {key} cannot be encoded"),
            Self::BufferTooSmall { needed } => write!(f, "buffer too small ({needed} bytes needed)"),
            Self::WriteError => write!(f, "write error"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for EncodeError {}

/// Destination for encoded bytes.
///
/// Implemented for fixed buffers ([`SliceSink`]), `std` and `heapless`
/// vectors, and (through [`Encode::encode_io`]) `embedded_io` writers.
pub trait ByteSink {
    /// Append one byte.
    fn put(&mut self, byte: u8) -> Result<(), EncodeError>;

    /// Bytes that still fit, or `None` for an unbounded sink.
    fn remaining(&self) -> Option<usize> {
        None
    }

    /// Push out anything buffered. Called once after the last byte.
    fn flush(&mut self) -> Result<(), EncodeError> {
        Ok(())
    }
}

/// Writes into a fixed buffer from the start.
pub struct SliceSink<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> SliceSink<'a> {
    #[must_use]
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Bytes written so far.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }
}

impl ByteSink for SliceSink<'_> {
    fn remaining(&self) -> Option<usize> {
        Some(self.buf.len() - self.pos)
    }

    #[inline]
    fn put(&mut self, byte: u8) -> Result<(), EncodeError> {
        let slot = self
            .buf
            .get_mut(self.pos)
            .ok_or(EncodeError::BufferTooSmall { needed: self.pos + 1 })?;
        *slot = byte;
        self.pos += 1;
        Ok(())
    }
}

#[cfg(feature = "std")]
impl ByteSink for std::vec::Vec<u8> {
    #[inline]
    fn put(&mut self, byte: u8) -> Result<(), EncodeError> {
        self.push(byte);
        Ok(())
    }
}

#[cfg(feature = "heapless")]
impl<const N: usize> ByteSink for heapless::Vec<u8, N> {
    fn remaining(&self) -> Option<usize> {
        Some(N - self.len())
    }

    #[inline]
    fn put(&mut self, byte: u8) -> Result<(), EncodeError> {
        self.push(byte)
            .map_err(|_| EncodeError::BufferTooSmall { needed: N + 1 })
    }
}

/// Stages bytes and hands them to an `embedded_io` writer in chunks.
#[cfg(feature = "embedded-io")]
struct IoSink<'w, W> {
    writer: &'w mut W,
    staged: [u8; 32],
    len: usize,
}

#[cfg(feature = "embedded-io")]
impl<W: embedded_io::Write> IoSink<'_, W> {
    fn drain(&mut self) -> Result<(), EncodeError> {
        self.writer
            .write_all(&self.staged[..self.len])
            .map_err(|_| EncodeError::WriteError)?;
        self.len = 0;
        Ok(())
    }
}

#[cfg(feature = "embedded-io")]
impl<W: embedded_io::Write> ByteSink for IoSink<'_, W> {
    fn put(&mut self, byte: u8) -> Result<(), EncodeError> {
        if self.len == self.staged.len() {
            self.drain()?;
        }
        self.staged[self.len] = byte;
        self.len += 1;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), EncodeError> {
        self.drain()?;
        self.writer.flush().map_err(|_| EncodeError::WriteError)
    }
}

/// Writes packet bytes while accumulating the CRC of everything after the
/// start sentinel.
pub(crate) struct FrameWriter<'s, S> {
    sink: &'s mut S,
    crc: Crc8Digest,
}

impl<'s, S: ByteSink> FrameWriter<'s, S> {
    pub(crate) fn new(sink: &'s mut S) -> Self {
        Self {
            sink,
            crc: Crc8Digest::new(),
        }
    }

    /// Write a byte outside the checksummed region (sentinels).
    #[inline]
    pub(crate) fn write_raw(&mut self, byte: u8) -> Result<(), EncodeError> {
        self.sink.put(byte)
    }

    #[inline]
    pub(crate) fn write(&mut self, byte: u8) -> Result<(), EncodeError> {
        self.crc.update(byte);
        self.sink.put(byte)
    }

    /// Pack button states one bit each, LSB first, into `ceil(n / 8)` bytes.
    pub(crate) fn write_buttons(&mut self, buttons: &[bool]) -> Result<(), EncodeError> {
        for chunk in buttons.chunks(8) {
            let byte = chunk
                .iter()
                .enumerate()
                .fold(0u8, |acc, (bit, pressed)| acc | (u8::from(*pressed) << bit));
            self.write(byte)?;
        }
        Ok(())
    }

    /// Write the CRC (checked format only) and the end sentinel.
    pub(crate) fn finish(self, format: WireFormat) -> Result<(), EncodeError> {
        let Self { sink, crc } = self;
        if format == WireFormat::Checked {
            sink.put(crc.finalize())?;
        }
        sink.put(END_SENTINEL)?;
        sink.flush()
    }

    /// Flush without a trailer, for formats that have none.
    pub(crate) fn finish_unframed(self) -> Result<(), EncodeError> {
        self.sink.flush()
    }
}

/// Number of bytes needed for `count` packed buttons.
#[inline]
#[must_use]
pub const fn button_bytes(count: usize) -> usize {
    count.div_ceil(8)
}

/// Fail with the whole packet length if the sink cannot hold it.
pub(crate) fn reserve<S: ByteSink>(sink: &S, needed: usize) -> Result<(), EncodeError> {
    match sink.remaining() {
        Some(free) if free < needed => Err(EncodeError::BufferTooSmall { needed }),
        _ => Ok(()),
    }
}

/// Check every per-gamepad count and return the bytes the gamepads occupy,
/// count bytes included.
pub(crate) fn gamepads_len<G: Gamepad>(gamepads: &[G]) -> Result<usize, EncodeError> {
    gamepads.iter().enumerate().try_fold(0, |len, (i, pad)| {
        let axes = pad.axes().len();
        let buttons = pad.buttons().len();
        if axes > MAX_COUNT {
            return Err(EncodeError::TooManyAxes { gamepad: i, count: axes });
        }
        if buttons > MAX_COUNT {
            return Err(EncodeError::TooManyButtons { gamepad: i, count: buttons });
        }
        Ok(len + 2 + axes + button_bytes(buttons))
    })
}

/// Common encoding interface of every packet format in this crate.
///
/// Implementors provide the length calculation and a byte-at-a-time writer;
/// the output targets are built on top of those two.
pub trait Encode {
    /// Exact encoded size, after validating every count.
    ///
    /// # Errors
    ///
    /// Returns the first count that does not fit the format.
    fn encoded_len(&self) -> Result<usize, EncodeError>;

    /// Write the packet to `sink`.
    ///
    /// Inputs and the sink's free space are validated before the first byte
    /// is written.
    ///
    /// # Errors
    ///
    /// Returns a count error from validation,
    /// [`EncodeError::BufferTooSmall`] carrying the full packet length, or
    /// whatever the sink reports.
    fn encode_into<S: ByteSink>(&self, sink: &mut S) -> Result<(), EncodeError>;

    /// Encode into `buf`, returning the number of bytes written.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::BufferTooSmall`] (with nothing written) when
    /// `buf` is shorter than [`encoded_len`](Self::encoded_len).
    fn encode(&self, buf: &mut [u8]) -> Result<usize, EncodeError> {
        let needed = self.encoded_len()?;
        if buf.len() < needed {
            return Err(EncodeError::BufferTooSmall { needed });
        }
        let mut sink = SliceSink::new(buf);
        self.encode_into(&mut sink)?;
        Ok(sink.position())
    }

    /// Encode into a `heapless::Vec` of capacity `N`.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::BufferTooSmall`] if `N` is not large enough.
    #[cfg(feature = "heapless")]
    fn encode_to_vec<const N: usize>(&self) -> Result<heapless::Vec<u8, N>, EncodeError> {
        let needed = self.encoded_len()?;
        if needed > N {
            return Err(EncodeError::BufferTooSmall { needed });
        }
        let mut vec = heapless::Vec::new();
        self.encode_into(&mut vec)?;
        Ok(vec)
    }

    /// Encode straight to an `embedded_io::Write` implementation, such as a
    /// blocking UART, and flush it.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::WriteError`] if the writer fails. Bytes already
    /// handed to the writer are not recalled.
    #[cfg(feature = "embedded-io")]
    fn encode_io<W: embedded_io::Write>(&self, writer: &mut W) -> Result<usize, EncodeError> {
        let len = self.encoded_len()?;
        let mut sink = IoSink {
            writer,
            staged: [0u8; 32],
            len: 0,
        };
        self.encode_into(&mut sink)?;
        Ok(len)
    }

    /// Encode into a freshly allocated vector of exactly the packet's length.
    ///
    /// # Errors
    ///
    /// Returns a count error if the input does not fit the format.
    #[cfg(feature = "std")]
    fn to_bytes(&self) -> Result<std::vec::Vec<u8>, EncodeError> {
        let mut vec = std::vec::Vec::with_capacity(self.encoded_len()?);
        self.encode_into(&mut vec)?;
        Ok(vec)
    }
}

impl<G: Gamepad> Encode for InputFrame<'_, G> {
    fn encoded_len(&self) -> Result<usize, EncodeError> {
        if self.keys.len() > MAX_COUNT {
            return Err(EncodeError::TooManyKeys(self.keys.len()));
        }
        if self.gamepads.len() > MAX_COUNT {
            return Err(EncodeError::TooManyGamepads(self.gamepads.len()));
        }
        Ok(self.format.overhead() + self.keys.len() + gamepads_len(self.gamepads)?)
    }

    fn encode_into<S: ByteSink>(&self, sink: &mut S) -> Result<(), EncodeError> {
        reserve(sink, self.encoded_len()?)?;

        let mut w = FrameWriter::new(sink);
        w.write_raw(self.format.start_sentinel())?;

        // Counts were validated above, so these casts cannot truncate.
        w.write(self.keys.len() as u8)?;
        for key in self.keys {
            w.write(key.code())?;
        }

        w.write(self.gamepads.len() as u8)?;
        for pad in self.gamepads {
            let axes = pad.axes();
            w.write(axes.len() as u8)?;
            for &axis in axes {
                w.write(encode_axis(axis))?;
            }
            let buttons = pad.buttons();
            w.write(buttons.len() as u8)?;
            w.write_buttons(buttons)?;
        }

        w.finish(self.format)
    }
}

/// Length of the primary-format packet for these inputs.
///
/// # Errors
///
/// Returns the first count that exceeds 255.
pub fn packet_len<G: Gamepad>(keys: &[KeyCode], gamepads: &[G]) -> Result<usize, EncodeError> {
    InputFrame::new(keys, gamepads).encoded_len()
}

/// Assemble a primary-format packet into `buf`.
///
/// This is equivalent to `InputFrame::new(keys, gamepads).encode(buf)`.
///
/// # Errors
///
/// Returns a count error for oversized input, or
/// [`EncodeError::BufferTooSmall`] if `buf` is too short.
pub fn assemble<G: Gamepad>(
    keys: &[KeyCode],
    gamepads: &[G],
    buf: &mut [u8],
) -> Result<usize, EncodeError> {
    InputFrame::new(keys, gamepads).encode(buf)
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::crc::calculate_crc8;
    use crate::types::{GamepadSnapshot, START_SENTINEL};
    use std::vec;
    use std::vec::Vec;

    fn encode_vec<G: Gamepad>(frame: &InputFrame<'_, G>) -> Vec<u8> {
        let mut out = Vec::new();
        let mut buf = [0u8; 1024];
        let len = frame.encode(&mut buf).unwrap();
        out.extend_from_slice(&buf[..len]);
        out
    }

    #[test]
    fn test_empty_frame() {
        let frame: InputFrame<'_> = InputFrame::new(&[], &[]);
        assert_eq!(encode_vec(&frame), vec![0x23, 0x00, 0x00, 0x24]);
    }

    #[test]
    fn test_single_key() {
        let frame: InputFrame<'_> = InputFrame::new(&[KeyCode::KeyA], &[]);
        assert_eq!(encode_vec(&frame), vec![0x23, 0x01, 0x13, 0x00, 0x24]);
    }

    #[test]
    fn test_key_order_preserved() {
        let keys = [KeyCode::ShiftLeft, KeyCode::KeyQ, KeyCode::Backquote];
        let frame: InputFrame<'_> = InputFrame::new(&keys, &[]);
        assert_eq!(encode_vec(&frame), vec![b'#', 3, 60, 35, 0, 0, b'$']);
    }

    #[test]
    fn test_gamepad_axes_and_buttons() {
        let pads = [GamepadSnapshot::new(&[0.0, 1.0], &[true, false, true])];
        let frame = InputFrame::new(&[], &pads);
        assert_eq!(
            encode_vec(&frame),
            vec![b'#', 0, 1, 2, 127, 255, 3, 0b0000_0101, b'$']
        );
    }

    #[test]
    fn test_eight_buttons_fill_one_byte() {
        let buttons = [true; 8];
        let pads = [GamepadSnapshot::new(&[], &buttons)];
        let bytes = encode_vec(&InputFrame::new(&[], &pads));
        assert_eq!(bytes, vec![b'#', 0, 1, 0, 8, 0xFF, b'$']);
    }

    #[test]
    fn test_ninth_button_starts_second_byte() {
        let mut buttons = [false; 9];
        buttons[8] = true;
        let pads = [GamepadSnapshot::new(&[], &buttons)];
        let bytes = encode_vec(&InputFrame::new(&[], &pads));
        assert_eq!(bytes, vec![b'#', 0, 1, 0, 9, 0x00, 0x01, b'$']);
    }

    #[test]
    fn test_each_gamepad_starts_fresh_byte() {
        let pads = [
            GamepadSnapshot::new(&[], &[true, true, true]),
            GamepadSnapshot::new(&[-1.0], &[false, true]),
        ];
        let bytes = encode_vec(&InputFrame::new(&[], &pads));
        assert_eq!(
            bytes,
            vec![b'#', 0, 2, 0, 3, 0b111, 1, 0, 2, 0b10, b'$']
        );
    }

    #[test]
    fn test_gamepad_without_buttons_has_no_button_bytes() {
        let pads = [GamepadSnapshot::new(&[0.0], &[])];
        let bytes = encode_vec(&InputFrame::new(&[], &pads));
        assert_eq!(bytes, vec![b'#', 0, 1, 1, 127, 0, b'$']);
    }

    #[test]
    fn test_length_formula() {
        let keys = [KeyCode::KeyW, KeyCode::KeyA, KeyCode::KeyS];
        let buttons = [false; 17];
        let axes = [0.25f32; 4];
        let pads = [
            GamepadSnapshot::new(&axes, &buttons),
            GamepadSnapshot::new(&[], &[]),
        ];
        let expected = 4 + 3 + (2 + 4 + 3) + 2;
        assert_eq!(packet_len(&keys, &pads), Ok(expected));
        let bytes = encode_vec(&InputFrame::new(&keys, &pads));
        assert_eq!(bytes.len(), expected);
        assert_eq!(bytes[0], START_SENTINEL);
        assert_eq!(bytes[expected - 1], END_SENTINEL);
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let keys = [KeyCode::Space, KeyCode::ArrowLeft];
        let pads = [GamepadSnapshot::new(&[0.3, -0.7], &[true, false])];
        let frame = InputFrame::new(&keys, &pads);
        assert_eq!(encode_vec(&frame), encode_vec(&frame));
    }

    #[test]
    fn test_too_many_keys_rejected() {
        let keys = [KeyCode::KeyA; 256];
        let mut buf = [0xAAu8; 512];
        let frame: InputFrame<'_> = InputFrame::new(&keys, &[]);
        assert_eq!(frame.encode(&mut buf), Err(EncodeError::TooManyKeys(256)));
        assert!(buf.iter().all(|&b| b == 0xAA));
    }

    #[test]
    fn test_max_keys_accepted() {
        let keys = [KeyCode::KeyA; 255];
        let frame: InputFrame<'_> = InputFrame::new(&keys, &[]);
        assert_eq!(frame.encoded_len(), Ok(259));
        let bytes = encode_vec(&frame);
        assert_eq!(bytes[1], 255);
    }

    #[test]
    fn test_too_many_gamepads_rejected() {
        let pads = [GamepadSnapshot::default(); 256];
        let frame = InputFrame::new(&[], &pads);
        assert_eq!(frame.encoded_len(), Err(EncodeError::TooManyGamepads(256)));
    }

    #[test]
    fn test_too_many_axes_rejected() {
        let axes = [0.0f32; 256];
        let pads = [
            GamepadSnapshot::default(),
            GamepadSnapshot::new(&axes, &[]),
        ];
        let frame = InputFrame::new(&[], &pads);
        assert_eq!(
            frame.encoded_len(),
            Err(EncodeError::TooManyAxes { gamepad: 1, count: 256 })
        );
    }

    #[test]
    fn test_too_many_buttons_rejected() {
        let buttons = [false; 300];
        let pads = [GamepadSnapshot::new(&[], &buttons)];
        let frame = InputFrame::new(&[], &pads);
        assert_eq!(
            frame.encoded_len(),
            Err(EncodeError::TooManyButtons { gamepad: 0, count: 300 })
        );
    }

    #[test]
    fn test_buffer_too_small() {
        let mut buf = [0u8; 4];
        let result = assemble(&[KeyCode::KeyA], &[] as &[GamepadSnapshot<'_>], &mut buf);
        assert_eq!(result, Err(EncodeError::BufferTooSmall { needed: 5 }));
    }

    #[test]
    fn test_encode_into_reports_packet_length() {
        let pads = [GamepadSnapshot::new(&[0.5, -0.5], &[true; 9])];
        let frame = InputFrame::new(&[KeyCode::KeyA, KeyCode::KeyB], &pads);
        let needed = frame.encoded_len().unwrap();

        let mut buf = [0u8; 6];
        let mut sink = SliceSink::new(&mut buf);
        assert_eq!(
            frame.encode_into(&mut sink),
            Err(EncodeError::BufferTooSmall { needed })
        );
        assert_eq!(sink.position(), 0);
    }

    #[cfg(feature = "heapless")]
    #[test]
    fn test_encode_into_heapless_reports_packet_length() {
        let pads = [GamepadSnapshot::new(&[1.0; 4], &[])];
        let frame = InputFrame::new(&[KeyCode::KeyA], &pads);
        let mut vec: heapless::Vec<u8, 8> = heapless::Vec::new();
        assert_eq!(
            frame.encode_into(&mut vec),
            Err(EncodeError::BufferTooSmall { needed: 11 })
        );
        assert!(vec.is_empty());
    }

    #[test]
    fn test_checked_format_layout() {
        let pads = [GamepadSnapshot::new(&[1.0], &[true])];
        let frame =
            InputFrame::new(&[KeyCode::KeyB], &pads).with_format(WireFormat::Checked);
        let bytes = encode_vec(&frame);
        assert_eq!(bytes.len(), frame.encoded_len().unwrap());
        assert_eq!(bytes.len(), packet_len(&[KeyCode::KeyB], &pads).unwrap() + 1);
        assert_eq!(bytes[0], b'%');
        assert_eq!(*bytes.last().unwrap(), b'$');
        let crc_at = bytes.len() - 2;
        assert_eq!(bytes[crc_at], calculate_crc8(&bytes[1..crc_at]));
        assert_eq!(&bytes[1..crc_at], &[1, 20, 1, 1, 255, 1, 1]);
    }

    #[cfg(feature = "heapless")]
    #[test]
    fn test_encode_to_heapless_vec() {
        let frame: InputFrame<'_> = InputFrame::new(&[KeyCode::KeyA], &[]);
        let packet = frame.encode_to_vec::<8>().unwrap();
        assert_eq!(packet.as_slice(), &[b'#', 1, 19, 0, b'$']);
        assert_eq!(
            frame.encode_to_vec::<4>(),
            Err(EncodeError::BufferTooSmall { needed: 5 })
        );
    }

    #[cfg(feature = "embedded-io")]
    #[test]
    fn test_encode_to_writer() {
        let pads = [GamepadSnapshot::new(&[1.0], &[])];
        let frame = InputFrame::new(&[], &pads);
        let mut out = [0u8; 16];
        let mut writer: &mut [u8] = &mut out;
        assert_eq!(frame.encode_io(&mut writer), Ok(7));
        assert_eq!(&out[..7], &[b'#', 0, 1, 1, 255, 0, b'$']);
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_to_bytes() {
        let frame: InputFrame<'_> = InputFrame::new(&[KeyCode::Digit1, KeyCode::Digit2], &[]);
        let bytes = frame.to_bytes().unwrap();
        assert_eq!(bytes, [b'#', 2, 6, 7, 0, b'$']);
    }

    #[test]
    fn test_display_messages() {
        let msg = std::format!("{}", EncodeError::TooManyKeys(300));
        assert_eq!(msg, "too many pressed keys (300 > 255)");
        let msg = std::format!("{}", EncodeError::KeyNotRepresentable(KeyCode::NumpadSubtract));
        assert_eq!(msg, "key NumpadSubtract cannot be encoded");
    }
}
