//! Byte-at-a-time packet framing for a UART stream.
//!
//! The receiver waits for a start sentinel, follows the counts to work out
//! where the packet must end, and only hands the packet out if that byte is
//! the end sentinel. Anything received while idle is reported as a stray byte
//! so a caller sharing the line with ordinary text can pass it through.
//!
//! When the expected end byte is wrong but is itself a start sentinel, it is
//! taken as the beginning of the next packet. This recovers the common case of
//! a packet cut short by a dropped byte.

use crate::decode::{DecodeError, Packet};
use crate::encode::button_bytes;
use crate::types::{WireFormat, END_SENTINEL};

/// Receive buffer size that holds every packet a typical sender produces
/// (a full keyboard rollover plus a few standard-mapping gamepads).
pub const DEFAULT_RECEIVER_CAPACITY: usize = 256;

/// Outcome of feeding one byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Received<'a> {
    /// The byte belongs to a packet that is not complete yet.
    Pending,
    /// The byte arrived outside any packet.
    Stray(u8),
    /// The byte completed a valid packet.
    Packet(Packet<'a>),
}

/// A frame was abandoned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// The byte where the packet had to end was not `$`.
    BadEnd(u8),
    /// The packet does not fit the receive buffer.
    Overflow,
    /// The complete frame failed validation.
    Decode(DecodeError),
}

impl From<DecodeError> for FrameError {
    fn from(e: DecodeError) -> Self {
        match e {
            DecodeError::BadEnd(b) => Self::BadEnd(b),
            other => Self::Decode(other),
        }
    }
}

impl core::fmt::Display for FrameError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::BadEnd(b) => write!(f, "expected end sentinel, got 0x{b:02X}"),
            Self::Overflow => write!(f, "packet exceeds receive buffer"),
            Self::Decode(e) => write!(f, "{e}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FrameError {}

/// Running counters kept by a [`PacketReceiver`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ReceiverStats {
    /// Packets delivered.
    pub packets: u32,
    /// Frames abandoned with a [`FrameError`].
    pub rejected: u32,
    /// Bytes seen outside any frame.
    pub stray: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Idle,
    KeyCount,
    Keys { remaining: u8 },
    GamepadCount,
    AxisCount { pads_left: u8 },
    Axes { pads_left: u8, remaining: u8 },
    ButtonCount { pads_left: u8 },
    Buttons { pads_left: u8, remaining: usize },
    Checksum,
    End,
}

/// Streaming packet receiver with an `N`-byte frame buffer.
///
/// ```
/// use keylink_proto::{KeyCode, PacketReceiver, Received};
///
/// let mut rx: PacketReceiver<64> = PacketReceiver::new();
/// let mut pressed = None;
/// for &b in b"hi#\x01\x13\x00$" {
///     if let Ok(Received::Packet(p)) = rx.push_byte(b) {
///         pressed = Some(p.is_pressed(KeyCode::KeyA));
///     }
/// }
/// assert_eq!(pressed, Some(true));
/// assert_eq!(rx.stats().stray, 2);
/// ```
pub struct PacketReceiver<const N: usize = DEFAULT_RECEIVER_CAPACITY> {
    buffer: [u8; N],
    pos: usize,
    format: WireFormat,
    state: State,
    stats: ReceiverStats,
}

impl<const N: usize> PacketReceiver<N> {
    /// Room for the shortest packet, `# 0 0 $`.
    const MIN_CAPACITY: () = assert!(N >= 4, "receiver capacity must be at least 4 bytes");

    /// An idle receiver.
    ///
    /// A capacity below the shortest packet is rejected at compile time:
    ///
    /// ```compile_fail
    /// use keylink_proto::PacketReceiver;
    ///
    /// let rx: PacketReceiver<0> = PacketReceiver::new();
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        let () = Self::MIN_CAPACITY;
        Self {
            buffer: [0u8; N],
            pos: 0,
            format: WireFormat::Framed,
            state: State::Idle,
            stats: ReceiverStats {
                packets: 0,
                rejected: 0,
                stray: 0,
            },
        }
    }

    /// Drop any partial frame. Counters are kept.
    pub fn reset(&mut self) {
        self.pos = 0;
        self.state = State::Idle;
    }

    /// True when no frame is in progress.
    #[inline]
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.state == State::Idle
    }

    #[inline]
    #[must_use]
    pub const fn stats(&self) -> ReceiverStats {
        self.stats
    }

    /// Feed one byte from the line.
    ///
    /// # Errors
    ///
    /// Returns a [`FrameError`] when the frame in progress is abandoned. The
    /// receiver is ready for the next byte either way.
    pub fn push_byte(&mut self, byte: u8) -> Result<Received<'_>, FrameError> {
        if self.state == State::Idle {
            match WireFormat::from_start_sentinel(byte) {
                Some(format) => self.begin(format),
                None => {
                    self.stats.stray = self.stats.stray.wrapping_add(1);
                    return Ok(Received::Stray(byte));
                }
            }
            return Ok(Received::Pending);
        }

        if self.state == State::End {
            return self.end(byte);
        }

        if self.pos >= N {
            self.reject();
            return Err(FrameError::Overflow);
        }
        self.buffer[self.pos] = byte;
        self.pos += 1;

        self.state = match self.state {
            State::KeyCount if byte == 0 => State::GamepadCount,
            State::KeyCount => State::Keys { remaining: byte },
            State::Keys { remaining: 1 } => State::GamepadCount,
            State::Keys { remaining } => State::Keys {
                remaining: remaining - 1,
            },
            State::GamepadCount if byte == 0 => self.after_payload(),
            State::GamepadCount => State::AxisCount { pads_left: byte },
            State::AxisCount { pads_left } if byte == 0 => State::ButtonCount { pads_left },
            State::AxisCount { pads_left } => State::Axes {
                pads_left,
                remaining: byte,
            },
            State::Axes {
                pads_left,
                remaining: 1,
            } => State::ButtonCount { pads_left },
            State::Axes {
                pads_left,
                remaining,
            } => State::Axes {
                pads_left,
                remaining: remaining - 1,
            },
            State::ButtonCount { pads_left } => match button_bytes(usize::from(byte)) {
                0 => self.next_gamepad(pads_left),
                remaining => State::Buttons {
                    pads_left,
                    remaining,
                },
            },
            State::Buttons {
                pads_left,
                remaining: 1,
            } => self.next_gamepad(pads_left),
            State::Buttons {
                pads_left,
                remaining,
            } => State::Buttons {
                pads_left,
                remaining: remaining - 1,
            },
            State::Checksum => State::End,
            State::Idle | State::End => State::Idle,
        };
        Ok(Received::Pending)
    }

    fn begin(&mut self, format: WireFormat) {
        self.buffer[0] = format.start_sentinel();
        self.pos = 1;
        self.format = format;
        self.state = State::KeyCount;
    }

    fn after_payload(&self) -> State {
        match self.format {
            WireFormat::Framed => State::End,
            WireFormat::Checked => State::Checksum,
        }
    }

    fn next_gamepad(&self, pads_left: u8) -> State {
        match pads_left {
            0 | 1 => self.after_payload(),
            n => State::AxisCount { pads_left: n - 1 },
        }
    }

    fn reject(&mut self) {
        self.stats.rejected = self.stats.rejected.wrapping_add(1);
        self.reset();
    }

    fn end(&mut self, byte: u8) -> Result<Received<'_>, FrameError> {
        if byte != END_SENTINEL {
            self.reject();
            if let Some(format) = WireFormat::from_start_sentinel(byte) {
                self.begin(format);
            }
            return Err(FrameError::BadEnd(byte));
        }
        if self.pos >= N {
            self.reject();
            return Err(FrameError::Overflow);
        }
        self.buffer[self.pos] = byte;
        let len = self.pos + 1;
        self.reset();

        match Packet::parse(&self.buffer[..len]) {
            Ok(packet) => {
                self.stats.packets = self.stats.packets.wrapping_add(1);
                Ok(Received::Packet(packet))
            }
            Err(e) => {
                self.stats.rejected = self.stats.rejected.wrapping_add(1);
                Err(e.into())
            }
        }
    }
}

impl<const N: usize> Default for PacketReceiver<N> {
    fn default() -> Self {
        Self::new()
    }
}
