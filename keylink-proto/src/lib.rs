//! Wire protocol for sending keyboard and gamepad state over a serial link.
//!
//! A sender (typically a browser or desktop app capturing input) turns the set
//! of pressed keys and the readings of every connected gamepad into a compact
//! byte packet. A microcontroller at the other end of a UART reads the stream
//! byte by byte and reconstructs the state, for example to present itself to a
//! host as a USB keyboard and gamepad.
//!
//! This crate provides:
//!
//! - **Key codes**: the fixed table from physical key positions to wire codes
//!   - [`KeyCode`] - one variant per key, named after `KeyboardEvent.code`
//!
//! - **Encoding**: packet assembly
//!   - [`assemble()`] / [`packet_len()`] - primary format in one call
//!   - [`InputFrame`] + [`Encode`] - the same, with a choice of output target
//!     and [`WireFormat`]
//!
//! - **Decoding**: the receiving side
//!   - [`Packet::parse()`] - validate one complete packet
//!   - [`PacketReceiver`] - find packets in a byte stream
//!
//! - **Legacy**: [`fixed_width`] keeps the superseded bitmap format
//!
//! # Packet Format
//!
//! ```text
//! '#' k key[0..k] g { a axis[0..a] b buttons[0..ceil(b/8)] } * g '$'
//! ```
//!
//! Every field is one byte. Axes map `-1.0..=1.0` to `0..=255` with `127` for
//! a centred stick; buttons are packed eight to a byte, least significant bit
//! first. See [`encode`] for the full layout.
//!
//! [`WireFormat::Checked`] packets start with `%` instead of `#` and carry a
//! CRC-8/SMBUS byte just before the `$`.
//!
//! # Examples
//!
//! ## Sending
//!
//! ```
//! use keylink_proto::{Encode, GamepadSnapshot, InputFrame, KeyCode, WireFormat};
//!
//! let keys = [KeyCode::ShiftLeft, KeyCode::KeyH];
//! let pad = GamepadSnapshot::new(&[0.0, 0.0, -1.0, 0.0], &[false, true]);
//!
//! let pads = [pad];
//! let mut buf = [0u8; 64];
//! let len = InputFrame::new(&keys, &pads).encode(&mut buf).unwrap();
//! assert_eq!(buf[0], b'#');
//! assert_eq!(buf[len - 1], b'$');
//!
//! let checked = InputFrame::new(&keys, &pads).with_format(WireFormat::Checked);
//! assert_eq!(checked.encoded_len(), Ok(len + 1));
//! ```
//!
//! ## Receiving
//!
//! ```
//! use keylink_proto::{KeyCode, PacketReceiver, Received};
//!
//! let mut rx: PacketReceiver<64> = PacketReceiver::new();
//! for &byte in &[b'#', 1, 62, 1, 1, 255, 0, b'$'] {
//!     if let Ok(Received::Packet(packet)) = rx.push_byte(byte) {
//!         assert!(packet.is_pressed(KeyCode::Space));
//!         let pad = packet.gamepads().next().unwrap();
//!         assert_eq!(pad.axis(0), Some(1.0));
//!     }
//! }
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (`to_bytes()`, `std::error::Error`)
//! - **`defmt`**: Enable defmt formatting (for embedded logging)
//! - **`heapless`**: Enable `encode_to_vec()` methods
//! - **`embedded-io`**: Enable `encode_io()` methods for I/O peripherals
//!
//! # No-std Support
//!
//! This crate is `#![no_std]` by default and uses no heap allocations,
//! making it suitable for embedded systems with limited resources.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod axis;
pub mod crc;
pub mod decode;
pub mod encode;
pub mod fixed_width;
pub mod keycode;
pub mod receiver;
pub mod types;

// Re-export types at crate root for convenience
pub use axis::{decode_axis, encode_axis, AXIS_NEUTRAL};
pub use crc::{calculate_crc8, Crc8Digest};
pub use decode::{DecodeError, GamepadIter, GamepadView, Packet};
pub use encode::{assemble, button_bytes, packet_len, ByteSink, Encode, EncodeError, SliceSink};
pub use fixed_width::{FixedWidthFrame, FixedWidthPacket, KeyBitmap};
pub use keycode::{KeyCode, KEY_COUNT};
pub use receiver::{
    FrameError, PacketReceiver, ReceiverStats, Received, DEFAULT_RECEIVER_CAPACITY,
};
pub use types::{
    Gamepad, GamepadSnapshot, InputFrame, WireFormat, CHECKED_START_SENTINEL, END_SENTINEL,
    MAX_COUNT, START_SENTINEL,
};
