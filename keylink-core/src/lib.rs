//! Owned input state, traits and async pipeline for the keylink protocol.
//!
//! This crate sits between [`keylink_proto`] (the pure packet codec) and
//! whatever hardware or application produces and consumes input. It has no
//! platform-specific dependencies and runs both in embedded `no_std` builds
//! and on host for testing.
//!
//! # Overview
//!
//! - [`state`]: fixed-capacity owned state ([`InputState`], [`GamepadState`])
//! - [`builder`]: fluent construction of states and packets ([`PacketBuilder`])
//! - [`input`]: input source trait ([`InputSource`])
//! - [`output`]: packet sink trait ([`PacketSink`])
//! - [`sender`]: orchestrates input-to-packet flow ([`PacketSender`])
//! - [`serial`]: `embedded-io-async` adapters ([`FramedInput`], [`WriteSink`])
//!
//! # Example
//!
//! ```rust
//! use keylink_core::{InputState, PacketBuilder};
//! use keylink_proto::{KeyCode, Packet};
//!
//! let mut buf = [0u8; 32];
//! let len = PacketBuilder::new()
//!     .key(KeyCode::ShiftLeft)
//!     .key(KeyCode::KeyQ)
//!     .encode(&mut buf)
//!     .unwrap();
//!
//! let packet = Packet::parse(&buf[..len]).unwrap();
//! let state = InputState::from_packet(&packet).unwrap();
//! assert!(state.is_pressed(KeyCode::KeyQ));
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Log through defmt and derive `defmt::Format` (embedded)
//! - **`log`**: Log through the `log` facade (host)
//!
//! `defmt` and `log` are mutually exclusive. With neither, logging compiles
//! away.
//!
//! # No-std Support
//!
//! This crate is `#![no_std]` by default and uses no heap allocations,
//! making it suitable for embedded systems with limited resources.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

// Must come first so the logging macros are visible to the other modules.
#[macro_use]
mod fmt;

pub mod builder;
pub mod input;
pub mod output;
pub mod sender;
pub mod serial;
pub mod state;

pub use keylink_proto as proto;

// Re-export main types at crate root
pub use builder::{BuildError, PacketBuilder};
pub use input::{InputError, InputSource};
pub use output::{OutputError, PacketSink};
pub use sender::{PacketSender, SenderConfig, SenderError, DEFAULT_SENDER_CONFIG};
pub use serial::{FramedInput, WriteSink};
pub use state::{
    GamepadState, InputState, StateError, MAX_AXES, MAX_BUTTONS, MAX_GAMEPADS, MAX_PACKET_LEN,
    MAX_PRESSED_KEYS,
};
