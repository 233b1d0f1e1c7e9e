//! Serial adapters: packet framing over any `embedded-io-async` stream.
//!
//! [`FramedInput`] is the receiving end. It reads whatever the UART driver has
//! buffered, feeds it through a [`PacketReceiver`] and yields one
//! [`InputState`] per valid packet. [`WriteSink`] is the sending end.

use embedded_io_async::{Read, Write};
use keylink_proto::{PacketReceiver, Received, DEFAULT_RECEIVER_CAPACITY};

use crate::input::{InputError, InputSource};
use crate::output::{OutputError, PacketSink};
use crate::state::InputState;

/// Bytes requested from the reader per call.
const READ_CHUNK: usize = 32;

/// Input source that decodes packets from a byte stream.
///
/// Stray bytes between packets are skipped. A rejected frame is returned as
/// an error once; the next call continues with the following bytes.
pub struct FramedInput<R, const N: usize = DEFAULT_RECEIVER_CAPACITY> {
    reader: R,
    receiver: PacketReceiver<N>,
    chunk: [u8; READ_CHUNK],
    chunk_len: usize,
    chunk_pos: usize,
    connected: bool,
}

impl<R: Read, const N: usize> FramedInput<R, N> {
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            receiver: PacketReceiver::new(),
            chunk: [0u8; READ_CHUNK],
            chunk_len: 0,
            chunk_pos: 0,
            connected: true,
        }
    }

    /// Framing statistics so far.
    #[inline]
    #[must_use]
    pub fn receiver(&self) -> &PacketReceiver<N> {
        &self.receiver
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

    async fn next_byte(&mut self) -> Result<u8, InputError> {
        if self.chunk_pos == self.chunk_len {
            let n = self.reader.read(&mut self.chunk).await.map_err(|_| {
                error!("Serial read failed");
                InputError::Io
            })?;
            if n == 0 {
                self.connected = false;
                return Err(InputError::Disconnected);
            }
            self.chunk_len = n;
            self.chunk_pos = 0;
        }
        let byte = self.chunk[self.chunk_pos];
        self.chunk_pos += 1;
        Ok(byte)
    }
}

impl<R: Read, const N: usize> InputSource for FramedInput<R, N> {
    async fn poll(&mut self) -> Result<InputState, InputError> {
        loop {
            let byte = self.next_byte().await?;
            match self.receiver.push_byte(byte) {
                Ok(Received::Packet(packet)) => {
                    trace!("Received {} byte packet", packet.len());
                    return InputState::from_packet(&packet).map_err(InputError::from);
                }
                Ok(Received::Stray(b)) => trace!("Stray byte 0x{:02x}", b),
                Ok(Received::Pending) => {}
                Err(e) => {
                    warn!("Rejected frame: {:?}", e);
                    return Err(e.into());
                }
            }
        }
    }

    fn is_connected(&self) -> bool {
        self.connected
    }
}

/// Packet sink that writes each packet to an `embedded-io-async` writer and
/// flushes it.
pub struct WriteSink<W> {
    writer: W,
}

impl<W: Write> WriteSink<W> {
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> PacketSink for WriteSink<W> {
    async fn send(&mut self, packet: &[u8]) -> Result<(), OutputError> {
        self.writer
            .write_all(packet)
            .await
            .map_err(|_| OutputError::Io)?;
        self.writer.flush().await.map_err(|_| OutputError::Io)
    }

    fn is_ready(&self) -> bool {
        true
    }
}
