//! PacketSender: connects an input source to a packet sink.

use keylink_proto::{Encode, EncodeError, GamepadSnapshot, InputFrame, WireFormat};

use crate::input::{InputError, InputSource};
use crate::output::{OutputError, PacketSink};
use crate::state::MAX_PACKET_LEN;

/// Sender behaviour, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SenderConfig {
    /// Framing used for every packet.
    pub format: WireFormat,
    /// Send an empty packet when the input source fails, so the receiver
    /// releases every key instead of holding the last state.
    pub release_on_error: bool,
}

/// Primary framing, release on error.
pub const DEFAULT_SENDER_CONFIG: SenderConfig = SenderConfig {
    format: WireFormat::Framed,
    release_on_error: true,
};

impl Default for SenderConfig {
    fn default() -> Self {
        DEFAULT_SENDER_CONFIG
    }
}

/// Forwards input state from an input source to a packet sink, encoding
/// each snapshot on the way.
///
/// # Error Handling
///
/// On input errors the sender (by default) transmits an all-released packet to
/// prevent stuck keys on the receiving side. Errors are logged.
pub struct PacketSender<I, O> {
    input: I,
    output: O,
    config: SenderConfig,
}

impl<I: InputSource, O: PacketSink> PacketSender<I, O> {
    /// Create a sender with [`DEFAULT_SENDER_CONFIG`].
    pub fn new(input: I, output: O) -> Self {
        Self::with_config(input, output, DEFAULT_SENDER_CONFIG)
    }

    pub fn with_config(input: I, output: O, config: SenderConfig) -> Self {
        Self {
            input,
            output,
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &SenderConfig {
        &self.config
    }

    /// Run the sender, forwarding input state indefinitely.
    ///
    /// This method never returns under normal operation.
    pub async fn run(&mut self) -> ! {
        loop {
            let _ = self.process_one().await;
        }
    }

    /// Wait for one input state, encode it and send it.
    ///
    /// Returns the packet length on success.
    pub async fn process_one(&mut self) -> Result<usize, SenderError> {
        match self.input.poll().await {
            Ok(state) => {
                let packet = state
                    .frame(self.config.format)
                    .encode_to_vec::<MAX_PACKET_LEN>()
                    .map_err(|e| {
                        error!("Encode error: {:?}", e);
                        SenderError::Encode(e)
                    })?;
                trace!("Sending {} byte packet", packet.len());
                self.output.send(&packet).await.map_err(|e| {
                    error!("Output error: {:?}", e);
                    SenderError::Output(e)
                })?;
                Ok(packet.len())
            }
            Err(e) => {
                error!("Input error: {:?}", e);
                if self.config.release_on_error {
                    let _ = self.release_all().await;
                }
                Err(SenderError::Input(e))
            }
        }
    }

    /// Send the packet with no keys and no gamepads.
    pub async fn release_all(&mut self) -> Result<(), SenderError> {
        let frame: InputFrame<'_, GamepadSnapshot<'_>> =
            InputFrame::new(&[], &[]).with_format(self.config.format);
        let mut buf = [0u8; 5];
        let len = frame.encode(&mut buf).map_err(SenderError::Encode)?;
        debug!("Releasing all inputs");
        self.output
            .send(&buf[..len])
            .await
            .map_err(SenderError::Output)
    }

    /// Get a reference to the input source.
    pub fn input(&self) -> &I {
        &self.input
    }

    /// Get a mutable reference to the input source.
    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    /// Get a reference to the packet sink.
    pub fn output(&self) -> &O {
        &self.output
    }

    /// Get a mutable reference to the packet sink.
    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }

    /// Decompose the sender into its input and output components.
    pub fn into_parts(self) -> (I, O) {
        (self.input, self.output)
    }
}

/// Error type for sender operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SenderError {
    /// Error from the input source.
    Input(InputError),
    /// Error from the packet sink.
    Output(OutputError),
    /// The state could not be encoded.
    Encode(EncodeError),
}

impl core::fmt::Display for SenderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Input(e) => write!(f, "{e}"),
            Self::Output(e) => write!(f, "{e}"),
            Self::Encode(e) => write!(f, "encode error: {e}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SenderError {}
