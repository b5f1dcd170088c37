use rfidlink_port::SerialPort;
use tracing::debug;

use crate::channel::{Channel, ChannelConfig};
use crate::command::{HEADER0, HEADER1};
use crate::error::{FrameError, Result};

/// Bytes of a binary frame not covered by the declared count: two headers,
/// the count byte, the checksum, plus one spare slot. The count bound
/// `capacity - FRAME_MARGIN` keeps the whole frame inside the buffer.
const FRAME_MARGIN: usize = 5;

/// Terminators recognized by a line reader unless overridden.
pub const DEFAULT_TERMINATORS: [u8; 3] = [b'\n', b'\r', 0];

/// Outcome of a single poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Poll {
    /// No complete frame yet; possibly no byte was pending at all.
    Pending,
    /// A complete frame of this many valid bytes sits at the start of the
    /// buffer.
    Complete(usize),
}

/// Reads length-prefixed, checksummed binary frames from a reader module.
///
/// The automaton is keyed by the cursor: header byte 0, header byte 1, the
/// count, then count command+payload bytes, then the checksum. Each `poll`
/// moves at most one byte and never blocks; a mismatch anywhere resets the
/// reader and surfaces the corresponding [`FrameError`].
pub struct BinaryFrameReader<P> {
    port: P,
    channel: Channel,
    /// Declared command+payload byte count; 0 until the length byte arrives.
    count: usize,
}

impl<P: SerialPort> BinaryFrameReader<P> {
    pub fn new(port: P, config: ChannelConfig) -> Self {
        Self {
            port,
            channel: Channel::new(config),
            count: 0,
        }
    }

    /// Advance the automaton by at most one byte.
    pub fn poll(&mut self) -> Result<Poll> {
        let Some(byte) = self.port.read() else {
            return Ok(Poll::Pending);
        };

        match self.channel.cursor() {
            0 if byte != HEADER0 => {
                self.reset();
                return Err(FrameError::Header0 { got: byte });
            }
            1 if byte != HEADER1 => {
                self.reset();
                return Err(FrameError::Header1 { got: byte });
            }
            2 => {
                // Bound the count before storing anything further.
                let max = self.channel.capacity().saturating_sub(FRAME_MARGIN);
                if usize::from(byte) > max {
                    self.reset();
                    return Err(FrameError::CountOverflow {
                        count: usize::from(byte),
                        max,
                    });
                }
                self.count = usize::from(byte);
            }
            _ => {}
        }

        self.channel.push(byte);
        if self.channel.cursor() < 4 + self.count {
            return Ok(Poll::Pending);
        }

        // Final byte of the frame: checksum covers count, command, and
        // payload, not the headers.
        let len = 4 + self.count;
        let expected = self.channel.data()[2..2 + self.count + 1]
            .iter()
            .fold(0u8, |sum, &b| sum.wrapping_add(b));
        self.reset();
        if expected == byte {
            debug!(channel = self.channel.id(), len, "binary frame complete");
            Ok(Poll::Complete(len))
        } else {
            debug!(channel = self.channel.id(), len, "binary frame checksum mismatch");
            Err(FrameError::Checksum {
                expected,
                got: byte,
                len,
            })
        }
    }

    /// The buffer; valid until the next poll that completes or aborts a
    /// frame.
    pub fn data(&self) -> &[u8] {
        self.channel.data()
    }

    /// Discard any partially received frame.
    pub fn reset(&mut self) {
        self.channel.reset();
        self.count = 0;
    }

    pub fn channel(&self) -> &Channel {
        &self.channel
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    pub fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }

    pub fn into_port(self) -> P {
        self.port
    }
}

/// Reads terminator-delimited text lines from the host side.
///
/// Bytes accumulate until one of the terminator set arrives; the terminator
/// is replaced by a NUL in the buffer and the reported length counts the
/// content only. A line that fills the buffer without terminating aborts
/// with [`FrameError::LineTooLong`].
pub struct LineFrameReader<P> {
    port: P,
    channel: Channel,
    terminators: Vec<u8>,
}

impl<P: SerialPort> LineFrameReader<P> {
    pub fn new(port: P, config: ChannelConfig) -> Self {
        Self {
            port,
            channel: Channel::new(config),
            terminators: DEFAULT_TERMINATORS.to_vec(),
        }
    }

    /// Override the end-of-line byte set. The peer protocol dictates whether
    /// NUL terminates a line; the default set accepts LF, CR, and NUL.
    pub fn with_terminators(mut self, terminators: &[u8]) -> Self {
        self.terminators = terminators.to_vec();
        self
    }

    /// Advance by at most one byte.
    pub fn poll(&mut self) -> Result<Poll> {
        let Some(byte) = self.port.read() else {
            return Ok(Poll::Pending);
        };

        if self.terminators.contains(&byte) {
            let len = self.channel.cursor();
            self.channel.push(0);
            self.channel.reset();
            debug!(channel = self.channel.id(), len, "line complete");
            return Ok(Poll::Complete(len));
        }

        self.channel.push(byte);
        if self.channel.cursor() == self.channel.capacity() {
            let capacity = self.channel.capacity();
            self.reset();
            debug!(channel = self.channel.id(), capacity, "line overflow");
            return Err(FrameError::LineTooLong { capacity });
        }
        Ok(Poll::Pending)
    }

    /// The buffer; valid until the next poll that completes or aborts a
    /// frame.
    pub fn data(&self) -> &[u8] {
        self.channel.data()
    }

    /// Discard any partially received line.
    pub fn reset(&mut self) {
        self.channel.reset();
    }

    pub fn channel(&self) -> &Channel {
        &self.channel
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    pub fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }

    pub fn into_port(self) -> P {
        self.port
    }
}

/// The closed set of frame reader kinds, selected at channel construction.
pub enum FrameReader<P> {
    Binary(BinaryFrameReader<P>),
    Line(LineFrameReader<P>),
}

impl<P: SerialPort> FrameReader<P> {
    /// A reader for the binary reader-module framing.
    pub fn binary(port: P, config: ChannelConfig) -> Self {
        Self::Binary(BinaryFrameReader::new(port, config))
    }

    /// A reader for terminator-delimited host lines.
    pub fn line(port: P, config: ChannelConfig) -> Self {
        Self::Line(LineFrameReader::new(port, config))
    }

    pub fn poll(&mut self) -> Result<Poll> {
        match self {
            Self::Binary(reader) => reader.poll(),
            Self::Line(reader) => reader.poll(),
        }
    }

    pub fn data(&self) -> &[u8] {
        match self {
            Self::Binary(reader) => reader.data(),
            Self::Line(reader) => reader.data(),
        }
    }

    pub fn reset(&mut self) {
        match self {
            Self::Binary(reader) => reader.reset(),
            Self::Line(reader) => reader.reset(),
        }
    }

    pub fn channel(&self) -> &Channel {
        match self {
            Self::Binary(reader) => reader.channel(),
            Self::Line(reader) => reader.channel(),
        }
    }

    pub fn port(&self) -> &P {
        match self {
            Self::Binary(reader) => reader.port(),
            Self::Line(reader) => reader.port(),
        }
    }

    pub fn port_mut(&mut self) -> &mut P {
        match self {
            Self::Binary(reader) => reader.port_mut(),
            Self::Line(reader) => reader.port_mut(),
        }
    }

    pub fn into_port(self) -> P {
        match self {
            Self::Binary(reader) => reader.into_port(),
            Self::Line(reader) => reader.into_port(),
        }
    }
}
