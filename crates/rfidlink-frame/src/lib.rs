//! Polling frame reconstruction and ASCII transport codec.
//!
//! This is the core value-add layer of rfidlink. Two peers, two framings:
//!
//! Reader modules speak a fixed binary frame:
//! ```text
//! ┌────────┬────────┬─────────┬─────────┬──────────────────┬──────────┐
//! │ 0xFF   │ 0x00   │ Count   │ Command │ Payload           │ Checksum │
//! │ header │ header │ (1B)    │ (1B)    │ (Count-1 bytes)   │ (1B)     │
//! └────────┴────────┴─────────┴─────────┴──────────────────┴──────────┘
//! ```
//! where the checksum is the 8-bit wrapping sum of count, command, and
//! payload. The host side speaks NUL/CR/LF-terminated text lines carrying a
//! checksummed ASCII rendering of the same payloads.
//!
//! Every reader is a non-blocking automaton: one `poll` moves at most one
//! byte, and a completed or aborted frame resets the reader for the next one.

pub mod channel;
pub mod codec;
pub mod command;
pub mod error;
pub mod reader;
pub mod writer;

pub use channel::{Channel, ChannelConfig, TransportMode, DEFAULT_CAPACITY};
pub use codec::{decode, encode, Message, MAX_LENGTH};
pub use error::{CodecError, FrameError, Result};
pub use reader::{BinaryFrameReader, FrameReader, LineFrameReader, Poll};
pub use writer::{encode_command, init_reader, write_command};
