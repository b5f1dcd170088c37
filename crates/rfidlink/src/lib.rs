//! Non-blocking serial framing for RFID reader dispatch.
//!
//! rfidlink reconstructs discrete protocol messages out of byte-at-a-time,
//! non-blocking serial streams: binary command frames from SM130-class RFID
//! reader modules, and checksummed ASCII transport lines from a host
//! connection.
//!
//! # Crate Structure
//!
//! - [`port`] — byte-level serial port capability and in-memory test ports
//! - [`frame`] — polling frame readers, command writer, and ASCII codec

/// Re-export port types.
pub mod port {
    pub use rfidlink_port::*;
}

/// Re-export frame types.
pub mod frame {
    pub use rfidlink_frame::*;
}
