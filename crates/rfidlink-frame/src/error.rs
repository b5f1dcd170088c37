/// Errors raised by the frame readers and the binary command writer.
///
/// Each variant maps to a distinct negative diagnostic code via
/// [`FrameError::code`]; the readers reset themselves before returning any of
/// these, so every error is local and recoverable.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// The first header byte of a binary frame did not match.
    #[error("bad header byte 0: {got:#04x}")]
    Header0 { got: u8 },

    /// The second header byte of a binary frame did not match.
    #[error("bad header byte 1: {got:#04x}")]
    Header1 { got: u8 },

    /// The declared count would overflow the channel buffer.
    #[error("declared count {count} exceeds {max}")]
    CountOverflow { count: usize, max: usize },

    /// Binary frame checksum mismatch. `len` is the length the frame would
    /// have reported had the checksum held.
    #[error("checksum mismatch on {len}-byte frame (expected {expected:#04x}, got {got:#04x})")]
    Checksum { expected: u8, got: u8, len: usize },

    /// A line filled the whole buffer without a terminator.
    #[error("line exceeds {capacity}-byte buffer")]
    LineTooLong { capacity: usize },

    /// The underlying port failed while writing a command frame.
    #[error("port error: {0}")]
    Port(#[from] rfidlink_port::PortError),
}

impl FrameError {
    /// Signed diagnostic code for dispatch-loop logging.
    ///
    /// Always negative. A checksum mismatch reports the negated frame length;
    /// an overlong line reports the negated buffer capacity. `Port` can only
    /// arise from write paths, never from `poll`.
    pub fn code(&self) -> i32 {
        match self {
            Self::Header0 { .. } => -1,
            Self::Header1 { .. } => -2,
            Self::CountOverflow { .. } => -3,
            Self::Checksum { len, .. } => -(*len as i32),
            Self::LineTooLong { capacity } => -(*capacity as i32),
            Self::Port(_) => -100,
        }
    }
}

/// Errors raised by the ASCII transport codec.
///
/// One variant per structural expectation, so a caller can tell exactly where
/// a message went wrong from [`CodecError::code`] alone.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// A required single space was missing.
    #[error("expected separator at byte {pos}")]
    Separator { pos: usize },

    /// The device tag contained a non-printable or space byte.
    #[error("device tag byte is not printable ASCII: {got:#04x}")]
    Tag { got: u8 },

    /// The subcode was not a decimal digit.
    #[error("subcode is not a decimal digit: {got:#04x}")]
    Subcode { got: u8 },

    /// The length field was not 1-4 decimal digits.
    #[error("malformed length field")]
    Length,

    /// The payload length is outside what the wire format can carry.
    #[error("payload length {len} exceeds {max}")]
    LengthRange { len: usize, max: usize },

    /// A payload or checksum position held something other than an uppercase
    /// hex digit.
    #[error("invalid hex digit: {got:#04x}")]
    HexDigit { got: u8 },

    /// The message ended before the structure did.
    #[error("message truncated")]
    Truncated,

    /// The message checksum did not balance.
    #[error("checksum mismatch (expected {expected:#04x}, got {got:#04x})")]
    Checksum { expected: u8, got: u8 },
}

impl CodecError {
    /// Signed diagnostic code for dispatch-loop logging. Always negative, in
    /// a range disjoint from the frame reader codes.
    pub fn code(&self) -> i32 {
        match self {
            Self::Separator { .. } => -10,
            Self::Tag { .. } => -11,
            Self::Subcode { .. } => -12,
            Self::Length => -13,
            Self::LengthRange { .. } => -14,
            Self::HexDigit { .. } => -15,
            Self::Truncated => -16,
            Self::Checksum { .. } => -17,
        }
    }
}

pub type Result<T, E = FrameError> = std::result::Result<T, E>;
