/// Errors that can occur on a serial port.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    /// The other end of the port has gone away.
    #[error("port closed")]
    Closed,

    /// The requested line rate is not one the port supports.
    #[error("unsupported baud rate: {baud}")]
    InvalidBaud { baud: u32 },
}

pub type Result<T> = std::result::Result<T, PortError>;
