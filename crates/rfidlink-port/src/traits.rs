use crate::error::Result;

/// A byte-oriented serial port — the capability every frame reader polls.
///
/// Implementations must be strictly non-blocking: `read` returns `None` when
/// no byte is pending rather than waiting for one. There is no buffering
/// contract beyond "bytes come out in the order they went in".
pub trait SerialPort {
    /// Returns `true` when at least one received byte is pending.
    fn available(&self) -> bool;

    /// Take the next pending byte, or `None` when the port has nothing.
    fn read(&mut self) -> Option<u8>;

    /// Queue one byte for transmission.
    fn write(&mut self, byte: u8) -> Result<()>;

    /// Configure the line rate. Used during reader bring-up, never from a
    /// polling loop.
    fn begin(&mut self, baud: u32) -> Result<()>;

    /// Queue a whole buffer for transmission.
    fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        for &byte in bytes {
            self.write(byte)?;
        }
        Ok(())
    }
}
