use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use tracing::debug;

use crate::error::{PortError, Result};
use crate::traits::SerialPort;

/// Line rates the in-memory port admits, matching common UART dividers.
const SUPPORTED_BAUD: [u32; 8] = [1200, 2400, 4800, 9600, 19_200, 38_400, 57_600, 115_200];

type Queue = Rc<RefCell<VecDeque<u8>>>;

/// In-memory serial port.
///
/// Standalone, it is a scripted test double: [`MemPort::feed`] queues the
/// bytes `read` will hand out, and [`MemPort::drain_sent`] collects what was
/// written. [`MemPort::pair`] instead returns two cross-linked ports where
/// each side reads what the other wrote — a loopback wire for demos.
///
/// The workspace's resource model is single-threaded cooperative polling, so
/// the shared queues use `Rc<RefCell<..>>` and the type is intentionally not
/// `Send`.
#[derive(Debug)]
pub struct MemPort {
    rx: Queue,
    tx: Queue,
    linked: bool,
    baud: Option<u32>,
}

impl MemPort {
    /// Create a standalone scripted port.
    pub fn new() -> Self {
        Self {
            rx: Rc::new(RefCell::new(VecDeque::new())),
            tx: Rc::new(RefCell::new(VecDeque::new())),
            linked: false,
            baud: None,
        }
    }

    /// Create two cross-linked ports: bytes written to one are read from the
    /// other.
    pub fn pair() -> (Self, Self) {
        let a_to_b = Rc::new(RefCell::new(VecDeque::new()));
        let b_to_a = Rc::new(RefCell::new(VecDeque::new()));
        let a = Self {
            rx: Rc::clone(&b_to_a),
            tx: Rc::clone(&a_to_b),
            linked: true,
            baud: None,
        };
        let b = Self {
            rx: a_to_b,
            tx: b_to_a,
            linked: true,
            baud: None,
        };
        (a, b)
    }

    /// Queue bytes for the port to hand out through `read`.
    pub fn feed(&mut self, bytes: &[u8]) {
        self.rx.borrow_mut().extend(bytes.iter().copied());
    }

    /// Number of bytes still pending on the receive side.
    pub fn pending(&self) -> usize {
        self.rx.borrow().len()
    }

    /// Take everything written through this port so far.
    ///
    /// On a paired port this drains bytes the peer has not read yet.
    pub fn drain_sent(&mut self) -> Vec<u8> {
        self.tx.borrow_mut().drain(..).collect()
    }

    /// The rate passed to the most recent `begin`, if any.
    pub fn baud(&self) -> Option<u32> {
        self.baud
    }
}

impl Default for MemPort {
    fn default() -> Self {
        Self::new()
    }
}

impl SerialPort for MemPort {
    fn available(&self) -> bool {
        !self.rx.borrow().is_empty()
    }

    fn read(&mut self) -> Option<u8> {
        self.rx.borrow_mut().pop_front()
    }

    fn write(&mut self, byte: u8) -> Result<()> {
        if self.linked && Rc::strong_count(&self.tx) == 1 {
            return Err(PortError::Closed);
        }
        self.tx.borrow_mut().push_back(byte);
        Ok(())
    }

    fn begin(&mut self, baud: u32) -> Result<()> {
        if !SUPPORTED_BAUD.contains(&baud) {
            return Err(PortError::InvalidBaud { baud });
        }
        debug!(baud, "memory port configured");
        self.baud = Some(baud);
        Ok(())
    }
}
