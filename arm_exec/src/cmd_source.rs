//! # Command source
//!
//! Reads command bytes from the input channel one at a time.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::io::{ErrorKind, Read};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Byte-at-a-time reader over the input channel.
pub struct CmdSource<R: Read> {
    reader: R,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(thiserror::Error, Debug)]
pub enum CmdSourceError {
    #[error("Could not read from the input channel: {0}")]
    Read(std::io::Error),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl<R: Read> CmdSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Block until the next byte is available.
    ///
    /// Returns `None` once the channel has been closed.
    pub fn poll(&mut self) -> Result<Option<u8>, CmdSourceError> {
        let mut buf = [0u8; 1];

        loop {
            match self.reader.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0])),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(CmdSourceError::Read(e)),
            }
        }
    }
}

// ------------------------------------------------------------------------------------------------
// UART
// ------------------------------------------------------------------------------------------------

#[cfg(all(target_arch = "arm", target_os = "linux"))]
pub use uart::UartReader;

#[cfg(all(target_arch = "arm", target_os = "linux"))]
mod uart {
    use rppal::uart::{Parity, Uart};
    use std::{
        io::{self, Read},
        time::Duration,
    };

    /// Blocking [`Read`] over the Pi's primary UART.
    pub struct UartReader(Uart);

    impl UartReader {
        /// Open the UART at `baud_rate`, 8N1, blocking until at least one byte
        /// is available on each read.
        pub fn new(baud_rate: u32) -> rppal::uart::Result<Self> {
            let mut uart = Uart::new(baud_rate, Parity::None, 8, 1)?;
            uart.set_read_mode(1, Duration::default())?;

            Ok(Self(uart))
        }
    }

    impl Read for UartReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.0
                .read(buf)
                .map_err(|e| io::Error::new(io::ErrorKind::Other, e))
        }
    }
}
