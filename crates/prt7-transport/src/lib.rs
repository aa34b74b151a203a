//! Line-source transports for the PRT-7 decoder.
//!
//! The decoder core only needs "a sequence of text lines in arrival order".
//! This crate supplies the bytes those lines are cut from:
//! - Serial TTY devices configured for 8N1 (Linux/macOS)
//! - Regular files (captured transmissions)
//! - Standard input
//!
//! Everything is exposed through the [`DeviceStream`] type, which implements
//! [`std::io::Read`].

pub mod config;
pub mod error;
pub mod stream;

#[cfg(unix)]
pub mod serial;

#[cfg(feature = "async")]
pub mod async_stream;

pub use config::{SerialConfig, DEFAULT_BAUD_RATE, SUPPORTED_BAUD_RATES};
pub use error::{Result, TransportError};
pub use stream::{open_file, stdin, DeviceStream, StreamKind};

#[cfg(unix)]
pub use serial::SerialDevice;

#[cfg(feature = "async")]
pub use async_stream::AsyncDeviceStream;

/// Serial transport placeholder for platforms without termios.
#[cfg(not(unix))]
pub struct SerialDevice;

#[cfg(not(unix))]
impl SerialDevice {
    /// Always fails with [`TransportError::Unsupported`].
    pub fn open(
        _path: impl AsRef<std::path::Path>,
        _config: &SerialConfig,
    ) -> Result<DeviceStream> {
        Err(TransportError::Unsupported("serial devices require termios"))
    }
}
