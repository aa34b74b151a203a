use std::fs::{File, OpenOptions};
use std::os::fd::AsRawFd;
use std::os::unix::fs::OpenOptionsExt;
use std::path::Path;

use tracing::{debug, info};

use crate::config::SerialConfig;
use crate::error::{Result, TransportError};
use crate::stream::DeviceStream;

/// Serial TTY transport.
///
/// Opens a character device (e.g. `/dev/ttyUSB0`, `/dev/cu.usbmodem1101`)
/// and puts it into raw 8N1 mode so each byte the transmitter sends is
/// delivered unmodified.
pub struct SerialDevice;

impl SerialDevice {
    /// Open and configure a serial device.
    ///
    /// The device is opened read/write without becoming the controlling
    /// terminal. Reads block until at least one byte is available, unless a
    /// read timeout is set on the returned stream.
    pub fn open(path: impl AsRef<Path>, config: &SerialConfig) -> Result<DeviceStream> {
        let path = path.as_ref();
        let speed = baud_to_speed(config.baud_rate)
            .ok_or(TransportError::UnsupportedBaudRate(config.baud_rate))?;

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .custom_flags(libc::O_NOCTTY)
            .open(path)
            .map_err(|source| TransportError::Open {
                path: path.to_path_buf(),
                source,
            })?;

        configure_raw_8n1(&file, speed).map_err(|source| TransportError::Configure {
            path: path.to_path_buf(),
            source,
        })?;

        info!(
            path = %path.display(),
            baud = config.baud_rate,
            "serial device connected"
        );
        Ok(DeviceStream::from_serial(file))
    }
}

fn configure_raw_8n1(file: &File, speed: libc::speed_t) -> std::io::Result<()> {
    let fd = file.as_raw_fd();

    // SAFETY: termios is a plain C struct; all-zero is a valid bit pattern and
    // is fully overwritten by tcgetattr below.
    let mut tio: libc::termios = unsafe { std::mem::zeroed() };

    // SAFETY: `fd` is an open descriptor owned by `file` and `tio` is a valid
    // writable termios struct.
    if unsafe { libc::tcgetattr(fd, &mut tio) } != 0 {
        return Err(std::io::Error::last_os_error());
    }

    // SAFETY: `tio` is a valid, initialised termios struct.
    unsafe { libc::cfmakeraw(&mut tio) };

    tio.c_cflag |= libc::CLOCAL | libc::CREAD;
    tio.c_cflag &= !(libc::PARENB | libc::CSTOPB | libc::CSIZE);
    tio.c_cflag |= libc::CS8;
    tio.c_cc[libc::VMIN] = 1;
    tio.c_cc[libc::VTIME] = 0;

    // SAFETY: `tio` is valid and `speed` is one of the libc B* constants.
    let rc = unsafe {
        libc::cfsetispeed(&mut tio, speed) | libc::cfsetospeed(&mut tio, speed)
    };
    if rc != 0 {
        return Err(std::io::Error::last_os_error());
    }

    // SAFETY: `fd` is open and `tio` was produced by tcgetattr.
    if unsafe { libc::tcsetattr(fd, libc::TCSANOW, &tio) } != 0 {
        return Err(std::io::Error::last_os_error());
    }

    // Discard anything the device buffered before we configured it.
    // SAFETY: `fd` is open.
    unsafe { libc::tcflush(fd, libc::TCIFLUSH) };

    debug!(fd, "applied raw 8N1 termios settings");
    Ok(())
}

fn baud_to_speed(baud: u32) -> Option<libc::speed_t> {
    let speed = match baud {
        1200 => libc::B1200,
        2400 => libc::B2400,
        4800 => libc::B4800,
        9600 => libc::B9600,
        19200 => libc::B19200,
        38400 => libc::B38400,
        57600 => libc::B57600,
        115200 => libc::B115200,
        _ => return None,
    };
    Some(speed)
}
