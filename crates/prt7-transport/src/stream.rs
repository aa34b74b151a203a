use std::fs::File;
use std::io::Read;
#[cfg(unix)]
use std::os::fd::{AsFd, AsRawFd, RawFd};
use std::path::Path;
use std::time::Duration;

use tracing::debug;

use crate::error::{Result, TransportError};

/// Which kind of source backs a [`DeviceStream`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamKind {
    Serial,
    File,
    Stdin,
}

impl StreamKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StreamKind::Serial => "serial",
            StreamKind::File => "file",
            StreamKind::Stdin => "stdin",
        }
    }
}

/// A connected line source — implements `Read`.
///
/// This is the byte stream the frame reader cuts lines from. A serial device
/// is a configured TTY file descriptor; files and stdin are read as-is.
///
/// With a read timeout set, a read that sees no data in time fails with
/// [`std::io::ErrorKind::WouldBlock`] and can simply be retried.
pub struct DeviceStream {
    inner: DeviceStreamInner,
    #[cfg(unix)]
    read_timeout: Option<Duration>,
}

enum DeviceStreamInner {
    Serial(File),
    File(File),
    // A duplicate of fd 0, read unbuffered so `poll` sees every pending byte.
    #[cfg(unix)]
    Stdin(File),
    #[cfg(not(unix))]
    Stdin(std::io::Stdin),
}

impl Read for DeviceStream {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        #[cfg(unix)]
        if let Some(timeout) = self.read_timeout {
            if !wait_readable(self.raw_fd(), timeout)? {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::WouldBlock,
                    "no data within read timeout",
                ));
            }
        }

        match &mut self.inner {
            DeviceStreamInner::Serial(file) | DeviceStreamInner::File(file) => file.read(buf),
            DeviceStreamInner::Stdin(stdin) => stdin.read(buf),
        }
    }
}

impl DeviceStream {
    fn new(inner: DeviceStreamInner) -> Self {
        Self {
            inner,
            #[cfg(unix)]
            read_timeout: None,
        }
    }

    #[cfg(unix)]
    pub(crate) fn from_serial(file: File) -> Self {
        Self::new(DeviceStreamInner::Serial(file))
    }

    /// The kind of source behind this stream.
    pub fn kind(&self) -> StreamKind {
        match &self.inner {
            DeviceStreamInner::Serial(_) => StreamKind::Serial,
            DeviceStreamInner::File(_) => StreamKind::File,
            DeviceStreamInner::Stdin(_) => StreamKind::Stdin,
        }
    }

    /// Bound how long a single read waits for data.
    ///
    /// `None` blocks until data or end of stream. A zero duration is rejected.
    #[cfg(unix)]
    pub fn set_read_timeout(&mut self, timeout: Option<Duration>) -> Result<()> {
        if timeout == Some(Duration::ZERO) {
            return Err(TransportError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "read timeout must be non-zero",
            )));
        }
        self.read_timeout = timeout;
        Ok(())
    }

    /// Read timeouts need `poll(2)`; only `None` is accepted here.
    #[cfg(not(unix))]
    pub fn set_read_timeout(&mut self, timeout: Option<Duration>) -> Result<()> {
        match timeout {
            None => Ok(()),
            Some(_) => Err(TransportError::Unsupported("read timeouts require poll(2)")),
        }
    }

    /// The timeout applied to each read, if any.
    #[cfg(unix)]
    pub fn read_timeout(&self) -> Option<Duration> {
        self.read_timeout
    }

    #[cfg(not(unix))]
    pub fn read_timeout(&self) -> Option<Duration> {
        None
    }

    /// Try to clone this stream (creates a new file descriptor).
    pub fn try_clone(&self) -> Result<Self> {
        let inner = match &self.inner {
            DeviceStreamInner::Serial(file) => DeviceStreamInner::Serial(file.try_clone()?),
            DeviceStreamInner::File(file) => DeviceStreamInner::File(file.try_clone()?),
            #[cfg(unix)]
            DeviceStreamInner::Stdin(file) => DeviceStreamInner::Stdin(file.try_clone()?),
            #[cfg(not(unix))]
            DeviceStreamInner::Stdin(_) => DeviceStreamInner::Stdin(std::io::stdin()),
        };
        Ok(Self {
            inner,
            #[cfg(unix)]
            read_timeout: self.read_timeout,
        })
    }

    #[cfg(unix)]
    fn raw_fd(&self) -> RawFd {
        match &self.inner {
            DeviceStreamInner::Serial(file)
            | DeviceStreamInner::File(file)
            | DeviceStreamInner::Stdin(file) => file.as_raw_fd(),
        }
    }

    /// Convert into an async stream (requires `async` feature).
    ///
    /// The read timeout does not carry over; async callers bound reads with
    /// their own timers.
    #[cfg(feature = "async")]
    pub fn into_async(self) -> crate::async_stream::AsyncDeviceStream {
        let kind = self.kind();
        match self.inner {
            DeviceStreamInner::Serial(file) | DeviceStreamInner::File(file) => {
                crate::async_stream::AsyncDeviceStream::from_file(file, kind)
            }
            DeviceStreamInner::Stdin(_) => crate::async_stream::AsyncDeviceStream::stdin(),
        }
    }
}

/// Wait until `fd` has data, hangup or an error pending.
///
/// Returns `false` when `timeout` elapsed first.
#[cfg(unix)]
fn wait_readable(fd: RawFd, timeout: Duration) -> std::io::Result<bool> {
    let mut pollfd = libc::pollfd {
        fd,
        events: libc::POLLIN,
        revents: 0,
    };
    let millis = libc::c_int::try_from(timeout.as_millis()).unwrap_or(libc::c_int::MAX);

    // SAFETY: `pollfd` is a single valid, exclusively borrowed entry and `fd`
    // is owned by the stream for the duration of the call.
    let ready = unsafe { libc::poll(&mut pollfd, 1, millis) };
    if ready < 0 {
        return Err(std::io::Error::last_os_error());
    }
    Ok(ready > 0)
}

/// Open a regular file holding a captured transmission.
pub fn open_file(path: impl AsRef<Path>) -> Result<DeviceStream> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| TransportError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "opened capture file");
    Ok(DeviceStream::new(DeviceStreamInner::File(file)))
}

/// Read lines from the process's standard input.
///
/// On unix the stream reads a duplicate of fd 0 directly, bypassing the
/// process-wide stdin buffer.
#[cfg(unix)]
pub fn stdin() -> Result<DeviceStream> {
    let fd = std::io::stdin().as_fd().try_clone_to_owned()?;
    Ok(DeviceStream::new(DeviceStreamInner::Stdin(File::from(fd))))
}

/// Read lines from the process's standard input.
#[cfg(not(unix))]
pub fn stdin() -> Result<DeviceStream> {
    Ok(DeviceStream::new(DeviceStreamInner::Stdin(std::io::stdin())))
}

impl std::fmt::Debug for DeviceStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeviceStream")
            .field("type", &self.kind().as_str())
            .field("read_timeout", &self.read_timeout())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(tag: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("prt7-transport-{tag}-{}", std::process::id()))
    }

    #[test]
    fn reads_capture_file() {
        let path = temp_path("capture");
        std::fs::write(&path, b"M,2\nL,H\n").unwrap();

        let mut stream = open_file(&path).unwrap();
        assert_eq!(stream.kind(), StreamKind::File);

        let mut contents = String::new();
        stream.read_to_string(&mut contents).unwrap();
        assert_eq!(contents, "M,2\nL,H\n");

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn missing_file_reports_open_error() {
        let path = temp_path("missing");
        let err = open_file(&path).unwrap_err();
        match err {
            TransportError::Open { path: p, source } => {
                assert_eq!(p, path);
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn debug_names_stream_kind() {
        let stream = stdin().unwrap();
        assert_eq!(
            format!("{stream:?}"),
            "DeviceStream { type: \"stdin\", read_timeout: None }"
        );
    }

    #[cfg(unix)]
    fn socket_backed_stream() -> (std::os::unix::net::UnixStream, DeviceStream) {
        let (writer, reader) = std::os::unix::net::UnixStream::pair().unwrap();
        let file = File::from(std::os::fd::OwnedFd::from(reader));
        (writer, DeviceStream::new(DeviceStreamInner::File(file)))
    }

    #[test]
    #[cfg(unix)]
    fn idle_read_times_out_then_recovers() {
        use std::io::Write;

        let (mut writer, mut stream) = socket_backed_stream();
        stream.set_read_timeout(Some(Duration::from_millis(20))).unwrap();

        let mut buf = [0u8; 16];
        let err = stream.read(&mut buf).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::WouldBlock);

        writer.write_all(b"L,A\n").unwrap();
        assert_eq!(stream.read(&mut buf).unwrap(), 4);
        assert_eq!(&buf[..4], b"L,A\n");

        drop(writer);
        assert_eq!(stream.read(&mut buf).unwrap(), 0);
    }

    #[test]
    #[cfg(unix)]
    fn clone_keeps_read_timeout() {
        let (_writer, mut stream) = socket_backed_stream();
        stream.set_read_timeout(Some(Duration::from_millis(150))).unwrap();

        let cloned = stream.try_clone().unwrap();
        assert_eq!(cloned.read_timeout(), Some(Duration::from_millis(150)));
    }

    #[test]
    fn zero_read_timeout_is_rejected() {
        let mut stream = stdin().unwrap();
        let err = stream.set_read_timeout(Some(Duration::ZERO)).unwrap_err();
        assert!(
            matches!(err, TransportError::Io(e) if e.kind() == std::io::ErrorKind::InvalidInput)
        );
        assert_eq!(stream.read_timeout(), None);
    }
}
