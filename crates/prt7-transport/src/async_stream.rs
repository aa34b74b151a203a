//! Async line sources backed by tokio.

use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::io::{AsyncRead, ReadBuf};

use crate::stream::StreamKind;

/// Async counterpart of [`crate::DeviceStream`].
///
/// Serial devices and files are driven through `tokio::fs::File`, which
/// performs the blocking reads on tokio's blocking pool.
pub struct AsyncDeviceStream {
    kind: StreamKind,
    inner: AsyncInner,
}

enum AsyncInner {
    File(tokio::fs::File),
    Stdin(tokio::io::Stdin),
}

impl AsyncDeviceStream {
    pub(crate) fn from_file(file: std::fs::File, kind: StreamKind) -> Self {
        Self {
            kind,
            inner: AsyncInner::File(tokio::fs::File::from_std(file)),
        }
    }

    pub(crate) fn stdin() -> Self {
        Self {
            kind: StreamKind::Stdin,
            inner: AsyncInner::Stdin(tokio::io::stdin()),
        }
    }

    /// The kind of source behind this stream.
    pub fn kind(&self) -> StreamKind {
        self.kind
    }
}

impl AsyncRead for AsyncDeviceStream {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<std::io::Result<()>> {
        match &mut self.get_mut().inner {
            AsyncInner::File(file) => Pin::new(file).poll_read(cx, buf),
            AsyncInner::Stdin(stdin) => Pin::new(stdin).poll_read(cx, buf),
        }
    }
}

impl std::fmt::Debug for AsyncDeviceStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AsyncDeviceStream")
            .field("type", &self.kind.as_str())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use tokio::io::AsyncReadExt;

    #[tokio::test]
    async fn reads_file_asynchronously() {
        let path = std::env::temp_dir().join(format!(
            "prt7-transport-async-{}",
            std::process::id()
        ));
        std::fs::write(&path, b"L,Space\n").unwrap();

        let mut stream = crate::open_file(&path).unwrap().into_async();
        assert_eq!(stream.kind(), crate::StreamKind::File);

        let mut contents = String::new();
        stream.read_to_string(&mut contents).await.unwrap();
        assert_eq!(contents, "L,Space\n");

        let _ = std::fs::remove_file(&path);
    }
}
