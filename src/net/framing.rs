//! Line framing for the tick protocol
//!
//! One JSON record per line in each direction.

use std::io;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Errors that can occur while framing lines
#[derive(Debug, thiserror::Error)]
pub enum FramingError {
    #[error("Line too long: {0} bytes (max {1})")]
    LineTooLong(usize, usize),
    #[error("Line is not valid UTF-8")]
    InvalidUtf8,
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Read one line, without its trailing `\n` / `\r\n`.
///
/// Returns `Ok(None)` at end of stream. A final line without a newline is
/// still returned. At most `max_len` bytes plus the line ending are held in
/// memory; the rest of an oversized line is drained and dropped.
pub async fn read_line<R: AsyncBufRead + Unpin>(
    reader: &mut R,
    max_len: usize,
) -> Result<Option<String>, FramingError> {
    let limit = max_len as u64 + 2;
    let mut buf = Vec::new();
    let n = (&mut *reader).take(limit).read_until(b'\n', &mut buf).await?;

    if n == 0 {
        return Ok(None);
    }

    if buf.last() != Some(&b'\n') && n as u64 == limit {
        let len = discard_line(reader, limit, buf).await?;
        return Err(FramingError::LineTooLong(len, max_len));
    }

    if buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    }

    if buf.len() > max_len {
        return Err(FramingError::LineTooLong(buf.len(), max_len));
    }

    String::from_utf8(buf)
        .map(Some)
        .map_err(|_| FramingError::InvalidUtf8)
}

/// Drain the rest of a line, starting from the chunk already read.
///
/// Reads at most `chunk` bytes at a time. Returns the full length of the
/// line, line ending excluded.
async fn discard_line<R: AsyncBufRead + Unpin>(
    reader: &mut R,
    chunk: u64,
    mut scratch: Vec<u8>,
) -> Result<usize, FramingError> {
    let mut len = 0;
    let mut last = None;

    loop {
        if scratch.is_empty() {
            return Ok(len);
        }
        if scratch.last() == Some(&b'\n') {
            scratch.pop();
            len += scratch.len();
            last = scratch.last().copied().or(last);
            return Ok(if last == Some(b'\r') { len - 1 } else { len });
        }

        len += scratch.len();
        last = scratch.last().copied();
        scratch.clear();
        (&mut *reader).take(chunk).read_until(b'\n', &mut scratch).await?;
    }
}

/// Write one line and flush, so the simulator sees it before the next tick.
pub async fn write_line<W: AsyncWrite + Unpin>(
    writer: &mut W,
    line: &str,
) -> Result<(), FramingError> {
    writer.write_all(line.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await?;

    Ok(())
}
