//! Framed channel over a byte stream

use crate::framing::{LineBuffer, frame};
use crate::transport::{LineReader, LineWriter};
use async_trait::async_trait;
use cloudwars_core::{CloudWarsError, Response, Result};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

/// Bytes requested from the stream per read
const READ_CHUNK: usize = 4096;

/// Longest line accepted before giving up on the stream (16MB)
pub const MAX_LINE_LEN: usize = 16 * 1024 * 1024;

/// Characters of a received line shown in debug logs
const LOG_PREVIEW: usize = 200;

/// Newline-delimited text channel over an owned byte stream
pub struct FramedChannel<S> {
    stream: S,
    buffer: LineBuffer,
    max_line_len: usize,
}

impl<S> FramedChannel<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    pub fn new(stream: S) -> Self {
        Self {
            stream,
            buffer: LineBuffer::new(),
            max_line_len: MAX_LINE_LEN,
        }
    }

    /// Override the maximum accepted line length
    pub fn with_max_line_len(mut self, max_line_len: usize) -> Self {
        self.max_line_len = max_line_len;
        self
    }

    /// Give back the underlying stream. Buffered, unread bytes are dropped.
    pub fn into_inner(self) -> S {
        self.stream
    }
}

#[async_trait]
impl<S> LineWriter for FramedChannel<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    async fn send(&mut self, text: &str) -> Result<()> {
        debug!("Sending: {}", text);
        let line = frame(text);
        self.stream
            .write_all(&line)
            .await
            .map_err(|e| CloudWarsError::Connection(format!("Write failed: {}", e)))?;
        self.stream
            .flush()
            .await
            .map_err(|e| CloudWarsError::Connection(format!("Flush failed: {}", e)))?;
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        self.stream
            .shutdown()
            .await
            .map_err(|e| CloudWarsError::Connection(format!("Shutdown failed: {}", e)))
    }
}

#[async_trait]
impl<S> LineReader for FramedChannel<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    async fn receive(&mut self) -> Result<Response> {
        let mut chunk = [0u8; READ_CHUNK];
        loop {
            match self.buffer.take_line_within(self.max_line_len) {
                Ok(Some(line)) => {
                    let preview: String = line.trim_end().chars().take(LOG_PREVIEW).collect();
                    debug!("Received: len={} {}", line.len(), preview);
                    return Ok(Response::new(line));
                }
                Ok(None) => {}
                Err(len) => {
                    return Err(CloudWarsError::Framing(format!(
                        "Line too long: {} bytes, limit {}",
                        len, self.max_line_len
                    )));
                }
            }

            if self.buffer.len() > self.max_line_len {
                let len = self.buffer.discard();
                return Err(CloudWarsError::Framing(format!(
                    "Line too long: {} bytes without a delimiter",
                    len
                )));
            }

            let n = self
                .stream
                .read(&mut chunk)
                .await
                .map_err(|e| CloudWarsError::Connection(format!("Read failed: {}", e)))?;

            if n == 0 {
                let partial = self.buffer.discard();
                return Err(if partial == 0 {
                    CloudWarsError::Connection("Stream closed by peer".into())
                } else {
                    CloudWarsError::Framing(format!(
                        "Stream closed mid-line, discarded {} bytes",
                        partial
                    ))
                });
            }

            self.buffer.extend(&chunk[..n]);
        }
    }
}
