//! Command transmission seam
//!
//! The reactor only knows it has a [`CommandSender`]. In production that is
//! a [`CecClientSender`] writing to `cec-client`'s stdin; tests substitute a
//! recorder.

use async_trait::async_trait;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::error::SendError;

/// Transmits a command line to the bus monitor
#[async_trait]
pub trait CommandSender: Send {
    async fn send(&mut self, command: &str) -> Result<(), SendError>;
}

/// Writes newline-terminated commands to an interactive `cec-client`.
#[derive(Debug)]
pub struct CecClientSender<W> {
    writer: W,
}

impl<W> CecClientSender<W>
where
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[async_trait]
impl<W> CommandSender for CecClientSender<W>
where
    W: AsyncWrite + Unpin + Send,
{
    async fn send(&mut self, command: &str) -> Result<(), SendError> {
        self.writer.write_all(command.as_bytes()).await?;
        self.writer.write_all(b"\n").await?;
        self.writer.flush().await?;
        Ok(())
    }
}
