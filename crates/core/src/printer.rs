//! Raw ZPL dispatch to a networked label printer.
//!
//! ZPL sticker sheets fetched from the marketplace can be pushed straight to
//! a Zebra-class printer listening on a raw TCP port (conventionally 9100).
//! One connection per document; nothing is queued or retried here.

use std::time::Duration;

use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::debug;

use crate::config::PrinterConfig;

#[derive(Debug, Error)]
pub enum PrinterError {
    #[error("Printer connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Printer I/O timed out")]
    Timeout,

    #[error("Printer write failed: {0}")]
    WriteFailed(String),
}

/// Sends raw ZPL documents to a networked label printer.
pub struct ZplPrinter {
    config: PrinterConfig,
}

impl ZplPrinter {
    pub fn new(config: PrinterConfig) -> Self {
        Self { config }
    }

    /// Target address for logging.
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Write one ZPL document to the printer and close the connection.
    pub async fn send(&self, zpl: &[u8]) -> Result<(), PrinterError> {
        let io_timeout = Duration::from_secs(self.config.timeout_secs as u64);

        let connect = TcpStream::connect((self.config.host.as_str(), self.config.port));
        let mut stream = timeout(io_timeout, connect)
            .await
            .map_err(|_| PrinterError::Timeout)?
            .map_err(|e| PrinterError::ConnectionFailed(e.to_string()))?;

        timeout(io_timeout, async {
            stream.write_all(zpl).await?;
            stream.shutdown().await
        })
        .await
        .map_err(|_| PrinterError::Timeout)?
        .map_err(|e: std::io::Error| PrinterError::WriteFailed(e.to_string()))?;

        debug!(printer = %self.address(), bytes = zpl.len(), "ZPL document sent");
        Ok(())
    }
}
