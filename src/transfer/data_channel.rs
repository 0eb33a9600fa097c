//! Module `data_channel`
//!
//! A short-lived connection to the endpoint the server advertised in
//! passive mode. Carries raw bytes with no protocol semantics of its own:
//! there is no framing, so end-of-stream is the only completion signal
//! and a sender must shut down its write side to terminate a transfer.

use log::{debug, info};
use std::io::{Read, Write};
use std::net::{Shutdown, SocketAddr, TcpStream};

use crate::config::ClientConfig;
use crate::error::{ConnectionError, FtpClientError};

/// One data connection, created per transfer and never reused.
pub struct DataChannel {
    stream: TcpStream,
    addr: SocketAddr,
    buffer_size: usize,
}

impl DataChannel {
    /// Connects to the advertised endpoint.
    pub fn connect(addr: SocketAddr, config: &ClientConfig) -> Result<Self, FtpClientError> {
        let stream = TcpStream::connect_timeout(&addr, config.connect_timeout())
            .map_err(|e| ConnectionError::ConnectFailed(addr.to_string(), e))?;
        stream
            .set_read_timeout(Some(config.read_timeout()))
            .map_err(ConnectionError::Io)?;

        debug!("Data channel connected to {}", addr);
        Ok(Self {
            stream,
            addr,
            buffer_size: config.buffer_size,
        })
    }

    /// Writes the full payload, then shuts down the write side so the
    /// server observes end-of-stream.
    pub fn send_all(&mut self, bytes: &[u8]) -> Result<(), FtpClientError> {
        self.stream.write_all(bytes).map_err(ConnectionError::Io)?;
        self.stream.flush().map_err(ConnectionError::Io)?;
        self.stream
            .shutdown(Shutdown::Write)
            .map_err(ConnectionError::Io)?;

        info!("Sent {} bytes over data channel to {}", bytes.len(), self.addr);
        Ok(())
    }

    /// Reads until the server closes its side, accumulating everything
    /// received.
    pub fn receive_all(&mut self) -> Result<Vec<u8>, FtpClientError> {
        let mut received = Vec::new();
        let mut buffer = vec![0u8; self.buffer_size];

        loop {
            let n = self.stream.read(&mut buffer).map_err(ConnectionError::Io)?;
            if n == 0 {
                break;
            }
            received.extend_from_slice(&buffer[..n]);
        }

        info!(
            "Received {} bytes over data channel from {}",
            received.len(),
            self.addr
        );
        Ok(received)
    }

    /// Consumes the channel and closes the connection. Dropping a channel
    /// without calling this releases the socket the same way.
    pub fn close(self) {
        let _ = self.stream.shutdown(Shutdown::Both);
        debug!("Data channel to {} closed", self.addr);
    }
}
