//! Module `reply`
//!
//! Reads and classifies control-channel replies. A reply is a 3-digit
//! status code followed by a message, terminated by CRLF. Replies whose
//! leading digit is greater than 3 indicate a server-side failure and are
//! surfaced as errors so the caller decides termination policy.

use std::io::Read;

use crate::error::{ConnectionError, FtpClientError, ProtocolError};

/// Standard FTP reply codes the client inspects by value
pub const READY: u16 = 220;
pub const PASSIVE_MODE: u16 = 227;
pub const LOGIN_SUCCESS: u16 = 230;
pub const PASSWORD_REQUIRED: u16 = 331;
pub const AUTH_FAILED: u16 = 530;

const TERMINATOR: &[u8] = b"\r\n";
const READ_CHUNK_SIZE: usize = 8192;

/// A parsed server reply: status code plus the full reply text.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub code: u16,
    pub text: String,
}

impl Reply {
    /// The reply text without the trailing terminator.
    pub fn message(&self) -> &str {
        self.text.trim_end()
    }
}

/// Reads one reply from the control channel.
///
/// Accumulates bytes until the terminator is seen at the tail of the
/// buffer, so the result is the same no matter how the bytes are
/// fragmented on the wire. Continuation-style multi-line replies are not
/// detected; the first terminator ends the read.
pub fn read_reply<R: Read>(reader: &mut R) -> Result<Reply, FtpClientError> {
    let mut accumulated: Vec<u8> = Vec::new();
    let mut chunk = [0u8; READ_CHUNK_SIZE];

    while !accumulated.ends_with(TERMINATOR) {
        let n = reader.read(&mut chunk).map_err(ConnectionError::Io)?;
        if n == 0 {
            return Err(ProtocolError::TruncatedReply.into());
        }
        accumulated.extend_from_slice(&chunk[..n]);
    }

    let text = String::from_utf8(accumulated)
        .map_err(|e| ProtocolError::MalformedReply(format!("not valid UTF-8: {}", e)))?;
    classify(text)
}

/// Parses the status code and classifies the reply.
///
/// A leading digit greater than 3 is a server-side error.
pub fn classify(text: String) -> Result<Reply, FtpClientError> {
    let code = parse_code(&text)
        .ok_or_else(|| ProtocolError::MalformedReply(text.trim_end().to_string()))?;

    if code / 100 > 3 {
        return Err(FtpClientError::Server {
            code,
            message: text.trim_end().to_string(),
        });
    }

    Ok(Reply { code, text })
}

fn parse_code(text: &str) -> Option<u16> {
    let digits = text.get(..3)?;
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    // Delivers the wrapped bytes one at a time, mimicking worst-case
    // fragmentation on the wire.
    struct OneByteReader {
        data: Vec<u8>,
        pos: usize,
    }

    impl Read for OneByteReader {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if self.pos >= self.data.len() || buf.is_empty() {
                return Ok(0);
            }
            buf[0] = self.data[self.pos];
            self.pos += 1;
            Ok(1)
        }
    }

    #[test]
    fn test_read_single_chunk() {
        let mut reader = Cursor::new(b"230 OK\r\n".to_vec());
        let reply = read_reply(&mut reader).unwrap();
        assert_eq!(reply.code, 230);
        assert_eq!(reply.text, "230 OK\r\n");
        assert_eq!(reply.message(), "230 OK");
    }

    #[test]
    fn test_read_is_fragmentation_idempotent() {
        let wire = b"230 OK\r\n".to_vec();
        let mut whole = Cursor::new(wire.clone());
        let mut fragmented = OneByteReader {
            data: wire,
            pos: 0,
        };
        assert_eq!(
            read_reply(&mut whole).unwrap(),
            read_reply(&mut fragmented).unwrap()
        );
    }

    #[test]
    fn test_error_iff_leading_digit_above_three() {
        assert!(matches!(
            classify("530 bad\r\n".to_string()),
            Err(FtpClientError::Server { code: 530, .. })
        ));
        assert!(matches!(
            classify("425 no channel\r\n".to_string()),
            Err(FtpClientError::Server { code: 425, .. })
        ));
        assert!(classify("230 ok\r\n".to_string()).is_ok());
        assert!(classify("331 need password\r\n".to_string()).is_ok());
        assert!(classify("150 opening\r\n".to_string()).is_ok());
    }

    #[test]
    fn test_malformed_reply_rejected() {
        assert!(matches!(
            classify("hello\r\n".to_string()),
            Err(FtpClientError::Protocol(ProtocolError::MalformedReply(_)))
        ));
        assert!(matches!(
            classify("2x0 ok\r\n".to_string()),
            Err(FtpClientError::Protocol(ProtocolError::MalformedReply(_)))
        ));
        assert!(matches!(
            classify("\r\n".to_string()),
            Err(FtpClientError::Protocol(ProtocolError::MalformedReply(_)))
        ));
    }

    #[test]
    fn test_eof_before_terminator() {
        let mut reader = Cursor::new(b"220 half a repl".to_vec());
        assert!(matches!(
            read_reply(&mut reader),
            Err(FtpClientError::Protocol(ProtocolError::TruncatedReply))
        ));
    }

    #[test]
    fn test_reading_stops_at_first_terminator() {
        // With byte-at-a-time delivery the reader must not consume past
        // the terminator into a following reply.
        let mut reader = OneByteReader {
            data: b"220 ready\r\n230 next\r\n".to_vec(),
            pos: 0,
        };
        let reply = read_reply(&mut reader).unwrap();
        assert_eq!(reply.code, READY);
        assert_eq!(reply.text, "220 ready\r\n");

        let next = read_reply(&mut reader).unwrap();
        assert_eq!(next.code, 230);
    }
}
