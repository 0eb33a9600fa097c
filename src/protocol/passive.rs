//! Module `passive`
//!
//! Decodes the passive-mode reply into a data-channel endpoint. The
//! server advertises `(h1,h2,h3,h4,p1,p2)` inside the 227 reply text;
//! the address is `h1.h2.h3.h4` and the port is `p1 * 256 + p2`.

use std::net::{Ipv4Addr, SocketAddr};

use crate::error::{FtpClientError, ProtocolError};
use crate::protocol::reply::{PASSIVE_MODE, Reply};

/// Parses the endpoint out of a passive-mode reply.
///
/// Any reply other than 227, or a 227 reply whose parenthesized field
/// group is missing or malformed, is a protocol error.
pub fn parse_passive_reply(reply: &Reply) -> Result<SocketAddr, FtpClientError> {
    if reply.code != PASSIVE_MODE {
        return Err(ProtocolError::PassiveRefused(reply.message().to_string()).into());
    }

    let fields = extract_fields(&reply.text)
        .ok_or_else(|| ProtocolError::InvalidPassiveEndpoint(reply.message().to_string()))?;

    let ip = Ipv4Addr::new(fields[0], fields[1], fields[2], fields[3]);
    let port = u16::from(fields[4]) * 256 + u16::from(fields[5]);
    Ok(SocketAddr::from((ip, port)))
}

/// Pulls the six decimal fields out of the first parenthesized group.
fn extract_fields(text: &str) -> Option<[u8; 6]> {
    let (_, rest) = text.split_once('(')?;
    let (inner, _) = rest.split_once(')')?;

    let mut fields = [0u8; 6];
    let mut count = 0;
    for part in inner.split(',') {
        if count == 6 {
            return None;
        }
        fields[count] = part.trim().parse().ok()?;
        count += 1;
    }
    if count != 6 {
        return None;
    }
    Some(fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply(code: u16, text: &str) -> Reply {
        Reply {
            code,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_parse_valid_endpoint() {
        let r = reply(227, "227 Entering Passive Mode (127,0,0,1,200,50)\r\n");
        let addr = parse_passive_reply(&r).unwrap();
        assert_eq!(addr.to_string(), "127.0.0.1:51250");
    }

    #[test]
    fn test_parse_port_arithmetic() {
        let r = reply(227, "227 ok (10,20,30,40,1,0)\r\n");
        assert_eq!(parse_passive_reply(&r).unwrap().to_string(), "10.20.30.40:256");

        let r = reply(227, "227 ok (10,20,30,40,255,255)\r\n");
        assert_eq!(parse_passive_reply(&r).unwrap().port(), 65535);
    }

    #[test]
    fn test_non_227_is_refusal() {
        let r = reply(200, "200 fine\r\n");
        assert!(matches!(
            parse_passive_reply(&r),
            Err(FtpClientError::Protocol(ProtocolError::PassiveRefused(_)))
        ));
    }

    #[test]
    fn test_missing_parenthesis() {
        let r = reply(227, "227 Entering Passive Mode 127,0,0,1,200,50\r\n");
        assert!(matches!(
            parse_passive_reply(&r),
            Err(FtpClientError::Protocol(ProtocolError::InvalidPassiveEndpoint(_)))
        ));
    }

    #[test]
    fn test_wrong_field_count() {
        let r = reply(227, "227 ok (127,0,0,1,200)\r\n");
        assert!(parse_passive_reply(&r).is_err());

        let r = reply(227, "227 ok (127,0,0,1,200,50,9)\r\n");
        assert!(parse_passive_reply(&r).is_err());
    }

    #[test]
    fn test_non_numeric_field() {
        let r = reply(227, "227 ok (127,0,x,1,200,50)\r\n");
        assert!(parse_passive_reply(&r).is_err());
    }

    #[test]
    fn test_field_out_of_octet_range() {
        let r = reply(227, "227 ok (300,0,0,1,200,50)\r\n");
        assert!(parse_passive_reply(&r).is_err());
    }
}
