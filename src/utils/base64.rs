//! Base64 encoding utilities
//!
//! This module provides base64 encoding and builds HTTP Basic credentials.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

/// Encode data as base64
pub fn encode_base64(data: &[u8]) -> String {
    STANDARD.encode(data)
}

/// Build the value of an HTTP Basic `Authorization` header.
///
/// The credentials are joined as `username:password` and encoded from
/// their UTF-8 bytes.
pub fn basic_authorization(username: &str, password: &str) -> String {
    let credentials = format!("{}:{}", username, password);
    format!("Basic {}", encode_base64(credentials.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode() {
        assert_eq!(encode_base64(b"Hello, World!"), "SGVsbG8sIFdvcmxkIQ==");
        assert_eq!(encode_base64(b""), "");
    }

    #[test]
    fn test_basic_authorization() {
        assert_eq!(basic_authorization("u", "p"), "Basic dTpw");
        assert_eq!(
            basic_authorization("Aladdin", "open sesame"),
            "Basic QWxhZGRpbjpvcGVuIHNlc2FtZQ=="
        );
    }

    #[test]
    fn test_basic_authorization_utf8() {
        let header = basic_authorization("josé", "pässword");
        let encoded = header.strip_prefix("Basic ").unwrap();
        let decoded = STANDARD.decode(encoded).unwrap();
        assert_eq!(String::from_utf8(decoded).unwrap(), "josé:pässword");
    }
}
