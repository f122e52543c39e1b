//! Hexadecimal encoding utilities.

use std::fmt;

/// Encode bytes as lowercase hex string.
///
/// # Examples
///
/// ```
/// use snmp_lite::format::hex::encode;
///
/// assert_eq!(encode(&[0xde, 0xad, 0xbe, 0xef]), "deadbeef");
/// assert_eq!(encode(&[0x00, 0xff]), "00ff");
/// ```
pub fn encode(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        use fmt::Write;
        let _ = write!(out, "{:02x}", b);
    }
    out
}

/// Lazy hex formatter - only formats when actually displayed.
///
/// Avoids allocation when logging at disabled levels.
pub struct Bytes<'a>(pub &'a [u8]);

impl fmt::Debug for Bytes<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in self.0 {
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}

impl fmt::Display for Bytes<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode() {
        assert_eq!(encode(b"Hello world!"), "48656c6c6f20776f726c6421");
        assert_eq!(encode(&[0x00, 0xff]), "00ff");
        assert_eq!(encode(&[]), "");
    }

    #[test]
    fn test_lazy_formatter() {
        let data = [0xde, 0xad, 0xbe, 0xef];
        assert_eq!(format!("{}", Bytes(&data)), "deadbeef");
        assert_eq!(format!("{:?}", Bytes(&data)), "deadbeef");
    }
}
