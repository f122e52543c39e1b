//! BER encoding.
//!
//! [`EncodeBuf`] builds messages back-to-front: content is pushed in
//! reverse field order, and each constructed header is written after its
//! content, when the content length is already known. Reversing the buffer
//! once at the end yields the wire bytes. This generalizes the classic
//! "build the body, then patch the outer SEQUENCE length" two-pass encode
//! to arbitrarily nested structures, long-form lengths included.

use super::length::encode_length;
use super::tag;
use crate::oid::Oid;
use bytes::Bytes;

/// Reverse-building BER encode buffer.
///
/// Fields must be pushed in reverse order: the last field of a structure
/// first. [`push_sequence`](Self::push_sequence) and
/// [`push_constructed`](Self::push_constructed) take closures that follow
/// the same rule for nested content.
///
/// # Examples
///
/// ```
/// use snmp_lite::ber::EncodeBuf;
///
/// // SEQUENCE { INTEGER 1, INTEGER 2 }
/// let mut buf = EncodeBuf::new();
/// buf.push_sequence(|buf| {
///     buf.push_integer(2); // last field first
///     buf.push_integer(1);
/// });
/// assert_eq!(&buf.finish()[..], &[0x30, 0x06, 0x02, 0x01, 0x01, 0x02, 0x01, 0x02]);
/// ```
#[derive(Default)]
pub struct EncodeBuf {
    /// Bytes in reverse wire order.
    buf: Vec<u8>,
}

impl EncodeBuf {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty buffer with capacity for `cap` bytes.
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            buf: Vec::with_capacity(cap),
        }
    }

    /// Number of bytes written so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Push a tag byte.
    pub fn push_tag(&mut self, tag: u8) {
        self.buf.push(tag);
    }

    /// Push a length field.
    pub fn push_length(&mut self, len: usize) {
        let (bytes, n) = encode_length(len);
        // encode_length already yields reversed bytes
        self.buf.extend_from_slice(&bytes[..n]);
    }

    /// Push raw content bytes (given in wire order).
    pub fn push_bytes(&mut self, data: &[u8]) {
        self.buf.extend(data.iter().rev());
    }

    /// Push a complete INTEGER (tag, length, minimal two's-complement content).
    pub fn push_integer(&mut self, value: i32) {
        let n = integer_content_len(value);
        for i in 0..n {
            self.buf.push((value >> (8 * i)) as u8);
        }
        self.push_length(n);
        self.push_tag(tag::universal::INTEGER);
    }

    /// Push an unsigned 32-bit value with the given application tag.
    ///
    /// A leading zero octet is added when the top content bit would
    /// otherwise read as a sign bit.
    pub fn push_unsigned32(&mut self, tag: u8, value: u32) {
        let n = unsigned32_content_len(value);
        let wide = value as u64;
        for i in 0..n {
            self.buf.push((wide >> (8 * i)) as u8);
        }
        self.push_length(n);
        self.push_tag(tag);
    }

    /// Push a Counter64 value (unsigned 64-bit, application tag 0x46).
    pub fn push_integer64(&mut self, value: u64) {
        let n = unsigned64_content_len(value);
        let wide = value as u128;
        for i in 0..n {
            self.buf.push((wide >> (8 * i)) as u8);
        }
        self.push_length(n);
        self.push_tag(tag::application::COUNTER64);
    }

    /// Push a complete OCTET STRING.
    pub fn push_octet_string(&mut self, data: &[u8]) {
        self.push_bytes(data);
        self.push_length(data.len());
        self.push_tag(tag::universal::OCTET_STRING);
    }

    /// Push a NULL (tag 0x05, length 0).
    pub fn push_null(&mut self) {
        self.push_length(0);
        self.push_tag(tag::universal::NULL);
    }

    /// Push a complete OBJECT IDENTIFIER.
    pub fn push_oid(&mut self, oid: &Oid) {
        let content = oid.to_ber_smallvec();
        self.push_bytes(&content);
        self.push_length(content.len());
        self.push_tag(tag::universal::OBJECT_IDENTIFIER);
    }

    /// Push a SEQUENCE whose content is written by the closure.
    pub fn push_sequence(&mut self, f: impl FnOnce(&mut Self)) {
        self.push_constructed(tag::universal::SEQUENCE, f);
    }

    /// Push a constructed type with the given tag.
    ///
    /// The closure writes the content (in reverse field order); the length
    /// and tag are prepended afterwards.
    pub fn push_constructed(&mut self, tag: u8, f: impl FnOnce(&mut Self)) {
        let before = self.buf.len();
        f(self);
        let content_len = self.buf.len() - before;
        self.push_length(content_len);
        self.push_tag(tag);
    }

    /// Reverse into wire order and return the finished bytes.
    pub fn finish(mut self) -> Bytes {
        self.buf.reverse();
        Bytes::from(self.buf)
    }
}

/// Minimal two's-complement content length for a signed 32-bit integer.
pub fn integer_content_len(value: i32) -> usize {
    let mut len = 4;
    while len > 1 {
        let top = (value >> ((len - 1) * 8)) as u8;
        let next_msb = ((value >> ((len - 2) * 8)) as u8) & 0x80;
        if (top == 0x00 && next_msb == 0) || (top == 0xFF && next_msb != 0) {
            len -= 1;
        } else {
            break;
        }
    }
    len
}

/// Minimal content length for an unsigned 32-bit value.
///
/// Includes the leading zero octet needed when the top bit is set.
pub fn unsigned32_content_len(value: u32) -> usize {
    let mut len = 1;
    let mut temp = value;
    while temp > 0xFF {
        len += 1;
        temp >>= 8;
    }
    if temp & 0x80 != 0 { len + 1 } else { len }
}

/// Minimal content length for an unsigned 64-bit value.
pub fn unsigned64_content_len(value: u64) -> usize {
    let mut len = 1;
    let mut temp = value;
    while temp > 0xFF {
        len += 1;
        temp >>= 8;
    }
    if temp & 0x80 != 0 { len + 1 } else { len }
}
