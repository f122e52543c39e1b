//! Variable binding (VarBind) type.
//!
//! A VarBind pairs an OID with a value. The varbind list is modeled as a
//! sequence even though a single-OID GET populates exactly one entry, so
//! multi-OID operations stay an additive extension.

use crate::ber::{Decoder, EncodeBuf};
use crate::error::Result;
use crate::oid::Oid;
use crate::value::Value;

/// Variable binding - an OID-value pair.
#[derive(Debug, Clone, PartialEq)]
pub struct VarBind {
    /// The object identifier naming the binding.
    pub oid: Oid,
    /// The bound value.
    pub value: Value,
}

impl VarBind {
    /// Create a new VarBind.
    pub fn new(oid: Oid, value: Value) -> Self {
        Self { oid, value }
    }

    /// Create a VarBind with a NULL placeholder value, as GET requests
    /// carry no value.
    pub fn null(oid: Oid) -> Self {
        Self {
            oid,
            value: Value::Null,
        }
    }

    /// Encode to BER.
    pub fn encode(&self, buf: &mut EncodeBuf) {
        buf.push_sequence(|buf| {
            self.value.encode(buf);
            buf.push_oid(&self.oid);
        });
    }

    /// Decode from BER.
    pub fn decode(decoder: &mut Decoder) -> Result<Self> {
        let mut seq = decoder.read_sequence()?;
        let oid = seq.read_oid()?;
        let value = Value::decode(&mut seq)?;
        Ok(VarBind { oid, value })
    }
}

impl std::fmt::Display for VarBind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} = {}", self.oid, self.value)
    }
}

/// Encode a list of VarBinds as SEQUENCE-of-SEQUENCE.
pub fn encode_varbind_list(buf: &mut EncodeBuf, varbinds: &[VarBind]) {
    buf.push_sequence(|buf| {
        // Reverse buffer: last varbind first
        for vb in varbinds.iter().rev() {
            vb.encode(buf);
        }
    });
}

/// Decode a varbind-list SEQUENCE, preserving encounter order.
pub fn decode_varbind_list(decoder: &mut Decoder) -> Result<Vec<VarBind>> {
    let mut seq = decoder.read_sequence()?;

    let mut varbinds = Vec::with_capacity((seq.remaining() / 16).max(1));
    while !seq.is_empty() {
        varbinds.push(VarBind::decode(&mut seq)?);
    }

    Ok(varbinds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oid;
    use bytes::Bytes;

    #[test]
    fn test_varbind_roundtrip() {
        let vb = VarBind::new(oid!(1, 3, 6, 1), Value::Integer(42));

        let mut buf = EncodeBuf::new();
        vb.encode(&mut buf);

        let mut decoder = Decoder::new(buf.finish());
        assert_eq!(VarBind::decode(&mut decoder).unwrap(), vb);
    }

    #[test]
    fn test_null_varbind_wire_bytes() {
        // GET request binding: SEQUENCE { OID 1.3.6.1, NULL }
        let vb = VarBind::null(oid!(1, 3, 6, 1));
        let mut buf = EncodeBuf::new();
        vb.encode(&mut buf);
        assert_eq!(
            &buf.finish()[..],
            &[0x30, 0x07, 0x06, 0x03, 0x2B, 0x06, 0x01, 0x05, 0x00]
        );
    }

    #[test]
    fn test_varbind_list_roundtrip() {
        let varbinds = vec![
            VarBind::new(oid!(1, 3, 6, 1), Value::Integer(1)),
            VarBind::new(
                oid!(1, 3, 6, 2),
                Value::OctetString(Bytes::from_static(b"two")),
            ),
            VarBind::new(oid!(1, 3, 6, 3), Value::Counter64(3)),
        ];

        let mut buf = EncodeBuf::new();
        encode_varbind_list(&mut buf, &varbinds);

        let mut decoder = Decoder::new(buf.finish());
        assert_eq!(decode_varbind_list(&mut decoder).unwrap(), varbinds);
    }

    #[test]
    fn test_varbind_list_order_preserved() {
        let varbinds: Vec<VarBind> = (0u32..10)
            .map(|i| VarBind::new(oid!(1, 3, 6, 1, i), Value::Integer(i as i32)))
            .collect();

        let mut buf = EncodeBuf::new();
        encode_varbind_list(&mut buf, &varbinds);

        let mut decoder = Decoder::new(buf.finish());
        let decoded = decode_varbind_list(&mut decoder).unwrap();
        assert_eq!(decoded.len(), varbinds.len());
        for (i, vb) in decoded.iter().enumerate() {
            assert_eq!(vb.oid, oid!(1, 3, 6, 1, i as u32));
            assert_eq!(vb.value, Value::Integer(i as i32));
        }
    }

    #[test]
    fn test_varbind_list_empty() {
        let mut buf = EncodeBuf::new();
        encode_varbind_list(&mut buf, &[]);

        let mut decoder = Decoder::new(buf.finish());
        assert!(decode_varbind_list(&mut decoder).unwrap().is_empty());
    }

    #[test]
    fn test_varbind_list_with_exceptions() {
        let varbinds = vec![
            VarBind::new(
                oid!(1, 3, 6, 1, 2, 1, 1, 1, 0),
                Value::OctetString(Bytes::from_static(b"Linux router")),
            ),
            VarBind::new(oid!(1, 3, 6, 1, 2, 1, 1, 99, 0), Value::NoSuchObject),
        ];

        let mut buf = EncodeBuf::new();
        encode_varbind_list(&mut buf, &varbinds);

        let mut decoder = Decoder::new(buf.finish());
        let decoded = decode_varbind_list(&mut decoder).unwrap();
        assert_eq!(decoded, varbinds);
        assert!(!decoded[0].value.is_exception());
        assert!(decoded[1].value.is_exception());
    }

    #[test]
    fn test_varbind_truncated_fails() {
        // Valid header, body cut short mid-OID.
        let mut decoder = Decoder::from_slice(&[0x30, 0x07, 0x06, 0x03, 0x2B]);
        assert!(VarBind::decode(&mut decoder).is_err());
    }

    #[test]
    fn test_varbind_display() {
        let vb = VarBind::new(oid!(1, 3, 6, 1, 2, 1, 1, 3, 0), Value::TimeTicks(12345));
        assert_eq!(vb.to_string(), "1.3.6.1.2.1.1.3.0 = 12345");
    }
}
