//! Object Identifier (OID) type and its BER codec.
//!
//! OIDs are stored as `SmallVec<[u32; 16]>` to avoid heap allocation for
//! common OIDs. The base-128 subidentifier codec lives here and is shared
//! by the message framer and the response decoder.

use crate::error::{DecodeErrorKind, Error, OidErrorKind, Result};
use smallvec::SmallVec;
use std::fmt;

/// Maximum number of arcs (subidentifiers) allowed in an OID.
///
/// Per RFC 2578 Section 3.5: "there are at most 128 sub-identifiers in a
/// value". Enforced during BER decoding and by [`Oid::validate()`].
pub const MAX_OID_LEN: usize = 128;

/// Largest first arc accepted for encoding.
///
/// X.690 only defines first arcs 0-2, but the packed first subidentifier
/// byte admits values up to 6 before `arc0*40 + arc1` stops being
/// representable alongside a sub-40 second arc, and that is the bound the
/// wire format actually enforces for requests.
pub const MAX_FIRST_ARC: u32 = 6;

/// Object Identifier.
///
/// An ordered sequence of arc values, used both as the request target and
/// as each response binding's name.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Oid {
    arcs: SmallVec<[u32; 16]>,
}

impl Oid {
    /// Create an OID from arc values.
    pub fn new(arcs: impl IntoIterator<Item = u32>) -> Self {
        Self {
            arcs: arcs.into_iter().collect(),
        }
    }

    /// Create an OID from a slice of arcs.
    ///
    /// # Examples
    ///
    /// ```
    /// use snmp_lite::oid::Oid;
    ///
    /// let oid = Oid::from_slice(&[1, 3, 6, 1, 2, 1, 1, 1, 0]);
    /// assert_eq!(oid.to_string(), "1.3.6.1.2.1.1.1.0");
    /// ```
    pub fn from_slice(arcs: &[u32]) -> Self {
        Self {
            arcs: SmallVec::from_slice(arcs),
        }
    }

    /// Parse an OID from dotted string notation (e.g., "1.3.6.1.2.1.1.1.0").
    ///
    /// Leading, trailing, and doubled dots are ignored, so ".1.3.6.1" parses
    /// the same as "1.3.6.1". Any non-numeric component fails with
    /// [`Error::InvalidOid`] carrying the offending input.
    ///
    /// Parsing checks syntax only. Arc range constraints are checked by
    /// [`validate()`](Self::validate), which the client runs before any
    /// network activity.
    pub fn parse(s: &str) -> Result<Self> {
        let mut arcs = SmallVec::new();

        for part in s.split('.') {
            if part.is_empty() {
                continue;
            }

            let arc: u32 = part.parse().map_err(|_| {
                Error::invalid_oid_with_input(OidErrorKind::InvalidArc, s.to_string())
            })?;

            arcs.push(arc);
        }

        Ok(Self { arcs })
    }

    /// Get the arc values.
    pub fn arcs(&self) -> &[u32] {
        &self.arcs
    }

    /// Get the number of arcs.
    pub fn len(&self) -> usize {
        self.arcs.len()
    }

    /// Check if the OID has no arcs.
    pub fn is_empty(&self) -> bool {
        self.arcs.is_empty()
    }

    /// Validate the constraints the packed first subidentifier imposes.
    ///
    /// - at least 2 arcs
    /// - `arc[0] <= 6`
    /// - `arc[1] <= 39`
    /// - at most [`MAX_OID_LEN`] arcs
    ///
    /// # Examples
    ///
    /// ```
    /// use snmp_lite::oid::Oid;
    ///
    /// assert!(Oid::parse("1.3.6.1.2.1.1.1.0").unwrap().validate().is_ok());
    /// assert!(Oid::parse("1").unwrap().validate().is_err());
    /// assert!(Oid::parse("7.1").unwrap().validate().is_err());
    /// assert!(Oid::parse("1.40").unwrap().validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        if self.arcs.len() < 2 {
            return Err(Error::invalid_oid(OidErrorKind::TooShort));
        }

        let first = self.arcs[0];
        if first > MAX_FIRST_ARC {
            return Err(Error::invalid_oid(OidErrorKind::InvalidFirstArc(first)));
        }

        let second = self.arcs[1];
        if second >= 40 {
            return Err(Error::invalid_oid(OidErrorKind::InvalidSecondArc {
                first,
                second,
            }));
        }

        if self.arcs.len() > MAX_OID_LEN {
            return Err(Error::invalid_oid(OidErrorKind::TooManyArcs {
                count: self.arcs.len(),
                max: MAX_OID_LEN,
            }));
        }

        Ok(())
    }

    /// Encode to BER content bytes, in a stack-allocated buffer.
    ///
    /// OID encoding (X.690 Section 8.19):
    /// - first two arcs packed as `arc0*40 + arc1`, itself base-128 encoded
    /// - each remaining arc base-128 encoded: 7-bit groups, most significant
    ///   first, continuation bit 0x80 on all but the last group
    pub fn to_ber_smallvec(&self) -> SmallVec<[u8; 64]> {
        let mut bytes = SmallVec::new();

        match self.arcs.len() {
            0 => return bytes,
            1 => encode_subidentifier(&mut bytes, self.arcs[0] * 40),
            _ => encode_subidentifier(&mut bytes, self.arcs[0] * 40 + self.arcs[1]),
        }

        for &arc in self.arcs.iter().skip(2) {
            encode_subidentifier(&mut bytes, arc);
        }

        bytes
    }

    /// Encode to BER content bytes.
    pub fn to_ber(&self) -> Vec<u8> {
        self.to_ber_smallvec().to_vec()
    }

    /// Encode to BER with arc validation.
    pub fn to_ber_checked(&self) -> Result<Vec<u8>> {
        self.validate()?;
        Ok(self.to_ber())
    }

    /// Decode from BER content bytes.
    ///
    /// Structural inverse of [`to_ber()`](Self::to_ber): the first
    /// subidentifier splits at the 40/80 boundaries into the first two
    /// arcs, then base-128 groups are consumed (continue while the high
    /// bit is set) until the declared bytes are exhausted.
    pub fn from_ber(data: &[u8]) -> Result<Self> {
        if data.is_empty() {
            return Ok(Self {
                arcs: SmallVec::new(),
            });
        }

        let mut arcs = SmallVec::new();

        // The first subidentifier packs the first two arcs. It may be
        // multi-byte when the second arc is large.
        let (first_subid, consumed) = decode_subidentifier(data)?;
        if first_subid < 40 {
            arcs.push(0);
            arcs.push(first_subid);
        } else if first_subid < 80 {
            arcs.push(1);
            arcs.push(first_subid - 40);
        } else {
            arcs.push(2);
            arcs.push(first_subid - 80);
        }

        let mut i = consumed;
        while i < data.len() {
            let (arc, n) = decode_subidentifier(&data[i..])?;
            arcs.push(arc);
            i += n;

            if arcs.len() > MAX_OID_LEN {
                return Err(Error::decode(
                    i,
                    DecodeErrorKind::OidTooLong {
                        count: arcs.len(),
                        max: MAX_OID_LEN,
                    },
                ));
            }
        }

        Ok(Self { arcs })
    }
}

/// Encode one subidentifier in base-128 variable length.
///
/// A value of exactly 0 encodes as a single zero byte.
#[inline]
fn encode_subidentifier(bytes: &mut SmallVec<[u8; 64]>, value: u32) {
    if value == 0 {
        bytes.push(0);
        return;
    }

    // Count the 7-bit groups, then emit MSB group first.
    let mut groups = 0;
    let mut temp = value;
    while temp > 0 {
        groups += 1;
        temp >>= 7;
    }

    for i in (0..groups).rev() {
        let mut byte = ((value >> (i * 7)) & 0x7F) as u8;
        if i > 0 {
            byte |= 0x80;
        }
        bytes.push(byte);
    }
}

/// Decode one subidentifier, returning (value, bytes_consumed).
fn decode_subidentifier(data: &[u8]) -> Result<(u32, usize)> {
    let mut value: u32 = 0;
    let mut i = 0;

    loop {
        if i >= data.len() {
            return Err(Error::decode(i, DecodeErrorKind::TruncatedData));
        }

        let byte = data[i];
        i += 1;

        if value > (u32::MAX >> 7) {
            return Err(Error::decode(i, DecodeErrorKind::IntegerOverflow));
        }

        value = (value << 7) | ((byte & 0x7F) as u32);

        if byte & 0x80 == 0 {
            break;
        }
    }

    Ok((value, i))
}

impl fmt::Debug for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Oid({})", self)
    }
}

impl fmt::Display for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for arc in &self.arcs {
            if !first {
                write!(f, ".")?;
            }
            write!(f, "{}", arc)?;
            first = false;
        }
        Ok(())
    }
}

impl std::str::FromStr for Oid {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<&[u32]> for Oid {
    fn from(arcs: &[u32]) -> Self {
        Self::from_slice(arcs)
    }
}

impl<const N: usize> From<[u32; N]> for Oid {
    fn from(arcs: [u32; N]) -> Self {
        Self::new(arcs)
    }
}

impl PartialOrd for Oid {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Oid {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.arcs.cmp(&other.arcs)
    }
}

/// Macro to create an OID from arc literals.
///
/// # Examples
///
/// ```
/// use snmp_lite::oid;
///
/// let sys_uptime = oid!(1, 3, 6, 1, 2, 1, 1, 3, 0);
/// assert_eq!(sys_uptime.to_string(), "1.3.6.1.2.1.1.3.0");
/// ```
#[macro_export]
macro_rules! oid {
    ($($arc:expr),* $(,)?) => {
        $crate::oid::Oid::from_slice(&[$($arc),*])
    };
}
