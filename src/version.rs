//! SNMP protocol version.

/// SNMP protocol version.
///
/// The wire encoding differs from the human-facing labels: SNMPv1 is
/// encoded as INTEGER 0 and SNMPv2c as INTEGER 1 (RFC 1157 / RFC 1901).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Version {
    /// SNMPv1 (wire value 0)
    V1,
    /// SNMPv2c (wire value 1)
    V2c,
}

impl Version {
    /// Create from the wire integer.
    pub fn from_i32(value: i32) -> Option<Self> {
        match value {
            0 => Some(Self::V1),
            1 => Some(Self::V2c),
            _ => None,
        }
    }

    /// Get the wire integer.
    pub fn as_i32(self) -> i32 {
        match self {
            Self::V1 => 0,
            Self::V2c => 1,
        }
    }
}

impl Default for Version {
    /// V2c is the default, matching the most widely deployed community version.
    fn default() -> Self {
        Self::V2c
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::V1 => write!(f, "v1"),
            Self::V2c => write!(f, "v2c"),
        }
    }
}
