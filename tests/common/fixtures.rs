//! MIB data fixtures for the test agent.

use bytes::Bytes;
use snmp_lite::{Oid, Value, oid};
use std::collections::BTreeMap;

/// sysDescr.0
pub fn sys_descr() -> Oid {
    oid!(1, 3, 6, 1, 2, 1, 1, 1, 0)
}

/// sysUpTime.0
pub fn sys_uptime() -> Oid {
    oid!(1, 3, 6, 1, 2, 1, 1, 3, 0)
}

/// sysName.0
pub fn sys_name() -> Oid {
    oid!(1, 3, 6, 1, 2, 1, 1, 5, 0)
}

/// ifHCInOctets.1 (a Counter64 column)
pub fn if_hc_in_octets() -> Oid {
    oid!(1, 3, 6, 1, 2, 1, 31, 1, 1, 1, 6, 1)
}

/// An OID bound to a tag this crate has no mapping for.
pub fn vendor_blob() -> Oid {
    oid!(1, 3, 6, 1, 4, 1, 9999, 1, 0)
}

/// A small system-group MIB for the default test agent.
pub fn system_mib() -> BTreeMap<Oid, Value> {
    let mut mib = BTreeMap::new();
    mib.insert(
        sys_descr(),
        Value::OctetString(Bytes::from_static(b"Test SNMP Agent")),
    );
    mib.insert(sys_uptime(), Value::TimeTicks(123456));
    mib.insert(
        sys_name(),
        Value::OctetString(Bytes::from_static(b"test-agent")),
    );
    mib.insert(if_hc_in_octets(), Value::Counter64(10_000_000_000));
    mib.insert(
        vendor_blob(),
        Value::Unknown {
            tag: 0x47,
            data: Bytes::from_static(&[0xDE, 0xAD]),
        },
    );
    mib
}
