// Allow large error types - the Error enum includes OIDs inline for debugging
// convenience. Boxing them would add complexity and allocations for a marginal
// size reduction.
#![allow(clippy::result_large_err)]

//! # snmp-lite
//!
//! Minimal async SNMP v1/v2c GET client.
//!
//! The crate covers exactly one operation: issue a GET request for a single
//! OID to an agent on UDP port 161, authenticated by a plaintext community
//! string, and decode the response. The BER codec underneath is hand-rolled
//! and bit-exact: base-128 OID subidentifiers, short- and long-form lengths,
//! two's-complement integers.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use snmp_lite::{Client, oid};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), snmp_lite::Error> {
//!     let client = Client::builder("192.168.1.1:161")
//!         .community("public")
//!         .timeout(Duration::from_secs(5))
//!         .build()?;
//!
//!     // Typed access to the binding
//!     let result = client.get(&oid!(1, 3, 6, 1, 2, 1, 1, 1, 0)).await?;
//!     println!("sysDescr: {}", result.value);
//!
//!     // Or dotted-string in, display string out
//!     let uptime = client.get_display("1.3.6.1.2.1.1.3.0").await?;
//!     println!("sysUpTime: {}", uptime);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## What it is not
//!
//! No GETNEXT/GETBULK/walks, no SET, no traps, no SNMPv3, no MIB name
//! resolution. OIDs go in and come out as raw numeric arcs. Callers that
//! need retries layer them on top; a call here is one send and one bounded
//! receive.

pub mod ber;
pub mod client;
pub mod error;
pub mod format;
pub mod message;
pub mod oid;
pub mod pdu;
pub mod transport;
pub mod value;
pub mod varbind;
pub mod version;

pub(crate) mod util;

// Re-exports for convenience
pub use client::{Client, ClientBuilder, ClientConfig};
pub use error::{DecodeErrorKind, Error, ErrorStatus, OidErrorKind, Result};
pub use message::CommunityMessage;
pub use oid::Oid;
pub use pdu::{Pdu, PduType};
pub use transport::{Transport, UdpTransport};
pub use value::Value;
pub use varbind::VarBind;
pub use version::Version;
