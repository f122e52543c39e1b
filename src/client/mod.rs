//! SNMP client implementation.
//!
//! One `get` call is a strictly linear pipeline: validate the OID, frame
//! the request, open a socket, send, receive one datagram, decode, extract
//! the binding. No state survives a call except the client's configuration
//! and the request-id counter, so calls are safe to run concurrently.

mod builder;

pub use builder::ClientBuilder;

use crate::error::{DecodeErrorKind, Error, Result};
use crate::message::CommunityMessage;
use crate::oid::Oid;
use crate::pdu::{Pdu, PduType};
use crate::transport::{Transport, UdpTransport};
use crate::value::Value;
use crate::varbind::VarBind;
use crate::version::Version;
use bytes::Bytes;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicI32, Ordering};
use std::time::Duration;
use tracing::instrument;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Request IDs come from a process-wide counter so concurrent clients
/// never reuse an ID against the same agent.
static REQUEST_ID: AtomicI32 = AtomicI32::new(1);

/// Client configuration.
///
/// Immutable once constructed; owned by the [`Client`] for its lifetime.
/// Most users should use [`ClientBuilder`] rather than constructing this
/// directly.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// SNMP version (default: V2c)
    pub version: Version,
    /// Community string (default: "public")
    pub community: Bytes,
    /// Bound on connect and receive (default: 5 seconds)
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            version: Version::V2c,
            community: Bytes::from_static(b"public"),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// SNMP GET client.
///
/// # Example
///
/// ```rust,no_run
/// use snmp_lite::{Client, oid};
///
/// # async fn example() -> snmp_lite::Result<()> {
/// let client = Client::builder("192.168.1.1").community("public").build()?;
///
/// let sys_descr = client.get(&oid!(1, 3, 6, 1, 2, 1, 1, 1, 0)).await?;
/// println!("{}", sys_descr);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Client {
    config: ClientConfig,
    target: SocketAddr,
}

impl Client {
    /// Create a new client builder.
    ///
    /// `target` is a host or `host:port` string; port 161 is assumed when
    /// none is given.
    pub fn builder(target: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(target)
    }

    /// Create a client from a resolved address and explicit configuration.
    pub fn new(target: SocketAddr, config: ClientConfig) -> Self {
        Self { config, target }
    }

    /// The target (peer) address.
    pub fn peer_addr(&self) -> SocketAddr {
        self.target
    }

    /// Allocate the next request ID.
    fn next_request_id(&self) -> i32 {
        REQUEST_ID.fetch_add(1, Ordering::Relaxed)
    }

    /// GET a single OID.
    ///
    /// Validates the OID before any network activity, then performs one
    /// send/receive exchange over a socket scoped to this call. The socket
    /// is closed on every exit path, including decode failure. No retries:
    /// a single attempt either succeeds or the call fails.
    #[instrument(skip(self), err, fields(snmp.target = %self.target, snmp.oid = %oid))]
    pub async fn get(&self, oid: &Oid) -> Result<VarBind> {
        oid.validate()?;

        let request_id = self.next_request_id();
        let pdu = Pdu::get_request(request_id, std::slice::from_ref(oid));
        let message = CommunityMessage::new(
            self.config.version,
            self.config.community.clone(),
            pdu,
        );
        let data = message.encode();

        tracing::debug!(
            snmp.request_id = request_id,
            snmp.bytes = data.len(),
            "sending GetRequest"
        );

        let transport = UdpTransport::connect_timeout(self.target, self.config.timeout).await?;
        transport.send(&data).await?;
        let (response_data, _source) = transport.recv(request_id, self.config.timeout).await?;

        let response = CommunityMessage::decode(response_data)?;

        if response.version != self.config.version {
            tracing::debug!(
                expected = %self.config.version,
                actual = %response.version,
                "version mismatch in response"
            );
            return Err(Error::VersionMismatch {
                expected: self.config.version,
                actual: response.version,
            });
        }

        let response_pdu = response.into_pdu();

        if response_pdu.pdu_type != PduType::Response {
            return Err(Error::decode(
                0,
                DecodeErrorKind::UnexpectedTag {
                    expected: PduType::Response.tag(),
                    actual: response_pdu.pdu_type.tag(),
                },
            ));
        }

        if response_pdu.request_id != request_id {
            tracing::debug!(
                expected = request_id,
                actual = response_pdu.request_id,
                "request ID mismatch in response"
            );
            return Err(Error::RequestIdMismatch {
                expected: request_id,
                actual: response_pdu.request_id,
            });
        }

        if response_pdu.is_error() {
            let status = response_pdu.error_status_enum();
            // error_index is 1-based; 0 means the error applies to the PDU
            let oid = (response_pdu.error_index as usize)
                .checked_sub(1)
                .and_then(|idx| response_pdu.varbinds.get(idx))
                .map(|vb| vb.oid.clone());
            return Err(Error::Snmp {
                target: Some(self.target),
                status,
                index: response_pdu.error_index.max(0) as u32,
                oid,
            });
        }

        tracing::debug!(
            snmp.request_id = request_id,
            snmp.varbind_count = response_pdu.varbinds.len(),
            "received GetResponse"
        );

        response_pdu
            .varbinds
            .into_iter()
            .next()
            .ok_or_else(|| Error::decode(0, DecodeErrorKind::EmptyVarbindList))
    }

    /// GET an OID given in dotted-decimal notation, formatted for display.
    ///
    /// Octet strings render as text (hex when not UTF-8), integers and
    /// 64-bit counters as decimal. A value with an unmapped tag yields
    /// [`Error::UnsupportedValueType`] rather than an ambiguous result.
    #[instrument(skip(self), err, fields(snmp.target = %self.target))]
    pub async fn get_display(&self, oid: &str) -> Result<String> {
        let oid = Oid::parse(oid)?;
        let varbind = self.get(&oid).await?;

        match &varbind.value {
            Value::Unknown { tag, .. } => Err(Error::UnsupportedValueType { tag: *tag }),
            value => Ok(value.to_string()),
        }
    }
}
