//! Client builder.
//!
//! Resolves the target address and assembles an immutable [`ClientConfig`].

use std::net::{SocketAddr, ToSocketAddrs};
use std::time::Duration;

use bytes::Bytes;

use crate::client::{Client, ClientConfig, DEFAULT_TIMEOUT};
use crate::error::{Error, Result};
use crate::version::Version;

/// Standard SNMP agent port.
const SNMP_PORT: u16 = 161;

/// Builder for constructing SNMP clients.
///
/// # Example
///
/// ```rust,no_run
/// use snmp_lite::{Client, Version};
/// use std::time::Duration;
///
/// # fn example() -> snmp_lite::Result<()> {
/// let client = Client::builder("192.168.1.1")
///     .community("private")
///     .version(Version::V1)
///     .timeout(Duration::from_secs(2))
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct ClientBuilder {
    target: String,
    community: String,
    version: Version,
    timeout: Duration,
}

impl ClientBuilder {
    /// Create a new client builder for the given target.
    ///
    /// The target is a host, `host:port`, or address string. When no port
    /// is given, the standard SNMP port 161 is used.
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            community: "public".into(),
            version: Version::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the community string (default: "public").
    pub fn community(mut self, community: impl Into<String>) -> Self {
        self.community = community.into();
        self
    }

    /// Set the SNMP version (default: v2c).
    pub fn version(mut self, version: Version) -> Self {
        self.version = version;
        self
    }

    /// Set the bound on connect and receive (default: 5 seconds).
    ///
    /// A call with no response fails with [`Error::Timeout`](crate::Error::Timeout)
    /// after this long; there is no unbounded wait.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Resolve the target and build the client.
    ///
    /// No I/O with the agent happens here; sockets are opened per call.
    pub fn build(self) -> Result<Client> {
        let target = self.resolve_target()?;
        let config = ClientConfig {
            version: self.version,
            community: Bytes::copy_from_slice(self.community.as_bytes()),
            timeout: self.timeout,
        };
        Ok(Client::new(target, config))
    }

    /// Resolve the target string, defaulting the port to 161.
    fn resolve_target(&self) -> Result<SocketAddr> {
        // First as-is, for "host:port" and full address forms
        if let Ok(mut addrs) = self.target.to_socket_addrs()
            && let Some(addr) = addrs.next()
        {
            return Ok(addr);
        }

        // Then as a bare host with the standard port
        (self.target.as_str(), SNMP_PORT)
            .to_socket_addrs()
            .map_err(|e| {
                Error::Config(format!("could not resolve address '{}': {}", self.target, e))
            })?
            .next()
            .ok_or_else(|| Error::Config(format!("could not resolve address '{}'", self.target)))
    }
}
