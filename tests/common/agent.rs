//! In-process SNMP responder for testing.
//!
//! Binds a UDP socket on an ephemeral localhost port, decodes incoming
//! GET requests with the crate's own codec, and answers from a fixed MIB
//! map. Fault modes cover the failure paths a real agent would exercise.

use crate::common::fixtures;

use bytes::Bytes;
use snmp_lite::{CommunityMessage, Oid, Pdu, Value, VarBind};
use std::collections::BTreeMap;
use std::net::SocketAddr;
use tokio::net::UdpSocket;
use tokio::task::JoinHandle;

/// How the agent answers requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentMode {
    /// Answer from the MIB; unknown OIDs get noSuchInstance.
    Normal,
    /// Never answer (for timeout tests).
    Silent,
    /// Answer every request with this error-status and error-index 1.
    ErrorStatus(i32),
    /// Answer with a request ID that doesn't match the request.
    WrongRequestId,
    /// Answer with the other protocol version.
    WrongVersion,
    /// Answer with bytes that are not valid BER.
    Garbage,
}

/// An in-process SNMP agent for testing.
///
/// Starts on creation, stops when dropped.
///
/// # Example
///
/// ```ignore
/// let agent = TestAgent::new().await;
/// let client = Client::builder(agent.addr().to_string()).build()?;
/// let result = client.get(&oid!(1, 3, 6, 1, 2, 1, 1, 1, 0)).await?;
/// ```
pub struct TestAgent {
    addr: SocketAddr,
    task: JoinHandle<()>,
}

impl TestAgent {
    /// Agent with the default system MIB, answering normally.
    pub async fn new() -> Self {
        Self::with_mode(AgentMode::Normal).await
    }

    /// Agent with the default system MIB and the given mode.
    pub async fn with_mode(mode: AgentMode) -> Self {
        Self::with_data(fixtures::system_mib(), mode).await
    }

    /// Agent with custom MIB data.
    pub async fn with_data(mib: BTreeMap<Oid, Value>, mode: AgentMode) -> Self {
        let socket = UdpSocket::bind("127.0.0.1:0")
            .await
            .expect("failed to bind test agent socket");
        let addr = socket.local_addr().expect("test agent local_addr");

        let task = tokio::spawn(async move {
            serve(socket, mib, mode).await;
        });

        Self { addr, task }
    }

    /// The agent's listening address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Stop the agent early.
    pub fn stop(&self) {
        self.task.abort();
    }
}

impl Drop for TestAgent {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn serve(socket: UdpSocket, mib: BTreeMap<Oid, Value>, mode: AgentMode) {
    let mut buf = vec![0u8; 65535];

    loop {
        let Ok((n, from)) = socket.recv_from(&mut buf).await else {
            return;
        };

        if mode == AgentMode::Silent {
            continue;
        }

        if mode == AgentMode::Garbage {
            let _ = socket.send_to(&[0xFF, 0x00, 0xBA, 0xAD], from).await;
            continue;
        }

        let Ok(request) = CommunityMessage::decode(Bytes::copy_from_slice(&buf[..n])) else {
            continue;
        };

        let request_id = match mode {
            AgentMode::WrongRequestId => request.pdu.request_id.wrapping_add(1000),
            _ => request.pdu.request_id,
        };

        let version = match mode {
            AgentMode::WrongVersion => match request.version {
                snmp_lite::Version::V1 => snmp_lite::Version::V2c,
                snmp_lite::Version::V2c => snmp_lite::Version::V1,
            },
            _ => request.version,
        };

        let mut pdu = Pdu::response(
            request_id,
            request
                .pdu
                .varbinds
                .iter()
                .map(|vb| {
                    let value = mib
                        .get(&vb.oid)
                        .cloned()
                        .unwrap_or(Value::NoSuchInstance);
                    VarBind::new(vb.oid.clone(), value)
                })
                .collect(),
        );

        if let AgentMode::ErrorStatus(status) = mode {
            pdu.error_status = status;
            pdu.error_index = 1;
        }

        let response = CommunityMessage::new(version, request.community.clone(), pdu);
        let _ = socket.send_to(&response.encode(), from).await;
    }
}
