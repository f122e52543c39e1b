//! GET operation tests using TestAgent.

mod common;

use common::{AgentMode, TestAgent, fixtures};
use snmp_lite::{Client, Error, ErrorStatus, Value, Version, oid};
use std::time::Duration;

fn client_for(agent: &TestAgent) -> Client {
    Client::builder(agent.addr().to_string())
        .community("public")
        .build()
        .unwrap()
}

/// Basic GET returns the expected octet string.
#[tokio::test]
async fn get_returns_value() {
    let agent = TestAgent::new().await;
    let client = client_for(&agent);

    let result = client.get(&oid!(1, 3, 6, 1, 2, 1, 1, 1, 0)).await.unwrap();

    assert_eq!(result.oid, oid!(1, 3, 6, 1, 2, 1, 1, 1, 0));
    assert_eq!(result.value.as_str(), Some("Test SNMP Agent"));
}

/// The response echoes the requested OID as the binding name.
#[tokio::test]
async fn get_timeticks_value() {
    let agent = TestAgent::new().await;
    let client = client_for(&agent);

    let result = client.get(&fixtures::sys_uptime()).await.unwrap();

    assert_eq!(result.oid, fixtures::sys_uptime());
    assert_eq!(result.value, Value::TimeTicks(123456));
}

/// Counter64 values survive the trip.
#[tokio::test]
async fn get_counter64_value() {
    let agent = TestAgent::new().await;
    let client = client_for(&agent);

    let result = client.get(&fixtures::if_hc_in_octets()).await.unwrap();

    assert_eq!(result.value, Value::Counter64(10_000_000_000));
}

/// GET on a missing OID returns the noSuchInstance exception value.
#[tokio::test]
async fn get_missing_oid_returns_no_such_instance() {
    let agent = TestAgent::new().await;
    let client = client_for(&agent);

    let result = client.get(&oid!(1, 3, 6, 1, 99, 99, 99)).await.unwrap();

    assert_eq!(result.value, Value::NoSuchInstance);
    assert!(result.value.is_exception());
}

/// V1 GET works the same way.
#[tokio::test]
async fn v1_get_works() {
    let agent = TestAgent::new().await;
    let client = Client::builder(agent.addr().to_string())
        .community("public")
        .version(Version::V1)
        .build()
        .unwrap();

    let result = client.get(&oid!(1, 3, 6, 1, 2, 1, 1, 1, 0)).await.unwrap();

    assert_eq!(result.value.as_str(), Some("Test SNMP Agent"));
}

/// get_display formats octet strings as text and integers as decimal.
#[tokio::test]
async fn get_display_formats_values() {
    let agent = TestAgent::new().await;
    let client = client_for(&agent);

    let descr = client.get_display("1.3.6.1.2.1.1.1.0").await.unwrap();
    assert_eq!(descr, "Test SNMP Agent");

    let uptime = client.get_display("1.3.6.1.2.1.1.3.0").await.unwrap();
    assert_eq!(uptime, "123456");

    let octets = client
        .get_display("1.3.6.1.2.1.31.1.1.1.6.1")
        .await
        .unwrap();
    assert_eq!(octets, "10000000000");
}

/// An unmapped value tag is preserved by get() and reported by get_display().
#[tokio::test]
async fn unknown_value_tag_is_reported() {
    let agent = TestAgent::new().await;
    let client = client_for(&agent);

    let result = client.get(&fixtures::vendor_blob()).await.unwrap();
    assert!(matches!(result.value, Value::Unknown { tag: 0x47, .. }));

    let err = client
        .get_display("1.3.6.1.4.1.9999.1.0")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::UnsupportedValueType { tag: 0x47 }));
}

/// GET with timeout when the agent doesn't respond.
#[tokio::test]
async fn get_times_out_when_agent_silent() {
    let agent = TestAgent::with_mode(AgentMode::Silent).await;
    let client = Client::builder(agent.addr().to_string())
        .timeout(Duration::from_millis(100))
        .build()
        .unwrap();

    let err = client.get(&oid!(1, 3, 6, 1, 2, 1, 1, 1, 0)).await.unwrap_err();

    assert!(matches!(err, Error::Timeout { .. }));
    assert!(err.to_string().contains("timeout"));
}

/// Non-zero error status surfaces as Error::Snmp, never as success.
#[tokio::test]
async fn error_status_surfaces_as_snmp_error() {
    // 2 = noSuchName
    let agent = TestAgent::with_mode(AgentMode::ErrorStatus(2)).await;
    let client = client_for(&agent);

    let err = client.get(&oid!(1, 3, 6, 1, 2, 1, 1, 1, 0)).await.unwrap_err();

    match err {
        Error::Snmp { status, index, oid, .. } => {
            assert_eq!(status, ErrorStatus::NoSuchName);
            assert_eq!(index, 1);
            assert_eq!(oid, Some(oid!(1, 3, 6, 1, 2, 1, 1, 1, 0)));
        }
        other => panic!("expected Snmp error, got {:?}", other),
    }
}

/// tooBig is surfaced with its own status.
#[tokio::test]
async fn too_big_status_surfaces() {
    let agent = TestAgent::with_mode(AgentMode::ErrorStatus(1)).await;
    let client = client_for(&agent);

    let err = client.get(&oid!(1, 3, 6, 1, 2, 1, 1, 1, 0)).await.unwrap_err();

    assert!(matches!(
        err,
        Error::Snmp {
            status: ErrorStatus::TooBig,
            ..
        }
    ));
}

/// A response with the wrong request ID is rejected.
#[tokio::test]
async fn wrong_request_id_rejected() {
    let agent = TestAgent::with_mode(AgentMode::WrongRequestId).await;
    let client = client_for(&agent);

    let err = client.get(&oid!(1, 3, 6, 1, 2, 1, 1, 1, 0)).await.unwrap_err();

    assert!(matches!(err, Error::RequestIdMismatch { .. }));
}

/// A response with the wrong protocol version is rejected.
#[tokio::test]
async fn wrong_version_rejected() {
    let agent = TestAgent::with_mode(AgentMode::WrongVersion).await;
    let client = client_for(&agent);

    let err = client.get(&oid!(1, 3, 6, 1, 2, 1, 1, 1, 0)).await.unwrap_err();

    assert!(matches!(
        err,
        Error::VersionMismatch {
            expected: Version::V2c,
            actual: Version::V1,
        }
    ));
}

/// A response that is not valid BER fails with a decode error.
#[tokio::test]
async fn garbage_response_is_decode_error() {
    let agent = TestAgent::with_mode(AgentMode::Garbage).await;
    let client = client_for(&agent);

    let err = client.get(&oid!(1, 3, 6, 1, 2, 1, 1, 1, 0)).await.unwrap_err();

    assert!(matches!(err, Error::Decode { .. }));
}

/// Invalid OIDs fail before any network traffic.
#[tokio::test]
async fn invalid_oid_rejected_locally() {
    // Silent agent: if validation leaked to the network, we'd time out
    // instead of failing fast.
    let agent = TestAgent::with_mode(AgentMode::Silent).await;
    let client = client_for(&agent);

    for input in ["1", "7.1", "1.40"] {
        let err = client.get_display(input).await.unwrap_err();
        assert!(
            matches!(err, Error::InvalidOid { .. }),
            "{} should fail with InvalidOid, got {:?}",
            input,
            err
        );
    }
}

/// Concurrent calls each use their own socket and don't cross-talk.
#[tokio::test]
async fn concurrent_gets_are_independent() {
    let agent = TestAgent::new().await;
    let client = std::sync::Arc::new(client_for(&agent));

    let mut handles = Vec::new();
    for _ in 0..8 {
        let client = client.clone();
        handles.push(tokio::spawn(async move {
            client.get(&oid!(1, 3, 6, 1, 2, 1, 1, 5, 0)).await
        }));
    }

    for handle in handles {
        let result = handle.await.unwrap().unwrap();
        assert_eq!(result.value.as_str(), Some("test-agent"));
    }
}
