mod common;

use common::{adapter_for, mcp_server_for};
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use xeams_mcp_core::mcp::tools::{CHECK_EMAIL_STATUS, VALIDATE_ADDRESS};

async fn mount_validate(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/api/email/validate"))
        .respond_with(response)
        .mount(server)
        .await;
}

#[tokio::test]
async fn validate_address_reports_valid() {
    let server = MockServer::start().await;
    mount_validate(&server, ResponseTemplate::new(200).set_body_json(json!({ "code": 1 }))).await;

    let result = adapter_for(&server)
        .call(VALIDATE_ADDRESS, Some(json!({ "email": "test@validdomain.com" })))
        .await
        .unwrap();

    assert_eq!(result.structured_content, Some(json!({ "result": 1 })));
    assert_eq!(
        result.text(),
        Some("Email test@validdomain.com is valid (result: 1)")
    );
}

#[tokio::test]
async fn validate_address_reports_invalid_code() {
    let server = MockServer::start().await;
    mount_validate(&server, ResponseTemplate::new(200).set_body_json(json!({ "code": 3 }))).await;

    let result = adapter_for(&server)
        .validate_address("user@nodomain.example")
        .await;
    assert_eq!(result.structured_content, Some(json!({ "result": 3 })));
    assert_eq!(
        result.text(),
        Some("Email user@nodomain.example is invalid (result: 3)")
    );
}

#[tokio::test]
async fn validate_address_upstream_500_yields_minus_one() {
    let server = MockServer::start().await;
    mount_validate(&server, ResponseTemplate::new(500)).await;

    let result = adapter_for(&server)
        .call(VALIDATE_ADDRESS, Some(json!({ "email": "test@validdomain.com" })))
        .await
        .unwrap();
    assert_eq!(result.structured_content, Some(json!({ "result": -1 })));
    assert!(result.text().unwrap().contains("invalid (result: -1)"));
}

#[tokio::test]
async fn check_email_status_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/email/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let result = adapter_for(&server)
        .call(CHECK_EMAIL_STATUS, Some(json!({ "email": "x@y.com" })))
        .await
        .unwrap();
    assert_eq!(result.structured_content, Some(json!({ "results": [] })));
    assert_eq!(result.text(), Some("Found 0 email status record(s) for x@y.com"));
}

#[tokio::test]
async fn check_email_status_records_use_wire_names() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/email/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "status": 2, "statusStr": "Failed", "senderIP": "10.1.1.1", "inboundEncryption": true }
        ])))
        .mount(&server)
        .await;

    let result = adapter_for(&server).check_email_status("x@y.com").await;
    assert_eq!(result.text(), Some("Found 1 email status record(s) for x@y.com"));
    let payload = result.structured_content.unwrap();
    assert_eq!(
        payload["results"][0],
        json!({
            "status": 2,
            "statusStr": "Failed",
            "receivedOn": "",
            "sentOn": "",
            "subject": "",
            "senderIP": "10.1.1.1",
            "recipientIP": "",
            "inboundEncryption": true,
            "outboundEncryption": false
        })
    );
}

#[tokio::test]
async fn tools_call_over_json_rpc() {
    let server = MockServer::start().await;
    mount_validate(&server, ResponseTemplate::new(200).set_body_json(json!({ "code": 1 }))).await;

    let line = json!({
        "jsonrpc": "2.0",
        "id": 11,
        "method": "tools/call",
        "params": { "name": "ValidateAddress", "arguments": { "email": "test@validdomain.com" } }
    })
    .to_string();
    let response = mcp_server_for(&server).handle_line(&line).await.unwrap();
    let result: Value = response.result.unwrap();
    assert_eq!(result["structuredContent"]["result"], 1);
    assert_eq!(result["content"][0]["type"], "text");
    assert!(result["content"][0]["text"].as_str().unwrap().contains("valid"));
}

#[tokio::test]
async fn malformed_email_is_rejected_before_upstream() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "code": 1 })))
        .expect(0)
        .mount(&server)
        .await;

    let line = json!({
        "jsonrpc": "2.0",
        "id": 12,
        "method": "tools/call",
        "params": { "name": "CheckEmailStatus", "arguments": { "email": "not an email" } }
    })
    .to_string();
    let response = mcp_server_for(&server).handle_line(&line).await.unwrap();
    assert_eq!(response.error.unwrap().code, -32602);
}

#[tokio::test]
async fn concurrent_calls_over_stdio_all_answered() {
    let server = MockServer::start().await;
    mount_validate(&server, ResponseTemplate::new(200).set_body_json(json!({ "code": 1 }))).await;
    Mock::given(method("GET"))
        .and(path("/api/email/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let mut input = String::new();
    for id in 0..6 {
        let tool = if id % 2 == 0 { "ValidateAddress" } else { "CheckEmailStatus" };
        input.push_str(
            &json!({
                "jsonrpc": "2.0",
                "id": id,
                "method": "tools/call",
                "params": { "name": tool, "arguments": { "email": "x@y.com" } }
            })
            .to_string(),
        );
        input.push('\n');
    }

    let (writer, mut reader) = tokio::io::duplex(256 * 1024);
    mcp_server_for(&server)
        .serve(input.as_bytes(), writer)
        .await
        .unwrap();

    let mut out = String::new();
    tokio::io::AsyncReadExt::read_to_string(&mut reader, &mut out)
        .await
        .unwrap();
    let mut ids: Vec<i64> = out
        .lines()
        .map(|l| serde_json::from_str::<Value>(l).unwrap()["id"].as_i64().unwrap())
        .collect();
    ids.sort_unstable();
    assert_eq!(ids, vec![0, 1, 2, 3, 4, 5]);
}
