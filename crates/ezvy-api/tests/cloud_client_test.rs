#![allow(clippy::unwrap_used)]
// Integration tests for `CloudClient` using wiremock.

use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ezvy_api::{AlarmQuery, CloudClient, Error, SessionTokens};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, CloudClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = CloudClient::with_client(reqwest::Client::new(), base_url);
    (server, client)
}

fn tokens() -> SessionTokens {
    SessionTokens {
        session_id: "sess-1234".into(),
        rf_session_id: "rf-5678".into(),
    }
}

async fn logged_in() -> (MockServer, CloudClient) {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v3/users/login/v5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "meta": { "code": 200 },
            "data": { "sessionId": "sess-1234", "rfSessionId": "rf-5678" }
        })))
        .mount(&server)
        .await;

    let secret: secrecy::SecretString = "hunter2".to_string().into();
    client.login("user@example.com", &secret).await.unwrap();
    (server, client)
}

// ── Authentication tests ────────────────────────────────────────────

#[tokio::test]
async fn test_login_success_stores_tokens() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v3/users/login/v5"))
        .and(body_json(json!({
            "account": "user@example.com",
            "password": "hunter2",
            "featureCode": "92c579faa0902cbfcfcc4fc004ef67e7",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "meta": { "code": 200 },
            "data": { "sessionId": "sess-1234", "rfSessionId": "rf-5678" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let secret: secrecy::SecretString = "hunter2".to_string().into();
    let got = client.login("user@example.com", &secret).await.unwrap();

    assert_eq!(got.session_id, "sess-1234");
    assert_eq!(got.rf_session_id, "rf-5678");
    assert!(client.is_authenticated());
}

#[tokio::test]
async fn test_login_bad_credentials() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v3/users/login/v5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "meta": { "code": 1013, "message": "account or password error" }
        })))
        .mount(&server)
        .await;

    let secret: secrecy::SecretString = "wrong".to_string().into();
    let result = client.login("user@example.com", &secret).await;

    match result {
        Err(Error::Authentication { ref message }) => {
            assert!(
                message.contains("password"),
                "expected credential error message, got: {message}"
            );
        }
        other => panic!("expected Authentication error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_login_mfa_account() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v3/users/login/v5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "meta": { "code": 6002, "message": "verification code required" }
        })))
        .mount(&server)
        .await;

    let secret: secrecy::SecretString = "hunter2".to_string().into();
    let result = client.login("user@example.com", &secret).await;

    assert!(
        matches!(result, Err(Error::MfaRequired)),
        "expected MfaRequired, got: {result:?}"
    );
    assert!(!client.is_authenticated());
}

#[tokio::test]
async fn test_unauthenticated_call_is_rejected_locally() {
    let (_server, client) = setup().await;

    let result = client.device_page_list(None).await;

    assert!(
        matches!(result, Err(Error::Authentication { .. })),
        "expected Authentication error, got: {result:?}"
    );
}

// ── Device tests ────────────────────────────────────────────────────

#[tokio::test]
async fn test_page_list_with_switch_filter() {
    let (server, client) = logged_in().await;

    let envelope = json!({
        "meta": { "code": 200 },
        "data": {
            "deviceInfos": [{
                "deviceSerial": "D11111111",
                "name": "Garage Plug",
                "deviceType": "CS-T30",
                "version": "5.2.4",
                "status": 1
            }],
            "switchStatusInfos": [{
                "deviceSerial": "D11111111",
                "switchs": [
                    { "type": 14, "enable": true },
                    { "type": 3, "enable": false }
                ]
            }]
        }
    });

    Mock::given(method("POST"))
        .and(path("/v3/userdevices/v1/devices/pagelist"))
        .and(header("sessionId", "sess-1234"))
        .and(header("rfSessionId", "rf-5678"))
        .and(body_json(json!({
            "filter": "SWITCH",
            "pageSize": 50,
            "pageStart": 0,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(&envelope))
        .mount(&server)
        .await;

    let page = client
        .device_page_list(Some(ezvy_api::cloud::devices::FILTER_SWITCH))
        .await
        .unwrap();

    assert_eq!(page.device_infos.len(), 1);
    assert_eq!(page.device_infos[0].device_serial, "D11111111");
    assert_eq!(page.device_infos[0].name.as_deref(), Some("Garage Plug"));
    assert_eq!(page.device_infos[0].status, 1);

    assert_eq!(page.switch_status_infos.len(), 1);
    let switches = &page.switch_status_infos[0].switches;
    assert_eq!(switches.len(), 2);
    assert_eq!(switches[0].channel_type, 14);
    assert!(switches[0].enable);
    assert_eq!(switches[1].channel_type, 3);
    assert!(!switches[1].enable);
}

// ── Switch tests ────────────────────────────────────────────────────

#[tokio::test]
async fn test_set_switch_sends_one_command() {
    let (server, client) = logged_in().await;

    Mock::given(method("POST"))
        .and(path("/v3/userdevices/v1/devices/switchStatus"))
        .and(body_json(json!({
            "deviceSerial": "D11111111",
            "enable": 1,
            "type": 14,
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "meta": { "code": 200 } })),
        )
        .expect(1)
        .mount(&server)
        .await;

    client.set_switch("D11111111", 14, true).await.unwrap();
}

// ── Doorbell tests ──────────────────────────────────────────────────

#[tokio::test]
async fn test_alarm_history() {
    let (server, client) = logged_in().await;

    let envelope = json!({
        "meta": { "code": 200 },
        "data": {
            "alarms": [{
                "alarmId": "alarm-001",
                "alarmName": "Visitor",
                "alarmTime": 1_700_000_000_000_i64,
                "isRead": false
            }],
            "hasNext": false
        }
    });

    Mock::given(method("POST"))
        .and(path("/v3/alarm/device/history"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&envelope))
        .mount(&server)
        .await;

    let page = client
        .alarm_history("DB2222222", &AlarmQuery::default())
        .await
        .unwrap();

    assert_eq!(page.alarms.len(), 1);
    assert_eq!(page.alarms[0].alarm_id, "alarm-001");
    assert_eq!(page.alarms[0].is_read, Some(false));
    assert!(!page.has_next);
}

#[tokio::test]
async fn test_visitor_image_binary() {
    let (server, client) = logged_in().await;

    Mock::given(method("POST"))
        .and(path("/v3/alarm/device/pic"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "image/jpeg")
                .set_body_bytes(vec![0xFF, 0xD8, 0xFF]),
        )
        .mount(&server)
        .await;

    let image = client
        .visitor_image("DB2222222", "alarm-001")
        .await
        .unwrap();

    assert_eq!(image, Some(vec![0xFF, 0xD8, 0xFF]));
}

#[tokio::test]
async fn test_visitor_image_missing() {
    let (server, client) = logged_in().await;

    Mock::given(method("POST"))
        .and(path("/v3/alarm/device/pic"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "meta": { "code": 200 } })),
        )
        .mount(&server)
        .await;

    let image = client
        .visitor_image("DB2222222", "alarm-001")
        .await
        .unwrap();

    assert_eq!(image, None);
}

#[tokio::test]
async fn test_open_door() {
    let (server, client) = logged_in().await;

    Mock::given(method("POST"))
        .and(path("/v3/devices/DB2222222/doorbell/openDoor"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "meta": { "code": 200 } })),
        )
        .expect(1)
        .mount(&server)
        .await;

    client.open_door("DB2222222").await.unwrap();
}

// ── Error tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_session_expired_on_http_401() {
    let (server, client) = setup().await;
    client.restore_session(tokens());

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let result = client.device_page_list(None).await;

    assert!(
        matches!(result, Err(Error::SessionExpired)),
        "expected SessionExpired, got: {result:?}"
    );
}

#[tokio::test]
async fn test_api_error_envelope() {
    let (server, client) = logged_in().await;

    Mock::given(method("POST"))
        .and(path("/v3/userdevices/v1/devices/switchStatus"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "meta": { "code": 2009, "message": "the device is offline" }
        })))
        .mount(&server)
        .await;

    let result = client.set_switch("D11111111", 14, false).await;

    match result {
        Err(Error::Api { code, ref message }) => {
            assert_eq!(code, 2009);
            assert!(
                message.contains("offline"),
                "expected 'offline' in message, got: {message}"
            );
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}
