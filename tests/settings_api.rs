use notes_backend::AppState;
use serde_json::json;

mod common;
use common::{send, send_raw, spawn_app};

#[tokio::test]
async fn settings_start_empty() {
    let addr = spawn_app(AppState::in_memory(), None).await;

    let res = send(addr, "GET", "/api/settings", None).await;
    assert_eq!(res.status, 200);
    assert_eq!(res.json(), json!({}));
}

#[tokio::test]
async fn save_echoes_and_overwrites() {
    let addr = spawn_app(AppState::in_memory(), None).await;

    let first = json!({
        "darkMode": true,
        "fontSize": "medium",
        "fontSizeValue": 16,
        "fontFamily": "Arial, sans-serif",
        "autoSave": false
    });
    let res = send(addr, "POST", "/api/settings", Some(&first)).await;
    assert_eq!(res.status, 200);
    assert_eq!(res.json(), first);
    assert_eq!(send(addr, "GET", "/api/settings", None).await.json(), first);

    // a save replaces the payload, it does not merge into it
    let second = json!({ "darkMode": false, "nested": { "pins": [1, 2, 3] } });
    assert_eq!(send(addr, "POST", "/api/settings", Some(&second)).await.json(), second);
    assert_eq!(send(addr, "GET", "/api/settings", None).await.json(), second);
}

#[tokio::test]
async fn non_object_payload_is_rejected() {
    let addr = spawn_app(AppState::in_memory(), None).await;

    let res = send(addr, "POST", "/api/settings", Some(&json!([1, 2]))).await;
    assert_eq!(res.status, 422);
    assert!(res.json()["error"].is_string());

    assert_eq!(send(addr, "GET", "/api/settings", None).await.json(), json!({}));
}

#[tokio::test]
async fn settings_round_trip_byte_for_byte() {
    let addr = spawn_app(AppState::in_memory(), None).await;
    let sent = r#"{"big":123456789012345678901234567890,"ratio":0.10000000000000000555,"theme":"dark"}"#;

    let res = send_raw(addr, "POST", "/api/settings", &[], Some(sent)).await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body, sent);

    let res = send(addr, "GET", "/api/settings", None).await;
    assert_eq!(res.body, sent);
}
