//! Unit tests for the RPC handler, driven through the same `handle_method`
//! path as the `boardvault-rpc` binary.

use serde_json::{json, Value};
use tempfile::TempDir;

use boardvault::app::App;
use boardvault::database::Database;
use boardvault::rpc_handler::handle_method;
use boardvault::services::identity::IdentityProvider;
use boardvault::services::settings_engine::SettingsEngine;

/// Create a signed-in App over an in-memory DB with settings in a temp dir.
async fn setup() -> (App, TempDir) {
    let tmp = TempDir::new().expect("Failed to create temp dir");
    let settings_path = tmp.path().join("settings.json").to_string_lossy().to_string();
    let db = Database::open_in_memory().expect("Failed to open database");
    let mut app = App::with_database(SettingsEngine::new(Some(settings_path)), db);
    app.startup().await;
    (app, tmp)
}

async fn call(app: &mut App, method: &str, params: Value) -> Value {
    handle_method(app, method, &params)
        .await
        .unwrap_or_else(|e| panic!("{} failed: {}", method, e))
}

async fn add(app: &mut App, title: &str, category: &str) -> String {
    let res = call(
        app,
        "board.save",
        json!({"form": {
            "title": title,
            "category": category,
            "url": "https://example.com",
            "description": ""
        }}),
    )
    .await;
    res["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_ping() {
    let (mut app, _tmp) = setup().await;
    assert_eq!(call(&mut app, "ping", json!({})).await, json!({"pong": true}));
}

#[tokio::test]
async fn test_unknown_method_returns_error() {
    let (mut app, _tmp) = setup().await;
    let res = handle_method(&mut app, "nonexistent.method", &json!({})).await;
    assert!(res.unwrap_err().contains("unknown method"));
}

#[tokio::test]
async fn test_startup_signs_in_and_attaches() {
    let (mut app, _tmp) = setup().await;
    let state = call(&mut app, "auth.state", json!({})).await;
    assert_eq!(state["user"]["anonymous"], true);
    assert!(app.board.is_attached());
}

#[tokio::test]
async fn test_modal_flow_creates_record() {
    let (mut app, _tmp) = setup().await;

    call(&mut app, "modal.open_new", json!({})).await;
    let modal = call(
        &mut app,
        "modal.update_form",
        json!({"form": {"title": "Alpha", "category": "ideas", "url": "https://a.com"}}),
    )
    .await;
    assert_eq!(modal["open"], true);
    assert_eq!(modal["form"]["description"], "");

    let res = call(&mut app, "modal.submit", json!({})).await;
    assert!(res["id"].is_string());

    let view = call(&mut app, "board.view", json!({})).await;
    assert_eq!(view["modal"]["open"], false);
    assert_eq!(view["page"]["items"].as_array().unwrap().len(), 1);
    assert_eq!(view["categories"], json!(["ideas"]));
}

#[tokio::test]
async fn test_submit_with_missing_field_fails() {
    let (mut app, _tmp) = setup().await;
    call(&mut app, "modal.open_new", json!({})).await;
    let res = handle_method(&mut app, "modal.submit", &json!({})).await;
    assert!(res.unwrap_err().contains("Missing required field"));
}

#[tokio::test]
async fn test_filter_and_trash_flow() {
    let (mut app, _tmp) = setup().await;
    let a = add(&mut app, "A", "ideas").await;
    let b = add(&mut app, "B", "ideas").await;
    call(&mut app, "record.archive", json!({"id": b})).await;

    let view = call(&mut app, "board.set_filter", json!({"filter": "ideas"})).await;
    let items = view["page"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], a.as_str());

    let view = call(&mut app, "board.set_filter", json!({"filter": "archived"})).await;
    assert_eq!(view["page"]["items"][0]["id"], b.as_str());

    let declined = call(&mut app, "record.delete", json!({"id": b, "confirm": false})).await;
    assert_eq!(declined["deleted"], false);
    let deleted = call(&mut app, "record.delete", json!({"id": b, "confirm": true})).await;
    assert_eq!(deleted["deleted"], true);

    let view = call(&mut app, "board.view", json!({})).await;
    assert!(view["page"]["items"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_restore_returns_record_to_all() {
    let (mut app, _tmp) = setup().await;
    let a = add(&mut app, "A", "ideas").await;
    call(&mut app, "record.archive", json!({"id": a})).await;
    call(&mut app, "record.restore", json!({"id": a})).await;

    let view = call(&mut app, "board.set_filter", json!({"filter": "all"})).await;
    assert_eq!(view["page"]["items"][0]["id"], a.as_str());
}

#[tokio::test]
async fn test_paste_url_outcomes() {
    let (mut app, _tmp) = setup().await;
    let a = add(&mut app, "A", "ideas").await;

    let res = call(&mut app, "record.paste_url", json!({"id": a, "clipboard": "hello world"})).await;
    assert_eq!(res["outcome"], "no_valid_link");
    assert_eq!(res["toast"]["message"], "No valid link in clipboard!");

    let res = call(&mut app, "record.paste_url", json!({"id": a, "clipboard_error": "denied"})).await;
    assert_eq!(res["outcome"], "clipboard_unavailable");
    assert_eq!(res["toast"]["kind"], "error");

    let res = call(&mut app, "record.paste_url", json!({"id": a, "clipboard": "https://x.com"})).await;
    assert_eq!(res["outcome"], "updated");
    assert_eq!(app.board.record(&a).unwrap().url, "https://x.com");
}

#[tokio::test]
async fn test_pagination_methods() {
    let (mut app, _tmp) = setup().await;
    for i in 0..7 {
        add(&mut app, &format!("Note {}", i), "ideas").await;
    }

    let prev = call(&mut app, "board.previous_page", json!({})).await;
    assert_eq!(prev, json!({"moved": false, "page": 1}));
    let next = call(&mut app, "board.next_page", json!({})).await;
    assert_eq!(next, json!({"moved": true, "page": 2}));

    let view = call(&mut app, "board.go_to_page", json!({"page": 1})).await;
    assert_eq!(view["page"]["total_pages"], 2);
    assert_eq!(view["page"]["has_previous"], false);
    assert!(handle_method(&mut app, "board.go_to_page", &json!({"page": 5})).await.is_err());
}

#[tokio::test]
async fn test_sign_out_detaches_board() {
    let (mut app, _tmp) = setup().await;
    add(&mut app, "A", "ideas").await;

    call(&mut app, "auth.sign_out", json!({})).await;
    assert!(!app.board.is_attached());
    let view = call(&mut app, "board.view", json!({})).await;
    assert!(view["page"]["items"].as_array().unwrap().is_empty());

    call(&mut app, "auth.sign_in", json!({})).await;
    let view = call(&mut app, "board.view", json!({})).await;
    assert_eq!(view["page"]["items"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_settings_get_and_set() {
    let (mut app, _tmp) = setup().await;
    let settings = call(&mut app, "settings.get", json!({})).await;
    assert_eq!(settings["page_size"], 6);

    call(&mut app, "settings.set", json!({"key": "page_size", "value": 10})).await;
    let settings = call(&mut app, "settings.get", json!({})).await;
    assert_eq!(settings["page_size"], 10);

    assert!(handle_method(&mut app, "settings.set", &json!({"key": "nope", "value": 1}))
        .await
        .is_err());
}

#[tokio::test]
async fn test_identity_change_is_followed_on_next_call() {
    let (mut app, _tmp) = setup().await;
    add(&mut app, "A", "ideas").await;

    // Sign out through the provider itself, bypassing App.
    app.identity.sign_out();
    assert!(app.board.is_attached());

    let view = call(&mut app, "board.view", json!({})).await;
    assert!(!app.board.is_attached());
    assert!(view["page"]["items"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_go_to_page_rejects_bad_numbers() {
    let (mut app, _tmp) = setup().await;
    add(&mut app, "A", "ideas").await;

    for page in [json!(-1), json!("2"), json!(u64::MAX)] {
        let res = handle_method(&mut app, "board.go_to_page", &json!({"page": page})).await;
        assert!(res.is_err(), "page {} should be rejected", page);
    }
    assert_eq!(app.board.page(), 1);
}

#[tokio::test]
async fn test_toast_dismiss() {
    let (mut app, _tmp) = setup().await;
    let a = add(&mut app, "A", "ideas").await;
    call(&mut app, "record.paste_url", json!({"id": a, "clipboard": "nope"})).await;
    assert!(!call(&mut app, "toast.current", json!({})).await.is_null());

    call(&mut app, "toast.dismiss", json!({})).await;
    assert!(call(&mut app, "toast.current", json!({})).await.is_null());
}
