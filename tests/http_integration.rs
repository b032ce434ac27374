use std::sync::Arc;
use std::time::Duration;

use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use ingres_ai::AppState;
use ingres_ai::config::AppConfig;
use ingres_ai::server::build_router;
use serde_json::Value;

const REPLY_DELAY_MS: u64 = 50;

fn server() -> TestServer {
    let config = AppConfig::load_from_args([
        "ingres-ai",
        "--reply-delay-ms",
        &REPLY_DELAY_MS.to_string(),
    ])
    .expect("Failed to load config");
    let app = build_router(AppState::new(Arc::new(config)));
    TestServer::builder()
        .save_cookies()
        .build(app)
        .expect("Failed to start test server")
}

fn htmx() -> (HeaderName, HeaderValue) {
    (
        HeaderName::from_static("hx-request"),
        HeaderValue::from_static("true"),
    )
}

async fn snapshot(server: &TestServer) -> Value {
    server.get("/api/chat/messages.json").await.json::<Value>()
}

async fn message_count(server: &TestServer) -> usize {
    snapshot(server).await["messages"]
        .as_array()
        .map_or(0, Vec::len)
}

async fn wait_for_reply() {
    tokio::time::sleep(Duration::from_millis(REPLY_DELAY_MS * 6)).await;
}

#[tokio::test]
async fn test_landing_issues_visitor_cookie() {
    let server = server();
    let response = server.get("/").await;

    response.assert_status_ok();
    assert!(response.text().contains("Talk to"));
    assert!(response.cookie("ingres_visitor").value().len() >= 32);
}

#[tokio::test]
async fn test_demo_overlay_round_trip() {
    let server = server();
    server.get("/").await;

    let opened = server.post("/demo/open").await.text();
    assert!(opened.contains("INGRES AI Demo"));

    let hindi = server.post("/demo/language").await.text();
    assert!(hindi.contains("क्या करके देखें"));

    let picked = server
        .post("/demo/suggest")
        .form(&[("index", "0")])
        .await
        .text();
    assert!(picked.contains(r#"value="राजस्थान में कितना पानी बचा है?""#));

    let sent = server
        .post("/demo/send")
        .form(&[("message", "Punjab?")])
        .await
        .text();
    assert!(sent.contains(r#"name="message" value="""#));

    let closed = server.post("/demo/close").await.text();
    assert!(closed.starts_with(r#"<div id="demo-overlay"></div>"#));
}

#[tokio::test]
async fn test_empty_login_navigates_to_dashboard() {
    let server = server();

    let response = server
        .post("/login")
        .form(&[("email", ""), ("password", "")])
        .await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), "/dashboard");

    let (name, value) = htmx();
    let response = server
        .post("/login")
        .add_header(name, value)
        .form(&[("email", "asha@example.org"), ("password", "x")])
        .await;
    response.assert_status_ok();
    assert_eq!(response.header("hx-redirect"), "/dashboard");

    let page = server.get("/dashboard/chat").await.text();
    assert!(page.contains("asha@example.org") || page.contains(">A<"));
}

#[tokio::test]
async fn test_login_mode_toggle() {
    let server = server();
    server.get("/login").await;

    let card = server.post("/login/mode").await.text();
    assert!(card.contains("Create Account"));
    assert!(card.contains(r#"name="full_name""#));
}

#[tokio::test]
async fn test_submit_appends_user_then_bot_message() {
    let server = server();
    server.get("/dashboard/chat").await.assert_status_ok();
    assert_eq!(message_count(&server).await, 2);

    let fragment = server
        .post("/api/chat/messages")
        .form(&[("message", "How is Punjab doing?")])
        .await;
    fragment.assert_status_ok();
    let html = fragment.text();
    assert!(html.contains("How is Punjab doing?"));
    assert!(html.contains("INGRES AI is thinking..."));

    let pending = snapshot(&server).await;
    assert_eq!(pending["pending"], true);
    assert_eq!(pending["messages"].as_array().map_or(0, Vec::len), 3);

    wait_for_reply().await;

    let done = snapshot(&server).await;
    assert_eq!(done["pending"], false);
    let messages = done["messages"].as_array().cloned().unwrap_or_default();
    assert_eq!(messages.len(), 4);
    assert_eq!(messages[3]["role"], "bot");
    assert!(
        messages[3]["content"]
            .as_str()
            .unwrap_or_default()
            .starts_with("I understand you're asking about groundwater data")
    );
}

#[tokio::test]
async fn test_blank_submit_is_a_no_op() {
    let server = server();
    server.get("/dashboard/chat").await;

    let response = server
        .post("/api/chat/messages")
        .form(&[("message", "   ")])
        .await;
    response.assert_status_ok();
    assert!(!response.text().contains("INGRES AI is thinking..."));

    wait_for_reply().await;
    assert_eq!(message_count(&server).await, 2);
}

#[tokio::test]
async fn test_second_submit_while_pending_is_ignored() {
    let server = server();
    server.get("/dashboard/chat").await;

    server
        .post("/api/chat/messages")
        .form(&[("message", "First")])
        .await;
    server
        .post("/api/chat/messages")
        .form(&[("message", "Second")])
        .await
        .assert_status_ok();
    assert_eq!(message_count(&server).await, 3);

    wait_for_reply().await;
    assert_eq!(message_count(&server).await, 4);
}

#[tokio::test]
async fn test_remount_cancels_pending_reply() {
    let server = server();
    server.get("/dashboard/chat").await;
    server
        .post("/api/chat/messages")
        .form(&[("message", "Rajasthan?")])
        .await;

    server.get("/dashboard/chat").await;
    wait_for_reply().await;

    let fresh = snapshot(&server).await;
    assert_eq!(fresh["pending"], false);
    assert_eq!(fresh["messages"].as_array().map_or(0, Vec::len), 2);
}

#[tokio::test]
async fn test_history_filter_and_select() {
    let server = server();
    server.get("/dashboard/chat").await;

    let filtered = server
        .get("/api/chat/history")
        .add_query_param("q", "karnataka")
        .await
        .text();
    assert!(filtered.contains("Karnataka Water Table Trends"));
    assert!(!filtered.contains("Rajasthan Groundwater 2023"));

    let none = server
        .get("/api/chat/history")
        .add_query_param("q", "zzz")
        .await
        .text();
    assert!(!none.contains("data-chat-id"));

    let selected = server.post("/api/chat/history/2/select").await.text();
    assert!(selected.contains(r#"<h1 id="chat-title" class="font-semibold" hx-swap-oob="true">Maharashtra Drought Analysis</h1>"#));
    assert_eq!(message_count(&server).await, 2);

    server
        .post("/api/chat/history/99/select")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_copy_and_save_emit_toasts() {
    let server = server();
    server.get("/dashboard/chat").await;

    let copied = server.post("/api/chat/messages/2/copy").await.text();
    assert!(copied.contains(r#"<template id="clipboard" data-copy="Based on the 2023"#));
    assert!(copied.contains("Copied to clipboard"));

    let saved = server.post("/api/chat/messages/2/save").await.text();
    assert!(saved.contains("Saved to Space"));

    server
        .post("/api/chat/messages/nope/copy")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_voice_toggle_is_cosmetic() {
    let server = server();
    server.get("/dashboard/chat").await;

    let on = server.post("/api/chat/voice").await.text();
    assert!(on.contains("Voice input activated"));
    assert!(on.contains("Stop voice input"));

    let off = server.post("/api/chat/voice").await.text();
    assert!(off.contains("Voice input stopped"));
    assert_eq!(message_count(&server).await, 2);
}

#[tokio::test]
async fn test_voice_toggle_keeps_typed_text() {
    let server = server();
    server.get("/dashboard/chat").await;

    let html = server
        .post("/api/chat/voice")
        .form(&[("message", "Punjab")])
        .await
        .text();
    assert!(html.contains(r#"name="message" value="Punjab""#));
    assert!(html.contains("Stop voice input"));
    assert_eq!(message_count(&server).await, 2);
}

#[tokio::test]
async fn test_quick_ask_prefills_chat() {
    let server = server();
    server.get("/dashboard/chat").await;

    let response = server
        .post("/dashboard/quick-ask")
        .form(&[("query", " Punjab in summer? ")])
        .await;
    response.assert_status(StatusCode::SEE_OTHER);
    let target = response.header("location");
    let target = target.to_str().unwrap_or_default().to_string();
    assert_eq!(target, "/dashboard/chat?q=Punjab+in+summer%3F");

    let page = server.get(&target).await.text();
    assert!(page.contains(r#"value="Punjab in summer?""#));

    server
        .post("/dashboard/quick-ask")
        .form(&[("query", "  ")])
        .await
        .assert_status(StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_shell_fragments() {
    let server = server();
    server.get("/dashboard/chat").await;

    let open = server
        .post("/dashboard/panel")
        .form(&[("active", "chat")])
        .await
        .text();
    assert!(open.contains("width: 280px"));

    let menu = server.post("/dashboard/menu/language").await.text();
    assert!(menu.contains("मराठी"));

    let switched = server
        .post("/dashboard/language")
        .form(&[("language", "mr")])
        .await
        .text();
    assert!(switched.contains(r#"<span class="hidden sm:inline">मराठी</span>"#));
    assert!(!switched.contains(r#"role="menu""#));

    server
        .post("/dashboard/language")
        .form(&[("language", "fr")])
        .await
        .assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_sections_and_unmount() {
    let server = server();

    server
        .get("/dashboard")
        .await
        .assert_status(StatusCode::SEE_OTHER);

    server.get("/dashboard/chat").await;
    let spaces = server.get("/dashboard/spaces").await;
    spaces.assert_status_ok();
    assert!(spaces.text().contains("Coming soon."));

    // Leaving the chat route tears the conversation down.
    server
        .get("/api/chat/messages.json")
        .await
        .assert_status(StatusCode::NOT_FOUND);

    server
        .get("/dashboard/billing")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_logout_clears_user() {
    let server = server();
    server
        .post("/login")
        .form(&[("full_name", "Asha Rao"), ("email", "asha@example.org")])
        .await;
    server.get("/dashboard/chat").await;

    let profile = server.post("/dashboard/menu/profile").await.text();
    assert!(profile.contains("Asha Rao"));

    let response = server.post("/logout").await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), "/");

    server.get("/dashboard/chat").await;
    let profile = server.post("/dashboard/menu/profile").await.text();
    assert!(!profile.contains("Asha Rao"));
}
