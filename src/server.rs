use std::sync::Arc;

use axum::{
    Extension, Form, Json, Router,
    extract::{Path, Query, Request, State, rejection::FormRejection},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::AppState;
use crate::backend::Credentials;
use crate::config::AppConfig;
use crate::context::{VISITOR_COOKIE, Visitor};
use crate::conversation::{Conversation, Message};
use crate::error::{AppError, Result};
use crate::history::SessionList;
use crate::landing::DemoOverlay;
use crate::language::Language;
use crate::login;
use crate::shell::{Route, ShellState, navigate_to, quick_ask_target};
use crate::ui;
use crate::ui::layout::{html_shell, toast_region};

/// Start the Axum server with the provided configuration.
pub async fn start_server(config: Arc<AppConfig>) -> anyhow::Result<()> {
    let state = AppState::new(Arc::clone(&config));
    state
        .visitors
        .spawn_sweeper(config.idle_timeout(), config.sweep_interval());

    let app = build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(
        name: "server.started",
        address = %addr,
        reply_delay_ms = config.chat.reply_delay_ms,
        "Server started"
    );

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}

/// Build the full router: pages, fragments, JSON API and static assets.
pub fn build_router(state: AppState) -> Router {
    let app = Router::new()
        // Landing
        .route("/", get(landing_page))
        .route("/demo/open", post(demo_open))
        .route("/demo/close", post(demo_close))
        .route("/demo/language", post(demo_language))
        .route("/demo/listening", post(demo_listening))
        .route("/demo/suggest", post(demo_suggest))
        .route("/demo/send", post(demo_send))
        // Login
        .route("/login", get(login_page).post(login_submit))
        .route("/login/mode", post(login_mode))
        .route("/logout", post(logout))
        // Dashboard shell
        .route("/dashboard", get(dashboard_root))
        .route("/dashboard/chat", get(chat_page))
        .route("/dashboard/{section}", get(section_page))
        .route("/dashboard/panel", post(toggle_panel))
        .route("/dashboard/language", post(set_language))
        .route("/dashboard/menu/language", post(toggle_language_menu))
        .route("/dashboard/menu/profile", post(toggle_profile_menu))
        .route("/dashboard/quick-ask", post(quick_ask))
        // Chat API
        .route("/api/chat/messages", get(get_messages).post(post_message))
        .route("/api/chat/messages.json", get(messages_json))
        .route("/api/chat/messages/{id}/copy", post(copy_message))
        .route("/api/chat/messages/{id}/save", post(save_message))
        .route("/api/chat/voice", post(toggle_voice))
        .route("/api/chat/history", get(search_history))
        .route("/api/chat/history/{id}/select", post(select_chat))
        .route("/api/toasts", get(drain_toasts))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            visitor_middleware,
        ))
        .nest_service("/static", ServeDir::new("static"))
        .layer(TraceLayer::new_for_http());

    // Router::layer keeps the router type, so the timeout can be optional.
    let app = match state.config.request_timeout() {
        Some(duration) => app.layer(axum::middleware::from_fn(
            move |req: Request, next: Next| async move {
                match tokio::time::timeout(duration, next.run(req)).await {
                    Ok(res) => res,
                    Err(_) => (StatusCode::REQUEST_TIMEOUT, "Request timed out").into_response(),
                }
            },
        )),
        None => app,
    };

    app.with_state(state)
}

/// Attach the visitor for this browser, issuing a cookie on first contact.
async fn visitor_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let jar = CookieJar::from_headers(request.headers());
    let known = jar.get(VISITOR_COOKIE).map(|c| c.value().to_string());
    let visitor = state.visitors.get_or_create(known.as_deref());
    let issued = known.as_deref() != Some(visitor.id());

    request.extensions_mut().insert(visitor.clone());
    let response = next.run(request).await;

    if issued {
        let cookie = Cookie::build((VISITOR_COOKIE, visitor.id().to_string()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax);
        (jar.add(cookie), response).into_response()
    } else {
        response
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Rendering helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Full page with any queued toasts.
fn page(visitor: &Visitor, title: &str, body: &str) -> Html<String> {
    Html(html_shell(title, body, &visitor.notifier().drain()))
}

/// Fragment plus the out-of-band toast region.
fn fragment(visitor: &Visitor, body: &str) -> Html<String> {
    let toasts = toast_region(&visitor.notifier().drain(), true);
    Html(format!("{body}{toasts}"))
}

fn dashboard(visitor: &Visitor, active: Route, main: &str) -> Html<String> {
    let shell = visitor.with_shell(|s| *s);
    let body = ui::dashboard::dashboard_page(&visitor.context(), &shell, active, main);
    page(visitor, active.label(), &body)
}

fn mounted(visitor: &Visitor) -> Result<Conversation> {
    visitor.conversation().ok_or_else(not_mounted)
}

fn not_mounted() -> AppError {
    AppError::NotFound("no chat screen is open".to_string())
}

fn chat_fragment(visitor: &Visitor, conversation: &Conversation) -> Html<String> {
    let body = format!(
        "{}{}",
        ui::chat::messages_panel(conversation),
        ui::chat::input_bar(conversation, true)
    );
    fragment(visitor, &body)
}

// ─────────────────────────────────────────────────────────────────────────────
// Landing
// ─────────────────────────────────────────────────────────────────────────────

async fn landing_page(Extension(visitor): Extension<Visitor>) -> Html<String> {
    let demo = visitor.with_demo(|d| d.clone());
    page(&visitor, "Home", &ui::landing::landing_page(&demo))
}

fn demo_fragment(visitor: &Visitor) -> Html<String> {
    let demo = visitor.with_demo(|d| d.clone());
    fragment(visitor, &ui::landing::demo_overlay(&demo))
}

async fn demo_open(Extension(visitor): Extension<Visitor>) -> Html<String> {
    visitor.with_demo(DemoOverlay::open);
    demo_fragment(&visitor)
}

async fn demo_close(Extension(visitor): Extension<Visitor>) -> Html<String> {
    visitor.with_demo(DemoOverlay::close);
    demo_fragment(&visitor)
}

async fn demo_language(Extension(visitor): Extension<Visitor>) -> Html<String> {
    visitor.with_demo(DemoOverlay::toggle_language);
    demo_fragment(&visitor)
}

async fn demo_listening(Extension(visitor): Extension<Visitor>) -> Html<String> {
    visitor.with_demo(DemoOverlay::toggle_listening);
    demo_fragment(&visitor)
}

#[derive(Debug, Deserialize)]
struct SuggestForm {
    index: usize,
}

async fn demo_suggest(
    Extension(visitor): Extension<Visitor>,
    Form(form): Form<SuggestForm>,
) -> Html<String> {
    visitor.with_demo(|d| d.pick_suggestion(form.index));
    demo_fragment(&visitor)
}

/// Text box contents posted by the chat and demo forms.
#[derive(Debug, Deserialize)]
struct MessageForm {
    #[serde(default)]
    message: String,
}

async fn demo_send(
    Extension(visitor): Extension<Visitor>,
    Form(form): Form<MessageForm>,
) -> Html<String> {
    visitor.with_demo(|d| {
        d.set_draft(form.message);
        d.send()
    });
    demo_fragment(&visitor)
}

// ─────────────────────────────────────────────────────────────────────────────
// Login
// ─────────────────────────────────────────────────────────────────────────────

async fn login_page(Extension(visitor): Extension<Visitor>) -> Html<String> {
    let form = visitor.with_login(|f| *f);
    page(&visitor, "Login", &ui::login::login_page(&form))
}

async fn login_mode(Extension(visitor): Extension<Visitor>) -> Html<String> {
    let form = visitor.with_login(|f| {
        f.toggle_mode();
        *f
    });
    fragment(&visitor, &ui::login::login_card(&form))
}

async fn login_submit(
    State(state): State<AppState>,
    Extension(visitor): Extension<Visitor>,
    headers: HeaderMap,
    Form(credentials): Form<Credentials>,
) -> Response {
    match login::submit(state.auth.as_ref(), &credentials).await {
        Ok((profile, landing)) => {
            visitor.sign_in(profile);
            navigate_to(landing, &headers).into_response()
        }
        Err(e) => {
            tracing::warn!(visitor_id = %visitor.id(), error = %e, "Sign-in rejected");
            visitor.notifier().push(e.toast());
            let form = visitor.with_login(|f| *f);
            (e.status(), page(&visitor, "Login", &ui::login::login_page(&form))).into_response()
        }
    }
}

async fn logout(Extension(visitor): Extension<Visitor>, headers: HeaderMap) -> Response {
    visitor.sign_out();
    info!(name: "auth.signed_out", visitor_id = %visitor.id(), "Visitor signed out");
    navigate_to("/", &headers).into_response()
}

// ─────────────────────────────────────────────────────────────────────────────
// Dashboard shell
// ─────────────────────────────────────────────────────────────────────────────

async fn dashboard_root(headers: HeaderMap) -> Response {
    navigate_to(Route::Chat.path(), &headers).into_response()
}

#[derive(Debug, Deserialize)]
struct ChatQuery {
    q: Option<String>,
}

/// GET /dashboard/chat - mount a fresh chat screen.
async fn chat_page(
    State(state): State<AppState>,
    Extension(visitor): Extension<Visitor>,
    Query(query): Query<ChatQuery>,
) -> Html<String> {
    let conversation =
        visitor.mount_chat(Arc::clone(&state.backend), state.config.reply_delay());
    if let Some(q) = query.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
        conversation.set_draft(q);
    }
    let history = visitor
        .with_history(|h| h.clone())
        .unwrap_or_default();
    let main = ui::chat::chat_main(&conversation, &history, visitor.language());
    dashboard(&visitor, Route::Chat, &main)
}

/// GET /dashboard/{section} - sections without content yet.
async fn section_page(
    Extension(visitor): Extension<Visitor>,
    Path(section): Path<String>,
) -> Result<Html<String>> {
    let route = Route::from_slug(&section)
        .ok_or_else(|| AppError::NotFound(format!("section {section}")))?;
    visitor.unmount_chat();
    Ok(dashboard(
        &visitor,
        route,
        &ui::dashboard::placeholder_section(route),
    ))
}

#[derive(Debug, Deserialize)]
struct PanelForm {
    #[serde(default)]
    active: String,
}

async fn toggle_panel(
    Extension(visitor): Extension<Visitor>,
    Form(form): Form<PanelForm>,
) -> Html<String> {
    let active = Route::from_slug(&form.active).unwrap_or(Route::Chat);
    let shell = visitor.with_shell(|s| {
        let layout = s.toggle_panel();
        tracing::debug!(width_px = layout.width_px, "Sidebar toggled");
        *s
    });
    fragment(&visitor, &ui::dashboard::sidebar(&shell, active))
}

fn topbar_fragment(visitor: &Visitor) -> Html<String> {
    let shell = visitor.with_shell(|s| *s);
    fragment(visitor, &ui::dashboard::topbar(&visitor.context(), &shell))
}

async fn toggle_language_menu(Extension(visitor): Extension<Visitor>) -> Html<String> {
    visitor.with_shell(ShellState::toggle_language_menu);
    topbar_fragment(&visitor)
}

async fn toggle_profile_menu(Extension(visitor): Extension<Visitor>) -> Html<String> {
    visitor.with_shell(ShellState::toggle_profile_menu);
    topbar_fragment(&visitor)
}

#[derive(Debug, Deserialize)]
struct LanguageForm {
    language: String,
}

async fn set_language(
    Extension(visitor): Extension<Visitor>,
    Form(form): Form<LanguageForm>,
) -> Result<Html<String>> {
    let language = Language::from_code(&form.language)
        .ok_or_else(|| AppError::Validation(format!("unsupported language {}", form.language)))?;
    visitor.set_language(language);
    visitor.with_shell(ShellState::close_menus);
    info!(
        name: "context.language.changed",
        visitor_id = %visitor.id(),
        language = language.code(),
        "Display language changed"
    );
    Ok(topbar_fragment(&visitor))
}

#[derive(Debug, Deserialize)]
struct QuickAskForm {
    #[serde(default)]
    query: String,
}

async fn quick_ask(headers: HeaderMap, Form(form): Form<QuickAskForm>) -> Response {
    match quick_ask_target(&form.query) {
        Some(target) => navigate_to(target, &headers).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Chat API
// ─────────────────────────────────────────────────────────────────────────────

/// POST /api/chat/messages - submit the input box.
async fn post_message(
    Extension(visitor): Extension<Visitor>,
    Form(form): Form<MessageForm>,
) -> Result<Html<String>> {
    let conversation = mounted(&visitor)?;
    match conversation.submit(&form.message, visitor.language()) {
        Ok(_) => {}
        Err(e) if e.is_silent() => {
            tracing::debug!(visitor_id = %visitor.id(), reason = %e, "Submit ignored");
            if matches!(e, AppError::ReplyPending) {
                conversation.set_draft(form.message);
            }
        }
        Err(e) => return Err(e),
    }
    Ok(chat_fragment(&visitor, &conversation))
}

/// GET /api/chat/messages - polled while a reply is pending.
async fn get_messages(Extension(visitor): Extension<Visitor>) -> Result<Html<String>> {
    let conversation = mounted(&visitor)?;
    Ok(chat_fragment(&visitor, &conversation))
}

/// Conversation snapshot for API responses.
#[derive(Debug, Serialize)]
struct ConversationDto {
    id: String,
    pending: bool,
    listening: bool,
    messages: Vec<Message>,
}

/// GET /api/chat/messages.json
async fn messages_json(Extension(visitor): Extension<Visitor>) -> Result<Json<ConversationDto>> {
    let conversation = mounted(&visitor)?;
    Ok(Json(ConversationDto {
        id: conversation.id().to_string(),
        pending: conversation.is_pending(),
        listening: conversation.is_listening(),
        messages: conversation.messages(),
    }))
}

/// POST /api/chat/voice - the mic sits inside the chat form, so htmx posts
/// the typed text along with the click.
async fn toggle_voice(
    Extension(visitor): Extension<Visitor>,
    form: std::result::Result<Form<MessageForm>, FormRejection>,
) -> Result<Html<String>> {
    let conversation = mounted(&visitor)?;
    if let Ok(Form(form)) = form {
        conversation.set_draft(form.message);
    }
    conversation.toggle_voice_input();
    Ok(fragment(&visitor, &ui::chat::input_bar(&conversation, false)))
}

async fn copy_message(
    Extension(visitor): Extension<Visitor>,
    Path(id): Path<String>,
) -> Result<Html<String>> {
    let conversation = mounted(&visitor)?;
    let content = conversation.copy(&id)?;
    Ok(fragment(&visitor, &ui::chat::clipboard(&content)))
}

async fn save_message(
    Extension(visitor): Extension<Visitor>,
    Path(id): Path<String>,
) -> Result<Html<String>> {
    mounted(&visitor)?.save(&id)?;
    Ok(Html(toast_region(&visitor.notifier().drain(), false)))
}

#[derive(Debug, Deserialize)]
struct HistoryQuery {
    #[serde(default)]
    q: String,
}

async fn search_history(
    Extension(visitor): Extension<Visitor>,
    Query(query): Query<HistoryQuery>,
) -> Result<Html<String>> {
    let body = visitor
        .with_history(|h| {
            h.set_query(query.q);
            ui::chat::history_panel(h)
        })
        .ok_or_else(not_mounted)?;
    Ok(fragment(&visitor, &body))
}

async fn select_chat(
    Extension(visitor): Extension<Visitor>,
    Path(id): Path<String>,
) -> Result<Html<String>> {
    let body = visitor
        .with_history(|h: &mut SessionList| -> Result<String> {
            h.select(&id)?;
            Ok(format!(
                "{}{}",
                ui::chat::history_panel(h),
                ui::chat::chat_title(h, true)
            ))
        })
        .ok_or_else(not_mounted)??;
    Ok(fragment(&visitor, &body))
}

/// GET /api/toasts - drain pending notifications.
async fn drain_toasts(Extension(visitor): Extension<Visitor>) -> Html<String> {
    Html(toast_region(&visitor.notifier().drain(), false))
}
