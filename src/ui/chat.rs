//! Chat screen fragments.
//!
//! | Element id       | Contents                                  |
//! |------------------|-------------------------------------------|
//! | `#chat-history`  | search box and chat summaries             |
//! | `#chat-title`    | title of the selected chat                |
//! | `#chat-messages` | message list and the thinking indicator   |
//! | `#chat-input`    | microphone toggle and the message form    |
//!
//! While a reply is pending `#chat-messages` polls itself; the first render
//! without the pending flag drops the trigger and polling stops.

use crate::conversation::{Conversation, Message, MetricTone, Role};
use crate::history::SessionList;
use crate::language::Language;

use super::components::{
    BadgeVariant, ButtonSize, ButtonVariant, Icon, badge, button, icon,
};
use super::escape;

/// Poll period while a reply is pending.
const POLL_TRIGGER: &str = "every 500ms";

/// Whether the copy/save buttons under a bot message do anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageActions {
    /// Wired to the chat API.
    Live,
    /// Rendered but inert, as in the landing demo.
    Decorative,
}

fn tone_class(tone: MetricTone) -> &'static str {
    match tone {
        MetricTone::Neutral => "text-primary",
        MetricTone::Negative => "text-danger",
        MetricTone::Highlight => "text-accent",
    }
}

/// One message card with its footer.
#[must_use]
pub fn message_bubble(message: &Message, time_label: &str, actions: MessageActions) -> String {
    let (align, card) = match message.role {
        Role::User => ("justify-end", "bg-primary text-white"),
        Role::Bot => ("justify-start", "bg-card border"),
    };

    let metadata = message
        .metadata
        .as_ref()
        .filter(|meta| !meta.is_empty())
        .map(|meta| {
            let mut badges = String::new();
            if let Some(source) = &meta.source {
                badges.push_str(&badge(BadgeVariant::Secondary, source));
            }
            if let Some(year) = meta.year {
                badges.push_str(&badge(BadgeVariant::Outline, &year.to_string()));
            }
            if let Some(region) = &meta.region {
                badges.push_str(&badge(BadgeVariant::Outline, region));
            }
            format!(
                r#"<div class="mt-3 pt-3 border-t"><div class="flex flex-wrap gap-2">{badges}</div></div>"#
            )
        })
        .unwrap_or_default();

    let visuals = if message.visuals.is_empty() {
        String::new()
    } else {
        format!(
            r#"<div class="mt-3 pt-3 border-t flex items-center gap-2 text-xs text-textMuted">{}<span>Visual data available</span></div>"#,
            icon(Icon::BarChart, "h-3 w-3")
        )
    };

    let metrics = if message.metrics.is_empty() {
        String::new()
    } else {
        let tiles: String = message
            .metrics
            .iter()
            .map(|metric| {
                format!(
                    r#"<div class="rounded-lg p-3 text-center"><div class="text-lg font-bold {}">{}</div><div class="text-xs text-textMuted">{}</div></div>"#,
                    tone_class(metric.tone),
                    escape(&metric.value),
                    escape(&metric.label)
                )
            })
            .collect();
        format!(r#"<div class="mt-4 grid grid-cols-3 gap-3">{tiles}</div>"#)
    };

    let buttons = if message.is_bot() {
        let id = escape(&message.id);
        let (copy_attrs, save_attrs) = match actions {
            MessageActions::Live => (
                format!(
                    r##"type="button" title="Copy" hx-post="/api/chat/messages/{id}/copy" hx-target="#clipboard" hx-swap="outerHTML""##
                ),
                format!(
                    r##"type="button" title="Save to Space" hx-post="/api/chat/messages/{id}/save" hx-target="#toasts" hx-swap="outerHTML""##
                ),
            ),
            MessageActions::Decorative => (
                r#"type="button" title="Copy""#.to_string(),
                r#"type="button" title="Save to Space""#.to_string(),
            ),
        };
        format!(
            r#"<div class="flex items-center gap-1">{}{}</div>"#,
            button(ButtonVariant::Ghost, ButtonSize::Icon, &copy_attrs, &icon(Icon::Copy, "h-3 w-3")),
            button(ButtonVariant::Ghost, ButtonSize::Icon, &save_attrs, &icon(Icon::Save, "h-3 w-3")),
        )
    } else {
        String::new()
    };

    format!(
        r#"<div class="flex {align}" data-message-id="{id}" data-role="{role}">
    <div class="max-w-[80%]">
        <div class="rounded-2xl p-4 {card}">
            <p class="text-sm leading-relaxed">{content}</p>{metadata}{visuals}{metrics}
        </div>
        <div class="flex items-center justify-between mt-2 px-2">
            <div class="flex items-center gap-1 text-xs text-textMuted">{clock}<span>{time}</span></div>
            {buttons}
        </div>
    </div>
</div>"#,
        id = escape(&message.id),
        role = match message.role {
            Role::User => "user",
            Role::Bot => "bot",
        },
        content = escape(&message.content),
        clock = icon(Icon::Clock, "h-3 w-3"),
        time = escape(time_label),
    )
}

/// The `#chat-messages` fragment.
#[must_use]
pub fn messages_panel(conversation: &Conversation) -> String {
    let messages: String = conversation
        .messages()
        .iter()
        .map(|message| {
            let time = message.timestamp.format("%H:%M:%S").to_string();
            message_bubble(message, &time, MessageActions::Live)
        })
        .collect();

    let (poll, thinking) = if conversation.is_pending() {
        (
            format!(r#" hx-get="/api/chat/messages" hx-trigger="{POLL_TRIGGER}" hx-swap="outerHTML""#),
            r#"<div class="flex justify-start" id="chat-thinking">
    <div class="rounded-2xl p-4 bg-card border flex items-center gap-2">
        <div class="flex gap-1"><span class="dot"></span><span class="dot"></span><span class="dot"></span></div>
        <span class="text-sm text-textMuted">INGRES AI is thinking...</span>
    </div>
</div>"#,
        )
    } else {
        (String::new(), "")
    };

    format!(
        r#"<div id="chat-messages" class="flex-1 overflow-auto p-4 space-y-4"{poll}>{messages}{thinking}</div>"#
    )
}

/// The `#chat-input` fragment.
#[must_use]
pub fn input_bar(conversation: &Conversation, oob: bool) -> String {
    let pending = conversation.is_pending();
    let draft = conversation.draft();
    let swap = if oob { r#" hx-swap-oob="true""# } else { "" };

    let (mic_variant, mic_icon, mic_label) = if conversation.is_listening() {
        (ButtonVariant::Primary, Icon::MicOff, "Stop voice input")
    } else {
        (ButtonVariant::Outline, Icon::Mic, "Start voice input")
    };
    let mic = button(
        mic_variant,
        ButtonSize::Icon,
        &format!(
            r##"type="button" aria-label="{mic_label}" hx-post="/api/chat/voice" hx-target="#chat-input" hx-swap="outerHTML""##
        ),
        &icon(mic_icon, "h-4 w-4"),
    );

    // Blank drafts stay submittable; the server drops them silently.
    let disabled = if pending { " disabled" } else { "" };
    let send = button(
        ButtonVariant::Primary,
        ButtonSize::Md,
        &format!(r#"type="submit" data-send{disabled}"#),
        &icon(Icon::Send, "h-4 w-4"),
    );

    format!(
        r##"<div id="chat-input" class="p-4 border-t bg-card"{swap}>
    <form class="flex items-center gap-3" hx-post="/api/chat/messages" hx-target="#chat-messages" hx-swap="outerHTML">
        {mic}
        <input name="message" value="{draft}" placeholder="Ask about groundwater data..." class="flex-1 input" autocomplete="off"{disabled}>
        {send}
    </form>
</div>"##,
        draft = escape(&draft),
    )
}

/// The `#chat-history` fragment.
#[must_use]
pub fn history_panel(history: &SessionList) -> String {
    let items: String = history
        .visible()
        .iter()
        .map(|chat| {
            let active = if history.is_selected(&chat.id) {
                "bg-accent"
            } else {
                "hover:bg-panel"
            };
            format!(
                r##"<div class="rounded-lg border p-4 cursor-pointer {active}" data-chat-id="{id}" hx-post="/api/chat/history/{id}/select" hx-target="#chat-history" hx-swap="outerHTML">
    <h3 class="font-medium text-sm leading-tight">{title}</h3>
    <div class="flex items-center justify-between text-xs text-textMuted"><span>{count} messages</span><span>{date}</span></div>
</div>"##,
                id = escape(&chat.id),
                title = escape(&chat.title),
                count = chat.message_count,
                date = chat.last_modified.format("%-m/%-d/%Y"),
            )
        })
        .collect();

    format!(
        r##"<div id="chat-history" class="w-80 border-r bg-card flex flex-col">
    <div class="p-4 border-b">
        <div class="flex items-center justify-between mb-4">
            <h2 class="font-semibold">Chat History</h2>
            {new_chat}
        </div>
        <div class="relative">
            {search_icon}
            <input type="search" name="q" value="{query}" placeholder="Search chats..." class="pl-10 input"
                hx-get="/api/chat/history" hx-trigger="input changed delay:200ms, search" hx-target="#chat-history-list" hx-select="#chat-history-list" hx-swap="outerHTML">
        </div>
    </div>
    <div id="chat-history-list" class="flex-1 overflow-auto p-2 space-y-2">{items}</div>
</div>"##,
        new_chat = button(
            ButtonVariant::Ghost,
            ButtonSize::Icon,
            r#"type="button" aria-label="New chat""#,
            &icon(Icon::Plus, "h-4 w-4")
        ),
        search_icon = icon(
            Icon::Search,
            "absolute left-3 top-1/2 -translate-y-1/2 h-4 w-4 text-textMuted"
        ),
        query = escape(history.query()),
    )
}

/// The `#chat-title` heading.
#[must_use]
pub fn chat_title(history: &SessionList, oob: bool) -> String {
    let swap = if oob { r#" hx-swap-oob="true""# } else { "" };
    format!(
        r#"<h1 id="chat-title" class="font-semibold"{swap}>{}</h1>"#,
        escape(history.selected_title())
    )
}

/// The whole chat screen inside the dashboard frame.
#[must_use]
pub fn chat_main(conversation: &Conversation, history: &SessionList, language: Language) -> String {
    let language_button = button(
        ButtonVariant::Outline,
        ButtonSize::Sm,
        r#"type="button""#,
        &format!("{}{}", icon(Icon::Globe, "h-4 w-4 mr-2"), language.label()),
    );
    let filter_button = button(
        ButtonVariant::Outline,
        ButtonSize::Sm,
        r#"type="button""#,
        &format!("{}Filter", icon(Icon::Filter, "h-4 w-4 mr-2")),
    );
    format!(
        r#"<div class="flex h-full">
    {history}
    <div class="flex-1 flex flex-col">
        <div class="p-4 border-b bg-card">
            <div class="flex items-center justify-between">
                <div>
                    {title}
                    <p class="text-sm text-textMuted">Ask questions about groundwater data in natural language</p>
                </div>
                <div class="flex items-center gap-2">{language_button}{filter_button}</div>
            </div>
        </div>
        {messages}
        {input}
    </div>
</div>"#,
        history = history_panel(history),
        title = chat_title(history, false),
        messages = messages_panel(conversation),
        input = input_bar(conversation, false),
    )
}

/// Carrier for the text the browser should put on the clipboard.
#[must_use]
pub fn clipboard(content: &str) -> String {
    format!(
        r#"<template id="clipboard" data-copy="{}"></template>"#,
        escape(content)
    )
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;
    use crate::backend::MockBackend;
    use crate::notify::Notifier;

    fn conversation() -> Conversation {
        Conversation::new(Arc::new(MockBackend), Notifier::new(), Duration::from_millis(1500))
    }

    #[tokio::test(start_paused = true)]
    async fn test_messages_panel_renders_seed() {
        let chat = conversation();
        let html = messages_panel(&chat);
        assert!(html.contains("CGWB Annual Report 2023"));
        assert!(html.contains("Visual data available"));
        assert!(html.contains("/api/chat/messages/2/copy"));
        assert!(!html.contains("/api/chat/messages/1/copy"));
        assert!(!html.contains("hx-trigger"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_pending_panel_polls() {
        let chat = conversation();
        chat.submit("Punjab?", Language::En).unwrap();

        let html = messages_panel(&chat);
        assert!(html.contains("INGRES AI is thinking..."));
        assert!(html.contains(POLL_TRIGGER));
        assert!(input_bar(&chat, true).contains(" disabled>"));
    }

    #[test]
    fn test_history_panel_marks_selection() {
        let mut history = SessionList::default();
        history.set_query("karnataka");
        let html = history_panel(&history);
        assert!(html.contains("Karnataka Water Table Trends"));
        assert!(!html.contains("Rajasthan Groundwater 2023"));
        assert!(html.contains("9/5/2025"));

        history.select("2").unwrap();
        assert!(chat_title(&history, true).contains("Maharashtra Drought Analysis"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_send_enabled_while_idle() {
        let chat = conversation();
        let idle = input_bar(&chat, false);
        assert!(idle.contains(r#"type="submit" data-send>"#));
        assert!(!idle.contains(" disabled>"));

        chat.submit("Punjab?", Language::En).unwrap();
        assert!(input_bar(&chat, false).contains(r#"type="submit" data-send disabled>"#));
    }

    #[test]
    fn test_clipboard_escapes() {
        assert_eq!(
            clipboard(r#"say "hi""#),
            r#"<template id="clipboard" data-copy="say &quot;hi&quot;"></template>"#
        );
    }
}
