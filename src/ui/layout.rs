//! HTML shell and toast region.

use crate::notify::{Toast, ToastKind};

use super::components::toast_classes;
use super::escape;

/// Wrap `body` in the full document.
#[must_use]
pub fn html_shell(title: &str, body: &str, toasts: &[Toast]) -> String {
    let title = escape(title);
    let toasts = toast_region(toasts, false);
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <meta name="description" content="Conversational access to India's groundwater data">
    <title>{title} - INGRES AI</title>

    <script src="/static/vendor/htmx-2.0.8.min.js"></script>
    <script type="module" src="/static/main.js"></script>
    <link rel="stylesheet" href="/static/app.css">
</head>
<body class="min-h-screen bg-background text-textPrimary antialiased">
    {body}
    {toasts}
    <template id="clipboard"></template>
</body>
</html>"#
    )
}

/// The `#toasts` container.
///
/// With `oob` set the element carries `hx-swap-oob` so it can ride along with
/// any fragment response.
#[must_use]
pub fn toast_region(toasts: &[Toast], oob: bool) -> String {
    let items: String = toasts
        .iter()
        .map(|toast| {
            format!(
                r#"<div class="toast rounded-xl p-4 shadow-lg {}" role="status" data-kind="{}">
                    <p class="font-semibold text-sm">{}</p>
                    <p class="text-xs opacity-80">{}</p>
                </div>"#,
                toast_classes(toast.kind),
                match toast.kind {
                    ToastKind::Info => "info",
                    ToastKind::Error => "error",
                },
                escape(&toast.title),
                escape(&toast.description)
            )
        })
        .collect();
    let swap = if oob { r#" hx-swap-oob="true""# } else { "" };
    format!(
        r#"<div id="toasts"{swap} class="fixed bottom-4 right-4 z-50 flex flex-col gap-2">{items}</div>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_contains_body_and_toasts() {
        let html = html_shell("Chat", "<main>hi</main>", &[Toast::info("Saved", "ok")]);
        assert!(html.contains("<title>Chat - INGRES AI</title>"));
        assert!(html.contains("<main>hi</main>"));
        assert!(html.contains("Saved"));
        assert!(!html.contains("hx-swap-oob"));
    }

    #[test]
    fn test_oob_region() {
        let html = toast_region(&[Toast::error("Oops", "<bad>")], true);
        assert!(html.starts_with(r#"<div id="toasts" hx-swap-oob="true""#));
        assert!(html.contains("&lt;bad&gt;"));
        assert!(html.contains(r#"data-kind="error""#));
    }
}
