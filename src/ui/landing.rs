//! Landing page: hero and the demo overlay.

use crate::landing::{DEMO_TIMESTAMP, DemoOverlay};
use crate::login::AUTHENTICATED_PATH;

use super::chat::{MessageActions, message_bubble};
use super::components::{ButtonSize, ButtonVariant, Icon, button, icon};
use super::escape;

/// Hero section plus the (possibly closed) overlay.
#[must_use]
pub fn landing_page(demo: &DemoOverlay) -> String {
    let play = icon(Icon::Play, "mr-2 h-5 w-5");
    let arrow = icon(Icon::ArrowRight, "ml-2 h-5 w-5");
    let droplets = icon(Icon::Droplets, "w-8 h-8 text-accent");
    let try_demo = button(
        ButtonVariant::Primary,
        ButtonSize::Lg,
        r##"type="button" hx-post="/demo/open" hx-target="#demo-overlay" hx-swap="outerHTML""##,
        &format!("{play}Try Live Demo"),
    );
    let overlay = demo_overlay(demo);
    format!(
        r#"<section class="hero relative min-h-screen flex items-center justify-center overflow-hidden">
    <div class="absolute top-1/4 left-1/4 float-animation opacity-20">{droplets}</div>
    <div class="relative z-10 max-w-6xl mx-auto px-6 text-center space-y-8">
        <h1 class="text-5xl md:text-7xl font-bold leading-tight">
            <span class="text-white">Talk to</span><br>
            <span class="text-gradient">India's Groundwater</span><br>
            <span class="text-white">Data</span>
        </h1>
        <p class="text-xl md:text-2xl max-w-3xl mx-auto leading-relaxed">
            Revolutionary AI-powered platform that transforms complex groundwater data
            into natural conversations. Ask questions in Hindi or English, get instant insights.
        </p>
        <div class="flex flex-col sm:flex-row gap-6 justify-center items-center pt-8">
            {try_demo}
            <a href="{AUTHENTICATED_PATH}" class="inline-flex items-center rounded-xl border-2 px-8 py-3 text-lg font-semibold">Go to Dashboard{arrow}</a>
        </div>
    </div>
</section>
{overlay}"#
    )
}

/// The `#demo-overlay` fragment. Renders an empty placeholder when closed.
#[must_use]
pub fn demo_overlay(demo: &DemoOverlay) -> String {
    if !demo.open {
        return r#"<div id="demo-overlay"></div>"#.to_string();
    }

    let strings = demo.strings();
    let swap = r##"hx-target="#demo-overlay" hx-swap="outerHTML""##;

    let language = button(
        ButtonVariant::Outline,
        ButtonSize::Sm,
        &format!(r#"type="button" hx-post="/demo/language" {swap}"#),
        &format!(
            "{}<span>{}</span>",
            icon(Icon::Languages, "w-4 h-4"),
            strings.toggle_label
        ),
    );
    let close = button(
        ButtonVariant::Ghost,
        ButtonSize::Sm,
        &format!(r#"type="button" aria-label="Close" hx-post="/demo/close" {swap}"#),
        &icon(Icon::Close, "w-5 h-5"),
    );

    let queries: String = strings
        .queries
        .iter()
        .enumerate()
        .map(|(index, query)| {
            format!(
                r#"<div class="p-3 rounded-lg border cursor-pointer suggestion" hx-post="/demo/suggest" hx-vals='{{"index": {index}}}' {swap}><p class="text-sm">{}</p></div>"#,
                escape(query)
            )
        })
        .collect();
    let features: String = strings
        .features
        .iter()
        .map(|feature| format!("<li>• {}</li>", escape(feature)))
        .collect();

    let messages: String = demo
        .sample_messages()
        .iter()
        .map(|message| message_bubble(message, DEMO_TIMESTAMP, MessageActions::Decorative))
        .collect();

    let (mic_variant, mic_icon) = if demo.listening {
        (ButtonVariant::Destructive, Icon::MicOff)
    } else {
        (ButtonVariant::Outline, Icon::Mic)
    };
    let mic = button(
        mic_variant,
        ButtonSize::Sm,
        &format!(r#"type="button" hx-post="/demo/listening" {swap}"#),
        &icon(mic_icon, "w-4 h-4"),
    );
    let send = button(
        ButtonVariant::Primary,
        ButtonSize::Md,
        r#"type="submit""#,
        &icon(Icon::Send, "w-4 h-4"),
    );
    let save_demo = button(
        ButtonVariant::Outline,
        ButtonSize::Sm,
        r#"type="button""#,
        &format!("{}Save Demo to Space", icon(Icon::Save, "w-3 h-3 mr-2")),
    );

    format!(
        r#"<div id="demo-overlay" class="fixed inset-0 backdrop-blur-sm z-50 flex items-center justify-center p-4">
    <div class="w-full max-w-6xl h-[90vh] bg-card rounded-xl flex flex-col overflow-hidden">
        <div class="flex items-center justify-between p-6 border-b">
            <div class="flex items-center gap-4">
                <div class="w-10 h-10 rounded-xl bg-primary flex items-center justify-center">{sparkles}</div>
                <div>
                    <h3 class="text-xl font-bold">INGRES AI Demo</h3>
                    <p class="text-sm text-textMuted">Try groundwater intelligence in action</p>
                </div>
            </div>
            <div class="flex items-center gap-4">{language}{close}</div>
        </div>
        <div class="flex flex-1 overflow-hidden">
            <div class="w-1/3 p-6 border-r">
                <h4 class="text-lg font-bold mb-4">{queries_heading}</h4>
                <div class="space-y-3">{queries}</div>
                <div class="mt-8 p-4 rounded-lg border">
                    <h5 class="font-semibold mb-2">{features_heading}</h5>
                    <ul class="text-sm space-y-1">{features}</ul>
                </div>
            </div>
            <div class="flex-1 flex flex-col">
                <div class="flex-1 overflow-y-auto p-6 space-y-6">{messages}</div>
                <div class="p-6 border-t">
                    <form class="flex items-center gap-3" hx-post="/demo/send" {swap}>
                        {mic}
                        <input name="message" value="{draft}" placeholder="{placeholder}" class="flex-1 input" autocomplete="off">
                        {send}
                    </form>
                    <div class="flex items-center justify-between mt-4">
                        <p class="text-xs text-textMuted">{disclaimer}</p>
                        {save_demo}
                    </div>
                </div>
            </div>
        </div>
    </div>
</div>"#,
        sparkles = icon(Icon::Sparkles, "w-6 h-6 text-white"),
        queries_heading = escape(strings.queries_heading),
        features_heading = escape(strings.features_heading),
        draft = escape(&demo.draft),
        placeholder = escape(strings.placeholder),
        disclaimer = escape(strings.disclaimer),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closed_overlay_is_placeholder() {
        let html = demo_overlay(&DemoOverlay::default());
        assert_eq!(html, r#"<div id="demo-overlay"></div>"#);
        assert!(landing_page(&DemoOverlay::default()).contains("Try Live Demo"));
    }

    #[test]
    fn test_open_overlay_in_hindi() {
        let mut demo = DemoOverlay::default();
        demo.open();
        demo.toggle_language();
        demo.pick_suggestion(1);

        let html = demo_overlay(&demo);
        assert!(html.contains("क्या करके देखें"));
        assert!(html.contains(r#"value="गर्मियों में पंजाब का क्या हाल होगा?""#));
        assert!(html.contains("18.5m"));
        assert!(html.contains(DEMO_TIMESTAMP));
    }
}
