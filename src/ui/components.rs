//! ShadCN-style building blocks.
//!
//! Each visual variant is a tagged enum consumed by a single render function.

use crate::notify::ToastKind;

/// Button visual variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ButtonVariant {
    /// Primary action button.
    #[default]
    Primary,
    /// Bordered, transparent button.
    Outline,
    /// Subtle ghost button.
    Ghost,
    /// Active/alert state, e.g. a live microphone.
    Destructive,
}

impl ButtonVariant {
    /// Get CSS classes for this variant.
    #[must_use]
    pub fn classes(self) -> &'static str {
        match self {
            Self::Primary => "bg-primary text-white hover:bg-primaryMuted",
            Self::Outline => "bg-transparent border border-panelBorder text-textPrimary hover:bg-panel",
            Self::Ghost => "bg-transparent text-textPrimary hover:bg-panel",
            Self::Destructive => "bg-danger text-white hover:bg-red-600",
        }
    }
}

/// Button size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ButtonSize {
    /// Small button.
    Sm,
    /// Medium button (default).
    #[default]
    Md,
    /// Large button.
    Lg,
    /// Icon-only button.
    Icon,
}

impl ButtonSize {
    /// Get CSS classes for this size.
    #[must_use]
    pub fn classes(self) -> &'static str {
        match self {
            Self::Sm => "h-8 px-3 text-xs",
            Self::Md => "h-10 px-4 text-sm",
            Self::Lg => "h-12 px-8 text-lg",
            Self::Icon => "h-8 w-8",
        }
    }
}

/// Render a `<button>`.
///
/// `attrs` is inserted verbatim (HTMX attributes, `type`, `disabled`).
#[must_use]
pub fn button(variant: ButtonVariant, size: ButtonSize, attrs: &str, body: &str) -> String {
    format!(
        r#"<button class="inline-flex items-center justify-center gap-2 rounded-lg font-medium transition-colors disabled:pointer-events-none disabled:opacity-50 {} {}" {attrs}>{body}</button>"#,
        variant.classes(),
        size.classes(),
    )
}

/// Badge visual variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BadgeVariant {
    #[default]
    Secondary,
    Outline,
    Destructive,
}

impl BadgeVariant {
    #[must_use]
    pub fn classes(self) -> &'static str {
        match self {
            Self::Secondary => "bg-panel text-textPrimary",
            Self::Outline => "border border-panelBorder text-textMuted",
            Self::Destructive => "bg-danger text-white",
        }
    }
}

#[must_use]
pub fn badge(variant: BadgeVariant, text: &str) -> String {
    format!(
        r#"<span class="inline-flex items-center rounded-full px-2 py-0.5 text-xs font-semibold {}">{}</span>"#,
        variant.classes(),
        super::escape(text)
    )
}

/// Icons used across the screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    ArrowRight,
    BarChart,
    Bell,
    Bot,
    Clock,
    Close,
    Copy,
    Droplets,
    Filter,
    Folder,
    Globe,
    Languages,
    LogOut,
    Menu,
    MessageSquare,
    Mic,
    MicOff,
    Play,
    Plus,
    Save,
    Search,
    Send,
    Settings,
    Sparkles,
    TrendingUp,
    User,
}

impl Icon {
    /// SVG child elements, 24x24 viewbox.
    fn body(self) -> &'static str {
        match self {
            Self::ArrowRight => r#"<path d="M5 12h14"/><path d="m12 5 7 7-7 7"/>"#,
            Self::BarChart => r#"<line x1="12" x2="12" y1="20" y2="10"/><line x1="18" x2="18" y1="20" y2="4"/><line x1="6" x2="6" y1="20" y2="16"/>"#,
            Self::Bell => r#"<path d="M6 8a6 6 0 0 1 12 0c0 7 3 9 3 9H3s3-2 3-9"/><path d="M10.3 21a1.94 1.94 0 0 0 3.4 0"/>"#,
            Self::Bot => r#"<rect width="18" height="10" x="3" y="11" rx="2"/><circle cx="12" cy="5" r="2"/><path d="M12 7v4"/>"#,
            Self::Clock => r#"<circle cx="12" cy="12" r="10"/><polyline points="12 6 12 12 16 14"/>"#,
            Self::Close => r#"<path d="M18 6 6 18"/><path d="m6 6 12 12"/>"#,
            Self::Copy => r#"<rect width="14" height="14" x="8" y="8" rx="2"/><path d="M4 16c-1.1 0-2-.9-2-2V4c0-1.1.9-2 2-2h10c1.1 0 2 .9 2 2"/>"#,
            Self::Droplets => r#"<path d="M7 16.3c2.2 0 4-1.83 4-4.05 0-1.16-.57-2.26-1.71-3.19S7.29 6.75 7 5.3c-.29 1.45-1.14 2.84-2.29 3.76S3 11.1 3 12.25c0 2.22 1.8 4.05 4 4.05z"/><path d="M12.56 6.6A10.97 10.97 0 0 0 14 3.02c.5 2.5 2 4.9 4 6.5s3 3.5 3 5.5a6.98 6.98 0 0 1-11.91 4.97"/>"#,
            Self::Filter => r#"<polygon points="22 3 2 3 10 12.46 10 19 14 21 14 12.46 22 3"/>"#,
            Self::Folder => r#"<path d="M20 20a2 2 0 0 0 2-2V8a2 2 0 0 0-2-2h-7.9a2 2 0 0 1-1.69-.9L9.6 3.9A2 2 0 0 0 7.93 3H4a2 2 0 0 0-2 2v13a2 2 0 0 0 2 2Z"/>"#,
            Self::Globe => r#"<circle cx="12" cy="12" r="10"/><path d="M2 12h20"/><path d="M12 2a15.3 15.3 0 0 1 0 20 15.3 15.3 0 0 1 0-20"/>"#,
            Self::Languages => r#"<path d="m5 8 6 6"/><path d="m4 14 6-6 2-3"/><path d="M2 5h12"/><path d="M7 2h1"/><path d="m22 22-5-10-5 10"/><path d="M14 18h6"/>"#,
            Self::LogOut => r#"<path d="M9 21H5a2 2 0 0 1-2-2V5a2 2 0 0 1 2-2h4"/><polyline points="16 17 21 12 16 7"/><line x1="21" x2="9" y1="12" y2="12"/>"#,
            Self::Menu => r#"<line x1="4" x2="20" y1="12" y2="12"/><line x1="4" x2="20" y1="6" y2="6"/><line x1="4" x2="20" y1="18" y2="18"/>"#,
            Self::MessageSquare => r#"<path d="M21 15a2 2 0 0 1-2 2H7l-4 4V5a2 2 0 0 1 2-2h14a2 2 0 0 1 2 2z"/>"#,
            Self::Mic => r#"<path d="M12 2a3 3 0 0 0-3 3v7a3 3 0 0 0 6 0V5a3 3 0 0 0-3-3Z"/><path d="M19 10v2a7 7 0 0 1-14 0v-2"/><line x1="12" x2="12" y1="19" y2="22"/>"#,
            Self::MicOff => r#"<line x1="2" x2="22" y1="2" y2="22"/><path d="M18.89 13.23A7.12 7.12 0 0 0 19 12v-2"/><path d="M5 10v2a7 7 0 0 0 12 5"/><path d="M15 9.34V5a3 3 0 0 0-5.68-1.33"/><path d="M9 9v3a3 3 0 0 0 5.12 2.12"/><line x1="12" x2="12" y1="19" y2="22"/>"#,
            Self::Play => r#"<polygon points="6 3 20 12 6 21 6 3"/>"#,
            Self::Plus => r#"<path d="M5 12h14"/><path d="M12 5v14"/>"#,
            Self::Save => r#"<path d="M19 21H5a2 2 0 0 1-2-2V5a2 2 0 0 1 2-2h11l5 5v11a2 2 0 0 1-2 2z"/><polyline points="17 21 17 13 7 13 7 21"/><polyline points="7 3 7 8 15 8"/>"#,
            Self::Search => r#"<circle cx="11" cy="11" r="8"/><path d="m21 21-4.3-4.3"/>"#,
            Self::Send => r#"<line x1="22" y1="2" x2="11" y2="13"/><polygon points="22 2 15 22 11 13 2 9 22 2"/>"#,
            Self::Settings => r#"<circle cx="12" cy="12" r="3"/><path d="M12 1v2M12 21v2M4.22 4.22l1.42 1.42M18.36 18.36l1.42 1.42M1 12h2M21 12h2M4.22 19.78l1.42-1.42M18.36 5.64l1.42-1.42"/>"#,
            Self::Sparkles => r#"<path d="m12 3-1.912 5.813a2 2 0 0 1-1.275 1.275L3 12l5.813 1.912a2 2 0 0 1 1.275 1.275L12 21l1.912-5.813a2 2 0 0 1 1.275-1.275L21 12l-5.813-1.912a2 2 0 0 1-1.275-1.275L12 3Z"/>"#,
            Self::TrendingUp => r#"<polyline points="22 7 13.5 15.5 8.5 10.5 2 17"/><polyline points="16 7 22 7 22 13"/>"#,
            Self::User => r#"<path d="M19 21v-2a4 4 0 0 0-4-4H9a4 4 0 0 0-4 4v2"/><circle cx="12" cy="7" r="4"/>"#,
        }
    }
}

/// Render an inline SVG icon.
#[must_use]
pub fn icon(icon: Icon, class: &str) -> String {
    format!(
        r#"<svg class="{class}" xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round">{}</svg>"#,
        icon.body()
    )
}

/// CSS classes of a toast card.
#[must_use]
pub fn toast_classes(kind: ToastKind) -> &'static str {
    match kind {
        ToastKind::Info => "bg-surfaceContainer border border-panelBorder",
        ToastKind::Error => "bg-danger text-white",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_includes_variant_classes() {
        let html = button(ButtonVariant::Outline, ButtonSize::Sm, r#"type="button""#, "Filter");
        assert!(html.contains(ButtonVariant::Outline.classes()));
        assert!(html.contains("h-8 px-3"));
        assert!(html.contains(r#"type="button""#));
        assert!(html.ends_with("Filter</button>"));
    }

    #[test]
    fn test_badge_escapes_text() {
        assert!(badge(BadgeVariant::Secondary, "<x>").contains("&lt;x&gt;"));
    }

    #[test]
    fn test_icon_is_svg() {
        let svg = icon(Icon::Send, "h-4 w-4");
        assert!(svg.starts_with("<svg class=\"h-4 w-4\""));
        assert!(svg.contains("polygon"));
    }
}
