//! Dashboard frame: collapsible sidebar and top bar.

use crate::context::SessionContext;
use crate::language::Language;
use crate::shell::{NOTIFICATION_BADGE, Route, ShellState};

use super::components::{BadgeVariant, ButtonSize, ButtonVariant, Icon, badge, button, icon};
use super::escape;

fn route_icon(route: Route) -> Icon {
    match route {
        Route::Chat => Icon::MessageSquare,
        Route::Spaces => Icon::Folder,
        Route::Analysis => Icon::BarChart,
        Route::Forecasting => Icon::TrendingUp,
        Route::Settings => Icon::Settings,
    }
}

/// Sidebar, top bar and `main` inside the document body.
#[must_use]
pub fn dashboard_page(
    context: &SessionContext,
    shell: &ShellState,
    active: Route,
    main: &str,
) -> String {
    format!(
        r#"<div class="flex h-screen bg-background">
    {sidebar}
    <div class="flex-1 flex flex-col">
        {topbar}
        <main id="dashboard-main" class="flex-1 overflow-auto">{main}</main>
    </div>
</div>"#,
        sidebar = sidebar(shell, active),
        topbar = topbar(context, shell),
    )
}

/// The `#sidebar` fragment.
#[must_use]
pub fn sidebar(shell: &ShellState, active: Route) -> String {
    let layout = shell.panel_layout();
    let toggle = button(
        ButtonVariant::Ghost,
        ButtonSize::Icon,
        &format!(
            r##"type="button" aria-label="Toggle sidebar" hx-post="/dashboard/panel" hx-vals='{{"active": "{}"}}' hx-target="#sidebar" hx-swap="outerHTML""##,
            active.slug()
        ),
        &icon(
            if shell.panel_open { Icon::Close } else { Icon::Menu },
            "h-4 w-4",
        ),
    );
    let brand = if shell.panel_open {
        r#"<span class="font-bold text-lg">INGRES AI</span>"#
    } else {
        ""
    };

    let items: String = Route::ALL
        .into_iter()
        .map(|route| {
            let class = if route == active {
                "bg-primary text-white"
            } else {
                "hover:bg-accent"
            };
            let label = if shell.panel_open { route.label() } else { "" };
            format!(
                r#"<a href="{path}" class="w-full flex items-center gap-3 px-3 py-3 rounded-lg transition-colors {class}" title="{title}"{current}>{icon}<span class="font-medium truncate" style="opacity: {opacity}">{label}</span></a>"#,
                path = route.path(),
                title = route.label(),
                current = if route == active { r#" aria-current="page""# } else { "" },
                icon = icon(route_icon(route), "h-5 w-5 flex-shrink-0"),
                opacity = layout.label_opacity,
            )
        })
        .collect();

    format!(
        r#"<aside id="sidebar" class="bg-card border-r flex flex-col relative z-40 transition-all" style="width: {width}px" data-open="{open}">
    <div class="flex items-center justify-between p-4 border-b">
        <div class="flex items-center gap-3" style="opacity: {opacity}">
            <div class="w-8 h-8 bg-primary rounded-lg flex items-center justify-center"><span class="text-white font-bold text-sm">I</span></div>
            {brand}
        </div>
        {toggle}
    </div>
    <nav class="flex-1 p-4 space-y-2">{items}</nav>
</aside>"#,
        width = layout.width_px,
        open = shell.panel_open,
        opacity = layout.label_opacity,
    )
}

fn language_menu(current: Language, open: bool) -> String {
    let trigger = button(
        ButtonVariant::Ghost,
        ButtonSize::Sm,
        r##"type="button" hx-post="/dashboard/menu/language" hx-target="#topbar" hx-swap="outerHTML""##,
        &format!(
            r#"{}<span>{}</span><span class="hidden sm:inline">{}</span>"#,
            icon(Icon::Globe, "h-4 w-4"),
            current.flag(),
            current.label()
        ),
    );
    if !open {
        return format!(r#"<div class="relative">{trigger}</div>"#);
    }
    let items: String = Language::ALL
        .into_iter()
        .map(|lang| {
            let active = if lang == current { " bg-accent" } else { "" };
            format!(
                r##"<button type="button" role="menuitem" class="menu-item{active}" hx-post="/dashboard/language" hx-vals='{{"language": "{code}"}}' hx-target="#topbar" hx-swap="outerHTML"><span class="mr-2">{flag}</span>{label}</button>"##,
                code = lang.code(),
                flag = lang.flag(),
                label = lang.label(),
            )
        })
        .collect();
    format!(
        r#"<div class="relative">{trigger}<div class="menu absolute right-0 mt-2" role="menu">{items}</div></div>"#
    )
}

fn profile_menu(context: &SessionContext, open: bool) -> String {
    let (name, email, initials, avatar) = match &context.user {
        Some(user) => (
            user.name.as_str(),
            user.email.as_str(),
            user.initials(),
            user.avatar.as_deref(),
        ),
        None => ("", "", String::new(), None),
    };
    let face = match avatar {
        Some(src) => format!(
            r#"<img src="{}" alt="" class="h-8 w-8 rounded-full">"#,
            escape(src)
        ),
        None => format!(
            r#"<span class="h-8 w-8 rounded-full bg-primary text-white flex items-center justify-center">{}</span>"#,
            escape(&initials)
        ),
    };
    let trigger = format!(
        r##"<button type="button" aria-label="Account" class="relative h-8 w-8 rounded-full" hx-post="/dashboard/menu/profile" hx-target="#topbar" hx-swap="outerHTML">{face}</button>"##
    );
    if !open {
        return format!(r#"<div class="relative">{trigger}</div>"#);
    }
    let settings = Route::Settings.path();
    format!(
        r#"<div class="relative">{trigger}
    <div class="menu absolute right-0 mt-2 w-56" role="menu">
        <div class="px-2 py-1.5 flex flex-col gap-1">
            <p class="text-sm font-medium leading-none">{name}</p>
            <p class="text-xs leading-none text-textMuted">{email}</p>
        </div>
        <hr>
        <a href="{settings}" class="menu-item" role="menuitem">{user_icon}Profile</a>
        <a href="{settings}" class="menu-item" role="menuitem">{settings_icon}Settings</a>
        <hr>
        <form method="post" action="/logout"><button type="submit" class="menu-item w-full" role="menuitem">{logout_icon}Log out</button></form>
    </div>
</div>"#,
        name = escape(name),
        email = escape(email),
        user_icon = icon(Icon::User, "mr-2 h-4 w-4"),
        settings_icon = icon(Icon::Settings, "mr-2 h-4 w-4"),
        logout_icon = icon(Icon::LogOut, "mr-2 h-4 w-4"),
    )
}

/// The `#topbar` fragment.
#[must_use]
pub fn topbar(context: &SessionContext, shell: &ShellState) -> String {
    let bell = format!(
        r#"<button type="button" aria-label="Notifications" class="relative h-8 w-8 inline-flex items-center justify-center">{}<span class="absolute -top-1 -right-1">{}</span></button>"#,
        icon(Icon::Bell, "h-4 w-4"),
        badge(BadgeVariant::Destructive, &NOTIFICATION_BADGE.to_string())
    );
    format!(
        r#"<header id="topbar" class="bg-card border-b px-6 py-4">
    <div class="flex items-center justify-between">
        <form class="flex-1 max-w-md" method="post" action="/dashboard/quick-ask">
            <div class="relative">
                {search}
                <input type="text" name="query" placeholder="Quick ask anything..." class="pl-10 input" autocomplete="off">
            </div>
        </form>
        <div class="flex items-center gap-4">
            {language}
            {bell}
            {profile}
        </div>
    </div>
</header>"#,
        search = icon(
            Icon::Search,
            "absolute left-3 top-1/2 -translate-y-1/2 h-4 w-4 text-textMuted"
        ),
        language = language_menu(context.language, shell.language_menu_open),
        profile = profile_menu(context, shell.profile_menu_open),
    )
}

/// Body of the sections that have no content yet.
#[must_use]
pub fn placeholder_section(route: Route) -> String {
    format!(
        r#"<div class="p-8"><h1 class="text-2xl font-semibold mb-2">{}</h1><p class="text-textMuted">Coming soon.</p></div>"#,
        route.label()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::UserProfile;

    #[test]
    fn test_sidebar_width_follows_panel() {
        let mut shell = ShellState::default();
        let closed = sidebar(&shell, Route::Chat);
        assert!(closed.contains("width: 80px"));
        assert!(!closed.contains(">Spaces</span>"));

        shell.toggle_panel();
        let open = sidebar(&shell, Route::Spaces);
        assert!(open.contains("width: 280px"));
        assert!(open.contains(">Spaces</span>"));
        assert!(open.contains(r#"href="/dashboard/spaces" class="w-full flex items-center gap-3 px-3 py-3 rounded-lg transition-colors bg-primary"#));
    }

    #[test]
    fn test_topbar_menus() {
        let context = SessionContext {
            user: Some(UserProfile {
                name: "Demo User".to_string(),
                email: "demo@ingres.ai".to_string(),
                avatar: None,
            }),
            language: Language::Hi,
        };
        let mut shell = ShellState::default();
        let closed = topbar(&context, &shell);
        assert!(closed.contains("हिंदी"));
        assert!(closed.contains(">DU<"));
        assert!(closed.contains(">3<"));
        assert!(!closed.contains("Log out"));

        shell.toggle_profile_menu();
        assert!(topbar(&context, &shell).contains("Log out"));

        shell.toggle_language_menu();
        let html = topbar(&context, &shell);
        assert!(html.contains("मराठी"));
        assert!(!html.contains("Log out"));
    }
}
