//! Dashboard shell: sidebar routes, collapsible panel and header menus.

use axum::{
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Redirect, Response},
};

/// Dashboard sections reachable from the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Chat,
    Spaces,
    Analysis,
    Forecasting,
    Settings,
}

impl Route {
    /// Sidebar order.
    pub const ALL: [Self; 5] = [
        Self::Chat,
        Self::Spaces,
        Self::Analysis,
        Self::Forecasting,
        Self::Settings,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Chat => "Chat",
            Self::Spaces => "Spaces",
            Self::Analysis => "Analysis",
            Self::Forecasting => "Forecasting",
            Self::Settings => "Settings",
        }
    }

    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Chat => "/dashboard/chat",
            Self::Spaces => "/dashboard/spaces",
            Self::Analysis => "/dashboard/analysis",
            Self::Forecasting => "/dashboard/forecasting",
            Self::Settings => "/dashboard/settings",
        }
    }

    /// Last path segment, as used by `/dashboard/{section}`.
    #[must_use]
    pub fn slug(self) -> &'static str {
        self.path().trim_start_matches("/dashboard/")
    }

    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.path() == path)
    }

    #[must_use]
    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.slug() == slug)
    }
}

/// Presentation values of the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelLayout {
    pub width_px: u16,
    pub label_opacity: u8,
}

/// Per-visitor shell flags. Nothing here affects data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShellState {
    pub panel_open: bool,
    pub language_menu_open: bool,
    pub profile_menu_open: bool,
}

impl ShellState {
    pub fn toggle_panel(&mut self) -> PanelLayout {
        self.panel_open = !self.panel_open;
        self.panel_layout()
    }

    #[must_use]
    pub fn panel_layout(&self) -> PanelLayout {
        if self.panel_open {
            PanelLayout {
                width_px: 280,
                label_opacity: 1,
            }
        } else {
            PanelLayout {
                width_px: 80,
                label_opacity: 0,
            }
        }
    }

    /// Open or close the language dropdown, closing the profile menu.
    pub fn toggle_language_menu(&mut self) {
        self.language_menu_open = !self.language_menu_open;
        self.profile_menu_open = false;
    }

    /// Open or close the profile dropdown, closing the language menu.
    pub fn toggle_profile_menu(&mut self) {
        self.profile_menu_open = !self.profile_menu_open;
        self.language_menu_open = false;
    }

    pub fn close_menus(&mut self) {
        self.language_menu_open = false;
        self.profile_menu_open = false;
    }
}

/// Static badge count on the notification bell.
pub const NOTIFICATION_BADGE: u8 = 3;

/// Request to the host to show another page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub location: String,
    /// Answer with `HX-Redirect` instead of a 303.
    pub htmx: bool,
}

/// Hand `path` to the host navigation facility.
#[must_use]
pub fn navigate_to(path: impl Into<String>, headers: &HeaderMap) -> Navigation {
    Navigation {
        location: path.into(),
        htmx: headers.contains_key("hx-request"),
    }
}

/// Where the dashboard quick-ask box leads, if anywhere.
#[must_use]
pub fn quick_ask_target(query: &str) -> Option<String> {
    let query = query.trim();
    (!query.is_empty()).then(|| {
        let encoded: String = url::form_urlencoded::byte_serialize(query.as_bytes()).collect();
        format!("{}?q={encoded}", Route::Chat.path())
    })
}

impl IntoResponse for Navigation {
    fn into_response(self) -> Response {
        tracing::debug!(location = %self.location, htmx = self.htmx, "Navigating");
        if self.htmx {
            match HeaderValue::from_str(&self.location) {
                Ok(value) => ([("HX-Redirect", value)], StatusCode::OK).into_response(),
                Err(_) => Redirect::to("/").into_response(),
            }
        } else {
            Redirect::to(&self.location).into_response()
        }
    }
}
