//! Server-rendered HTML.
//!
//! Pages are plain strings built inside one HTML shell. Interactive pieces are
//! HTMX fragments with stable element ids so handlers can swap them in place
//! or out-of-band.
//!
//! # Structure
//!
//! - [`components`]: buttons, badges and icons as closed variant enums
//! - [`layout`]: the HTML shell and the toast region
//! - [`landing`], [`login`], [`dashboard`], [`chat`]: one module per screen

pub mod chat;
pub mod components;
pub mod dashboard;
pub mod landing;
pub mod layout;
pub mod login;

/// Escape text for use in HTML bodies and quoted attribute values.
#[must_use]
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}
