//! Markup helpers shared by the page views.
//!
//! Views are built with `maud`, which escapes every spliced value. Item
//! text therefore never reaches the markup unescaped unless it is wrapped in
//! `PreEscaped`, which no view does.

use maud::{html, Markup};
use time::{macros::format_description, PrimitiveDateTime};

/// HTML-escape `text` for use outside a maud template.
///
/// ```rust
/// assert_eq!(
///     rest_mvu::html::escape(r#"<a href="x">Tom & Jerry</a>"#),
///     "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&lt;/a&gt;"
/// );
/// ```
pub fn escape(text: &str) -> String {
    html! { (text) }.into_string()
}

/// The explanation shown instead of an empty container.
pub fn empty_state(message: &str) -> Markup {
    html! {
        div class="empty-state" {
            p { (message) }
        }
    }
}

/// Empty state with a link leading somewhere useful.
pub fn empty_state_with_link(message: &str, href: &str, label: &str) -> Markup {
    html! {
        div class="empty-state" {
            p { (message) }
            a href=(href) class="btn btn-primary" { (label) }
        }
    }
}

pub fn format_money(amount: f64) -> String {
    format!("{amount:.2} PLN")
}

/// Render an ISO-8601 timestamp as `dd.mm.yyyy, HH:MM:SS`.
///
/// Fractional seconds and offsets are ignored. Unparsable input is shown
/// as-is, a missing timestamp as nothing.
pub fn format_timestamp(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return String::new();
    };
    let input = format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");
    let output = format_description!("[day].[month].[year], [hour]:[minute]:[second]");
    raw.get(..19)
        .and_then(|head| PrimitiveDateTime::parse(head, &input).ok())
        .and_then(|timestamp| timestamp.format(&output).ok())
        .unwrap_or_else(|| raw.to_owned())
}

/// `hidden` attribute helper for modals and sections.
pub fn hidden_unless(visible: bool) -> Option<&'static str> {
    (!visible).then_some("hidden")
}
