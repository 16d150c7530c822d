//! The single shared, auto-dismissing notification surface of a page.

use maud::{html, Markup};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
    Info,
}

impl Severity {
    /// CSS class of the notification surface.
    pub const fn class(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Info => "info",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
}

/// Handed out by [`Notifier::notify`]; redeemed by the dismissal timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationTicket(u64);

/// Holds at most one notification.
///
/// A new notification replaces the visible one and invalidates its
/// dismissal ticket, so the older timer firing later has no effect.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notifier {
    current: Option<Notification>,
    generation: u64,
}

impl Notifier {
    pub fn notify(&mut self, message: impl Into<String>, severity: Severity) -> NotificationTicket {
        self.generation += 1;
        self.current = Some(Notification {
            message: message.into(),
            severity,
        });
        NotificationTicket(self.generation)
    }

    /// Hide the notification if `ticket` belongs to the visible one.
    pub fn dismiss(&mut self, ticket: NotificationTicket) -> bool {
        if ticket.0 != self.generation || self.current.is_none() {
            return false;
        }
        self.current = None;
        true
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    pub fn render(&self) -> Markup {
        html! {
            @match &self.current {
                Some(Notification { message, severity }) => {
                    div id="notification" class={ "notification " (severity.class()) " show" } {
                        (message)
                    }
                }
                None => {
                    div id="notification" class="notification" {}
                }
            }
        }
    }
}
