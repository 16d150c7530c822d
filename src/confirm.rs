//! Confirmation step in front of destructive or irreversible commands.

use maud::{html, Markup};

use crate::Callback;

/// A command waiting for the user's explicit go-ahead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation<A> {
    pub prompt: String,
    pub action: A,
}

impl<A> Confirmation<A> {
    pub fn new(prompt: impl Into<String>, action: A) -> Self {
        Self {
            prompt: prompt.into(),
            action,
        }
    }
}

/// The dialog part of Props while a confirmation is pending.
pub struct ConfirmDialog {
    pub prompt: String,
    pub on_confirm: Callback<()>,
    pub on_cancel: Callback<()>,
}

impl ConfirmDialog {
    pub fn render(&self) -> Markup {
        render_prompt(&self.prompt)
    }
}

pub fn render_prompt(prompt: &str) -> Markup {
    html! {
        div class="modal confirm" role="dialog" {
            div class="modal-content" {
                p { (prompt) }
                button class="btn btn-primary" data-action="confirm" { "OK" }
                button class="btn" data-action="cancel" { "Cancel" }
            }
        }
    }
}

/// Build the dialog Props for an optional pending confirmation.
pub fn dialog<A>(
    pending: Option<&Confirmation<A>>,
    on_confirm: impl FnOnce() -> Callback<()>,
    on_cancel: impl FnOnce() -> Callback<()>,
) -> Option<ConfirmDialog> {
    pending.map(|confirmation| ConfirmDialog {
        prompt: confirmation.prompt.clone(),
        on_confirm: on_confirm(),
        on_cancel: on_cancel(),
    })
}
