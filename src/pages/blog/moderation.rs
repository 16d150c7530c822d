use maud::{html, Markup};

use super::PendingComment;
use crate::{
    api::{self, Ack, ApiRequest},
    confirm::{self, ConfirmDialog, Confirmation},
    html::{empty_state, format_timestamp},
    notify::{Notification, NotificationTicket, Notifier, Severity},
    store::{RequestToken, Slice},
    Callback, Effect, Emitter, PageContext, PageLogic,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModerationModel {
    pub pending: Slice<Vec<PendingComment>>,
    /// Comment id awaiting confirmation of its approval.
    pub pending_approval: Option<Confirmation<i64>>,
    pub notifier: Notifier,
}

#[derive(Debug, Clone)]
pub enum ModerationEvent {
    PendingLoaded(RequestToken, api::Result<Vec<PendingComment>>),
    ApproveRequested(i64),
    ApproveConfirmed,
    ApproveCancelled,
    Approved(api::Result<Ack>),
    NotificationExpired(NotificationTicket),
}

pub struct ModerationProps {
    pub markup: String,
    pub notification: Option<Notification>,
    pub confirmation: Option<ConfirmDialog>,
    pub on_approve: Callback<i64>,
}

pub struct ModerationLogic {
    ctx: PageContext,
}

impl ModerationLogic {
    pub fn new(ctx: PageContext) -> Self {
        Self { ctx }
    }

    fn load_pending(&self, model: &mut ModerationModel) -> Effect<ModerationEvent> {
        let token = model.pending.begin_load();
        self.ctx.request(ApiRequest::get("/api/comments/pending"), move |result| {
            ModerationEvent::PendingLoaded(token, result)
        })
    }
}

impl PageLogic<ModerationEvent, ModerationModel, ModerationProps> for ModerationLogic {
    fn init(&self, mut model: ModerationModel) -> (ModerationModel, Effect<ModerationEvent>) {
        let effect = self.load_pending(&mut model);
        (model, effect)
    }

    fn update(
        &self,
        event: ModerationEvent,
        model: &ModerationModel,
    ) -> (ModerationModel, Effect<ModerationEvent>) {
        let mut model = model.clone();
        let expired = ModerationEvent::NotificationExpired;

        let effect = match event {
            ModerationEvent::PendingLoaded(token, result) => self.ctx.loaded(
                &mut model.pending,
                &mut model.notifier,
                token,
                result,
                "comments",
                expired,
            ),
            ModerationEvent::ApproveRequested(comment_id) => {
                model.pending_approval = Some(Confirmation::new(
                    "Approve this comment?",
                    comment_id,
                ));
                Effect::none()
            }
            ModerationEvent::ApproveCancelled => {
                model.pending_approval = None;
                Effect::none()
            }
            ModerationEvent::ApproveConfirmed => match model.pending_approval.take() {
                Some(Confirmation { action: comment_id, .. }) => self.ctx.request(
                    ApiRequest::post(format!("/api/comments/{comment_id}/approve")),
                    ModerationEvent::Approved,
                ),
                None => Effect::none(),
            },
            ModerationEvent::Approved(Ok(_)) => {
                log::info!("Comment approved");
                let notice = self.ctx.notify(
                    &mut model.notifier,
                    "Comment approved!",
                    Severity::Success,
                    expired,
                );
                Effect::batch(vec![notice, self.load_pending(&mut model)])
            }
            ModerationEvent::Approved(Err(err)) => {
                self.ctx
                    .failed(&mut model.notifier, &err, "Could not approve the comment", expired)
            }
            ModerationEvent::NotificationExpired(ticket) => {
                model.notifier.dismiss(ticket);
                Effect::none()
            }
        };

        (model, effect)
    }

    fn view(&self, model: &ModerationModel, emitter: &Emitter<ModerationEvent>) -> ModerationProps {
        ModerationProps {
            markup: render_moderation_page(model).into_string(),
            notification: model.notifier.current().cloned(),
            confirmation: confirm::dialog(
                model.pending_approval.as_ref(),
                || emitter.callback(|_: ()| ModerationEvent::ApproveConfirmed),
                || emitter.callback(|_: ()| ModerationEvent::ApproveCancelled),
            ),
            on_approve: emitter.callback(ModerationEvent::ApproveRequested),
        }
    }
}

pub fn render_moderation_page(model: &ModerationModel) -> Markup {
    html! {
        div id="pendingContainer" {
            @if model.pending.get().is_empty() {
                (empty_state("No comments awaiting moderation"))
            } @else {
                @for comment in model.pending.get() {
                    div class="pending-card" data-comment-id=(comment.id) {
                        div class="pending-header" {
                            div {
                                strong { (comment.author) }
                                span class="comment-date" { (format_timestamp(comment.created_at.as_deref())) }
                            }
                            button class="btn btn-success btn-small" { "✓ Approve" }
                        }
                        p class="post-reference" { "Post: " em { (comment.post_title) } }
                        p class="comment-body" { (comment.body) }
                    }
                }
            }
        }
        @if let Some(confirmation) = &model.pending_approval {
            (confirm::render_prompt(&confirmation.prompt))
        }
        (model.notifier.render())
    }
}
