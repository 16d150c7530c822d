use maud::{html, Markup};

use super::{Member, MemberForm};
use crate::{
    api::{self, Ack, ApiRequest},
    html::empty_state,
    notify::{Notification, NotificationTicket, Notifier, Severity},
    store::{RequestToken, Slice},
    Callback, Effect, Emitter, PageContext, PageLogic,
};

pub const DUPLICATE_EMAIL: &str = "This email address is already registered";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MembersModel {
    pub members: Slice<Vec<Member>>,
    pub notifier: Notifier,
    pub form_resets: u64,
}

#[derive(Debug, Clone)]
pub enum MembersEvent {
    MembersLoaded(RequestToken, api::Result<Vec<Member>>),
    AddMemberSubmitted(MemberForm),
    MemberAdded(api::Result<Ack>),
    NotificationExpired(NotificationTicket),
}

pub struct MembersProps {
    pub markup: String,
    pub notification: Option<Notification>,
    pub form_resets: u64,
    pub on_add_member: Callback<MemberForm>,
}

pub struct MembersLogic {
    ctx: PageContext,
}

impl MembersLogic {
    pub fn new(ctx: PageContext) -> Self {
        Self { ctx }
    }

    fn load_members(&self, model: &mut MembersModel) -> Effect<MembersEvent> {
        let token = model.members.begin_load();
        self.ctx.request(ApiRequest::get("/api/members"), move |result| {
            MembersEvent::MembersLoaded(token, result)
        })
    }
}

impl PageLogic<MembersEvent, MembersModel, MembersProps> for MembersLogic {
    fn init(&self, mut model: MembersModel) -> (MembersModel, Effect<MembersEvent>) {
        let effect = self.load_members(&mut model);
        (model, effect)
    }

    fn update(&self, event: MembersEvent, model: &MembersModel) -> (MembersModel, Effect<MembersEvent>) {
        let mut model = model.clone();
        let expired = MembersEvent::NotificationExpired;

        let effect = match event {
            MembersEvent::MembersLoaded(token, result) => self.ctx.loaded(
                &mut model.members,
                &mut model.notifier,
                token,
                result,
                "members",
                expired,
            ),
            MembersEvent::AddMemberSubmitted(form) => match form.parse() {
                Ok(member) => self.ctx.try_request(
                    ApiRequest::post("/api/members").with_json(&member),
                    MembersEvent::MemberAdded,
                ),
                Err(err) => self.ctx.invalid(&mut model.notifier, &err, expired),
            },
            MembersEvent::MemberAdded(Ok(_)) => {
                log::info!("Member added");
                model.form_resets += 1;
                let notice = self.ctx.notify(
                    &mut model.notifier,
                    "Member added successfully!",
                    Severity::Success,
                    expired,
                );
                Effect::batch(vec![notice, self.load_members(&mut model)])
            }
            MembersEvent::MemberAdded(Err(err)) if err.is_conflict() => {
                self.ctx
                    .notify(&mut model.notifier, DUPLICATE_EMAIL, Severity::Error, expired)
            }
            MembersEvent::MemberAdded(Err(err)) => {
                self.ctx
                    .failed(&mut model.notifier, &err, "Could not add the member", expired)
            }
            MembersEvent::NotificationExpired(ticket) => {
                model.notifier.dismiss(ticket);
                Effect::none()
            }
        };

        (model, effect)
    }

    fn view(&self, model: &MembersModel, emitter: &Emitter<MembersEvent>) -> MembersProps {
        MembersProps {
            markup: render_members_page(model).into_string(),
            notification: model.notifier.current().cloned(),
            form_resets: model.form_resets,
            on_add_member: emitter.callback(MembersEvent::AddMemberSubmitted),
        }
    }
}

pub fn render_members_page(model: &MembersModel) -> Markup {
    let members = model.members.get();
    html! {
        section id="members" {
            @if members.is_empty() {
                (empty_state("No members yet"))
            } @else {
                table {
                    thead {
                        tr { th { "ID" } th { "Name" } th { "Email" } }
                    }
                    tbody {
                        @for member in members {
                            tr {
                                td { (member.id) }
                                td { (member.name) }
                                td { (member.email) }
                            }
                        }
                    }
                }
            }
        }
        (model.notifier.render())
    }
}
