use maud::{html, Markup};

use super::{Loan, ReturnLoan};
use crate::{
    api::{self, Ack, ApiRequest},
    confirm::{self, ConfirmDialog, Confirmation},
    html::empty_state,
    notify::{Notification, NotificationTicket, Notifier, Severity},
    store::{RequestToken, Slice},
    Callback, Effect, Emitter, PageContext, PageLogic,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoansModel {
    pub loans: Slice<Vec<Loan>>,
    pub notifier: Notifier,
    /// Loan id awaiting the user's confirmation.
    pub pending_return: Option<Confirmation<i64>>,
}

#[derive(Debug, Clone)]
pub enum LoansEvent {
    LoansLoaded(RequestToken, api::Result<Vec<Loan>>),
    ReturnRequested(i64),
    ReturnConfirmed,
    ReturnCancelled,
    Returned(api::Result<Ack>),
    NotificationExpired(NotificationTicket),
}

pub struct LoansProps {
    pub markup: String,
    pub notification: Option<Notification>,
    pub confirmation: Option<ConfirmDialog>,
    pub on_return: Callback<i64>,
}

pub struct LoansLogic {
    ctx: PageContext,
}

impl LoansLogic {
    pub fn new(ctx: PageContext) -> Self {
        Self { ctx }
    }

    fn load_loans(&self, model: &mut LoansModel) -> Effect<LoansEvent> {
        let token = model.loans.begin_load();
        self.ctx.request(ApiRequest::get("/api/loans"), move |result| {
            LoansEvent::LoansLoaded(token, result)
        })
    }
}

impl PageLogic<LoansEvent, LoansModel, LoansProps> for LoansLogic {
    fn init(&self, mut model: LoansModel) -> (LoansModel, Effect<LoansEvent>) {
        let effect = self.load_loans(&mut model);
        (model, effect)
    }

    fn update(&self, event: LoansEvent, model: &LoansModel) -> (LoansModel, Effect<LoansEvent>) {
        let mut model = model.clone();
        let expired = LoansEvent::NotificationExpired;

        let effect = match event {
            LoansEvent::LoansLoaded(token, result) => {
                self.ctx
                    .loaded(&mut model.loans, &mut model.notifier, token, result, "loans", expired)
            }
            LoansEvent::ReturnRequested(loan_id) => {
                model.pending_return = Some(Confirmation::new(
                    "Are you sure you want to return this book?",
                    loan_id,
                ));
                Effect::none()
            }
            LoansEvent::ReturnCancelled => {
                model.pending_return = None;
                Effect::none()
            }
            LoansEvent::ReturnConfirmed => match model.pending_return.take() {
                Some(Confirmation { action: loan_id, .. }) => self.ctx.try_request(
                    ApiRequest::post("/api/loans/return").with_json(&ReturnLoan { loan_id }),
                    LoansEvent::Returned,
                ),
                None => Effect::none(),
            },
            LoansEvent::Returned(Ok(_)) => {
                log::info!("Loan returned");
                let notice = self.ctx.notify(
                    &mut model.notifier,
                    "Book returned successfully!",
                    Severity::Success,
                    expired,
                );
                Effect::batch(vec![notice, self.load_loans(&mut model)])
            }
            LoansEvent::Returned(Err(err)) => {
                self.ctx
                    .failed(&mut model.notifier, &err, "Could not return the book", expired)
            }
            LoansEvent::NotificationExpired(ticket) => {
                model.notifier.dismiss(ticket);
                Effect::none()
            }
        };

        (model, effect)
    }

    fn view(&self, model: &LoansModel, emitter: &Emitter<LoansEvent>) -> LoansProps {
        LoansProps {
            markup: render_loans_page(model).into_string(),
            notification: model.notifier.current().cloned(),
            confirmation: confirm::dialog(
                model.pending_return.as_ref(),
                || emitter.callback(|_: ()| LoansEvent::ReturnConfirmed),
                || emitter.callback(|_: ()| LoansEvent::ReturnCancelled),
            ),
            on_return: emitter.callback(LoansEvent::ReturnRequested),
        }
    }
}

pub fn render_loans_page(model: &LoansModel) -> Markup {
    let (active, returned): (Vec<&Loan>, Vec<&Loan>) =
        model.loans.get().iter().partition(|loan| loan.is_active());

    html! {
        section id="activeLoans" {
            h2 { "Active loans" }
            @if active.is_empty() {
                (empty_state("No active loans"))
            } @else {
                table {
                    thead {
                        tr { th { "Member" } th { "Book" } th { "Borrowed" } th { "Due" } th {} }
                    }
                    tbody {
                        @for loan in &active {
                            tr {
                                td { (loan.member_name) }
                                td { (loan.book_title) }
                                td { (loan.loan_date) }
                                td { (loan.due_date) }
                                td {
                                    button class="btn btn-primary" data-loan-id=(loan.id) { "Return" }
                                }
                            }
                        }
                    }
                }
            }
        }
        section id="returnedLoans" {
            h2 { "Returned loans" }
            @if returned.is_empty() {
                (empty_state("No returned loans"))
            } @else {
                table {
                    thead {
                        tr { th { "Member" } th { "Book" } th { "Borrowed" } th { "Due" } th { "Returned" } }
                    }
                    tbody {
                        @for loan in &returned {
                            tr {
                                td { (loan.member_name) }
                                td { (loan.book_title) }
                                td { (loan.loan_date) }
                                td { (loan.due_date) }
                                td {
                                    (loan.return_date.as_deref().unwrap_or_default())
                                    @if loan.was_late() {
                                        " " span class="badge late" { "late" }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
        @if let Some(confirmation) = &model.pending_return {
            (confirm::render_prompt(&confirmation.prompt))
        }
        (model.notifier.render())
    }
}
