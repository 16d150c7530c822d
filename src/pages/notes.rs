//! Tagged notes with debounced search.

use maud::{html, Markup};
use serde::{Deserialize, Serialize};

use crate::{
    api::{self, Ack, ApiRequest},
    debounce::{DebounceTicket, Debouncer},
    html::{empty_state, format_timestamp, hidden_unless},
    input::{self, ValidationError},
    notify::{Notification, NotificationTicket, Notifier, Severity},
    store::{RequestToken, Slice},
    Callback, Effect, Emitter, PageContext, PageLogic,
};

pub const PREVIEW_CHARS: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub created_at: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Note {
    /// The body cut to [`PREVIEW_CHARS`] characters.
    pub fn preview(&self) -> String {
        match self.body.char_indices().nth(PREVIEW_CHARS) {
            Some((cut, _)) => format!("{}...", &self.body[..cut]),
            None => self.body.clone(),
        }
    }
}

/// Envelope of `GET /api/notes`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteList {
    pub notes: Vec<Note>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewNote {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagAssignment {
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteForm {
    pub title: String,
    pub body: String,
}

impl NoteForm {
    pub fn parse(&self) -> Result<NewNote, ValidationError> {
        Ok(NewNote {
            title: input::required_text("Title", &self.title)?,
            body: input::required_text("Content", &self.body)?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotesModel {
    pub notes: Slice<Vec<Note>>,
    /// What is typed in the search box right now.
    pub search_input: String,
    /// The trimmed query of the most recent search.
    pub query: String,
    pub debouncer: Debouncer,
    pub add_note_open: bool,
    /// Note the assign-tags modal was opened for.
    pub tagging: Option<i64>,
    pub notifier: Notifier,
}

#[derive(Debug, Clone)]
pub enum NotesEvent {
    NotesLoaded(RequestToken, api::Result<Vec<Note>>),
    SearchChanged(String),
    SearchSettled(DebounceTicket),
    AddNoteOpened,
    AddNoteClosed,
    AddNoteSubmitted(NoteForm),
    NoteAdded(api::Result<Ack>),
    AssignTagsOpened(i64),
    AssignTagsClosed,
    /// The raw comma separated tag list.
    AssignTagsSubmitted(String),
    TagsAssigned(api::Result<Ack>),
    NotificationExpired(NotificationTicket),
}

pub struct NotesProps {
    pub markup: String,
    pub notification: Option<Notification>,
    pub add_note_open: bool,
    pub tagging: Option<i64>,
    pub on_search: Callback<String>,
    pub on_open_add_note: Callback<()>,
    pub on_close_add_note: Callback<()>,
    pub on_add_note: Callback<NoteForm>,
    pub on_open_assign_tags: Callback<i64>,
    pub on_close_assign_tags: Callback<()>,
    pub on_assign_tags: Callback<String>,
}

pub struct NotesLogic {
    ctx: PageContext,
}

impl NotesLogic {
    pub fn new(ctx: PageContext) -> Self {
        Self { ctx }
    }

    fn load_notes(&self, model: &mut NotesModel) -> Effect<NotesEvent> {
        let token = model.notes.begin_load();
        let mut request = ApiRequest::get("/api/notes");
        if !model.query.is_empty() {
            request = request.with_query("q", model.query.clone());
        }
        self.ctx.request(request, move |result: api::Result<NoteList>| {
            NotesEvent::NotesLoaded(token, result.map(|list| list.notes))
        })
    }
}

impl PageLogic<NotesEvent, NotesModel, NotesProps> for NotesLogic {
    fn init(&self, mut model: NotesModel) -> (NotesModel, Effect<NotesEvent>) {
        let effect = self.load_notes(&mut model);
        (model, effect)
    }

    fn update(&self, event: NotesEvent, model: &NotesModel) -> (NotesModel, Effect<NotesEvent>) {
        let mut model = model.clone();
        let expired = NotesEvent::NotificationExpired;

        let effect = match event {
            NotesEvent::NotesLoaded(token, result) => {
                self.ctx
                    .loaded(&mut model.notes, &mut model.notifier, token, result, "notes", expired)
            }
            NotesEvent::SearchChanged(raw) => {
                model.search_input = raw;
                let ticket = model.debouncer.touch();
                self.ctx
                    .after(self.ctx.settings().search_debounce, NotesEvent::SearchSettled(ticket))
            }
            NotesEvent::SearchSettled(ticket) if model.debouncer.settle(ticket) => {
                model.query = model.search_input.trim().to_owned();
                log::debug!("Searching notes for {:?}", model.query);
                self.load_notes(&mut model)
            }
            NotesEvent::SearchSettled(_) => Effect::none(),
            NotesEvent::AddNoteOpened => {
                model.add_note_open = true;
                Effect::none()
            }
            NotesEvent::AddNoteClosed => {
                model.add_note_open = false;
                Effect::none()
            }
            NotesEvent::AddNoteSubmitted(form) => match form.parse() {
                Ok(note) => self.ctx.try_request(
                    ApiRequest::post("/api/notes").with_json(&note),
                    NotesEvent::NoteAdded,
                ),
                Err(err) => self.ctx.invalid(&mut model.notifier, &err, expired),
            },
            NotesEvent::NoteAdded(Ok(_)) => {
                log::info!("Note added");
                model.add_note_open = false;
                let notice =
                    self.ctx
                        .notify(&mut model.notifier, "Note added!", Severity::Success, expired);
                Effect::batch(vec![notice, self.load_notes(&mut model)])
            }
            NotesEvent::NoteAdded(Err(err)) => {
                self.ctx
                    .failed(&mut model.notifier, &err, "Could not add the note", expired)
            }
            NotesEvent::AssignTagsOpened(note_id) => {
                model.tagging = Some(note_id);
                Effect::none()
            }
            NotesEvent::AssignTagsClosed => {
                model.tagging = None;
                Effect::none()
            }
            NotesEvent::AssignTagsSubmitted(raw) => {
                let Some(note_id) = model.tagging else {
                    log::debug!("Tags submitted without an open assign-tags modal");
                    return (model, Effect::none());
                };
                match input::split_tags(&raw) {
                    Ok(tags) => self.ctx.try_request(
                        ApiRequest::post(format!("/api/notes/{note_id}/tags"))
                            .with_json(&TagAssignment { tags }),
                        NotesEvent::TagsAssigned,
                    ),
                    Err(err) => self.ctx.invalid(&mut model.notifier, &err, expired),
                }
            }
            NotesEvent::TagsAssigned(Ok(_)) => {
                model.tagging = None;
                let notice =
                    self.ctx
                        .notify(&mut model.notifier, "Tags assigned!", Severity::Success, expired);
                Effect::batch(vec![notice, self.load_notes(&mut model)])
            }
            NotesEvent::TagsAssigned(Err(err)) => {
                self.ctx
                    .failed(&mut model.notifier, &err, "Could not assign the tags", expired)
            }
            NotesEvent::NotificationExpired(ticket) => {
                model.notifier.dismiss(ticket);
                Effect::none()
            }
        };

        (model, effect)
    }

    fn view(&self, model: &NotesModel, emitter: &Emitter<NotesEvent>) -> NotesProps {
        NotesProps {
            markup: render(model).into_string(),
            notification: model.notifier.current().cloned(),
            add_note_open: model.add_note_open,
            tagging: model.tagging,
            on_search: emitter.callback(NotesEvent::SearchChanged),
            on_open_add_note: emitter.callback(|_: ()| NotesEvent::AddNoteOpened),
            on_close_add_note: emitter.callback(|_: ()| NotesEvent::AddNoteClosed),
            on_add_note: emitter.callback(NotesEvent::AddNoteSubmitted),
            on_open_assign_tags: emitter.callback(NotesEvent::AssignTagsOpened),
            on_close_assign_tags: emitter.callback(|_: ()| NotesEvent::AssignTagsClosed),
            on_assign_tags: emitter.callback(NotesEvent::AssignTagsSubmitted),
        }
    }
}

pub fn render(model: &NotesModel) -> Markup {
    html! {
        input type="search" id="searchInput" placeholder="Search notes..." value=(model.search_input);
        div id="notesList" { (render_notes(model.notes.get())) }
        div id="addNoteModal" class="modal" hidden=[hidden_unless(model.add_note_open)] {
            div class="modal-content" {
                h2 { "New note" }
                form id="addNoteForm" {
                    input type="text" name="title" required;
                    textarea name="body" required {}
                    button type="submit" class="btn btn-primary" { "Save" }
                }
            }
        }
        div id="assignTagsModal" class="modal" hidden=[hidden_unless(model.tagging.is_some())] {
            div class="modal-content" {
                h2 { "Assign tags" }
                form id="assignTagsForm" {
                    @if let Some(note_id) = model.tagging {
                        input type="hidden" name="note_id" value=(note_id);
                    }
                    input type="text" name="tags" placeholder="work, ideas" required;
                    button type="submit" class="btn btn-primary" { "Assign" }
                }
            }
        }
        (model.notifier.render())
    }
}

pub fn render_notes(notes: &[Note]) -> Markup {
    if notes.is_empty() {
        return empty_state("No notes");
    }
    html! {
        @for note in notes {
            div class="note-card" data-note-id=(note.id) {
                div class="note-header" {
                    h3 { (note.title) }
                    span class="note-date" { (format_timestamp(note.created_at.as_deref())) }
                }
                div class="note-body" { (note.preview()) }
                div class="note-footer" {
                    div class="tags" {
                        @for tag in &note.tags {
                            span class="tag" { (tag) }
                        }
                    }
                    button class="btn-tag" { "+ Tag" }
                }
            }
        }
    }
}
