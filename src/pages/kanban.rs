//! Kanban board with ordered columns.

use maud::{html, Markup};
use serde::{Deserialize, Serialize};

use crate::{
    api::{self, Ack, ApiRequest},
    html::{empty_state, hidden_unless},
    input,
    notify::{Notification, NotificationTicket, Notifier, Severity},
    store::{RequestToken, Slice},
    Callback, Effect, Emitter, PageContext, PageLogic,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: i64,
    pub name: String,
    pub ord: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub col_id: i64,
    pub ord: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub cols: Vec<Column>,
    pub tasks: Vec<Task>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewTask {
    pub title: String,
    pub col_id: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TaskMove {
    pub col_id: i64,
    pub ord: i64,
}

/// Position for a task appended to `col_id`: one past the highest `ord`,
/// or 1 for an empty column.
pub fn next_order(tasks: &[Task], col_id: i64) -> i64 {
    tasks
        .iter()
        .filter(|task| task.col_id == col_id)
        .map(|task| task.ord)
        .max()
        .map_or(1, |ord| ord + 1)
}

impl Board {
    /// Tasks of one column, top to bottom.
    pub fn column_tasks(&self, col_id: i64) -> Vec<&Task> {
        let mut tasks: Vec<&Task> = self.tasks.iter().filter(|task| task.col_id == col_id).collect();
        tasks.sort_by_key(|task| task.ord);
        tasks
    }

    /// The columns directly left and right of `col_id`, in server order.
    pub fn adjacent_columns(&self, col_id: i64) -> (Option<&Column>, Option<&Column>) {
        let Some(index) = self.cols.iter().position(|col| col.id == col_id) else {
            return (None, None);
        };
        let left = index.checked_sub(1).and_then(|left| self.cols.get(left));
        (left, self.cols.get(index + 1))
    }

    /// The move to request for `task_id`, if `col_id` is a neighbour of
    /// its current column.
    pub fn plan_move(&self, task_id: i64, col_id: i64) -> Option<TaskMove> {
        let task = self.tasks.iter().find(|task| task.id == task_id)?;
        let (left, right) = self.adjacent_columns(task.col_id);
        let is_neighbour = [left, right].into_iter().flatten().any(|col| col.id == col_id);
        is_neighbour.then(|| TaskMove {
            col_id,
            ord: next_order(&self.tasks, col_id),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct KanbanModel {
    pub board: Slice<Board>,
    /// Column the add-task modal was opened for.
    pub adding_to: Option<i64>,
    pub notifier: Notifier,
}

#[derive(Debug, Clone)]
pub enum KanbanEvent {
    BoardLoaded(RequestToken, api::Result<Board>),
    MoveRequested { task_id: i64, col_id: i64 },
    Moved(api::Result<Ack>),
    AddTaskOpened(i64),
    AddTaskClosed,
    /// The raw title typed into the add-task modal.
    AddTaskSubmitted(String),
    TaskAdded(api::Result<Ack>),
    NotificationExpired(NotificationTicket),
}

pub struct KanbanProps {
    pub markup: String,
    pub notification: Option<Notification>,
    pub adding_to: Option<i64>,
    /// `(task_id, target col_id)`.
    pub on_move: Callback<(i64, i64)>,
    pub on_open_add_task: Callback<i64>,
    pub on_close_add_task: Callback<()>,
    pub on_add_task: Callback<String>,
}

pub struct KanbanLogic {
    ctx: PageContext,
}

impl KanbanLogic {
    pub fn new(ctx: PageContext) -> Self {
        Self { ctx }
    }

    fn load_board(&self, model: &mut KanbanModel) -> Effect<KanbanEvent> {
        let token = model.board.begin_load();
        self.ctx.request(ApiRequest::get("/api/board"), move |result| {
            KanbanEvent::BoardLoaded(token, result)
        })
    }
}

impl PageLogic<KanbanEvent, KanbanModel, KanbanProps> for KanbanLogic {
    fn init(&self, mut model: KanbanModel) -> (KanbanModel, Effect<KanbanEvent>) {
        let effect = self.load_board(&mut model);
        (model, effect)
    }

    fn update(&self, event: KanbanEvent, model: &KanbanModel) -> (KanbanModel, Effect<KanbanEvent>) {
        let mut model = model.clone();
        let expired = KanbanEvent::NotificationExpired;

        let effect = match event {
            KanbanEvent::BoardLoaded(token, result) => {
                self.ctx
                    .loaded(&mut model.board, &mut model.notifier, token, result, "board", expired)
            }
            KanbanEvent::MoveRequested { task_id, col_id } => {
                match model.board.get().plan_move(task_id, col_id) {
                    Some(task_move) => self.ctx.try_request(
                        ApiRequest::post(format!("/api/tasks/{task_id}/move")).with_json(&task_move),
                        KanbanEvent::Moved,
                    ),
                    None => {
                        log::debug!("Rejected move of task {task_id} to column {col_id}");
                        self.ctx.notify(
                            &mut model.notifier,
                            "Tasks can only move to a neighbouring column",
                            Severity::Error,
                            expired,
                        )
                    }
                }
            }
            KanbanEvent::Moved(Ok(_)) => {
                let notice =
                    self.ctx
                        .notify(&mut model.notifier, "Task moved!", Severity::Success, expired);
                Effect::batch(vec![notice, self.load_board(&mut model)])
            }
            KanbanEvent::Moved(Err(err)) => {
                self.ctx
                    .failed(&mut model.notifier, &err, "Could not move the task", expired)
            }
            KanbanEvent::AddTaskOpened(col_id) => {
                model.adding_to = Some(col_id);
                Effect::none()
            }
            KanbanEvent::AddTaskClosed => {
                model.adding_to = None;
                Effect::none()
            }
            KanbanEvent::AddTaskSubmitted(raw_title) => {
                let Some(col_id) = model.adding_to else {
                    log::debug!("Task submitted without an open add-task modal");
                    return (model, Effect::none());
                };
                match input::required_text("Title", &raw_title) {
                    Ok(title) => self.ctx.try_request(
                        ApiRequest::post("/api/tasks").with_json(&NewTask { title, col_id }),
                        KanbanEvent::TaskAdded,
                    ),
                    Err(err) => self.ctx.invalid(&mut model.notifier, &err, expired),
                }
            }
            KanbanEvent::TaskAdded(Ok(_)) => {
                model.adding_to = None;
                let notice =
                    self.ctx
                        .notify(&mut model.notifier, "Task added!", Severity::Success, expired);
                Effect::batch(vec![notice, self.load_board(&mut model)])
            }
            KanbanEvent::TaskAdded(Err(err)) => {
                self.ctx
                    .failed(&mut model.notifier, &err, "Could not add the task", expired)
            }
            KanbanEvent::NotificationExpired(ticket) => {
                model.notifier.dismiss(ticket);
                Effect::none()
            }
        };

        (model, effect)
    }

    fn view(&self, model: &KanbanModel, emitter: &Emitter<KanbanEvent>) -> KanbanProps {
        KanbanProps {
            markup: render(model).into_string(),
            notification: model.notifier.current().cloned(),
            adding_to: model.adding_to,
            on_move: emitter.callback(|(task_id, col_id): (i64, i64)| KanbanEvent::MoveRequested {
                task_id,
                col_id,
            }),
            on_open_add_task: emitter.callback(KanbanEvent::AddTaskOpened),
            on_close_add_task: emitter.callback(|_: ()| KanbanEvent::AddTaskClosed),
            on_add_task: emitter.callback(KanbanEvent::AddTaskSubmitted),
        }
    }
}

pub fn render(model: &KanbanModel) -> Markup {
    html! {
        div id="board" { (render_board(model.board.get())) }
        div id="addTaskModal" class="modal" hidden=[hidden_unless(model.adding_to.is_some())] {
            div class="modal-content" {
                h2 { "New task" }
                form id="addTaskForm" {
                    @if let Some(col_id) = model.adding_to {
                        input type="hidden" name="col_id" value=(col_id);
                    }
                    input type="text" name="title" required;
                    button type="submit" class="btn btn-primary" { "Add" }
                }
            }
        }
        (model.notifier.render())
    }
}

pub fn render_board(board: &Board) -> Markup {
    if board.cols.is_empty() {
        return empty_state("No columns");
    }
    html! {
        @for col in &board.cols {
            @let tasks = board.column_tasks(col.id);
            @let (left, right) = board.adjacent_columns(col.id);
            div class="column" data-col-id=(col.id) {
                div class="column-header" {
                    h3 { (col.name) }
                    span class="task-count" { (tasks.len()) }
                }
                button class="btn btn-primary btn-add" { "+ Add" }
                div class="tasks-list" {
                    @for task in &tasks {
                        div class="task-card" data-task-id=(task.id) {
                            div class="task-title" { (task.title) }
                            div class="task-actions" {
                                @if let Some(left) = left {
                                    button class="btn-move" data-col-id=(left.id) title={ "Move to " (left.name) } { "←" }
                                }
                                @if let Some(right) = right {
                                    button class="btn-move" data-col-id=(right.id) title={ "Move to " (right.name) } { "→" }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
