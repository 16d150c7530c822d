use std::sync::Arc;

use rest_mvu::api::{self, Method};
use rest_mvu::notify::Severity;
use rest_mvu::pages::kanban::*;
use rest_mvu::{ImmediateTimer, PageContext, PageLogic, Settings};
use serde_json::json;

use super::*;

type KanbanTest = PageTest<KanbanEvent, KanbanModel, KanbanProps, KanbanLogic>;

fn board() -> Board {
    let col = |id: i64, name: &str| Column {
        id,
        name: name.into(),
        ord: id,
    };
    let task = |id: i64, title: &str, col_id: i64, ord: i64| Task {
        id,
        title: title.into(),
        col_id,
        ord,
    };
    Board {
        cols: vec![col(1, "Todo"), col(2, "Doing"), col(3, "Done")],
        tasks: vec![
            task(10, "Write tests", 1, 2),
            task(11, "Sketch <UI>", 1, 1),
            task(12, "Deploy", 2, 4),
        ],
    }
}

fn kanban_backend(board: Board) -> FakeBackend {
    FakeBackend::new(move |request| match (request.method, request.path.as_str()) {
        (Method::Get, "/api/board") => ok(&board),
        (Method::Post, "/api/tasks") => created(),
        (Method::Post, path) if path.starts_with("/api/tasks/") && path.ends_with("/move") => {
            ok(&json!({ "ok": true }))
        }
        _ => unexpected(request),
    })
}

fn start_kanban(backend: &FakeBackend) -> KanbanTest {
    start_page(backend, KanbanModel::default(), KanbanLogic::new)
}

#[test]
fn given_a_board_should_order_tasks_within_columns() {
    let test = start_kanban(&kanban_backend(board()));

    test.renders.with_latest(|props| {
        let markup = &props.markup;
        assert!(markup.find("Sketch &lt;UI&gt;").unwrap() < markup.find("Write tests").unwrap());
        assert!(markup.find("Write tests").unwrap() < markup.find("Deploy").unwrap());
    });
}

#[test]
fn given_no_columns_should_show_the_empty_state() {
    let test = start_kanban(&kanban_backend(Board::default()));

    test.renders.with_latest(|props| {
        assert!(props.markup.contains("No columns"));
    });
}

#[test]
fn given_a_move_to_the_next_column_should_append_the_task_there() {
    let mut test = start_kanban(&kanban_backend(board()));

    test.renders.with_latest(|props| props.on_move.call((11, 2)));
    test.driver.process_events();

    let moves = test.backend.requests_to(Method::Post, "/api/tasks/11/move");
    assert_eq!(moves.len(), 1);
    assert_eq!(moves[0].body, Some(json!({ "col_id": 2, "ord": 5 })));
    assert_eq!(test.backend.requests_to(Method::Get, "/api/board").len(), 2);
    assert_eq!(shown_messages(&test.renders), vec!["Task moved!"]);
}

#[test]
fn given_a_move_into_an_empty_column_should_start_at_one() {
    let mut test = start_kanban(&kanban_backend(board()));

    test.renders.with_latest(|props| props.on_move.call((12, 3)));
    test.driver.process_events();

    let moves = test.backend.requests_to(Method::Post, "/api/tasks/12/move");
    assert_eq!(moves[0].body, Some(json!({ "col_id": 3, "ord": 1 })));
}

#[test]
fn given_a_move_skipping_a_column_should_be_rejected() {
    let mut test = start_kanban(&kanban_backend(board()));
    let before = test.backend.request_count();

    test.renders.with_latest(|props| props.on_move.call((11, 3)));
    test.driver.process_events();

    assert_eq!(test.backend.request_count(), before);
    let shown = shown_notifications(&test.renders);
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].severity, Severity::Error);
}

#[test]
fn given_a_task_title_should_add_it_to_the_chosen_column() {
    let mut test = start_kanban(&kanban_backend(board()));

    test.renders.with_latest(|props| props.on_open_add_task.call(2));
    test.driver.process_events();
    assert_eq!(test.renders.with_latest(|props| props.adding_to), Some(2));

    test.renders
        .with_latest(|props| props.on_add_task.call(" Review ".into()));
    test.driver.process_events();

    let added = test.backend.requests_to(Method::Post, "/api/tasks");
    assert_eq!(added.len(), 1);
    assert_eq!(added[0].body, Some(json!({ "title": "Review", "col_id": 2 })));
    assert_eq!(test.renders.with_latest(|props| props.adding_to), None);
}

#[test]
fn given_a_failing_board_should_report_the_server_detail() {
    let backend = FakeBackend::new(|request| match request.path.as_str() {
        "/api/board" => rejected(500, "Database unavailable"),
        _ => unexpected(request),
    });

    let test = start_kanban(&backend);

    let shown = shown_notifications(&test.renders);
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].message, "Error loading board: Database unavailable");
    assert_eq!(shown[0].severity, Severity::Error);
    assert!(!test.driver.model().board.is_loaded());
    test.renders.with_latest(|props| {
        assert!(props.markup.contains("No columns"));
    });
}

#[test]
fn given_an_unreachable_board_should_fall_back_to_the_generic_message() {
    let test = start_kanban(&FakeBackend::fallible(|_| connection_refused()));

    assert_eq!(
        shown_messages(&test.renders),
        vec!["Error loading board: could not fetch board"]
    );
    assert!(!test.driver.model().board.is_loaded());
}

#[test]
fn given_a_superseded_load_failing_late_should_keep_the_newer_board_silently() {
    let backend = kanban_backend(board());
    let logic = KanbanLogic::new(PageContext::new(
        backend.client(),
        Arc::new(ImmediateTimer::new()),
        Settings::default(),
    ));
    let mut model = KanbanModel::default();
    let older = model.board.begin_load();
    let newer = model.board.begin_load();

    let (model, effect) = logic.update(KanbanEvent::BoardLoaded(newer, Ok(board())), &model);
    assert!(effect.is_none());
    let failure = api::Error::RemoteRejection {
        status: 500,
        detail: Some("Database unavailable".into()),
    };
    let (model, effect) = logic.update(KanbanEvent::BoardLoaded(older, Err(failure)), &model);

    assert!(effect.is_none());
    assert_eq!(model.notifier.current(), None);
    assert!(model.board.is_loaded());
    assert_eq!(model.board.get(), &board());
}
