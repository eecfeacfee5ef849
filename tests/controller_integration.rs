//! Full keyboard/mouse flows through the controller, headless.

mod common;

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use reelmap::app::io::{MockEventStream, MockRenderStream};
use reelmap::cmd_args::CommandLineArgs;
use reelmap::{config, AppController};
use std::time::Instant;

type TestController = AppController<MockEventStream, MockRenderStream>;

fn controller_for(server_uri: &str) -> TestController {
    let cmd_args = CommandLineArgs::parse_from(["reelmap", "--server", server_uri]);
    AppController::with_io_streams(
        &cmd_args,
        MockEventStream::empty(),
        MockRenderStream::with_size((80, 24)),
    )
    .unwrap()
}

fn key(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn type_text(controller: &mut TestController, text: &str, now: Instant) {
    for ch in text.chars() {
        controller.handle_event(key(KeyCode::Char(ch)), now).unwrap();
    }
}

async fn load_suggestions(controller: &mut TestController, text: &str) {
    let now = Instant::now();
    type_text(controller, text, now);
    controller.update(now + config::SUGGESTION_WAIT).unwrap();
    assert!(controller.receive_fetch().await.unwrap());
}

#[tokio::test]
async fn startup_should_show_all_locations() {
    let server = common::start_search_service().await;
    let mut controller = controller_for(&server.uri());

    controller.start();
    assert!(controller.receive_fetch().await.unwrap());
    controller.update(Instant::now()).unwrap();

    assert_eq!(
        controller.view_model().count_text().as_deref(),
        Some("2 location(s) found.")
    );
    let output = controller.view_renderer().render_stream().get_buffer_string();
    assert!(output.contains("2 location(s) found."));
    assert!(output.contains("Bullitt"));
}

#[tokio::test]
async fn typing_then_enter_on_highlight_should_search_selected_title() {
    let server = common::start_search_service().await;
    let mut controller = controller_for(&server.uri());

    load_suggestions(&mut controller, "Ver").await;
    assert_eq!(controller.view_model().suggestions().len(), 2);

    let now = Instant::now();
    controller.handle_event(key(KeyCode::Down), now).unwrap();
    assert!(controller.view_model().is_current(0));
    controller.handle_event(key(KeyCode::Enter), now).unwrap();
    assert_eq!(controller.view_model().title(), "Vertigo");

    assert!(controller.receive_fetch().await.unwrap());
    assert_eq!(
        controller.view_model().count_text().as_deref(),
        Some("1 location(s) found.")
    );

    // The keyup that follows a selection must not refetch suggestions
    controller.update(now + config::SUGGESTION_WAIT).unwrap();
    assert!(controller.view_model().suggestions().is_empty());
    assert_eq!(controller.view_model().title(), "Vertigo");
}

#[tokio::test]
async fn clicking_a_suggestion_should_select_and_search() {
    let server = common::start_search_service().await;
    let mut controller = controller_for(&server.uri());
    load_suggestions(&mut controller, "Ver").await;

    let layout = reelmap::app::views::ViewRenderer::layout(controller.view_renderer());
    let click = Event::Mouse(MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column: 1,
        row: layout.map_top,
        modifiers: KeyModifiers::NONE,
    });
    controller.handle_event(click, Instant::now()).unwrap();

    assert_eq!(controller.view_model().title(), "Vertigo");
    assert!(controller.receive_fetch().await.unwrap());
    assert_eq!(controller.view_model().map().marker_count(), 1);
}

#[tokio::test]
async fn page_down_should_open_popup_for_first_marker() {
    let server = common::start_search_service().await;
    let mut controller = controller_for(&server.uri());
    controller.start();
    controller.receive_fetch().await.unwrap();

    controller
        .handle_event(key(KeyCode::PageDown), Instant::now())
        .unwrap();
    controller.update(Instant::now()).unwrap();

    assert_eq!(controller.view_model().map().active_marker(), Some(0));
    assert_eq!(controller.view_model().map().open_popup_count(), 1);
    let output = controller.view_renderer().render_stream().get_buffer_string();
    assert!(output.contains("Vertigo (1958)"));
}
