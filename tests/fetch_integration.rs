//! Fetch service against a mock search service, applied through the ViewModel.

mod common;

use reelmap::app::map::MapProvider;
use reelmap::app::models::{LatLng, FETCH_FAILED_MESSAGE, LOADED_MESSAGE};
use reelmap::{FetchMessage, FetchRequest, FetchService, Suggestion, ViewModel};
use std::time::Instant;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn fetch(service: &mut FetchService, request: FetchRequest) -> FetchMessage {
    service.dispatch(request);
    service
        .next_response()
        .await
        .expect("fetch service channel closed")
}

#[tokio::test]
async fn vertigo_search_should_update_count_map_and_table() {
    let server = common::start_search_service().await;
    let mut service = FetchService::new(&server.uri()).unwrap();
    let mut view_model = ViewModel::new();
    view_model.initialize();
    view_model.set_title("Vertigo");

    let request = view_model.submit_title(Instant::now());
    let message = fetch(&mut service, request).await;

    assert!(view_model.apply_fetch(message, Instant::now()));
    assert_eq!(view_model.count_text().as_deref(), Some("1 location(s) found."));
    assert_eq!(view_model.status_message(), Some(LOADED_MESSAGE));
    assert_eq!(view_model.map().marker_count(), 1);
    assert_eq!(
        view_model.map().provider().center(),
        Some(LatLng::new(37.8199, -122.4783))
    );
    assert_eq!(view_model.locations()[0].title, "Vertigo");
    assert_eq!(view_model.locations()[0].year, 1958);
}

#[tokio::test]
async fn startup_fetch_should_send_empty_title() {
    let server = common::start_search_service().await;
    let mut service = FetchService::new(&server.uri()).unwrap();
    let mut view_model = ViewModel::new();

    let request = view_model.initialize();
    let message = fetch(&mut service, request).await;

    assert!(view_model.apply_fetch(message, Instant::now()));
    assert_eq!(view_model.count_text().as_deref(), Some("2 location(s) found."));
    assert_eq!(view_model.map().marker_count(), 2);
}

#[tokio::test]
async fn suggestions_should_deserialize_titles() {
    let server = common::start_search_service().await;
    let mut service = FetchService::new(&server.uri()).unwrap();

    let message = fetch(
        &mut service,
        FetchRequest::Suggestions {
            title: "Ver".to_string(),
            generation: 1,
        },
    )
    .await;

    match message {
        FetchMessage::Suggestions { generation, result } => {
            assert_eq!(generation, 1);
            assert_eq!(
                result.unwrap(),
                vec![Suggestion::new("Vertigo"), Suggestion::new("Vertical Limit")]
            );
        }
        other => panic!("unexpected message: {other:?}"),
    }
}

#[tokio::test]
async fn movie_failure_should_clear_suggestions_and_show_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/movie"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let mut service = FetchService::new(&server.uri()).unwrap();
    let mut view_model = ViewModel::new();
    let now = Instant::now();

    view_model.insert_char('V');
    view_model.schedule_keyup(crossterm::event::KeyCode::Char('V'), now);
    let request = view_model
        .tick(now + reelmap::config::SUGGESTION_WAIT)
        .expect("keyup should request suggestions");
    let message = fetch(&mut service, request).await;

    assert!(view_model.apply_fetch(message, now));
    assert!(view_model.suggestions().is_empty());
    assert_eq!(view_model.status_message(), Some(FETCH_FAILED_MESSAGE));
}

#[tokio::test]
async fn malformed_locations_should_keep_last_good_state() {
    let server = common::start_search_service().await;
    Mock::given(method("GET"))
        .and(path("/location"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;
    let mut service = FetchService::new(&server.uri()).unwrap();
    let mut view_model = ViewModel::new();

    view_model.set_title("Vertigo");
    let message = fetch(&mut service, view_model.submit_title(Instant::now())).await;
    view_model.apply_fetch(message, Instant::now());
    assert_eq!(view_model.map().marker_count(), 1);

    view_model.set_title("Unknown");
    let message = fetch(&mut service, view_model.submit_title(Instant::now())).await;
    assert!(view_model.apply_fetch(message, Instant::now()));

    assert_eq!(view_model.status_message(), Some(FETCH_FAILED_MESSAGE));
    assert_eq!(view_model.map().marker_count(), 1);
    assert_eq!(view_model.count_text().as_deref(), Some("1 location(s) found."));
}

#[tokio::test]
async fn unreachable_server_should_report_failure() {
    let mut service = FetchService::new("http://127.0.0.1:9").unwrap();

    let message = fetch(
        &mut service,
        FetchRequest::Locations {
            title: String::new(),
            generation: 1,
        },
    )
    .await;

    match message {
        FetchMessage::Locations { result, .. } => assert!(result.is_err()),
        other => panic!("unexpected message: {other:?}"),
    }
}
