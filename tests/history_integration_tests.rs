use std::time::Duration;

use serde_json::json;
use tripchat::core::action::{Action, Effect, update};
use tripchat::core::message::{Author, MessageId};
use tripchat::core::state::{ChatScreen, Route};
use tripchat::history::{HistoryError, HistorySource, HttpHistorySource};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

// ============================================================================
// Helper Functions
// ============================================================================

fn chat(id: u64, text: &str, time: &str) -> serde_json::Value {
    json!({
        "id": id,
        "message": text,
        "sender": { "user_id": "driver", "image": "https://example.test/d.png", "self": false },
        "time": time,
    })
}

async fn mount_page(server: &MockServer, page: &str, chats: Vec<serde_json::Value>) {
    Mock::given(method("GET"))
        .and(path("/api/chats"))
        .and(query_param("page", page))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "chats": chats })))
        .mount(server)
        .await;
}

fn source_for(server: &MockServer) -> HttpHistorySource {
    HttpHistorySource::new(
        &format!("{}/api/chats", server.uri()),
        Duration::from_secs(5),
    )
    .unwrap()
}

fn screen() -> ChatScreen {
    ChatScreen::new(
        "Trip 1",
        Route {
            from: "IGI Airport, T3".to_string(),
            to: "Sector 28".to_string(),
        },
        Author::local(None),
        50,
    )
}

/// Run one effect against the source, feeding the result back like the TUI does.
async fn settle(screen: &mut ChatScreen, source: &dyn HistorySource, effect: Effect) {
    if let Effect::FetchHistory(ticket) = effect {
        let result = source.fetch_page(ticket.page).await;
        update(screen, Action::HistoryLoaded { ticket, result });
    }
}

// ============================================================================
// HTTP Source Tests
// ============================================================================

#[tokio::test]
async fn test_fetch_page_sends_page_query_and_parses_chats() {
    let mock_server = MockServer::start().await;
    mount_page(
        &mock_server,
        "2",
        vec![
            chat(20, "Boarding now", "2024-05-02T09:15:00Z"),
            chat(21, "Landed", "2024-05-02T11:40:00+05:30"),
        ],
    )
    .await;

    let messages = source_for(&mock_server).fetch_page(2).await.unwrap();

    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].id, MessageId::Server("20".into()));
    assert_eq!(messages[0].text, "Boarding now");
    assert_eq!(messages[0].author.user_id.as_deref(), Some("driver"));
    assert!(!messages[0].is_self());
    assert_eq!(messages[1].timestamp.to_rfc3339(), "2024-05-02T06:10:00+00:00");
}

#[tokio::test]
async fn test_fetch_page_empty_chats() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "0", vec![]).await;

    let messages = source_for(&mock_server).fetch_page(0).await.unwrap();
    assert!(messages.is_empty());
}

#[tokio::test]
async fn test_fetch_page_server_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/chats"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&mock_server)
        .await;

    let err = source_for(&mock_server).fetch_page(0).await.unwrap_err();
    match err {
        HistoryError::Api { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "boom");
        }
        other => panic!("Expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_fetch_page_missing_chats_is_malformed() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/chats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "messages": [] })))
        .mount(&mock_server)
        .await;

    let err = source_for(&mock_server).fetch_page(0).await.unwrap_err();
    assert!(matches!(err, HistoryError::Malformed(_)));
}

#[tokio::test]
async fn test_fetch_page_bad_timestamp_rejects_page() {
    let mock_server = MockServer::start().await;
    mount_page(
        &mock_server,
        "0",
        vec![
            chat(1, "fine", "2024-05-02T09:15:00Z"),
            chat(2, "broken", "yesterday-ish"),
        ],
    )
    .await;

    let err = source_for(&mock_server).fetch_page(0).await.unwrap_err();
    assert!(matches!(err, HistoryError::Malformed(_)));
}

#[tokio::test]
async fn test_unreachable_endpoint_is_network_error() {
    // Port 9 (discard) is closed on test machines.
    let source = HttpHistorySource::new("http://127.0.0.1:9/api/chats", Duration::from_secs(2))
        .unwrap();
    let err = source.fetch_page(0).await.unwrap_err();
    assert!(matches!(err, HistoryError::Network(_)));
}

// ============================================================================
// Screen + HTTP Source
// ============================================================================

#[tokio::test]
async fn test_scrolling_back_through_history_until_exhausted() {
    let mock_server = MockServer::start().await;
    mount_page(
        &mock_server,
        "0",
        vec![
            chat(10, "At the gate", "2024-05-02T09:00:00Z"),
            chat(11, "Boarding", "2024-05-02T09:30:00Z"),
        ],
    )
    .await;
    mount_page(
        &mock_server,
        "1",
        vec![
            chat(5, "Booked the cab", "2024-05-01T18:00:00Z"),
            // Overlaps page 0: must not be duplicated.
            chat(10, "At the gate", "2024-05-02T09:00:00Z"),
        ],
    )
    .await;
    mount_page(&mock_server, "2", vec![]).await;

    let source = source_for(&mock_server);
    let mut screen = screen();

    let effect = update(&mut screen, Action::Mount);
    settle(&mut screen, &source, effect).await;
    let ids: Vec<_> = screen.timeline.messages().iter().map(|m| m.id.to_string()).collect();
    assert_eq!(ids, vec!["10", "11"]);

    // Far from the top: no request.
    assert_eq!(
        update(&mut screen, Action::ScrollObserved { offset_from_top: 200 }),
        Effect::None
    );

    let effect = update(&mut screen, Action::ScrollObserved { offset_from_top: 3 });
    assert_eq!(screen.status_message, "Loading older messages...");
    settle(&mut screen, &source, effect).await;
    let ids: Vec<_> = screen.timeline.messages().iter().map(|m| m.id.to_string()).collect();
    assert_eq!(ids, vec!["5", "10", "11"]);
    assert_eq!(screen.projection().message_count(), 3);

    let effect = update(&mut screen, Action::ScrollObserved { offset_from_top: 0 });
    settle(&mut screen, &source, effect).await;
    assert!(screen.pagination.is_exhausted());
    assert_eq!(screen.status_message, "No older messages");

    // Exhausted: scrolling to the top again issues nothing.
    assert_eq!(
        update(&mut screen, Action::ScrollObserved { offset_from_top: 0 }),
        Effect::None
    );
    assert_eq!(screen.timeline.len(), 3);
}

#[tokio::test]
async fn test_failed_page_is_retried_on_next_scroll() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/chats"))
        .and(query_param("page", "0"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "0", vec![chat(1, "hi", "2024-05-02T09:00:00Z")]).await;

    let source = source_for(&mock_server);
    let mut screen = screen();

    let effect = update(&mut screen, Action::Mount);
    settle(&mut screen, &source, effect).await;
    assert!(screen.timeline.is_empty());
    assert_eq!(screen.status_message, "Couldn't load messages");
    assert_eq!(screen.pagination.page(), 0);

    let effect = update(&mut screen, Action::ScrollObserved { offset_from_top: 0 });
    settle(&mut screen, &source, effect).await;
    assert_eq!(screen.timeline.len(), 1);
    assert!(screen.status_message.is_empty());
}

#[tokio::test]
async fn test_optimistic_send_survives_history_merge() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "0", vec![chat(1, "Where are you?", "2024-05-02T09:00:00Z")]).await;

    let source = source_for(&mock_server);
    let mut screen = screen();

    let effect = update(&mut screen, Action::Mount);
    update(&mut screen, Action::InputChanged("Two minutes away".into()));
    update(&mut screen, Action::Send);
    settle(&mut screen, &source, effect).await;

    // Deliberate: page 0 extends the tail in arrival order, so it lands
    // after the local message sent while it was in flight.
    let texts: Vec<_> = screen.timeline.messages().iter().map(|m| m.text.as_str()).collect();
    assert_eq!(texts, vec!["Two minutes away", "Where are you?"]);
    assert!(screen.timeline.messages()[0].id.is_local());
    assert_eq!(screen.composer.input(), "");
}
