// Integration tests for Store Locator

use std::time::Duration;
use store_locator::core::{format::ERROR_TEXT, OverlapDetector};
use store_locator::models::{MessageContent, Sender};
use store_locator::services::{ChatSessions, LocatorApiClient, SessionLimits, StoreDirectory};

const STORES_BODY: &str = r#"{
  "stores": [
    {
      "name": "McDonald's Jalan Ampang",
      "address": "Jalan Ampang, 50450 Kuala Lumpur",
      "latitude": "3.1579",
      "longitude": "101.7116",
      "operating_hours": "24 Hours",
      "contact": { "telephone": "03-2161 0000", "email": null },
      "features": { "wifi": true, "mccafe": false },
      "waze_link": "https://waze.com/ul?q=ampang"
    },
    {
      "name": "McDonald's KLCC",
      "address": "Suria KLCC, 50088 Kuala Lumpur",
      "latitude": "3.1580",
      "longitude": "101.7120"
    },
    {
      "name": "McDonald's Putrajaya",
      "address": "Presint 1, Putrajaya",
      "latitude": 2.9264,
      "longitude": 101.6964
    },
    {
      "name": "McDonald's Pending",
      "address": "Jalan Baru",
      "latitude": null,
      "longitude": null
    }
  ]
}"#;

fn client(url: String) -> LocatorApiClient {
    LocatorApiClient::new(url, Duration::from_secs(5)).expect("client construction should not fail")
}

fn chat(url: String) -> ChatSessions {
    ChatSessions::new(client(url), SessionLimits::default())
}

#[tokio::test]
async fn test_directory_loads_and_flags_overlaps() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/stores")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(STORES_BODY)
        .create_async()
        .await;

    let directory = StoreDirectory::load(&client(server.url()), OverlapDetector::default()).await;

    mock.assert_async().await;
    assert_eq!(directory.len(), 3);
    assert_eq!(directory.rejected().len(), 1);
    assert_eq!(directory.rejected()[0].name, "McDonald's Pending");

    let overlapping: Vec<&str> = directory.overlapping().iter().map(String::as_str).collect();
    assert_eq!(overlapping, vec!["McDonald's Jalan Ampang", "McDonald's KLCC"]);
}

#[tokio::test]
async fn test_chat_relays_location_query_and_formats_reply() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/chatbot/")
        .match_query(mockito::Matcher::UrlEncoded(
            "query".into(),
            "hello, which outlets in KL operate 24 hours?".into(),
        ))
        .with_status(200)
        .with_body(
            r#"{
              "response": "Found 1 24-hour McDonald's locations in Kuala Lumpur:",
              "matches": 1,
              "data": [{
                "name": "McDonald's Jalan Ampang",
                "address": "Jalan Ampang, 50450 Kuala Lumpur",
                "coordinates": { "latitude": 3.1579, "longitude": 101.7116 },
                "operating_hours": "24 Hours",
                "contact": { "telephone": "03-2161 0000", "email": "N/A" },
                "features": { "24_hours": true, "wifi": true, "breakfast": false }
              }]
            }"#,
        )
        .create_async()
        .await;

    let sessions = chat(server.url());
    let exchange = sessions
        .submit(None, "hello, which outlets in KL operate 24 hours?")
        .await;
    let (user, reply) = (exchange.user, exchange.reply);

    mock.assert_async().await;
    assert_eq!(user.sender, Sender::User);
    assert_eq!(reply.sender, Sender::Bot);

    match &reply.content {
        MessageContent::Results { header, stores } => {
            assert!(header.starts_with("🍟 "));
            assert_eq!(stores.len(), 1);
            let labels: Vec<&str> = stores[0].features.iter().map(|b| b.label.as_str()).collect();
            assert_eq!(labels, vec!["24H", "WiFi"]);
        }
        other => panic!("expected results, got {:?}", other),
    }
}

#[tokio::test]
async fn test_chat_greeting_does_not_call_backend() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/chatbot/")
        .match_query(mockito::Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let sessions = chat(server.url());
    let exchange = sessions.submit(None, "Hello!").await;

    mock.assert_async().await;
    assert!(matches!(exchange.reply.content, MessageContent::Text { .. }));
}

#[tokio::test]
async fn test_chat_unreachable_backend_is_error_message() {
    // Nothing listens on the discard port
    let sessions = chat("http://127.0.0.1:9".to_string());
    let exchange = sessions.submit(None, "list stores with wifi").await;

    assert_eq!(
        exchange.reply.content,
        MessageContent::Error { text: ERROR_TEXT.to_string() }
    );

    let transcript = sessions.transcript(exchange.session_id).await.unwrap();
    assert_eq!(transcript.len(), 2);
    assert_eq!(transcript[0].sender, Sender::User);
    assert!(transcript[1].is_error());
}
