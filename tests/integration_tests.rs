//! Integration tests for the feed client and normalizer
//!
//! These tests drive the public API end to end against a mock feed server.
//!
//! Run with: cargo test --test integration_tests

use std::collections::HashMap;

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use funimation_client::{
    Batch, EntityKind, FunimationClient, FunimationError, FunimationService, MediaDirectory,
    NormalizeError,
};

fn show_feed_body() -> serde_json::Value {
    json!({
        "items": [
            {"show": {
                "Title": "Cowboy Bebop",
                "Maturity-Rating": "TV-MA",
                "Show ID": "30",
                "Votes": "1204",
                "All Terms": "Action, Sci Fi, Space",
                "Similar Shows": "11,42",
                "Video Quality": {"sd": "SD", "hd": "HD"},
                "Video Section": {"0": {"title": "Session 1"}},
            }},
            {"show": {
                "Title": "Baccano!",
                "Maturity-Rating": 17,
                "Show ID": "212",
                "Votes": "486",
                "All Terms": "Action, Historical",
                "Similar Shows": "",
            }},
        ]
    })
}

#[tokio::test]
async fn test_show_feed_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/feeds/ps/shows"))
        .and(query_param("limit", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(show_feed_body()))
        .mount(&server)
        .await;

    let client = FunimationClient::new(server.uri());
    let batch = client.get_shows(20, 0, None, None).await.unwrap();

    assert_eq!(batch.kind(), Some(EntityKind::Show));
    assert_eq!(batch.len(), 2);

    let Batch::Shows(shows) = batch else { panic!("expected shows") };
    assert_eq!(shows[0].title, "Cowboy Bebop");
    assert_eq!(shows[0].show_id, Some(30));
    assert_eq!(shows[0].votes, Some(1204));
    assert_eq!(shows[0].all_terms, vec!["Action", "Sci Fi", "Space"]);
    assert_eq!(shows[0].video_quality, vec!["HD", "SD"]);
    assert_eq!(shows[0].video_section.len(), 1);
    assert!(shows[0].similar_shows.is_empty());

    // Numeric rating is forced to its string form.
    assert_eq!(shows[1].maturity_rating, "17");
}

#[tokio::test]
async fn test_same_feed_normalizes_identically() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/feeds/ps/shows"))
        .respond_with(ResponseTemplate::new(200).set_body_json(show_feed_body()))
        .mount(&server)
        .await;

    let client = FunimationClient::new(server.uri());
    let first = client.get_shows(20, 0, None, None).await.unwrap();
    let second = client.get_shows(20, 0, None, None).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_search_returns_episodes_with_coerced_fields() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/feeds/ps/search"))
        .and(query_param("q", "bebop"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "videos": [
                {"video": {
                    "Episode Number": "5.0",
                    "Title": "Ballad of Fallen Angels",
                    "Duration": "24:30",
                    "Post-Date": "10/15/1998",
                    "Promo": "Standard",
                    "Type": "videos/episode",
                }},
            ]
        })))
        .mount(&server)
        .await;

    let client = FunimationClient::new(server.uri());
    let Batch::Episodes(eps) = client.search("bebop", 20, 0).await.unwrap() else {
        panic!("expected episodes")
    };
    assert_eq!(eps[0].episode_number, 5);
    assert_eq!(eps[0].duration, Some(24));
    assert_eq!(
        eps[0].post_date.map(|d| d.to_string()),
        Some("1998-10-15".to_string())
    );
    assert!(!eps[0].promo);
    assert_eq!(eps[0].r#type.as_deref(), Some("episode"));
}

#[tokio::test]
async fn test_empty_feed_surfaces_no_results_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/feeds/ps/videos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"videos": []})))
        .mount(&server)
        .await;

    let mut translations = HashMap::new();
    translations.insert(30603u32, "No episodes found".to_string());
    let service = FunimationService::new(FunimationClient::new(server.uri()), translations);

    let batch = service.episodes(30, 20, 0).await.unwrap();
    assert!(batch.is_empty());
    assert_eq!(
        service.no_results_message(EntityKind::Episode),
        "No episodes found"
    );
}

#[tokio::test]
async fn test_bad_envelope_is_a_shape_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/feeds/ps/movies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "movies": [{"movie": {"a": 1}, "extra": {"b": 2}}]
        })))
        .mount(&server)
        .await;

    let client = FunimationClient::new(server.uri());
    let err = client.get_movies(20, 0).await.unwrap_err();
    assert!(matches!(
        err,
        FunimationError::Normalize(NormalizeError::Shape(_))
    ));
}

#[tokio::test]
async fn test_bad_field_data_fails_instead_of_defaulting() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/feeds/ps/shows"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                {"show": {"Maturity-Rating": "TV-14", "Votes": "a lot"}},
            ]
        })))
        .mount(&server)
        .await;

    let client = FunimationClient::new(server.uri());
    let err = client.get_shows(20, 0, None, None).await.unwrap_err();
    assert!(matches!(
        err,
        FunimationError::Normalize(NormalizeError::Coercion { .. })
    ));
}
