use std::time::Duration;

use cinematch_core::{GroundingChunk, WebSource};
use cinematch_engine::{
    GeminiClient, RecommendationClient, ServiceErrorKind, ServiceSettings, PARSE_FAILURE_MESSAGE,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ENDPOINT: &str = "/v1beta/models/test-model:generateContent";

fn settings_for(server: &MockServer) -> ServiceSettings {
    ServiceSettings {
        api_base: format!("{}/v1beta", server.uri()),
        model: "test-model".to_string(),
        ..ServiceSettings::with_api_key("secret-key")
    }
}

fn die_hard_payload() -> serde_json::Value {
    json!({
        "intro": "Sweat-soaked vests and impossible odds.",
        "movies": [{
            "title": "Die Hard",
            "year": "1988",
            "genre": ["Action"],
            "rating": 8.2,
            "description": "An off-duty cop takes on a skyscraper full of thieves.",
            "posterUrl": "https://image.example.com/dh.jpg",
            "reasoning": "The definitive gritty eighties action film."
        }]
    })
}

fn envelope(text: &str, grounding: Option<serde_json::Value>) -> serde_json::Value {
    let mut candidate = json!({
        "content": { "role": "model", "parts": [{ "text": text }] },
        "finishReason": "STOP"
    });
    if let Some(chunks) = grounding {
        candidate["groundingMetadata"] = json!({ "groundingChunks": chunks });
    }
    json!({ "candidates": [candidate] })
}

async fn mount(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(response)
        .mount(server)
        .await;
}

#[tokio::test]
async fn valid_payload_is_returned_with_grounding() {
    let server = MockServer::start().await;
    let body = envelope(
        &die_hard_payload().to_string(),
        Some(json!([
            { "web": { "uri": "https://www.imdb.com/title/tt0095016/", "title": "IMDb" } },
            { "retrievedContext": { "uri": "gs://bucket/doc" } },
            { "web": { "uri": "https://en.wikipedia.org/wiki/Die_Hard" } }
        ])),
    );
    mount(&server, ResponseTemplate::new(200).set_body_json(body)).await;

    let client = GeminiClient::new(settings_for(&server)).unwrap();
    let response = client
        .fetch_recommendations("Gritty 80s action classics")
        .await
        .expect("recommendations");

    assert_eq!(response.intro, "Sweat-soaked vests and impossible odds.");
    assert_eq!(response.movies.len(), 1);
    let movie = &response.movies[0];
    assert_eq!(movie.title, "Die Hard");
    assert_eq!(movie.year, "1988");
    assert_eq!(movie.genre, vec!["Action".to_string()]);
    assert_eq!(movie.rating, 8.2);
    assert_eq!(movie.poster_url, "https://image.example.com/dh.jpg");
    assert_eq!(
        response.grounding_chunks,
        Some(vec![
            GroundingChunk {
                web: Some(WebSource {
                    uri: "https://www.imdb.com/title/tt0095016/".to_string(),
                    title: Some("IMDb".to_string()),
                }),
            },
            GroundingChunk { web: None },
            GroundingChunk {
                web: Some(WebSource {
                    uri: "https://en.wikipedia.org/wiki/Die_Hard".to_string(),
                    title: None,
                }),
            },
        ])
    );
}

#[tokio::test]
async fn request_carries_key_prompt_tool_and_schema() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .and(header("x-goog-api-key", "secret-key"))
        .and(body_partial_json(json!({
            "tools": [{ "google_search": {} }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": { "required": ["intro", "movies"] }
            }
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(envelope(&die_hard_payload().to_string(), None)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = GeminiClient::new(settings_for(&server)).unwrap();
    let response = client
        .fetch_recommendations("Cozy animated movies for a rainy day")
        .await
        .expect("request matched");
    assert_eq!(response.grounding_chunks, None);

    let received = server.received_requests().await.unwrap();
    let sent: serde_json::Value = serde_json::from_slice(&received[0].body).unwrap();
    let prompt = sent["contents"][0]["parts"][0]["text"].as_str().unwrap();
    assert!(prompt.contains("\"Cozy animated movies for a rainy day\""));
}

#[tokio::test]
async fn non_json_answer_is_a_parse_failure() {
    let server = MockServer::start().await;
    mount(
        &server,
        ResponseTemplate::new(200)
            .set_body_json(envelope("Here are some movies you may like!", None)),
    )
    .await;

    let client = GeminiClient::new(settings_for(&server)).unwrap();
    let err = client.fetch_recommendations("anything").await.unwrap_err();

    assert_eq!(err.kind, ServiceErrorKind::MalformedResponse);
    assert_eq!(err.user_message(), PARSE_FAILURE_MESSAGE);
    assert_eq!(
        err.user_message(),
        "Could not connect to the cinematic database. Please try again."
    );
}

#[tokio::test]
async fn missing_movie_field_is_a_parse_failure() {
    let server = MockServer::start().await;
    let mut payload = die_hard_payload();
    payload["movies"][0]
        .as_object_mut()
        .unwrap()
        .remove("posterUrl");
    mount(
        &server,
        ResponseTemplate::new(200).set_body_json(envelope(&payload.to_string(), None)),
    )
    .await;

    let client = GeminiClient::new(settings_for(&server)).unwrap();
    let err = client.fetch_recommendations("anything").await.unwrap_err();

    assert_eq!(err.kind, ServiceErrorKind::MalformedResponse);
    assert!(err.detail.contains("posterUrl"));
}

#[tokio::test]
async fn missing_intro_is_a_parse_failure() {
    let server = MockServer::start().await;
    let payload = json!({ "movies": [] });
    mount(
        &server,
        ResponseTemplate::new(200).set_body_json(envelope(&payload.to_string(), None)),
    )
    .await;

    let client = GeminiClient::new(settings_for(&server)).unwrap();
    let err = client.fetch_recommendations("anything").await.unwrap_err();

    assert_eq!(err.user_message(), PARSE_FAILURE_MESSAGE);
}

#[tokio::test]
async fn non_json_body_is_a_parse_failure() {
    let server = MockServer::start().await;
    mount(
        &server,
        ResponseTemplate::new(200).set_body_string("<html>gateway</html>"),
    )
    .await;

    let client = GeminiClient::new(settings_for(&server)).unwrap();
    let err = client.fetch_recommendations("anything").await.unwrap_err();

    assert_eq!(err.kind, ServiceErrorKind::MalformedResponse);
}

#[tokio::test]
async fn http_error_surfaces_api_message() {
    let server = MockServer::start().await;
    mount(
        &server,
        ResponseTemplate::new(400).set_body_json(json!({
            "error": {
                "code": 400,
                "message": "API key not valid. Please pass a valid API key.",
                "status": "INVALID_ARGUMENT"
            }
        })),
    )
    .await;

    let client = GeminiClient::new(settings_for(&server)).unwrap();
    let err = client.fetch_recommendations("anything").await.unwrap_err();

    assert_eq!(err.kind, ServiceErrorKind::HttpStatus(400));
    assert_eq!(
        err.user_message(),
        "The recommendation service rejected the request (HTTP 400): \
         API key not valid. Please pass a valid API key."
    );
}

#[tokio::test]
async fn http_error_without_body_has_generic_message() {
    let server = MockServer::start().await;
    mount(&server, ResponseTemplate::new(503)).await;

    let client = GeminiClient::new(settings_for(&server)).unwrap();
    let err = client.fetch_recommendations("anything").await.unwrap_err();

    assert_eq!(err.kind, ServiceErrorKind::HttpStatus(503));
    assert_eq!(
        err.user_message(),
        "The recommendation service rejected the request (HTTP 503)."
    );
}

#[tokio::test]
async fn slow_service_times_out() {
    let server = MockServer::start().await;
    mount(
        &server,
        ResponseTemplate::new(200)
            .set_delay(Duration::from_millis(250))
            .set_body_json(envelope(&die_hard_payload().to_string(), None)),
    )
    .await;

    let settings = ServiceSettings {
        request_timeout: Duration::from_millis(50),
        ..settings_for(&server)
    };
    let client = GeminiClient::new(settings).unwrap();
    let err = client.fetch_recommendations("anything").await.unwrap_err();

    assert_eq!(err.kind, ServiceErrorKind::Timeout);
}

#[tokio::test]
async fn unreachable_service_is_a_network_error() {
    let settings = ServiceSettings {
        api_base: "http://127.0.0.1:9/v1beta".to_string(),
        connect_timeout: Duration::from_millis(200),
        request_timeout: Duration::from_millis(500),
        ..ServiceSettings::default()
    };
    let client = GeminiClient::new(settings).unwrap();
    let err = client.fetch_recommendations("anything").await.unwrap_err();

    assert!(matches!(
        err.kind,
        ServiceErrorKind::Network | ServiceErrorKind::Timeout
    ));
}
