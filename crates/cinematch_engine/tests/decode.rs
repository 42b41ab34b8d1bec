use cinematch_engine::{
    build_prompt, build_request, decode_generate_content, parse_recommendations,
    response_schema, ServiceErrorKind,
};

#[test]
fn thought_parts_are_not_part_of_the_answer() {
    let body = r#"{"candidates":[{"content":{"parts":[
        {"text":"thinking about it","thought":true},
        {"text":"{\"intro\":\"hi\",\"movies\":[]}"}
    ]}}]}"#;

    let response = decode_generate_content(body).unwrap();
    assert_eq!(response.intro, "hi");
    assert!(response.movies.is_empty());
    assert_eq!(response.grounding_chunks, None);
}

#[test]
fn answer_split_across_parts_is_joined() {
    let body = r#"{"candidates":[{"content":{"parts":[
        {"text":"{\"intro\":\"split\","},
        {"text":"\"movies\":[]}"}
    ]}}]}"#;

    assert_eq!(decode_generate_content(body).unwrap().intro, "split");
}

#[test]
fn blocked_candidate_is_malformed() {
    let body = r#"{"candidates":[{"finishReason":"SAFETY"}]}"#;

    let err = decode_generate_content(body).unwrap_err();
    assert_eq!(err.kind, ServiceErrorKind::MalformedResponse);
    assert!(err.detail.contains("SAFETY"));
}

#[test]
fn empty_candidate_list_is_malformed() {
    let err = decode_generate_content(r#"{"candidates":[]}"#).unwrap_err();
    assert_eq!(err.kind, ServiceErrorKind::MalformedResponse);
}

#[test]
fn web_citation_without_uri_is_not_linkable() {
    let body = r#"{"candidates":[{
        "content":{"parts":[{"text":"{\"intro\":\"x\",\"movies\":[]}"}]},
        "groundingMetadata":{"groundingChunks":[{"web":{"title":"orphan"}}]}
    }]}"#;

    let chunks = decode_generate_content(body)
        .unwrap()
        .grounding_chunks
        .unwrap();
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].web, None);
}

#[test]
fn string_rating_is_rejected() {
    let text = r#"{"intro":"x","movies":[{"title":"Alien","year":"1979","genre":["Horror"],
        "rating":"8.5","description":"d","posterUrl":"","reasoning":"r"}]}"#;

    let err = parse_recommendations(text).unwrap_err();
    assert_eq!(err.kind, ServiceErrorKind::MalformedResponse);
}

#[test]
fn numeric_year_is_rejected() {
    let text = r#"{"intro":"x","movies":[{"title":"Alien","year":1979,"genre":["Horror"],
        "rating":8.5,"description":"d","posterUrl":"","reasoning":"r"}]}"#;

    assert!(parse_recommendations(text).is_err());
}

#[test]
fn null_field_is_rejected() {
    let text = r#"{"intro":"x","movies":[{"title":"Alien","year":"1979","genre":null,
        "rating":8.5,"description":"d","posterUrl":"","reasoning":"r"}]}"#;

    assert!(parse_recommendations(text).is_err());
}

#[test]
fn integer_rating_and_empty_poster_are_accepted() {
    let text = r#"{"intro":"x","movies":[{"title":"Alien","year":"1979","genre":[],
        "rating":9,"description":"d","posterUrl":"","reasoning":"r"}]}"#;

    let response = parse_recommendations(text).unwrap();
    assert_eq!(response.movies[0].rating, 9.0);
    assert_eq!(response.movies[0].poster_url, "");
}

#[test]
fn schema_requires_every_movie_field() {
    let schema = response_schema();
    let movie = &schema["properties"]["movies"]["items"];
    let required = movie["required"].as_array().unwrap();
    let names: Vec<_> = required.iter().filter_map(|v| v.as_str()).collect();

    assert_eq!(
        names,
        vec!["title", "year", "genre", "rating", "description", "posterUrl", "reasoning"]
    );
    assert_eq!(movie["properties"]["rating"]["type"], "NUMBER");
    assert_eq!(movie["properties"]["genre"]["items"]["type"], "STRING");
}

#[test]
fn prompt_embeds_query_verbatim() {
    let prompt = build_prompt("Mind-bending sci-fi like Inception");

    assert!(prompt.starts_with(
        "Recommend movies based on this request: \"Mind-bending sci-fi like Inception\"."
    ));
    assert!(prompt.contains("Google Search"));

    let request = build_request("x");
    assert_eq!(request.contents.len(), 1);
    assert_eq!(request.tools.len(), 1);
    assert_eq!(
        request.generation_config.response_mime_type,
        "application/json"
    );
}

#[test]
fn search_tool_is_sent_as_google_search() {
    let body = serde_json::to_value(build_request("x")).unwrap();

    assert_eq!(body["tools"], serde_json::json!([{ "google_search": {} }]));
    assert_eq!(
        body["generationConfig"]["responseMimeType"],
        "application/json"
    );
}
