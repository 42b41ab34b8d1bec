use cinematch_core::{GroundingChunk, Movie, RecommendationResponse, WebSource};
use serde::Deserialize;

use crate::ServiceError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    grounding_metadata: Option<GroundingMetadata>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
    #[serde(default)]
    thought: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    grounding_chunks: Option<Vec<WireChunk>>,
}

#[derive(Debug, Deserialize)]
struct WireChunk {
    web: Option<WireWeb>,
}

#[derive(Debug, Deserialize)]
struct WireWeb {
    uri: Option<String>,
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WirePayload {
    intro: String,
    movies: Vec<WireMovie>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireMovie {
    title: String,
    year: String,
    genre: Vec<String>,
    rating: f64,
    description: String,
    poster_url: String,
    reasoning: String,
}

impl From<WireMovie> for Movie {
    fn from(wire: WireMovie) -> Self {
        Movie {
            title: wire.title,
            year: wire.year,
            genre: wire.genre,
            rating: wire.rating,
            description: wire.description,
            poster_url: wire.poster_url,
            reasoning: wire.reasoning,
        }
    }
}

/// Decodes a full `generateContent` reply: the structured answer from the first
/// candidate plus its grounding citations.
pub fn decode_generate_content(body: &str) -> Result<RecommendationResponse, ServiceError> {
    let envelope: GenerateContentResponse = serde_json::from_str(body)
        .map_err(|err| ServiceError::malformed(format!("envelope is not valid JSON: {err}")))?;

    let candidate = envelope
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| ServiceError::malformed("response has no candidates"))?;

    let text = candidate
        .content
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter(|part| !part.thought)
                .filter_map(|part| part.text)
                .collect::<String>()
        })
        .unwrap_or_default();
    if text.trim().is_empty() {
        return Err(ServiceError::malformed(format!(
            "candidate has no text (finish reason {:?})",
            candidate.finish_reason
        )));
    }

    let mut response = parse_recommendations(&text)?;
    response.grounding_chunks = candidate
        .grounding_metadata
        .and_then(|metadata| metadata.grounding_chunks)
        .map(|chunks| chunks.into_iter().map(map_chunk).collect());
    Ok(response)
}

/// Parses and validates the model's JSON answer. Every movie must carry all of
/// its fields with the declared types; nothing is defaulted.
pub fn parse_recommendations(text: &str) -> Result<RecommendationResponse, ServiceError> {
    let payload: WirePayload = serde_json::from_str(text.trim())
        .map_err(|err| ServiceError::malformed(format!("payload rejected: {err}")))?;

    Ok(RecommendationResponse {
        intro: payload.intro,
        movies: payload.movies.into_iter().map(Movie::from).collect(),
        grounding_chunks: None,
    })
}

fn map_chunk(chunk: WireChunk) -> GroundingChunk {
    // A web citation without a uri cannot be linked; treat it like a non-web chunk.
    let web = chunk.web.and_then(|web| {
        web.uri.map(|uri| WebSource {
            uri,
            title: web.title,
        })
    });
    GroundingChunk { web }
}

