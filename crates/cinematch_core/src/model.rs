/// A single recommended title as returned by the recommendation service.
#[derive(Debug, Clone, PartialEq)]
pub struct Movie {
    pub title: String,
    /// Free text; the service may answer "1988" or "1988–1990".
    pub year: String,
    pub genre: Vec<String>,
    pub rating: f64,
    pub description: String,
    /// Untrusted; may be empty or point at nothing.
    pub poster_url: String,
    pub reasoning: String,
}

/// Web page the service consulted while answering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebSource {
    pub uri: String,
    pub title: Option<String>,
}

/// Citation attached to a response. Chunks that are not web citations carry no source.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GroundingChunk {
    pub web: Option<WebSource>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationResponse {
    pub intro: String,
    pub movies: Vec<Movie>,
    pub grounding_chunks: Option<Vec<GroundingChunk>>,
}
