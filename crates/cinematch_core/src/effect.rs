use crate::RequestId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Ask the engine for recommendations. Exactly one is outstanding at a time.
    FetchRecommendations { request_id: RequestId, query: String },
    /// Check that the posters of the response being shown can actually be loaded.
    ProbePosters {
        request_id: RequestId,
        posters: Vec<PosterProbe>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PosterProbe {
    pub index: usize,
    pub url: String,
}
