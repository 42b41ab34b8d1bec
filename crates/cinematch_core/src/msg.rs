#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User edited the query input.
    InputChanged(String),
    /// User submitted the current query input.
    QuerySubmitted,
    /// Engine returned a validated response for a request.
    RecommendationsLoaded {
        request_id: crate::RequestId,
        response: crate::RecommendationResponse,
    },
    /// Engine failed a request. `message` is user-facing when present.
    RecommendationsFailed {
        request_id: crate::RequestId,
        message: Option<String>,
    },
    /// User chose to leave the error panel.
    RetryClicked,
    /// The poster of a card could not be loaded.
    PosterFailed {
        request_id: crate::RequestId,
        index: usize,
    },
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
