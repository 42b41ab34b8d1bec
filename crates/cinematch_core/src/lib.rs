//! CineMatch core: pure state machine, domain model and view-model helpers.
mod effect;
mod model;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::{Effect, PosterProbe};
pub use model::{GroundingChunk, Movie, RecommendationResponse, WebSource};
pub use msg::Msg;
pub use state::{AppState, RequestId, Status};
pub use update::{update, UNEXPECTED_ERROR_MESSAGE};
pub use view_model::{
    favicon_url, hostname_or_raw, AppViewModel, MovieCardView, ResultsView, SourceChipView,
    StatusView, ERROR_TITLE, FALLBACK_POSTER_URL, LOADING_DETAIL, LOADING_TITLE,
    PLACEHOLDER_CARD_COUNT,
};
