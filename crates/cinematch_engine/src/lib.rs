//! CineMatch engine: recommendation service client, poster probing and effect execution.
mod client;
mod engine;
mod poster;
mod request;
mod response;
mod settings;
mod types;

pub use client::{GeminiClient, RecommendationClient};
pub use engine::EngineHandle;
pub use poster::{PosterProber, ReqwestPosterProber};
pub use request::{build_prompt, build_request, response_schema, GenerateContentRequest};
pub use response::{decode_generate_content, parse_recommendations};
pub use settings::{ProbeSettings, ServiceSettings, DEFAULT_API_BASE, DEFAULT_MODEL};
pub use types::{
    EngineError, EngineEvent, ProbeError, ServiceError, ServiceErrorKind, PARSE_FAILURE_MESSAGE,
};
