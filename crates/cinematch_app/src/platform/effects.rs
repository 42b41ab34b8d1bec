use cinematch_core::{Effect, Msg};
use cinematch_engine::{EngineEvent, EngineHandle};
use engine_logging::{engine_info, engine_warn};

/// Executes effects on the engine and turns engine events back into messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle) -> Self {
        Self { engine }
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchRecommendations { request_id, query } => {
                    engine_info!(
                        "FetchRecommendations request_id={} query_len={} query={}",
                        request_id,
                        query.len(),
                        query
                    );
                    self.engine.recommend(request_id, query);
                }
                Effect::ProbePosters {
                    request_id,
                    posters,
                } => {
                    engine_info!(
                        "ProbePosters request_id={} count={}",
                        request_id,
                        posters.len()
                    );
                    self.engine.probe_posters(request_id, posters);
                }
            }
        }
    }

    /// Messages for every engine event received since the last call.
    pub fn drain(&self) -> Vec<Msg> {
        std::iter::from_fn(|| self.engine.try_recv())
            .map(map_event)
            .collect()
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::RecommendationsCompleted { request_id, result } => match result {
            Ok(response) => Msg::RecommendationsLoaded {
                request_id,
                response,
            },
            Err(err) => {
                engine_warn!("Request {} failed: {}", request_id, err);
                Msg::RecommendationsFailed {
                    request_id,
                    message: Some(err.user_message()),
                }
            }
        },
        EngineEvent::PosterUnavailable {
            request_id, index, ..
        } => Msg::PosterFailed { request_id, index },
    }
}
