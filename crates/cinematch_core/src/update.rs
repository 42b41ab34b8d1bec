use crate::{AppState, Effect, Msg, PosterProbe, RecommendationResponse, RequestId, Status};

/// Shown when a failure reaches the controller without a usable message.
pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected cinematic error occurred.";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(text) => {
            // The input is disabled while a search runs; it keeps showing the submitted query.
            if !state.is_loading() {
                state.set_input(text);
            }
            Vec::new()
        }
        Msg::QuerySubmitted => {
            let query = state.input().trim().to_owned();
            // At most one request in flight; a second submit is dropped, not queued.
            if query.is_empty() || state.is_loading() {
                return (state, Vec::new());
            }
            let request_id = state.begin_request();
            vec![Effect::FetchRecommendations { request_id, query }]
        }
        Msg::RecommendationsLoaded {
            request_id,
            response,
        } => {
            if state.in_flight() != Some(request_id) {
                return (state, Vec::new());
            }
            let posters = poster_probes(&response);
            state.finish_success(response);
            if posters.is_empty() {
                Vec::new()
            } else {
                vec![Effect::ProbePosters {
                    request_id,
                    posters,
                }]
            }
        }
        Msg::RecommendationsFailed {
            request_id,
            message,
        } => {
            if state.in_flight() != Some(request_id) {
                return (state, Vec::new());
            }
            let message = message
                .map(|m| m.trim().to_owned())
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| UNEXPECTED_ERROR_MESSAGE.to_owned());
            state.finish_error(message);
            Vec::new()
        }
        Msg::RetryClicked => {
            if matches!(state.status(), Status::Error(_)) {
                state.reset_to_idle();
            }
            Vec::new()
        }
        Msg::PosterFailed { request_id, index } => {
            if shows_card(&state, request_id, index) {
                state.mark_poster_failed(index);
            }
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn poster_probes(response: &RecommendationResponse) -> Vec<PosterProbe> {
    response
        .movies
        .iter()
        .enumerate()
        .filter(|(_, movie)| !movie.poster_url.trim().is_empty())
        .map(|(index, movie)| PosterProbe {
            index,
            url: movie.poster_url.trim().to_owned(),
        })
        .collect()
}

fn shows_card(state: &AppState, request_id: RequestId, index: usize) -> bool {
    match state.status() {
        Status::Success(response) => {
            request_id == state.last_request_id() && index < response.movies.len()
        }
        _ => false,
    }
}
