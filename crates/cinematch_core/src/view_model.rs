use std::collections::HashSet;

use url::{form_urlencoded, Url};

use crate::{AppState, GroundingChunk, Movie, RecommendationResponse, Status};

/// Poster shown when the service gave no poster URL or the poster could not be loaded.
pub const FALLBACK_POSTER_URL: &str =
    "https://images.unsplash.com/photo-1485846234645-a62644f84728?auto=format&fit=crop&q=80&w=400&h=600";
/// Number of inert cards shown before the first search.
pub const PLACEHOLDER_CARD_COUNT: usize = 3;
pub const LOADING_TITLE: &str = "Scouring the Cinema Web...";
pub const LOADING_DETAIL: &str =
    "Retrieving official posters and critics' data via Google Search.";
pub const ERROR_TITLE: &str = "Search Interrupted";

const FAVICON_SERVICE: &str = "https://www.google.com/s2/favicons";

#[derive(Debug, Clone, PartialEq)]
pub struct AppViewModel {
    pub input: String,
    pub input_enabled: bool,
    /// Whether a submit would be accepted right now.
    pub can_submit: bool,
    pub status: StatusView,
}

impl Default for AppViewModel {
    fn default() -> Self {
        Self {
            input: String::new(),
            input_enabled: true,
            can_submit: false,
            status: StatusView::Idle {
                placeholder_cards: PLACEHOLDER_CARD_COUNT,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StatusView {
    Idle {
        placeholder_cards: usize,
    },
    Loading {
        title: &'static str,
        detail: &'static str,
    },
    Error {
        title: &'static str,
        message: String,
    },
    Success(ResultsView),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultsView {
    pub intro: String,
    pub cards: Vec<MovieCardView>,
    /// Empty when the response carried no usable web citations.
    pub sources: Vec<SourceChipView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieCardView {
    pub title: String,
    pub year: String,
    pub genres: Vec<String>,
    pub rating: String,
    pub description: String,
    pub reasoning: String,
    pub poster_url: String,
    pub poster_is_fallback: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceChipView {
    pub href: String,
    pub label: String,
    pub favicon_url: String,
}

pub(crate) fn build(state: &AppState) -> AppViewModel {
    let loading = state.is_loading();
    let status = match state.status() {
        Status::Idle => StatusView::Idle {
            placeholder_cards: PLACEHOLDER_CARD_COUNT,
        },
        Status::Loading => StatusView::Loading {
            title: LOADING_TITLE,
            detail: LOADING_DETAIL,
        },
        Status::Error(message) => StatusView::Error {
            title: ERROR_TITLE,
            message: message.clone(),
        },
        Status::Success(response) => StatusView::Success(build_results(state, response)),
    };

    AppViewModel {
        input: state.input().to_owned(),
        input_enabled: !loading,
        can_submit: !loading && !state.input().trim().is_empty(),
        status,
    }
}

fn build_results(state: &AppState, response: &RecommendationResponse) -> ResultsView {
    let cards = response
        .movies
        .iter()
        .enumerate()
        .map(|(index, movie)| build_card(movie, state.is_poster_failed(index)))
        .collect();
    let sources = response
        .grounding_chunks
        .as_deref()
        .map(build_source_chips)
        .unwrap_or_default();

    ResultsView {
        intro: response.intro.clone(),
        cards,
        sources,
    }
}

fn build_card(movie: &Movie, poster_failed: bool) -> MovieCardView {
    let poster = movie.poster_url.trim();
    let use_fallback = poster_failed || poster.is_empty();
    MovieCardView {
        title: movie.title.clone(),
        year: movie.year.clone(),
        genres: movie.genre.clone(),
        rating: movie.rating.to_string(),
        description: movie.description.clone(),
        reasoning: movie.reasoning.clone(),
        poster_url: if use_fallback {
            FALLBACK_POSTER_URL.to_owned()
        } else {
            poster.to_owned()
        },
        poster_is_fallback: use_fallback,
    }
}

fn build_source_chips(chunks: &[GroundingChunk]) -> Vec<SourceChipView> {
    let mut seen = HashSet::new();
    chunks
        .iter()
        .filter_map(|chunk| chunk.web.as_ref())
        .map(|web| {
            let label = web
                .title
                .as_deref()
                .map(str::trim)
                .filter(|title| !title.is_empty())
                .map(ToOwned::to_owned)
                .unwrap_or_else(|| hostname_or_raw(&web.uri));
            SourceChipView {
                href: web.uri.clone(),
                label,
                favicon_url: favicon_url(&web.uri),
            }
        })
        .filter(|chip| seen.insert((chip.label.clone(), chip.favicon_url.clone())))
        .collect()
}

/// Host part of `uri`, or the literal text when it does not parse as a URL with a host.
pub fn hostname_or_raw(uri: &str) -> String {
    Url::parse(uri)
        .ok()
        .and_then(|url| url.host_str().map(ToOwned::to_owned))
        .unwrap_or_else(|| uri.to_owned())
}

/// Favicon image for the site hosting `uri`.
pub fn favicon_url(uri: &str) -> String {
    let host = hostname_or_raw(uri);
    let domain: String = form_urlencoded::byte_serialize(host.as_bytes()).collect();
    format!("{FAVICON_SERVICE}?domain={domain}")
}
