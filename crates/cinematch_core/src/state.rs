use std::collections::BTreeSet;

use crate::view_model::{self, AppViewModel};
use crate::RecommendationResponse;

pub type RequestId = u64;

/// The four-way status of the application. Exactly one holds at a time.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Status {
    #[default]
    Idle,
    Loading,
    Success(RecommendationResponse),
    /// Always carries a non-empty, user-facing message.
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    status: Status,
    input: String,
    last_request_id: RequestId,
    failed_posters: BTreeSet<usize>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        view_model::build(self)
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.status, Status::Loading)
    }

    /// Id of the request currently awaited, if any.
    pub fn in_flight(&self) -> Option<RequestId> {
        self.is_loading().then_some(self.last_request_id)
    }

    /// Id of the most recently issued request; 0 before the first submission.
    pub fn last_request_id(&self) -> RequestId {
        self.last_request_id
    }

    pub fn is_poster_failed(&self, index: usize) -> bool {
        self.failed_posters.contains(&index)
    }

    /// Returns whether anything visible changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn set_input(&mut self, input: String) {
        if self.input != input {
            self.input = input;
            self.dirty = true;
        }
    }

    pub(crate) fn begin_request(&mut self) -> RequestId {
        self.last_request_id += 1;
        self.status = Status::Loading;
        self.dirty = true;
        self.last_request_id
    }

    pub(crate) fn finish_success(&mut self, response: RecommendationResponse) {
        self.failed_posters.clear();
        self.status = Status::Success(response);
        self.dirty = true;
    }

    pub(crate) fn finish_error(&mut self, message: String) {
        debug_assert!(!message.trim().is_empty());
        self.status = Status::Error(message);
        self.dirty = true;
    }

    pub(crate) fn reset_to_idle(&mut self) {
        self.status = Status::Idle;
        self.dirty = true;
    }

    pub(crate) fn mark_poster_failed(&mut self, index: usize) {
        if self.failed_posters.insert(index) {
            self.dirty = true;
        }
    }
}
