use std::fmt;

use crate::view_model::{AppViewModel, ResultPanelView, RESULT_PANEL_TITLE};
use crate::{SUBMIT_LABEL_BUSY, SUBMIT_LABEL_IDLE};

pub type RequestId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCategory {
    Transport,
    HttpStatus(u16),
    Timeout,
    MalformedResponse,
}

/// Why a request did not produce a manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureReason {
    pub kind: FailureCategory,
    pub message: String,
}

impl FailureReason {
    pub fn new(kind: FailureCategory, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headline = match self.kind {
            FailureCategory::Transport => "Could not reach the analysis service".to_string(),
            FailureCategory::HttpStatus(code) => {
                format!("Analysis service answered with HTTP {code}")
            }
            FailureCategory::Timeout => "Analysis service did not answer in time".to_string(),
            FailureCategory::MalformedResponse => {
                "Analysis service sent an unexpected response".to_string()
            }
        };
        if self.message.is_empty() {
            write!(f, "{headline}")
        } else {
            write!(f, "{headline}: {}", self.message)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestStatus {
    #[default]
    Idle,
    InFlight {
        request_id: RequestId,
    },
    Succeeded {
        manifest: String,
    },
    Failed {
        reason: FailureReason,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    input: String,
    status: RequestStatus,
    next_request_id: RequestId,
    validation: Option<String>,
    notice: Option<String>,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            input: String::new(),
            status: RequestStatus::Idle,
            next_request_id: 1,
            validation: None,
            notice: None,
            dirty: false,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        let busy = self.is_in_flight();
        let result_panel = match &self.status {
            RequestStatus::Succeeded { manifest } if !manifest.is_empty() => {
                Some(ResultPanelView {
                    title: RESULT_PANEL_TITLE.to_string(),
                    manifest: manifest.clone(),
                })
            }
            _ => None,
        };
        let error = match &self.status {
            RequestStatus::Failed { reason } => Some(reason.to_string()),
            _ => None,
        };

        AppViewModel {
            input: self.input.clone(),
            submit_label: if busy {
                SUBMIT_LABEL_BUSY
            } else {
                SUBMIT_LABEL_IDLE
            }
            .to_string(),
            input_editable: true,
            busy,
            result_panel,
            error,
            validation: self.validation.clone(),
            notice: self.notice.clone(),
            dirty: self.dirty,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn status(&self) -> &RequestStatus {
        &self.status
    }

    /// The current analysis result; empty until a request succeeds.
    pub fn manifest(&self) -> &str {
        match &self.status {
            RequestStatus::Succeeded { manifest } => manifest,
            _ => "",
        }
    }

    pub fn is_in_flight(&self) -> bool {
        matches!(self.status, RequestStatus::InFlight { .. })
    }

    /// Id of the most recently issued request, if any was issued.
    pub fn latest_request_id(&self) -> Option<RequestId> {
        self.next_request_id.checked_sub(1).filter(|id| *id > 0)
    }

    /// Returns whether a render is pending and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn set_input(&mut self, value: String) {
        self.input = value;
        self.validation = None;
        self.mark_dirty();
    }

    pub(crate) fn push_input_char(&mut self, ch: char) {
        self.input.push(ch);
        self.validation = None;
        self.mark_dirty();
    }

    pub(crate) fn pop_input_char(&mut self) {
        if self.input.pop().is_some() {
            self.validation = None;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_validation(&mut self, hint: String) {
        self.validation = Some(hint);
        self.mark_dirty();
    }

    pub(crate) fn set_notice(&mut self, notice: String) {
        self.notice = Some(notice);
        self.mark_dirty();
    }

    /// Moves to `InFlight` under a fresh id; returns `(new_id, superseded_id)`.
    pub(crate) fn begin_request(&mut self) -> (RequestId, Option<RequestId>) {
        let superseded = match self.status {
            RequestStatus::InFlight { request_id } => Some(request_id),
            _ => None,
        };
        let request_id = self.next_request_id;
        self.next_request_id += 1;
        self.status = RequestStatus::InFlight { request_id };
        self.validation = None;
        self.notice = None;
        self.mark_dirty();
        (request_id, superseded)
    }

    /// Applies a resolution only if it belongs to the in-flight request.
    /// Returns `false` when the resolution was stale and discarded.
    pub(crate) fn resolve(
        &mut self,
        request_id: RequestId,
        outcome: Result<String, FailureReason>,
    ) -> bool {
        match self.status {
            RequestStatus::InFlight { request_id: current } if current == request_id => {}
            _ => return false,
        }
        self.status = match outcome {
            Ok(manifest) => RequestStatus::Succeeded { manifest },
            Err(reason) => RequestStatus::Failed { reason },
        };
        self.mark_dirty();
        true
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
