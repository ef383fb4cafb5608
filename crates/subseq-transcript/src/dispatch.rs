//! Dispatch of user requests to transcription engines
//!
//! When a change run moves a pair from `REQUESTED_BY_USER` to `PENDING`, the
//! request is handed to a [`TranscriptionDispatcher`]. Talking to a remote
//! engine is the dispatcher's business; the action only records status.

use parking_lot::Mutex;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// Work item for an engine
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranscriptionRequest {
    /// Form field holding the media
    pub field: String,
    /// Service asked to transcribe
    pub service: String,
    /// Block key the result must be written under
    pub key: String,
    /// Engine name, `engines/transcript_{service}`
    pub engine: String,
    /// Submission value of the media field, if present
    pub media: Option<Value>,
}

/// Receives requests produced by a change run
pub trait TranscriptionDispatcher: Send + Sync + fmt::Debug {
    /// Hand off one request; must not block on the engine
    fn dispatch(&self, request: &TranscriptionRequest);
}

/// Dispatcher that keeps requests in memory
#[derive(Debug, Default)]
pub struct RecordingDispatcher {
    requests: Mutex<Vec<TranscriptionRequest>>,
}

impl RecordingDispatcher {
    /// Create empty recorder
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of recorded requests
    #[must_use]
    pub fn requests(&self) -> Vec<TranscriptionRequest> {
        self.requests.lock().clone()
    }

    /// Drain recorded requests
    pub fn take(&self) -> Vec<TranscriptionRequest> {
        std::mem::take(&mut *self.requests.lock())
    }

    /// Number of recorded requests
    #[must_use]
    pub fn len(&self) -> usize {
        self.requests.lock().len()
    }

    /// Check if nothing was recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.requests.lock().is_empty()
    }
}

impl TranscriptionDispatcher for RecordingDispatcher {
    fn dispatch(&self, request: &TranscriptionRequest) {
        self.requests.lock().push(request.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(key: &str) -> TranscriptionRequest {
        TranscriptionRequest {
            field: "q1".into(),
            service: "acme".into(),
            key: key.into(),
            engine: "engines/transcript_acme".into(),
            media: None,
        }
    }

    #[test]
    fn recorder_collects_and_drains() {
        let recorder = RecordingDispatcher::new();
        assert!(recorder.is_empty());

        recorder.dispatch(&request("a"));
        recorder.dispatch(&request("b"));
        assert_eq!(recorder.len(), 2);
        assert_eq!(recorder.requests()[1].key, "b");

        let drained = recorder.take();
        assert_eq!(drained.len(), 2);
        assert!(recorder.is_empty());
    }
}
