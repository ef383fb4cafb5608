//! Transcript value objects
//!
//! The completed annotation an engine leaves in the supplementary-data
//! block, plus the revisions it replaced.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Length of the server-computed content hash
pub const HASH_LEN: usize = 8;

/// Completed transcript for one field-service pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TranscriptValue {
    /// Transcribed text
    pub value: String,
    /// Engine that produced the text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine: Option<String>,
    /// First write, RFC 3339
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_created: Option<String>,
    /// Latest write, RFC 3339
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_modified: Option<String>,
    /// Language of the text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,
    /// Short content hash, set by the server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    /// Earlier versions, newest first
    #[serde(default)]
    pub revisions: Vec<TranscriptRevision>,
}

/// Earlier version of a transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TranscriptRevision {
    /// Transcribed text
    pub value: String,
    /// Engine that produced the text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine: Option<String>,
    /// When this version was written, RFC 3339
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_modified: Option<String>,
    /// Short content hash
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    /// Language of the text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,
}

/// Text an engine (or a person) hands back for a pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptInput {
    /// Transcribed text
    pub value: String,
    /// Language of the text
    pub language_code: String,
}

impl TranscriptInput {
    /// Create input
    #[must_use]
    pub fn new(value: impl Into<String>, language_code: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            language_code: language_code.into(),
        }
    }
}

impl TranscriptValue {
    /// Fresh transcript written at `now`
    #[must_use]
    pub fn new(input: TranscriptInput, engine: impl Into<String>, now: DateTime<Utc>) -> Self {
        let stamp = timestamp(now);
        Self {
            hash: Some(content_hash(&input.value)),
            value: input.value,
            engine: Some(engine.into()),
            date_created: Some(stamp.clone()),
            date_modified: Some(stamp),
            language_code: Some(input.language_code),
            revisions: Vec::new(),
        }
    }

    /// Replace this transcript, keeping the old text as the newest revision
    #[must_use]
    pub fn revise(self, input: TranscriptInput, engine: impl Into<String>, now: DateTime<Utc>) -> Self {
        let mut next = Self::new(input, engine, now);
        next.date_created = self.date_created.clone().or(next.date_created);

        let mut revisions = Vec::with_capacity(self.revisions.len() + 1);
        revisions.push(TranscriptRevision {
            value: self.value,
            engine: self.engine,
            date_modified: self.date_modified,
            hash: self.hash,
            language_code: self.language_code,
        });
        revisions.extend(self.revisions);
        next.revisions = revisions;
        next
    }
}

/// First [`HASH_LEN`] hex characters of the SHA-256 of `text`
#[must_use]
pub fn content_hash(text: &str) -> String {
    let digest = Sha256::digest(text.as_bytes());
    let mut encoded = hex::encode(digest);
    encoded.truncate(HASH_LEN);
    encoded
}

fn timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Secs, true)
}
