//! Append-only persistence for survey responses.
//!
//! The persisted layout is a single JSON array of responses with RFC-3339
//! timestamps, written back as a whole on every append. Concurrent writers
//! are last-write-wins; there is no locking.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::info;

use crate::error::EngineError;
use crate::types::{NewResponse, SurveyResponse};

/// Storage abstraction so aggregation logic can be exercised against an
/// in-memory fake. No update or delete is exposed.
pub trait ResponseStore {
    /// Append an already-formed response to the collection.
    fn append(&mut self, response: SurveyResponse) -> Result<(), EngineError>;

    /// Return every stored response, timestamps parsed back to instants.
    /// Malformed persisted content is an error, never partial data.
    fn load_all(&self) -> Result<Vec<SurveyResponse>, EngineError>;

    /// Assign an identifier and the current timestamp, then append.
    fn record(&mut self, new: NewResponse) -> Result<SurveyResponse, EngineError> {
        let now = Utc::now();
        let response = SurveyResponse {
            id: now.timestamp_millis().to_string(),
            timestamp: now,
            answers: new.answers,
            location: new.location,
            user_type: new.user_type,
        };
        self.append(response.clone())?;
        Ok(response)
    }
}

/// File-backed store holding the whole collection in one JSON blob.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        JsonFileStore {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn read_collection(&self) -> Result<Vec<SurveyResponse>, EngineError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let raw = fs::read_to_string(&self.path)?;
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        let responses = serde_json::from_str(&raw)?;
        Ok(responses)
    }
}

impl ResponseStore for JsonFileStore {
    fn append(&mut self, response: SurveyResponse) -> Result<(), EngineError> {
        let mut all = self.read_collection()?;
        all.push(response);
        let blob = serde_json::to_string_pretty(&all)?;
        fs::write(&self.path, blob)?;
        info!(total = all.len(), path = %self.path.display(), "persisted survey collection");
        Ok(())
    }

    fn load_all(&self) -> Result<Vec<SurveyResponse>, EngineError> {
        self.read_collection()
    }
}

/// In-memory store for tests and demo submissions.
#[derive(Default)]
pub struct MemoryStore {
    responses: Vec<SurveyResponse>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ResponseStore for MemoryStore {
    fn append(&mut self, response: SurveyResponse) -> Result<(), EngineError> {
        self.responses.push(response);
        Ok(())
    }

    fn load_all(&self) -> Result<Vec<SurveyResponse>, EngineError> {
        Ok(self.responses.clone())
    }
}
