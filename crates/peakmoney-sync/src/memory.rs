//! In-process content source with scripted responses.
//!
//! Backs `--offline` runs and the orchestration tests.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::SyncError;
use crate::source::{ContentQuery, ContentSource};

/// Answers each query with a scripted value or failure. Unscripted queries
/// return `null`, i.e. an unpopulated store.
#[derive(Debug, Default, Clone)]
pub struct MemorySource {
    responses: HashMap<ContentQuery, Result<Value, String>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_result(mut self, query: ContentQuery, result: Value) -> Self {
        self.responses.insert(query, Ok(result));
        self
    }

    pub fn with_failure(mut self, query: ContentQuery, message: impl Into<String>) -> Self {
        self.responses.insert(query, Err(message.into()));
        self
    }

    pub fn len(&self) -> usize {
        self.responses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }
}

#[async_trait]
impl ContentSource for MemorySource {
    async fn fetch(&self, query: &ContentQuery) -> Result<Value, SyncError> {
        match self.responses.get(query) {
            Some(Ok(value)) => Ok(value.clone()),
            Some(Err(message)) => Err(SyncError::Source(message.clone())),
            None => {
                debug!(%query, "no scripted response");
                Ok(Value::Null)
            }
        }
    }
}
