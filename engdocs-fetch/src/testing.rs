//! Scripted page source for unit tests.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::client::RawResponse;
use crate::error::{FailureKind, FetchError};
use crate::source::{FetchSettings, PageSource};

/// Replays queued responses in order; an empty queue fails.
#[derive(Default)]
pub struct ScriptedSource {
    script: Mutex<VecDeque<Option<String>>>,
    calls: Mutex<Vec<(String, FetchSettings, bool)>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a 200 response.
    pub fn body(self, body: &str) -> Self {
        self.script.lock().unwrap().push_back(Some(body.to_string()));
        self
    }

    /// Queues an exhausted fetch.
    pub fn failure(self) -> Self {
        self.script.lock().unwrap().push_back(None);
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|c| c.0.clone()).collect()
    }

    pub fn settings(&self) -> Vec<FetchSettings> {
        self.calls.lock().unwrap().iter().map(|c| c.1).collect()
    }

    pub fn silent_flags(&self) -> Vec<bool> {
        self.calls.lock().unwrap().iter().map(|c| c.2).collect()
    }
}

#[async_trait]
impl PageSource for ScriptedSource {
    async fn fetch(
        &self,
        url: &str,
        settings: &FetchSettings,
        silent: bool,
    ) -> Result<RawResponse, FetchError> {
        self.calls
            .lock()
            .unwrap()
            .push((url.to_string(), *settings, silent));
        match self.script.lock().unwrap().pop_front().flatten() {
            Some(body) => Ok(RawResponse::ok(body)),
            None => Err(FetchError::Exhausted {
                attempts: settings.max_retries,
                kind: FailureKind::Connection,
                message: "scripted failure".to_string(),
            }),
        }
    }
}

/// A `{"GTPs": [...]}` page with `rows` records.
pub fn page_of(rows: usize) -> String {
    let records: Vec<String> = (0..rows).map(|i| format!("{{\"id\": {i}}}")).collect();
    format!("{{\"GTPs\": [{}]}}", records.join(","))
}
