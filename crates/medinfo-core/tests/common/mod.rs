//! Shared test doubles for the pipeline integration tests
#![allow(dead_code)]

use async_trait::async_trait;
use medinfo_core::{ChatMessage, LLMClient, MedInfoError, Result, SearchProvider, SearchResult};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

pub fn hit(snippet: &str) -> SearchResult {
    SearchResult {
        title: "result".to_string(),
        snippet: snippet.to_string(),
        link: "https://example.com/page".to_string(),
    }
}

/// Search stub: canned hits matched by query substring, with call counting
pub struct MockSearch {
    responses: Vec<(&'static str, Vec<SearchResult>)>,
    image: Option<String>,
    calls: AtomicUsize,
}

impl MockSearch {
    pub fn new(responses: Vec<(&'static str, Vec<SearchResult>)>) -> Self {
        Self {
            responses,
            image: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn with_image(mut self, url: &str) -> Self {
        self.image = Some(url.to_string());
        self
    }

    pub fn search_calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SearchProvider for MockSearch {
    async fn search(&self, query: &str, _result_count: usize) -> Result<Vec<SearchResult>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        for (needle, hits) in &self.responses {
            if query.contains(needle) {
                return Ok(hits.clone());
            }
        }
        Ok(Vec::new())
    }

    async fn find_image(&self, _name: &str) -> Option<String> {
        self.image.clone()
    }
}

/// LLM stub: scripted replies consumed in call order
pub struct MockLlm {
    replies: Mutex<VecDeque<Result<String>>>,
    calls: AtomicUsize,
}

impl MockLlm {
    pub fn with_replies(replies: Vec<&str>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().map(|r| Ok(r.to_string())).collect()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Every call fails as if the provider were unreachable
    pub fn failing() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Queue a failure between scripted replies
    pub fn push_failure(self) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Err(MedInfoError::Network("provider unreachable".to_string())));
        self
    }

    pub fn completion_calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn next(&self) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(MedInfoError::Network("provider unreachable".to_string())))
    }
}

#[async_trait]
impl LLMClient for MockLlm {
    async fn chat_completion(&self, _messages: Vec<ChatMessage>) -> Result<String> {
        self.next()
    }

    async fn json_completion(&self, _messages: Vec<ChatMessage>) -> Result<String> {
        self.next()
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}
