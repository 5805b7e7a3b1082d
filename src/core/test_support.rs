use crate::adapters::llm::LLMResponse;
use crate::adapters::{LLMAdapter, LLMRequest, PullRequestHost, PullRequestRef};
use crate::core::{FileDiff, ReviewError};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

pub struct StubHost {
    files: Result<Vec<FileDiff>, String>,
    comment_error: Option<String>,
    list_calls: AtomicUsize,
    comments: Mutex<Vec<String>>,
}

impl StubHost {
    pub fn with_files(files: Vec<FileDiff>) -> Self {
        Self {
            files: Ok(files),
            comment_error: None,
            list_calls: AtomicUsize::new(0),
            comments: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_listing(detail: &str) -> Self {
        Self {
            files: Err(detail.to_string()),
            ..Self::with_files(Vec::new())
        }
    }

    pub fn failing_comments(mut self, detail: &str) -> Self {
        self.comment_error = Some(detail.to_string());
        self
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn comments(&self) -> Vec<String> {
        self.comments.lock().unwrap().clone()
    }
}

#[async_trait]
impl PullRequestHost for StubHost {
    async fn list_files(&self, _pr: &PullRequestRef) -> Result<Vec<FileDiff>, ReviewError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.files.clone().map_err(ReviewError::Fetch)
    }

    async fn create_comment(&self, _pr: &PullRequestRef, body: &str) -> Result<(), ReviewError> {
        if let Some(detail) = &self.comment_error {
            return Err(ReviewError::Fetch(detail.clone()));
        }
        self.comments.lock().unwrap().push(body.to_string());
        Ok(())
    }
}

pub enum StubReply {
    Content(String),
    Provider(u16, String),
    Empty,
}

pub struct StubLLM {
    reply: StubReply,
    requests: Mutex<Vec<LLMRequest>>,
}

impl StubLLM {
    pub fn new(reply: StubReply) -> Self {
        Self {
            reply,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(content: &str) -> Self {
        Self::new(StubReply::Content(content.to_string()))
    }

    pub fn requests(&self) -> Vec<LLMRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LLMAdapter for StubLLM {
    async fn complete(&self, request: LLMRequest) -> Result<LLMResponse, ReviewError> {
        self.requests.lock().unwrap().push(request);
        match &self.reply {
            StubReply::Content(content) => Ok(LLMResponse {
                content: content.clone(),
                model: None,
            }),
            StubReply::Provider(status, body) => Err(ReviewError::Provider {
                status: *status,
                body: body.clone(),
            }),
            StubReply::Empty => Err(ReviewError::EmptyResponse),
        }
    }

    fn model_name(&self) -> &str {
        "stub"
    }
}
