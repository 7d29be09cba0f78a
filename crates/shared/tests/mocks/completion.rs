use async_trait::async_trait;
use shared::{CompletionClient, CompletionError};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Replies with queued results in order, then with `fallback` once the queue is empty
#[derive(Clone)]
pub struct ScriptedCompletion {
    pub calls: Arc<Mutex<Vec<String>>>,
    replies: Arc<Mutex<VecDeque<Result<String, CompletionError>>>>,
    fallback: String,
}

impl ScriptedCompletion {
    pub fn new(fallback: &str) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            replies: Arc::new(Mutex::new(VecDeque::new())),
            fallback: fallback.to_string(),
        }
    }

    pub fn reply(self, text: &str) -> Self {
        self.replies.lock().unwrap().push_back(Ok(text.to_string()));
        self
    }

    pub fn rate_limited(self, times: usize) -> Self {
        for _ in 0..times {
            self.replies
                .lock()
                .unwrap()
                .push_back(Err(CompletionError::RateLimited("429 Too Many Requests".into())));
        }
        self
    }

    pub fn fail(self, message: &str) -> Self {
        self.replies.lock().unwrap().push_back(Err(CompletionError::Api {
            status: 500,
            message: message.to_string(),
        }));
        self
    }

    pub fn prompts(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionClient for ScriptedCompletion {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        self.calls.lock().unwrap().push(prompt.to_string());
        let next = self.replies.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Ok(self.fallback.clone()))
    }
}
