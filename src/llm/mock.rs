//! Mock completion client for testing.
//!
//! Provides deterministic responses: an ordered script of replies for
//! driving multi-round flows, plus pattern-matched fallbacks. Every prompt
//! received is recorded so tests can assert on prompt content.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::error::{AgentError, Result};
use crate::llm::CompletionClient;

/// Mock completion client with scripted, deterministic behavior.
#[derive(Debug, Default)]
pub struct MockCompletionClient {
    /// Replies returned in order, one per call, before pattern matching.
    scripted: Mutex<VecDeque<String>>,
    /// Pattern -> response fallbacks (substring match on the prompt).
    patterns: Vec<(String, String)>,
    /// When set, every call fails with this message.
    failure: Option<String>,
    /// Prompts received, in call order.
    prompts: Mutex<Vec<String>>,
}

impl MockCompletionClient {
    /// Creates a new mock client with no scripted replies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a reply returned by the next unanswered call.
    pub fn with_reply(self, reply: impl Into<String>) -> Self {
        self.scripted.lock().unwrap().push_back(reply.into());
        self
    }

    /// Adds a pattern fallback: prompts containing `pattern` get `response`.
    pub fn with_response(mut self, pattern: impl Into<String>, response: impl Into<String>) -> Self {
        self.patterns.push((pattern.into(), response.into()));
        self
    }

    /// Makes every call fail, simulating an unreachable oracle.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::default()
        }
    }

    /// Returns all prompts received so far.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    /// Returns the number of completion calls made.
    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl CompletionClient for MockCompletionClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());

        if let Some(message) = &self.failure {
            return Err(AgentError::llm(message.clone()));
        }

        if let Some(reply) = self.scripted.lock().unwrap().pop_front() {
            return Ok(reply);
        }

        let prompt_lower = prompt.to_lowercase();
        for (pattern, response) in &self.patterns {
            if prompt_lower.contains(&pattern.to_lowercase()) {
                return Ok(response.clone());
            }
        }

        Ok("I don't understand that question. Could you please rephrase it?".to_string())
    }
}
