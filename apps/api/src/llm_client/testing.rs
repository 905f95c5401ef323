//! Scripted `GenerativeModel` for gateway, session and route tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use super::{GenerateContentRequest, GenerateContentResponse, GenerativeModel, LlmError};

/// Replays queued replies in order and records every request it receives.
/// Once the queue is empty every call fails with a 500.
#[derive(Default)]
pub struct ScriptedModel {
    replies: Mutex<VecDeque<Result<GenerateContentResponse, LlmError>>>,
    requests: Mutex<Vec<GenerateContentRequest>>,
}

impl ScriptedModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a raw `generateContent` response body.
    pub fn reply(self, body: Value) -> Self {
        let response = serde_json::from_value(body).expect("scripted response must deserialize");
        self.replies.lock().unwrap().push_back(Ok(response));
        self
    }

    /// Queues a reply whose single text part is `text`.
    pub fn reply_text(self, text: &str) -> Self {
        self.reply(json!({
            "candidates": [{"content": {"role": "model", "parts": [{"text": text}]}}]
        }))
    }

    /// Queues a reply whose text is `value` serialized as JSON.
    pub fn reply_json(self, value: Value) -> Self {
        let text = value.to_string();
        self.reply_text(&text)
    }

    /// Queues an API failure with the given status.
    pub fn fail(self, status: u16) -> Self {
        self.replies.lock().unwrap().push_back(Err(LlmError::Api {
            status,
            message: "scripted failure".to_string(),
        }));
        self
    }

    pub fn requests(&self) -> Vec<GenerateContentRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerativeModel for ScriptedModel {
    async fn generate(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, LlmError> {
        self.requests.lock().unwrap().push(request.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(LlmError::Api {
                status: 500,
                message: "no scripted reply left".to_string(),
            }))
    }
}
