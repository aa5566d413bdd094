use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::transport::{ApiRequest, ApiResponse, Transport};
use crate::ApiError;

#[derive(Debug, Default)]
struct Exchange {
    requests: Vec<ApiRequest>,
    responses: VecDeque<Result<ApiResponse, String>>,
}

/// In-memory [`Transport`] for tests: records every request and answers
/// with queued responses in order.
#[derive(Clone, Debug, Default)]
pub struct MemoryTransport {
    exchange: Arc<Mutex<Exchange>>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response with a raw body.
    pub fn respond(&self, status: u16, body: impl Into<String>) -> &Self {
        self.lock().responses.push_back(Ok(ApiResponse {
            status,
            body: body.into(),
        }));
        self
    }

    /// Queue a response with a JSON body.
    pub fn respond_json(&self, status: u16, body: serde_json::Value) -> &Self {
        self.respond(status, body.to_string())
    }

    /// Queue a transport-level failure.
    pub fn fail(&self, message: impl Into<String>) -> &Self {
        self.lock().responses.push_back(Err(message.into()));
        self
    }

    pub fn request_count(&self) -> usize {
        self.lock().requests.len()
    }

    pub fn last_request(&self) -> Option<ApiRequest> {
        self.lock().requests.last().cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Exchange> {
        // A panicking test thread must not hide the requests from others.
        self.exchange
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Transport for MemoryTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let mut exchange = self.lock();
        exchange.requests.push(request);
        match exchange.responses.pop_front() {
            Some(Ok(response)) => Ok(response),
            Some(Err(message)) => Err(ApiError::Transport(message)),
            None => Err(ApiError::Transport("no response queued".to_string())),
        }
    }
}
