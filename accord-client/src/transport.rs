//! Transport layer abstraction.
//!
//! Managers build a [`RestRequest`] and hand it to a [`Transport`]; the HTTP
//! implementation lives in [`crate::http`], a scripted one in [`mock`].
//! Transports never retry.

use crate::error::ClientResult;
use async_trait::async_trait;
use serde_json::Value;
use std::fmt;

/// HTTP method of a REST call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Patch,
    Put,
    Delete,
}

impl Method {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A REST call relative to the API base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct RestRequest {
    pub method: Method,
    /// Path starting with `/`, e.g. `/applications/1/skus`.
    pub path: String,
    /// Query parameters in insertion order.
    pub query: Vec<(String, String)>,
    /// JSON body.
    pub body: Option<Value>,
}

impl RestRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Appends a query parameter.
    #[must_use]
    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    /// Appends a query parameter when `value` is present.
    #[must_use]
    pub fn query_opt(self, key: &str, value: Option<impl ToString>) -> Self {
        match value {
            Some(value) => self.query(key, value),
            None => self,
        }
    }

    #[must_use]
    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// First value of a query parameter.
    #[must_use]
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Executes REST calls.
///
/// Implementations fail with [`crate::ClientError::Http`] on non-2xx responses
/// and return `Value::Null` for empty bodies.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends `request` and returns the decoded JSON body.
    async fn request(&self, request: RestRequest) -> ClientResult<Value>;
}

/// A scripted transport for testing.
pub mod mock {
    use super::*;
    use crate::error::ClientError;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

    /// Records every request and answers from a queue of scripted responses.
    /// An empty queue answers `Value::Null`.
    #[derive(Debug, Clone, Default)]
    pub struct MockTransport {
        requests: Arc<Mutex<Vec<RestRequest>>>,
        responses: Arc<Mutex<VecDeque<ClientResult<Value>>>>,
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self::default()
        }

        /// Queues a successful response.
        pub fn respond_with(&self, body: Value) -> &Self {
            lock(&self.responses).push_back(Ok(body));
            self
        }

        /// Queues a failure.
        pub fn fail_with(&self, error: ClientError) -> &Self {
            lock(&self.responses).push_back(Err(error));
            self
        }

        /// Requests received so far, oldest first.
        pub fn requests(&self) -> Vec<RestRequest> {
            lock(&self.requests).clone()
        }

        /// The most recent request.
        pub fn last_request(&self) -> Option<RestRequest> {
            lock(&self.requests).last().cloned()
        }

        pub fn request_count(&self) -> usize {
            lock(&self.requests).len()
        }
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn request(&self, request: RestRequest) -> ClientResult<Value> {
            lock(&self.requests).push(request);
            lock(&self.responses)
                .pop_front()
                .unwrap_or(Ok(Value::Null))
        }
    }

    fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
        mutex.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
