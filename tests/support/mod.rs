//! Scripted transport shared by the behavior suites.

#![allow(dead_code)]

use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;

use yts_core::{HttpClient, HttpError, HttpRequest, HttpResponse};

/// Answers each request from the first route whose prefix matches its URL
/// and records everything it was asked to send.
#[derive(Debug, Default)]
pub struct ScriptedHttpClient {
    routes: Vec<(String, Result<HttpResponse, HttpError>)>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, prefix: &str, status: u16, body: &str) -> Self {
        self.routes.push((
            prefix.to_owned(),
            Ok(HttpResponse::with_status(status, body)),
        ));
        self
    }

    pub fn ok(self, prefix: &str, body: &str) -> Self {
        self.respond(prefix, 200, body)
    }

    pub fn fail(mut self, prefix: &str, error: HttpError) -> Self {
        self.routes.push((prefix.to_owned(), Err(error)));
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .expect("request store should not be poisoned")
            .clone()
    }

    pub fn urls(&self) -> Vec<String> {
        self.requests().into_iter().map(|request| request.url).collect()
    }
}

impl HttpClient for ScriptedHttpClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        let outcome = self
            .routes
            .iter()
            .find(|(prefix, _)| request.url.starts_with(prefix.as_str()))
            .map(|(_, outcome)| outcome.clone())
            .unwrap_or_else(|| Err(HttpError::new("connection failed: no route")));

        self.requests
            .lock()
            .expect("request store should not be poisoned")
            .push(request);

        Box::pin(async move { outcome })
    }
}

/// A `list_movies` envelope wrapping `data`.
pub fn ok_envelope(data: serde_json::Value) -> String {
    serde_json::json!({ "status": "ok", "status_message": "Query was successful", "data": data })
        .to_string()
}

pub fn empty_listing() -> String {
    ok_envelope(serde_json::json!({ "movie_count": 0, "limit": 50, "page_number": 1, "movies": [] }))
}
