use std::cell::RefCell;
use std::collections::VecDeque;

use futures::future::{FutureExt, LocalBoxFuture};
use futures_signals::signal::Mutable;

use crate::connect_fetch::{ApiError, ApiRequest, ApiResponse, Transport};

/// Scripted transport: answers requests in order and records them.
#[derive(Default)]
pub struct MockTransport {
    responses: RefCell<VecDeque<Result<ApiResponse, ApiError>>>,
    requests: RefCell<Vec<ApiRequest>>,
    spinner: RefCell<Option<Mutable<bool>>>,
    spinner_seen: RefCell<Vec<bool>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, status: u16, body: &str) {
        self.responses.borrow_mut().push_back(Ok(ApiResponse { status, body: body.to_string() }));
    }

    pub fn fail(&self, err: ApiError) {
        self.responses.borrow_mut().push_back(Err(err));
    }

    /// Records the flag's value at the moment each request goes out.
    pub fn watch_spinner(&self, spinner: Mutable<bool>) {
        self.spinner.replace(Some(spinner));
    }

    pub fn spinner_seen(&self) -> Vec<bool> {
        self.spinner_seen.borrow().clone()
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.borrow().clone()
    }

    pub fn last_request(&self) -> Option<ApiRequest> {
        self.requests.borrow().last().cloned()
    }
}

impl Transport for MockTransport {
    fn send(&self, request: ApiRequest) -> LocalBoxFuture<'_, Result<ApiResponse, ApiError>> {
        self.requests.borrow_mut().push(request);
        if let Some(spinner) = self.spinner.borrow().as_ref() {
            self.spinner_seen.borrow_mut().push(spinner.get());
        }
        let response = self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Network("no scripted response".to_string())));
        async move { response }.boxed_local()
    }
}
