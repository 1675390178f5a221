use std::rc::Rc;

use futures::future::{FutureExt, LocalBoxFuture};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

use shared::constants::{api_path, article_path, API_ARTICLES, API_LOGIN, CONTENT_TYPE_JSON, HEADER_AUTHORIZATION, HEADER_CONTENT_TYPE};
use shared::types::{ArticleDraft, ArticleResponse, ArticlesResponse, Credentials, LoginResponse, MessageResponse};

pub const STATUS_UNAUTHORIZED: u16 = 401;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("request failed with status {status}")]
    Status { status: u16, message: Option<String> },
    #[error("network error: {0}")]
    Network(String),
    #[error("unexpected response: {0}")]
    Decode(String),
    #[error("cannot encode request: {0}")]
    Encode(String),
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Status { status: STATUS_UNAUTHORIZED, .. })
    }

    /// `message` of the error payload, when the server sent one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Status { message: Some(message), .. } if !message.is_empty() => Some(message),
            _ => None,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match *self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub token: Option<String>,
    pub body: Option<String>,
}

impl ApiRequest {
    fn new(method: Method, path: String, token: Option<&str>) -> Self {
        Self {
            method,
            path,
            token: token.map(String::from),
            body: None,
        }
    }

    fn with_json<T: Serialize>(mut self, data: &T) -> Result<Self, ApiError> {
        let body = serde_json::to_string(data).map_err(|err| ApiError::Encode(err.to_string()))?;
        self.body = Some(body);
        Ok(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    fn decode<R: DeserializeOwned>(self) -> Result<R, ApiError> {
        if !self.is_success() {
            let message = serde_json::from_str::<MessageResponse>(&self.body)
                .ok()
                .map(|data| data.message);
            return Err(ApiError::Status { status: self.status, message });
        }
        serde_json::from_str::<R>(&self.body).map_err(|err| ApiError::Decode(err.to_string()))
    }
}

/// One HTTP exchange. Non-2xx statuses are a response, not an error.
pub trait Transport {
    fn send(&self, request: ApiRequest) -> LocalBoxFuture<'_, Result<ApiResponse, ApiError>>;
}

pub struct FetchTransport {
    base_url: String,
}

impl FetchTransport {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl Transport for FetchTransport {
    fn send(&self, request: ApiRequest) -> LocalBoxFuture<'_, Result<ApiResponse, ApiError>> {
        async move {
            fetch(&self.base_url, &request)
                .await
                .map_err(|err| ApiError::Network(format!("{:?}", err)))
        }
        .boxed_local()
    }
}

async fn fetch(base_url: &str, data: &ApiRequest) -> Result<ApiResponse, JsValue> {
    let opts = RequestInit::new();
    opts.set_method(data.method.as_str());
    opts.set_mode(RequestMode::Cors);
    if let Some(body) = &data.body {
        opts.set_body(&JsValue::from_str(body));
    }

    let request = Request::new_with_str_and_init(&format!("{base_url}{}", data.path), &opts)?;
    if data.body.is_some() {
        request.headers().set(HEADER_CONTENT_TYPE, CONTENT_TYPE_JSON)?;
    }
    if let Some(token) = &data.token {
        request.headers().set(HEADER_AUTHORIZATION, token)?;
    }

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("window is not available"))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request)).await?;
    let resp: Response = resp_value.dyn_into()?;

    let status = resp.status();
    let body = JsFuture::from(resp.text()?).await?.as_string().unwrap_or_default();

    Ok(ApiResponse { status, body })
}

/// Typed endpoints. The token is handed in by the caller on every call.
#[derive(Clone)]
pub struct ApiClient {
    transport: Rc<dyn Transport>,
}

impl ApiClient {
    pub fn new(transport: Rc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        let request = ApiRequest::new(Method::Post, api_path(API_LOGIN), None).with_json(credentials)?;
        self.call(request).await
    }

    pub async fn articles(&self, token: &str) -> Result<ArticlesResponse, ApiError> {
        self.call(ApiRequest::new(Method::Get, api_path(API_ARTICLES), Some(token))).await
    }

    pub async fn create_article(&self, token: &str, draft: &ArticleDraft) -> Result<ArticleResponse, ApiError> {
        let request = ApiRequest::new(Method::Post, api_path(API_ARTICLES), Some(token)).with_json(draft)?;
        self.call(request).await
    }

    pub async fn update_article(&self, token: &str, article_id: u32, draft: &ArticleDraft) -> Result<ArticleResponse, ApiError> {
        let request = ApiRequest::new(Method::Put, article_path(article_id), Some(token)).with_json(draft)?;
        self.call(request).await
    }

    pub async fn delete_article(&self, token: &str, article_id: u32) -> Result<MessageResponse, ApiError> {
        self.call(ApiRequest::new(Method::Delete, article_path(article_id), Some(token))).await
    }

    async fn call<R: DeserializeOwned>(&self, request: ApiRequest) -> Result<R, ApiError> {
        self.transport.send(request).await?.decode()
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use shared::types::Topic;

    use crate::mock::MockTransport;

    use super::*;

    #[test]
    fn login_posts_json_without_token() {
        let transport = Rc::new(MockTransport::new());
        transport.respond(200, r#"{"token":"abc123","message":"Welcome"}"#);
        let api = ApiClient::new(transport.clone());

        let credentials = Credentials { username: "maria".to_string(), password: "password".to_string() };
        let data = block_on(api.login(&credentials)).unwrap();
        assert_eq!(data.token, "abc123");

        let request = transport.last_request().unwrap();
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.path, "/api/login");
        assert_eq!(request.token, None);
        assert_eq!(request.body.as_deref(), Some(r#"{"username":"maria","password":"password"}"#));
    }

    #[test]
    fn article_requests_carry_token_and_id() {
        let transport = Rc::new(MockTransport::new());
        transport.respond(200, r#"{"article":{"article_id":3,"title":"t","text":"x","topic":"Node"},"message":"ok"}"#);
        transport.respond(200, r#"{"message":"Article 3 was deleted"}"#);
        let api = ApiClient::new(transport.clone());

        let draft = ArticleDraft { title: "t".to_string(), text: "x".to_string(), topic: Topic::Node };
        block_on(api.update_article("abc123", 3, &draft)).unwrap();
        block_on(api.delete_article("abc123", 3)).unwrap();

        let requests = transport.requests();
        assert_eq!(requests[0].method, Method::Put);
        assert_eq!(requests[0].path, "/api/articles/3");
        assert_eq!(requests[0].token.as_deref(), Some("abc123"));
        assert_eq!(requests[1].method, Method::Delete);
        assert_eq!(requests[1].body, None);
    }

    #[test]
    fn non_success_status_keeps_server_message() {
        let transport = Rc::new(MockTransport::new());
        transport.respond(401, r#"{"message":"Ouch: jwt expired"}"#);
        let api = ApiClient::new(transport);

        let err = block_on(api.articles("stale")).unwrap_err();
        assert!(err.is_unauthorized());
        assert_eq!(err.server_message(), Some("Ouch: jwt expired"));
    }

    #[test]
    fn non_json_error_body_has_no_message() {
        let transport = Rc::new(MockTransport::new());
        transport.respond(500, "Internal Server Error");
        let api = ApiClient::new(transport);

        let err = block_on(api.articles("abc123")).unwrap_err();
        assert_eq!(err, ApiError::Status { status: 500, message: None });
        assert!(!err.is_unauthorized());
    }

    #[test]
    fn malformed_success_body_is_a_decode_error() {
        let transport = Rc::new(MockTransport::new());
        transport.respond(200, r#"{"articles":"nope"}"#);
        let api = ApiClient::new(transport);

        let err = block_on(api.articles("abc123")).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
