use std::rc::Rc;

use shared::types::ArticleDraft;
use shared::utils::validate_credentials;

use crate::connect_fetch::{ApiClient, ApiError};
use crate::constants::{MSG_CREATE_FAILED, MSG_FETCH_FAILED, MSG_GOODBYE, MSG_LOGIN_FAILED, MSG_UPDATE_FAILED};
use crate::session::SessionStore;
use crate::state::{AppState, Route, SpinnerGuard};

/// Application state controller: the six actions the view layer calls.
///
/// Every request-issuing action runs the same sequence: precondition
/// check, spinner guard, clear message, one request, branch on outcome.
/// The guard drops on every exit path, so the spinner always clears.
/// While a request is in flight, further requests are rejected.
pub struct Controller {
    state: AppState,
    api: ApiClient,
    session: Rc<dyn SessionStore>,
}

impl Controller {
    pub fn new(state: AppState, api: ApiClient, session: Rc<dyn SessionStore>) -> Self {
        Self { state, api, session }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn set_current_article_id(&self, article_id: Option<u32>) {
        self.state.current_article_id.set_neq(article_id);
    }

    pub async fn login(&self, username: &str, password: &str) {
        let credentials = match validate_credentials(username, password) {
            Ok(credentials) => credentials,
            Err(err) => {
                self.state.set_message(err.to_string());
                return;
            }
        };
        let Some(_spinner) = self.begin("login") else { return };

        match self.api.login(&credentials).await {
            Ok(data) => {
                log::info!("login: {}", credentials.username);
                self.session.set_token(&data.token);
                self.state.set_message(data.message);
                self.state.navigate(Route::Articles);
            }
            Err(err) => {
                log::warn!("login: {}", err);
                let message = match err.server_message() {
                    Some(message) => message.to_string(),
                    None => format!("{MSG_LOGIN_FAILED}: {err}"),
                };
                self.state.set_message(message);
            }
        }
    }

    pub fn logout(&self) {
        if self.session.token().is_some() {
            self.session.clear();
            self.state.set_message(MSG_GOODBYE);
        }
        self.state.navigate(Route::Login);
    }

    pub async fn fetch_articles(&self) {
        let Some(token) = self.token_or_redirect() else { return };
        let Some(_spinner) = self.begin("fetch_articles") else { return };

        match self.api.articles(&token).await {
            Ok(data) => {
                log::info!("fetch_articles: {} articles", data.articles.len());
                self.state.articles.lock_mut().replace_cloned(data.articles);
                self.state.set_message(data.message);
            }
            Err(err) => self.fail("fetch_articles", err, MSG_FETCH_FAILED),
        }
    }

    /// Returns true once the server has accepted the article.
    pub async fn create_article(&self, draft: ArticleDraft) -> bool {
        let Some(token) = self.token_or_redirect() else { return false };
        let Some(_spinner) = self.begin("create_article") else { return false };

        match self.api.create_article(&token, &draft).await {
            Ok(data) => {
                log::info!("create_article: {}", data.article.article_id);
                self.state.articles.lock_mut().push_cloned(data.article);
                self.state.set_message(data.message);
                true
            }
            Err(err) => {
                self.fail("create_article", err, MSG_CREATE_FAILED);
                false
            }
        }
    }

    /// Returns true once the server has accepted the change.
    pub async fn update_article(&self, article_id: u32, draft: ArticleDraft) -> bool {
        let Some(token) = self.token_or_redirect() else { return false };
        let Some(_spinner) = self.begin("update_article") else { return false };

        match self.api.update_article(&token, article_id, &draft).await {
            Ok(data) => {
                log::info!("update_article: {article_id}");
                {
                    let mut articles = self.state.articles.lock_mut();
                    if let Some(index) = articles.iter().position(|row| row.article_id == article_id) {
                        articles.set_cloned(index, data.article);
                    }
                }
                self.state.set_message(data.message);
                true
            }
            Err(err) => {
                self.fail("update_article", err, MSG_UPDATE_FAILED);
                false
            }
        }
    }

    pub async fn delete_article(&self, article_id: u32) {
        let Some(token) = self.token_or_redirect() else { return };
        let Some(_spinner) = self.begin("delete_article") else { return };

        match self.api.delete_article(&token, article_id).await {
            Ok(data) => {
                log::info!("delete_article: {article_id}");
                self.state.articles.lock_mut().retain(|row| row.article_id != article_id);
                if self.state.current_article_id.get() == Some(article_id) {
                    self.state.current_article_id.set(None);
                }
                self.state.set_message(data.message);
            }
            Err(err) => self.fail("delete_article", err, MSG_UPDATE_FAILED),
        }
    }

    fn token_or_redirect(&self) -> Option<String> {
        let token = self.session.token();
        if token.is_none() {
            self.state.navigate(Route::Login);
        }
        token
    }

    fn begin(&self, action: &str) -> Option<SpinnerGuard> {
        let spinner = SpinnerGuard::acquire(&self.state.spinner_on);
        match spinner {
            Some(_) => self.state.set_message(""),
            None => log::warn!("{action}: another request is in flight"),
        }
        spinner
    }

    fn fail(&self, action: &str, err: ApiError, fallback: &str) {
        match &err {
            ApiError::Status { .. } => log::warn!("{action}: {err}"),
            _ => log::error!("{action}: {err}"),
        }
        self.state.set_message(err.server_message().unwrap_or(fallback));
        if err.is_unauthorized() {
            self.logout();
        }
    }
}
