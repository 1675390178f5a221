use futures_signals::signal::Mutable;
use futures_signals::signal_vec::MutableVec;

use shared::constants::{PATH_ARTICLES, PATH_LOGIN};
use shared::types::Article;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Articles,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match *self {
            Route::Login => PATH_LOGIN,
            Route::Articles => PATH_ARTICLES,
        }
    }

    /// Accepts a full href or a bare path; anything unknown is the login screen.
    pub fn from_href(href: &str) -> Route {
        let path = match href.find("://") {
            Some(pos) => {
                let rest = &href[pos + 3..];
                rest.find('/').map(|slash| &rest[slash..]).unwrap_or("/")
            }
            None => href,
        };
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = path.trim_end_matches('/');
        if path == PATH_ARTICLES {
            Route::Articles
        } else {
            Route::Login
        }
    }
}

/// Everything the view layer reads. Written only by the controller,
/// apart from the selected article id which the view sets directly.
pub struct AppState {
    pub articles: MutableVec<Article>,
    pub message: Mutable<String>,
    pub spinner_on: Mutable<bool>,
    pub current_article_id: Mutable<Option<u32>>,
    pub route: Mutable<Route>,
}

impl AppState {
    pub fn new(route: Route) -> Self {
        Self {
            articles: MutableVec::new(),
            message: Mutable::new(String::new()),
            spinner_on: Mutable::new(false),
            current_article_id: Mutable::new(None),
            route: Mutable::new(route),
        }
    }

    pub fn navigate(&self, route: Route) {
        self.route.set_neq(route);
    }

    pub fn set_message(&self, message: impl Into<String>) {
        self.message.set(message.into());
    }

    pub fn current_article(&self) -> Option<Article> {
        let id = self.current_article_id.get()?;
        self.articles.lock_ref().iter().find(|row| row.article_id == id).cloned()
    }

    pub fn articles_cloned(&self) -> Vec<Article> {
        self.articles.lock_ref().to_vec()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Route::Login)
    }
}

/// Raises the loading flag for as long as it lives.
pub struct SpinnerGuard {
    spinner: Mutable<bool>,
}

impl SpinnerGuard {
    /// `None` while another request already holds the flag.
    pub fn acquire(spinner: &Mutable<bool>) -> Option<Self> {
        let mut on = spinner.lock_mut();
        if *on {
            return None;
        }
        *on = true;
        Some(Self { spinner: spinner.clone() })
    }
}

impl Drop for SpinnerGuard {
    fn drop(&mut self) {
        self.spinner.set(false);
    }
}
