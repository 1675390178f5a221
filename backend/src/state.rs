use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use shared::types::{Article, ArticleDraft};

use crate::types::Session;
use crate::utils::new_token;

struct StoreInner {
    sessions: HashMap<String, Session>,
    articles: Vec<Article>,
    next_id: u32,
}

/// Sessions and articles, shared by every request handler.
#[derive(Clone)]
pub struct Store {
    inner: Arc<Mutex<StoreInner>>,
    session_lifetime: Duration,
}

impl Store {
    pub fn new(articles: Vec<Article>, session_lifetime: Duration) -> Self {
        let next_id = articles.iter().map(|row| row.article_id).max().unwrap_or_default() + 1;
        Self {
            inner: Arc::new(Mutex::new(StoreInner {
                sessions: HashMap::new(),
                articles,
                next_id,
            })),
            session_lifetime,
        }
    }

    fn lock(&self) -> MutexGuard<'_, StoreInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn login(&self, username: &str) -> String {
        let token = new_token(username);
        self.lock().sessions.insert(token.clone(), Session::new(username));
        token
    }

    /// Username behind a live token.
    pub fn username(&self, token: &str) -> Option<String> {
        let inner = self.lock();
        inner.sessions.get(token)
            .filter(|session| !session.is_expired(self.session_lifetime))
            .map(|session| session.username.clone())
    }

    pub fn purge_sessions(&self) -> usize {
        let mut inner = self.lock();
        let before = inner.sessions.len();
        inner.sessions.retain(|_, session| !session.is_expired(self.session_lifetime));
        before - inner.sessions.len()
    }

    pub fn articles(&self) -> Vec<Article> {
        self.lock().articles.clone()
    }

    pub fn create(&self, draft: ArticleDraft) -> Article {
        let mut inner = self.lock();
        let article = draft.into_article(inner.next_id);
        inner.next_id += 1;
        inner.articles.push(article.clone());
        article
    }

    pub fn update(&self, article_id: u32, draft: ArticleDraft) -> Option<Article> {
        let mut inner = self.lock();
        let row = inner.articles.iter_mut().find(|row| row.article_id == article_id)?;
        *row = draft.into_article(article_id);
        Some(row.clone())
    }

    pub fn delete(&self, article_id: u32) -> bool {
        let mut inner = self.lock();
        let before = inner.articles.len();
        inner.articles.retain(|row| row.article_id != article_id);
        inner.articles.len() != before
    }
}

#[cfg(test)]
mod tests {
    use shared::types::Topic;

    use crate::constants::seed_articles;

    use super::*;

    fn draft(title: &str) -> ArticleDraft {
        ArticleDraft {
            title: title.to_string(),
            text: "text".to_string(),
            topic: Topic::Node,
        }
    }

    #[test]
    fn ids_continue_after_seed() {
        let store = Store::new(seed_articles(), Duration::from_secs(60));
        assert_eq!(store.create(draft("Fourth")).article_id, 4);
        assert_eq!(store.create(draft("Fifth")).article_id, 5);
        assert_eq!(store.articles().len(), 5);
    }

    #[test]
    fn deleted_ids_are_not_reused() {
        let store = Store::new(vec![], Duration::from_secs(60));
        let first = store.create(draft("One"));
        assert!(store.delete(first.article_id));
        assert!(!store.delete(first.article_id));
        assert_eq!(store.create(draft("Two")).article_id, first.article_id + 1);
    }

    #[test]
    fn update_keeps_id_and_position() {
        let store = Store::new(seed_articles(), Duration::from_secs(60));
        let updated = store.update(2, draft("Effects v2")).unwrap();
        assert_eq!(updated.article_id, 2);
        assert_eq!(store.articles()[1].title, "Effects v2");
        assert!(store.update(42, draft("Nope")).is_none());
    }

    #[test]
    fn expired_sessions_are_rejected_and_purged() {
        let store = Store::new(vec![], Duration::ZERO);
        let token = store.login("maria");
        std::thread::sleep(Duration::from_millis(5));
        assert_eq!(store.username(&token), None);
        assert_eq!(store.purge_sessions(), 1);

        let store = Store::new(vec![], Duration::from_secs(60));
        let token = store.login("maria");
        assert_eq!(store.username(&token).as_deref(), Some("maria"));
        assert_eq!(store.purge_sessions(), 0);
    }
}
