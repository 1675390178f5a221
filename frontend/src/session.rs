use std::cell::RefCell;
use std::rc::Rc;

use web_sys::Storage;

use shared::constants::STORAGE_TOKEN_KEY;

/// Single token slot. Only the controller's login and logout paths write it.
pub trait SessionStore {
    fn token(&self) -> Option<String>;
    fn set_token(&self, token: &str);
    fn clear(&self);
}

/// Token persisted in `localStorage`, so it survives page reloads.
pub struct LocalStorageSession {
    storage: Storage,
}

impl LocalStorageSession {
    pub fn open() -> Option<Self> {
        let window = web_sys::window()?;
        match window.local_storage() {
            Ok(Some(storage)) => Some(Self { storage }),
            Ok(None) => None,
            Err(err) => {
                log::error!("local_storage: {:?}", err);
                None
            }
        }
    }
}

impl SessionStore for LocalStorageSession {
    fn token(&self) -> Option<String> {
        match self.storage.get_item(STORAGE_TOKEN_KEY) {
            Ok(token) => token.filter(|token| !token.is_empty()),
            Err(err) => {
                log::error!("session token read: {:?}", err);
                None
            }
        }
    }

    fn set_token(&self, token: &str) {
        if let Err(err) = self.storage.set_item(STORAGE_TOKEN_KEY, token) {
            log::error!("session token write: {:?}", err);
        }
    }

    fn clear(&self) {
        if let Err(err) = self.storage.remove_item(STORAGE_TOKEN_KEY) {
            log::error!("session token clear: {:?}", err);
        }
    }
}

/// Token kept for the lifetime of the page only.
#[derive(Default)]
pub struct MemorySession {
    token: RefCell<Option<String>>,
}

impl MemorySession {
    pub fn with_token(token: &str) -> Self {
        Self {
            token: RefCell::new(Some(token.to_string())),
        }
    }
}

impl SessionStore for MemorySession {
    fn token(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    fn set_token(&self, token: &str) {
        self.token.replace(Some(token.to_string()));
    }

    fn clear(&self) {
        self.token.replace(None);
    }
}

/// Browser session, falling back to memory when storage is disabled.
pub fn browser_session() -> Rc<dyn SessionStore> {
    match LocalStorageSession::open() {
        Some(session) => Rc::new(session),
        None => {
            log::warn!("localStorage unavailable, session will not survive a reload");
            Rc::new(MemorySession::default())
        }
    }
}
