use std::time::{Duration, Instant};

#[derive(Clone, Debug)]
pub struct Session {
    pub username: String,
    pub created: Instant,
}

impl Session {
    pub fn new(username: &str) -> Self {
        Self {
            username: username.to_string(),
            created: Instant::now(),
        }
    }

    pub fn is_expired(&self, lifetime: Duration) -> bool {
        self.created.elapsed() > lifetime
    }
}
