use shared::types::{Article, Topic};

pub const BODY_LIMIT: u64 = 1024 * 16;
pub const DEFAULT_HOST: [u8; 4] = [127, 0, 0, 1];
pub const DEFAULT_DIST: &str = "frontend/dist";
pub const DEFAULT_SESSION_HOURS: u64 = 24;
pub const PURGE_INTERVAL_SECS: u64 = 60 * 60;

pub const ENV_HOST: &str = "ARTICLES_HOST";
pub const ENV_PORT: &str = "ARTICLES_PORT";
pub const ENV_DIST: &str = "ARTICLES_DIST";
pub const ENV_SESSION_HOURS: &str = "ARTICLES_SESSION_HOURS";

pub const MSG_TOKEN_REQUIRED: &str = "Ouch: token required";
pub const MSG_TOKEN_INVALID: &str = "Ouch: invalid or expired token";
pub const MSG_BAD_BODY: &str = "Ouch: malformed request body";
pub const MSG_NOT_FOUND: &str = "Ouch: not found";
pub const MSG_METHOD: &str = "Ouch: method not allowed";
pub const MSG_TOO_LARGE: &str = "Ouch: request body too large";

pub fn msg_welcome(username: &str) -> String {
    format!("Welcome back, {username}!")
}

pub fn msg_articles(username: &str) -> String {
    format!("Here are your articles, {username}!")
}

pub fn msg_created(username: &str) -> String {
    format!("Well done, {username}. Great article!")
}

pub fn msg_updated(username: &str) -> String {
    format!("Nice update, {username}!")
}

pub fn msg_deleted(article_id: u32, username: &str) -> String {
    format!("Article {article_id} was deleted, {username}!")
}

pub fn msg_article_missing(article_id: u32) -> String {
    format!("Ouch: article {article_id} not found")
}

pub fn seed_articles() -> Vec<Article> {
    vec![
        Article {
            article_id: 1,
            title: "Closures".to_string(),
            text: "A closure is a function bundled with the variables it captures.".to_string(),
            topic: Topic::JavaScript,
        },
        Article {
            article_id: 2,
            title: "Effects".to_string(),
            text: "An effect runs after render, and its cleanup runs before the next one.".to_string(),
            topic: Topic::React,
        },
        Article {
            article_id: 3,
            title: "Streams".to_string(),
            text: "Readable streams push chunks while backpressure keeps memory flat.".to_string(),
            topic: Topic::Node,
        },
    ]
}
