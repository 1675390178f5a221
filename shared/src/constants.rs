pub static ROOT_API: &'static str = "api";
pub static API_LOGIN: &'static str = "login";
pub static API_ARTICLES: &'static str = "articles";

pub static HEADER_AUTHORIZATION: &'static str = "Authorization";
pub static HEADER_CONTENT_TYPE: &'static str = "Content-Type";
pub static CONTENT_TYPE_JSON: &'static str = "application/json";

pub static STORAGE_TOKEN_KEY: &'static str = "token";

pub static PATH_LOGIN: &'static str = "/";
pub static PATH_ARTICLES: &'static str = "/articles";

pub const USERNAME_MIN_LEN: usize = 3;
pub const PASSWORD_MIN_LEN: usize = 8;
pub const INPUT_MAX_LEN: usize = 20;

pub const DEFAULT_API_BASE: &str = "http://localhost:9000";
pub const DEFAULT_PORT: u16 = 9000;

pub fn api_path(tail: &str) -> String {
    format!("/{ROOT_API}/{tail}")
}

pub fn article_path(article_id: u32) -> String {
    format!("/{ROOT_API}/{API_ARTICLES}/{article_id}")
}
