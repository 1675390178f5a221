pub mod app_articles;
pub mod app_login;
pub mod app_root;
pub mod article_form;
