use shared::constants::DEFAULT_API_BASE;

pub const API_BASE: &str = match option_env!("ARTICLES_API") {
    Some(base) => base,
    None => DEFAULT_API_BASE,
};

pub static MSG_GOODBYE: &'static str = "Goodbye!";
pub static MSG_LOGIN_FAILED: &'static str = "An error occurred, please try again";
pub static MSG_FETCH_FAILED: &'static str = "Could not load articles, please try again";
pub static MSG_CREATE_FAILED: &'static str = "Uh Oh. Something Happened";
pub static MSG_UPDATE_FAILED: &'static str = "Something Happened, please try again later";

pub static PROP_PLACEHOLDER: &'static str = "placeholder";
pub static PROP_NAME: &'static str = "name";
pub static PROP_VALUE: &'static str = "value";
pub static PROP_DISABLED: &'static str = "disabled";
pub static PROP_MAX_LENGTH: &'static str = "maxlength";
pub static PROP_TYPE: &'static str = "type";
pub static PROP_ID: &'static str = "id";
pub static PROP_HREF: &'static str = "href";

pub static TAG_DIV: &'static str = "div";
pub static TAG_INPUT: &'static str = "input";
pub static TAG_TEXTAREA: &'static str = "textarea";
pub static TAG_SELECT: &'static str = "select";
pub static TAG_BUTTON: &'static str = "button";
pub static TAG_OPTION: &'static str = "option";
