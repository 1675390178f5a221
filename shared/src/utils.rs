use thiserror::Error;

use crate::constants::{PASSWORD_MIN_LEN, USERNAME_MIN_LEN};
use crate::types::{ArticleDraft, Credentials, Topic};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialsError {
    #[error("username and password are required")]
    Missing,
    #[error("username must be at least {} characters", USERNAME_MIN_LEN)]
    UsernameTooShort,
    #[error("password must be at least {} characters", PASSWORD_MIN_LEN)]
    PasswordTooShort,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("title, text and topic are required")]
    Missing,
}

/// Checks the login preconditions on the trimmed fields and returns the
/// fields as typed. Lengths are counted in characters, not bytes.
pub fn validate_credentials(username: &str, password: &str) -> Result<Credentials, CredentialsError> {
    let (name, pass) = (username.trim(), password.trim());
    if name.is_empty() || pass.is_empty() {
        return Err(CredentialsError::Missing);
    }
    if name.chars().count() < USERNAME_MIN_LEN {
        return Err(CredentialsError::UsernameTooShort);
    }
    if pass.chars().count() < PASSWORD_MIN_LEN {
        return Err(CredentialsError::PasswordTooShort);
    }
    Ok(Credentials {
        username: username.to_string(),
        password: password.to_string(),
    })
}

pub fn credentials_ready(username: &str, password: &str) -> bool {
    validate_credentials(username, password).is_ok()
}

pub fn validate_draft(draft: &ArticleDraft) -> Result<ArticleDraft, DraftError> {
    let title = draft.title.trim();
    let text = draft.text.trim();
    if title.is_empty() || text.is_empty() {
        return Err(DraftError::Missing);
    }
    Ok(ArticleDraft {
        title: title.to_string(),
        text: text.to_string(),
        topic: draft.topic,
    })
}

pub fn draft_ready(title: &str, text: &str, topic: &str) -> bool {
    !title.trim().is_empty() && !text.trim().is_empty() && Topic::parse(topic).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_are_returned_as_typed() {
        let credentials = validate_credentials("  maria ", " password ").unwrap();
        assert_eq!(credentials.username, "  maria ");
        assert_eq!(credentials.password, " password ");
    }

    #[test]
    fn credentials_reject_blank_fields() {
        assert_eq!(validate_credentials("   ", "password"), Err(CredentialsError::Missing));
        assert_eq!(validate_credentials("maria", ""), Err(CredentialsError::Missing));
    }

    #[test]
    fn credentials_enforce_minimum_lengths() {
        assert_eq!(validate_credentials("ma", "password"), Err(CredentialsError::UsernameTooShort));
        assert!(validate_credentials("maria", " pass word ").is_ok());
        assert_eq!(validate_credentials("maria", "  1234567  "), Err(CredentialsError::PasswordTooShort));
        assert!(credentials_ready("bob", "12345678"));
        assert!(!credentials_ready("bo", "12345678"));
    }

    #[test]
    fn draft_requires_title_and_text() {
        let draft = ArticleDraft {
            title: "  ".to_string(),
            text: "body".to_string(),
            topic: Topic::Node,
        };
        assert_eq!(validate_draft(&draft), Err(DraftError::Missing));

        let draft = ArticleDraft { title: " Streams ".to_string(), ..draft };
        assert_eq!(validate_draft(&draft).unwrap().title, "Streams");
    }

    #[test]
    fn draft_ready_needs_a_known_topic() {
        assert!(draft_ready("Title", "Text", "React"));
        assert!(!draft_ready("Title", "Text", ""));
        assert!(!draft_ready("Title", " ", "React"));
    }
}
