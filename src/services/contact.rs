use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

/// Minimum name length, in characters
pub const MIN_NAME_CHARS: usize = 2;

/// Minimum message length, in characters
pub const MIN_MESSAGE_CHARS: usize = 10;

/// Message shown when a form passes validation. Nothing is actually sent.
pub const CONFIRMATION: &str = "Merci, message enregistré (simulation)";

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("Invalid email regex"));

/// Contact form fields, as typed by the user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// One failed validation rule
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactFieldError {
    #[error("Nom trop court (≥ 2 caractères)")]
    NameTooShort,

    #[error("Email invalide")]
    InvalidEmail,

    #[error("Message trop court (≥ 10 caractères)")]
    MessageTooShort,
}

impl ContactFieldError {
    /// Name of the offending form field
    pub fn field(&self) -> &'static str {
        match self {
            ContactFieldError::NameTooShort => "name",
            ContactFieldError::InvalidEmail => "email",
            ContactFieldError::MessageTooShort => "message",
        }
    }
}

impl ContactForm {
    pub fn new(name: impl Into<String>, email: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    /// Check every field after trimming.
    ///
    /// # Errors
    /// All failing rules, in field order
    pub fn validate(&self) -> Result<(), Vec<ContactFieldError>> {
        let mut errors = Vec::new();

        if self.name.trim().chars().count() < MIN_NAME_CHARS {
            errors.push(ContactFieldError::NameTooShort);
        }
        if !EMAIL_PATTERN.is_match(self.email.trim()) {
            errors.push(ContactFieldError::InvalidEmail);
        }
        if self.message.trim().chars().count() < MIN_MESSAGE_CHARS {
            errors.push(ContactFieldError::MessageTooShort);
        }

        if errors.is_empty() {
            tracing::info!("Contact form accepted from {}", self.email.trim());
            Ok(())
        } else {
            tracing::debug!("Contact form rejected: {:?}", errors);
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_form() {
        let form = ContactForm::new("Al", "al@example.fr", "Bonjour à tous");
        assert_eq!(form.validate(), Ok(()));
    }

    #[test]
    fn test_every_rule_reported() {
        let form = ContactForm::new(" A ", "pas-un-email", "court");
        assert_eq!(
            form.validate(),
            Err(vec![
                ContactFieldError::NameTooShort,
                ContactFieldError::InvalidEmail,
                ContactFieldError::MessageTooShort,
            ])
        );
    }

    #[test]
    fn test_email_pattern() {
        let check = |email: &str| ContactForm::new("Zoé", email, "0123456789").validate();

        assert!(check("a@b.c").is_ok());
        assert!(check("  a@b.c  ").is_ok());
        assert!(check("a@b").is_err());
        assert!(check("a b@c.d").is_err());
        assert!(check("@b.c").is_err());
    }

    #[test]
    fn test_lengths_count_characters_not_bytes() {
        // "Éé" is two characters but four bytes
        assert!(ContactForm::new("Éé", "a@b.c", "éééééééééé").validate().is_ok());
        assert!(ContactForm::new("É", "a@b.c", "ééééééééé").validate().is_err());
    }

    #[test]
    fn test_error_fields_and_messages() {
        assert_eq!(ContactFieldError::InvalidEmail.field(), "email");
        assert_eq!(
            ContactFieldError::MessageTooShort.to_string(),
            "Message trop court (≥ 10 caractères)"
        );
    }
}
