use crate::{Category, NewFact, ValidationError};
use reqwest::Url;

/// Maximum length of a fact's text, in characters.
pub const MAX_TEXT_LEN: usize = 200;

/// Whether `input` parses as an absolute URL with an `http` or `https`
/// scheme.
pub fn is_valid_http_url(input: &str) -> bool {
    Url::parse(input).is_ok_and(|url| matches!(url.scheme(), "http" | "https"))
}

impl NewFact {
    /// Check raw form input and build a fact to insert.
    ///
    /// The checks run in form order: text, source, then category.
    pub fn validate(text: &str, source: &str, category: &str) -> Result<Self, ValidationError> {
        if text.is_empty() {
            return Err(ValidationError::EmptyText);
        }
        let len = text.chars().count();
        if len > MAX_TEXT_LEN {
            return Err(ValidationError::TextTooLong {
                len,
                max: MAX_TEXT_LEN,
            });
        }
        if !is_valid_http_url(source) {
            return Err(ValidationError::InvalidSource(source.to_string()));
        }
        if category.is_empty() {
            return Err(ValidationError::EmptyCategory);
        }
        let category: Category = category
            .parse()
            .map_err(|_| ValidationError::UnknownCategory(category.to_string()))?;

        Ok(Self::new(text, source, category))
    }
}
