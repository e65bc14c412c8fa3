use thiserror::Error;

use crate::config::Settings;
use crate::engine::SubmitPolicy;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

pub struct ConfigValidator;

impl ConfigValidator {
    pub fn validate(settings: &Settings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if settings.submit == SubmitPolicy::Append && settings.submit_title.trim().is_empty() {
            errors.push(ValidationError::MissingField("submit_title".to_string()));
        }

        if !settings.base_url.ends_with('/') {
            errors.push(ValidationError::InvalidValue {
                field: "base_url".to_string(),
                reason: format!("'{}' must end with '/'", settings.base_url),
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_config() {
        let result = ConfigValidator::validate(&Settings::default());
        assert!(result.is_ok());
    }

    #[test]
    fn test_empty_submit_title() {
        let settings = Settings {
            submit_title: " ".to_string(),
            ..Default::default()
        };

        let errors = ConfigValidator::validate(&settings).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], ValidationError::MissingField(ref f) if f == "submit_title"));
    }

    #[test]
    fn test_empty_submit_title_allowed_when_delegated() {
        let settings = Settings {
            submit: SubmitPolicy::Delegate,
            submit_title: String::new(),
            ..Default::default()
        };

        assert!(ConfigValidator::validate(&settings).is_ok());
    }

    #[test]
    fn test_base_url_without_trailing_slash() {
        let settings = Settings {
            base_url: "/forms".to_string(),
            ..Default::default()
        };

        let errors = ConfigValidator::validate(&settings).unwrap_err();
        assert!(matches!(errors[0], ValidationError::InvalidValue { ref field, .. } if field == "base_url"));
    }
}
