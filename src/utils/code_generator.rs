//! Short code generation and custom alias validation.
//!
//! Provides cryptographically secure random code generation and validation
//! for caller-chosen aliases.

use crate::domain::code_generator::{CodeGenerator, GeneratorError};
use base64::Engine as _;
use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;
use validator::ValidationError;

/// Length of random bytes before base64 encoding.
const CODE_LENGTH_BYTES: usize = 6;

/// Maximum length of a custom alias.
pub const MAX_ALIAS_LENGTH: usize = 30;

/// Aliases that would shadow system routes.
pub const RESERVED_ALIASES: &[&str] = &["shorten", "health"];

static ALIAS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("alias regex is valid"));

/// Generates short codes from the operating system's secure random source.
///
/// Six random bytes are encoded as URL-safe base64 without padding, producing
/// an 8-character code over `[A-Za-z0-9_-]`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomCodeGenerator;

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> Result<String, GeneratorError> {
        let mut buffer = [0u8; CODE_LENGTH_BYTES];

        getrandom::fill(&mut buffer).map_err(|e| GeneratorError(e.to_string()))?;

        Ok(base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer))
    }
}

/// Validates a caller-chosen alias.
///
/// # Rules
///
/// - Length: 1-30 characters
/// - Allowed characters: ASCII letters, digits, `_` and `-`
/// - Cannot be a reserved route segment
///
/// # Errors
///
/// Returns a [`ValidationError`] with code `custom_alias` naming the broken rule.
pub fn validate_custom_alias(alias: &str) -> Result<(), ValidationError> {
    if alias.is_empty() || alias.len() > MAX_ALIAS_LENGTH {
        return Err(alias_error("Custom alias must be 1-30 characters"));
    }

    if !ALIAS_REGEX.is_match(alias) {
        return Err(alias_error(
            "Custom alias can only contain letters, digits, '_' and '-'",
        ));
    }

    if RESERVED_ALIASES.contains(&alias) {
        return Err(alias_error("This alias is reserved"));
    }

    Ok(())
}

fn alias_error(message: &'static str) -> ValidationError {
    ValidationError::new("custom_alias").with_message(Cow::Borrowed(message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_code_has_correct_length() {
        let code = RandomCodeGenerator.generate().unwrap();
        assert_eq!(code.len(), 8);
    }

    #[test]
    fn test_generate_code_url_safe_characters() {
        let code = RandomCodeGenerator.generate().unwrap();
        assert!(ALIAS_REGEX.is_match(&code));
        assert!(!code.contains('='));
    }

    #[test]
    fn test_generate_code_produces_unique_codes() {
        let codes: HashSet<String> = (0..1000)
            .map(|_| RandomCodeGenerator.generate().unwrap())
            .collect();

        assert_eq!(codes.len(), 1000);
    }

    #[test]
    fn test_validate_single_character() {
        assert!(validate_custom_alias("a").is_ok());
    }

    #[test]
    fn test_validate_maximum_length() {
        assert!(validate_custom_alias(&"a".repeat(30)).is_ok());
        assert!(validate_custom_alias(&"a".repeat(31)).is_err());
    }

    #[test]
    fn test_validate_mixed_valid_chars() {
        assert!(validate_custom_alias("My_Link-2024").is_ok());
    }

    #[test]
    fn test_validate_empty_string() {
        assert!(validate_custom_alias("").is_err());
    }

    #[test]
    fn test_validate_special_characters() {
        let err = validate_custom_alias("my/link").unwrap_err();
        assert_eq!(err.code, "custom_alias");
        assert!(validate_custom_alias("my link").is_err());
        assert!(validate_custom_alias("promo@2025").is_err());
    }

    #[test]
    fn test_validate_all_reserved_aliases() {
        for &reserved in RESERVED_ALIASES {
            assert!(
                validate_custom_alias(reserved).is_err(),
                "Reserved alias '{}' should be invalid",
                reserved
            );
        }
    }
}
