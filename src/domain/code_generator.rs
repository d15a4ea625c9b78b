//! Code generator abstraction.

/// The randomness source could not produce bytes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("randomness source unavailable: {0}")]
pub struct GeneratorError(pub String);

/// Produces candidate short codes.
///
/// Candidates are not guaranteed unique; the engine retries on collision.
///
/// # Implementations
///
/// - [`crate::utils::code_generator::RandomCodeGenerator`] - 6 random bytes, base64url
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
pub trait CodeGenerator: Send + Sync {
    /// Returns a fresh candidate code.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError`] if the randomness source fails.
    fn generate(&self) -> Result<String, GeneratorError>;
}
