//! Error types for the example-data crate.
//!
//! Generation is infallible apart from identifier allocation, which gives up
//! after a bounded number of collisions rather than looping forever.

use thiserror::Error;

/// Errors that can occur during mock data generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// Failed to draw an unused record identifier after maximum retries.
    #[error("failed to generate a unique record id after {max_attempts} attempts")]
    IdGenerationFailed {
        /// Number of attempts made before giving up.
        max_attempts: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_generation_error_formats_correctly() {
        let err = GenerationError::IdGenerationFailed { max_attempts: 100 };
        assert_eq!(
            err.to_string(),
            "failed to generate a unique record id after 100 attempts"
        );
    }
}
