/// Errors from session key parsing and profile comparisons.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StabilityError {
    /// Returned when a session key is not of the form `<session>_<owner>`.
    #[error("malformed session key '{key}': expected '<session>_<owner>'")]
    MalformedSessionKey {
        /// The key as given.
        key: String,
    },

    /// Returned when two compositions of different lengths are compared.
    #[error("composition length mismatch: {left} vs {right}")]
    LengthMismatch {
        /// Length of the first composition.
        left: usize,
        /// Length of the second composition.
        right: usize,
    },

    /// Returned when a composition or a set of compositions is empty.
    #[error("{what} must not be empty")]
    EmptyInput {
        /// What was empty.
        what: &'static str,
    },

    /// Returned when a composition has a negative, non-finite or all-zero part set.
    #[error("composition must have finite non-negative parts with a positive total")]
    DegenerateComposition,
}
