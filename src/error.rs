use thiserror::Error;

/// Errors from [`crate::detect_and_crop`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrimError {
    /// Too few distinct finder patterns to bound a symbol
    #[error("qr parse error: found {found} finder pattern(s), need at least {required}")]
    Parse {
        /// Distinct marks accepted after the full scan
        found: usize,
        /// Marks required
        required: usize,
    },
}

/// Result alias for this crate
pub type Result<T> = std::result::Result<T, TrimError>;
