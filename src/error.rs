#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StlError {
    /// The token was cancelled while the acquisition was waiting.
    #[error("context canceled")]
    Cancelled,

    /// The token's deadline passed while the acquisition was waiting.
    #[error("context deadline exceeded")]
    DeadlineExceeded,
}

#[cfg(test)]
mod tests {
    use super::StlError;

    #[test]
    fn test_display() {
        assert_eq!(StlError::Cancelled.to_string(), "context canceled");
        assert_eq!(
            StlError::DeadlineExceeded.to_string(),
            "context deadline exceeded"
        );
        assert_ne!(StlError::Cancelled, StlError::DeadlineExceeded);
    }
}
