use thiserror::Error;

pub type PromoResult<T> = Result<T, PromoError>;

#[derive(Error, Debug)]
pub enum PromoError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{resource} {id} not found")]
    NotFound { resource: &'static str, id: String },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl PromoError {
    pub fn not_found(resource: &'static str, id: impl ToString) -> Self {
        PromoError::NotFound {
            resource,
            id: id.to_string(),
        }
    }

    /// Whether the caller may retry the whole operation. Validation and
    /// not-found failures are final; conflicts and store faults are not.
    pub fn is_retryable(&self) -> bool {
        matches!(self, PromoError::Conflict(_) | PromoError::Store(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(PromoError::Conflict("code space exhausted".into()).is_retryable());
        assert!(PromoError::Store("connection reset".into()).is_retryable());
        assert!(!PromoError::Validation("end before start".into()).is_retryable());
        assert!(!PromoError::not_found("segment", "abc").is_retryable());
    }

    #[test]
    fn test_not_found_message() {
        let err = PromoError::not_found("campaign", "1234");
        assert_eq!(err.to_string(), "campaign 1234 not found");
    }
}
