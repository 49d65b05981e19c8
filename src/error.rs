use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PoolError {
  /// Rejected before any item was dispatched.
  #[error("invalid configuration: concurrency must be a positive integer, got {value}")]
  InvalidConfiguration { value: String },

  /// A spawned task was cancelled by the runtime before it settled.
  #[error("task aborted before settling: {reason}")]
  Aborted { reason: String },
}

impl PoolError {
  pub(crate) fn invalid_concurrency(value: impl std::fmt::Display) -> Self {
    PoolError::InvalidConfiguration {
      value: value.to_string(),
    }
  }
}
