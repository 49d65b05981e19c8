use std::fmt::Display;
use std::num::NonZeroUsize;

use crate::error::PoolError;

/// Concurrency used when none is configured.
pub const DEFAULT_CONCURRENCY: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolConfig {
  concurrency: NonZeroUsize,
}

impl PoolConfig {
  /// Zero and negative values are rejected. Positive values wider than
  /// `usize` saturate; dispatch is bounded by the item count anyway.
  pub fn new<C>(concurrency: C) -> Result<Self, PoolError>
  where
    C: TryInto<usize> + PartialOrd + Default + Display + Copy,
  {
    if concurrency <= C::default() {
      return Err(PoolError::invalid_concurrency(concurrency));
    }
    let value: usize = concurrency.try_into().unwrap_or(usize::MAX);

    NonZeroUsize::new(value)
      .map(|concurrency| Self { concurrency })
      .ok_or_else(|| PoolError::invalid_concurrency(concurrency))
  }

  pub fn concurrency(&self) -> usize {
    self.concurrency.get()
  }

  pub fn effective_concurrency(&self, total: usize) -> usize {
    self.concurrency.get().min(total)
  }
}

impl Default for PoolConfig {
  fn default() -> Self {
    Self {
      concurrency: NonZeroUsize::new(DEFAULT_CONCURRENCY).unwrap_or(NonZeroUsize::MIN),
    }
  }
}
