use crossbeam_queue::SegQueue;

use crate::outcome::{Outcome, OutcomeKind};
use crate::result::PoolResult;

/// Append-only record of settled items.
///
/// Recording takes `&self` and is lock-free, so outcomes may be pushed from
/// several threads. Arrival order is preserved and becomes the completion order
/// of the final [`PoolResult`].
pub struct OutcomeCollector<R, E> {
  queue: SegQueue<Outcome<R, E>>,
}

impl<R, E> Default for OutcomeCollector<R, E> {
  fn default() -> Self {
    Self::new()
  }
}

impl<R, E> OutcomeCollector<R, E> {
  pub fn new() -> Self {
    Self {
      queue: SegQueue::new(),
    }
  }

  pub fn record(&self, outcome: Outcome<R, E>) {
    self.queue.push(outcome);
  }

  pub fn record_success(&self, index: usize, value: R) {
    self.record(Outcome::success(index, value));
  }

  pub fn record_failure(&self, index: usize, error: E) {
    self.record(Outcome::failure(index, error));
  }

  pub fn len(&self) -> usize {
    self.queue.len()
  }

  pub fn is_empty(&self) -> bool {
    self.queue.is_empty()
  }

  pub fn finalize(self) -> PoolResult<R, E> {
    let mut result = PoolResult::with_capacity(self.queue.len());
    while let Some(outcome) = self.queue.pop() {
      match outcome.kind {
        OutcomeKind::Success(value) => result.push_result(outcome.index, value),
        OutcomeKind::Failure(error) => result.push_error(outcome.index, error),
      }
    }
    result
  }
}
