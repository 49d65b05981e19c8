/// Outcomes of a pool run, in completion order. Input indices are kept
/// alongside each entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolResult<R, E> {
  results: Vec<R>,
  errors: Vec<E>,
  result_indices: Vec<usize>,
  error_indices: Vec<usize>,
}

impl<R, E> Default for PoolResult<R, E> {
  fn default() -> Self {
    Self {
      results: Vec::new(),
      errors: Vec::new(),
      result_indices: Vec::new(),
      error_indices: Vec::new(),
    }
  }
}

impl<R, E> PoolResult<R, E> {
  pub(crate) fn with_capacity(capacity: usize) -> Self {
    Self {
      results: Vec::with_capacity(capacity),
      errors: Vec::new(),
      result_indices: Vec::with_capacity(capacity),
      error_indices: Vec::new(),
    }
  }

  pub(crate) fn push_result(&mut self, index: usize, value: R) {
    self.result_indices.push(index);
    self.results.push(value);
  }

  pub(crate) fn push_error(&mut self, index: usize, error: E) {
    self.error_indices.push(index);
    self.errors.push(error);
  }

  pub fn results(&self) -> &[R] {
    &self.results
  }

  pub fn errors(&self) -> &[E] {
    &self.errors
  }

  pub fn len(&self) -> usize {
    self.results.len() + self.errors.len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  pub fn has_errors(&self) -> bool {
    !self.errors.is_empty()
  }

  pub fn results_with_index(&self) -> impl Iterator<Item = (usize, &R)> {
    self.result_indices.iter().copied().zip(self.results.iter())
  }

  pub fn errors_with_index(&self) -> impl Iterator<Item = (usize, &E)> {
    self.error_indices.iter().copied().zip(self.errors.iter())
  }

  pub fn into_parts(self) -> (Vec<R>, Vec<E>) {
    (self.results, self.errors)
  }

  /// One entry per submitted item, ordered by input position.
  ///
  /// Indices must be unique and dense (`0..len`), which a pool run always
  /// produces. For a hand-filled [`OutcomeCollector`](crate::OutcomeCollector)
  /// that breaks this, debug builds panic and release builds drop the
  /// clashing or out-of-range entries.
  pub fn into_corresponding(self) -> Vec<Result<R, E>> {
    let mut slots: Vec<Option<Result<R, E>>> = (0..self.len()).map(|_| None).collect();

    let entries = self
      .result_indices
      .into_iter()
      .zip(self.results.into_iter().map(Ok))
      .chain(
        self
          .error_indices
          .into_iter()
          .zip(self.errors.into_iter().map(Err)),
      );
    let len = slots.len();
    for (index, entry) in entries {
      debug_assert!(index < len, "outcome index {index} out of range");
      if let Some(slot) = slots.get_mut(index) {
        debug_assert!(slot.is_none(), "outcome recorded twice for index {index}");
        *slot = Some(entry);
      }
    }

    slots.into_iter().flatten().collect()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn sample() -> PoolResult<u32, &'static str> {
    // completion order: 2, 0, 3, 1
    let mut result = PoolResult::with_capacity(4);
    result.push_result(2, 30);
    result.push_error(0, "first");
    result.push_result(3, 40);
    result.push_result(1, 20);
    result
  }

  #[test]
  fn test_completion_order_is_kept() {
    let result = sample();
    assert_eq!(result.results(), &[30, 40, 20]);
    assert_eq!(result.errors(), &["first"]);
    assert_eq!(result.len(), 4);
    assert!(result.has_errors());
  }

  #[test]
  fn test_indices_follow_entries() {
    let result = sample();
    let indexed: Vec<_> = result.results_with_index().collect();
    assert_eq!(indexed, vec![(2, &30), (3, &40), (1, &20)]);
    let failed: Vec<_> = result.errors_with_index().collect();
    assert_eq!(failed, vec![(0, &"first")]);
  }

  #[test]
  fn test_into_corresponding_restores_input_order() {
    let ordered = sample().into_corresponding();
    assert_eq!(ordered, vec![Err("first"), Ok(20), Ok(30), Ok(40)]);
  }

  #[test]
  #[cfg(debug_assertions)]
  #[should_panic(expected = "outcome recorded twice for index 1")]
  fn test_duplicate_index_is_rejected() {
    let mut result = PoolResult::<u32, &'static str>::with_capacity(2);
    result.push_result(1, 1);
    result.push_result(1, 2);
    let _ = result.into_corresponding();
  }

  #[test]
  #[cfg(debug_assertions)]
  #[should_panic(expected = "outcome index 5 out of range")]
  fn test_out_of_range_index_is_rejected() {
    let mut result = PoolResult::<u32, &'static str>::with_capacity(1);
    result.push_error(5, "late");
    let _ = result.into_corresponding();
  }

  #[test]
  fn test_empty_result() {
    let result = PoolResult::<u32, String>::default();
    assert!(result.is_empty());
    assert!(!result.has_errors());
    assert!(result.into_corresponding().is_empty());
  }
}
