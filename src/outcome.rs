/// An input item tagged with its position in the submitted sequence.
#[derive(Debug)]
pub struct WorkItem<T> {
  pub index: usize,
  pub payload: T,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutcomeKind<R, E> {
  Success(R),
  Failure(E),
}

/// Terminal result of one item. Written once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome<R, E> {
  pub index: usize,
  pub kind: OutcomeKind<R, E>,
}

impl<R, E> Outcome<R, E> {
  pub fn success(index: usize, value: R) -> Self {
    Self {
      index,
      kind: OutcomeKind::Success(value),
    }
  }

  pub fn failure(index: usize, error: E) -> Self {
    Self {
      index,
      kind: OutcomeKind::Failure(error),
    }
  }

  pub fn from_result(index: usize, result: Result<R, E>) -> Self {
    match result {
      Ok(value) => Self::success(index, value),
      Err(error) => Self::failure(index, error),
    }
  }

  pub fn is_success(&self) -> bool {
    matches!(self.kind, OutcomeKind::Success(_))
  }

  pub fn into_result(self) -> Result<R, E> {
    match self.kind {
      OutcomeKind::Success(value) => Ok(value),
      OutcomeKind::Failure(error) => Err(error),
    }
  }
}
