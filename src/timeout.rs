use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use tokio::time::timeout;

/// Failure of a time-limited invocation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskError<E> {
  #[error("task timed out after {0:?}")]
  TimedOut(Duration),
  #[error("{0}")]
  Failed(E),
}

/// Runs `task` for at most `limit`. Expiry is reported as an ordinary
/// failure, so the pool records it like any other error. The pool itself
/// never imposes a limit.
pub async fn timed<F, R, E>(limit: Duration, task: F) -> Result<R, TaskError<E>>
where
  F: Future<Output = Result<R, E>>,
{
  match timeout(limit, task).await {
    Ok(result) => result.map_err(TaskError::Failed),
    Err(_) => Err(TaskError::TimedOut(limit)),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::time::Instant;

  #[tokio::test]
  async fn test_passes_through_settled_tasks() {
    let ok = timed(Duration::from_millis(200), async { Ok::<_, String>(7) }).await;
    assert_eq!(ok, Ok(7));

    let err = timed(Duration::from_millis(200), async {
      Err::<u32, _>("bad".to_string())
    })
    .await;
    assert_eq!(err, Err(TaskError::Failed("bad".to_string())));
  }

  #[tokio::test]
  async fn test_timeout() {
    let start = Instant::now();
    let result = timed(Duration::from_millis(50), async {
      tokio::time::sleep(Duration::from_secs(5)).await;
      Ok::<_, String>(())
    })
    .await;

    assert_eq!(result, Err(TaskError::TimedOut(Duration::from_millis(50))));
    assert!(start.elapsed() < Duration::from_secs(1));
  }
}
