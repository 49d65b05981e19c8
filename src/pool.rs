use std::fmt::Display;
use std::future::Future;
use std::iter::Enumerate;
use std::vec;

use futures::stream::{FuturesUnordered, StreamExt};
use tokio::task::JoinSet;

use crate::collector::OutcomeCollector;
use crate::config::PoolConfig;
use crate::error::PoolError;
use crate::outcome::{Outcome, WorkItem};
use crate::progress::{PoolProgress, TaskEvent, TaskStage};
use crate::result::PoolResult;

type Hook = Box<dyn FnMut(&TaskEvent) + Send>;

// Items leave the cursor strictly left to right, and only while fewer than
// `limit` invocations are in flight.
struct Dispatcher<T> {
  cursor: Enumerate<vec::IntoIter<T>>,
  limit: usize,
  in_flight: usize,
}

impl<T> Dispatcher<T> {
  fn new(items: Vec<T>, limit: usize) -> Self {
    Self {
      cursor: items.into_iter().enumerate(),
      limit,
      in_flight: 0,
    }
  }

  fn next_item(&mut self) -> Option<WorkItem<T>> {
    if self.in_flight >= self.limit {
      return None;
    }
    let (index, payload) = self.cursor.next()?;
    self.in_flight += 1;
    Some(WorkItem { index, payload })
  }

  fn release(&mut self) {
    debug_assert!(self.in_flight > 0, "released a slot that was never taken");
    self.in_flight -= 1;
  }

  fn is_drained(&self) -> bool {
    self.in_flight == 0 && self.cursor.len() == 0
  }
}

/// Runs `work` over a sequence of items with at most `concurrency`
/// invocations in flight, collecting every outcome.
///
/// ```ignore
/// let result = TaskPool::with_concurrency(2)?
///   .on_task_finished(|event| tracing::info!(percent = event.stats.percentage(), "progress"))
///   .process(urls, |url| fetch(url))
///   .await;
/// ```
///
/// A pool is consumed by the run.
pub struct TaskPool {
  config: PoolConfig,
  progress: PoolProgress,
  on_task_started: Option<Hook>,
  on_task_finished: Option<Hook>,
}

impl Default for TaskPool {
  fn default() -> Self {
    Self::new(PoolConfig::default())
  }
}

impl TaskPool {
  pub fn new(config: PoolConfig) -> Self {
    Self {
      config,
      progress: PoolProgress::default(),
      on_task_started: None,
      on_task_finished: None,
    }
  }

  pub fn with_concurrency<C>(concurrency: C) -> Result<Self, PoolError>
  where
    C: TryInto<usize> + PartialOrd + Default + Display + Copy,
  {
    Ok(Self::new(PoolConfig::new(concurrency)?))
  }

  pub fn on_task_started<H>(mut self, hook: H) -> Self
  where
    H: FnMut(&TaskEvent) + Send + 'static,
  {
    self.on_task_started = Some(Box::new(hook));
    self
  }

  /// Called right after an item settles, before its slot is refilled.
  pub fn on_task_finished<H>(mut self, hook: H) -> Self
  where
    H: FnMut(&TaskEvent) + Send + 'static,
  {
    self.on_task_finished = Some(Box::new(hook));
    self
  }

  pub fn concurrency(&self) -> usize {
    self.config.concurrency()
  }

  pub fn progress(&self) -> PoolProgress {
    self.progress.clone()
  }

  /// Drives every invocation from the caller's task.
  ///
  /// `work` futures may borrow from the caller; they are polled concurrently
  /// but never in parallel.
  pub async fn process<I, T, F, Fut, R, E>(mut self, items: I, mut work: F) -> PoolResult<R, E>
  where
    I: IntoIterator<Item = T>,
    F: FnMut(T) -> Fut,
    Fut: Future<Output = Result<R, E>>,
  {
    let mut dispatcher = self.begin(items.into_iter().collect());
    let collector = OutcomeCollector::new();
    let mut in_flight = FuturesUnordered::new();

    loop {
      while let Some(WorkItem { index, payload }) = dispatcher.next_item() {
        self.started(index);
        let task = work(payload);
        in_flight.push(async move { (index, task.await) });
      }

      let Some((index, result)) = in_flight.next().await else {
        break;
      };
      dispatcher.release();
      let outcome = Outcome::from_result(index, result);
      self.finished(index, outcome.is_success());
      collector.record(outcome);
    }

    debug_assert!(dispatcher.is_drained());
    self.complete(collector.finalize())
  }

  /// Runs each invocation as its own tokio task.
  ///
  /// Outcomes are recorded in join order, the same order the finish hook
  /// sees. A panic inside `work` is resumed on the caller. Fails only if the
  /// runtime cancels a task.
  pub async fn process_spawned<I, T, F, Fut, R, E>(
    mut self,
    items: I,
    mut work: F,
  ) -> Result<PoolResult<R, E>, PoolError>
  where
    I: IntoIterator<Item = T>,
    F: FnMut(T) -> Fut,
    Fut: Future<Output = Result<R, E>> + Send + 'static,
    R: Send + 'static,
    E: Send + 'static,
  {
    let mut dispatcher = self.begin(items.into_iter().collect());
    let collector = OutcomeCollector::new();
    let mut in_flight = JoinSet::new();

    loop {
      while let Some(WorkItem { index, payload }) = dispatcher.next_item() {
        self.started(index);
        let task = work(payload);
        in_flight.spawn(async move { Outcome::from_result(index, task.await) });
      }

      let Some(joined) = in_flight.join_next().await else {
        break;
      };
      dispatcher.release();
      match joined {
        Ok(outcome) => {
          self.finished(outcome.index, outcome.is_success());
          collector.record(outcome);
        }
        Err(err) if err.is_panic() => std::panic::resume_unwind(err.into_panic()),
        Err(err) => {
          tracing::warn!(%err, "spawned task aborted");
          in_flight.abort_all();
          return Err(PoolError::Aborted {
            reason: err.to_string(),
          });
        }
      }
    }

    debug_assert!(dispatcher.is_drained());
    Ok(self.complete(collector.finalize()))
  }

  fn begin<T>(&self, items: Vec<T>) -> Dispatcher<T> {
    let total = items.len();
    self.progress.reset(total);
    tracing::debug!(
      total,
      concurrency = self.config.concurrency(),
      effective = self.config.effective_concurrency(total),
      "pool run started"
    );
    Dispatcher::new(items, self.config.concurrency())
  }

  fn started(&mut self, index: usize) {
    self.progress.mark_started();
    tracing::trace!(index, "item dispatched");
    if let Some(hook) = self.on_task_started.as_mut() {
      hook(&TaskEvent {
        index,
        stage: TaskStage::Started,
        stats: self.progress.snapshot(),
      });
    }
  }

  fn finished(&mut self, index: usize, succeeded: bool) {
    self.progress.mark_settled(succeeded);
    tracing::trace!(index, succeeded, "item settled");
    if let Some(hook) = self.on_task_finished.as_mut() {
      let stage = if succeeded {
        TaskStage::Succeeded
      } else {
        TaskStage::Failed
      };
      hook(&TaskEvent {
        index,
        stage,
        stats: self.progress.snapshot(),
      });
    }
  }

  fn complete<R, E>(&self, result: PoolResult<R, E>) -> PoolResult<R, E> {
    tracing::debug!(
      succeeded = result.results().len(),
      failed = result.errors().len(),
      "pool run finished"
    );
    result
  }
}

/// Processes `items` with at most `concurrency` invocations of `work` in
/// flight. Rejects a non-positive `concurrency` before touching any item.
pub async fn run<I, T, C, F, Fut, R, E>(
  items: I,
  concurrency: C,
  work: F,
) -> Result<PoolResult<R, E>, PoolError>
where
  I: IntoIterator<Item = T>,
  C: TryInto<usize> + PartialOrd + Default + Display + Copy,
  F: FnMut(T) -> Fut,
  Fut: Future<Output = Result<R, E>>,
{
  let pool = TaskPool::with_concurrency(concurrency)?;
  Ok(pool.process(items, work).await)
}
