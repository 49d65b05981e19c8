use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Point-in-time view of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStats {
  pub total: usize,
  pub started: usize,
  pub settled: usize,
  pub failed: usize,
}

impl PoolStats {
  pub fn active(&self) -> usize {
    self.started.saturating_sub(self.settled)
  }

  pub fn pending(&self) -> usize {
    self.total.saturating_sub(self.started)
  }

  pub fn percentage(&self) -> f64 {
    if self.total == 0 {
      return 100.0;
    }
    self.settled as f64 / self.total as f64 * 100.0
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStage {
  Started,
  Succeeded,
  Failed,
}

/// Passed to lifecycle hooks. `stats` already reflects the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskEvent {
  pub index: usize,
  pub stage: TaskStage,
  pub stats: PoolStats,
}

/// Live counters of a pool, readable from any task while it runs.
#[derive(Debug, Clone, Default)]
pub struct PoolProgress {
  total: Arc<AtomicUsize>,
  started: Arc<AtomicUsize>,
  settled: Arc<AtomicUsize>,
  failed: Arc<AtomicUsize>,
}

impl PoolProgress {
  pub(crate) fn reset(&self, total: usize) {
    self.started.store(0, Ordering::Relaxed);
    self.settled.store(0, Ordering::Relaxed);
    self.failed.store(0, Ordering::Relaxed);
    self.total.store(total, Ordering::Relaxed);
  }

  pub(crate) fn mark_started(&self) {
    self.started.fetch_add(1, Ordering::Relaxed);
  }

  pub(crate) fn mark_settled(&self, succeeded: bool) {
    self.settled.fetch_add(1, Ordering::Relaxed);
    if !succeeded {
      self.failed.fetch_add(1, Ordering::Relaxed);
    }
  }

  pub fn total(&self) -> usize {
    self.total.load(Ordering::Relaxed)
  }

  pub fn started(&self) -> usize {
    self.started.load(Ordering::Relaxed)
  }

  pub fn settled(&self) -> usize {
    self.settled.load(Ordering::Relaxed)
  }

  pub fn failed(&self) -> usize {
    self.failed.load(Ordering::Relaxed)
  }

  pub fn active(&self) -> usize {
    self.snapshot().active()
  }

  pub fn percentage(&self) -> f64 {
    self.snapshot().percentage()
  }

  pub fn snapshot(&self) -> PoolStats {
    // settled before started so `started >= settled` holds in the snapshot
    let settled = self.settled();
    let failed = self.failed();
    PoolStats {
      total: self.total(),
      started: self.started().max(settled),
      settled,
      failed: failed.min(settled),
    }
  }
}
