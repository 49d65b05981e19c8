#![deny(clippy::all)]

//! Bounded-concurrency task pool.
//!
//! Drives an ordered sequence of items through an asynchronous `work`
//! function with at most `N` invocations in flight. Whenever one settles its
//! outcome is recorded and the next undispatched item takes the freed slot.
//! A failing item never affects the others; the run only fails on invalid
//! configuration.
//!
//! ```ignore
//! let result = task_pool::run(listing, 2, |entry| fetch_details(entry.url)).await?;
//! for (index, details) in result.results_with_index() {
//!   tracing::info!(index, name = %details.name, "fetched");
//! }
//! ```

mod collector;
mod config;
mod error;
mod outcome;
mod pool;
mod progress;
mod result;
mod timeout;

pub use crate::collector::OutcomeCollector;
pub use crate::config::{PoolConfig, DEFAULT_CONCURRENCY};
pub use crate::error::PoolError;
pub use crate::outcome::{Outcome, OutcomeKind, WorkItem};
pub use crate::pool::{run, TaskPool};
pub use crate::progress::{PoolProgress, PoolStats, TaskEvent, TaskStage};
pub use crate::result::PoolResult;
pub use crate::timeout::{timed, TaskError};

#[cfg(test)]
pub(crate) mod test_support {
  use once_cell::sync::Lazy;
  use tracing_subscriber::EnvFilter;

  static TRACING: Lazy<()> = Lazy::new(|| {
    let _ = tracing_subscriber::fmt()
      .with_env_filter(EnvFilter::from_default_env())
      .with_test_writer()
      .try_init();
  });

  pub fn init_tracing() {
    Lazy::force(&TRACING);
  }
}
