//! Deadline-bounded query service.
//!
//! Wraps a shared [`IbdMap`] for concurrent callers. Each query runs on
//! tokio's blocking pool and is abandoned once the configured deadline
//! passes. Aggregation cost grows with the number of segments touching
//! the queried individual.
//!
//! Workers share the tables through `Arc` clones; nothing is locked.

use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use crate::config::ServiceConfig;
use crate::model::IndividualId;
use crate::query::{Query, QueryResult};
use crate::{Error, IbdMap, Result};

#[derive(Debug, Clone)]
pub struct QueryService {
    map: Arc<IbdMap>,
    deadline: Duration,
}

impl QueryService {
    pub fn new(map: Arc<IbdMap>, config: &ServiceConfig) -> Self {
        Self::with_deadline(map, config.query_deadline())
    }

    pub fn with_deadline(map: Arc<IbdMap>, deadline: Duration) -> Self {
        Self { map, deadline }
    }

    pub fn map(&self) -> &IbdMap {
        &self.map
    }

    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    /// Answer `query` on a blocking worker, or fail with
    /// [`Error::Timeout`] once the deadline passes.
    ///
    /// A timed-out computation is not interrupted; it finishes on the
    /// blocking pool and its result is dropped.
    pub async fn query(&self, query: Query) -> Result<QueryResult> {
        let map = Arc::clone(&self.map);
        let individual = query.individual.clone();
        self.run_bounded(individual, move || map.query(&query)).await
    }

    async fn run_bounded<T, F>(&self, individual: IndividualId, work: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce() -> Result<T> + Send + 'static,
    {
        let task = tokio::task::spawn_blocking(work);

        match tokio::time::timeout(self.deadline, task).await {
            Ok(Ok(result)) => result,
            Ok(Err(join_err)) => Err(Error::Internal(format!("query worker failed: {join_err}"))),
            Err(_) => {
                warn!(%individual, deadline_ms = self.deadline.as_millis() as u64, "query timed out");
                Err(Error::Timeout(self.deadline))
            }
        }
    }
}
