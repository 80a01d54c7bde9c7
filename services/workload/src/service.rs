//! Fail-open workload computation over the order store.
//!
//! A technician's workload feeds the order-creation flow; an
//! unreachable store must never block it. Every failure mode here
//! (store error, timeout, cancellation) degrades to zero hours after a
//! single attempt, with the cause kept for logging.

use std::collections::HashMap;
use std::time::Duration;

use thiserror::Error;
use tokio_util::sync::CancellationToken;

use shared::effective_hours;
use shared::types::{Technician, TechnicianId, TechnicianWorkload};

use crate::repository::{ActiveOrder, WorkloadStore};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorkloadError {
    #[error("query timed out after {0}s")]
    Timeout(u64),
    #[error("query cancelled")]
    Cancelled,
    #[error("store error: {0}")]
    Store(String),
}

/// Outcome of one workload query. Degraded outcomes carry their cause
/// for observability; callers collapse them to zero hours.
#[derive(Debug, Clone)]
pub enum WorkloadOutcome {
    Computed(f64),
    Degraded { cause: WorkloadError },
}

pub struct WorkloadService<S> {
    store: S,
    query_timeout: Duration,
}

impl<S: WorkloadStore> WorkloadService<S> {
    pub fn new(store: S, query_timeout: Duration) -> Self {
        Self {
            store,
            query_timeout,
        }
    }

    /// Queries the technician's active orders and reduces each order's
    /// items through the shared-time discount.
    pub async fn lookup(
        &self,
        technician_id: &str,
        cancel: &CancellationToken,
    ) -> WorkloadOutcome {
        match self.fetch_active_orders(technician_id, cancel).await {
            Ok(orders) => WorkloadOutcome::Computed(
                orders.iter().map(|order| effective_hours(&order.items)).sum(),
            ),
            Err(cause) => WorkloadOutcome::Degraded { cause },
        }
    }

    /// Total queued hours for a technician, degrading to zero on any
    /// failure. Single attempt, no retry.
    pub async fn current_workload(&self, technician_id: &str) -> f64 {
        match self.lookup(technician_id, &CancellationToken::new()).await {
            WorkloadOutcome::Computed(hours) => hours,
            WorkloadOutcome::Degraded { cause } => {
                tracing::warn!(technician_id, %cause, "workload lookup degraded to zero");
                0.0
            }
        }
    }

    /// Order count plus queued hours, for roster views.
    pub async fn workload_summary(&self, technician_id: &str) -> TechnicianWorkload {
        match self
            .fetch_active_orders(technician_id, &CancellationToken::new())
            .await
        {
            Ok(orders) => TechnicianWorkload {
                technician_id: technician_id.to_string(),
                current_orders: orders.len(),
                total_hours: orders.iter().map(|order| effective_hours(&order.items)).sum(),
            },
            Err(cause) => {
                tracing::warn!(technician_id, %cause, "workload lookup degraded to zero");
                TechnicianWorkload {
                    technician_id: technician_id.to_string(),
                    current_orders: 0,
                    total_hours: 0.0,
                }
            }
        }
    }

    /// Candidate roster for the support advisor, queried concurrently.
    pub async fn workload_map(&self, candidates: &[Technician]) -> HashMap<TechnicianId, f64> {
        let lookups = candidates.iter().map(|candidate| async move {
            (
                candidate.id.clone(),
                self.current_workload(&candidate.id).await,
            )
        });
        futures::future::join_all(lookups).await.into_iter().collect()
    }

    async fn fetch_active_orders(
        &self,
        technician_id: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<ActiveOrder>, WorkloadError> {
        let query = tokio::time::timeout(self.query_timeout, self.store.active_orders(technician_id));

        tokio::select! {
            _ = cancel.cancelled() => Err(WorkloadError::Cancelled),
            result = query => match result {
                Err(_) => Err(WorkloadError::Timeout(self.query_timeout.as_secs())),
                Ok(Err(err)) => Err(WorkloadError::Store(format!("{err:#}"))),
                Ok(Ok(orders)) => Ok(orders),
            },
        }
    }
}
