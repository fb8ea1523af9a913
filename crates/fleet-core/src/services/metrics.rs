//! Metrics aggregator - derives point-in-time service statistics.
//!
//! Owns the process-wide request counter and the process start instant;
//! nothing reads ambient globals. The snapshot is read-only and safe to take
//! arbitrarily often while mutations are in flight — the two counts need not
//! observe a fully consistent cut.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use serde::Serialize;

use crate::money;
use crate::ports::FleetStore;
use crate::services::CoreError;

/// Rental counts by lifecycle bucket.
///
/// `completed` is simply `total - active`, so cancelled rentals count as
/// completed here even though revenue excludes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RentalCounters {
    pub total: i64,
    pub active: i64,
    pub completed: i64,
}

/// Revenue figure with its currency tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RevenueFigures {
    /// Fixed two-decimal rendering, e.g. `"175.00"`.
    pub total: String,
    pub currency: String,
}

/// Inbound request volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RequestCounters {
    pub total: u64,
}

/// Point-in-time service statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub uptime_seconds: u64,
    pub rentals: RentalCounters,
    pub revenue: RevenueFigures,
    pub requests: RequestCounters,
}

/// Service deriving statistics from the store and process-wide counters.
pub struct MetricsService {
    store: Arc<dyn FleetStore>,
    started_at: Instant,
    requests: AtomicU64,
}

impl MetricsService {
    /// Create a metrics service; the process start time is taken now.
    pub fn new(store: Arc<dyn FleetStore>) -> Self {
        Self {
            store,
            started_at: Instant::now(),
            requests: AtomicU64::new(0),
        }
    }

    /// Count one inbound request. Called by the HTTP boundary once per
    /// request regardless of outcome.
    pub fn record_request(&self) {
        self.requests.fetch_add(1, Ordering::Relaxed);
    }

    /// Take a snapshot of the current statistics.
    pub async fn snapshot(&self) -> Result<MetricsSnapshot, CoreError> {
        let totals = self.store.rental_totals().await?;

        Ok(MetricsSnapshot {
            uptime_seconds: self.started_at.elapsed().as_secs(),
            rentals: RentalCounters {
                total: totals.total_rentals,
                active: totals.active_rentals,
                completed: totals.total_rentals - totals.active_rentals,
            },
            revenue: RevenueFigures {
                total: money::format_amount(totals.total_revenue),
                currency: money::CURRENCY.to_string(),
            },
            requests: RequestCounters {
                total: self.requests.load(Ordering::Relaxed),
            },
        })
    }
}
