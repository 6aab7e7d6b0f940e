//! Background task that reclaims expired cache entries.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info};

use super::service::CacheService;

/// Purges expired entries every `interval` until `shutdown` flips to `true`.
///
/// Expiry is already enforced on read; the sweep only bounds memory held by
/// keys that are never requested again.
pub async fn run_cache_sweeper(
    cache: Arc<dyn CacheService>,
    interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    // First tick completes immediately.
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let removed = cache.purge_expired();
                if removed > 0 {
                    metrics::counter!("postal_relay_cache_evictions_total").increment(removed as u64);
                }
                debug!(removed, remaining = cache.len(), "Cache sweep finished");
            }
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
        }
    }

    info!("Cache sweeper stopped");
}
