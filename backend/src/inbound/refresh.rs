//! Periodic feed refresh.
//!
//! A tokio task re-reads the leads on a fixed interval, narrows them to the
//! viewer and the current [`LeadFilter`], and publishes the result on a
//! `watch` channel. Filter changes trigger an immediate refresh.

use std::time::Duration;

use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, warn};

use crate::domain::ports::{KeyValueStore, SeedSource};
use crate::domain::views::{LeadFilter, LeadStats, visible_leads};
use crate::domain::{Actor, Lead, LeadDataService};

/// One published view of the feed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedSnapshot {
    /// Leads after scoping and filtering.
    pub leads: Vec<Lead>,
    /// Counters over `leads`.
    pub stats: LeadStats,
}

impl FeedSnapshot {
    fn build(viewer: Option<&Actor>, filter: &LeadFilter, leads: &[Lead]) -> Self {
        let filtered = match viewer {
            Some(actor) => filter.apply(&visible_leads(actor, leads)),
            None => filter.apply(leads),
        };
        let stats = LeadStats::from_leads(&filtered);
        Self {
            leads: filtered,
            stats,
        }
    }
}

/// Handle to a running refresh task.
#[derive(Debug)]
pub struct FeedRefresh {
    /// Completes once the shutdown signal fires.
    pub handle: JoinHandle<()>,
    /// Latest snapshot; starts empty until the first tick lands.
    pub snapshots: watch::Receiver<FeedSnapshot>,
}

/// Spawn the refresh loop on the current runtime.
///
/// The first refresh runs immediately. A failed read is logged and the
/// previous snapshot stays published. The task ends when `shutdown` changes
/// or its sender is dropped.
pub fn spawn_feed_refresh<S, G>(
    service: LeadDataService<S, G>,
    viewer: Option<Actor>,
    mut filter: watch::Receiver<LeadFilter>,
    interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> FeedRefresh
where
    S: KeyValueStore + 'static,
    G: SeedSource + 'static,
{
    let (tx, snapshots) = watch::channel(FeedSnapshot::default());
    let handle = tokio::spawn(async move {
        let mut ticker = time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut filter_open = true;
        loop {
            tokio::select! {
                biased;
                _ = shutdown.changed() => break,
                changed = filter.changed(), if filter_open => {
                    if changed.is_err() {
                        filter_open = false;
                        continue;
                    }
                }
                _ = ticker.tick() => {}
            }
            let current = filter.borrow_and_update().clone();
            refresh_once(&service, viewer.as_ref(), &current, &tx);
        }
        debug!("feed refresh stopped");
    });
    FeedRefresh { handle, snapshots }
}

fn refresh_once<S, G>(
    service: &LeadDataService<S, G>,
    viewer: Option<&Actor>,
    filter: &LeadFilter,
    tx: &watch::Sender<FeedSnapshot>,
) where
    S: KeyValueStore,
    G: SeedSource,
{
    match service.get_leads() {
        Ok(leads) => {
            let snapshot = FeedSnapshot::build(viewer, filter, &leads);
            debug!(
                total = leads.len(),
                shown = snapshot.stats.total,
                query = %filter.query,
                "feed refreshed"
            );
            tx.send_replace(snapshot);
        }
        Err(err) => {
            warn!(code = ?err.code(), error = %err, "feed refresh failed; keeping previous snapshot");
        }
    }
}
