//! Bounded worker pool for detail requests
//!
//! Every detail fetch runs as its own task, but a task must hold a semaphore
//! permit while its request is in flight, so the number of concurrent
//! requests never exceeds the pool size no matter how large a page is.

use crate::api::{fetch_plugin_details, ApiClient, DetailRecord};
use crate::CatalogError;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Outcome of one detail fetch
#[derive(Debug)]
pub struct DetailOutcome {
    pub slug: String,
    pub result: Result<DetailRecord, CatalogError>,
}

/// All outcomes of one batch, in completion order
#[derive(Debug, Default)]
pub struct DetailBatch {
    pub outcomes: Vec<DetailOutcome>,

    /// Worker tasks that panicked or were cancelled (their slug is lost)
    pub lost_workers: usize,
}

/// Worker pool shared by every batch submitted through it
pub struct DetailPool {
    client: ApiClient,
    permits: Arc<Semaphore>,
    max_in_flight: usize,
}

impl DetailPool {
    /// Creates a pool allowing `max_in_flight` concurrent requests
    pub fn new(client: ApiClient, max_in_flight: usize) -> Self {
        let max_in_flight = max_in_flight.max(1);
        Self {
            client,
            permits: Arc::new(Semaphore::new(max_in_flight)),
            max_in_flight,
        }
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight
    }

    /// Fetches details for every slug and waits for all of them
    ///
    /// Outcomes are collected as tasks finish, so their order is not the
    /// submission order.
    pub async fn fetch_batch<I>(&self, slugs: I) -> DetailBatch
    where
        I: IntoIterator<Item = String>,
    {
        let mut tasks = JoinSet::new();

        for slug in slugs {
            let client = self.client.clone();
            let permits = Arc::clone(&self.permits);

            tasks.spawn(async move {
                let result = match permits.acquire_owned().await {
                    Ok(_permit) => fetch_plugin_details(&client, &slug).await,
                    Err(_) => Err(CatalogError::Task("detail pool is closed".to_string())),
                };
                DetailOutcome { slug, result }
            });
        }

        let mut batch = DetailBatch {
            outcomes: Vec::with_capacity(tasks.len()),
            lost_workers: 0,
        };

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(outcome) => batch.outcomes.push(outcome),
                Err(e) => {
                    tracing::error!("Detail worker failed: {}", e);
                    batch.lost_workers += 1;
                }
            }
        }

        batch
    }
}
