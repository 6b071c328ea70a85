//! Concurrent image download.
//!
//! Every link is spawned onto one `JoinSet`, all tasks sharing a single
//! `reqwest::Client` so connections to the same host are pooled. Each task
//! reports its input index, and results are slotted back into input order
//! once the whole set has drained.

use crate::domain::model::{FetchFailure, FetchOutcome, FetchResult, ImageLink};
use reqwest::{Client, StatusCode};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

#[derive(Clone)]
pub struct ImageFetcher {
    client: Client,
    limiter: Option<Arc<Semaphore>>,
}

impl ImageFetcher {
    /// `max_concurrent == 0` launches every download at once.
    pub fn new(client: Client, max_concurrent: usize) -> Self {
        let limiter = (max_concurrent > 0).then(|| Arc::new(Semaphore::new(max_concurrent)));
        Self { client, limiter }
    }

    /// Downloads every link; output index `i` always belongs to input index `i`.
    pub async fn fetch_all(&self, links: Vec<ImageLink>) -> Vec<FetchResult> {
        let total = links.len();
        let mut slots: Vec<Option<FetchOutcome>> = vec![None; total];
        let mut join_set = JoinSet::new();

        tracing::info!("⬇️  Downloading {} images", total);

        for (index, link) in links.iter().enumerate() {
            let client = self.client.clone();
            let limiter = self.limiter.clone();
            let url = link.source_url.clone();

            join_set.spawn(async move {
                // 取得許可後才發出請求
                let _permit = match limiter {
                    Some(semaphore) => match semaphore.acquire_owned().await {
                        Ok(permit) => Some(permit),
                        Err(e) => {
                            return (index, FetchOutcome::Failed(FetchFailure::Task(e.to_string())))
                        }
                    },
                    None => None,
                };

                (index, fetch_one(&client, &url).await)
            });
        }

        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((index, outcome)) => slots[index] = Some(outcome),
                Err(e) => tracing::error!("Download task did not complete: {}", e),
            }
        }

        links
            .into_iter()
            .zip(slots)
            .map(|(link, slot)| {
                let outcome = slot.unwrap_or_else(|| {
                    FetchOutcome::Failed(FetchFailure::Task("task aborted".to_string()))
                });
                FetchResult { link, outcome }
            })
            .collect()
    }
}

async fn fetch_one(client: &Client, url: &str) -> FetchOutcome {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => return FetchOutcome::Failed(FetchFailure::Transport(e.to_string())),
    };

    let status = response.status();
    tracing::debug!("GET {} -> {}", url, status);

    // 只有 200 視為成功
    if status != StatusCode::OK {
        return FetchOutcome::Failed(FetchFailure::HttpStatus(status.as_u16()));
    }

    match response.bytes().await {
        Ok(body) => FetchOutcome::Success(body.to_vec()),
        Err(e) => FetchOutcome::Failed(FetchFailure::Transport(e.to_string())),
    }
}
