//! Long-running background task that polls the Soroban RPC and writes
//! decoded ledger events to the database.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use sqlx::SqlitePool;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::config::Config;
use crate::db;
use crate::errors::Result;
use crate::rpc;

pub struct IndexerState {
    pub pool: SqlitePool,
    pub config: Config,
    pub client: Client,
}

/// Where polling picks up: the saved ledger and cursor, or the configured
/// start ledger on a fresh database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumePoint {
    pub ledger: u32,
    pub cursor: Option<String>,
}

/// Read the saved cursor. Database errors are returned, never papered over
/// with the configured start ledger.
pub async fn load_resume_point(pool: &SqlitePool, start_ledger: u32) -> Result<ResumePoint> {
    let last_ledger = db::get_last_ledger(pool).await.map_err(|e| {
        error!("Failed to read saved ledger: {e}");
        e
    })?;
    let cursor = db::get_cursor_string(pool).await.map_err(|e| {
        error!("Failed to read saved cursor: {e}");
        e
    })?;
    Ok(ResumePoint {
        ledger: resume_ledger(last_ledger, start_ledger),
        cursor,
    })
}

/// Run the indexer loop from `resume` until `shutdown` is cancelled.
pub async fn run(state: Arc<IndexerState>, resume: ResumePoint, shutdown: CancellationToken) {
    info!("Indexer starting — contract: {}", state.config.contract_id);

    let mut current_ledger = resume.ledger;
    let mut cursor = resume.cursor;

    info!("Resuming from ledger {current_ledger}");

    loop {
        match poll_once(
            &state.pool,
            &state.client,
            &state.config,
            current_ledger,
            cursor.as_deref(),
        )
        .await
        {
            Ok((next_ledger, next_cursor)) => {
                current_ledger = next_ledger;
                cursor = next_cursor;
            }
            Err(e) => {
                error!("Indexer poll error: {e}");
            }
        }

        tokio::select! {
            _ = shutdown.cancelled() => {
                info!("Indexer stopping at ledger {current_ledger}");
                return;
            }
            _ = tokio::time::sleep(Duration::from_secs(state.config.poll_interval_secs)) => {}
        }
    }
}

/// A saved cursor wins over the configured start ledger.
fn resume_ledger(saved: i64, configured: u32) -> u32 {
    if saved > 0 {
        u32::try_from(saved).unwrap_or(u32::MAX)
    } else {
        configured
    }
}

/// Perform a single poll iteration.
///
/// Returns `(next_start_ledger, next_cursor)`.
async fn poll_once(
    pool: &SqlitePool,
    client: &Client,
    config: &Config,
    start_ledger: u32,
    cursor: Option<&str>,
) -> Result<(u32, Option<String>)> {
    let page = rpc::fetch_events(
        client,
        &config.rpc_url,
        &config.contract_id,
        start_ledger,
        cursor,
        config.events_per_page,
    )
    .await?;

    if !page.events.is_empty() {
        let decoded = rpc::decode_events(&page.events, &config.contract_id);
        let inserted = db::insert_events(pool, &decoded).await?;
        info!(
            "Polled {} raw events → {} new records stored",
            page.events.len(),
            inserted
        );
    }

    // Keep paginating with the cursor when there is one; otherwise move the
    // start ledger up to the latest ledger the RPC has seen.
    let next_ledger = page
        .latest_ledger
        .map(|l| u32::try_from(l).unwrap_or(u32::MAX).max(start_ledger))
        .unwrap_or(start_ledger);

    // Persist cursor so restarts are deterministic.
    db::save_cursor(pool, i64::from(next_ledger), page.cursor.as_deref()).await?;

    Ok((next_ledger, page.cursor))
}
