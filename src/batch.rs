//! Parallel batch driver. Examples share nothing but the annotator, so each
//! one runs on its own blocking worker; results keep input order.

use std::any::Any;
use std::collections::BTreeMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::Semaphore;
use tracing::{error, info};

use crate::io::{InputRecord, Outcome, OutputRecord};

/// Configuration for batch processing
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Maximum examples in flight
    pub workers: usize,
    /// Log progress every this many records
    pub progress_every: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            workers: std::thread::available_parallelism().map(|n| n.get()).unwrap_or(4),
            progress_every: 1000,
        }
    }
}

/// Counts per outcome for one batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub augmented: usize,
    pub not_augmented: usize,
    pub invalid: usize,
    /// Not-augmented records per reason code
    pub reasons: BTreeMap<String, usize>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl BatchSummary {
    pub fn from_records<I, T>(records: &[OutputRecord<I, T>], started_at: DateTime<Utc>, finished_at: DateTime<Utc>) -> Self {
        let mut summary = Self {
            total: records.len(),
            augmented: 0,
            not_augmented: 0,
            invalid: 0,
            reasons: BTreeMap::new(),
            started_at,
            finished_at,
        };
        for record in records {
            match &record.outcome {
                Outcome::Augmented(_) => summary.augmented += 1,
                Outcome::NotAugmented { reason } => {
                    summary.not_augmented += 1;
                    *summary.reasons.entry(reason.code().to_string()).or_default() += 1;
                }
                Outcome::Invalid { .. } => summary.invalid += 1,
            }
        }
        summary
    }

    pub fn duration_ms(&self) -> i64 {
        (self.finished_at - self.started_at).num_milliseconds()
    }

    /// Share of records augmented, in percent
    pub fn augmented_pct(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.augmented as f64 / self.total as f64 * 100.0
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}

/// Run `job` over every input on at most `config.workers` blocking workers
pub async fn run_batch<I, T, F>(
    inputs: Vec<InputRecord<I>>,
    config: &BatchConfig,
    job: F,
) -> Result<(Vec<OutputRecord<I, T>>, BatchSummary)>
where
    I: Send + 'static,
    T: Send + 'static,
    F: Fn(&I) -> Outcome<T> + Send + Sync + 'static,
{
    let started_at = Utc::now();
    let total = inputs.len();
    info!("Processing {} records with {} workers", total, config.workers);

    let semaphore = Arc::new(Semaphore::new(config.workers.max(1)));
    let job = Arc::new(job);
    let mut handles = Vec::with_capacity(total);

    for record in inputs {
        let permit = semaphore
            .clone()
            .acquire_owned()
            .await
            .context("Worker pool closed")?;
        let job = Arc::clone(&job);
        handles.push(tokio::task::spawn_blocking(move || {
            let _permit = permit;
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| (*job)(&record.input)))
                .unwrap_or_else(|payload| {
                    let message = panic_message(payload.as_ref());
                    error!("Record {} panicked: {}", record.id, message);
                    Outcome::Invalid {
                        error: format!("worker panicked: {}", message),
                    }
                });
            OutputRecord {
                id: record.id,
                input: record.input,
                outcome,
            }
        }));
    }

    let mut records = Vec::with_capacity(total);
    for handle in handles {
        records.push(handle.await.context("Worker task failed")?);
        if config.progress_every > 0 && records.len() % config.progress_every == 0 {
            info!("Processed {}/{} records", records.len(), total);
        }
    }

    let summary = BatchSummary::from_records(&records, started_at, Utc::now());
    info!(
        "Batch complete: {} augmented ({:.1}%), {} not augmented, {} invalid in {}ms",
        summary.augmented,
        summary.augmented_pct(),
        summary.not_augmented,
        summary.invalid,
        summary.duration_ms()
    );

    Ok((records, summary))
}
