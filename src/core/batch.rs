//! Parallel batch processing
//!
//! Runs a shared [`Pipeline`] over many texts on tokio's blocking pool. The
//! number of texts in flight is bounded by a semaphore and results come back
//! in input order.

use crate::anonymization::AnonymizationStrategy;
use crate::config::PiiGuardConfig;
use crate::core::pipeline::{Pipeline, ProcessingResult};
use crate::domain::{PiiError, Result};
use std::sync::Arc;
use tokio::sync::{watch, Semaphore};

/// Default number of texts processed concurrently
pub const DEFAULT_MAX_PARALLEL: usize = 4;

/// Options for [`process_batch`]
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Anonymize each text after scanning
    pub anonymize: bool,
    /// Strategy override applied to every text
    pub strategy: Option<AnonymizationStrategy>,
    /// Upper bound on concurrently processed texts (at least 1)
    pub max_parallel: usize,
}

impl BatchOptions {
    /// Create options for a scan-only batch
    pub fn scan_only() -> Self {
        Self {
            anonymize: false,
            ..Self::default()
        }
    }

    /// Build options from the performance section of a configuration
    pub fn from_config(config: &PiiGuardConfig) -> Self {
        Self {
            max_parallel: config.performance.max_parallel,
            ..Self::default()
        }
    }

    /// Override the strategy for every text
    pub fn with_strategy(mut self, strategy: AnonymizationStrategy) -> Self {
        self.strategy = Some(strategy);
        self
    }
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            anonymize: true,
            strategy: None,
            max_parallel: DEFAULT_MAX_PARALLEL,
        }
    }
}

/// Counts over a finished batch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Texts processed without error
    pub successful: usize,
    /// Texts that failed or were cancelled
    pub failed: usize,
    /// Matches found across successful texts
    pub total_matches: usize,
    /// Error messages in input order
    pub errors: Vec<String>,
}

impl BatchSummary {
    /// Tally a result list returned by [`process_batch`]
    pub fn from_results(results: &[Result<ProcessingResult>]) -> Self {
        let mut summary = Self::default();
        for result in results {
            match result {
                Ok(processed) => {
                    summary.successful += 1;
                    summary.total_matches += processed.matches.len();
                }
                Err(e) => {
                    summary.failed += 1;
                    summary.errors.push(e.to_string());
                }
            }
        }
        summary
    }
}

/// Process texts in parallel
///
/// Each text runs through [`Pipeline::process`] on the blocking pool. At
/// most `options.max_parallel` texts are in flight at once. The returned
/// vector has one entry per input, in input order.
///
/// When `shutdown` flips to `true`, texts that have not started yet resolve
/// to [`PiiError::Cancelled`]; texts already running finish normally.
///
/// # Example
///
/// ```rust
/// use piiguard::core::batch::{process_batch, BatchOptions};
/// use piiguard::core::pipeline::Pipeline;
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pipeline = Arc::new(Pipeline::with_defaults()?);
/// let texts = vec!["mail a@b.io".to_string(), "nothing".to_string()];
///
/// let results = process_batch(pipeline, texts, BatchOptions::default(), None).await;
/// assert_eq!(results.len(), 2);
/// # Ok(())
/// # }
/// ```
pub async fn process_batch(
    pipeline: Arc<Pipeline>,
    texts: Vec<String>,
    options: BatchOptions,
    shutdown: Option<watch::Receiver<bool>>,
) -> Vec<Result<ProcessingResult>> {
    let total = texts.len();
    let semaphore = Arc::new(Semaphore::new(options.max_parallel.max(1)));
    let mut handles = Vec::with_capacity(total);

    tracing::info!(
        total,
        max_parallel = options.max_parallel,
        "Starting batch"
    );

    for (index, text) in texts.into_iter().enumerate() {
        let pipeline = Arc::clone(&pipeline);
        let semaphore = Arc::clone(&semaphore);
        let shutdown = shutdown.clone();
        let anonymize = options.anonymize;
        let strategy = options.strategy;

        handles.push(tokio::spawn(async move {
            let _permit = semaphore
                .acquire_owned()
                .await
                .map_err(|e| PiiError::Worker(e.to_string()))?;

            if shutdown.as_ref().is_some_and(|rx| *rx.borrow()) {
                tracing::debug!(index, "Skipping text after shutdown signal");
                return Err(PiiError::Cancelled);
            }

            tokio::task::spawn_blocking(move || pipeline.process(&text, anonymize, strategy))
                .await
                .map_err(|e| PiiError::Worker(format!("text {index}: {e}")))?
        }));
    }

    let mut results = Vec::with_capacity(total);
    for handle in handles {
        let result = match handle.await {
            Ok(result) => result,
            Err(e) => Err(PiiError::Worker(e.to_string())),
        };
        if let Err(e) = &result {
            tracing::warn!(error = %e, "Batch item failed");
        }
        results.push(result);
    }

    let summary = BatchSummary::from_results(&results);
    tracing::info!(
        successful = summary.successful,
        failed = summary.failed,
        matches = summary.total_matches,
        "Batch complete"
    );

    results
}
