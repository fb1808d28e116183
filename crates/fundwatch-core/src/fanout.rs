//! Bounded fan-out over many fund codes.
//!
//! One task is spawned per code. A counting semaphore of size
//! [`FanOutPolicy::max_concurrency`] gates admission: the dispatcher waits for
//! a free permit before spawning the next task, and the permit is released
//! when that task ends. Successes are published to an mpsc collector drained
//! once every task has finished; failures go to an [`ErrorLatch`] that keeps
//! only the first one.

use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::{mpsc, Semaphore};
use tokio::time::Instant;
use tracing::{debug, error, info, warn, Instrument};

use crate::data_source::{FetchOutcome, ValuationSource};
use crate::{FetchError, FetchErrorKind, FundCode, FundEstimate, ValidationError};

pub const DEFAULT_MAX_CONCURRENCY: usize = 3;

/// Admission limits for one fan-out run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FanOutPolicy {
    max_concurrency: usize,
}

impl FanOutPolicy {
    pub fn new(max_concurrency: usize) -> Result<Self, ValidationError> {
        if max_concurrency == 0 {
            return Err(ValidationError::ZeroConcurrency);
        }
        Ok(Self { max_concurrency })
    }

    pub const fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }
}

impl Default for FanOutPolicy {
    fn default() -> Self {
        Self {
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
        }
    }
}

/// Single-slot error holder: the first offer wins, later offers are dropped.
#[derive(Debug, Default)]
pub struct ErrorLatch {
    slot: Mutex<Option<FetchError>>,
}

impl ErrorLatch {
    /// Stores `error` if the slot is empty. Returns whether it was stored.
    pub fn offer(&self, error: FetchError) -> bool {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.is_some() {
            debug!(%error, "dropping fetch error, latch already holds one");
            return false;
        }
        *slot = Some(error);
        true
    }

    pub fn is_set(&self) -> bool {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    pub fn take(&self) -> Option<FetchError> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }
}

/// Collected estimates, ascending by growth, plus the first failure if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregated {
    estimates: Vec<FundEstimate>,
    error: Option<FetchError>,
}

impl Aggregated {
    pub fn estimates(&self) -> &[FundEstimate] {
        &self.estimates
    }

    pub fn error(&self) -> Option<&FetchError> {
        self.error.as_ref()
    }

    pub fn into_parts(self) -> (Vec<FundEstimate>, Option<FetchError>) {
        (self.estimates, self.error)
    }

    /// Treats any captured failure as fatal, discarding partial results.
    pub fn into_result(self) -> Result<Vec<FundEstimate>, FetchError> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.estimates),
        }
    }
}

/// Fan-out aggregator over a shared valuation source.
#[derive(Clone)]
pub struct FanOut {
    source: Arc<dyn ValuationSource>,
    policy: FanOutPolicy,
}

impl FanOut {
    pub fn new(source: Arc<dyn ValuationSource>, policy: FanOutPolicy) -> Self {
        Self { source, policy }
    }

    pub const fn policy(&self) -> FanOutPolicy {
        self.policy
    }

    /// Fetches every non-empty code with at most `max_concurrency` requests in flight.
    ///
    /// Blank codes are skipped without counting as failures. Codes that fail
    /// validation are offered to the error latch and never dispatched. Every
    /// fetch is bounded by `deadline`; expiry fails each affected code on its
    /// own rather than aborting the run.
    pub async fn fetch_all<I, S>(&self, codes: I, deadline: Instant) -> Aggregated
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let gate = Arc::new(Semaphore::new(self.policy.max_concurrency()));
        let latch = Arc::new(ErrorLatch::default());
        let (found_tx, mut found_rx) = mpsc::unbounded_channel::<FundEstimate>();
        let mut handles = Vec::new();

        for raw in codes {
            let raw = raw.as_ref().trim();
            if raw.is_empty() {
                continue;
            }

            let code = match FundCode::parse(raw) {
                Ok(code) => code,
                Err(validation) => {
                    warn!(code = raw, %validation, "skipping invalid fund code");
                    latch.offer(FetchError::new(raw, FetchErrorKind::InvalidCode(validation)));
                    continue;
                }
            };

            // The gate is owned by this call and never closed.
            let Ok(permit) = Arc::clone(&gate).acquire_owned().await else {
                break;
            };

            let source = Arc::clone(&self.source);
            let latch = Arc::clone(&latch);
            let found_tx = found_tx.clone();
            let task_code = code.clone();
            let handle = tokio::spawn(
                async move {
                    let _permit = permit;
                    match fetch_one(source.as_ref(), &task_code, deadline).await {
                        FetchOutcome::Estimate(estimate) => {
                            let _ = found_tx.send(estimate);
                        }
                        FetchOutcome::Failed(error) => {
                            warn!(%error, "fetch failed");
                            latch.offer(error);
                        }
                    }
                }
                .in_current_span(),
            );
            handles.push((code, handle));
        }
        drop(found_tx);

        let dispatched = handles.len();
        for (code, handle) in handles {
            if let Err(join_error) = handle.await {
                error!(%code, %join_error, "fetch task did not complete");
                latch.offer(FetchError::new(
                    code.as_str(),
                    FetchErrorKind::TaskFailed(join_error.to_string()),
                ));
            }
        }

        let mut estimates = Vec::with_capacity(dispatched);
        while let Some(estimate) = found_rx.recv().await {
            estimates.push(estimate);
        }
        sort_by_growth(&mut estimates);

        let error = latch.take();
        info!(
            dispatched,
            collected = estimates.len(),
            failed = error.is_some(),
            "fan-out complete"
        );

        Aggregated { estimates, error }
    }
}

/// Runs one fetch against the shared deadline.
pub async fn fetch_one(
    source: &dyn ValuationSource,
    code: &FundCode,
    deadline: Instant,
) -> FetchOutcome {
    if Instant::now() >= deadline {
        return FetchOutcome::Failed(FetchError::deadline_exceeded(code));
    }

    match tokio::time::timeout_at(deadline, source.estimate(code)).await {
        Ok(result) => result.into(),
        Err(_) => FetchOutcome::Failed(FetchError::deadline_exceeded(code)),
    }
}

/// Stable ascending sort by estimated growth.
pub fn sort_by_growth(estimates: &mut [FundEstimate]) {
    estimates.sort_by_key(FundEstimate::growth);
}
