//! Concurrent backend calls for every query variant, gathered back into a
//! fixed order: variant 0 dense, variant 0 sparse, variant 1 dense, ...
//!
//! Each call runs on the blocking pool under a per-call timeout, behind a
//! semaphore whose permit is held until the blocking work itself returns,
//! so a hung backend keeps its slot. An overall deadline abandons whatever
//! is still running.

use std::sync::Arc;
use std::time::Duration;

use logsift_core::errors::LogsiftResult;
use logsift_core::models::Candidate;
use logsift_observability::tracing_setup::events;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio::task::JoinSet;
use tokio::time::{sleep, timeout};
use tracing::{debug, warn, Instrument};

use crate::search::{dense, sparse, DenseRetriever, SparseRetriever};

#[derive(Debug, Clone, Copy)]
pub(crate) struct FanOutLimits {
    pub per_call_top_k: usize,
    pub backend_timeout: Duration,
    pub deadline: Duration,
    pub max_concurrency: usize,
}

#[derive(Clone)]
enum Backend {
    Dense(DenseRetriever),
    Sparse(SparseRetriever),
}

impl Backend {
    fn name(&self) -> &'static str {
        match self {
            Self::Dense(_) => dense::BACKEND_NAME,
            Self::Sparse(_) => sparse::BACKEND_NAME,
        }
    }

    fn call(&self, text: &str, top_k: usize) -> LogsiftResult<Vec<Candidate>> {
        match self {
            Self::Dense(retriever) => retriever.try_search(text, top_k),
            Self::Sparse(retriever) => Ok(retriever.candidates(text, top_k)),
        }
    }
}

enum CallOutcome {
    Completed(Vec<Candidate>),
    Failed,
    TimedOut,
}

/// Candidate lists in fan-in order, plus per-call accounting.
#[derive(Debug, Default)]
pub(crate) struct FanIn {
    pub lists: Vec<Vec<Candidate>>,
    pub calls: usize,
    pub failed: usize,
    pub timed_out: usize,
    pub abandoned: usize,
}

/// Run dense (and sparse, when active) retrieval for every variant.
pub(crate) async fn gather(
    dense: &DenseRetriever,
    sparse: &SparseRetriever,
    variants: &[String],
    limits: FanOutLimits,
) -> FanIn {
    let mut plan: Vec<(Backend, String)> = Vec::with_capacity(variants.len() * 2);
    for variant in variants {
        plan.push((Backend::Dense(dense.clone()), variant.clone()));
        if sparse.is_available() {
            plan.push((Backend::Sparse(sparse.clone()), variant.clone()));
        }
    }

    let calls = plan.len();
    let semaphore = Arc::new(Semaphore::new(limits.max_concurrency.max(1)));
    let mut set = JoinSet::new();

    for (slot, (backend, variant)) in plan.into_iter().enumerate() {
        let semaphore = Arc::clone(&semaphore);
        set.spawn(async move {
            let Ok(permit) = semaphore.acquire_owned().await else {
                return (slot, CallOutcome::Failed);
            };
            let span = logsift_observability::backend_span!(backend.name(), variant);
            let outcome = run_call(backend, variant, permit, limits)
                .instrument(span)
                .await;
            (slot, outcome)
        });
    }

    let mut outcomes: Vec<Option<CallOutcome>> = (0..calls).map(|_| None).collect();
    let mut lost = 0;
    let mut abandoned = 0;

    let deadline = sleep(limits.deadline);
    tokio::pin!(deadline);

    loop {
        tokio::select! {
            biased;
            joined = set.join_next() => match joined {
                Some(Ok((slot, outcome))) => outcomes[slot] = Some(outcome),
                Some(Err(e)) => {
                    warn!(error = %e, "backend task failed to join");
                    lost += 1;
                }
                None => break,
            },
            _ = &mut deadline => {
                abandoned = set.len();
                events::deadline_elapsed(abandoned, limits.deadline.as_millis() as u64);
                set.abort_all();
                break;
            }
        }
    }

    let mut fan_in = FanIn {
        lists: Vec::with_capacity(calls),
        calls,
        failed: lost,
        timed_out: 0,
        abandoned,
    };
    for outcome in outcomes {
        match outcome {
            Some(CallOutcome::Completed(candidates)) => fan_in.lists.push(candidates),
            Some(CallOutcome::Failed) => {
                fan_in.failed += 1;
                fan_in.lists.push(Vec::new());
            }
            Some(CallOutcome::TimedOut) => {
                fan_in.timed_out += 1;
                fan_in.lists.push(Vec::new());
            }
            None => fan_in.lists.push(Vec::new()),
        }
    }

    debug!(
        calls = fan_in.calls,
        failed = fan_in.failed,
        timed_out = fan_in.timed_out,
        abandoned = fan_in.abandoned,
        "fan-in complete"
    );
    fan_in
}

async fn run_call(
    backend: Backend,
    variant: String,
    permit: OwnedSemaphorePermit,
    limits: FanOutLimits,
) -> CallOutcome {
    let name = backend.name();
    let text = variant.clone();
    let work = tokio::task::spawn_blocking(move || {
        let _permit = permit;
        backend.call(&text, limits.per_call_top_k)
    });

    match timeout(limits.backend_timeout, work).await {
        Ok(Ok(Ok(candidates))) => CallOutcome::Completed(candidates),
        Ok(Ok(Err(e))) => {
            events::backend_call_failed(name, &variant, &e.to_string());
            CallOutcome::Failed
        }
        Ok(Err(join_error)) => {
            events::backend_call_failed(name, &variant, &format!("backend panicked: {join_error}"));
            CallOutcome::Failed
        }
        Err(_) => {
            events::backend_timed_out(name, &variant, limits.backend_timeout.as_millis() as u64);
            CallOutcome::TimedOut
        }
    }
}
