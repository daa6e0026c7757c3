//! Response scheduling with a simulated thinking delay
//!
//! A dispatched turn runs on its own Tokio task: the classification is
//! computed up front, then held back for a randomized delay before it is
//! delivered. Dropping the handle does not cancel the turn.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::engine::{Classification, Engine};
use crate::fallback::Selector;
use crate::{Error, Result};

/// Default lower bound of the thinking delay
pub const DEFAULT_MIN_DELAY_MS: u64 = 1000;

/// Default upper bound of the thinking delay
pub const DEFAULT_MAX_DELAY_MS: u64 = 2000;

/// Longest thinking delay a range may ask for
pub const MAX_DELAY_MS: u64 = 60_000;

/// Inclusive range the thinking delay is drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayRange {
    min_ms: u64,
    max_ms: u64,
}

impl DelayRange {
    /// Build a delay range
    ///
    /// # Errors
    ///
    /// Returns error if `min_ms > max_ms` or `max_ms` exceeds [`MAX_DELAY_MS`]
    pub fn new(min_ms: u64, max_ms: u64) -> Result<Self> {
        if min_ms > max_ms {
            return Err(Error::InvalidDelayRange { min_ms, max_ms });
        }
        if max_ms > MAX_DELAY_MS {
            return Err(Error::Config(format!(
                "delay upper bound {max_ms}ms exceeds {MAX_DELAY_MS}ms"
            )));
        }
        Ok(Self { min_ms, max_ms })
    }

    /// Zero delay, for scripted callers and tests
    #[must_use]
    pub const fn immediate() -> Self {
        Self { min_ms: 0, max_ms: 0 }
    }

    /// Lower bound in milliseconds
    #[must_use]
    pub const fn min_ms(&self) -> u64 {
        self.min_ms
    }

    /// Upper bound in milliseconds
    #[must_use]
    pub const fn max_ms(&self) -> u64 {
        self.max_ms
    }

    /// Draw a delay from the range
    #[must_use]
    pub fn sample(&self, selector: &dyn Selector) -> Duration {
        // Bounded by MAX_DELAY_MS, so the span always fits in usize
        let span = self.max_ms - self.min_ms;
        let offset = usize::try_from(span + 1)
            .ok()
            .and_then(|len| u64::try_from(selector.pick(len)).ok())
            .unwrap_or(0);
        Duration::from_millis(self.min_ms + offset.min(span))
    }
}

impl Default for DelayRange {
    fn default() -> Self {
        Self {
            min_ms: DEFAULT_MIN_DELAY_MS,
            max_ms: DEFAULT_MAX_DELAY_MS,
        }
    }
}

/// A dispatched turn waiting out its delay
#[derive(Debug)]
pub struct PendingResponse<T = Classification> {
    handle: JoinHandle<T>,
    delay: Duration,
}

impl<T> PendingResponse<T> {
    /// Delay chosen for this turn
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Wait until the response is delivered
    ///
    /// # Errors
    ///
    /// Returns error if the turn's task panicked or the runtime shut down
    pub async fn wait(self) -> Result<T> {
        self.handle
            .await
            .map_err(|e| Error::Scheduler(e.to_string()))
    }
}

/// Wraps the engine behind a randomized delay
#[derive(Clone)]
pub struct ResponseScheduler {
    engine: Arc<Engine>,
    delay: DelayRange,
    selector: Arc<dyn Selector>,
}

impl std::fmt::Debug for ResponseScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseScheduler")
            .field("engine", &self.engine)
            .field("delay", &self.delay)
            .finish_non_exhaustive()
    }
}

impl ResponseScheduler {
    /// Create a scheduler sharing the engine's selection strategy
    #[must_use]
    pub fn new(engine: Arc<Engine>, delay: DelayRange) -> Self {
        let selector = engine.selector();
        Self {
            engine,
            delay,
            selector,
        }
    }

    /// Replace the strategy used to draw delays
    #[must_use]
    pub fn with_selector(mut self, selector: Arc<dyn Selector>) -> Self {
        self.selector = selector;
        self
    }

    /// Engine this scheduler answers with
    #[must_use]
    pub const fn engine(&self) -> &Arc<Engine> {
        &self.engine
    }

    /// Configured delay range
    #[must_use]
    pub const fn delay_range(&self) -> DelayRange {
        self.delay
    }

    /// Classify `input` and deliver the result after the delay
    ///
    /// Returns `None` for blank input; nothing is scheduled in that case.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime
    #[must_use]
    pub fn dispatch(&self, input: &str) -> Option<PendingResponse> {
        self.dispatch_then(input, |classification| classification)
    }

    /// Like [`dispatch`](Self::dispatch), running `then` on the result once
    /// the delay has elapsed
    ///
    /// `then` runs on the turn's task, so it still runs if the returned
    /// handle is dropped.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime
    pub fn dispatch_then<T, F>(&self, input: &str, then: F) -> Option<PendingResponse<T>>
    where
        T: Send + 'static,
        F: FnOnce(Classification) -> T + Send + 'static,
    {
        let classification = self.engine.classify(input)?;
        let delay = self.delay.sample(self.selector.as_ref());

        tracing::debug!(
            kind = %classification.kind(),
            ?delay,
            "scheduled response"
        );

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            then(classification)
        });

        Some(PendingResponse { handle, delay })
    }

    /// Classify `input` and wait out the delay
    ///
    /// # Errors
    ///
    /// Returns error if the scheduled task fails
    pub async fn respond(&self, input: &str) -> Result<Option<Classification>> {
        match self.dispatch(input) {
            Some(pending) => pending.wait().await.map(Some),
            None => Ok(None),
        }
    }
}
