//! Fallback responses and the injectable choice strategy
//!
//! When neither tier matches, one response is picked from a fixed pool. The
//! pick goes through a [`Selector`] so production can use real randomness
//! while tests pin it with a seed or a fixed index.

use std::sync::{Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::{Error, Result};

/// Generic acknowledgements used when no configuration overrides them
pub const DEFAULT_FALLBACK_RESPONSES: &[&str] = &[
    "That's a great question! I don't have a specific answer for it yet, but the lessons menu is a good place to look.",
    "I'm not sure about that one. Could you rephrase it or mention the technology you're asking about?",
    "Interesting! I can help with cloud services, programming languages, databases and testing. Try asking about one of those.",
    "I don't have an answer for that yet. Try the search box above to browse every answer in the knowledge base.",
];

/// Strategy for choosing an index from a non-empty range
pub trait Selector: Send + Sync {
    /// Return an index in `0..len`; `len` is always at least 1
    fn pick(&self, len: usize) -> usize;
}

/// Uniform choice from the thread-local RNG
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomSelector;

impl Selector for RandomSelector {
    fn pick(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len.max(1))
    }
}

/// Reproducible choice from a seeded RNG
#[derive(Debug)]
pub struct SeededSelector {
    rng: Mutex<StdRng>,
}

impl SeededSelector {
    /// Create a selector whose sequence is fixed by `seed`
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Selector for SeededSelector {
    fn pick(&self, len: usize) -> usize {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        rng.gen_range(0..len.max(1))
    }
}

/// Always the same index, wrapped into range
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedSelector(pub usize);

impl Selector for FixedSelector {
    fn pick(&self, len: usize) -> usize {
        self.0 % len.max(1)
    }
}

/// Fixed, non-empty pool of generic responses
#[derive(Debug, Clone)]
pub struct FallbackPool {
    responses: Vec<String>,
}

impl FallbackPool {
    /// Build a pool from configured responses
    ///
    /// # Errors
    ///
    /// Returns error if the pool is empty or holds a blank response
    pub fn new(responses: Vec<String>) -> Result<Self> {
        if responses.is_empty() {
            return Err(Error::EmptyFallbackPool);
        }
        if responses.iter().any(|r| r.trim().is_empty()) {
            return Err(Error::Config("fallback response is blank".to_string()));
        }

        Ok(Self { responses })
    }

    /// Pick one response
    #[must_use]
    pub fn select(&self, selector: &dyn Selector) -> &str {
        let index = selector.pick(self.responses.len());
        // Custom selectors may ignore the range contract
        &self.responses[index % self.responses.len()]
    }

    /// Whether `text` is one of the pool's responses
    #[must_use]
    pub fn contains(&self, text: &str) -> bool {
        self.responses.iter().any(|r| r == text)
    }

    /// Responses in configured order
    #[must_use]
    pub fn responses(&self) -> &[String] {
        &self.responses
    }
}

impl Default for FallbackPool {
    fn default() -> Self {
        Self {
            responses: DEFAULT_FALLBACK_RESPONSES
                .iter()
                .map(|r| (*r).to_string())
                .collect(),
        }
    }
}
