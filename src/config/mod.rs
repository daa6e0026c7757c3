//! Configuration management for the help assistant

pub mod file;

use std::path::PathBuf;
use std::sync::Arc;

use crate::engine::Engine;
use crate::fallback::{FallbackPool, SeededSelector};
use crate::knowledge::KnowledgeBase;
use crate::rules::RuleTable;
use crate::scheduler::{DEFAULT_MAX_DELAY_MS, DEFAULT_MIN_DELAY_MS, DelayRange, ResponseScheduler};
use crate::{Error, Result};

use self::file::TutorConfigFile;

/// Default HTTP API port
pub const DEFAULT_PORT: u16 = 18800;

/// Help assistant configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Knowledge base JSON file; the embedded table is used when unset
    pub entries_path: Option<PathBuf>,

    /// Keyword rule JSON file; the embedded table is used when unset
    pub rules_path: Option<PathBuf>,

    /// Fallback pool override
    pub fallback_responses: Option<Vec<String>>,

    /// Thinking delay range
    pub delay: DelayRange,

    /// Seed for fallback picks and delays
    pub seed: Option<u64>,

    /// HTTP API server configuration
    pub api_server: ApiServerConfig,
}

/// HTTP API server configuration
#[derive(Debug, Clone)]
pub struct ApiServerConfig {
    /// Port to listen on
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            entries_path: None,
            rules_path: None,
            fallback_responses: None,
            delay: DelayRange::default(),
            seed: None,
            api_server: ApiServerConfig { port: DEFAULT_PORT },
        }
    }
}

impl Config {
    /// Load configuration from environment and the config file
    ///
    /// # Errors
    ///
    /// Returns error if a value is malformed or the delay range is inverted
    pub fn load() -> Result<Self> {
        // env > toml > default
        let fc = file::load_config_file();
        Self::resolve(fc, |key| std::env::var(key).ok())
    }

    /// Merge a parsed config file with values from `env`
    ///
    /// # Errors
    ///
    /// Returns error if a value is malformed or the delay range is inverted
    pub fn resolve(fc: TutorConfigFile, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let entries_path = env("TUTOR_ASSIST_KB_PATH")
            .map(PathBuf::from)
            .or(fc.knowledge.entries_path);
        let rules_path = env("TUTOR_ASSIST_RULES_PATH")
            .map(PathBuf::from)
            .or(fc.knowledge.rules_path);

        let min_ms = parse_env(&env, "TUTOR_ASSIST_MIN_DELAY_MS")?
            .or(fc.responder.min_delay_ms)
            .unwrap_or(DEFAULT_MIN_DELAY_MS);
        let max_ms = parse_env(&env, "TUTOR_ASSIST_MAX_DELAY_MS")?
            .or(fc.responder.max_delay_ms)
            .unwrap_or(DEFAULT_MAX_DELAY_MS);
        let delay = DelayRange::new(min_ms, max_ms)?;

        let seed = parse_env(&env, "TUTOR_ASSIST_SEED")?.or(fc.responder.seed);

        let api_server = ApiServerConfig {
            port: parse_env(&env, "TUTOR_ASSIST_PORT")?
                .or(fc.server.port)
                .unwrap_or(DEFAULT_PORT),
        };

        Ok(Self {
            entries_path,
            rules_path,
            fallback_responses: fc.responder.fallback_responses,
            delay,
            seed,
            api_server,
        })
    }

    /// Load and validate the knowledge base, rules and fallback pool
    ///
    /// # Errors
    ///
    /// Returns error if any data source cannot be read or fails validation
    pub fn build_engine(&self) -> Result<Engine> {
        let knowledge = match &self.entries_path {
            Some(path) => KnowledgeBase::load(path)?,
            None => KnowledgeBase::embedded()?,
        };
        let rules = match &self.rules_path {
            Some(path) => RuleTable::load(path)?,
            None => RuleTable::embedded()?,
        };
        let fallback = match &self.fallback_responses {
            Some(responses) => FallbackPool::new(responses.clone())?,
            None => FallbackPool::default(),
        };

        let engine = Engine::new(knowledge, rules, fallback);
        Ok(match self.seed {
            Some(seed) => {
                tracing::debug!(seed, "using seeded selection");
                engine.with_selector(Arc::new(SeededSelector::new(seed)))
            }
            None => engine,
        })
    }

    /// Wrap `engine` in a scheduler using the configured delay
    #[must_use]
    pub fn scheduler(&self, engine: Arc<Engine>) -> ResponseScheduler {
        ResponseScheduler::new(engine, self.delay)
    }
}

fn parse_env<T: std::str::FromStr>(
    env: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<T>> {
    env(key)
        .map(|raw| {
            raw.trim()
                .parse()
                .map_err(|_| Error::Config(format!("invalid value for {key}: {raw:?}")))
        })
        .transpose()
}
