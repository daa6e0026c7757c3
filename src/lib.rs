//! Tutor Assist - knowledge retrieval and response engine for the help widget
//!
//! Free-form learner questions are answered from a curated knowledge base
//! without any language model:
//! - Tier 1 matches knowledge entries by tag or question prefix
//! - Tier 2 falls back to topic-level keyword rules
//! - Anything else gets a generic response from the fallback pool
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                    Interfaces                        │
//! │        CLI  │  chat REPL  │  HTTP (widget)           │
//! └────────────────────┬────────────────────────────────┘
//!                      │
//! ┌────────────────────▼────────────────────────────────┐
//! │          Conversation / ResponseScheduler            │
//! │   single in-flight turn  │  randomized delay         │
//! └────────────────────┬────────────────────────────────┘
//!                      │
//! ┌────────────────────▼────────────────────────────────┐
//! │                     Engine                           │
//! │   normalize → KB match → keyword rules → fallback    │
//! └─────────────────────────────────────────────────────┘
//! ```

pub mod api;
pub mod config;
pub mod conversation;
pub mod engine;
pub mod error;
pub mod fallback;
pub mod knowledge;
pub mod normalize;
pub mod rules;
pub mod scheduler;

pub use config::Config;
pub use conversation::{Conversation, ConversationMessage, Reply, Role};
pub use engine::{Classification, ClassificationKind, Engine};
pub use error::{Error, Result};
pub use fallback::{FallbackPool, FixedSelector, RandomSelector, SeededSelector, Selector};
pub use knowledge::{KnowledgeBase, KnowledgeEntry};
pub use rules::{KeywordRule, RuleTable};
pub use scheduler::{DelayRange, PendingResponse, ResponseScheduler};
