//! # intent-engine
//!
//! Embedding-backed intent resolution: maps a free-text request ("open
//! calculator", "show CPU usage") to exactly one registered capability.
//!
//! The engine indexes capability descriptors as vector embeddings,
//! augments each query with recent session context, retrieves the top-K
//! nearest descriptors, and applies a deterministic scoring/tie-break
//! protocol to pick the single best match. Execution is a thin boundary:
//! the caller invokes the chosen capability through the [`Executor`] and
//! reports the outcome back into session memory.
//!
//! ```no_run
//! use std::sync::Arc;
//! use intent_engine::{EngineConfig, Executor, InMemoryCatalog, IntentEngine};
//!
//! # fn main() -> Result<(), intent_engine::ResolveError> {
//! let catalog = Arc::new(InMemoryCatalog::builtin());
//! let engine = IntentEngine::new(catalog.clone(), EngineConfig::default())?;
//! let executor = Executor::new(catalog);
//!
//! let matched = engine.resolve("Open calculator", None)?;
//! let params = IntentEngine::extract_parameters("Open calculator", &matched.descriptor);
//! let outcome = executor.execute(&matched.name, &params);
//! engine.report_outcome("Open calculator", &matched.name, &outcome.summary(), None);
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod config;
pub mod errors;
pub mod executor;
pub mod index;
pub mod logging;
pub mod memory;
pub mod resolver;
pub mod scoring;

pub use catalog::{CapabilityCatalog, CapabilityDescriptor, Category, InMemoryCatalog};
pub use config::EngineConfig;
pub use errors::ResolveError;
pub use executor::{CapabilityAction, ExecutionOutcome, Executor};
pub use index::{EmbeddingIndex, EmbeddingProvider, HashedTfEmbedder};
pub use memory::{InteractionRecord, SessionMemory};
pub use resolver::{CandidateMatch, IntentEngine};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
