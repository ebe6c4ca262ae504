//! Intent resolution — orchestrates context, retrieval, scoring, and
//! tie-breaking to pick the single best-matching capability.
//!
//! The engine owns its embedding index and session memories and is
//! constructed once per process; no ambient global state. Resolution is
//! stateless per call and safe to run concurrently.

use std::collections::BTreeMap;
use std::sync::Arc;

use dashmap::DashMap;

use crate::catalog::{CapabilityCatalog, CapabilityDescriptor, Category};
use crate::config::EngineConfig;
use crate::errors::ResolveError;
use crate::index::{EmbeddingIndex, EmbeddingProvider, HashedTfEmbedder};
use crate::memory::{InteractionRecord, SessionMemory};
use crate::scoring::{
    self, APPLICATION_CONTROL_KEYWORDS, SYSTEM_MONITORING_KEYWORDS,
};

const DEFAULT_SESSION: &str = "default";

/// A scored candidate produced by one resolution call.
///
/// Holds an owned descriptor clone, so the result stays valid even if the
/// catalog mutates after the call returns.
#[derive(Debug, Clone)]
pub struct CandidateMatch {
    /// The capability's stable name.
    pub name: String,
    /// Similarity derived from index distance (`1 − distance`).
    pub base_similarity: f32,
    /// Score after the relevance heuristics.
    pub adjusted_score: f32,
    /// The capability's descriptor at resolution time.
    pub descriptor: CapabilityDescriptor,
}

/// The intent resolution engine.
pub struct IntentEngine {
    catalog: Arc<dyn CapabilityCatalog>,
    index: EmbeddingIndex,
    sessions: DashMap<String, Arc<SessionMemory>>,
    config: EngineConfig,
}

impl IntentEngine {
    /// Build an engine over the given catalog with the default embedding
    /// provider, indexing the current descriptor set.
    pub fn new(
        catalog: Arc<dyn CapabilityCatalog>,
        config: EngineConfig,
    ) -> Result<Self, ResolveError> {
        let embedder: Arc<dyn EmbeddingProvider> =
            Arc::new(HashedTfEmbedder::new(config.embedding_dimensions));
        Self::with_embedder(catalog, embedder, config)
    }

    /// Build an engine with a caller-supplied embedding provider.
    pub fn with_embedder(
        catalog: Arc<dyn CapabilityCatalog>,
        embedder: Arc<dyn EmbeddingProvider>,
        config: EngineConfig,
    ) -> Result<Self, ResolveError> {
        let engine = Self {
            catalog,
            index: EmbeddingIndex::new(embedder),
            sessions: DashMap::new(),
            config,
        };
        engine.on_catalog_changed()?;
        Ok(engine)
    }

    /// Rebuild the embedding index from the catalog's current descriptors.
    ///
    /// Must be called after any catalog mutation; once it returns, every
    /// subsequent `resolve` observes the new capability set.
    pub fn on_catalog_changed(&self) -> Result<(), ResolveError> {
        let documents: Vec<_> = self
            .catalog
            .list_descriptors()
            .iter()
            .map(CapabilityDescriptor::to_document)
            .collect();
        self.index.rebuild(&documents)
    }

    fn session(&self, session_id: Option<&str>) -> Arc<SessionMemory> {
        let key = session_id.unwrap_or(DEFAULT_SESSION);
        self.sessions
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(SessionMemory::new()))
            .clone()
    }

    /// Resolve a prompt to the single best-matching capability.
    ///
    /// Selection order, first rule that yields a candidate wins (ties
    /// always break by retrieval order, i.e. lower index distance first):
    /// exact example match, partial example match, the configured general
    /// system capability for system-monitoring queries, any
    /// "Application Control" candidate for application-control queries,
    /// then highest adjusted score (subject to the configured floor).
    pub fn resolve(
        &self,
        prompt: &str,
        session_id: Option<&str>,
    ) -> Result<CandidateMatch, ResolveError> {
        let context = self.session(session_id).context_for(prompt);
        let hits = self.index.query(&context, self.config.top_k)?;
        if hits.is_empty() {
            return Err(ResolveError::NotFound);
        }

        let mut candidates: Vec<CandidateMatch> = Vec::with_capacity(hits.len());
        for hit in hits {
            // The descriptor can vanish if the catalog mutated since the
            // last rebuild; drop the candidate rather than score stale data.
            let Some(descriptor) = self.catalog.descriptor(&hit.name) else {
                log::warn!("candidate '{}' no longer in catalog, skipping", hit.name);
                continue;
            };
            let base_similarity = 1.0 - hit.distance;
            let adjusted_score = scoring::adjusted_score(prompt, base_similarity, &descriptor);
            candidates.push(CandidateMatch {
                name: hit.name,
                base_similarity,
                adjusted_score,
                descriptor,
            });
        }
        if candidates.is_empty() {
            return Err(ResolveError::NotFound);
        }

        let selected = self.select(prompt, &candidates)?;
        log::debug!(
            "resolved '{}' -> '{}' (base {:.3}, adjusted {:.3})",
            prompt,
            selected.name,
            selected.base_similarity,
            selected.adjusted_score
        );
        Ok(selected)
    }

    fn select(
        &self,
        prompt: &str,
        candidates: &[CandidateMatch],
    ) -> Result<CandidateMatch, ResolveError> {
        if let Some(candidate) = candidates
            .iter()
            .find(|c| scoring::exact_example_match(prompt, &c.descriptor))
        {
            return Ok(candidate.clone());
        }

        if let Some(candidate) = candidates
            .iter()
            .find(|c| scoring::partial_example_match(prompt, &c.descriptor))
        {
            return Ok(candidate.clone());
        }

        if scoring::has_any_keyword(prompt, SYSTEM_MONITORING_KEYWORDS) {
            if let Some(candidate) = candidates
                .iter()
                .find(|c| c.name == self.config.general_system_capability)
            {
                return Ok(candidate.clone());
            }
        }

        if scoring::has_any_keyword(prompt, APPLICATION_CONTROL_KEYWORDS) {
            if let Some(candidate) = candidates
                .iter()
                .find(|c| c.descriptor.category == Category::ApplicationControl)
            {
                return Ok(candidate.clone());
            }
        }

        // Highest adjusted score; a strict comparison keeps the earliest
        // (lowest-distance) candidate on ties.
        let mut best = &candidates[0];
        for candidate in &candidates[1..] {
            if candidate.adjusted_score > best.adjusted_score {
                best = candidate;
            }
        }

        if let Some(floor) = self.config.score_floor {
            if best.adjusted_score < floor {
                return Err(ResolveError::NotFound);
            }
        }
        Ok(best.clone())
    }

    /// Async resolution bounded by the configured timeout.
    ///
    /// The embedding/query step runs on the blocking pool; exceeding the
    /// bound surfaces [`ResolveError::Timeout`] instead of blocking the
    /// caller indefinitely.
    pub async fn aresolve(
        self: &Arc<Self>,
        prompt: &str,
        session_id: Option<&str>,
    ) -> Result<CandidateMatch, ResolveError> {
        let engine = Arc::clone(self);
        let prompt = prompt.to_string();
        let session = session_id.map(str::to_string);
        let timeout = self.config.timeout();

        let task =
            tokio::task::spawn_blocking(move || engine.resolve(&prompt, session.as_deref()));
        match tokio::time::timeout(timeout, task).await {
            Ok(Ok(result)) => result,
            Ok(Err(join_error)) => Err(ResolveError::Embedding {
                message: format!("resolution task failed: {join_error}"),
            }),
            Err(_) => Err(ResolveError::Timeout {
                elapsed_ms: timeout.as_millis() as u64,
            }),
        }
    }

    /// Record an execution outcome in session memory.
    ///
    /// Idempotent to retry from the engine's perspective; a duplicate
    /// append only ages the FIFO faster.
    pub fn report_outcome(
        &self,
        prompt: &str,
        capability_name: &str,
        result_summary: &str,
        session_id: Option<&str>,
    ) {
        self.session(session_id)
            .append(InteractionRecord::new(prompt, capability_name, result_summary));
    }

    /// Copy of a session's retained history, oldest first.
    pub fn session_history(&self, session_id: Option<&str>) -> Vec<InteractionRecord> {
        self.session(session_id).snapshot()
    }

    /// Best-effort parameter extraction from a prompt.
    ///
    /// For each declared parameter name found in the lower-cased prompt,
    /// takes the token that follows it. A convenience for callers feeding
    /// the executor; not guaranteed correct and never applied implicitly.
    pub fn extract_parameters(
        prompt: &str,
        descriptor: &CapabilityDescriptor,
    ) -> BTreeMap<String, String> {
        let prompt_lower = prompt.to_lowercase();
        let mut params = BTreeMap::new();
        for name in descriptor.parameters.keys() {
            let needle = name.to_lowercase();
            if let Some(position) = prompt_lower.find(&needle) {
                let rest = &prompt_lower[position + needle.len()..];
                if let Some(value) = rest.split_whitespace().next() {
                    params.insert(name.clone(), value.to_string());
                }
            }
        }
        params
    }
}
