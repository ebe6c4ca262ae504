//! Embedding providers.
//!
//! The index embeds descriptor documents and queries through the
//! [`EmbeddingProvider`] seam. The default provider is a deterministic
//! hashed term-frequency embedder: no model files, no network, identical
//! vectors for identical text on every platform.

use std::collections::HashMap;

/// Converts text into fixed-length vectors for similarity comparison.
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a single text into a vector of `dimensions()` length.
    fn embed(&self, text: &str) -> Result<Vec<f32>, anyhow::Error>;

    /// Embed a batch of texts, one vector per input.
    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, anyhow::Error> {
        texts.iter().map(|t| self.embed(t)).collect()
    }

    /// Output vector length.
    fn dimensions(&self) -> usize;

    /// Provider name for logs.
    fn name(&self) -> &str;
}

/// Default embedding dimensionality.
pub const DEFAULT_DIMENSIONS: usize = 384;

/// Deterministic hashed term-frequency embedder.
///
/// Tokenizes into lowercase alphanumeric terms, hashes each term into a
/// fixed-dimension bucket (FNV-1a), weights by in-document frequency with a
/// term-length IDF approximation, and L2-normalizes the result. Texts that
/// share vocabulary land in nearby directions, which is all the resolution
/// heuristics need from the base similarity.
#[derive(Debug, Clone)]
pub struct HashedTfEmbedder {
    dimensions: usize,
}

impl HashedTfEmbedder {
    /// Create an embedder producing vectors of the given length.
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }

    fn bucket_for(term: &str, dimensions: usize) -> usize {
        let mut hash: u64 = 0xcbf29ce484222325;
        for byte in term.as_bytes() {
            hash ^= u64::from(*byte);
            hash = hash.wrapping_mul(0x100000001b3);
        }
        (hash as usize) % dimensions
    }

    fn terms(text: &str) -> Vec<String> {
        text.split(|c: char| !c.is_alphanumeric() && c != '_')
            .filter(|term| term.len() >= 2)
            .map(str::to_lowercase)
            .collect()
    }

    fn vectorize(&self, text: &str) -> Vec<f32> {
        let terms = Self::terms(text);
        if terms.is_empty() {
            return vec![0.0; self.dimensions];
        }

        let mut frequencies: HashMap<&str, f32> = HashMap::new();
        for term in &terms {
            *frequencies.entry(term.as_str()).or_default() += 1.0;
        }

        let total = terms.len() as f32;
        let mut vector = vec![0.0f32; self.dimensions];
        for (term, count) in &frequencies {
            // Longer terms carry more signal than short (stopword-like) ones.
            let weight = (count / total) * (1.0 + (term.len() as f32).ln());
            vector[Self::bucket_for(term, self.dimensions)] += weight;
        }

        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > f32::EPSILON {
            for value in &mut vector {
                *value /= norm;
            }
        }
        vector
    }
}

impl Default for HashedTfEmbedder {
    fn default() -> Self {
        Self::new(DEFAULT_DIMENSIONS)
    }
}

impl EmbeddingProvider for HashedTfEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>, anyhow::Error> {
        Ok(self.vectorize(text))
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "hashed-tf"
    }
}
