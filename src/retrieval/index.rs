use std::cmp::Ordering;
use std::sync::Arc;

use serde::Serialize;

use crate::core::errors::ApiError;
use crate::knowledge::Chunk;
use crate::llm::LlmProvider;

/// A retrieved chunk with its similarity score (higher is better).
#[derive(Debug, Clone, Serialize)]
pub struct ScoredChunk {
    pub chunk: Chunk,
    pub score: f32,
}

/// In-memory vector index over one domain's chunks.
///
/// Owned by a single session and discarded on domain switch; nothing is
/// persisted. Queries embed with the same model the chunks were built
/// with, so scores are deterministic for identical inputs.
#[derive(Debug)]
pub struct RetrievalIndex {
    chunks: Vec<Chunk>,
    embeddings: Vec<Vec<f32>>,
    embedding_model: String,
}

impl RetrievalIndex {
    /// Embed every chunk and build the index. Any embedding failure is
    /// fatal to domain activation.
    pub async fn build(
        provider: &Arc<dyn LlmProvider>,
        chunks: Vec<Chunk>,
        embedding_model: &str,
    ) -> Result<Self, ApiError> {
        if chunks.is_empty() {
            return Ok(Self {
                chunks,
                embeddings: Vec::new(),
                embedding_model: embedding_model.to_string(),
            });
        }

        let inputs: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
        let embeddings = provider
            .embed(&inputs, embedding_model)
            .await
            .map_err(|e| ApiError::RetrievalUnavailable(e.to_string()))?;

        if embeddings.len() != chunks.len() {
            return Err(ApiError::RetrievalUnavailable(format!(
                "embedded {} of {} chunks",
                embeddings.len(),
                chunks.len()
            )));
        }

        tracing::info!(
            "built retrieval index: {} chunks, model {}",
            chunks.len(),
            embedding_model
        );

        Ok(Self {
            chunks,
            embeddings,
            embedding_model: embedding_model.to_string(),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    /// Return the `k` chunks most similar to `text`, best first.
    pub async fn query(
        &self,
        provider: &Arc<dyn LlmProvider>,
        text: &str,
        k: usize,
    ) -> Result<Vec<ScoredChunk>, ApiError> {
        if self.chunks.is_empty() || k == 0 {
            return Ok(Vec::new());
        }

        let query_embedding = provider
            .embed(&[text.to_string()], &self.embedding_model)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::Internal("provider returned no query embedding".to_string()))?;

        let mut scored: Vec<ScoredChunk> = self
            .chunks
            .iter()
            .zip(self.embeddings.iter())
            .map(|(chunk, embedding)| ScoredChunk {
                chunk: chunk.clone(),
                score: cosine_similarity(&query_embedding, embedding),
            })
            .collect();

        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        scored.truncate(k);
        Ok(scored)
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f64 = a.iter().zip(b.iter()).map(|(x, y)| (*x as f64) * (*y as f64)).sum();
    let norm_a: f64 = a.iter().map(|x| (*x as f64).powi(2)).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| (*x as f64).powi(2)).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    ((dot / (norm_a * norm_b)) as f32).clamp(-1.0, 1.0)
}
