//! Explicit per-session state: landing vs. one active domain.
//!
//! A session owns at most one active domain at a time. Selecting a
//! domain builds the corpus, index and conversation synchronously and
//! commits the transition only on full success; activation failure
//! leaves the prior state untouched. "Back" and domain switches discard
//! every artifact of the previous domain.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde::Serialize;
use tokio::sync::Mutex as AsyncMutex;

use crate::chat::{suggest_follow_ups, Conversation};
use crate::core::config::AppConfig;
use crate::core::errors::ApiError;
use crate::domains::DomainSpec;
use crate::knowledge::{assemble_corpus, extract_pdf_text, load_json_facts, Chunker};
use crate::llm::LlmProvider;
use crate::retrieval::RetrievalIndex;
use crate::state::AppState;

#[derive(Debug, Clone, Serialize)]
pub struct TranscriptMessage {
    pub role: String,
    pub content: String,
    /// Verbatim text of the chunks cited for an assistant message.
    pub sources: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AskOutcome {
    pub answer: String,
    pub sources: Vec<String>,
    pub follow_ups: Vec<String>,
}

/// Everything owned on behalf of one selected domain. Dropped wholesale
/// on "back" or domain switch.
pub struct ActiveDomain {
    pub spec: DomainSpec,
    pub index: RetrievalIndex,
    pub conversation: Conversation,
    pub transcript: Vec<TranscriptMessage>,
    pub follow_ups: Vec<String>,
}

impl ActiveDomain {
    /// Chunk the corpus and build the retrieval artifacts for `spec`.
    pub async fn prepare(
        provider: &Arc<dyn LlmProvider>,
        config: &AppConfig,
        spec: DomainSpec,
        corpus: &str,
    ) -> Result<Self, ApiError> {
        let chunker = Chunker::new(config.chunk_size, config.chunk_overlap);
        let chunks = chunker.split(corpus);
        let index = RetrievalIndex::build(provider, chunks, &config.embedding_model).await?;

        Ok(Self {
            spec,
            index,
            conversation: Conversation::new(config.memory_window),
            transcript: Vec::new(),
            follow_ups: Vec::new(),
        })
    }
}

pub struct Session {
    pub id: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    active: Option<ActiveDomain>,
}

impl Session {
    fn new(id: String) -> Self {
        Self {
            id,
            created_at: chrono::Utc::now(),
            active: None,
        }
    }

    pub fn active(&self) -> Option<&ActiveDomain> {
        self.active.as_ref()
    }

    /// Activate `slug`: load PDF and JSON facts, assemble the corpus,
    /// build the index, start a fresh conversation. Runs the whole
    /// sequence before committing; on any failure the session keeps its
    /// prior state. Re-selecting a domain rebuilds everything.
    pub async fn select_domain(&mut self, state: &AppState, slug: &str) -> Result<(), ApiError> {
        let spec = state
            .catalog
            .get(slug)
            .ok_or_else(|| ApiError::NotFound(format!("unknown domain: {}", slug)))?
            .clone();

        let pdf_path = state.paths.knowledge_dir.join(spec.pdf_file);
        let pdf_text = state.knowledge.load_with(&pdf_path, extract_pdf_text)?;

        let json_path = state.paths.knowledge_dir.join(spec.json_file);
        let json_text = state.knowledge.load_with(&json_path, load_json_facts)?;

        let corpus = assemble_corpus(&pdf_text, &json_text);
        let active =
            ActiveDomain::prepare(&state.provider, &state.config, spec, &corpus).await?;

        tracing::info!(
            session = %self.id,
            domain = slug,
            chunks = active.index.len(),
            "domain activated"
        );
        self.active = Some(active);
        Ok(())
    }

    /// Answer one question in the active domain, then refresh the
    /// follow-up set. A failed turn leaves transcript, memory and
    /// follow-ups untouched.
    pub async fn ask(&mut self, state: &AppState, question: &str) -> Result<AskOutcome, ApiError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(ApiError::BadRequest("question must not be empty".to_string()));
        }

        let active = self
            .active
            .as_mut()
            .ok_or_else(|| ApiError::BadRequest("no active domain".to_string()))?;

        let answer = active
            .conversation
            .ask(&state.provider, &active.index, &state.config, question)
            .await?;

        let follow_ups =
            suggest_follow_ups(&state.provider, &state.config, question, &answer.text).await;

        let sources: Vec<String> = answer.sources.iter().map(|c| c.text.clone()).collect();
        active.transcript.push(TranscriptMessage {
            role: "user".to_string(),
            content: question.to_string(),
            sources: Vec::new(),
        });
        active.transcript.push(TranscriptMessage {
            role: "assistant".to_string(),
            content: answer.text.clone(),
            sources: sources.clone(),
        });
        active.follow_ups = follow_ups.clone();

        Ok(AskOutcome {
            answer: answer.text,
            sources,
            follow_ups,
        })
    }

    /// Return to the landing state, discarding the active domain's
    /// index, conversation and follow-ups.
    pub fn back(&mut self) {
        if let Some(active) = self.active.take() {
            tracing::info!(session = %self.id, domain = active.spec.slug, "back to landing");
        }
    }

    #[cfg(test)]
    fn set_active(&mut self, active: ActiveDomain) {
        self.active = Some(active);
    }
}

/// Registry of live sessions. Each session sits behind its own async
/// mutex so its operations are serialized without blocking the others.
#[derive(Default)]
pub struct SessionManager {
    sessions: Mutex<HashMap<String, Arc<AsyncMutex<Session>>>>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&self) -> Result<String, ApiError> {
        let id = uuid::Uuid::new_v4().to_string();
        let session = Arc::new(AsyncMutex::new(Session::new(id.clone())));
        self.sessions
            .lock()
            .map_err(|_| ApiError::Internal("session registry lock poisoned".to_string()))?
            .insert(id.clone(), session);
        Ok(id)
    }

    pub fn get(&self, id: &str) -> Result<Arc<AsyncMutex<Session>>, ApiError> {
        self.sessions
            .lock()
            .map_err(|_| ApiError::Internal("session registry lock poisoned".to_string()))?
            .get(id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("session not found: {}", id)))
    }

    pub fn remove(&self, id: &str) -> Result<(), ApiError> {
        let removed = self
            .sessions
            .lock()
            .map_err(|_| ApiError::Internal("session registry lock poisoned".to_string()))?
            .remove(id);
        if removed.is_none() {
            return Err(ApiError::NotFound(format!("session not found: {}", id)));
        }
        Ok(())
    }
}
