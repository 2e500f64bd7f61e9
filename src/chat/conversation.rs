//! Retrieval-augmented conversation over one domain's index.
//!
//! Each question retrieves the top-k chunks, composes a prompt of
//! excerpts, a sliding window of prior exchanges, and the question,
//! then calls the chat model. Memory is bounded to the last
//! `memory_window` exchanges and is only updated on success.

use std::collections::VecDeque;
use std::sync::Arc;

use crate::core::config::AppConfig;
use crate::core::errors::ApiError;
use crate::knowledge::Chunk;
use crate::llm::{ChatMessage, ChatRequest, LlmProvider};
use crate::retrieval::RetrievalIndex;

/// Answer returned when the domain corpus produced no chunks. The
/// model is not called in that case.
pub const NO_CONTEXT_ANSWER: &str =
    "I couldn't find any information in this domain's knowledge base to answer that. \
     Please try another domain or contact HR directly.";

const SYSTEM_PROMPT: &str = "You are an HR assistant. Answer the employee's question using \
     only the knowledge base excerpts below. If the excerpts do not contain the answer, \
     say that the information is not available rather than guessing.";

#[derive(Debug, Clone)]
pub struct Exchange {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone)]
pub struct Answer {
    pub text: String,
    /// Chunks retrieved for this question, best first. They are cited
    /// verbatim as sources, whether or not the answer quotes them.
    pub sources: Vec<Chunk>,
}

pub struct Conversation {
    memory: VecDeque<Exchange>,
    window: usize,
}

impl Conversation {
    pub fn new(window: usize) -> Self {
        Self {
            memory: VecDeque::new(),
            window: window.max(1),
        }
    }

    pub fn exchange_count(&self) -> usize {
        self.memory.len()
    }

    pub async fn ask(
        &mut self,
        provider: &Arc<dyn LlmProvider>,
        index: &RetrievalIndex,
        config: &AppConfig,
        question: &str,
    ) -> Result<Answer, ApiError> {
        if index.is_empty() {
            let answer = Answer {
                text: NO_CONTEXT_ANSWER.to_string(),
                sources: Vec::new(),
            };
            self.remember(question, &answer.text);
            return Ok(answer);
        }

        let retrieved = index
            .query(provider, question, config.top_k)
            .await
            .map_err(|e| ApiError::AnswerGeneration(e.to_string()))?;

        let sources: Vec<Chunk> = retrieved.into_iter().map(|s| s.chunk).collect();
        let messages = self.build_messages(&sources, question);

        let text = provider
            .chat(ChatRequest::new(messages), &config.chat_model)
            .await
            .map_err(|e| ApiError::AnswerGeneration(e.to_string()))?;

        self.remember(question, &text);
        Ok(Answer { text, sources })
    }

    fn build_messages(&self, sources: &[Chunk], question: &str) -> Vec<ChatMessage> {
        let mut context = String::from(SYSTEM_PROMPT);
        context.push_str("\n\nKnowledge base excerpts:\n");
        for (i, chunk) in sources.iter().enumerate() {
            context.push_str(&format!("[{}] {}\n\n", i + 1, chunk.text));
        }

        let mut messages = vec![ChatMessage::system(context.trim_end())];
        for exchange in &self.memory {
            messages.push(ChatMessage::user(exchange.question.clone()));
            messages.push(ChatMessage::assistant(exchange.answer.clone()));
        }
        messages.push(ChatMessage::user(question));
        messages
    }

    fn remember(&mut self, question: &str, answer: &str) {
        self.memory.push_back(Exchange {
            question: question.to_string(),
            answer: answer.to_string(),
        });
        while self.memory.len() > self.window {
            self.memory.pop_front();
        }
    }
}
