//! Best-effort follow-up question suggestions.
//!
//! One chat call per answered question proposes up to three follow-up
//! questions. Failures are logged and yield an empty set; they never
//! affect the main answer.

use std::sync::Arc;

use crate::core::config::AppConfig;
use crate::core::errors::ApiError;
use crate::llm::{ChatMessage, ChatRequest, LlmProvider};

pub const MAX_FOLLOW_UPS: usize = 3;

const FOLLOW_UP_SYSTEM_PROMPT: &str = "You are an expert at identifying natural and relevant \
     follow-up questions based on a user's query and the provided answer. Your goal is to \
     anticipate what the user might want to know next.";

pub async fn suggest_follow_ups(
    provider: &Arc<dyn LlmProvider>,
    config: &AppConfig,
    question: &str,
    answer: &str,
) -> Vec<String> {
    match try_suggest(provider, config, question, answer).await {
        Ok(questions) => questions,
        Err(err) => {
            tracing::warn!("follow-up generation failed: {}", err);
            Vec::new()
        }
    }
}

async fn try_suggest(
    provider: &Arc<dyn LlmProvider>,
    config: &AppConfig,
    question: &str,
    answer: &str,
) -> Result<Vec<String>, ApiError> {
    let messages = vec![
        ChatMessage::system(FOLLOW_UP_SYSTEM_PROMPT),
        ChatMessage::user(build_prompt(question, answer)),
    ];

    let request = ChatRequest::new(messages).with_temperature(config.follow_up_temperature);
    let response = provider.chat(request, &config.chat_model).await?;
    Ok(parse_follow_ups(&response))
}

fn build_prompt(question: &str, answer: &str) -> String {
    format!(
        "Here is the user's question:\n\"{}\"\n\n\
         Here is the answer provided by the chatbot:\n\"{}\"\n\n\
         Based on this exchange, please generate three concise follow-up questions that the \
         user might logically ask next.\n\n\
         Return ONLY the questions, each on a new line. Do not include numbers, bullet \
         points, or any introductory text.",
        question, answer
    )
}

fn parse_follow_ups(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .take(MAX_FOLLOW_UPS)
        .collect()
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;

    struct FixedProvider {
        response: Result<&'static str, &'static str>,
    }

    #[async_trait]
    impl LlmProvider for FixedProvider {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn chat(&self, _request: ChatRequest, _model_id: &str) -> Result<String, ApiError> {
            self.response
                .map(str::to_string)
                .map_err(|e| ApiError::Internal(e.to_string()))
        }

        async fn embed(
            &self,
            _inputs: &[String],
            _model_id: &str,
        ) -> Result<Vec<Vec<f32>>, ApiError> {
            Err(ApiError::Internal("embed not scripted".to_string()))
        }
    }

    #[test]
    fn blank_lines_are_discarded() {
        let parsed = parse_follow_ups("First?\n\n  \nSecond?\nThird?\n");
        assert_eq!(parsed, vec!["First?", "Second?", "Third?"]);
    }

    #[test]
    fn at_most_three_questions_survive() {
        let parsed = parse_follow_ups("One?\nTwo?\nThree?\nFour?\nFive?");
        assert_eq!(parsed.len(), MAX_FOLLOW_UPS);
    }

    #[test]
    fn empty_response_parses_to_empty_set() {
        assert!(parse_follow_ups("").is_empty());
        assert!(parse_follow_ups("\n \n").is_empty());
    }

    #[tokio::test]
    async fn provider_failure_yields_empty_set() {
        let provider: Arc<dyn LlmProvider> = Arc::new(FixedProvider {
            response: Err("network down"),
        });
        let suggestions = suggest_follow_ups(
            &provider,
            &AppConfig::default(),
            "How much leave do I get?",
            "18 days.",
        )
        .await;
        assert!(suggestions.is_empty());
    }

    #[tokio::test]
    async fn successful_call_returns_trimmed_questions() {
        let provider: Arc<dyn LlmProvider> = Arc::new(FixedProvider {
            response: Ok("  Can leave be carried over?  \nWhat about sick leave?\n"),
        });
        let suggestions = suggest_follow_ups(
            &provider,
            &AppConfig::default(),
            "How much leave do I get?",
            "18 days.",
        )
        .await;
        assert_eq!(
            suggestions,
            vec!["Can leave be carried over?", "What about sick leave?"]
        );
    }
}
