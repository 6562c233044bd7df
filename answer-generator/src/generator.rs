use std::{sync::Arc, time::Instant};

use ai_llm_service::CompletionClient;
use crm_source::AccountRecord;
use tracing::{debug, info};

use crate::{
    error::AnswerError,
    prompt::{SYSTEM_PROMPT, build_user_prompt, render_context},
};

/// Turns a question plus CRM records into a model answer.
///
/// Stateless apart from the shared completion client; clone freely.
#[derive(Clone)]
pub struct AnswerGenerator {
    client: Arc<dyn CompletionClient>,
}

impl AnswerGenerator {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self { client }
    }

    /// Renders the prompt, requests one completion and returns it trimmed.
    ///
    /// # Errors
    /// Propagates every completion failure as [`AnswerError::Llm`].
    pub async fn generate(
        &self,
        question: &str,
        records: &[AccountRecord],
    ) -> Result<String, AnswerError> {
        let started = Instant::now();
        let context = render_context(records);
        let user_prompt = build_user_prompt(question, &context);

        debug!(
            records = records.len(),
            prompt_len = user_prompt.len(),
            "requesting support answer"
        );

        let raw = self.client.complete(SYSTEM_PROMPT, &user_prompt).await?;
        let answer = raw.trim().to_string();

        info!(
            records = records.len(),
            answer_len = answer.len(),
            latency_ms = started.elapsed().as_millis(),
            "support answer generated"
        );

        Ok(answer)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use ai_llm_service::{
        AiLlmError, ProviderError, ProviderErrorKind, error_handler::Provider,
    };
    use async_trait::async_trait;

    use super::*;

    /// Records the prompts it receives and answers with a canned reply.
    struct Canned {
        reply: Result<String, ()>,
        seen: Mutex<Vec<(String, String)>>,
    }

    impl Canned {
        fn ok(reply: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(reply.to_string()),
                seen: Mutex::new(Vec::new()),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                reply: Err(()),
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl CompletionClient for Canned {
        async fn complete(&self, system: &str, user: &str) -> Result<String, AiLlmError> {
            self.seen
                .lock()
                .unwrap()
                .push((system.to_string(), user.to_string()));
            match &self.reply {
                Ok(s) => Ok(s.clone()),
                Err(()) => Err(ProviderError::new(
                    Provider::OpenAI,
                    ProviderErrorKind::EmptyChoices,
                )
                .into()),
            }
        }
    }

    #[tokio::test]
    async fn sends_fixed_system_prompt_and_trims_answer() {
        let client = Canned::ok("\n  We serve Energy and Manufacturing.  \n");
        let generator = AnswerGenerator::new(client.clone());

        let records = vec![
            AccountRecord::new("Acme Corp", "Energy", "+1-555-0100"),
            AccountRecord::new("Globex", "Manufacturing", "+1-555-0200"),
        ];
        let answer = generator
            .generate("What industries do we serve?", &records)
            .await
            .unwrap();

        assert_eq!(answer, "We serve Energy and Manufacturing.");

        let seen = client.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        let (system, user) = &seen[0];
        assert_eq!(system, SYSTEM_PROMPT);
        assert!(user.contains(
            "- Acme Corp (Energy, +1-555-0100)\n- Globex (Manufacturing, +1-555-0200)\n\nUser question:\nWhat industries do we serve?"
        ));
    }

    #[tokio::test]
    async fn works_without_records() {
        let generator = AnswerGenerator::new(Canned::ok("I have no CRM data."));
        let answer = generator.generate("Anyone there?", &[]).await.unwrap();
        assert_eq!(answer, "I have no CRM data.");
    }

    #[tokio::test]
    async fn propagates_completion_failure() {
        let generator = AnswerGenerator::new(Canned::failing());
        let err = generator.generate("Hello?", &[]).await.unwrap_err();

        assert!(matches!(err, AnswerError::Llm(AiLlmError::Provider(_))));
        assert!(err.to_string().contains("no choices"));
    }
}
