//! Grounded answer generation
//!
//! Wraps the ranked results in a fixed instruction prompt and makes one
//! non-streaming call to the [`TextGenerator`].

use crate::rag::context::assemble_context;
use laq_kernel::rag::{GenerationRequest, SamplingOptions, ScoredResult, TextGenerator};
use laq_kernel::{BackendError, BackendResult};
use std::sync::Arc;
use tracing::{debug, warn};

const PROMPT_HEADER: &str = "You are an expert assistant for Legislative Assembly Questions (LAQs). \
Your role is to provide accurate, factual answers based on the LAQ database.

Below are the most relevant LAQs from the database (ranked by relevance):

";

const PROMPT_RULES: &str = "

---

INSTRUCTIONS:
1. Answer the user's question based ONLY on the information provided in the LAQs above
2. If the LAQs don't contain sufficient information, explicitly state what information is missing
3. Always cite specific LAQ numbers when referencing facts (e.g., \"According to LAQ #324...\")
4. Be precise, concise, and factual - do not add interpretations or speculation
5. If multiple LAQs contain relevant information, synthesize them coherently
6. If attachments are mentioned (like Annexure-I), reference them in your answer
7. Maintain a professional and helpful tone
8. Prioritize information from LAQs with higher relevance scores

USER QUESTION: ";

const PROMPT_FOOTER: &str = "

ANSWER:";

/// Build the instruction prompt around an assembled context and the user question.
pub fn build_chat_prompt(context: &str, query: &str) -> String {
    let mut prompt = String::with_capacity(
        PROMPT_HEADER.len() + context.len() + PROMPT_RULES.len() + query.len() + PROMPT_FOOTER.len(),
    );
    prompt.push_str(PROMPT_HEADER);
    prompt.push_str(context);
    prompt.push_str(PROMPT_RULES);
    prompt.push_str(query);
    prompt.push_str(PROMPT_FOOTER);
    prompt
}

#[derive(Clone)]
pub struct AnswerGenerator {
    generator: Arc<dyn TextGenerator>,
    model: String,
    options: SamplingOptions,
}

impl AnswerGenerator {
    pub fn new(generator: Arc<dyn TextGenerator>, model: impl Into<String>, options: SamplingOptions) -> Self {
        Self {
            generator,
            model: model.into(),
            options,
        }
    }

    pub fn generator_name(&self) -> &str {
        self.generator.name()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Answer `query` from `sources`. The generated text is returned verbatim.
    pub async fn answer(&self, query: &str, sources: &[ScoredResult]) -> BackendResult<String> {
        let context = assemble_context(sources);
        let prompt = build_chat_prompt(&context, query);
        let request = GenerationRequest::new(self.model.clone(), prompt, self.options);

        debug!(
            generator = self.generator.name(),
            model = %self.model,
            sources = sources.len(),
            prompt_chars = request.prompt.len(),
            "generating answer"
        );

        let response = self.generator.generate(&request).await.map_err(|err| {
            warn!(generator = self.generator.name(), model = %self.model, error = %err, "generation failed");
            match err {
                BackendError::Connection(_) | BackendError::Generation(_) | BackendError::InvalidResponse(_) => err,
                other => BackendError::Generation(other.to_string()),
            }
        })?;

        Ok(response.response)
    }

    pub async fn health_check(&self) -> BackendResult<bool> {
        self.generator.health_check().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use laq_kernel::rag::GenerationResponse;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingGenerator {
        requests: Mutex<Vec<GenerationRequest>>,
    }

    #[async_trait]
    impl TextGenerator for RecordingGenerator {
        fn name(&self) -> &str {
            "recording"
        }

        async fn generate(&self, request: &GenerationRequest) -> BackendResult<GenerationResponse> {
            self.requests.lock().unwrap().push(request.clone());
            Ok(GenerationResponse {
                response: "  According to LAQ #324, forty two.  ".to_string(),
            })
        }
    }

    #[test]
    fn prompt_embeds_context_and_question() {
        let prompt = build_chat_prompt("LAQ #324 (Starred) - 12-03-2025", "How many schools?");
        assert!(prompt.starts_with("You are an expert assistant for Legislative Assembly Questions (LAQs). Your role"));
        assert!(prompt.contains("(ranked by relevance):\n\nLAQ #324 (Starred) - 12-03-2025\n\n---\n\nINSTRUCTIONS:\n1. "));
        assert!(prompt.contains("8. Prioritize information from LAQs with higher relevance scores\n\nUSER QUESTION: How many schools?\n\nANSWER:"));
        assert!(prompt.ends_with("ANSWER:"));
    }

    #[tokio::test]
    async fn single_non_streaming_call_with_configured_sampling() {
        let recorder = Arc::new(RecordingGenerator::default());
        let generator = AnswerGenerator::new(
            recorder.clone(),
            "llama3.2",
            SamplingOptions {
                temperature: 0.1,
                top_p: 0.9,
            },
        );

        let answer = generator.answer("How many schools?", &[]).await.unwrap();
        assert_eq!(answer, "  According to LAQ #324, forty two.  ");

        let requests = recorder.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert!(!requests[0].stream);
        assert_eq!(requests[0].model, "llama3.2");
        assert!((requests[0].options.top_p - 0.9).abs() < f32::EPSILON);
        assert!(requests[0].prompt.contains("USER QUESTION: How many schools?"));
    }
}
