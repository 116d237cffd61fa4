//! Answer synthesis: generation backend or extractive fallback

use std::sync::Arc;

use crate::error::Result;
use crate::providers::GenerationProvider;
use crate::retrieval::search::truncate_chars;
use crate::retrieval::{Retrieval, ScoredChunk};

use super::prompt::PromptBuilder;

/// Model name reported when no generation backend is configured
pub const SIMULATION_MODEL: &str = "simulation";

/// Characters of each retrieved chunk shown in a simulation answer
const PREVIEW_CHARS: usize = 300;

/// How answers are produced
pub enum SynthesisMode {
    /// Delegate to a generation backend
    Generation(Arc<dyn GenerationProvider>),
    /// Extractive fallback: previews of the retrieved chunks
    Simulation,
}

impl SynthesisMode {
    /// Active model name, or "simulation"
    pub fn model_name(&self) -> &str {
        match self {
            Self::Generation(provider) => provider.model(),
            Self::Simulation => SIMULATION_MODEL,
        }
    }
}

/// Produces the final answer from retrieval output.
///
/// Synthesis never mutates retrieval results; it is a function of the
/// assembled context, the question, and the mode.
pub struct AnswerSynthesizer {
    mode: SynthesisMode,
}

impl AnswerSynthesizer {
    /// Create a synthesizer in the given mode
    pub fn new(mode: SynthesisMode) -> Self {
        Self { mode }
    }

    /// Active mode
    pub fn mode(&self) -> &SynthesisMode {
        &self.mode
    }

    /// Synthesize an answer for a question from its retrieval output
    pub async fn synthesize(&self, question: &str, retrieval: &Retrieval) -> Result<String> {
        match &self.mode {
            SynthesisMode::Generation(provider) => {
                let system = PromptBuilder::system_prompt();
                let user = PromptBuilder::user_prompt(&retrieval.context.content, question);
                let generated = provider.generate(&system, &user).await?;
                Ok(generated.into_text())
            }
            SynthesisMode::Simulation => Ok(simulate(&retrieval.results)),
        }
    }
}

/// Extractive fallback answer built from chunk previews
fn simulate(results: &[ScoredChunk]) -> String {
    let mut answer = String::from("[SIMULATION MODE]\n\n");

    for result in results {
        answer.push_str(truncate_chars(&result.chunk.content, PREVIEW_CHARS));
        answer.push_str("\n\n");
    }

    answer.push_str(
        "Note: this is an extractive preview. Configure a generation backend for full answers.",
    );
    answer
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::providers::llm::GeneratedText;
    use crate::retrieval::AnswerContext;
    use crate::types::{Chunk, ChunkMeta};
    use async_trait::async_trait;

    struct EchoGenerator;

    #[async_trait]
    impl GenerationProvider for EchoGenerator {
        async fn generate(&self, _system: &str, user: &str) -> Result<GeneratedText> {
            Ok(GeneratedText::new(format!("ANSWER<{}>", user.len())))
        }

        async fn health_check(&self) -> Result<bool> {
            Ok(true)
        }

        fn name(&self) -> &str {
            "echo"
        }

        fn model(&self) -> &str {
            "echo-model"
        }
    }

    struct BrokenGenerator;

    #[async_trait]
    impl GenerationProvider for BrokenGenerator {
        async fn generate(&self, _system: &str, _user: &str) -> Result<GeneratedText> {
            Err(Error::generation("model crashed"))
        }

        async fn health_check(&self) -> Result<bool> {
            Ok(false)
        }

        fn name(&self) -> &str {
            "broken"
        }

        fn model(&self) -> &str {
            "broken-model"
        }
    }

    fn retrieval(contents: &[&str]) -> Retrieval {
        let results: Vec<ScoredChunk> = contents
            .iter()
            .enumerate()
            .map(|(i, content)| ScoredChunk {
                chunk: Chunk {
                    chunk_id: i as u64,
                    content: content.to_string(),
                    metadata: ChunkMeta {
                        document_id: "who_guidelines".to_string(),
                        source: "who_guidelines.pdf".to_string(),
                        section: "TREATMENT".to_string(),
                        domain: "Oncology".to_string(),
                        language: "en".to_string(),
                    },
                },
                similarity: 0.9 - i as f32 * 0.1,
            })
            .collect();

        Retrieval {
            context: AnswerContext {
                content: contents.join("\n\n---\n\n"),
                sources: vec!["who_guidelines.pdf".to_string()],
            },
            results,
        }
    }

    #[tokio::test]
    async fn generation_mode_returns_backend_text_verbatim() {
        let synthesizer =
            AnswerSynthesizer::new(SynthesisMode::Generation(Arc::new(EchoGenerator)));
        let answer = synthesizer
            .synthesize("What comes first?", &retrieval(&["Surgery first."]))
            .await
            .unwrap();
        assert!(answer.starts_with("ANSWER<"));
    }

    #[tokio::test]
    async fn generation_failure_propagates() {
        let synthesizer =
            AnswerSynthesizer::new(SynthesisMode::Generation(Arc::new(BrokenGenerator)));
        let err = synthesizer
            .synthesize("anything?", &retrieval(&["content"]))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Generation(_)));
    }

    #[tokio::test]
    async fn simulation_mode_is_labeled_and_previews_chunks() {
        let synthesizer = AnswerSynthesizer::new(SynthesisMode::Simulation);
        let long = "Radiotherapy follows surgery. ".repeat(30);
        let answer = synthesizer
            .synthesize("What follows surgery?", &retrieval(&[&long]))
            .await
            .unwrap();

        assert!(answer.starts_with("[SIMULATION MODE]"));
        assert!(answer.contains("Radiotherapy follows surgery."));
        // Previews are bounded.
        assert!(!answer.contains(&long));
        assert!(answer.contains("Configure a generation backend"));
    }

    #[test]
    fn mode_reports_the_active_model() {
        assert_eq!(SynthesisMode::Simulation.model_name(), SIMULATION_MODEL);
        assert_eq!(
            SynthesisMode::Generation(Arc::new(EchoGenerator)).model_name(),
            "echo-model"
        );
    }
}
