//! Prompt templates for grounded answer generation

/// Fixed refusal sentence for questions the context cannot answer
pub const NOT_AVAILABLE: &str =
    "This information is not available in my current medical document base.";

/// Builds the two-part prompt for the generation backend
pub struct PromptBuilder;

impl PromptBuilder {
    /// System instruction fixing the grounding rules
    pub fn system_prompt() -> String {
        format!(
            r#"You are a medical information assistant specialized in breast cancer.

STRICT RULES:
1. Use ONLY the information provided in the CONTEXT.
2. If the answer is NOT explicitly present, respond exactly:
   "{refusal}"
3. Do NOT use prior knowledge.
4. Do NOT speculate.
5. Do NOT provide diagnosis or treatment advice.
6. This is an informational decision-support system only.
7. Structure answers clearly (bullet points or sections).
8. Maintain a professional, neutral, medical tone."#,
            refusal = NOT_AVAILABLE
        )
    }

    /// User part carrying the assembled context and the question
    pub fn user_prompt(context: &str, question: &str) -> String {
        format!(
            r#"MEDICAL CONTEXT (verified sources):
{context}

QUESTION:
{question}

Medical answer:"#,
            context = context,
            question = question
        )
    }
}
