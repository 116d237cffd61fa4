//! Prompt construction and answer synthesis

pub mod answer;
pub mod prompt;

pub use answer::{AnswerSynthesizer, SynthesisMode, SIMULATION_MODEL};
pub use prompt::{PromptBuilder, NOT_AVAILABLE};
