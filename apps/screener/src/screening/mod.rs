// Candidate screening: prompt, single model call, and parsing of the model's answer.
// All model calls go through llm_client. Nothing here talks HTTP directly.

pub mod evaluator;
pub mod output;
pub mod prompts;
