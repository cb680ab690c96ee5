//! Prompt construction for candidate generation.
//!
//! Prompts are a pure function of their inputs: no timestamps, no
//! randomness, no external state. Identical inputs always yield identical
//! text, which keeps generation reproducible given a deterministic oracle.

use crate::db::SchemaMetadata;

/// Base template requesting `k` distinct candidate queries.
const GENERATION_TEMPLATE: &str = r#"You are a SQLite expert.

Schema:
{schema}

Generate {k} DIFFERENT valid SQL queries for:
{question}

Rules:
- Use only schema tables/columns
- Each query on a new line
- No explanations
- End each query with semicolon"#;

/// Extra section appended for the self-correction round.
const CORRECTION_TEMPLATE: &str = r#"

The previous attempt failed with this error:
{error}

Do not repeat the failing query; fix the cause of the error above."#;

/// Builds the generation prompt.
///
/// The schema is rendered one line per table as `Name(col1, col2, ...)`, in
/// metadata order. When `error_context` is present the prompt additionally
/// carries the prior failure message and an instruction not to repeat it.
pub fn build_prompt(
    question: &str,
    schema: &SchemaMetadata,
    k: usize,
    error_context: Option<&str>,
) -> String {
    let mut prompt = GENERATION_TEMPLATE
        .replace("{schema}", &schema.format_for_prompt())
        .replace("{k}", &k.to_string())
        .replace("{question}", question);

    if let Some(error) = error_context {
        prompt.push_str(&CORRECTION_TEMPLATE.replace("{error}", error));
    }

    prompt
}
