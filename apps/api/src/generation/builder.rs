//! Deterministic assembly of the drafting prompt.

use crate::generation::prompts::{
    CASE_DATA_HEADER, CASE_FILE_SEPARATOR, CUSTOM_INSTRUCTIONS_HEADER, EXAMPLE_SEPARATOR,
    PROMPT_CLOSING, PROMPT_PREAMBLE,
};
use crate::models::document::ParsedDocument;

/// Builds the user prompt from the current batches.
///
/// Layout: preamble, examples, optional custom instructions, case data,
/// closing instructions. Examples appear as bare text; case files are
/// prefixed with their filename so the model can attribute facts. Documents
/// that failed to parse still contribute their stored text, which for them is
/// the parser's error string.
pub fn assemble_prompt(
    examples: &[ParsedDocument],
    case_files: &[ParsedDocument],
    custom_instructions: Option<&str>,
) -> String {
    let examples_text = examples
        .iter()
        .map(|doc| doc.text.as_str())
        .collect::<Vec<_>>()
        .join(EXAMPLE_SEPARATOR);

    let case_data_text = case_files
        .iter()
        .map(|doc| format!("{}:\n{}", doc.filename, doc.text))
        .collect::<Vec<_>>()
        .join(CASE_FILE_SEPARATOR);

    let mut prompt = String::with_capacity(
        PROMPT_PREAMBLE.len()
            + examples_text.len()
            + case_data_text.len()
            + PROMPT_CLOSING.len()
            + 256,
    );
    prompt.push_str(PROMPT_PREAMBLE);
    prompt.push_str(&examples_text);
    if let Some(instructions) = custom_instructions {
        if !instructions.trim().is_empty() {
            prompt.push_str(CUSTOM_INSTRUCTIONS_HEADER);
            prompt.push_str(instructions);
        }
    }
    prompt.push_str(CASE_DATA_HEADER);
    prompt.push_str(&case_data_text);
    prompt.push_str(PROMPT_CLOSING);
    prompt
}
