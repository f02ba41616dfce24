//! Prompt text for complaint drafting.
//!
//! These literals are the contract with the model. Downstream drafts are
//! compared against output produced with exactly this wording, so edits here
//! are behavior changes, not copy tweaks.

/// System role for every drafting call.
pub const DRAFTER_SYSTEM: &str =
    "You are an expert legal document drafter specializing in personal injury complaints.";

/// Joins consecutive example complaints inside the prompt.
pub const EXAMPLE_SEPARATOR: &str = "\n\n---EXAMPLE COMPLAINT---\n\n";

/// Joins consecutive case files inside the prompt.
pub const CASE_FILE_SEPARATOR: &str = "\n\n---CASE FILE---\n\n";

/// Opens the user prompt; the concatenated examples follow directly.
pub const PROMPT_PREAMBLE: &str = r#"You are a legal document drafter for a personal injury law firm specializing in motor vehicle accident cases.

Your task is to draft a new complaint based on the example complaints provided and the case-specific data.

EXAMPLE COMPLAINTS (use these as style and format reference):
"#;

/// Introduces the optional blueprint instructions, between the examples and
/// the case data. Omitted entirely when there are no instructions.
pub const CUSTOM_INSTRUCTIONS_HEADER: &str = "\n\nCUSTOM INSTRUCTIONS FOR THIS DRAFT:\n";

/// Introduces the concatenated case files.
pub const CASE_DATA_HEADER: &str = "\n\nCASE DATA FOR NEW COMPLAINT:\n";

/// Closes the prompt with the drafting instructions.
pub const PROMPT_CLOSING: &str = r#"

Instructions:
1. Analyze the example complaints to understand the firm's style, structure, and legal language
2. Review all case data files to extract relevant facts (client info, incident details, injuries, damages, defendants, etc.)
3. Draft a new complaint that:
   - Follows the same structure and style as the examples
   - Incorporates all relevant facts from the case data
   - Uses appropriate legal language and formatting
   - Includes all necessary sections (parties, jurisdiction, facts, causes of action, damages, prayer for relief)
4. Be thorough but avoid including irrelevant information
5. If case data is unclear or contradictory, make reasonable assumptions based on typical MVA cases

Generate the complete complaint now:"#;
