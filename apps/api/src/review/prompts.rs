// CV review prompt template.

use crate::llm_client::prompts::{fill_template, output_language_instruction};

pub const REVIEW_PROMPT_TEMPLATE: &str = r#"You are a professional recruiter and an expert CV reviewer.
Your job is to give a comprehensive review of the user's CV by comparing it against a COLLECTION OF EXAMPLE CVS that are excellent and ATS-friendly.

--- COLLECTION OF IDEAL EXAMPLE CVS (BENCHMARK) ---
{examples_text}
---

Your tasks:
1. Critically analyse the "USER CV" below.
2. Compare it with the "COLLECTION OF IDEAL EXAMPLE CVS" on quantification, keyword usage, format, and impact.
3. Return a complete review as JSON following the requested schema. Focus on the gaps between the user's CV and the ideal examples.
4. {language_instruction}

--- USER CV (TO REVIEW) ---
{cv_text}
---
"#;

/// Renders the review prompt. Placeholders inside either document are copied
/// verbatim.
pub fn build_review_prompt(examples_text: &str, cv_text: &str, language: &str) -> String {
    let language_instruction = output_language_instruction(language);
    fill_template(
        REVIEW_PROMPT_TEMPLATE,
        &[
            ("examples_text", examples_text),
            ("language_instruction", &language_instruction),
            ("cv_text", cv_text),
        ],
    )
}
