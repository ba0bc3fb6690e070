// Shared prompt fragments.
// Feature prompts live next to the code that uses them (see review/prompts.rs).

/// Short, cheap prompt used to confirm a key can reach the model.
pub const KEY_CHECK_PROMPT: &str = "Name one interesting fact about technology.";

/// Appended to every prompt whose output is shown to end users.
pub const OUTPUT_LANGUAGE_INSTRUCTION: &str =
    "All text values in the output must be written in {language}.";

pub fn output_language_instruction(language: &str) -> String {
    fill_template(OUTPUT_LANGUAGE_INSTRUCTION, &[("language", language)])
}

/// Replaces `{name}` placeholders in a single left-to-right pass.
///
/// Substituted values are never rescanned, so placeholder-looking text inside
/// a document cannot pull another value into the prompt. Braces that do not
/// name a known placeholder are copied through unchanged.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(
        template.len() + values.iter().map(|(_, v)| v.len()).sum::<usize>(),
    );
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open + 1..];
        let value = tail.find('}').and_then(|close| {
            let name = &tail[..close];
            values
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value, close))
        });
        match value {
            Some((value, close)) => {
                out.push_str(value);
                rest = &tail[close + 1..];
            }
            None => {
                out.push('{');
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    out
}
