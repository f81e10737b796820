//! Every prompt sent to the provider is built here, so the exact wording
//! lives in one place.

use crate::domain::TransformKind;

/// Filler words the light-edit pass is asked to remove. Fixed set; the
/// prompt forbids any further paraphrase.
pub const FILLER_WORDS: [&str; 6] = ["um", "uh", "er", "ah", "like", "you know"];

pub const TWEET_INSTRUCTION: &str =
    "Rewrite it as a casual tweet-style post: punchy, conversational, first person.";

pub const PROFESSIONAL_INSTRUCTION: &str =
    "Rewrite it in a polished, business-appropriate tone suitable for a colleague or client.";

const SOFT_CONSTRAINT_SCAFFOLD: &str = "Rewrite the text below. Keep it to at most 120 words, \
     in a single paragraph, with no bullet points or numbered lists.";

pub fn strict_transcription_prompt(vocabulary_hint: Option<&str>) -> String {
    let mut prompt = String::from(
        "Transcribe this audio and return JSON in this EXACT format (no other text):\n\
         {\n\
         \x20 \"original\": \"word-for-word transcript in the original language spoken, keeping every filler word and false start\",\n\
         \x20 \"english\": \"word-for-word English translation, keeping every filler word and false start\"\n\
         }\n\
         \n\
         Only return valid JSON, nothing else.",
    );

    if let Some(hint) = vocabulary_hint {
        let hint = hint.trim();
        if !hint.is_empty() {
            prompt.push_str("\n\nVocabulary likely to appear in the audio: ");
            prompt.push_str(hint);
        }
    }

    prompt
}

pub fn light_edit_prompt(transcript: &str) -> String {
    format!(
        "Lightly edit this transcript. Rules:\n\
         - Remove these filler words wherever they appear: {}.\n\
         - Correct punctuation and grammar.\n\
         - You may reorder at most 30% of the sentences.\n\
         - Do not paraphrase or substitute words: keep the remaining vocabulary exactly as written.\n\
         \n\
         Return only the edited text, no commentary.\n\
         \n\
         {}",
        FILLER_WORDS.join(", "),
        transcript
    )
}

pub fn grounding_lookup_prompt(terms: &[String]) -> String {
    format!(
        "Look up current background context for these terms: {}.\n\
         Return JSON in this EXACT format (no other text):\n\
         {{\n\
         \x20 \"summary\": \"short narrative covering every term\",\n\
         \x20 \"sources\": [{{\"title\": \"...\", \"url\": \"...\"}}]\n\
         }}",
        terms.join(", ")
    )
}

/// Appends a session's grounding context to a prompt. The context text is
/// inserted verbatim; the same text is reused for every prompt of the
/// session.
pub fn with_grounding_context(prompt: &str, context_text: &str) -> String {
    format!(
        "{}\n\nBackground context (for reference only, do not quote directly):\n{}",
        prompt, context_text
    )
}

/// Instruction for the built-in rewrite styles. Custom requests carry
/// their instruction in the request itself.
pub fn builtin_style_instruction(kind: TransformKind) -> Option<&'static str> {
    match kind {
        TransformKind::Tweet => Some(TWEET_INSTRUCTION),
        TransformKind::Professional => Some(PROFESSIONAL_INSTRUCTION),
        TransformKind::Custom => None,
    }
}

pub fn transform_prompt(instruction: &str, source_text: &str) -> String {
    format!(
        "{}\n\nStyle instruction: {}\n\nText:\n{}",
        SOFT_CONSTRAINT_SCAFFOLD, instruction, source_text
    )
}
