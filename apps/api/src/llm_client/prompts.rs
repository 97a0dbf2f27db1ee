// Prompt fragments shared by every tailoring call. Call-specific prompts live in
// tailoring/prompts.rs.

/// Forces a bare JSON answer.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Appended to every tailoring system prompt.
pub const NO_FABRICATION: &str = "\
    Never invent employers, roles, dates, degrees, certificates, project names or exact \
    metrics that are absent from USER_PROFILE. When something is unknown, leave the field \
    empty or omit the entry. All strings are plain text without markdown.";

/// Joins a role prompt with the shared rules into one system prompt.
pub fn system_prompt(role: &str) -> String {
    format!("{}\n\n{}\n\n{}", role.trim(), NO_FABRICATION, JSON_ONLY_SYSTEM)
}
