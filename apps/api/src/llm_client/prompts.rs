// Shared prompt fragments.
// Each service that needs LLM calls defines its own prompts.rs alongside it.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Shared framing for every persona that talks to students.
pub const STUDENT_CONTEXT: &str = "The audience is an Indian engineering undergraduate. \
    Be honest about gaps, concrete about next steps, and realistic about the time \
    a student has alongside coursework.";
