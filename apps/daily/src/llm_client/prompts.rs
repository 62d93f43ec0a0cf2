// Cross-cutting prompt fragments. Each feature that calls the LLM keeps its
// own prompts.rs alongside it.

/// Instruction appended to every prompt that rewrites news copy.
pub const FACTUAL_INSTRUCTION: &str = "\
    Use only facts stated in the material provided. \
    Do NOT add background, speculation or commentary. \
    Write in plain British English.";
