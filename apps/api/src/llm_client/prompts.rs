// Cross-cutting prompt fragments shared by every LLM caller.
// Feature modules keep their own prompts.rs next to the code that uses them.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Joins a role-specific system prompt with the JSON-only fragment.
pub fn json_system(role_prompt: &str) -> String {
    format!("{} {}", role_prompt.trim_end(), JSON_ONLY_SYSTEM)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_system_appends_fragment() {
        let system = json_system("You are a dispatcher.  ");
        assert!(system.starts_with("You are a dispatcher. You MUST"));
        assert!(system.ends_with("apologies."));
    }
}
