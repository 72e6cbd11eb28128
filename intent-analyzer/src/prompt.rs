//! Prompt templates for the security review.
//!
//! The code is embedded verbatim inside a fenced block tagged with the
//! language. Nothing is escaped: the code is subject matter, never executed.

/// System message: security-expert persona, JSON-only output.
pub const SYSTEM_PROMPT: &str = "You are a security expert analyzing code for security vulnerabilities. Always respond with valid JSON.";

/// Renders the user prompt for one (intent, code, language) triple.
///
/// Pure and infallible; empty inputs still produce a well-formed prompt.
pub fn build_security_prompt(intent: &str, code: &str, language: &str) -> String {
    format!(
        "You are a world-class security expert. Analyze the following code against the stated security intent.

SECURITY INTENT: {intent}

CODE LANGUAGE: {language}

CODE:
```{language}
{code}
```

Please analyze whether the code correctly implements the stated security intent. Focus on:
1. Authentication and authorization requirements
2. Input validation and sanitization
3. Data protection and encryption
4. Access control
5. Security best practices for {language}

Respond with a JSON object containing:
- \"isSecure\": boolean indicating if the code meets the security intent
- \"issues\": array of specific security violations found
- \"suggestions\": array of actionable fixes for the issues
- \"severity\": \"error\", \"warning\", or \"info\" based on the severity

Be specific and actionable in your analysis."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embeds_code_in_language_fence() {
        let p = build_security_prompt(
            "must validate input",
            "function test(x){return x;}",
            "javascript",
        );
        assert!(p.contains("SECURITY INTENT: must validate input"));
        assert!(p.contains("```javascript\nfunction test(x){return x;}\n```"));
        assert!(p.contains("5. Security best practices for javascript"));
    }

    #[test]
    fn names_all_four_result_fields() {
        let p = build_security_prompt("i", "c", "python");
        for field in ["\"isSecure\"", "\"issues\"", "\"suggestions\"", "\"severity\""] {
            assert!(p.contains(field), "missing {field}");
        }
    }

    #[test]
    fn code_is_not_escaped_and_empty_inputs_are_fine() {
        let code = "x = \"{}`\\n\"";
        assert!(build_security_prompt("", code, "").contains(code));
        assert!(build_security_prompt("", "", "").contains("```\n\n```"));
    }

    #[test]
    fn is_deterministic() {
        assert_eq!(
            build_security_prompt("a", "b", "c"),
            build_security_prompt("a", "b", "c")
        );
    }
}
