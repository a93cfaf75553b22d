//! Cleanup of raw LLM replies before structured decoding.
//!
//! Models often wrap JSON in a markdown code fence even when told not to.
//! [`sanitize`] removes that wrapping; [`parse_json`] layers a JSON parse on
//! top and keeps the raw text around for error reporting.

use super::errors::TripPlanningError;

const FENCE: &str = "```";

/// Strips an optional leading ```` ```lang ```` marker and the matching
/// trailing ```` ``` ````, then trims surrounding whitespace.
///
/// Applied until nothing changes, so `sanitize(sanitize(x)) == sanitize(x)`.
/// Text shorter than a fence marker is only trimmed.
pub fn sanitize(raw: &str) -> String {
    let mut current = raw.trim();
    loop {
        let next = strip_fence_once(current);
        if next.len() == current.len() {
            return current.to_string();
        }
        current = next;
    }
}

/// Sanitizes and parses the reply as JSON.
///
/// # Errors
///
/// Returns `MalformedResponse` with the untouched reply when parsing fails.
pub fn parse_json(raw: &str) -> Result<serde_json::Value, TripPlanningError> {
    let cleaned = sanitize(raw);
    serde_json::from_str(&cleaned).map_err(|e| TripPlanningError::malformed(e.to_string(), raw))
}

fn strip_fence_once(text: &str) -> &str {
    let text = text.trim();
    let Some(rest) = text.strip_prefix(FENCE) else {
        return text;
    };

    // Info string, e.g. `json` or `jsonc`
    let info_len = rest
        .find(|c: char| !(c.is_alphanumeric() || matches!(c, '_' | '-' | '+')))
        .unwrap_or(rest.len());
    let body = rest[info_len..].trim();

    body.strip_suffix(FENCE).unwrap_or(body).trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn strips_json_fence() {
        assert_eq!(sanitize("```json\n[1, 2]\n```"), "[1, 2]");
    }

    #[test]
    fn strips_plain_fence() {
        assert_eq!(sanitize("```\n{\"a\": 1}\n```"), "{\"a\": 1}");
    }

    #[test]
    fn strips_single_line_fence() {
        assert_eq!(sanitize("```json[1]```"), "[1]");
    }

    #[test]
    fn leading_fence_without_trailing_is_stripped() {
        assert_eq!(sanitize("```json\n[1, 2"), "[1, 2");
    }

    #[test]
    fn trailing_fence_alone_is_kept() {
        assert_eq!(sanitize("[1]\n```"), "[1]\n```");
    }

    #[test]
    fn short_backtick_runs_are_not_corrupted() {
        assert_eq!(sanitize("``"), "``");
        assert_eq!(sanitize("`a`"), "`a`");
        assert_eq!(sanitize("```"), "");
    }

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(sanitize("  \n[1]\n\t"), "[1]");
    }

    #[test]
    fn nested_fences_collapse_to_fixpoint() {
        let once = sanitize("```\n```json\n[1]\n```\n```");
        assert_eq!(once, "[1]");
        assert_eq!(sanitize(&once), once);
    }

    #[test]
    fn parse_json_keeps_raw_text_on_failure() {
        let err = parse_json("```json\nnot json\n```").unwrap_err();
        assert_eq!(err.raw_response(), Some("```json\nnot json\n```"));
    }

    #[test]
    fn parse_json_accepts_fenced_object() {
        let value = parse_json("```json\n{\"a\": 1}\n```").unwrap();
        assert_eq!(value["a"], 1);
    }

    proptest! {
        #[test]
        fn sanitize_is_idempotent(raw in ".{0,200}") {
            let once = sanitize(&raw);
            prop_assert_eq!(sanitize(&once), once);
        }

        #[test]
        fn fence_free_text_is_unchanged(raw in "[a-zA-Z0-9{}\\[\\]:,\" \n]{0,200}") {
            let trimmed = raw.trim();
            prop_assert_eq!(sanitize(trimmed), trimmed);
        }

        #[test]
        fn fenced_body_is_recovered(body in "[a-zA-Z0-9{}\\[\\]:,\"]{1,100}") {
            let fenced = format!("```json\n{}\n```", body);
            prop_assert_eq!(sanitize(&fenced), body);
        }
    }
}
