//! Recovery of a JSON payload from a text completion.
//!
//! Models asked for strict JSON still sometimes wrap it in a markdown code
//! fence. This strips one enclosing fence (with or without a language tag)
//! and leaves everything else alone; it never validates the JSON itself.

use regex::Regex;
use std::sync::LazyLock;

static FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^```((?-u:\w)*)?\s*\n?(.*?)\n?\s*```$").expect("fence pattern is valid")
});

/// Return the body of a fenced block if `raw` is one, else `raw` trimmed.
pub fn extract_json_payload(raw: &str) -> String {
    let trimmed = raw.trim();
    match FENCE.captures(trimmed).and_then(|caps| caps.get(2)) {
        Some(body) if !body.as_str().is_empty() => body.as_str().trim().to_string(),
        _ => trimmed.to_string(),
    }
}
