//! Best-effort recovery of config JSON with missing separators.
//!
//! Some published checkpoints ship a `generation_config.json` that was edited
//! by hand and lost a comma between two entries, or kept a trailing comma
//! before a closing brace. [`repair`] fixes exactly those two failure modes
//! and nothing else; any other syntax error is reported unchanged.

use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

fn trailing_comma() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r",(?P<close>\s*[}\]])").expect("Failed to compile trailing comma regex")
    })
}

/// A value terminator, then whitespace spanning at least one newline, then the
/// opening quote of the next key.
fn missing_separator() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?P<term>[}\]0-9"]|true|false|null)(?P<gap>[ \t\r]*\n\s*)""#)
            .expect("Failed to compile missing separator regex")
    })
}

/// Apply the textual fixes without parsing.
///
/// Trailing commas are removed first so the separator pass never sees them.
pub fn repair_text(text: &str) -> String {
    let without_trailing = trailing_comma().replace_all(text, "$close");
    missing_separator().replace_all(&without_trailing, "$term,$gap\"").into_owned()
}

/// Repair `text` and parse the result.
///
/// Only meant to be called after a direct parse has already failed.
pub fn repair(text: &str) -> Result<Value, serde_json::Error> {
    serde_json::from_str(&repair_text(text))
}

/// Parse `text` directly, falling back to [`repair`] when `allow_repair` is set.
///
/// On failure the error of the last attempt is returned.
pub fn parse_lenient(text: &str, allow_repair: bool) -> Result<Value, serde_json::Error> {
    match serde_json::from_str(text) {
        Ok(value) => Ok(value),
        Err(err) if !allow_repair => Err(err),
        Err(err) => {
            tracing::warn!("malformed JSON ({err}), attempting repair");
            repair(text)
        }
    }
}
