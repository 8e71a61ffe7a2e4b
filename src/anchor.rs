use crate::inline::plain_text;
use percent_encoding::percent_decode_str;
use regex::Regex;
use std::sync::LazyLock;

static RE_NON_ANCHOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{L}\p{N}\s_-]").unwrap());
static RE_SPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s").unwrap());

/// GitHub-style fragment slug for a heading: markup removed, lowercased,
/// punctuation dropped, each space turned into `-`.
pub fn slug(heading: &str) -> String {
    let s = plain_text(heading).trim().to_lowercase();
    let s = RE_NON_ANCHOR.replace_all(&s, "").to_string();
    RE_SPACE.replace_all(&s, "-").to_string()
}

/// Link targets may carry a leading `#` and percent-encoded characters.
pub fn norm_target(target: &str) -> String {
    let fragment = target.trim().trim_start_matches('#');
    let decoded = percent_decode_str(fragment).decode_utf8_lossy();
    RE_SPACE.replace_all(&decoded, "-").to_lowercase()
}
