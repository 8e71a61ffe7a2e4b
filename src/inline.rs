use fancy_regex::Regex as FancyRegex;
use regex::Regex;
use std::sync::LazyLock;

static RE_BOLD_STAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").unwrap());
static RE_BOLD_UNDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"__(.+?)__").unwrap());
static RE_ITALIC: LazyLock<FancyRegex> =
    LazyLock::new(|| FancyRegex::new(r"(?<!\*)\*(?!\*)(.+?)(?<!\*)\*(?!\*)").unwrap());
static RE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`([^`]+)`").unwrap());
static RE_STRIKE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"~~(.+?)~~").unwrap());
static RE_IMG_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[([^\]]*)\]\(([^)]+)\)").unwrap());
static RE_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]*)\]\(([^)]+)\)").unwrap());

pub fn strip_inline_markdown(text: &str) -> String {
    let text = RE_BOLD_STAR.replace_all(text, "$1").to_string();
    let text = RE_BOLD_UNDER.replace_all(&text, "$1").to_string();
    let text = RE_ITALIC.replace_all(&text, "$1").to_string();
    let text = RE_CODE.replace_all(&text, "$1").to_string();
    RE_STRIKE.replace_all(&text, "$1").to_string()
}

/// Replace links and images with their text.
pub fn strip_links(text: &str) -> String {
    let text = RE_IMG_LINK.replace_all(text, "$1").to_string();
    RE_LINK.replace_all(&text, "$1").to_string()
}

/// Heading or link text as a reader sees it.
pub fn plain_text(text: &str) -> String {
    strip_inline_markdown(&strip_links(text))
}
