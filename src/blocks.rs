use crate::error::{DocError, DocResult};
use crate::model::{Body, BodyNode, CodeBlock};
use regex::Regex;
use std::sync::LazyLock;

static RE_FENCE_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^( *)(`{3,}|~{3,})\s*([^\s`]*)\s*(.*)$").unwrap());

/// An opening fence line, broken into its parts.
#[derive(Debug, Clone, PartialEq)]
pub struct Fence {
    pub indent: String,
    pub marker: String,
    pub lang: String,
    pub info: String,
}

impl Fence {
    pub fn open(line: &str) -> Option<Fence> {
        let caps = RE_FENCE_OPEN.captures(line)?;
        let marker = caps[2].to_string();
        let info = caps[4].trim().to_string();
        // A backtick info string may not itself contain backticks.
        if marker.starts_with('`') && info.contains('`') {
            return None;
        }
        Some(Fence {
            indent: caps[1].to_string(),
            marker,
            lang: caps[3].to_string(),
            info,
        })
    }

    /// A closing fence uses the same character, at least as many times, and
    /// carries no info string.
    pub fn closes(&self, line: &str) -> bool {
        let t = line.trim();
        let Some(ch) = self.marker.chars().next() else {
            return false;
        };
        t.len() >= self.marker.len() && t.chars().all(|c| c == ch)
    }

    fn strip_indent<'a>(&self, line: &'a str) -> &'a str {
        let mut rest = line;
        for _ in 0..self.indent.len() {
            match rest.strip_prefix(' ') {
                Some(r) => rest = r,
                None => break,
            }
        }
        rest
    }
}

/// Split body lines into prose and fenced code blocks. `first_line` is the
/// 1-based source line of `lines[0]`.
pub fn extract(lines: &[String], first_line: usize) -> DocResult<Body> {
    let mut body = Body::default();
    let mut i = 0;

    while i < lines.len() {
        let line = &lines[i];
        let Some(fence) = Fence::open(line) else {
            body.nodes.push(BodyNode::Line { text: line.clone() });
            i += 1;
            continue;
        };

        let start = first_line + i;
        let mut buf: Vec<&str> = Vec::new();
        i += 1;
        let mut closed = false;
        while i < lines.len() {
            if fence.closes(&lines[i]) {
                closed = true;
                i += 1;
                break;
            }
            buf.push(fence.strip_indent(&lines[i]));
            i += 1;
        }

        if !closed {
            return Err(DocError::UnterminatedBlock {
                line: start,
                fence: fence.marker,
            });
        }
        if buf.iter().all(|l| l.trim().is_empty()) {
            return Err(DocError::EmptyBlock { line: start });
        }

        let index = body.blocks.len();
        body.blocks.push(CodeBlock {
            index,
            lang: fence.lang,
            info: fence.info,
            fence: fence.marker,
            indent: fence.indent,
            content: buf.join("\n"),
            line: start,
        });
        body.nodes.push(BodyNode::Block { index });
    }

    Ok(body)
}

/// Render a block back to its fenced source lines.
pub fn render(block: &CodeBlock) -> Vec<String> {
    let mut out = Vec::new();
    let mut open = format!("{}{}{}", block.indent, block.fence, block.lang);
    if !block.info.is_empty() {
        open.push(' ');
        open.push_str(&block.info);
    }
    out.push(open);
    for line in block.content.split('\n') {
        if line.is_empty() {
            out.push(String::new());
        } else {
            out.push(format!("{}{}", block.indent, line));
        }
    }
    out.push(format!("{}{}", block.indent, block.fence));
    out
}
