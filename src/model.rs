//! The document model: sections, code blocks, the table of contents and
//! transcripts derived from REPL blocks.

use serde::{Deserialize, Serialize};

/// One entry of a body, in source order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BodyNode {
    /// A prose line, verbatim.
    Line { text: String },
    /// The code block at `index` in the owning body.
    Block { index: usize },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeBlock {
    pub index: usize,
    /// First word of the info string; empty for an untagged fence.
    pub lang: String,
    /// Whatever follows the language tag on the opening fence line.
    pub info: String,
    pub fence: String,
    pub indent: String,
    pub content: String,
    /// 1-based line of the opening fence.
    pub line: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub nodes: Vec<BodyNode>,
    pub blocks: Vec<CodeBlock>,
}

impl Body {
    /// Body text with code blocks left out, trimmed of surrounding blank lines.
    pub fn prose(&self) -> String {
        let lines: Vec<&str> = self
            .nodes
            .iter()
            .filter_map(|n| match n {
                BodyNode::Line { text } => Some(text.as_str()),
                BodyNode::Block { .. } => None,
            })
            .collect();
        lines.join("\n").trim_matches('\n').to_string()
    }

    pub fn is_blank(&self) -> bool {
        self.blocks.is_empty()
            && self.nodes.iter().all(|n| match n {
                BodyNode::Line { text } => text.trim().is_empty(),
                BodyNode::Block { .. } => false,
            })
    }

    /// Prose lines paired with their 1-based source line, given the line the
    /// body starts on.
    pub fn numbered_lines(&self, first_line: usize) -> Vec<(usize, &str)> {
        let mut out = Vec::new();
        let mut line = first_line;
        for node in &self.nodes {
            match node {
                BodyNode::Line { text } => {
                    out.push((line, text.as_str()));
                    line += 1;
                }
                BodyNode::Block { index } => {
                    if let Some(block) = self.blocks.get(*index) {
                        line += block_height(block);
                    }
                }
            }
        }
        out
    }
}

/// Number of source lines a block spans, fences included.
pub fn block_height(block: &CodeBlock) -> usize {
    block.content.split('\n').count() + 2
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub heading: String,
    pub level: usize,
    pub anchor: String,
    /// 1-based line of the heading.
    pub line: usize,
    pub body: Body,
}

impl Section {
    pub fn prose(&self) -> String {
        self.body.prose()
    }

    pub fn code_blocks(&self) -> &[CodeBlock] {
        &self.body.blocks
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TocEntry {
    pub text: String,
    pub anchor: String,
    pub depth: usize,
    /// Index into `Document::sections`.
    pub section: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableOfContents {
    pub heading: String,
    pub entries: Vec<TocEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub title: String,
    pub preamble: Body,
    pub sections: Vec<Section>,
    pub toc: Option<TableOfContents>,
}

impl Document {
    pub fn section(&self, heading: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.heading == heading)
    }

    /// Every code block in document order, with its owning section (None for
    /// the preamble).
    pub fn code_blocks(&self) -> impl Iterator<Item = (Option<&Section>, &CodeBlock)> {
        self.preamble
            .blocks
            .iter()
            .map(|b| (None, b))
            .chain(
                self.sections
                    .iter()
                    .flat_map(|s| s.body.blocks.iter().map(move |b| (Some(s), b))),
            )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptPair {
    pub input: String,
    /// Empty when the input only has side effects the transcript doesn't show.
    pub output: String,
    /// 1-based line of the prompt.
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExampleTranscript {
    pub section: Option<String>,
    /// 1-based line of the opening fence of the source block.
    pub line: usize,
    pub pairs: Vec<TranscriptPair>,
}
