use crate::blocks;
use crate::model::{Body, BodyNode, Document, ExampleTranscript};

fn body_lines(body: &Body, out: &mut Vec<String>) {
    for node in &body.nodes {
        match node {
            BodyNode::Line { text } => out.push(text.clone()),
            BodyNode::Block { index } => {
                if let Some(block) = body.blocks.get(*index) {
                    out.extend(blocks::render(block));
                }
            }
        }
    }
}

/// Write a document back to Markdown. Parsing the result yields the same
/// document.
pub fn serialize(doc: &Document) -> String {
    let mut out: Vec<String> = Vec::new();
    body_lines(&doc.preamble, &mut out);
    for section in &doc.sections {
        let marker = "#".repeat(section.level);
        if section.heading.ends_with('#') {
            // Closing sequence, so the heading's own trailing hashes survive.
            out.push(format!("{} {} #", marker, section.heading));
        } else {
            out.push(format!("{} {}", marker, section.heading));
        }
        body_lines(&section.body, &mut out);
    }
    out.join("\n")
}

/// Markdown for several documents, separated by a blank line. Each document
/// is written exactly as `serialize` produces it.
pub fn markdown<'a>(docs: impl IntoIterator<Item = &'a Document>) -> String {
    docs.into_iter().map(serialize).collect::<Vec<_>>().join("\n")
}

/// Indented outline of the table of contents, falling back to the section
/// headings when the document has none.
pub fn outline(doc: &Document) -> Vec<String> {
    match doc.toc {
        Some(ref toc) => toc
            .entries
            .iter()
            .map(|e| {
                let indent = "  ".repeat(e.depth);
                match doc.sections.get(e.section) {
                    Some(s) => format!("{}{} (#{}, line {})", indent, e.text, e.anchor, s.line),
                    None => format!("{}{} (#{}, missing section)", indent, e.text, e.anchor),
                }
            })
            .collect(),
        None => doc
            .sections
            .iter()
            .map(|s| {
                format!(
                    "{}{} (#{}, line {})",
                    "  ".repeat(s.level.saturating_sub(1)),
                    s.heading,
                    s.anchor,
                    s.line
                )
            })
            .collect(),
    }
}

pub fn summary(doc: &Document, transcripts: &[ExampleTranscript]) -> String {
    let blocks = doc.code_blocks().count();
    let pairs: usize = transcripts.iter().map(|t| t.pairs.len()).sum();
    let toc = match doc.toc {
        Some(ref toc) => format!("{} toc entries", toc.entries.len()),
        None => "no toc".to_string(),
    };
    format!(
        "\"{}\": {} section(s), {} code block(s), {} transcript(s) with {} example(s), {}",
        doc.title,
        doc.sections.len(),
        blocks,
        transcripts.len(),
        pairs,
        toc
    )
}
