use crate::anchor::slug;
use crate::blocks::{self, Fence};
use crate::config::Config;
use crate::error::{DocError, DocResult};
use crate::model::{Document, Section};
use crate::toc;
use indexmap::IndexMap;
use log::debug;
use regex::Regex;
use std::sync::LazyLock;

static RE_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ {0,3}(#{1,6})(?:[ \t]+(.*))?$").unwrap());
static RE_CLOSING_HASHES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(^|\s+)#+$").unwrap());

/// A heading line as `(level, text)`. `Ok(None)` for any other line.
pub fn heading(line: &str, line_no: usize) -> DocResult<Option<(usize, String)>> {
    let Some(caps) = RE_HEADING.captures(line) else {
        return Ok(None);
    };
    let marker = &caps[1];
    let text = caps.get(2).map_or("", |m| m.as_str()).trim();
    let text = RE_CLOSING_HASHES.replace(text, "").trim().to_string();
    if text.is_empty() {
        return Err(DocError::MalformedHeading {
            line: line_no,
            marker: marker.to_string(),
        });
    }
    Ok(Some((marker.len(), text)))
}

struct RawSection {
    heading: String,
    level: usize,
    line: usize,
    start: usize,
    end: usize,
}

/// Split normalized lines into a preamble and heading-delimited sections.
/// Lines inside fenced regions never start a section.
pub fn parse_lines(lines: &[String], config: &Config) -> DocResult<Document> {
    let mut raw: Vec<RawSection> = Vec::new();
    let mut preamble_end = lines.len();
    let mut open: Option<Fence> = None;

    for (i, line) in lines.iter().enumerate() {
        if let Some(fence) = &open {
            if fence.closes(line) {
                open = None;
            }
            continue;
        }
        if let Some(fence) = Fence::open(line) {
            open = Some(fence);
            continue;
        }
        if let Some((level, text)) = heading(line, i + 1)? {
            if let Some(prev) = raw.last_mut() {
                prev.end = i;
            } else {
                preamble_end = i;
            }
            raw.push(RawSection {
                heading: text,
                level,
                line: i + 1,
                start: i + 1,
                end: lines.len(),
            });
        }
    }

    let preamble = blocks::extract(&lines[..preamble_end], 1)?;

    let mut seen: IndexMap<String, usize> = IndexMap::new();
    let mut anchors: IndexMap<String, usize> = IndexMap::new();
    let mut sections: Vec<Section> = Vec::with_capacity(raw.len());
    for r in raw {
        if let Some(&first_line) = seen.get(&r.heading) {
            return Err(DocError::DuplicateHeading {
                line: r.line,
                heading: r.heading,
                first_line,
            });
        }
        seen.insert(r.heading.clone(), r.line);

        let body = blocks::extract(&lines[r.start..r.end], r.start + 1)?;
        sections.push(Section {
            anchor: unique_anchor(&mut anchors, &r.heading),
            heading: r.heading,
            level: r.level,
            line: r.line,
            body,
        });
    }

    let title = sections
        .iter()
        .find(|s| s.level == 1)
        .or_else(|| sections.first())
        .map(|s| s.heading.clone())
        .unwrap_or_default();

    let toc = toc::resolve(&sections, config)?;

    debug!(
        "parsed \"{}\": {} section(s), {} code block(s)",
        title,
        sections.len(),
        preamble.blocks.len() + sections.iter().map(|s| s.body.blocks.len()).sum::<usize>()
    );

    Ok(Document {
        title,
        preamble,
        sections,
        toc,
    })
}

/// Repeated slugs get `-1`, `-2`, ... appended in document order.
fn unique_anchor(used: &mut IndexMap<String, usize>, heading: &str) -> String {
    let base = slug(heading);
    let mut n = used.get(&base).copied().unwrap_or(0);
    let mut candidate = base.clone();
    while used.contains_key(&candidate) {
        n += 1;
        candidate = format!("{}-{}", base, n);
    }
    used.insert(base, n);
    used.entry(candidate.clone()).or_insert(0);
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BodyNode;

    fn s(v: &[&str]) -> Vec<String> {
        v.iter().map(|x| x.to_string()).collect()
    }

    fn parse(v: &[&str]) -> DocResult<Document> {
        parse_lines(&s(v), &Config::default())
    }

    #[test]
    fn test_heading() {
        assert_eq!(heading("# Elixir", 1).unwrap(), Some((1, "Elixir".to_string())));
        assert_eq!(heading("### Lists ###", 1).unwrap(), Some((3, "Lists".to_string())));
        assert_eq!(heading("## C#", 1).unwrap(), Some((2, "C#".to_string())));
        assert_eq!(heading("#hashtag", 1).unwrap(), None);
        assert_eq!(heading("####### seven", 1).unwrap(), None);
    }

    #[test]
    fn test_heading_without_text() {
        assert_eq!(
            heading("##", 9).unwrap_err(),
            DocError::MalformedHeading {
                line: 9,
                marker: "##".to_string()
            }
        );
        assert!(heading("## ##", 1).is_err());
    }

    #[test]
    fn test_sections_in_order() {
        let doc = parse(&["# Elixir", "Intro.", "## Basics", "Types.", "## Modules", "defmodule"]).unwrap();
        assert_eq!(doc.title, "Elixir");
        let headings: Vec<&str> = doc.sections.iter().map(|s| s.heading.as_str()).collect();
        assert_eq!(headings, vec!["Elixir", "Basics", "Modules"]);
        assert_eq!(doc.sections[1].level, 2);
        assert_eq!(doc.sections[1].line, 3);
        assert_eq!(doc.sections[1].prose(), "Types.");
    }

    #[test]
    fn test_preamble() {
        let doc = parse(&["badge", "", "# Title"]).unwrap();
        assert_eq!(doc.preamble.prose(), "badge");
        assert_eq!(doc.sections.len(), 1);
    }

    #[test]
    fn test_hash_inside_fence_is_not_heading() {
        let doc = parse(&["# Shell", "```bash", "# install hex", "mix local.hex", "```"]).unwrap();
        assert_eq!(doc.sections.len(), 1);
        assert_eq!(doc.sections[0].body.blocks[0].content, "# install hex\nmix local.hex");
        assert_eq!(doc.sections[0].body.blocks[0].line, 2);
    }

    #[test]
    fn test_unterminated_fence_swallows_rest() {
        let err = parse(&["# A", "```elixir", "foo", "## B", "bar"]).unwrap_err();
        assert_eq!(
            err,
            DocError::UnterminatedBlock {
                line: 2,
                fence: "```".to_string()
            }
        );
    }

    #[test]
    fn test_duplicate_heading() {
        let err = parse(&["# A", "## Examples", "## Examples"]).unwrap_err();
        assert_eq!(
            err,
            DocError::DuplicateHeading {
                line: 3,
                heading: "Examples".to_string(),
                first_line: 2
            }
        );
    }

    #[test]
    fn test_colliding_slugs_get_suffix() {
        let doc = parse(&["# Foo!", "# Foo?", "# Foo."]).unwrap();
        let anchors: Vec<&str> = doc.sections.iter().map(|s| s.anchor.as_str()).collect();
        assert_eq!(anchors, vec!["foo", "foo-1", "foo-2"]);
    }

    #[test]
    fn test_title_falls_back_to_first_heading() {
        let doc = parse(&["## Only", "text"]).unwrap();
        assert_eq!(doc.title, "Only");
        let doc = parse(&["no headings"]).unwrap();
        assert_eq!(doc.title, "");
    }

    #[test]
    fn test_body_keeps_blank_lines() {
        let doc = parse(&["# A", "", "text", ""]).unwrap();
        assert_eq!(
            doc.sections[0].body.nodes,
            vec![
                BodyNode::Line { text: String::new() },
                BodyNode::Line { text: "text".to_string() },
                BodyNode::Line { text: String::new() },
            ]
        );
    }
}
