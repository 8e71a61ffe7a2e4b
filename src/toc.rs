use crate::anchor::norm_target;
use crate::config::Config;
use crate::error::{DocError, DocResult};
use crate::inline::plain_text;
use crate::model::{Section, TableOfContents, TocEntry};
use log::debug;
use regex::Regex;
use std::sync::LazyLock;

static RE_TOC_ITEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\s*)(?:[-*+]|\d+[.)])\s+\[([^\]]+)\]\((#[^)\s]*)\)").unwrap()
});

pub fn find_toc_section<'a>(sections: &'a [Section], config: &Config) -> Option<&'a Section> {
    let wanted = config.toc_heading.trim().to_lowercase();
    sections
        .iter()
        .find(|s| plain_text(&s.heading).trim().to_lowercase() == wanted)
}

/// Build the table of contents from the TOC section's link list. Every
/// in-page link must name exactly one section anchor.
pub fn resolve(sections: &[Section], config: &Config) -> DocResult<Option<TableOfContents>> {
    let Some(toc_section) = find_toc_section(sections, config) else {
        if config.require_toc {
            return Err(DocError::MissingToc {
                heading: config.toc_heading.clone(),
            });
        }
        return Ok(None);
    };

    let mut entries: Vec<TocEntry> = Vec::new();
    for (line, text) in toc_section.body.numbered_lines(toc_section.line + 1) {
        let Some(caps) = RE_TOC_ITEM.captures(text) else {
            continue;
        };
        let anchor = norm_target(&caps[3]);
        let label = plain_text(&caps[2]);
        let matches: Vec<usize> = sections
            .iter()
            .enumerate()
            .filter(|(_, s)| s.anchor == anchor)
            .map(|(i, _)| i)
            .collect();
        if matches.len() != 1 {
            return Err(DocError::UnresolvedTocEntry {
                line,
                text: label,
                anchor,
                matches: matches.len(),
            });
        }
        entries.push(TocEntry {
            text: label,
            anchor,
            depth: caps[1].len() / 2,
            section: matches[0],
        });
    }

    debug!("table of contents: {} entr(ies)", entries.len());

    Ok(Some(TableOfContents {
        heading: toc_section.heading.clone(),
        entries,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_lines;

    fn s(v: &[&str]) -> Vec<String> {
        v.iter().map(|x| x.to_string()).collect()
    }

    const DOC: &[&str] = &[
        "# Elixir",
        "## Table of Contents",
        "- [Basic Types](#basic-types)",
        "  - [Atoms](#atoms)",
        "- [Modules & Functions](#modules--functions)",
        "- [Hex docs](https://hexdocs.pm)",
        "## Basic Types",
        "### Atoms",
        "## Modules & Functions",
    ];

    #[test]
    fn test_entries_resolve() {
        let doc = parse_lines(&s(DOC), &Config::default()).unwrap();
        let toc = doc.toc.unwrap();
        assert_eq!(toc.heading, "Table of Contents");
        assert_eq!(toc.entries.len(), 3);
        assert_eq!(toc.entries[0].text, "Basic Types");
        assert_eq!(toc.entries[0].section, 2);
        assert_eq!(toc.entries[1].depth, 1);
        assert_eq!(doc.sections[toc.entries[1].section].heading, "Atoms");
        assert_eq!(doc.sections[toc.entries[2].section].heading, "Modules & Functions");
    }

    #[test]
    fn test_unresolved_entry() {
        let lines = s(&["## Table of Contents", "", "1. [Processes](#processes)", "## Basics"]);
        let err = parse_lines(&lines, &Config::default()).unwrap_err();
        assert_eq!(
            err,
            DocError::UnresolvedTocEntry {
                line: 3,
                text: "Processes".to_string(),
                anchor: "processes".to_string(),
                matches: 0
            }
        );
    }

    #[test]
    fn test_missing_toc_is_optional() {
        let doc = parse_lines(&s(&["# A"]), &Config::default()).unwrap();
        assert!(doc.toc.is_none());
    }

    #[test]
    fn test_missing_toc_required() {
        let mut config = Config::default();
        config.require_toc = true;
        let err = parse_lines(&s(&["# A"]), &config).unwrap_err();
        assert_eq!(
            err,
            DocError::MissingToc {
                heading: "Table of Contents".to_string()
            }
        );
    }

    #[test]
    fn test_percent_encoded_anchor() {
        let lines = s(&["## Table of Contents", "- [Café](#caf%C3%A9)", "## Café", "text"]);
        let doc = parse_lines(&lines, &Config::default()).unwrap();
        let toc = doc.toc.unwrap();
        assert_eq!(toc.entries[0].anchor, "café");
        assert_eq!(toc.entries[0].section, 1);
    }

    #[test]
    fn test_custom_toc_heading() {
        let mut config = Config::default();
        config.toc_heading = "contents".to_string();
        let doc = parse_lines(&s(&["## Contents", "* [Intro](#intro)", "## Intro"]), &config).unwrap();
        assert_eq!(doc.toc.unwrap().entries[0].section, 1);
    }
}
