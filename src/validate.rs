use crate::model::Document;
use log::warn;
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct Warning {
    pub line: usize,
    pub message: String,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

/// Non-fatal checks on a parsed document. Every warning is also logged.
pub fn validate(doc: &Document) -> Vec<Warning> {
    let mut warnings: Vec<Warning> = Vec::new();

    for (_, block) in doc.code_blocks() {
        if block.lang.is_empty() {
            warnings.push(Warning {
                line: block.line,
                message: "code block has no language tag".to_string(),
            });
        }
    }

    for (i, section) in doc.sections.iter().enumerate() {
        let has_children = doc
            .sections
            .get(i + 1)
            .is_some_and(|next| next.level > section.level);
        if section.body.is_blank() && !has_children {
            warnings.push(Warning {
                line: section.line,
                message: format!("section \"{}\" is empty", section.heading),
            });
        }
    }

    if let Some(ref toc) = doc.toc {
        let listed: HashSet<usize> = toc.entries.iter().map(|e| e.section).collect();
        for (i, section) in doc.sections.iter().enumerate() {
            if section.level == 2 && section.heading != toc.heading && !listed.contains(&i) {
                warnings.push(Warning {
                    line: section.line,
                    message: format!(
                        "section \"{}\" is not listed in the table of contents",
                        section.heading
                    ),
                });
            }
        }
    }

    warnings.sort_by_key(|w| w.line);
    for w in &warnings {
        warn!("{}", w);
    }
    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::parse::parse_lines;

    fn doc(v: &[&str]) -> Document {
        let lines: Vec<String> = v.iter().map(|x| x.to_string()).collect();
        parse_lines(&lines, &Config::default()).unwrap()
    }

    #[test]
    fn test_clean_document() {
        let d = doc(&["# Elixir", "## Basics", "Text.", "```elixir", "1", "```"]);
        assert!(validate(&d).is_empty());
    }

    #[test]
    fn test_untagged_block() {
        let d = doc(&["# A", "```", "x", "```"]);
        assert_eq!(
            validate(&d),
            vec![Warning {
                line: 2,
                message: "code block has no language tag".to_string()
            }]
        );
    }

    #[test]
    fn test_empty_leaf_section() {
        let d = doc(&["# A", "## B", "", "## C", "text"]);
        let warnings = validate(&d);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].to_string(), "line 2: section \"B\" is empty");
    }

    #[test]
    fn test_section_missing_from_toc() {
        let d = doc(&[
            "## Table of Contents",
            "- [Basics](#basics)",
            "## Basics",
            "text",
            "## Processes",
            "text",
        ]);
        let warnings = validate(&d);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].line, 5);
        assert!(warnings[0].message.contains("Processes"));
    }
}
