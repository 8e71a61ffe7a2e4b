//! Decomposition of REPL transcript blocks into input/expected-output pairs.

use crate::config::Config;
use crate::error::{DocError, DocResult};
use crate::model::{CodeBlock, Document, ExampleTranscript, TranscriptPair};
use log::debug;
use regex::Regex;

/// Which blocks hold transcripts and how their prompts look.
#[derive(Debug, Clone)]
pub struct TranscriptRules {
    langs: Vec<String>,
    primary: Regex,
    secondary: Regex,
}

fn anchored(pattern: &str) -> DocResult<Regex> {
    Regex::new(&format!("^(?:{})", pattern)).map_err(|e| DocError::InvalidPrompt {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })
}

impl TranscriptRules {
    pub fn new(langs: &[String], primary: &str, secondary: &str) -> DocResult<Self> {
        Ok(TranscriptRules {
            langs: langs.to_vec(),
            primary: anchored(primary)?,
            secondary: anchored(secondary)?,
        })
    }

    pub fn from_config(config: &Config) -> DocResult<Self> {
        Self::new(
            &config.transcript_langs,
            &config.primary_prompt,
            &config.secondary_prompt,
        )
    }

    /// A block is a transcript when its tag is a transcript tag and at least
    /// one of its lines starts with the primary prompt.
    pub fn is_transcript(&self, block: &CodeBlock) -> bool {
        self.langs.iter().any(|l| l.eq_ignore_ascii_case(&block.lang))
            && block.content.split('\n').any(|l| self.primary.is_match(l))
    }

    fn strip<'a>(re: &Regex, line: &'a str) -> Option<&'a str> {
        let m = re.find(line)?;
        let rest = &line[m.end()..];
        Some(rest.strip_prefix(' ').unwrap_or(rest))
    }
}

struct OpenPair {
    input: String,
    output: Vec<String>,
    line: usize,
}

impl OpenPair {
    fn finish(self) -> TranscriptPair {
        TranscriptPair {
            input: self.input,
            output: self.output.join("\n").trim_matches('\n').to_string(),
            line: self.line,
        }
    }
}

fn format_error(line: usize, reason: &str) -> DocError {
    DocError::TranscriptFormat {
        line,
        reason: reason.to_string(),
    }
}

/// Split transcript text into pairs. `first_line` is the 1-based source line
/// of the first content line.
pub fn decompose_text(
    content: &str,
    first_line: usize,
    rules: &TranscriptRules,
) -> DocResult<Vec<TranscriptPair>> {
    let mut pairs: Vec<TranscriptPair> = Vec::new();
    let mut current: Option<OpenPair> = None;

    for (i, line) in content.split('\n').enumerate() {
        let line_no = first_line + i;

        if let Some(input) = TranscriptRules::strip(&rules.primary, line) {
            if input.trim().is_empty() {
                return Err(format_error(line_no, "prompt has no input"));
            }
            if let Some(open) = current.take() {
                pairs.push(open.finish());
            }
            current = Some(OpenPair {
                input: input.to_string(),
                output: Vec::new(),
                line: line_no,
            });
            continue;
        }

        if let Some(cont) = TranscriptRules::strip(&rules.secondary, line) {
            match current.as_mut() {
                None => return Err(format_error(line_no, "continuation line before any prompt")),
                Some(open) if !open.output.is_empty() => {
                    return Err(format_error(line_no, "continuation line after output"));
                }
                Some(open) => {
                    open.input.push('\n');
                    open.input.push_str(cont);
                }
            }
            continue;
        }

        match current.as_mut() {
            Some(open) => open.output.push(line.to_string()),
            None if line.trim().is_empty() => {}
            None => return Err(format_error(line_no, "output before any prompt")),
        }
    }

    if let Some(open) = current.take() {
        pairs.push(open.finish());
    }
    if pairs.is_empty() {
        return Err(format_error(first_line, "no prompt lines"));
    }
    Ok(pairs)
}

pub fn decompose(block: &CodeBlock, rules: &TranscriptRules) -> DocResult<Vec<TranscriptPair>> {
    decompose_text(&block.content, block.line + 1, rules)
}

impl Document {
    /// Transcripts of every transcript block, in document order.
    pub fn transcripts(&self, rules: &TranscriptRules) -> DocResult<Vec<ExampleTranscript>> {
        let mut out = Vec::new();
        for (section, block) in self.code_blocks() {
            if !rules.is_transcript(block) {
                continue;
            }
            let pairs = decompose(block, rules)?;
            debug!("block at line {}: {} transcript pair(s)", block.line, pairs.len());
            out.push(ExampleTranscript {
                section: section.map(|s| s.heading.clone()),
                line: block.line,
                pairs,
            });
        }
        Ok(out)
    }
}
