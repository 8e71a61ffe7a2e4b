pub mod anchor;
pub mod blocks;
pub mod config;
pub mod emit;
pub mod error;
pub mod inline;
pub mod model;
pub mod normalize;
pub mod parse;
pub mod toc;
pub mod transcript;
pub mod validate;

use config::Config;
use error::{DocError, DocResult};
use model::Document;
use regex::Regex;
use std::io;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::LazyLock;

pub use emit::serialize;
pub use transcript::TranscriptRules;

static RE_MARKDOWN_FILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.(md|markdown)$").unwrap());

pub fn parse(text: &str, config: &Config) -> DocResult<Document> {
    // Stage 0
    let lines = normalize::normalize(text, config.normalization);

    // Stages 1-3: sections, code blocks, table of contents
    parse::parse_lines(&lines, config)
}

impl FromStr for Document {
    type Err = DocError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s, &Config::default())
    }
}

pub fn list_files(inputs: &[PathBuf]) -> io::Result<Vec<PathBuf>> {
    let mut out: Vec<PathBuf> = Vec::new();

    for p in inputs {
        if p.is_dir() {
            for entry in std::fs::read_dir(p)? {
                let entry = entry?;
                let sub_path = entry.path();
                if sub_path.is_dir() {
                    out.extend(list_files(&[sub_path])?);
                } else if sub_path.is_file() && is_markdown(&sub_path) {
                    out.push(sub_path);
                }
            }
        } else if p.is_file() {
            // Named files are taken whatever their extension.
            out.push(p.clone());
        }
    }

    out.sort();
    out.dedup();
    Ok(out)
}

fn is_markdown(path: &std::path::Path) -> bool {
    path.to_str().is_some_and(|s| RE_MARKDOWN_FILE.is_match(s))
}
