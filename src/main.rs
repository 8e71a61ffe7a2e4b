use clap::{Parser, ValueEnum};
use indexmap::IndexMap;
use lessondoc::config::Config;
use lessondoc::model::{Document, ExampleTranscript};
use lessondoc::{emit, validate, TranscriptRules};
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

#[derive(Clone, Copy, ValueEnum)]
enum Emit {
    /// One-line summary per document
    Summary,
    /// Re-serialized Markdown
    Markdown,
    /// Full document model as JSON
    Json,
    /// Transcript pairs as JSON
    Transcripts,
    /// Table of contents outline
    Toc,
}

#[derive(Parser)]
#[command(
    name = "lessondoc",
    about = "lessondoc — parse tutorial Markdown into sections, code blocks and REPL transcripts"
)]
struct Cli {
    /// Input file(s) or directory
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// What to print
    #[arg(long, value_enum, default_value = "summary")]
    emit: Emit,

    /// Parse and decompose transcripts only, print nothing but warnings
    #[arg(long)]
    check: bool,

    /// Fail when the document has no table of contents
    #[arg(long)]
    require_toc: bool,

    /// Config file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn die(msg: &str) -> ! {
    eprintln!("error: {}", msg);
    process::exit(1);
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn load_config(path: &Path) -> Config {
    let text = fs::read_to_string(path).unwrap_or_else(|e| die(&format!("cannot read config: {}", e)));
    serde_json::from_str(&text).unwrap_or_else(|e| die(&format!("invalid config JSON: {}", e)))
}

struct Parsed {
    doc: Document,
    transcripts: Vec<ExampleTranscript>,
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| die(&format!("cannot encode JSON: {}", e)))
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Load config
    let mut config = if let Some(ref config_path) = cli.config {
        load_config(config_path)
    } else {
        let defaults = ["lessondoc.config.json", "config/lessondoc.config.json"];
        defaults
            .iter()
            .map(|p| PathBuf::from(*p))
            .find(|p| p.is_file())
            .map(|p| {
                debug!("using config {}", p.display());
                load_config(&p)
            })
            .unwrap_or_default()
    };

    // CLI overrides
    if cli.require_toc {
        config.require_toc = true;
    }

    let rules = TranscriptRules::from_config(&config).unwrap_or_else(|e| die(&e.to_string()));

    // Collect input files
    let files = lessondoc::list_files(&cli.inputs).unwrap_or_else(|e| die(&format!("{}", e)));
    if files.is_empty() {
        die("no input files found");
    }

    // Parse every file on its own
    let mut parsed: IndexMap<String, Parsed> = IndexMap::new();
    for fp in &files {
        let name = fp.display().to_string();
        let content =
            fs::read_to_string(fp).unwrap_or_else(|e| die(&format!("cannot read {}: {}", name, e)));
        let doc = lessondoc::parse(&content, &config).unwrap_or_else(|e| die(&format!("{}: {}", name, e)));
        let transcripts = doc
            .transcripts(&rules)
            .unwrap_or_else(|e| die(&format!("{}: {}", name, e)));
        debug!("validating {}", name);
        let warnings = validate::validate(&doc);
        info!(
            "parsed {} ({} sections, {} warning(s))",
            name,
            doc.sections.len(),
            warnings.len()
        );
        parsed.insert(name, Parsed { doc, transcripts });
    }

    if cli.check {
        for name in parsed.keys() {
            eprintln!("ok: {}", name);
        }
        return;
    }

    let result = match cli.emit {
        Emit::Summary => parsed
            .iter()
            .map(|(name, p)| format!("{}: {}\n", name, emit::summary(&p.doc, &p.transcripts)))
            .collect::<String>(),
        Emit::Markdown => emit::markdown(parsed.values().map(|p| &p.doc)),
        Emit::Json => {
            let docs: IndexMap<&str, &Document> =
                parsed.iter().map(|(k, p)| (k.as_str(), &p.doc)).collect();
            to_json(&docs) + "\n"
        }
        Emit::Transcripts => {
            let all: IndexMap<&str, &[ExampleTranscript]> = parsed
                .iter()
                .map(|(k, p)| (k.as_str(), p.transcripts.as_slice()))
                .collect();
            to_json(&all) + "\n"
        }
        Emit::Toc => parsed
            .iter()
            .map(|(name, p)| {
                let mut text = format!("{}:\n", name);
                for line in emit::outline(&p.doc) {
                    text.push_str("  ");
                    text.push_str(&line);
                    text.push('\n');
                }
                text
            })
            .collect::<String>(),
    };

    if let Some(ref output_path) = cli.output {
        fs::write(output_path, &result)
            .unwrap_or_else(|e| die(&format!("cannot write {}: {}", output_path.display(), e)));
        let examples: usize = parsed
            .values()
            .flat_map(|p| p.transcripts.iter())
            .map(|t| t.pairs.len())
            .sum();
        eprintln!(
            "parsed {} file(s) -> {} (~{} transcript example(s))",
            files.len(),
            output_path.display(),
            examples
        );
    } else {
        print!("{}", result);
    }
}
