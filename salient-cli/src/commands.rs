//! Subcommand handlers.

use std::collections::HashMap;
use std::fs;
use std::io::{Read, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};
use salient_rag::{
    CompareInput, EmbedderKind, Metadata, Method, PipelineConfig, RankingFamily, SourceDocument,
    SummarizationPipeline,
};
use salient_rank::Summarizer;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::cli::{Cli, Command, CompareArgs, QueryArgs, SummarizeArgs};

/// One entry of a documents file.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DocumentEntry {
    Text(String),
    Record(DocumentRecord),
}

/// `{"text": ..., "metadata": {...}}`; `content` is accepted for `text`, and
/// other top-level string fields (`title`, `category`, ...) become metadata.
#[derive(Debug, Deserialize)]
struct DocumentRecord {
    #[serde(alias = "content")]
    text: String,
    #[serde(default)]
    metadata: Metadata,
    #[serde(flatten)]
    extra: HashMap<String, serde_json::Value>,
}

impl From<DocumentEntry> for SourceDocument {
    fn from(entry: DocumentEntry) -> Self {
        match entry {
            DocumentEntry::Text(text) => SourceDocument::new(text),
            DocumentEntry::Record(record) => {
                let mut metadata = record.metadata;
                for (key, value) in record.extra {
                    let value = match value {
                        serde_json::Value::String(s) => s,
                        other => other.to_string(),
                    };
                    metadata.entry(key).or_insert(value);
                }
                SourceDocument { text: record.text, metadata }
            }
        }
    }
}

#[derive(Debug, Serialize)]
struct MethodInfo {
    method: Method,
    family: RankingFamily,
}

/// Parse a documents file's contents.
///
/// # Errors
///
/// Fails if `json` is not an array of strings or document objects.
pub fn parse_documents(json: &str) -> Result<Vec<SourceDocument>> {
    let entries: Vec<DocumentEntry> =
        serde_json::from_str(json).context("documents must be a JSON array of strings or objects")?;
    Ok(entries.into_iter().map(SourceDocument::from).collect())
}

/// Read and parse a documents file.
///
/// # Errors
///
/// Fails if the file cannot be read or parsed.
pub fn load_documents(path: &Path) -> Result<Vec<SourceDocument>> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read documents from {}", path.display()))?;
    parse_documents(&json).with_context(|| format!("invalid documents file {}", path.display()))
}

/// The pipeline configuration from `path`, or the defaults.
///
/// # Errors
///
/// Fails if the file cannot be read, parsed or validated.
pub fn load_config(path: Option<&Path>) -> Result<PipelineConfig> {
    let Some(path) = path else {
        return Ok(PipelineConfig::default());
    };
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read config from {}", path.display()))?;
    let config: PipelineConfig = serde_json::from_str(&json)
        .with_context(|| format!("invalid config file {}", path.display()))?;
    config.validate().with_context(|| format!("invalid config file {}", path.display()))?;
    Ok(config)
}

fn read_input(path: Option<&Path>, stdin: &mut dyn Read) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => {
            let mut text = String::new();
            stdin.read_to_string(&mut text).context("failed to read stdin")?;
            Ok(text)
        }
    }
}

fn parse_method(name: Option<&str>, default: Method) -> Result<Method> {
    match name {
        Some(name) => Ok(name.parse()?),
        None => Ok(default),
    }
}

/// Build a pipeline with the configured embedder; loading may download the
/// MiniLM model on first use.
fn pipeline(config: PipelineConfig) -> Result<SummarizationPipeline> {
    let embedder = config.embedder;
    SummarizationPipeline::builder()
        .config(config)
        .build()
        .with_context(|| format!("failed to start the {embedder} embedder"))
}

fn write_json<T: Serialize>(out: &mut dyn Write, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

/// Execute `cli`, reading stdin from `stdin` and writing results to `out`.
///
/// # Errors
///
/// Any input, configuration or pipeline error, with context.
pub fn run(cli: Cli, stdin: &mut dyn Read, out: &mut dyn Write) -> Result<()> {
    let mut config = load_config(cli.config.as_deref())?;
    if let Some(name) = cli.embedder.as_deref() {
        config.embedder = name.parse::<EmbedderKind>()?;
    }
    match cli.command {
        Command::Summarize(args) => summarize(config, args, stdin, out),
        Command::Query(args) => query(config, args, out),
        Command::Compare(args) => compare(config, args, stdin, out),
        Command::Methods => {
            let methods: Vec<MethodInfo> = Method::all()
                .into_iter()
                .map(|method| MethodInfo { method, family: method.family() })
                .collect();
            write_json(out, &methods)
        }
    }
}

fn summarize(
    config: PipelineConfig,
    args: SummarizeArgs,
    stdin: &mut dyn Read,
    out: &mut dyn Write,
) -> Result<()> {
    let method = parse_method(args.method.as_deref(), config.default_method)?;
    let num_sentences = args.num_sentences.unwrap_or(config.num_sentences);
    let text = read_input(args.input.as_deref(), stdin)?;
    let summarizer = Summarizer::with_config(method, config.rank)?;

    if args.scores {
        return write_json(out, &summarizer.rank(&text)?);
    }
    let summary = summarizer.summarize(&text, num_sentences)?;
    info!(%method, num_sentences, "text summarized");
    writeln!(out, "{summary}")?;
    Ok(())
}

fn query(config: PipelineConfig, args: QueryArgs, out: &mut dyn Write) -> Result<()> {
    let method = parse_method(args.method.as_deref(), config.default_method)?;
    let top_k = args.top_k.unwrap_or(config.top_k);
    let num_sentences = args.num_sentences.unwrap_or(config.num_sentences);

    let documents = load_documents(&args.docs)?;
    let pipeline = pipeline(config)?;
    pipeline.index_documents(documents).context("failed to index documents")?;
    let report = pipeline.query_and_summarize(&args.query, top_k, num_sentences, method)?;
    write_json(out, &report)
}

fn compare(
    mut config: PipelineConfig,
    args: CompareArgs,
    stdin: &mut dyn Read,
    out: &mut dyn Write,
) -> Result<()> {
    let top_k = args.top_k.unwrap_or(config.top_k);
    let num_sentences = args.num_sentences.unwrap_or(config.num_sentences);

    let (pipeline, input) = match (args.docs, args.query, args.text) {
        (Some(docs), Some(query), None) => {
            let documents = load_documents(&docs)?;
            let pipeline = pipeline(config)?;
            pipeline.index_documents(documents).context("failed to index documents")?;
            (pipeline, CompareInput::query(query, top_k))
        }
        (None, None, Some(text)) => {
            let text = read_input(Some(text.as_path()), stdin)?;
            // Direct text is never embedded.
            config.embedder = EmbedderKind::Hashing;
            (pipeline(config)?, CompareInput::text(text))
        }
        _ => bail!("compare needs either --docs with --query, or --text"),
    };
    let comparison = pipeline.compare_methods(input, num_sentences)?;
    write_json(out, &comparison)
}
