//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use salient_telemetry::TelemetryConfig;

/// Salient - query-focused extractive summarization
#[derive(Debug, Parser)]
#[command(name = "salient")]
#[command(version)]
#[command(
    about = "Retrieve relevant documents and summarize them with graph or statistical ranking"
)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Pipeline configuration file (JSON); flags override its values
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Embedding provider for retrieval: minilm (all-MiniLM-L6-v2) or hashing
    #[arg(long, global = true, value_name = "NAME")]
    pub embedder: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Logging setup implied by the global flags.
    pub fn telemetry_config(&self) -> TelemetryConfig {
        TelemetryConfig::from_verbosity(self.verbose).with_json(self.json_logs)
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Summarize a text file or stdin
    Summarize(SummarizeArgs),
    /// Index documents, retrieve the best matches for a query and summarize them
    Query(QueryArgs),
    /// Summarize the same input with a graph and a statistical method
    Compare(CompareArgs),
    /// List the available ranking methods
    Methods,
}

#[derive(Debug, Args)]
pub struct SummarizeArgs {
    /// Ranking method or family (textrank, lexrank, luhn, tfidf, frequency, graph, statistical)
    #[arg(short, long)]
    pub method: Option<String>,

    /// Number of sentences to keep
    #[arg(short = 'n', long)]
    pub num_sentences: Option<usize>,

    /// Print every sentence with its score instead of the summary
    #[arg(long)]
    pub scores: bool,

    /// Input file; `-` or omitted reads stdin
    #[arg(value_name = "FILE")]
    pub input: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct QueryArgs {
    /// Documents file: a JSON array of strings or `{"text", "metadata"}` objects
    #[arg(long, value_name = "FILE")]
    pub docs: PathBuf,

    /// Natural-language query
    #[arg(short, long)]
    pub query: String,

    /// Number of documents to retrieve
    #[arg(short = 'k', long)]
    pub top_k: Option<usize>,

    /// Number of sentences to keep
    #[arg(short = 'n', long)]
    pub num_sentences: Option<usize>,

    /// Ranking method or family
    #[arg(short, long)]
    pub method: Option<String>,
}

#[derive(Debug, Args)]
pub struct CompareArgs {
    /// Documents file to retrieve from
    #[arg(long, value_name = "FILE", requires = "query", conflicts_with = "text")]
    pub docs: Option<PathBuf>,

    /// Query used with --docs
    #[arg(short, long, requires = "docs")]
    pub query: Option<String>,

    /// Text file to summarize directly
    #[arg(long, value_name = "FILE")]
    pub text: Option<PathBuf>,

    /// Number of documents to retrieve
    #[arg(short = 'k', long)]
    pub top_k: Option<usize>,

    /// Number of sentences to keep
    #[arg(short = 'n', long)]
    pub num_sentences: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_apply_after_subcommand() {
        let args = ["salient", "methods", "-vv", "--json-logs", "--embedder", "hashing"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.embedder.as_deref(), Some("hashing"));
        let telemetry = cli.telemetry_config();
        assert_eq!(telemetry.level, "debug");
        assert!(telemetry.json);
    }

    #[test]
    fn compare_rejects_docs_with_text() {
        let result = Cli::try_parse_from([
            "salient", "compare", "--docs", "d.json", "--query", "q", "--text", "t.txt",
        ]);
        assert!(result.is_err());
        assert!(Cli::try_parse_from(["salient", "compare", "--docs", "d.json"]).is_err());
    }

    #[test]
    fn query_requires_docs_and_query() {
        assert!(Cli::try_parse_from(["salient", "query", "--query", "q"]).is_err());
        let args = ["salient", "query", "--docs", "d.json", "-q", "solar", "-k", "2"];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Command::Query(args) => {
                assert_eq!(args.query, "solar");
                assert_eq!(args.top_k, Some(2));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
