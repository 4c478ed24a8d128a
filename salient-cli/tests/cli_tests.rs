//! Drives the command handlers end to end with files on disk.

use std::io::Write;
use std::path::Path;

use clap::Parser;
use salient_cli::{Cli, run};
use tempfile::NamedTempFile;

/// A documents file mixing the three accepted entry shapes.
fn articles() -> String {
    serde_json::json!([
        {
            "title": "AI in Healthcare",
            "content": "Artificial intelligence is transforming healthcare. Machine learning \
                helps diagnose diseases. Deep learning analyzes medical images. AI improves \
                patient outcomes.",
            "category": "AI/ML"
        },
        {
            "text": "Quantum computers use quantum mechanics. They can solve complex problems. \
                Quantum algorithms are revolutionary. The technology is still developing.",
            "metadata": {"title": "Quantum Computing"}
        },
        "Cybersecurity threats are evolving. Organizations need robust defenses. AI helps \
            detect anomalies. Zero-trust architecture is becoming standard."
    ])
    .to_string()
}

const AI_TEXT: &str = "Artificial intelligence is revolutionizing many industries. Machine \
    learning algorithms can now process vast amounts of data. Deep learning models achieve \
    remarkable accuracy. Natural language processing enables computers to understand human \
    language. Computer vision systems can recognize objects and faces. AI is transforming \
    healthcare, finance, and transportation. The future of AI holds great promise and \
    challenges.";

fn temp_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn path(file: &NamedTempFile) -> &str {
    file.path().to_str().unwrap()
}

fn execute_as_given(args: &[&str], stdin: &str) -> anyhow::Result<String> {
    let cli = Cli::try_parse_from(args)?;
    let mut out = Vec::new();
    run(cli, &mut stdin.as_bytes(), &mut out)?;
    Ok(String::from_utf8(out)?)
}

/// Runs with the offline hashing embedder so no model is downloaded.
fn execute(args: &[&str], stdin: &str) -> anyhow::Result<String> {
    let mut args = args.to_vec();
    args.extend(["--embedder", "hashing"]);
    execute_as_given(&args, stdin)
}

fn execute_json(args: &[&str]) -> serde_json::Value {
    serde_json::from_str(&execute(args, "").unwrap()).unwrap()
}

#[test]
fn summarize_reads_stdin() {
    let output = execute(&["salient", "summarize", "-m", "lexrank", "-n", "2"], AI_TEXT).unwrap();
    let summary = output.trim_end();
    assert_eq!(salient_rank::split_sentences(summary).len(), 2);
    assert!(AI_TEXT.len() > summary.len());
}

#[test]
fn summarize_reads_a_file() {
    let text = temp_file(AI_TEXT);
    let args = ["salient", "summarize", "--method", "statistical", path(&text)];
    let output = execute(&args, "").unwrap();
    assert_eq!(salient_rank::split_sentences(output.trim_end()).len(), 3);
}

#[test]
fn summarize_scores_lists_every_sentence() {
    let output = execute(&["salient", "summarize", "--scores", "-"], AI_TEXT).unwrap();
    let scores: serde_json::Value = serde_json::from_str(&output).unwrap();
    let scores = scores.as_array().unwrap();
    assert_eq!(scores.len(), 7);
    assert_eq!(scores[0]["sentence"]["index"], 0);
    assert!(scores.iter().all(|s| s["score"].as_f64().unwrap() >= 0.0));
}

#[test]
fn summarize_rejects_empty_input_and_unknown_methods() {
    assert!(execute(&["salient", "summarize"], "   ").is_err());
    let err = execute(&["salient", "summarize", "-m", "abstractive"], AI_TEXT).unwrap_err();
    assert!(err.to_string().contains("abstractive"));
}

#[test]
fn query_prints_report() {
    let docs = temp_file(&articles());
    let report = execute_json(&[
        "salient",
        "query",
        "--docs",
        path(&docs),
        "--query",
        "artificial intelligence in healthcare",
        "--top-k",
        "2",
        "-n",
        "2",
    ]);
    assert_eq!(report["query"], "artificial intelligence in healthcare");
    assert_eq!(report["method"], "textrank");
    let retrieved = report["retrieved_documents"].as_array().unwrap();
    assert_eq!(retrieved.len(), 2);
    assert_eq!(report["num_retrieved"], 2);
    assert_eq!(retrieved[0]["metadata"]["title"], "AI in Healthcare");
    assert_eq!(retrieved[0]["metadata"]["category"], "AI/ML");
    assert!(report["summary"].as_str().unwrap().ends_with('.'));
}

#[test]
fn config_file_sets_defaults_and_flags_override() {
    let docs = temp_file(&articles());
    let config = temp_file(r#"{"top_k": 1, "default_method": "luhn"}"#);
    let report = execute_json(&[
        "salient",
        "--config",
        path(&config),
        "query",
        "--docs",
        path(&docs),
        "-q",
        "quantum computing",
    ]);
    assert_eq!(report["method"], "luhn");
    assert_eq!(report["retrieved_documents"].as_array().unwrap().len(), 1);

    let report = execute_json(&[
        "salient",
        "query",
        "--docs",
        path(&docs),
        "-q",
        "quantum computing",
        "-k",
        "3",
        "--config",
        path(&config),
    ]);
    assert_eq!(report["retrieved_documents"].as_array().unwrap().len(), 3);
}

#[test]
fn embedder_comes_from_config_or_flag() {
    let docs = temp_file(&articles());
    let config = temp_file(r#"{"embedder": "hashing", "top_k": 1}"#);
    let args =
        ["salient", "--config", path(&config), "query", "--docs", path(&docs), "-q", "quantum"];
    let report: serde_json::Value =
        serde_json::from_str(&execute_as_given(&args, "").unwrap()).unwrap();
    assert_eq!(report["retrieved_documents"][0]["metadata"]["title"], "Quantum Computing");

    let err = execute_as_given(&["salient", "--embedder", "word2vec", "methods"], "").unwrap_err();
    assert!(err.to_string().contains("word2vec"));
}

#[test]
fn comparing_text_needs_no_embedding_model() {
    let text = temp_file(AI_TEXT);
    let args = ["salient", "compare", "--embedder", "minilm", "--text", path(&text), "-n", "2"];
    let comparison: serde_json::Value =
        serde_json::from_str(&execute_as_given(&args, "").unwrap()).unwrap();
    assert_eq!(comparison["num_retrieved"], 0);
}

#[test]
fn invalid_config_is_reported() {
    let config = temp_file(r#"{"top_k": 0}"#);
    assert!(execute(&["salient", "--config", path(&config), "methods"], "").is_err());
    assert!(execute(&["salient", "--config", "/nonexistent/salient.json", "methods"], "").is_err());
}

#[test]
fn compare_with_query_and_with_text() {
    let docs = temp_file(&articles());
    let comparison = execute_json(&[
        "salient",
        "compare",
        "--docs",
        path(&docs),
        "--query",
        "cybersecurity threats",
        "-k",
        "1",
        "-n",
        "2",
    ]);
    assert_eq!(comparison["query"], "cybersecurity threats");
    assert_eq!(comparison["graph"]["family"], "graph");
    assert_eq!(comparison["statistical"]["method"], "tfidf");
    assert_eq!(comparison["retrieval_scores"].as_array().unwrap().len(), 1);
    assert_eq!(comparison["num_retrieved"], 1);

    let text = temp_file(AI_TEXT);
    let comparison = execute_json(&["salient", "compare", "--text", path(&text)]);
    assert!(comparison.get("query").is_none());
    assert!(comparison["retrieved_documents"].as_array().unwrap().is_empty());
}

#[test]
fn methods_lists_both_families() {
    let methods = execute_json(&["salient", "methods"]);
    let methods = methods.as_array().unwrap();
    assert_eq!(methods.len(), 5);
    assert_eq!(methods[0]["method"], "textrank");
    assert_eq!(methods[3]["family"], "statistical");
}

#[test]
fn missing_documents_file_is_an_error() {
    let missing = Path::new("/nonexistent/docs.json").to_str().unwrap();
    let err =
        execute(&["salient", "query", "--docs", missing, "-q", "anything"], "").unwrap_err();
    assert!(format!("{err:#}").contains("docs.json"));
}
