use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use draftrag_core::config::Config;
use draftrag_core::{Corpus, CorpusProvider, DirectoryCorpus, Hit};
use draftrag_text::{format_style_block, LexicalRetriever, RetrievalSummary, Segmenter};

#[derive(Parser)]
#[command(name = "draftrag", about = "Style and evidence retrieval over a plain-text corpus")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Rank corpus documents against a query
    Search {
        query: String,
        /// Corpus directory (defaults to `data.corpus_dir`)
        #[arg(long)]
        dir: Option<PathBuf>,
        /// Maximum number of hits, 0 for all (defaults to `retrieval.top_k`)
        #[arg(long)]
        top_k: Option<usize>,
        /// Print hits as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the style-only block a prompt would receive
    Style {
        query: String,
        #[arg(long)]
        dir: Option<PathBuf>,
        #[arg(long)]
        top_k: Option<usize>,
    },
    /// Segment a text file and print sentences with their spans
    Sentences {
        file: PathBuf,
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn load_corpus(config: &Config, dir: Option<PathBuf>) -> anyhow::Result<Corpus> {
    let dir = match dir {
        Some(d) => d,
        None => config.corpus_dir(&std::env::current_dir()?)?,
    };
    tracing::info!(dir = %dir.display(), "loading corpus");
    Ok(DirectoryCorpus::new(dir).load()?)
}

fn print_hits(query: &str, hits: &[Hit]) {
    let summary = RetrievalSummary::from_hits(hits);
    println!("🔍 draftrag search\n=================");
    println!("Query: {}", query);
    let note = summary.message.map(|m| format!(" ({})", m)).unwrap_or_default();
    println!("Status: {:?}{}", summary.status, note);
    for (i, hit) in hits.iter().filter(|h| h.is_ok()).enumerate() {
        println!("\n  {}. score={}  file={}", i + 1, hit.score, hit.filename.as_deref().unwrap_or("unknown"));
        if !hit.style_snippet.is_empty() {
            println!("     ✍️  Style: {}", hit.style_snippet);
        }
        for (sentence, span) in hit.evidence_sentences.iter().zip(&hit.evidence_sentence_spans) {
            println!("     📝 [{}..{}] {}", span.start, span.end, sentence);
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = Config::load().map_err(|e| {
        eprintln!("Error loading config: {}", e);
        e
    })?;
    let retriever = LexicalRetriever::from_config(&config)?;

    match cli.command {
        Command::Search { query, dir, top_k, json } => {
            let corpus = load_corpus(&config, dir)?;
            let hits = retriever.search(&corpus, &query, top_k.unwrap_or(retriever.config().top_k));
            if json {
                let summary = RetrievalSummary::from_hits(&hits);
                let out = serde_json::json!({
                    "rag_query": query,
                    "rag_status": summary.status,
                    "rag_message": summary.message,
                    "corpus_hits": hits,
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                print_hits(&query, &hits);
            }
        }
        Command::Style { query, dir, top_k } => {
            let corpus = load_corpus(&config, dir)?;
            let hits = retriever.search(&corpus, &query, top_k.unwrap_or(retriever.config().top_k));
            let summary = RetrievalSummary::from_hits(&hits);
            println!("[Retrieval Status] {}", serde_json::to_string(&summary.status)?.trim_matches('"'));
            println!("[Corpus Snippets (STYLE ONLY)]\n{}", format_style_block(&hits));
        }
        Command::Sentences { file, json } => {
            let text = read_text(&file)?;
            let segmenter = Segmenter::new(config.retrieval()?.min_sentence_chars);
            let sentences = segmenter.segment(&text);
            if json {
                println!("{}", serde_json::to_string_pretty(&sentences)?);
            } else {
                for (i, s) in sentences.iter().enumerate() {
                    println!("{:>3}. [{}..{}] {}", i, s.start_char, s.end_char, s.text);
                }
                println!("\n📊 {} sentences", sentences.len());
            }
        }
    }
    Ok(())
}

fn read_text(path: &Path) -> anyhow::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
