use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};
use wordrank_core::{
    paginate, remove_duplicates, DocumentId, DocumentStatus, ExecutionMode, SearchServer,
};

/// One JSONL input line, e.g.
/// `{"id": 1, "text": "cat in the city", "status": "actual", "ratings": [8, -3]}`.
#[derive(Debug, Deserialize)]
struct InputDoc {
    id: DocumentId,
    text: String,
    #[serde(default = "default_status")]
    status: DocumentStatus,
    #[serde(default)]
    ratings: Vec<i32>,
}

fn default_status() -> DocumentStatus {
    DocumentStatus::Actual
}

#[derive(Parser)]
#[command(name = "wordrank")]
#[command(about = "Ranked TF-IDF search over JSONL documents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Index documents and answer one or more queries
    Search {
        /// JSONL documents file
        #[arg(long)]
        docs: PathBuf,
        /// Space-separated stop words
        #[arg(long, default_value = "")]
        stop_words: String,
        /// Evaluate queries across rayon workers
        #[arg(long, default_value_t = false)]
        parallel: bool,
        /// Print results in pages of this size
        #[arg(long)]
        page_size: Option<usize>,
        /// Queries, may use minus words, e.g. "cat -city"
        #[arg(required = true)]
        queries: Vec<String>,
    },
    /// Index documents, drop vocabulary duplicates and report what remains
    Dedup {
        /// JSONL documents file
        #[arg(long)]
        docs: PathBuf,
        /// Space-separated stop words
        #[arg(long, default_value = "")]
        stop_words: String,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Search {
            docs,
            stop_words,
            parallel,
            page_size,
            queries,
        } => search(&docs, &stop_words, parallel, page_size, &queries),
        Commands::Dedup { docs, stop_words } => dedup(&docs, &stop_words),
    }
}

fn load_server(docs: &Path, stop_words: &str) -> Result<SearchServer> {
    let mut server = SearchServer::from_stop_words_text(stop_words)?;
    let file = File::open(docs).with_context(|| format!("opening {}", docs.display()))?;
    for (line_no, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let doc: InputDoc = serde_json::from_str(&line)
            .with_context(|| format!("parsing document on line {}", line_no + 1))?;
        server
            .add_document(doc.id, &doc.text, doc.status, &doc.ratings)
            .with_context(|| format!("indexing document {}", doc.id))?;
    }
    info!(documents = server.document_count(), "index built");
    Ok(server)
}

fn search(
    docs: &Path,
    stop_words: &str,
    parallel: bool,
    page_size: Option<usize>,
    queries: &[String],
) -> Result<()> {
    let server = load_server(docs, stop_words)?;
    let mode = if parallel {
        ExecutionMode::Parallel
    } else {
        ExecutionMode::Sequential
    };

    for query in queries {
        let found = server
            .find_top_documents(mode, query)
            .with_context(|| format!("evaluating query {query:?}"))?;
        println!("query: {query}");
        match page_size {
            Some(page_size) => {
                for (page_no, page) in paginate(&found, page_size).iter().enumerate() {
                    println!("-- page {}", page_no + 1);
                    for doc in page.iter() {
                        println!("{doc}");
                    }
                }
            }
            None => {
                for doc in &found {
                    println!("{doc}");
                }
            }
        }
    }
    Ok(())
}

fn dedup(docs: &Path, stop_words: &str) -> Result<()> {
    let mut server = load_server(docs, stop_words)?;
    let removed = remove_duplicates(&mut server);
    println!(
        "removed {} duplicate document(s): {:?}",
        removed.len(),
        removed
    );
    println!("{} document(s) remain", server.document_count());
    Ok(())
}
