use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, EnvFilter};
use vsm_core::engine::SearchResults;
use vsm_core::{load_corpus, IrSystem, LoadOptions, QueryMode};

mod repl;

#[derive(Parser)]
#[command(name = "vsm")]
#[command(about = "Boolean and cosine-ranked retrieval over a directory of text documents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Stem raw/*.txt and (re)write the stemmed cache
    Stem {
        /// Data directory containing raw/ and/or stemmed/
        #[arg(long)]
        data: PathBuf,
    },
    /// Run a single query and print the matches
    Search {
        #[arg(long)]
        data: PathBuf,
        /// `ranked` (cosine similarity) or `boolean` (AND)
        #[arg(long, default_value_t = QueryMode::Ranked)]
        mode: QueryMode,
        /// Maximum ranked results to print
        #[arg(long, default_value_t = 10)]
        k: usize,
        /// Re-stem raw/ even if a stemmed cache exists
        #[arg(long, default_value_t = false)]
        rebuild_cache: bool,
        #[arg(required = true)]
        query: Vec<String>,
    },
    /// Read queries from stdin and print ranked matches until `x`
    Repl {
        #[arg(long)]
        data: PathBuf,
        #[arg(long, default_value_t = false)]
        rebuild_cache: bool,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Stem { data } => {
            let corpus = load_corpus(&data, &LoadOptions { rebuild_cache: true })?;
            tracing::info!(num_docs = corpus.len(), data = %data.display(), "stemmed cache written");
            println!("stemmed {} documents into {}", corpus.len(), data.join("stemmed").display());
            Ok(())
        }
        Commands::Search { data, mode, k, rebuild_cache, query } => {
            let system = load_system(&data, rebuild_cache)?;
            let stdout = io::stdout();
            print_search(&system, &query.join(" "), mode, k, &mut stdout.lock())
        }
        Commands::Repl { data, rebuild_cache } => {
            let system = load_system(&data, rebuild_cache)?;
            let stdin = io::stdin();
            let stdout = io::stdout();
            repl::run(&system, stdin.lock(), &mut stdout.lock())
        }
    }
}

fn load_system(data: &Path, rebuild_cache: bool) -> Result<IrSystem> {
    let system = IrSystem::load(data, &LoadOptions { rebuild_cache })?;
    tracing::info!(num_docs = system.num_docs(), num_terms = system.vocabulary().len(), "index ready");
    Ok(system)
}

fn print_search<W: Write>(system: &IrSystem, query: &str, mode: QueryMode, k: usize, out: &mut W) -> Result<()> {
    match system.search(query, mode)? {
        SearchResults::Boolean(docs) => {
            for doc in docs {
                writeln!(out, "{}: {}", doc, system.title_of(doc).unwrap_or("?"))?;
            }
        }
        SearchResults::Ranked(ranked) => {
            for hit in ranked.into_iter().take(k) {
                writeln!(out, "{}: {}", hit.score, system.title_of(hit.doc_id).unwrap_or("?"))?;
            }
        }
    }
    Ok(())
}
