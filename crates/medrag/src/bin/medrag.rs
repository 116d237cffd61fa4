//! Medrag CLI
//!
//! `medrag build` runs the full build pipeline: load corpus documents,
//! chunk them, persist the collection, and rebuild the similarity index.
//! `medrag chat` opens an interactive session against the built index.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use medrag::config::RagConfig;
use medrag::engine::RagEngine;
use medrag::generation::answer::SynthesisMode;
use medrag::index::IndexBuilder;
use medrag::ingestion::{ChunkPipeline, TextLoader};
use medrag::providers::{EmbeddingProvider, OllamaEmbedder, OllamaGenerator};
use medrag::session::{ChatSession, SessionCommand};
use medrag::storage::ChunkStore;

#[derive(Parser)]
#[command(name = "medrag", version, about = "Document Q&A over a medical corpus")]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Ingest documents, chunk them, and rebuild the similarity index
    Build,
    /// Ask questions against the built index
    Chat {
        /// Answer in simulation mode without probing the generation backend
        #[arg(long)]
        simulate: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "medrag=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => RagConfig::from_file(path)?,
        None => RagConfig::default(),
    };

    match cli.command {
        Command::Build => build(config).await,
        Command::Chat { simulate } => chat(config, simulate).await,
    }
}

async fn build(config: RagConfig) -> anyhow::Result<()> {
    let documents = TextLoader::new(&config.ingest).load()?;
    tracing::info!(documents = documents.len(), "corpus loaded");

    let pieces = ChunkPipeline::new(&config.chunking).run(&documents);
    let chunks = ChunkStore::assign_ids(pieces);
    ChunkStore::save(&config.ingest.chunks_path, &chunks)?;

    let embedder = Arc::new(OllamaEmbedder::new(&config.embeddings));
    if !embedder.health_check().await? {
        tracing::warn!(
            url = %config.embeddings.base_url,
            "embedding backend unreachable; start Ollama and pull the embedding model"
        );
    }

    let index = IndexBuilder::new(embedder, &config).build(&chunks).await?;
    println!(
        "Indexed {} chunks into collection '{}'",
        index.len(),
        config.index.collection
    );
    Ok(())
}

async fn chat(config: RagConfig, simulate: bool) -> anyhow::Result<()> {
    let embedder: Arc<dyn EmbeddingProvider> = Arc::new(OllamaEmbedder::new(&config.embeddings));

    let mode = if simulate {
        SynthesisMode::Simulation
    } else {
        match OllamaGenerator::connect(&config.llm).await {
            Ok(generator) => SynthesisMode::Generation(Arc::new(generator)),
            Err(unavailable) => {
                tracing::warn!(%unavailable, "falling back to simulation mode");
                SynthesisMode::Simulation
            }
        }
    };

    let engine = Arc::new(RagEngine::open(config, embedder, mode)?);

    let stats = engine.stats();
    println!(
        "Corpus: {} documents, {} chunks",
        stats.document_count, stats.chunk_count
    );
    println!(
        "Models: generation={}, embedding={}",
        stats.generation_model, stats.embedding_model
    );
    println!("Commands: /k N (set retrieval breadth) | /quit");

    let mut session = ChatSession::new(Arc::clone(&engine));
    let stdin = std::io::stdin();

    loop {
        print!("\nQuestion: ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        if input.starts_with('/') {
            match SessionCommand::parse(input) {
                Some(SessionCommand::Quit) => break,
                Some(SessionCommand::SetBreadth(k)) => {
                    let k = session.set_breadth(k);
                    println!("Retrieval breadth set to {}", k);
                }
                None => println!("Usage: /k N | /quit"),
            }
            continue;
        }

        let response = session.ask(input).await;
        if response.success {
            println!("\n{}", response.answer);
            if !response.sources.is_empty() {
                println!("\nSources:");
                for source in &response.sources {
                    println!("- {}", source);
                }
            }
        } else {
            println!("\nError: {}", response.error.unwrap_or_default());
        }
    }

    println!("Session ended.");
    Ok(())
}
