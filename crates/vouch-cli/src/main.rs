//! Vouch CLI - ask one question against a seeded demo corpus and watch the
//! gating pipeline work.
//!
//! Uses the deterministic mock providers, so it runs without any model
//! backend. Point `--config` at a TOML file to change retrieval and policy
//! settings.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use vouch_classifier::Classifier;
use vouch_domain::traits::EmbeddingProvider;
use vouch_domain::{QueryOutcome, SourceRef, StoredChunk};
use vouch_llm::{MockEmbeddingProvider, MockGenerativeProvider, StaticProviders};
use vouch_pipeline::{Pipeline, PipelineConfig, QueryRequest};
use vouch_retriever::MemoryDocumentStore;

#[derive(Parser)]
#[command(name = "vouch", about = "Gated question answering over a demo corpus")]
struct Cli {
    /// The question to ask
    question: String,

    /// Tenant whose corpus is consulted
    #[arg(long, default_value = "demo")]
    tenant: String,

    /// Pipeline configuration file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Model override, bypassing the policy lookup
    #[arg(long)]
    model: Option<String>,

    /// Minimum similarity score for evidence.
    /// Mock embeddings of unrelated texts score near zero, so the demo
    /// default ranks without a floor.
    #[arg(long, default_value_t = 0.0)]
    min_score: f32,

    /// Maximum evidence chunks per query
    #[arg(long, default_value_t = 3)]
    limit: usize,

    /// Log per-claim score breakdowns
    #[arg(long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .init();

    let mut config = match &cli.config {
        Some(path) => PipelineConfig::from_path(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => {
            eprintln!("Warning: no config file specified, using defaults");
            PipelineConfig::default()
        }
    };
    config.retrieval.min_score = cli.min_score;
    config.retrieval.limit = cli.limit;

    let embedder = Arc::new(MockEmbeddingProvider::new(64));
    let store = seed_corpus(&cli.tenant, embedder.as_ref()).await?;

    let resolver = StaticProviders::new(
        embedder,
        Arc::new(MockGenerativeProvider::echo_evidence()),
    );
    let pipeline = Pipeline::new(
        Classifier::default(),
        Arc::new(store),
        Arc::new(resolver),
        config,
    );

    let mut request = QueryRequest::new(cli.question.as_str(), cli.tenant.as_str());
    request.model = cli.model;
    request.debug = cli.verbose;

    let outcome = pipeline.process_query(request).await?;
    print_outcome(&outcome);

    Ok(())
}

/// Seed a small bilingual corpus for the given tenant.
async fn seed_corpus(
    tenant: &str,
    embedder: &MockEmbeddingProvider,
) -> anyhow::Result<MemoryDocumentStore> {
    let facts: [(&str, &str, Option<u32>); 4] = [
        ("guide-it", "La fotosintesi produce ossigeno a partire dalla luce solare.", Some(12)),
        ("guide-it", "Roma è stata fondata, secondo la tradizione, nel 753 a.C.", Some(48)),
        ("handbook-en", "Photosynthesis converts light energy into chemical energy.", None),
        ("handbook-en", "The Colosseum could hold about fifty thousand spectators.", Some(7)),
    ];

    let mut store = MemoryDocumentStore::new();
    for (source_id, text, page) in facts {
        let embedding = embedder
            .embed(text)
            .await
            .map_err(|e| anyhow::anyhow!("seeding corpus: {}", e))?;
        let mut source = SourceRef::new(source_id);
        source.url = Some(format!("https://docs.example.com/{}.pdf", source_id));
        source.page = page;
        store.add(StoredChunk {
            tenant_id: tenant.to_string(),
            text: text.to_string(),
            embedding: Some(embedding.vector),
            source,
        });
    }
    Ok(store)
}

fn print_outcome(outcome: &QueryOutcome) {
    match outcome {
        QueryOutcome::Answered(answer) => {
            println!("Answer: {}", answer.answer);
            println!(
                "Status: {} (avg urs {:.2}, model {})",
                answer.verification_status, answer.avg_urs, answer.model_used
            );
            println!("Verified claims:");
            for claim in &answer.verified_claims {
                println!("  [{}] {:.2}  {}", claim.label, claim.urs, claim.claim.text);
                for source in &claim.sources {
                    match source.resolved_url() {
                        Some(url) => println!("        <- {} ({})", source.source_id, url),
                        None => println!("        <- {}", source.source_id),
                    }
                }
            }
            if !answer.blocked_claims.is_empty() {
                println!("Blocked claims:");
                for claim in &answer.blocked_claims {
                    println!(
                        "  [{}] {:.2}  {}  ({})",
                        claim.label, claim.urs, claim.claim.text, claim.reason
                    );
                }
            }
            println!(
                "Tokens: {} prompt, {} completion",
                answer.token_usage.prompt_tokens, answer.token_usage.completion_tokens
            );
        }
        QueryOutcome::NoResults { reason, .. } => {
            println!("No results ({:?}); nothing reliable to say.", reason);
        }
        QueryOutcome::Refused { decision } => {
            println!(
                "Refused ({}): {}",
                decision.action, decision.reason
            );
        }
    }
}
