//! folio-ingest - walk the book corpus, chunk, embed, and populate the
//! vector collection.
//!
//! The run is idempotent: the collection is reset before any point is
//! written, so re-running after a corpus change replaces the index wholesale.

use std::path::Path;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use folio::{FolioConfig, RagPipeline};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_target(false)
        .init();

    let cfg = FolioConfig::load().context("loading configuration")?;
    let pipeline = RagPipeline::from_config(&cfg).context("building pipeline")?;

    tracing::info!(
        corpus = %cfg.corpus_path,
        collection = %cfg.rag.collection,
        model = %cfg.embedding.model,
        "starting ingestion"
    );

    let points = pipeline
        .ingest(Path::new(&cfg.corpus_path))
        .await
        .context("ingestion failed")?;

    tracing::info!(points, "ingestion finished");
    Ok(())
}
