//! `enrich` command handlers.

use clap::{Args, Subcommand};
use dishdb_pipeline::EnrichOptions;
use uuid::Uuid;

use crate::print_json;
use crate::wiring::CliPipeline;

/// Sub-commands available under `enrich`.
#[derive(Debug, Subcommand)]
pub enum EnrichCommands {
    /// Fill missing calories and nutrients
    Nutrition(EnrichArgs),
    /// Fill missing descriptions and images from the encyclopedia
    Wiki(EnrichArgs),
}

#[derive(Debug, Args)]
pub struct EnrichArgs {
    /// Enrich only this entry
    #[arg(long)]
    pub id: Option<Uuid>,
    /// Pause after every this many entries
    #[arg(long, default_value_t = 10)]
    pub batch_size: usize,
    /// Write to the catalog (without this the run is a dry run)
    #[arg(long)]
    pub apply: bool,
}

impl EnrichArgs {
    fn options(&self) -> EnrichOptions {
        EnrichOptions {
            dry_run: !self.apply,
            batch_size: self.batch_size,
        }
    }
}

pub(crate) async fn run_enrich(pipeline: &CliPipeline, command: EnrichCommands) -> anyhow::Result<()> {
    match command {
        EnrichCommands::Nutrition(args) => {
            if let Some(id) = args.id {
                let item = pipeline.enrich_entry_nutrition(id, !args.apply).await?;
                if item.is_none() {
                    tracing::warn!(%id, "no nutrition source matched");
                }
                return print_json(&item);
            }
            let summary = pipeline.bulk_enrich_nutrition(&args.options()).await?;
            print_json(&summary)
        }
        EnrichCommands::Wiki(args) => {
            if let Some(id) = args.id {
                let item = pipeline
                    .enrich_entry_from_encyclopedia(id, !args.apply)
                    .await?;
                if item.is_none() {
                    tracing::warn!(%id, "nothing to fill from the encyclopedia");
                }
                return print_json(&item);
            }
            let summary = pipeline.bulk_enrich_from_wikipedia(&args.options()).await?;
            print_json(&summary)
        }
    }
}
