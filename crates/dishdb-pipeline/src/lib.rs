//! Discovery, scoring and enrichment of the dish catalog.
//!
//! - [`crawler`]: bounded breadth-first walk of the encyclopedia's category graph
//! - [`gap`]: drops candidates already in the catalog or that are not dishes
//! - [`scorer`]: 0-100 food-relevance heuristic
//! - [`region`]: country/region guess from category tags
//! - [`describe`]: description/image enrichment from a page summary
//! - [`orchestrator`]: the batch runs tying it together

pub mod crawler;
pub mod describe;
pub mod error;
pub mod gap;
pub mod options;
pub mod orchestrator;
pub mod region;
pub mod scorer;
pub mod summary;

pub use crawler::crawl;
pub use describe::{enrich_from_encyclopedia, first_sentences};
pub use error::PipelineError;
pub use gap::find_missing;
pub use options::{DiscoveryOptions, EnrichOptions, ImportOptions, Pacing};
pub use orchestrator::{Pipeline, PipelineConfig};
pub use region::{infer_region, RegionGuess};
pub use scorer::{score_candidate, ScoringWeights};
pub use summary::{EnrichItem, EnrichSummary, ImportItem, ImportSummary, ItemFailure};
