// Mining pipeline — run parameters, per-source mining, and the summary cache.

pub mod cache;
pub mod mining;

pub use cache::{SourceKey, SummaryCache};
pub use mining::{mine_source, mine_sources, RunContext, SourceRequest};
