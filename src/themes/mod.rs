// Theme extraction — frequency tables, per-source summaries, cross-source
// combination, and template-based title synthesis.

pub mod combine;
pub mod frequency;
pub mod summary;
pub mod synth;

pub use combine::{combine, TopLimits};
pub use frequency::{aggregate, Bigram, FrequencyTable};
pub use summary::ThemeAnalyzer;
pub use synth::{synthesize, InsufficientDataError};
