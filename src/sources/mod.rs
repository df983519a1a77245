// Content sources — fetcher trait and the Reddit / YouTube adapters.

pub mod reddit;
pub mod traits;
pub mod youtube;
