// Themetracker: theme mining for Reddit and YouTube
//
// This is the library root. Each module corresponds to a stage of the
// fetch -> normalize -> count -> combine -> synthesize pipeline, plus the
// platform adapters and terminal output around it.

pub mod classify;
pub mod config;
pub mod generate;
pub mod models;
pub mod output;
pub mod pipeline;
pub mod sentiment;
pub mod sources;
pub mod text;
pub mod themes;
