use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::{info, warn};

use themetracker::classify::Classifier;
use themetracker::config::Config;
use themetracker::generate::context::load_context;
use themetracker::generate::gemini::GeminiClient;
use themetracker::generate::generate_lecture_themes;
use themetracker::generate::prompt::AgeGroup;
use themetracker::models::TimeWindow;
use themetracker::output::terminal;
use themetracker::pipeline::{mine_source, mine_sources, RunContext, SourceRequest, SummaryCache};
use themetracker::sentiment::lexicon::LexiconScorer;
use themetracker::sources::reddit::RedditClient;
use themetracker::sources::youtube::YouTubeClient;
use themetracker::text::Normalizer;
use themetracker::themes::{combine, synthesize, ThemeAnalyzer};

const DEFAULT_QUERY: &str = "spirituality philosophy meaning of life";

/// Themetracker: trending themes from Reddit and YouTube.
///
/// Mines subreddits and popular videos for recurring words, phrases, and
/// sentiment, then turns them into speech titles and lecture themes.
#[derive(Parser)]
#[command(name = "themetracker", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze subreddits and suggest speech titles
    Themes {
        /// Subreddits to analyze, in priority order
        #[arg(default_values_t = vec!["Existentialism".to_string()])]
        subreddits: Vec<String>,

        /// Time window: week, month, or year
        #[arg(long, default_value = "week")]
        window: TimeWindow,

        /// Max posts per subreddit (default: 100)
        #[arg(long, default_value = "100")]
        limit: usize,
    },

    /// Mine popular YouTube videos and tag their topics
    Videos {
        /// Search query
        #[arg(long, default_value = DEFAULT_QUERY)]
        query: String,

        /// Only this window (default: week, month, and 6 months)
        #[arg(long)]
        window: Option<TimeWindow>,

        /// Max videos per window, up to 50 (default: 10)
        #[arg(long, default_value = "10")]
        limit: usize,
    },

    /// Generate lecture themes for an age group from popular videos
    Lectures {
        /// Target age group: 20-30, 30-40, 40-50, 50-60, or 60+
        #[arg(long, default_value = "30-40")]
        age: AgeGroup,

        /// Search query
        #[arg(long, default_value = DEFAULT_QUERY)]
        query: String,

        /// Only this window (default: all windows combined)
        #[arg(long)]
        window: Option<TimeWindow>,

        /// Max videos per window, up to 50 (default: 10)
        #[arg(long, default_value = "10")]
        limit: usize,

        /// HTML or text file describing the school's philosophy
        #[arg(long)]
        context: Option<PathBuf>,
    },

    /// Tag a single title/description with a topic
    Classify {
        title: String,

        #[arg(long, default_value = "")]
        description: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("themetracker=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;
    let analyzer = build_analyzer(&config)?;
    let cache = SummaryCache::new();

    match cli.command {
        Commands::Themes {
            subreddits,
            window,
            limit,
        } => {
            config.require_reddit()?;
            let client = RedditClient::new(config.reddit_credentials(), &config.reddit_user_agent)?;
            let ctx = RunContext::new(window, limit);

            let requests: Vec<SourceRequest> = subreddits
                .iter()
                .map(|s| {
                    let name = s.trim_start_matches("r/");
                    SourceRequest::new(name, format!("r/{name}"))
                })
                .collect();

            println!(
                "Analyzing {} subreddit(s) over the {}...",
                requests.len(),
                window.reddit_label().to_lowercase()
            );
            let summaries = mine_sources(&client, &analyzer, &cache, &ctx, &requests).await;

            for summary in &summaries {
                terminal::display_source_summary(summary);
            }

            if summaries.iter().all(|s| s.is_empty()) {
                println!(
                    "\n{}",
                    "No data was retrieved from the selected subreddits. Check your Reddit credentials and try again."
                        .yellow()
                );
                return Ok(());
            }

            let view = combine(summaries.iter().map(Arc::as_ref), ctx.limits);
            match synthesize(&view.merged_top_terms, &view.merged_top_bigrams) {
                Ok(titles) => terminal::display_speech_titles(&titles),
                Err(e) => {
                    warn!(error = %e, "Speech title synthesis skipped");
                    terminal::display_insufficient_data(&e);
                }
            }
        }

        Commands::Videos {
            query,
            window,
            limit,
        } => {
            config.require_youtube()?;
            let client = YouTubeClient::new(config.youtube_api_key.clone())?;
            let request = SourceRequest::new(query.as_str(), query.as_str());

            for w in selected_windows(window) {
                let ctx = RunContext::new(w, limit);
                let summary = mine_source(&client, &analyzer, &cache, &ctx, &request).await;
                terminal::display_videos(w.label(), &summary.items);
            }
        }

        Commands::Lectures {
            age,
            query,
            window,
            limit,
            context,
        } => {
            config.require_youtube()?;
            config.require_gemini()?;

            let philosophy = match &context {
                Some(path) => {
                    let text = load_context(path)?;
                    info!(chars = text.chars().count(), path = %path.display(), "Loaded philosophy context");
                    println!("Philosophy context loaded ({} characters)", text.chars().count());
                    Some(text)
                }
                None => {
                    println!(
                        "{}",
                        "No philosophical context loaded. Pass --context <file> to provide one.".dimmed()
                    );
                    None
                }
            };

            let client = YouTubeClient::new(config.youtube_api_key.clone())?;
            let windows = selected_windows(window);
            let source_label = match window {
                Some(w) => w.label(),
                None => "Combined (All Time Periods)",
            };

            let mut summaries = Vec::with_capacity(windows.len());
            for w in windows {
                let ctx = RunContext::new(w, limit);
                let request = SourceRequest::new(query.as_str(), w.label());
                summaries.push(mine_source(&client, &analyzer, &cache, &ctx, &request).await);
            }

            let view = combine(summaries.iter().map(Arc::as_ref), Default::default());
            terminal::display_combined_sample(&view, source_label);
            if view.deduplicated_items.is_empty() {
                return Ok(());
            }

            let generator = GeminiClient::new(config.google_api_key.clone(), config.gemini_model.as_str());
            info!(model = generator.model(), items = view.deduplicated_items.len(), "Requesting lecture themes");
            println!("\nGenerating lecture themes for the {age} age group...");
            let themes = generate_lecture_themes(&generator, &view, age, philosophy.as_deref()).await;
            terminal::display_lecture_themes(age, &themes);
        }

        Commands::Classify { title, description } => {
            let label = analyzer.classifier().classify(&title, &description);
            println!("{label}");
        }
    }

    Ok(())
}

/// Build the analyzer, swapping in custom classification rules when configured.
fn build_analyzer(config: &Config) -> Result<ThemeAnalyzer> {
    let Some(path) = &config.rules_path else {
        return Ok(ThemeAnalyzer::default());
    };

    let classifier = Classifier::from_json_file(path)?;
    info!(rules = classifier.rule_count(), path = %path.display(), "Loaded classification rules");
    Ok(ThemeAnalyzer::new(
        Normalizer::english(),
        Box::new(LexiconScorer::new()),
        classifier,
    ))
}

fn selected_windows(window: Option<TimeWindow>) -> Vec<TimeWindow> {
    match window {
        Some(w) => vec![w],
        None => TimeWindow::ALL.to_vec(),
    }
}
