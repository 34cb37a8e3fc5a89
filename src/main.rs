use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use yt_searcher::{Searcher, Settings, VideoRecord};

#[derive(Parser)]
#[command(name = "yt_search", about = "Search YouTube results without an API key")]
struct Cli {
    /// Search keywords
    #[arg(required = true)]
    keyword: Vec<String>,
    /// Sort order: relevance, upload_date, views, rating (unknown values mean relevance)
    #[arg(short, long)]
    sort: Option<String>,
    /// Max results to print
    #[arg(short = 'n', long)]
    limit: Option<usize>,
    /// Print records as a JSON array
    #[arg(long)]
    json: bool,
    /// Results page URL
    #[arg(long)]
    base_url: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let mut settings = Settings::load().context("Failed to load YTSEARCH_* settings")?;
    if let Some(sort) = cli.sort {
        settings.sort_by = sort.trim().to_string();
    }
    if let Some(limit) = cli.limit {
        settings.max_results = limit;
    }
    if let Some(base_url) = cli.base_url {
        settings.base_url = base_url;
    }
    info!(settings = ?settings, "Starting search");

    let keyword = cli.keyword.join(" ");
    let searcher = Searcher::from_settings(&settings)?;
    let videos = searcher
        .search(&keyword, settings.max_results)
        .with_context(|| format!("Search for '{}' failed", keyword))?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&videos)?);
    } else {
        print_table(&videos);
    }

    info!("Done in {:.1}s", t0.elapsed().as_secs_f64());
    Ok(())
}

fn print_table(videos: &[VideoRecord]) {
    if videos.is_empty() {
        println!("No videos found.");
        return;
    }

    println!(
        "{:>3} | {:<11} | {:>8} | {:>13} | {:<20} | {:<40}",
        "#", "Id", "Length", "Views", "Channel", "Title"
    );
    println!("{}", "-".repeat(110));

    for (i, v) in videos.iter().enumerate() {
        let views = v.view_count.map(|n| n.to_string()).unwrap_or_else(|| "-".into());
        println!(
            "{:>3} | {:<11} | {:>8} | {:>13} | {:<20} | {:<40}",
            i + 1,
            v.id,
            v.duration.as_deref().unwrap_or("-"),
            views,
            truncate(v.channel_name.as_deref().unwrap_or("-"), 20),
            truncate(&v.title, 40),
        );
    }

    println!("\n{} videos | url: https://www.youtube.com/watch?v=<id>", videos.len());
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}
