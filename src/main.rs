use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use playlist_time::api::state::AppState;
use playlist_time::calculate::{days_to_finish, speed_comparison, speed_from_arg};
use playlist_time::config::AppConfig;
use playlist_time::fetch::YouTubeClient;
use playlist_time::models::duration::{format_clock, format_human};
use playlist_time::{PlaylistOrchestrator, PlaylistResult};

#[derive(Parser)]
#[command(name = "playlist-time")]
#[command(about = "Total watch time of a YouTube playlist")]
#[command(version)]
struct Cli {
    /// Path to configuration file (optional)
    #[arg(long, default_value = "./config.toml")]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate a playlist's duration once and print it
    Calc {
        /// Playlist URL (https://www.youtube.com/playlist?list=...)
        url: String,

        /// Playback speed multiplier (e.g. 1.5)
        speed: Option<String>,

        /// Print how many days the playlist takes at this many hours per day
        #[arg(long)]
        hours_per_day: Option<f64>,
    },

    /// Start the API server and frontend
    Serve {
        /// Bind address
        #[arg(long)]
        host: Option<String>,

        /// Port number
        #[arg(long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));
    let registry = tracing_subscriber::registry().with(filter);
    if cli.json_logs {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    let mut config = AppConfig::load(&cli.config)
        .with_context(|| format!("loading configuration from {}", cli.config.display()))?;

    let client = YouTubeClient::new(&config.youtube).context("building YouTube client")?;

    match cli.command {
        Commands::Calc {
            url,
            speed,
            hours_per_day,
        } => {
            let speed = speed_from_arg(speed.as_deref());

            let orchestrator = PlaylistOrchestrator::new(config.youtube, Arc::new(client));
            let result = orchestrator.run(&url, speed).await?;
            print_report(&result, hours_per_day);
        }
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }

            tracing::info!("Starting playlist-time v{}", env!("CARGO_PKG_VERSION"));

            let orchestrator = PlaylistOrchestrator::new(config.youtube, Arc::new(client));
            if !orchestrator.is_configured() {
                tracing::warn!("YOUTUBE_API_KEY is not set; API requests will fail with 500");
            }

            let state = AppState {
                orchestrator: Arc::new(orchestrator),
            };
            let app = playlist_time::api::build_router(state, &config.server);
            let addr = format!("{}:{}", config.server.host, config.server.port);
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("Server running at http://{}", addr);
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}

fn print_report(result: &PlaylistResult, hours_per_day: Option<f64>) {
    let duration = &result.duration;

    println!("\n=== Playlist Duration Calculator ===");
    println!("Playlist: {}", result.playlist_title);
    println!("Videos: {}", result.video_count);
    println!(
        "Total Duration: {} ({} seconds)",
        duration.formatted, duration.total_seconds
    );

    if let (Some(speed), Some(formatted), Some(seconds)) = (
        result.playback_speed,
        duration.adjusted_formatted.as_deref(),
        duration.adjusted_seconds,
    ) {
        println!("\nWith {}x playback speed:", speed);
        println!("Adjusted Duration: {} ({} seconds)", formatted, seconds);
    }

    println!("\nDetailed Breakdown:");
    println!("- Days: {}", duration.detailed.days);
    println!("- Hours: {}", duration.detailed.hours);
    println!("- Minutes: {}", duration.detailed.minutes);
    println!("- Seconds: {}", duration.detailed.seconds);
    println!("- Total Hours: {:.2}", duration.detailed.total_hours);

    println!("\nAt other speeds:");
    for (speed, seconds) in speed_comparison(duration.total_seconds) {
        println!("- {}x: {} ({})", speed, format_human(seconds), format_clock(seconds));
    }

    println!("\nInsights:");
    println!("- Average: {}", format_human(result.insights.average_seconds));
    println!("- Longest: {}", format_human(result.insights.longest_seconds));
    println!("- Shortest: {}", format_human(result.insights.shortest_seconds));

    if let Some(hours) = hours_per_day {
        let watch_seconds = duration.adjusted_seconds.unwrap_or(duration.total_seconds);
        match days_to_finish(watch_seconds, hours) {
            Some(1) => println!("\nAt {}h per day: 1 day", hours),
            Some(days) => println!("\nAt {}h per day: {} days", hours, days),
            None => println!("\nHours per day must be greater than 0"),
        }
    }
}
