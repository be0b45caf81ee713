use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use homelab_dashboard::cli::{Cli, Commands, FeedCommand, SubredditCommand};
use homelab_dashboard::config::Config;
use homelab_dashboard::errors::DashboardResult;
use homelab_dashboard::fetch::ReqwestFetcher;
use homelab_dashboard::server::{self, state::Registry, AppState};
use homelab_dashboard::services::FollowService;
use homelab_dashboard::storage::{SqliteFeedRepository, SqliteStorage, SqliteSubredditRepository};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> DashboardResult<()> {
    let cli = Cli::parse();

    init_logging();

    let mut config = Config::from_env()?;
    let storage = SqliteStorage::new(&config.db_path)?;

    match cli.command {
        Commands::Serve { bind } => {
            if let Some(bind) = bind {
                config.bind_addr = bind;
            }
            cmd_serve(config, storage).await
        }
        Commands::Feed(command) => cmd_feed(command, &registry(storage)),
        Commands::Subreddit(command) => cmd_subreddit(command, &registry(storage)),
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("homelab_dashboard=info,tower_http=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn registry(storage: SqliteStorage) -> Registry {
    FollowService::new(
        SqliteFeedRepository::new(storage.clone()),
        SqliteSubredditRepository::new(storage),
    )
}

async fn cmd_serve(config: Config, storage: SqliteStorage) -> DashboardResult<()> {
    let fetcher = Arc::new(ReqwestFetcher::new()?);
    let state = AppState::new(storage, fetcher, &config);

    server::serve(&config, state).await
}

fn cmd_feed(command: FeedCommand, registry: &Registry) -> DashboardResult<()> {
    match command {
        FeedCommand::Add { title, url } => {
            let feed = registry.add_feed(&title, &url)?;
            println!("Feed added!");
            println!("  ID: {}", feed.id.unwrap_or_default());
            println!("  Title: {}", feed.title);
            println!("  URL: {}", feed.url);
        }
        FeedCommand::Remove { id } => {
            registry.remove_feed(id)?;
            println!("Feed {} removed.", id);
        }
        FeedCommand::List => {
            let feeds = registry.list_feeds()?;

            if feeds.is_empty() {
                println!("No feeds configured.");
                return Ok(());
            }

            println!("Configured feeds ({}):", feeds.len());
            println!();
            for feed in feeds {
                println!("  [{}] {}", feed.id.unwrap_or_default(), feed.title);
                println!("      {}", feed.url);
            }
        }
    }

    Ok(())
}

fn cmd_subreddit(command: SubredditCommand, registry: &Registry) -> DashboardResult<()> {
    match command {
        SubredditCommand::Follow { name } => {
            let subreddit = registry.follow_subreddit(&name)?;
            println!(
                "Following r/{} (ID: {})",
                subreddit.name,
                subreddit.id.unwrap_or_default()
            );
        }
        SubredditCommand::Unfollow { id } => {
            registry.unfollow_subreddit(id)?;
            println!("Subreddit {} unfollowed.", id);
        }
        SubredditCommand::List => {
            let subreddits = registry.list_subreddits()?;

            if subreddits.is_empty() {
                println!("No subreddits followed.");
                return Ok(());
            }

            println!("Followed subreddits ({}):", subreddits.len());
            for subreddit in subreddits {
                println!("  [{}] r/{}", subreddit.id.unwrap_or_default(), subreddit.name);
            }
        }
    }

    Ok(())
}
