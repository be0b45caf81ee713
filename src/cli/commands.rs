use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "homelab-dashboard")]
#[command(about = "Homelab dashboard API: favicons, RSS feeds and subreddits with short-lived caching")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API
    Serve {
        /// Address to listen on (overrides DASHBOARD_BIND)
        #[arg(long, env = "DASHBOARD_BIND")]
        bind: Option<String>,
    },

    /// Manage followed RSS/Atom feeds
    #[command(subcommand)]
    Feed(FeedCommand),

    /// Manage followed subreddits
    #[command(subcommand)]
    Subreddit(SubredditCommand),
}

#[derive(Subcommand)]
pub enum FeedCommand {
    /// Follow a feed
    Add {
        /// Display title
        title: String,
        /// Feed URL (http or https)
        url: String,
    },

    /// Stop following a feed
    Remove {
        /// Feed id as shown by `feed list`
        id: i64,
    },

    /// List followed feeds
    List,
}

#[derive(Subcommand)]
pub enum SubredditCommand {
    /// Follow a subreddit (`rust` or `r/rust`)
    Follow {
        name: String,
    },

    /// Stop following a subreddit
    Unfollow {
        /// Subreddit id as shown by `subreddit list`
        id: i64,
    },

    /// List followed subreddits
    List,
}
