// src/main.rs

//! sitedata CLI
//!
//! Fetches the website's content sections from the remote store and prints
//! them as JSON; useful for inspecting normalization locally.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde::Serialize;

use sitedata::error::Result;
use sitedata::models::Config;
use sitedata::pipeline::load_home;
use sitedata::services::{NewsService, ProjectService, ScheduleService};
use sitedata::store::{ContentStore, HttpContentStore};
use sitedata::translate::{HttpTranslator, TranslationCache};

#[derive(Parser, Debug)]
#[command(
    name = "sitedata",
    version = "1.0.0",
    about = "Club website content aggregator"
)]

/// CLI Arguments
struct Cli {
    #[arg(short, long, default_value = "data/config.toml")]
    config: String,

    #[command(subcommand)]
    command: Command,
}

/// CLI Commands
#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch the aggregated home payload
    Home,
    /// Fetch news items
    News {
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },
    /// Fetch one news article by exact title
    Article { title: String },
    /// Fetch projects with resolved creators
    Projects,
    /// List project category options
    Categories,
    /// Fetch the future schedule split
    Schedule,
    /// Fetch past events grouped by month
    Past,
    /// Translate a string through the caching layer
    Translate {
        text: String,
        #[arg(long, default_value = "en")]
        target: String,
    },
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Main entry point
#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = Config::load_or_default(&cli.config);
    config.validate()?;

    if let Command::Translate { text, target } = &cli.command {
        let translator = HttpTranslator::new(&config.translation)?;
        let cache = TranslationCache::new(Box::new(translator), &config.translation);
        println!("{}", cache.get(text, target).await);
        return Ok(());
    }

    let store: Arc<dyn ContentStore> = Arc::new(HttpContentStore::new(&config.store)?);

    match cli.command {
        Command::Home => {
            let payload = load_home(store, &config).await;
            print_json(&payload)?;
        }
        Command::News { limit } => {
            let news = NewsService::new(store, &config).fetch_news(limit).await;
            print_json(&news)?;
        }
        Command::Article { title } => {
            match NewsService::new(store, &config).fetch_article(&title).await {
                Some(article) => print_json(&article)?,
                None => log::error!("No article titled '{title}'"),
            }
        }
        Command::Projects => {
            let projects = ProjectService::new(store, &config).fetch_projects().await;
            print_json(&projects)?;
        }
        Command::Categories => {
            let categories = ProjectService::new(store, &config)
                .fetch_categories()
                .await;
            print_json(&categories)?;
        }
        Command::Schedule => {
            let schedule = ScheduleService::new(store, &config)
                .fetch_future_schedule()
                .await;
            print_json(&schedule)?;
        }
        Command::Past => {
            let months = ScheduleService::new(store, &config)
                .fetch_past_events_by_month()
                .await;
            print_json(&months)?;
        }
        Command::Translate { .. } => unreachable!(),
    }

    Ok(())
}
