// ABOUTME: Operator CLI for the unmapped exercise review queue
// ABOUTME: List, resolve to an existing entry, promote to a new entry, or reject
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Review queue CLI.
//!
//! Usage:
//! ```bash
//! # List unresolved names, most frequent first
//! cargo run --bin review-unmapped -- list
//!
//! # Alias a name to an existing catalog entry
//! cargo run --bin review-unmapped -- resolve --name "bicep curls" --exercise-id <id>
//!
//! # Promote a name to a brand-new catalog entry
//! cargo run --bin review-unmapped -- promote --name "Zercher Squat"
//!
//! # Reject a name outright
//! cargo run --bin review-unmapped -- reject --name "550e8400-..."
//! ```

use std::env;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use sqlx::SqlitePool;
use tracing::info;

use exercise_matcher::database::alias::AliasManager;
use exercise_matcher::database::catalog::CatalogManager;
use exercise_matcher::database::unmapped::UnmappedManager;
use exercise_matcher::database::{ensure_schema, UnmappedStore};
use exercise_matcher::{ExerciseMatcher, MatcherConfig, StaticAliasTable};

#[derive(Parser)]
#[command(
    name = "review-unmapped",
    about = "Review queue for unresolved exercise names"
)]
struct ReviewArgs {
    /// Database URL override
    #[arg(long)]
    database_url: Option<String>,

    /// Enable verbose logging
    #[arg(long, short = 'v')]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List unresolved names, most frequent first
    List,
    /// Alias an unresolved name to an existing catalog entry
    Resolve {
        /// The queued raw name
        #[arg(long)]
        name: String,
        /// Target catalog entry ID or external code
        #[arg(long)]
        exercise_id: String,
    },
    /// Promote an unresolved name to a brand-new catalog entry
    Promote {
        /// The queued raw name
        #[arg(long)]
        name: String,
        /// Canonical English name override (defaults to the raw name)
        #[arg(long)]
        canonical: Option<String>,
    },
    /// Reject an unresolved name and drop it from the queue
    Reject {
        /// The queued raw name
        #[arg(long)]
        name: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = ReviewArgs::parse();

    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(log_level).init();

    let database_url = args
        .database_url
        .or_else(|| env::var("DATABASE_URL").ok())
        .unwrap_or_else(|| "sqlite:./data/exercises.db".into());

    let pool = SqlitePool::connect(&database_url).await?;
    ensure_schema(&pool).await?;

    let unmapped = Arc::new(UnmappedManager::new(pool.clone()));
    let matcher = ExerciseMatcher::new(
        Arc::new(CatalogManager::new(pool.clone())),
        Arc::new(AliasManager::new(pool)),
        unmapped.clone(),
        StaticAliasTable::builtin(),
        MatcherConfig::from_env()?,
    );

    match args.command {
        Command::List => {
            let entries = unmapped.list_all_sorted_by_count().await?;
            if entries.is_empty() {
                info!("Review queue is empty");
                return Ok(());
            }
            for entry in entries {
                println!(
                    "{:>5}x  {:<40}  first {}  last {}  {}",
                    entry.occurrence_count,
                    entry.ai_name,
                    entry.first_seen_at.format("%Y-%m-%d"),
                    entry.last_seen_at.format("%Y-%m-%d"),
                    entry.suggested_match.as_deref().unwrap_or("-"),
                );
            }
        }
        Command::Resolve { name, exercise_id } => {
            matcher.resolve_unmapped(&name, &exercise_id).await?;
            info!("'{}' now aliases catalog entry {}", name, exercise_id);
        }
        Command::Promote { name, canonical } => {
            let entry = matcher
                .promote_unmapped(&name, canonical.as_deref())
                .await?;
            info!("'{}' promoted to new catalog entry {}", name, entry.id);
        }
        Command::Reject { name } => {
            matcher.reject_unmapped(&name).await?;
            info!("'{}' rejected and removed from the queue", name);
        }
    }

    Ok(())
}
