// ABOUTME: Exercise catalog seeding utility
// ABOUTME: Creates the schema and seeds bilingual canonical exercises into SQLite
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Exercise catalog seeder.
//!
//! Creates the matcher schema and the default bilingual (Swedish/English)
//! exercise catalog.
//!
//! Usage:
//! ```bash
//! # Seed the catalog (uses DATABASE_URL from environment)
//! cargo run --bin seed-exercises
//!
//! # Override database URL
//! cargo run --bin seed-exercises -- --database-url sqlite:./data/exercises.db
//!
//! # Verbose output
//! cargo run --bin seed-exercises -- -v
//!
//! # Force re-seed on top of existing data
//! cargo run --bin seed-exercises -- --force
//! ```

use std::env;

use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use sqlx::SqlitePool;
use tracing::info;
use uuid::Uuid;

use exercise_matcher::database::catalog::CatalogManager;
use exercise_matcher::database::{ensure_schema, CatalogStore};
use exercise_matcher::models::{Difficulty, ExerciseCatalogEntry};

#[derive(Parser)]
#[command(
    name = "seed-exercises",
    about = "Exercise catalog seeder",
    long_about = "Create the matcher schema and the default bilingual exercise catalog"
)]
struct SeedArgs {
    /// Database URL override
    #[arg(long)]
    database_url: Option<String>,

    /// Force re-seed even if data already exists
    #[arg(long)]
    force: bool,

    /// Enable verbose logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

// ============================================================================
// Catalog Seed Data
// ============================================================================

struct ExerciseSeed {
    external_id: &'static str,
    localized_name: &'static str,
    canonical_name: &'static str,
    category: &'static str,
    difficulty: &'static str,
    primary_muscles: &'static [&'static str],
    secondary_muscles: &'static [&'static str],
    required_equipment: &'static [&'static str],
}

const EXERCISES: &[ExerciseSeed] = &[
    ExerciseSeed {
        external_id: "EX-0001",
        localized_name: "Bänkpress",
        canonical_name: "Barbell Bench Press",
        category: "compound",
        difficulty: "intermediate",
        primary_muscles: &["chest"],
        secondary_muscles: &["triceps", "front_delts"],
        required_equipment: &["barbell", "bench"],
    },
    ExerciseSeed {
        external_id: "EX-0002",
        localized_name: "Knäböj",
        canonical_name: "Barbell Back Squat",
        category: "compound",
        difficulty: "intermediate",
        primary_muscles: &["quadriceps", "glutes"],
        secondary_muscles: &["hamstrings", "core"],
        required_equipment: &["barbell", "squat rack"],
    },
    ExerciseSeed {
        external_id: "EX-0003",
        localized_name: "Marklyft",
        canonical_name: "Deadlift",
        category: "compound",
        difficulty: "intermediate",
        primary_muscles: &["hamstrings", "glutes", "lower_back"],
        secondary_muscles: &["traps", "forearms"],
        required_equipment: &["barbell"],
    },
    ExerciseSeed {
        external_id: "EX-0004",
        localized_name: "Axelpress",
        canonical_name: "Overhead Press",
        category: "compound",
        difficulty: "intermediate",
        primary_muscles: &["shoulders"],
        secondary_muscles: &["triceps", "core"],
        required_equipment: &["barbell"],
    },
    ExerciseSeed {
        external_id: "EX-0005",
        localized_name: "Chins",
        canonical_name: "Pull-Up",
        category: "compound",
        difficulty: "intermediate",
        primary_muscles: &["lats"],
        secondary_muscles: &["biceps", "rear_delts"],
        required_equipment: &["pull-up bar"],
    },
    ExerciseSeed {
        external_id: "EX-0006",
        localized_name: "Armhävningar",
        canonical_name: "Push-Up",
        category: "compound",
        difficulty: "beginner",
        primary_muscles: &["chest"],
        secondary_muscles: &["triceps", "core"],
        required_equipment: &[],
    },
    ExerciseSeed {
        external_id: "EX-0007",
        localized_name: "Hantelcurl",
        canonical_name: "Dumbbell Biceps Curl",
        category: "isolation",
        difficulty: "beginner",
        primary_muscles: &["biceps"],
        secondary_muscles: &["forearms"],
        required_equipment: &["dumbbell"],
    },
    ExerciseSeed {
        external_id: "EX-0008",
        localized_name: "Rumänsk marklyft",
        canonical_name: "Romanian Deadlift",
        category: "compound",
        difficulty: "intermediate",
        primary_muscles: &["hamstrings", "glutes"],
        secondary_muscles: &["lower_back"],
        required_equipment: &["barbell"],
    },
    ExerciseSeed {
        external_id: "EX-0009",
        localized_name: "Latsdrag",
        canonical_name: "Lat Pulldown",
        category: "compound",
        difficulty: "beginner",
        primary_muscles: &["lats"],
        secondary_muscles: &["biceps"],
        required_equipment: &["cable machine"],
    },
    ExerciseSeed {
        external_id: "EX-0010",
        localized_name: "Sittande rodd",
        canonical_name: "Seated Cable Row",
        category: "compound",
        difficulty: "beginner",
        primary_muscles: &["lats", "rhomboids"],
        secondary_muscles: &["biceps", "rear_delts"],
        required_equipment: &["cable machine"],
    },
    ExerciseSeed {
        external_id: "EX-0011",
        localized_name: "Utfallssteg",
        canonical_name: "Walking Lunge",
        category: "compound",
        difficulty: "beginner",
        primary_muscles: &["quadriceps", "glutes"],
        secondary_muscles: &["hamstrings", "core"],
        required_equipment: &[],
    },
    ExerciseSeed {
        external_id: "EX-0012",
        localized_name: "Plankan",
        canonical_name: "Plank",
        category: "isolation",
        difficulty: "beginner",
        primary_muscles: &["core"],
        secondary_muscles: &["shoulders"],
        required_equipment: &[],
    },
    ExerciseSeed {
        external_id: "EX-0013",
        localized_name: "Höftlyft",
        canonical_name: "Hip Thrust",
        category: "compound",
        difficulty: "beginner",
        primary_muscles: &["glutes"],
        secondary_muscles: &["hamstrings"],
        required_equipment: &["barbell", "bench"],
    },
    ExerciseSeed {
        external_id: "EX-0014",
        localized_name: "Benpress",
        canonical_name: "Leg Press",
        category: "compound",
        difficulty: "beginner",
        primary_muscles: &["quadriceps", "glutes"],
        secondary_muscles: &["hamstrings"],
        required_equipment: &["leg press machine"],
    },
    ExerciseSeed {
        external_id: "EX-0015",
        localized_name: "Tåhävningar",
        canonical_name: "Standing Calf Raise",
        category: "isolation",
        difficulty: "beginner",
        primary_muscles: &["calves"],
        secondary_muscles: &[],
        required_equipment: &[],
    },
];

fn seed_to_entry(seed: &ExerciseSeed) -> ExerciseCatalogEntry {
    let now = Utc::now();
    ExerciseCatalogEntry {
        id: Uuid::new_v4().to_string(),
        external_id: Some(seed.external_id.to_string()),
        localized_name: seed.localized_name.to_string(),
        canonical_name: Some(seed.canonical_name.to_string()),
        category: seed.category.to_string(),
        difficulty: Difficulty::parse(seed.difficulty),
        primary_muscles: seed.primary_muscles.iter().map(ToString::to_string).collect(),
        secondary_muscles: seed
            .secondary_muscles
            .iter()
            .map(ToString::to_string)
            .collect(),
        required_equipment: seed
            .required_equipment
            .iter()
            .map(ToString::to_string)
            .collect(),
        description: None,
        instructions: vec![],
        video_url: None,
        created_at: now,
        updated_at: now,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = SeedArgs::parse();

    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(log_level).init();

    info!("=== Exercise Catalog Seeder ===");

    let database_url = args
        .database_url
        .or_else(|| env::var("DATABASE_URL").ok())
        .unwrap_or_else(|| "sqlite:./data/exercises.db".into());

    info!("Connecting to database: {}", database_url);
    let connection_url = format!("{database_url}?mode=rwc");
    let pool = SqlitePool::connect(&connection_url).await?;

    ensure_schema(&pool).await?;

    let catalog = CatalogManager::new(pool.clone());
    let existing = catalog.count().await?;
    if existing > 0 && !args.force {
        info!(
            "Catalog already seeded ({} entries). Use --force to re-seed.",
            existing
        );
        return Ok(());
    }

    info!("Seeding {} catalog entries...", EXERCISES.len());
    let mut inserted = 0;
    for seed in EXERCISES {
        // ON CONFLICT keeps existing rows, so --force only fills gaps
        catalog.insert(&seed_to_entry(seed)).await?;
        inserted += 1;
    }

    info!(
        "Done: {} entries processed, catalog now holds {} rows",
        inserted,
        catalog.count().await?
    );
    Ok(())
}
