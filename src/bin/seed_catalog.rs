// ABOUTME: Catalog seeding utility for the EverGain API
// ABOUTME: Replaces session types and exercises from a JSON catalog file
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 EverGain

//! # Catalog Seeder
//!
//! Loads the session type and exercise catalog from JSON and replaces the
//! stored catalog in one transaction. Migrations already seed the default
//! catalog; this tool is for refreshing it after edits.
//!
//! ## Usage
//!
//! ```bash
//! # Seed from catalog/default_catalog.json
//! cargo run --bin seed-catalog
//!
//! # Override database URL and file
//! cargo run --bin seed-catalog -- --database-url sqlite:./data/evergain.db --file my_catalog.json
//!
//! # Dry run (validate only)
//! cargo run --bin seed-catalog -- --dry-run
//! ```

use std::collections::HashSet;
use std::env;
use std::path::PathBuf;

use clap::Parser;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use evergain_server::constants::defaults;
use evergain_server::database_plugins::{factory::Database, DatabaseProvider};
use evergain_server::errors::AppError;
use evergain_server::models::{CatalogExercise, SessionType};

/// CLI-specific error type for the seed binary
#[derive(Error, Debug)]
enum SeedError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(#[from] AppError),

    #[error("{0}")]
    Validation(String),
}

type SeedResult<T> = Result<T, SeedError>;

#[derive(Parser)]
#[command(
    name = "seed-catalog",
    about = "EverGain Catalog Seeder",
    long_about = "Load session types and exercises from JSON and replace the stored catalog"
)]
struct SeedArgs {
    /// Database URL override
    #[arg(long)]
    database_url: Option<String>,

    /// Path to the catalog JSON file
    #[arg(long, default_value = "catalog/default_catalog.json")]
    file: PathBuf,

    /// Dry run - validate the file without touching the store
    #[arg(long)]
    dry_run: bool,

    /// Enable verbose logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[derive(Deserialize)]
struct CatalogFile {
    session_types: Vec<SessionType>,
    exercises: Vec<CatalogExercise>,
}

#[tokio::main]
async fn main() -> SeedResult<()> {
    let args = SeedArgs::parse();

    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(log_level).init();

    info!("=== EverGain Catalog Seeder ===");
    if args.dry_run {
        info!("DRY RUN - no changes will be made");
    }

    let raw = tokio::fs::read_to_string(&args.file)
        .await
        .map_err(|source| SeedError::Io {
            path: args.file.clone(),
            source,
        })?;
    let catalog: CatalogFile = serde_json::from_str(&raw)?;
    validate(&catalog)?;
    info!(
        "Loaded {} session types and {} exercises from {:?}",
        catalog.session_types.len(),
        catalog.exercises.len(),
        args.file
    );

    if args.dry_run {
        return Ok(());
    }

    let database_url = args
        .database_url
        .or_else(|| env::var("DATABASE_URL").ok())
        .unwrap_or_else(|| defaults::DATABASE_URL.to_owned());
    let database = Database::new(&database_url).await?;

    database
        .replace_catalog(&catalog.session_types, &catalog.exercises)
        .await?;
    info!("Catalog replaced");
    database.close().await;
    Ok(())
}

/// Reject duplicate names; warn about exercise tags with no matching session type
fn validate(catalog: &CatalogFile) -> SeedResult<()> {
    let mut type_names = HashSet::new();
    for session_type in &catalog.session_types {
        if session_type.name.trim().is_empty() {
            return Err(SeedError::Validation("session type with empty name".into()));
        }
        if !type_names.insert(session_type.name.as_str()) {
            return Err(SeedError::Validation(format!(
                "duplicate session type: {}",
                session_type.name
            )));
        }
    }

    let mut exercise_names = HashSet::new();
    for exercise in &catalog.exercises {
        if !exercise_names.insert(exercise.name.as_str()) {
            return Err(SeedError::Validation(format!(
                "duplicate exercise: {}",
                exercise.name
            )));
        }
        for tag in &exercise.sessions {
            if !type_names.contains(tag.as_str()) {
                warn!("Exercise {} tagged with unknown session type {}", exercise.name, tag);
            }
        }
        debug!("Exercise {} ok", exercise.name);
    }
    Ok(())
}
