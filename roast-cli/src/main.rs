mod command;
mod report;

use std::env;

use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::Layer;
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use rustls::crypto::ring::default_provider;
use sqlx::postgres::PgPoolOptions;

use roast_core::{AppState, Error};
use roast_core::locale::{Language, LocaleStore};
use roast_database::{CacheService, Database, MIGRATOR};

use clap::Parser;

use crate::command::{Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(filter_fn(|metadata| {
            let within_info_level = *metadata.level() <= tracing::Level::INFO;
            if !within_info_level {
                return false;
            }

            !metadata.target().starts_with("sqlx::query")
        }));

    tracing_subscriber::registry().with(fmt_layer).init();

    let cli = Cli::parse();

    default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("failed to install rustls ring provider"))?;

    // Load the .env file
    dotenvy::dotenv().ok();

    let state = connect().await?;
    run(&state, cli).await
}

async fn connect() -> anyhow::Result<AppState> {
    let database_url = env::var("DATABASE_URL")?;
    let max_connections = u32::try_from(env_u64("DATABASE_MAX_CONNECTIONS", 5)).unwrap_or(5);

    let db_pool = PgPoolOptions::new()
        .max_connections(max_connections.max(1))
        .connect(&database_url)
        .await?;
    info!("PostgreSQL connection established.");

    let redis_enabled = env_bool("REDIS_ENABLED", false);
    let redis_key_prefix =
        env::var("REDIS_KEY_PREFIX").unwrap_or_else(|_| "roast:prod".to_string());

    let cache = if redis_enabled {
        match env::var("REDIS_URL") {
            Ok(redis_url) => match CacheService::redis(&redis_url, redis_key_prefix.clone()) {
                Ok(cache) => {
                    info!(key_prefix = %redis_key_prefix, "Redis cache enabled.");
                    cache
                }
                Err(err) => {
                    warn!(?err, key_prefix = %redis_key_prefix, "Failed to initialize Redis cache; continuing with DB-only mode.");
                    CacheService::disabled(redis_key_prefix.clone())
                }
            },
            Err(_) => {
                warn!(key_prefix = %redis_key_prefix, "REDIS_ENABLED=true but REDIS_URL is missing; continuing with DB-only mode.");
                CacheService::disabled(redis_key_prefix.clone())
            }
        }
    } else {
        info!("Redis cache disabled (set REDIS_ENABLED=true to enable).");
        CacheService::disabled(redis_key_prefix.clone())
    };

    if cache.is_redis_enabled() {
        if let Err(err) = cache.ping().await {
            warn!(
                ?err,
                "Redis cache ping failed; cache operations will continue with fallback behavior."
            );
        } else {
            info!("Redis cache health check passed.");
        }
    }

    let db = Database::with_cache(db_pool, cache);

    let auto_run_migrations = env_bool("AUTO_RUN_MIGRATIONS", true);
    if auto_run_migrations {
        MIGRATOR.run(db.pool()).await?;
        info!("Database migrations applied.");
    } else {
        info!("Auto migrations disabled (set AUTO_RUN_MIGRATIONS=true to run at startup).");
    }

    let language = match env::var("ROAST_LANGUAGE") {
        Ok(raw) => Language::from_code(&raw).unwrap_or_else(|| {
            warn!(value = %raw, "Unknown ROAST_LANGUAGE; falling back to English.");
            Language::English
        }),
        Err(_) => Language::default(),
    };

    Ok(AppState {
        db,
        locale: LocaleStore::new(language),
    })
}

async fn run(state: &AppState, cli: Cli) -> Result<(), Error> {
    let progression = state.progression();
    let locale = &state.locale;
    let json = cli.json;

    match cli.command {
        Command::Creator { creator_id } => {
            let progress = progression.creator_progress(&creator_id).await?;
            match progress {
                Some(progress) => emit(json, &progress, || report::creator(&progress, locale))?,
                None => not_found(json, format!("no level data for creator `{creator_id}`")),
            }
        }
        Command::Season {
            season_id,
            creator_id,
        } => {
            let standing = progression.season_standing(&season_id, &creator_id).await?;
            match standing {
                Some(standing) => emit(json, &standing, || report::season(&standing, locale))?,
                None => not_found(
                    json,
                    format!("creator `{creator_id}` is not ranked in season `{season_id}`"),
                ),
            }
        }
        Command::Leaderboard { season_id, limit } => {
            let standings = progression.season_leaderboard(&season_id, limit).await?;
            emit(json, &standings, || report::leaderboard(&standings))?;
        }
        Command::Vip { club_id, user_id } => {
            let status = progression.vip_status(&club_id, &user_id).await?;
            match status {
                Some(status) => emit(json, &status, || report::vip(&status, locale))?,
                None => not_found(
                    json,
                    format!("user `{user_id}` is not a member of club `{club_id}`"),
                ),
            }
        }
        Command::Club { club_id, limit } => {
            let members = progression.club_members(&club_id, limit).await?;
            emit(json, &members, || report::club(&members))?;
        }
        Command::Gift {
            club_id,
            user_id,
            amount_sek,
        } => {
            let outcome = progression
                .record_gift(&club_id, &user_id, amount_sek)
                .await?;
            info!(
                club_id = %club_id,
                user_id = %user_id,
                amount_sek,
                vip_level = outcome.status.level,
                "Gift recorded."
            );
            emit(json, &outcome, || report::gift(&outcome, locale))?;
        }
    }

    Ok(())
}

fn emit<T, F>(json: bool, value: &T, text: F) -> anyhow::Result<()>
where
    T: Serialize,
    F: FnOnce() -> String,
{
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{}", text());
    }

    Ok(())
}

fn not_found(json: bool, message: String) {
    if json {
        println!("null");
    } else {
        println!("{message}");
    }
}

fn env_bool(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(value) => matches!(
            value.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        ),
        Err(_) => default,
    }
}

fn env_u64(key: &str, default: u64) -> u64 {
    match env::var(key) {
        Ok(value) => value.trim().parse::<u64>().unwrap_or(default),
        Err(_) => default,
    }
}
