//! Database Schema Management
//!
//! Creates the cache and audit tables at startup. All statements are
//! idempotent, so initialization can run on every boot.

use sqlx::{Pool, Postgres};
use tracing::info;

/// Initialize all database tables and indexes
pub async fn initialize_schema(pool: &Pool<Postgres>) -> Result<(), sqlx::Error> {
    info!("Initializing database schema");

    sqlx::query(r#"CREATE EXTENSION IF NOT EXISTS "uuid-ossp";"#)
        .execute(pool)
        .await?;

    // 1. Canonical media cache
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS cached_media (
            id UUID PRIMARY KEY DEFAULT uuid_generate_v4(),
            searchable_reference TEXT NULL,
            tmdb_id BIGINT NOT NULL UNIQUE,
            tmdb_series_id BIGINT NULL,
            imdb_id TEXT NULL,
            tvdb_id BIGINT NULL,
            tvrage_id BIGINT NULL,
            wikidata_id TEXT NULL,
            facebook_id TEXT NULL,
            instagram_id TEXT NULL,
            twitter_id TEXT NULL,
            genres TEXT[] NULL,
            title TEXT NOT NULL,
            original_title TEXT NOT NULL,
            overview TEXT NULL,
            episode_title TEXT NULL,
            season INTEGER NULL,
            episode INTEGER NULL,
            original_language TEXT NULL,
            media_type TEXT NOT NULL,
            year INTEGER NOT NULL,
            tagline TEXT NULL,
            used_guessit BOOLEAN NOT NULL DEFAULT FALSE,
            used_tmdb BOOLEAN NOT NULL DEFAULT FALSE,
            used_openai BOOLEAN NOT NULL DEFAULT FALSE,
            created_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP,
            modified_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_cached_media_searchable_reference
            ON cached_media (searchable_reference);
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_cached_media_tv_episode
            ON cached_media (tmdb_series_id, season, episode);
        "#,
    )
    .execute(pool)
    .await?;

    // 2. Request audit trail
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS request_history (
            id UUID PRIMARY KEY DEFAULT uuid_generate_v4(),
            endpoint TEXT NOT NULL,
            filename TEXT NOT NULL,
            requester_ip TEXT NOT NULL,
            result_status INTEGER NULL,
            result_media_id UUID NULL,
            received_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP,
            responded_at TIMESTAMPTZ NULL,
            error_message TEXT NULL,
            elapsed_time INTERVAL GENERATED ALWAYS AS (responded_at - received_at) STORED
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_request_history_received_at
            ON request_history (received_at DESC);
        "#,
    )
    .execute(pool)
    .await?;

    // 3. Language-model usage accounting
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS openai_history (
            id UUID PRIMARY KEY DEFAULT uuid_generate_v4(),
            request_id UUID NOT NULL,
            input_tokens BIGINT NOT NULL,
            cached_tokens BIGINT NOT NULL,
            output_tokens BIGINT NOT NULL,
            reasoning_tokens BIGINT NOT NULL,
            total_tokens BIGINT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_openai_history_request_id
            ON openai_history (request_id);
        "#,
    )
    .execute(pool)
    .await?;

    info!("Database schema initialized");
    Ok(())
}
