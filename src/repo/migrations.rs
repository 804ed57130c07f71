use sqlx::{Executor, PgPool};
use tracing::info;

pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    tx.execute(
        r#"
        CREATE SCHEMA IF NOT EXISTS research;
        "#,
    )
    .await?;

    tx.execute(
        r#"
        CREATE TABLE IF NOT EXISTS research.literature (
          id            BIGSERIAL PRIMARY KEY,
          title         TEXT NOT NULL,
          authors       TEXT NOT NULL DEFAULT '',
          abstract      TEXT NOT NULL DEFAULT '',
          created_at    TIMESTAMPTZ NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .await?;

    tx.execute(
        r#"
        CREATE TABLE IF NOT EXISTS research.literature_users (
          id             BIGSERIAL PRIMARY KEY,
          user_id        BIGINT NOT NULL,
          literature_id  BIGINT NOT NULL REFERENCES research.literature(id) ON DELETE CASCADE,
          created_at     TIMESTAMPTZ NOT NULL DEFAULT NOW(),
          UNIQUE (user_id, literature_id)
        );
        "#,
    )
    .await?;

    tx.execute(
        r#"
        CREATE INDEX IF NOT EXISTS idx_literature_users_user ON research.literature_users(user_id);
        "#,
    )
    .await?;

    tx.execute(
        r#"
        CREATE TABLE IF NOT EXISTS research.api_tokens (
          token       TEXT PRIMARY KEY,
          user_id     BIGINT NOT NULL,
          expires_at  TIMESTAMPTZ,
          created_at  TIMESTAMPTZ NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .await?;

    tx.commit().await?;
    info!("database schema ensured");
    Ok(())
}
