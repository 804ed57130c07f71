use sqlx::PgPool;

/// User owning a live bearer token.
pub async fn find_user_id(pool: &PgPool, token: &str) -> Result<Option<i64>, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        r#"
        SELECT user_id
        FROM research.api_tokens
        WHERE token = $1
          AND (expires_at IS NULL OR expires_at > NOW())
        "#,
    )
    .bind(token)
    .fetch_optional(pool)
    .await
}
