use sqlx::PgPool;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct LiteratureRow {
    pub id: i64,
    pub title: String,
    pub authors: String,
    #[sqlx(rename = "abstract")]
    pub abstract_text: String,
}

pub async fn find_literature(pool: &PgPool, id: i64) -> Result<Option<LiteratureRow>, sqlx::Error> {
    sqlx::query_as::<_, LiteratureRow>(
        r#"
        SELECT id,
               title,
               authors,
               abstract
        FROM research.literature
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn list_user_literature(
    pool: &PgPool,
    user_id: i64,
) -> Result<Vec<LiteratureRow>, sqlx::Error> {
    sqlx::query_as::<_, LiteratureRow>(
        r#"
        SELECT l.id,
               l.title,
               l.authors,
               l.abstract
        FROM research.literature_users lu
        JOIN research.literature l ON l.id = lu.literature_id
        WHERE lu.user_id = $1
        ORDER BY lu.id
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}
