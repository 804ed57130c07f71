//! Lookup seam between request handlers and persistence.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;

use crate::{repo, similarity::CorpusCandidate};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteratureRecord {
    pub id: i64,
    pub title: String,
    pub authors: String,
    pub abstract_text: String,
}

impl LiteratureRecord {
    /// Abstract, or the title when the abstract is blank.
    pub fn comparison_text(&self) -> Option<&str> {
        [self.abstract_text.as_str(), self.title.as_str()]
            .into_iter()
            .find(|text| !text.is_empty())
    }

    pub fn into_candidate(self) -> CorpusCandidate {
        let text = self.comparison_text().map(str::to_string);
        CorpusCandidate {
            id: self.id,
            title: self.title,
            authors: self.authors,
            text,
        }
    }
}

impl From<repo::literature::LiteratureRow> for LiteratureRecord {
    fn from(row: repo::literature::LiteratureRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            authors: row.authors,
            abstract_text: row.abstract_text,
        }
    }
}

#[async_trait]
pub trait LiteratureStore: Send + Sync {
    /// User id for a live bearer token.
    async fn resolve_token(&self, token: &str) -> anyhow::Result<Option<i64>>;

    async fn find_literature(&self, id: i64) -> anyhow::Result<Option<LiteratureRecord>>;

    /// Every record in the user's collection, in the order it was added.
    async fn list_user_literature(&self, user_id: i64) -> anyhow::Result<Vec<LiteratureRecord>>;
}

#[derive(Clone)]
pub struct PgLiteratureStore {
    pool: PgPool,
}

impl PgLiteratureStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LiteratureStore for PgLiteratureStore {
    async fn resolve_token(&self, token: &str) -> anyhow::Result<Option<i64>> {
        Ok(repo::tokens::find_user_id(&self.pool, token).await?)
    }

    async fn find_literature(&self, id: i64) -> anyhow::Result<Option<LiteratureRecord>> {
        let row = repo::literature::find_literature(&self.pool, id).await?;
        Ok(row.map(LiteratureRecord::from))
    }

    async fn list_user_literature(&self, user_id: i64) -> anyhow::Result<Vec<LiteratureRecord>> {
        let rows = repo::literature::list_user_literature(&self.pool, user_id).await?;
        Ok(rows.into_iter().map(LiteratureRecord::from).collect())
    }
}

/// Store backed by in-process maps, for tests and local experiments.
#[derive(Debug, Clone, Default)]
pub struct MemoryLiteratureStore {
    tokens: HashMap<String, i64>,
    literature: Vec<LiteratureRecord>,
    links: Vec<(i64, i64)>,
}

impl MemoryLiteratureStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(mut self, token: impl Into<String>, user_id: i64) -> Self {
        self.tokens.insert(token.into(), user_id);
        self
    }

    pub fn with_literature(mut self, record: LiteratureRecord) -> Self {
        self.literature.retain(|existing| existing.id != record.id);
        self.literature.push(record);
        self
    }

    /// Adds `literature_id` to `user_id`'s collection.
    pub fn with_link(mut self, user_id: i64, literature_id: i64) -> Self {
        if !self.links.contains(&(user_id, literature_id)) {
            self.links.push((user_id, literature_id));
        }
        self
    }
}

#[async_trait]
impl LiteratureStore for MemoryLiteratureStore {
    async fn resolve_token(&self, token: &str) -> anyhow::Result<Option<i64>> {
        Ok(self.tokens.get(token).copied())
    }

    async fn find_literature(&self, id: i64) -> anyhow::Result<Option<LiteratureRecord>> {
        Ok(self.literature.iter().find(|record| record.id == id).cloned())
    }

    async fn list_user_literature(&self, user_id: i64) -> anyhow::Result<Vec<LiteratureRecord>> {
        let records = self
            .links
            .iter()
            .filter(|(owner, _)| *owner == user_id)
            .filter_map(|(_, literature_id)| {
                self.literature
                    .iter()
                    .find(|record| record.id == *literature_id)
                    .cloned()
            })
            .collect();
        Ok(records)
    }
}
