use async_trait::async_trait;
use serde_json::Value;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::document::Document;
use crate::query::Filter;

use super::{DocumentStore, StoreError, CAMPAIGN_FIELD};

// The campaign key is spelled out so the planner can match the
// `content -> 'campanaID'` expression index.
const SELECT_BY_CAMPAIGN: &str = "SELECT document_id, content FROM documents \
     WHERE collection = $1 AND content -> 'campanaID' = $2";

const SELECT_BY_FIELD: &str = "SELECT document_id, content FROM documents \
     WHERE collection = $1 AND content -> $3::text = $2";

fn select_sql(field: &str) -> &'static str {
    if field == CAMPAIGN_FIELD {
        SELECT_BY_CAMPAIGN
    } else {
        SELECT_BY_FIELD
    }
}

/// Documents kept as JSONB rows in the `documents` table, keyed by
/// `(collection, document_id)`.
#[derive(Debug, Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn query(&self, collection: &str, filter: &Filter) -> Result<Vec<Document>, StoreError> {
        if filter.field().is_empty() {
            return Err(StoreError::QueryRejected("filter field cannot be empty".into()));
        }

        let sql = select_sql(filter.field());
        let mut query = sqlx::query_as::<_, (String, Json<Value>)>(sql)
            .bind(collection)
            .bind(Json(filter.value().to_json()));
        if sql == SELECT_BY_FIELD {
            query = query.bind(filter.field());
        }
        let rows = query.fetch_all(&self.pool).await?;

        rows.into_iter()
            .map(|(id, Json(content))| Document::from_json(id, content).map_err(StoreError::from))
            .collect()
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
