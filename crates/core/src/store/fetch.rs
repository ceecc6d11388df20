use crate::document::{normalize, Document, FieldValue, Record};
use crate::query::Filter;

use super::{DocumentStore, StoreError};

/// Field every exported document is filtered on.
pub const CAMPAIGN_FIELD: &str = "campanaID";

/// Collections read by an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Registro,
    Forestal,
}

impl Collection {
    pub fn name(self) -> &'static str {
        match self {
            Collection::Registro => "registro",
            Collection::Forestal => "forestal",
        }
    }

    /// Forestal rows are exported verbatim, without a synthetic `id`.
    fn injects_id(self) -> bool {
        matches!(self, Collection::Registro)
    }
}

/// Fetch and normalize every document of `collection` belonging to a campaign.
/// An empty result is not an error.
pub async fn fetch(
    store: &dyn DocumentStore,
    collection: Collection,
    campana_id: &str,
) -> Result<Vec<Record>, StoreError> {
    let filter = Filter::field_eq(CAMPAIGN_FIELD, FieldValue::from(campana_id));
    let documents = store.query(collection.name(), &filter).await?;

    tracing::debug!(
        collection = collection.name(),
        campana_id,
        count = documents.len(),
        "fetched documents"
    );

    Ok(documents
        .into_iter()
        .map(|Document { id, fields }| {
            normalize(fields, collection.injects_id().then_some(id.as_str()))
        })
        .collect())
}
