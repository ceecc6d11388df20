//! Export orchestration: fetch, shape, serialize, persist.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::artifact::{artifact_file_name, download_url, ArtifactError, ArtifactStore};
use crate::sheet::{
    assemble, project, write_xlsx, ColumnSchema, SheetError, Table, Workbook, FORESTAL_SHEET,
    REGISTRO_SHEET,
};
use crate::store::{fetch, Collection, DocumentStore, StoreError};

/// Steps an export moves through, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportStage {
    Received,
    FetchingRegistro,
    FetchingForestal,
    Projecting,
    Assembling,
    Persisting,
    Done,
}

impl fmt::Display for ExportStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExportStage::Received => "received",
            ExportStage::FetchingRegistro => "fetching_registro",
            ExportStage::FetchingForestal => "fetching_forestal",
            ExportStage::Projecting => "projecting",
            ExportStage::Assembling => "assembling",
            ExportStage::Persisting => "persisting",
            ExportStage::Done => "done",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to fetch {} documents: {source}", .collection.name())]
    Fetch {
        collection: Collection,
        #[source]
        source: StoreError,
    },

    #[error("failed to serialize workbook: {0}")]
    Serialize(#[from] SheetError),

    #[error("failed to store {file_name}: {source}")]
    Persist {
        file_name: String,
        #[source]
        source: ArtifactError,
    },
}

impl ExportError {
    /// Stage the export was in when it failed.
    pub fn stage(&self) -> ExportStage {
        match self {
            ExportError::Fetch {
                collection: Collection::Registro,
                ..
            } => ExportStage::FetchingRegistro,
            ExportError::Fetch {
                collection: Collection::Forestal,
                ..
            } => ExportStage::FetchingForestal,
            ExportError::Serialize(_) | ExportError::Persist { .. } => ExportStage::Persisting,
        }
    }
}

/// A stored export and where it can be downloaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub file_name: String,
    pub download_url: String,
    pub registro_rows: usize,
    pub forestal_rows: usize,
    pub size_bytes: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Exported(ExportArtifact),
    /// No registro documents for the campaign; nothing was written.
    NotFound,
}

/// Runs campaign exports against a document store and an artifact store.
#[derive(Clone)]
pub struct Exporter {
    documents: Arc<dyn DocumentStore>,
    artifacts: Arc<dyn ArtifactStore>,
    schema: Arc<ColumnSchema>,
}

impl Exporter {
    pub fn new(
        documents: Arc<dyn DocumentStore>,
        artifacts: Arc<dyn ArtifactStore>,
        schema: Arc<ColumnSchema>,
    ) -> Self {
        Self {
            documents,
            artifacts,
            schema,
        }
    }

    /// Fetch and shape a campaign's workbook without persisting it.
    /// Returns `None` when the campaign has no registro documents.
    pub async fn build_workbook(&self, campana_id: &str) -> Result<Option<Workbook>, ExportError> {
        enter(ExportStage::FetchingRegistro, campana_id);
        let registro = fetch(self.documents.as_ref(), Collection::Registro, campana_id)
            .await
            .map_err(|source| ExportError::Fetch {
                collection: Collection::Registro,
                source,
            })?;
        if registro.is_empty() {
            return Ok(None);
        }

        enter(ExportStage::FetchingForestal, campana_id);
        let forestal = fetch(self.documents.as_ref(), Collection::Forestal, campana_id)
            .await
            .map_err(|source| ExportError::Fetch {
                collection: Collection::Forestal,
                source,
            })?;

        enter(ExportStage::Projecting, campana_id);
        let registro = project(&registro, &self.schema);

        enter(ExportStage::Assembling, campana_id);
        Ok(Some(assemble(registro, Table::from_records(&forestal))))
    }

    /// Export a campaign and return the artifact's URL under `base_url`.
    #[tracing::instrument(skip(self, base_url))]
    pub async fn export(&self, campana_id: &str, base_url: &str) -> Result<ExportOutcome, ExportError> {
        enter(ExportStage::Received, campana_id);
        let Some(workbook) = self.build_workbook(campana_id).await? else {
            tracing::info!(campana_id, "no registro documents for campaign");
            return Ok(ExportOutcome::NotFound);
        };

        enter(ExportStage::Persisting, campana_id);
        let bytes = write_xlsx(&workbook)?;
        let size_bytes = bytes.len();
        let file_name = artifact_file_name(campana_id);
        self.artifacts
            .put(&file_name, bytes)
            .await
            .map_err(|source| ExportError::Persist {
                file_name: file_name.clone(),
                source,
            })?;

        enter(ExportStage::Done, campana_id);
        let artifact = ExportArtifact {
            download_url: download_url(base_url, &file_name),
            file_name,
            registro_rows: row_count(&workbook, REGISTRO_SHEET),
            forestal_rows: row_count(&workbook, FORESTAL_SHEET),
            size_bytes,
        };
        tracing::info!(
            campana_id,
            file_name = %artifact.file_name,
            registro_rows = artifact.registro_rows,
            forestal_rows = artifact.forestal_rows,
            "export written"
        );
        Ok(ExportOutcome::Exported(artifact))
    }
}

fn enter(stage: ExportStage, campana_id: &str) {
    tracing::debug!(%stage, campana_id, "export stage");
}

fn row_count(workbook: &Workbook, sheet: &str) -> usize {
    workbook
        .sheet(sheet)
        .map_or(0, |sheet| sheet.table().row_count())
}
