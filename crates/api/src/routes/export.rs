use axum::{
    extract::{Query, State},
    http::{header, HeaderMap},
    routing::get,
    Json, Router,
};
use campaign_export_core::document::validate_campaign_id;
use campaign_export_core::export::ExportOutcome;
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Export routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/export", get(export_campaign))
}

#[derive(Debug, Deserialize)]
pub struct ExportParams {
    campana_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ExportResponse {
    download_url: String,
}

/// Build the campaign workbook and return where to download it.
async fn export_campaign(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<ExportParams>,
) -> ApiResult<Json<ExportResponse>> {
    let campana_id = validate_campaign_id(params.campana_id.as_deref())?;
    let base_url = base_url(state.config(), &headers);

    match state.exporter().export(campana_id, &base_url).await? {
        ExportOutcome::Exported(artifact) => Ok(Json(ExportResponse {
            download_url: artifact.download_url,
        })),
        ExportOutcome::NotFound => Err(ApiError::NotFound(format!(
            "no registro documents found for campaign '{campana_id}'"
        ))),
    }
}

/// Configured public origin, else the origin the client addressed.
fn base_url(config: &AppConfig, headers: &HeaderMap) -> String {
    if let Some(url) = &config.public_base_url {
        return url.clone();
    }
    headers
        .get(header::HOST)
        .and_then(|host| host.to_str().ok())
        .map(|host| format!("http://{host}"))
        .unwrap_or_else(|| format!("http://{}", config.addr()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use campaign_export_core::document::{Document, FieldMap, FieldValue};
    use campaign_export_core::store::MemoryDocumentStore;
    use serde_json::Value;

    use crate::routes::test_support::{get, router};

    fn document(id: &str, entries: Vec<(&str, FieldValue)>) -> Document {
        Document::new(id, entries.into_iter().collect::<FieldMap>())
    }

    fn seeded() -> Arc<MemoryDocumentStore> {
        let documents = Arc::new(MemoryDocumentStore::new());
        documents.insert(
            "registro",
            document(
                "r1",
                vec![
                    ("campanaID", FieldValue::from("C1")),
                    ("nameCamp", FieldValue::from("Norte")),
                ],
            ),
        );
        documents.insert("registro", document("r2", vec![("campanaID", FieldValue::from("C1"))]));
        documents.insert("forestal", document("f1", vec![("campanaID", FieldValue::from("C3"))]));
        documents
    }

    fn json(body: &[u8]) -> Value {
        serde_json::from_slice(body).unwrap()
    }

    #[tokio::test]
    async fn export_returns_download_url_served_from_export_dir() {
        let dir = tempfile::tempdir().unwrap();
        let app = router(seeded(), dir.path(), None).await;

        let (status, body) = get(&app, "/export?campana_id=C1").await;
        assert_eq!(status, StatusCode::OK);
        let url = json(&body)["download_url"].as_str().unwrap().to_string();
        assert_eq!(
            url,
            "http://exports.test:8000/downloads/export_registro_C1.xlsx"
        );
        assert!(dir.path().join("export_registro_C1.xlsx").exists());

        let path = url.trim_start_matches("http://exports.test:8000");
        let (status, body) = get(&app, path).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.starts_with(b"PK"));
    }

    #[tokio::test]
    async fn configured_public_url_wins_over_host() {
        let dir = tempfile::tempdir().unwrap();
        let app = router(seeded(), dir.path(), Some("https://files.example.org/")).await;

        let (status, body) = get(&app, "/export?campana_id=C1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json(&body)["download_url"],
            "https://files.example.org/downloads/export_registro_C1.xlsx"
        );
    }

    #[tokio::test]
    async fn unknown_campaign_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let app = router(seeded(), dir.path(), None).await;

        let (status, body) = get(&app, "/export?campana_id=C3").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json(&body)["error"]["type"], "notFound");
        assert!(!dir.path().join("export_registro_C3.xlsx").exists());
    }

    #[tokio::test]
    async fn missing_or_empty_campaign_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let app = router(seeded(), dir.path(), None).await;

        let (status, _) = get(&app, "/export").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let (status, _) = get(&app, "/export?campana_id=").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn store_outage_is_a_server_error() {
        let dir = tempfile::tempdir().unwrap();
        let documents = seeded();
        documents.set_unavailable(true);
        let app = router(documents, dir.path(), None).await;

        let (status, body) = get(&app, "/export?campana_id=C1").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json(&body)["error"]["message"], "An internal error occurred");
    }
}
