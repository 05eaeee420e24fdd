//! HTTP routes for the assay setup API.
//!
//! Every handler reads the raw body, hands it to `assay_protocol` and maps
//! failures to `{"detail": ...}` responses. Handlers keep no state.

use crate::error::ApiError;
use assay_protocol::{Capabilities, HealthResponse, PlateMapResponse};
use axum::body::Bytes;
use axum::handler::HandlerWithoutStateExt;
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::Value;
use std::path::Path;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";
const CSV_DISPOSITION: &str = "attachment; filename=\"plate-maps.csv\"";

/// An empty body reads as an empty object, so field validation names
/// what is missing.
fn parse_body(body: &Bytes) -> Result<Value, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Default::default()));
    }
    Ok(serde_json::from_slice(body)?)
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::default())
}

async fn capabilities() -> Json<Capabilities> {
    Json(assay_protocol::capabilities())
}

fn build_plate_maps(body: &Bytes) -> Result<PlateMapResponse, ApiError> {
    let response = assay_protocol::plate_map(&parse_body(body)?)?;
    let wells = response.plates.iter().map(|p| p.wells.len()).sum::<usize>();
    info!(plates = response.plates.len(), wells, "plate maps generated");
    Ok(response)
}

async fn plate_map(body: Bytes) -> Result<Json<PlateMapResponse>, ApiError> {
    Ok(Json(build_plate_maps(&body)?))
}

async fn plate_map_csv(body: Bytes) -> Result<impl IntoResponse, ApiError> {
    let response = build_plate_maps(&body)?;
    let text = assay_render::plates_to_csv(&response.plates)
        .map_err(|e| ApiError::Export(e.to_string()))?;
    Ok((
        [
            (header::CONTENT_TYPE, CSV_CONTENT_TYPE),
            (header::CONTENT_DISPOSITION, CSV_DISPOSITION),
        ],
        text,
    ))
}

async fn dilutions(body: Bytes) -> Result<impl IntoResponse, ApiError> {
    let results = assay_protocol::dilutions(&parse_body(&body)?)?;
    info!(items = results.len(), "dilutions calculated");
    Ok(Json(results))
}

async fn reagent_b(body: Bytes) -> Result<impl IntoResponse, ApiError> {
    let result = assay_protocol::reagent_b(&parse_body(&body)?)?;
    info!(
        total_conditions = result.total_conditions,
        total_volume_ul = result.total_volume_ul,
        "reagent B volumes calculated"
    );
    Ok(Json(result))
}

async fn not_found() -> ApiError {
    ApiError::NotFound
}

/// Builds the application router. With `static_dir` set, unmatched GET
/// requests are served from that directory. Anything else unmatched,
/// including a known path with the wrong method, gets the JSON 404.
pub fn router(static_dir: Option<&Path>) -> Router {
    let api = Router::new()
        .route("/api/health", get(health))
        .route("/api/capabilities", get(capabilities))
        .route("/plate-map", post(plate_map))
        .route("/plate-map/csv", post(plate_map_csv))
        .route("/dilutions", post(dilutions))
        .route("/reagent-b", post(reagent_b))
        .method_not_allowed_fallback(not_found);

    let app = match static_dir {
        Some(dir) => {
            info!("Serving static files from {}", dir.display());
            api.fallback_service(
                ServeDir::new(dir)
                    .append_index_html_on_directories(true)
                    .call_fallback_on_method_not_allowed(true)
                    .not_found_service(not_found.into_service()),
            )
        }
        None => api.fallback(not_found),
    };

    app.layer(
        ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Method, Request, StatusCode};
    use serde_json::json;
    use tempfile::tempdir;
    use tower::ServiceExt;

    async fn send(app: Router, method: Method, uri: &str, body: &str) -> (StatusCode, Vec<u8>) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    async fn send_json(method: Method, uri: &str, body: Value) -> (StatusCode, Value) {
        let (status, bytes) = send(router(None), method, uri, &body.to_string()).await;
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send_json(Method::GET, "/api/health", Value::Null).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"message": "Antibody Assay Setup API is running"}));
    }

    #[tokio::test]
    async fn test_capabilities() {
        let (status, body) = send_json(Method::GET, "/api/capabilities", Value::Null).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["protocol_version"], json!("v1"));
        assert_eq!(body["negative_control"], json!("HB-44976-b1"));
    }

    #[tokio::test]
    async fn test_plate_map() {
        let (status, body) = send_json(
            Method::POST,
            "/plate-map",
            json!({"test_articles": ["HA-001"], "cell_lines": ["CL1"], "timepoints": [24]}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let wells = body["plates"][0]["wells"].as_array().unwrap();
        assert_eq!(wells.len(), 8);
        assert_eq!(wells[0]["well_id"], json!("A1"));
        assert_eq!(wells[0]["test_article"], json!("HB-44976-b1"));
    }

    #[tokio::test]
    async fn test_plate_map_validation_is_bad_request() {
        let (status, body) = send_json(
            Method::POST,
            "/plate-map",
            json!({"test_articles": ["XX-1"], "cell_lines": ["CL1"], "timepoints": [24]}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"detail": "Each test article must start with 'HA-00'"}));
    }

    #[tokio::test]
    async fn test_malformed_and_empty_bodies() {
        let (status, bytes) = send(router(None), Method::POST, "/reagent-b", "{not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({"detail": "Invalid JSON payload"}));

        let (status, bytes) = send(router(None), Method::POST, "/dilutions", "").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({"detail": "'items' must be a non-empty list"}));
    }

    #[tokio::test]
    async fn test_plate_map_csv() {
        let body = json!({"test_articles": ["HA-001"], "cell_lines": ["CL1"], "timepoints": [24]});
        let request = Request::builder()
            .method(Method::POST)
            .uri("/plate-map/csv")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = router(None).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            CSV_CONTENT_TYPE
        );
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(text.starts_with("WellID,Row,Column,Test Article,Cell Line,Timepoint (hr)"));
        assert_eq!(text.lines().count(), 9);
    }

    #[tokio::test]
    async fn test_dilutions_and_reagent() {
        let (status, body) = send_json(
            Method::POST,
            "/dilutions",
            json!({
                "items": [{"test_article": "HA-001", "stock_concentration_uM": 100}],
                "final_concentration_uM": 10,
                "total_volume_uL": 200
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["source_volume_uL"], json!(20.0));
        assert_eq!(body[0]["diluent_volume_uL"], json!(180.0));

        let (status, body) = send_json(
            Method::POST,
            "/reagent-b",
            json!({
                "number_of_timepoints": 2,
                "number_of_test_articles": 3,
                "number_of_cell_lines": 1,
                "replicates_per_condition": 4,
                "volume_per_replicate_uL": 50
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_volume_uL"], json!(1320.0));
        assert_eq!(body["reagent_b_volume_uL"], json!(33.0));
        assert_eq!(body["diluent_volume_uL"], json!(1287.0));
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let (status, body) = send_json(Method::GET, "/nowhere", Value::Null).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"detail": "Endpoint not found"}));
    }

    #[tokio::test]
    async fn test_wrong_method_is_not_found() {
        for (method, uri) in [(Method::GET, "/plate-map"), (Method::POST, "/api/health")] {
            let (status, body) = send_json(method, uri, Value::Null).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
            assert_eq!(body, json!({"detail": "Endpoint not found"}));
        }
    }

    #[tokio::test]
    async fn test_cors_header() {
        let request = Request::builder()
            .uri("/api/health")
            .header(header::ORIGIN, "http://localhost:5173")
            .body(Body::empty())
            .unwrap();
        let response = router(None).oneshot(request).await.unwrap();
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }

    #[tokio::test]
    async fn test_static_dir() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<h1>planner</h1>").unwrap();
        let (status, bytes) = send(router(Some(dir.path())), Method::GET, "/", "").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(bytes, b"<h1>planner</h1>");

        let detail = json!({"detail": "Endpoint not found"});
        let missing = [
            (Method::GET, "/missing.js"),
            (Method::POST, "/nowhere"),
            (Method::GET, "/plate-map"),
        ];
        for (method, uri) in missing {
            let (status, bytes) = send(router(Some(dir.path())), method, uri, "").await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
            let body: Value = serde_json::from_slice(&bytes).unwrap();
            assert_eq!(body, detail);
        }

        let (status, _) = send(router(Some(dir.path())), Method::POST, "/dilutions", "{}").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
