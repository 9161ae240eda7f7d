//! HTTP server for the interactive page.
//!
//! The page posts every control change back to `/render`; each request
//! normalizes its controls, recomputes the field on a blocking task and
//! returns both charts as SVG. Requests share no state.

use axum::{
    extract::{rejection::QueryRejection, Query},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::get,
    Router,
};
use gauss_shell_charts::{field_map_svg, potential_svg, ChartOptions};
use gauss_shell_core::palette::Palette;
use gauss_shell_core::{evaluate, Controls, ShellError};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

use crate::error::CliError;

const INDEX_HTML: &str = include_str!("../static/index.html");

/// Raw `/render` query. Every field is optional; normalization happens in
/// [`Controls::from_json`] and [`ChartOptions::from_json`].
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct RenderQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charge: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_vectors: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_palette: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surface_palette: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

/// Evaluates the shell and renders both charts into one JSON payload.
pub fn render_payload(controls: &Controls, opts: &ChartOptions) -> Result<Value, ShellError> {
    let field = evaluate(&controls.shell_params())?;
    let field_svg = field_map_svg(&field, opts, controls.show_vectors())?;
    let potential_svg = potential_svg(&field, opts)?;
    debug!(
        radius = controls.radius(),
        charge = controls.charge(),
        resolution = controls.resolution(),
        "rendered page charts"
    );
    Ok(json!({
        "controls": controls.params(),
        "metrics": field.metrics(),
        "clip_limit": field.clip_limit(),
        "reaches_boundary": field.reaches_boundary(),
        "all_inside": field.all_inside(),
        "field_svg": field_svg,
        "potential_svg": potential_svg,
    }))
}

/// Control schema plus the palette names the page may request.
pub fn schema() -> Value {
    json!({
        "controls": Controls::param_schema(),
        "palettes": Palette::list_names(),
    })
}

pub fn router() -> Router {
    Router::new()
        .route("/", get(index))
        .route("/render", get(render))
        .route("/schema", get(schema_handler))
        .layer(TraceLayer::new_for_http())
}

/// Binds `addr` and serves the page until the process is stopped.
pub async fn serve(addr: SocketAddr) -> Result<(), CliError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| CliError::Server(format!("cannot bind {addr}: {e}")))?;
    info!(%addr, "serving gauss-shell page at http://{addr}/");
    axum::serve(listener, router())
        .await
        .map_err(|e| CliError::Server(e.to_string()))
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn schema_handler() -> Json<Value> {
    Json(schema())
}

async fn render(query: Result<Query<RenderQuery>, QueryRejection>) -> Response {
    let Query(query) = match query {
        Ok(q) => q,
        Err(rejection) => {
            warn!(error = %rejection, "malformed render query");
            return error_response(rejection.status(), rejection.body_text());
        }
    };
    let raw = match serde_json::to_value(&query) {
        Ok(v) => v,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, e.to_string()),
    };
    let controls = Controls::from_json(&raw);
    let opts = ChartOptions::from_json(&raw);

    match tokio::task::spawn_blocking(move || render_payload(&controls, &opts)).await {
        Ok(Ok(payload)) => Json(payload).into_response(),
        Ok(Err(e)) => {
            warn!(error = %e, "render request rejected");
            error_response(StatusCode::BAD_REQUEST, e.to_string())
        }
        Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    }
}

fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    async fn get_json(uri: &str) -> (StatusCode, Value) {
        let response = router()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn payload_carries_metrics_and_both_charts() {
        let payload = render_payload(&Controls::default(), &ChartOptions::default()).unwrap();
        assert_eq!(payload["controls"]["radius"], json!(1.5));
        assert_eq!(payload["metrics"]["flux"], json!("outward"));
        let surface = payload["metrics"]["surface_field"].as_f64().unwrap();
        assert!((surface - 2.0e10).abs() / 2.0e10 < 1e-12);
        assert_eq!(payload["reaches_boundary"], json!(false));
        assert!(payload["field_svg"].as_str().unwrap().starts_with("<svg"));
        assert!(payload["potential_svg"].as_str().unwrap().starts_with("<svg"));
        assert!(payload["clip_limit"].as_f64().unwrap() > 0.0);
    }

    #[test]
    fn schema_lists_controls_and_palettes() {
        let s = schema();
        assert!(s["controls"].get("radius").is_some());
        assert!(s["palettes"]
            .as_array()
            .unwrap()
            .contains(&json!("inferno")));
    }

    #[tokio::test]
    async fn index_serves_the_page() {
        let response = router()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let page = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(page.contains("/render"));
        assert!(page.contains("Gauss"));
        // one listener per control, so a toggle sends a single request
        assert_eq!(page.matches(", refresh)").count(), 1);
    }

    #[tokio::test]
    async fn render_route_normalizes_controls() {
        let (status, body) =
            get_json("/render?radius=9&charge=-3.3&resolution=64&show_vectors=false").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["controls"]["radius"], json!(3.0));
        assert_eq!(body["controls"]["charge"], json!(-3.5));
        assert_eq!(body["controls"]["resolution"], json!(50));
        assert_eq!(body["controls"]["show_vectors"], json!(false));
        assert_eq!(body["metrics"]["flux"], json!("inward"));
    }

    #[tokio::test]
    async fn malformed_query_gets_json_error() {
        let (status, body) = get_json("/render?radius=abc").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!body["error"].as_str().unwrap().is_empty(), "{body}");
    }

    #[tokio::test]
    async fn render_route_defaults_without_query() {
        let (status, body) = get_json("/render").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["controls"], Controls::default().params());
    }

    #[tokio::test]
    async fn render_route_zero_charge_reports_no_flux() {
        let (status, body) = get_json("/render?charge=0").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["metrics"]["flux"], json!("none"));
        assert_eq!(body["clip_limit"], json!(0.0));
    }

    #[tokio::test]
    async fn render_route_rejects_unknown_palette() {
        let (status, body) = get_json("/render?field_palette=rainbow").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("rainbow"));
    }

    #[tokio::test]
    async fn schema_route_returns_json() {
        let (status, body) = get_json("/schema").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["controls"]["resolution"]["options"], json!([30, 50, 80]));
    }
}
