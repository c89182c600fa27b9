//! Query and path extractors that reject with the API envelope
//!
//! axum's own `Query` and `Path` answer a plain-text 400 when the input
//! does not parse. These wrappers keep the same extraction but turn the
//! rejection into `{"success": false, "error": "..."}`.

use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::FromRequestParts;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use super::ApiResponse;

/// `axum::extract::Query` with an enveloped rejection.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiRejection))]
pub struct ApiQuery<T>(pub T);

/// `axum::extract::Path` with an enveloped rejection.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiRejection))]
pub struct ApiPath<T>(pub T);

/// Rejection for [`ApiQuery`] and [`ApiPath`].
#[derive(Debug)]
pub struct ApiRejection {
    status: StatusCode,
    message: String,
}

impl From<QueryRejection> for ApiRejection {
    fn from(rejection: QueryRejection) -> Self {
        Self {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for ApiRejection {
    fn from(rejection: PathRejection) -> Self {
        Self {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiRejection {
    fn into_response(self) -> Response {
        (self.status, Json(ApiResponse::<()>::error(self.message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use axum::routing::get;
    use axum::Router;
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize)]
    struct Filtro {
        id_estado: Option<i32>,
    }

    async fn by_query(ApiQuery(filtro): ApiQuery<Filtro>) -> String {
        format!("{:?}", filtro.id_estado)
    }

    async fn by_path(ApiPath(id): ApiPath<i32>) -> String {
        id.to_string()
    }

    fn app() -> Router {
        Router::new()
            .route("/q", get(by_query))
            .route("/p/{id}", get(by_path))
    }

    async fn get_json(uri: &str) -> (StatusCode, serde_json::Value) {
        let resp = app()
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or_default())
    }

    #[tokio::test]
    async fn well_formed_input_passes_through() {
        let resp = app()
            .oneshot(Request::get("/p/7").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn unparsable_query_is_enveloped() {
        let (status, body) = get_json("/q?id_estado=abc").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().contains("id_estado"));
    }

    #[tokio::test]
    async fn unparsable_path_is_enveloped() {
        let (status, body) = get_json("/p/abc").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert!(body["error"].is_string());
    }
}
