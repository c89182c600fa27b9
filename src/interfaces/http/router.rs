//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    http::HeaderValue,
    middleware,
    routing::{get, patch, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{CeldaService, UsuarioService};
use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::interfaces::http::common::ApiResponse;
use crate::interfaces::http::middleware::{auth_middleware, AuthState};
use crate::interfaces::http::modules::metrics::{
    http_metrics_middleware, prometheus_metrics, MetricsState,
};
use crate::interfaces::http::modules::request_id::request_id_middleware;
use crate::interfaces::http::modules::{auth, celdas, health, usuarios};

/// Everything the HTTP layer needs from the rest of the process
#[derive(Clone)]
pub struct ApiDependencies {
    pub celda_service: Arc<CeldaService>,
    pub usuario_service: Arc<UsuarioService>,
    pub db: DatabaseConnection,
    pub jwt_config: JwtConfig,
    pub prometheus_handle: PrometheusHandle,
    /// Empty means any origin
    pub cors_origins: Vec<String>,
}

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer token from /api/v1/auth/login"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Auth
        auth::login,
        auth::register,
        // Celdas
        celdas::list_available,
        celdas::list_celdas,
        celdas::disponibilidad,
        celdas::exportar,
        celdas::get_celda,
        celdas::historial,
        celdas::create_celda,
        celdas::update_celda,
        celdas::update_estado,
        celdas::delete_celda,
        // Usuarios
        usuarios::get_profile,
        usuarios::list_usuarios,
        usuarios::create_usuario,
        usuarios::get_usuario,
        usuarios::update_usuario,
        usuarios::delete_usuario,
    ),
    components(
        schemas(
            // Common
            ApiResponse<String>,
            // Health
            health::HealthResponse,
            health::ComponentHealth,
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            auth::RegisterRequest,
            // Celdas
            celdas::CeldaDto,
            celdas::RegistroDto,
            celdas::CreateCeldaRequest,
            celdas::UpdateCeldaRequest,
            celdas::UpdateEstadoRequest,
            celdas::DisponibilidadDto,
            celdas::CeldaExportDto,
            celdas::ExportRowDto,
            celdas::EstadoAuditDto,
            // Usuarios
            usuarios::UsuarioDto,
            usuarios::UsuarioCreadoDto,
            usuarios::RolDto,
            usuarios::CreateUsuarioRequest,
            usuarios::UpdateUsuarioRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Server health check endpoints"),
        (name = "Authentication", description = "Login (JWT) and public registration"),
        (name = "Celdas", description = "Parking cells: CRUD, status, availability, export and audit trail"),
        (name = "Usuarios", description = "Usuario management and profile"),
    ),
    info(
        title = "Parking Service API",
        version = "1.0.0",
        description = "REST API for managing parking cells and their operators",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        let parsed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|o| match o.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(origin = %o, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(parsed)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Create the API router with all routes
pub fn create_api_router(deps: ApiDependencies) -> Router {
    let middleware_state = AuthState {
        jwt_config: deps.jwt_config.clone(),
    };

    // Auth routes (public)
    let auth_routes = Router::new()
        .route("/login", post(auth::login))
        .route("/register", post(auth::register))
        .with_state(auth::AuthHandlerState {
            service: deps.usuario_service.clone(),
        });

    // Celda routes (protected)
    let celda_routes = Router::new()
        .route("/", get(celdas::list_celdas).post(celdas::create_celda))
        .route("/available", get(celdas::list_available))
        .route("/disponibilidad", get(celdas::disponibilidad))
        .route("/exportar", get(celdas::exportar))
        .route(
            "/{id}",
            get(celdas::get_celda)
                .put(celdas::update_celda)
                .delete(celdas::delete_celda),
        )
        .route("/{id}/estado", patch(celdas::update_estado))
        .route("/{id}/historial", get(celdas::historial))
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(celdas::CeldaHandlerState {
            service: deps.celda_service.clone(),
        });

    // Usuario routes (protected)
    let usuario_routes = Router::new()
        .route(
            "/",
            get(usuarios::list_usuarios).post(usuarios::create_usuario),
        )
        .route("/profile", get(usuarios::get_profile))
        .route(
            "/{id}",
            get(usuarios::get_usuario)
                .put(usuarios::update_usuario)
                .delete(usuarios::delete_usuario),
        )
        .layer(middleware::from_fn_with_state(
            middleware_state,
            auth_middleware,
        ))
        .with_state(usuarios::UsuarioHandlerState {
            service: deps.usuario_service.clone(),
        });

    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .with_state(health::HealthState {
            db: deps.db.clone(),
            started_at: Arc::new(Instant::now()),
        });

    let metrics_routes = Router::new()
        .route("/metrics", get(prometheus_metrics))
        .with_state(MetricsState {
            handle: deps.prometheus_handle.clone(),
        });

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    Router::new()
        .merge(swagger_routes)
        .merge(health_routes)
        .merge(metrics_routes)
        .nest("/api/v1/auth", auth_routes)
        .nest("/api/v1/celdas", celda_routes)
        .nest("/api/v1/usuarios", usuario_routes)
        .route_layer(middleware::from_fn(http_metrics_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors_layer(&deps.cors_origins))
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use metrics_exporter_prometheus::PrometheusBuilder;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::domain::usuario::{ROL_ADMINISTRADOR, ROL_OPERADOR};
    use crate::domain::{NewUsuario, RepositoryProvider};
    use crate::infrastructure::crypto::jwt::{create_token, DEFAULT_ISSUER};
    use crate::infrastructure::database::test_connection;
    use crate::infrastructure::SeaOrmRepositoryProvider;

    struct TestApp {
        router: Router,
        token: String,
        usuario_id: i32,
    }

    async fn test_app() -> TestApp {
        let db = test_connection().await;
        let repos: Arc<dyn RepositoryProvider> = Arc::new(SeaOrmRepositoryProvider::new(db.clone()));
        let jwt_config = JwtConfig {
            secret: "router-test-secret".into(),
            expiration_hours: 1,
            issuer: DEFAULT_ISSUER.into(),
        };

        let celda_service = Arc::new(CeldaService::new(repos.clone()));
        let usuario_service = Arc::new(UsuarioService::new(repos, jwt_config.clone()));

        let admin = usuario_service
            .create(NewUsuario {
                nombre: "Admin".into(),
                email: "admin@parking.local".into(),
                password: "admin123".into(),
                id_rol: ROL_ADMINISTRADOR,
            })
            .await
            .unwrap();
        let token = create_token(admin.id, &admin.email, admin.id_rol, &jwt_config).unwrap();

        let router = create_api_router(ApiDependencies {
            celda_service,
            usuario_service,
            db,
            jwt_config,
            prometheus_handle: PrometheusBuilder::new().build_recorder().handle(),
            cors_origins: Vec::new(),
        });

        TestApp {
            router,
            token,
            usuario_id: admin.id,
        }
    }

    impl TestApp {
        async fn send(
            &self,
            method: Method,
            uri: &str,
            body: Option<Value>,
            authenticated: bool,
        ) -> (StatusCode, Value) {
            let mut builder = Request::builder().method(method).uri(uri);
            if authenticated {
                builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", self.token));
            }
            let body = match body {
                Some(json) => {
                    builder = builder.header(header::CONTENT_TYPE, "application/json");
                    Body::from(json.to_string())
                }
                None => Body::empty(),
            };

            let resp = self
                .router
                .clone()
                .oneshot(builder.body(body).unwrap())
                .await
                .unwrap();
            let status = resp.status();
            let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
                .await
                .unwrap();
            let value = if bytes.is_empty() {
                Value::Null
            } else {
                serde_json::from_slice(&bytes).unwrap_or(Value::Null)
            };
            (status, value)
        }

        async fn get(&self, uri: &str) -> (StatusCode, Value) {
            self.send(Method::GET, uri, None, true).await
        }

        async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
            self.send(Method::POST, uri, Some(body), true).await
        }

        async fn create_celda(&self, nombre: &str, tipo: i32, estado: i32) -> i32 {
            let (status, body) = self
                .post(
                    "/api/v1/celdas",
                    json!({"nombre_celda": nombre, "id_tipo_vehiculo": tipo, "id_estado": estado}),
                )
                .await;
            assert_eq!(status, StatusCode::CREATED, "{body}");
            body["data"]["id"].as_i64().unwrap() as i32
        }
    }

    #[tokio::test]
    async fn protected_routes_require_bearer_token() {
        let app = test_app().await;
        let (status, body) = app
            .send(Method::GET, "/api/v1/celdas", None, false)
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["success"], false);

        let resp = app
            .router
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/celdas")
                    .header(header::AUTHORIZATION, "Bearer not-a-jwt")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn duplicate_celda_name_is_conflict() {
        let app = test_app().await;

        let (status, body) = app
            .post(
                "/api/v1/celdas",
                json!({"nombre_celda": "A1", "id_tipo_vehiculo": 1, "id_estado": 1}),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["success"], true);
        assert!(body["data"]["id"].is_i64());

        let (status, body) = app
            .post(
                "/api/v1/celdas",
                json!({"nombre_celda": "A1", "id_tipo_vehiculo": 2, "id_estado": 1}),
            )
            .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["success"], false);
        assert!(body.get("data").is_none());
    }

    #[tokio::test]
    async fn invalid_celda_bodies_are_bad_requests() {
        let app = test_app().await;

        let (status, _) = app
            .post(
                "/api/v1/celdas",
                json!({"nombre_celda": "   ", "id_tipo_vehiculo": 1}),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = app
            .post(
                "/api/v1/celdas",
                json!({"nombre_celda": "A1", "id_tipo_vehiculo": 0}),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let resp = app
            .router
            .clone()
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/api/v1/celdas")
                    .header(header::AUTHORIZATION, format!("Bearer {}", app.token))
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn status_updates_are_range_checked_and_audited() {
        let app = test_app().await;
        let id = app.create_celda("A1", 1, 1).await;
        let estado_uri = format!("/api/v1/celdas/{id}/estado");

        let (status, _) = app
            .send(Method::PATCH, &estado_uri, Some(json!({"id_estado": 4})), true)
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = app
            .send(
                Method::PATCH,
                "/api/v1/celdas/9999/estado",
                Some(json!({"id_estado": 3})),
                true,
            )
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        for estado in [3, 1] {
            let (status, body) = app
                .send(Method::PATCH, &estado_uri, Some(json!({"id_estado": estado})), true)
                .await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["data"]["id_estado"], estado);
        }

        let (status, body) = app.get(&format!("/api/v1/celdas/{id}/historial")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().unwrap().len(), 2);

        let (status, _) = app.get("/api/v1/celdas/9999/historial").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn listing_carries_registros_only_without_filters() {
        let app = test_app().await;
        app.create_celda("A1", 1, 1).await;
        app.create_celda("A2", 1, 2).await;
        app.create_celda("B1", 2, 1).await;

        let (status, body) = app.get("/api/v1/celdas").await;
        assert_eq!(status, StatusCode::OK);
        let all = body["data"].as_array().unwrap();
        assert_eq!(all.len(), 3);
        assert!(all.iter().all(|c| c["registros"].is_array()));

        let (_, body) = app.get("/api/v1/celdas?id_tipo_vehiculo=1").await;
        let tipo_1 = body["data"].as_array().unwrap();
        assert_eq!(tipo_1.len(), 2);
        assert!(tipo_1.iter().all(|c| c.get("registros").is_none()));

        let (_, body) = app.get("/api/v1/celdas?id_tipo_vehiculo=1&id_estado=1").await;
        assert_eq!(body["data"].as_array().unwrap().len(), 1);

        let (_, body) = app.get("/api/v1/celdas/available").await;
        assert_eq!(body["data"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn availability_requires_vehicle_type() {
        let app = test_app().await;
        let id = app.create_celda("A1", 1, 1).await;
        app.create_celda("A2", 1, 1).await;

        let (status, _) = app.get("/api/v1/celdas/disponibilidad").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = app.get("/api/v1/celdas/disponibilidad?id_tipo_vehiculo=1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["data"],
            json!({"id_tipo_vehiculo": 1, "celdas_disponibles": 2})
        );

        app.send(
            Method::PATCH,
            &format!("/api/v1/celdas/{id}/estado"),
            Some(json!({"id_estado": 2})),
            true,
        )
        .await;
        let (_, body) = app.get("/api/v1/celdas/disponibilidad?id_tipo_vehiculo=1").await;
        assert_eq!(body["data"]["celdas_disponibles"], 1);
    }

    #[tokio::test]
    async fn unparsable_query_and_path_are_enveloped() {
        let app = test_app().await;

        for uri in [
            "/api/v1/celdas?id_estado=abc",
            "/api/v1/celdas/abc",
            "/api/v1/celdas/disponibilidad?id_tipo_vehiculo=x",
            "/api/v1/celdas/abc/historial",
            "/api/v1/usuarios/abc",
        ] {
            let (status, body) = app.get(uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(body["success"], false, "{uri}");
            assert!(body["error"].is_string(), "{uri}");
        }
    }

    #[tokio::test]
    async fn update_export_and_delete_celda() {
        let app = test_app().await;
        let id = app.create_celda("A1", 1, 1).await;
        app.create_celda("B1", 2, 1).await;
        let uri = format!("/api/v1/celdas/{id}");

        let (status, body) = app
            .send(Method::PUT, &uri, Some(json!({"id_tipo_vehiculo": 3})), true)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["id_tipo_vehiculo"], 3);
        assert_eq!(body["data"]["nombre_celda"], "A1");

        let (status, _) = app
            .send(Method::PUT, &uri, Some(json!({"nombre_celda": "B1"})), true)
            .await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, _) = app
            .send(Method::PUT, "/api/v1/celdas/9999", Some(json!({"id_estado": 1})), true)
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = app
            .send(Method::PUT, &uri, Some(json!({"nombre_celda": "   "})), true)
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = app
            .send(Method::PUT, &uri, Some(json!({"id_estado": 3})), true)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["id_estado"], 3);
        let (_, body) = app.get(&format!("{uri}/historial")).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
        assert_eq!(body["data"][0]["estado_nuevo"], 3);

        let (status, body) = app.get("/api/v1/celdas/exportar").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["total_celdas"], 2);
        assert!(body["data"]["fecha_exportacion"].is_string());
        let row = &body["data"]["celdas"][0];
        assert_eq!(
            row,
            &json!({"id": id, "nombre": "A1", "tipo_vehiculo": 3, "estado": 3})
        );
        assert!(row.get("registros").is_none());

        let (status, body) = app.send(Method::DELETE, &uri, None, true).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(body, Value::Null);

        let (status, _) = app.get(&uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = app.send(Method::DELETE, &uri, None, true).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn register_login_and_profile() {
        let app = test_app().await;
        let registro = json!({
            "nombre": "Ana",
            "email": "ana@parking.local",
            "password": "secreto",
            "id_rol": ROL_OPERADOR,
        });

        let (status, body) = app
            .send(Method::POST, "/api/v1/auth/register", Some(registro.clone()), false)
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["email"], "ana@parking.local");
        assert_eq!(body["data"]["rol"], ROL_OPERADOR);
        assert!(body["data"].get("password").is_none());
        assert!(body["data"].get("contrasena").is_none());

        let (status, _) = app
            .send(Method::POST, "/api/v1/auth/register", Some(registro), false)
            .await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, _) = app
            .send(
                Method::POST,
                "/api/v1/auth/login",
                Some(json!({"email": "ana@parking.local", "password": "incorrecto"})),
                false,
            )
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, body) = app
            .send(
                Method::POST,
                "/api/v1/auth/login",
                Some(json!({"email": "ana@parking.local", "password": "secreto"})),
                false,
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["token_type"], "Bearer");
        let token = body["data"]["token"].as_str().unwrap().to_string();

        let resp = app
            .router
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/usuarios/profile")
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let profile: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(profile["data"]["id_rol"], ROL_OPERADOR);
        assert_eq!(profile["data"]["rol"]["nombre"], "Operador");
    }

    #[tokio::test]
    async fn usuario_crud() {
        let app = test_app().await;

        let (status, body) = app.get("/api/v1/usuarios/profile").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["id"], app.usuario_id);
        assert_eq!(body["data"]["rol"]["nombre"], "Administrador");

        let (status, _) = app
            .post(
                "/api/v1/usuarios",
                json!({"nombre": "Leo", "email": "sin-arroba", "password": "secreto", "id_rol": 2}),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = app
            .post(
                "/api/v1/usuarios",
                json!({"nombre": "Leo", "email": "leo@parking.local", "password": "corta", "id_rol": 2}),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = app
            .post(
                "/api/v1/usuarios",
                json!({"nombre": "Leo", "email": "leo@parking.local", "password": "secreto", "id_rol": 2}),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        let id = body["data"]["id"].as_i64().unwrap();
        let uri = format!("/api/v1/usuarios/{id}");

        let (status, body) = app.get("/api/v1/usuarios").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().unwrap().len(), 2);

        let (status, body) = app
            .send(Method::PUT, &uri, Some(json!({"nombre": "Leonardo"})), true)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["nombre"], "Leonardo");

        let (status, _) = app
            .send(Method::PUT, &uri, Some(json!({"nombre": "  "})), true)
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = app
            .send(
                Method::PUT,
                &uri,
                Some(json!({"email": "admin@parking.local"})),
                true,
            )
            .await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, _) = app.send(Method::DELETE, &uri, None, true).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = app.get(&uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn operational_endpoints_are_public() {
        let app = test_app().await;

        let (status, body) = app.send(Method::GET, "/health", None, false).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");

        let resp = app
            .router
            .clone()
            .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let (status, body) = app
            .send(Method::GET, "/api-doc/openapi.json", None, false)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["paths"].get("/api/v1/celdas/{id}/estado").is_some());
    }

    #[test]
    fn openapi_lists_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/health",
            "/api/v1/auth/login",
            "/api/v1/auth/register",
            "/api/v1/celdas",
            "/api/v1/celdas/available",
            "/api/v1/celdas/disponibilidad",
            "/api/v1/celdas/exportar",
            "/api/v1/celdas/{id}",
            "/api/v1/celdas/{id}/historial",
            "/api/v1/usuarios",
            "/api/v1/usuarios/profile",
            "/api/v1/usuarios/{id}",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
