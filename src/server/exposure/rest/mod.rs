//! REST API exposure
//!
//! Consumes a `ServerHost` and produces an Axum `Router` with the static
//! service endpoints, the record routes and any custom routes, wrapped in
//! request tracing and CORS.

use super::super::cors::cors;
use super::super::host::ServerHost;
use crate::server::router::build_record_routes;
use anyhow::Result;
use axum::{Json, Router, middleware, routing::get};
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub const SERVICE_NAME: &str = "darwin-mfc-api";
pub const API_VERSION: &str = "1.0.0";

/// REST API exposure implementation
pub struct RestExposure;

impl RestExposure {
    /// Build the REST router from a host
    ///
    /// Returns a router with:
    /// - GET /api/v1/health and GET /api/v1/version
    /// - Record CRUD routes
    /// - Custom routes
    ///
    /// CORS is applied last so it also covers unmatched paths.
    pub fn build_router(host: Arc<ServerHost>, custom_routes: Vec<Router>) -> Result<Router> {
        let mut app = Self::service_routes().merge(build_record_routes(host));

        for custom_router in custom_routes {
            app = app.merge(custom_router);
        }

        Ok(app
            .layer(TraceLayer::new_for_http())
            .layer(middleware::from_fn(cors)))
    }

    fn service_routes() -> Router {
        Router::new()
            .route("/api/v1/health", get(Self::health))
            .route("/api/v1/version", get(Self::version))
    }

    async fn health() -> Json<Value> {
        Json(json!({
            "status": "healthy",
            "service": SERVICE_NAME
        }))
    }

    async fn version() -> Json<Value> {
        Json(json!({
            "version": API_VERSION,
            "api": "v1"
        }))
    }
}
