//! Record CRUD routes
//!
//! - GET    /api/collections/{collection}/records       - List records
//! - POST   /api/collections/{collection}/records       - Create a record
//! - GET    /api/collections/{collection}/records/{id}  - Get a record
//! - PATCH  /api/collections/{collection}/records/{id}  - Update a record
//! - DELETE /api/collections/{collection}/records/{id}  - Delete a record

use super::host::ServerHost;
use crate::core::{ApiError, Collection, Record, RecordError, ValidationError};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;
use uuid::Uuid;

/// Response for the list endpoint
#[derive(Debug, Serialize)]
pub struct ListRecordsResponse {
    pub items: Vec<Record>,
    pub total: usize,
}

pub fn build_record_routes(host: Arc<ServerHost>) -> Router {
    Router::new()
        .route(
            "/api/collections/{collection}/records",
            get(list_records).post(create_record),
        )
        .route(
            "/api/collections/{collection}/records/{id}",
            get(get_record).patch(update_record).delete(delete_record),
        )
        .with_state(host)
}

fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| {
        RecordError::InvalidId {
            value: raw.to_string(),
        }
        .into()
    })
}

fn object_body(body: Result<Json<Value>, JsonRejection>) -> Result<Map<String, Value>, ApiError> {
    match body {
        Ok(Json(Value::Object(map))) => Ok(map),
        Ok(Json(_)) => Err(ValidationError::InvalidBody {
            message: "expected a JSON object".to_string(),
        }
        .into()),
        Err(rejection) => Err(ValidationError::InvalidBody {
            message: rejection.body_text(),
        }
        .into()),
    }
}

async fn list_records(
    State(host): State<Arc<ServerHost>>,
    Path(collection): Path<String>,
) -> Result<Json<ListRecordsResponse>, ApiError> {
    let collection: Collection = collection.parse()?;
    let items = host.list_records(collection).await?;
    let total = items.len();
    Ok(Json(ListRecordsResponse { items, total }))
}

async fn create_record(
    State(host): State<Arc<ServerHost>>,
    Path(collection): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let collection: Collection = collection.parse()?;
    let fields = object_body(body)?;
    let record = host.create_record(collection, fields).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

async fn get_record(
    State(host): State<Arc<ServerHost>>,
    Path((collection, id)): Path<(String, String)>,
) -> Result<Json<Record>, ApiError> {
    let collection: Collection = collection.parse()?;
    let record = host.get_record(collection, parse_id(&id)?).await?;
    Ok(Json(record))
}

async fn update_record(
    State(host): State<Arc<ServerHost>>,
    Path((collection, id)): Path<(String, String)>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Record>, ApiError> {
    let collection: Collection = collection.parse()?;
    let id = parse_id(&id)?;
    let patch = object_body(body)?;
    let record = host.update_record(collection, id, patch).await?;
    Ok(Json(record))
}

async fn delete_record(
    State(host): State<Arc<ServerHost>>,
    Path((collection, id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    let collection: Collection = collection.parse()?;
    host.delete_record(collection, parse_id(&id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}
