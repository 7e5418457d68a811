use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use docket_core::projection::{self, ArchiveQuery, SortOrder, TypeFilter, UpcomingQuery};
use docket_core::ContentRecord;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{info, warn};
use crate::{ApiError, AppState};

const READ_FAILED: &str = "Failed to read contents";
const SAVE_FAILED: &str = "Failed to save content";
const UPDATE_FAILED: &str = "Failed to update content";
const DELETE_FAILED: &str = "Failed to delete content";

#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    #[serde(default)]
    pub index: Value,
    pub data: ContentRecord,
}

#[derive(Debug, Deserialize)]
pub struct DeleteRequest {
    #[serde(default)]
    pub index: Value,
}

#[derive(Debug, Default, Deserialize)]
pub struct ViewParams {
    pub search: Option<String>,
    pub order: Option<String>,
    #[serde(rename = "type")]
    pub type_filter: Option<String>,
}

impl ViewParams {
    fn order(&self, default: SortOrder) -> Result<SortOrder, ApiError> {
        match self.order.as_deref() {
            None | Some("") => Ok(default),
            Some(raw) => raw.parse().map_err(ApiError::BadRequest),
        }
    }

    fn type_filter(&self) -> TypeFilter {
        match self.type_filter.as_deref() {
            Some(raw) => TypeFilter::from(raw),
            None => TypeFilter::All,
        }
    }
}

/// Accept only whole JSON numbers as positions. Range is checked by the store.
pub fn parse_index(value: &Value) -> Result<i64, ApiError> {
    let number = match value {
        Value::Number(number) => number,
        _ => return Err(ApiError::InvalidIndex),
    };
    number
        .as_i64()
        .or_else(|| {
            number
                .as_f64()
                .filter(|f| f.is_finite() && f.fract() == 0.0)
                .map(|f| f as i64)
        })
        .ok_or(ApiError::InvalidIndex)
}

fn acknowledged(status: StatusCode) -> Response {
    (status, Json(json!({ "success": true }))).into_response()
}

fn rejected(rejection: JsonRejection) -> ApiError {
    warn!("Rejected request body: {}", rejection.body_text());
    ApiError::BadRequest(rejection.body_text())
}

pub async fn list_contents(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ContentRecord>>, ApiError> {
    let records = state
        .storage
        .list_all()
        .await
        .map_err(|e| ApiError::from_store(e, READ_FAILED))?;
    Ok(Json(records))
}

pub async fn create_content(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ContentRecord>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(record) = payload.map_err(rejected)?;
    let title = record.post_title.clone().unwrap_or_default();

    state
        .storage
        .append(record)
        .await
        .map_err(|e| ApiError::from_store(e, SAVE_FAILED))?;

    info!("🆕 Created content \"{}\"", title);
    Ok(acknowledged(StatusCode::CREATED))
}

pub async fn update_content(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<UpdateRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = payload.map_err(rejected)?;
    let index = parse_index(&request.index)?;

    state
        .storage
        .replace_at(index, request.data)
        .await
        .map_err(|e| ApiError::from_store(e, UPDATE_FAILED))?;

    info!("📝 Updated content at {}", index);
    Ok(acknowledged(StatusCode::OK))
}

pub async fn delete_content(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<DeleteRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = payload.map_err(rejected)?;
    let index = parse_index(&request.index)?;

    state
        .storage
        .remove_at(index)
        .await
        .map_err(|e| ApiError::from_store(e, DELETE_FAILED))?;

    info!("🗑️ Deleted content at {}", index);
    Ok(acknowledged(StatusCode::OK))
}

pub async fn upcoming_contents(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ViewParams>,
) -> Result<Response, ApiError> {
    let query = UpcomingQuery {
        order: params.order(SortOrder::Asc)?,
        type_filter: params.type_filter(),
    };
    let records = state
        .storage
        .list_all()
        .await
        .map_err(|e| ApiError::from_store(e, READ_FAILED))?;

    let view = projection::upcoming(&records, state.today(), &query);
    Ok(Json(view).into_response())
}

pub async fn archive_contents(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ViewParams>,
) -> Result<Response, ApiError> {
    let query = ArchiveQuery {
        search: params.search.clone().unwrap_or_default(),
        order: params.order(SortOrder::Desc)?,
        type_filter: params.type_filter(),
    };
    let records = state
        .storage
        .list_all()
        .await
        .map_err(|e| ApiError::from_store(e, READ_FAILED))?;

    let view = projection::archive(&records, state.today(), &query);
    Ok(Json(view).into_response())
}

pub async fn content_types(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<String>>, ApiError> {
    let records = state
        .storage
        .list_all()
        .await
        .map_err(|e| ApiError::from_store(e, READ_FAILED))?;
    Ok(Json(projection::distinct_types(&records)))
}
