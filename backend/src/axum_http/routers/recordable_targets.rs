use crate::{
    auth::AuthUser, axum_http::error_responses::AppError,
    usecases::recordable_targets::RecordableTargetsUseCase,
};
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::get,
};
use crates::{
    domain::{
        repositories::recordable_targets::RecordableTargetRepository,
        value_objects::{
            enums::{recordable_types::RecordableType, sort_order::SortOrder},
            recordable_targets::ListTargetsFilter,
        },
    },
    infra::db::{
        postgres::postgres_connection::PgPoolSquad,
        repositories::recordable_targets::RecordableTargetPostgres,
    },
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Deserialize)]
pub struct ListTargetsQuery {
    search: Option<String>,
    playlist_id: Option<i64>,
    group_id: Option<i64>,
    series_id: Option<i64>,
    category_id: Option<i64>,
    order: Option<SortOrder>,
    limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct LabelsQuery {
    ids: Option<String>,
}

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let recordable_target_repository = RecordableTargetPostgres::new(Arc::clone(&db_pool));
    let usecase = RecordableTargetsUseCase::new(Arc::new(recordable_target_repository));

    Router::new()
        .route("/:recordable_type", get(list_targets))
        .route("/:recordable_type/labels", get(target_labels))
        .with_state(Arc::new(usecase))
}

pub async fn list_targets<T>(
    State(usecase): State<Arc<RecordableTargetsUseCase<T>>>,
    AuthUser { user_id }: AuthUser,
    Path(raw_type): Path<String>,
    Query(query): Query<ListTargetsQuery>,
) -> impl IntoResponse
where
    T: RecordableTargetRepository + Send + Sync + 'static,
{
    let recordable_type = match raw_type.parse::<RecordableType>() {
        Ok(parsed) => parsed,
        Err(message) => return AppError::BadRequest(message).into_response(),
    };
    if query.limit.is_some_and(|limit| limit <= 0) {
        return AppError::BadRequest("limit must be a positive number".to_string())
            .into_response();
    }

    info!(%user_id, %recordable_type, "recordable_targets: picker request received");
    let filter = ListTargetsFilter {
        search: query.search,
        playlist_id: query.playlist_id,
        group_id: query.group_id,
        series_id: query.series_id,
        category_id: query.category_id,
        limit: query.limit,
        sort_order: query.order.unwrap_or(SortOrder::Asc),
    };

    match usecase.list(user_id, recordable_type, filter).await {
        Ok(rows) => Json(rows).into_response(),
        Err(err) => AppError::Internal(err).into_response(),
    }
}

pub async fn target_labels<T>(
    State(usecase): State<Arc<RecordableTargetsUseCase<T>>>,
    AuthUser { user_id }: AuthUser,
    Path(raw_type): Path<String>,
    Query(query): Query<LabelsQuery>,
) -> impl IntoResponse
where
    T: RecordableTargetRepository + Send + Sync + 'static,
{
    let recordable_type = match raw_type.parse::<RecordableType>() {
        Ok(parsed) => parsed,
        Err(message) => return AppError::BadRequest(message).into_response(),
    };
    let ids = match parse_ids(query.ids.as_deref().unwrap_or_default()) {
        Ok(ids) => ids,
        Err(message) => return AppError::BadRequest(message).into_response(),
    };

    match usecase.labels(user_id, recordable_type, ids).await {
        Ok(labels) => Json(labels).into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

/// Parses a comma separated id list such as `1,2,3`. Blank segments are ignored.
fn parse_ids(raw: &str) -> Result<Vec<i64>, String> {
    raw.split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            segment
                .parse::<i64>()
                .map_err(|_| format!("ids must be integers, got {:?}", segment))
        })
        .collect()
}
