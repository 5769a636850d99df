use crate::{
    auth::AuthUser,
    axum_http::{error_responses::AppError, json_body::JsonBody},
    usecases::{recording_request_resolver::RecordingRequestResolver, recordings::RecordingsUseCase},
};
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use crates::{
    domain::{
        repositories::{
            recordable_targets::RecordableTargetRepository, recordings::RecordingRepository,
            stream_profiles::StreamProfileRepository,
        },
        value_objects::{
            enums::{
                recordable_types::RecordableType, recording_statuses::RecordingStatus,
                sort_order::SortOrder,
            },
            recording_requests::{RecordingRequest, RecordingUpdateRequest},
            recordings::{ListRecordingsFilter, RecordingSortField},
        },
    },
    infra::db::{
        postgres::postgres_connection::PgPoolSquad,
        repositories::{
            recordable_targets::RecordableTargetPostgres, recordings::RecordingPostgres,
            stream_profiles::StreamProfilePostgres,
        },
    },
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Deserialize)]
pub struct ListRecordingsQuery {
    status: Option<RecordingStatus>,
    recordable_type: Option<RecordableType>,
    search: Option<String>,
    sort: Option<RecordingSortField>,
    order: Option<SortOrder>,
    limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct BulkDeleteRequest {
    ids: Vec<i64>,
}

#[derive(Debug, Serialize)]
pub struct NavigationBadgeDto {
    badge: Option<i64>,
}

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let recording_repository = Arc::new(RecordingPostgres::new(Arc::clone(&db_pool)));
    let recordable_target_repository =
        Arc::new(RecordableTargetPostgres::new(Arc::clone(&db_pool)));
    let stream_profile_repository = Arc::new(StreamProfilePostgres::new(Arc::clone(&db_pool)));

    let request_resolver = RecordingRequestResolver::new(
        Arc::clone(&recording_repository),
        recordable_target_repository,
        Arc::clone(&stream_profile_repository),
    );

    let usecase = RecordingsUseCase::new(
        recording_repository,
        stream_profile_repository,
        Arc::new(request_resolver),
    );

    Router::new()
        .route("/", get(list_recordings).post(create_recording))
        .route("/badge", get(navigation_badge))
        .route("/form-options", get(form_options))
        .route("/bulk-delete", post(bulk_delete))
        .route(
            "/:id",
            get(get_recording)
                .patch(update_recording)
                .delete(delete_recording),
        )
        .with_state(Arc::new(usecase))
}

pub async fn create_recording<R, T, P>(
    State(usecase): State<Arc<RecordingsUseCase<R, T, P>>>,
    AuthUser { user_id }: AuthUser,
    JsonBody(request): JsonBody<RecordingRequest>,
) -> impl IntoResponse
where
    R: RecordingRepository + Send + Sync + 'static,
    T: RecordableTargetRepository + Send + Sync + 'static,
    P: StreamProfileRepository + Send + Sync + 'static,
{
    info!(%user_id, "recordings: create request received");
    match usecase.create(user_id, request).await {
        Ok(created) => (StatusCode::CREATED, Json(created)).into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

pub async fn list_recordings<R, T, P>(
    State(usecase): State<Arc<RecordingsUseCase<R, T, P>>>,
    AuthUser { user_id }: AuthUser,
    Query(query): Query<ListRecordingsQuery>,
) -> impl IntoResponse
where
    R: RecordingRepository + Send + Sync + 'static,
    T: RecordableTargetRepository + Send + Sync + 'static,
    P: StreamProfileRepository + Send + Sync + 'static,
{
    info!(%user_id, "recordings: list request received");
    if query.limit.is_some_and(|limit| limit <= 0) {
        return AppError::BadRequest("limit must be a positive number".to_string())
            .into_response();
    }

    let filter = ListRecordingsFilter {
        status: query.status,
        recordable_type: query.recordable_type,
        search: query.search,
        sort_by: query.sort.unwrap_or_default(),
        sort_order: query.order.unwrap_or_default(),
        limit: query.limit,
    };

    match usecase.list(user_id, filter).await {
        Ok(recordings) => Json(recordings).into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

pub async fn get_recording<R, T, P>(
    State(usecase): State<Arc<RecordingsUseCase<R, T, P>>>,
    AuthUser { user_id }: AuthUser,
    Path(recording_id): Path<i64>,
) -> impl IntoResponse
where
    R: RecordingRepository + Send + Sync + 'static,
    T: RecordableTargetRepository + Send + Sync + 'static,
    P: StreamProfileRepository + Send + Sync + 'static,
{
    match usecase.get(user_id, recording_id).await {
        Ok(recording) => Json(recording).into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

pub async fn update_recording<R, T, P>(
    State(usecase): State<Arc<RecordingsUseCase<R, T, P>>>,
    AuthUser { user_id }: AuthUser,
    Path(recording_id): Path<i64>,
    JsonBody(update): JsonBody<RecordingUpdateRequest>,
) -> impl IntoResponse
where
    R: RecordingRepository + Send + Sync + 'static,
    T: RecordableTargetRepository + Send + Sync + 'static,
    P: StreamProfileRepository + Send + Sync + 'static,
{
    info!(%user_id, recording_id, "recordings: update request received");
    match usecase.update(user_id, recording_id, update).await {
        Ok(recording) => Json(recording).into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

pub async fn delete_recording<R, T, P>(
    State(usecase): State<Arc<RecordingsUseCase<R, T, P>>>,
    AuthUser { user_id }: AuthUser,
    Path(recording_id): Path<i64>,
) -> impl IntoResponse
where
    R: RecordingRepository + Send + Sync + 'static,
    T: RecordableTargetRepository + Send + Sync + 'static,
    P: StreamProfileRepository + Send + Sync + 'static,
{
    info!(%user_id, recording_id, "recordings: delete request received");
    match usecase.delete(user_id, recording_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

pub async fn bulk_delete<R, T, P>(
    State(usecase): State<Arc<RecordingsUseCase<R, T, P>>>,
    AuthUser { user_id }: AuthUser,
    JsonBody(request): JsonBody<BulkDeleteRequest>,
) -> impl IntoResponse
where
    R: RecordingRepository + Send + Sync + 'static,
    T: RecordableTargetRepository + Send + Sync + 'static,
    P: StreamProfileRepository + Send + Sync + 'static,
{
    info!(%user_id, count = request.ids.len(), "recordings: bulk delete request received");
    match usecase.bulk_delete(user_id, request.ids).await {
        Ok(result) => Json(result).into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

pub async fn navigation_badge<R, T, P>(
    State(usecase): State<Arc<RecordingsUseCase<R, T, P>>>,
    AuthUser { user_id }: AuthUser,
) -> impl IntoResponse
where
    R: RecordingRepository + Send + Sync + 'static,
    T: RecordableTargetRepository + Send + Sync + 'static,
    P: StreamProfileRepository + Send + Sync + 'static,
{
    match usecase.navigation_badge(user_id).await {
        Ok(badge) => Json(NavigationBadgeDto { badge }).into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

pub async fn form_options<R, T, P>(
    State(usecase): State<Arc<RecordingsUseCase<R, T, P>>>,
    AuthUser { user_id }: AuthUser,
) -> impl IntoResponse
where
    R: RecordingRepository + Send + Sync + 'static,
    T: RecordableTargetRepository + Send + Sync + 'static,
    P: StreamProfileRepository + Send + Sync + 'static,
{
    match usecase.form_options(user_id).await {
        Ok(options) => Json(options).into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}
