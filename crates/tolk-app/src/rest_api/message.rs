use crate::{error::ApiResult, repository_from_request, state::AppState, validate::Submission};
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    routing::{get, put},
    Json,
};
use axum_valid::Garde;
use http::StatusCode;
use tolk_dal::{
    language::LanguageRepository,
    message::{CreateMessage, MessageRepository, UpdateMessage},
    message_value::MessageValueRepository,
};
use tolk_types::ValidMessageValue;
use tracing::info;

repository_from_request!(MessageRepository);
repository_from_request!(MessageValueRepository);

pub async fn index(
    Path(project_id): Path<i64>,
    repository: MessageRepository,
    State(state): State<AppState>,
) -> ApiResult<impl IntoResponse> {
    let messages = repository
        .list(project_id, state.config().list_limit)
        .await?;
    Ok((StatusCode::OK, Json(messages)))
}

pub async fn store(
    Path(project_id): Path<i64>,
    repository: MessageRepository,
    Garde(Json(payload)): Garde<Json<CreateMessage>>,
) -> ApiResult<impl IntoResponse> {
    let record = repository.create(project_id, payload).await?;

    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn show(
    Path((project_id, id)): Path<(i64, i64)>,
    repository: MessageRepository,
) -> ApiResult<impl IntoResponse> {
    let record = repository.get(project_id, id).await?;

    Ok((StatusCode::OK, Json(record)))
}

pub async fn update(
    Path((project_id, id)): Path<(i64, i64)>,
    repository: MessageRepository,
    Garde(Json(payload)): Garde<Json<UpdateMessage>>,
) -> ApiResult<impl IntoResponse> {
    let record = repository.update(project_id, id, payload).await?;

    Ok((StatusCode::OK, Json(record)))
}

pub async fn destroy(
    Path((project_id, id)): Path<(i64, i64)>,
    repository: MessageRepository,
) -> ApiResult<impl IntoResponse> {
    repository.delete(project_id, id).await?;

    Ok((StatusCode::NO_CONTENT, ()))
}

pub async fn values(
    Path((project_id, id)): Path<(i64, i64)>,
    repository: MessageRepository,
    value_repo: MessageValueRepository,
) -> ApiResult<impl IntoResponse> {
    let message = repository.get(project_id, id).await?;
    let records = value_repo.list_for_message(message.id).await?;

    Ok((StatusCode::OK, Json(records)))
}

/// Stores value of message in given language. The body is validated before
/// anything is looked up or written.
pub async fn put_value(
    Path((project_id, id, language_code)): Path<(i64, i64, String)>,
    repository: MessageRepository,
    languages: LanguageRepository,
    value_repo: MessageValueRepository,
    Submission(payload): Submission<ValidMessageValue>,
) -> ApiResult<impl IntoResponse> {
    let message = repository.get(project_id, id).await?;
    let language = languages.get_by_code(&language_code).await?;
    let record = value_repo.upsert(message.id, language.id, &payload).await?;
    info!(
        "Stored {} value of message {} in project {project_id}",
        language.code, message.name
    );

    Ok((StatusCode::OK, Json(record)))
}

pub fn router() -> axum::Router<AppState> {
    axum::Router::new()
        .route("/{id}/messages", get(index).post(store))
        .route(
            "/{id}/messages/{message_id}",
            get(show).patch(update).delete(destroy),
        )
        .route("/{id}/messages/{message_id}/values", get(values))
        .route("/{id}/messages/{message_id}/{language_code}", put(put_value))
}
