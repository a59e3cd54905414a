use crate::crud_api;
use tolk_dal::project::{CreateProject, ProjectRepository};

use crate::state::AppState;
use axum::routing::{get, post, put};

crud_api!(ProjectRepository, CreateProject);

mod languages_api {
    use axum::{extract::Path, response::IntoResponse, Json};
    use http::StatusCode;
    use tolk_dal::project::ProjectRepository;

    use crate::error::ApiResult;

    pub async fn list(
        Path(id): Path<i64>,
        repository: ProjectRepository,
    ) -> ApiResult<impl IntoResponse> {
        let languages = repository.languages(id).await?;
        Ok((StatusCode::OK, Json(languages)))
    }

    pub async fn attach(
        Path((id, language_id)): Path<(i64, i64)>,
        repository: ProjectRepository,
    ) -> ApiResult<impl IntoResponse> {
        repository.attach_language(id, language_id).await?;
        Ok((StatusCode::NO_CONTENT, ()))
    }

    pub async fn detach(
        Path((id, language_id)): Path<(i64, i64)>,
        repository: ProjectRepository,
    ) -> ApiResult<impl IntoResponse> {
        repository.detach_language(id, language_id).await?;
        Ok((StatusCode::NO_CONTENT, ()))
    }
}

pub fn router() -> axum::Router<AppState> {
    axum::Router::new()
        .route("/", post(crud_api::create).get(crud_api::list))
        .route(
            "/{id}",
            get(crud_api::get)
                .delete(crud_api::delete)
                .put(crud_api::update),
        )
        .route("/{id}/languages", get(languages_api::list))
        .route(
            "/{id}/languages/{language_id}",
            put(languages_api::attach).delete(languages_api::detach),
        )
        .merge(super::message::router())
}
