use crate::crud_api;
use tolk_dal::language::{CreateLanguage, LanguageRepository};

use crate::state::AppState;
use axum::routing::{get, post};

crud_api!(LanguageRepository, CreateLanguage);

pub fn router() -> axum::Router<AppState> {
    axum::Router::new()
        .route("/", post(crud_api::create).get(crud_api::list))
        .route(
            "/{id}",
            get(crud_api::get)
                .delete(crud_api::delete)
                .put(crud_api::update),
        )
}
