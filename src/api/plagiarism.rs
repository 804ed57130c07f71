use axum::{extract::State, Extension, Json};

use crate::{
    api::ApiJson,
    app::AppState,
    auth::UserIdentity,
    error::AppResult,
    model::{
        ApiResponse, LiteratureCheckOut, LiteratureCheckPayload, SimilarityCheckOut,
        SimilarityCheckPayload, UrlCheckOut, UrlCheckPayload,
    },
    service,
};

pub async fn check_similarity(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<SimilarityCheckPayload>,
) -> AppResult<Json<ApiResponse<SimilarityCheckOut>>> {
    let result = service::plagiarism::check_similarity(&state.engine, payload).await?;
    Ok(Json(ApiResponse::ok(result)))
}

pub async fn check_literature(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    ApiJson(payload): ApiJson<LiteratureCheckPayload>,
) -> AppResult<Json<ApiResponse<LiteratureCheckOut>>> {
    let result =
        service::plagiarism::check_literature(&state.store, &state.engine, user.user_id, payload)
            .await?;
    Ok(Json(ApiResponse::ok(result)))
}

pub async fn check_url(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<UrlCheckPayload>,
) -> AppResult<Json<ApiResponse<UrlCheckOut>>> {
    let result = service::plagiarism::check_url(&state.fetcher, &state.engine, payload).await?;
    Ok(Json(ApiResponse::ok(result)))
}
