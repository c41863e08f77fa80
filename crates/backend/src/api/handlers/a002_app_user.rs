use axum::{
    extract::{Path, Query},
    Json,
};
use contracts::domain::a002_app_user::aggregate::AppUserQuery;
use serde::Deserialize;
use serde_json::json;

use crate::domain::a002_app_user;

#[derive(Debug, Deserialize, Default)]
pub struct ListParams {
    #[serde(flatten)]
    pub filter: AppUserQuery,
}

/// GET /api/users
pub async fn list(
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<contracts::domain::a002_app_user::aggregate::AppUser>>, axum::http::StatusCode>
{
    match a002_app_user::service::list(&params.filter).await {
        Ok(v) => Ok(Json(v)),
        Err(e) => {
            tracing::error!("list users: {e}");
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/users/:id
pub async fn get_by_id(
    Path(id): Path<String>,
) -> Result<Json<contracts::domain::a002_app_user::aggregate::AppUser>, axum::http::StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(axum::http::StatusCode::BAD_REQUEST),
    };
    match a002_app_user::service::get_by_id(uuid).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(axum::http::StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("get user {id}: {e}");
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// POST /api/users
pub async fn create(
    Json(dto): Json<contracts::domain::a002_app_user::aggregate::AppUserDto>,
) -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    match a002_app_user::service::create(dto).await {
        Ok(id) => Ok(Json(json!({"id": id.to_string()}))),
        Err(e) => {
            tracing::error!("create user: {e}");
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// PUT /api/users/:id — возвращает обновлённую запись
pub async fn update(
    Path(id): Path<String>,
    Json(mut dto): Json<contracts::domain::a002_app_user::aggregate::AppUserDto>,
) -> Result<Json<contracts::domain::a002_app_user::aggregate::AppUser>, axum::http::StatusCode> {
    dto.id = Some(id.clone());
    match a002_app_user::service::update(dto).await {
        Ok(v) => Ok(Json(v)),
        Err(e) => {
            tracing::error!("update user {id}: {e}");
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// DELETE /api/users/:id
pub async fn delete(Path(id): Path<String>) -> Result<(), axum::http::StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(axum::http::StatusCode::BAD_REQUEST),
    };
    match a002_app_user::service::delete(uuid).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(axum::http::StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("delete user {id}: {e}");
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
