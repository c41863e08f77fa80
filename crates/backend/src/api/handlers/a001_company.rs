use axum::{extract::Path, Json};
use serde_json::json;

use crate::domain::a001_company;

/// GET /api/companies
pub async fn list(
) -> Result<Json<Vec<contracts::domain::a001_company::aggregate::Company>>, axum::http::StatusCode>
{
    match a001_company::service::list_all().await {
        Ok(v) => Ok(Json(v)),
        Err(e) => {
            tracing::error!("list companies: {e}");
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/companies/:id
pub async fn get_by_id(
    Path(id): Path<String>,
) -> Result<Json<contracts::domain::a001_company::aggregate::Company>, axum::http::StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(axum::http::StatusCode::BAD_REQUEST),
    };
    match a001_company::service::get_by_id(uuid).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(axum::http::StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("get company {id}: {e}");
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// POST /api/companies
pub async fn create(
    Json(dto): Json<contracts::domain::a001_company::aggregate::CompanyDto>,
) -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    match a001_company::service::create(dto).await {
        Ok(id) => Ok(Json(json!({"id": id.to_string()}))),
        Err(e) => {
            tracing::error!("create company: {e}");
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// PUT /api/companies/:id — возвращает обновлённую запись
pub async fn update(
    Path(id): Path<String>,
    Json(mut dto): Json<contracts::domain::a001_company::aggregate::CompanyDto>,
) -> Result<Json<contracts::domain::a001_company::aggregate::Company>, axum::http::StatusCode> {
    dto.id = Some(id.clone());
    match a001_company::service::update(dto).await {
        Ok(v) => Ok(Json(v)),
        Err(e) => {
            tracing::error!("update company {id}: {e}");
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// DELETE /api/companies/:id
pub async fn delete(Path(id): Path<String>) -> Result<(), axum::http::StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(axum::http::StatusCode::BAD_REQUEST),
    };
    match a001_company::service::delete(uuid).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(axum::http::StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("delete company {id}: {e}");
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
