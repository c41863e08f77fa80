use axum::{
    extract::{Path, Query},
    Json,
};
use contracts::domain::a003_tool::aggregate::ToolQuery;
use serde::Deserialize;
use serde_json::json;

use super::parse_relations;
use crate::domain::a003_tool;

#[derive(Debug, Deserialize, Default)]
pub struct ListParams {
    /// Связи через запятую: company, rental_agreement_count
    pub relations: Option<String>,
    #[serde(flatten)]
    pub filter: ToolQuery,
}

#[derive(Debug, Deserialize, Default)]
pub struct GetParams {
    pub relations: Option<String>,
}

/// GET /api/tools
pub async fn list(
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<contracts::domain::a003_tool::aggregate::Tool>>, axum::http::StatusCode> {
    let relations = parse_relations(params.relations.as_deref());
    match a003_tool::service::list(&params.filter, &relations).await {
        Ok(v) => Ok(Json(v)),
        Err(e) => {
            tracing::error!("list tools: {e}");
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/tools/:id
pub async fn get_by_id(
    Path(id): Path<String>,
    Query(params): Query<GetParams>,
) -> Result<Json<contracts::domain::a003_tool::aggregate::Tool>, axum::http::StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(axum::http::StatusCode::BAD_REQUEST),
    };
    let relations = parse_relations(params.relations.as_deref());
    match a003_tool::service::get_by_id(uuid, &relations).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(axum::http::StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("get tool {id}: {e}");
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// POST /api/tools
pub async fn create(
    Json(dto): Json<contracts::domain::a003_tool::aggregate::ToolDto>,
) -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    match a003_tool::service::create(dto).await {
        Ok(id) => Ok(Json(json!({"id": id.to_string()}))),
        Err(e) => {
            tracing::error!("create tool: {e}");
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// PUT /api/tools/:id — возвращает обновлённую запись
pub async fn update(
    Path(id): Path<String>,
    Json(mut dto): Json<contracts::domain::a003_tool::aggregate::ToolDto>,
) -> Result<Json<contracts::domain::a003_tool::aggregate::Tool>, axum::http::StatusCode> {
    dto.id = Some(id.clone());
    match a003_tool::service::update(dto).await {
        Ok(v) => Ok(Json(v)),
        Err(e) => {
            tracing::error!("update tool {id}: {e}");
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// DELETE /api/tools/:id
pub async fn delete(Path(id): Path<String>) -> Result<(), axum::http::StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(axum::http::StatusCode::BAD_REQUEST),
    };
    match a003_tool::service::delete(uuid).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(axum::http::StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("delete tool {id}: {e}");
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
