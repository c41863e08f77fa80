use axum::{
    extract::{Path, Query},
    Json,
};
use contracts::domain::a004_rental_agreement::aggregate::RentalAgreementQuery;
use serde::Deserialize;
use serde_json::json;

use super::parse_relations;
use crate::domain::a004_rental_agreement;

#[derive(Debug, Deserialize, Default)]
pub struct ListParams {
    /// Связи через запятую: tool, user
    pub relations: Option<String>,
    #[serde(flatten)]
    pub filter: RentalAgreementQuery,
}

#[derive(Debug, Deserialize, Default)]
pub struct GetParams {
    pub relations: Option<String>,
}

/// GET /api/rental-agreements
pub async fn list(
    Query(params): Query<ListParams>,
) -> Result<
    Json<Vec<contracts::domain::a004_rental_agreement::aggregate::RentalAgreement>>,
    axum::http::StatusCode,
> {
    let relations = parse_relations(params.relations.as_deref());
    match a004_rental_agreement::service::list(&params.filter, &relations).await {
        Ok(v) => Ok(Json(v)),
        Err(e) => {
            tracing::error!("list rental agreements: {e}");
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/rental-agreements/:id
pub async fn get_by_id(
    Path(id): Path<String>,
    Query(params): Query<GetParams>,
) -> Result<
    Json<contracts::domain::a004_rental_agreement::aggregate::RentalAgreement>,
    axum::http::StatusCode,
> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(axum::http::StatusCode::BAD_REQUEST),
    };
    let relations = parse_relations(params.relations.as_deref());
    match a004_rental_agreement::service::get_by_id(uuid, &relations).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(axum::http::StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("get rental agreement {id}: {e}");
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// POST /api/rental-agreements
pub async fn create(
    Json(dto): Json<contracts::domain::a004_rental_agreement::aggregate::RentalAgreementDto>,
) -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    match a004_rental_agreement::service::create(dto).await {
        Ok(id) => Ok(Json(json!({"id": id.to_string()}))),
        Err(e) => {
            tracing::error!("create rental agreement: {e}");
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// PUT /api/rental-agreements/:id — возвращает обновлённую запись
pub async fn update(
    Path(id): Path<String>,
    Json(mut dto): Json<contracts::domain::a004_rental_agreement::aggregate::RentalAgreementDto>,
) -> Result<
    Json<contracts::domain::a004_rental_agreement::aggregate::RentalAgreement>,
    axum::http::StatusCode,
> {
    dto.id = Some(id.clone());
    match a004_rental_agreement::service::update(dto).await {
        Ok(v) => Ok(Json(v)),
        Err(e) => {
            tracing::error!("update rental agreement {id}: {e}");
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// DELETE /api/rental-agreements/:id
pub async fn delete(Path(id): Path<String>) -> Result<(), axum::http::StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(axum::http::StatusCode::BAD_REQUEST),
    };
    match a004_rental_agreement::service::delete(uuid).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(axum::http::StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("delete rental agreement {id}: {e}");
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
