use super::repository;
use contracts::domain::a004_rental_agreement::aggregate::{
    RentalAgreement, RentalAgreementDto, RentalAgreementQuery,
};
use uuid::Uuid;

pub async fn create(dto: RentalAgreementDto) -> anyhow::Result<Uuid> {
    // Обязательность дат проверяется схемой DTO до построения агрегата
    dto.validate()
        .into_result()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;

    let start_date = dto
        .start_date
        .ok_or_else(|| anyhow::anyhow!("start_date is required"))?;
    let end_date = dto
        .end_date
        .ok_or_else(|| anyhow::anyhow!("end_date is required"))?;

    let mut aggregate =
        RentalAgreement::new_for_insert(start_date, end_date, dto.tool_id, dto.user_id);

    aggregate
        .validate()
        .into_result()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
    aggregate.before_write();

    repository::insert(&aggregate).await
}

/// Обновить запись и вернуть её актуальное состояние
pub async fn update(dto: RentalAgreementDto) -> anyhow::Result<RentalAgreement> {
    let id = dto
        .id
        .as_ref()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| anyhow::anyhow!("Invalid ID"))?;

    dto.validate()
        .into_result()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;

    let mut aggregate = repository::get_by_id(id, &[])
        .await?
        .ok_or_else(|| anyhow::anyhow!("Not found"))?;

    aggregate.update(&dto);

    aggregate
        .validate()
        .into_result()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
    aggregate.before_write();

    repository::update(&aggregate).await?;
    Ok(aggregate)
}

pub async fn delete(id: Uuid) -> anyhow::Result<bool> {
    repository::soft_delete(id).await
}

pub async fn get_by_id(
    id: Uuid,
    relations: &[String],
) -> anyhow::Result<Option<RentalAgreement>> {
    repository::get_by_id(id, relations).await
}

pub async fn list(
    filter: &RentalAgreementQuery,
    relations: &[String],
) -> anyhow::Result<Vec<RentalAgreement>> {
    repository::list(filter, relations).await
}
