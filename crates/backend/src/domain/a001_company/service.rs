use super::repository;
use contracts::domain::a001_company::aggregate::{Company, CompanyDto};
use uuid::Uuid;

pub async fn create(dto: CompanyDto) -> anyhow::Result<Uuid> {
    let mut aggregate = Company::new_for_insert(dto.name, dto.description);

    aggregate
        .validate()
        .into_result()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
    aggregate.before_write();

    repository::insert(&aggregate).await
}

/// Обновить запись и вернуть её актуальное состояние
pub async fn update(dto: CompanyDto) -> anyhow::Result<Company> {
    let id = dto
        .id
        .as_ref()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| anyhow::anyhow!("Invalid ID"))?;

    let mut aggregate = repository::get_by_id(id)
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

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Company>> {
    repository::get_by_id(id).await
}

pub async fn list_all() -> anyhow::Result<Vec<Company>> {
    repository::list_all().await
}
