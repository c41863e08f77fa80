use super::repository;
use contracts::domain::a003_tool::aggregate::{Tool, ToolDto, ToolQuery};
use uuid::Uuid;

pub async fn create(dto: ToolDto) -> anyhow::Result<Uuid> {
    let mut aggregate = Tool::new_for_insert(dto.name, dto.status, dto.company_id);

    aggregate
        .validate()
        .into_result()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
    aggregate.before_write();

    repository::insert(&aggregate).await
}

/// Обновить запись и вернуть её актуальное состояние
pub async fn update(dto: ToolDto) -> anyhow::Result<Tool> {
    let id = dto
        .id
        .as_ref()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| anyhow::anyhow!("Invalid ID"))?;

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

pub async fn get_by_id(id: Uuid, relations: &[String]) -> anyhow::Result<Option<Tool>> {
    repository::get_by_id(id, relations).await
}

pub async fn list(filter: &ToolQuery, relations: &[String]) -> anyhow::Result<Vec<Tool>> {
    repository::list(filter, relations).await
}
