use contracts::domain::a001_company::aggregate::Company;
use contracts::domain::a003_tool::aggregate::{Tool, ToolDto};

use crate::shared::api_utils;

pub async fn fetch_by_id(id: &str) -> Result<Tool, String> {
    api_utils::get_json(&format!("/api/tools/{}", id)).await
}

pub async fn create(dto: &ToolDto) -> Result<serde_json::Value, String> {
    api_utils::post_json("/api/tools", dto).await
}

/// PUT возвращает обновлённую запись, она кладётся в кэш вызывающей стороной
pub async fn update(id: &str, dto: &ToolDto) -> Result<Tool, String> {
    api_utils::put_json(&format!("/api/tools/{}", id), dto).await
}

/// Компании для селекта ссылки (метка — наименование)
pub async fn fetch_company_options() -> Result<Vec<Company>, String> {
    api_utils::get_json("/api/companies").await
}
