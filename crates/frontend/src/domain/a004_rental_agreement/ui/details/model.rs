use contracts::domain::a002_app_user::aggregate::AppUser;
use contracts::domain::a003_tool::aggregate::Tool;
use contracts::domain::a004_rental_agreement::aggregate::{RentalAgreement, RentalAgreementDto};

use crate::shared::api_utils;

pub async fn fetch_by_id(id: &str) -> Result<RentalAgreement, String> {
    api_utils::get_json(&format!("/api/rental-agreements/{}", id)).await
}

pub async fn create(dto: &RentalAgreementDto) -> Result<serde_json::Value, String> {
    api_utils::post_json("/api/rental-agreements", dto).await
}

/// PUT возвращает обновлённую запись, она кладётся в кэш вызывающей стороной
pub async fn update(id: &str, dto: &RentalAgreementDto) -> Result<RentalAgreement, String> {
    api_utils::put_json(&format!("/api/rental-agreements/{}", id), dto).await
}

/// Инструменты для селекта ссылки (метка — наименование)
pub async fn fetch_tool_options() -> Result<Vec<Tool>, String> {
    api_utils::get_json("/api/tools").await
}

/// Пользователи для селекта ссылки (метка — email)
pub async fn fetch_user_options() -> Result<Vec<AppUser>, String> {
    api_utils::get_json("/api/users").await
}
