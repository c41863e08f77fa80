use anyhow::Result;
use contracts::system::access::UserRole;
use contracts::system::users::CreateUserDto;

use crate::system::users::service as user_service;

const DEFAULT_ADMIN_USERNAME: &str = "admin";
const DEFAULT_ADMIN_PASSWORD: &str = "admin12345";

/// Создать администратора при первом запуске (пустая таблица sys_users).
/// Пароль по умолчанию предназначен только для первичного входа.
pub async fn ensure_admin_user_exists() -> Result<()> {
    if user_service::count().await? > 0 {
        return Ok(());
    }

    let id = user_service::create(CreateUserDto {
        username: DEFAULT_ADMIN_USERNAME.to_string(),
        password: DEFAULT_ADMIN_PASSWORD.to_string(),
        email: None,
        full_name: Some("Администратор".to_string()),
        role: UserRole::Admin,
    })
    .await?;

    tracing::warn!(
        "Created bootstrap admin user '{}' (id {}), change the default password",
        DEFAULT_ADMIN_USERNAME,
        id
    );

    Ok(())
}
